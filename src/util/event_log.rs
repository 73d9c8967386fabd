use std::time::Duration;

pub const RESET: &str = "\x1b[0m";
pub const BLUE: &str = "\x1b[34m";
pub const GREEN: &str = "\x1b[32m";
pub const CYAN: &str = "\x1b[36m";
pub const YELLOW: &str = "\x1b[33m";
pub const MAGENTA: &str = "\x1b[35m";
pub const RED: &str = "\x1b[31m";

#[derive(Debug)]
pub enum Event {
    TotalElapsed,
    ComposeBar,
    RenderLabel,
    AssembleFrame,
    EncodePng,
}

impl Event {
    const fn color(&self) -> &'static str {
        match self {
            Self::TotalElapsed => YELLOW,
            Self::ComposeBar => MAGENTA,
            Self::RenderLabel => CYAN,
            Self::AssembleFrame => GREEN,
            Self::EncodePng => BLUE,
        }
    }
}

/// Prints a colored timing line to stderr.
pub fn log_event(msg: &str, event: Event, duration: Option<Duration>) {
    if let Some(duration) = duration {
        eprintln!("{}{:?}\t{:?}\t{}", event.color(), duration, event, msg);
    } else {
        eprintln!("{}{:?}\t{}", event.color(), event, msg)
    }

    if matches!(event, Event::TotalElapsed) {
        eprintln!("{RESET}");
    }
}
