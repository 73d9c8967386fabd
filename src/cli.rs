#[cfg(feature = "time")]
use crate::util::event_log::{log_event, Event};
use crate::{
    assets::TileSource, config::Config, image::ImageWriter, progress::Progress, render::render,
};
use anyhow::Result;
use log::{error, info};
use std::path::Path;
#[cfg(feature = "time")]
use std::time::Instant;

pub const EXIT_SUCCESS: u8 = 0;
pub const EXIT_FAILURE: u8 = 1;
pub const EXIT_USAGE: u8 = 1;

fn usage(prog: &str) -> u8 {
    eprintln!("\nCreate a progressbar.");
    eprintln!("Usage: {} <number> <total>\n", prog);

    EXIT_USAGE
}

/// Draws `progress` from `source` and writes it to `output`. Returns the exit status.
pub fn write_progress_bar(
    progress: &Progress,
    source: impl TileSource,
    output: &Path,
) -> Result<u8> {
    let Some(frame) = render(progress, source)? else {
        error!("Nothing to draw, {:?} was not written", output);
        return Ok(EXIT_FAILURE);
    };

    #[cfg(feature = "time")]
    let a = Instant::now();

    ImageWriter::write_to_path(&frame, output)?;

    #[cfg(feature = "time")]
    log_event("", Event::EncodePng, Some(a.elapsed()));

    info!("Wrote {:?}", output);

    Ok(EXIT_SUCCESS)
}

/// Parses `<prog> <number> <total>` and writes the bar described by `config`.
pub fn run(args: impl IntoIterator<Item = String>, config: &Config) -> u8 {
    let mut args = args.into_iter();
    let prog = args.next().unwrap_or_else(|| "drawbar".to_owned());

    let (Some(count), Some(total)) = (args.next(), args.next()) else {
        return usage(&prog);
    };

    let (Ok(count), Ok(total)) = (count.trim().parse::<i32>(), total.trim().parse::<i32>()) else {
        eprintln!("Both <number> and <total> must be integers.");
        return usage(&prog);
    };

    let progress = match Progress::new(count, total) {
        Ok(progress) => progress,
        Err(err) => {
            eprintln!("{}", err);
            return usage(&prog);
        }
    };

    #[cfg(feature = "time")]
    let start = Instant::now();

    let status = match write_progress_bar(&progress, config.tile_source(), &config.output) {
        Ok(status) => status,
        Err(err) => {
            error!("{:#}", err);
            EXIT_FAILURE
        }
    };

    #[cfg(feature = "time")]
    log_event("", Event::TotalElapsed, Some(start.elapsed()));

    status
}
