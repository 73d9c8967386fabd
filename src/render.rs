#[cfg(feature = "time")]
use crate::util::event_log::{log_event, Event};
use crate::{
    assets::TileSource,
    bar::BarCompositor,
    frame::assemble,
    image::{grammar::ImageExt, Image},
    label::{build_label, DEFAULT_HEIGHT},
    progress::Progress,
};
use anyhow::Result;
use log::error;
#[cfg(feature = "time")]
use std::time::Instant;

/// Draws the bar and its `"  n/t"` label into one image.
///
/// A bar or label that cannot be built is logged and left out, so the frame holds
/// whatever could be drawn. `Ok(None)` means neither part could be built.
pub fn render(progress: &Progress, source: impl TileSource) -> Result<Option<Image>> {
    #[cfg(feature = "time")]
    let a = Instant::now();

    let bar = match BarCompositor::new(source).create(progress) {
        Ok(bar) => Some(bar),
        Err(err) => {
            error!("{:#}", err);
            None
        }
    };

    #[cfg(feature = "time")]
    log_event("", Event::ComposeBar, Some(a.elapsed()));

    #[cfg(feature = "time")]
    let b = Instant::now();

    let height = bar.as_ref().map_or(DEFAULT_HEIGHT, |bar| bar.height());

    let label = match build_label(progress, height) {
        Ok(label) => Some(label),
        Err(err) => {
            error!("Could not create the label: {:#}", err);
            None
        }
    };

    #[cfg(feature = "time")]
    log_event("", Event::RenderLabel, Some(b.elapsed()));

    #[cfg(feature = "time")]
    let c = Instant::now();

    let frame = assemble(bar.as_ref(), label.as_ref())?;

    #[cfg(feature = "time")]
    log_event("", Event::AssembleFrame, Some(c.elapsed()));

    Ok(frame)
}
