use crate::{
    image::Image,
    progress::Progress,
    text::{TextRenderer, ADVANCE, LINE_HEIGHT},
};
use anyhow::Result;

/// Label height used when there is no bar to match.
pub const DEFAULT_HEIGHT: u32 = 20;

/// Room for the slash, the two leading spaces and some slack.
pub const MARGIN: u32 = 18;

/// Number of base-10 digits in `value`. Zero has one digit, negative values
/// count as none.
pub const fn digit_count(value: i32) -> u32 {
    match value {
        0 => 1,
        v if v < 0 => 0,
        v => v.ilog10() + 1,
    }
}

pub fn label_text(progress: &Progress) -> String {
    format!("  {}/{}", progress.count(), progress.total())
}

pub const fn label_width(progress: &Progress) -> u32 {
    (digit_count(progress.count()) + digit_count(progress.total()) + 3) * ADVANCE as u32 + MARGIN
}

/// A transparent canvas `height` pixels tall holding `"  n/t"`, left aligned and
/// vertically centered.
pub fn build_label(progress: &Progress, height: u32) -> Result<Image> {
    let mut label = Image::new(label_width(progress), height)?;
    label.fill_transparent();

    let y = (height as i64 - LINE_HEIGHT) / 2;
    TextRenderer::default().draw(&mut label, 0, y, &label_text(progress));

    Ok(label)
}
