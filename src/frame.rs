use crate::image::{grammar::ImageExt, Image};
use anyhow::Result;

/// Places `bar` and `label` side by side, bar first. Returns `None` when there is
/// nothing to draw.
pub fn assemble(bar: Option<&Image>, label: Option<&Image>) -> Result<Option<Image>> {
    let parts = [bar, label];

    let width = parts.iter().flatten().map(|image| image.width()).sum::<u32>();
    let height = parts
        .iter()
        .flatten()
        .map(|image| image.height())
        .max()
        .unwrap_or(0);

    let mut frame = Image::new(width, height)?;
    if frame.is_empty() {
        return Ok(None);
    }

    frame.fill_transparent();

    let mut x = 0;
    for part in parts.into_iter().flatten() {
        frame.superpose(part, x, 0);
        x += part.width() as i64;
    }

    Ok(Some(frame))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::image::{Rgba, TRANSPARENT};
    use pretty_assertions::assert_eq;

    const GRAY: Rgba = [128, 128, 128, 255];
    const INK: Rgba = [0, 0, 0, 255];

    fn solid(width: u32, height: u32, color: Rgba) -> Result<Image> {
        let mut image = Image::new(width, height)?;
        image.fill(color);

        Ok(image)
    }

    #[test]
    fn test_nothing_to_draw() -> Result<()> {
        assert_eq!(assemble(None, None)?, None);

        let empty = Image::new(0, 0)?;
        assert_eq!(assemble(Some(&empty), None)?, None);

        Ok(())
    }

    #[test]
    fn test_label_only() -> Result<()> {
        let mut label = Image::new(45, 20)?;
        label.blend_pixel(3, 4, INK);
        label.blend_pixel(10, 10, [0, 0, 0, 90]);

        let frame = assemble(None, Some(&label))?;

        assert_eq!(frame, Some(label));

        Ok(())
    }

    #[test]
    fn test_bar_only() -> Result<()> {
        let bar = solid(30, 8, GRAY)?;

        assert_eq!(assemble(Some(&bar), None)?, Some(bar));

        Ok(())
    }

    #[test]
    fn test_side_by_side() -> Result<()> {
        let bar = solid(30, 8, GRAY)?;
        let label = solid(10, 12, INK)?;

        let frame = assemble(Some(&bar), Some(&label))?.expect("frame");

        assert_eq!(frame.dimensions(), (40, 12));
        assert_eq!(frame.pixel(0, 0), Some(GRAY));
        assert_eq!(frame.pixel(29, 7), Some(GRAY));
        // below the shorter bar stays transparent
        assert_eq!(frame.pixel(29, 8), Some(TRANSPARENT));
        assert_eq!(frame.pixel(30, 0), Some(INK));
        assert_eq!(frame.pixel(39, 11), Some(INK));

        Ok(())
    }
}
