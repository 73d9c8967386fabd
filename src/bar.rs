use crate::{
    assets::{Tile, TileSource},
    image::{grammar::ImageExt, Image},
    progress::{Progress, BAR_LENGTH},
};
use anyhow::{Context, Result};
use log::{debug, warn};

/// Pixel offset of column 0 inside the background.
pub const X_OFFSET: i64 = 13;
pub const Y_OFFSET: i64 = 3;

/// The images a bar is drawn from. Only the background is mandatory; a missing
/// column tile leaves its columns undrawn.
#[derive(Debug, Clone)]
pub struct TileSet {
    pub background: Image,
    pub first: Option<Image>,
    pub normal: Option<Image>,
    pub last: Option<Image>,
}

impl TileSet {
    pub fn load(source: &impl TileSource) -> Result<Self> {
        let background = source
            .load(Tile::Background)
            .context("Could not read the bar background")?;

        let optional = |tile: Tile| match source.load(tile) {
            Ok(image) => Some(image),
            Err(err) => {
                warn!("Could not read {} tile, skipping it: {:#}", tile, err);
                None
            }
        };

        Ok(Self {
            background,
            first: optional(Tile::First),
            normal: optional(Tile::Normal),
            last: optional(Tile::Last),
        })
    }

    /// Tile drawn at column `index`. Column `BAR_LENGTH` uses the last tile, which only
    /// happens for counts above the total since columns stop before the column count.
    pub const fn column_tile(&self, index: i64) -> Option<&Image> {
        match index {
            0 => self.first.as_ref(),
            BAR_LENGTH => self.last.as_ref(),
            _ => self.normal.as_ref(),
        }
    }

    /// Draws `columns` columns onto a copy of the background.
    pub fn compose(&self, columns: i64) -> Image {
        let mut bar = self.background.clone();

        // Columns starting past the right edge would be clipped entirely.
        let visible = (bar.width() as i64 - X_OFFSET).max(0);

        for index in 0..columns.min(visible) {
            if let Some(tile) = self.column_tile(index) {
                bar.superpose(tile, X_OFFSET + index, Y_OFFSET);
            }
        }

        bar
    }
}

#[derive(Debug)]
pub struct BarCompositor<S: TileSource> {
    source: S,
}

impl<S: TileSource> BarCompositor<S> {
    pub const fn new(source: S) -> Self {
        Self { source }
    }

    /// Fails only when the background tile cannot be loaded.
    pub fn create(&self, progress: &Progress) -> Result<Image> {
        let tiles = TileSet::load(&self.source)?;
        let columns = progress.column_count();

        debug!(
            "Drawing {} of {} columns for {}/{}",
            columns,
            BAR_LENGTH,
            progress.count(),
            progress.total()
        );

        Ok(tiles.compose(columns))
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::image::Rgba;
    use pretty_assertions::assert_eq;
    use std::collections::HashMap;

    pub(crate) const BACKGROUND: Rgba = [200, 200, 200, 255];
    pub(crate) const FIRST: Rgba = [255, 0, 0, 255];
    pub(crate) const NORMAL: Rgba = [0, 255, 0, 255];
    pub(crate) const LAST: Rgba = [0, 0, 255, 255];

    pub(crate) const BACKGROUND_WIDTH: u32 = 226;
    pub(crate) const BACKGROUND_HEIGHT: u32 = 18;

    fn solid(width: u32, height: u32, color: Rgba) -> Result<Image> {
        let mut image = Image::new(width, height)?;
        image.fill(color);

        Ok(image)
    }

    /// Background 226x18 with 1x12 column tiles, one color per kind.
    pub(crate) fn fixture_tiles(kinds: &[Tile]) -> Result<HashMap<Tile, Image>> {
        kinds
            .iter()
            .map(|&tile| -> Result<(Tile, Image)> {
                let image = match tile {
                    Tile::Background => solid(BACKGROUND_WIDTH, BACKGROUND_HEIGHT, BACKGROUND)?,
                    Tile::First => solid(1, 12, FIRST)?,
                    Tile::Normal => solid(1, 12, NORMAL)?,
                    Tile::Last => solid(1, 12, LAST)?,
                };

                Ok((tile, image))
            })
            .collect()
    }

    fn column_color(bar: &Image, index: i64) -> Option<Rgba> {
        bar.pixel(X_OFFSET + index, Y_OFFSET)
    }

    fn bar_for(count: i32, total: i32, kinds: &[Tile]) -> Result<Image> {
        BarCompositor::new(fixture_tiles(kinds)?).create(&Progress::new(count, total)?)
    }

    #[test]
    fn test_missing_background_is_fatal() -> Result<()> {
        let result = bar_for(1, 2, &[Tile::First, Tile::Normal, Tile::Last]);

        assert!(result.is_err());

        Ok(())
    }

    #[test]
    fn test_zero_count_is_background_only() -> Result<()> {
        let bar = bar_for(0, 10, &Tile::ALL)?;

        assert_eq!(bar, solid(BACKGROUND_WIDTH, BACKGROUND_HEIGHT, BACKGROUND)?);

        Ok(())
    }

    #[test]
    fn test_half_way() -> Result<()> {
        let bar = bar_for(50, 100, &Tile::ALL)?;

        assert_eq!(bar.dimensions(), (BACKGROUND_WIDTH, BACKGROUND_HEIGHT));
        assert_eq!(column_color(&bar, 0), Some(FIRST));
        assert_eq!(column_color(&bar, 1), Some(NORMAL));
        assert_eq!(column_color(&bar, 99), Some(NORMAL));
        assert_eq!(column_color(&bar, 100), Some(BACKGROUND));

        // tiles are 12 rows tall starting at row 3
        assert_eq!(bar.pixel(X_OFFSET + 50, Y_OFFSET - 1), Some(BACKGROUND));
        assert_eq!(bar.pixel(X_OFFSET + 50, Y_OFFSET + 11), Some(NORMAL));
        assert_eq!(bar.pixel(X_OFFSET + 50, Y_OFFSET + 12), Some(BACKGROUND));
        assert_eq!(bar.pixel(X_OFFSET - 1, Y_OFFSET), Some(BACKGROUND));

        Ok(())
    }

    #[test]
    fn test_full_bar_never_reaches_last_tile() -> Result<()> {
        let bar = bar_for(100, 100, &Tile::ALL)?;

        assert_eq!(column_color(&bar, 0), Some(FIRST));
        assert_eq!(column_color(&bar, 199), Some(NORMAL));
        assert_eq!(column_color(&bar, 200), Some(BACKGROUND));
        assert!((0..BACKGROUND_WIDTH as i64 - X_OFFSET)
            .all(|index| column_color(&bar, index) != Some(LAST)));

        Ok(())
    }

    #[test]
    fn test_overfull_bar_draws_last_tile_at_column_200() -> Result<()> {
        let bar = bar_for(101, 100, &Tile::ALL)?;

        assert_eq!(column_color(&bar, 199), Some(NORMAL));
        assert_eq!(column_color(&bar, 200), Some(LAST));
        assert_eq!(column_color(&bar, 201), Some(NORMAL));
        assert_eq!(column_color(&bar, 202), Some(BACKGROUND));

        Ok(())
    }

    #[test]
    fn test_huge_count_is_clipped() -> Result<()> {
        let bar = bar_for(i32::MAX, 1, &Tile::ALL)?;

        assert_eq!(bar.dimensions(), (BACKGROUND_WIDTH, BACKGROUND_HEIGHT));
        assert_eq!(
            column_color(&bar, BACKGROUND_WIDTH as i64 - X_OFFSET - 1),
            Some(NORMAL)
        );

        Ok(())
    }

    #[test]
    fn test_negative_count_draws_nothing() -> Result<()> {
        let bar = bar_for(-5, 10, &Tile::ALL)?;

        assert_eq!(bar, solid(BACKGROUND_WIDTH, BACKGROUND_HEIGHT, BACKGROUND)?);

        Ok(())
    }

    #[test]
    fn test_missing_column_tiles_are_skipped() -> Result<()> {
        let bar = bar_for(50, 100, &[Tile::Background, Tile::Normal])?;

        assert_eq!(bar.dimensions(), (BACKGROUND_WIDTH, BACKGROUND_HEIGHT));
        assert_eq!(column_color(&bar, 0), Some(BACKGROUND));
        assert_eq!(column_color(&bar, 1), Some(NORMAL));
        assert_eq!(column_color(&bar, 99), Some(NORMAL));

        let bare = bar_for(50, 100, &[Tile::Background])?;
        assert_eq!(bare, solid(BACKGROUND_WIDTH, BACKGROUND_HEIGHT, BACKGROUND)?);

        Ok(())
    }

    #[test]
    fn test_compose_leaves_tiles_untouched() -> Result<()> {
        let tiles = TileSet::load(&fixture_tiles(&Tile::ALL)?)?;
        let bar = tiles.compose(10);

        assert_eq!(column_color(&bar, 5), Some(NORMAL));
        assert_eq!(
            tiles.background,
            solid(BACKGROUND_WIDTH, BACKGROUND_HEIGHT, BACKGROUND)?
        );

        Ok(())
    }
}
