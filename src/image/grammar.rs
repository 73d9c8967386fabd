use anyhow::{bail, Result};
use std::borrow::Cow;

/// Sample layout of a decoded raster, numbered as in the IHDR color type byte.
/// Tiles may come in any of these; drawing always happens in `RGBA`.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum ColorType {
    Grayscale = 0,
    RGB = 2,
    Palette = 3,
    GrayscaleAlpha = 4,
    RGBA = 6,
}

impl ColorType {
    /// Samples per pixel. A palette pixel is a single index.
    pub(crate) const fn num_channels(&self) -> u8 {
        match self {
            Self::Grayscale | Self::Palette => 1,
            Self::GrayscaleAlpha => 2,
            Self::RGB => 3,
            Self::RGBA => 4,
        }
    }
}

impl TryFrom<u8> for ColorType {
    type Error = anyhow::Error;

    fn try_from(value: u8) -> Result<Self> {
        Ok(match value {
            0 => Self::Grayscale,
            2 => Self::RGB,
            3 => Self::Palette,
            4 => Self::GrayscaleAlpha,
            6 => Self::RGBA,
            foreign => bail!("Unrecognized color type: {}", foreign),
        })
    }
}

/// Anything that can be viewed as a straight-alpha RGBA8 raster: decoded tiles,
/// canvases and finished frames. The encoder writes through this view.
pub trait ImageExt {
    fn width(&self) -> u32;

    fn height(&self) -> u32;

    fn dimensions(&self) -> (u32, u32) {
        (self.width(), self.height())
    }

    /// A raster with no rows or no columns. It is valid to draw onto but has no
    /// PNG form.
    fn is_empty(&self) -> bool {
        self.width() == 0 || self.height() == 0
    }

    /// Layout of the source samples before conversion.
    fn color_type(&self) -> ColorType;

    /// Row-major RGBA samples, 4 bytes per pixel.
    fn rgba8(&self) -> Cow<'_, [u8]>;
}
