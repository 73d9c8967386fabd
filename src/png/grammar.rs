use crate::image::grammar::{ColorType, ImageExt};
use anyhow::bail;
use std::borrow::Cow;

#[derive(Debug)]
pub enum Chunk<'a> {
    ImageHeader(ImageHeader),
    Palette(&'a [u8]),
    Transparency(&'a [u8]),
    ImageData(&'a [u8]),
    Gamma(u32),
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct ImageHeader {
    pub width: u32,
    pub height: u32,
    pub bit_depth: u8,
    pub color_type: ColorType,

    // Compression method should always be 0.
    pub compression_method: u8,
    pub filter_method: u8,
    pub interlace_method: bool,
}

impl ImageHeader {
    pub(crate) const fn rgba8(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            bit_depth: 8,
            color_type: ColorType::RGBA,
            compression_method: 0,
            filter_method: 0,
            interlace_method: false,
        }
    }

    pub(crate) const fn num_bytes_per_pixel(&self) -> usize {
        // Only 8-bit samples are decoded, one byte per channel.
        self.color_type.num_channels() as usize
    }

    pub(crate) const fn row_bytes(&self) -> usize {
        self.num_bytes_per_pixel() * self.width as usize
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Filter {
    None = 0,
    Sub = 1,
    Up = 2,
    Average = 3,
    Paeth = 4,
}

impl TryFrom<u8> for Filter {
    type Error = anyhow::Error;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        let filter = match value {
            0 => Self::None,
            1 => Self::Sub,
            2 => Self::Up,
            3 => Self::Average,
            4 => Self::Paeth,
            foreign => bail!("Unrecognized filter type: {}", foreign),
        };

        Ok(filter)
    }
}

/// A decoded PNG: the header plus unfiltered samples in the file's own color
/// type. Palette indices are checked against the palette during decoding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Png {
    pub image_header: ImageHeader,
    pub gamma: u32,
    pub palette: Vec<[u8; 3]>,
    pub transparency: Vec<u8>,
    pub pixel_buffer: Vec<u8>,
}

impl ImageExt for Png {
    fn width(&self) -> u32 {
        self.image_header.width
    }

    fn height(&self) -> u32 {
        self.image_header.height
    }

    fn color_type(&self) -> ColorType {
        self.image_header.color_type
    }

    fn rgba8(&self) -> Cow<'_, [u8]> {
        let pixels = &self.pixel_buffer;

        match self.image_header.color_type {
            ColorType::RGBA => Cow::from(pixels),
            ColorType::RGB => {
                let rgba = pixels
                    .chunks_exact(3)
                    .flat_map(|rgb| [rgb[0], rgb[1], rgb[2], 255])
                    .collect();

                Cow::Owned(rgba)
            }
            ColorType::Grayscale => {
                let transparent_gray = match self.transparency.as_slice() {
                    // tRNS for grayscale holds one 16-bit sample.
                    [_, low] => Some(*low),
                    _ => None,
                };

                let rgba = pixels
                    .iter()
                    .flat_map(|&g| {
                        let a = if Some(g) == transparent_gray { 0 } else { 255 };
                        [g, g, g, a]
                    })
                    .collect();

                Cow::Owned(rgba)
            }
            ColorType::GrayscaleAlpha => {
                let rgba = pixels
                    .chunks_exact(2)
                    .flat_map(|ga| [ga[0], ga[0], ga[0], ga[1]])
                    .collect();

                Cow::Owned(rgba)
            }
            ColorType::Palette => {
                let rgba = pixels
                    .iter()
                    .flat_map(|&index| {
                        let [r, g, b] = self.palette[index as usize];
                        let a = self
                            .transparency
                            .get(index as usize)
                            .copied()
                            .unwrap_or(255);

                        [r, g, b, a]
                    })
                    .collect();

                Cow::Owned(rgba)
            }
        }
    }
}
