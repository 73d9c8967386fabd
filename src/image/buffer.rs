use crate::image::grammar::{ColorType, ImageExt};
use crate::png::grammar::Png;
use anyhow::{anyhow, ensure, Result};
use std::borrow::Cow;

pub type Rgba = [u8; 4];

pub const TRANSPARENT: Rgba = [0, 0, 0, 0];

const NUM_CHANNELS: usize = 4;

/// An owned RGBA8 raster. A zero width or height is a valid, empty image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Image {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
}

impl Image {
    /// Allocates a fully transparent canvas.
    pub fn new(width: u32, height: u32) -> Result<Self> {
        let len = (width as usize)
            .checked_mul(height as usize)
            .and_then(|n| n.checked_mul(NUM_CHANNELS))
            .ok_or_else(|| anyhow!("Canvas of {}x{} pixels overflows", width, height))?;

        let mut pixels = Vec::new();
        pixels
            .try_reserve_exact(len)
            .map_err(|err| anyhow!("Failed to allocate a {}x{} canvas: {}", width, height, err))?;
        pixels.resize(len, 0);

        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    pub fn from_rgba8(width: u32, height: u32, pixels: Vec<u8>) -> Result<Self> {
        ensure!(
            pixels.len() == width as usize * height as usize * NUM_CHANNELS,
            "Expected {} bytes for a {}x{} RGBA image, found {}.",
            width as usize * height as usize * NUM_CHANNELS,
            width,
            height,
            pixels.len()
        );

        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    const fn offset(&self, x: i64, y: i64) -> Option<usize> {
        if x < 0 || y < 0 || x >= self.width as i64 || y >= self.height as i64 {
            return None;
        }

        Some((y as usize * self.width as usize + x as usize) * NUM_CHANNELS)
    }

    pub fn pixel(&self, x: i64, y: i64) -> Option<Rgba> {
        let i = self.offset(x, y)?;

        Some([
            self.pixels[i],
            self.pixels[i + 1],
            self.pixels[i + 2],
            self.pixels[i + 3],
        ])
    }

    /// Blends `color` over the pixel at `(x, y)`. Coordinates outside the image are ignored.
    pub fn blend_pixel(&mut self, x: i64, y: i64, color: Rgba) {
        if let Some(i) = self.offset(x, y) {
            let dst = &mut self.pixels[i..i + NUM_CHANNELS];
            let blended = blend_over(color, [dst[0], dst[1], dst[2], dst[3]]);
            dst.copy_from_slice(&blended);
        }
    }

    pub fn fill(&mut self, color: Rgba) {
        for pixel in self.pixels.chunks_exact_mut(NUM_CHANNELS) {
            pixel.copy_from_slice(&color);
        }
    }

    pub fn fill_transparent(&mut self) {
        self.fill(TRANSPARENT);
    }

    /// Composites `src` onto `self` with its top-left corner at `(x, y)`,
    /// clipped to the bounds of `self`.
    pub fn superpose(&mut self, src: &Self, x: i64, y: i64) {
        let x_start = x.max(0);
        let y_start = y.max(0);
        let x_end = (x + src.width as i64).min(self.width as i64);
        let y_end = (y + src.height as i64).min(self.height as i64);

        for dst_y in y_start..y_end {
            for dst_x in x_start..x_end {
                if let Some(color) = src.pixel(dst_x - x, dst_y - y) {
                    self.blend_pixel(dst_x, dst_y, color);
                }
            }
        }
    }
}

/// Source-over compositing of straight (non-premultiplied) alpha colors.
pub fn blend_over(src: Rgba, dst: Rgba) -> Rgba {
    let sa = src[3] as u32;

    match sa {
        0 => dst,
        255 => src,
        _ => {
            let dst_weight = dst[3] as u32 * (255 - sa);
            // Output alpha scaled by 255, nonzero because sa > 0.
            let out_alpha = sa * 255 + dst_weight;

            let channel = |s: u8, d: u8| -> u8 {
                let c = (s as u32 * sa * 255 + d as u32 * dst_weight + out_alpha / 2) / out_alpha;
                c as u8
            };

            [
                channel(src[0], dst[0]),
                channel(src[1], dst[1]),
                channel(src[2], dst[2]),
                ((out_alpha + 127) / 255) as u8,
            ]
        }
    }
}

impl ImageExt for Image {
    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }

    fn color_type(&self) -> ColorType {
        ColorType::RGBA
    }

    fn rgba8(&self) -> Cow<'_, [u8]> {
        Cow::from(&self.pixels)
    }
}

impl TryFrom<&Png> for Image {
    type Error = anyhow::Error;

    fn try_from(png: &Png) -> Result<Self> {
        Self::from_rgba8(png.width(), png.height(), png.rgba8().into_owned())
    }
}
