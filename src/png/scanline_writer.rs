use crate::png::grammar::{Filter, ImageHeader};
use anyhow::{ensure, Result};
use std::io::Write;

pub(crate) const fn paeth_predict(left: u8, up: u8, up_left: u8) -> u8 {
    let (a, b, c) = (left as i16, up as i16, up_left as i16);

    let p = a + b - c;
    let pa = (p - a).abs();
    let pb = (p - b).abs();
    let pc = (p - c).abs();

    if pa <= pb && pa <= pc {
        left
    } else if pb <= pc {
        up
    } else {
        up_left
    }
}

/// Sum of the filtered bytes read as signed deltas.
fn cost(scanline: &[u8]) -> u32 {
    scanline
        .iter()
        .map(|&b| (b as i8).unsigned_abs() as u32)
        .sum()
}

/// Computes the output scanline using all five filters, and selects the filter that gives the
/// smallest sum of absolute values of outputs.
fn select_filter(prev_row: &[u8], row: &[u8], num_bytes_per_pixel: usize) -> (Filter, Vec<u8>) {
    let mut sub_scanline = Vec::with_capacity(row.len());
    let mut up_scanline = Vec::with_capacity(row.len());
    let mut avg_scanline = Vec::with_capacity(row.len());
    let mut paeth_scanline = Vec::with_capacity(row.len());

    row.iter().enumerate().for_each(|(i, &orig)| {
        let a = if i < num_bytes_per_pixel {
            0
        } else {
            row[i - num_bytes_per_pixel]
        };

        let b = prev_row[i];

        let c = if i < num_bytes_per_pixel {
            0
        } else {
            prev_row[i - num_bytes_per_pixel]
        };

        sub_scanline.push(orig.wrapping_sub(a));
        up_scanline.push(orig.wrapping_sub(b));
        avg_scanline.push(orig.wrapping_sub(((a as u16 + b as u16) / 2) as u8));
        paeth_scanline.push(orig.wrapping_sub(paeth_predict(a, b, c)));
    });

    let mut best = (Filter::None, row.to_vec());
    let mut best_cost = cost(row);

    for candidate in [
        (Filter::Sub, sub_scanline),
        (Filter::Up, up_scanline),
        (Filter::Average, avg_scanline),
        (Filter::Paeth, paeth_scanline),
    ] {
        let candidate_cost = cost(&candidate.1);

        if candidate_cost < best_cost {
            best_cost = candidate_cost;
            best = candidate;
        }
    }

    best
}

#[derive(Debug)]
pub struct ScanlineWriter<'a, W: Write> {
    image_header: &'a ImageHeader,
    writer: W,
}

impl<'a, W: Write> ScanlineWriter<'a, W> {
    pub const fn new(writer: W, image_header: &'a ImageHeader) -> Self {
        Self {
            writer,
            image_header,
        }
    }

    pub fn write(&mut self, pixel_buffer: &[u8]) -> Result<()> {
        let num_bytes_per_pixel = self.image_header.num_bytes_per_pixel();
        let scanline_bytes = self.image_header.row_bytes();

        ensure!(
            scanline_bytes * self.image_header.height as usize == pixel_buffer.len(),
            "Pixel buffer holds {} bytes, expected {}x{} pixels.",
            pixel_buffer.len(),
            self.image_header.width,
            self.image_header.height
        );

        if scanline_bytes == 0 {
            return Ok(());
        }

        let zero_row = vec![0u8; scanline_bytes];
        let mut prev_row: &[u8] = &zero_row;

        for row in pixel_buffer.chunks_exact(scanline_bytes) {
            let (filter, scanline) = select_filter(prev_row, row, num_bytes_per_pixel);

            self.writer.write_all(&[filter as u8])?;
            self.writer.write_all(&scanline)?;

            prev_row = row;
        }

        Ok(())
    }

    pub fn finish(self) -> W {
        self.writer
    }
}
