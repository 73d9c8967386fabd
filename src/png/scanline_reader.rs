use crate::png::{
    grammar::{Filter, ImageHeader},
    scanline_writer::paeth_predict,
};
use anyhow::{ensure, Result};

#[derive(Debug)]
pub struct ScanlineReader<'a> {
    input_buffer: &'a [u8],
    image_header: &'a ImageHeader,
}

impl<'a> ScanlineReader<'a> {
    pub(crate) const fn new(input_buffer: &'a [u8], image_header: &'a ImageHeader) -> Self {
        Self {
            input_buffer,
            image_header,
        }
    }

    /// Reverses the per-row filters of a non-interlaced image.
    pub(crate) fn read_lines(&self) -> Result<Vec<u8>> {
        let bytes_per_pixel = self.image_header.num_bytes_per_pixel();
        let bytes_per_row = self.image_header.row_bytes();
        let height = self.image_header.height as usize;

        ensure!(
            self.input_buffer.len() == height * (1 + bytes_per_row),
            "Inflated image data holds {} bytes, expected {}.",
            self.input_buffer.len(),
            height * (1 + bytes_per_row)
        );

        let mut pixel_buffer = vec![0_u8; height * bytes_per_row];

        for i in 0..height {
            let row_start_idx = i * (1 + bytes_per_row);
            let filter_type = Filter::try_from(self.input_buffer[row_start_idx])?;
            let row = &self.input_buffer[row_start_idx + 1..row_start_idx + 1 + bytes_per_row];

            let (decoded, current) = pixel_buffer.split_at_mut(i * bytes_per_row);
            let current = &mut current[..bytes_per_row];
            let decoded: &[u8] = decoded;
            let prev = (i > 0).then(|| &decoded[(i - 1) * bytes_per_row..]);

            match filter_type {
                Filter::None => {
                    // the best filter.
                    current.copy_from_slice(row);
                }
                Filter::Sub => {
                    for j in 0..bytes_per_row {
                        let left = if j < bytes_per_pixel {
                            0
                        } else {
                            current[j - bytes_per_pixel]
                        };

                        current[j] = row[j].wrapping_add(left);
                    }
                }
                Filter::Up => {
                    for j in 0..bytes_per_row {
                        let up = prev.map_or(0, |prev| prev[j]);
                        current[j] = row[j].wrapping_add(up);
                    }
                }
                Filter::Average => {
                    for j in 0..bytes_per_row {
                        let left = if j < bytes_per_pixel {
                            0
                        } else {
                            current[j - bytes_per_pixel] as u16
                        };
                        let up = prev.map_or(0, |prev| prev[j] as u16);

                        current[j] = row[j].wrapping_add(((left + up) / 2) as u8);
                    }
                }
                Filter::Paeth => {
                    for j in 0..bytes_per_row {
                        let left = if j < bytes_per_pixel {
                            0
                        } else {
                            current[j - bytes_per_pixel]
                        };
                        let up = prev.map_or(0, |prev| prev[j]);
                        let up_left = match prev {
                            Some(prev) if j >= bytes_per_pixel => prev[j - bytes_per_pixel],
                            _ => 0,
                        };

                        current[j] = row[j].wrapping_add(paeth_predict(left, up, up_left));
                    }
                }
            }
        }

        Ok(pixel_buffer)
    }
}
