use crate::{
    eof,
    image::grammar::ColorType,
    png::{
        crc32::compute_crc,
        grammar::{Chunk, ImageHeader, Png},
        scanline_reader::ScanlineReader,
    },
    read, read_slice,
    util::read_bytes::{U32_BYTES, U8_BYTES},
};
use anyhow::{bail, ensure, Result};
use flate2::read::ZlibDecoder;
use std::io::Read;

const SIGNATURE: &[u8; 8] = b"\x89PNG\r\n\x1A\n";

#[derive(Debug)]
pub struct PngDecoder<'a> {
    cursor: usize,
    data: &'a [u8],
}

impl<'a> PngDecoder<'a> {
    pub const fn new(data: &'a [u8]) -> Self {
        Self { cursor: 0, data }
    }

    pub fn decode(&mut self) -> Result<Png> {
        ensure!(
            self.read_slice(8)? == SIGNATURE,
            "Invalid PNG file: incorrect signature.",
        );

        let mut chunks = self.parse_chunks()?.into_iter();

        let Some(Chunk::ImageHeader(image_header)) = chunks.next() else {
            bail!("Expected image header chunk.");
        };

        ensure!(
            image_header.compression_method == 0,
            "Compression method should always be 0"
        );
        ensure!(
            image_header.filter_method == 0,
            "Only filter method 0 is defined in the standard."
        );
        ensure!(
            image_header.bit_depth == 8,
            "Unsupported bit depth {}, only 8-bit samples are decoded.",
            image_header.bit_depth
        );
        ensure!(
            !image_header.interlace_method,
            "Interlaced images are not supported."
        );
        ensure!(
            image_header.width > 0 && image_header.height > 0,
            "Image dimensions must be nonzero."
        );

        // There may be multiple image data chunks. If so, they shall appear
        // consecutively with no intervening chunks. The compressed stream is then
        // the concatenation of the contents of all image data chunks.
        let mut compressed_stream = Vec::new();
        let mut palette = Vec::new();
        let mut transparency = Vec::new();
        let mut gamma = 0;

        for chunk in chunks {
            match chunk {
                Chunk::ImageHeader(_) => bail!("Duplicate image header chunk."),
                Chunk::Palette(entries) => {
                    ensure!(palette.is_empty(), "Duplicate palette chunk.");
                    palette = entries
                        .chunks_exact(3)
                        .map(|rgb| [rgb[0], rgb[1], rgb[2]])
                        .collect();
                }
                Chunk::Transparency(alpha) => transparency = alpha.to_vec(),
                Chunk::ImageData(sub_data) => compressed_stream.extend_from_slice(sub_data),
                Chunk::Gamma(g) => gamma = g,
            }
        }

        ensure!(!compressed_stream.is_empty(), "Missing image data chunk.");

        // One filter byte per row, plus one byte to detect a stream that runs long.
        let expected = image_header.height as u64 * (1 + image_header.row_bytes() as u64);

        let mut input_buffer = Vec::new();
        ZlibDecoder::new(&compressed_stream[..])
            .take(expected + 1)
            .read_to_end(&mut input_buffer)?;

        ensure!(
            input_buffer.len() as u64 <= expected,
            "Image data inflates past the {} bytes the header describes.",
            expected
        );

        let scanline_reader = ScanlineReader::new(&input_buffer, &image_header);
        let pixel_buffer = scanline_reader.read_lines()?;

        if image_header.color_type == ColorType::Palette {
            ensure!(!palette.is_empty(), "Palette image without a palette chunk.");
            ensure!(
                pixel_buffer.iter().all(|&i| (i as usize) < palette.len()),
                "Palette index out of range."
            );
            ensure!(
                transparency.len() <= palette.len(),
                "Transparency chunk has more entries than the palette."
            );
        }

        Ok(Png {
            image_header,
            gamma,
            palette,
            transparency,
            pixel_buffer,
        })
    }

    fn validate_crc(&self, chunk_type: &'a [u8], chunk_data: &'a [u8], expected_crc: u32) -> bool {
        expected_crc == compute_crc(chunk_type, chunk_data)
    }

    fn parse_chunks(&mut self) -> Result<Vec<Chunk<'a>>> {
        let mut chunks = Vec::new();

        loop {
            let length = self.read_u32()? as usize;

            // chunk type, data and the trailing CRC
            self.eof(4 + length + 4)?;

            {
                let crc_start = self.cursor + 4 + length;
                let expected_crc =
                    u32::from_be_bytes(self.data[crc_start..crc_start + 4].try_into()?);

                ensure!(
                    self.validate_crc(
                        &self.data[self.cursor..self.cursor + 4],
                        &self.data[self.cursor + 4..crc_start],
                        expected_crc
                    ),
                    "CRC mismatch at byte {}.",
                    self.cursor
                );
            }

            let chunk_type = self.read_slice(4)?;

            let chunk = match chunk_type {
                b"IHDR" => {
                    ensure!(chunks.is_empty(), "ImageHeader chunk must appear first.");
                    ensure!(length == 13, "ImageHeader chunk must be 13 bytes.");

                    Chunk::ImageHeader(ImageHeader {
                        width: self.read_u32()?,
                        height: self.read_u32()?,
                        bit_depth: self.read_u8()?,
                        color_type: self.read_u8()?.try_into()?,
                        compression_method: self.read_u8()?,
                        filter_method: self.read_u8()?,
                        interlace_method: self.read_u8()? == 1,
                    })
                }
                b"PLTE" => {
                    ensure!(length % 3 == 0, "Chunk length not divisible by 3.");
                    ensure!(
                        !chunks.is_empty(),
                        "Empty chunks. Expected ImageHeader chunk."
                    );

                    Chunk::Palette(self.read_slice(length)?)
                }
                b"tRNS" => Chunk::Transparency(self.read_slice(length)?),
                b"IDAT" => Chunk::ImageData(self.read_slice(length)?),
                b"IEND" => break,
                b"gAMA" => {
                    ensure!(length == 4, "Gamma chunk must be 4 bytes.");
                    Chunk::Gamma(self.read_u32()?)
                }
                foreign => {
                    // Bit 5 of the first byte marks ancillary chunks, which may be skipped.
                    ensure!(
                        foreign[0] & 0x20 != 0,
                        "Unknown critical chunk {:?}.",
                        String::from_utf8_lossy(foreign)
                    );

                    self.cursor += length;
                    self.skip_crc()?;
                    continue;
                }
            };

            self.skip_crc()?;

            chunks.push(chunk);
        }

        Ok(chunks)
    }

    fn skip_crc(&mut self) -> Result<()> {
        self.eof(4)?;
        self.cursor += 4;

        Ok(())
    }

    eof!();
    read!(read_u8, u8, U8_BYTES);
    read!(read_u32, u32, U32_BYTES);
    read_slice!();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::image::{grammar::ImageExt, Image};
    use ::image::{ImageFormat, RgbImage, RgbaImage};
    use pretty_assertions::assert_eq;
    use std::io::Cursor;

    fn reference_png(image: ::image::DynamicImage) -> Result<Vec<u8>> {
        let mut bytes = Vec::new();
        image.write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)?;

        Ok(bytes)
    }

    #[test]
    fn test_decode_reference_rgba() -> Result<()> {
        let reference = RgbaImage::from_fn(23, 7, |x, y| {
            ::image::Rgba([(x * 11) as u8, (y * 37) as u8, (x + y) as u8, (x * 10) as u8])
        });
        let bytes = reference_png(reference.clone().into())?;

        let png = PngDecoder::new(&bytes).decode()?;

        assert_eq!(png.dimensions(), (23, 7));
        assert_eq!(png.color_type(), ColorType::RGBA);
        assert_eq!(png.rgba8().to_vec(), reference.into_raw());

        Ok(())
    }

    #[test]
    fn test_decode_reference_rgb() -> Result<()> {
        let reference = RgbImage::from_fn(5, 5, |x, y| ::image::Rgb([x as u8, y as u8, 99]));
        let bytes = reference_png(reference.into())?;

        let image = Image::try_from(&PngDecoder::new(&bytes).decode()?)?;

        assert_eq!(image.pixel(4, 3), Some([4, 3, 99, 255]));
        assert_eq!(image.pixel(0, 0), Some([0, 0, 99, 255]));

        Ok(())
    }

    #[test]
    fn test_rejects_bad_signature() {
        assert!(PngDecoder::new(b"\x89PNG\r\n\x1A\x00").decode().is_err());
        assert!(PngDecoder::new(b"").decode().is_err());
    }

    #[test]
    fn test_rejects_corrupt_crc() -> Result<()> {
        let reference = RgbaImage::from_pixel(2, 2, ::image::Rgba([1, 2, 3, 4]));
        let mut bytes = reference_png(reference.into())?;

        // first byte of the IHDR width
        bytes[16] ^= 0xFF;

        assert!(PngDecoder::new(&bytes).decode().is_err());

        Ok(())
    }

    /// A 1x1 RGBA file whose image data inflates to `raw`.
    fn single_pixel_png(raw: &[u8]) -> Result<Vec<u8>> {
        use crate::png::chunk::{IDATChunk, IENDChunk, IHDRChunk, PngChunk};

        let mut bytes = SIGNATURE.to_vec();
        IHDRChunk {
            image_header: ImageHeader::rgba8(1, 1),
        }
        .write(&mut bytes)?;
        IDATChunk { data: raw.to_vec() }.write(&mut bytes)?;
        IENDChunk.write(&mut bytes)?;

        Ok(bytes)
    }

    #[test]
    fn test_rejects_oversized_image_data() -> Result<()> {
        let exact = single_pixel_png(&[0, 1, 2, 3, 4])?;
        assert_eq!(PngDecoder::new(&exact).decode()?.rgba8().to_vec(), vec![1, 2, 3, 4]);

        let bomb = single_pixel_png(&vec![0; 1 << 20])?;
        assert!(PngDecoder::new(&bomb).decode().is_err());

        Ok(())
    }

    #[test]
    fn test_rejects_truncated_file() -> Result<()> {
        let reference = RgbaImage::from_pixel(4, 4, ::image::Rgba([9, 9, 9, 9]));
        let bytes = reference_png(reference.into())?;

        assert!(PngDecoder::new(&bytes[..bytes.len() / 2]).decode().is_err());

        Ok(())
    }
}
