use crate::image::grammar::ImageExt;
use crate::png::chunk::{IDATChunk, IENDChunk, IHDRChunk, PngChunk};
use crate::png::grammar::ImageHeader;
use crate::png::scanline_writer::ScanlineWriter;
use anyhow::{ensure, Result};
use std::io::Write;

pub struct PngEncoder<W: Write> {
    writer: W,
}

impl<W: Write> PngEncoder<W> {
    pub const fn new(writer: W) -> Self {
        Self { writer }
    }

    /// Writes `image` as a non-interlaced 8-bit RGBA PNG and hands back the writer.
    pub fn encode(mut self, image: &impl ImageExt) -> Result<W> {
        let (width, height) = image.dimensions();
        ensure!(
            !image.is_empty(),
            "Cannot encode an empty {}x{} image.",
            width,
            height
        );

        self.writer.write_all(b"\x89PNG\r\n\x1A\n")?;

        let image_header = ImageHeader::rgba8(width, height);

        let image_header_chunk = IHDRChunk { image_header };
        image_header_chunk.write(&mut self.writer)?;

        let mut scanline_writer = ScanlineWriter::new(Vec::new(), &image_header);
        scanline_writer.write(&image.rgba8())?;

        let image_data_chunk = IDATChunk {
            data: scanline_writer.finish(),
        };
        image_data_chunk.write(&mut self.writer)?;

        let image_end = IENDChunk;
        image_end.write(&mut self.writer)?;

        Ok(self.writer)
    }
}
