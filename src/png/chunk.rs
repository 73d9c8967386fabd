use crate::png::{crc32::compute_crc, grammar::ImageHeader};
use anyhow::Result;
use flate2::write::ZlibEncoder;
use flate2::Compression;
use std::io::Write;

pub trait PngChunk {
    const NAME: [u8; 4];

    fn name(&self) -> &[u8; 4] {
        &Self::NAME
    }

    fn data(&self) -> Result<Vec<u8>> {
        Ok(vec![])
    }

    fn write<W: Write>(&self, mut w: W) -> Result<()> {
        let data = self.data()?;
        let length = u32::try_from(data.len())?;

        w.write_all(&length.to_be_bytes())?;
        w.write_all(self.name())?;
        w.write_all(&data)?;
        w.write_all(&compute_crc(self.name(), &data).to_be_bytes())?;

        Ok(())
    }
}

#[derive(Debug)]
pub struct IHDRChunk {
    pub image_header: ImageHeader,
}

impl PngChunk for IHDRChunk {
    const NAME: [u8; 4] = *b"IHDR";

    fn data(&self) -> Result<Vec<u8>> {
        let mut buffer = Vec::with_capacity(13);

        let ImageHeader {
            width,
            height,
            bit_depth,
            color_type,
            compression_method,
            filter_method,
            interlace_method,
        } = self.image_header;

        buffer.extend_from_slice(&width.to_be_bytes());
        buffer.extend_from_slice(&height.to_be_bytes());
        buffer.push(bit_depth);
        buffer.push(color_type as u8);
        buffer.push(compression_method);
        buffer.push(filter_method);
        buffer.push(interlace_method as u8);

        Ok(buffer)
    }
}

/// Holds the filtered scanlines; they are zlib-compressed when written.
#[derive(Debug)]
pub struct IDATChunk {
    pub data: Vec<u8>,
}

impl PngChunk for IDATChunk {
    const NAME: [u8; 4] = *b"IDAT";

    fn data(&self) -> Result<Vec<u8>> {
        let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
        encoder.write_all(&self.data)?;

        Ok(encoder.finish()?)
    }
}

#[derive(Debug)]
pub struct IENDChunk;

impl PngChunk for IENDChunk {
    const NAME: [u8; 4] = *b"IEND";
}
