use crate::{
    image::Image,
    png::{PngDecoder, PngEncoder},
};
use anyhow::{Context, Result};
use std::{
    fs::File,
    io::{BufWriter, Write},
    path::Path,
};

#[derive(Debug)]
pub struct ImageReader;

impl ImageReader {
    pub fn read_from_path(path: impl AsRef<Path>) -> Result<Image> {
        let path = path.as_ref();
        let data = std::fs::read(path).with_context(|| format!("Could not read {:?}", path))?;

        Self::read_from_bytes(&data).with_context(|| format!("Could not decode {:?}", path))
    }

    pub fn read_from_bytes(data: &[u8]) -> Result<Image> {
        let png = PngDecoder::new(data).decode()?;

        Image::try_from(&png)
    }
}

#[derive(Debug)]
pub struct ImageWriter;

impl ImageWriter {
    pub fn write_to_path(image: &Image, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let file = File::create(path).with_context(|| format!("Could not create {:?}", path))?;

        let mut writer = PngEncoder::new(BufWriter::new(file)).encode(image)?;
        writer
            .flush()
            .with_context(|| format!("Could not write {:?}", path))?;

        Ok(())
    }

    pub fn write_to_bytes(image: &Image) -> Result<Vec<u8>> {
        PngEncoder::new(Vec::new()).encode(image)
    }
}
