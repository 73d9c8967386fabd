pub use decoder::*;
pub use encoder::*;
pub mod grammar;

mod chunk;
mod crc32;
mod decoder;
mod encoder;
mod scanline_reader;
mod scanline_writer;
