pub const U8_BYTES: usize = 1;
pub const U32_BYTES: usize = 4;

#[macro_export]
macro_rules! eof {
    () => {
        fn eof(&self, len: usize) -> Result<()> {
            let end = self.cursor.checked_add(len);

            anyhow::ensure!(
                matches!(end, Some(end) if end <= self.data.len()),
                "Unexpected EOF at byte {} (wanted {} more bytes).",
                self.cursor,
                len
            );

            Ok(())
        }
    };
}

#[macro_export]
macro_rules! read {
    ($name:ident, $type:ty, $width:expr) => {
        fn $name(&mut self) -> Result<$type> {
            let slice = self.read_slice($width)?;

            Ok(<$type>::from_be_bytes(slice.try_into()?))
        }
    };
}

#[macro_export]
macro_rules! read_slice {
    () => {
        fn read_slice(&mut self, len: usize) -> Result<&'a [u8]> {
            self.eof(len)?;

            let slice = &self.data[self.cursor..self.cursor + len];
            self.cursor += len;

            Ok(slice)
        }
    };
}
