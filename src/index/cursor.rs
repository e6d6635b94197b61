use crate::{Error, Result};
use byteorder::{LittleEndian, ReadBytesExt};
use std::io::{self, Read};

/// Forward-only little-endian reader over an index byte stream.
///
/// Only `Read` is required, so the same cursor walks a local file or a
/// network body that cannot seek. Every short read surfaces as
/// [`Error::TruncatedStream`] carrying the offset where it happened.
pub struct ByteCursor<R> {
    inner: R,
    position: u64,
}

impl<R: Read> ByteCursor<R> {
    pub fn new(inner: R) -> Self {
        Self { inner, position: 0 }
    }

    /// Number of bytes consumed so far.
    pub fn position(&self) -> u64 {
        self.position
    }

    /// Advance exactly `n` bytes.
    pub fn skip(&mut self, n: u64) -> Result<()> {
        let skipped = io::copy(&mut self.inner.by_ref().take(n), &mut io::sink())?;
        if skipped < n {
            return Err(Error::TruncatedStream {
                offset: self.position + skipped,
                needed: n - skipped,
            });
        }
        self.position += n;
        Ok(())
    }

    pub fn read_u32_le(&mut self) -> Result<u32> {
        let value = self.inner.read_u32::<LittleEndian>();
        self.advance(value, 4)
    }

    pub fn read_i32_le(&mut self) -> Result<i32> {
        let value = self.inner.read_i32::<LittleEndian>();
        self.advance(value, 4)
    }

    pub fn read_i64_le(&mut self) -> Result<i64> {
        let value = self.inner.read_i64::<LittleEndian>();
        self.advance(value, 8)
    }

    pub fn read_u64_le(&mut self) -> Result<u64> {
        let value = self.inner.read_u64::<LittleEndian>();
        self.advance(value, 8)
    }

    fn advance<T>(&mut self, value: io::Result<T>, width: u64) -> Result<T> {
        match value {
            Ok(v) => {
                self.position += width;
                Ok(v)
            }
            Err(e) if e.kind() == io::ErrorKind::UnexpectedEof => Err(Error::TruncatedStream {
                offset: self.position,
                needed: width,
            }),
            Err(e) => Err(Error::Io(e)),
        }
    }
}
