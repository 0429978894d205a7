//! Reader over bytes produced by [`DataOutput`](super::DataOutput).
//!
//! Every read checks the remaining length first and reports truncated or
//! malformed input as [`Error::Corruption`] instead of panicking.

use super::varint;
use crate::error::{Error, Result};
use bytes::Buf;

/// A cursor over a borrowed byte slice, decoding the `DataOutput` layout.
#[derive(Debug, Clone)]
pub struct DataInput<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> DataInput<'a> {
    /// Creates a reader positioned at the start of `data`.
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    /// Bytes not yet consumed.
    #[inline]
    pub fn remaining(&self) -> usize {
        self.data.len() - self.pos
    }

    /// Current read position.
    #[inline]
    pub fn position(&self) -> usize {
        self.pos
    }

    fn take(&mut self, n: usize, what: &str) -> Result<&'a [u8]> {
        if self.remaining() < n {
            return Err(Error::corruption(format!(
                "truncated {}: need {} bytes, {} remaining",
                what,
                n,
                self.remaining()
            )));
        }
        let chunk = &self.data[self.pos..self.pos + n];
        self.pos += n;
        Ok(chunk)
    }

    /// Reads a boolean; any non-zero byte is `true`.
    pub fn read_bool(&mut self) -> Result<bool> {
        Ok(self.read_u8()? != 0)
    }

    /// Reads a single byte.
    pub fn read_u8(&mut self) -> Result<u8> {
        let mut chunk = self.take(1, "u8")?;
        Ok(chunk.get_u8())
    }

    /// Reads a single signed byte.
    pub fn read_i8(&mut self) -> Result<i8> {
        let mut chunk = self.take(1, "i8")?;
        Ok(chunk.get_i8())
    }

    /// Reads a big-endian 16-bit integer.
    pub fn read_u16(&mut self) -> Result<u16> {
        let mut chunk = self.take(2, "u16")?;
        Ok(chunk.get_u16())
    }

    /// Reads a big-endian signed 16-bit integer.
    pub fn read_i16(&mut self) -> Result<i16> {
        let mut chunk = self.take(2, "i16")?;
        Ok(chunk.get_i16())
    }

    /// Reads one UTF-16 code unit.
    pub fn read_char(&mut self) -> Result<u16> {
        let mut chunk = self.take(2, "char")?;
        Ok(chunk.get_u16())
    }

    /// Reads a big-endian 32-bit integer.
    pub fn read_u32(&mut self) -> Result<u32> {
        let mut chunk = self.take(4, "u32")?;
        Ok(chunk.get_u32())
    }

    /// Reads a big-endian signed 32-bit integer.
    pub fn read_i32(&mut self) -> Result<i32> {
        let mut chunk = self.take(4, "i32")?;
        Ok(chunk.get_i32())
    }

    /// Reads a big-endian 64-bit integer.
    pub fn read_u64(&mut self) -> Result<u64> {
        let mut chunk = self.take(8, "u64")?;
        Ok(chunk.get_u64())
    }

    /// Reads a big-endian signed 64-bit integer.
    pub fn read_i64(&mut self) -> Result<i64> {
        let mut chunk = self.take(8, "i64")?;
        Ok(chunk.get_i64())
    }

    /// Reads a 32-bit IEEE-754 float.
    pub fn read_f32(&mut self) -> Result<f32> {
        let mut chunk = self.take(4, "f32")?;
        Ok(chunk.get_f32())
    }

    /// Reads a 64-bit IEEE-754 float.
    pub fn read_f64(&mut self) -> Result<f64> {
        let mut chunk = self.take(8, "f64")?;
        Ok(chunk.get_f64())
    }

    /// Reads exactly `n` raw bytes, borrowed from the input.
    pub fn read_bytes(&mut self, n: usize) -> Result<&'a [u8]> {
        self.take(n, "byte range")
    }

    /// Reads a packed `u32`.
    pub fn unpack_int(&mut self) -> Result<u32> {
        let (value, consumed) = varint::unpack_int(&self.data[self.pos..])?;
        self.pos += consumed;
        Ok(value)
    }

    /// Reads a packed `u64`.
    pub fn unpack_long(&mut self) -> Result<u64> {
        let (value, consumed) = varint::unpack_long(&self.data[self.pos..])?;
        self.pos += consumed;
        Ok(value)
    }

    /// Reads a packed length and checks that at least `min_element_size`
    /// bytes per element remain, so a corrupt length never drives an
    /// oversized allocation.
    pub fn unpack_len(&mut self, min_element_size: usize) -> Result<usize> {
        let len = self.unpack_int()? as usize;
        let needed = len.saturating_mul(min_element_size);
        if needed > self.remaining() {
            return Err(Error::corruption(format!(
                "declared length {} needs {} bytes, {} remaining",
                len,
                needed,
                self.remaining()
            )));
        }
        Ok(len)
    }

    /// Reads text written by `DataOutput::write_text`.
    ///
    /// Unpaired surrogates cannot be represented in a `String` and are
    /// reported as corruption.
    pub fn read_text(&mut self) -> Result<String> {
        let count = self.unpack_len(1)?;
        let mut units = Vec::with_capacity(count);
        for _ in 0..count {
            let unit = self.unpack_int()?;
            let unit = u16::try_from(unit).map_err(|_| {
                Error::corruption(format!("code unit {:#x} out of UTF-16 range", unit))
            })?;
            units.push(unit);
        }
        String::from_utf16(&units).map_err(|e| Error::corruption(format!("invalid text: {}", e)))
    }
}
