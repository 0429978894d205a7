//! Packed (variable-length) integers.
//!
//! ## Format
//!
//! ```text
//! value = g[0] g[1] ... g[k]          (7-bit groups, most significant first)
//! bytes = g[0] g[1] ... (g[k] | 0x80)
//! ```
//!
//! Non-terminal bytes have the top bit clear; the last byte has it set. Zero
//! is the single byte `0x80`. This is the reverse of LEB128 on both counts
//! (group order and marker placement) and must be kept bit for bit.
//!
//! A `u32` takes at most 5 bytes and a `u64` at most 10.

use super::output::{capacity_overflow, DataOutput};
use crate::error::{Error, Result};

/// Worst-case size of a packed `u32`.
pub const MAX_PACKED_INT_LEN: usize = 5;

/// Worst-case size of a packed `u64`.
pub const MAX_PACKED_LONG_LEN: usize = 10;

/// Returns the number of bytes `pack_int(value)` emits.
#[inline]
pub fn packed_len_u32(value: u32) -> usize {
    let bits = 32 - value.leading_zeros() as usize;
    bits.max(1).div_ceil(7)
}

/// Returns the number of bytes `pack_long(value)` emits.
#[inline]
pub fn packed_len_u64(value: u64) -> usize {
    let bits = 64 - value.leading_zeros() as usize;
    bits.max(1).div_ceil(7)
}

/// Decodes a packed `u32` from the front of `data`.
///
/// Returns the value and the number of bytes consumed.
pub fn unpack_int(data: &[u8]) -> Result<(u32, usize)> {
    let mut result: u32 = 0;
    for (i, &byte) in data.iter().enumerate() {
        if result >> 25 != 0 {
            return Err(Error::corruption("packed int overflows 32 bits"));
        }
        result = (result << 7) | (byte & 0x7F) as u32;
        if byte & 0x80 != 0 {
            return Ok((result, i + 1));
        }
    }
    Err(Error::corruption(format!(
        "unterminated packed int after {} bytes",
        data.len()
    )))
}

/// Decodes a packed `u64` from the front of `data`.
///
/// Returns the value and the number of bytes consumed.
pub fn unpack_long(data: &[u8]) -> Result<(u64, usize)> {
    let mut result: u64 = 0;
    for (i, &byte) in data.iter().enumerate() {
        if result >> 57 != 0 {
            return Err(Error::corruption("packed long overflows 64 bits"));
        }
        result = (result << 7) | (byte & 0x7F) as u64;
        if byte & 0x80 != 0 {
            return Ok((result, i + 1));
        }
    }
    Err(Error::corruption(format!(
        "unterminated packed long after {} bytes",
        data.len()
    )))
}

impl DataOutput {
    /// Writes `value` as a packed integer (1 to 5 bytes).
    ///
    /// Signed callers pass the two's-complement bits (`v as u32`); negative
    /// values therefore always take 5 bytes.
    pub fn pack_int(&mut self, value: u32) {
        self.ensure_available(MAX_PACKED_INT_LEN);
        // Most values (lengths, ASCII code units) fit in a single byte.
        if value & !0x7F != 0 {
            self.pack_u32_groups(value);
        }
        self.push_terminal(value as u64);
    }

    /// Writes `value` as a packed integer, skipping the small-value fast path.
    ///
    /// Intended for callers that already know `value > 127`; any value still
    /// encodes correctly.
    pub fn pack_int_bigger_than_127(&mut self, value: u32) {
        self.ensure_available(MAX_PACKED_INT_LEN);
        self.pack_u32_groups(value);
        self.push_terminal(value as u64);
    }

    /// Writes `value` as a packed long (1 to 10 bytes).
    pub fn pack_long(&mut self, value: u64) {
        self.ensure_available(MAX_PACKED_LONG_LEN);
        self.pack_u64_unchecked(value);
    }

    /// Writes every element of `values` as a packed long.
    ///
    /// Capacity for the worst case (10 bytes per element) is reserved once up
    /// front. Pass `&array[from..to]` to encode a sub-range.
    pub fn pack_long_array(&mut self, values: &[u64]) {
        let worst_case = values
            .len()
            .checked_mul(MAX_PACKED_LONG_LEN)
            .unwrap_or_else(|| capacity_overflow());
        self.ensure_available(worst_case);
        for &value in values {
            self.pack_u64_unchecked(value);
        }
    }

    /// Writes a collection length as a packed integer.
    ///
    /// # Panics
    ///
    /// Panics if `len` exceeds `u32::MAX`, which the format cannot represent.
    pub fn pack_len(&mut self, len: usize) {
        match u32::try_from(len) {
            Ok(len) => self.pack_int(len),
            Err(_) => panic!("length {} exceeds the packed int range", len),
        }
    }

    /// Emits the non-terminal groups of `value`; capacity must be reserved.
    #[inline]
    fn pack_u32_groups(&mut self, value: u32) {
        // `min` keeps zero at shift 0 instead of underflowing.
        let mut shift = 31 - value.leading_zeros().min(31);
        shift -= shift % 7;
        while shift != 0 {
            self.buf[self.pos] = ((value >> shift) & 0x7F) as u8;
            self.pos += 1;
            shift -= 7;
        }
    }

    #[inline]
    fn pack_u64_unchecked(&mut self, value: u64) {
        let mut shift = 63 - value.leading_zeros().min(63);
        shift -= shift % 7;
        while shift != 0 {
            self.buf[self.pos] = ((value >> shift) & 0x7F) as u8;
            self.pos += 1;
            shift -= 7;
        }
        self.push_terminal(value);
    }

    #[inline]
    fn push_terminal(&mut self, value: u64) {
        self.buf[self.pos] = ((value & 0x7F) | 0x80) as u8;
        self.pos += 1;
    }
}
