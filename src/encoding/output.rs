//! Growable output buffer.
//!
//! `DataOutput` is an append-only byte sink. Its capacity is always a power of
//! two and the buffer keeps a size mask equal to `!(capacity - 1)`, so the
//! capacity check performed before every primitive write is a single AND:
//!
//! ```text
//! (pos + n) & size_mask != 0   =>   grow to next_power_of_two(pos + n)
//! ```
//!
//! Multi-byte primitives are written big-endian; floats are written as the
//! bytes of their canonical IEEE-754 bit pattern.

use crate::config::{Options, DEFAULT_INITIAL_CAPACITY};
use bytes::Bytes;
use std::io;

/// Canonical quiet NaN bit pattern for `f32`.
pub const CANONICAL_NAN_F32: u32 = 0x7fc0_0000;

/// Canonical quiet NaN bit pattern for `f64`.
pub const CANONICAL_NAN_F64: u64 = 0x7ff8_0000_0000_0000;

/// Returns the bit pattern of `v`, with every NaN collapsed to
/// [`CANONICAL_NAN_F32`].
#[inline]
pub fn canonical_f32_bits(v: f32) -> u32 {
    if v.is_nan() {
        CANONICAL_NAN_F32
    } else {
        v.to_bits()
    }
}

/// Returns the bit pattern of `v`, with every NaN collapsed to
/// [`CANONICAL_NAN_F64`].
#[inline]
pub fn canonical_f64_bits(v: f64) -> u64 {
    if v.is_nan() {
        CANONICAL_NAN_F64
    } else {
        v.to_bits()
    }
}

#[cold]
#[inline(never)]
pub(crate) fn capacity_overflow() -> ! {
    panic!("capacity overflow")
}

/// An in-memory, append-only byte buffer with power-of-two growth.
///
/// A `DataOutput` is owned by exactly one serialization call at a time. After
/// any failure the buffer must be discarded (or [`reset`](Self::reset)).
///
/// # Example
///
/// ```rust
/// use aidb_codec::DataOutput;
///
/// let mut out = DataOutput::new();
/// out.write_u16(0xCAFE);
/// out.pack_int(300);
/// assert_eq!(out.finalize(), vec![0xCA, 0xFE, 0x02, 0xAC]);
/// ```
#[derive(Debug, Clone)]
pub struct DataOutput {
    /// Backing storage; `buf.len()` is the capacity and is a power of two.
    pub(super) buf: Vec<u8>,
    /// Write cursor (bytes used so far).
    pub(super) pos: usize,
    /// `!(capacity - 1)`
    size_mask: usize,
}

impl Default for DataOutput {
    fn default() -> Self {
        Self::new()
    }
}

impl DataOutput {
    /// Creates an empty buffer with the default capacity of 128 bytes.
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_INITIAL_CAPACITY)
    }

    /// Creates an empty buffer whose capacity is `capacity` rounded up to a
    /// power of two (at least 1).
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity
            .max(1)
            .checked_next_power_of_two()
            .unwrap_or_else(|| capacity_overflow());
        Self {
            buf: vec![0u8; capacity],
            pos: 0,
            size_mask: !(capacity - 1),
        }
    }

    /// Creates an empty buffer sized according to `options`.
    ///
    /// The options are not validated here; use [`Options::validate`] (or
    /// [`Options::from_json`]) first. Debug builds assert they are valid.
    pub fn with_options(options: &Options) -> Self {
        debug_assert!(
            options.validate().is_ok(),
            "invalid options: {:?}",
            options
        );
        Self::with_capacity(options.initial_capacity)
    }

    /// Number of bytes written so far.
    #[inline]
    pub fn len(&self) -> usize {
        self.pos
    }

    /// Returns true if nothing has been written.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.pos == 0
    }

    /// Current capacity of the backing storage.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.buf.len()
    }

    /// The growth mask, `!(capacity - 1)`.
    #[inline]
    pub fn size_mask(&self) -> usize {
        self.size_mask
    }

    /// The bytes written so far.
    #[inline]
    pub fn as_slice(&self) -> &[u8] {
        &self.buf[..self.pos]
    }

    /// Rewinds the cursor to zero. Capacity is kept for reuse.
    pub fn reset(&mut self) {
        self.pos = 0;
    }

    /// Makes sure the next `n` bytes can be written without growing again.
    ///
    /// # Panics
    ///
    /// Panics with "capacity overflow" if `len() + n` does not fit in `usize`.
    /// Allocation failure aborts the process.
    #[inline]
    pub fn ensure_available(&mut self, n: usize) {
        let end = self
            .pos
            .checked_add(n)
            .unwrap_or_else(|| capacity_overflow());
        if end & self.size_mask != 0 {
            self.grow(end);
        }
    }

    #[cold]
    fn grow(&mut self, end: usize) {
        let new_size = end
            .checked_next_power_of_two()
            .unwrap_or_else(|| capacity_overflow())
            .max(self.buf.len());
        self.size_mask = !(new_size - 1);
        // `end == capacity` passes the mask test but already fits.
        if new_size > self.buf.len() {
            log::trace!(
                "Growing output buffer from {} to {} bytes ({} in use)",
                self.buf.len(),
                new_size,
                self.pos
            );
            self.buf.resize(new_size, 0);
        }
    }

    #[inline]
    fn put<const N: usize>(&mut self, bytes: [u8; N]) {
        self.ensure_available(N);
        self.buf[self.pos..self.pos + N].copy_from_slice(&bytes);
        self.pos += N;
    }

    /// Writes a boolean as a single `0` or `1` byte.
    pub fn write_bool(&mut self, v: bool) {
        self.put([v as u8]);
    }

    /// Writes a single byte.
    pub fn write_u8(&mut self, v: u8) {
        self.put([v]);
    }

    /// Writes a single signed byte.
    pub fn write_i8(&mut self, v: i8) {
        self.put(v.to_be_bytes());
    }

    /// Writes a big-endian 16-bit integer.
    pub fn write_u16(&mut self, v: u16) {
        self.put(v.to_be_bytes());
    }

    /// Writes a big-endian signed 16-bit integer.
    pub fn write_i16(&mut self, v: i16) {
        self.put(v.to_be_bytes());
    }

    /// Writes one UTF-16 code unit as two big-endian bytes.
    pub fn write_char(&mut self, unit: u16) {
        self.put(unit.to_be_bytes());
    }

    /// Writes a big-endian 32-bit integer.
    pub fn write_u32(&mut self, v: u32) {
        self.put(v.to_be_bytes());
    }

    /// Writes a big-endian signed 32-bit integer.
    pub fn write_i32(&mut self, v: i32) {
        self.put(v.to_be_bytes());
    }

    /// Writes a big-endian 64-bit integer.
    pub fn write_u64(&mut self, v: u64) {
        self.put(v.to_be_bytes());
    }

    /// Writes a big-endian signed 64-bit integer.
    pub fn write_i64(&mut self, v: i64) {
        self.put(v.to_be_bytes());
    }

    /// Writes the canonical IEEE-754 bits of `v`, big-endian (4 bytes).
    pub fn write_f32(&mut self, v: f32) {
        self.write_u32(canonical_f32_bits(v));
    }

    /// Writes the canonical IEEE-754 bits of `v`, big-endian (8 bytes).
    pub fn write_f64(&mut self, v: f64) {
        self.write_u64(canonical_f64_bits(v));
    }

    /// Writes a raw byte range.
    pub fn write_bytes(&mut self, data: &[u8]) {
        self.ensure_available(data.len());
        self.buf[self.pos..self.pos + data.len()].copy_from_slice(data);
        self.pos += data.len();
    }

    /// Writes text as a packed count of UTF-16 code units followed by one
    /// packed integer per code unit.
    ///
    /// This is not UTF-8: characters outside the Basic Multilingual Plane are
    /// written as two packed surrogates.
    pub fn write_text(&mut self, s: &str) {
        self.pack_len(s.encode_utf16().count());
        for unit in s.encode_utf16() {
            self.pack_int(unit as u32);
        }
    }

    /// Returns a copy of exactly the written bytes.
    pub fn copy_bytes(&self) -> Vec<u8> {
        self.as_slice().to_vec()
    }

    /// Consumes the buffer and returns exactly the written bytes.
    pub fn finalize(mut self) -> Vec<u8> {
        self.buf.truncate(self.pos);
        self.buf
    }

    /// Consumes the buffer and returns the written bytes as [`Bytes`].
    pub fn into_bytes(self) -> Bytes {
        Bytes::from(self.finalize())
    }
}

impl io::Write for DataOutput {
    fn write(&mut self, data: &[u8]) -> io::Result<usize> {
        self.write_bytes(data);
        Ok(data.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}
