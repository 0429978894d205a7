//! Serializers for byte arrays and text.

use super::{hash_combine, Serializer};
use crate::encoding::{DataInput, DataOutput};
use crate::error::{Error, Result};
use std::cmp::Ordering;

/// Serializer for length-prefixed `Vec<u8>`.
///
/// Format: `[len: packed int][bytes]`. Ordering is unsigned lexicographic,
/// shorter-is-less on a shared prefix.
#[derive(Debug, Clone, Copy, Default)]
pub struct ByteArraySerializer;

impl Serializer<Vec<u8>> for ByteArraySerializer {
    fn serialize(&self, out: &mut DataOutput, value: &Vec<u8>) {
        out.pack_len(value.len());
        out.write_bytes(value);
    }

    fn deserialize(&self, input: &mut DataInput<'_>, _available: usize) -> Result<Vec<u8>> {
        let len = input.unpack_len(1)?;
        Ok(input.read_bytes(len)?.to_vec())
    }

    fn compare(&self, a: &Vec<u8>, b: &Vec<u8>) -> Ordering {
        a.as_slice().cmp(b.as_slice())
    }

    fn equals(&self, a: &Vec<u8>, b: &Vec<u8>) -> bool {
        a == b
    }

    fn hash(&self, value: &Vec<u8>, seed: i32) -> i32 {
        value.iter().fold(seed, |seed, &b| hash_combine(seed, b as i32))
    }

    fn is_trusted(&self) -> bool {
        true
    }
}

/// Serializer for `Vec<u8>` without a length prefix.
///
/// The value is the whole byte range handed to `deserialize`, so its size
/// comes from the caller's `available` hint. That hint is not part of the
/// stored bytes, which makes this serializer untrusted.
#[derive(Debug, Clone, Copy, Default)]
pub struct RawBytesSerializer;

impl Serializer<Vec<u8>> for RawBytesSerializer {
    fn serialize(&self, out: &mut DataOutput, value: &Vec<u8>) {
        out.write_bytes(value);
    }

    fn deserialize(&self, input: &mut DataInput<'_>, available: usize) -> Result<Vec<u8>> {
        if available > input.remaining() {
            return Err(Error::corruption(format!(
                "available hint {} exceeds {} remaining bytes",
                available,
                input.remaining()
            )));
        }
        Ok(input.read_bytes(available)?.to_vec())
    }

    fn compare(&self, a: &Vec<u8>, b: &Vec<u8>) -> Ordering {
        a.as_slice().cmp(b.as_slice())
    }

    fn equals(&self, a: &Vec<u8>, b: &Vec<u8>) -> bool {
        a == b
    }

    fn hash(&self, value: &Vec<u8>, seed: i32) -> i32 {
        value.iter().fold(seed, |seed, &b| hash_combine(seed, b as i32))
    }

    fn is_trusted(&self) -> bool {
        false
    }
}

/// Serializer for `String` using the packed UTF-16 text layout of
/// [`DataOutput::write_text`].
///
/// Ordering and hashing work on UTF-16 code units so that they agree with
/// the stored representation.
#[derive(Debug, Clone, Copy, Default)]
pub struct StringSerializer;

impl Serializer<String> for StringSerializer {
    fn serialize(&self, out: &mut DataOutput, value: &String) {
        out.write_text(value);
    }

    fn deserialize(&self, input: &mut DataInput<'_>, _available: usize) -> Result<String> {
        input.read_text()
    }

    fn compare(&self, a: &String, b: &String) -> Ordering {
        a.encode_utf16().cmp(b.encode_utf16())
    }

    fn equals(&self, a: &String, b: &String) -> bool {
        a == b
    }

    fn hash(&self, value: &String, seed: i32) -> i32 {
        value
            .encode_utf16()
            .fold(seed, |seed, unit| hash_combine(seed, unit as i32))
    }

    fn is_trusted(&self) -> bool {
        true
    }
}
