//! Typed serializers.
//!
//! A [`Serializer<T>`] is everything an ordered or hashed storage structure
//! needs to know about a value type: how to write it, read it back, order it,
//! test it for equality and hash it with a caller-chosen seed.
//!
//! Serializers are stateless and shared freely between threads; all mutable
//! state lives in the [`DataOutput`] / [`DataInput`] passed to each call.
//!
//! ## Contract
//!
//! - `serialize` is deterministic: equal values produce identical bytes.
//! - `compare` is a total order for the values the structure stores. Sequence
//!   types compare element by element, then shorter-is-less.
//! - `equals(a, b)` implies `hash(a, s) == hash(b, s)` for every seed `s`.
//! - Hashes fold each element into the seed as
//!   `seed = HASH_MULTIPLIER * seed + element_bits` (wrapping, 32-bit).

pub mod byte_array;
pub mod float_array;

pub use byte_array::{ByteArraySerializer, RawBytesSerializer, StringSerializer};
pub use float_array::{DoubleArraySerializer, FloatArraySerializer};

use crate::config::Options;
use crate::encoding::{DataInput, DataOutput};
use crate::error::{Error, Result};
use std::cmp::Ordering;

/// Fibonacci hashing multiplier shared by every hash-combining serializer.
///
/// Changing it changes the hash of every persisted value.
pub const HASH_MULTIPLIER: i32 = -1640531527;

/// Folds one element's bits into a running seed.
#[inline]
pub fn hash_combine(seed: i32, bits: i32) -> i32 {
    HASH_MULTIPLIER.wrapping_mul(seed).wrapping_add(bits)
}

/// Length tie-break for sequence types: shorter is less.
#[inline]
pub fn compare_len(a: usize, b: usize) -> Ordering {
    a.cmp(&b)
}

/// Capability set that makes a value type storable.
///
/// The trait is object safe, so structures holding heterogeneous serializers
/// can store `Box<dyn Serializer<T>>`.
pub trait Serializer<T>: Send + Sync {
    /// Writes `value` into `out`.
    fn serialize(&self, out: &mut DataOutput, value: &T);

    /// Reads a value from `input`.
    ///
    /// `available` is the number of bytes known to remain for this value. It
    /// is advisory: self-delimiting formats may ignore it.
    fn deserialize(&self, input: &mut DataInput<'_>, available: usize) -> Result<T>;

    /// Three-way comparison used by ordered structures.
    fn compare(&self, a: &T, b: &T) -> Ordering;

    /// Equality consistent with [`hash`](Self::hash).
    fn equals(&self, a: &T, b: &T) -> bool;

    /// Hash of `value` parameterized by `seed`.
    fn hash(&self, value: &T, seed: i32) -> i32;

    /// Whether `deserialize` is safe on byte ranges that were not validated
    /// by the caller.
    fn is_trusted(&self) -> bool;

    /// Serializes `value` into a fresh buffer and returns its bytes.
    fn serialize_to_vec(&self, value: &T) -> Vec<u8> {
        let mut out = DataOutput::new();
        self.serialize(&mut out, value);
        out.finalize()
    }

    /// Deserializes a value occupying all of `bytes`.
    fn deserialize_from_slice(&self, bytes: &[u8]) -> Result<T> {
        let mut input = DataInput::new(bytes);
        self.deserialize(&mut input, bytes.len())
    }
}

/// Deserializes `bytes` as one value, adding the checks storage layers wrap
/// around untrusted serializers.
///
/// When the serializer is not trusted and `options.verify_untrusted` is set,
/// the value must consume exactly `bytes`; leftovers mean the length fields
/// and the stored range disagree.
pub fn deserialize_guarded<T, S>(serializer: &S, bytes: &[u8], options: &Options) -> Result<T>
where
    S: Serializer<T> + ?Sized,
{
    let mut input = DataInput::new(bytes);
    let value = serializer.deserialize(&mut input, bytes.len())?;

    if !serializer.is_trusted() && options.verify_untrusted && input.remaining() != 0 {
        log::warn!(
            "Untrusted value consumed {} of {} bytes",
            input.position(),
            bytes.len()
        );
        return Err(Error::corruption(format!(
            "value left {} trailing bytes",
            input.remaining()
        )));
    }

    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Reads a single byte and ignores the rest; only sane when the caller
    /// validates the range.
    struct FirstByte;

    impl Serializer<u8> for FirstByte {
        fn serialize(&self, out: &mut DataOutput, value: &u8) {
            out.write_u8(*value);
        }

        fn deserialize(&self, input: &mut DataInput<'_>, _available: usize) -> Result<u8> {
            input.read_u8()
        }

        fn compare(&self, a: &u8, b: &u8) -> Ordering {
            a.cmp(b)
        }

        fn equals(&self, a: &u8, b: &u8) -> bool {
            a == b
        }

        fn hash(&self, value: &u8, seed: i32) -> i32 {
            hash_combine(seed, *value as i32)
        }

        fn is_trusted(&self) -> bool {
            false
        }
    }

    #[test]
    fn test_hash_combine() {
        assert_eq!(hash_combine(0, 7), 7);
        assert_eq!(hash_combine(1, 0), HASH_MULTIPLIER);
        // Wraps instead of overflowing.
        assert_eq!(hash_combine(i32::MAX, 0), HASH_MULTIPLIER.wrapping_mul(i32::MAX));
    }

    #[test]
    fn test_compare_len() {
        assert_eq!(compare_len(1, 2), Ordering::Less);
        assert_eq!(compare_len(2, 2), Ordering::Equal);
        assert_eq!(compare_len(3, 2), Ordering::Greater);
    }

    #[test]
    fn test_provided_helpers() {
        let bytes = FirstByte.serialize_to_vec(&9);
        assert_eq!(bytes, vec![9]);
        assert_eq!(FirstByte.deserialize_from_slice(&bytes).unwrap(), 9);
    }

    #[test]
    fn test_guarded_rejects_trailing_bytes() {
        let opts = Options::default();
        assert_eq!(deserialize_guarded(&FirstByte, &[4], &opts).unwrap(), 4);

        let err = deserialize_guarded(&FirstByte, &[4, 5], &opts).unwrap_err();
        assert!(err.is_corruption());

        let lenient = Options::new().verify_untrusted(false);
        assert_eq!(deserialize_guarded(&FirstByte, &[4, 5], &lenient).unwrap(), 4);
    }

    #[test]
    fn test_dyn_dispatch() {
        let boxed: Box<dyn Serializer<u8>> = Box::new(FirstByte);
        let bytes = boxed.serialize_to_vec(&200);
        assert_eq!(boxed.deserialize_from_slice(&bytes).unwrap(), 200);
        assert!(deserialize_guarded(&*boxed, &bytes, &Options::default()).is_ok());
    }
}
