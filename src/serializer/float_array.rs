//! Serializers for arrays of fixed-width floats.
//!
//! ## Format
//!
//! ```text
//! [len: packed int][element 0][element 1]...   (4 or 8 bytes each, big-endian)
//! ```
//!
//! Equality and hashing use canonical bit patterns, so NaN equals NaN and
//! `0.0` differs from `-0.0`. Ordering uses native float comparison, which
//! is not total in the presence of NaN.

use super::{compare_len, hash_combine, Serializer};
use crate::encoding::{canonical_f32_bits, canonical_f64_bits, DataInput, DataOutput};
use crate::error::Result;
use std::cmp::Ordering;

/// Element-wise comparison: equal elements continue, a greater element wins,
/// anything else (including NaN) is less. Ties break on length.
fn compare_floats<F: PartialOrd>(a: &[F], b: &[F]) -> Ordering {
    if std::ptr::eq(a, b) {
        return Ordering::Equal;
    }
    for (x, y) in a.iter().zip(b) {
        if x == y {
            continue;
        }
        if x > y {
            return Ordering::Greater;
        }
        return Ordering::Less;
    }
    compare_len(a.len(), b.len())
}

/// Serializer for `Vec<f32>`.
#[derive(Debug, Clone, Copy, Default)]
pub struct FloatArraySerializer;

impl Serializer<Vec<f32>> for FloatArraySerializer {
    fn serialize(&self, out: &mut DataOutput, value: &Vec<f32>) {
        out.pack_len(value.len());
        for &v in value {
            out.write_f32(v);
        }
    }

    fn deserialize(&self, input: &mut DataInput<'_>, _available: usize) -> Result<Vec<f32>> {
        let len = input.unpack_len(4)?;
        let mut ret = Vec::with_capacity(len);
        for _ in 0..len {
            ret.push(input.read_f32()?);
        }
        Ok(ret)
    }

    fn compare(&self, a: &Vec<f32>, b: &Vec<f32>) -> Ordering {
        compare_floats(a.as_slice(), b.as_slice())
    }

    fn equals(&self, a: &Vec<f32>, b: &Vec<f32>) -> bool {
        a.len() == b.len()
            && a.iter()
                .zip(b)
                .all(|(x, y)| canonical_f32_bits(*x) == canonical_f32_bits(*y))
    }

    fn hash(&self, value: &Vec<f32>, seed: i32) -> i32 {
        value
            .iter()
            .fold(seed, |seed, &v| hash_combine(seed, canonical_f32_bits(v) as i32))
    }

    fn is_trusted(&self) -> bool {
        true
    }
}

/// Serializer for `Vec<f64>`.
///
/// Each element contributes `(bits ^ (bits >> 32)) as i32` to the hash.
#[derive(Debug, Clone, Copy, Default)]
pub struct DoubleArraySerializer;

impl Serializer<Vec<f64>> for DoubleArraySerializer {
    fn serialize(&self, out: &mut DataOutput, value: &Vec<f64>) {
        out.pack_len(value.len());
        for &v in value {
            out.write_f64(v);
        }
    }

    fn deserialize(&self, input: &mut DataInput<'_>, _available: usize) -> Result<Vec<f64>> {
        let len = input.unpack_len(8)?;
        let mut ret = Vec::with_capacity(len);
        for _ in 0..len {
            ret.push(input.read_f64()?);
        }
        Ok(ret)
    }

    fn compare(&self, a: &Vec<f64>, b: &Vec<f64>) -> Ordering {
        compare_floats(a.as_slice(), b.as_slice())
    }

    fn equals(&self, a: &Vec<f64>, b: &Vec<f64>) -> bool {
        a.len() == b.len()
            && a.iter()
                .zip(b)
                .all(|(x, y)| canonical_f64_bits(*x) == canonical_f64_bits(*y))
    }

    fn hash(&self, value: &Vec<f64>, seed: i32) -> i32 {
        value.iter().fold(seed, |seed, &v| {
            let bits = canonical_f64_bits(v);
            hash_combine(seed, (bits ^ (bits >> 32)) as i32)
        })
    }

    fn is_trusted(&self) -> bool {
        true
    }
}
