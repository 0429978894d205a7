//! Byte-level encoding: the growable output buffer, packed integers and the
//! matching reader.
//!
//! ## Layout
//!
//! | value            | bytes                                              |
//! |------------------|----------------------------------------------------|
//! | bool / u8 / i8   | 1                                                  |
//! | u16 / i16 / char | 2, big-endian                                      |
//! | u32 / i32 / f32  | 4, big-endian (floats as canonical IEEE-754 bits)  |
//! | u64 / i64 / f64  | 8, big-endian                                      |
//! | packed int       | 1..=5, see [`varint`]                              |
//! | packed long      | 1..=10                                             |
//! | text             | packed UTF-16 unit count, then one packed int each |

mod input;
mod output;
pub mod varint;

pub use input::DataInput;
pub use output::{
    canonical_f32_bits, canonical_f64_bits, DataOutput, CANONICAL_NAN_F32, CANONICAL_NAN_F64,
};
pub use varint::{MAX_PACKED_INT_LEN, MAX_PACKED_LONG_LEN};
