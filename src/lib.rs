//! # AiDb Codec - Binary Encoding Layer
//!
//! The byte format every AiDb storage structure persists keys and values in.
//! Indexes, pages and transactions depend on it bit for bit, so the layout
//! defined here is stable across versions.
//!
//! ## Architecture
//!
//! - **DataOutput**: growable, power-of-two output buffer with big-endian primitives
//! - **Packed integers**: 7-bit groups, most significant first, terminal byte marked with `0x80`
//! - **DataInput**: the matching reader, reporting malformed input as corruption
//! - **Serializer**: the typed contract (serialize, deserialize, compare, equals,
//!   hash-with-seed, trust level) that ordered and hashed collections store values through
//!
//! ## Example Usage
//!
//! ```rust
//! use aidb_codec::serializer::{FloatArraySerializer, Serializer};
//! use aidb_codec::DataOutput;
//!
//! # fn main() -> Result<(), aidb_codec::Error> {
//! let ser = FloatArraySerializer;
//!
//! let mut out = DataOutput::new();
//! ser.serialize(&mut out, &vec![1.0, -2.5]);
//! let bytes = out.finalize();
//! assert_eq!(bytes[0], 0x82); // packed length 2
//!
//! let decoded = ser.deserialize_from_slice(&bytes)?;
//! assert!(ser.equals(&decoded, &vec![1.0, -2.5]));
//! # Ok(())
//! # }
//! ```
//!
//! ## Threading
//!
//! A `DataOutput` belongs to one serialization call; use one buffer per
//! concurrent writer. Serializers are stateless and `Send + Sync`.

#![warn(missing_docs)]
#![warn(rust_2018_idioms)]

// Module declarations
pub mod config;
pub mod encoding;
pub mod error;
pub mod serializer;

// Re-exports
pub use config::Options;
pub use encoding::{DataInput, DataOutput};
pub use error::{Error, Result};
pub use serializer::Serializer;
