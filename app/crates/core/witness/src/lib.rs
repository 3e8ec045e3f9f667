//! Witness vector encoding
//!
//! Turns domain values (token ids, keys, salts, tree nodes) into the exact
//! numeric layout an external circuit expects.
//!
//! # Modules
//! - [`codec`]: lossless hex/binary/decimal conversion of arbitrary-size
//!   integers
//! - [`chunker`]: big-endian fixed-width bit chunking and field packing
//! - [`hash`]: single-round and chunked SHA-256 folding
//! - [`vectors`]: [`types::Element`] sequences to [`types::FieldVector`]

pub mod chunker;
pub mod codec;
pub mod hash;
pub mod vectors;

pub use chunker::{PackingPolicy, hex_to_field_preserve, split_and_pad_bits_n};
pub use codec::convert_base;
pub use hash::{HashFolder, concatenate_then_hash};
pub use vectors::{VectorEncoder, compute_vectors};
