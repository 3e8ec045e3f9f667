//! Proof elements
//!
//! An [`Element`] is a value together with the way the circuit expects it
//! to be laid out in the witness vector. The same hex value may be fed as
//! individual bits, as bytes, or packed into field limbs, so the encoding
//! travels with the value.

use core::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::{
    error::{Error, Result},
    hex::normalize_hex,
    params::DEFAULT_PACKING_SIZE,
};

/// Witness encoding discipline of an [`Element`]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Encoding {
    /// One vector entry per bit, leading zeros kept
    Bits,
    /// One vector entry per byte, as decimal
    Bytes,
    /// Packed into fixed-width field limbs, most significant first
    Field,
    /// A single decimal value, no chunking
    Scalar,
}

impl Encoding {
    /// Every accepted encoding, in tag order
    pub const ALL: [Encoding; 4] = [Self::Bits, Self::Bytes, Self::Field, Self::Scalar];

    /// Tag used in configuration and logs
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Bits => "bits",
            Self::Bytes => "bytes",
            Self::Field => "field",
            Self::Scalar => "scalar",
        }
    }
}

impl fmt::Display for Encoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Encoding {
    type Err = Error;

    fn from_str(tag: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|e| e.as_str() == tag)
            .ok_or_else(|| Error::validation(format!("encoding type not recognized: {tag}")))
    }
}

/// A value plus its witness encoding
///
/// Immutable once built. The value is kept lowercase with a single `0x`
/// prefix.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Element {
    value: String,
    encoding: Encoding,
    packing_size: usize,
    packets: Option<usize>,
}

impl Element {
    /// Build an element with the default packing size
    pub fn new(hex: &str, encoding: Encoding) -> Result<Self> {
        Self::build(hex, encoding, DEFAULT_PACKING_SIZE, None)
    }

    /// Build a `field` element with an explicit limb width and limb count
    pub fn field(hex: &str, packing_size: usize, packets: Option<usize>) -> Result<Self> {
        Self::build(hex, Encoding::Field, packing_size, packets)
    }

    /// Build an element from a textual encoding tag
    pub fn from_tag(hex: &str, tag: &str) -> Result<Self> {
        Self::new(hex, tag.parse()?)
    }

    fn build(
        hex: &str,
        encoding: Encoding,
        packing_size: usize,
        packets: Option<usize>,
    ) -> Result<Self> {
        let value = normalize_hex(hex)?;
        if encoding == Encoding::Field && packing_size == 0 {
            return Err(Error::validation("field packing size must be positive"));
        }
        if packets == Some(0) {
            return Err(Error::validation("packet count must be positive"));
        }
        Ok(Self {
            value,
            encoding,
            packing_size,
            packets,
        })
    }

    /// Prefixed hex value
    pub fn hex(&self) -> &str {
        &self.value
    }

    /// Hex digits without prefix
    pub fn digits(&self) -> &str {
        crate::hex::strip_0x(&self.value)
    }

    /// Encoding discipline
    pub fn encoding(&self) -> Encoding {
        self.encoding
    }

    /// Bits per limb (only meaningful for [`Encoding::Field`])
    pub fn packing_size(&self) -> usize {
        self.packing_size
    }

    /// Requested limb count, if any
    pub fn packets(&self) -> Option<usize> {
        self.packets
    }
}
