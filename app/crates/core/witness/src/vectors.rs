//! Witness vector assembly
//!
//! Each [`Element`] expands according to its encoding and the expansions are
//! concatenated in input order. That order is what the circuit's argument
//! list expects, so it is never permuted.

use log::debug;
use types::{Element, Encoding, FieldVector, Result};

use crate::{
    chunker::{PackingPolicy, hex_to_field_preserve},
    codec::{hex_to_bits, hex_to_bytes, hex_to_dec},
};

/// Encodes element sequences into witness vectors
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct VectorEncoder {
    policy: PackingPolicy,
}

impl VectorEncoder {
    /// Encoder that fails on lossy field packing
    pub fn new() -> Self {
        Self::default()
    }

    /// Encoder with an explicit packing overflow policy
    pub fn with_policy(policy: PackingPolicy) -> Self {
        Self { policy }
    }

    /// Packing overflow policy in use
    pub fn policy(&self) -> PackingPolicy {
        self.policy
    }

    /// Expand one element into its vector entries
    pub fn encode(&self, element: &Element) -> Result<Vec<String>> {
        match element.encoding() {
            Encoding::Bits => Ok(hex_to_bits(element.hex())?
                .chars()
                .map(String::from)
                .collect()),
            Encoding::Bytes => hex_to_bytes(element.hex()),
            Encoding::Field => hex_to_field_preserve(
                element.hex(),
                element.packing_size(),
                element.packets(),
                self.policy,
            ),
            Encoding::Scalar => Ok(vec![hex_to_dec(element.hex())?]),
        }
    }

    /// Concatenate the expansions of `elements`, in order
    pub fn compute_vectors(&self, elements: &[Element]) -> Result<FieldVector> {
        let mut vector = FieldVector::new();
        for element in elements {
            vector.extend(self.encode(element)?);
        }
        debug!(
            "encoded {} elements into {} witness values",
            elements.len(),
            vector.len()
        );
        Ok(vector)
    }
}

/// [`VectorEncoder::compute_vectors`] with the strict packing policy
pub fn compute_vectors(elements: &[Element]) -> Result<FieldVector> {
    VectorEncoder::new().compute_vectors(elements)
}
