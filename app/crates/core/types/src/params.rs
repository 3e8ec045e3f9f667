//! Tree and packing parameters
//!
//! These constants have to match the external circuit and the on-chain tree
//! exactly. They are passed into every component call; nothing in the core
//! reads them from global state.

use anyhow::Context;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Number of levels of the commitment tree, root level included
pub const DEFAULT_TREE_DEPTH: u32 = 33;

/// Byte length of a non-root tree node (216 bits)
pub const DEFAULT_NODE_HASH_LEN: usize = 27;

/// Byte length of a commitment and of the tree root
pub const DEFAULT_ROOT_HASH_LEN: usize = 32;

/// Bits per limb when packing a value into field elements
pub const DEFAULT_PACKING_SIZE: usize = 128;

/// Output width of the digest used for tree nodes
pub const DIGEST_LEN: usize = 32;

/// Parameters shared by the path resolver, the root verifier and the hash
/// folder
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TreeParams {
    /// Levels in the tree; leaves sit on the last one
    pub depth: u32,
    /// Byte length of every non-root node
    pub node_hash_len: usize,
    /// Byte length of the root and of commitments; always the full digest
    pub root_hash_len: usize,
    /// Bits per field limb, also the width of the positions word
    pub packing_size: usize,
}

impl Default for TreeParams {
    fn default() -> Self {
        Self {
            depth: DEFAULT_TREE_DEPTH,
            node_hash_len: DEFAULT_NODE_HASH_LEN,
            root_hash_len: DEFAULT_ROOT_HASH_LEN,
            packing_size: DEFAULT_PACKING_SIZE,
        }
    }
}

impl TreeParams {
    /// Parse parameters from JSON and validate them
    ///
    /// Missing fields take their default value; unknown fields are rejected.
    pub fn from_json(json: &str) -> anyhow::Result<Self> {
        let params: Self = serde_json::from_str(json).context("malformed tree parameters")?;
        params.validate()?;
        Ok(params)
    }

    /// Check the invariants every component relies on
    pub fn validate(&self) -> Result<()> {
        if !(2..=64).contains(&self.depth) {
            return Err(Error::validation(format!(
                "tree depth must be within [2..64], got {}",
                self.depth
            )));
        }
        if self.node_hash_len == 0 || self.node_hash_len > self.root_hash_len {
            return Err(Error::validation(format!(
                "node hash length {} must be within [1..{}]",
                self.node_hash_len, self.root_hash_len
            )));
        }
        if self.root_hash_len != DIGEST_LEN {
            return Err(Error::validation(format!(
                "root hash length {} must equal the digest width {DIGEST_LEN}",
                self.root_hash_len
            )));
        }
        if self.packing_size == 0 || !self.packing_size.is_multiple_of(4) {
            return Err(Error::validation(format!(
                "packing size must be a positive multiple of 4, got {}",
                self.packing_size
            )));
        }
        let levels = usize::try_from(self.levels())
            .map_err(|_| Error::validation("tree depth does not fit usize"))?;
        if levels > self.packing_size {
            return Err(Error::Overflow {
                what: "side bits per path",
                produced: levels,
                limit: self.packing_size,
            });
        }
        Ok(())
    }

    /// Number of hashing levels between a leaf and the root
    pub fn levels(&self) -> u32 {
        self.depth.saturating_sub(1)
    }

    /// Input size in bytes of one hash-folding round
    pub fn round_capacity(&self) -> usize {
        self.node_hash_len.saturating_mul(2)
    }

    /// Number of leaf slots
    pub fn leaf_count(&self) -> Result<u64> {
        1u64.checked_shl(self.levels())
            .ok_or_else(|| Error::validation(format!("tree depth {} overflows u64", self.depth)))
    }

    /// Tree index of the first leaf (`2^(depth-1) - 1`)
    pub fn first_leaf_index(&self) -> Result<u64> {
        self.leaf_count()?
            .checked_sub(1)
            .ok_or_else(|| Error::validation("leaf count underflow"))
    }
}
