//! In-memory commitment tree
//!
//! Same array layout and hashing as the on-chain tree. Serves as a local
//! mirror and as the reference [`TreeAccessor`] in tests.

use std::collections::BTreeMap;

use async_trait::async_trait;
use log::debug;
use types::{Error, Result, Side, TreeParams, hex::normalize_hex};
use witness::{codec::truncate_hex, concatenate_then_hash};

use crate::{accessor::TreeAccessor, path::step};

/// Commitment tree held in memory
///
/// Only written nodes are stored. Missing nodes read as all-zero hashes of
/// node width.
#[derive(Clone, Debug)]
pub struct MemoryTree {
    params: TreeParams,
    nodes: BTreeMap<u64, String>,
    root: String,
    zero_node: String,
    next_z: u64,
}

impl MemoryTree {
    /// Empty tree with validated parameters
    pub fn new(params: TreeParams) -> Result<Self> {
        params.validate()?;
        Ok(Self {
            params,
            nodes: BTreeMap::new(),
            root: format!("0x{}", "00".repeat(params.root_hash_len)),
            zero_node: format!("0x{}", "00".repeat(params.node_hash_len)),
            next_z: 0,
        })
    }

    /// Parameters the tree was built with
    pub fn params(&self) -> &TreeParams {
        &self.params
    }

    /// Number of commitments inserted so far
    pub fn next_z_count(&self) -> u64 {
        self.next_z
    }

    /// Current root
    pub fn latest_root(&self) -> &str {
        &self.root
    }

    /// Number of array slots, root included
    pub fn node_count(&self) -> Result<u64> {
        self.params
            .leaf_count()?
            .checked_mul(2)
            .and_then(|n| n.checked_sub(1))
            .ok_or_else(|| Error::validation("node count overflows u64"))
    }

    /// Hash stored at `index`, or the zero hash if unset
    pub fn node_or_zero(&self, index: u64) -> &str {
        if index == 0 {
            return &self.root;
        }
        self.nodes.get(&index).unwrap_or(&self.zero_node)
    }

    /// Append a commitment at the next z-count and return that z-count
    pub fn insert(&mut self, commitment: &str) -> Result<u64> {
        self.insert_at(commitment, self.next_z)
    }

    /// Write a commitment at z-count `z_count` and return it
    ///
    /// Overwriting an existing leaf does not advance the next z-count.
    /// Writing past it would leave a gap and fails.
    pub fn insert_at(&mut self, commitment: &str, z_count: u64) -> Result<u64> {
        if z_count > self.next_z {
            return Err(Error::validation(format!(
                "z-count {z_count} exceeds next z-count {}, would create gap",
                self.next_z
            )));
        }
        if z_count >= self.params.leaf_count()? {
            return Err(Error::validation("commitment tree is full"));
        }

        let commitment = normalize_hex(commitment)?;
        if commitment.len().saturating_sub(2) != self.params.root_hash_len.saturating_mul(2) {
            return Err(Error::LengthMismatch {
                what: "commitment",
                expected: self.params.root_hash_len,
                found: commitment.len().saturating_sub(2) / 2,
                value: commitment,
            });
        }
        let leaf = truncate_hex(&commitment, self.params.node_hash_len)?;

        let index = self
            .params
            .first_leaf_index()?
            .checked_add(z_count)
            .ok_or_else(|| Error::validation("leaf index overflow"))?;
        self.update_path(index, leaf)?;

        let next = z_count
            .checked_add(1)
            .ok_or_else(|| Error::validation("z-count overflow"))?;
        self.next_z = self.next_z.max(next);
        debug!("inserted commitment {commitment} at z-count {z_count}");
        Ok(z_count)
    }

    /// Overwrite a single node without rehashing its ancestors
    ///
    /// Leaves the tree inconsistent on purpose; meant for simulating a
    /// misbehaving tree holder.
    pub fn set_node(&mut self, index: u64, hash: &str) -> Result<()> {
        if index >= self.node_count()? {
            return Err(Error::validation(format!("index {index} is outside the tree")));
        }
        let hash = normalize_hex(hash)?;
        if index == 0 {
            self.root = hash;
        } else {
            self.nodes.insert(index, hash);
        }
        Ok(())
    }

    fn update_path(&mut self, index: u64, leaf: String) -> Result<()> {
        let mut current = leaf;
        let mut index = index;
        self.nodes.insert(index, current.clone());

        while index != 0 {
            let (sibling, side, parent) = step(index)?;
            let sibling = self.node_or_zero(sibling).to_string();
            let full = match side {
                Side::Right => concatenate_then_hash(&[&current, &sibling])?,
                Side::Left => concatenate_then_hash(&[&sibling, &current])?,
            };
            if parent == 0 {
                self.root = full;
                break;
            }
            current = truncate_hex(&full, self.params.node_hash_len)?;
            self.nodes.insert(parent, current.clone());
            index = parent;
        }
        Ok(())
    }
}

#[async_trait]
impl TreeAccessor for MemoryTree {
    async fn node(&self, index: u64) -> anyhow::Result<String> {
        let count = self.node_count()?;
        if index >= count {
            anyhow::bail!("index {index} is outside a tree of {count} nodes");
        }
        Ok(self.node_or_zero(index).to_string())
    }

    async fn root(&self) -> anyhow::Result<String> {
        Ok(self.root.clone())
    }
}
