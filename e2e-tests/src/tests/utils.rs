//! Fixtures shared by the end-to-end tests

use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;
use merkle::{MemoryTree, TreeAccessor};
use tokio::sync::RwLock;
use types::TreeParams;
use witness::{codec::random_hex, concatenate_then_hash};

/// Production tree parameters: depth 33, 27-byte nodes, 32-byte root
pub fn params() -> TreeParams {
    TreeParams::default()
}

/// Token commitment `H(token id | public key | salt)` at full digest width
pub fn token_commitment(token_id: &str, public_key: &str, salt: &str) -> Result<String> {
    Ok(concatenate_then_hash(&[token_id, public_key, salt])?)
}

/// Commitment over freshly drawn token id, key and salt
pub fn random_commitment() -> Result<String> {
    token_commitment(&random_hex(32)?, &random_hex(32)?, &random_hex(32)?)
}

/// Tree behind an async lock, standing in for a contract other parties
/// keep appending to
#[derive(Clone)]
pub struct SharedTree(Arc<RwLock<MemoryTree>>);

impl SharedTree {
    /// Empty shared tree
    pub fn new(params: TreeParams) -> Result<Self> {
        Ok(Self(Arc::new(RwLock::new(MemoryTree::new(params)?))))
    }

    /// Append a commitment, returning its z-count
    pub async fn insert(&self, commitment: &str) -> Result<u64> {
        Ok(self.0.write().await.insert(commitment)?)
    }

    /// Root after the latest insertion
    pub async fn latest_root(&self) -> String {
        self.0.read().await.latest_root().to_string()
    }
}

#[async_trait]
impl TreeAccessor for SharedTree {
    async fn node(&self, index: u64) -> anyhow::Result<String> {
        // Let other fetches interleave, as they would over a network
        tokio::task::yield_now().await;
        self.0.read().await.node(index).await
    }

    async fn root(&self) -> anyhow::Result<String> {
        self.0.read().await.root().await
    }
}

/// Fill `tree` with `count` random commitments, returned in z-count order
pub async fn populate(tree: &SharedTree, count: usize) -> Result<Vec<String>> {
    let mut commitments = Vec::with_capacity(count);
    for _ in 0..count {
        let commitment = random_commitment()?;
        tree.insert(&commitment).await?;
        commitments.push(commitment);
    }
    Ok(commitments)
}
