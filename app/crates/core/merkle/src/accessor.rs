//! Tree accessor interface
//!
//! The tree is owned by an external party (typically a contract). This
//! crate only reads it, through this trait. Errors are transport-level and
//! are handed back to the caller untouched; retries belong to the
//! implementation or to the orchestration layer.

use std::sync::Arc;

use async_trait::async_trait;

/// Read access to tree nodes
#[async_trait]
pub trait TreeAccessor: Send + Sync {
    /// Hex node hash stored at array index `index`
    async fn node(&self, index: u64) -> anyhow::Result<String>;

    /// Hex hash of the latest root
    async fn root(&self) -> anyhow::Result<String>;
}

#[async_trait]
impl<T: TreeAccessor + ?Sized> TreeAccessor for Arc<T> {
    async fn node(&self, index: u64) -> anyhow::Result<String> {
        (**self).node(index).await
    }

    async fn root(&self) -> anyhow::Result<String> {
        (**self).root().await
    }
}
