//! Commitment tree paths
//!
//! The tree is an array-indexed complete binary tree: the root is index `0`,
//! the children of `i` are `2i + 1` (left) and `2i + 2` (right), and leaves
//! fill the last level from index `2^(depth-1) - 1` in insertion order.
//! Non-root nodes are SHA-256 digests truncated to the node hash length;
//! the root is the full digest of the top pair.
//!
//! ```text
//!                   0
//!          1                  2
//!      3       4         5         6
//!    7   8   9   10   11   12   13   14   <- leaves, z-count 0..7
//! ```
//!
//! - [`path::compute_path`] reads a sister path through a [`TreeAccessor`]
//! - [`verify::check_root`] recomputes the root from a commitment and path
//! - [`memory::MemoryTree`] is a local tree with the same layout

pub mod accessor;
pub mod memory;
pub mod path;
pub mod verify;

pub use accessor::TreeAccessor;
pub use memory::MemoryTree;
pub use path::{compute_path, get_leaf_index_from_z_count};
pub use verify::{check_root, compute_root};
