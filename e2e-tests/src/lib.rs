//! End-to-End Tests for witness assembly
//!
//! Drives the three core crates together the way a proving client does:
//! - the `merkle` crate resolves a sister path from a shared, mutable tree
//! - the `merkle` crate reconciles that path with the tree root
//! - the `witness` crate packs the commitment, path and positions into the
//!   circuit's argument vector

#[cfg(test)]
mod tests;
