//! Root recomputation
//!
//! Rebuilds the root from a commitment and its sister path, leaf level
//! first. Each side bit says where the sibling sits: `1` puts the running
//! hash on the left of the pair, `0` on the right.

use log::{info, warn};
use types::{Error, MerklePathResult, Result, Side, TreeParams, hex::normalize_hex};
use witness::{
    chunker::left_pad_bits,
    codec::{hex_to_bin, truncate_hex},
    concatenate_then_hash,
};

/// Unpack a positions word into one side per bit, most significant first
///
/// The result always has `packing_size` entries; trailing entries past the
/// path length are padding and read as [`Side::Left`].
pub fn decode_positions(positions: &str, packing_size: usize) -> Result<Vec<Side>> {
    let bits = left_pad_bits(&hex_to_bin(positions)?, packing_size)?;
    bits.chars()
        .map(|bit| {
            Side::from_bit(bit)
                .ok_or_else(|| Error::validation(format!("'{bit}' is not a side bit")))
        })
        .collect()
}

fn require_len(what: &'static str, hash: &str, len: usize) -> Result<String> {
    let hash = normalize_hex(hash)?;
    let bytes = hash.len().saturating_sub(2) / 2;
    if hash.len().saturating_sub(2) != len.saturating_mul(2) {
        return Err(Error::LengthMismatch {
            what,
            expected: len,
            found: bytes,
            value: hash,
        });
    }
    Ok(hash)
}

/// Recompute the root implied by `commitment` and `path`
///
/// Intermediate parents are truncated to the node hash length. The last
/// digest is returned untruncated.
pub fn compute_root(commitment: &str, path: &MerklePathResult, params: &TreeParams) -> Result<String> {
    params.validate()?;
    let commitment = require_len("commitment", commitment, params.root_hash_len)?;
    let mut current = truncate_hex(&commitment, params.node_hash_len)?;

    let levels: Vec<_> = path.levels().collect();
    let expected = usize::try_from(params.levels())
        .map_err(|_| Error::validation("tree depth does not fit usize"))?;
    if levels.len() != expected {
        return Err(Error::validation(format!(
            "sister path has {} levels, a depth {} tree needs {expected}",
            levels.len(),
            params.depth
        )));
    }

    let sides = decode_positions(&path.positions, params.packing_size)?;
    if sides.iter().skip(expected).any(|side| *side == Side::Right) {
        return Err(Error::validation(format!(
            "positions {} carry bits past the {expected} path levels",
            path.positions
        )));
    }

    let mut digest = None;
    for (entry, side) in levels.iter().zip(&sides) {
        if entry.side != Some(*side) {
            return Err(Error::validation(format!(
                "node {} is recorded as {:?} but the positions word says {side:?}",
                entry.tree_index, entry.side
            )));
        }
        let sibling = require_len("sister path node", &entry.node_hash, params.node_hash_len)?;
        let full = match side {
            Side::Right => concatenate_then_hash(&[&current, &sibling])?,
            Side::Left => concatenate_then_hash(&[&sibling, &current])?,
        };
        current = truncate_hex(&full, params.node_hash_len)?;
        digest = Some(full);
    }

    digest.ok_or_else(|| Error::validation("sister path is empty"))
}

/// Check that `commitment` and `path` hash up to `root`
pub fn check_root(
    commitment: &str,
    path: &MerklePathResult,
    root: &str,
    params: &TreeParams,
) -> Result<()> {
    let supplied = normalize_hex(root)?;
    let computed = compute_root(commitment, path, params)?;
    if computed != supplied {
        warn!("root {supplied} does not match recomputed root {computed}");
        return Err(Error::RootMismatch {
            supplied,
            computed,
            commitment: String::from(commitment),
        });
    }
    info!("root {supplied} reconciled with commitment {commitment}");
    Ok(())
}
