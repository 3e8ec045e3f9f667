//! Sister-path resolution
//!
//! Walks from a leaf to the root collecting each level's sibling. Sibling
//! fetches do not depend on one another and are issued together; results
//! are matched back to their tree index, not to completion order.

use futures::future::try_join_all;
use log::debug;
use types::{
    Error, MerklePathResult, Result, Side, SisterPathEntry, TreeParams,
    hex::{normalize_hex, require_hex},
};
use witness::codec::{bin_to_hex, left_pad_hex, truncate_hex};

use crate::accessor::TreeAccessor;

/// Tree index of the leaf inserted `z_count`-th in a tree of `depth` levels
pub fn get_leaf_index_from_z_count(z_count: u64, depth: u32) -> Result<u64> {
    let width = depth
        .checked_sub(1)
        .and_then(|levels| 1u64.checked_shl(levels))
        .ok_or_else(|| Error::validation(format!("unsupported tree depth {depth}")))?;
    width
        .checked_sub(1)
        .and_then(|first| first.checked_add(z_count))
        .ok_or_else(|| {
            Error::validation(format!(
                "z-count {z_count} does not fit a tree of depth {depth}"
            ))
        })
}

/// Sibling index, sibling side and parent index of a non-root node
///
/// Even indices are right children, so their sibling sits on the left.
pub(crate) fn step(index: u64) -> Result<(u64, Side, u64)> {
    if index == 0 {
        return Err(Error::validation("the root has no sibling"));
    }
    if index.is_multiple_of(2) {
        let sibling = index
            .checked_sub(1)
            .ok_or_else(|| Error::validation("sibling index underflow"))?;
        Ok((sibling, Side::Left, sibling / 2))
    } else {
        let sibling = index
            .checked_add(1)
            .ok_or_else(|| Error::validation("sibling index overflow"))?;
        Ok((sibling, Side::Right, index / 2))
    }
}

/// Sibling indices and sides from `leaf_index` up to, not including, the
/// root
pub fn sibling_plan(leaf_index: u64, depth: u32) -> Result<Vec<(u64, Side)>> {
    let levels = depth.saturating_sub(1);
    let mut plan = Vec::with_capacity(usize::try_from(levels).unwrap_or_default());
    let mut index = leaf_index;
    for _ in 0..levels {
        let (sibling, side, parent) = step(index)?;
        plan.push((sibling, side));
        index = parent;
    }
    if index != 0 {
        return Err(Error::validation(format!(
            "index {leaf_index} is not on the leaf level of a depth {depth} tree"
        )));
    }
    Ok(plan)
}

/// Pack side bits into the positions word
///
/// Bits keep sibling order, are right-padded with zeros to `packing_size`,
/// and are hex-encoded at a fixed width of `packing_size / 4` digits.
pub fn encode_positions(sides: &[Side], packing_size: usize) -> Result<String> {
    if sides.len() > packing_size {
        return Err(Error::Overflow {
            what: "side bits",
            produced: sides.len(),
            limit: packing_size,
        });
    }
    let bits: String = sides.iter().map(|s| s.bit()).collect();
    let word = format!("{bits:0<packing_size$}");
    left_pad_hex(&bin_to_hex(&word)?, packing_size.div_ceil(4))
}

/// Normalize a fetched hash and check its byte length
fn checked_hash(what: &'static str, hash: &str, len: usize) -> Result<String> {
    let hash = normalize_hex(hash)?;
    let digits = require_hex(&hash)?.len();
    if digits != len.saturating_mul(2) {
        return Err(Error::LengthMismatch {
            what,
            expected: len,
            found: digits / 2,
            value: hash,
        });
    }
    Ok(hash)
}

/// Resolve the sister path of the `z_count`-th commitment
///
/// The node at the leaf index must equal `commitment` truncated to the node
/// hash length. Every sibling must be exactly `node_hash_len` bytes and the
/// root exactly `root_hash_len` bytes.
pub async fn compute_path<A>(
    accessor: &A,
    commitment: &str,
    z_count: u64,
    params: &TreeParams,
) -> Result<MerklePathResult>
where
    A: TreeAccessor + ?Sized,
{
    params.validate()?;
    let commitment = checked_hash("commitment", commitment, params.root_hash_len)?;
    let expected = truncate_hex(&commitment, params.node_hash_len)?;

    let capacity = params.leaf_count()?;
    if z_count >= capacity {
        return Err(Error::validation(format!(
            "z-count {z_count} exceeds the {capacity} leaves of the tree"
        )));
    }
    let leaf_index = get_leaf_index_from_z_count(z_count, params.depth)?;
    debug!("z-count {z_count} maps to leaf index {leaf_index}");

    let found = normalize_hex(&accessor.node(leaf_index).await?)?;
    if found != expected {
        return Err(Error::LeafMismatch {
            index: leaf_index,
            expected,
            found,
        });
    }
    debug!("found commitment {expected} at leaf index {leaf_index}");

    let plan = sibling_plan(leaf_index, params.depth)?;
    let siblings = try_join_all(plan.iter().map(|&(tree_index, side)| async move {
        let node = accessor.node(tree_index).await?;
        let node_hash = checked_hash("sister path node", &node, params.node_hash_len)?;
        Ok::<_, Error>(SisterPathEntry {
            tree_index,
            side: Some(side),
            node_hash,
        })
    }));
    let root = async {
        let root = accessor.root().await?;
        checked_hash("root", &root, params.root_hash_len)
    };
    let (mut siblings, root) = futures::try_join!(siblings, root)?;
    debug!("fetched {} sister path nodes", siblings.len());

    let sides: Vec<Side> = plan.iter().map(|&(_, side)| side).collect();
    let positions = encode_positions(&sides, params.packing_size)?;
    debug!("sister positions encode to {positions}");

    siblings.push(SisterPathEntry {
        tree_index: 0,
        side: None,
        node_hash: root,
    });
    Ok(MerklePathResult {
        siblings,
        positions,
    })
}
