//! Sister-path types
//!
//! Siblings are ordered from the leaf's sibling up to the root. The root
//! entry comes last and carries no side.

use serde::{Deserialize, Serialize};

/// Which side of its parent a sibling node sits on
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    /// Sibling is the left child; encoded as bit `0`
    Left,
    /// Sibling is the right child; encoded as bit `1`
    Right,
}

impl Side {
    /// Bit character used in the positions word
    pub fn bit(self) -> char {
        match self {
            Self::Left => '0',
            Self::Right => '1',
        }
    }

    /// Inverse of [`Side::bit`]
    pub fn from_bit(bit: char) -> Option<Self> {
        match bit {
            '0' => Some(Self::Left),
            '1' => Some(Self::Right),
            _ => None,
        }
    }
}

/// One node of the sister path
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SisterPathEntry {
    /// Array index of the node in the tree (root is `0`)
    pub tree_index: u64,
    /// Side of the sibling; `None` only for the root entry
    pub side: Option<Side>,
    /// Prefixed, lowercase node hash
    pub node_hash: String,
}

impl SisterPathEntry {
    /// True for the root entry
    pub fn is_root(&self) -> bool {
        self.side.is_none()
    }
}

/// Sister path plus the packed side bits
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MerklePathResult {
    /// Leaf's sibling first, root last
    pub siblings: Vec<SisterPathEntry>,
    /// Side bits in sibling order, right-padded with zeros to the packing
    /// size, hex-encoded with a `0x` prefix
    pub positions: String,
}

impl MerklePathResult {
    /// Node hashes in sibling order, root last
    pub fn path(&self) -> Vec<String> {
        self.siblings.iter().map(|s| s.node_hash.clone()).collect()
    }

    /// The root entry, if the path carries one
    pub fn root(&self) -> Option<&SisterPathEntry> {
        self.siblings.last().filter(|s| s.is_root())
    }

    /// Non-root entries, leaf level first
    pub fn levels(&self) -> impl Iterator<Item = &SisterPathEntry> {
        self.siblings.iter().filter(|s| !s.is_root())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(tree_index: u64, side: Option<Side>, node_hash: &str) -> SisterPathEntry {
        SisterPathEntry {
            tree_index,
            side,
            node_hash: node_hash.into(),
        }
    }

    #[test]
    fn side_bits_round_trip() {
        assert_eq!(Side::from_bit(Side::Left.bit()), Some(Side::Left));
        assert_eq!(Side::from_bit(Side::Right.bit()), Some(Side::Right));
        assert_eq!(Side::from_bit('2'), None);
    }

    #[test]
    fn root_is_the_last_sideless_entry() {
        let result = MerklePathResult {
            siblings: vec![
                entry(4, Some(Side::Right), "0x01"),
                entry(2, Some(Side::Left), "0x02"),
                entry(0, None, "0x03"),
            ],
            positions: "0x4".into(),
        };
        assert_eq!(result.root().map(|r| r.node_hash.as_str()), Some("0x03"));
        assert_eq!(result.levels().count(), 2);
        assert_eq!(result.path(), vec!["0x01", "0x02", "0x03"]);
    }
}
