//! SHA-256 hashing of concatenated hex values
//!
//! The circuit can only afford a single SHA-256 round per digest, so inputs
//! longer than one round are folded: the byte string is cut into blocks of
//! `2 * hash_len` bytes from the right, each block is digested and truncated
//! to `hash_len` bytes, and the truncated digests are concatenated in block
//! order. Folding repeats until at most `hash_len` bytes remain.
//!
//! For inputs that fit one round the folded result is identical to the
//! direct digest, and [`HashFolder::checked_hash_concat`] enforces that.

use log::warn;
use sha2::{Digest, Sha256};
use types::{
    Error, Result, TreeParams,
    hex::ensure_0x,
    params::DIGEST_LEN,
};

use crate::codec::decode_hex;

/// Concatenate the byte forms of hex values
pub fn concat_hex(items: &[&str]) -> Result<Vec<u8>> {
    let mut bytes = Vec::new();
    for item in items {
        bytes.extend(decode_hex(item)?);
    }
    Ok(bytes)
}

/// Digest the concatenation of `items` once, without truncation
///
/// This is the pairwise node hash used when recomputing a root.
pub fn concatenate_then_hash(items: &[&str]) -> Result<String> {
    let bytes = concat_hex(items)?;
    Ok(ensure_0x(&hex::encode(Sha256::digest(&bytes))))
}

/// Single-round and folded digests truncated to a fixed length
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct HashFolder {
    hash_len: usize,
}

impl HashFolder {
    /// Create a folder producing `hash_len`-byte digests
    pub fn new(hash_len: usize) -> Result<Self> {
        if hash_len == 0 || hash_len > DIGEST_LEN {
            return Err(Error::validation(format!(
                "hash length must be within [1..{DIGEST_LEN}], got {hash_len}"
            )));
        }
        Ok(Self { hash_len })
    }

    /// Create a folder for the node hash length of `params`
    pub fn from_params(params: &TreeParams) -> Result<Self> {
        Self::new(params.node_hash_len)
    }

    /// Output length in bytes
    pub fn hash_len(&self) -> usize {
        self.hash_len
    }

    /// Input bytes consumed by one round
    pub fn round_capacity(&self) -> usize {
        self.hash_len.saturating_mul(2)
    }

    /// SHA-256 of `bytes`, keeping the rightmost `hash_len` bytes
    fn digest_truncated(&self, bytes: &[u8]) -> Vec<u8> {
        let digest = Sha256::digest(bytes);
        digest[DIGEST_LEN.saturating_sub(self.hash_len)..].to_vec()
    }

    /// Truncated single-round digest of one value
    pub fn hash(&self, item: &str) -> Result<String> {
        self.hash_concat(&[item])
    }

    /// Concatenate, digest once, truncate
    pub fn hash_concat(&self, items: &[&str]) -> Result<String> {
        let bytes = concat_hex(items)?;
        Ok(ensure_0x(&hex::encode(self.digest_truncated(&bytes))))
    }

    /// One folding pass over `bytes`
    ///
    /// Blocks are cut from the right, so only the leftmost block can be
    /// short. Digests keep the left-to-right order of their blocks.
    pub fn fold_round(&self, bytes: &[u8]) -> Vec<u8> {
        let blocks = bytes.rchunks(self.round_capacity());
        let mut out = Vec::with_capacity(blocks.len().saturating_mul(self.hash_len));
        for block in blocks.rev() {
            out.extend(self.digest_truncated(block));
        }
        out
    }

    /// Fold the concatenation of `items` down to a single `hash_len` digest
    pub fn recursive_hash_concat(&self, items: &[&str]) -> Result<String> {
        let bytes = concat_hex(items)?;
        if bytes.is_empty() {
            return Err(Error::validation("nothing to hash"));
        }
        let mut folded = self.fold_round(&bytes);
        while folded.len() > self.hash_len {
            folded = self.fold_round(&folded);
        }
        Ok(ensure_0x(&hex::encode(folded)))
    }

    /// [`Self::recursive_hash_concat`], cross-checked against
    /// [`Self::hash_concat`] when the input fits one round
    pub fn checked_hash_concat(&self, items: &[&str]) -> Result<String> {
        let chunked = self.recursive_hash_concat(items)?;
        if concat_hex(items)?.len() <= self.round_capacity() {
            return reconcile(chunked, self.hash_concat(items)?);
        }
        Ok(chunked)
    }
}

/// Accept `chunked` only if it equals `direct`
fn reconcile(chunked: String, direct: String) -> Result<String> {
    if direct != chunked {
        warn!("chunked hash {chunked} disagrees with direct hash {direct}");
        return Err(Error::HashMismatch { chunked, direct });
    }
    Ok(chunked)
}

#[cfg(test)]
mod tests {
    use super::*;
    use types::ErrorKind;

    const ABC_SHA256: &str = "0xba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad";

    fn folder() -> HashFolder {
        HashFolder::new(27).expect("27 bytes")
    }

    #[test]
    fn concatenate_then_hash_is_plain_sha256() {
        assert_eq!(concatenate_then_hash(&["0x616263"]).expect("hash"), ABC_SHA256);
        assert_eq!(concatenate_then_hash(&["0x61", "6263"]).expect("hash"), ABC_SHA256);
    }

    #[test]
    fn hash_concat_keeps_the_rightmost_bytes() {
        let hash = folder().hash_concat(&["0x6162", "0x63"]).expect("hash");
        assert_eq!(hash, "0x01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad");
        assert_eq!(folder().hash("0x616263").expect("hash"), hash);
    }

    #[test]
    fn folding_matches_direct_hash_within_one_round() {
        let folder = folder();
        let a = format!("0x{}", "ab".repeat(27));
        let b = format!("0x{}", "cd".repeat(27));
        for items in [vec![a.as_str()], vec![a.as_str(), b.as_str()], vec!["0x01", "0x02"]] {
            assert_eq!(
                folder.recursive_hash_concat(&items).expect("fold"),
                folder.hash_concat(&items).expect("direct")
            );
            folder.checked_hash_concat(&items).expect("consistent");
        }
    }

    #[test]
    fn long_inputs_fold_block_by_block() {
        let folder = HashFolder::new(4).expect("4 bytes");
        // 20 bytes: a 4-byte head block and two full 8-byte blocks.
        let input: Vec<u8> = (0u8..20).collect();
        let hex_input = hex::encode(&input);

        let truncated = |bytes: &[u8]| Sha256::digest(bytes)[28..].to_vec();
        let mut first_pass = truncated(&input[..4]);
        first_pass.extend(truncated(&input[4..12]));
        first_pass.extend(truncated(&input[12..]));
        let mut second_pass = truncated(&first_pass[..4]);
        second_pass.extend(truncated(&first_pass[4..]));
        let expected = truncated(&second_pass);

        assert_eq!(folder.fold_round(&input), first_pass);
        assert_eq!(
            folder.recursive_hash_concat(&[&hex_input]).expect("fold"),
            format!("0x{}", hex::encode(expected))
        );
        assert_eq!(
            folder.checked_hash_concat(&[&hex_input]).expect("no cross-check"),
            folder.recursive_hash_concat(&[&hex_input]).expect("fold")
        );
    }

    #[test]
    fn folded_output_has_canonical_length() {
        let long = format!("0x{}", "5a".repeat(500));
        let hash = folder().recursive_hash_concat(&[&long]).expect("fold");
        assert_eq!(hash.len(), 2 + 54);
    }

    #[test]
    fn disagreeing_digests_are_a_consistency_error() {
        let chunked = folder().recursive_hash_concat(&["0x616263"]).expect("fold");
        let direct = folder().hash("0x616264").expect("hash");

        let err = reconcile(chunked.clone(), direct.clone()).expect_err("digests differ");
        assert_eq!(err.kind(), ErrorKind::Consistency);
        let msg = err.to_string();
        assert!(msg.contains(&chunked));
        assert!(msg.contains(&direct));

        assert_eq!(reconcile(chunked.clone(), chunked.clone()).expect("equal"), chunked);
    }

    #[test]
    fn rejects_bad_lengths_and_inputs() {
        assert!(HashFolder::new(0).is_err());
        assert!(HashFolder::new(33).is_err());
        let err = folder().hash_concat(&["0xabc"]).expect_err("odd hex");
        assert_eq!(err.kind(), ErrorKind::Validation);
        assert!(folder().recursive_hash_concat(&[]).is_err());
    }
}
