//! Fixed-width bit chunking and field packing
//!
//! A value wider than the proving field is split into `N`-bit limbs,
//! big-endian: the rightmost `N` bits form the last limb and the leftmost
//! remainder is zero-padded to `N` bits. The result has
//! `ceil(total_bits / N)` limbs, all exactly `N` bits wide.

use log::warn;
use num_bigint::BigUint;
use num_traits::{CheckedAdd, CheckedEuclid, CheckedMul, Zero, checked_pow};
use types::{Error, Result};

use crate::codec::{bin_to_dec, dec_to_bin, dec_to_biguint, hex_to_bin, hex_to_biguint};

/// BN254 scalar field order, the default proving field
pub const BN254_SCALAR_MODULUS: &str =
    "21888242871839275222246405745257275088548364400416034343698204186575808495617";

/// What to do when packing yields more limbs than requested
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum PackingPolicy {
    /// Fail with [`Error::Overflow`]
    #[default]
    Strict,
    /// Drop the most significant limbs. Loses data.
    Truncate,
}

/// Left-pad a bit string with zeros to exactly `n` bits
pub fn left_pad_bits(bits: &str, n: usize) -> Result<String> {
    if bits.len() > n {
        return Err(Error::Overflow {
            what: "bit string length",
            produced: bits.len(),
            limit: n,
        });
    }
    Ok(format!("{bits:0>n$}"))
}

/// Split a big-endian bit string into `n`-bit chunks, most significant first
pub fn split_and_pad_bits_n(bits: &str, n: usize) -> Result<Vec<String>> {
    if n == 0 {
        return Err(Error::validation("chunk size must be positive"));
    }
    if let Some(bad) = bits.chars().find(|c| *c != '0' && *c != '1') {
        return Err(Error::validation(format!("'{bad}' is not a bit")));
    }

    // Peel complete chunks off the right, then pad what is left.
    let mut chunks = Vec::with_capacity(bits.len().div_ceil(n).max(1));
    let mut rest = bits;
    while rest.len() > n {
        let (head, tail) = rest.split_at(rest.len().saturating_sub(n));
        chunks.push(tail.to_string());
        rest = head;
    }
    chunks.push(left_pad_bits(rest, n)?);
    chunks.reverse();
    Ok(chunks)
}

/// [`split_and_pad_bits_n`] over the trimmed binary form of a hex value
pub fn split_hex_to_bits_n(hex: &str, n: usize) -> Result<Vec<String>> {
    split_and_pad_bits_n(&hex_to_bin(hex)?, n)
}

/// [`split_and_pad_bits_n`] over the binary form of a decimal value
pub fn split_dec_to_bits_n(dec: &str, n: usize) -> Result<Vec<String>> {
    split_and_pad_bits_n(&dec_to_bin(dec)?, n)
}

/// Pack a hex value into decimal field limbs of `packing_size` bits
///
/// The magnitude is preserved even when it exceeds the field order. When
/// `packets` is given the limb count is fitted to it: missing limbs are
/// zero-filled on the left; excess limbs are an [`Error::Overflow`] under
/// [`PackingPolicy::Strict`] and are dropped from the left under
/// [`PackingPolicy::Truncate`].
pub fn hex_to_field_preserve(
    hex: &str,
    packing_size: usize,
    packets: Option<usize>,
    policy: PackingPolicy,
) -> Result<Vec<String>> {
    let mut limbs = split_hex_to_bits_n(hex, packing_size)?
        .iter()
        .map(|chunk| bin_to_dec(chunk))
        .collect::<Result<Vec<_>>>()?;

    let Some(packets) = packets else {
        return Ok(limbs);
    };

    if limbs.len() > packets {
        let excess = limbs.len().saturating_sub(packets);
        match policy {
            PackingPolicy::Strict => {
                return Err(Error::Overflow {
                    what: "field limbs",
                    produced: limbs.len(),
                    limit: packets,
                });
            }
            PackingPolicy::Truncate => {
                warn!("dropping {excess} most significant limbs of {hex}");
                limbs.drain(..excess);
            }
        }
    } else {
        let missing = packets.saturating_sub(limbs.len());
        let mut padded = vec![String::from("0"); missing];
        padded.append(&mut limbs);
        limbs = padded;
    }
    Ok(limbs)
}

/// Rebuild the decimal value represented by packed limbs
///
/// Limb `i` of `len` is weighted by `2^(packing_size * (len - 1 - i))`.
pub fn fields_to_dec(limbs: &[String], packing_size: usize) -> Result<String> {
    if packing_size == 0 {
        return Err(Error::validation("packing size must be positive"));
    }
    let overflow = || Error::validation("limb recombination overflowed");
    let weight = checked_pow(BigUint::from(2u32), packing_size).ok_or_else(overflow)?;
    let mut acc = BigUint::zero();
    for limb in limbs {
        let limb = dec_to_biguint(limb)?;
        acc = acc
            .checked_mul(&weight)
            .and_then(|shifted| shifted.checked_add(&limb))
            .ok_or_else(overflow)?;
    }
    Ok(acc.to_str_radix(10))
}

/// Reduce a hex value modulo a decimal field order
pub fn hex_to_field(hex: &str, modulus: &str) -> Result<String> {
    let modulus = dec_to_biguint(modulus)?;
    let reduced = hex_to_biguint(hex)?
        .checked_rem_euclid(&modulus)
        .ok_or_else(|| Error::validation("field modulus must be positive"))?;
    Ok(reduced.to_str_radix(10))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::hex_to_dec;
    use types::ErrorKind;

    #[test]
    fn leftmost_chunk_is_zero_padded() {
        let chunks = split_and_pad_bits_n("11111", 4).expect("split");
        assert_eq!(chunks, ["0001", "1111"]);
        assert_eq!(split_and_pad_bits_n("", 3).expect("empty"), ["000"]);
    }

    #[test]
    fn chunks_concatenate_back_to_the_padded_input() {
        let hexes = [
            "0x1",
            "0xff",
            "0x8000000000000000000000000000000000000001",
            "0x0123456789abcdef0123456789abcdef0123456789abcdef0123456789abcdef",
        ];
        for hex in hexes {
            let bits = hex_to_bin(hex).expect("bin");
            for n in [1, 3, 8, 64, 128, 254] {
                let chunks = split_and_pad_bits_n(&bits, n).expect("split");
                let joined = chunks.concat();
                assert!(chunks.iter().all(|c| c.len() == n));
                assert_eq!(chunks.len(), bits.len().div_ceil(n).max(1));
                assert_eq!(joined.trim_start_matches('0'), bits.trim_start_matches('0'));
                assert!(joined.len().is_multiple_of(n));
            }
        }
    }

    #[test]
    fn rejects_bad_chunk_inputs() {
        assert!(split_and_pad_bits_n("0101", 0).is_err());
        assert!(split_and_pad_bits_n("0121", 2).is_err());
        assert_eq!(
            left_pad_bits("10101", 4).expect_err("too long").kind(),
            ErrorKind::Overflow
        );
    }

    #[test]
    fn packs_a_256_bit_value_into_two_limbs() {
        let hex = "0xf0e1d2c3b4a5968778695a4b3c2d1e0f00112233445566778899aabbccddeeff";
        let limbs = hex_to_field_preserve(hex, 128, Some(2), PackingPolicy::Strict)
            .expect("two limbs fit");
        assert_eq!(limbs.len(), 2);

        let hi = dec_to_biguint(&limbs[0]).expect("hi");
        let lo = dec_to_biguint(&limbs[1]).expect("lo");
        let limb_weight = checked_pow(BigUint::from(2u32), 128).expect("2^128");
        let whole = hi
            .checked_mul(&limb_weight)
            .and_then(|shifted| shifted.checked_add(&lo))
            .expect("recombine");
        assert_eq!(whole.to_str_radix(10), hex_to_dec(hex).expect("dec"));
        assert_eq!(fields_to_dec(&limbs, 128).expect("rebuild"), hex_to_dec(hex).expect("dec"));
    }

    #[test]
    fn small_values_are_zero_filled_on_the_left() {
        let limbs = hex_to_field_preserve("0x05", 128, Some(3), PackingPolicy::Strict)
            .expect("fits");
        assert_eq!(limbs, ["0", "0", "5"]);
    }

    #[test]
    fn without_packets_the_natural_limb_count_is_kept() {
        let limbs =
            hex_to_field_preserve("0x1ff", 8, None, PackingPolicy::Strict).expect("pack");
        assert_eq!(limbs, ["1", "255"]);
    }

    #[test]
    fn excess_limbs_fail_unless_truncation_is_requested() {
        let err = hex_to_field_preserve("0x1ff", 8, Some(1), PackingPolicy::Strict)
            .expect_err("lossy");
        assert_eq!(err.kind(), ErrorKind::Overflow);

        let limbs = hex_to_field_preserve("0x1ff", 8, Some(1), PackingPolicy::Truncate)
            .expect("opted in");
        assert_eq!(limbs, ["255"]);
    }

    #[test]
    fn limbs_recombine_across_many_words() {
        // three 128-bit limbs: 1 * 2^256 + 2 * 2^128 + 3
        let limbs = ["1", "2", "3"].map(String::from);
        let expected = format!("0x01{:032x}{:032x}", 2, 3);
        assert_eq!(
            fields_to_dec(&limbs, 128).expect("rebuild"),
            hex_to_dec(&expected).expect("dec")
        );
        assert_eq!(fields_to_dec(&[], 128).expect("empty"), "0");

        let bad = ["12a".to_string()];
        let err = fields_to_dec(&bad, 8).expect_err("not decimal");
        assert_eq!(err.kind(), ErrorKind::Validation);
        assert!(fields_to_dec(&limbs, 0).is_err());
    }

    #[test]
    fn reduces_modulo_the_field() {
        let p_plus_one = "0x30644e72e131a029b85045b68181585d2833e84879b9709143e1f593f0000002";
        assert_eq!(hex_to_field(p_plus_one, BN254_SCALAR_MODULUS).expect("mod"), "1");
        assert_eq!(hex_to_field("0x0a", BN254_SCALAR_MODULUS).expect("mod"), "10");
        assert!(hex_to_field("0x0a", "0").is_err());
    }

    #[test]
    fn decimal_values_split_like_hex_values() {
        assert_eq!(
            split_dec_to_bits_n("255", 4).expect("dec"),
            split_hex_to_bits_n("0xff", 4).expect("hex")
        );
    }
}
