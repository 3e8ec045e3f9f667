//! Base conversion for arbitrary-size integers
//!
//! Values routinely exceed 128 bits, so every conversion goes through
//! [`BigUint`]. Hex outputs carry the `0x` prefix; binary and decimal
//! outputs are bare digit strings.

use num_bigint::BigUint;
use num_traits::{CheckedAdd, CheckedMul, Num, One, Zero};
use types::{
    Error, Result,
    hex::{ensure_0x, require_hex},
};

/// Parse `input` into digits of `base`, least significant first
///
/// Fails on any character outside the base's alphabet.
pub fn parse_digits(input: &str, base: u32) -> Result<Vec<u32>> {
    if !(2..=36).contains(&base) {
        return Err(Error::validation(format!("unsupported base {base}")));
    }
    input
        .chars()
        .rev()
        .map(|c| {
            c.to_digit(base).ok_or_else(|| {
                Error::validation(format!("'{c}' is not a base-{base} digit in {input}"))
            })
        })
        .collect()
}

/// Convert a digit string from `from_base` to `to_base`
///
/// Accumulates `digit * from_base^i` over the digits. An input that denotes
/// zero yields `"0"`.
pub fn convert_base(input: &str, from_base: u32, to_base: u32) -> Result<String> {
    if !(2..=36).contains(&to_base) {
        return Err(Error::validation(format!("unsupported base {to_base}")));
    }
    let digits = parse_digits(input, from_base)?;
    if digits.is_empty() {
        return Err(Error::validation("cannot convert an empty digit string"));
    }

    let overflow = || Error::validation(format!("base conversion of {input} overflowed"));
    let base = BigUint::from(from_base);
    let mut out = BigUint::zero();
    let mut power = BigUint::one();
    for digit in digits {
        if digit != 0 {
            let term = power.checked_mul(&BigUint::from(digit)).ok_or_else(overflow)?;
            out = out.checked_add(&term).ok_or_else(overflow)?;
        }
        power = power.checked_mul(&base).ok_or_else(overflow)?;
    }
    Ok(out.to_str_radix(to_base))
}

/// Hex to decimal
pub fn hex_to_dec(hex: &str) -> Result<String> {
    convert_base(&require_hex(hex)?.to_ascii_lowercase(), 16, 10)
}

/// Decimal to prefixed hex
pub fn dec_to_hex(dec: &str) -> Result<String> {
    Ok(ensure_0x(&convert_base(dec, 10, 16)?))
}

/// Decimal to binary
pub fn dec_to_bin(dec: &str) -> Result<String> {
    convert_base(dec, 10, 2)
}

/// Binary to decimal
pub fn bin_to_dec(bin: &str) -> Result<String> {
    convert_base(bin, 2, 10)
}

/// Binary to prefixed hex, leading zeros trimmed
pub fn bin_to_hex(bin: &str) -> Result<String> {
    Ok(ensure_0x(&convert_base(bin, 2, 16)?))
}

/// Hex to binary, leading zeros trimmed
pub fn hex_to_bin(hex: &str) -> Result<String> {
    convert_base(require_hex(hex)?, 16, 2)
}

/// Hex to binary at exactly four bits per hex digit
///
/// Unlike [`hex_to_bin`], leading zeros are kept: `0x0f` gives `00001111`.
pub fn hex_to_bits(hex: &str) -> Result<String> {
    let body = require_hex(hex)?;
    let mut bits = String::with_capacity(body.len().saturating_mul(4));
    for c in body.chars() {
        let nibble = c
            .to_digit(16)
            .ok_or_else(|| Error::validation(format!("'{c}' is not a hex digit")))?;
        bits.push_str(&format!("{nibble:04b}"));
    }
    Ok(bits)
}

/// Split hex into bytes, left to right, each as a decimal string
///
/// `0xff00` gives `["255", "0"]`.
pub fn hex_to_bytes(hex: &str) -> Result<Vec<String>> {
    Ok(decode_hex(hex)?.iter().map(u8::to_string).collect())
}

/// Decode hex into raw bytes
pub fn decode_hex(hex: &str) -> Result<Vec<u8>> {
    let body = require_hex(hex)?;
    hex::decode(body).map_err(|e| Error::validation(format!("cannot decode {hex} as bytes: {e}")))
}

/// Parse hex into a big integer
pub fn hex_to_biguint(hex: &str) -> Result<BigUint> {
    let body = require_hex(hex)?;
    BigUint::from_str_radix(body, 16)
        .map_err(|e| Error::validation(format!("cannot parse {hex}: {e}")))
}

/// Parse a decimal string into a big integer
pub fn dec_to_biguint(dec: &str) -> Result<BigUint> {
    if dec.is_empty() {
        return Err(Error::validation("decimal input was empty"));
    }
    BigUint::from_str_radix(dec, 10)
        .map_err(|e| Error::validation(format!("cannot parse {dec} as decimal: {e}")))
}

/// Encode a UTF-8 string as prefixed hex of exactly `out_len` bytes
///
/// Shorter strings are left-padded with zero bytes; longer ones fail.
pub fn utf8_to_hex(input: &str, out_len: usize) -> Result<String> {
    let digits = out_len
        .checked_mul(2)
        .ok_or_else(|| Error::validation("output length overflow"))?;
    let encoded = hex::encode(input.as_bytes());
    if encoded.len() > digits {
        return Err(Error::Overflow {
            what: "utf8 string bytes",
            produced: input.len(),
            limit: out_len,
        });
    }
    Ok(ensure_0x(&format!("{encoded:0>digits$}")))
}

/// Decode hex produced by [`utf8_to_hex`], dropping the leading zero
/// padding bytes
pub fn hex_to_utf8(hex: &str) -> Result<String> {
    let bytes: Vec<u8> = decode_hex(hex)?
        .into_iter()
        .skip_while(|b| *b == 0)
        .collect();
    String::from_utf8(bytes).map_err(|e| Error::validation(format!("{hex} is not UTF-8: {e}")))
}

/// Keep the rightmost `len` bytes of a hex value, prefixed and lowercase
///
/// This is how full digests and commitments are cut down to node width.
pub fn truncate_hex(hex: &str, len: usize) -> Result<String> {
    let body = require_hex(hex)?;
    let digits = len
        .checked_mul(2)
        .ok_or_else(|| Error::validation("truncation length overflow"))?;
    if body.len() < digits {
        return Err(Error::LengthMismatch {
            what: "value to truncate",
            expected: len,
            found: body.len() / 2,
            value: String::from(hex),
        });
    }
    let start = body.len().saturating_sub(digits);
    Ok(ensure_0x(&body[start..].to_ascii_lowercase()))
}

/// Left-pad hex with zeros to `digits` hex digits
///
/// Values already at least `digits` long are returned unchanged.
pub fn left_pad_hex(hex: &str, digits: usize) -> Result<String> {
    let body = require_hex(hex)?;
    Ok(ensure_0x(&format!("{body:0>digits$}")))
}

/// Left-pad hex with zeros to a total width of `bits`
pub fn pad_hex(hex: &str, bits: usize) -> Result<String> {
    if !bits.is_multiple_of(8) {
        return Err(Error::validation(
            "cannot convert bits into a whole number of bytes",
        ));
    }
    left_pad_hex(hex, bits / 4)
}

/// Prefixed hex of `len` bytes from the operating system RNG
///
/// Used to mint salts and secret keys.
pub fn random_hex(len: usize) -> Result<String> {
    let mut buf = vec![0u8; len];
    getrandom::getrandom(&mut buf)
        .map_err(|e| Error::Entropy(format!("failed to draw {len} random bytes: {e}")))?;
    Ok(ensure_0x(&hex::encode(buf)))
}
