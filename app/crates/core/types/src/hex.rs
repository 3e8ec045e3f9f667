//! Hex boundary helpers
//!
//! Values cross into and out of the core with a `0x` prefix. Internal
//! algorithms work on the bare digits.

use crate::error::{Error, Result};

/// Prefix marking a hex value at the boundary
pub const HEX_PREFIX: &str = "0x";

/// Remove a leading `0x`, if present
pub fn strip_0x(input: &str) -> &str {
    input.strip_prefix(HEX_PREFIX).unwrap_or(input)
}

/// Add a leading `0x`, unless already present
pub fn ensure_0x(input: &str) -> String {
    if input.starts_with(HEX_PREFIX) {
        String::from(input)
    } else {
        format!("{HEX_PREFIX}{input}")
    }
}

/// True when `input` is a non-empty run of hex digits, prefix ignored
pub fn is_hex(input: &str) -> bool {
    let body = strip_0x(input);
    !body.is_empty() && body.bytes().all(|b| b.is_ascii_hexdigit())
}

/// Validate `input` and return its bare digits
pub fn require_hex(input: &str) -> Result<&str> {
    let body = strip_0x(input);
    if body.is_empty() {
        return Err(Error::validation("hex input was empty"));
    }
    if let Some(bad) = body.chars().find(|c| !c.is_ascii_hexdigit()) {
        return Err(Error::validation(format!(
            "'{bad}' is not a hex digit in {input}"
        )));
    }
    Ok(body)
}

/// Validate `input` and return it lowercase with a single prefix
pub fn normalize_hex(input: &str) -> Result<String> {
    let body = require_hex(input)?;
    Ok(ensure_0x(&body.to_ascii_lowercase()))
}
