//! Error taxonomy
//!
//! Every failure is fatal to the call that raised it. Nothing in the core
//! retries or substitutes a value; the caller decides whether to re-fetch
//! tree state and start over.

use thiserror::Error;

/// Result alias used throughout the core crates
pub type Result<T, E = Error> = core::result::Result<T, E>;

/// Failure category, independent of the variant payload
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Malformed input (bad hex, unknown encoding tag, empty value, bad params)
    Validation,
    /// A hash has the wrong length, or the leaf index holds another value
    LengthMismatch,
    /// An operation would silently drop significant data
    Overflow,
    /// Two computations that must agree do not
    Consistency,
    /// The external tree accessor failed
    Accessor,
    /// The operating system could not supply random bytes
    Entropy,
}

/// Errors produced by witness encoding, path resolution and root checks
#[derive(Debug, Error)]
pub enum Error {
    /// Malformed input
    #[error("invalid input: {0}")]
    Validation(String),

    /// A hash does not have its canonical byte length
    #[error("{what} has incorrect length: expected {expected} bytes, got {found} ({value})")]
    LengthMismatch {
        /// Which value was checked
        what: &'static str,
        /// Canonical length in bytes
        expected: usize,
        /// Observed length in bytes, rounded down for odd hex
        found: usize,
        /// The offending value
        value: String,
    },

    /// The node stored at the leaf index is not the expected commitment
    #[error(
        "failed to find the commitment {expected} in the tree at index {index}, found {found} instead"
    )]
    LeafMismatch {
        /// Tree index that was inspected
        index: u64,
        /// Truncated commitment the caller supplied
        expected: String,
        /// Value the tree holds at `index`
        found: String,
    },

    /// A value does not fit the space reserved for it
    #[error("{what}: {produced} exceeds the limit of {limit}")]
    Overflow {
        /// What overflowed
        what: &'static str,
        /// Size that was produced
        produced: usize,
        /// Size that was allowed
        limit: usize,
    },

    /// The recomputed root differs from the target root
    #[error(
        "root {supplied} cannot be recalculated from the path and commitment {commitment}, recalculation gives {computed}"
    )]
    RootMismatch {
        /// Root the caller expects
        supplied: String,
        /// Root recomputed from the commitment and path
        computed: String,
        /// Commitment the recomputation started from
        commitment: String,
    },

    /// Chunked folding disagrees with the single-round digest
    #[error("chunked hash {chunked} disagrees with single-round hash {direct}")]
    HashMismatch {
        /// Output of the chunked fold
        chunked: String,
        /// Output of the direct digest
        direct: String,
    },

    /// The operating system RNG failed
    #[error("entropy source failed: {0}")]
    Entropy(String),

    /// Transport-level failure from the tree accessor, passed through as is
    #[error(transparent)]
    Accessor(#[from] anyhow::Error),
}

impl Error {
    /// Build a [`Error::Validation`] from any message
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Category of this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Validation(_) => ErrorKind::Validation,
            Self::LengthMismatch { .. } | Self::LeafMismatch { .. } => ErrorKind::LengthMismatch,
            Self::Overflow { .. } => ErrorKind::Overflow,
            Self::RootMismatch { .. } | Self::HashMismatch { .. } => ErrorKind::Consistency,
            Self::Accessor(_) => ErrorKind::Accessor,
            Self::Entropy(_) => ErrorKind::Entropy,
        }
    }
}
