//! Shared types for commitment-tree witness preparation
//!
//! This crate holds the values that cross component boundaries:
//! - [`Element`] and [`Encoding`], the tagged inputs of the vector encoder
//! - [`SisterPathEntry`] and [`MerklePathResult`], produced by path resolution
//! - [`FieldVector`], the ordered witness vector handed to the prover
//! - [`TreeParams`], the explicit length/depth configuration
//! - [`Error`], the failure taxonomy shared by every component
//!
//! Nothing here performs arithmetic on values; conversions live in the
//! `witness` crate and tree access in the `merkle` crate.

pub mod element;
pub mod error;
pub mod hex;
pub mod params;
pub mod path;
pub mod vector;

pub use element::{Element, Encoding};
pub use error::{Error, ErrorKind, Result};
pub use params::TreeParams;
pub use path::{MerklePathResult, Side, SisterPathEntry};
pub use vector::FieldVector;
