//! Comparable version values
//!
//! - [`value`]: `Version`, orderable and constructible from any string
//! - [`semver`]: semver normalization helpers

pub mod semver;
pub mod value;

pub use value::Version;
