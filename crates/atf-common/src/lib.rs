//! Common utilities for ATF parsing.
//!
//! This crate provides the foundational pieces shared by the ATF crates:
//!
//! - [`BinaryReader`] - Zero-copy big-endian binary reading from byte slices
//! - [`Error`]/[`Result`] - Bounds-checked read failures

mod error;
mod reader;

pub use error::{Error, Result};
pub use reader::BinaryReader;

/// Re-export zerocopy traits for convenience
pub use zerocopy::{FromBytes, Immutable, IntoBytes, KnownLayout};
