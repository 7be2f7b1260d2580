//! Error types for ATF container decoding.

use thiserror::Error;

/// Errors that can occur when decoding an ATF container.
///
/// Every error is terminal: the decoder never returns partial data and never
/// substitutes defaults for malformed fields. The caller decides whether to
/// skip the asset, log, or abort.
#[derive(Debug, Error)]
pub enum Error {
    /// The first three bytes are not the `"ATF"` signature.
    #[error("invalid ATF signature: expected \"ATF\", got {actual:?}")]
    BadSignature { actual: Vec<u8> },

    /// The declared length disagrees with the buffer length.
    #[error("length mismatch: header declares {expected} total bytes, buffer has {actual}")]
    LengthMismatch { expected: usize, actual: usize },

    /// Structurally valid, but a layout this decoder does not implement.
    #[error("unsupported ATF variant: {0}")]
    UnsupportedVariant(UnsupportedVariant),

    /// A length-prefixed record would read past the end of the buffer.
    #[error("truncated ATF data: {0}")]
    Truncated(#[from] atf_common::Error),
}

/// A recognized container layout that this decoder rejects.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum UnsupportedVariant {
    /// Bit 7 of the flags byte: six-face cube-map layout.
    #[error("cube map layout")]
    CubeMap,

    /// A format code other than the raw-compressed ones (3 and 5).
    #[error("format code {0:#04x}")]
    Format(u8),
}

/// Result type for ATF container operations.
pub type Result<T> = std::result::Result<T, Error>;
