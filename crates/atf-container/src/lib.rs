//! Decoder for the ATF compressed-texture container format.
//!
//! An ATF file packages GPU-compressed encodings of one image for several
//! codec families (S3TC/DXT, PVRTC 4bpp, ETC1) together with their mip
//! chains, so a loader can upload whichever encoding the local graphics
//! device supports. This crate validates the container structure and
//! extracts the still-compressed per-codec, per-mip payloads; it does not
//! decompress texture blocks to pixels.
//!
//! # File format
//!
//! All multi-byte integers are big-endian. The 16-byte header:
//!
//! - 3 bytes: `"ATF"` signature
//! - 4 bytes: reserved (encoder tool switches, see [`AtfHeader`])
//! - 1 byte: format version
//! - 4 bytes: declared length (total file size minus 12)
//! - 1 byte: bit 7 = cube-map flag, bits 0-6 = format code
//! - 1 byte: log2(width)
//! - 1 byte: log2(height)
//! - 1 byte: mip/face count
//!
//! The header is followed by `count` groups of four length-prefixed
//! records, one record per codec family per mip level.
//!
//! Only the raw-compressed layouts (format codes 3 and 5) are supported;
//! cube maps and the tool-recompressed variants are rejected as
//! [`Error::UnsupportedVariant`].
//!
//! # Example
//!
//! ```no_run
//! use atf_container::AtfTexture;
//!
//! let data = std::fs::read("texture.atf")?;
//! let texture = AtfTexture::decode(&data)?;
//!
//! println!("{}x{}", texture.width, texture.height);
//! for group in &texture.groups {
//!     println!("{}: {} mip levels", group.family, group.levels.len());
//! }
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

mod decoder;
mod error;
mod header;

pub use decoder::{
    decode, parse_header, AtfTexture, CodecFamily, CodecPayload, DXT1_RGB, DXT5_RGBA, ETC1_RGB,
    PVRTC_4BPP_RGB, PVRTC_4BPP_RGBA,
};
pub use error::{Error, Result, UnsupportedVariant};
pub use header::{AtfHeader, Layout};
