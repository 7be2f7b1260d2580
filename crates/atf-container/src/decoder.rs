//! ATF container decoding.
//!
//! The decoder is a single pass over an immutable byte buffer: validate the
//! header, dispatch on the layout, then walk the length-prefixed record
//! stream once with a bounds-checked cursor. It allocates only the vectors
//! of slice references; payload bytes are borrowed from the input.

use std::fmt;

use atf_common::BinaryReader;

use crate::header::{AtfHeader, Layout};
use crate::{Error, Result, UnsupportedVariant};

/// Internal-format identifier for opaque S3TC (DXT1) payloads.
pub const DXT1_RGB: u32 = 0x83F0;
/// Internal-format identifier for alpha-capable S3TC (DXT5) payloads.
pub const DXT5_RGBA: u32 = 0x83F3;
/// Internal-format identifier for opaque PVRTC 4bpp payloads.
pub const PVRTC_4BPP_RGB: u32 = 0x8C00;
/// Internal-format identifier for alpha-capable PVRTC 4bpp payloads.
pub const PVRTC_4BPP_RGBA: u32 = 0x8C02;
/// Internal-format identifier for ETC1 payloads (alpha rides in a second
/// plane, so the identifier is the same in both layouts).
pub const ETC1_RGB: u32 = 0x8D64;

/// A GPU block-compression scheme the container can carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CodecFamily {
    /// S3TC/DXT (desktop).
    S3tc,
    /// PVRTC 4bpp (PowerVR).
    Pvrtc,
    /// ETC1 (GLES).
    Etc1,
}

impl CodecFamily {
    /// Short lowercase name, stable for use in file names.
    pub fn name(self) -> &'static str {
        match self {
            Self::S3tc => "s3tc",
            Self::Pvrtc => "pvrtc",
            Self::Etc1 => "etc1",
        }
    }
}

impl fmt::Display for CodecFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One codec family's payload: still-compressed bytes for each mip level.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodecPayload<'a> {
    /// The compression scheme of the payload bytes.
    pub family: CodecFamily,
    /// Whether the payload encodes an alpha channel.
    pub uses_alpha: bool,
    /// Opaque graphics-API format identifier, carried verbatim. The caller
    /// maps it to its backend's enum; the decoder never translates it.
    pub internal_format: u32,
    /// One entry per mip level, in mip order. A zero-length slice means the
    /// level is absent from the container.
    pub levels: Vec<&'a [u8]>,
    /// Separate alpha planes, present only for ETC1 payloads decoded from
    /// the alpha layout. `None` means the codec carries no alpha planes at
    /// all, as opposed to alpha planes that happen to be empty.
    pub alpha_levels: Option<Vec<&'a [u8]>>,
}

/// A decoded ATF container: dimensions plus per-codec payload groups.
///
/// This is a pure, immutable product of one [`decode`] call. Level slices
/// borrow the input buffer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AtfTexture<'a> {
    /// Texture width in pixels.
    pub width: u32,
    /// Texture height in pixels.
    pub height: u32,
    /// Payload groups in s3tc, pvrtc, etc1 order. A family whose base mip
    /// is empty is omitted entirely rather than emitted as an empty group.
    pub groups: Vec<CodecPayload<'a>>,
}

impl<'a> AtfTexture<'a> {
    /// Decode an ATF container. See [`decode`].
    pub fn decode(data: &'a [u8]) -> Result<Self> {
        decode(data)
    }

    /// The S3TC/DXT payload group, if the container carries one.
    pub fn s3tc(&self) -> Option<&CodecPayload<'a>> {
        self.family(CodecFamily::S3tc)
    }

    /// The PVRTC payload group, if the container carries one.
    pub fn pvrtc(&self) -> Option<&CodecPayload<'a>> {
        self.family(CodecFamily::Pvrtc)
    }

    /// The ETC1 payload group, if the container carries one.
    pub fn etc1(&self) -> Option<&CodecPayload<'a>> {
        self.family(CodecFamily::Etc1)
    }

    /// The first payload group whose internal format the caller supports,
    /// in s3tc, pvrtc, etc1 preference order.
    pub fn select(&self, supported: &[u32]) -> Option<&CodecPayload<'a>> {
        self.groups
            .iter()
            .find(|group| supported.contains(&group.internal_format))
    }

    fn family(&self, family: CodecFamily) -> Option<&CodecPayload<'a>> {
        self.groups.iter().find(|group| group.family == family)
    }
}

/// Validate the signature and declared length, returning the header.
///
/// Checks run in order: signature first (before any other field is looked
/// at), then the declared length against the buffer length. A buffer too
/// short to hold the 16-byte header fails as [`Error::Truncated`].
pub fn parse_header(data: &[u8]) -> Result<AtfHeader> {
    let magic_len = AtfHeader::MAGIC.len();
    if data.len() < magic_len || &data[..magic_len] != AtfHeader::MAGIC {
        return Err(Error::BadSignature {
            actual: data[..magic_len.min(data.len())].to_vec(),
        });
    }

    let mut reader = BinaryReader::new(data);
    let header: AtfHeader = reader.read_struct()?;

    let expected = header.declared_length() as usize + 12;
    if data.len() != expected {
        return Err(Error::LengthMismatch {
            expected,
            actual: data.len(),
        });
    }

    Ok(header)
}

/// Decode an ATF container from a fully materialized byte buffer.
///
/// The decode is synchronous, single-pass, and side-effect free; the same
/// buffer always produces the same texture. Feeding it a partially
/// downloaded buffer is a caller bug and fails the length check.
pub fn decode(data: &[u8]) -> Result<AtfTexture<'_>> {
    let header = parse_header(data)?;
    let count = header.count as usize;
    let records = &data[AtfHeader::SIZE..];

    let groups = match header.layout() {
        Layout::OpaqueRaw => decode_opaque(records, count)?,
        Layout::AlphaRaw => decode_alpha(records, count)?,
        Layout::CubeMap => {
            return Err(Error::UnsupportedVariant(UnsupportedVariant::CubeMap));
        }
        Layout::Unsupported(code) => {
            return Err(Error::UnsupportedVariant(UnsupportedVariant::Format(code)));
        }
    };

    Ok(AtfTexture {
        width: header.width(),
        height: header.height(),
        groups,
    })
}

/// Read one length-prefixed record: a big-endian u32 byte count followed by
/// exactly that many payload bytes.
fn read_record<'a>(reader: &mut BinaryReader<'a>) -> Result<&'a [u8]> {
    let len = reader.read_u32()? as usize;
    Ok(reader.read_bytes(len)?)
}

/// Record loop for the opaque layout (format code 3).
///
/// Each mip level is four records in fixed order: DXT1, PVRTC, ETC1, and an
/// ETC2 slot. The ETC2 slot is not surfaced, but it must be consumed or
/// every record after it lands on the wrong offset.
fn decode_opaque(data: &[u8], count: usize) -> Result<Vec<CodecPayload<'_>>> {
    let mut dxt1 = Vec::with_capacity(count);
    let mut pvrtc = Vec::with_capacity(count);
    let mut etc1 = Vec::with_capacity(count);

    let mut reader = BinaryReader::new(data);
    for _ in 0..count {
        dxt1.push(read_record(&mut reader)?);
        pvrtc.push(read_record(&mut reader)?);
        etc1.push(read_record(&mut reader)?);
        read_record(&mut reader)?;
    }

    let mut groups = Vec::new();
    push_group(&mut groups, CodecFamily::S3tc, false, DXT1_RGB, dxt1, None);
    push_group(&mut groups, CodecFamily::Pvrtc, false, PVRTC_4BPP_RGB, pvrtc, None);
    push_group(&mut groups, CodecFamily::Etc1, false, ETC1_RGB, etc1, None);
    Ok(groups)
}

/// Record loop for the alpha layout (format code 5).
///
/// Same shape as the opaque loop, with DXT5 in the first slot and the ETC1
/// record packing color and alpha planes back to back, each half the
/// declared length. On an odd declared length the division truncates; the
/// full record is consumed either way, so the stray byte cannot
/// desynchronize the next record.
fn decode_alpha(data: &[u8], count: usize) -> Result<Vec<CodecPayload<'_>>> {
    let mut dxt5 = Vec::with_capacity(count);
    let mut pvrtc = Vec::with_capacity(count);
    let mut etc1 = Vec::with_capacity(count);
    let mut etc1_alpha = Vec::with_capacity(count);

    let mut reader = BinaryReader::new(data);
    for _ in 0..count {
        dxt5.push(read_record(&mut reader)?);
        pvrtc.push(read_record(&mut reader)?);

        let packed = read_record(&mut reader)?;
        let half = packed.len() / 2;
        etc1.push(&packed[..half]);
        etc1_alpha.push(&packed[half..half * 2]);

        read_record(&mut reader)?;
    }

    let mut groups = Vec::new();
    push_group(&mut groups, CodecFamily::S3tc, true, DXT5_RGBA, dxt5, None);
    push_group(&mut groups, CodecFamily::Pvrtc, true, PVRTC_4BPP_RGBA, pvrtc, None);
    push_group(&mut groups, CodecFamily::Etc1, true, ETC1_RGB, etc1, Some(etc1_alpha));
    Ok(groups)
}

/// Emit a family's group only if its base mip holds data. Families with no
/// usable payload are omitted, not emitted empty.
fn push_group<'a>(
    groups: &mut Vec<CodecPayload<'a>>,
    family: CodecFamily,
    uses_alpha: bool,
    internal_format: u32,
    levels: Vec<&'a [u8]>,
    alpha_levels: Option<Vec<&'a [u8]>>,
) {
    if levels.first().is_some_and(|level| !level.is_empty()) {
        groups.push(CodecPayload {
            family,
            uses_alpha,
            internal_format,
            levels,
            alpha_levels,
        });
    }
}
