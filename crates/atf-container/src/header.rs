//! ATF header structure.

use zerocopy::byteorder::{BigEndian, U32};
use zerocopy::{FromBytes, Immutable, IntoBytes, KnownLayout};

/// ATF file header.
///
/// The 16 bytes at the start of every ATF file. All multi-byte integers are
/// big-endian; every field here has alignment 1, so the struct can be read
/// from any offset.
#[derive(Debug, Clone, Copy, FromBytes, IntoBytes, Immutable, KnownLayout)]
#[repr(C, packed)]
pub struct AtfHeader {
    /// Signature bytes, always `"ATF"`.
    pub signature: [u8; 3],
    /// Reserved field. Byte 2's low bit records the encoder's `-e` switch;
    /// its remaining 7 bits hold the packaged mip count when `-n` was used.
    /// Byte 3 is the constant marker `0xFF`.
    pub reserved: [u8; 4],
    /// Format version.
    pub version: u8,
    /// File size in bytes, excluding signature, reserved, version, and this
    /// field (i.e. total size minus 12).
    pub length: U32<BigEndian>,
    /// Bit 7 = cube-map flag, bits 0-6 = format code.
    pub flags: u8,
    /// Width expressed as an exponent: width = 2^log2_width.
    pub log2_width: u8,
    /// Height expressed as an exponent: height = 2^log2_height.
    pub log2_height: u8,
    /// Number of textures encoded per face (the mip chain length).
    /// The format allows 1-13.
    pub count: u8,
}

impl AtfHeader {
    /// The magic bytes at the start of an ATF file.
    pub const MAGIC: &'static [u8; 3] = b"ATF";

    /// Size of the header in bytes.
    pub const SIZE: usize = 16;

    /// Format code: uncompressed RGB888.
    pub const RGB888: u8 = 0x00;
    /// Format code: uncompressed RGBA8888.
    pub const RGBA8888: u8 = 0x01;
    /// Format code: tool-recompressed, opaque.
    pub const COMPRESSED: u8 = 0x02;
    /// Format code: raw block-compressed, opaque.
    pub const RAW_COMPRESSED: u8 = 0x03;
    /// Format code: tool-recompressed, with alpha.
    pub const COMPRESSED_ALPHA: u8 = 0x04;
    /// Format code: raw block-compressed, with alpha.
    pub const RAW_COMPRESSED_ALPHA: u8 = 0x05;
    /// Format code: lossy recompressed, opaque.
    pub const COMPRESSED_LOSSY: u8 = 0x0C;
    /// Format code: lossy recompressed, with alpha.
    pub const COMPRESSED_LOSSY_ALPHA: u8 = 0x0D;

    /// Declared payload length: total file size minus 12.
    #[inline]
    pub fn declared_length(&self) -> u32 {
        self.length.get()
    }

    /// Whether the cube-map bit is set.
    #[inline]
    pub fn is_cubemap(&self) -> bool {
        self.flags & 0x80 != 0
    }

    /// The 7-bit format code.
    #[inline]
    pub fn format_code(&self) -> u8 {
        self.flags & 0x7F
    }

    /// Classify the flags byte into a [`Layout`].
    #[inline]
    pub fn layout(&self) -> Layout {
        Layout::classify(self.flags)
    }

    /// Whether the encoder's `-e` switch was used.
    #[inline]
    pub fn encoder_switch(&self) -> bool {
        self.reserved[2] & 0x01 != 0
    }

    /// Mip count packaged by the encoder's `-n` switch (0 when unused).
    #[inline]
    pub fn packaged_mips(&self) -> u8 {
        (self.reserved[2] & 0xFE) >> 1
    }

    /// Texture width in pixels.
    ///
    /// The format documentation caps `log2_width` at 12; larger values are
    /// the caller's responsibility to reject. The shift wraps modulo 32,
    /// matching the reference tooling.
    #[inline]
    pub fn width(&self) -> u32 {
        1u32.wrapping_shl(self.log2_width as u32)
    }

    /// Texture height in pixels. Same caveats as [`AtfHeader::width`].
    #[inline]
    pub fn height(&self) -> u32 {
        1u32.wrapping_shl(self.log2_height as u32)
    }
}

/// Container layout selected by the header flags byte.
///
/// This is a closed set: supporting a future variant is one new arm here
/// plus its record loop in the decoder, not a rewritten branch tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Layout {
    /// Format code 3: raw block-compressed payloads, opaque.
    OpaqueRaw,
    /// Format code 5: raw block-compressed payloads with alpha.
    AlphaRaw,
    /// Cube-map bit set; the six-face layout is not implemented.
    CubeMap,
    /// Any other format code the format documentation defines.
    Unsupported(u8),
}

impl Layout {
    /// Classify a header flags byte. The cube-map bit wins over the format
    /// code.
    pub fn classify(flags: u8) -> Self {
        if flags & 0x80 != 0 {
            return Self::CubeMap;
        }
        match flags & 0x7F {
            AtfHeader::RAW_COMPRESSED => Self::OpaqueRaw,
            AtfHeader::RAW_COMPRESSED_ALPHA => Self::AlphaRaw,
            code => Self::Unsupported(code),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_header_size() {
        assert_eq!(std::mem::size_of::<AtfHeader>(), AtfHeader::SIZE);
    }

    #[test]
    fn test_classify() {
        assert_eq!(Layout::classify(0x03), Layout::OpaqueRaw);
        assert_eq!(Layout::classify(0x05), Layout::AlphaRaw);
        assert_eq!(Layout::classify(0x83), Layout::CubeMap);
        // Cube-map bit wins even over an unsupported code.
        assert_eq!(Layout::classify(0x81), Layout::CubeMap);
        assert_eq!(Layout::classify(0x00), Layout::Unsupported(0x00));
        assert_eq!(Layout::classify(0x0C), Layout::Unsupported(0x0C));
    }

    #[test]
    fn test_field_accessors() {
        let bytes = [
            b'A', b'T', b'F', // signature
            0x00, 0x00, 0x0B, 0xFF, // reserved: -e set, -n = 5
            0x02, // version
            0x00, 0x00, 0x00, 0x04, // declared length
            0x05, // flags: alpha raw, no cube map
            0x0A, // log2 width: 1024
            0x08, // log2 height: 256
            0x0B, // count
        ];
        let header = AtfHeader::read_from_bytes(&bytes).unwrap();

        assert_eq!(&header.signature, AtfHeader::MAGIC);
        assert_eq!(header.version, 2);
        assert_eq!(header.declared_length(), 4);
        assert!(!header.is_cubemap());
        assert_eq!(header.format_code(), AtfHeader::RAW_COMPRESSED_ALPHA);
        assert_eq!(header.layout(), Layout::AlphaRaw);
        assert!(header.encoder_switch());
        assert_eq!(header.packaged_mips(), 5);
        assert_eq!(header.width(), 1024);
        assert_eq!(header.height(), 256);
        assert_eq!(header.count, 11);
    }
}
