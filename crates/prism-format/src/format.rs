use bitflags::bitflags;

use crate::fast_copy::{
    FastCopyFunctionMap, BGRA8_FAST_COPIES, BGRA8_SRGB_FAST_COPIES, RGBA8_FAST_COPIES,
    RGBA8_SRGB_FAST_COPIES,
};
use crate::pixels::*;
use crate::PixelFormatId;
use crate::PixelFormatId as Id;

bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct FormatFlags: u16 {
        const UNORM = 1 << 0;
        const SNORM = 1 << 1;
        const UINT = 1 << 2;
        const SINT = 1 << 3;
        const FLOAT = 1 << 4;
        const SRGB = 1 << 5;
        const DEPTH = 1 << 6;
        const STENCIL = 1 << 7;
        const LUMINANCE = 1 << 8;
        const COMPRESSED = 1 << 9;
    }
}

use FormatFlags as F;

/// Static description of a [`PixelFormatId`].
///
/// For compressed formats `pixel_bytes` is the size of one block.
#[derive(Debug, Clone, Copy)]
pub struct Format {
    pub id: PixelFormatId,
    pub pixel_bytes: u32,
    pub flags: FormatFlags,
    pub red_bits: u8,
    pub green_bits: u8,
    pub blue_bits: u8,
    pub alpha_bits: u8,
    pub luminance_bits: u8,
    pub depth_bits: u8,
    pub stencil_bits: u8,
    pub block_width: u8,
    pub block_height: u8,
    pub pixel_read: Option<PixelReadFn>,
    pub pixel_write: Option<PixelWriteFn>,
    pub fast_copy_functions: FastCopyFunctionMap,
}

impl Format {
    const NONE: Format = Format {
        id: PixelFormatId::None,
        pixel_bytes: 0,
        flags: FormatFlags::empty(),
        red_bits: 0,
        green_bits: 0,
        blue_bits: 0,
        alpha_bits: 0,
        luminance_bits: 0,
        depth_bits: 0,
        stencil_bits: 0,
        block_width: 1,
        block_height: 1,
        pixel_read: None,
        pixel_write: None,
        fast_copy_functions: FastCopyFunctionMap::EMPTY,
    };

    const fn color(
        id: PixelFormatId,
        pixel_bytes: u32,
        bits: [u8; 4],
        flags: FormatFlags,
        read: PixelReadFn,
        write: PixelWriteFn,
    ) -> Format {
        Format {
            id,
            pixel_bytes,
            flags,
            red_bits: bits[0],
            green_bits: bits[1],
            blue_bits: bits[2],
            alpha_bits: bits[3],
            pixel_read: Some(read),
            pixel_write: Some(write),
            ..Format::NONE
        }
    }

    const fn luma(
        id: PixelFormatId,
        pixel_bytes: u32,
        luminance_bits: u8,
        alpha_bits: u8,
        read: PixelReadFn,
        write: PixelWriteFn,
    ) -> Format {
        Format {
            id,
            pixel_bytes,
            flags: FormatFlags::LUMINANCE.union(FormatFlags::UNORM),
            alpha_bits,
            luminance_bits,
            pixel_read: Some(read),
            pixel_write: Some(write),
            ..Format::NONE
        }
    }

    const fn depth_stencil(
        id: PixelFormatId,
        pixel_bytes: u32,
        depth_bits: u8,
        stencil_bits: u8,
        flags: FormatFlags,
        read: PixelReadFn,
        write: PixelWriteFn,
    ) -> Format {
        let mut flags = flags;
        if depth_bits > 0 {
            flags = flags.union(FormatFlags::DEPTH);
        }
        if stencil_bits > 0 {
            flags = flags.union(FormatFlags::STENCIL);
        }
        Format {
            id,
            pixel_bytes,
            flags,
            depth_bits,
            stencil_bits,
            pixel_read: Some(read),
            pixel_write: Some(write),
            ..Format::NONE
        }
    }

    const fn compressed(
        id: PixelFormatId,
        block_bytes: u32,
        block_width: u8,
        block_height: u8,
        srgb: bool,
        alpha_bits: u8,
    ) -> Format {
        let flags = FormatFlags::COMPRESSED.union(FormatFlags::UNORM);
        Format {
            id,
            pixel_bytes: block_bytes,
            flags: if srgb { flags.union(FormatFlags::SRGB) } else { flags },
            red_bits: 8,
            green_bits: 8,
            blue_bits: 8,
            alpha_bits,
            block_width,
            block_height,
            ..Format::NONE
        }
    }

    const fn astc(id: PixelFormatId, block_width: u8, block_height: u8, srgb: bool) -> Format {
        Format::compressed(id, 16, block_width, block_height, srgb, 8)
    }

    const fn srgb(self, id: PixelFormatId) -> Format {
        Format {
            id,
            flags: self.flags.union(FormatFlags::SRGB),
            ..self
        }
    }

    const fn with_fast_copies(self, fast_copy_functions: FastCopyFunctionMap) -> Format {
        Format {
            fast_copy_functions,
            ..self
        }
    }

    /// Descriptor for `id`. Total over [`PixelFormatId`]; `None` maps to an empty descriptor.
    #[inline]
    pub fn get(id: PixelFormatId) -> &'static Format {
        &FORMATS[id.index()]
    }

    pub fn is_unorm(&self) -> bool {
        self.flags.contains(FormatFlags::UNORM)
    }

    pub fn is_snorm(&self) -> bool {
        self.flags.contains(FormatFlags::SNORM)
    }

    pub fn is_uint(&self) -> bool {
        self.flags.contains(FormatFlags::UINT)
    }

    pub fn is_sint(&self) -> bool {
        self.flags.contains(FormatFlags::SINT)
    }

    pub fn is_float(&self) -> bool {
        self.flags.contains(FormatFlags::FLOAT)
    }

    pub fn is_srgb(&self) -> bool {
        self.flags.contains(FormatFlags::SRGB)
    }

    pub fn is_luma(&self) -> bool {
        self.flags.contains(FormatFlags::LUMINANCE)
    }

    pub fn is_block(&self) -> bool {
        self.flags.contains(FormatFlags::COMPRESSED)
    }

    pub fn has_depth_or_stencil_bits(&self) -> bool {
        self.depth_bits > 0 || self.stencil_bits > 0
    }

    pub fn channel_count(&self) -> u32 {
        [
            self.red_bits,
            self.green_bits,
            self.blue_bits,
            self.alpha_bits,
            self.luminance_bits,
            self.depth_bits,
            self.stencil_bits,
        ]
        .iter()
        .filter(|&&b| b > 0)
        .count() as u32
    }
}

impl PartialEq for Format {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Format {}

const RGBA8: Format = Format::color(
    Id::R8G8B8A8Unorm,
    4,
    [8, 8, 8, 8],
    F::UNORM,
    read_r8g8b8a8_unorm,
    write_r8g8b8a8_unorm,
);
const BGRA8: Format = Format::color(
    Id::B8G8R8A8Unorm,
    4,
    [8, 8, 8, 8],
    F::UNORM,
    read_b8g8r8a8_unorm,
    write_b8g8r8a8_unorm,
);
const R8: Format = Format::color(
    Id::R8Unorm,
    1,
    [8, 0, 0, 0],
    F::UNORM,
    read_r8_unorm,
    write_r8_unorm,
);
const RG8: Format = Format::color(
    Id::R8G8Unorm,
    2,
    [8, 8, 0, 0],
    F::UNORM,
    read_r8g8_unorm,
    write_r8g8_unorm,
);
const RGB8: Format = Format::color(
    Id::R8G8B8Unorm,
    3,
    [8, 8, 8, 0],
    F::UNORM,
    read_r8g8b8_unorm,
    write_r8g8b8_unorm,
);

/// Indexed by `PixelFormatId as usize`.
static FORMATS: [Format; PixelFormatId::COUNT] = [
    Format::NONE,
    R8,
    RG8,
    RGB8,
    RGBA8.with_fast_copies(RGBA8_FAST_COPIES),
    BGRA8.with_fast_copies(BGRA8_FAST_COPIES),
    R8.srgb(Id::R8UnormSrgb),
    RG8.srgb(Id::R8G8UnormSrgb),
    RGB8.srgb(Id::R8G8B8UnormSrgb),
    RGBA8.srgb(Id::R8G8B8A8UnormSrgb).with_fast_copies(RGBA8_SRGB_FAST_COPIES),
    BGRA8.srgb(Id::B8G8R8A8UnormSrgb).with_fast_copies(BGRA8_SRGB_FAST_COPIES),
    Format::color(
        Id::R8G8B8A8Snorm,
        4,
        [8, 8, 8, 8],
        F::SNORM,
        read_r8g8b8a8_snorm,
        write_r8g8b8a8_snorm,
    ),
    Format::color(
        Id::R8G8B8A8Uint,
        4,
        [8, 8, 8, 8],
        F::UINT,
        read_r8g8b8a8_uint,
        write_r8g8b8a8_uint,
    ),
    Format::color(
        Id::R8G8B8A8Sint,
        4,
        [8, 8, 8, 8],
        F::SINT,
        read_r8g8b8a8_sint,
        write_r8g8b8a8_sint,
    ),
    Format::color(
        Id::R5G6B5Unorm,
        2,
        [5, 6, 5, 0],
        F::UNORM,
        read_r5g6b5_unorm,
        write_r5g6b5_unorm,
    ),
    Format::color(
        Id::R4G4B4A4Unorm,
        2,
        [4, 4, 4, 4],
        F::UNORM,
        read_r4g4b4a4_unorm,
        write_r4g4b4a4_unorm,
    ),
    Format::color(
        Id::R5G5B5A1Unorm,
        2,
        [5, 5, 5, 1],
        F::UNORM,
        read_r5g5b5a1_unorm,
        write_r5g5b5a1_unorm,
    ),
    Format::color(
        Id::R10G10B10A2Unorm,
        4,
        [10, 10, 10, 2],
        F::UNORM,
        read_r10g10b10a2_unorm,
        write_r10g10b10a2_unorm,
    ),
    Format::luma(Id::L8Unorm, 1, 8, 0, read_l8_unorm, write_l8_unorm),
    Format::luma(Id::A8Unorm, 1, 0, 8, read_a8_unorm, write_a8_unorm),
    Format::luma(Id::L8A8Unorm, 2, 8, 8, read_l8a8_unorm, write_l8a8_unorm),
    Format::color(Id::R16Float, 2, [16, 0, 0, 0], F::FLOAT, read_r16_float, write_r16_float),
    Format::color(
        Id::R16G16B16A16Float,
        8,
        [16, 16, 16, 16],
        F::FLOAT,
        read_r16g16b16a16_float,
        write_r16g16b16a16_float,
    ),
    Format::color(Id::R32Float, 4, [32, 0, 0, 0], F::FLOAT, read_r32_float, write_r32_float),
    Format::color(
        Id::R32G32B32A32Float,
        16,
        [32, 32, 32, 32],
        F::FLOAT,
        read_r32g32b32a32_float,
        write_r32g32b32a32_float,
    ),
    Format::color(Id::R32Uint, 4, [32, 0, 0, 0], F::UINT, read_r32_uint, write_r32_uint),
    Format::color(
        Id::R32G32B32A32Uint,
        16,
        [32, 32, 32, 32],
        F::UINT,
        read_r32g32b32a32_uint,
        write_r32g32b32a32_uint,
    ),
    Format::color(
        Id::R32G32B32A32Sint,
        16,
        [32, 32, 32, 32],
        F::SINT,
        read_r32g32b32a32_sint,
        write_r32g32b32a32_sint,
    ),
    Format::depth_stencil(Id::D16Unorm, 2, 16, 0, F::UNORM, read_d16_unorm, write_d16_unorm),
    Format::depth_stencil(
        Id::D24UnormS8Uint,
        4,
        24,
        8,
        F::UNORM,
        read_d24_unorm_s8_uint,
        write_d24_unorm_s8_uint,
    ),
    Format::depth_stencil(Id::D32Float, 4, 32, 0, F::FLOAT, read_d32_float, write_d32_float),
    Format::depth_stencil(Id::S8Uint, 1, 0, 8, F::UINT, read_s8_uint, write_s8_uint),
    Format::compressed(Id::Bc1RgbUnormBlock, 8, 4, 4, false, 0),
    Format::compressed(Id::Bc1RgbUnormSrgbBlock, 8, 4, 4, true, 0),
    Format::compressed(Id::Bc1RgbaUnormBlock, 8, 4, 4, false, 1),
    Format::compressed(Id::Bc1RgbaUnormSrgbBlock, 8, 4, 4, true, 1),
    Format::compressed(Id::Bc2RgbaUnormBlock, 16, 4, 4, false, 4),
    Format::compressed(Id::Bc2RgbaUnormSrgbBlock, 16, 4, 4, true, 4),
    Format::compressed(Id::Bc3RgbaUnormBlock, 16, 4, 4, false, 8),
    Format::compressed(Id::Bc3RgbaUnormSrgbBlock, 16, 4, 4, true, 8),
    Format::compressed(Id::Bc7RgbaUnormBlock, 16, 4, 4, false, 8),
    Format::compressed(Id::Bc7RgbaUnormSrgbBlock, 16, 4, 4, true, 8),
    Format::compressed(Id::Etc2R8G8B8UnormBlock, 8, 4, 4, false, 0),
    Format::compressed(Id::Etc2R8G8B8SrgbBlock, 8, 4, 4, true, 0),
    Format::compressed(Id::Etc2R8G8B8A1UnormBlock, 8, 4, 4, false, 1),
    Format::compressed(Id::Etc2R8G8B8A1SrgbBlock, 8, 4, 4, true, 1),
    Format::compressed(Id::Etc2R8G8B8A8UnormBlock, 16, 4, 4, false, 8),
    Format::compressed(Id::Etc2R8G8B8A8SrgbBlock, 16, 4, 4, true, 8),
    Format::astc(Id::Astc4x4UnormBlock, 4, 4, false),
    Format::astc(Id::Astc4x4SrgbBlock, 4, 4, true),
    Format::astc(Id::Astc5x4UnormBlock, 5, 4, false),
    Format::astc(Id::Astc5x4SrgbBlock, 5, 4, true),
    Format::astc(Id::Astc5x5UnormBlock, 5, 5, false),
    Format::astc(Id::Astc5x5SrgbBlock, 5, 5, true),
    Format::astc(Id::Astc6x5UnormBlock, 6, 5, false),
    Format::astc(Id::Astc6x5SrgbBlock, 6, 5, true),
    Format::astc(Id::Astc6x6UnormBlock, 6, 6, false),
    Format::astc(Id::Astc6x6SrgbBlock, 6, 6, true),
    Format::astc(Id::Astc8x5UnormBlock, 8, 5, false),
    Format::astc(Id::Astc8x5SrgbBlock, 8, 5, true),
    Format::astc(Id::Astc8x6UnormBlock, 8, 6, false),
    Format::astc(Id::Astc8x6SrgbBlock, 8, 6, true),
    Format::astc(Id::Astc8x8UnormBlock, 8, 8, false),
    Format::astc(Id::Astc8x8SrgbBlock, 8, 8, true),
    Format::astc(Id::Astc10x5UnormBlock, 10, 5, false),
    Format::astc(Id::Astc10x5SrgbBlock, 10, 5, true),
    Format::astc(Id::Astc10x6UnormBlock, 10, 6, false),
    Format::astc(Id::Astc10x6SrgbBlock, 10, 6, true),
    Format::astc(Id::Astc10x8UnormBlock, 10, 8, false),
    Format::astc(Id::Astc10x8SrgbBlock, 10, 8, true),
    Format::astc(Id::Astc10x10UnormBlock, 10, 10, false),
    Format::astc(Id::Astc10x10SrgbBlock, 10, 10, true),
    Format::astc(Id::Astc12x10UnormBlock, 12, 10, false),
    Format::astc(Id::Astc12x10SrgbBlock, 12, 10, true),
    Format::astc(Id::Astc12x12UnormBlock, 12, 12, false),
    Format::astc(Id::Astc12x12SrgbBlock, 12, 12, true),
];

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn table_is_indexed_by_id() {
        for &id in PixelFormatId::ALL {
            assert_eq!(Format::get(id).id, id);
        }
    }

    #[test]
    fn uncompressed_formats_have_read_and_write() {
        for &id in &PixelFormatId::ALL[1..] {
            let format = Format::get(id);
            if format.is_block() {
                assert!(format.pixel_read.is_none() && format.pixel_write.is_none(), "{id:?}");
            } else {
                assert!(format.pixel_read.is_some() && format.pixel_write.is_some(), "{id:?}");
                assert!(format.pixel_bytes > 0, "{id:?}");
            }
        }
    }

    #[test]
    fn srgb_twins_share_layout() {
        let linear = Format::get(PixelFormatId::R8G8B8A8Unorm);
        let srgb = Format::get(PixelFormatId::R8G8B8A8UnormSrgb);
        assert!(srgb.is_srgb() && !linear.is_srgb());
        assert_eq!(linear.pixel_bytes, srgb.pixel_bytes);
        assert!(srgb.fast_copy_functions.has(PixelFormatId::B8G8R8A8UnormSrgb));
    }

    #[test]
    fn depth_stencil_flags() {
        let d24s8 = Format::get(PixelFormatId::D24UnormS8Uint);
        assert!(d24s8.flags.contains(FormatFlags::DEPTH | FormatFlags::STENCIL));
        assert!(d24s8.has_depth_or_stencil_bits());
        assert!(!Format::get(PixelFormatId::R8Unorm).has_depth_or_stencil_bits());
    }

    #[test]
    fn channel_count_counts_populated_channels() {
        assert_eq!(Format::get(PixelFormatId::R8G8B8Unorm).channel_count(), 3);
        assert_eq!(Format::get(PixelFormatId::L8A8Unorm).channel_count(), 2);
        assert_eq!(Format::get(PixelFormatId::None).channel_count(), 0);
    }
}
