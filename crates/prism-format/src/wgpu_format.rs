use wgpu::{AstcBlock, AstcChannel, TextureFormat};

use crate::PixelFormatId;
use crate::PixelFormatId as Id;

fn astc(block: AstcBlock, srgb: bool) -> TextureFormat {
    TextureFormat::Astc {
        block,
        channel: if srgb { AstcChannel::UnormSrgb } else { AstcChannel::Unorm },
    }
}

impl PixelFormatId {
    /// WebGPU texture format with the same memory layout, if WebGPU has one.
    ///
    /// BC1 RGB maps onto the RGBA variant; the alpha bit is ignored when sampling.
    pub fn to_wgpu(self) -> Option<TextureFormat> {
        let format = match self {
            Id::R8Unorm => TextureFormat::R8Unorm,
            Id::R8G8Unorm => TextureFormat::Rg8Unorm,
            Id::R8G8B8A8Unorm => TextureFormat::Rgba8Unorm,
            Id::R8G8B8A8UnormSrgb => TextureFormat::Rgba8UnormSrgb,
            Id::B8G8R8A8Unorm => TextureFormat::Bgra8Unorm,
            Id::B8G8R8A8UnormSrgb => TextureFormat::Bgra8UnormSrgb,
            Id::R8G8B8A8Snorm => TextureFormat::Rgba8Snorm,
            Id::R8G8B8A8Uint => TextureFormat::Rgba8Uint,
            Id::R8G8B8A8Sint => TextureFormat::Rgba8Sint,
            Id::R10G10B10A2Unorm => TextureFormat::Rgb10a2Unorm,
            Id::R16Float => TextureFormat::R16Float,
            Id::R16G16B16A16Float => TextureFormat::Rgba16Float,
            Id::R32Float => TextureFormat::R32Float,
            Id::R32G32B32A32Float => TextureFormat::Rgba32Float,
            Id::R32Uint => TextureFormat::R32Uint,
            Id::R32G32B32A32Uint => TextureFormat::Rgba32Uint,
            Id::R32G32B32A32Sint => TextureFormat::Rgba32Sint,
            Id::D16Unorm => TextureFormat::Depth16Unorm,
            Id::D24UnormS8Uint => TextureFormat::Depth24PlusStencil8,
            Id::D32Float => TextureFormat::Depth32Float,
            Id::S8Uint => TextureFormat::Stencil8,
            Id::Bc1RgbUnormBlock | Id::Bc1RgbaUnormBlock => TextureFormat::Bc1RgbaUnorm,
            Id::Bc1RgbUnormSrgbBlock | Id::Bc1RgbaUnormSrgbBlock => TextureFormat::Bc1RgbaUnormSrgb,
            Id::Bc2RgbaUnormBlock => TextureFormat::Bc2RgbaUnorm,
            Id::Bc2RgbaUnormSrgbBlock => TextureFormat::Bc2RgbaUnormSrgb,
            Id::Bc3RgbaUnormBlock => TextureFormat::Bc3RgbaUnorm,
            Id::Bc3RgbaUnormSrgbBlock => TextureFormat::Bc3RgbaUnormSrgb,
            Id::Bc7RgbaUnormBlock => TextureFormat::Bc7RgbaUnorm,
            Id::Bc7RgbaUnormSrgbBlock => TextureFormat::Bc7RgbaUnormSrgb,
            Id::Etc2R8G8B8UnormBlock => TextureFormat::Etc2Rgb8Unorm,
            Id::Etc2R8G8B8SrgbBlock => TextureFormat::Etc2Rgb8UnormSrgb,
            Id::Etc2R8G8B8A1UnormBlock => TextureFormat::Etc2Rgb8A1Unorm,
            Id::Etc2R8G8B8A1SrgbBlock => TextureFormat::Etc2Rgb8A1UnormSrgb,
            Id::Etc2R8G8B8A8UnormBlock => TextureFormat::Etc2Rgba8Unorm,
            Id::Etc2R8G8B8A8SrgbBlock => TextureFormat::Etc2Rgba8UnormSrgb,
            Id::Astc4x4UnormBlock => astc(AstcBlock::B4x4, false),
            Id::Astc4x4SrgbBlock => astc(AstcBlock::B4x4, true),
            Id::Astc5x4UnormBlock => astc(AstcBlock::B5x4, false),
            Id::Astc5x4SrgbBlock => astc(AstcBlock::B5x4, true),
            Id::Astc5x5UnormBlock => astc(AstcBlock::B5x5, false),
            Id::Astc5x5SrgbBlock => astc(AstcBlock::B5x5, true),
            Id::Astc6x5UnormBlock => astc(AstcBlock::B6x5, false),
            Id::Astc6x5SrgbBlock => astc(AstcBlock::B6x5, true),
            Id::Astc6x6UnormBlock => astc(AstcBlock::B6x6, false),
            Id::Astc6x6SrgbBlock => astc(AstcBlock::B6x6, true),
            Id::Astc8x5UnormBlock => astc(AstcBlock::B8x5, false),
            Id::Astc8x5SrgbBlock => astc(AstcBlock::B8x5, true),
            Id::Astc8x6UnormBlock => astc(AstcBlock::B8x6, false),
            Id::Astc8x6SrgbBlock => astc(AstcBlock::B8x6, true),
            Id::Astc8x8UnormBlock => astc(AstcBlock::B8x8, false),
            Id::Astc8x8SrgbBlock => astc(AstcBlock::B8x8, true),
            Id::Astc10x5UnormBlock => astc(AstcBlock::B10x5, false),
            Id::Astc10x5SrgbBlock => astc(AstcBlock::B10x5, true),
            Id::Astc10x6UnormBlock => astc(AstcBlock::B10x6, false),
            Id::Astc10x6SrgbBlock => astc(AstcBlock::B10x6, true),
            Id::Astc10x8UnormBlock => astc(AstcBlock::B10x8, false),
            Id::Astc10x8SrgbBlock => astc(AstcBlock::B10x8, true),
            Id::Astc10x10UnormBlock => astc(AstcBlock::B10x10, false),
            Id::Astc10x10SrgbBlock => astc(AstcBlock::B10x10, true),
            Id::Astc12x10UnormBlock => astc(AstcBlock::B12x10, false),
            Id::Astc12x10SrgbBlock => astc(AstcBlock::B12x10, true),
            Id::Astc12x12UnormBlock => astc(AstcBlock::B12x12, false),
            Id::Astc12x12SrgbBlock => astc(AstcBlock::B12x12, true),
            Id::None
            | Id::R8G8B8Unorm
            | Id::R8UnormSrgb
            | Id::R8G8UnormSrgb
            | Id::R8G8B8UnormSrgb
            | Id::R5G6B5Unorm
            | Id::R4G4B4A4Unorm
            | Id::R5G5B5A1Unorm
            | Id::L8Unorm
            | Id::A8Unorm
            | Id::L8A8Unorm => return None,
        };
        Some(format)
    }
}
