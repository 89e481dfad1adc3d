//! Linear <-> sRGB twin lookup.

use crate::PixelFormatId;
use crate::PixelFormatId as Id;

/// `(linear, srgb)` pairs. Both lookup directions scan this one table.
const SRGB_PAIRS: &[(PixelFormatId, PixelFormatId)] = &[
    (Id::R8Unorm, Id::R8UnormSrgb),
    (Id::R8G8Unorm, Id::R8G8UnormSrgb),
    (Id::R8G8B8Unorm, Id::R8G8B8UnormSrgb),
    (Id::R8G8B8A8Unorm, Id::R8G8B8A8UnormSrgb),
    (Id::B8G8R8A8Unorm, Id::B8G8R8A8UnormSrgb),
    (Id::Bc1RgbUnormBlock, Id::Bc1RgbUnormSrgbBlock),
    (Id::Bc1RgbaUnormBlock, Id::Bc1RgbaUnormSrgbBlock),
    (Id::Bc2RgbaUnormBlock, Id::Bc2RgbaUnormSrgbBlock),
    (Id::Bc3RgbaUnormBlock, Id::Bc3RgbaUnormSrgbBlock),
    (Id::Bc7RgbaUnormBlock, Id::Bc7RgbaUnormSrgbBlock),
    (Id::Etc2R8G8B8UnormBlock, Id::Etc2R8G8B8SrgbBlock),
    (Id::Etc2R8G8B8A1UnormBlock, Id::Etc2R8G8B8A1SrgbBlock),
    (Id::Etc2R8G8B8A8UnormBlock, Id::Etc2R8G8B8A8SrgbBlock),
    (Id::Astc4x4UnormBlock, Id::Astc4x4SrgbBlock),
    (Id::Astc5x4UnormBlock, Id::Astc5x4SrgbBlock),
    (Id::Astc5x5UnormBlock, Id::Astc5x5SrgbBlock),
    (Id::Astc6x5UnormBlock, Id::Astc6x5SrgbBlock),
    (Id::Astc6x6UnormBlock, Id::Astc6x6SrgbBlock),
    (Id::Astc8x5UnormBlock, Id::Astc8x5SrgbBlock),
    (Id::Astc8x6UnormBlock, Id::Astc8x6SrgbBlock),
    (Id::Astc8x8UnormBlock, Id::Astc8x8SrgbBlock),
    (Id::Astc10x5UnormBlock, Id::Astc10x5SrgbBlock),
    (Id::Astc10x6UnormBlock, Id::Astc10x6SrgbBlock),
    (Id::Astc10x8UnormBlock, Id::Astc10x8SrgbBlock),
    (Id::Astc10x10UnormBlock, Id::Astc10x10SrgbBlock),
    (Id::Astc12x10UnormBlock, Id::Astc12x10SrgbBlock),
    (Id::Astc12x12UnormBlock, Id::Astc12x12SrgbBlock),
];

/// sRGB twin of a linear format, or [`PixelFormatId::None`].
pub fn convert_to_srgb(id: PixelFormatId) -> PixelFormatId {
    SRGB_PAIRS
        .iter()
        .find(|(linear, _)| *linear == id)
        .map_or(PixelFormatId::None, |&(_, srgb)| srgb)
}

/// Linear twin of an sRGB format, or [`PixelFormatId::None`].
pub fn convert_to_linear(id: PixelFormatId) -> PixelFormatId {
    SRGB_PAIRS
        .iter()
        .find(|(_, srgb)| *srgb == id)
        .map_or(PixelFormatId::None, |&(linear, _)| linear)
}

/// Whether a linear format may be reinterpreted as sRGB (e.g. for `EXT_sRGB_write_control`).
pub fn is_overridable_linear_format(id: PixelFormatId) -> bool {
    !convert_to_srgb(id).is_none()
}
