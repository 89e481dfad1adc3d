macro_rules! pixel_format_ids {
    ($($variant:ident),+ $(,)?) => {
        /// Identifier of a concrete in-memory pixel layout.
        ///
        /// `None` is the "no format" sentinel returned by lookups that find nothing.
        #[repr(u16)]
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub enum PixelFormatId {
            $($variant),+
        }

        impl PixelFormatId {
            /// Every identifier in declaration order. `ALL[id as usize] == id`.
            pub const ALL: &'static [PixelFormatId] = &[$(PixelFormatId::$variant),+];
            pub const COUNT: usize = Self::ALL.len();
        }
    };
}

pixel_format_ids! {
    None,

    R8Unorm,
    R8G8Unorm,
    R8G8B8Unorm,
    R8G8B8A8Unorm,
    B8G8R8A8Unorm,
    R8UnormSrgb,
    R8G8UnormSrgb,
    R8G8B8UnormSrgb,
    R8G8B8A8UnormSrgb,
    B8G8R8A8UnormSrgb,
    R8G8B8A8Snorm,
    R8G8B8A8Uint,
    R8G8B8A8Sint,

    R5G6B5Unorm,
    R4G4B4A4Unorm,
    R5G5B5A1Unorm,
    R10G10B10A2Unorm,

    L8Unorm,
    A8Unorm,
    L8A8Unorm,

    R16Float,
    R16G16B16A16Float,
    R32Float,
    R32G32B32A32Float,
    R32Uint,
    R32G32B32A32Uint,
    R32G32B32A32Sint,

    D16Unorm,
    D24UnormS8Uint,
    D32Float,
    S8Uint,

    Bc1RgbUnormBlock,
    Bc1RgbUnormSrgbBlock,
    Bc1RgbaUnormBlock,
    Bc1RgbaUnormSrgbBlock,
    Bc2RgbaUnormBlock,
    Bc2RgbaUnormSrgbBlock,
    Bc3RgbaUnormBlock,
    Bc3RgbaUnormSrgbBlock,
    Bc7RgbaUnormBlock,
    Bc7RgbaUnormSrgbBlock,

    Etc2R8G8B8UnormBlock,
    Etc2R8G8B8SrgbBlock,
    Etc2R8G8B8A1UnormBlock,
    Etc2R8G8B8A1SrgbBlock,
    Etc2R8G8B8A8UnormBlock,
    Etc2R8G8B8A8SrgbBlock,

    Astc4x4UnormBlock,
    Astc4x4SrgbBlock,
    Astc5x4UnormBlock,
    Astc5x4SrgbBlock,
    Astc5x5UnormBlock,
    Astc5x5SrgbBlock,
    Astc6x5UnormBlock,
    Astc6x5SrgbBlock,
    Astc6x6UnormBlock,
    Astc6x6SrgbBlock,
    Astc8x5UnormBlock,
    Astc8x5SrgbBlock,
    Astc8x6UnormBlock,
    Astc8x6SrgbBlock,
    Astc8x8UnormBlock,
    Astc8x8SrgbBlock,
    Astc10x5UnormBlock,
    Astc10x5SrgbBlock,
    Astc10x6UnormBlock,
    Astc10x6SrgbBlock,
    Astc10x8UnormBlock,
    Astc10x8SrgbBlock,
    Astc10x10UnormBlock,
    Astc10x10SrgbBlock,
    Astc12x10UnormBlock,
    Astc12x10SrgbBlock,
    Astc12x12UnormBlock,
    Astc12x12SrgbBlock,
}

impl PixelFormatId {
    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }

    #[inline]
    pub const fn is_none(self) -> bool {
        matches!(self, PixelFormatId::None)
    }

    /// Descriptor for this format.
    #[inline]
    pub fn format(self) -> &'static crate::Format {
        crate::Format::get(self)
    }
}

impl Default for PixelFormatId {
    fn default() -> Self {
        PixelFormatId::None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_is_indexed_by_discriminant() {
        for (i, id) in PixelFormatId::ALL.iter().enumerate() {
            assert_eq!(id.index(), i, "{id:?}");
        }
        assert_eq!(PixelFormatId::ALL[0], PixelFormatId::None);
    }
}
