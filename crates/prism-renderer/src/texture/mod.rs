//! Texture-side helpers: placeholder textures for incomplete samplers and tracking of
//! incompatibly redefined mip levels.

pub mod incomplete;
pub mod redefine;

pub use incomplete::{IncompleteTextureSet, MultisampleTextureInitializer, TextureBackend};
pub use redefine::{RedefinedLevels, TexLevelMask, TextureLevelAllocation, TextureLevelDefinition};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TextureType {
    D2,
    D2Array,
    D2Multisample,
    D2MultisampleArray,
    D3,
    External,
    Rectangle,
    CubeMap,
    CubeMapArray,
    Buffer,
}

impl TextureType {
    pub const COUNT: usize = 10;
    pub const ALL: [TextureType; Self::COUNT] = [
        TextureType::D2,
        TextureType::D2Array,
        TextureType::D2Multisample,
        TextureType::D2MultisampleArray,
        TextureType::D3,
        TextureType::External,
        TextureType::Rectangle,
        TextureType::CubeMap,
        TextureType::CubeMapArray,
        TextureType::Buffer,
    ];

    pub const fn index(self) -> usize {
        self as usize
    }

    pub const fn is_multisample(self) -> bool {
        matches!(self, TextureType::D2Multisample | TextureType::D2MultisampleArray)
    }
}

/// Sampler class a shader samples a texture through.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SamplerFormat {
    Float,
    Unsigned,
    Signed,
    Shadow,
}

impl SamplerFormat {
    pub const COUNT: usize = 4;
    pub const ALL: [SamplerFormat; Self::COUNT] = [
        SamplerFormat::Float,
        SamplerFormat::Unsigned,
        SamplerFormat::Signed,
        SamplerFormat::Shadow,
    ];

    pub const fn index(self) -> usize {
        self as usize
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CubeFace {
    PositiveX,
    NegativeX,
    PositiveY,
    NegativeY,
    PositiveZ,
    NegativeZ,
}

impl CubeFace {
    pub const COUNT: usize = 6;
    pub const ALL: [CubeFace; Self::COUNT] = [
        CubeFace::PositiveX,
        CubeFace::NegativeX,
        CubeFace::PositiveY,
        CubeFace::NegativeY,
        CubeFace::PositiveZ,
        CubeFace::NegativeZ,
    ];
}

/// Image an upload lands in: the whole texture, or one face of a cube map.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TextureTarget {
    Texture(TextureType),
    CubeMapFace(CubeFace),
}

impl TextureTarget {
    pub fn non_cube(ty: TextureType) -> Self {
        debug_assert_ne!(ty, TextureType::CubeMap, "cube maps are addressed per face");
        TextureTarget::Texture(ty)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ImageIndex {
    pub ty: TextureType,
    pub level: u32,
}

impl ImageIndex {
    pub const fn new(ty: TextureType, level: u32) -> Self {
        Self { ty, level }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum CompareMode {
    #[default]
    None,
    CompareRefToTexture,
}
