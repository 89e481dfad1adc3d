use super::{CubeFace, ImageIndex, TextureType};

/// One bit per mip level.
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct TexLevelMask(u32);

impl TexLevelMask {
    pub const MAX_LEVELS: u32 = 32;

    pub const fn bits(self) -> u32 {
        self.0
    }

    pub fn set(&mut self, level: u32, value: bool) {
        debug_assert!(level < Self::MAX_LEVELS);
        if value {
            self.0 |= 1 << level;
        } else {
            self.0 &= !(1 << level);
        }
    }

    pub const fn test(self, level: u32) -> bool {
        level < Self::MAX_LEVELS && self.0 & (1 << level) != 0
    }

    pub const fn any(self) -> bool {
        self.0 != 0
    }

    /// Levels `0..count`.
    const fn low_levels(count: u32) -> u32 {
        if count >= Self::MAX_LEVELS {
            u32::MAX
        } else {
            (1 << count) - 1
        }
    }
}

impl std::fmt::Debug for TexLevelMask {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "TexLevelMask({:#b})", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TextureLevelAllocation {
    WithinAllocatedImage,
    OutsideAllocatedImage,
}

/// Whether a new definition of a level matches the format and size the image was allocated with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TextureLevelDefinition {
    Compatible,
    Incompatible,
}

/// Incompatibly redefined levels, per cube face. Non-cube textures only use face 0.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct RedefinedLevels([TexLevelMask; CubeFace::COUNT]);

impl RedefinedLevels {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn face(&self, face: usize) -> TexLevelMask {
        self.0[face]
    }

    /// Records a redefinition of `index` and returns whether the backing image must be released
    /// now: only for an incompatible redefinition of the single level of a non-cube image.
    ///
    /// Levels outside the allocated image are free to take any format and are not tracked.
    #[allow(clippy::too_many_arguments)]
    pub fn redefine_level(
        &mut self,
        allocation: TextureLevelAllocation,
        definition: TextureLevelDefinition,
        immutable_format: bool,
        level_count: u32,
        layer_index: u32,
        index: &ImageIndex,
        first_allocated_level: u32,
    ) -> bool {
        let compatible = allocation == TextureLevelAllocation::WithinAllocatedImage
            && definition == TextureLevelDefinition::Compatible;
        let is_cube_map = index.ty == TextureType::CubeMap;

        if allocation == TextureLevelAllocation::WithinAllocatedImage {
            debug_assert!(
                compatible || !immutable_format,
                "immutable textures cannot be redefined"
            );
            let face = if is_cube_map { layer_index as usize } else { 0 };
            self.0[face].set(index.level, !compatible);
        }

        let single_level_update = level_count == 1 && first_allocated_level == index.level;
        !compatible && single_level_update && !is_cube_map
    }

    /// Mipmap generation rewrote levels `first_generated_level..=max_level`, which are compatible
    /// again on every face.
    pub fn clear_generated_mipmap_levels(
        &mut self,
        base_level: u32,
        max_level: u32,
        first_generated_level: u32,
    ) {
        debug_assert!(base_level <= first_generated_level);
        let generated = TexLevelMask::low_levels(max_level.saturating_add(1))
            & !TexLevelMask::low_levels(first_generated_level);
        for face in &mut self.0 {
            face.0 &= !generated;
        }
    }

    pub fn any_redefined(&self) -> bool {
        self.0.iter().any(|face| face.any())
    }

    /// For cube maps a level counts as redefined when any face redefined it.
    pub fn is_level_redefined(&self, ty: TextureType, level: u32) -> bool {
        let mut redefined = self.0[0];
        if ty == TextureType::CubeMap {
            for face in &self.0[1..] {
                redefined.0 |= face.0;
            }
        }
        redefined.test(level)
    }
}
