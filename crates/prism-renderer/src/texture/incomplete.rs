//! Per-context cache of 1x1 placeholder textures bound in place of incomplete textures.

use prism_format::{Format, PixelFormatId};
use tracing::{debug, warn};

use super::{CompareMode, CubeFace, SamplerFormat, TextureTarget, TextureType};
use crate::geometry::{Box3, Extents};
use crate::RendererError;

/// Cube map arrays need a layer count that is a multiple of 6.
const CUBE_MAP_ARRAY_LAYERS: i32 = 6;

struct IncompleteTextureParameters {
    format: PixelFormatId,
    /// Leading `pixel_bytes` of `format` make up one texel.
    clear_color: [u8; 4],
}

impl IncompleteTextureParameters {
    fn texel(&self) -> &[u8] {
        &self.clear_color[..Format::get(self.format).pixel_bytes as usize]
    }
}

/// Indexed by [`SamplerFormat::index`].
const INCOMPLETE_TEXTURE_PARAMETERS: [IncompleteTextureParameters; SamplerFormat::COUNT] = [
    IncompleteTextureParameters {
        format: PixelFormatId::R8G8B8A8Unorm,
        clear_color: [0, 0, 0, 255],
    },
    IncompleteTextureParameters {
        format: PixelFormatId::R8G8B8A8Uint,
        clear_color: [0, 0, 0, 255],
    },
    IncompleteTextureParameters {
        format: PixelFormatId::R8G8B8A8Sint,
        clear_color: [0, 0, 0, 127],
    },
    IncompleteTextureParameters {
        format: PixelFormatId::D16Unorm,
        clear_color: [0, 0, 0, 0],
    },
];

/// Texture and buffer operations the cache needs from the backend.
pub trait TextureBackend {
    type Texture;
    type Buffer;

    fn create_texture(&mut self, ty: TextureType) -> Result<Self::Texture, RendererError>;
    fn create_buffer(&mut self, data: &[u8]) -> Result<Self::Buffer, RendererError>;

    fn set_storage(
        &mut self,
        texture: &mut Self::Texture,
        ty: TextureType,
        levels: u32,
        format: PixelFormatId,
        size: Extents,
    ) -> Result<(), RendererError>;

    #[allow(clippy::too_many_arguments)]
    fn set_storage_multisample(
        &mut self,
        texture: &mut Self::Texture,
        ty: TextureType,
        samples: u32,
        format: PixelFormatId,
        size: Extents,
        fixed_sample_locations: bool,
    ) -> Result<(), RendererError>;

    /// Uploads tightly packed `pixels` (unpack alignment 1) into `area` of `level`.
    fn set_sub_image(
        &mut self,
        texture: &mut Self::Texture,
        target: TextureTarget,
        level: u32,
        area: Box3,
        format: PixelFormatId,
        pixels: &[u8],
    ) -> Result<(), RendererError>;

    /// Attaches `buffer` as the storage of a buffer texture; the texture owns it from now on.
    fn set_buffer(
        &mut self,
        texture: &mut Self::Texture,
        buffer: Self::Buffer,
        format: PixelFormatId,
    ) -> Result<(), RendererError>;

    fn set_compare_mode(&mut self, texture: &mut Self::Texture, mode: CompareMode);

    /// Excludes the texture from resource accounting.
    fn mark_internal_incomplete_texture(&mut self, texture: &mut Self::Texture);

    fn sync_state(&mut self, texture: &mut Self::Texture) -> Result<(), RendererError>;

    fn release_texture(&mut self, texture: Self::Texture);
}

pub trait MultisampleTextureInitializer<B: TextureBackend + ?Sized> {
    /// Clears every sample of `texture` to opaque black.
    fn initialize_multisample_texture_to_black(
        &mut self,
        backend: &mut B,
        texture: &mut B::Texture,
    ) -> Result<(), RendererError>;
}

/// Placeholder textures per sampler format and texture type, created on first use.
///
/// [`IncompleteTextureSet::on_destroy`] must run before the set is dropped so the backend can
/// release the textures.
pub struct IncompleteTextureSet<B: TextureBackend + ?Sized> {
    textures: [[Option<B::Texture>; TextureType::COUNT]; SamplerFormat::COUNT],
}

impl<B: TextureBackend + ?Sized> IncompleteTextureSet<B> {
    pub fn new() -> Self {
        Self {
            textures: std::array::from_fn(|_| std::array::from_fn(|_| None)),
        }
    }

    pub fn contains(&self, ty: TextureType, format: SamplerFormat) -> bool {
        self.textures[format.index()][ty.index()].is_some()
    }

    /// Returns the placeholder for `(ty, format)`, creating it on first request.
    ///
    /// `ms_initializer` is required for multisample types. On failure nothing is cached and any
    /// partially built texture is released.
    pub fn get_incomplete_texture(
        &mut self,
        backend: &mut B,
        ty: TextureType,
        format: SamplerFormat,
        ms_initializer: Option<&mut dyn MultisampleTextureInitializer<B>>,
    ) -> Result<&B::Texture, RendererError> {
        let slot = &mut self.textures[format.index()][ty.index()];
        let texture = match slot.take() {
            Some(texture) => texture,
            None => {
                let texture = create_incomplete_texture(backend, ty, format, ms_initializer)?;
                debug!(?ty, ?format, "created incomplete texture");
                texture
            }
        };
        Ok(slot.insert(texture))
    }

    /// Releases every cached texture exactly once.
    pub fn on_destroy(&mut self, backend: &mut B) {
        let mut released = 0;
        for texture in self.textures.iter_mut().flatten().filter_map(Option::take) {
            backend.release_texture(texture);
            released += 1;
        }
        if released > 0 {
            debug!(released, "released incomplete textures");
        }
    }
}

impl<B: TextureBackend + ?Sized> Default for IncompleteTextureSet<B> {
    fn default() -> Self {
        Self::new()
    }
}

impl<B: TextureBackend + ?Sized> Drop for IncompleteTextureSet<B> {
    fn drop(&mut self) {
        let leaked = self.textures.iter().flatten().filter(|t| t.is_some()).count();
        if leaked > 0 {
            warn!(leaked, "incomplete texture set dropped without on_destroy");
        }
    }
}

fn create_incomplete_texture<B: TextureBackend + ?Sized>(
    backend: &mut B,
    ty: TextureType,
    format: SamplerFormat,
    ms_initializer: Option<&mut dyn MultisampleTextureInitializer<B>>,
) -> Result<B::Texture, RendererError> {
    // External textures are sampled like 2D ones.
    let create_type = if ty == TextureType::External { TextureType::D2 } else { ty };
    let mut texture = backend.create_texture(create_type)?;
    match initialize_incomplete_texture(
        backend,
        &mut texture,
        ty,
        create_type,
        format,
        ms_initializer,
    ) {
        Ok(()) => Ok(texture),
        Err(err) => {
            backend.release_texture(texture);
            Err(err)
        }
    }
}

fn initialize_incomplete_texture<B: TextureBackend + ?Sized>(
    backend: &mut B,
    texture: &mut B::Texture,
    ty: TextureType,
    create_type: TextureType,
    format: SamplerFormat,
    ms_initializer: Option<&mut dyn MultisampleTextureInitializer<B>>,
) -> Result<(), RendererError> {
    let params = &INCOMPLETE_TEXTURE_PARAMETERS[format.index()];
    let depth = if ty == TextureType::CubeMapArray { CUBE_MAP_ARRAY_LAYERS } else { 1 };
    let size = Extents::new(1, 1, depth);
    let area = Box3::new(0, 0, 0, 1, 1, depth);

    let mut buffer = None;
    if create_type == TextureType::Buffer {
        buffer = Some(backend.create_buffer(&0u32.to_ne_bytes())?);
    } else if create_type.is_multisample() {
        backend.set_storage_multisample(texture, create_type, 1, params.format, size, true)?;
    } else {
        backend.set_storage(texture, create_type, 1, params.format, size)?;
    }
    backend.mark_internal_incomplete_texture(texture);

    match ty {
        TextureType::CubeMap => {
            for face in CubeFace::ALL {
                backend.set_sub_image(
                    texture,
                    TextureTarget::CubeMapFace(face),
                    0,
                    area,
                    params.format,
                    params.texel(),
                )?;
            }
        }
        TextureType::CubeMapArray => {
            let layers = params.texel().repeat(CUBE_MAP_ARRAY_LAYERS as usize);
            let target = TextureTarget::non_cube(create_type);
            backend.set_sub_image(texture, target, 0, area, params.format, &layers)?;
        }
        TextureType::D2Multisample | TextureType::D2MultisampleArray => {
            debug_assert!(ms_initializer.is_some(), "multisample placeholder needs an initializer");
            if let Some(initializer) = ms_initializer {
                initializer.initialize_multisample_texture_to_black(backend, texture)?;
            }
        }
        TextureType::Buffer => {
            if let Some(buffer) = buffer {
                backend.set_buffer(texture, buffer, params.format)?;
            }
        }
        _ => {
            backend.set_sub_image(
                texture,
                TextureTarget::non_cube(create_type),
                0,
                area,
                params.format,
                params.texel(),
            )?;
        }
    }

    if format == SamplerFormat::Shadow {
        backend.set_compare_mode(texture, CompareMode::CompareRefToTexture);
    }

    backend.sync_state(texture)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[derive(Debug, Clone, PartialEq, Eq)]
    enum Call {
        Create(TextureType),
        Buffer(Vec<u8>),
        Storage(TextureType, PixelFormatId, Extents),
        StorageMultisample(TextureType),
        SubImage(TextureTarget, Vec<u8>),
        SetBuffer,
        Compare(CompareMode),
        MarkInternal,
        Sync,
        Release(u32),
    }

    #[derive(Default)]
    struct Backend {
        calls: Vec<Call>,
        next_id: u32,
        fail_sync: bool,
    }

    impl TextureBackend for Backend {
        type Texture = u32;
        type Buffer = ();

        fn create_texture(&mut self, ty: TextureType) -> Result<u32, RendererError> {
            self.calls.push(Call::Create(ty));
            self.next_id += 1;
            Ok(self.next_id)
        }

        fn create_buffer(&mut self, data: &[u8]) -> Result<(), RendererError> {
            self.calls.push(Call::Buffer(data.to_vec()));
            Ok(())
        }

        fn set_storage(
            &mut self,
            _: &mut u32,
            ty: TextureType,
            _: u32,
            format: PixelFormatId,
            size: Extents,
        ) -> Result<(), RendererError> {
            self.calls.push(Call::Storage(ty, format, size));
            Ok(())
        }

        fn set_storage_multisample(
            &mut self,
            _: &mut u32,
            ty: TextureType,
            _: u32,
            _: PixelFormatId,
            _: Extents,
            _: bool,
        ) -> Result<(), RendererError> {
            self.calls.push(Call::StorageMultisample(ty));
            Ok(())
        }

        fn set_sub_image(
            &mut self,
            _: &mut u32,
            target: TextureTarget,
            _: u32,
            _: Box3,
            _: PixelFormatId,
            pixels: &[u8],
        ) -> Result<(), RendererError> {
            self.calls.push(Call::SubImage(target, pixels.to_vec()));
            Ok(())
        }

        fn set_buffer(
            &mut self,
            _: &mut u32,
            _: (),
            _: PixelFormatId,
        ) -> Result<(), RendererError> {
            self.calls.push(Call::SetBuffer);
            Ok(())
        }

        fn set_compare_mode(&mut self, _: &mut u32, mode: CompareMode) {
            self.calls.push(Call::Compare(mode));
        }

        fn mark_internal_incomplete_texture(&mut self, _: &mut u32) {
            self.calls.push(Call::MarkInternal);
        }

        fn sync_state(&mut self, _: &mut u32) -> Result<(), RendererError> {
            self.calls.push(Call::Sync);
            if self.fail_sync {
                return Err(RendererError::OutOfMemory);
            }
            Ok(())
        }

        fn release_texture(&mut self, texture: u32) {
            self.calls.push(Call::Release(texture));
        }
    }

    #[test]
    fn float_2d_placeholder_is_opaque_black_rgba8() {
        let mut backend = Backend::default();
        let mut set = IncompleteTextureSet::new();
        let texture = *set
            .get_incomplete_texture(&mut backend, TextureType::D2, SamplerFormat::Float, None)
            .unwrap();
        assert_eq!(texture, 1);
        assert_eq!(
            backend.calls,
            vec![
                Call::Create(TextureType::D2),
                Call::Storage(TextureType::D2, PixelFormatId::R8G8B8A8Unorm, Extents::new(1, 1, 1)),
                Call::MarkInternal,
                Call::SubImage(TextureTarget::Texture(TextureType::D2), vec![0, 0, 0, 255]),
                Call::Sync,
            ]
        );
        set.on_destroy(&mut backend);
    }

    #[test]
    fn cube_array_uploads_six_layers() {
        let mut backend = Backend::default();
        let mut set = IncompleteTextureSet::new();
        set.get_incomplete_texture(
            &mut backend,
            TextureType::CubeMapArray,
            SamplerFormat::Signed,
            None,
        )
        .unwrap();
        assert_eq!(
            backend.calls[1],
            Call::Storage(
                TextureType::CubeMapArray,
                PixelFormatId::R8G8B8A8Sint,
                Extents::new(1, 1, 6),
            )
        );
        let Call::SubImage(_, pixels) = &backend.calls[3] else {
            panic!("expected an upload, got {:?}", backend.calls[3]);
        };
        assert_eq!(pixels, &[0, 0, 0, 127].repeat(6));
        set.on_destroy(&mut backend);
    }

    #[test]
    fn shadow_cube_map_uploads_each_face_and_sets_compare_mode() {
        let mut backend = Backend::default();
        let mut set = IncompleteTextureSet::new();
        set.get_incomplete_texture(&mut backend, TextureType::CubeMap, SamplerFormat::Shadow, None)
            .unwrap();
        let faces = backend
            .calls
            .iter()
            .filter(|c| matches!(c, Call::SubImage(TextureTarget::CubeMapFace(_), _)))
            .count();
        assert_eq!(faces, 6);
        let n = backend.calls.len();
        assert_eq!(
            &backend.calls[n - 2..],
            &[Call::Compare(CompareMode::CompareRefToTexture), Call::Sync]
        );
        set.on_destroy(&mut backend);
    }

    #[test]
    fn shadow_uploads_are_sized_for_two_byte_depth() {
        let mut backend = Backend::default();
        let mut set = IncompleteTextureSet::new();
        set.get_incomplete_texture(&mut backend, TextureType::D2, SamplerFormat::Shadow, None)
            .unwrap();
        set.get_incomplete_texture(
            &mut backend,
            TextureType::CubeMapArray,
            SamplerFormat::Shadow,
            None,
        )
        .unwrap();
        let uploads: Vec<_> = backend
            .calls
            .iter()
            .filter_map(|c| match c {
                Call::SubImage(_, pixels) => Some(pixels.clone()),
                _ => None,
            })
            .collect();
        assert_eq!(uploads, vec![vec![0; 2], vec![0; 12]]);
        set.on_destroy(&mut backend);
    }

    #[test]
    fn external_is_created_as_2d_and_buffer_gets_zero_buffer() {
        let mut backend = Backend::default();
        let mut set = IncompleteTextureSet::new();
        set.get_incomplete_texture(&mut backend, TextureType::External, SamplerFormat::Float, None)
            .unwrap();
        assert_eq!(backend.calls[0], Call::Create(TextureType::D2));

        backend.calls.clear();
        set.get_incomplete_texture(&mut backend, TextureType::Buffer, SamplerFormat::Unsigned, None)
            .unwrap();
        assert_eq!(
            backend.calls,
            vec![
                Call::Create(TextureType::Buffer),
                Call::Buffer(vec![0; 4]),
                Call::MarkInternal,
                Call::SetBuffer,
                Call::Sync,
            ]
        );
        set.on_destroy(&mut backend);
    }

    #[test]
    fn multisample_uses_the_initializer() {
        struct Clear(usize);
        impl MultisampleTextureInitializer<Backend> for Clear {
            fn initialize_multisample_texture_to_black(
                &mut self,
                _: &mut Backend,
                _: &mut u32,
            ) -> Result<(), RendererError> {
                self.0 += 1;
                Ok(())
            }
        }

        let mut backend = Backend::default();
        let mut set = IncompleteTextureSet::new();
        let mut clear = Clear(0);
        set.get_incomplete_texture(
            &mut backend,
            TextureType::D2Multisample,
            SamplerFormat::Float,
            Some(&mut clear),
        )
        .unwrap();
        assert_eq!(clear.0, 1);
        assert_eq!(backend.calls[1], Call::StorageMultisample(TextureType::D2Multisample));
        assert!(!backend.calls.iter().any(|c| matches!(c, Call::SubImage(..))));
        set.on_destroy(&mut backend);
    }

    #[test]
    fn failed_creation_releases_and_caches_nothing() {
        let mut backend = Backend {
            fail_sync: true,
            ..Backend::default()
        };
        let mut set = IncompleteTextureSet::new();
        let err = set
            .get_incomplete_texture(&mut backend, TextureType::D3, SamplerFormat::Float, None)
            .unwrap_err();
        assert_eq!(err, RendererError::OutOfMemory);
        assert_eq!(backend.calls.last(), Some(&Call::Release(1)));
        assert!(!set.contains(TextureType::D3, SamplerFormat::Float));
    }
}
