//! Multi-draw emulation on top of single-draw backends.
//!
//! Every `multi_draw_*` entry point funnels into one loop that writes the emulated draw ID,
//! base vertex and base instance uniforms the linked program depends on, skips no-op draws
//! and resets the emulated uniforms once the batch is over.

use tracing::trace;

use crate::RendererError;

pub mod indirect;
pub mod line_loop;
pub mod vertex_range;

pub use indirect::{DrawArraysIndirectCommand, DrawElementsIndirectCommand, IndirectCommand};
pub use line_loop::{line_loop_index_count, stream_emulated_line_loop_indices};
pub use vertex_range::{compute_start_vertex, get_vertex_range_info, IndexRange};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PrimitiveMode {
    Points,
    Lines,
    LineLoop,
    LineStrip,
    Triangles,
    TriangleStrip,
    TriangleFan,
    LinesAdjacency,
    LineStripAdjacency,
    TrianglesAdjacency,
    TriangleStripAdjacency,
    Patches,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DrawElementsType {
    UnsignedByte,
    UnsignedShort,
    UnsignedInt,
}

impl DrawElementsType {
    pub const fn bytes(self) -> usize {
        match self {
            DrawElementsType::UnsignedByte => 1,
            DrawElementsType::UnsignedShort => 2,
            DrawElementsType::UnsignedInt => 4,
        }
    }

    /// The fixed primitive-restart index: the type's maximum value.
    pub const fn restart_index(self) -> u32 {
        match self {
            DrawElementsType::UnsignedByte => u8::MAX as u32,
            DrawElementsType::UnsignedShort => u16::MAX as u32,
            DrawElementsType::UnsignedInt => u32::MAX,
        }
    }
}

/// Single-draw submission. `indices` is a byte offset into the bound element array buffer.
pub trait DrawBackend {
    fn draw_arrays(
        &mut self,
        mode: PrimitiveMode,
        first: i32,
        count: i32,
    ) -> Result<(), RendererError>;

    fn draw_arrays_instanced(
        &mut self,
        mode: PrimitiveMode,
        first: i32,
        count: i32,
        instance_count: i32,
    ) -> Result<(), RendererError>;

    fn draw_elements(
        &mut self,
        mode: PrimitiveMode,
        count: i32,
        ty: DrawElementsType,
        indices: usize,
    ) -> Result<(), RendererError>;

    fn draw_elements_instanced(
        &mut self,
        mode: PrimitiveMode,
        count: i32,
        ty: DrawElementsType,
        indices: usize,
        instance_count: i32,
    ) -> Result<(), RendererError>;

    fn draw_arrays_instanced_base_instance(
        &mut self,
        mode: PrimitiveMode,
        first: i32,
        count: i32,
        instance_count: i32,
        base_instance: u32,
    ) -> Result<(), RendererError>;

    #[allow(clippy::too_many_arguments)]
    fn draw_elements_instanced_base_vertex_base_instance(
        &mut self,
        mode: PrimitiveMode,
        count: i32,
        ty: DrawElementsType,
        indices: usize,
        instance_count: i32,
        base_vertex: i32,
        base_instance: u32,
    ) -> Result<(), RendererError>;

    fn draw_arrays_indirect(
        &mut self,
        mode: PrimitiveMode,
        command: &DrawArraysIndirectCommand,
    ) -> Result<(), RendererError>;

    fn draw_elements_indirect(
        &mut self,
        mode: PrimitiveMode,
        ty: DrawElementsType,
        command: &DrawElementsIndirectCommand,
    ) -> Result<(), RendererError>;

    /// A draw in a batch had nothing to draw.
    fn handle_noop_draw_event(&mut self) -> Result<(), RendererError>;

    /// No draw in a batch had anything to draw.
    fn handle_noop_multi_draw_event(&mut self) -> Result<(), RendererError>;
}

/// Emulated built-in uniforms of the linked program.
pub trait EmulatedDrawUniforms {
    fn has_draw_id_uniform(&self) -> bool;
    fn has_base_vertex_uniform(&self) -> bool;
    fn has_base_instance_uniform(&self) -> bool;

    fn set_draw_id_uniform(&mut self, draw_id: i32);
    fn set_base_vertex_uniform(&mut self, base_vertex: i32);
    fn set_base_instance_uniform(&mut self, base_instance: u32);
}

/// Which emulated uniforms a batch writes before each draw.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EmulatedUniformUsage {
    pub draw_id: bool,
    pub base_vertex: bool,
    pub base_instance: bool,
}

impl EmulatedUniformUsage {
    /// Queries the program; base vertex/instance are only considered when the draw kind
    /// carries them.
    pub fn query<U: EmulatedDrawUniforms + ?Sized>(
        uniforms: &U,
        base_vertex: bool,
        base_instance: bool,
    ) -> Self {
        Self {
            draw_id: uniforms.has_draw_id_uniform(),
            base_vertex: base_vertex && uniforms.has_base_vertex_uniform(),
            base_instance: base_instance && uniforms.has_base_instance_uniform(),
        }
    }
}

/// Writes the per-draw emulated uniforms and zeroes every one of them when dropped, so draws
/// outside the batch never observe stale values.
pub struct ResetEmulatedUniforms<'a, U: EmulatedDrawUniforms + ?Sized> {
    uniforms: &'a mut U,
    usage: EmulatedUniformUsage,
}

impl<'a, U: EmulatedDrawUniforms + ?Sized> ResetEmulatedUniforms<'a, U> {
    pub fn new(uniforms: &'a mut U, usage: EmulatedUniformUsage) -> Self {
        Self { uniforms, usage }
    }

    pub fn apply(&mut self, draw_id: i32, base_vertex: i32, base_instance: u32) {
        if self.usage.draw_id {
            self.uniforms.set_draw_id_uniform(draw_id);
        }
        if self.usage.base_vertex {
            self.uniforms.set_base_vertex_uniform(base_vertex);
        }
        if self.usage.base_instance {
            self.uniforms.set_base_instance_uniform(base_instance);
        }
    }
}

impl<U: EmulatedDrawUniforms + ?Sized> Drop for ResetEmulatedUniforms<'_, U> {
    fn drop(&mut self) {
        self.apply(0, 0, 0);
    }
}

/// Per-draw parameter arrays shared by every direct multi-draw kind.
#[derive(Debug, Clone, Copy, Default)]
struct DrawArrays<'a> {
    counts: &'a [i32],
    instance_counts: Option<&'a [i32]>,
    base_vertices: Option<&'a [i32]>,
    base_instances: Option<&'a [u32]>,
}

impl DrawArrays<'_> {
    fn is_noop(&self, draw: usize) -> bool {
        self.counts[draw] == 0 || self.instance_counts.is_some_and(|c| c[draw] == 0)
    }

    fn base_vertex(&self, draw: usize) -> i32 {
        self.base_vertices.map_or(0, |b| b[draw])
    }

    fn base_instance(&self, draw: usize) -> u32 {
        self.base_instances.map_or(0, |b| b[draw])
    }
}

fn multi_draw<B, U>(
    backend: &mut B,
    uniforms: &mut U,
    usage: EmulatedUniformUsage,
    arrays: DrawArrays<'_>,
    mut draw: impl FnMut(&mut B, usize) -> Result<(), RendererError>,
) -> Result<(), RendererError>
where
    B: DrawBackend + ?Sized,
    U: EmulatedDrawUniforms + ?Sized,
{
    let draw_count = arrays.counts.len();
    let mut uniforms = ResetEmulatedUniforms::new(uniforms, usage);

    if (0..draw_count).all(|i| arrays.is_noop(i)) {
        trace!(draw_count, "multi-draw: every draw is a no-op");
        return backend.handle_noop_multi_draw_event();
    }

    for i in 0..draw_count {
        if arrays.is_noop(i) {
            backend.handle_noop_draw_event()?;
            continue;
        }
        uniforms.apply(i as i32, arrays.base_vertex(i), arrays.base_instance(i));
        draw(&mut *backend, i)?;
    }
    Ok(())
}

pub fn multi_draw_arrays<B, U>(
    backend: &mut B,
    uniforms: &mut U,
    mode: PrimitiveMode,
    firsts: &[i32],
    counts: &[i32],
) -> Result<(), RendererError>
where
    B: DrawBackend + ?Sized,
    U: EmulatedDrawUniforms + ?Sized,
{
    debug_assert_eq!(firsts.len(), counts.len());
    let usage = EmulatedUniformUsage::query(uniforms, false, false);
    let arrays = DrawArrays {
        counts,
        ..DrawArrays::default()
    };
    multi_draw(backend, uniforms, usage, arrays, |b, i| b.draw_arrays(mode, firsts[i], counts[i]))
}

pub fn multi_draw_arrays_instanced<B, U>(
    backend: &mut B,
    uniforms: &mut U,
    mode: PrimitiveMode,
    firsts: &[i32],
    counts: &[i32],
    instance_counts: &[i32],
) -> Result<(), RendererError>
where
    B: DrawBackend + ?Sized,
    U: EmulatedDrawUniforms + ?Sized,
{
    debug_assert!(firsts.len() == counts.len() && instance_counts.len() == counts.len());
    let usage = EmulatedUniformUsage::query(uniforms, false, false);
    let arrays = DrawArrays {
        counts,
        instance_counts: Some(instance_counts),
        ..DrawArrays::default()
    };
    multi_draw(backend, uniforms, usage, arrays, |b, i| {
        b.draw_arrays_instanced(mode, firsts[i], counts[i], instance_counts[i])
    })
}

pub fn multi_draw_elements<B, U>(
    backend: &mut B,
    uniforms: &mut U,
    mode: PrimitiveMode,
    counts: &[i32],
    ty: DrawElementsType,
    indices: &[usize],
) -> Result<(), RendererError>
where
    B: DrawBackend + ?Sized,
    U: EmulatedDrawUniforms + ?Sized,
{
    debug_assert_eq!(indices.len(), counts.len());
    let usage = EmulatedUniformUsage::query(uniforms, false, false);
    let arrays = DrawArrays {
        counts,
        ..DrawArrays::default()
    };
    multi_draw(backend, uniforms, usage, arrays, |b, i| {
        b.draw_elements(mode, counts[i], ty, indices[i])
    })
}

pub fn multi_draw_elements_instanced<B, U>(
    backend: &mut B,
    uniforms: &mut U,
    mode: PrimitiveMode,
    counts: &[i32],
    ty: DrawElementsType,
    indices: &[usize],
    instance_counts: &[i32],
) -> Result<(), RendererError>
where
    B: DrawBackend + ?Sized,
    U: EmulatedDrawUniforms + ?Sized,
{
    debug_assert!(indices.len() == counts.len() && instance_counts.len() == counts.len());
    let usage = EmulatedUniformUsage::query(uniforms, false, false);
    let arrays = DrawArrays {
        counts,
        instance_counts: Some(instance_counts),
        ..DrawArrays::default()
    };
    multi_draw(backend, uniforms, usage, arrays, |b, i| {
        b.draw_elements_instanced(mode, counts[i], ty, indices[i], instance_counts[i])
    })
}

#[allow(clippy::too_many_arguments)]
pub fn multi_draw_arrays_instanced_base_instance<B, U>(
    backend: &mut B,
    uniforms: &mut U,
    mode: PrimitiveMode,
    firsts: &[i32],
    counts: &[i32],
    instance_counts: &[i32],
    base_instances: &[u32],
) -> Result<(), RendererError>
where
    B: DrawBackend + ?Sized,
    U: EmulatedDrawUniforms + ?Sized,
{
    debug_assert!(
        firsts.len() == counts.len()
            && instance_counts.len() == counts.len()
            && base_instances.len() == counts.len()
    );
    let usage = EmulatedUniformUsage::query(uniforms, false, true);
    let arrays = DrawArrays {
        counts,
        instance_counts: Some(instance_counts),
        base_instances: Some(base_instances),
        ..DrawArrays::default()
    };
    multi_draw(backend, uniforms, usage, arrays, |b, i| {
        b.draw_arrays_instanced_base_instance(
            mode,
            firsts[i],
            counts[i],
            instance_counts[i],
            base_instances[i],
        )
    })
}

#[allow(clippy::too_many_arguments)]
pub fn multi_draw_elements_instanced_base_vertex_base_instance<B, U>(
    backend: &mut B,
    uniforms: &mut U,
    mode: PrimitiveMode,
    counts: &[i32],
    ty: DrawElementsType,
    indices: &[usize],
    instance_counts: &[i32],
    base_vertices: &[i32],
    base_instances: &[u32],
) -> Result<(), RendererError>
where
    B: DrawBackend + ?Sized,
    U: EmulatedDrawUniforms + ?Sized,
{
    debug_assert!(
        indices.len() == counts.len()
            && instance_counts.len() == counts.len()
            && base_vertices.len() == counts.len()
            && base_instances.len() == counts.len()
    );
    let usage = EmulatedUniformUsage::query(uniforms, true, true);
    let arrays = DrawArrays {
        counts,
        instance_counts: Some(instance_counts),
        base_vertices: Some(base_vertices),
        base_instances: Some(base_instances),
    };
    multi_draw(backend, uniforms, usage, arrays, |b, i| {
        b.draw_elements_instanced_base_vertex_base_instance(
            mode,
            counts[i],
            ty,
            indices[i],
            instance_counts[i],
            base_vertices[i],
            base_instances[i],
        )
    })
}

/// Issues `draw_count` indirect draws from records starting at byte `offset` of `buffer`,
/// `stride` bytes apart (`0` means tightly packed).
pub fn multi_draw_arrays_indirect<B: DrawBackend + ?Sized>(
    backend: &mut B,
    mode: PrimitiveMode,
    buffer: &[u8],
    offset: usize,
    draw_count: usize,
    stride: usize,
) -> Result<(), RendererError> {
    for i in 0..draw_count {
        let at = record_position::<DrawArraysIndirectCommand>(offset, i, stride)?;
        let command = DrawArraysIndirectCommand::read_at(buffer, at)?;
        backend.draw_arrays_indirect(mode, &command)?;
    }
    Ok(())
}

/// Element variant of [`multi_draw_arrays_indirect`].
pub fn multi_draw_elements_indirect<B: DrawBackend + ?Sized>(
    backend: &mut B,
    mode: PrimitiveMode,
    ty: DrawElementsType,
    buffer: &[u8],
    offset: usize,
    draw_count: usize,
    stride: usize,
) -> Result<(), RendererError> {
    for i in 0..draw_count {
        let at = record_position::<DrawElementsIndirectCommand>(offset, i, stride)?;
        let command = DrawElementsIndirectCommand::read_at(buffer, at)?;
        backend.draw_elements_indirect(mode, ty, &command)?;
    }
    Ok(())
}

fn record_position<C: IndirectCommand>(
    offset: usize,
    index: usize,
    stride: usize,
) -> Result<usize, RendererError> {
    indirect::record_offset::<C>(index, stride)?
        .checked_add(offset)
        .ok_or(RendererError::IntegerOverflow("indirect record offset"))
}
