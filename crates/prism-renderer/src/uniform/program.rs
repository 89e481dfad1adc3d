use super::block::{
    read_from_buffer_with_layout, update_buffer_with_layout, DefaultUniformBlock, UniformLayout,
};
use super::matrix::{set_float_uniform_matrix_packed, MatrixPacking};
use super::{ComponentType, ShaderBitSet, ShaderType, UniformScalar, VariableType};

const BOOL_BYTES: usize = std::mem::size_of::<i32>();

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkedUniform {
    pub name: String,
    pub ty: VariableType,
    /// `0` for non-arrays.
    pub array_size: u32,
    pub active_stages: ShaderBitSet,
}

impl LinkedUniform {
    pub fn new(
        name: impl Into<String>,
        ty: VariableType,
        array_size: u32,
        active_stages: ShaderBitSet,
    ) -> Self {
        Self {
            name: name.into(),
            ty,
            array_size,
            active_stages,
        }
    }

    pub fn element_components(&self) -> usize {
        self.ty.component_count()
    }

    pub fn basic_type_element_count(&self) -> u32 {
        self.array_size.max(1)
    }

    pub fn first_active_shader_type(&self) -> Option<ShaderType> {
        self.active_stages.stages().next()
    }
}

/// Maps a uniform location to its uniform and array element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct VariableLocation {
    pub index: u32,
    pub array_index: u32,
}

/// Uniform metadata of a linked program.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UniformTable {
    pub uniforms: Vec<LinkedUniform>,
    pub locations: Vec<VariableLocation>,
    pub linked_stages: ShaderBitSet,
}

impl UniformTable {
    fn resolve(&self, location: usize) -> (VariableLocation, &LinkedUniform) {
        let loc = self.locations[location];
        (loc, &self.uniforms[loc.index as usize])
    }
}

/// Default uniform blocks of every linked stage plus the stages written since the last
/// [`DefaultUniformBlocks::take_dirty`].
#[derive(Debug, Clone, Default)]
pub struct DefaultUniformBlocks {
    blocks: [Option<DefaultUniformBlock>; ShaderType::COUNT],
    dirty: ShaderBitSet,
}

impl DefaultUniformBlocks {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, stage: ShaderType, block: DefaultUniformBlock) {
        self.blocks[stage.index()] = Some(block);
    }

    pub fn get(&self, stage: ShaderType) -> Option<&DefaultUniformBlock> {
        self.blocks[stage.index()].as_ref()
    }

    pub fn get_mut(&mut self, stage: ShaderType) -> Option<&mut DefaultUniformBlock> {
        self.blocks[stage.index()].as_mut()
    }

    pub fn dirty(&self) -> ShaderBitSet {
        self.dirty
    }

    pub fn take_dirty(&mut self) -> ShaderBitSet {
        std::mem::take(&mut self.dirty)
    }

    /// Calls `write` with the block and layout of every linked stage that uses `location`,
    /// marking those stages dirty.
    fn for_each_used_stage(
        &mut self,
        linked_stages: ShaderBitSet,
        location: usize,
        mut write: impl FnMut(&mut DefaultUniformBlock, UniformLayout),
    ) {
        for stage in linked_stages.stages() {
            let Some(block) = self.blocks[stage.index()].as_mut() else {
                continue;
            };
            let layout = block.layout_for(location);
            if layout.is_unused() {
                continue;
            }
            write(block, layout);
            self.dirty |= stage.bit();
        }
    }
}

/// `glUniform*{i,ui,f}v`: writes `count` elements for `location` into every stage using it.
///
/// When the uniform is declared boolean but written through a numeric entry point, every
/// component is stored as `0`/`1` (`i32`).
pub fn set_uniform<T: UniformScalar>(
    table: &UniformTable,
    location: usize,
    count: usize,
    values: &[T],
    entry_point_type: VariableType,
    blocks: &mut DefaultUniformBlocks,
) {
    let (loc, uniform) = table.resolve(location);
    let components = uniform.element_components();

    if uniform.ty == entry_point_type {
        blocks.for_each_used_stage(table.linked_stages, location, |block, layout| {
            update_buffer_with_layout(
                count,
                loc.array_index,
                components,
                values,
                &layout,
                &mut block.data,
            );
        });
        return;
    }

    debug_assert_eq!(uniform.ty, entry_point_type.bool_vector_type());
    blocks.for_each_used_stage(table.linked_stages, location, |block, layout| {
        set_uniform_as_bool(count, loc.array_index, components, values, &layout, &mut block.data);
    });
}

fn set_uniform_as_bool<T: UniformScalar>(
    count: usize,
    array_index: u32,
    components: usize,
    values: &[T],
    layout: &UniformLayout,
    data: &mut [u8],
) {
    let stride = layout.effective_stride(components * BOOL_BYTES);
    let base = layout.offset as usize + array_index as usize * stride;
    for (i, element) in values.chunks_exact(components).take(count).enumerate() {
        let at = base + i * stride;
        for (c, value) in element.iter().enumerate() {
            let flag = i32::from(*value != T::default());
            let dst = at + c * BOOL_BYTES;
            data[dst..dst + BOOL_BYTES].copy_from_slice(bytemuck::bytes_of(&flag));
        }
    }
}

/// `glUniformMatrix{cols}x{rows}fv`.
#[allow(clippy::too_many_arguments)]
pub fn set_uniform_matrix_fv(
    table: &UniformTable,
    location: usize,
    packing: MatrixPacking,
    cols: usize,
    rows: usize,
    count: usize,
    transpose: bool,
    values: &[f32],
    blocks: &mut DefaultUniformBlocks,
) {
    let (loc, uniform) = table.resolve(location);
    let element_count = uniform.basic_type_element_count();
    blocks.for_each_used_stage(table.linked_stages, location, |block, layout| {
        set_float_uniform_matrix_packed(
            packing,
            cols,
            rows,
            loc.array_index,
            element_count,
            count,
            transpose,
            values,
            &mut block.data[layout.offset as usize..],
        );
    });
}

/// `glGetUniform*v`: reads `location` back from the first stage that uses the uniform.
///
/// Matrices are unpacked from the backend's `packing` into tightly packed column-major `out`.
/// Boolean uniforms read back as `0`/`1` of the requested type.
pub fn get_uniform<T: UniformScalar>(
    table: &UniformTable,
    location: usize,
    out: &mut [T],
    entry_point_type: VariableType,
    packing: MatrixPacking,
    blocks: &DefaultUniformBlocks,
) {
    let (loc, uniform) = table.resolve(location);
    debug_assert!(
        uniform.ty.component == entry_point_type.component
            || uniform.ty.component == ComponentType::Bool,
        "{:?} read through {:?}",
        uniform.ty,
        entry_point_type
    );
    let Some(stage) = uniform.first_active_shader_type() else {
        return;
    };
    let Some(block) = blocks.get(stage) else {
        return;
    };
    let layout = block.layout_for(location);
    let components = uniform.element_components();

    if uniform.ty.is_matrix() {
        let (cols, rows) = (uniform.ty.columns as usize, uniform.ty.rows as usize);
        // (padded vectors, live components of the last vector, row-major)
        let (vectors, last, transpose) = match packing {
            MatrixPacking::Glsl => (cols, rows, false),
            MatrixPacking::Hlsl => (rows, cols, true),
        };
        let padded_bytes = vectors * 4 * std::mem::size_of::<T>();
        let stride = layout.effective_stride(padded_bytes);
        let at = layout.offset as usize + loc.array_index as usize * stride;
        // The last vector's padding may not be present; read only what the layout covers.
        let stored = (vectors - 1) * 4 + last;
        let mut staging = [T::default(); 16];
        let staging_bytes: &mut [u8] = bytemuck::cast_slice_mut(&mut staging[..stored]);
        let len = staging_bytes.len();
        staging_bytes.copy_from_slice(&block.data[at..at + len]);
        T::get_matrix_uniform(cols, rows, out, &staging, transpose);
        return;
    }

    if uniform.ty.component == ComponentType::Bool && T::COMPONENT != ComponentType::Int {
        let mut flags = [0i32; 4];
        read_from_buffer_with_layout(
            loc.array_index,
            &mut flags[..components],
            &layout,
            &block.data,
        );
        for (dst, flag) in out.iter_mut().zip(&flags[..components]) {
            *dst = T::from_bool(*flag != 0);
        }
        return;
    }

    read_from_buffer_with_layout(loc.array_index, &mut out[..components], &layout, &block.data);
}
