//! Default-uniform-block shadowing: typed uniform writes and reads against per-stage byte
//! buffers, including matrix padding and boolean coercion.

use bitflags::bitflags;
use bytemuck::Pod;

pub mod block;
pub mod matrix;
mod program;

pub use block::{
    read_from_buffer_with_layout, update_buffer_with_layout, DefaultUniformBlock, UniformLayout,
};
pub use matrix::{MatrixPacking, MatrixShape};
pub use program::{
    get_uniform, set_uniform, set_uniform_matrix_fv, DefaultUniformBlocks, LinkedUniform,
    UniformTable, VariableLocation,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShaderType {
    Vertex,
    TessControl,
    TessEvaluation,
    Geometry,
    Fragment,
    Compute,
}

bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct ShaderBitSet: u8 {
        const VERTEX = 1 << 0;
        const TESS_CONTROL = 1 << 1;
        const TESS_EVALUATION = 1 << 2;
        const GEOMETRY = 1 << 3;
        const FRAGMENT = 1 << 4;
        const COMPUTE = 1 << 5;
    }
}

impl ShaderType {
    pub const COUNT: usize = 6;
    /// Pipeline order.
    pub const ALL: [ShaderType; Self::COUNT] = [
        ShaderType::Vertex,
        ShaderType::TessControl,
        ShaderType::TessEvaluation,
        ShaderType::Geometry,
        ShaderType::Fragment,
        ShaderType::Compute,
    ];

    pub const fn index(self) -> usize {
        self as usize
    }

    pub const fn bit(self) -> ShaderBitSet {
        match self {
            ShaderType::Vertex => ShaderBitSet::VERTEX,
            ShaderType::TessControl => ShaderBitSet::TESS_CONTROL,
            ShaderType::TessEvaluation => ShaderBitSet::TESS_EVALUATION,
            ShaderType::Geometry => ShaderBitSet::GEOMETRY,
            ShaderType::Fragment => ShaderBitSet::FRAGMENT,
            ShaderType::Compute => ShaderBitSet::COMPUTE,
        }
    }
}

impl ShaderBitSet {
    /// Member stages in pipeline order.
    pub fn stages(self) -> impl Iterator<Item = ShaderType> {
        ShaderType::ALL.into_iter().filter(move |s| self.contains(s.bit()))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ComponentType {
    Float,
    Int,
    Uint,
    Bool,
}

/// Shape and component type of a uniform: scalars and vectors have one row, matrices more.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct VariableType {
    pub component: ComponentType,
    pub columns: u8,
    pub rows: u8,
}

impl VariableType {
    pub const fn vector(component: ComponentType, size: u8) -> Self {
        Self {
            component,
            columns: size,
            rows: 1,
        }
    }

    pub const fn scalar(component: ComponentType) -> Self {
        Self::vector(component, 1)
    }

    pub const fn float_matrix(columns: u8, rows: u8) -> Self {
        Self {
            component: ComponentType::Float,
            columns,
            rows,
        }
    }

    pub const fn component_count(&self) -> usize {
        self.columns as usize * self.rows as usize
    }

    pub const fn is_matrix(&self) -> bool {
        self.rows > 1
    }

    /// The boolean type of the same shape (`ivec3` -> `bvec3`).
    pub const fn bool_vector_type(self) -> Self {
        Self {
            component: ComponentType::Bool,
            ..self
        }
    }
}

/// Element type accepted by the uniform entry points.
pub trait UniformScalar: Pod + PartialEq + Default + std::fmt::Debug {
    const COMPONENT: ComponentType;

    fn from_bool(value: bool) -> Self;

    /// Un-pads a stored matrix; see [`matrix::get_matrix_uniform`].
    fn get_matrix_uniform(
        cols: usize,
        rows: usize,
        out: &mut [Self],
        source: &[Self],
        transpose: bool,
    );
}

impl UniformScalar for f32 {
    const COMPONENT: ComponentType = ComponentType::Float;

    fn from_bool(value: bool) -> Self {
        if value {
            1.0
        } else {
            0.0
        }
    }

    fn get_matrix_uniform(
        cols: usize,
        rows: usize,
        out: &mut [Self],
        source: &[Self],
        transpose: bool,
    ) {
        matrix::get_matrix_uniform(cols, rows, out, source, transpose);
    }
}

impl UniformScalar for i32 {
    const COMPONENT: ComponentType = ComponentType::Int;

    fn from_bool(value: bool) -> Self {
        value as i32
    }

    fn get_matrix_uniform(_: usize, _: usize, _: &mut [Self], _: &[Self], _: bool) {
        unreachable!("integer matrix uniforms do not exist");
    }
}

impl UniformScalar for u32 {
    const COMPONENT: ComponentType = ComponentType::Uint;

    fn from_bool(value: bool) -> Self {
        value as u32
    }

    fn get_matrix_uniform(_: usize, _: usize, _: &mut [Self], _: &[Self], _: bool) {
        unreachable!("unsigned matrix uniforms do not exist");
    }
}
