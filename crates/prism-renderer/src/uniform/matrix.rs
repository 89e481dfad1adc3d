//! Matrix uniform packing between tightly packed client layout and padded backend layout.

/// Largest matrix any supported shader language declares (4x4).
pub const MAX_MATRIX_ELEMENTS: usize = 16;

const F32_BYTES: usize = std::mem::size_of::<f32>();

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MatrixShape {
    pub cols: usize,
    pub rows: usize,
    pub column_major: bool,
}

impl MatrixShape {
    pub const fn new(cols: usize, rows: usize, column_major: bool) -> Self {
        Self {
            cols,
            rows,
            column_major,
        }
    }

    pub const fn len(&self) -> usize {
        self.cols * self.rows
    }

    pub const fn is_empty(&self) -> bool {
        self.len() == 0
    }

    #[inline]
    pub const fn flat_index(&self, col: usize, row: usize) -> usize {
        if self.column_major {
            col * self.rows + row
        } else {
            row * self.cols + col
        }
    }
}

/// How a backend stores matrix uniforms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MatrixPacking {
    /// Column-major, every column padded to 4 rows.
    Glsl,
    /// Row-major, every row padded to 4 columns.
    Hlsl,
}

impl MatrixPacking {
    pub const fn destination_shape(self, cols: usize, rows: usize) -> MatrixShape {
        match self {
            MatrixPacking::Glsl => MatrixShape::new(cols, 4, true),
            MatrixPacking::Hlsl => MatrixShape::new(4, rows, false),
        }
    }
}

/// Expands one `src_shape` matrix into `dst` laid out as `dst_shape`.
///
/// Only the cells up to the last one the source maps to are written, so a matrix packed
/// right after this one in `dst` is left intact. Padding cells inside that span are zeroed.
/// Returns the number of bytes written.
pub fn expand_matrix(
    src_shape: MatrixShape,
    dst_shape: MatrixShape,
    src: &[f32],
    dst: &mut [u8],
) -> usize {
    debug_assert!(
        src_shape.cols <= dst_shape.cols && src_shape.rows <= dst_shape.rows,
        "matrices can only be expanded"
    );
    debug_assert!(dst_shape.len() <= MAX_MATRIX_ELEMENTS);
    if src_shape.is_empty() {
        return 0;
    }

    let flat_size = dst_shape.flat_index(src_shape.cols - 1, src_shape.rows - 1) + 1;
    let mut staging = [0f32; MAX_MATRIX_ELEMENTS];
    for row in 0..src_shape.rows {
        for col in 0..src_shape.cols {
            staging[dst_shape.flat_index(col, row)] = src[src_shape.flat_index(col, row)];
        }
    }

    let bytes = flat_size * F32_BYTES;
    dst[..bytes].copy_from_slice(bytemuck::cast_slice(&staging[..flat_size]));
    bytes
}

/// Writes `count` matrices, starting at array element `array_element_offset`, clamped to the
/// `element_count` elements the uniform declares.
///
/// Identical shapes are copied in one go; otherwise each matrix goes through
/// [`expand_matrix`].
pub fn set_float_uniform_matrix(
    array_element_offset: u32,
    element_count: u32,
    count: usize,
    src_shape: MatrixShape,
    dst_shape: MatrixShape,
    values: &[f32],
    target: &mut [u8],
) {
    let count = (element_count.saturating_sub(array_element_offset) as usize).min(count);
    let dst_stride = dst_shape.len() * F32_BYTES;
    let mut at = array_element_offset as usize * dst_stride;

    if src_shape == dst_shape {
        let bytes = count * dst_stride;
        let src = &values[..count * src_shape.len()];
        target[at..at + bytes].copy_from_slice(bytemuck::cast_slice(src));
        return;
    }

    for matrix in values.chunks_exact(src_shape.len()).take(count) {
        expand_matrix(src_shape, dst_shape, matrix, &mut target[at..]);
        at += dst_stride;
    }
}

/// Writes client matrices (`cols` x `rows`, column-major unless `transpose`) into a uniform
/// buffer using the backend's `packing`.
#[allow(clippy::too_many_arguments)]
pub fn set_float_uniform_matrix_packed(
    packing: MatrixPacking,
    cols: usize,
    rows: usize,
    array_element_offset: u32,
    element_count: u32,
    count: usize,
    transpose: bool,
    values: &[f32],
    target: &mut [u8],
) {
    let src_shape = MatrixShape::new(cols, rows, !transpose);
    let dst_shape = packing.destination_shape(cols, rows);
    set_float_uniform_matrix(
        array_element_offset,
        element_count,
        count,
        src_shape,
        dst_shape,
        values,
        target,
    );
}

/// Reads a `cols` x `rows` matrix stored with a stride of 4 back into tightly packed
/// column-major `out`. With `transpose` the source is row-major.
pub fn get_matrix_uniform(
    cols: usize,
    rows: usize,
    out: &mut [f32],
    source: &[f32],
    transpose: bool,
) {
    for col in 0..cols {
        for row in 0..rows {
            out[col * rows + row] = if transpose {
                source[row * 4 + col]
            } else {
                source[col * 4 + row]
            };
        }
    }
}
