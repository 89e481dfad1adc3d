use bytemuck::Pod;

/// Placement of one uniform location inside a stage's default uniform block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct UniformLayout {
    /// Byte offset of array element 0, or `-1` when the stage does not use the uniform.
    pub offset: i32,
    /// Byte distance between array elements; `0` means tightly packed.
    pub array_stride: i32,
}

impl UniformLayout {
    pub const UNUSED: Self = Self {
        offset: -1,
        array_stride: 0,
    };

    pub const fn new(offset: i32, array_stride: i32) -> Self {
        Self { offset, array_stride }
    }

    pub const fn is_unused(&self) -> bool {
        self.offset == -1
    }

    /// Stride between array elements of `element_size` bytes.
    pub fn effective_stride(&self, element_size: usize) -> usize {
        if self.array_stride == 0 {
            element_size
        } else {
            self.array_stride as usize
        }
    }
}

impl Default for UniformLayout {
    fn default() -> Self {
        Self::UNUSED
    }
}

/// CPU shadow of one shader stage's default uniform block.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DefaultUniformBlock {
    pub data: Vec<u8>,
    /// Indexed by uniform location.
    pub layout: Vec<UniformLayout>,
}

impl DefaultUniformBlock {
    pub fn new(size: usize, layout: Vec<UniformLayout>) -> Self {
        Self {
            data: vec![0; size],
            layout,
        }
    }

    pub fn layout_for(&self, location: usize) -> UniformLayout {
        self.layout.get(location).copied().unwrap_or(UniformLayout::UNUSED)
    }
}

/// Writes `count` array elements of `component_count` values each, starting at array
/// element `array_index`.
pub fn update_buffer_with_layout<T: Pod>(
    count: usize,
    array_index: u32,
    component_count: usize,
    values: &[T],
    layout: &UniformLayout,
    data: &mut [u8],
) {
    debug_assert!(!layout.is_unused());
    let element_size = std::mem::size_of::<T>() * component_count;
    let stride = layout.effective_stride(element_size);
    let base = layout.offset as usize + array_index as usize * stride;
    let src: &[u8] = bytemuck::cast_slice(&values[..count * component_count]);

    if stride == element_size {
        data[base..base + src.len()].copy_from_slice(src);
    } else {
        update_buffer_with_layout_strided(base, stride, element_size, src, data);
    }
}

fn update_buffer_with_layout_strided(
    base: usize,
    stride: usize,
    element_size: usize,
    src: &[u8],
    data: &mut [u8],
) {
    for (i, element) in src.chunks_exact(element_size).enumerate() {
        let at = base + i * stride;
        data[at..at + element_size].copy_from_slice(element);
    }
}

/// Reads array element `array_index` (`out.len()` values) back out of `data`.
pub fn read_from_buffer_with_layout<T: Pod>(
    array_index: u32,
    out: &mut [T],
    layout: &UniformLayout,
    data: &[u8],
) {
    debug_assert!(!layout.is_unused());
    let dst: &mut [u8] = bytemuck::cast_slice_mut(out);
    let element_size = dst.len();
    let at = layout.offset as usize + array_index as usize * layout.effective_stride(element_size);
    dst.copy_from_slice(&data[at..at + element_size]);
}
