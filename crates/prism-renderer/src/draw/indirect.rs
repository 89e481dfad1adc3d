use bytemuck::{Pod, Zeroable};

use crate::RendererError;

/// GLES `DrawArraysIndirectCommand`:
/// - `count: u32`
/// - `instance_count: u32`
/// - `first: u32`
/// - `base_instance: u32`
///
/// Total size: 16 bytes, little-endian.
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Pod, Zeroable)]
pub struct DrawArraysIndirectCommand {
    pub count: u32,
    pub instance_count: u32,
    pub first: u32,
    pub base_instance: u32,
}

/// GLES `DrawElementsIndirectCommand`:
/// - `count: u32`
/// - `instance_count: u32`
/// - `first_index: u32`
/// - `base_vertex: i32`
/// - `base_instance: u32`
///
/// Total size: 20 bytes, little-endian.
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Pod, Zeroable)]
pub struct DrawElementsIndirectCommand {
    pub count: u32,
    pub instance_count: u32,
    pub first_index: u32,
    pub base_vertex: i32,
    pub base_instance: u32,
}

/// A fixed-layout record in an indirect draw buffer.
pub trait IndirectCommand: Pod {
    const SIZE_BYTES: usize = core::mem::size_of::<Self>();

    /// Converts every field from little-endian storage order.
    fn from_le(self) -> Self;

    /// Reads the record at byte `offset` of `buffer`, which need not be aligned.
    fn read_at(buffer: &[u8], offset: usize) -> Result<Self, RendererError> {
        let overrun = || RendererError::IndirectBufferOverrun {
            offset,
            size: Self::SIZE_BYTES,
            len: buffer.len(),
        };
        let end = offset.checked_add(Self::SIZE_BYTES).ok_or_else(overrun)?;
        let bytes = buffer.get(offset..end).ok_or_else(overrun)?;
        Ok(bytemuck::pod_read_unaligned::<Self>(bytes).from_le())
    }
}

impl IndirectCommand for DrawArraysIndirectCommand {
    fn from_le(self) -> Self {
        Self {
            count: u32::from_le(self.count),
            instance_count: u32::from_le(self.instance_count),
            first: u32::from_le(self.first),
            base_instance: u32::from_le(self.base_instance),
        }
    }
}

impl IndirectCommand for DrawElementsIndirectCommand {
    fn from_le(self) -> Self {
        Self {
            count: u32::from_le(self.count),
            instance_count: u32::from_le(self.instance_count),
            first_index: u32::from_le(self.first_index),
            base_vertex: i32::from_le(self.base_vertex),
            base_instance: u32::from_le(self.base_instance),
        }
    }
}

impl DrawArraysIndirectCommand {
    /// View this record as raw bytes (little-endian on all supported platforms).
    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::bytes_of(self)
    }
}

impl DrawElementsIndirectCommand {
    /// View this record as raw bytes (little-endian on all supported platforms).
    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::bytes_of(self)
    }
}

/// Byte offset of record `index` for a buffer read at `stride` bytes (`0` means packed).
pub fn record_offset<C: IndirectCommand>(
    index: usize,
    stride: usize,
) -> Result<usize, RendererError> {
    let stride = if stride == 0 { C::SIZE_BYTES } else { stride };
    index
        .checked_mul(stride)
        .ok_or(RendererError::IntegerOverflow("indirect record offset"))
}

// Compile-time layout validation.
const _: [(); 16] = [(); core::mem::size_of::<DrawArraysIndirectCommand>()];
const _: [(); 20] = [(); core::mem::size_of::<DrawElementsIndirectCommand>()];

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn record_field_offsets() {
        assert_eq!(core::mem::offset_of!(DrawArraysIndirectCommand, first), 8);
        assert_eq!(core::mem::offset_of!(DrawArraysIndirectCommand, base_instance), 12);
        assert_eq!(core::mem::offset_of!(DrawElementsIndirectCommand, base_vertex), 12);
        assert_eq!(core::mem::offset_of!(DrawElementsIndirectCommand, base_instance), 16);
    }

    #[test]
    fn reads_unaligned_little_endian_records() {
        let mut buffer = vec![0xAAu8];
        for v in [3u32, 1, 7, 0] {
            buffer.extend_from_slice(&v.to_le_bytes());
        }
        let cmd = DrawArraysIndirectCommand::read_at(&buffer, 1).unwrap();
        assert_eq!(
            cmd,
            DrawArraysIndirectCommand {
                count: 3,
                instance_count: 1,
                first: 7,
                base_instance: 0,
            }
        );
    }

    #[test]
    fn negative_base_vertex_survives() {
        let record = DrawElementsIndirectCommand {
            count: 6,
            instance_count: 2,
            first_index: 3,
            base_vertex: -4,
            base_instance: 1,
        };
        let bytes = record.as_bytes().to_vec();
        assert_eq!(DrawElementsIndirectCommand::read_at(&bytes, 0).unwrap(), record);
    }

    #[test]
    fn overrun_is_reported() {
        let buffer = [0u8; 24];
        let err = DrawElementsIndirectCommand::read_at(&buffer, 8).unwrap_err();
        assert_eq!(
            err,
            RendererError::IndirectBufferOverrun {
                offset: 8,
                size: 20,
                len: 24,
            }
        );
        assert!(DrawArraysIndirectCommand::read_at(&buffer, usize::MAX).is_err());
    }

    #[test]
    fn zero_stride_means_packed() {
        assert_eq!(record_offset::<DrawElementsIndirectCommand>(3, 0).unwrap(), 60);
        assert_eq!(record_offset::<DrawArraysIndirectCommand>(3, 32).unwrap(), 96);
        assert!(record_offset::<DrawArraysIndirectCommand>(usize::MAX, 0).is_err());
    }
}
