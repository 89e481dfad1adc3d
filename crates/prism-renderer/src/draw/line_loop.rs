//! Line loops expressed as line strips: every loop is closed by repeating its first index.

use bytemuck::Pod;

use super::DrawElementsType;

trait LoopIndex: Pod + Eq {
    const RESTART: Self;

    fn widen(self) -> u32;
    fn narrow(value: u32) -> Self;
}

macro_rules! narrow_loop_index {
    ($($ty:ty),*) => {$(
        impl LoopIndex for $ty {
            const RESTART: Self = <$ty>::MAX;

            fn widen(self) -> u32 {
                u32::from(self)
            }

            fn narrow(value: u32) -> Self {
                value as $ty
            }
        }
    )*};
}

narrow_loop_index!(u8, u16);

impl LoopIndex for u32 {
    const RESTART: Self = u32::MAX;

    fn widen(self) -> u32 {
        self
    }

    fn narrow(value: u32) -> Self {
        value
    }
}

/// Number of indices [`stream_emulated_line_loop_indices`] writes for `src`: every non-empty
/// loop gains its closing index.
pub fn line_loop_index_count(
    index_type: DrawElementsType,
    index_count: usize,
    src: &[u8],
) -> usize {
    let restart = index_type.restart_index();
    let mut loop_len = 0;
    let mut loops = 0;
    for index in read_indices(index_type, index_count, src) {
        if index == restart {
            if loop_len > 0 {
                loops += 1;
            }
            loop_len = 0;
        } else {
            loop_len += 1;
        }
    }
    if loop_len > 0 {
        loops += 1;
    }
    index_count + loops
}

fn read_indices(
    index_type: DrawElementsType,
    index_count: usize,
    src: &[u8],
) -> impl Iterator<Item = u32> + '_ {
    let bytes = index_type.bytes();
    src.chunks_exact(bytes).take(index_count).map(move |c| match index_type {
        DrawElementsType::UnsignedByte => u32::from(c[0]),
        DrawElementsType::UnsignedShort => u32::from(u16::from_ne_bytes([c[0], c[1]])),
        DrawElementsType::UnsignedInt => u32::from_ne_bytes([c[0], c[1], c[2], c[3]]),
    })
}

/// Rewrites `index_count` line-loop indices from `src` into `out` as a line strip with
/// primitive restart.
///
/// Restart indices are written as the destination type's restart value. With `convert_u8`,
/// byte indices are widened to `u16` for backends without 8-bit index support. `out` must hold
/// [`line_loop_index_count`] destination indices.
pub fn stream_emulated_line_loop_indices(
    index_type: DrawElementsType,
    index_count: usize,
    src: &[u8],
    out: &mut [u8],
    convert_u8: bool,
) {
    match index_type {
        DrawElementsType::UnsignedByte if convert_u8 => {
            copy_line_loop_indices_with_restart::<u8, u16>(index_count, src, out)
        }
        DrawElementsType::UnsignedByte => {
            copy_line_loop_indices_with_restart::<u8, u8>(index_count, src, out)
        }
        DrawElementsType::UnsignedShort => {
            copy_line_loop_indices_with_restart::<u16, u16>(index_count, src, out)
        }
        DrawElementsType::UnsignedInt => {
            copy_line_loop_indices_with_restart::<u32, u32>(index_count, src, out)
        }
    }
}

fn copy_line_loop_indices_with_restart<S: LoopIndex, D: LoopIndex>(
    index_count: usize,
    src: &[u8],
    out: &mut [u8],
) {
    let src_bytes = std::mem::size_of::<S>();
    let dst_bytes = std::mem::size_of::<D>();
    let mut written = 0;
    let mut put = |value: D| {
        let at = written * dst_bytes;
        out[at..at + dst_bytes].copy_from_slice(bytemuck::bytes_of(&value));
        written += 1;
    };

    let mut loop_start: Option<S> = None;
    for chunk in src.chunks_exact(src_bytes).take(index_count) {
        let index: S = bytemuck::pod_read_unaligned(chunk);
        if index == S::RESTART {
            if let Some(first) = loop_start.take() {
                put(D::narrow(first.widen()));
            }
            put(D::RESTART);
        } else {
            loop_start.get_or_insert(index);
            put(D::narrow(index.widen()));
        }
    }
    if let Some(first) = loop_start {
        put(D::narrow(first.widen()));
    }
}
