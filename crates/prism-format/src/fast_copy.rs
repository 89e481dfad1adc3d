use crate::PixelFormatId;

/// Read-only view over source pixels with signed per-axis byte pitches.
///
/// `origin` is the byte offset of logical pixel `(0, 0)`; negative pitches walk backwards
/// from it (flipped rows, rotated readback).
#[derive(Debug, Clone, Copy)]
pub struct PixelSource<'a> {
    pub data: &'a [u8],
    pub origin: usize,
    pub x_pitch: isize,
    pub y_pitch: isize,
}

impl<'a> PixelSource<'a> {
    pub fn new(data: &'a [u8], origin: usize, x_pitch: isize, y_pitch: isize) -> Self {
        Self {
            data,
            origin,
            x_pitch,
            y_pitch,
        }
    }

    /// Byte offset of logical pixel `(x, y)`.
    #[inline]
    pub fn offset(&self, x: usize, y: usize) -> usize {
        let off = self.origin as isize + x as isize * self.x_pitch + y as isize * self.y_pitch;
        debug_assert!(off >= 0, "pixel ({x}, {y}) lies before the source buffer");
        off as usize
    }

    #[inline]
    pub fn pixel(&self, x: usize, y: usize, pixel_bytes: usize) -> &'a [u8] {
        let off = self.offset(x, y);
        &self.data[off..off + pixel_bytes]
    }
}

/// Direct conversion from one format into another, skipping the canonical color.
///
/// Writes a `width` x `height` block into `dst` with `dst_pixel_bytes` between pixels and
/// `dst_row_pitch` between rows.
pub type FastCopyFn = fn(
    src: &PixelSource<'_>,
    dst: &mut [u8],
    dst_pixel_bytes: usize,
    dst_row_pitch: usize,
    width: usize,
    height: usize,
);

#[derive(Clone, Copy)]
pub struct FastCopyEntry {
    pub format_id: PixelFormatId,
    pub func: FastCopyFn,
}

/// Destination-keyed fast-copy functions of a source format. Small enough that a linear
/// scan beats hashing.
#[derive(Clone, Copy)]
pub struct FastCopyFunctionMap {
    entries: &'static [FastCopyEntry],
}

impl FastCopyFunctionMap {
    pub const EMPTY: Self = Self { entries: &[] };

    pub const fn new(entries: &'static [FastCopyEntry]) -> Self {
        Self { entries }
    }

    pub fn get(&self, format_id: PixelFormatId) -> Option<FastCopyFn> {
        self.entries.iter().find(|e| e.format_id == format_id).map(|e| e.func)
    }

    pub fn has(&self, format_id: PixelFormatId) -> bool {
        self.get(format_id).is_some()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl std::fmt::Debug for FastCopyFunctionMap {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.entries.iter().map(|e| e.format_id)).finish()
    }
}

/// Swaps the first and third bytes of every 4-byte pixel. Serves both RGBA8 -> BGRA8 and
/// BGRA8 -> RGBA8.
pub fn copy_swap_red_blue_8888(
    src: &PixelSource<'_>,
    dst: &mut [u8],
    dst_pixel_bytes: usize,
    dst_row_pitch: usize,
    width: usize,
    height: usize,
) {
    for y in 0..height {
        let row = &mut dst[y * dst_row_pitch..];
        for x in 0..width {
            let s = src.pixel(x, y, 4);
            let d = &mut row[x * dst_pixel_bytes..x * dst_pixel_bytes + 4];
            d[0] = s[2];
            d[1] = s[1];
            d[2] = s[0];
            d[3] = s[3];
        }
    }
}

const fn swap_red_blue_to(format_id: PixelFormatId) -> FastCopyEntry {
    FastCopyEntry {
        format_id,
        func: copy_swap_red_blue_8888,
    }
}

const RGBA8_ENTRIES: &[FastCopyEntry] = &[swap_red_blue_to(PixelFormatId::B8G8R8A8Unorm)];
const BGRA8_ENTRIES: &[FastCopyEntry] = &[swap_red_blue_to(PixelFormatId::R8G8B8A8Unorm)];
const RGBA8_SRGB_ENTRIES: &[FastCopyEntry] = &[swap_red_blue_to(PixelFormatId::B8G8R8A8UnormSrgb)];
const BGRA8_SRGB_ENTRIES: &[FastCopyEntry] = &[swap_red_blue_to(PixelFormatId::R8G8B8A8UnormSrgb)];

pub(crate) const RGBA8_FAST_COPIES: FastCopyFunctionMap = FastCopyFunctionMap::new(RGBA8_ENTRIES);
pub(crate) const BGRA8_FAST_COPIES: FastCopyFunctionMap = FastCopyFunctionMap::new(BGRA8_ENTRIES);
pub(crate) const RGBA8_SRGB_FAST_COPIES: FastCopyFunctionMap =
    FastCopyFunctionMap::new(RGBA8_SRGB_ENTRIES);
pub(crate) const BGRA8_SRGB_FAST_COPIES: FastCopyFunctionMap =
    FastCopyFunctionMap::new(BGRA8_SRGB_ENTRIES);

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn lookup_misses_return_none() {
        assert!(RGBA8_FAST_COPIES.has(PixelFormatId::B8G8R8A8Unorm));
        assert!(RGBA8_FAST_COPIES.get(PixelFormatId::R8G8B8A8Unorm).is_none());
        assert!(FastCopyFunctionMap::EMPTY.get(PixelFormatId::None).is_none());
    }

    #[test]
    fn swap_red_blue_honours_negative_row_pitch() {
        // Two rows of one pixel, read bottom-up.
        let src = [1u8, 2, 3, 4, 5, 6, 7, 8];
        let view = PixelSource::new(&src, 4, 4, -4);
        let mut dst = [0u8; 8];
        copy_swap_red_blue_8888(&view, &mut dst, 4, 4, 1, 2);
        assert_eq!(dst, [7, 6, 5, 8, 3, 2, 1, 4]);
    }
}
