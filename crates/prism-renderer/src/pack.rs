//! Readback transcoding: copies a rectangle of source pixels into a client buffer, converting
//! format, undoing surface rotation, and flipping rows as requested.

use prism_format::{Format, PixelFormatId, PixelSource};
use tracing::trace;

use crate::geometry::Rectangle;
use crate::rotation::SurfaceRotation;
use crate::RendererError;

/// One readback job.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PackPixelsParams {
    pub area: Rectangle,
    pub dest_format: PixelFormatId,
    /// Byte distance between consecutive destination rows.
    pub output_pitch: u32,
    /// Source rows are stored bottom-up.
    pub reverse_row_order: bool,
    /// Byte offset into the destination buffer where row 0 starts.
    pub offset: usize,
    pub rotation: SurfaceRotation,
}

impl PackPixelsParams {
    pub fn new(
        area: Rectangle,
        dest_format: PixelFormatId,
        output_pitch: u32,
        reverse_row_order: bool,
        offset: usize,
    ) -> Self {
        Self {
            area,
            dest_format,
            output_pitch,
            reverse_row_order,
            offset,
            rotation: SurfaceRotation::Identity,
        }
    }

    /// `(width, height)` of the destination image, which swaps under quarter-turn rotation.
    pub fn dest_extent(&self) -> (usize, usize) {
        let w = self.area.width.max(0) as usize;
        let h = self.area.height.max(0) as usize;
        if self.rotation.is_rotated_aspect_ratio() {
            (h, w)
        } else {
            (w, h)
        }
    }
}

/// Client pixel-pack state relevant to readback.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PixelPackState {
    pub reverse_row_order: bool,
}

/// Source walk derived from the rotation: origin byte offset and signed per-axis pitches.
struct SourceWalk {
    origin: usize,
    x_pitch: isize,
    y_pitch: isize,
}

fn source_walk(params: &PackPixelsParams, pixel_bytes: usize, input_pitch: usize) -> SourceWalk {
    let pb = pixel_bytes as isize;
    let pitch = input_pitch as isize;
    let width = params.area.width as isize;
    let height = params.area.height as isize;
    let (origin, x_pitch, y_pitch) = match params.rotation {
        SurfaceRotation::Identity if params.reverse_row_order => (pitch * (height - 1), pb, -pitch),
        SurfaceRotation::Identity => (0, pb, pitch),
        // Rotated sources are always stored flipped.
        SurfaceRotation::Rotated90Degrees => (0, pitch, pb),
        SurfaceRotation::Rotated180Degrees => (pb * (width - 1), -pb, pitch),
        SurfaceRotation::Rotated270Degrees => (
            pitch * (height - 1) + pb * (width - 1),
            -pitch,
            -pb,
        ),
    };
    debug_assert!(origin >= 0);
    SourceWalk {
        origin: origin as usize,
        x_pitch,
        y_pitch,
    }
}

/// Transcodes `params.area` of `source` (laid out as `source_format` with `input_pitch` bytes
/// per row) into `dest` at `params.offset`.
///
/// Path priority: one row copy per row when nothing changes, then a registered fast-copy
/// function, then per-pixel read/convert/write.
pub fn pack_pixels(
    params: &PackPixelsParams,
    source_format: PixelFormatId,
    input_pitch: usize,
    source: &[u8],
    dest: &mut [u8],
) {
    debug_assert!(!params.dest_format.is_none(), "pack destination format must be set");
    if params.area.width <= 0 || params.area.height <= 0 {
        return;
    }

    let src_format = Format::get(source_format);
    let dst_format = Format::get(params.dest_format);
    let pixel_bytes = src_format.pixel_bytes as usize;
    let walk = source_walk(params, pixel_bytes, input_pitch);
    let view = PixelSource::new(source, walk.origin, walk.x_pitch, walk.y_pitch);
    let output_pitch = params.output_pitch as usize;
    let dest = &mut dest[params.offset..];

    if params.rotation == SurfaceRotation::Identity && source_format == params.dest_format {
        trace!(?source_format, "pack: direct row copy");
        let row_bytes = params.area.width as usize * pixel_bytes;
        for y in 0..params.area.height as usize {
            let src = view.offset(0, y);
            let dst = y * output_pitch;
            dest[dst..dst + row_bytes].copy_from_slice(&source[src..src + row_bytes]);
        }
        return;
    }

    let (dest_width, dest_height) = params.dest_extent();
    let dest_pixel_bytes = dst_format.pixel_bytes as usize;

    if let Some(fast_copy) = src_format.fast_copy_functions.get(params.dest_format) {
        trace!(?source_format, dest_format = ?params.dest_format, "pack: fast copy");
        fast_copy(&view, dest, dest_pixel_bytes, output_pitch, dest_width, dest_height);
        return;
    }

    debug_assert!(
        src_format.pixel_read.is_some() && dst_format.pixel_write.is_some(),
        "no generic conversion from {source_format:?} to {:?}",
        params.dest_format
    );
    let (Some(read), Some(write)) = (src_format.pixel_read, dst_format.pixel_write) else {
        return;
    };

    trace!(?source_format, dest_format = ?params.dest_format, "pack: generic conversion");
    for y in 0..dest_height {
        let row = y * output_pitch;
        for x in 0..dest_width {
            let color = read(view.pixel(x, y, pixel_bytes));
            let at = row + x * dest_pixel_bytes;
            write(&color, &mut dest[at..at + dest_pixel_bytes]);
        }
    }
}

/// Derives readback parameters for the visible part `clipped_area` of `area`, advancing
/// `skip_bytes` past the clipped-away leading columns and rows.
pub fn get_pack_pixels_params(
    format: PixelFormatId,
    output_pitch: u32,
    pack_state: &PixelPackState,
    area: &Rectangle,
    clipped_area: &Rectangle,
    skip_bytes: u32,
) -> Result<(PackPixelsParams, u32), RendererError> {
    const WHAT: &str = "pack skip bytes";
    let overflow = || RendererError::IntegerOverflow(WHAT);

    let dx = u32::try_from(clipped_area.x - area.x).map_err(|_| overflow())?;
    let dy = u32::try_from(clipped_area.y - area.y).map_err(|_| overflow())?;
    let skip_bytes = dx
        .checked_mul(Format::get(format).pixel_bytes)
        .and_then(|x| dy.checked_mul(output_pitch).and_then(|y| x.checked_add(y)))
        .and_then(|delta| skip_bytes.checked_add(delta))
        .ok_or_else(overflow)?;

    let params = PackPixelsParams::new(
        *clipped_area,
        format,
        output_pitch,
        pack_state.reverse_row_order,
        0,
    );
    Ok((params, skip_bytes))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn rgba_image(width: usize, height: usize) -> Vec<u8> {
        (0..width * height * 4).map(|i| i as u8).collect()
    }

    #[test]
    fn identity_copy_respects_output_pitch_and_offset() {
        let src = rgba_image(2, 2);
        let params = PackPixelsParams::new(
            Rectangle::new(0, 0, 2, 2),
            PixelFormatId::R8G8B8A8Unorm,
            12,
            false,
            3,
        );
        let mut dst = vec![0xAAu8; 3 + 12 * 2];
        pack_pixels(&params, PixelFormatId::R8G8B8A8Unorm, 8, &src, &mut dst);
        assert_eq!(&dst[..3], &[0xAA; 3]);
        assert_eq!(&dst[3..11], &src[0..8]);
        assert_eq!(&dst[11..15], &[0xAA; 4]);
        assert_eq!(&dst[15..23], &src[8..16]);
    }

    #[test]
    fn reverse_row_order_flips_rows() {
        let src = rgba_image(1, 3);
        let params = PackPixelsParams::new(
            Rectangle::new(0, 0, 1, 3),
            PixelFormatId::R8G8B8A8Unorm,
            4,
            true,
            0,
        );
        let mut dst = vec![0u8; 12];
        pack_pixels(&params, PixelFormatId::R8G8B8A8Unorm, 4, &src, &mut dst);
        assert_eq!(&dst[0..4], &src[8..12]);
        assert_eq!(&dst[8..12], &src[0..4]);
    }

    #[test]
    fn fast_copy_swizzles_rgba_to_bgra() {
        let src = [10u8, 20, 30, 40, 50, 60, 70, 80];
        let params = PackPixelsParams::new(
            Rectangle::new(0, 0, 2, 1),
            PixelFormatId::B8G8R8A8Unorm,
            8,
            false,
            0,
        );
        let mut dst = [0u8; 8];
        pack_pixels(&params, PixelFormatId::R8G8B8A8Unorm, 8, &src, &mut dst);
        assert_eq!(dst, [30, 20, 10, 40, 70, 60, 50, 80]);
    }

    #[test]
    fn generic_path_converts_formats() {
        let src = [255u8, 0, 0, 255];
        let params = PackPixelsParams::new(
            Rectangle::new(0, 0, 1, 1),
            PixelFormatId::R5G6B5Unorm,
            2,
            false,
            0,
        );
        let mut dst = [0u8; 2];
        pack_pixels(&params, PixelFormatId::R8G8B8A8Unorm, 4, &src, &mut dst);
        assert_eq!(u16::from_le_bytes(dst), 0xf800);
    }

    #[test]
    fn rotate_90_transposes() {
        // 3 wide, 2 tall, one byte per pixel.
        let src = [0u8, 1, 2, 3, 4, 5];
        let mut params = PackPixelsParams::new(
            Rectangle::new(0, 0, 3, 2),
            PixelFormatId::L8Unorm,
            2,
            false,
            0,
        );
        params.rotation = SurfaceRotation::Rotated90Degrees;
        assert_eq!(params.dest_extent(), (2, 3));
        let mut dst = [0u8; 6];
        pack_pixels(&params, PixelFormatId::R8Unorm, 3, &src, &mut dst);
        // Generic path through R8 -> L8: the value survives.
        assert_eq!(dst, [0, 3, 1, 4, 2, 5]);
    }

    /// Packs the 3x2 one-byte image `[0, 1, 2, 3, 4, 5]` under `rotation`.
    fn pack_3x2(rotation: SurfaceRotation, reverse_row_order: bool) -> [u8; 6] {
        let src = [0u8, 1, 2, 3, 4, 5];
        let mut params = PackPixelsParams::new(
            Rectangle::new(0, 0, 3, 2),
            PixelFormatId::L8Unorm,
            0,
            reverse_row_order,
            0,
        );
        params.rotation = rotation;
        params.output_pitch = params.dest_extent().0 as u32;
        let mut dst = [0u8; 6];
        pack_pixels(&params, PixelFormatId::R8Unorm, 3, &src, &mut dst);
        dst
    }

    #[test]
    fn rotate_180_and_270() {
        assert_eq!(pack_3x2(SurfaceRotation::Rotated180Degrees, false), [2, 1, 0, 5, 4, 3]);
        assert_eq!(pack_3x2(SurfaceRotation::Rotated270Degrees, false), [5, 2, 4, 1, 3, 0]);
    }

    #[test]
    fn reverse_row_order_only_affects_unrotated_sources() {
        let expected = [
            (SurfaceRotation::Identity, [0, 1, 2, 3, 4, 5], [3, 4, 5, 0, 1, 2]),
            (SurfaceRotation::Rotated90Degrees, [0, 3, 1, 4, 2, 5], [0, 3, 1, 4, 2, 5]),
            (SurfaceRotation::Rotated180Degrees, [2, 1, 0, 5, 4, 3], [2, 1, 0, 5, 4, 3]),
            (SurfaceRotation::Rotated270Degrees, [5, 2, 4, 1, 3, 0], [5, 2, 4, 1, 3, 0]),
        ];
        for (rotation, plain, flipped) in expected {
            assert_eq!(pack_3x2(rotation, false), plain, "{rotation:?}");
            assert_eq!(pack_3x2(rotation, true), flipped, "{rotation:?} flipped");
        }
    }

    #[test]
    fn skip_bytes_accumulate_clipped_offset() {
        let area = Rectangle::new(-2, -1, 10, 10);
        let clipped = Rectangle::new(0, 0, 8, 9);
        let (params, skip) = get_pack_pixels_params(
            PixelFormatId::R8G8B8A8Unorm,
            40,
            &PixelPackState { reverse_row_order: true },
            &area,
            &clipped,
            4,
        )
        .unwrap();
        assert_eq!(skip, 4 + 2 * 4 + 40);
        assert_eq!(params.area, clipped);
        assert!(params.reverse_row_order);
        assert_eq!(params.offset, 0);
    }

    #[test]
    fn skip_bytes_overflow_is_reported() {
        let area = Rectangle::new(0, 0, 1, 1);
        let clipped = Rectangle::new(0, 2, 1, 1);
        let err = get_pack_pixels_params(
            PixelFormatId::R8G8B8A8Unorm,
            u32::MAX,
            &PixelPackState::default(),
            &area,
            &clipped,
            0,
        )
        .unwrap_err();
        assert_eq!(err, RendererError::IntegerOverflow("pack skip bytes"));
    }
}
