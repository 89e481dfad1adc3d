//! Texture-to-texture copies with unpack flip, alpha (un)premultiplication and destination
//! channel clipping, done per pixel through the format read/write functions.

use prism_format::{Color, ColorF, ColorU, Format, PixelFormatId};

/// Base (unsized) format of the copy destination; decides which channels survive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UnsizedFormat {
    Red,
    Rg,
    Rgb,
    Rgba,
    Luminance,
    LuminanceAlpha,
    Alpha,
    Bgra,
}

impl UnsizedFormat {
    fn clip_channels(self, color: &mut ColorF) {
        match self {
            UnsizedFormat::Red => {
                color.green = 0.0;
                color.blue = 0.0;
                color.alpha = 1.0;
            }
            UnsizedFormat::Rg => {
                color.blue = 0.0;
                color.alpha = 1.0;
            }
            UnsizedFormat::Rgb | UnsizedFormat::Luminance => color.alpha = 1.0,
            UnsizedFormat::Alpha => {
                color.red = 0.0;
                color.green = 0.0;
                color.blue = 0.0;
            }
            UnsizedFormat::Rgba | UnsizedFormat::LuminanceAlpha | UnsizedFormat::Bgra => {}
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum AlphaConversion {
    None,
    Premultiply,
    Unmultiply,
}

impl AlphaConversion {
    fn new(premultiply: bool, unmultiply: bool) -> Self {
        match (premultiply, unmultiply) {
            (true, false) => AlphaConversion::Premultiply,
            (false, true) => AlphaConversion::Unmultiply,
            _ => AlphaConversion::None,
        }
    }

    fn apply(self, color: &mut ColorF) {
        let scale = match self {
            AlphaConversion::None => return,
            AlphaConversion::Premultiply => color.alpha,
            AlphaConversion::Unmultiply if color.alpha != 0.0 => 1.0 / color.alpha,
            AlphaConversion::Unmultiply => return,
        };
        color.red *= scale;
        color.green *= scale;
        color.blue *= scale;
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CopyImageParams {
    pub source_format: PixelFormatId,
    pub source_row_pitch: usize,
    pub source_depth_pitch: usize,
    pub dest_format: PixelFormatId,
    pub dest_row_pitch: usize,
    pub dest_depth_pitch: usize,
    pub dest_unsized_format: UnsizedFormat,
    pub width: usize,
    pub height: usize,
    pub depth: usize,
    pub unpack_flip_y: bool,
    pub unpack_premultiply_alpha: bool,
    pub unpack_unmultiply_alpha: bool,
}

/// Copies a `width x height x depth` box from `source` into `dest`.
///
/// Integer destinations receive each normalized channel scaled by 255 and truncated. Requesting
/// both premultiply and unmultiply cancels out.
pub fn copy_image(params: &CopyImageParams, source: &[u8], dest: &mut [u8]) {
    let src_format = Format::get(params.source_format);
    let dst_format = Format::get(params.dest_format);
    debug_assert!(
        src_format.pixel_read.is_some() && dst_format.pixel_write.is_some(),
        "cannot copy {:?} to {:?}",
        params.source_format,
        params.dest_format
    );
    let (Some(read), Some(write)) = (src_format.pixel_read, dst_format.pixel_write) else {
        return;
    };

    let src_pixel_bytes = src_format.pixel_bytes as usize;
    let dst_pixel_bytes = dst_format.pixel_bytes as usize;
    let conversion = AlphaConversion::new(
        params.unpack_premultiply_alpha,
        params.unpack_unmultiply_alpha,
    );
    let write_uint = dst_format.is_uint();

    for z in 0..params.depth {
        let (src_slice, dst_slice) = (z * params.source_depth_pitch, z * params.dest_depth_pitch);
        for y in 0..params.height {
            let dest_y = if params.unpack_flip_y { params.height - 1 - y } else { y };
            let src_row = src_slice + y * params.source_row_pitch;
            let dst_row = dst_slice + dest_y * params.dest_row_pitch;
            for x in 0..params.width {
                let at = src_row + x * src_pixel_bytes;
                let mut color = read(&source[at..at + src_pixel_bytes]).to_float();

                conversion.apply(&mut color);
                params.dest_unsized_format.clip_channels(&mut color);

                let out = if write_uint {
                    Color::Uint(ColorU::new(
                        (color.red * 255.0) as u32,
                        (color.green * 255.0) as u32,
                        (color.blue * 255.0) as u32,
                        (color.alpha * 255.0) as u32,
                    ))
                } else {
                    Color::Float(color)
                };

                let at = dst_row + x * dst_pixel_bytes;
                write(&out, &mut dest[at..at + dst_pixel_bytes]);
            }
        }
    }
}
