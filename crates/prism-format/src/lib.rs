//! Pixel format identifiers, static format descriptors and per-pixel conversion functions.
//!
//! Everything here is immutable process-wide data: lookups never allocate and a miss is an
//! explicit `None` / [`PixelFormatId::None`].

pub mod border_color;
mod color;
pub mod color_space;
mod fast_copy;
mod format;
mod id;
pub mod pixels;

#[cfg(feature = "wgpu")]
mod wgpu_format;

pub use border_color::adjust_border_color;
pub use color::{Color, ColorF, ColorI, ColorU, DepthStencil};
pub use color_space::{convert_to_linear, convert_to_srgb, is_overridable_linear_format};
pub use fast_copy::{
    copy_swap_red_blue_8888, FastCopyEntry, FastCopyFn, FastCopyFunctionMap, PixelSource,
};
pub use format::{Format, FormatFlags};
pub use id::PixelFormatId;
pub use pixels::{PixelReadFn, PixelWriteFn};
