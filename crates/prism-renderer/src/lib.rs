//! `prism-renderer` holds the backend-independent pieces of the GLES renderer.
//!
//! Currently this crate provides:
//! - Readback transcoding with rotation and row flips (see [`pack::pack_pixels`]) and
//!   texture-to-texture copies (see [`copy_image::copy_image`]).
//! - Default-uniform-block shadowing, including matrix padding and boolean coercion
//!   (see [`uniform`]).
//! - Multi-draw emulation on top of single draws (see [`draw`]).
//! - Placeholder textures for incomplete samplers and mip redefinition tracking
//!   (see [`texture`]).
//! - Workaround toggles with user overrides (see [`features`]).
//!
//! GPU objects are never touched directly; callers plug their backend in through the traits in
//! [`draw`] and [`texture`].

mod error;

pub mod copy_image;
pub mod draw;
pub mod features;
pub mod geometry;
pub mod multisample;
pub mod pack;
pub mod rotation;
pub mod texture;
pub mod uniform;

pub use error::RendererError;
pub use geometry::{clip_rect_to_scissor, Box3, Extents, Rectangle};
pub use multisample::get_sample_position;
pub use pack::{get_pack_pixels_params, pack_pixels, PackPixelsParams, PixelPackState};
pub use rotation::{rotate_rectangle, SurfaceRotation};
