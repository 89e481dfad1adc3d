//! Sampler border color clamping.

use crate::color::{Color, ColorF, ColorI, ColorU};
use crate::Format;

fn clamp_unsigned_for_bits(value: u32, bits: u8) -> u32 {
    if bits >= 32 {
        value
    } else {
        value.min((1u32 << bits) - 1)
    }
}

fn clamp_signed_for_bits(value: i32, bits: u8) -> i32 {
    if bits == 0 || bits >= 32 {
        return value;
    }
    let max = (1i32 << (bits - 1)) - 1;
    value.clamp(-max - 1, max)
}

fn clamp01(v: f32) -> f32 {
    v.clamp(0.0, 1.0)
}

/// Clamps a sampler border color to what `format` can represent.
///
/// `stencil_mode` selects the stencil aspect of a depth/stencil format. `swizzled_luma`
/// states how luminance/alpha formats are backed: through R/RG channels with a swizzle
/// (`true`) or unpacked to RGBA (`false`).
pub fn adjust_border_color(
    color: Color,
    format: &Format,
    stencil_mode: bool,
    swizzled_luma: bool,
) -> Color {
    if format.has_depth_or_stencil_bits() {
        if stencil_mode {
            let c = color.to_uint();
            // Unused channels are reset; some backends emulate stencil sampling with uint views.
            return Color::Uint(ColorU::new(
                clamp_unsigned_for_bits(c.red, format.stencil_bits),
                0,
                0,
                1,
            ));
        }
        if format.is_unorm() {
            let mut c = color.to_float();
            c.red = clamp01(c.red);
            return Color::Float(c);
        }
        return color;
    }

    if format.is_luma() {
        let mut c = color.to_float();
        if format.is_unorm() {
            c.red = clamp01(c.red);
            c.alpha = clamp01(c.alpha);
        }
        if swizzled_luma {
            // L is R, A is R, LA is RG.
            if format.alpha_bits > 0 {
                if format.luminance_bits > 0 {
                    c.green = c.alpha;
                } else {
                    c.red = c.alpha;
                }
            }
        } else {
            // L is RGBX, A is RGBA with zero color, LA is RGBA.
            if format.alpha_bits == 0 {
                c.alpha = 1.0;
            } else if format.luminance_bits == 0 {
                c.red = 0.0;
            }
            c.green = c.red;
            c.blue = c.red;
        }
        return Color::Float(c);
    }

    if format.is_sint() {
        let c = color.to_int();
        return Color::Int(ColorI::new(
            clamp_signed_for_bits(c.red, format.red_bits),
            clamp_signed_for_bits(c.green, format.green_bits),
            clamp_signed_for_bits(c.blue, format.blue_bits),
            if format.alpha_bits > 0 {
                clamp_signed_for_bits(c.alpha, format.alpha_bits)
            } else {
                1
            },
        ));
    }

    if format.is_uint() {
        let c = color.to_uint();
        return Color::Uint(ColorU::new(
            clamp_unsigned_for_bits(c.red, format.red_bits),
            clamp_unsigned_for_bits(c.green, format.green_bits),
            clamp_unsigned_for_bits(c.blue, format.blue_bits),
            if format.alpha_bits > 0 {
                clamp_unsigned_for_bits(c.alpha, format.alpha_bits)
            } else {
                1
            },
        ));
    }

    if format.is_snorm() {
        let c = color.to_float();
        let clamp = |v: f32| v.clamp(-1.0, 1.0);
        return Color::Float(ColorF::new(
            clamp(c.red),
            clamp(c.green),
            clamp(c.blue),
            if format.alpha_bits > 0 { clamp(c.alpha) } else { 1.0 },
        ));
    }

    if format.is_unorm() {
        let c = color.to_float();
        return Color::Float(ColorF::new(
            clamp01(c.red),
            clamp01(c.green),
            clamp01(c.blue),
            if format.alpha_bits > 0 { clamp01(c.alpha) } else { 1.0 },
        ));
    }

    if format.is_float() && format.alpha_bits == 0 {
        let mut c = color.to_float();
        c.alpha = 1.0;
        return Color::Float(c);
    }

    color
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::PixelFormatId;
    use pretty_assertions::assert_eq;

    fn float(r: f32, g: f32, b: f32, a: f32) -> Color {
        Color::Float(ColorF::new(r, g, b, a))
    }

    #[test]
    fn stencil_mode_clamps_and_resets_unused_channels() {
        let format = Format::get(PixelFormatId::D24UnormS8Uint);
        let out = adjust_border_color(Color::Uint(ColorU::new(1000, 7, 7, 7)), format, true, false);
        assert_eq!(out, Color::Uint(ColorU::new(255, 0, 0, 1)));
    }

    #[test]
    fn unorm_depth_clamps_red_only() {
        let format = Format::get(PixelFormatId::D16Unorm);
        let out = adjust_border_color(float(2.0, 5.0, -1.0, 3.0), format, false, false);
        assert_eq!(out, float(1.0, 5.0, -1.0, 3.0));
    }

    #[test]
    fn rgb_unorm_forces_opaque_alpha() {
        let format = Format::get(PixelFormatId::R8G8B8Unorm);
        let out = adjust_border_color(float(-0.5, 0.5, 1.5, 0.25), format, false, false);
        assert_eq!(out, float(0.0, 0.5, 1.0, 1.0));
    }

    #[test]
    fn sint_clamps_to_bit_width() {
        let format = Format::get(PixelFormatId::R8G8B8A8Sint);
        let out = adjust_border_color(
            Color::Int(ColorI::new(300, -300, 5, -1)),
            format,
            false,
            false,
        );
        assert_eq!(out, Color::Int(ColorI::new(127, -128, 5, -1)));
    }

    #[test]
    fn luminance_alpha_unpacked_to_rgba() {
        let format = Format::get(PixelFormatId::L8A8Unorm);
        let out = adjust_border_color(float(0.25, 0.9, 0.9, 0.75), format, false, false);
        assert_eq!(out, float(0.25, 0.25, 0.25, 0.75));
    }

    #[test]
    fn alpha_only_swizzled_moves_alpha_into_red() {
        let format = Format::get(PixelFormatId::A8Unorm);
        let out = adjust_border_color(float(0.1, 0.2, 0.3, 0.75), format, false, true);
        assert_eq!(out, float(0.75, 0.2, 0.3, 0.75));
    }

    #[test]
    fn alpha_less_float_gets_opaque_alpha() {
        let format = Format::get(PixelFormatId::R32Float);
        let out = adjust_border_color(float(7.0, 0.0, 0.0, 0.0), format, false, false);
        assert_eq!(out, float(7.0, 0.0, 0.0, 1.0));
    }
}
