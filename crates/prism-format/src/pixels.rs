//! Per-format pixel read/write functions.
//!
//! Every read function decodes exactly one pixel from the start of `src`; every write
//! function encodes one pixel into the start of `dst`. Multi-byte values are little-endian.
//! sRGB formats share their UNORM counterpart's functions: the transfer function is applied
//! by the sampler, not by the transcoder.

use half::f16;

use crate::color::{Color, ColorF, ColorI, ColorU, DepthStencil};

pub type PixelReadFn = fn(src: &[u8]) -> Color;
pub type PixelWriteFn = fn(color: &Color, dst: &mut [u8]);

#[inline]
fn unorm_to_f32(v: u32, bits: u32) -> f32 {
    v as f32 / ((1u64 << bits) - 1) as f32
}

#[inline]
fn f32_to_unorm(v: f32, bits: u32) -> u32 {
    let max = ((1u64 << bits) - 1) as f32;
    (v.clamp(0.0, 1.0) * max).round() as u32
}

#[inline]
fn snorm8_to_f32(v: u8) -> f32 {
    (v as i8 as f32 / 127.0).max(-1.0)
}

#[inline]
fn f32_to_snorm8(v: f32) -> u8 {
    (v.clamp(-1.0, 1.0) * 127.0).round() as i8 as u8
}

#[inline]
fn read_u16(src: &[u8]) -> u16 {
    u16::from_le_bytes([src[0], src[1]])
}

#[inline]
fn read_u32(src: &[u8]) -> u32 {
    u32::from_le_bytes([src[0], src[1], src[2], src[3]])
}

#[inline]
fn write_u16(dst: &mut [u8], v: u16) {
    dst[..2].copy_from_slice(&v.to_le_bytes());
}

#[inline]
fn write_u32(dst: &mut [u8], v: u32) {
    dst[..4].copy_from_slice(&v.to_le_bytes());
}

fn unorm8(src: &[u8], i: usize) -> f32 {
    unorm_to_f32(src[i] as u32, 8)
}

pub fn read_r8_unorm(src: &[u8]) -> Color {
    Color::Float(ColorF::new(unorm8(src, 0), 0.0, 0.0, 1.0))
}

pub fn write_r8_unorm(color: &Color, dst: &mut [u8]) {
    let c = color.to_float();
    dst[0] = f32_to_unorm(c.red, 8) as u8;
}

pub fn read_r8g8_unorm(src: &[u8]) -> Color {
    Color::Float(ColorF::new(unorm8(src, 0), unorm8(src, 1), 0.0, 1.0))
}

pub fn write_r8g8_unorm(color: &Color, dst: &mut [u8]) {
    let c = color.to_float();
    dst[0] = f32_to_unorm(c.red, 8) as u8;
    dst[1] = f32_to_unorm(c.green, 8) as u8;
}

pub fn read_r8g8b8_unorm(src: &[u8]) -> Color {
    Color::Float(ColorF::new(unorm8(src, 0), unorm8(src, 1), unorm8(src, 2), 1.0))
}

pub fn write_r8g8b8_unorm(color: &Color, dst: &mut [u8]) {
    let c = color.to_float();
    dst[0] = f32_to_unorm(c.red, 8) as u8;
    dst[1] = f32_to_unorm(c.green, 8) as u8;
    dst[2] = f32_to_unorm(c.blue, 8) as u8;
}

pub fn read_r8g8b8a8_unorm(src: &[u8]) -> Color {
    Color::Float(ColorF::new(unorm8(src, 0), unorm8(src, 1), unorm8(src, 2), unorm8(src, 3)))
}

pub fn write_r8g8b8a8_unorm(color: &Color, dst: &mut [u8]) {
    let c = color.to_float();
    dst[0] = f32_to_unorm(c.red, 8) as u8;
    dst[1] = f32_to_unorm(c.green, 8) as u8;
    dst[2] = f32_to_unorm(c.blue, 8) as u8;
    dst[3] = f32_to_unorm(c.alpha, 8) as u8;
}

pub fn read_b8g8r8a8_unorm(src: &[u8]) -> Color {
    Color::Float(ColorF::new(unorm8(src, 2), unorm8(src, 1), unorm8(src, 0), unorm8(src, 3)))
}

pub fn write_b8g8r8a8_unorm(color: &Color, dst: &mut [u8]) {
    let c = color.to_float();
    dst[0] = f32_to_unorm(c.blue, 8) as u8;
    dst[1] = f32_to_unorm(c.green, 8) as u8;
    dst[2] = f32_to_unorm(c.red, 8) as u8;
    dst[3] = f32_to_unorm(c.alpha, 8) as u8;
}

pub fn read_r8g8b8a8_snorm(src: &[u8]) -> Color {
    Color::Float(ColorF::new(
        snorm8_to_f32(src[0]),
        snorm8_to_f32(src[1]),
        snorm8_to_f32(src[2]),
        snorm8_to_f32(src[3]),
    ))
}

pub fn write_r8g8b8a8_snorm(color: &Color, dst: &mut [u8]) {
    let c = color.to_float();
    dst[0] = f32_to_snorm8(c.red);
    dst[1] = f32_to_snorm8(c.green);
    dst[2] = f32_to_snorm8(c.blue);
    dst[3] = f32_to_snorm8(c.alpha);
}

pub fn read_r8g8b8a8_uint(src: &[u8]) -> Color {
    Color::Uint(ColorU::new(src[0] as u32, src[1] as u32, src[2] as u32, src[3] as u32))
}

pub fn write_r8g8b8a8_uint(color: &Color, dst: &mut [u8]) {
    let c = color.to_uint();
    dst[0] = c.red.min(u8::MAX as u32) as u8;
    dst[1] = c.green.min(u8::MAX as u32) as u8;
    dst[2] = c.blue.min(u8::MAX as u32) as u8;
    dst[3] = c.alpha.min(u8::MAX as u32) as u8;
}

pub fn read_r8g8b8a8_sint(src: &[u8]) -> Color {
    Color::Int(ColorI::new(
        src[0] as i8 as i32,
        src[1] as i8 as i32,
        src[2] as i8 as i32,
        src[3] as i8 as i32,
    ))
}

pub fn write_r8g8b8a8_sint(color: &Color, dst: &mut [u8]) {
    let c = color.to_int();
    let clamp = |v: i32| v.clamp(i8::MIN as i32, i8::MAX as i32) as i8 as u8;
    dst[0] = clamp(c.red);
    dst[1] = clamp(c.green);
    dst[2] = clamp(c.blue);
    dst[3] = clamp(c.alpha);
}

/// 16-bit `RGB565`: red in bits 11..16, green 5..11, blue 0..5.
pub fn read_r5g6b5_unorm(src: &[u8]) -> Color {
    let v = read_u16(src) as u32;
    Color::Float(ColorF::new(
        unorm_to_f32((v >> 11) & 0x1f, 5),
        unorm_to_f32((v >> 5) & 0x3f, 6),
        unorm_to_f32(v & 0x1f, 5),
        1.0,
    ))
}

pub fn write_r5g6b5_unorm(color: &Color, dst: &mut [u8]) {
    let c = color.to_float();
    let v =
        (f32_to_unorm(c.red, 5) << 11) | (f32_to_unorm(c.green, 6) << 5) | f32_to_unorm(c.blue, 5);
    write_u16(dst, v as u16);
}

/// 16-bit `RGBA4`: red in the top nibble, alpha in the bottom one.
pub fn read_r4g4b4a4_unorm(src: &[u8]) -> Color {
    let v = read_u16(src) as u32;
    Color::Float(ColorF::new(
        unorm_to_f32((v >> 12) & 0xf, 4),
        unorm_to_f32((v >> 8) & 0xf, 4),
        unorm_to_f32((v >> 4) & 0xf, 4),
        unorm_to_f32(v & 0xf, 4),
    ))
}

pub fn write_r4g4b4a4_unorm(color: &Color, dst: &mut [u8]) {
    let c = color.to_float();
    let v = (f32_to_unorm(c.red, 4) << 12)
        | (f32_to_unorm(c.green, 4) << 8)
        | (f32_to_unorm(c.blue, 4) << 4)
        | f32_to_unorm(c.alpha, 4);
    write_u16(dst, v as u16);
}

/// 16-bit `RGB5_A1`: alpha in bit 0.
pub fn read_r5g5b5a1_unorm(src: &[u8]) -> Color {
    let v = read_u16(src) as u32;
    Color::Float(ColorF::new(
        unorm_to_f32((v >> 11) & 0x1f, 5),
        unorm_to_f32((v >> 6) & 0x1f, 5),
        unorm_to_f32((v >> 1) & 0x1f, 5),
        (v & 1) as f32,
    ))
}

pub fn write_r5g5b5a1_unorm(color: &Color, dst: &mut [u8]) {
    let c = color.to_float();
    let v = (f32_to_unorm(c.red, 5) << 11)
        | (f32_to_unorm(c.green, 5) << 6)
        | (f32_to_unorm(c.blue, 5) << 1)
        | f32_to_unorm(c.alpha, 1);
    write_u16(dst, v as u16);
}

/// 32-bit `RGB10_A2` with red in the low bits.
pub fn read_r10g10b10a2_unorm(src: &[u8]) -> Color {
    let v = read_u32(src);
    Color::Float(ColorF::new(
        unorm_to_f32(v & 0x3ff, 10),
        unorm_to_f32((v >> 10) & 0x3ff, 10),
        unorm_to_f32((v >> 20) & 0x3ff, 10),
        unorm_to_f32(v >> 30, 2),
    ))
}

pub fn write_r10g10b10a2_unorm(color: &Color, dst: &mut [u8]) {
    let c = color.to_float();
    let v = f32_to_unorm(c.red, 10)
        | (f32_to_unorm(c.green, 10) << 10)
        | (f32_to_unorm(c.blue, 10) << 20)
        | (f32_to_unorm(c.alpha, 2) << 30);
    write_u32(dst, v);
}

pub fn read_l8_unorm(src: &[u8]) -> Color {
    let l = unorm8(src, 0);
    Color::Float(ColorF::new(l, l, l, 1.0))
}

pub fn write_l8_unorm(color: &Color, dst: &mut [u8]) {
    dst[0] = f32_to_unorm(color.to_float().red, 8) as u8;
}

pub fn read_a8_unorm(src: &[u8]) -> Color {
    Color::Float(ColorF::new(0.0, 0.0, 0.0, unorm8(src, 0)))
}

pub fn write_a8_unorm(color: &Color, dst: &mut [u8]) {
    dst[0] = f32_to_unorm(color.to_float().alpha, 8) as u8;
}

pub fn read_l8a8_unorm(src: &[u8]) -> Color {
    let l = unorm8(src, 0);
    Color::Float(ColorF::new(l, l, l, unorm8(src, 1)))
}

pub fn write_l8a8_unorm(color: &Color, dst: &mut [u8]) {
    let c = color.to_float();
    dst[0] = f32_to_unorm(c.red, 8) as u8;
    dst[1] = f32_to_unorm(c.alpha, 8) as u8;
}

fn half_at(src: &[u8], i: usize) -> f32 {
    f16::from_bits(read_u16(&src[i * 2..])).to_f32()
}

fn write_half_at(dst: &mut [u8], i: usize, v: f32) {
    write_u16(&mut dst[i * 2..], f16::from_f32(v).to_bits());
}

pub fn read_r16_float(src: &[u8]) -> Color {
    Color::Float(ColorF::new(half_at(src, 0), 0.0, 0.0, 1.0))
}

pub fn write_r16_float(color: &Color, dst: &mut [u8]) {
    write_half_at(dst, 0, color.to_float().red);
}

pub fn read_r16g16b16a16_float(src: &[u8]) -> Color {
    Color::Float(ColorF::new(half_at(src, 0), half_at(src, 1), half_at(src, 2), half_at(src, 3)))
}

pub fn write_r16g16b16a16_float(color: &Color, dst: &mut [u8]) {
    for (i, v) in color.to_float().to_array().into_iter().enumerate() {
        write_half_at(dst, i, v);
    }
}

fn f32_at(src: &[u8], i: usize) -> f32 {
    f32::from_bits(read_u32(&src[i * 4..]))
}

pub fn read_r32_float(src: &[u8]) -> Color {
    Color::Float(ColorF::new(f32_at(src, 0), 0.0, 0.0, 1.0))
}

pub fn write_r32_float(color: &Color, dst: &mut [u8]) {
    write_u32(dst, color.to_float().red.to_bits());
}

pub fn read_r32g32b32a32_float(src: &[u8]) -> Color {
    Color::Float(ColorF::new(f32_at(src, 0), f32_at(src, 1), f32_at(src, 2), f32_at(src, 3)))
}

pub fn write_r32g32b32a32_float(color: &Color, dst: &mut [u8]) {
    for (i, v) in color.to_float().to_array().into_iter().enumerate() {
        write_u32(&mut dst[i * 4..], v.to_bits());
    }
}

pub fn read_r32_uint(src: &[u8]) -> Color {
    Color::Uint(ColorU::new(read_u32(src), 0, 0, 1))
}

pub fn write_r32_uint(color: &Color, dst: &mut [u8]) {
    write_u32(dst, color.to_uint().red);
}

pub fn read_r32g32b32a32_uint(src: &[u8]) -> Color {
    Color::Uint(ColorU::new(
        read_u32(src),
        read_u32(&src[4..]),
        read_u32(&src[8..]),
        read_u32(&src[12..]),
    ))
}

pub fn write_r32g32b32a32_uint(color: &Color, dst: &mut [u8]) {
    let c = color.to_uint();
    for (i, v) in [c.red, c.green, c.blue, c.alpha].into_iter().enumerate() {
        write_u32(&mut dst[i * 4..], v);
    }
}

pub fn read_r32g32b32a32_sint(src: &[u8]) -> Color {
    Color::Int(ColorI::new(
        read_u32(src) as i32,
        read_u32(&src[4..]) as i32,
        read_u32(&src[8..]) as i32,
        read_u32(&src[12..]) as i32,
    ))
}

pub fn write_r32g32b32a32_sint(color: &Color, dst: &mut [u8]) {
    let c = color.to_int();
    for (i, v) in [c.red, c.green, c.blue, c.alpha].into_iter().enumerate() {
        write_u32(&mut dst[i * 4..], v as u32);
    }
}

pub fn read_d16_unorm(src: &[u8]) -> Color {
    Color::DepthStencil(DepthStencil {
        depth: unorm_to_f32(read_u16(src) as u32, 16),
        stencil: 0,
    })
}

pub fn write_d16_unorm(color: &Color, dst: &mut [u8]) {
    write_u16(dst, f32_to_unorm(color.to_depth_stencil().depth, 16) as u16);
}

/// Depth in the low 24 bits, stencil in the high byte.
pub fn read_d24_unorm_s8_uint(src: &[u8]) -> Color {
    let v = read_u32(src);
    Color::DepthStencil(DepthStencil {
        depth: unorm_to_f32(v & 0x00ff_ffff, 24),
        stencil: v >> 24,
    })
}

pub fn write_d24_unorm_s8_uint(color: &Color, dst: &mut [u8]) {
    let ds = color.to_depth_stencil();
    write_u32(dst, f32_to_unorm(ds.depth, 24) | (ds.stencil.min(0xff) << 24));
}

pub fn read_d32_float(src: &[u8]) -> Color {
    Color::DepthStencil(DepthStencil {
        depth: f32_at(src, 0),
        stencil: 0,
    })
}

pub fn write_d32_float(color: &Color, dst: &mut [u8]) {
    write_u32(dst, color.to_depth_stencil().depth.to_bits());
}

pub fn read_s8_uint(src: &[u8]) -> Color {
    Color::DepthStencil(DepthStencil {
        depth: 0.0,
        stencil: src[0] as u32,
    })
}

pub fn write_s8_uint(color: &Color, dst: &mut [u8]) {
    dst[0] = color.to_depth_stencil().stencil.min(0xff) as u8;
}
