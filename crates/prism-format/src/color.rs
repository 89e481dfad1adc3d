use bytemuck::{Pod, Zeroable};

#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Pod, Zeroable)]
pub struct ColorF {
    pub red: f32,
    pub green: f32,
    pub blue: f32,
    pub alpha: f32,
}

#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Pod, Zeroable)]
pub struct ColorU {
    pub red: u32,
    pub green: u32,
    pub blue: u32,
    pub alpha: u32,
}

#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Pod, Zeroable)]
pub struct ColorI {
    pub red: i32,
    pub green: i32,
    pub blue: i32,
    pub alpha: i32,
}

#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Pod, Zeroable)]
pub struct DepthStencil {
    pub depth: f32,
    pub stencil: u32,
}

impl ColorF {
    pub const fn new(red: f32, green: f32, blue: f32, alpha: f32) -> Self {
        Self { red, green, blue, alpha }
    }

    pub const fn to_array(self) -> [f32; 4] {
        [self.red, self.green, self.blue, self.alpha]
    }
}

impl ColorU {
    pub const fn new(red: u32, green: u32, blue: u32, alpha: u32) -> Self {
        Self { red, green, blue, alpha }
    }
}

impl ColorI {
    pub const fn new(red: i32, green: i32, blue: i32, alpha: i32) -> Self {
        Self { red, green, blue, alpha }
    }
}

/// Canonical intermediate color produced by a format's read function and consumed by a
/// write function.
///
/// Conversions between variants are value casts (no normalization): `Uint(255)` becomes
/// `Float(255.0)`, not `Float(1.0)`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Color {
    Float(ColorF),
    Uint(ColorU),
    Int(ColorI),
    DepthStencil(DepthStencil),
}

impl Default for Color {
    fn default() -> Self {
        Color::Float(ColorF::default())
    }
}

impl Color {
    pub fn to_float(&self) -> ColorF {
        match *self {
            Color::Float(c) => c,
            Color::Uint(c) => ColorF::new(
                c.red as f32,
                c.green as f32,
                c.blue as f32,
                c.alpha as f32,
            ),
            Color::Int(c) => ColorF::new(
                c.red as f32,
                c.green as f32,
                c.blue as f32,
                c.alpha as f32,
            ),
            Color::DepthStencil(ds) => ColorF::new(ds.depth, ds.stencil as f32, 0.0, 1.0),
        }
    }

    pub fn to_uint(&self) -> ColorU {
        match *self {
            // `as` saturates and maps NaN to zero.
            Color::Float(c) => ColorU::new(
                c.red as u32,
                c.green as u32,
                c.blue as u32,
                c.alpha as u32,
            ),
            Color::Uint(c) => c,
            Color::Int(c) => ColorU::new(
                c.red.max(0) as u32,
                c.green.max(0) as u32,
                c.blue.max(0) as u32,
                c.alpha.max(0) as u32,
            ),
            Color::DepthStencil(ds) => ColorU::new(ds.stencil, 0, 0, 1),
        }
    }

    pub fn to_int(&self) -> ColorI {
        fn clamp_u32(v: u32) -> i32 {
            v.min(i32::MAX as u32) as i32
        }
        match *self {
            Color::Float(c) => ColorI::new(
                c.red as i32,
                c.green as i32,
                c.blue as i32,
                c.alpha as i32,
            ),
            Color::Uint(c) => ColorI::new(
                clamp_u32(c.red),
                clamp_u32(c.green),
                clamp_u32(c.blue),
                clamp_u32(c.alpha),
            ),
            Color::Int(c) => c,
            Color::DepthStencil(ds) => ColorI::new(clamp_u32(ds.stencil), 0, 0, 1),
        }
    }

    pub fn to_depth_stencil(&self) -> DepthStencil {
        match *self {
            Color::Float(c) => DepthStencil {
                depth: c.red,
                stencil: 0,
            },
            Color::Uint(c) => DepthStencil {
                depth: 0.0,
                stencil: c.red,
            },
            Color::Int(c) => DepthStencil {
                depth: 0.0,
                stencil: c.red.max(0) as u32,
            },
            Color::DepthStencil(ds) => ds,
        }
    }
}
