#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Rectangle {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Rectangle {
    pub const fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self { x, y, width, height }
    }

    pub const fn x1(&self) -> i32 {
        self.x + self.width
    }

    pub const fn y1(&self) -> i32 {
        self.y + self.height
    }

    pub const fn is_empty(&self) -> bool {
        self.width <= 0 || self.height <= 0
    }

    /// Intersection with `clip`, or `None` when they do not overlap.
    pub fn clip(&self, clip: &Rectangle) -> Option<Rectangle> {
        let x0 = self.x.max(clip.x);
        let y0 = self.y.max(clip.y);
        let x1 = self.x1().min(clip.x1());
        let y1 = self.y1().min(clip.y1());
        if x0 >= x1 || y0 >= y1 {
            return None;
        }
        Some(Rectangle::new(x0, y0, x1 - x0, y1 - y0))
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Extents {
    pub width: i32,
    pub height: i32,
    pub depth: i32,
}

impl Extents {
    pub const fn new(width: i32, height: i32, depth: i32) -> Self {
        Self { width, height, depth }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Box3 {
    pub x: i32,
    pub y: i32,
    pub z: i32,
    pub width: i32,
    pub height: i32,
    pub depth: i32,
}

impl Box3 {
    pub const fn new(x: i32, y: i32, z: i32, width: i32, height: i32, depth: i32) -> Self {
        Self {
            x,
            y,
            z,
            width,
            height,
            depth,
        }
    }
}

/// Clips `rect` to the scissor box when one is enabled.
///
/// With `invert_y` the result is mirrored vertically inside `rect`, for backends whose
/// framebuffer origin is the top-left corner.
pub fn clip_rect_to_scissor(
    scissor: Option<&Rectangle>,
    rect: &Rectangle,
    invert_y: bool,
) -> Option<Rectangle> {
    let Some(scissor) = scissor else {
        return Some(*rect);
    };
    let mut clipped = rect.clip(scissor)?;
    if invert_y {
        clipped.y = rect.height - clipped.y - clipped.height;
    }
    Some(clipped)
}
