use crate::geometry::Rectangle;

/// Orientation of the backend surface relative to the GL framebuffer, as a counter-clockwise
/// rotation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum SurfaceRotation {
    #[default]
    Identity,
    Rotated90Degrees,
    Rotated180Degrees,
    Rotated270Degrees,
}

impl SurfaceRotation {
    pub const ALL: [SurfaceRotation; 4] = [
        SurfaceRotation::Identity,
        SurfaceRotation::Rotated90Degrees,
        SurfaceRotation::Rotated180Degrees,
        SurfaceRotation::Rotated270Degrees,
    ];

    /// Whether width and height swap under this rotation.
    pub const fn is_rotated_aspect_ratio(self) -> bool {
        matches!(self, SurfaceRotation::Rotated90Degrees | SurfaceRotation::Rotated270Degrees)
    }
}

/// Maps a GL-space rectangle into the rotated backend framebuffer.
///
/// GL's y-axis points up; with `flip_y` the backend's points down.
pub fn rotate_rectangle(
    rotation: SurfaceRotation,
    flip_y: bool,
    framebuffer_width: i32,
    framebuffer_height: i32,
    incoming: &Rectangle,
) -> Rectangle {
    match rotation {
        SurfaceRotation::Identity => Rectangle {
            x: incoming.x,
            y: if flip_y {
                framebuffer_height - incoming.y - incoming.height
            } else {
                incoming.y
            },
            width: incoming.width,
            height: incoming.height,
        },
        SurfaceRotation::Rotated90Degrees => Rectangle {
            x: incoming.y,
            y: if flip_y {
                incoming.x
            } else {
                framebuffer_width - incoming.x - incoming.width
            },
            width: incoming.height,
            height: incoming.width,
        },
        SurfaceRotation::Rotated180Degrees => Rectangle {
            x: framebuffer_width - incoming.x - incoming.width,
            y: if flip_y {
                incoming.y
            } else {
                framebuffer_height - incoming.y - incoming.height
            },
            width: incoming.width,
            height: incoming.height,
        },
        SurfaceRotation::Rotated270Degrees => Rectangle {
            x: framebuffer_height - incoming.y - incoming.height,
            y: if flip_y {
                framebuffer_width - incoming.x - incoming.width
            } else {
                incoming.x
            },
            width: incoming.height,
            height: incoming.width,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn aspect_ratio_swaps_for_quarter_turns() {
        let swapped: Vec<bool> = SurfaceRotation::ALL
            .iter()
            .map(|r| r.is_rotated_aspect_ratio())
            .collect();
        assert_eq!(swapped, vec![false, true, false, true]);
    }

    #[test]
    fn identity_flip_mirrors_vertically() {
        let r = Rectangle::new(1, 2, 3, 4);
        assert_eq!(rotate_rectangle(SurfaceRotation::Identity, false, 10, 20, &r), r);
        assert_eq!(
            rotate_rectangle(SurfaceRotation::Identity, true, 10, 20, &r),
            Rectangle::new(1, 14, 3, 4)
        );
    }

    #[test]
    fn quarter_turns_swap_dimensions() {
        let r = Rectangle::new(1, 2, 3, 4);
        for rotation in [SurfaceRotation::Rotated90Degrees, SurfaceRotation::Rotated270Degrees] {
            for flip_y in [false, true] {
                let out = rotate_rectangle(rotation, flip_y, 10, 20, &r);
                assert_eq!((out.width, out.height), (4, 3));
            }
        }
        assert_eq!(
            rotate_rectangle(SurfaceRotation::Rotated90Degrees, false, 10, 20, &r),
            Rectangle::new(2, 6, 4, 3)
        );
        assert_eq!(
            rotate_rectangle(SurfaceRotation::Rotated270Degrees, true, 10, 20, &r),
            Rectangle::new(14, 6, 4, 3)
        );
    }

    #[test]
    fn half_turn_covering_whole_framebuffer_is_stable() {
        let r = Rectangle::new(0, 0, 10, 20);
        assert_eq!(rotate_rectangle(SurfaceRotation::Rotated180Degrees, false, 10, 20, &r), r);
    }
}
