//! Texture atlas regions
//!
//! Every surface of a radial shape maps its texture coordinates into a
//! `UvArea` instead of the full 0..1 square, so one atlas can carry walls,
//! caps and bolt bands side by side.

use glam::Vec2;

/// Rectangle in normalized atlas space
///
/// `u2 >= u1` and `v2 >= v1` are not required: swapping the corners mirrors
/// the texture across that axis.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct UvArea {
    pub u1: f32,
    pub v1: f32,
    pub u2: f32,
    pub v2: f32,
}

impl UvArea {
    /// The whole texture
    pub const FULL: UvArea = UvArea {
        u1: 0.0,
        v1: 0.0,
        u2: 1.0,
        v2: 1.0,
    };

    pub const fn new(u1: f32, v1: f32, u2: f32, v2: f32) -> Self {
        Self { u1, v1, u2, v2 }
    }

    /// Convert a pixel rectangle into a normalized area
    ///
    /// Pixel space has its origin in the top-left corner with Y growing
    /// downward. Normalized space has V growing upward, so each pixel row
    /// `y` lands on `v = 1 - y / texture_size`. `(x1, y1)` maps to
    /// `(u1, v1)` and `(x2, y2)` to `(u2, v2)`.
    pub fn from_pixels(x1: f32, y1: f32, x2: f32, y2: f32, texture_size: f32) -> Self {
        Self {
            u1: x1 / texture_size,
            v1: 1.0 - y1 / texture_size,
            u2: x2 / texture_size,
            v2: 1.0 - y2 / texture_size,
        }
    }

    /// Map a 0..1 percentage pair into the area
    ///
    /// Both corners are reproduced exactly: `(0, 0)` yields `(u1, v1)` and
    /// `(1, 1)` yields `(u2, v2)`.
    #[inline]
    pub fn map_percent(&self, x: f32, y: f32) -> Vec2 {
        Vec2::new(lerp_exact(self.u1, self.u2, x), lerp_exact(self.v1, self.v2, y))
    }

    /// Map a signed offset inside a box of the given half extents
    ///
    /// `-half_extent` lands on `(u1, v1)`, the origin on the center of the
    /// area and `+half_extent` on `(u2, v2)`. A zero extent collapses that
    /// axis onto the center.
    pub fn map_offset(&self, offset: Vec2, half_extent: Vec2) -> Vec2 {
        let percent = |o: f32, h: f32| if h == 0.0 { 0.5 } else { 0.5 + 0.5 * o / h };
        self.map_percent(percent(offset.x, half_extent.x), percent(offset.y, half_extent.y))
    }

    /// Center of the area
    pub fn center(&self) -> Vec2 {
        self.map_percent(0.5, 0.5)
    }

    /// Sub-rectangle spanning the given percentage ranges of this area
    pub fn sub_area(&self, x1: f32, y1: f32, x2: f32, y2: f32) -> Self {
        let lo = self.map_percent(x1, y1);
        let hi = self.map_percent(x2, y2);
        Self::new(lo.x, lo.y, hi.x, hi.y)
    }

    /// Width in U (negative when mirrored)
    pub fn width(&self) -> f32 {
        self.u2 - self.u1
    }

    /// Height in V (negative when mirrored)
    pub fn height(&self) -> f32 {
        self.v2 - self.v1
    }
}

impl Default for UvArea {
    fn default() -> Self {
        Self::FULL
    }
}

/// Linear interpolation that hits both endpoints bit-exactly
#[inline]
fn lerp_exact(a: f32, b: f32, t: f32) -> f32 {
    a * (1.0 - t) + b * t
}
