//! Radial rings
//!
//! An `Arc` describes one horizontal cross-section of a body of revolution.
//! It is immutable; the inner wall of a shell is a second `Arc` built with
//! the reduced radius.

use glam::{Vec2, Vec3};

use crate::uv::UvArea;

/// Vertex produced by ring sampling
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Vertex {
    pub position: Vec3,
    pub normal: Vec3,
    pub uv: Vec2,
}

/// Wall slope encoded as the radial and vertical parts of a normal
///
/// A ring vertex at angle `a` gets the normal
/// `(cos(a) * cos, sin, sin(a) * cos)`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct NormalTilt {
    pub cos: f32,
    pub sin: f32,
}

impl NormalTilt {
    /// Vertical wall, normal pointing straight out from the axis
    pub const VERTICAL: NormalTilt = NormalTilt { cos: 1.0, sin: 0.0 };

    /// Outward normal of the wall running from `(r0, h0)` up to `(r1, h1)`
    ///
    /// A wall narrowing toward the top tilts its normal upward.
    pub fn between(r0: f32, h0: f32, r1: f32, h1: f32) -> Self {
        let angle = (r0 - r1).atan2(h1 - h0);
        Self {
            cos: angle.cos(),
            sin: angle.sin(),
        }
    }

    /// The same tilt with the normal reversed (inner walls)
    pub fn flipped(self) -> Self {
        Self {
            cos: -self.cos,
            sin: -self.sin,
        }
    }
}

/// One horizontal ring, or part of one
#[derive(Clone, Debug, PartialEq)]
pub struct Arc {
    radius: f32,
    height: f32,
    start_angle: f32,
    end_angle: f32,
    faces: u32,
    subdivisions: u32,
    length: f32,
    start: Vec3,
    end: Vec3,
}

impl Arc {
    /// Create a ring at `height` spanning `start_angle..end_angle` degrees
    ///
    /// `end_angle` may exceed 360 to wrap past the +X axis.
    ///
    /// # Panics
    /// If `faces` is zero or `radius` is negative.
    pub fn new(radius: f32, height: f32, start_angle: f32, end_angle: f32, faces: u32) -> Self {
        assert!(faces > 0, "arc needs at least one face");
        assert!(radius >= 0.0, "arc radius must be >= 0.0 (got {radius})");

        let sweep = (end_angle - start_angle).to_radians();
        Self {
            radius,
            height,
            start_angle,
            end_angle,
            faces,
            subdivisions: 0,
            length: (sweep * radius).abs(),
            start: point_on_ring(radius, height, start_angle),
            end: point_on_ring(radius, height, end_angle),
        }
    }

    /// Insert `subdivisions` extra vertices between each pair of angular samples
    ///
    /// The extra vertices sit on the chord, so the faceting is unchanged; only
    /// the UV gradient gets more sample points.
    pub fn with_subdivisions(mut self, subdivisions: u32) -> Self {
        self.subdivisions = subdivisions;
        self
    }

    /// Same angles, height and face count with a different radius
    pub fn with_radius(&self, radius: f32) -> Self {
        Self::new(radius, self.height, self.start_angle, self.end_angle, self.faces)
            .with_subdivisions(self.subdivisions)
    }

    /// Concentric ring `thickness` closer to the axis
    pub fn lowered(&self, thickness: f32) -> Self {
        self.with_radius(self.radius - thickness)
    }

    pub fn radius(&self) -> f32 {
        self.radius
    }

    pub fn height(&self) -> f32 {
        self.height
    }

    pub fn start_angle(&self) -> f32 {
        self.start_angle
    }

    pub fn end_angle(&self) -> f32 {
        self.end_angle
    }

    pub fn faces(&self) -> u32 {
        self.faces
    }

    pub fn subdivisions(&self) -> u32 {
        self.subdivisions
    }

    /// Angular width in degrees
    pub fn sweep(&self) -> f32 {
        self.end_angle - self.start_angle
    }

    /// Arc length at this ring's radius
    pub fn length(&self) -> f32 {
        self.length
    }

    /// Position of the first vertex (no offset applied)
    pub fn start_position(&self) -> Vec3 {
        self.start
    }

    /// Position of the closing vertex (no offset applied)
    pub fn end_position(&self) -> Vec3 {
        self.end
    }

    /// Number of vertices `sample_ring` returns
    pub fn vertex_count(&self) -> usize {
        (self.faces * (self.subdivisions + 1)) as usize + 1
    }

    /// Sample the ring into vertices from start to end angle
    ///
    /// U runs across `uv` from `u1` to `u2` along the arc, V is fixed at the
    /// `v` percentage of the area. Returns `faces + 1` vertices, plus
    /// `subdivisions` per face in subdivision mode.
    pub fn sample_ring(&self, offset: Vec3, uv: &UvArea, v: f32, tilt: NormalTilt) -> Vec<Vertex> {
        let steps = self.faces * (self.subdivisions + 1);
        let mut vertices = Vec::with_capacity(steps as usize + 1);

        let corner = |face: u32| {
            let angle = if face == self.faces {
                self.end_angle
            } else {
                self.start_angle + self.sweep() * face as f32 / self.faces as f32
            };
            let (sin, cos) = angle.to_radians().sin_cos();
            let position = Vec3::new(cos * self.radius, self.height, sin * self.radius) + offset;
            let normal = Vec3::new(cos * tilt.cos, tilt.sin, sin * tilt.cos);
            (position, normal)
        };

        let mut previous = corner(0);
        for face in 0..self.faces {
            let next = corner(face + 1);
            for sub in 0..=self.subdivisions {
                let t = sub as f32 / (self.subdivisions + 1) as f32;
                let step = face * (self.subdivisions + 1) + sub;
                vertices.push(Vertex {
                    position: previous.0.lerp(next.0, t),
                    normal: previous.1.lerp(next.1, t).try_normalize().unwrap_or(previous.1),
                    uv: uv.map_percent(step as f32 / steps as f32, v),
                });
            }
            previous = next;
        }
        vertices.push(Vertex {
            position: previous.0,
            normal: previous.1,
            uv: uv.map_percent(1.0, v),
        });

        vertices
    }

    /// Point at the angular midpoint, at this ring's radius and height
    pub fn pivot_point(&self) -> Vec3 {
        point_on_ring(self.radius, self.height, self.pivot_rotation())
    }

    /// Yaw of the angular midpoint in degrees
    pub fn pivot_rotation(&self) -> f32 {
        (self.start_angle + self.end_angle) * 0.5
    }
}

fn point_on_ring(radius: f32, height: f32, angle: f32) -> Vec3 {
    let (sin, cos) = angle.to_radians().sin_cos();
    Vec3::new(cos * radius, height, sin * radius)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn yaw(p: Vec3) -> f32 {
        p.z.atan2(p.x).to_degrees()
    }

    #[test]
    fn test_sample_count() {
        for faces in [1, 3, 6, 24, 64] {
            let arc = Arc::new(2.0, 0.5, 0.0, 90.0, faces);
            let ring = arc.sample_ring(Vec3::ZERO, &UvArea::FULL, 0.0, NormalTilt::VERTICAL);
            assert_eq!(ring.len(), faces as usize + 1);
        }
    }

    #[test]
    fn test_endpoints_span_sweep() {
        for (start, end) in [(0.0, 90.0), (30.0, 150.0), (-45.0, 45.0), (300.0, 420.0)] {
            let arc = Arc::new(2.5, 1.0, start, end, 7);
            let ring = arc.sample_ring(Vec3::ZERO, &UvArea::FULL, 0.0, NormalTilt::VERTICAL);
            let first = ring[0].position;
            let last = ring[ring.len() - 1].position;
            let swept = (yaw(last) - yaw(first)).rem_euclid(360.0);
            assert!((swept - (end - start)).abs() < 1e-3, "{start}..{end}: {swept}");
            assert!((first.length() - Vec3::new(2.5, 1.0, 0.0).length()).abs() < 1e-4);
            assert!((first - arc.start_position()).length() < 1e-5);
            assert!((last - arc.end_position()).length() < 1e-5);
        }
    }

    #[test]
    fn test_offset_and_height() {
        let offset = Vec3::new(1.0, 2.0, 3.0);
        let arc = Arc::new(1.0, 0.5, 0.0, 180.0, 4);
        let ring = arc.sample_ring(offset, &UvArea::FULL, 0.0, NormalTilt::VERTICAL);
        assert!((ring[0].position - Vec3::new(2.0, 2.5, 3.0)).length() < 1e-5);
        assert!(ring.iter().all(|v| (v.position.y - 2.5).abs() < 1e-6));
    }

    #[test]
    fn test_uv_runs_across_area() {
        let area = UvArea::new(0.2, 0.4, 0.6, 0.8);
        let arc = Arc::new(1.0, 0.0, 0.0, 90.0, 4);
        let ring = arc.sample_ring(Vec3::ZERO, &area, 1.0, NormalTilt::VERTICAL);
        assert_eq!(ring[0].uv, Vec2::new(0.2, 0.8));
        assert_eq!(ring[4].uv, Vec2::new(0.6, 0.8));
        assert!(ring.windows(2).all(|w| w[1].uv.x > w[0].uv.x));
    }

    #[test]
    fn test_tilted_normals() {
        let tilt = NormalTilt::between(2.0, 0.0, 1.0, 1.0);
        assert!(tilt.sin > 0.0);
        assert!((tilt.cos - tilt.sin).abs() < 1e-6);

        let arc = Arc::new(2.0, 0.0, 0.0, 360.0, 8);
        for v in arc.sample_ring(Vec3::ZERO, &UvArea::FULL, 0.0, tilt) {
            assert!((v.normal.length() - 1.0).abs() < 1e-5);
            assert!((v.normal.y - tilt.sin).abs() < 1e-6);
        }
        assert_eq!(NormalTilt::between(1.0, 0.0, 1.0, 2.0), NormalTilt::VERTICAL);
    }

    #[test]
    fn test_subdivision_keeps_facets() {
        let arc = Arc::new(1.0, 0.0, 0.0, 90.0, 2).with_subdivisions(3);
        assert_eq!(arc.vertex_count(), 9);
        let ring = arc.sample_ring(Vec3::ZERO, &UvArea::FULL, 0.0, NormalTilt::VERTICAL);
        assert_eq!(ring.len(), 9);

        // Inserted vertices lie on the chord between angular samples
        let (a, b) = (ring[0].position, ring[4].position);
        for v in &ring[1..4] {
            let chord = (b - a).normalize();
            let along = (v.position - a).dot(chord);
            assert!(((a + chord * along) - v.position).length() < 1e-5);
        }
        assert!(ring.windows(2).all(|w| w[1].uv.x > w[0].uv.x));
        assert_eq!(ring[8].uv.x, 1.0);
    }

    #[test]
    fn test_lowered_and_pivot() {
        let arc = Arc::new(2.5, 1.0, 0.0, 90.0, 6);
        let inner = arc.lowered(0.1);
        assert!((inner.radius() - 2.4).abs() < 1e-6);
        assert_eq!(inner.faces(), 6);
        assert_eq!(inner.height(), 1.0);

        assert_eq!(arc.pivot_rotation(), 45.0);
        let pivot = arc.pivot_point();
        assert!((yaw(pivot) - 45.0).abs() < 1e-4);
        assert!((Vec2::new(pivot.x, pivot.z).length() - 2.5).abs() < 1e-5);
        assert!((arc.length() - 2.5 * std::f32::consts::FRAC_PI_2).abs() < 1e-5);
    }
}
