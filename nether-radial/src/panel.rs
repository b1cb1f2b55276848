//! Panel assembly
//!
//! A `PanelGroup` owns a stack of outer rings and the matching inner rings
//! and turns them into one closed panel: outer wall, inner wall, bottom and
//! top caps, and two sidewalls when the panel does not cover a full circle.

use glam::{Vec2, Vec3};
use tracing::trace;

use crate::arc::{Arc, NormalTilt, Vertex};
use crate::buffer::{GeometryBuffer, MeshBuilder};
use crate::error::{positive_radius, RadialError, Result};
use crate::uv::UvArea;

/// Sweeps closer than this to a whole revolution count as full circles
const FULL_SWEEP_EPSILON: f32 = 1e-4;

/// Whether `start..end` leaves a gap that sidewalls must close
///
/// Angles that coincide modulo 360 describe a full revolution.
pub fn is_partial_sweep(start_angle: f32, end_angle: f32) -> bool {
    let sweep = (end_angle - start_angle).rem_euclid(360.0);
    sweep > FULL_SWEEP_EPSILON && sweep < 360.0 - FULL_SWEEP_EPSILON
}

/// UV areas for the surfaces of a panel
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct PanelUvs {
    /// Outer wall; V follows the ring height through the whole stack
    pub outer: UvArea,
    /// Inner wall; V follows the ring height through the whole stack
    pub inner: UvArea,
    /// Caps and sidewalls
    pub cap: UvArea,
}

impl PanelUvs {
    pub fn new(outer: UvArea, inner: UvArea, cap: UvArea) -> Self {
        Self { outer, inner, cap }
    }
}

/// UV override for the wall segment below one ring
///
/// The segment maps the full V range of these areas instead of its slice of
/// the stack height. Used for bolt bands and fixed-aspect panel segments.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SegmentUv {
    pub outer: UvArea,
    pub inner: UvArea,
}

impl SegmentUv {
    pub fn new(outer: UvArea, inner: UvArea) -> Self {
        Self { outer, inner }
    }
}

/// Cross-section to add to a panel
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RingSpec {
    pub height: f32,
    pub outer_radius: f32,
    /// 0.0 for a solid body (no inner wall, fan caps)
    pub inner_radius: f32,
    /// UV override for the segment between the previous ring and this one
    pub segment_uv: Option<SegmentUv>,
}

impl RingSpec {
    pub fn new(height: f32, outer_radius: f32, inner_radius: f32) -> Self {
        Self {
            height,
            outer_radius,
            inner_radius,
            segment_uv: None,
        }
    }

    pub fn with_segment_uv(mut self, segment_uv: SegmentUv) -> Self {
        self.segment_uv = Some(segment_uv);
        self
    }
}

/// Stack of rings forming one angular slice of a shape
#[derive(Clone, Debug)]
pub struct PanelGroup {
    start_angle: f32,
    end_angle: f32,
    faces: u32,
    thickness: f32,
    subdivisions: u32,
    partial: bool,
    outer: Vec<Arc>,
    inner: Vec<Arc>,
    /// Aligned with the rings; entry `k` applies to the segment `k - 1 .. k`
    segment_uvs: Vec<Option<SegmentUv>>,
}

impl PanelGroup {
    /// Create an empty panel covering `start_angle..end_angle` degrees
    ///
    /// `thickness` is used by `add_ring` to derive inner rings.
    ///
    /// # Panics
    /// If `faces` is zero.
    pub fn new(start_angle: f32, end_angle: f32, faces: u32, thickness: f32) -> Self {
        assert!(faces > 0, "panel needs at least one face");
        Self {
            start_angle,
            end_angle,
            faces,
            thickness,
            subdivisions: 0,
            partial: is_partial_sweep(start_angle, end_angle),
            outer: Vec::new(),
            inner: Vec::new(),
            segment_uvs: Vec::new(),
        }
    }

    /// Sample every ring added afterwards with extra chord vertices
    pub fn with_subdivisions(mut self, subdivisions: u32) -> Self {
        self.subdivisions = subdivisions;
        self
    }

    /// Add a ring whose inner radius is `radius - thickness`
    pub fn add_ring(&mut self, height: f32, radius: f32) -> Result<()> {
        let radius = positive_radius("outer", radius)?;
        if self.thickness <= 0.0 || !self.thickness.is_finite() {
            return Err(RadialError::InvalidThickness(self.thickness));
        }
        if self.thickness >= radius {
            return Err(RadialError::ThicknessExceedsRadius {
                thickness: self.thickness,
                radius,
            });
        }
        self.add_ring_spec(RingSpec::new(height, radius, radius - self.thickness))
    }

    /// Add a fully specified ring above the current top ring
    pub fn add_ring_spec(&mut self, ring: RingSpec) -> Result<()> {
        let outer_radius = positive_radius("outer", ring.outer_radius)?;
        if !(ring.inner_radius.is_finite()
            && ring.inner_radius >= 0.0
            && ring.inner_radius < outer_radius)
        {
            return Err(RadialError::InvalidInnerRadius {
                inner: ring.inner_radius,
                outer: outer_radius,
            });
        }
        if !ring.height.is_finite() {
            return Err(RadialError::InvalidHeight {
                what: "ring height",
                value: ring.height,
            });
        }
        if let Some(previous) = self.outer.last().map(Arc::height)
            && ring.height <= previous
        {
            return Err(RadialError::RingOrder {
                height: ring.height,
                previous,
            });
        }

        let outer = Arc::new(
            outer_radius,
            ring.height,
            self.start_angle,
            self.end_angle,
            self.faces,
        )
        .with_subdivisions(self.subdivisions);
        self.inner.push(outer.with_radius(ring.inner_radius));
        self.outer.push(outer);
        self.segment_uvs.push(ring.segment_uv);
        Ok(())
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

    pub fn thickness(&self) -> f32 {
        self.thickness
    }

    pub fn ring_count(&self) -> usize {
        self.outer.len()
    }

    pub fn outer_rings(&self) -> &[Arc] {
        &self.outer
    }

    pub fn inner_rings(&self) -> &[Arc] {
        &self.inner
    }

    pub fn is_partial_sweep(&self) -> bool {
        self.partial
    }

    /// Number of sidewall strips `assemble` emits (0 or 2)
    pub fn sidewall_count(&self) -> usize {
        if self.partial { 2 } else { 0 }
    }

    /// Hinge point and yaw, taken from the bottom outer ring
    pub fn pivot(&self) -> Option<(Vec3, f32)> {
        self.outer
            .first()
            .map(|arc| (arc.pivot_point(), arc.pivot_rotation()))
    }

    /// Build the panel into a new buffer
    pub fn assemble(&self, offset: Vec3, uvs: &PanelUvs) -> Result<GeometryBuffer> {
        let mut buffer = GeometryBuffer::new();
        self.assemble_into(&mut buffer, offset, uvs)?;
        Ok(buffer)
    }

    /// Build the panel, appending to an existing buffer
    ///
    /// Nothing is written when the panel is rejected.
    pub fn assemble_into(
        &self,
        buffer: &mut impl MeshBuilder,
        offset: Vec3,
        uvs: &PanelUvs,
    ) -> Result<()> {
        let count = self.outer.len();
        if count < 2 {
            return Err(RadialError::TooFewRings(count));
        }
        assert_eq!(
            count,
            self.inner.len(),
            "outer and inner ring lists out of sync"
        );

        self.emit_walls(buffer, offset, uvs);
        self.emit_cap(buffer, 0, offset, &uvs.cap, false);
        self.emit_cap(buffer, count - 1, offset, &uvs.cap, true);
        if self.partial {
            self.emit_sidewall(buffer, offset, &uvs.cap, false);
            self.emit_sidewall(buffer, offset, &uvs.cap, true);
        }

        trace!(
            start = self.start_angle,
            end = self.end_angle,
            rings = count,
            sidewalls = self.sidewall_count(),
            "assembled panel"
        );
        Ok(())
    }

    fn emit_walls(&self, buffer: &mut impl MeshBuilder, offset: Vec3, uvs: &PanelUvs) {
        let bottom = self.outer[0].height();
        let span = self.outer[self.outer.len() - 1].height() - bottom;
        let fraction = |arc: &Arc| (arc.height() - bottom) / span;

        for k in 0..self.outer.len() - 1 {
            let segment = self.segment_uvs[k + 1];
            let (outer_uv, inner_uv, v0, v1) = match segment {
                Some(seg) => (seg.outer, seg.inner, 0.0, 1.0),
                None => (
                    uvs.outer,
                    uvs.inner,
                    fraction(&self.outer[k]),
                    fraction(&self.outer[k + 1]),
                ),
            };

            let (lo, hi) = (&self.outer[k], &self.outer[k + 1]);
            let tilt = NormalTilt::between(lo.radius(), lo.height(), hi.radius(), hi.height());
            let lower = emit(buffer, lo.sample_ring(offset, &outer_uv, v0, tilt));
            let upper = emit(buffer, hi.sample_ring(offset, &outer_uv, v1, tilt));
            buffer.generate_quad_strip(&lower, &upper, false);

            let (lo, hi) = (&self.inner[k], &self.inner[k + 1]);
            if lo.radius() > 0.0 || hi.radius() > 0.0 {
                let tilt =
                    NormalTilt::between(lo.radius(), lo.height(), hi.radius(), hi.height()).flipped();
                let lower = emit(buffer, lo.sample_ring(offset, &inner_uv, v0, tilt));
                let upper = emit(buffer, hi.sample_ring(offset, &inner_uv, v1, tilt));
                buffer.generate_quad_strip(&lower, &upper, true);
            }
        }
    }

    /// Annulus (or disc, for a solid ring) closing the top or bottom
    fn emit_cap(
        &self,
        buffer: &mut impl MeshBuilder,
        ring: usize,
        offset: Vec3,
        cap_uv: &UvArea,
        top: bool,
    ) {
        let outer = &self.outer[ring];
        let inner = &self.inner[ring];
        let normal = if top { Vec3::Y } else { Vec3::NEG_Y };
        let half_extent = Vec2::splat(outer.radius());

        // Bottom caps mirror Z so both caps read the same way from outside
        let cap_vertex = |v: Vertex| {
            let local = v.position - offset;
            let planar = if top {
                Vec2::new(local.x, local.z)
            } else {
                Vec2::new(local.x, -local.z)
            };
            Vertex {
                position: v.position,
                normal,
                uv: cap_uv.map_offset(planar, half_extent),
            }
        };

        let ring_vertices = |arc: &Arc| {
            arc.sample_ring(offset, cap_uv, 0.0, NormalTilt::VERTICAL)
                .into_iter()
                .map(cap_vertex)
                .collect::<Vec<_>>()
        };

        let outer_idx = emit(buffer, ring_vertices(outer));
        if inner.radius() > 0.0 {
            let inner_idx = emit(buffer, ring_vertices(inner));
            buffer.generate_quad_strip(&outer_idx, &inner_idx, !top);
        } else {
            let center = buffer.add_vertex(
                offset + Vec3::new(0.0, outer.height(), 0.0),
                normal,
                cap_uv.center(),
            );
            buffer.generate_triangle_fan(&outer_idx, center, !top);
        }
    }

    /// Flat wall closing the gap at the start (`end == false`) or end angle
    ///
    /// U follows the cumulative chord length up each column so texel density
    /// stays even along sloped profiles.
    fn emit_sidewall(&self, buffer: &mut impl MeshBuilder, offset: Vec3, cap_uv: &UvArea, end: bool) {
        let angle = if end { self.end_angle } else { self.start_angle };
        let (sin, cos) = angle.to_radians().sin_cos();
        let normal = if end {
            Vec3::new(-sin, 0.0, cos)
        } else {
            Vec3::new(sin, 0.0, -cos)
        };

        let column = |arcs: &[Arc], v: f32| {
            let points: Vec<Vec3> = arcs
                .iter()
                .map(|arc| {
                    offset
                        + if end {
                            arc.end_position()
                        } else {
                            arc.start_position()
                        }
                })
                .collect();
            let params = chord_parameters(&points);
            points
                .into_iter()
                .zip(params)
                .map(|(position, u)| Vertex {
                    position,
                    normal,
                    uv: cap_uv.map_percent(u, v),
                })
                .collect::<Vec<_>>()
        };

        let outer_idx = emit(buffer, column(&self.outer, 0.0));
        let inner_idx = emit(buffer, column(&self.inner, 1.0));
        buffer.generate_quad_strip(&outer_idx, &inner_idx, end);
    }
}

fn emit(buffer: &mut impl MeshBuilder, vertices: impl IntoIterator<Item = Vertex>) -> Vec<u32> {
    vertices
        .into_iter()
        .map(|v| buffer.add_vertex(v.position, v.normal, v.uv))
        .collect()
}

/// Normalized cumulative chord length along a polyline (0.0 .. 1.0)
fn chord_parameters(points: &[Vec3]) -> Vec<f32> {
    let mut params = Vec::with_capacity(points.len());
    let mut total = 0.0;
    params.push(0.0);
    for pair in points.windows(2) {
        total += pair[0].distance(pair[1]);
        params.push(total);
    }
    if total > 0.0 {
        for p in &mut params {
            *p /= total;
        }
        // Land exactly on 1.0 despite rounding
        if let Some(last) = params.last_mut() {
            *last = 1.0;
        }
    }
    params
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Every triangle faces the same way as its vertex normals
    fn assert_consistent_winding(buffer: &GeometryBuffer) {
        let p = buffer.positions();
        let n = buffer.normals();
        for tri in buffer.indices().chunks_exact(3) {
            let [a, b, c] = [tri[0] as usize, tri[1] as usize, tri[2] as usize];
            let face = (p[b] - p[a]).cross(p[c] - p[a]);
            if face.length() < 1e-6 {
                continue;
            }
            let normal = n[a] + n[b] + n[c];
            assert!(face.dot(normal) > 0.0, "triangle {tri:?} faces against its normals");
        }
    }

    fn three_ring_panel() -> PanelGroup {
        let mut panel = PanelGroup::new(0.0, 90.0, 6, 0.1);
        panel.add_ring(0.0, 2.5).unwrap();
        panel.add_ring(1.0, 2.0).unwrap();
        panel.add_ring(2.0, 1.5).unwrap();
        panel
    }

    #[test]
    fn test_partial_sweep_detection() {
        assert!(is_partial_sweep(0.0, 90.0));
        assert!(is_partial_sweep(-30.0, 300.0));
        assert!(!is_partial_sweep(0.0, 360.0));
        assert!(!is_partial_sweep(45.0, 405.0));
        assert!(!is_partial_sweep(90.0, 90.0));
    }

    #[test]
    fn test_rings_must_ascend() {
        let mut panel = PanelGroup::new(0.0, 360.0, 8, 0.1);
        panel.add_ring(1.0, 2.0).unwrap();
        assert!(matches!(panel.add_ring(1.0, 2.0), Err(RadialError::RingOrder { .. })));
        assert!(matches!(panel.add_ring(0.5, 2.0), Err(RadialError::RingOrder { .. })));
        assert_eq!(panel.ring_count(), 1);
    }

    #[test]
    fn test_invalid_rings_rejected() {
        let mut panel = PanelGroup::new(0.0, 360.0, 8, 0.5);
        assert!(matches!(
            panel.add_ring(0.0, 0.5),
            Err(RadialError::ThicknessExceedsRadius { .. })
        ));
        assert!(matches!(
            panel.add_ring(0.0, -1.0),
            Err(RadialError::InvalidRadius { .. })
        ));
        assert!(matches!(
            panel.add_ring_spec(RingSpec::new(0.0, 1.0, 1.0)),
            Err(RadialError::InvalidInnerRadius { .. })
        ));

        let mut solid = PanelGroup::new(0.0, 360.0, 8, 0.0);
        assert!(matches!(
            solid.add_ring(0.0, 1.0),
            Err(RadialError::InvalidThickness(_))
        ));
        solid.add_ring_spec(RingSpec::new(0.0, 1.0, 0.0)).unwrap();
    }

    #[test]
    fn test_too_few_rings() {
        let mut panel = PanelGroup::new(0.0, 360.0, 8, 0.1);
        assert!(matches!(
            panel.assemble(Vec3::ZERO, &PanelUvs::default()),
            Err(RadialError::TooFewRings(0))
        ));
        panel.add_ring(0.0, 1.0).unwrap();
        assert!(matches!(
            panel.assemble(Vec3::ZERO, &PanelUvs::default()),
            Err(RadialError::TooFewRings(1))
        ));
    }

    #[test]
    fn test_full_sweep_hollow_counts() {
        let faces = 12;
        let mut panel = PanelGroup::new(0.0, 360.0, faces, 0.2);
        panel.add_ring(0.0, 1.0).unwrap();
        panel.add_ring(1.0, 1.0).unwrap();
        assert_eq!(panel.sidewall_count(), 0);

        let buffer = panel.assemble(Vec3::ZERO, &PanelUvs::default()).unwrap();
        let f = faces as usize;
        // outer wall + inner wall + two annular caps
        assert_eq!(buffer.triangle_count(), 2 * f + 2 * f + 2 * f + 2 * f);
        assert_eq!(buffer.vertex_count(), 8 * (f + 1));
        assert_consistent_winding(&buffer);
    }

    #[test]
    fn test_solid_body_uses_fans() {
        let faces = 10;
        let mut panel = PanelGroup::new(0.0, 360.0, faces, 0.0);
        panel.add_ring_spec(RingSpec::new(0.0, 1.0, 0.0)).unwrap();
        panel.add_ring_spec(RingSpec::new(2.0, 0.5, 0.0)).unwrap();
        let buffer = panel.assemble(Vec3::ZERO, &PanelUvs::default()).unwrap();
        let f = faces as usize;
        assert_eq!(buffer.triangle_count(), 2 * f + f + f);
        assert_consistent_winding(&buffer);
    }

    #[test]
    fn test_partial_sweep_sidewalls() {
        let panel = three_ring_panel();
        assert!(panel.is_partial_sweep());
        assert_eq!(panel.sidewall_count(), 2);
        assert_eq!(panel.outer_rings()[0].faces(), 6);

        let buffer = panel.assemble(Vec3::ZERO, &PanelUvs::default()).unwrap();
        // 2 wall segments x (outer + inner) x 2F, 2 annular caps x 2F, 2 sidewalls x 2 segments x 2
        assert_eq!(buffer.triangle_count(), 2 * 2 * 12 + 2 * 12 + 2 * 2 * 2);
        assert_consistent_winding(&buffer);

        // Left sidewall normals point to -Z at 0 degrees, right ones to -X at 90 degrees
        let left = buffer.normals().iter().filter(|n| (**n - Vec3::NEG_Z).length() < 1e-5).count();
        let right = buffer.normals().iter().filter(|n| (**n - Vec3::NEG_X).length() < 1e-5).count();
        assert_eq!(left, 6);
        assert_eq!(right, 6);
    }

    #[test]
    fn test_sidewall_u_follows_chord_length() {
        let panel = three_ring_panel();
        let buffer = panel.assemble(Vec3::ZERO, &PanelUvs::default()).unwrap();

        let left: Vec<usize> = (0..buffer.vertex_count())
            .filter(|&i| (buffer.normals()[i] - Vec3::NEG_Z).length() < 1e-5)
            .collect();
        // Outer column first (V = 0), then inner column (V = 1)
        let outer_u: Vec<f32> = left[..3].iter().map(|&i| buffer.uvs()[i].x).collect();
        let inner_u: Vec<f32> = left[3..].iter().map(|&i| buffer.uvs()[i].x).collect();
        for column in [&outer_u, &inner_u] {
            assert_eq!(column[0], 0.0);
            assert_eq!(column[2], 1.0);
            assert!(column[0] < column[1] && column[1] < column[2]);
        }
        // Equal slopes give equal chords, so the middle ring sits halfway
        assert!((outer_u[1] - 0.5).abs() < 1e-5);
        assert!(left[..3].iter().all(|&i| buffer.uvs()[i].y == 0.0));
        assert!(left[3..].iter().all(|&i| buffer.uvs()[i].y == 1.0));
    }

    #[test]
    fn test_wall_v_follows_height_fraction() {
        let panel = three_ring_panel();
        let uvs = PanelUvs::new(UvArea::new(0.0, 0.0, 1.0, 0.5), UvArea::FULL, UvArea::FULL);
        let buffer = panel.assemble(Vec3::ZERO, &uvs).unwrap();
        // First outer wall strip: 7 vertices at V 0.0, then 7 at V 0.25
        assert!(buffer.uvs()[..7].iter().all(|uv| uv.y == 0.0));
        assert!(buffer.uvs()[7..14].iter().all(|uv| (uv.y - 0.25).abs() < 1e-6));
    }

    #[test]
    fn test_segment_uv_override() {
        let band = UvArea::new(0.0, 0.9, 1.0, 1.0);
        let mut panel = PanelGroup::new(0.0, 360.0, 8, 0.1);
        panel.add_ring(0.0, 1.0).unwrap();
        panel
            .add_ring_spec(RingSpec::new(0.1, 1.0, 0.9).with_segment_uv(SegmentUv::new(band, band)))
            .unwrap();
        panel.add_ring(1.0, 1.0).unwrap();
        let buffer = panel.assemble(Vec3::ZERO, &PanelUvs::default()).unwrap();
        assert!(buffer.uvs()[..9].iter().all(|uv| uv.y == 0.9));
        assert!(buffer.uvs()[9..18].iter().all(|uv| uv.y == 1.0));
    }

    #[test]
    fn test_rejected_assembly_leaves_buffer_untouched() {
        let mut buffer = GeometryBuffer::new();
        three_ring_panel()
            .assemble_into(&mut buffer, Vec3::ZERO, &PanelUvs::default())
            .unwrap();
        let before = buffer.clone();
        let lonely = PanelGroup::new(0.0, 90.0, 6, 0.1);
        assert!(lonely.assemble_into(&mut buffer, Vec3::ZERO, &PanelUvs::default()).is_err());
        assert_eq!(buffer, before);
    }

    #[test]
    fn test_chord_parameters() {
        let params = chord_parameters(&[Vec3::ZERO, Vec3::Y, Vec3::new(0.0, 3.0, 0.0)]);
        assert_eq!(params, vec![0.0, 1.0 / 3.0, 1.0]);
    }
}
