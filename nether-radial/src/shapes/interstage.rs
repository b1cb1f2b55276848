//! Interstage composer
//!
//! Hinged fairing panels standing on a solid base plate. The base spans
//! `-base_height..0` below the panels at the fairing's bottom radius, with
//! bolt bands on both edges when it is tall enough to hold them.

use tracing::debug;

use super::collider::convex_proxy;
use super::fairing::FairingShape;
use crate::buffer::GeometryBuffer;
use crate::error::{face_count, positive_length, positive_radius, Result};
use crate::panel::{PanelGroup, PanelUvs, RingSpec, SegmentUv};
use crate::radial::PanelMesh;
use crate::uv::UvArea;

/// Collider resolution when none is configured
pub const DEFAULT_COLLIDER_FACES: u32 = 8;

/// Texture areas for the base plate
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct BaseUvs {
    pub wall: UvArea,
    pub bolt: UvArea,
    pub cap: UvArea,
}

#[derive(Clone, Debug, PartialEq)]
pub struct InterstageMesh {
    pub panels: Vec<PanelMesh>,
    pub base: GeometryBuffer,
    pub collider: GeometryBuffer,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct InterstageShape {
    /// Panel stack above the base; its offset positions the whole interstage
    pub fairing: FairingShape,
    pub base_height: f32,
    pub base_uvs: BaseUvs,
    pub collider_faces: u32,
}

impl InterstageShape {
    pub fn new(fairing: FairingShape, base_height: f32) -> Self {
        Self {
            fairing,
            base_height,
            base_uvs: BaseUvs::default(),
            collider_faces: fairing.collider_faces.unwrap_or(DEFAULT_COLLIDER_FACES),
        }
    }

    pub fn with_base_uvs(mut self, base_uvs: BaseUvs) -> Self {
        self.base_uvs = base_uvs;
        self
    }

    pub fn with_collider_faces(mut self, faces: u32) -> Self {
        self.collider_faces = faces;
        self
    }

    /// Solid base plate below the panels
    pub fn build_base(&self) -> Result<GeometryBuffer> {
        let faces = face_count(self.fairing.faces)?;
        let base = positive_length("base height", self.base_height)?;
        let radius = positive_radius("bottom", self.fairing.bottom_radius)?;
        let bolt = self.fairing.bolt_height;
        let uvs = &self.base_uvs;

        let mut plate = PanelGroup::new(0.0, 360.0, faces, 0.0);
        plate.add_ring_spec(RingSpec::new(-base, radius, 0.0))?;
        if bolt > 0.0 && base > 2.0 * bolt {
            let band = SegmentUv::new(uvs.bolt, uvs.bolt);
            let wall = SegmentUv::new(uvs.wall, uvs.wall);
            plate.add_ring_spec(RingSpec::new(bolt - base, radius, 0.0).with_segment_uv(band))?;
            plate.add_ring_spec(RingSpec::new(-bolt, radius, 0.0).with_segment_uv(wall))?;
            plate.add_ring_spec(RingSpec::new(0.0, radius, 0.0).with_segment_uv(band))?;
        } else {
            plate.add_ring_spec(RingSpec::new(0.0, radius, 0.0))?;
        }
        plate.assemble(self.fairing.offset, &PanelUvs::new(uvs.wall, uvs.wall, uvs.cap))
    }

    /// Convex proxy around base and panels
    pub fn build_collider(&self) -> Result<GeometryBuffer> {
        let f = &self.fairing;
        convex_proxy(
            &[
                (-self.base_height, f.bottom_radius),
                (0.0, f.bottom_radius),
                (f.height, f.top_radius),
            ],
            self.collider_faces,
            f.offset,
        )
    }

    pub fn build(&self) -> Result<InterstageMesh> {
        let panels = self.fairing.build_panels()?;
        let base = self.build_base()?;
        let collider = self.build_collider()?;
        debug!(
            panels = panels.len(),
            base_triangles = base.triangle_count(),
            collider_triangles = collider.triangle_count(),
            "built interstage"
        );
        Ok(InterstageMesh {
            panels,
            base,
            collider,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::RadialError;

    fn fairing() -> FairingShape {
        FairingShape::new(1.0, 1.0, 2.0, 0.05, 4, 16).with_bolts(0.1, true, false)
    }

    #[test]
    fn test_base_with_bolt_bands() {
        let base = InterstageShape::new(fairing(), 0.5).build_base().unwrap();
        // Three wall segments of 2 x 16 plus two fans
        assert_eq!(base.triangle_count(), 3 * 32 + 2 * 16);
        let max_y = base.positions().iter().map(|p| p.y).fold(f32::MIN, f32::max);
        let min_y = base.positions().iter().map(|p| p.y).fold(f32::MAX, f32::min);
        assert!(max_y.abs() < 1e-6);
        assert!((min_y + 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_thin_base_skips_bands() {
        let base = InterstageShape::new(fairing(), 0.15).build_base().unwrap();
        assert_eq!(base.triangle_count(), 32 + 2 * 16);
    }

    #[test]
    fn test_collider_spans_base_and_panels() {
        let mesh = InterstageShape::new(fairing(), 0.5).build().unwrap();
        assert_eq!(mesh.panels.len(), 4);
        // Straight profile collapses to a single segment
        assert_eq!(
            mesh.collider.triangle_count(),
            2 * DEFAULT_COLLIDER_FACES as usize + 2 * DEFAULT_COLLIDER_FACES as usize
        );
        let min_y = mesh.collider.positions().iter().map(|p| p.y).fold(f32::MAX, f32::min);
        assert!((min_y + 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_rejects_missing_base() {
        assert!(matches!(
            InterstageShape::new(fairing(), 0.0).build(),
            Err(RadialError::InvalidHeight { .. })
        ));
    }
}
