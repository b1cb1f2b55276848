//! Cylinder composer
//!
//! One full-sweep ring pair centered on the offset. A nonzero inner radius
//! makes a hollow tube with annular caps, otherwise the caps are fans.

use glam::Vec3;
use tracing::debug;

use crate::buffer::GeometryBuffer;
use crate::error::{face_count, positive_length, positive_radius, Result};
use crate::panel::{PanelGroup, PanelUvs, RingSpec};

/// Parameters for a (possibly tapered, possibly hollow) cylinder
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CylinderShape {
    pub bottom_radius: f32,
    pub top_radius: f32,
    pub height: f32,
    /// 0.0 for a solid cylinder
    pub inner_radius: f32,
    /// Faces around the full circle (min 3)
    pub faces: u32,
    pub offset: Vec3,
    pub uvs: PanelUvs,
}

impl CylinderShape {
    /// Solid, straight cylinder
    pub fn new(radius: f32, height: f32, faces: u32) -> Self {
        Self::tapered(radius, radius, height, faces)
    }

    /// Solid frustum with different bottom and top radii
    pub fn tapered(bottom_radius: f32, top_radius: f32, height: f32, faces: u32) -> Self {
        Self {
            bottom_radius,
            top_radius,
            height,
            inner_radius: 0.0,
            faces,
            offset: Vec3::ZERO,
            uvs: PanelUvs::default(),
        }
    }

    pub fn with_inner_radius(mut self, inner_radius: f32) -> Self {
        self.inner_radius = inner_radius;
        self
    }

    pub fn with_offset(mut self, offset: Vec3) -> Self {
        self.offset = offset;
        self
    }

    pub fn with_uvs(mut self, uvs: PanelUvs) -> Self {
        self.uvs = uvs;
        self
    }

    /// Generate the cylinder mesh
    ///
    /// The bottom ring sits at `offset.y - height / 2`, the top ring at
    /// `offset.y + height / 2`.
    pub fn build(&self) -> Result<GeometryBuffer> {
        let faces = face_count(self.faces)?;
        let height = positive_length("cylinder height", self.height)?;
        let bottom = positive_radius("bottom", self.bottom_radius)?;
        let top = positive_radius("top", self.top_radius)?;

        let half_height = height * 0.5;
        let mut panel = PanelGroup::new(0.0, 360.0, faces, 0.0);
        panel.add_ring_spec(RingSpec::new(-half_height, bottom, self.inner_radius))?;
        panel.add_ring_spec(RingSpec::new(half_height, top, self.inner_radius))?;
        let buffer = panel.assemble(self.offset, &self.uvs)?;

        debug!(
            faces,
            hollow = self.inner_radius > 0.0,
            vertices = buffer.vertex_count(),
            triangles = buffer.triangle_count(),
            "built cylinder"
        );
        Ok(buffer)
    }
}
