//! Multi-panel orchestration
//!
//! `RadialMesh` splits an angular sweep into equal slices and keeps one
//! `PanelGroup` per slice. Every ring the caller adds is replicated into all
//! panels, and `build_all` produces one independent mesh per panel together
//! with its hinge pivot.

use glam::Vec3;
use tracing::debug;

use crate::buffer::{GeometryBuffer, MeshOutput};
use crate::error::{face_count, positive_radius, RadialError, Result};
use crate::panel::{PanelGroup, PanelUvs, RingSpec, SegmentUv};

/// One built panel and the pivot it swings around
#[derive(Clone, Debug, PartialEq)]
pub struct PanelMesh {
    pub buffer: GeometryBuffer,
    /// Bottom outer ring midpoint, offset included
    pub pivot: Vec3,
    /// Yaw of the pivot in degrees
    pub pivot_rotation: f32,
}

impl PanelMesh {
    /// Finalize the panel's buffer into flat arrays
    pub fn output(&self) -> MeshOutput {
        self.buffer.build_output()
    }
}

/// Sweep partitioned into independent panels
#[derive(Clone, Debug)]
pub struct RadialMesh {
    sweep_start: f32,
    sweep_end: f32,
    faces_per_circle: u32,
    thickness: f32,
    panels: Vec<PanelGroup>,
}

impl RadialMesh {
    /// Partition `sweep_start..sweep_end` degrees into `panel_count` panels
    ///
    /// Each panel gets `faces_per_circle * panel_sweep / 360` faces, rounded
    /// to the nearest whole face (at least one). A sweep whose ends coincide
    /// is widened to a full revolution; anything wider than 360 is rejected.
    pub fn configure(
        sweep_start: f32,
        mut sweep_end: f32,
        panel_count: u32,
        faces_per_circle: u32,
        thickness: f32,
    ) -> Result<Self> {
        if panel_count == 0 {
            return Err(RadialError::NoPanels);
        }
        let faces_per_circle = face_count(faces_per_circle)?;
        if !thickness.is_finite() || thickness < 0.0 {
            return Err(RadialError::InvalidThickness(thickness));
        }
        if !sweep_start.is_finite() || !sweep_end.is_finite() {
            return Err(RadialError::InvalidSweep {
                start: sweep_start,
                end: sweep_end,
            });
        }

        if (sweep_end - sweep_start).abs() < 1e-3 {
            debug!(
                start = sweep_start,
                end = sweep_end,
                "sweep ends coincide, treating as full revolution"
            );
            sweep_end = sweep_start + 360.0;
        }
        let sweep = sweep_end - sweep_start;
        if sweep <= 0.0 || sweep > 360.0 + 1e-3 {
            return Err(RadialError::InvalidSweep {
                start: sweep_start,
                end: sweep_end,
            });
        }

        let angle_per_panel = sweep / panel_count as f32;
        let faces_per_panel = panel_faces(faces_per_circle, angle_per_panel);
        let panels = (0..panel_count)
            .map(|i| {
                let start = sweep_start + angle_per_panel * i as f32;
                let end = if i + 1 == panel_count {
                    sweep_end
                } else {
                    sweep_start + angle_per_panel * (i + 1) as f32
                };
                PanelGroup::new(start, end, faces_per_panel, thickness)
            })
            .collect();

        Ok(Self {
            sweep_start,
            sweep_end,
            faces_per_circle,
            thickness,
            panels,
        })
    }

    /// Insert extra chord vertices on every ring added afterwards
    pub fn with_subdivisions(mut self, subdivisions: u32) -> Self {
        self.panels = self
            .panels
            .into_iter()
            .map(|panel| panel.with_subdivisions(subdivisions))
            .collect();
        self
    }

    pub fn sweep_start(&self) -> f32 {
        self.sweep_start
    }

    pub fn sweep_end(&self) -> f32 {
        self.sweep_end
    }

    pub fn panel_count(&self) -> usize {
        self.panels.len()
    }

    pub fn faces_per_circle(&self) -> u32 {
        self.faces_per_circle
    }

    pub fn thickness(&self) -> f32 {
        self.thickness
    }

    pub fn angle_per_panel(&self) -> f32 {
        (self.sweep_end - self.sweep_start) / self.panels.len() as f32
    }

    pub fn panels(&self) -> &[PanelGroup] {
        &self.panels
    }

    /// Add a ring to every panel; inner radius is `radius - thickness`
    ///
    /// Rings must be added bottom to top.
    pub fn add_ring(&mut self, height: f32, radius: f32) -> Result<()> {
        // Panels share parameters, so the first rejection happens before any mutation
        for panel in &mut self.panels {
            panel.add_ring(height, radius)?;
        }
        Ok(())
    }

    /// Add a ring with an explicit inner radius (0.0 for a solid body)
    pub fn add_ring_with_inner(&mut self, height: f32, radius: f32, inner_radius: f32) -> Result<()> {
        self.add_ring_spec(RingSpec::new(height, radius, inner_radius))
    }

    /// Add a ring whose segment below maps its own UV areas
    pub fn add_band(&mut self, height: f32, radius: f32, segment_uv: SegmentUv) -> Result<()> {
        let radius = positive_radius("outer", radius)?;
        if self.thickness <= 0.0 {
            return Err(RadialError::InvalidThickness(self.thickness));
        }
        if self.thickness >= radius {
            return Err(RadialError::ThicknessExceedsRadius {
                thickness: self.thickness,
                radius,
            });
        }
        let ring = RingSpec::new(height, radius, radius - self.thickness);
        self.add_ring_spec(ring.with_segment_uv(segment_uv))
    }

    /// Add a fully specified ring to every panel
    pub fn add_ring_spec(&mut self, ring: RingSpec) -> Result<()> {
        for panel in &mut self.panels {
            panel.add_ring_spec(ring)?;
        }
        Ok(())
    }

    /// Assemble every panel
    ///
    /// Building twice with the same rings yields identical buffers.
    pub fn build_all(&self, offset: Vec3, uvs: &PanelUvs) -> Result<Vec<PanelMesh>> {
        let meshes = self
            .panels
            .iter()
            .map(|panel| {
                let buffer = panel.assemble(offset, uvs)?;
                let (pivot, pivot_rotation) = panel
                    .pivot()
                    .ok_or(RadialError::TooFewRings(panel.ring_count()))?;
                Ok(PanelMesh {
                    buffer,
                    pivot: pivot + offset,
                    pivot_rotation,
                })
            })
            .collect::<Result<Vec<_>>>()?;

        debug!(
            panels = meshes.len(),
            vertices = meshes.iter().map(|m| m.buffer.vertex_count()).sum::<usize>(),
            triangles = meshes.iter().map(|m| m.buffer.triangle_count()).sum::<usize>(),
            "built radial mesh"
        );
        Ok(meshes)
    }
}

/// Faces for one panel, rounded from the full-circle face count
pub fn panel_faces(faces_per_circle: u32, panel_sweep: f32) -> u32 {
    ((faces_per_circle as f32 * panel_sweep / 360.0).round() as u32).max(1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_configure_rejects_bad_parameters() {
        assert!(matches!(
            RadialMesh::configure(0.0, 360.0, 0, 24, 0.1),
            Err(RadialError::NoPanels)
        ));
        assert!(matches!(
            RadialMesh::configure(0.0, 360.0, 2, 2, 0.1),
            Err(RadialError::TooFewFaces(2))
        ));
        assert!(matches!(
            RadialMesh::configure(0.0, 360.0, 2, 24, -0.1),
            Err(RadialError::InvalidThickness(_))
        ));
        assert!(matches!(
            RadialMesh::configure(90.0, 0.0, 2, 24, 0.1),
            Err(RadialError::InvalidSweep { .. })
        ));
        assert!(matches!(
            RadialMesh::configure(0.0, 540.0, 2, 24, 0.1),
            Err(RadialError::InvalidSweep { .. })
        ));
        assert!(matches!(
            RadialMesh::configure(0.0, 720.0, 2, 24, 0.1),
            Err(RadialError::InvalidSweep { .. })
        ));
        assert!(matches!(
            RadialMesh::configure(-360.0, 360.0, 2, 24, 0.1),
            Err(RadialError::InvalidSweep { .. })
        ));
    }

    #[test]
    fn test_panels_partition_sweep() {
        let mesh = RadialMesh::configure(0.0, 360.0, 4, 24, 0.1).unwrap();
        assert_eq!(mesh.panel_count(), 4);
        assert_eq!(mesh.angle_per_panel(), 90.0);
        for (i, panel) in mesh.panels().iter().enumerate() {
            assert_eq!(panel.start_angle(), 90.0 * i as f32);
            assert_eq!(panel.end_angle(), 90.0 * (i + 1) as f32);
            assert_eq!(panel.faces(), 6);
            assert!(panel.is_partial_sweep());
        }
    }

    #[test]
    fn test_single_full_panel_has_no_sidewalls() {
        let mesh = RadialMesh::configure(0.0, 360.0, 1, 24, 0.1).unwrap();
        assert_eq!(mesh.panels()[0].sidewall_count(), 0);
    }

    #[test]
    fn test_coinciding_ends_become_full_sweep() {
        let mesh = RadialMesh::configure(30.0, 30.0, 1, 12, 0.1).unwrap();
        assert_eq!(mesh.sweep_end(), 390.0);
        assert!(!mesh.panels()[0].is_partial_sweep());
    }

    #[test]
    fn test_panel_face_rounding() {
        assert_eq!(panel_faces(24, 90.0), 6);
        assert_eq!(panel_faces(24, 100.0), 7);
        assert_eq!(panel_faces(24, 5.0), 1);
        assert_eq!(panel_faces(10, 120.0), 3);
    }

    #[test]
    fn test_add_ring_reaches_every_panel() {
        let mut mesh = RadialMesh::configure(0.0, 180.0, 3, 24, 0.1).unwrap();
        mesh.add_ring(0.0, 1.0).unwrap();
        mesh.add_ring(1.0, 0.8).unwrap();
        assert!(mesh.add_ring(0.5, 0.8).is_err());
        for panel in mesh.panels() {
            assert_eq!(panel.ring_count(), 2);
            assert!((panel.inner_rings()[1].radius() - 0.7).abs() < 1e-6);
        }
    }

    #[test]
    fn test_build_all_pivots() {
        let mut mesh = RadialMesh::configure(0.0, 360.0, 2, 16, 0.05).unwrap();
        mesh.add_ring(0.0, 1.0).unwrap();
        mesh.add_ring(2.0, 1.0).unwrap();
        let offset = Vec3::new(0.0, 5.0, 0.0);
        let panels = mesh.build_all(offset, &PanelUvs::default()).unwrap();
        assert_eq!(panels.len(), 2);
        assert_eq!(panels[0].pivot_rotation, 90.0);
        assert_eq!(panels[1].pivot_rotation, 270.0);
        assert!((panels[0].pivot - Vec3::new(0.0, 5.0, 1.0)).length() < 1e-5);
        assert!((panels[1].pivot - Vec3::new(0.0, 5.0, -1.0)).length() < 1e-5);
    }

    #[test]
    fn test_build_all_needs_rings() {
        let mut mesh = RadialMesh::configure(0.0, 360.0, 2, 16, 0.05).unwrap();
        mesh.add_ring(0.0, 1.0).unwrap();
        assert!(matches!(
            mesh.build_all(Vec3::ZERO, &PanelUvs::default()),
            Err(RadialError::TooFewRings(1))
        ));
    }
}
