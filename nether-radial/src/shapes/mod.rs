//! Shape composers built on top of the panel engine

pub mod collider;
pub mod cylinder;
pub mod fairing;
pub mod interstage;

pub use collider::convex_proxy;
pub use cylinder::CylinderShape;
pub use fairing::{FairingMesh, FairingShape, FairingUvs};
pub use interstage::{BaseUvs, InterstageMesh, InterstageShape};

use crate::buffer::GeometryBuffer;
use crate::radial::PanelMesh;

/// Output of any composer
#[derive(Clone, Debug, PartialEq)]
pub enum ComposedShape {
    Cylinder(GeometryBuffer),
    Fairing(FairingMesh),
    Interstage(InterstageMesh),
}

impl ComposedShape {
    /// Every visual mesh, panels first
    pub fn visual_buffers(&self) -> Vec<&GeometryBuffer> {
        match self {
            ComposedShape::Cylinder(buffer) => vec![buffer],
            ComposedShape::Fairing(mesh) => mesh.panels.iter().map(|p| &p.buffer).collect(),
            ComposedShape::Interstage(mesh) => mesh
                .panels
                .iter()
                .map(|p| &p.buffer)
                .chain(std::iter::once(&mesh.base))
                .collect(),
        }
    }

    /// Hinged panels with their pivots; empty for a cylinder
    pub fn panels(&self) -> &[PanelMesh] {
        match self {
            ComposedShape::Cylinder(_) => &[],
            ComposedShape::Fairing(mesh) => &mesh.panels,
            ComposedShape::Interstage(mesh) => &mesh.panels,
        }
    }

    pub fn collider(&self) -> Option<&GeometryBuffer> {
        match self {
            ComposedShape::Cylinder(_) => None,
            ComposedShape::Fairing(mesh) => mesh.collider.as_ref(),
            ComposedShape::Interstage(mesh) => Some(&mesh.collider),
        }
    }

    /// All visual meshes merged into one buffer
    pub fn merged(&self) -> GeometryBuffer {
        let mut merged = GeometryBuffer::new();
        for buffer in self.visual_buffers() {
            merged.append(buffer);
        }
        merged
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_panels_per_shape_kind() {
        let cylinder = ComposedShape::Cylinder(CylinderShape::new(1.0, 1.0, 8).build().unwrap());
        assert!(cylinder.panels().is_empty());

        let fairing = FairingShape::new(1.0, 0.8, 1.0, 0.05, 3, 24);
        let interstage = ComposedShape::Interstage(InterstageShape::new(fairing, 0.3).build().unwrap());
        assert_eq!(interstage.panels().len(), 3);
        // Base plate follows the panels
        assert_eq!(interstage.visual_buffers().len(), 4);
    }
}
