//! Parametric radial mesh generation
//!
//! Bodies of revolution (cylinders, tapered fairings, interstages) are
//! described as a stack of rings swept around the Y axis. A sweep is cut into
//! hinged panels; each panel is assembled into its own mesh with walls, caps
//! and, for partial sweeps, sidewalls closing the cut faces.
//!
//! Layers, bottom up:
//! - [`uv`]: atlas regions every surface maps into
//! - [`buffer`] / [`tangent`]: vertex accumulation and finalization
//! - [`arc`]: one sampled ring
//! - [`panel`]: rings of one angular slice, assembled into a closed mesh
//! - [`radial`]: a sweep partitioned into panels
//! - [`shapes`]: composers for common rocket parts
//! - [`config`]: TOML registry of atlas layouts and shape presets
//!
//! ```
//! use glam::Vec3;
//! use nether_radial::{PanelUvs, RadialMesh};
//!
//! let mut mesh = RadialMesh::configure(0.0, 360.0, 2, 24, 0.05)?;
//! mesh.add_ring(0.0, 1.0)?;
//! mesh.add_ring(2.0, 0.6)?;
//! let panels = mesh.build_all(Vec3::ZERO, &PanelUvs::default())?;
//! assert_eq!(panels.len(), 2);
//! # Ok::<(), nether_radial::RadialError>(())
//! ```

pub mod arc;
pub mod buffer;
pub mod config;
pub mod error;
pub mod panel;
pub mod radial;
pub mod shapes;
pub mod tangent;
pub mod uv;


pub use arc::{Arc, NormalTilt, Vertex};
pub use buffer::{GeometryBuffer, MeshBuilder, MeshOutput};
pub use config::{ShapePreset, ShapeRegistry, UvLayout};
pub use error::{RadialError, Result};
pub use panel::{is_partial_sweep, PanelGroup, PanelUvs, RingSpec, SegmentUv};
pub use radial::{panel_faces, PanelMesh, RadialMesh};
pub use shapes::{
    convex_proxy, BaseUvs, ComposedShape, CylinderShape, FairingMesh, FairingShape, FairingUvs,
    InterstageMesh, InterstageShape,
};
pub use tangent::compute_tangents;
pub use uv::UvArea;
