//! Geometry accumulation and finalization
//!
//! `GeometryBuffer` collects vertices and triangles for one panel (or one
//! composed body) and turns them into flat arrays with tangents on
//! `build_output`. Vertices are never deduplicated: shared edges between
//! surfaces are emitted twice on purpose so each surface keeps its own normal.

use glam::{Vec2, Vec3};

use crate::tangent::compute_tangents;

/// Trait for mesh construction
///
/// The quad, strip and fan helpers are provided in terms of
/// `add_triangle`, so every builder shares one winding convention:
/// counter-clockwise front faces seen from the side the normal points to.
pub trait MeshBuilder {
    /// Add a vertex and return its index
    fn add_vertex(&mut self, position: Vec3, normal: Vec3, uv: Vec2) -> u32;

    /// Add a triangle using three vertex indices
    fn add_triangle(&mut self, i0: u32, i1: u32, i2: u32);

    /// Emit a quad between edge `a0-a1` and the parallel edge `b0-b1`
    ///
    /// `a0`/`b0` and `a1`/`b1` share an angular position. `invert` flips the
    /// winding of both triangles.
    fn generate_quad(&mut self, a0: u32, a1: u32, b0: u32, b1: u32, invert: bool) {
        if invert {
            self.add_triangle(a0, b1, b0);
            self.add_triangle(a0, a1, b1);
        } else {
            self.add_triangle(a0, b0, b1);
            self.add_triangle(a0, b1, a1);
        }
    }

    /// Emit one quad per segment between two parallel vertex sequences
    fn generate_quad_strip(&mut self, a: &[u32], b: &[u32], invert: bool) {
        assert_eq!(a.len(), b.len(), "quad strip edges differ in length");
        for i in 0..a.len().saturating_sub(1) {
            self.generate_quad(a[i], a[i + 1], b[i], b[i + 1], invert);
        }
    }

    /// Emit one triangle per ring segment, all sharing `center`
    fn generate_triangle_fan(&mut self, ring: &[u32], center: u32, invert: bool) {
        for pair in ring.windows(2) {
            if invert {
                self.add_triangle(center, pair[0], pair[1]);
            } else {
                self.add_triangle(center, pair[1], pair[0]);
            }
        }
    }
}

/// Vertex and index accumulator for one mesh
#[derive(Clone, Debug, Default, PartialEq)]
pub struct GeometryBuffer {
    positions: Vec<Vec3>,
    normals: Vec<Vec3>,
    uvs: Vec<Vec2>,
    indices: Vec<u32>,
}

impl GeometryBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get vertex count
    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    /// Get triangle count
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    pub fn positions(&self) -> &[Vec3] {
        &self.positions
    }

    pub fn normals(&self) -> &[Vec3] {
        &self.normals
    }

    pub fn uvs(&self) -> &[Vec2] {
        &self.uvs
    }

    pub fn indices(&self) -> &[u32] {
        &self.indices
    }

    /// Clear all vertices and triangles, keeping the allocations
    pub fn reset(&mut self) {
        self.positions.clear();
        self.normals.clear();
        self.uvs.clear();
        self.indices.clear();
    }

    /// Append another buffer, offsetting its indices
    pub fn append(&mut self, other: &GeometryBuffer) {
        let offset = self.positions.len() as u32;
        self.positions.extend_from_slice(&other.positions);
        self.normals.extend_from_slice(&other.normals);
        self.uvs.extend_from_slice(&other.uvs);
        self.indices.extend(other.indices.iter().map(|&i| i + offset));
    }

    /// Finalize into flat arrays with per-vertex tangents
    ///
    /// The buffer itself is left untouched, so building twice yields
    /// identical output.
    pub fn build_output(&self) -> MeshOutput {
        let tangents = compute_tangents(&self.positions, &self.normals, &self.uvs, &self.indices);
        MeshOutput {
            positions: self.positions.iter().map(|p| p.to_array()).collect(),
            normals: self.normals.iter().map(|n| n.to_array()).collect(),
            uvs: self.uvs.iter().map(|uv| uv.to_array()).collect(),
            tangents,
            indices: self.indices.clone(),
        }
    }
}

impl MeshBuilder for GeometryBuffer {
    fn add_vertex(&mut self, position: Vec3, normal: Vec3, uv: Vec2) -> u32 {
        let index = self.positions.len() as u32;
        self.positions.push(position);
        self.normals.push(normal);
        self.uvs.push(uv);
        index
    }

    fn add_triangle(&mut self, i0: u32, i1: u32, i2: u32) {
        let count = self.positions.len() as u32;
        assert!(
            i0 < count && i1 < count && i2 < count,
            "triangle ({i0}, {i1}, {i2}) references a vertex past {count}"
        );
        self.indices.extend_from_slice(&[i0, i1, i2]);
    }
}

/// Finalized mesh arrays, ready for a renderer or collider
#[derive(Clone, Debug, Default, PartialEq)]
pub struct MeshOutput {
    /// Vertex positions as [x, y, z]
    pub positions: Vec<[f32; 3]>,
    /// Vertex normals as [x, y, z]
    pub normals: Vec<[f32; 3]>,
    /// Atlas coordinates as [u, v]
    pub uvs: Vec<[f32; 2]>,
    /// Tangents as [x, y, z, w] where w is the bitangent sign
    pub tangents: Vec<[f32; 4]>,
    /// Triangle indices
    pub indices: Vec<u32>,
}

impl MeshOutput {
    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Positions as one flat `x, y, z, x, y, z, ...` slice
    pub fn flat_positions(&self) -> &[f32] {
        bytemuck::cast_slice(&self.positions)
    }

    /// Normals as one flat slice
    pub fn flat_normals(&self) -> &[f32] {
        bytemuck::cast_slice(&self.normals)
    }

    /// UVs as one flat slice
    pub fn flat_uvs(&self) -> &[f32] {
        bytemuck::cast_slice(&self.uvs)
    }

    /// Tangents as one flat `x, y, z, w, ...` slice
    pub fn flat_tangents(&self) -> &[f32] {
        bytemuck::cast_slice(&self.tangents)
    }
}
