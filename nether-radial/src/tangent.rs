//! Per-vertex tangent generation
//!
//! Standard texture-space method: each triangle contributes a tangent and
//! bitangent solved from its position and UV edge deltas, contributions are
//! summed per vertex, then Gram-Schmidt orthonormalized against the normal.

use glam::{Vec2, Vec3};

/// UV determinants below this magnitude are treated as zero-area
const DEGENERATE_UV_AREA: f32 = 1e-12;

/// Compute `[x, y, z, handedness]` tangents for an indexed triangle list
///
/// Triangles with zero UV area are skipped. A vertex that receives no
/// contribution (or whose accumulated tangent is parallel to its normal)
/// falls back to an arbitrary tangent orthogonal to the normal, so the
/// output never contains NaN or infinity.
pub fn compute_tangents(
    positions: &[Vec3],
    normals: &[Vec3],
    uvs: &[Vec2],
    indices: &[u32],
) -> Vec<[f32; 4]> {
    let mut tangents = vec![Vec3::ZERO; positions.len()];
    let mut bitangents = vec![Vec3::ZERO; positions.len()];

    for tri in indices.chunks_exact(3) {
        let [i0, i1, i2] = [tri[0] as usize, tri[1] as usize, tri[2] as usize];

        let edge1 = positions[i1] - positions[i0];
        let edge2 = positions[i2] - positions[i0];
        let duv1 = uvs[i1] - uvs[i0];
        let duv2 = uvs[i2] - uvs[i0];

        let det = duv1.x * duv2.y - duv2.x * duv1.y;
        if !det.is_finite() || det.abs() < DEGENERATE_UV_AREA {
            continue;
        }
        let r = 1.0 / det;

        let tangent = (edge1 * duv2.y - edge2 * duv1.y) * r;
        let bitangent = (edge2 * duv1.x - edge1 * duv2.x) * r;
        if !tangent.is_finite() || !bitangent.is_finite() {
            continue;
        }

        for i in [i0, i1, i2] {
            tangents[i] += tangent;
            bitangents[i] += bitangent;
        }
    }

    normals
        .iter()
        .zip(tangents.iter().zip(&bitangents))
        .map(|(&normal, (&tangent, &bitangent))| orthonormalize(normal, tangent, bitangent))
        .collect()
}

/// Gram-Schmidt a tangent against its normal and derive the handedness
fn orthonormalize(normal: Vec3, tangent: Vec3, bitangent: Vec3) -> [f32; 4] {
    let n = normal.try_normalize().unwrap_or(Vec3::Y);
    let t = (tangent - n * n.dot(tangent))
        .try_normalize()
        .unwrap_or_else(|| n.any_orthonormal_vector());
    let w = if n.cross(t).dot(bitangent) < 0.0 { -1.0 } else { 1.0 };
    [t.x, t.y, t.z, w]
}
