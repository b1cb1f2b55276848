//! Convex collision proxies
//!
//! Physics wants a cheap convex hull rather than the visual mesh. The proxy
//! is a coarse solid body of revolution around the upper convex hull of the
//! shape's (height, radius) profile.

use glam::Vec3;
use std::f32::consts::PI;

use crate::buffer::GeometryBuffer;
use crate::error::{face_count, Result};
use crate::panel::{PanelGroup, PanelUvs, RingSpec};

/// Build a closed convex proxy enclosing the given profile
///
/// `profile` is a list of `(height, radius)` stations, bottom to top.
/// Stations that would make the outline concave are dropped, and radii are
/// scaled so the coarse polygon circumscribes the true circle.
pub fn convex_proxy(profile: &[(f32, f32)], faces: u32, offset: Vec3) -> Result<GeometryBuffer> {
    let faces = face_count(faces)?;
    let circumscribe = 1.0 / (PI / faces as f32).cos();

    let mut panel = PanelGroup::new(0.0, 360.0, faces, 0.0);
    for (height, radius) in upper_hull(profile) {
        panel.add_ring_spec(RingSpec::new(height, radius * circumscribe, 0.0))?;
    }
    panel.assemble(offset, &PanelUvs::default())
}

/// Upper convex hull of a profile sorted by height (monotone chain)
fn upper_hull(profile: &[(f32, f32)]) -> Vec<(f32, f32)> {
    let mut hull: Vec<(f32, f32)> = Vec::with_capacity(profile.len());
    for &point in profile {
        while hull.len() >= 2 {
            let a = hull[hull.len() - 2];
            let b = hull[hull.len() - 1];
            let cross = (b.0 - a.0) * (point.1 - a.1) - (b.1 - a.1) * (point.0 - a.0);
            if cross >= 0.0 {
                hull.pop();
            } else {
                break;
            }
        }
        hull.push(point);
    }
    hull
}
