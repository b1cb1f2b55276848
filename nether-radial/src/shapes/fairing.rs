//! Fairing composer
//!
//! A fairing is a tapered shell split into hinged panels. The wall is stacked
//! from segments no taller than `max_panel_height` so the texture keeps the
//! same aspect on every segment, optionally framed by bolt bands at the
//! bottom and top edges.

use glam::Vec3;
use tracing::debug;

use super::collider::convex_proxy;
use crate::buffer::GeometryBuffer;
use crate::error::{positive_length, positive_radius, RadialError, Result};
use crate::panel::{PanelUvs, SegmentUv};
use crate::radial::{PanelMesh, RadialMesh};
use crate::uv::UvArea;

/// Texture areas used by a fairing
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct FairingUvs {
    /// Outer wall of one full-height segment
    pub outer: UvArea,
    /// Inner wall of one full-height segment
    pub inner: UvArea,
    /// Top, bottom and sidewall faces
    pub cap: UvArea,
    /// Outer wall of a bolt band
    pub bolt: UvArea,
}

impl FairingUvs {
    pub fn panel_uvs(&self) -> PanelUvs {
        PanelUvs::new(self.outer, self.inner, self.cap)
    }
}

/// Built fairing: one mesh per panel plus an optional collider
#[derive(Clone, Debug, PartialEq)]
pub struct FairingMesh {
    pub panels: Vec<PanelMesh>,
    pub collider: Option<GeometryBuffer>,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FairingShape {
    pub bottom_radius: f32,
    pub top_radius: f32,
    pub height: f32,
    pub thickness: f32,
    pub panels: u32,
    pub faces: u32,
    pub sweep_start: f32,
    pub sweep_end: f32,
    /// Tallest wall segment that maps the full `outer` area
    pub max_panel_height: f32,
    pub bolt_height: f32,
    pub bolt_bottom: bool,
    pub bolt_top: bool,
    /// Faces of the convex collider, `None` to skip it
    pub collider_faces: Option<u32>,
    pub offset: Vec3,
    pub uvs: FairingUvs,
}

impl FairingShape {
    /// Full-revolution fairing with no bolt bands
    pub fn new(
        bottom_radius: f32,
        top_radius: f32,
        height: f32,
        thickness: f32,
        panels: u32,
        faces: u32,
    ) -> Self {
        Self {
            bottom_radius,
            top_radius,
            height,
            thickness,
            panels,
            faces,
            sweep_start: 0.0,
            sweep_end: 360.0,
            max_panel_height: height,
            bolt_height: 0.0,
            bolt_bottom: false,
            bolt_top: false,
            collider_faces: None,
            offset: Vec3::ZERO,
            uvs: FairingUvs::default(),
        }
    }

    pub fn with_sweep(mut self, start: f32, end: f32) -> Self {
        self.sweep_start = start;
        self.sweep_end = end;
        self
    }

    pub fn with_max_panel_height(mut self, max_panel_height: f32) -> Self {
        self.max_panel_height = max_panel_height;
        self
    }

    pub fn with_bolts(mut self, bolt_height: f32, bottom: bool, top: bool) -> Self {
        self.bolt_height = bolt_height;
        self.bolt_bottom = bottom;
        self.bolt_top = top;
        self
    }

    pub fn with_collider(mut self, faces: u32) -> Self {
        self.collider_faces = Some(faces);
        self
    }

    pub fn with_offset(mut self, offset: Vec3) -> Self {
        self.offset = offset;
        self
    }

    pub fn with_uvs(mut self, uvs: FairingUvs) -> Self {
        self.uvs = uvs;
        self
    }

    /// Outer radius at `y` above the fairing base
    pub fn radius_at(&self, y: f32) -> f32 {
        self.bottom_radius + (self.top_radius - self.bottom_radius) * (y / self.height)
    }

    /// Ring heights above the base ring, each with the UV of the segment below it
    pub fn stations(&self) -> Result<Vec<(f32, SegmentUv)>> {
        let height = positive_length("fairing height", self.height)?;
        let max = positive_length("max panel height", self.max_panel_height)?;
        let bolts = self.bolt_bottom || self.bolt_top;
        let bolt = if bolts {
            positive_length("bolt height", self.bolt_height)?
        } else {
            0.0
        };
        let bottom_band = if self.bolt_bottom { bolt } else { 0.0 };
        let top_band = if self.bolt_top { bolt } else { 0.0 };
        let body = height - bottom_band - top_band;
        if body <= 0.0 {
            return Err(RadialError::InvalidBandHeight {
                bands: bottom_band + top_band,
                height,
            });
        }

        let uvs = &self.uvs;
        let band = |h: f32| SegmentUv::new(uvs.bolt, uvs.inner.sub_area(0.0, 0.0, 1.0, h / max));
        let mut stations = Vec::new();
        if bottom_band > 0.0 {
            stations.push((bottom_band, band(bottom_band)));
        }

        let full = (body / max).floor() as u32;
        let leftover = body - full as f32 * max;
        for i in 1..=full {
            stations.push((bottom_band + i as f32 * max, SegmentUv::new(uvs.outer, uvs.inner)));
        }
        let body_top = bottom_band + body;
        if full > 0 && leftover <= max * 1e-3 {
            // Absorb rounding slack into the last full segment
            if let Some(last) = stations.last_mut() {
                last.0 = body_top;
            }
        } else {
            let frac = leftover / max;
            stations.push((
                body_top,
                SegmentUv::new(
                    uvs.outer.sub_area(0.0, 0.0, 1.0, frac),
                    uvs.inner.sub_area(0.0, 0.0, 1.0, frac),
                ),
            ));
        }

        if top_band > 0.0 {
            stations.push((height, band(top_band)));
        }
        Ok(stations)
    }

    /// Build only the hinged panels
    pub fn build_panels(&self) -> Result<Vec<PanelMesh>> {
        positive_radius("bottom", self.bottom_radius)?;
        positive_radius("top", self.top_radius)?;
        let stations = self.stations()?;

        let mut radial = RadialMesh::configure(
            self.sweep_start,
            self.sweep_end,
            self.panels,
            self.faces,
            self.thickness,
        )?;
        radial.add_ring(0.0, self.bottom_radius)?;
        for &(y, segment_uv) in &stations {
            radial.add_band(y, self.radius_at(y), segment_uv)?;
        }
        let panels = radial.build_all(self.offset, &self.uvs.panel_uvs())?;

        debug!(
            panels = panels.len(),
            segments = stations.len(),
            "built fairing"
        );
        Ok(panels)
    }

    /// Build the panels and, if requested, the collider
    pub fn build(&self) -> Result<FairingMesh> {
        let panels = self.build_panels()?;
        let collider = self
            .collider_faces
            .map(|faces| {
                convex_proxy(
                    &[(0.0, self.bottom_radius), (self.height, self.top_radius)],
                    faces,
                    self.offset,
                )
            })
            .transpose()?;
        Ok(FairingMesh { panels, collider })
    }
}
