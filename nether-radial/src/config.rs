//! Shape preset registry (TOML)
//!
//! A registry file declares texture atlas layouts and named shape presets:
//!
//! ```toml
//! [layouts.hull]
//! texture_size = 512.0
//! regions.outer = [0, 0, 256, 512]
//! regions.bolt = [256, 0, 512, 64]
//!
//! [presets.nose]
//! type = "fairing"
//! layout = "hull"
//! bottom_radius = 1.25
//! top_radius = 0.4
//! height = 3.0
//! thickness = 0.05
//! panels = 2
//! ```
//!
//! Regions are pixel rectangles `[x1, y1, x2, y2]` with a top-left origin.
//! A region a preset needs but its layout does not name maps the full texture.
//! The registry is plain data; callers load it once and pass it around.

use glam::Vec3;
use hashbrown::HashMap;
use serde::Deserialize;
use std::path::Path;
use tracing::debug;

use crate::error::{RadialError, Result};
use crate::panel::PanelUvs;
use crate::shapes::{
    BaseUvs, ComposedShape, CylinderShape, FairingShape, FairingUvs, InterstageShape,
};
use crate::uv::UvArea;

/// A texture atlas and its named regions
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct UvLayout {
    /// Atlas edge length in pixels (default: 512)
    #[serde(default = "default_texture_size")]
    pub texture_size: f32,
    /// Pixel rectangles keyed by region name
    #[serde(default)]
    pub regions: HashMap<String, [f32; 4]>,
}

impl UvLayout {
    /// Normalized area of a region, if the layout names it
    pub fn area(&self, region: &str) -> Option<UvArea> {
        self.regions
            .get(region)
            .map(|&[x1, y1, x2, y2]| UvArea::from_pixels(x1, y1, x2, y2, self.texture_size))
    }

    fn area_or_full(&self, region: &str) -> UvArea {
        self.area(region).unwrap_or(UvArea::FULL)
    }
}

/// Cylinder preset; `top_radius` defaults to `radius`
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CylinderPreset {
    #[serde(default)]
    pub layout: Option<String>,
    pub radius: f32,
    #[serde(default)]
    pub top_radius: Option<f32>,
    pub height: f32,
    #[serde(default)]
    pub inner_radius: f32,
    #[serde(default = "default_faces")]
    pub faces: u32,
    #[serde(default)]
    pub offset: [f32; 3],
}

/// Fairing preset; `max_panel_height` defaults to the full height
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct FairingPreset {
    #[serde(default)]
    pub layout: Option<String>,
    pub bottom_radius: f32,
    #[serde(default)]
    pub top_radius: Option<f32>,
    pub height: f32,
    pub thickness: f32,
    #[serde(default = "default_panels")]
    pub panels: u32,
    #[serde(default = "default_faces")]
    pub faces: u32,
    #[serde(default)]
    pub sweep_start: f32,
    #[serde(default = "default_sweep_end")]
    pub sweep_end: f32,
    #[serde(default)]
    pub max_panel_height: Option<f32>,
    #[serde(default)]
    pub bolt_height: f32,
    #[serde(default)]
    pub bolt_bottom: bool,
    #[serde(default)]
    pub bolt_top: bool,
    #[serde(default)]
    pub collider_faces: Option<u32>,
    #[serde(default)]
    pub offset: [f32; 3],
}

/// Interstage preset: fairing keys plus the base plate height
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct InterstagePreset {
    #[serde(flatten)]
    pub fairing: FairingPreset,
    pub base_height: f32,
}

/// A named shape definition, tagged by `type`
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ShapePreset {
    Cylinder(CylinderPreset),
    Fairing(FairingPreset),
    Interstage(InterstagePreset),
}

impl ShapePreset {
    pub fn layout(&self) -> Option<&str> {
        match self {
            ShapePreset::Cylinder(p) => p.layout.as_deref(),
            ShapePreset::Fairing(p) => p.layout.as_deref(),
            ShapePreset::Interstage(p) => p.fairing.layout.as_deref(),
        }
    }

    /// Build the shape, resolving UV regions through `registry`
    pub fn compose(&self, registry: &ShapeRegistry) -> Result<ComposedShape> {
        let layout = self.layout().map(|name| registry.layout(name)).transpose()?;
        let area = |region: &str| layout.map_or(UvArea::FULL, |l| l.area_or_full(region));

        match self {
            ShapePreset::Cylinder(p) => {
                let uvs = PanelUvs::new(area("outer"), area("inner"), area("cap"));
                let buffer = CylinderShape::tapered(
                    p.radius,
                    p.top_radius.unwrap_or(p.radius),
                    p.height,
                    p.faces,
                )
                .with_inner_radius(p.inner_radius)
                .with_offset(Vec3::from_array(p.offset))
                .with_uvs(uvs)
                .build()?;
                Ok(ComposedShape::Cylinder(buffer))
            }
            ShapePreset::Fairing(p) => {
                let shape = p.to_shape(&area);
                Ok(ComposedShape::Fairing(shape.build()?))
            }
            ShapePreset::Interstage(p) => {
                let fairing = p.fairing.to_shape(&area);
                let base_uvs = BaseUvs {
                    wall: area("base"),
                    bolt: area("base-bolt"),
                    cap: area("base-cap"),
                };
                let mesh = InterstageShape::new(fairing, p.base_height)
                    .with_base_uvs(base_uvs)
                    .build()?;
                Ok(ComposedShape::Interstage(mesh))
            }
        }
    }
}

impl FairingPreset {
    fn to_shape(&self, area: &impl Fn(&str) -> UvArea) -> FairingShape {
        let uvs = FairingUvs {
            outer: area("outer"),
            inner: area("inner"),
            cap: area("cap"),
            bolt: area("bolt"),
        };
        let mut shape = FairingShape::new(
            self.bottom_radius,
            self.top_radius.unwrap_or(self.bottom_radius),
            self.height,
            self.thickness,
            self.panels,
            self.faces,
        )
        .with_sweep(self.sweep_start, self.sweep_end)
        .with_max_panel_height(self.max_panel_height.unwrap_or(self.height))
        .with_bolts(self.bolt_height, self.bolt_bottom, self.bolt_top)
        .with_offset(Vec3::from_array(self.offset))
        .with_uvs(uvs);
        shape.collider_faces = self.collider_faces;
        shape
    }
}

/// Layouts and presets loaded from one registry file
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ShapeRegistry {
    #[serde(default)]
    pub layouts: HashMap<String, UvLayout>,
    #[serde(default)]
    pub presets: HashMap<String, ShapePreset>,
}

impl ShapeRegistry {
    pub fn from_toml_str(source: &str) -> Result<Self> {
        let registry: ShapeRegistry = toml::from_str(source)?;
        debug!(
            layouts = registry.layouts.len(),
            presets = registry.presets.len(),
            "parsed shape registry"
        );
        Ok(registry)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let source = std::fs::read_to_string(path)?;
        Self::from_toml_str(&source)
    }

    pub fn layout(&self, name: &str) -> Result<&UvLayout> {
        self.layouts
            .get(name)
            .ok_or_else(|| RadialError::UnknownLayout(name.to_string()))
    }

    /// Strict region lookup
    pub fn uv(&self, layout: &str, region: &str) -> Result<UvArea> {
        self.layout(layout)?
            .area(region)
            .ok_or_else(|| RadialError::UnknownRegion {
                layout: layout.to_string(),
                region: region.to_string(),
            })
    }

    pub fn preset(&self, name: &str) -> Result<&ShapePreset> {
        self.presets
            .get(name)
            .ok_or_else(|| RadialError::UnknownPreset(name.to_string()))
    }

    /// Preset names in sorted order
    pub fn preset_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.presets.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    pub fn compose(&self, name: &str) -> Result<ComposedShape> {
        self.preset(name)?.compose(self)
    }
}

fn default_texture_size() -> f32 {
    512.0
}

fn default_faces() -> u32 {
    24
}

fn default_panels() -> u32 {
    1
}

fn default_sweep_end() -> f32 {
    360.0
}
