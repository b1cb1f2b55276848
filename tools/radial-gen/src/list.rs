//! List command - show the presets a registry defines

use anyhow::{Context, Result};
use clap::Args;
use nether_radial::{ShapePreset, ShapeRegistry};
use std::path::PathBuf;

#[derive(Args)]
pub struct ListArgs {
    /// Path to the shape registry
    #[arg(short, long, default_value = "shapes.toml")]
    pub registry: PathBuf,
}

pub fn execute(args: ListArgs) -> Result<()> {
    let registry = ShapeRegistry::load(&args.registry)
        .with_context(|| format!("Failed to load registry: {}", args.registry.display()))?;

    for name in registry.preset_names() {
        let preset = registry.preset(name)?;
        println!("{:<24} {}", name, describe(preset));
    }
    Ok(())
}

fn describe(preset: &ShapePreset) -> String {
    match preset {
        ShapePreset::Cylinder(p) => format!("cylinder r={} h={}", p.radius, p.height),
        ShapePreset::Fairing(p) => {
            format!("fairing r={} h={} panels={}", p.bottom_radius, p.height, p.panels)
        }
        ShapePreset::Interstage(p) => format!(
            "interstage r={} h={} base={} panels={}",
            p.fairing.bottom_radius, p.fairing.height, p.base_height, p.fairing.panels
        ),
    }
}
