//! Build command - compose a preset and optionally export it

use anyhow::{Context, Result};
use clap::Args;
use nether_radial::{ComposedShape, GeometryBuffer, ShapeRegistry};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::obj::write_obj;

#[derive(Args)]
pub struct BuildArgs {
    /// Preset name
    pub preset: String,

    /// Path to the shape registry
    #[arg(short, long, default_value = "shapes.toml")]
    pub registry: PathBuf,

    /// Write OBJ files into this directory
    #[arg(long)]
    pub obj: Option<PathBuf>,

    /// Merge all visual meshes into one OBJ
    #[arg(long)]
    pub merge: bool,
}

pub fn execute(args: BuildArgs) -> Result<()> {
    let registry = ShapeRegistry::load(&args.registry)
        .with_context(|| format!("Failed to load registry: {}", args.registry.display()))?;
    tracing::info!(
        "Loaded {} presets from {}",
        registry.presets.len(),
        args.registry.display()
    );
    let shape = registry
        .compose(&args.preset)
        .with_context(|| format!("Failed to build preset: {}", args.preset))?;

    print_summary(&args.preset, &shape);

    if let Some(dir) = &args.obj {
        let written = export(&args.preset, &shape, dir, args.merge)?;
        for path in written {
            println!("  Wrote {}", path.display());
        }
    }
    Ok(())
}

fn print_summary(name: &str, shape: &ComposedShape) {
    for line in summary(name, shape) {
        println!("{}", line);
    }
}

/// Mesh counts, panel pivots and collider size for a composed shape
fn summary(name: &str, shape: &ComposedShape) -> Vec<String> {
    let visuals = shape.visual_buffers();
    let mut lines = vec![format!("Built {} ({} meshes)", name, visuals.len())];
    for (i, buffer) in visuals.iter().enumerate() {
        lines.push(format!(
            "  mesh {:>2}: {:>6} vertices {:>6} triangles",
            i,
            buffer.vertex_count(),
            buffer.triangle_count()
        ));
    }
    for (i, panel) in shape.panels().iter().enumerate() {
        lines.push(format!(
            "  pivot {:>2}: ({:.3}, {:.3}, {:.3}) yaw {:.1}",
            i, panel.pivot.x, panel.pivot.y, panel.pivot.z, panel.pivot_rotation
        ));
    }
    if let Some(collider) = shape.collider() {
        lines.push(format!("  collider: {} triangles", collider.triangle_count()));
    }
    lines
}

/// Write OBJ files for a composed shape, returning the paths written
pub fn export(name: &str, shape: &ComposedShape, dir: &Path, merge: bool) -> Result<Vec<PathBuf>> {
    std::fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create output directory: {}", dir.display()))?;

    let mut written = Vec::new();
    if merge {
        written.push(write_file(dir, name, &shape.merged())?);
    } else {
        for (i, buffer) in shape.visual_buffers().into_iter().enumerate() {
            written.push(write_file(dir, &format!("{name}_{i}"), buffer)?);
        }
    }
    if let Some(collider) = shape.collider() {
        written.push(write_file(dir, &format!("{name}_collider"), collider)?);
    }
    Ok(written)
}

fn write_file(dir: &Path, name: &str, buffer: &GeometryBuffer) -> Result<PathBuf> {
    let path = dir.join(format!("{name}.obj"));
    let file =
        File::create(&path).with_context(|| format!("Failed to create: {}", path.display()))?;
    let mut out = BufWriter::new(file);
    write_obj(name, buffer, &mut out)
        .and_then(|()| out.flush())
        .with_context(|| format!("Failed to write: {}", path.display()))?;
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    const REGISTRY: &str = r#"
[presets.nose]
type = "fairing"
bottom_radius = 1.0
top_radius = 0.4
height = 2.0
thickness = 0.05
panels = 3
collider_faces = 8
"#;

    #[test]
    fn test_export_per_panel_and_collider() {
        let registry = ShapeRegistry::from_toml_str(REGISTRY).unwrap();
        let shape = registry.compose("nose").unwrap();
        let dir = tempfile::tempdir().unwrap();

        let written = export("nose", &shape, dir.path(), false).unwrap();
        assert_eq!(written.len(), 4);
        assert!(dir.path().join("nose_0.obj").exists());
        assert!(dir.path().join("nose_collider.obj").exists());
    }

    #[test]
    fn test_summary_lists_interstage_pivots() {
        let registry = ShapeRegistry::from_toml_str(
            r#"
[presets.adapter]
type = "interstage"
bottom_radius = 1.0
height = 1.0
thickness = 0.05
panels = 3
base_height = 0.4
"#,
        )
        .unwrap();
        let shape = registry.compose("adapter").unwrap();
        let lines = summary("adapter", &shape);
        let pivots = lines.iter().filter(|l| l.trim_start().starts_with("pivot")).count();
        assert_eq!(pivots, 3);
        assert!(lines.iter().any(|l| l.trim_start().starts_with("collider")));
    }

    #[test]
    fn test_export_merged() {
        let registry = ShapeRegistry::from_toml_str(REGISTRY).unwrap();
        let shape = registry.compose("nose").unwrap();
        let dir = tempfile::tempdir().unwrap();

        let written = export("nose", &shape, dir.path(), true).unwrap();
        assert_eq!(written.len(), 2);
        let text = std::fs::read_to_string(dir.path().join("nose.obj")).unwrap();
        let faces = text.lines().filter(|l| l.starts_with("f ")).count();
        assert_eq!(faces, shape.merged().triangle_count());
    }
}
