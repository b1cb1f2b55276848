//! radial-gen - Build radial shape presets from a registry file
//!
//! # Commands
//!
//! - `radial-gen list` - List presets in the registry
//! - `radial-gen build <preset>` - Build a preset and print mesh statistics
//!
//! # Usage
//!
//! ```bash
//! # Build the nose fairing and write one OBJ per panel
//! radial-gen build nose --registry demos/shapes.toml --obj out/
//!
//! # Same, merged into a single OBJ
//! radial-gen build nose --obj out/ --merge
//! ```
//!
//! Set `RUST_LOG=nether_radial=debug` to trace mesh assembly.

mod build;
mod list;
mod obj;

use anyhow::Result;
use clap::{Parser, Subcommand};

/// Build radial shape presets
#[derive(Parser)]
#[command(name = "radial-gen")]
#[command(about = "Build radial shape presets and export them as OBJ")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List presets in the registry
    List(list::ListArgs),

    /// Build a preset
    Build(build::BuildArgs),
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::List(args) => list::execute(args),
        Commands::Build(args) => build::execute(args),
    }
}
