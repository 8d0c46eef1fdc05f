//! glslgen CLI - dump and inspect generated shader presets
//!
//! # Commands
//!
//! - `glslgen dump` - write every vertex feature set and fragment kind to a directory
//! - `glslgen show` - print one generated shader to stdout
//!
//! # Usage
//!
//! ```bash
//! # Write all presets under ./shaders
//! glslgen dump
//!
//! # Inspect the fully-featured vertex shader
//! glslgen show --features 7
//!
//! # Inspect one fragment kind
//! glslgen show --kind specular_world
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use tracing::info;

use glslgen::{
    ShaderKind, feature_names, generate_fragment_shader, generate_vertex_shader,
    valid_feature_sets,
};

/// Generate GLSL shader presets
#[derive(Parser)]
#[command(name = "glslgen")]
#[command(about = "Generate GLSL shader presets")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Write every vertex feature set and fragment kind to a directory
    Dump {
        /// Output directory for the generated sources
        #[arg(long, default_value = "shaders")]
        out_dir: PathBuf,
    },
    /// Print one generated shader to stdout
    Show {
        /// Vertex feature bitmask (0-7)
        #[arg(long, conflicts_with = "kind")]
        features: Option<u8>,
        /// Fragment kind name (e.g. simple_textured)
        #[arg(long)]
        kind: Option<String>,
    },
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
        Commands::Dump { out_dir } => dump(&out_dir),
        Commands::Show { features, kind } => show(features, kind.as_deref()),
    }
}

fn dump(out_dir: &Path) -> Result<()> {
    fs::create_dir_all(out_dir)
        .with_context(|| format!("creating output directory {}", out_dir.display()))?;

    for features in valid_feature_sets() {
        let source = generate_vertex_shader(features)?;
        let path = out_dir.join(format!("vert_{features}.vert"));
        fs::write(&path, source).with_context(|| format!("writing {}", path.display()))?;
        info!(features, names = ?feature_names(features), "wrote {}", path.display());
    }

    for kind in ShaderKind::ALL {
        let source = generate_fragment_shader(kind)?;
        let path = out_dir.join(format!("{}.frag", kind.name()));
        fs::write(&path, source).with_context(|| format!("writing {}", path.display()))?;
        info!(kind = kind.name(), "wrote {}", path.display());
    }

    Ok(())
}

fn show(features: Option<u8>, kind: Option<&str>) -> Result<()> {
    match (features, kind) {
        (Some(features), None) => {
            print!("{}", generate_vertex_shader(features)?);
            Ok(())
        }
        (None, Some(name)) => {
            let kind = ShaderKind::ALL
                .into_iter()
                .find(|k| k.name() == name)
                .with_context(|| format!("unknown shader kind '{name}'"))?;
            print!("{}", generate_fragment_shader(kind)?);
            Ok(())
        }
        _ => bail!("pass exactly one of --features or --kind"),
    }
}
