//! surfmesh CLI - Tessellate parametric surfaces into mesh files
//!
//! # Commands
//!
//! - `surfmesh init` - Create a starter surfmesh.toml manifest
//! - `surfmesh build` - Tessellate every shape in the manifest (main command)
//! - `surfmesh info` - Tessellate one shape and print its buffer layout
//!
//! # Usage
//!
//! ```bash
//! # Generate all shapes as OBJ files into ./out
//! surfmesh build
//!
//! # Same, but write packed GPU vertex buffers
//! surfmesh build --format packed
//!
//! # Inspect a 64x32 torus without writing anything
//! surfmesh info torus --radius 2 --tube-radius 0.5 -u 64 -v 32
//! ```
//!
//! # Manifest (surfmesh.toml)
//!
//! ```toml
//! [output]
//! dir = "out"
//! format = "obj"
//!
//! [world]
//! lighting = true
//! texturing = false
//!
//! [[shapes]]
//! name = "donut"
//! kind = "torus"
//! radius = 2.0
//! tube_radius = 0.5
//! u_segments = 32
//! v_segments = 16
//! checker = [[1.0, 0.2, 0.2], [0.2, 0.2, 1.0]]
//! ```
//!
//! Set `RUST_LOG=debug` for per-shape tessellation logs.

mod build;
mod info;
mod init;
mod manifest;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

/// surfmesh CLI - Tessellate parametric surfaces into mesh files
#[derive(Parser)]
#[command(name = "surfmesh")]
#[command(about = "Tessellate parametric surfaces into mesh files")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create a starter surfmesh.toml manifest
    Init(init::InitArgs),

    /// Tessellate every shape in the manifest
    Build(build::BuildArgs),

    /// Tessellate one shape and print its buffer layout
    Info(info::InfoArgs),
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Init(args) => init::execute(args),
        Commands::Build(args) => build::execute(args),
        Commands::Info(args) => info::execute(args),
    }
}
