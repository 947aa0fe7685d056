//! Init command - write a starter surfmesh.toml

use anyhow::{Context, Result};
use clap::Args;
use std::path::PathBuf;

const TEMPLATE: &str = r#"# surfmesh manifest

[output]
dir = "out"
format = "obj"        # obj | packed

[world]
lighting = true
texturing = false

[[shapes]]
name = "torus"
kind = "torus"
radius = 2.0
tube_radius = 0.5
u_segments = 32
v_segments = 16
checker = [[1.0, 0.2, 0.2], [0.2, 0.2, 1.0]]

[[shapes]]
name = "sphere"
kind = "sphere"
radius = 1.0
u_segments = 24
v_segments = 12

[[shapes]]
name = "quad"
kind = "quad"
size = 2.0
u_segments = 1
v_segments = 1
"#;

/// Arguments for the init command
#[derive(Args)]
pub struct InitArgs {
    /// Where to write the manifest
    #[arg(short, long, default_value = "surfmesh.toml")]
    pub path: PathBuf,

    /// Overwrite an existing manifest
    #[arg(long)]
    pub force: bool,
}

/// Execute the init command
pub fn execute(args: InitArgs) -> Result<()> {
    if args.path.exists() && !args.force {
        anyhow::bail!(
            "{} already exists (use --force to overwrite)",
            args.path.display()
        );
    }

    std::fs::write(&args.path, TEMPLATE)
        .with_context(|| format!("Failed to write {}", args.path.display()))?;

    println!("Created {}", args.path.display());
    Ok(())
}
