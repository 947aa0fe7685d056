//! Build command - tessellate every shape in surfmesh.toml
//!
//! Shapes are independent, so they are generated in parallel. Each shape
//! produces one file (OBJ) or two (packed `.bin` + `.json` layout), and a
//! `scene.toml` summary lists every output along with the world uniforms.

use anyhow::{Context, Result};
use clap::Args;
use rayon::prelude::*;
use serde::Serialize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use surfmesh::{UniformSink, pack_mesh, tessellate, write_obj_file};
use tracing::info;

use crate::manifest::{OutputFormat, ShapeEntry, SurfmeshManifest};

/// Arguments for the build command
#[derive(Args)]
pub struct BuildArgs {
    /// Path to surfmesh.toml manifest file
    #[arg(short, long, default_value = "surfmesh.toml")]
    pub manifest: PathBuf,

    /// Output directory (overrides [output] dir, which is relative to the manifest)
    #[arg(short, long)]
    pub out_dir: Option<PathBuf>,

    /// Output format (overrides [output] format)
    #[arg(short, long, value_enum)]
    pub format: Option<OutputFormat>,
}

/// One generated shape, as listed in scene.toml
#[derive(Debug, Serialize)]
pub struct ShapeReport {
    pub name: String,
    pub kind: String,
    pub files: Vec<String>,
    pub vertices: usize,
    pub triangles: usize,
}

/// Shader uniform values collected from the world settings
#[derive(Debug, Default, Serialize)]
pub struct UniformTable {
    pub int: BTreeMap<String, i32>,
    pub float: BTreeMap<String, f32>,
}

impl UniformSink for UniformTable {
    fn set_uniform_i32(&mut self, name: &str, value: i32) {
        self.int.insert(name.to_string(), value);
    }

    fn set_uniform_f32(&mut self, name: &str, value: f32) {
        self.float.insert(name.to_string(), value);
    }
}

/// Contents of scene.toml
#[derive(Debug, Serialize)]
pub struct SceneSummary {
    pub uniforms: UniformTable,
    pub shapes: Vec<ShapeReport>,
}

/// Execute the build command
pub fn execute(args: BuildArgs) -> Result<()> {
    let manifest = SurfmeshManifest::load(&args.manifest)?;
    manifest.validate()?;

    let out_dir = args.out_dir.unwrap_or_else(|| {
        args.manifest
            .parent()
            .unwrap_or_else(|| Path::new("."))
            .join(&manifest.output.dir)
    });
    let format = args.format.unwrap_or(manifest.output.format);

    let summary = build_all(&manifest, &out_dir, format)?;
    println!(
        "Built {} shape(s) into {}",
        summary.shapes.len(),
        out_dir.display()
    );
    Ok(())
}

/// Generate every shape and the scene summary into `out_dir`
pub fn build_all(
    manifest: &SurfmeshManifest,
    out_dir: &Path,
    format: OutputFormat,
) -> Result<SceneSummary> {
    std::fs::create_dir_all(out_dir)
        .with_context(|| format!("Failed to create output directory: {}", out_dir.display()))?;

    let shapes = manifest
        .shapes
        .par_iter()
        .map(|entry| build_shape(entry, out_dir, format))
        .collect::<Result<Vec<_>>>()?;

    let mut uniforms = UniformTable::default();
    manifest.world.apply(&mut uniforms);

    let summary = SceneSummary { uniforms, shapes };
    let scene_path = out_dir.join("scene.toml");
    let content = toml::to_string_pretty(&summary).context("Failed to serialize scene summary")?;
    std::fs::write(&scene_path, content)
        .with_context(|| format!("Failed to write {}", scene_path.display()))?;

    Ok(summary)
}

fn build_shape(entry: &ShapeEntry, out_dir: &Path, format: OutputFormat) -> Result<ShapeReport> {
    let surface = entry.spec.surface();
    let request = entry.request(surface.as_ref());
    let mesh = tessellate(surface.as_ref(), &request)
        .with_context(|| format!("Failed to tessellate shape '{}'", entry.name))?;

    let files = match format {
        OutputFormat::Obj => {
            let file = format!("{}.obj", entry.name);
            write_obj_file(&mesh, &out_dir.join(&file), &entry.name)
                .with_context(|| format!("Failed to export shape '{}'", entry.name))?;
            vec![file]
        }
        OutputFormat::Packed => {
            let packed = pack_mesh(&mesh)
                .with_context(|| format!("Failed to pack shape '{}'", entry.name))?;
            let bin = format!("{}.bin", entry.name);
            let json = format!("{}.json", entry.name);
            std::fs::write(out_dir.join(&bin), &packed.vertices)
                .with_context(|| format!("Failed to write {}", bin))?;
            std::fs::write(out_dir.join(&json), packed.layout.to_json()?)
                .with_context(|| format!("Failed to write {}", json))?;
            vec![bin, json]
        }
    };

    info!(
        "{} '{}': {}x{} grid, {} vertices",
        entry.spec.kind_name(),
        entry.name,
        entry.u_segments,
        entry.v_segments,
        mesh.vertex_count()
    );

    Ok(ShapeReport {
        name: entry.name.clone(),
        kind: entry.spec.kind_name().to_string(),
        files,
        vertices: mesh.vertex_count(),
        triangles: mesh.triangle_count(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const MANIFEST: &str = r#"
[world]
texturing = true

[[shapes]]
name = "donut"
kind = "torus"
radius = 2.0
tube_radius = 0.5
u_segments = 8
v_segments = 4

[[shapes]]
name = "card"
kind = "quad"
u_segments = 1
v_segments = 1
checker = [[1.0, 1.0, 1.0], [0.0, 0.0, 0.0]]
"#;

    #[test]
    fn test_build_obj() {
        let dir = tempfile::tempdir().unwrap();
        let manifest = SurfmeshManifest::parse(MANIFEST).unwrap();
        let summary = build_all(&manifest, dir.path(), OutputFormat::Obj).unwrap();

        assert_eq!(summary.shapes.len(), 2);
        assert_eq!(summary.shapes[0].vertices, 8 * 4 * 6);
        assert_eq!(summary.shapes[1].triangles, 2);
        assert!(dir.path().join("donut.obj").exists());
        assert!(dir.path().join("card.obj").exists());

        let scene = std::fs::read_to_string(dir.path().join("scene.toml")).unwrap();
        assert!(scene.contains("uUseTexture = 1"));
        assert!(scene.contains("uUseLighting = 1"));
    }

    #[test]
    fn test_build_packed() {
        let dir = tempfile::tempdir().unwrap();
        let manifest = SurfmeshManifest::parse(MANIFEST).unwrap();
        let summary = build_all(&manifest, dir.path(), OutputFormat::Packed).unwrap();

        assert_eq!(summary.shapes[1].files, ["card.bin", "card.json"]);
        // Quad: position + UV + color + normal = 20 bytes per vertex
        let bin = std::fs::read(dir.path().join("card.bin")).unwrap();
        assert_eq!(bin.len(), 6 * 20);
        // Torus without checker: 16 bytes per vertex
        let bin = std::fs::read(dir.path().join("donut.bin")).unwrap();
        assert_eq!(bin.len(), 8 * 4 * 6 * 16);
    }

    #[test]
    fn test_uniform_table() {
        let mut table = UniformTable::default();
        table.set_uniform_i32("uUseLighting", 0);
        table.set_uniform_f32("uTime", 1.5);
        assert_eq!(table.int.get("uUseLighting"), Some(&0));
        assert_eq!(table.float.get("uTime"), Some(&1.5));
    }
}
