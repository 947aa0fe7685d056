//! surfmesh.toml manifest parsing
//!
//! Shared manifest structures used by the build and info commands.

use anyhow::{Context, Result};
use clap::ValueEnum;
use glam::Vec3;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use surfmesh::{ParametricSurface, Quad, Sphere, TessellationRequest, Torus, World};

/// surfmesh.toml manifest structure
#[derive(Debug, Deserialize)]
pub struct SurfmeshManifest {
    #[serde(default)]
    pub output: OutputSection,
    #[serde(default)]
    pub world: World,
    #[serde(default)]
    pub shapes: Vec<ShapeEntry>,
}

/// Output configuration section
#[derive(Debug, Deserialize)]
pub struct OutputSection {
    /// Directory for generated files, relative to the manifest
    #[serde(default = "default_output_dir")]
    pub dir: PathBuf,
    #[serde(default)]
    pub format: OutputFormat,
}

impl Default for OutputSection {
    fn default() -> Self {
        Self {
            dir: default_output_dir(),
            format: OutputFormat::default(),
        }
    }
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("out")
}

/// File format written per shape
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Wavefront OBJ
    #[default]
    Obj,
    /// Interleaved packed vertices (.bin) plus a JSON layout description
    Packed,
}

/// Surface type and its dimensions
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum ShapeSpec {
    Torus { radius: f32, tube_radius: f32 },
    Sphere { radius: f32 },
    Quad {
        #[serde(default = "default_quad_size")]
        size: f32,
    },
}

fn default_quad_size() -> f32 {
    2.0
}

impl ShapeSpec {
    /// Build the parametric surface for this kind and its dimensions
    pub fn surface(&self) -> Box<dyn ParametricSurface + Send + Sync> {
        match *self {
            ShapeSpec::Torus {
                radius,
                tube_radius,
            } => Box::new(Torus::new(radius, tube_radius)),
            ShapeSpec::Sphere { radius } => Box::new(Sphere::new(radius)),
            ShapeSpec::Quad { size } => Box::new(Quad::new(size)),
        }
    }

    pub fn kind_name(&self) -> &'static str {
        match self {
            ShapeSpec::Torus { .. } => "torus",
            ShapeSpec::Sphere { .. } => "sphere",
            ShapeSpec::Quad { .. } => "quad",
        }
    }
}

/// Single shape entry (`[[shapes]]`)
#[derive(Debug, Clone, Deserialize)]
pub struct ShapeEntry {
    pub name: String,

    #[serde(flatten)]
    pub spec: ShapeSpec,

    /// Subdivisions along the first parameter (default: 16)
    #[serde(default = "default_segments")]
    pub u_segments: u32,

    /// Subdivisions along the second parameter (default: 16)
    #[serde(default = "default_segments")]
    pub v_segments: u32,

    /// Two RGB colors alternated per grid cell
    #[serde(default)]
    pub checker: Option<[[f32; 3]; 2]>,
}

fn default_segments() -> u32 {
    16
}

impl ShapeEntry {
    /// Tessellation request covering the surface's natural domain
    pub fn request(&self, surface: &dyn ParametricSurface) -> TessellationRequest {
        let request = TessellationRequest::for_surface(surface, self.u_segments, self.v_segments);
        match self.checker {
            Some([even, odd]) => {
                request.with_checker(Vec3::from_array(even), Vec3::from_array(odd))
            }
            None => request,
        }
    }
}

impl SurfmeshManifest {
    /// Load manifest from file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read manifest: {}", path.display()))?;
        Self::parse(&content)
    }

    /// Parse manifest from string
    pub fn parse(content: &str) -> Result<Self> {
        toml::from_str(content).context("Failed to parse surfmesh.toml")
    }

    /// Validate manifest fields
    pub fn validate(&self) -> Result<()> {
        let mut names = HashSet::new();
        for shape in &self.shapes {
            if shape.name.is_empty() {
                anyhow::bail!("Shape with empty name in surfmesh.toml");
            }
            if shape
                .name
                .contains(|c: char| c == '/' || c == '\\' || c.is_whitespace())
            {
                anyhow::bail!(
                    "Invalid shape name '{}' (no slashes or whitespace allowed)",
                    shape.name
                );
            }
            if !names.insert(shape.name.as_str()) {
                anyhow::bail!("Duplicate shape name '{}' in surfmesh.toml", shape.name);
            }
            if shape.u_segments == 0 || shape.v_segments == 0 {
                tracing::warn!(
                    "Shape '{}' has a zero segment count and will be empty",
                    shape.name
                );
            }
        }
        Ok(())
    }
}
