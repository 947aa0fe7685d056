//! Info command - tessellate one shape and report its buffers
//!
//! Nothing is written to disk. The mesh is wrapped in a [`Shape`] and drawn
//! through a backend that only describes the calls it receives.

use anyhow::Result;
use clap::{Args, ValueEnum};
use glam::Vec3;
use std::convert::Infallible;
use surfmesh::{
    AttributeBuffer, IndexBuffer, PrimitiveKind, RenderBackend, Shape, pack_mesh, tessellate,
};

use crate::manifest::{ShapeEntry, ShapeSpec};

/// Surface to inspect
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum ShapeKind {
    Torus,
    Sphere,
    Quad,
}

/// Arguments for the info command
#[derive(Args)]
pub struct InfoArgs {
    /// Surface to tessellate
    #[arg(value_enum)]
    pub kind: ShapeKind,

    /// Torus ring radius or sphere radius
    #[arg(long, default_value_t = 1.0)]
    pub radius: f32,

    /// Torus tube radius
    #[arg(long, default_value_t = 0.25)]
    pub tube_radius: f32,

    /// Quad edge length
    #[arg(long, default_value_t = 2.0)]
    pub size: f32,

    /// Subdivisions along u
    #[arg(short, long, default_value_t = 16)]
    pub u_segments: u32,

    /// Subdivisions along v
    #[arg(short, long, default_value_t = 16)]
    pub v_segments: u32,

    /// Add black/white checkerboard vertex colors
    #[arg(long)]
    pub checker: bool,
}

impl InfoArgs {
    fn entry(&self) -> ShapeEntry {
        let spec = match self.kind {
            ShapeKind::Torus => ShapeSpec::Torus {
                radius: self.radius,
                tube_radius: self.tube_radius,
            },
            ShapeKind::Sphere => ShapeSpec::Sphere {
                radius: self.radius,
            },
            ShapeKind::Quad => ShapeSpec::Quad { size: self.size },
        };
        ShapeEntry {
            name: spec.kind_name().to_string(),
            spec,
            u_segments: self.u_segments,
            v_segments: self.v_segments,
            checker: self
                .checker
                .then(|| [Vec3::ONE.to_array(), Vec3::ZERO.to_array()]),
        }
    }
}

/// Backend that turns draw calls into report lines
#[derive(Default)]
struct DescribeBackend {
    lines: Vec<String>,
}

impl RenderBackend for DescribeBackend {
    type Error = Infallible;

    fn enable_attribute(&mut self, buffer: &AttributeBuffer) -> Result<(), Infallible> {
        self.lines.push(format!(
            "  attribute {:<16} {} x {:?}, {} elements, {} bytes",
            buffer.name(),
            buffer.components(),
            buffer.element_type(),
            buffer.element_count(),
            buffer.as_bytes().len()
        ));
        Ok(())
    }

    fn bind_indices(&mut self, indices: &IndexBuffer) -> Result<(), Infallible> {
        self.lines
            .push(format!("  indices   {} x {:?}", indices.count(), indices.element_type()));
        Ok(())
    }

    fn draw_arrays(&mut self, primitive: PrimitiveKind, count: usize) -> Result<(), Infallible> {
        self.lines
            .push(format!("  draw      {:?}, {} vertices", primitive, count));
        Ok(())
    }

    fn draw_elements(&mut self, primitive: PrimitiveKind, count: usize) -> Result<(), Infallible> {
        self.lines
            .push(format!("  draw      {:?}, {} indices", primitive, count));
        Ok(())
    }
}

/// Build the report for one shape
fn describe(args: &InfoArgs) -> Result<Vec<String>> {
    let entry = args.entry();
    let surface = entry.spec.surface();
    let request = entry.request(surface.as_ref());
    let mesh = tessellate(surface.as_ref(), &request)?;
    let packed = pack_mesh(&mesh)?;

    let mut lines = vec![
        format!(
            "{} {}x{}: {} vertices, {} triangles",
            entry.spec.kind_name(),
            entry.u_segments,
            entry.v_segments,
            mesh.vertex_count(),
            mesh.triangle_count()
        ),
        format!(
            "  packed    stride {} bytes, {} bytes total",
            packed.layout.stride,
            packed.vertices.len()
        ),
    ];

    let shape = Shape::from_mesh_owned(mesh);
    let mut backend = DescribeBackend::default();
    match shape.draw(&mut backend) {
        Ok(()) => {}
        Err(never) => match never {},
    }
    lines.extend(backend.lines);

    Ok(lines)
}

/// Execute the info command
pub fn execute(args: InfoArgs) -> Result<()> {
    for line in describe(&args)? {
        println!("{}", line);
    }
    Ok(())
}
