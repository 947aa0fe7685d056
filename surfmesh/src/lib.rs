//! Parametric surface tessellation for simple renderers
//!
//! This crate turns parametric surfaces (tori, spheres, quads, or any custom
//! `(u, v) -> point` function) into flat vertex attribute streams that can be
//! handed to a rendering backend.
//!
//! # Modules
//!
//! - [`surface`] - The [`ParametricSurface`] capability trait and closure-backed surfaces
//! - [`tessellate`] - The grid walk that emits two triangles per parameter cell
//! - [`mesh`] - [`MeshBuffer`], the per-attribute output streams
//! - [`attribute`] - Named vertex attribute buffers and index buffers
//! - [`shape`] - Drawable shapes and the [`RenderBackend`] pass-through
//! - [`shapes`] - Concrete surfaces (torus, sphere, quad)
//! - [`world`] - World-state flags pushed to shader uniforms
//! - [`packing`] - Interleaved, packed GPU vertex layouts
//! - [`export`] - Wavefront OBJ export
//!
//! # Example
//!
//! ```
//! use surfmesh::{Shape, TessellationRequest, Torus, tessellate};
//!
//! let torus = Torus::new(2.0, 0.5);
//! let request = TessellationRequest::for_surface(&torus, 32, 16);
//! let mesh = tessellate(&torus, &request).unwrap();
//! assert_eq!(mesh.vertex_count(), 32 * 16 * 6);
//!
//! let shape = Shape::from_mesh(&mesh);
//! assert_eq!(shape.vertex_count(), mesh.vertex_count());
//! ```

pub mod attribute;
pub mod error;
pub mod export;
pub mod mesh;
pub mod packing;
pub mod shape;
pub mod shapes;
pub mod surface;
pub mod tessellate;
pub mod world;

pub use attribute::{AttributeBuffer, AttributeKind, ElementType, IndexBuffer};
pub use error::{AttributeError, ExportError, PackError, TessellationError};
pub use export::{write_obj, write_obj_file};
pub use mesh::MeshBuffer;
pub use packing::{
    FORMAT_COLOR, FORMAT_NORMAL, FORMAT_UV, PackedAttribute, PackedLayout, PackedMesh,
    interleave, pack_mesh, vertex_stride, vertex_stride_packed,
};
pub use shape::{PrimitiveKind, RenderBackend, Shape};
pub use shapes::{Quad, Sphere, Torus};
pub use surface::{Capabilities, Domain, FnSurface, ParametricSurface};
pub use tessellate::{Checkerboard, TessellationRequest, tessellate};
pub use world::{UniformSink, World};
