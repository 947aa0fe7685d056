//! Drawable shapes
//!
//! A [`Shape`] pairs attribute buffers with a primitive kind and a vertex
//! count. Drawing is a thin pass-through to a [`RenderBackend`]: enable every
//! attribute, bind the index buffer if there is one, issue one draw call.

use tracing::warn;

use crate::attribute::{AttributeBuffer, IndexBuffer};
use crate::mesh::MeshBuffer;

/// How the backend assembles vertices into primitives.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum PrimitiveKind {
    Points,
    Lines,
    LineStrip,
    LineLoop,
    #[default]
    Triangles,
    TriangleStrip,
    TriangleFan,
}

/// GPU-side collaborator a shape draws through.
///
/// Implementations upload or bind the buffers however their API requires;
/// shapes only decide the order of calls.
pub trait RenderBackend {
    type Error;

    /// Bind an attribute buffer to the shader input of the same name
    fn enable_attribute(&mut self, buffer: &AttributeBuffer) -> Result<(), Self::Error>;

    /// Bind an element (index) buffer for the next draw
    fn bind_indices(&mut self, indices: &IndexBuffer) -> Result<(), Self::Error>;

    /// Draw `count` vertices in order
    fn draw_arrays(&mut self, primitive: PrimitiveKind, count: usize) -> Result<(), Self::Error>;

    /// Draw `count` indices from the bound element buffer
    fn draw_elements(&mut self, primitive: PrimitiveKind, count: usize)
    -> Result<(), Self::Error>;
}

/// Attribute buffers plus the information needed to draw them.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Shape {
    primitive: PrimitiveKind,
    vertex_count: usize,
    attributes: Vec<AttributeBuffer>,
    indices: Option<IndexBuffer>,
}

impl Shape {
    /// Empty shape with the given primitive kind and vertex count
    pub fn new(primitive: PrimitiveKind, vertex_count: usize) -> Self {
        Self {
            primitive,
            vertex_count,
            attributes: Vec::new(),
            indices: None,
        }
    }

    /// Triangle-list shape holding every attribute present in `mesh`
    pub fn from_mesh(mesh: &MeshBuffer) -> Self {
        Self {
            primitive: PrimitiveKind::Triangles,
            vertex_count: mesh.vertex_count(),
            attributes: mesh.attribute_buffers(),
            indices: None,
        }
    }

    /// Like [`from_mesh`](Self::from_mesh) but moves the streams
    pub fn from_mesh_owned(mesh: MeshBuffer) -> Self {
        let vertex_count = mesh.vertex_count();
        Self {
            primitive: PrimitiveKind::Triangles,
            vertex_count,
            attributes: mesh.into_attribute_buffers(),
            indices: None,
        }
    }

    /// Attach an attribute buffer
    ///
    /// A buffer whose element count disagrees with the shape's vertex count
    /// is kept, with a warning; the backend draws with what it was given.
    pub fn with_attribute(mut self, buffer: AttributeBuffer) -> Self {
        self.add_attribute(buffer);
        self
    }

    pub fn add_attribute(&mut self, buffer: AttributeBuffer) {
        if buffer.element_count() != self.vertex_count {
            warn!(
                "Shape: buffer '{}' holds {} elements but shape declares {} vertices",
                buffer.name(),
                buffer.element_count(),
                self.vertex_count
            );
        }
        self.attributes.push(buffer);
    }

    /// Attach an index buffer; drawing then uses the index count
    pub fn with_indices(mut self, indices: IndexBuffer) -> Self {
        if let Some(max) = indices.max_index() {
            if max as usize >= self.vertex_count {
                warn!(
                    "Shape: index {} out of range for {} vertices",
                    max, self.vertex_count
                );
            }
        }
        self.indices = Some(indices);
        self
    }

    pub fn primitive(&self) -> PrimitiveKind {
        self.primitive
    }

    pub fn vertex_count(&self) -> usize {
        self.vertex_count
    }

    /// Number of indices, if the shape is indexed
    pub fn index_count(&self) -> Option<usize> {
        self.indices.as_ref().map(IndexBuffer::count)
    }

    pub fn attributes(&self) -> &[AttributeBuffer] {
        &self.attributes
    }

    /// Find an attribute buffer by shader input name
    pub fn attribute(&self, name: &str) -> Option<&AttributeBuffer> {
        self.attributes.iter().find(|b| b.name() == name)
    }

    pub fn indices(&self) -> Option<&IndexBuffer> {
        self.indices.as_ref()
    }

    /// Issue this shape's draw call on `backend`
    pub fn draw<B: RenderBackend + ?Sized>(&self, backend: &mut B) -> Result<(), B::Error> {
        for buffer in &self.attributes {
            if buffer.element_count() != self.vertex_count {
                warn!(
                    "Shape::draw: buffer '{}' has {} elements, expected {}",
                    buffer.name(),
                    buffer.element_count(),
                    self.vertex_count
                );
            }
            backend.enable_attribute(buffer)?;
        }

        match &self.indices {
            Some(indices) => {
                backend.bind_indices(indices)?;
                backend.draw_elements(self.primitive, indices.count())
            }
            None => backend.draw_arrays(self.primitive, self.vertex_count),
        }
    }
}
