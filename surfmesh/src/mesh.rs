//! Tessellated mesh data
//!
//! A [`MeshBuffer`] keeps one flat `f32` stream per attribute. Streams for
//! attributes the surface did not supply stay empty rather than padded.

use glam::{Vec2, Vec3};

use crate::attribute::{AttributeBuffer, AttributeKind};
use crate::packing::{FORMAT_COLOR, FORMAT_NORMAL, FORMAT_UV};

/// Non-indexed triangle-list mesh (three vertices per triangle).
#[derive(Clone, Debug, Default, PartialEq)]
pub struct MeshBuffer {
    pub(crate) positions: Vec<f32>,
    pub(crate) normals: Vec<f32>,
    pub(crate) tex_coords: Vec<f32>,
    pub(crate) colors: Vec<f32>,
    pub(crate) vertex_count: usize,
}

impl MeshBuffer {
    /// Create an empty mesh
    pub fn new() -> Self {
        Self::default()
    }

    /// Reserve stream capacity for `vertex_count` vertices of the given attributes
    pub(crate) fn with_capacity(vertex_count: usize, kinds: &[AttributeKind]) -> Self {
        let mut mesh = Self::new();
        for &kind in kinds {
            let capacity = vertex_count * kind.components() as usize;
            match kind {
                AttributeKind::Position => mesh.positions.reserve_exact(capacity),
                AttributeKind::Normal => mesh.normals.reserve_exact(capacity),
                AttributeKind::TexCoord => mesh.tex_coords.reserve_exact(capacity),
                AttributeKind::Color => mesh.colors.reserve_exact(capacity),
            }
        }
        mesh
    }

    pub fn vertex_count(&self) -> usize {
        self.vertex_count
    }

    pub fn triangle_count(&self) -> usize {
        self.vertex_count / 3
    }

    pub fn is_empty(&self) -> bool {
        self.vertex_count == 0
    }

    /// Position stream, 3 floats per vertex (empty if absent)
    pub fn positions(&self) -> &[f32] {
        &self.positions
    }

    /// Normal stream, 3 floats per vertex (empty if absent)
    pub fn normals(&self) -> &[f32] {
        &self.normals
    }

    /// Texture coordinate stream, 2 floats per vertex (empty if absent)
    pub fn tex_coords(&self) -> &[f32] {
        &self.tex_coords
    }

    /// Color stream, 3 floats per vertex (empty if no checkerboard was requested)
    pub fn colors(&self) -> &[f32] {
        &self.colors
    }

    /// Raw stream for an attribute kind
    pub fn stream(&self, kind: AttributeKind) -> &[f32] {
        match kind {
            AttributeKind::Position => &self.positions,
            AttributeKind::Normal => &self.normals,
            AttributeKind::TexCoord => &self.tex_coords,
            AttributeKind::Color => &self.colors,
        }
    }

    /// Whether the mesh carries data for an attribute
    pub fn has(&self, kind: AttributeKind) -> bool {
        !self.stream(kind).is_empty()
    }

    /// Vertex format flags for the attributes present
    ///
    /// Position is implied by every format.
    pub fn format(&self) -> u8 {
        let mut format = 0;
        if self.has(AttributeKind::TexCoord) {
            format |= FORMAT_UV;
        }
        if self.has(AttributeKind::Color) {
            format |= FORMAT_COLOR;
        }
        if self.has(AttributeKind::Normal) {
            format |= FORMAT_NORMAL;
        }
        format
    }

    /// Position of vertex `index`, if positions are present
    pub fn position(&self, index: usize) -> Option<Vec3> {
        self.positions
            .get(index * 3..index * 3 + 3)
            .map(Vec3::from_slice)
    }

    /// Normal of vertex `index`, if normals are present
    pub fn normal(&self, index: usize) -> Option<Vec3> {
        self.normals
            .get(index * 3..index * 3 + 3)
            .map(Vec3::from_slice)
    }

    /// Texture coordinate of vertex `index`, if present
    pub fn tex_coord(&self, index: usize) -> Option<Vec2> {
        self.tex_coords
            .get(index * 2..index * 2 + 2)
            .map(Vec2::from_slice)
    }

    /// Color of vertex `index`, if present
    pub fn color(&self, index: usize) -> Option<Vec3> {
        self.colors.get(index * 3..index * 3 + 3).map(Vec3::from_slice)
    }

    /// Named attribute buffers for every attribute present, in binding order
    pub fn attribute_buffers(&self) -> Vec<AttributeBuffer> {
        AttributeKind::ALL
            .into_iter()
            .filter(|&kind| self.has(kind))
            .map(|kind| AttributeBuffer::from_stream(kind, self.stream(kind).to_vec()))
            .collect()
    }

    /// Consume the mesh into its attribute buffers without copying
    pub fn into_attribute_buffers(self) -> Vec<AttributeBuffer> {
        let streams = [
            (AttributeKind::Position, self.positions),
            (AttributeKind::Normal, self.normals),
            (AttributeKind::TexCoord, self.tex_coords),
            (AttributeKind::Color, self.colors),
        ];
        streams
            .into_iter()
            .filter(|(_, data)| !data.is_empty())
            .map(|(kind, data)| AttributeBuffer::from_stream(kind, data))
            .collect()
    }
}
