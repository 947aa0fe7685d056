//! Vertex attribute and index buffers
//!
//! An [`AttributeBuffer`] is the unit a rendering backend binds to a shader
//! input: a name, a component count, an element type and the raw data.

use std::fmt;

use crate::error::AttributeError;

/// The vertex attributes a tessellated mesh can carry.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AttributeKind {
    Position,
    Normal,
    TexCoord,
    Color,
}

impl AttributeKind {
    /// All kinds, in binding order.
    pub const ALL: [AttributeKind; 4] = [
        AttributeKind::Position,
        AttributeKind::Normal,
        AttributeKind::TexCoord,
        AttributeKind::Color,
    ];

    /// Shader input name this attribute is bound to
    pub const fn shader_name(self) -> &'static str {
        match self {
            AttributeKind::Position => "vertexPosition",
            AttributeKind::Normal => "vertexNormal",
            AttributeKind::TexCoord => "vertexTexCoord",
            AttributeKind::Color => "vertexColor",
        }
    }

    /// Number of components per vertex
    pub const fn components(self) -> u32 {
        match self {
            AttributeKind::TexCoord => 2,
            _ => 3,
        }
    }
}

impl fmt::Display for AttributeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            AttributeKind::Position => "position",
            AttributeKind::Normal => "normal",
            AttributeKind::TexCoord => "texture coordinate",
            AttributeKind::Color => "color",
        };
        f.write_str(name)
    }
}

/// Element type of a GPU buffer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ElementType {
    Float32,
    Uint16,
}

impl ElementType {
    /// Size of one element in bytes
    pub const fn size_bytes(self) -> usize {
        match self {
            ElementType::Float32 => 4,
            ElementType::Uint16 => 2,
        }
    }
}

/// A named, fixed-length float array bound to one shader input.
#[derive(Clone, Debug, PartialEq)]
pub struct AttributeBuffer {
    name: String,
    components: u32,
    data: Vec<f32>,
}

impl AttributeBuffer {
    /// Wrap raw float data as an attribute buffer.
    ///
    /// Fails if `components` is outside 1..=4 or the data length is not a
    /// whole number of elements.
    pub fn new(
        name: impl Into<String>,
        components: u32,
        data: Vec<f32>,
    ) -> Result<Self, AttributeError> {
        let name = name.into();
        if !(1..=4).contains(&components) {
            return Err(AttributeError::InvalidComponentCount { name, components });
        }
        if data.len() % components as usize != 0 {
            return Err(AttributeError::Misaligned {
                name,
                len: data.len(),
                components,
            });
        }
        Ok(Self {
            name,
            components,
            data,
        })
    }

    /// Build the buffer for one of the standard mesh attributes.
    pub fn for_kind(kind: AttributeKind, data: Vec<f32>) -> Result<Self, AttributeError> {
        Self::new(kind.shader_name(), kind.components(), data)
    }

    /// Wrap a stream the tessellator already laid out in whole elements
    pub(crate) fn from_stream(kind: AttributeKind, data: Vec<f32>) -> Self {
        debug_assert_eq!(data.len() % kind.components() as usize, 0);
        Self {
            name: kind.shader_name().to_string(),
            components: kind.components(),
            data,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn components(&self) -> u32 {
        self.components
    }

    pub fn element_type(&self) -> ElementType {
        ElementType::Float32
    }

    pub fn data(&self) -> &[f32] {
        &self.data
    }

    /// Number of vertices described by this buffer
    pub fn element_count(&self) -> usize {
        self.data.len() / self.components as usize
    }

    /// Data as bytes, ready for upload
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.data)
    }
}

/// Triangle indices (u16 for GPU compatibility)
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct IndexBuffer {
    indices: Vec<u16>,
}

impl IndexBuffer {
    pub fn new(indices: Vec<u16>) -> Self {
        Self { indices }
    }

    pub fn indices(&self) -> &[u16] {
        &self.indices
    }

    pub fn count(&self) -> usize {
        self.indices.len()
    }

    pub fn element_type(&self) -> ElementType {
        ElementType::Uint16
    }

    /// Largest referenced vertex index, if any
    pub fn max_index(&self) -> Option<u16> {
        self.indices.iter().copied().max()
    }

    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.indices)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_attribute_layout() {
        assert_eq!(AttributeKind::Position.shader_name(), "vertexPosition");
        assert_eq!(AttributeKind::Normal.shader_name(), "vertexNormal");
        assert_eq!(AttributeKind::TexCoord.shader_name(), "vertexTexCoord");
        assert_eq!(AttributeKind::Color.shader_name(), "vertexColor");

        assert_eq!(AttributeKind::Position.components(), 3);
        assert_eq!(AttributeKind::Normal.components(), 3);
        assert_eq!(AttributeKind::TexCoord.components(), 2);
        assert_eq!(AttributeKind::Color.components(), 3);
    }

    #[test]
    fn test_attribute_buffer_element_count() {
        let buffer = AttributeBuffer::for_kind(AttributeKind::TexCoord, vec![0.0; 12]).unwrap();
        assert_eq!(buffer.name(), "vertexTexCoord");
        assert_eq!(buffer.element_count(), 6);
        assert_eq!(buffer.element_type(), ElementType::Float32);
        assert_eq!(buffer.as_bytes().len(), 12 * 4);
    }

    #[test]
    fn test_misaligned_data_rejected() {
        let err = AttributeBuffer::new("vertexPosition", 3, vec![0.0; 7]).unwrap_err();
        assert_eq!(
            err,
            AttributeError::Misaligned {
                name: "vertexPosition".to_string(),
                len: 7,
                components: 3,
            }
        );
    }

    #[test]
    fn test_component_count_bounds() {
        assert!(AttributeBuffer::new("empty", 0, Vec::new()).is_err());
        assert!(AttributeBuffer::new("wide", 5, vec![0.0; 5]).is_err());
        assert!(AttributeBuffer::new("rgba", 4, vec![0.0; 8]).is_ok());
    }

    #[test]
    fn test_index_buffer() {
        let indices = IndexBuffer::new(vec![0, 1, 2, 2, 1, 3]);
        assert_eq!(indices.count(), 6);
        assert_eq!(indices.max_index(), Some(3));
        assert_eq!(indices.as_bytes().len(), 12);
        assert_eq!(IndexBuffer::default().max_index(), None);
    }
}
