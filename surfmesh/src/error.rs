//! Error types for tessellation, buffer wrapping, packing and export

use thiserror::Error;

use crate::attribute::AttributeKind;

/// A request or a surface evaluator could not be turned into a mesh.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum TessellationError {
    #[error("surface produced a non-finite {attribute} at (u={u}, v={v})")]
    NonFiniteAttribute {
        attribute: AttributeKind,
        u: f32,
        v: f32,
    },

    #[error("invalid parameter range [{min}, {max}]: bounds must be finite")]
    InvalidRange { min: f32, max: f32 },

    #[error("a {u_segments}x{v_segments} grid has more vertices than fit in memory")]
    TooManyVertices { u_segments: u32, v_segments: u32 },
}

/// Raw data could not be wrapped into a vertex attribute buffer.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AttributeError {
    #[error("buffer '{name}' has {len} values, not a multiple of {components} components")]
    Misaligned {
        name: String,
        len: usize,
        components: u32,
    },

    #[error("buffer '{name}' must have between 1 and 4 components, got {components}")]
    InvalidComponentCount { name: String, components: u32 },
}

/// A mesh could not be interleaved into a packed vertex buffer.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PackError {
    #[error("mesh has no positions to pack")]
    MissingPositions,

    #[error("{attribute} stream holds {actual} values, expected {expected}")]
    StreamLength {
        attribute: AttributeKind,
        expected: usize,
        actual: usize,
    },
}

/// Writing a mesh to a Wavefront OBJ file failed.
#[derive(Error, Debug)]
pub enum ExportError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("mesh has no positions to export")]
    MissingPositions,
}
