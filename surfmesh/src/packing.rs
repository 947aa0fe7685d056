//! Interleaved vertex packing
//!
//! Tessellated meshes keep one `f32` stream per attribute. Backends that
//! prefer a single interleaved buffer can use:
//! - [`interleave`] for full-precision f32 vertices
//! - [`pack_mesh`] for the compact GPU layout:
//!   - Position: Float16x4 (w = 1.0), 8 bytes
//!   - UV: Unorm16x2, 4 bytes
//!   - Color: Unorm8x4 (a = 255), 4 bytes
//!   - Normal: octahedral Snorm16x2 in a u32, 4 bytes

use bytemuck::cast_slice;
use glam::Vec3;
use half::f16;
use serde::{Deserialize, Serialize};

use crate::attribute::AttributeKind;
use crate::error::PackError;
use crate::mesh::MeshBuffer;

// ============================================================================
// Vertex Format Constants
// ============================================================================

/// Vertex format flag: Has UV coordinates (2 floats)
pub const FORMAT_UV: u8 = 1;
/// Vertex format flag: Has per-vertex color (RGB, 3 floats)
pub const FORMAT_COLOR: u8 = 2;
/// Vertex format flag: Has normals (3 floats)
pub const FORMAT_NORMAL: u8 = 4;

/// Calculate vertex stride in bytes for unpacked f32 format
#[inline]
pub const fn vertex_stride(format: u8) -> u32 {
    let mut stride = 12; // Position: Float32x3

    if format & FORMAT_UV != 0 {
        stride += 8; // UV: Float32x2
    }
    if format & FORMAT_COLOR != 0 {
        stride += 12; // Color: Float32x3
    }
    if format & FORMAT_NORMAL != 0 {
        stride += 12; // Normal: Float32x3
    }

    stride
}

/// Calculate vertex stride in bytes for packed GPU format
#[inline]
pub const fn vertex_stride_packed(format: u8) -> u32 {
    let mut stride = 8; // Position: Float16x4

    if format & FORMAT_UV != 0 {
        stride += 4; // Unorm16x2
    }
    if format & FORMAT_COLOR != 0 {
        stride += 4; // Unorm8x4
    }
    if format & FORMAT_NORMAL != 0 {
        stride += 4; // Octahedral u32
    }

    stride
}

// ============================================================================
// Scalar Conversions
// ============================================================================

/// Convert f32 to signed normalized 16-bit integer (snorm16)
///
/// Maps f32 range [-1.0, 1.0] to i16 range [-32767, 32767]. Out-of-range
/// values are clamped first.
#[inline]
pub fn f32_to_snorm16(value: f32) -> i16 {
    let clamped = value.clamp(-1.0, 1.0);
    (clamped * 32767.0) as i16
}

/// Convert f32 to unsigned normalized 8-bit integer (unorm8)
///
/// Maps f32 range [0.0, 1.0] to u8 range [0, 255].
#[inline]
pub fn f32_to_unorm8(value: f32) -> u8 {
    let clamped = value.clamp(0.0, 1.0);
    (clamped * 255.0) as u8
}

// ============================================================================
// Attribute Packing
// ============================================================================

/// Pack a 3D position to Float16x4 format (with w=1.0 padding)
#[inline]
pub fn pack_position_f16(position: Vec3) -> [f16; 4] {
    [
        f16::from_f32(position.x),
        f16::from_f32(position.y),
        f16::from_f32(position.z),
        f16::from_f32(1.0),
    ]
}

/// Pack a 2D UV coordinate to Unorm16x2 format
///
/// Better precision than f16 for values in [0.0, 1.0] range. Values outside
/// that range are clamped, so tiling UVs must be wrapped beforehand.
#[inline]
pub fn pack_uv_unorm16(u: f32, v: f32) -> [u16; 2] {
    [
        (u.clamp(0.0, 1.0) * 65535.0) as u16,
        (v.clamp(0.0, 1.0) * 65535.0) as u16,
    ]
}

/// Pack an RGB color to Unorm8x4 format (with alpha=255)
#[inline]
pub fn pack_color_unorm8(color: Vec3) -> [u8; 4] {
    [
        f32_to_unorm8(color.x),
        f32_to_unorm8(color.y),
        f32_to_unorm8(color.z),
        255,
    ]
}

/// Encode a direction to octahedral coordinates in [-1, 1]²
///
/// The direction is projected onto the L1 unit octahedron and the lower
/// hemisphere is folded over the diagonals. A zero vector encodes to the
/// origin.
#[inline]
pub fn encode_octahedral(dir: Vec3) -> (f32, f32) {
    let dir = dir.normalize_or_zero();

    let l1_norm = dir.x.abs() + dir.y.abs() + dir.z.abs();
    if l1_norm == 0.0 {
        return (0.0, 0.0);
    }

    let mut u = dir.x / l1_norm;
    let mut v = dir.y / l1_norm;

    // Fold the lower hemisphere over the diagonals
    if dir.z < 0.0 {
        let u_abs = u.abs();
        let v_abs = v.abs();
        u = (1.0 - v_abs) * u.signum();
        v = (1.0 - u_abs) * v.signum();
    }

    (u, v)
}

/// Decode octahedral coordinates in [-1, 1]² back to a normalized direction
///
/// Inverse of [`encode_octahedral`] up to snorm16 quantization.
#[inline]
pub fn decode_octahedral(u: f32, v: f32) -> Vec3 {
    let mut dir = Vec3::new(u, v, 1.0 - u.abs() - v.abs());

    if dir.z < 0.0 {
        let old_x = dir.x;
        dir.x = (1.0 - dir.y.abs()) * old_x.signum();
        dir.y = (1.0 - old_x.abs()) * dir.y.signum();
    }

    dir.normalize_or_zero()
}

/// Pack a normal to a u32 using octahedral encoding (2x snorm16)
///
/// `u` lives in the low 16 bits and `v` in the high 16 bits.
#[inline]
pub fn pack_normal_octahedral(normal: Vec3) -> u32 {
    let (u, v) = encode_octahedral(normal);
    let u_snorm = f32_to_snorm16(u);
    let v_snorm = f32_to_snorm16(v);
    (u_snorm as u16 as u32) | ((v_snorm as u16 as u32) << 16)
}

/// Unpack a u32 to a direction using octahedral decoding
///
/// Inverse of [`pack_normal_octahedral`]; the result is normalized.
#[inline]
pub fn unpack_normal_octahedral(packed: u32) -> Vec3 {
    let u = (packed & 0xFFFF) as i16 as f32 / 32767.0;
    let v = (packed >> 16) as i16 as f32 / 32767.0;
    decode_octahedral(u, v)
}

// ============================================================================
// Mesh Packing
// ============================================================================

/// One attribute's placement inside an interleaved vertex
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PackedAttribute {
    /// Shader input name (`vertexPosition`, ...)
    pub name: String,
    /// Byte offset within a vertex
    pub offset: u32,
    /// WebGPU-style vertex format name
    pub format: String,
}

/// Description of a packed vertex buffer, for sidecar metadata
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PackedLayout {
    pub format: u8,
    pub stride: u32,
    pub vertex_count: usize,
    pub attributes: Vec<PackedAttribute>,
}

impl PackedLayout {
    /// Layout of the packed GPU format for the given flags
    pub fn for_format(format: u8, vertex_count: usize) -> Self {
        let mut attributes = Vec::with_capacity(4);
        let mut offset = 0;
        let mut push = |kind: AttributeKind, vertex_format: &str, size: u32| {
            attributes.push(PackedAttribute {
                name: kind.shader_name().to_string(),
                offset,
                format: vertex_format.to_string(),
            });
            offset += size;
        };

        push(AttributeKind::Position, "float16x4", 8);
        if format & FORMAT_UV != 0 {
            push(AttributeKind::TexCoord, "unorm16x2", 4);
        }
        if format & FORMAT_COLOR != 0 {
            push(AttributeKind::Color, "unorm8x4", 4);
        }
        if format & FORMAT_NORMAL != 0 {
            push(AttributeKind::Normal, "snorm16x2", 4);
        }

        Self {
            format,
            stride: vertex_stride_packed(format),
            vertex_count,
            attributes,
        }
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

/// Interleaved, packed vertex data plus its layout
#[derive(Debug, Clone, PartialEq)]
pub struct PackedMesh {
    pub layout: PackedLayout,
    pub vertices: Vec<u8>,
}

/// Ensure every present stream has exactly one element per vertex
fn check_streams(mesh: &MeshBuffer) -> Result<(), PackError> {
    if mesh.positions().is_empty() && mesh.vertex_count() > 0 {
        return Err(PackError::MissingPositions);
    }
    for kind in AttributeKind::ALL {
        let stream = mesh.stream(kind);
        let expected = mesh.vertex_count() * kind.components() as usize;
        if !stream.is_empty() && stream.len() != expected {
            return Err(PackError::StreamLength {
                attribute: kind,
                expected,
                actual: stream.len(),
            });
        }
    }
    Ok(())
}

/// Interleave a mesh into full-precision f32 vertices
///
/// Order per vertex: position, UV, color, normal (present attributes only).
pub fn interleave(mesh: &MeshBuffer) -> Result<Vec<f32>, PackError> {
    check_streams(mesh)?;

    let format = mesh.format();
    let floats_per_vertex = vertex_stride(format) as usize / 4;
    let mut out = Vec::with_capacity(mesh.vertex_count() * floats_per_vertex);

    for i in 0..mesh.vertex_count() {
        out.extend_from_slice(&mesh.positions()[i * 3..i * 3 + 3]);
        if format & FORMAT_UV != 0 {
            out.extend_from_slice(&mesh.tex_coords()[i * 2..i * 2 + 2]);
        }
        if format & FORMAT_COLOR != 0 {
            out.extend_from_slice(&mesh.colors()[i * 3..i * 3 + 3]);
        }
        if format & FORMAT_NORMAL != 0 {
            out.extend_from_slice(&mesh.normals()[i * 3..i * 3 + 3]);
        }
    }

    Ok(out)
}

/// Pack a mesh into the compact interleaved GPU layout
pub fn pack_mesh(mesh: &MeshBuffer) -> Result<PackedMesh, PackError> {
    check_streams(mesh)?;

    let format = mesh.format();
    let layout = PackedLayout::for_format(format, mesh.vertex_count());
    let mut vertices = Vec::with_capacity(mesh.vertex_count() * layout.stride as usize);

    for i in 0..mesh.vertex_count() {
        let position = Vec3::from_slice(&mesh.positions()[i * 3..i * 3 + 3]);
        vertices.extend_from_slice(cast_slice(&pack_position_f16(position)));

        if format & FORMAT_UV != 0 {
            let uv = &mesh.tex_coords()[i * 2..i * 2 + 2];
            vertices.extend_from_slice(cast_slice(&pack_uv_unorm16(uv[0], uv[1])));
        }

        if format & FORMAT_COLOR != 0 {
            let color = Vec3::from_slice(&mesh.colors()[i * 3..i * 3 + 3]);
            vertices.extend_from_slice(&pack_color_unorm8(color));
        }

        if format & FORMAT_NORMAL != 0 {
            let normal = Vec3::from_slice(&mesh.normals()[i * 3..i * 3 + 3]);
            vertices.extend_from_slice(&pack_normal_octahedral(normal).to_le_bytes());
        }
    }

    Ok(PackedMesh { layout, vertices })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shapes::{Quad, Torus};
    use crate::tessellate::{TessellationRequest, tessellate};

    #[test]
    fn test_pack_position_f16() {
        let packed = pack_position_f16(Vec3::new(1.0, 2.0, 3.0));
        assert_eq!(packed[0], f16::from_f32(1.0));
        assert_eq!(packed[1], f16::from_f32(2.0));
        assert_eq!(packed[2], f16::from_f32(3.0));
        assert_eq!(packed[3], f16::from_f32(1.0));
    }

    #[test]
    fn test_scalar_ranges() {
        assert_eq!(f32_to_snorm16(-1.0), -32767);
        assert_eq!(f32_to_snorm16(0.0), 0);
        assert_eq!(f32_to_snorm16(2.0), 32767);
        assert_eq!(f32_to_unorm8(0.0), 0);
        assert_eq!(f32_to_unorm8(0.5), 127);
        assert_eq!(f32_to_unorm8(1.0), 255);
    }

    #[test]
    fn test_octahedral_normals() {
        let dirs = [
            Vec3::X,
            Vec3::NEG_X,
            Vec3::Y,
            Vec3::Z,
            Vec3::NEG_Z,
            Vec3::new(0.577, -0.577, -0.577),
        ];

        for dir in dirs {
            let normalized = dir.normalize();
            let decoded = unpack_normal_octahedral(pack_normal_octahedral(normalized));
            assert!(
                (decoded - normalized).length() < 0.01,
                "octahedral encoding drifted for {:?}",
                normalized
            );
        }
    }

    #[test]
    fn test_vertex_strides() {
        assert_eq!(vertex_stride(0), 12);
        assert_eq!(vertex_stride(FORMAT_UV | FORMAT_NORMAL), 32);
        assert_eq!(vertex_stride(FORMAT_UV | FORMAT_COLOR | FORMAT_NORMAL), 44);
        assert_eq!(vertex_stride_packed(0), 8);
        assert_eq!(vertex_stride_packed(FORMAT_UV | FORMAT_NORMAL), 16);
        assert_eq!(vertex_stride_packed(FORMAT_UV | FORMAT_COLOR | FORMAT_NORMAL), 20);
    }

    #[test]
    fn test_pack_torus_size_matches_layout() {
        let torus = Torus::new(2.0, 0.5);
        let request = TessellationRequest::for_surface(&torus, 8, 6)
            .with_checker(Vec3::new(1.0, 0.0, 0.0), Vec3::new(0.0, 0.0, 1.0));
        let mesh = tessellate(&torus, &request).unwrap();

        let packed = pack_mesh(&mesh).unwrap();
        assert_eq!(packed.layout.format, FORMAT_UV | FORMAT_COLOR | FORMAT_NORMAL);
        assert_eq!(packed.layout.stride, 20);
        assert_eq!(packed.layout.vertex_count, 8 * 6 * 6);
        assert_eq!(packed.vertices.len(), 20 * 8 * 6 * 6);
    }

    #[test]
    fn test_packed_quad_first_vertex() {
        let quad = Quad::new(2.0);
        let request = TessellationRequest::for_surface(&quad, 1, 1);
        let mesh = tessellate(&quad, &request).unwrap();
        let packed = pack_mesh(&mesh).unwrap();

        // First vertex is (u0, v) = (0, 1): position (-1, 1, 0), uv (0, 1), normal +Z
        let position: &[f16] = cast_slice(&packed.vertices[0..8]);
        assert_eq!(position[0].to_f32(), -1.0);
        assert_eq!(position[1].to_f32(), 1.0);
        assert_eq!(position[2].to_f32(), 0.0);

        let uv: &[u16] = cast_slice(&packed.vertices[8..12]);
        assert_eq!(uv, [0, 65535]);

        let normal = u32::from_le_bytes(packed.vertices[12..16].try_into().unwrap());
        assert!((unpack_normal_octahedral(normal) - Vec3::Z).length() < 0.01);
    }

    #[test]
    fn test_interleave_order() {
        let quad = Quad::new(2.0);
        let request = TessellationRequest::for_surface(&quad, 1, 1);
        let mesh = tessellate(&quad, &request).unwrap();
        let data = interleave(&mesh).unwrap();

        assert_eq!(data.len(), 6 * 8);
        assert_eq!(&data[0..8], [-1.0, 1.0, 0.0, 0.0, 1.0, 0.0, 0.0, 1.0]);
    }

    #[test]
    fn test_pack_requires_positions() {
        let mesh = MeshBuffer {
            normals: vec![0.0, 0.0, 1.0],
            vertex_count: 1,
            ..Default::default()
        };
        assert_eq!(pack_mesh(&mesh), Err(PackError::MissingPositions));
    }

    #[test]
    fn test_pack_rejects_short_stream() {
        let mesh = MeshBuffer {
            positions: vec![0.0; 6],
            tex_coords: vec![0.0; 2],
            vertex_count: 2,
            ..Default::default()
        };
        assert_eq!(
            pack_mesh(&mesh),
            Err(PackError::StreamLength {
                attribute: AttributeKind::TexCoord,
                expected: 4,
                actual: 2,
            })
        );
    }

    #[test]
    fn test_layout_json() {
        let layout = PackedLayout::for_format(FORMAT_UV | FORMAT_NORMAL, 6);
        let offsets: Vec<u32> = layout.attributes.iter().map(|a| a.offset).collect();
        assert_eq!(offsets, [0, 8, 12]);

        let json = layout.to_json().unwrap();
        assert!(json.contains("\"vertexTexCoord\""));
        assert_eq!(PackedLayout::from_json(&json).unwrap(), layout);
    }
}
