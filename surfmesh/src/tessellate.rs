//! Parametric surface tessellation
//!
//! The parameter domain is split into an `M × N` grid. Every cell emits two
//! independent triangles (6 vertices, nothing shared), so a request always
//! produces `M * N * 6` vertices.
//!
//! For cell `(i, j)` (1-indexed) with corners `u0 < u` and `v0 < v`:
//! - Triangle 1: `(u0, v)`, `(u0, v0)`, `(u, v0)`
//! - Triangle 2: `(u, v)`, `(u0, v)`, `(u, v0)`
//!
//! This winding is fixed; back-face culling depends on it.

use glam::Vec3;
use tracing::debug;

use crate::attribute::AttributeKind;
use crate::error::TessellationError;
use crate::mesh::MeshBuffer;
use crate::surface::{Capabilities, Domain, ParametricSurface};

/// Vertices emitted per grid cell (two triangles, unshared)
pub const VERTICES_PER_CELL: usize = 6;

/// Two alternating cell colors, for eyeballing tessellation density.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Checkerboard {
    /// Used where `(i + j)` is even
    pub even: Vec3,
    /// Used where `(i + j)` is odd
    pub odd: Vec3,
}

impl Checkerboard {
    pub fn new(even: Vec3, odd: Vec3) -> Self {
        Self { even, odd }
    }

    /// Color of grid cell `(i, j)`, using the same 1-based indices as the grid walk
    #[inline]
    pub fn color_for_cell(&self, i: u32, j: u32) -> Vec3 {
        // (i + j) is even exactly when i and j share their low bit
        if (i ^ j) & 1 == 0 { self.even } else { self.odd }
    }
}

/// Grid resolution, parameter ranges and optional coloring for one tessellation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TessellationRequest {
    /// Subdivisions along `u` (M)
    pub u_segments: u32,
    /// Subdivisions along `v` (N)
    pub v_segments: u32,
    pub domain: Domain,
    pub checker: Option<Checkerboard>,
}

impl TessellationRequest {
    pub fn new(u_segments: u32, v_segments: u32, domain: Domain) -> Self {
        Self {
            u_segments,
            v_segments,
            domain,
            checker: None,
        }
    }

    /// Request covering the surface's natural domain
    pub fn for_surface<S: ParametricSurface + ?Sized>(
        surface: &S,
        u_segments: u32,
        v_segments: u32,
    ) -> Self {
        Self::new(u_segments, v_segments, surface.domain())
    }

    pub fn with_checker(mut self, even: Vec3, odd: Vec3) -> Self {
        self.checker = Some(Checkerboard::new(even, odd));
        self
    }

    /// Number of vertices this request produces, or `None` if it overflows `usize`
    pub fn vertex_count(&self) -> Option<usize> {
        (self.u_segments as usize)
            .checked_mul(self.v_segments as usize)?
            .checked_mul(VERTICES_PER_CELL)
    }

    fn validate(&self) -> Result<(), TessellationError> {
        let Domain {
            u_min,
            u_max,
            v_min,
            v_max,
        } = self.domain;
        for (min, max) in [(u_min, u_max), (v_min, v_max)] {
            if !min.is_finite() || !max.is_finite() {
                return Err(TessellationError::InvalidRange { min, max });
            }
        }
        Ok(())
    }
}

/// Tessellate a surface into a non-indexed triangle list.
///
/// Each stream advances only for attributes the surface declares (plus
/// colors when a checkerboard is requested). A zero grid dimension yields
/// an empty mesh.
///
/// # Errors
///
/// Returns [`TessellationError::NonFiniteAttribute`] as soon as the surface
/// evaluates to NaN or infinity, [`TessellationError::InvalidRange`] for
/// non-finite domain bounds, and [`TessellationError::TooManyVertices`] when
/// the grid's vertex count does not fit in `usize`. An empty grid is checked
/// first and never fails, whatever its domain.
pub fn tessellate<S: ParametricSurface + ?Sized>(
    surface: &S,
    request: &TessellationRequest,
) -> Result<MeshBuffer, TessellationError> {
    if request.u_segments == 0 || request.v_segments == 0 {
        debug!(
            u_segments = request.u_segments,
            v_segments = request.v_segments,
            "empty tessellation grid"
        );
        return Ok(MeshBuffer::new());
    }

    request.validate()?;

    let vertex_count = request
        .vertex_count()
        .ok_or(TessellationError::TooManyVertices {
            u_segments: request.u_segments,
            v_segments: request.v_segments,
        })?;

    let emitter = Emitter::new(surface, request.checker);
    let mut mesh = MeshBuffer::with_capacity(vertex_count, &emitter.kinds());

    let m = request.u_segments;
    let n = request.v_segments;
    let Domain {
        u_min,
        u_max,
        v_min,
        v_max,
    } = request.domain;
    let u_span = u_max - u_min;
    let v_span = v_max - v_min;

    for i in 1..=m {
        let u0 = u_min + (i - 1) as f32 * u_span / m as f32;
        let u = u_min + i as f32 * u_span / m as f32;

        for j in 1..=n {
            let v0 = v_min + (j - 1) as f32 * v_span / n as f32;
            let v = v_min + j as f32 * v_span / n as f32;

            let color = request.checker.map(|c| c.color_for_cell(i, j));

            // Triangle 1
            emitter.emit(&mut mesh, u0, v, color)?;
            emitter.emit(&mut mesh, u0, v0, color)?;
            emitter.emit(&mut mesh, u, v0, color)?;

            // Triangle 2
            emitter.emit(&mut mesh, u, v, color)?;
            emitter.emit(&mut mesh, u0, v, color)?;
            emitter.emit(&mut mesh, u, v0, color)?;
        }
    }

    mesh.vertex_count = vertex_count;

    debug!(
        vertices = vertex_count,
        positions = mesh.positions.len(),
        normals = mesh.normals.len(),
        tex_coords = mesh.tex_coords.len(),
        colors = mesh.colors.len(),
        "tessellated surface"
    );

    Ok(mesh)
}

/// Per-vertex attribute emission with capabilities resolved up front
struct Emitter<'a, S: ?Sized> {
    surface: &'a S,
    position: bool,
    normal: bool,
    tex_coord: bool,
    color: bool,
}

impl<'a, S: ParametricSurface + ?Sized> Emitter<'a, S> {
    fn new(surface: &'a S, checker: Option<Checkerboard>) -> Self {
        let caps = surface.capabilities();
        Self {
            surface,
            position: caps.contains(Capabilities::POSITION),
            normal: caps.contains(Capabilities::NORMAL),
            tex_coord: caps.contains(Capabilities::TEX_COORD),
            color: checker.is_some(),
        }
    }

    fn kinds(&self) -> Vec<AttributeKind> {
        let mut kinds = Vec::with_capacity(4);
        if self.position {
            kinds.push(AttributeKind::Position);
        }
        if self.normal {
            kinds.push(AttributeKind::Normal);
        }
        if self.tex_coord {
            kinds.push(AttributeKind::TexCoord);
        }
        if self.color {
            kinds.push(AttributeKind::Color);
        }
        kinds
    }

    fn emit(
        &self,
        mesh: &mut MeshBuffer,
        u: f32,
        v: f32,
        color: Option<Vec3>,
    ) -> Result<(), TessellationError> {
        if self.tex_coord {
            let uv = self.surface.tex_coord(u, v);
            check_finite(uv.is_finite(), AttributeKind::TexCoord, u, v)?;
            mesh.tex_coords.extend_from_slice(&uv.to_array());
        }
        if self.position {
            let p = self.surface.position(u, v);
            check_finite(p.is_finite(), AttributeKind::Position, u, v)?;
            mesh.positions.extend_from_slice(&p.to_array());
        }
        if self.normal {
            let n = self.surface.normal(u, v);
            check_finite(n.is_finite(), AttributeKind::Normal, u, v)?;
            mesh.normals.extend_from_slice(&n.to_array());
        }
        if let Some(c) = color {
            mesh.colors.extend_from_slice(&c.to_array());
        }
        Ok(())
    }
}

fn check_finite(
    is_finite: bool,
    attribute: AttributeKind,
    u: f32,
    v: f32,
) -> Result<(), TessellationError> {
    if is_finite {
        Ok(())
    } else {
        Err(TessellationError::NonFiniteAttribute { attribute, u, v })
    }
}
