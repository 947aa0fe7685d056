use glam::{Vec2, Vec3};

use super::positive_or_clamp;
use crate::surface::{Capabilities, Domain, ParametricSurface};

/// Square in the XY plane, centered at the origin, facing +Z.
///
/// Tessellated at 1×1 over its unit domain it yields the classic
/// two-triangle quad.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Quad {
    size: f32,
}

impl Quad {
    /// `size` is the full side length; non-positive sizes are clamped to 0.001.
    pub fn new(size: f32) -> Self {
        Self {
            size: positive_or_clamp("Quad", "size", size),
        }
    }

    pub fn size(&self) -> f32 {
        self.size
    }
}

impl Default for Quad {
    fn default() -> Self {
        Self { size: 2.0 }
    }
}

impl ParametricSurface for Quad {
    fn capabilities(&self) -> Capabilities {
        Capabilities::ALL
    }

    fn domain(&self) -> Domain {
        Domain::UNIT
    }

    fn position(&self, u: f32, v: f32) -> Vec3 {
        Vec3::new((u - 0.5) * self.size, (v - 0.5) * self.size, 0.0)
    }

    fn normal(&self, _u: f32, _v: f32) -> Vec3 {
        Vec3::Z
    }

    fn tex_coord(&self, u: f32, v: f32) -> Vec2 {
        Vec2::new(u, v)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tessellate::{TessellationRequest, tessellate};

    #[test]
    fn test_default_quad_spans_clip_space() {
        let quad = Quad::default();
        assert_eq!(quad.position(0.0, 0.0), Vec3::new(-1.0, -1.0, 0.0));
        assert_eq!(quad.position(1.0, 1.0), Vec3::new(1.0, 1.0, 0.0));
    }

    #[test]
    fn test_single_cell_quad() {
        let quad = Quad::new(1.0);
        let request = TessellationRequest::for_surface(&quad, 1, 1);
        let mesh = tessellate(&quad, &request).unwrap();

        assert_eq!(mesh.vertex_count(), 6);
        assert_eq!(mesh.position(0), Some(Vec3::new(-0.5, 0.5, 0.0)));
        assert_eq!(mesh.position(1), Some(Vec3::new(-0.5, -0.5, 0.0)));
        assert_eq!(mesh.position(2), Some(Vec3::new(0.5, -0.5, 0.0)));
        assert_eq!(mesh.position(3), Some(Vec3::new(0.5, 0.5, 0.0)));
        assert!((0..6).all(|k| mesh.normal(k) == Some(Vec3::Z)));
    }

    #[test]
    fn test_quad_faces_its_normal() {
        let quad = Quad::new(4.0);
        let request = TessellationRequest::for_surface(&quad, 1, 1);
        let mesh = tessellate(&quad, &request).unwrap();

        for tri in 0..2 {
            let a = mesh.position(tri * 3).unwrap();
            let b = mesh.position(tri * 3 + 1).unwrap();
            let c = mesh.position(tri * 3 + 2).unwrap();
            let face = (b - a).cross(c - a);
            assert!(face.dot(Vec3::Z) > 0.0, "triangle {tri} winds away from +Z");
        }
    }
}
