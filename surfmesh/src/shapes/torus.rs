use std::f32::consts::TAU;

use glam::{Vec2, Vec3};

use super::positive_or_clamp;
use crate::surface::{Capabilities, Domain, ParametricSurface};

/// Torus around the Z axis.
///
/// Parameters: `t` walks the ring (major circle) and `p` walks the tube
/// (minor circle), both over `[0, 2π]`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Torus {
    radius: f32,
    tube_radius: f32,
}

impl Torus {
    /// # Arguments
    /// * `radius` - Distance from the torus center to the tube center
    /// * `tube_radius` - Radius of the tube
    ///
    /// Non-positive radii are clamped to 0.001.
    pub fn new(radius: f32, tube_radius: f32) -> Self {
        Self {
            radius: positive_or_clamp("Torus", "radius", radius),
            tube_radius: positive_or_clamp("Torus", "tube_radius", tube_radius),
        }
    }

    pub fn radius(&self) -> f32 {
        self.radius
    }

    pub fn tube_radius(&self) -> f32 {
        self.tube_radius
    }
}

impl ParametricSurface for Torus {
    fn capabilities(&self) -> Capabilities {
        Capabilities::ALL
    }

    fn domain(&self) -> Domain {
        Domain::new(0.0, TAU, 0.0, TAU)
    }

    fn position(&self, t: f32, p: f32) -> Vec3 {
        let ring = self.radius + self.tube_radius * p.cos();
        Vec3::new(ring * t.cos(), ring * t.sin(), self.tube_radius * p.sin())
    }

    fn normal(&self, t: f32, p: f32) -> Vec3 {
        let ring = p.cos();
        Vec3::new(ring * t.cos(), ring * t.sin(), p.sin())
    }

    fn tex_coord(&self, t: f32, p: f32) -> Vec2 {
        Vec2::new(t / TAU, p / TAU)
    }
}
