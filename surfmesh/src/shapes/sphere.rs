use std::f32::consts::{FRAC_PI_2, PI, TAU};

use glam::{Vec2, Vec3};

use super::positive_or_clamp;
use crate::surface::{Capabilities, Domain, ParametricSurface};

/// Sphere centered at the origin, poles on the Z axis.
///
/// Parameters: longitude `theta` over `[0, 2π]` and latitude `phi` over
/// `[-π/2, π/2]`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Sphere {
    radius: f32,
}

impl Sphere {
    /// Non-positive radius is clamped to 0.001.
    pub fn new(radius: f32) -> Self {
        Self {
            radius: positive_or_clamp("Sphere", "radius", radius),
        }
    }

    pub fn radius(&self) -> f32 {
        self.radius
    }

    /// Unit direction from the center for `(theta, phi)`
    fn direction(theta: f32, phi: f32) -> Vec3 {
        let (sin_phi, cos_phi) = phi.sin_cos();
        Vec3::new(cos_phi * theta.cos(), cos_phi * theta.sin(), sin_phi)
    }
}

impl ParametricSurface for Sphere {
    fn capabilities(&self) -> Capabilities {
        Capabilities::ALL
    }

    fn domain(&self) -> Domain {
        Domain::new(0.0, TAU, -FRAC_PI_2, FRAC_PI_2)
    }

    fn position(&self, theta: f32, phi: f32) -> Vec3 {
        Self::direction(theta, phi) * self.radius
    }

    fn normal(&self, theta: f32, phi: f32) -> Vec3 {
        Self::direction(theta, phi)
    }

    fn tex_coord(&self, theta: f32, phi: f32) -> Vec2 {
        Vec2::new(theta / TAU, (phi + FRAC_PI_2) / PI)
    }
}
