//! Parametric surfaces
//!
//! A surface maps a 2D parameter `(u, v)` to a 3D position and may also
//! supply a normal and a texture coordinate. Which of these it supplies is
//! declared once through [`Capabilities`], so the tessellator never has to
//! probe per vertex.

use std::ops::BitOr;

use glam::{Vec2, Vec3};

/// Set of attributes a surface can evaluate.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Capabilities(u8);

impl Capabilities {
    pub const NONE: Capabilities = Capabilities(0);
    pub const POSITION: Capabilities = Capabilities(1);
    pub const NORMAL: Capabilities = Capabilities(2);
    pub const TEX_COORD: Capabilities = Capabilities(4);
    pub const ALL: Capabilities = Capabilities(1 | 2 | 4);

    #[inline]
    pub const fn contains(self, other: Capabilities) -> bool {
        self.0 & other.0 == other.0
    }

    #[inline]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    pub const fn bits(self) -> u8 {
        self.0
    }
}

impl BitOr for Capabilities {
    type Output = Capabilities;

    fn bitor(self, rhs: Capabilities) -> Capabilities {
        Capabilities(self.0 | rhs.0)
    }
}

/// Rectangular parameter domain `[u_min, u_max] × [v_min, v_max]`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Domain {
    pub u_min: f32,
    pub u_max: f32,
    pub v_min: f32,
    pub v_max: f32,
}

impl Domain {
    /// The unit square `[0, 1] × [0, 1]`
    pub const UNIT: Domain = Domain::new(0.0, 1.0, 0.0, 1.0);

    pub const fn new(u_min: f32, u_max: f32, v_min: f32, v_max: f32) -> Self {
        Self {
            u_min,
            u_max,
            v_min,
            v_max,
        }
    }
}

impl Default for Domain {
    fn default() -> Self {
        Domain::UNIT
    }
}

/// A surface defined over a 2D parameter domain.
///
/// Implementors declare which attributes they evaluate through
/// [`capabilities`](ParametricSurface::capabilities). Methods for attributes
/// that are not declared are never called by the tessellator; their default
/// bodies return zero.
pub trait ParametricSurface {
    /// Attributes this surface evaluates
    fn capabilities(&self) -> Capabilities;

    /// Natural parameter domain of the surface
    fn domain(&self) -> Domain {
        Domain::UNIT
    }

    fn position(&self, _u: f32, _v: f32) -> Vec3 {
        Vec3::ZERO
    }

    fn normal(&self, _u: f32, _v: f32) -> Vec3 {
        Vec3::ZERO
    }

    fn tex_coord(&self, _u: f32, _v: f32) -> Vec2 {
        Vec2::ZERO
    }
}

impl<S: ParametricSurface + ?Sized> ParametricSurface for &S {
    fn capabilities(&self) -> Capabilities {
        (**self).capabilities()
    }

    fn domain(&self) -> Domain {
        (**self).domain()
    }

    fn position(&self, u: f32, v: f32) -> Vec3 {
        (**self).position(u, v)
    }

    fn normal(&self, u: f32, v: f32) -> Vec3 {
        (**self).normal(u, v)
    }

    fn tex_coord(&self, u: f32, v: f32) -> Vec2 {
        (**self).tex_coord(u, v)
    }
}

type Vec3Fn = Box<dyn Fn(f32, f32) -> Vec3 + Send + Sync>;
type Vec2Fn = Box<dyn Fn(f32, f32) -> Vec2 + Send + Sync>;

/// A surface assembled from closures.
///
/// ```
/// use glam::Vec3;
/// use surfmesh::{Capabilities, FnSurface, ParametricSurface};
///
/// let wave = FnSurface::new()
///     .with_position(|u, v| Vec3::new(u, v, (u * 6.0).sin() * 0.1));
/// assert_eq!(wave.capabilities(), Capabilities::POSITION);
/// ```
#[derive(Default)]
pub struct FnSurface {
    domain: Domain,
    position: Option<Vec3Fn>,
    normal: Option<Vec3Fn>,
    tex_coord: Option<Vec2Fn>,
}

impl FnSurface {
    /// Create a surface with no attributes over the unit square
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_domain(mut self, domain: Domain) -> Self {
        self.domain = domain;
        self
    }

    pub fn with_position<F>(mut self, f: F) -> Self
    where
        F: Fn(f32, f32) -> Vec3 + Send + Sync + 'static,
    {
        self.position = Some(Box::new(f));
        self
    }

    pub fn with_normal<F>(mut self, f: F) -> Self
    where
        F: Fn(f32, f32) -> Vec3 + Send + Sync + 'static,
    {
        self.normal = Some(Box::new(f));
        self
    }

    pub fn with_tex_coord<F>(mut self, f: F) -> Self
    where
        F: Fn(f32, f32) -> Vec2 + Send + Sync + 'static,
    {
        self.tex_coord = Some(Box::new(f));
        self
    }
}

impl ParametricSurface for FnSurface {
    fn capabilities(&self) -> Capabilities {
        let mut caps = Capabilities::NONE;
        if self.position.is_some() {
            caps = caps | Capabilities::POSITION;
        }
        if self.normal.is_some() {
            caps = caps | Capabilities::NORMAL;
        }
        if self.tex_coord.is_some() {
            caps = caps | Capabilities::TEX_COORD;
        }
        caps
    }

    fn domain(&self) -> Domain {
        self.domain
    }

    fn position(&self, u: f32, v: f32) -> Vec3 {
        self.position.as_ref().map_or(Vec3::ZERO, |f| f(u, v))
    }

    fn normal(&self, u: f32, v: f32) -> Vec3 {
        self.normal.as_ref().map_or(Vec3::ZERO, |f| f(u, v))
    }

    fn tex_coord(&self, u: f32, v: f32) -> Vec2 {
        self.tex_coord.as_ref().map_or(Vec2::ZERO, |f| f(u, v))
    }
}
