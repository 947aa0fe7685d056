//! Concrete parametric surfaces
//!
//! Every shape here is a plain [`ParametricSurface`](crate::ParametricSurface)
//! and goes through the shared tessellator; none of them walks its own grid.

mod quad;
mod sphere;
mod torus;

pub use quad::Quad;
pub use sphere::Sphere;
pub use torus::Torus;

use tracing::warn;

/// Smallest dimension a shape accepts
pub(crate) const MIN_DIMENSION: f32 = 0.001;

/// Clamp a shape dimension that must be positive, warning on bad input
pub(crate) fn positive_or_clamp(shape: &str, field: &str, value: f32) -> f32 {
    if value > 0.0 && value.is_finite() {
        value
    } else {
        warn!(
            "{}: {} must be > 0.0 (got {}), clamping to {}",
            shape, field, value, MIN_DIMENSION
        );
        MIN_DIMENSION
    }
}
