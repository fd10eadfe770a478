//! Geometry of a thick-walled spherical chamber
//!
//! All lengths are normalized by the unloaded inner radius. A material point
//! in the wall is addressed by its depth d, sitting at radius R = 1 + d in
//! the unloaded state. The wall is incompressible, so inflating the chamber
//! to the volume ratio Vn moves the point to r with r³ = R³ + Vn - 1 and
//! stretches it radially by λ = R²/r².

use thiserror::Error;

/// The inner-radius radicand R³ + Vn - 1 is not positive, so no real wall
/// geometry exists for this depth/volume pair.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
#[error("wall collapsed at depth {depth}: no real inner radius for volume ratio {volume_ratio}")]
pub struct DomainError {
    pub depth: f64,
    pub volume_ratio: f64,
}

/// Normalized radius of the wall shell at depth d in the unloaded state
pub fn outer_radius(depth: f64) -> f64 {
    1. + depth
}

/// Normalized radius of the wall shell at depth d once the chamber holds the
/// volume ratio Vn, from volume conservation of the incompressible wall
pub fn inner_radius(depth: f64, volume_ratio: f64) -> Result<f64, DomainError> {
    let radicand = outer_radius(depth).powi(3) + volume_ratio - 1.;
    if radicand <= 0. {
        return Err(DomainError {
            depth,
            volume_ratio,
        });
    }
    Ok(radicand.cbrt())
}

/// Radial stretch λ = R²/r² of the wall material at depth d
pub fn radial_stretch(depth: f64, volume_ratio: f64) -> Result<f64, DomainError> {
    let r = inner_radius(depth, volume_ratio)?;
    Ok(outer_radius(depth).powi(2) / (r * r))
}

/// First strain invariant of an isotropic incompressible stretch:
/// I₁ = λ² + 2/λ
pub fn first_invariant(stretch: f64) -> f64 {
    stretch * stretch + 2. / stretch
}
