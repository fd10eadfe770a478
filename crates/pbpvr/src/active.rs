//! Active pressure contribution of contracting muscle fibers
//!
//! Contracted fibers develop the tension Ta, attenuated by the local stretch
//! relative to the reference sarcomere stretch λ0. Integrating the
//! tension-density rate across the wall thickness yields the contractile
//! part of the chamber pressure.

use crate::outer_radius;

/// Active tension density rate at wall depth d:
///
/// dWa = 2 Ta (1 - λ0 √(λ/2))/r
///
/// The caller must guarantee volume_ratio > 0 so the inner radius stays real
/// for every depth d >= 0.
pub fn active_tension_rate(
    depth: f64,
    volume_ratio: f64,
    tension: f64,
    reference_stretch: f64,
) -> f64 {
    let r = (outer_radius(depth).powi(3) + volume_ratio - 1.).cbrt();
    let stretch = outer_radius(depth).powi(2) / (r * r);

    2. * tension * (1. - reference_stretch * (stretch / 2.).sqrt()) / r
}
