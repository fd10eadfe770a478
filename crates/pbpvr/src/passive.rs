//! Passive pressure contribution of the chamber wall
//!
//! The wall material follows an exponential (Fung-type) strain-energy law
//! with stiffness scale a and stiffening rate b. Integrating the
//! energy-density rate across the wall thickness yields the end-diastolic
//! chamber pressure.

use crate::{first_invariant, outer_radius};

/// Passive strain-energy density rate at wall depth d:
///
/// dW = 2 a (1 - λ³)/r · exp(b (I₁(λ) - 3))
///
/// The caller must guarantee volume_ratio > 0 so the inner radius stays real
/// for every depth d >= 0.
pub fn passive_energy_rate(depth: f64, volume_ratio: f64, stiffness: f64, stiffening: f64) -> f64 {
    let r = (outer_radius(depth).powi(3) + volume_ratio - 1.).cbrt();
    let stretch = outer_radius(depth).powi(2) / (r * r);

    2. * stiffness * (1. - stretch.powi(3)) / r
        * (stiffening * (first_invariant(stretch) - 3.)).exp()
}
