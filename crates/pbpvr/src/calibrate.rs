//! Pressure-to-volume inversion
//!
//! The pressure curves have no closed-form inverse. The volume ratio which
//! reproduces a target pressure is found with a secant iteration on the
//! residual p(Vn) - p_target, started near the expected solution. The
//! passive curve is strictly increasing over the physiological range, so a
//! single root near the seed is expected.

use crate::{ChamberError, MmHg, VolumeRatio};

/// Empirical starting guess near the solution of all inversions
pub const INVERSION_SEED: VolumeRatio = VolumeRatio(1.6);

/// Klotz-style normalization references the volume reached at 30 mmHg
pub const KLOTZ_REFERENCE_PRESSURE: MmHg = MmHg(30.);

/// Solution of a pressure-to-volume inversion
#[derive(Clone, Copy, Debug)]
pub struct Inversion {
    /// Volume ratio which reproduces the target pressure
    pub volume_ratio: VolumeRatio,

    /// Signed pressure residual p(Vn) - p_target at the solution
    pub residual: MmHg,

    /// Number of secant steps taken
    pub iterations: usize,
}

/// Secant iteration for pressure_of(vn) == target.
///
/// accuracy is the residual tolerance in pressure units. Fails with
/// [ChamberError::Convergence] if the residual plateaus or the step budget
/// runs out before the tolerance is met; objective failures (collapsed
/// geometry, integration breakdown) propagate as-is.
pub(crate) fn invert_pressure(
    mut pressure_of: impl FnMut(f64) -> Result<f64, ChamberError>,
    target: f64,
    seed: f64,
    accuracy: f64,
    max_iterations: usize,
) -> Result<Inversion, ChamberError> {
    let mut x0 = seed;
    let mut x1 = seed + 0.05;
    let mut y0 = pressure_of(x0)? - target;
    let mut y1 = pressure_of(x1)? - target;

    for iteration in 0..max_iterations {
        if y1.abs() <= accuracy {
            return Ok(Inversion {
                volume_ratio: VolumeRatio(x1),
                residual: MmHg(y1),
                iterations: iteration,
            });
        }

        let dy = y1 - y0;
        if dy == 0. {
            return Err(ChamberError::Convergence {
                volume_ratio: x1,
                residual: y1,
                iterations: iteration,
            });
        }

        let x2 = x1 - y1 * (x1 - x0) / dy;
        (x0, y0) = (x1, y1);
        x1 = x2;
        y1 = pressure_of(x1)? - target;
    }

    if y1.abs() <= accuracy {
        return Ok(Inversion {
            volume_ratio: VolumeRatio(x1),
            residual: MmHg(y1),
            iterations: max_iterations,
        });
    }

    Err(ChamberError::Convergence {
        volume_ratio: x1,
        residual: y1,
        iterations: max_iterations,
    })
}
