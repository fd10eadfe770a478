use crate::DomainError;
use numerics::QuadratureError;
use thiserror::Error;

/// Failure modes of the chamber pressure model. The model fails fast: no
/// retries, no partially accurate values.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum ChamberError {
    /// Chamber geometry has no real solution for the requested volume
    #[error(transparent)]
    Domain(#[from] DomainError),

    /// The wall integral missed its accuracy target
    #[error("wall integral failed: {0}")]
    Integration(#[from] QuadratureError),

    /// Pressure inversion did not drive the residual below tolerance
    #[error(
        "inversion stalled at Vn={volume_ratio}: residual {residual} mmHg after {iterations} iterations"
    )]
    Convergence {
        volume_ratio: f64,
        residual: f64,
        iterations: usize,
    },

    /// A model parameter is non-finite or outside its valid range
    #[error("invalid parameter {name}={value}: {reason}")]
    InvalidParameter {
        name: &'static str,
        value: f64,
        reason: &'static str,
    },
}
