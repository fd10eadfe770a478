//! Goodness-of-fit statistics
//!
//! Error metrics between model output and measured pressure-volume data,
//! used by curve-fitting callers to grade a parameter fit.

use nalgebra::DMatrix;

/// Mean absolute error between predicted and observed samples
pub fn mean_absolute_error(predicted: &[f64], observed: &[f64]) -> f64 {
    assert_eq!(predicted.len(), observed.len());
    let sum: f64 = predicted
        .iter()
        .zip(observed)
        .map(|(p, o)| (p - o).abs())
        .sum();
    sum / predicted.len() as f64
}

/// Mean squared error between predicted and observed samples
pub fn mean_squared_error(predicted: &[f64], observed: &[f64]) -> f64 {
    assert_eq!(predicted.len(), observed.len());
    let sum: f64 = predicted
        .iter()
        .zip(observed)
        .map(|(p, o)| (p - o) * (p - o))
        .sum();
    sum / predicted.len() as f64
}

/// Root of the mean squared error
pub fn root_mean_squared_error(predicted: &[f64], observed: &[f64]) -> f64 {
    mean_squared_error(predicted, observed).sqrt()
}

/// Sample standard deviation of the residuals predicted - observed
pub fn residual_standard_deviation(predicted: &[f64], observed: &[f64]) -> f64 {
    assert_eq!(predicted.len(), observed.len());
    assert!(predicted.len() >= 2);

    let residuals: Vec<f64> = predicted.iter().zip(observed).map(|(p, o)| p - o).collect();
    let n = residuals.len() as f64;
    let mean = residuals.iter().sum::<f64>() / n;
    let var = residuals.iter().map(|r| (r - mean) * (r - mean)).sum::<f64>() / (n - 1.);
    var.sqrt()
}

/// Standard error of the mean residual
pub fn residual_standard_error(predicted: &[f64], observed: &[f64]) -> f64 {
    residual_standard_deviation(predicted, observed) / (predicted.len() as f64).sqrt()
}

/// Coefficient of determination R² = 1 - RSS/TSS
pub fn r_squared(predicted: &[f64], observed: &[f64]) -> f64 {
    assert_eq!(predicted.len(), observed.len());

    let rss: f64 = predicted
        .iter()
        .zip(observed)
        .map(|(p, o)| (o - p) * (o - p))
        .sum();
    let mean = observed.iter().sum::<f64>() / observed.len() as f64;
    let tss: f64 = observed.iter().map(|o| (o - mean) * (o - mean)).sum();
    1. - rss / tss
}

/// Correlation of fitted parameters from the covariance matrix of a fit:
/// corr_ij = cov_ij / (σ_i σ_j)
pub fn correlation_matrix(covariance: &DMatrix<f64>) -> DMatrix<f64> {
    assert_eq!(covariance.nrows(), covariance.ncols());

    let sigma: Vec<f64> = (0..covariance.nrows())
        .map(|i| covariance[(i, i)].sqrt())
        .collect();

    DMatrix::from_fn(covariance.nrows(), covariance.ncols(), |i, j| {
        covariance[(i, j)] / (sigma[i] * sigma[j])
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    const PREDICTED: [f64; 4] = [1., 2., 3., 4.];
    const OBSERVED: [f64; 4] = [1.5, 2., 2.5, 4.];

    #[test]
    fn test_error_metrics() {
        assert_relative_eq!(mean_absolute_error(&PREDICTED, &OBSERVED), 0.25);
        assert_relative_eq!(mean_squared_error(&PREDICTED, &OBSERVED), 0.125);
        assert_relative_eq!(
            root_mean_squared_error(&PREDICTED, &OBSERVED),
            0.125f64.sqrt()
        );

        // a perfect fit has no error and explains all variance
        assert_relative_eq!(mean_absolute_error(&OBSERVED, &OBSERVED), 0.);
        assert_relative_eq!(r_squared(&OBSERVED, &OBSERVED), 1.);
    }

    #[test]
    fn test_residual_spread() {
        // residuals are [-0.5, 0, 0.5, 0] with zero mean
        let sd = residual_standard_deviation(&PREDICTED, &OBSERVED);
        assert_relative_eq!(sd, (0.5f64 / 3.).sqrt(), max_relative = 1e-12);
        assert_relative_eq!(
            residual_standard_error(&PREDICTED, &OBSERVED),
            sd / 2.,
            max_relative = 1e-12
        );
    }

    #[test]
    fn test_r_squared_against_mean_predictor() {
        // predicting the observed mean everywhere explains no variance
        let mean = OBSERVED.iter().sum::<f64>() / OBSERVED.len() as f64;
        let flat = [mean; 4];
        assert_relative_eq!(r_squared(&flat, &OBSERVED), 0.);
    }

    #[test]
    fn test_correlation_matrix() {
        let cov = DMatrix::from_row_slice(2, 2, &[4., 2., 2., 9.]);
        let corr = correlation_matrix(&cov);

        assert_relative_eq!(corr[(0, 0)], 1.);
        assert_relative_eq!(corr[(1, 1)], 1.);
        assert_relative_eq!(corr[(0, 1)], 2. / 6.);
        assert_relative_eq!(corr[(1, 0)], 2. / 6.);
    }
}
