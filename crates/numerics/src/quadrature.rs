//! Adaptive quadrature based on Gauss-Kronrod rules
//!
//! Evaluates the integral of f over [a, b] with the 15-point Kronrod
//! extension of the 7-point Gauss rule. The embedded Gauss value provides an
//! error estimate per interval and intervals which miss the requested
//! accuracy are bisected, each half inheriting half the budget.
//!
//! Reference: https://en.wikipedia.org/wiki/Gauss%E2%80%93Kronrod_quadrature_formula

/// Abscissae of the 15-point Kronrod rule on [-1, 1], positive half only.
/// Entries with odd index are also nodes of the embedded 7-point Gauss rule.
const KRONROD_NODES: [f64; 8] = [
    0.991455371120812639206854697526329,
    0.949107912342758524526189684047851,
    0.864864423359769072789712788640926,
    0.741531185599394439863864773280788,
    0.586087235467691130294144838258730,
    0.405845151377397166906606412076961,
    0.207784955007898467600689403773245,
    0.000000000000000000000000000000000,
];

/// Weights of the 15-point Kronrod rule, matching KRONROD_NODES.
const KRONROD_WEIGHTS: [f64; 8] = [
    0.022935322010529224963732008058970,
    0.063092092629978553290700663189204,
    0.104790010322250183839876322541518,
    0.140653259715525918745189590510238,
    0.169004726639267902826583426598550,
    0.190350578064785409913256402421014,
    0.204432940075298892414161999234649,
    0.209482141084727828012999174891714,
];

/// Weights of the embedded 7-point Gauss rule.
const GAUSS_WEIGHTS: [f64; 4] = [
    0.129484966168869693270611432679082,
    0.279705391489276667901467771423780,
    0.381830050505118944950369775488975,
    0.417959183673469387755102040816327,
];

/// Value of an integral together with its accuracy estimate.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Quadrature {
    /// Estimated value of the integral
    pub value: f64,

    /// Upper estimate of the absolute integration error
    pub error: f64,

    /// Number of Gauss-Kronrod intervals evaluated
    pub intervals: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, thiserror::Error)]
pub enum QuadratureError {
    /// The integrand returned NaN or an infinite value.
    #[error("integrand is not finite at x={x}")]
    NotFinite { x: f64 },

    /// Bisection hit the subdivision limit before the accuracy was met.
    #[error("accuracy {accuracy:e} not reached: error estimate {error:e}")]
    AccuracyNotReached {
        value: f64,
        error: f64,
        accuracy: f64,
    },
}

impl QuadratureError {
    /// Best available value of the integral despite the failure
    pub fn best_guess(&self) -> f64 {
        match *self {
            QuadratureError::NotFinite { .. } => f64::NAN,
            QuadratureError::AccuracyNotReached { value, .. } => value,
        }
    }
}

/// Integrate f over [a, b] to given absolute accuracy.
///
/// max_depth bounds the bisection depth, so at most 2^max_depth intervals are
/// evaluated. Fails if the integrand is not finite at a node or the accuracy
/// cannot be met within the depth budget.
pub fn adaptive_quadrature<F>(
    a: f64,
    b: f64,
    accuracy: f64,
    max_depth: usize,
    mut f: F,
) -> Result<Quadrature, QuadratureError>
where
    F: FnMut(f64) -> f64,
{
    integrate_interval(a, b, accuracy, max_depth, &mut f)
}

fn integrate_interval<F>(
    a: f64,
    b: f64,
    accuracy: f64,
    max_depth: usize,
    f: &mut F,
) -> Result<Quadrature, QuadratureError>
where
    F: FnMut(f64) -> f64,
{
    let (value, error) = kronrod_15(a, b, f)?;

    if error <= accuracy {
        return Ok(Quadrature {
            value,
            error,
            intervals: 1,
        });
    }

    if max_depth == 0 {
        return Err(QuadratureError::AccuracyNotReached {
            value,
            error,
            accuracy,
        });
    }

    let mid = 0.5 * (a + b);
    let lo = integrate_interval(a, mid, 0.5 * accuracy, max_depth - 1, f)?;
    let hi = integrate_interval(mid, b, 0.5 * accuracy, max_depth - 1, f)?;

    Ok(Quadrature {
        value: lo.value + hi.value,
        error: lo.error + hi.error,
        intervals: lo.intervals + hi.intervals,
    })
}

/// One Gauss-Kronrod evaluation over [a, b]. Returns the Kronrod value and
/// the deviation from the embedded Gauss value as error estimate.
fn kronrod_15<F>(a: f64, b: f64, f: &mut F) -> Result<(f64, f64), QuadratureError>
where
    F: FnMut(f64) -> f64,
{
    let center = 0.5 * (a + b);
    let half = 0.5 * (b - a);

    let mut eval = |x: f64| -> Result<f64, QuadratureError> {
        let y = f(x);
        if y.is_finite() {
            Ok(y)
        } else {
            Err(QuadratureError::NotFinite { x })
        }
    };

    let fc = eval(center)?;
    let mut kronrod = KRONROD_WEIGHTS[7] * fc;
    let mut gauss = GAUSS_WEIGHTS[3] * fc;

    for i in 0..7 {
        let dx = half * KRONROD_NODES[i];
        let pair = eval(center - dx)? + eval(center + dx)?;
        kronrod += KRONROD_WEIGHTS[i] * pair;
        if i % 2 == 1 {
            gauss += GAUSS_WEIGHTS[i / 2] * pair;
        }
    }

    Ok((half * kronrod, (half * (kronrod - gauss)).abs()))
}
