//! L2-regularized logistic regression
//!
//! Minimizes `½‖w‖² + C Σ log(1 + exp(-yᵢ wᵀxᵢ))` with labels `yᵢ ∈ {-1, +1}`.
//! The intercept is the weight of a constant feature of value 1 and is
//! penalized like every other weight. Newton steps with a backtracking line
//! search solve the problem; the Hessian is always positive definite.

use crate::encode::LungCapClass;
use lungcap_core::{Error, Result};
use nalgebra::{DMatrix, DVector};
use tracing::{debug, instrument};

/// Solver settings
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LogisticOptions {
    /// Inverse regularization strength
    pub c: f64,
    pub max_iter: usize,
    /// Stop once the gradient norm falls below `tol` times its starting value
    pub tol: f64,
}

impl Default for LogisticOptions {
    fn default() -> Self {
        Self {
            c: 1.0,
            max_iter: 100,
            tol: 1e-10,
        }
    }
}

fn sigmoid(z: f64) -> f64 {
    if z >= 0.0 {
        1.0 / (1.0 + (-z).exp())
    } else {
        let e = z.exp();
        e / (1.0 + e)
    }
}

/// `log(1 + exp(-m))` without overflow
fn log_loss(margin: f64) -> f64 {
    if margin > 0.0 {
        (-margin).exp().ln_1p()
    } else {
        -margin + margin.exp().ln_1p()
    }
}

fn with_bias(x: &DMatrix<f64>) -> DMatrix<f64> {
    x.clone().insert_column(x.ncols(), 1.0)
}

/// A trained classifier
#[derive(Debug, Clone, PartialEq)]
pub struct LogisticModel {
    coefficients: DVector<f64>,
    intercept: f64,
    iterations: usize,
}

struct Objective<'a> {
    x: &'a DMatrix<f64>,
    y: &'a DVector<f64>,
    c: f64,
}

impl Objective<'_> {
    fn value(&self, w: &DVector<f64>) -> f64 {
        let margins = (self.x * w).component_mul(self.y);
        0.5 * w.norm_squared() + self.c * margins.iter().map(|&m| log_loss(m)).sum::<f64>()
    }

    fn gradient_and_hessian(&self, w: &DVector<f64>) -> (DVector<f64>, DMatrix<f64>) {
        let margins = (self.x * w).component_mul(self.y);
        let k = w.len();
        let mut gradient = w.clone();
        let mut hessian = DMatrix::<f64>::identity(k, k);
        for (i, &m) in margins.iter().enumerate() {
            let s = sigmoid(m);
            let row = self.x.row(i);
            gradient += row.transpose() * (self.c * (s - 1.0) * self.y[i]);
            hessian += row.transpose() * row * (self.c * s * (1.0 - s));
        }
        (gradient, hessian)
    }
}

/// Fit on feature rows `x` (no constant column) and class labels
#[instrument(skip_all, fields(n = x.nrows(), features = x.ncols()))]
pub fn fit_logistic(
    x: &DMatrix<f64>,
    labels: &[LungCapClass],
    options: &LogisticOptions,
) -> Result<LogisticModel> {
    if x.nrows() != labels.len() {
        return Err(Error::size_mismatch(x.nrows(), labels.len(), "logistic labels"));
    }
    if !(options.c > 0.0) {
        return Err(Error::InvalidParameter(format!(
            "Regularization C must be positive, got {}",
            options.c
        )));
    }
    if x.iter().any(|v| !v.is_finite()) {
        return Err(Error::non_finite("logistic features"));
    }

    let xb = with_bias(x);
    let y = DVector::from_iterator(
        labels.len(),
        labels.iter().map(|l| match l {
            LungCapClass::High => 1.0,
            LungCapClass::Low => -1.0,
        }),
    );
    let objective = Objective {
        x: &xb,
        y: &y,
        c: options.c,
    };

    let mut w = DVector::<f64>::zeros(xb.ncols());
    let mut value = objective.value(&w);
    let (g0, _) = objective.gradient_and_hessian(&w);
    let threshold = options.tol * g0.norm().max(1.0);

    for iteration in 1..=options.max_iter {
        let (gradient, hessian) = objective.gradient_and_hessian(&w);
        if gradient.norm() <= threshold {
            return Ok(finish(w, iteration - 1));
        }
        let step = hessian
            .cholesky()
            .ok_or_else(|| Error::Computation("Logistic Hessian is not positive definite".into()))?
            .solve(&(-&gradient));

        // Armijo backtracking
        let slope = gradient.dot(&step);
        let mut t = 1.0;
        loop {
            let candidate = &w + &step * t;
            let candidate_value = objective.value(&candidate);
            if candidate_value <= value + 1e-4 * t * slope || t < 1e-10 {
                w = candidate;
                value = candidate_value;
                break;
            }
            t *= 0.5;
        }
        debug!(iteration, value, "Newton step");
    }

    let (gradient, _) = objective.gradient_and_hessian(&w);
    if gradient.norm() <= threshold {
        return Ok(finish(w, options.max_iter));
    }
    Err(Error::NotConverged {
        iterations: options.max_iter,
    })
}

fn finish(w: DVector<f64>, iterations: usize) -> LogisticModel {
    let k = w.len() - 1;
    LogisticModel {
        intercept: w[k],
        coefficients: w.rows(0, k).into_owned(),
        iterations,
    }
}

impl LogisticModel {
    /// Weights in feature order
    pub fn coefficients(&self) -> &DVector<f64> {
        &self.coefficients
    }

    pub fn intercept(&self) -> f64 {
        self.intercept
    }

    pub fn iterations(&self) -> usize {
        self.iterations
    }

    /// Linear score per row; positive means `High`
    pub fn decision_function(&self, x: &DMatrix<f64>) -> Vec<f64> {
        (x * &self.coefficients)
            .iter()
            .map(|s| s + self.intercept)
            .collect()
    }

    /// Probability of `High` per row
    pub fn predict_proba(&self, x: &DMatrix<f64>) -> Vec<f64> {
        self.decision_function(x).into_iter().map(sigmoid).collect()
    }

    pub fn predict(&self, x: &DMatrix<f64>) -> Vec<LungCapClass> {
        self.decision_function(x)
            .into_iter()
            .map(|s| {
                if s > 0.0 {
                    LungCapClass::High
                } else {
                    LungCapClass::Low
                }
            })
            .collect()
    }
}
