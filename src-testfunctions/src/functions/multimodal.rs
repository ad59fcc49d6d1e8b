//! Multimodal test functions
//!
//! These 2D functions have multiple local minima and are used to check how an
//! optimizer explores before it settles.

use ndarray::Array1;
use std::f64::consts::PI;

/// Bohachevsky function (first variant) - 2D, bowl-shaped with ripples
/// Global minimum: f(x) = 0 at x = (0, 0)
/// Bounds: x_i in [-100, 100]
pub fn bohachevsky(x: &Array1<f64>) -> f64 {
    let x1 = x[0];
    let x2 = x[1];
    let term1 = x1.powi(2);
    let term2 = 2.0 * x2.powi(2);
    let term3 = -0.3 * (3.0 * PI * x1).cos();
    let term4 = -0.4 * (4.0 * PI * x2).cos();
    term1 + term2 + term3 + term4 + 0.7
}

/// Parameters of the Branin-Hoo function
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BraninParams {
    pub a: f64,
    pub b: f64,
    pub c: f64,
    pub r: f64,
    pub s: f64,
    pub t: f64,
}

impl Default for BraninParams {
    fn default() -> Self {
        Self {
            a: 1.0,
            b: 5.1 / (4.0 * PI.powi(2)),
            c: 5.0 / PI,
            r: 6.0,
            s: 10.0,
            t: 1.0 / (8.0 * PI),
        }
    }
}

/// Branin function with explicit parameters
pub fn branin_with(x: &Array1<f64>, p: BraninParams) -> f64 {
    let x1 = x[0];
    let x2 = x[1];
    let term1 = p.a * (x2 - p.b * x1.powi(2) + p.c * x1 - p.r).powi(2);
    let term2 = p.s * (1.0 - p.t) * x1.cos();
    term1 + term2 + p.s
}

/// Branin function - 2D, three global minima
/// Global minimum: f(x) = 0.397887 at x = (-π, 12.275), (π, 2.275), (9.42478, 2.475)
/// Bounds: x1 in [-5, 10], x2 in [0, 15]
pub fn branin(x: &Array1<f64>) -> f64 {
    branin_with(x, BraninParams::default())
}

/// Six-hump camel function - 2D, six local minima, two of them global
/// Global minimum: f(x) = -1.0316 at x = (0.0898, -0.7126) and (-0.0898, 0.7126)
/// Bounds: x1 in [-3, 3], x2 in [-2, 2]
pub fn camel(x: &Array1<f64>) -> f64 {
    let x1 = x[0];
    let x2 = x[1];
    let term1 = (4.0 - 2.1 * x1.powi(2) + x1.powi(4) / 3.0) * x1.powi(2);
    let term2 = x1 * x2;
    let term3 = (-4.0 + 4.0 * x2.powi(2)) * x2.powi(2);
    term1 + term2 + term3
}

/// Goldstein-Price function - multimodal, 2D only
/// Global minimum: f(x) = 3 at x = (0, -1)
/// Bounds: x_i in [-2, 2]
pub fn goldstein_price(x: &Array1<f64>) -> f64 {
    let x1 = x[0];
    let x2 = x[1];
    let fact1a = (x1 + x2 + 1.0).powi(2);
    let fact1b = 19.0 - 14.0 * x1 + 3.0 * x1.powi(2) - 14.0 * x2 + 6.0 * x1 * x2 + 3.0 * x2.powi(2);
    let fact1 = 1.0 + fact1a * fact1b;

    let fact2a = (2.0 * x1 - 3.0 * x2).powi(2);
    let fact2b =
        18.0 - 32.0 * x1 + 12.0 * x1.powi(2) + 48.0 * x2 - 36.0 * x1 * x2 + 27.0 * x2.powi(2);
    let fact2 = 30.0 + fact2a * fact2b;

    fact1 * fact2
}
