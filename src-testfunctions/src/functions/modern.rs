//! One-dimensional test functions used for metamodeling

use ndarray::Array1;

/// Location of the global minimum of [`forester`] in [0, 1]
pub const FORESTER_ARGMIN: f64 = 0.757248757841856;

/// Forrester et al. (2008) function - 1D, multimodal
/// f(x) = (6x - 2)^2 * sin(12x - 4)
/// Global minimum: f(x) = -6.02074 at x = 0.757249
/// Bounds: x in [0, 1]
pub fn forester(x: &Array1<f64>) -> f64 {
    let x = x[0];
    let fact1 = (6.0 * x - 2.0).powi(2);
    let fact2 = (12.0 * x - 4.0).sin();
    fact1 * fact2
}
