//! The seam between benchmarks and whatever drives them
//!
//! External optimizers, the recorder and the grid sampler all take an
//! [`Objective`], so a raw benchmark and its log-gap transform are
//! interchangeable.

use crate::{BenchmarkSpec, Result};
use ndarray::Array1;

/// A scalar objective over a box-bounded domain
pub trait Objective {
    /// Name used for logs and output files
    fn name(&self) -> &str;

    /// Search bounds for each dimension (min, max)
    fn bounds(&self) -> &[(f64, f64)];

    /// Number of coordinates expected by [`Objective::evaluate`]
    fn dim(&self) -> usize {
        self.bounds().len()
    }

    /// Evaluate at `x`; fails with `DimensionMismatch` on a wrong length
    fn evaluate(&self, x: &Array1<f64>) -> Result<f64>;
}

impl Objective for BenchmarkSpec {
    fn name(&self) -> &str {
        self.name
    }

    fn bounds(&self) -> &[(f64, f64)] {
        &self.bounds
    }

    fn evaluate(&self, x: &Array1<f64>) -> Result<f64> {
        BenchmarkSpec::evaluate(self, x)
    }
}

impl<T: Objective + ?Sized> Objective for &T {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn bounds(&self) -> &[(f64, f64)] {
        (**self).bounds()
    }

    fn dim(&self) -> usize {
        (**self).dim()
    }

    fn evaluate(&self, x: &Array1<f64>) -> Result<f64> {
        (**self).evaluate(x)
    }
}
