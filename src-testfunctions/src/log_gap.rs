//! Logarithmic gap between a benchmark and its known optimum
//!
//! `g(x) = ln(f(x) - optimum)`. Plotting `g` against the evaluation count
//! shows how fast an optimizer closes in on the true optimum.
//!
//! A zero gap gives `-inf` and a negative gap (rounding at the optimum)
//! gives `NaN`; both are returned as values, not errors.

use crate::objective::Objective;
use crate::{get_benchmark, BenchmarkSpec, Result};
use ndarray::{Array1, ArrayView1};

/// The two accepted call shapes
///
/// A single ndarray vector is the vector form; coordinates given as a slice
/// are positional. Both unpack to the same coordinates.
#[derive(Debug, Clone, Copy)]
pub enum GapArgs<'a> {
    Vector(ArrayView1<'a, f64>),
    Positional(&'a [f64]),
}

impl GapArgs<'_> {
    pub fn len(&self) -> usize {
        match self {
            GapArgs::Vector(v) => v.len(),
            GapArgs::Positional(args) => args.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Unpack into an owned coordinate vector
    pub fn coordinates(&self) -> Array1<f64> {
        match self {
            GapArgs::Vector(v) => v.to_owned(),
            GapArgs::Positional(args) => Array1::from(args.to_vec()),
        }
    }
}

impl<'a> From<&'a Array1<f64>> for GapArgs<'a> {
    fn from(x: &'a Array1<f64>) -> Self {
        GapArgs::Vector(x.view())
    }
}

impl<'a> From<ArrayView1<'a, f64>> for GapArgs<'a> {
    fn from(x: ArrayView1<'a, f64>) -> Self {
        GapArgs::Vector(x)
    }
}

impl<'a> From<&'a [f64]> for GapArgs<'a> {
    fn from(args: &'a [f64]) -> Self {
        GapArgs::Positional(args)
    }
}

impl<'a, const N: usize> From<&'a [f64; N]> for GapArgs<'a> {
    fn from(args: &'a [f64; N]) -> Self {
        GapArgs::Positional(args)
    }
}

impl<'a> From<&'a Vec<f64>> for GapArgs<'a> {
    fn from(args: &'a Vec<f64>) -> Self {
        GapArgs::Positional(args)
    }
}

/// A benchmark wrapped so that it returns `ln(f(x) - optimum)`
#[derive(Debug, Clone)]
pub struct LogGap {
    name: String,
    spec: &'static BenchmarkSpec,
}

/// Build the log-gap transform of a registered benchmark
///
/// # Errors
///
/// `BenchError::UnknownBenchmark` if the name is not registered.
pub fn log_gap(function_name: &str) -> Result<LogGap> {
    let spec = get_benchmark(function_name)?;
    Ok(LogGap::new(spec))
}

impl LogGap {
    pub fn new(spec: &'static BenchmarkSpec) -> Self {
        Self { name: format!("{}_gap", spec.name), spec }
    }

    /// The wrapped benchmark
    pub fn spec(&self) -> &'static BenchmarkSpec {
        self.spec
    }

    pub fn optimum(&self) -> f64 {
        self.spec.optimum
    }

    /// Gap of an already computed cost
    pub fn gap_of(&self, cost: f64) -> f64 {
        (cost - self.spec.optimum).ln()
    }

    /// Evaluate the log gap with either call shape
    ///
    /// ```rust
    /// use ndarray::array;
    /// use gapbench_testfunctions::log_gap;
    ///
    /// let gap = log_gap("branin")?;
    /// let x = array![1.0, 2.0];
    /// assert_eq!(gap.call(&x)?, gap.call(&[1.0, 2.0])?);
    /// # Ok::<(), gapbench_testfunctions::BenchError>(())
    /// ```
    pub fn call<'a>(&self, args: impl Into<GapArgs<'a>>) -> Result<f64> {
        let args = args.into();
        self.spec.check_dim(args.len())?;
        let cost = (self.spec.function)(&args.coordinates());
        Ok(self.gap_of(cost))
    }
}

impl Objective for LogGap {
    fn name(&self) -> &str {
        &self.name
    }

    fn bounds(&self) -> &[(f64, f64)] {
        &self.spec.bounds
    }

    fn evaluate(&self, x: &Array1<f64>) -> Result<f64> {
        self.call(x)
    }
}

/// Where a probed point comes from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProbeKind {
    Default,
    Minimum,
}

/// Log gap at one probed point
#[derive(Debug, Clone, PartialEq)]
pub struct GapProbe {
    pub kind: ProbeKind,
    pub x: Vec<f64>,
    pub value: f64,
}

/// Log gaps of one benchmark at its default point and at each known minimum
pub fn probe_benchmark(spec: &'static BenchmarkSpec) -> Result<Vec<GapProbe>> {
    let gap = LogGap::new(spec);
    let mut probes = vec![GapProbe {
        kind: ProbeKind::Default,
        x: spec.default_point.clone(),
        value: gap.call(&spec.default_point)?,
    }];
    for minimum in &spec.global_minima {
        probes.push(GapProbe { kind: ProbeKind::Minimum, x: minimum.clone(), value: gap.call(minimum)? });
    }
    Ok(probes)
}

/// Probe every benchmark in `specs`
///
/// A benchmark that fails is logged and left out; the others are still probed.
pub fn probe_all(
    specs: impl IntoIterator<Item = &'static BenchmarkSpec>,
) -> Vec<(&'static BenchmarkSpec, Vec<GapProbe>)> {
    let mut results = Vec::new();
    for spec in specs {
        match probe_benchmark(spec) {
            Ok(probes) => results.push((spec, probes)),
            Err(e) => log::warn!("probe of {} failed: {}", spec.name, e),
        }
    }
    results
}
