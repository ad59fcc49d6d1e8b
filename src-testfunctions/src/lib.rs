//! Benchmark functions and log-gap transforms for black-box optimization
//!
//! Copyright (C) 2025 Pierre Aubert pierre(at)spinorama(dot)org
//!
//! This program is free software: you can redistribute it and/or modify
//! it under the terms of the GNU General Public License as published by
//! the Free Software Foundation, either version 3 of the License, or
//! (at your option) any later version.
//!
//! This program is distributed in the hope that it will be useful,
//! but WITHOUT ANY WARRANTY; without even the implied warranty of
//! MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
//! GNU General Public License for more details.
//!
//! You should have received a copy of the GNU General Public License
//! along with this program.  If not, see <https://www.gnu.org/licenses/>.
//!
//! The crate provides five textbook functions (Bohachevsky, Branin, Camel,
//! Forester, Goldstein-Price), a static registry with their bounds, default
//! starting points and known optima, and:
//!
//! - [`log_gap`]: `ln(f(x) - optimum)`, used to watch an external optimizer
//!   converge on a log scale
//! - [`RecordedObjective`]: logs every evaluated point of a run, saved as CSV
//! - [`sample_curve`] / [`sample_surface`]: objective values on a grid over
//!   the bounds
//!
//! # Example
//!
//! ```rust
//! use ndarray::array;
//! use gapbench_testfunctions::*;
//!
//! let gp = get_benchmark("goldstein_price")?;
//! assert_eq!(gp.evaluate(&array![0.0, -1.0])?, 3.0);
//!
//! let gap = log_gap("goldstein_price")?;
//! assert_eq!(gap.call(&[0.0, -1.0])?, f64::NEG_INFINITY);
//! # Ok::<(), gapbench_testfunctions::BenchError>(())
//! ```

use ndarray::Array1;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

pub mod error;
pub mod functions;
pub mod grid;
pub mod log_gap;
pub mod objective;
pub mod recorder;

pub use error::{BenchError, Result};
pub use functions::*;
pub use grid::{linspace, sample_curve, sample_surface, Curve, Surface};
pub use log_gap::{log_gap, probe_all, probe_benchmark, GapArgs, GapProbe, LogGap, ProbeKind};
pub use objective::Objective;
pub use recorder::{read_trace_csv, run_sampling, EvaluationRecord, RecordedObjective, Trace};

/// Static description of one benchmark: function, known optimum, default
/// starting point and per-dimension search bounds
#[derive(Debug, Clone)]
pub struct BenchmarkSpec {
    /// Registry name
    pub name: &'static str,
    /// The objective itself; expects `bounds.len()` coordinates
    pub function: fn(&Array1<f64>) -> f64,
    /// Known global optimum value
    pub optimum: f64,
    /// Default starting point handed to optimizers
    pub default_point: Vec<f64>,
    /// Bounds for each dimension (min, max)
    pub bounds: Vec<(f64, f64)>,
    /// Published global minimum locations
    pub global_minima: Vec<Vec<f64>>,
    /// Description of the function
    pub description: &'static str,
}

impl BenchmarkSpec {
    /// Number of coordinates the function takes
    pub fn dim(&self) -> usize {
        self.bounds.len()
    }

    /// Fails with `DimensionMismatch` unless `got` equals the arity
    pub fn check_dim(&self, got: usize) -> Result<()> {
        if got != self.dim() {
            return Err(BenchError::DimensionMismatch {
                name: self.name.to_string(),
                expected: self.dim(),
                got,
            });
        }
        Ok(())
    }

    /// Evaluate the raw cost at `x` after checking its length
    pub fn evaluate(&self, x: &Array1<f64>) -> Result<f64> {
        self.check_dim(x.len())?;
        Ok((self.function)(x))
    }

    /// Evaluate the raw cost with coordinates given as a slice
    pub fn evaluate_args(&self, args: &[f64]) -> Result<f64> {
        self.check_dim(args.len())?;
        Ok((self.function)(&Array1::from(args.to_vec())))
    }
}

/// The registered benchmarks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Benchmark {
    Bohachevsky,
    Branin,
    Camel,
    Forester,
    GoldsteinPrice,
}

impl Benchmark {
    /// All benchmarks, in registry order
    pub const ALL: [Benchmark; 5] = [
        Benchmark::Bohachevsky,
        Benchmark::Branin,
        Benchmark::Camel,
        Benchmark::Forester,
        Benchmark::GoldsteinPrice,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Benchmark::Bohachevsky => "bohachevsky",
            Benchmark::Branin => "branin",
            Benchmark::Camel => "camel",
            Benchmark::Forester => "forester",
            Benchmark::GoldsteinPrice => "goldstein_price",
        }
    }

    /// Registry entry for this benchmark
    pub fn spec(self) -> &'static BenchmarkSpec {
        &BENCHMARKS[self as usize]
    }
}

impl fmt::Display for Benchmark {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Benchmark {
    type Err = BenchError;
    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "bohachevsky" => Ok(Benchmark::Bohachevsky),
            "branin" => Ok(Benchmark::Branin),
            "camel" => Ok(Benchmark::Camel),
            "forester" => Ok(Benchmark::Forester),
            "goldstein_price" => Ok(Benchmark::GoldsteinPrice),
            _ => Err(BenchError::UnknownBenchmark { name: s.to_string() }),
        }
    }
}

// Indexed by `Benchmark as usize`
static BENCHMARKS: LazyLock<[BenchmarkSpec; 5]> = LazyLock::new(|| {
    [
        BenchmarkSpec {
            name: "bohachevsky",
            function: bohachevsky,
            optimum: 0.0,
            default_point: vec![100.0, 100.0],
            bounds: vec![(-100.0, 100.0); 2],
            global_minima: vec![vec![0.0, 0.0]],
            description: "2D bowl with cosine ripples",
        },
        BenchmarkSpec {
            name: "branin",
            function: branin,
            optimum: 0.397887,
            default_point: vec![-5.0, 0.0],
            bounds: vec![(-5.0, 10.0), (0.0, 15.0)],
            global_minima: vec![
                vec![-std::f64::consts::PI, 12.275],
                vec![std::f64::consts::PI, 2.275],
                vec![9.42478, 2.475],
            ],
            description: "2D multimodal function with 3 global minima",
        },
        BenchmarkSpec {
            name: "camel",
            function: camel,
            optimum: -1.0316,
            default_point: vec![-3.0, -2.0],
            bounds: vec![(-3.0, 3.0), (-2.0, 2.0)],
            global_minima: vec![vec![0.0898, -0.7126], vec![-0.0898, 0.7126]],
            description: "2D six-hump camel back with 2 global minima",
        },
        BenchmarkSpec {
            name: "forester",
            function: forester,
            // the optimum is the function value at the stored argmin
            optimum: forester(&Array1::from(vec![FORESTER_ARGMIN])),
            default_point: vec![1.0],
            bounds: vec![(0.0, 1.0)],
            global_minima: vec![vec![FORESTER_ARGMIN]],
            description: "1D function for metamodeling by Forrester et al. (2008)",
        },
        BenchmarkSpec {
            name: "goldstein_price",
            function: goldstein_price,
            optimum: 3.0,
            default_point: vec![-2.0, 2.0],
            bounds: vec![(-2.0, 2.0); 2],
            global_minima: vec![vec![0.0, -1.0]],
            description: "2D multimodal function",
        },
    ]
});

/// Look up a benchmark by name
///
/// # Errors
///
/// `BenchError::UnknownBenchmark` if the name is not registered.
pub fn get_benchmark(name: &str) -> Result<&'static BenchmarkSpec> {
    let spec = name.parse::<Benchmark>()?.spec();
    log::debug!("resolved benchmark '{}' (dim {})", spec.name, spec.dim());
    Ok(spec)
}

/// Names of all registered benchmarks, in registry order
pub fn benchmark_names() -> Vec<&'static str> {
    Benchmark::ALL.iter().map(|b| b.name()).collect()
}

/// All registry entries, in registry order
pub fn all_benchmarks() -> impl Iterator<Item = &'static BenchmarkSpec> {
    Benchmark::ALL.into_iter().map(Benchmark::spec)
}

/// Known optimum value per benchmark name
pub fn optimal_values() -> HashMap<&'static str, f64> {
    all_benchmarks().map(|s| (s.name, s.optimum)).collect()
}

/// Default starting point per benchmark name
pub fn default_values() -> HashMap<&'static str, Vec<f64>> {
    all_benchmarks().map(|s| (s.name, s.default_point.clone())).collect()
}

/// Search bounds per benchmark name
pub fn bounds_values() -> HashMap<&'static str, Vec<(f64, f64)>> {
    all_benchmarks().map(|s| (s.name, s.bounds.clone())).collect()
}

/// Serializable view of a registry entry, used for listings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BenchmarkSummary {
    pub name: String,
    pub dim: usize,
    pub optimum: f64,
    pub default_point: Vec<f64>,
    pub bounds: Vec<(f64, f64)>,
    pub global_minima: Vec<Vec<f64>>,
    pub description: String,
}

impl From<&BenchmarkSpec> for BenchmarkSummary {
    fn from(spec: &BenchmarkSpec) -> Self {
        Self {
            name: spec.name.to_string(),
            dim: spec.dim(),
            optimum: spec.optimum,
            default_point: spec.default_point.clone(),
            bounds: spec.bounds.clone(),
            global_minima: spec.global_minima.clone(),
            description: spec.description.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;
    use std::collections::HashSet;

    #[test]
    fn test_registry_order_matches_enum() {
        for (i, b) in Benchmark::ALL.iter().enumerate() {
            assert_eq!(*b as usize, i);
            assert_eq!(b.spec().name, b.name());
        }
    }

    #[test]
    fn test_lookup_by_name() {
        for name in benchmark_names() {
            let spec = get_benchmark(name).unwrap();
            assert_eq!(spec.name, name);
        }
    }

    #[test]
    fn test_lookup_is_exact() {
        for name in [" BRANIN ", "Goldstein-Price", "CAMEL", "branin ", "goldstein-price"] {
            assert!(
                matches!(get_benchmark(name), Err(BenchError::UnknownBenchmark { name: ref n }) if n == name),
                "'{}' should not resolve",
                name
            );
            assert!(matches!(log_gap(name), Err(BenchError::UnknownBenchmark { .. })));
        }
    }

    #[test]
    fn test_unknown_name() {
        let err = get_benchmark("rosenbrock").unwrap_err();
        assert!(matches!(err, BenchError::UnknownBenchmark { ref name } if name == "rosenbrock"));
        assert!(err.to_string().contains("rosenbrock"));
        // names are never evaluated as code
        assert!(get_benchmark("branin(0, 0)").is_err());
    }

    #[test]
    fn test_tables_are_consistent() {
        let optima: HashSet<_> = optimal_values().into_keys().collect();
        let defaults = default_values();
        let bounds = bounds_values();
        assert_eq!(optima, defaults.keys().copied().collect::<HashSet<_>>());
        assert_eq!(optima, bounds.keys().copied().collect::<HashSet<_>>());

        for spec in all_benchmarks() {
            assert_eq!(spec.bounds.len(), spec.default_point.len(), "{}", spec.name);
            for (lower, upper) in &spec.bounds {
                assert!(lower < upper, "{} has invalid bounds", spec.name);
            }
            for (x, (lower, upper)) in spec.default_point.iter().zip(&spec.bounds) {
                assert!(lower <= x && x <= upper, "{} default outside bounds", spec.name);
            }
            for minimum in &spec.global_minima {
                assert_eq!(minimum.len(), spec.dim(), "{}", spec.name);
            }
        }
    }

    #[test]
    fn test_evaluate_checks_dimension() {
        let branin = get_benchmark("branin").unwrap();
        let err = branin.evaluate(&array![1.0]).unwrap_err();
        assert!(matches!(
            err,
            BenchError::DimensionMismatch { expected: 2, got: 1, .. }
        ));
        assert!(branin.evaluate_args(&[1.0, 2.0, 3.0]).is_err());
        assert_eq!(
            branin.evaluate_args(&[1.0, 2.0]).unwrap(),
            branin.evaluate(&array![1.0, 2.0]).unwrap()
        );
    }

    #[test]
    fn test_minima_close_to_optimum() {
        for spec in all_benchmarks() {
            for minimum in &spec.global_minima {
                let value = spec.evaluate_args(minimum).unwrap();
                let tolerance = 1e-3 * spec.optimum.abs().max(1.0);
                assert!(
                    (value - spec.optimum).abs() <= tolerance,
                    "{} at {:?}: expected {}, got {}",
                    spec.name,
                    minimum,
                    spec.optimum,
                    value
                );
            }
        }
    }

    #[test]
    fn test_summary_serializes() {
        let summary = BenchmarkSummary::from(Benchmark::Forester.spec());
        let json = serde_json::to_string(&summary).unwrap();
        assert!(json.contains("\"name\":\"forester\""));
        assert!(json.contains("\"dim\":1"));
    }
}
