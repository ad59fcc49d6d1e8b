//! Recording of every evaluation made by an external driver
//!
//! [`RecordedObjective`] wraps any [`Objective`]; each successful call is
//! appended to the trace with its cost, the best cost seen so far and whether
//! it improved on it. Traces are written to and read back from CSV with the
//! header `eval_id,x0,..,x{n-1},f_value,best_so_far,is_improvement`.

use crate::objective::Objective;
use crate::{BenchError, Result};
use ndarray::Array1;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::fs::create_dir_all;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard, PoisonError};

/// A single recorded evaluation
#[derive(Debug, Clone, PartialEq)]
pub struct EvaluationRecord {
    /// Call order, starting at 0
    pub eval_id: usize,
    /// Evaluated point
    pub x: Vec<f64>,
    /// Objective value at `x`
    pub f_value: f64,
    /// Best objective value up to and including this call
    ///
    /// Stays `NaN` until the first non-`NaN` value when the trace starts with `NaN`.
    pub best_so_far: f64,
    /// Whether this call improved the best known value
    pub is_improvement: bool,
}

#[derive(Debug, Default)]
struct RecorderState {
    records: Vec<EvaluationRecord>,
    best: Option<f64>,
}

/// Wraps an objective and records every evaluation
#[derive(Debug)]
pub struct RecordedObjective<O> {
    inner: O,
    state: Mutex<RecorderState>,
}

impl<O: Objective> RecordedObjective<O> {
    pub fn new(inner: O) -> Self {
        Self { inner, state: Mutex::new(RecorderState::default()) }
    }

    /// The wrapped objective
    pub fn inner(&self) -> &O {
        &self.inner
    }

    pub fn into_inner(self) -> O {
        self.inner
    }

    fn state(&self) -> MutexGuard<'_, RecorderState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Get a copy of all recorded evaluations
    pub fn records(&self) -> Vec<EvaluationRecord> {
        self.state().records.clone()
    }

    pub fn len(&self) -> usize {
        self.state().records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Best point and value recorded so far
    pub fn best(&self) -> Option<(Vec<f64>, f64)> {
        self.state()
            .records
            .iter()
            .rev()
            .find(|r| r.is_improvement)
            .map(|r| (r.x.clone(), r.f_value))
    }

    /// Forget all recorded evaluations
    pub fn clear(&self) {
        let mut state = self.state();
        state.records.clear();
        state.best = None;
    }

    fn record(&self, x: &Array1<f64>, f_value: f64) {
        let mut state = self.state();
        // NaN never improves; -inf does
        let is_improvement = match state.best {
            Some(best) => f_value < best,
            None => !f_value.is_nan(),
        };
        if is_improvement {
            state.best = Some(f_value);
        }
        let eval_id = state.records.len();
        let best_so_far = state.best.unwrap_or(f_value);
        log::debug!(
            "{} eval {}: f={:.6e} best={:.6e}{}",
            self.inner.name(),
            eval_id,
            f_value,
            best_so_far,
            if is_improvement { " *" } else { "" }
        );
        state.records.push(EvaluationRecord {
            eval_id,
            x: x.to_vec(),
            f_value,
            best_so_far,
            is_improvement,
        });
    }

    /// Save all recorded evaluations to `<output_dir>/<name>.csv`
    ///
    /// The directory is created if needed. The header is written even when
    /// nothing was recorded.
    pub fn save_to_csv(&self, output_dir: &Path) -> Result<PathBuf> {
        create_dir_all(output_dir)?;
        let filename = output_dir.join(format!("{}.csv", self.inner.name()));

        let mut wtr = csv::Writer::from_path(&filename)?;
        let mut header = vec!["eval_id".to_string()];
        header.extend((0..self.inner.dim()).map(|i| format!("x{}", i)));
        header.extend(["f_value", "best_so_far", "is_improvement"].map(String::from));
        wtr.write_record(&header)?;

        for record in self.state().records.iter() {
            let mut row = vec![record.eval_id.to_string()];
            row.extend(record.x.iter().map(|xi| xi.to_string()));
            row.push(record.f_value.to_string());
            row.push(record.best_so_far.to_string());
            row.push(record.is_improvement.to_string());
            wtr.write_record(&row)?;
        }
        wtr.flush()?;

        log::info!("saved {} evaluations to {}", self.len(), filename.display());
        Ok(filename)
    }
}

impl<O: Objective> Objective for RecordedObjective<O> {
    fn name(&self) -> &str {
        self.inner.name()
    }

    fn bounds(&self) -> &[(f64, f64)] {
        self.inner.bounds()
    }

    fn dim(&self) -> usize {
        self.inner.dim()
    }

    fn evaluate(&self, x: &Array1<f64>) -> Result<f64> {
        match self.inner.evaluate(x) {
            Ok(f_value) => {
                self.record(x, f_value);
                Ok(f_value)
            }
            Err(e) => {
                log::warn!("{}: evaluation rejected: {}", self.inner.name(), e);
                Err(e)
            }
        }
    }
}

/// Evaluate `default_point`, then `samples` points drawn uniformly inside the
/// bounds, all through `recorded`
///
/// The same `seed` always draws the same points.
pub fn run_sampling<O: Objective>(
    recorded: &RecordedObjective<O>,
    default_point: &[f64],
    samples: usize,
    seed: u64,
) -> Result<()> {
    let mut rng = StdRng::seed_from_u64(seed);
    recorded.evaluate(&Array1::from(default_point.to_vec()))?;
    for _ in 0..samples {
        let x = Array1::from_iter(recorded.bounds().iter().map(|&(lo, hi)| rng.random_range(lo..=hi)));
        recorded.evaluate(&x)?;
    }
    log::debug!("sampled {} points of {} with seed {}", samples + 1, recorded.name(), seed);
    Ok(())
}

/// An evaluation trace read back from CSV
#[derive(Debug, Clone)]
pub struct Trace {
    /// Objective name, taken from the file stem
    pub function_name: String,
    pub records: Vec<EvaluationRecord>,
}

/// Read a trace written by [`RecordedObjective::save_to_csv`]
pub fn read_trace_csv(path: &Path) -> Result<Trace> {
    let invalid = |line: usize, reason: String| BenchError::InvalidTrace {
        path: path.to_path_buf(),
        line,
        reason,
    };

    let mut rdr = csv::Reader::from_path(path)?;
    let header: Vec<String> = rdr.headers()?.iter().map(str::to_string).collect();
    let n = header.len();
    if n < 4
        || header[0] != "eval_id"
        || header[n - 3..] != ["f_value", "best_so_far", "is_improvement"]
    {
        return Err(invalid(1, format!("unexpected header: {}", header.join(","))));
    }
    let dim = n - 4;

    let function_name = path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("unknown")
        .to_string();

    let mut records = Vec::new();
    for (idx, row) in rdr.records().enumerate() {
        let line = idx + 2;
        let row = row?;
        let field = |i: usize, what: &str| -> Result<f64> {
            row[i]
                .parse::<f64>()
                .map_err(|_| invalid(line, format!("invalid {}: '{}'", what, &row[i])))
        };

        let eval_id = row[0]
            .parse::<usize>()
            .map_err(|_| invalid(line, format!("invalid eval_id: '{}'", &row[0])))?;
        let x = (1..=dim)
            .map(|i| field(i, "coordinate"))
            .collect::<Result<Vec<f64>>>()?;
        let f_value = field(dim + 1, "f_value")?;
        let best_so_far = field(dim + 2, "best_so_far")?;
        let is_improvement = row[dim + 3]
            .parse::<bool>()
            .map_err(|_| invalid(line, format!("invalid is_improvement: '{}'", &row[dim + 3])))?;

        records.push(EvaluationRecord { eval_id, x, f_value, best_so_far, is_improvement });
    }

    Ok(Trace { function_name, records })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{get_benchmark, log_gap, LogGap};
    use ndarray::array;

    #[test]
    fn test_records_in_call_order() {
        let recorded = RecordedObjective::new(get_benchmark("goldstein_price").unwrap());

        let values: Vec<f64> = [array![-2.0, 2.0], array![1.0, 1.0], array![0.0, -1.0], array![2.0, 2.0]]
            .iter()
            .map(|x| recorded.evaluate(x).unwrap())
            .collect();

        let records = recorded.records();
        assert_eq!(records.len(), 4);
        for (i, record) in records.iter().enumerate() {
            assert_eq!(record.eval_id, i);
            assert_eq!(record.f_value, values[i]);
        }
        assert!(records[0].is_improvement);
        assert!(records[2].is_improvement);
        assert!(!records[3].is_improvement);
        assert_eq!(records[3].best_so_far, 3.0);
        assert_eq!(recorded.best(), Some((vec![0.0, -1.0], 3.0)));
    }

    #[test]
    fn test_best_so_far_non_increasing() {
        let recorded = RecordedObjective::new(get_benchmark("branin").unwrap());
        for i in 0..20 {
            let t = i as f64 / 19.0;
            recorded.evaluate(&array![-5.0 + 15.0 * t, 15.0 * (1.0 - t)]).unwrap();
        }
        let records = recorded.records();
        for pair in records.windows(2) {
            assert!(pair[1].best_so_far <= pair[0].best_so_far);
        }
    }

    #[test]
    fn test_rejected_evaluations_are_not_recorded() {
        let recorded = RecordedObjective::new(get_benchmark("camel").unwrap());
        assert!(recorded.evaluate(&array![1.0, 2.0, 3.0]).is_err());
        assert!(recorded.is_empty());
    }

    #[test]
    fn test_nan_and_neg_infinity() {
        let recorded = RecordedObjective::new(log_gap("camel").unwrap());
        // below the rounded optimum: NaN, never an improvement
        let nan = recorded.evaluate(&array![0.0898, -0.7126]).unwrap();
        assert!(nan.is_nan());
        recorded.evaluate(&array![-3.0, -2.0]).unwrap();

        let records = recorded.records();
        assert!(!records[0].is_improvement);
        assert!(records[1].is_improvement);

        let recorded = RecordedObjective::new(log_gap("goldstein_price").unwrap());
        recorded.evaluate(&array![-2.0, 2.0]).unwrap();
        recorded.evaluate(&array![0.0, -1.0]).unwrap();
        let last = recorded.records().pop().unwrap();
        assert!(last.is_improvement);
        assert_eq!(last.best_so_far, f64::NEG_INFINITY);
    }

    #[test]
    fn test_nan_first_keeps_nan_best() {
        let recorded = RecordedObjective::new(log_gap("camel").unwrap());
        recorded.evaluate(&array![0.0898, -0.7126]).unwrap();
        let first = &recorded.records()[0];
        assert!(first.best_so_far.is_nan());
        assert_eq!(recorded.best(), None);
    }

    #[test]
    fn test_sampling_starts_at_default_point() {
        let spec = get_benchmark("branin").unwrap();
        let recorded = RecordedObjective::new(spec);
        run_sampling(&recorded, &spec.default_point, 30, 1234).unwrap();

        let records = recorded.records();
        assert_eq!(records.len(), 31);
        assert_eq!(records[0].x, spec.default_point);
        for record in &records {
            for (x, (lo, hi)) in record.x.iter().zip(&spec.bounds) {
                assert!(lo <= x && x <= hi, "{:?} outside bounds", record.x);
            }
        }
    }

    #[test]
    fn test_sampling_is_seeded() {
        let spec = get_benchmark("goldstein_price").unwrap();
        let run = |seed: u64| {
            let recorded = RecordedObjective::new(LogGap::new(spec));
            run_sampling(&recorded, &spec.default_point, 10, seed).unwrap();
            recorded.records()
        };
        assert_eq!(run(7), run(7));
        assert_ne!(run(7), run(8));
    }

    #[test]
    fn test_sampling_rejects_wrong_default_arity() {
        let recorded = RecordedObjective::new(get_benchmark("forester").unwrap());
        assert!(matches!(
            run_sampling(&recorded, &[0.5, 0.5], 5, 1),
            Err(BenchError::DimensionMismatch { expected: 1, got: 2, .. })
        ));
        assert!(recorded.is_empty());
    }

    #[test]
    fn test_clear() {
        let recorded = RecordedObjective::new(get_benchmark("forester").unwrap());
        recorded.evaluate(&array![0.5]).unwrap();
        recorded.clear();
        assert!(recorded.is_empty());
        assert_eq!(recorded.best(), None);
        recorded.evaluate(&array![0.9]).unwrap();
        assert_eq!(recorded.records()[0].eval_id, 0);
        assert!(recorded.records()[0].is_improvement);
    }

    #[test]
    fn test_csv_round_trip() {
        let tmp = tempfile::tempdir().unwrap();
        let recorded = RecordedObjective::new(log_gap("goldstein_price").unwrap());
        recorded.evaluate(&array![-2.0, 2.0]).unwrap();
        recorded.evaluate(&array![0.25, -0.75]).unwrap();
        recorded.evaluate(&array![0.0, -1.0]).unwrap();

        let path = recorded.save_to_csv(tmp.path()).unwrap();
        assert_eq!(path, tmp.path().join("goldstein_price_gap.csv"));

        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.starts_with("eval_id,x0,x1,f_value,best_so_far,is_improvement\n"));

        let trace = read_trace_csv(&path).unwrap();
        assert_eq!(trace.function_name, "goldstein_price_gap");
        assert_eq!(trace.records, recorded.records());
    }

    #[test]
    fn test_empty_trace_has_header() {
        let tmp = tempfile::tempdir().unwrap();
        let recorded = RecordedObjective::new(get_benchmark("forester").unwrap());
        let path = recorded.save_to_csv(&tmp.path().join("nested")).unwrap();
        let trace = read_trace_csv(&path).unwrap();
        assert!(trace.records.is_empty());
    }

    #[test]
    fn test_invalid_trace() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("bad.csv");
        std::fs::write(&path, "iteration,x0,best_result\n0,1.0,2.0\n").unwrap();
        assert!(matches!(read_trace_csv(&path), Err(BenchError::InvalidTrace { line: 1, .. })));

        std::fs::write(&path, "eval_id,x0,f_value,best_so_far,is_improvement\n0,abc,1,1,true\n")
            .unwrap();
        assert!(matches!(read_trace_csv(&path), Err(BenchError::InvalidTrace { line: 2, .. })));
    }
}
