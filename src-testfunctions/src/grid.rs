//! Objective values on regular grids over the search bounds
//!
//! A [`Curve`] covers 1D objectives and a [`Surface`] covers 2D ones; both can
//! be written as CSV for plotting elsewhere.

use crate::objective::Objective;
use crate::{BenchError, Result};
use ndarray::{Array1, Array2};
use std::path::Path;

/// `num` evenly spaced points from `start` to `stop`, both included
///
/// `num == 1` gives `[start]` and `num == 0` an empty array.
pub fn linspace(start: f64, stop: f64, num: usize) -> Array1<f64> {
    match num {
        0 => Array1::zeros(0),
        1 => Array1::from(vec![start]),
        _ => {
            let step = (stop - start) / (num - 1) as f64;
            Array1::from_shape_fn(num, |i| if i == num - 1 { stop } else { start + step * i as f64 })
        }
    }
}

fn check_grid<O: Objective + ?Sized>(objective: &O, dim: usize, sizes: &[usize]) -> Result<()> {
    if objective.dim() != dim {
        return Err(BenchError::DimensionMismatch {
            name: objective.name().to_string(),
            expected: dim,
            got: objective.dim(),
        });
    }
    if sizes.iter().any(|&n| n == 0) {
        return Err(BenchError::InvalidGrid(format!(
            "{}: grid sizes must be positive, got {:?}",
            objective.name(),
            sizes
        )));
    }
    Ok(())
}

/// Values of a 1D objective along its bounds
#[derive(Debug, Clone)]
pub struct Curve {
    pub name: String,
    pub xs: Array1<f64>,
    pub values: Array1<f64>,
}

/// Values of a 2D objective over its bounds; `values[[j, i]] = f(xs[i], ys[j])`
#[derive(Debug, Clone)]
pub struct Surface {
    pub name: String,
    pub xs: Array1<f64>,
    pub ys: Array1<f64>,
    pub values: Array2<f64>,
}

/// Sample a 1D objective at `n` points spanning its bounds
pub fn sample_curve<O: Objective + ?Sized>(objective: &O, n: usize) -> Result<Curve> {
    check_grid(objective, 1, &[n])?;
    let (lo, hi) = objective.bounds()[0];
    let xs = linspace(lo, hi, n);
    let values = xs
        .iter()
        .map(|&x| objective.evaluate(&Array1::from(vec![x])))
        .collect::<Result<Vec<f64>>>()?;
    Ok(Curve { name: objective.name().to_string(), xs, values: Array1::from(values) })
}

/// Sample a 2D objective on an `nx` by `ny` grid spanning its bounds
pub fn sample_surface<O: Objective + ?Sized>(objective: &O, nx: usize, ny: usize) -> Result<Surface> {
    check_grid(objective, 2, &[nx, ny])?;
    let bounds = objective.bounds();
    let xs = linspace(bounds[0].0, bounds[0].1, nx);
    let ys = linspace(bounds[1].0, bounds[1].1, ny);

    let mut values = Array2::zeros((ny, nx));
    for (j, &y) in ys.iter().enumerate() {
        for (i, &x) in xs.iter().enumerate() {
            values[[j, i]] = objective.evaluate(&Array1::from(vec![x, y]))?;
        }
    }
    log::debug!("sampled {} on a {}x{} grid", objective.name(), nx, ny);
    Ok(Surface { name: objective.name().to_string(), xs, ys, values })
}

impl Curve {
    /// Write `x,value` rows to `path`
    pub fn save_to_csv(&self, path: &Path) -> Result<()> {
        let mut wtr = csv::Writer::from_path(path)?;
        wtr.write_record(["x", "value"])?;
        for (x, v) in self.xs.iter().zip(self.values.iter()) {
            wtr.write_record([x.to_string(), v.to_string()])?;
        }
        wtr.flush()?;
        Ok(())
    }
}

impl Surface {
    /// Write `x,y,value` rows to `path`, x varying fastest
    pub fn save_to_csv(&self, path: &Path) -> Result<()> {
        let mut wtr = csv::Writer::from_path(path)?;
        wtr.write_record(["x", "y", "value"])?;
        for (j, y) in self.ys.iter().enumerate() {
            for (i, x) in self.xs.iter().enumerate() {
                wtr.write_record([x.to_string(), y.to_string(), self.values[[j, i]].to_string()])?;
            }
        }
        wtr.flush()?;
        Ok(())
    }

    /// Smallest finite value on the grid and where it is
    pub fn min(&self) -> Option<(f64, f64, f64)> {
        let mut best: Option<(f64, f64, f64)> = None;
        for ((j, i), &v) in self.values.indexed_iter() {
            if v.is_finite() && best.is_none_or(|(_, _, b)| v < b) {
                best = Some((self.xs[i], self.ys[j], v));
            }
        }
        best
    }
}
