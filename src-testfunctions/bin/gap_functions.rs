//! gap_functions - inspect, evaluate, sample and grid the gapbench benchmarks
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

use clap::{Parser, Subcommand};
use gapbench_env::{get_grids_dir, get_records_dir};
use gapbench_testfunctions::{
    all_benchmarks, get_benchmark, log_gap, probe_all, run_sampling, sample_curve,
    sample_surface, BenchmarkSummary, LogGap, Objective, ProbeKind, RecordedObjective,
};
use std::error::Error;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "gap_functions")]
#[command(about = "Benchmark functions and log-gap transforms for optimizer experiments", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List registered benchmarks with optimum, default point and bounds
    List {
        /// Print JSON instead of a table
        #[arg(long, default_value_t = false)]
        json: bool,
    },

    /// Evaluate a benchmark (or its log gap) at one point
    Eval {
        /// Benchmark name (e.g. branin, goldstein_price)
        name: String,

        /// Coordinates, one per dimension
        #[arg(value_name = "X", allow_negative_numbers = true, required = true)]
        coords: Vec<f64>,

        /// Return ln(f(x) - optimum) instead of f(x)
        #[arg(long, default_value_t = false)]
        gap: bool,
    },

    /// Evaluate every log gap at its default point and known minima
    Probe,

    /// Evaluate random points inside the bounds and save the trace as CSV
    ///
    /// The default point is always evaluated first.
    Sample {
        /// Benchmark name
        name: String,

        /// Number of random points after the default point
        #[arg(short = 'n', long, default_value_t = 20)]
        samples: usize,

        /// Random seed
        #[arg(long, default_value_t = 1234)]
        seed: u64,

        /// Record the log gap instead of the raw cost
        #[arg(long, default_value_t = false)]
        gap: bool,

        /// Output directory (default: $GAPBENCH_DIR/data_generated/records)
        #[arg(short, long)]
        output_dir: Option<PathBuf>,
    },

    /// Sample a benchmark on a regular grid over its bounds and save as CSV
    Grid {
        /// Benchmark name
        name: String,

        /// Number of points along x
        #[arg(short = 'x', long, default_value_t = 100)]
        nx: usize,

        /// Number of points along y (2D benchmarks only)
        #[arg(short = 'y', long, default_value_t = 100)]
        ny: usize,

        /// Sample the log gap instead of the raw cost
        #[arg(long, default_value_t = false)]
        gap: bool,

        /// Output directory (default: $GAPBENCH_DIR/data_generated/grids)
        #[arg(short, long)]
        output_dir: Option<PathBuf>,
    },
}

fn format_point(x: &[f64]) -> String {
    let parts: Vec<String> = x.iter().map(|v| format!("{}", v)).collect();
    format!("[{}]", parts.join(", "))
}

fn format_bounds(bounds: &[(f64, f64)]) -> String {
    let parts: Vec<String> = bounds.iter().map(|(lo, hi)| format!("[{}, {}]", lo, hi)).collect();
    format!("[{}]", parts.join(", "))
}

fn describe_gap(value: f64) -> &'static str {
    if value == f64::NEG_INFINITY {
        "at optimum"
    } else if value.is_nan() {
        "at or below numerical optimum"
    } else {
        ""
    }
}

fn list(json: bool) -> Result<(), Box<dyn Error>> {
    if json {
        let summaries: Vec<BenchmarkSummary> = all_benchmarks().map(BenchmarkSummary::from).collect();
        println!("{}", serde_json::to_string_pretty(&summaries)?);
        return Ok(());
    }
    println!("{:<16} {:>3} {:>14} {:<14} {}", "name", "dim", "optimum", "default", "bounds");
    for spec in all_benchmarks() {
        println!(
            "{:<16} {:>3} {:>14.6} {:<14} {}",
            spec.name,
            spec.dim(),
            spec.optimum,
            format_point(&spec.default_point),
            format_bounds(&spec.bounds)
        );
    }
    Ok(())
}

fn eval(name: &str, coords: &[f64], gap: bool) -> Result<(), Box<dyn Error>> {
    if gap {
        let value = log_gap(name)?.call(coords)?;
        println!("{} {} = {} {}", name, format_point(coords), value, describe_gap(value));
    } else {
        let value = get_benchmark(name)?.evaluate_args(coords)?;
        println!("{} {} = {}", name, format_point(coords), value);
    }
    Ok(())
}

fn probe() {
    for (spec, probes) in probe_all(all_benchmarks()) {
        for (i, probe) in probes.iter().enumerate() {
            let label = if i == 0 { format!("{}_gap", spec.name) } else { String::new() };
            let kind = match probe.kind {
                ProbeKind::Default => "default",
                ProbeKind::Minimum => "minimum",
            };
            println!(
                "{:<22} {} {:<14} gap = {:>12.6} {}",
                label,
                kind,
                format_point(&probe.x),
                probe.value,
                describe_gap(probe.value)
            );
        }
    }
}

fn sample(
    name: &str,
    samples: usize,
    seed: u64,
    gap: bool,
    output_dir: Option<PathBuf>,
) -> Result<(), Box<dyn Error>> {
    let spec = get_benchmark(name)?;
    let output_dir = match output_dir {
        Some(dir) => dir,
        None => get_records_dir()?,
    };

    let (csv_path, best) = if gap {
        let recorded = RecordedObjective::new(LogGap::new(spec));
        run_sampling(&recorded, &spec.default_point, samples, seed)?;
        (recorded.save_to_csv(&output_dir)?, recorded.best())
    } else {
        let recorded = RecordedObjective::new(spec);
        run_sampling(&recorded, &spec.default_point, samples, seed)?;
        (recorded.save_to_csv(&output_dir)?, recorded.best())
    };

    if let Some((x, value)) = best {
        println!("best of {} evaluations: {} at {}", samples + 1, value, format_point(&x));
    }
    println!("trace saved to {}", csv_path.display());
    Ok(())
}

fn grid(
    name: &str,
    nx: usize,
    ny: usize,
    gap: bool,
    output_dir: Option<PathBuf>,
) -> Result<(), Box<dyn Error>> {
    let spec = get_benchmark(name)?;
    let output_dir = match output_dir {
        Some(dir) => dir,
        None => get_grids_dir()?,
    };
    std::fs::create_dir_all(&output_dir)?;

    let objective: Box<dyn Objective> =
        if gap { Box::new(LogGap::new(spec)) } else { Box::new(spec) };
    let path = output_dir.join(format!("{}_grid.csv", objective.name()));

    if objective.dim() == 1 {
        sample_curve(objective.as_ref(), nx)?.save_to_csv(&path)?;
    } else {
        let surface = sample_surface(objective.as_ref(), nx, ny)?;
        surface.save_to_csv(&path)?;
        if let Some((x, y, value)) = surface.min() {
            println!("grid minimum: {} at [{}, {}]", value, x, y);
        }
    }
    println!("grid saved to {}", path.display());
    Ok(())
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    match cli.command {
        Commands::List { json } => list(json),
        Commands::Eval { name, coords, gap } => eval(&name, &coords, gap),
        Commands::Probe => {
            probe();
            Ok(())
        }
        Commands::Sample { name, samples, seed, gap, output_dir } => {
            sample(&name, samples, seed, gap, output_dir)
        }
        Commands::Grid { name, nx, ny, gap, output_dir } => grid(&name, nx, ny, gap, output_dir),
    }
}
