//! Error type shared by the benchmark registry, transforms, recorder and grids

use std::path::PathBuf;

/// Errors raised by gapbench-testfunctions
#[derive(Debug, thiserror::Error)]
pub enum BenchError {
    /// The name is not one of the registered benchmarks
    #[error("unknown benchmark name: '{name}'")]
    UnknownBenchmark { name: String },

    /// A coordinate vector does not match the benchmark arity
    #[error("dimension mismatch for '{name}': expected {expected} coordinates, got {got}")]
    DimensionMismatch {
        name: String,
        expected: usize,
        got: usize,
    },

    /// Grid sampling was asked for an empty or degenerate grid
    #[error("invalid grid: {0}")]
    InvalidGrid(String),

    /// A trace file could not be parsed
    #[error("invalid trace {}: line {line}: {reason}", .path.display())]
    InvalidTrace {
        path: PathBuf,
        line: usize,
        reason: String,
    },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Csv(#[from] csv::Error),

    #[error(transparent)]
    Env(#[from] gapbench_env::EnvError),
}

pub type Result<T> = std::result::Result<T, BenchError>;
