//! Directory and variable names shared by the gapbench crates

/// Environment variable pointing at the project root
pub const GAPBENCH_DIR: &str = "GAPBENCH_DIR";

/// Directory (relative to the project root) receiving generated data
pub const DATA_GENERATED: &str = "data_generated";

/// Subdirectory of `DATA_GENERATED` for evaluation traces
pub const RECORDS: &str = "records";

/// Subdirectory of `DATA_GENERATED` for sampled curves and surfaces
pub const GRIDS: &str = "grids";
