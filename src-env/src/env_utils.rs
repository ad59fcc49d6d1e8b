//! Environment variable utilities for gapbench
//!
//! This module resolves the GAPBENCH_DIR variable that points to the project
//! root, and the `data_generated` tree below it where traces and grids land.

use crate::constants::{DATA_GENERATED, GAPBENCH_DIR, GRIDS, RECORDS};
use std::env;
use std::path::{Path, PathBuf};

/// Error type for environment variable issues
#[derive(Debug, thiserror::Error)]
pub enum EnvError {
    #[error(
        "GAPBENCH_DIR environment variable is not set. Please set it to the project root directory (e.g., export GAPBENCH_DIR=/path/to/gapbench)"
    )]
    GapbenchDirNotSet,

    #[error("GAPBENCH_DIR points to a non-existent directory: {0}")]
    GapbenchDirNotFound(PathBuf),

    #[error("Failed to create directory {path}: {source}")]
    DirCreationFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Get the GAPBENCH_DIR environment variable and validate it exists
///
/// # Errors
///
/// Returns an error if:
/// - GAPBENCH_DIR is not set
/// - GAPBENCH_DIR points to a non-existent directory
///
/// # Example
///
/// ```no_run
/// use gapbench_env::env_utils::get_gapbench_dir;
///
/// let root = get_gapbench_dir()?;
/// println!("gapbench directory: {}", root.display());
/// # Ok::<(), gapbench_env::env_utils::EnvError>(())
/// ```
pub fn get_gapbench_dir() -> Result<PathBuf, EnvError> {
    let root = env::var(GAPBENCH_DIR).map_err(|_| EnvError::GapbenchDirNotSet)?;

    let path = PathBuf::from(root);

    if !path.exists() {
        return Err(EnvError::GapbenchDirNotFound(path));
    }

    Ok(path)
}

/// Create `path` (and its parents) unless it already exists
pub fn ensure_dir(path: &Path) -> Result<(), EnvError> {
    if !path.exists() {
        std::fs::create_dir_all(path).map_err(|source| EnvError::DirCreationFailed {
            path: path.to_path_buf(),
            source,
        })?;
    }
    Ok(())
}

/// Get the path to the data_generated directory, creating it if necessary
pub fn get_data_generated_dir() -> Result<PathBuf, EnvError> {
    let data_generated = get_gapbench_dir()?.join(DATA_GENERATED);
    ensure_dir(&data_generated)?;
    Ok(data_generated)
}

/// Get the path to data_generated/records, where evaluation traces are written
pub fn get_records_dir() -> Result<PathBuf, EnvError> {
    let records_dir = get_data_generated_dir()?.join(RECORDS);
    ensure_dir(&records_dir)?;
    Ok(records_dir)
}

/// Get the path to data_generated/grids, where sampled surfaces are written
pub fn get_grids_dir() -> Result<PathBuf, EnvError> {
    let grids_dir = get_data_generated_dir()?.join(GRIDS);
    ensure_dir(&grids_dir)?;
    Ok(grids_dir)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    // The process environment is shared between test threads
    static ENV_LOCK: Mutex<()> = Mutex::new(());

    fn with_gapbench_dir<T>(value: Option<&str>, f: impl FnOnce() -> T) -> T {
        let _guard = ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner());
        let original = env::var(GAPBENCH_DIR).ok();
        unsafe {
            match value {
                Some(v) => env::set_var(GAPBENCH_DIR, v),
                None => env::remove_var(GAPBENCH_DIR),
            }
        }
        let out = f();
        unsafe {
            match original {
                Some(v) => env::set_var(GAPBENCH_DIR, v),
                None => env::remove_var(GAPBENCH_DIR),
            }
        }
        out
    }

    #[test]
    fn test_gapbench_dir_not_set() {
        let result = with_gapbench_dir(None, get_gapbench_dir);
        assert!(matches!(result, Err(EnvError::GapbenchDirNotSet)));
    }

    #[test]
    fn test_gapbench_dir_nonexistent() {
        let result = with_gapbench_dir(Some("/this/path/should/not/exist"), get_gapbench_dir);
        assert!(matches!(result, Err(EnvError::GapbenchDirNotFound(_))));
    }

    #[test]
    fn test_records_and_grids_dirs_are_created() {
        let tmp = tempfile::tempdir().unwrap();
        let root = tmp.path().to_str().unwrap().to_string();

        let (records, grids) =
            with_gapbench_dir(Some(&root), || (get_records_dir().unwrap(), get_grids_dir().unwrap()));

        assert_eq!(records, tmp.path().join(DATA_GENERATED).join(RECORDS));
        assert_eq!(grids, tmp.path().join(DATA_GENERATED).join(GRIDS));
        assert!(records.is_dir());
        assert!(grids.is_dir());
    }
}
