//! Environment utilities and shared constants for gapbench

pub mod constants;
pub mod env_utils;

pub use constants::*;
pub use env_utils::*;
