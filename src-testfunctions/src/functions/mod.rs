//! Test function implementations organized by category
//!
//! - `multimodal`: 2D functions with several local minima (bohachevsky, branin,
//!   camel, goldstein-price)
//! - `modern`: 1D metamodeling functions (forester)

pub mod modern;
pub mod multimodal;

// Re-export all functions for easy access
pub use modern::*;
pub use multimodal::*;
