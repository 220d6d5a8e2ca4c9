//! Reductions of simulated output: summary statistics, reference
//! densities and the comparison against the CLT limit.

pub mod comparison;
pub mod density;
pub mod summary;

pub use comparison::{compare_to_limit, ks_distance_normal, CltComparison};
pub use density::{exponential_pdf_overlay, normal_overlay_for, normal_pdf_overlay, DensityCurve};
pub use summary::{summarize, Statistics};
