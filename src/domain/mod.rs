//! Domain layer containing evaluation logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (ids, timestamps, probabilities, errors)
//! - `evaluation` - Incremental analysis, dominance, PSA and acceptability curves
//! - `calculators` - Single-shot cost calculators (COI, BIA, ROI, CMA, CBA)

pub mod calculators;
pub mod evaluation;
pub mod foundation;
