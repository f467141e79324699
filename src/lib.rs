//! Health Econ - Incremental economic evaluation of health interventions
//!
//! This crate compares alternatives by cost and effect: cost-sorted ICER/ICUR
//! tables, strict and extended dominance, probabilistic sensitivity analysis
//! and cost-effectiveness acceptability curves, plus a handful of single-shot
//! cost calculators.

pub mod adapters;
pub mod application;
pub mod cli;
pub mod config;
pub mod domain;
pub mod ports;
pub mod telemetry;
