//! Evaluation Module - Incremental cost-effectiveness analysis.
//!
//! Pure, stateless functions over an [`AlternativeTable`]:
//!
//! - `compute_incremental` - cost sort, deltas and ICER/ICUR per row
//! - `classify_dominance` - raw, strict-pruned and extended-pruned views
//! - `cost_effectiveness_plane` - deterministic increments against λ
//! - `run_psa` - normal draws of incremental cost and effect per comparator
//! - `build_ceac` - acceptability curve over a threshold sweep
//! - `evaluate` - all of the above in one run
//!
//! Nothing here performs I/O. Randomness enters only through the seed.

mod alternative;
mod ceac;
mod dominance;
mod errors;
mod incremental;
mod plane;
mod psa;
mod ratio;
mod report;

pub use alternative::{Alternative, AlternativeTable, AlternativeTableBuilder};
pub use ceac::{
    build_ceac, AcceptabilityCurve, CeacBuilder, CurvePoint, ThresholdRange,
    CEAC_MAX_RESOLUTION, CEAC_MIN_RESOLUTION, DEFAULT_CEAC_RESOLUTION,
};
pub use dominance::{
    classify_dominance, DominanceClassifier, DominanceKind, DominanceViews, DominatedAlternative,
};
pub use errors::EvaluationError;
pub use incremental::{
    compute_incremental, Increment, IncrementalCalculator, IncrementalRow, IncrementalTable,
};
pub use plane::{cost_effectiveness_plane, PlanePoint, Quadrant};
pub use psa::{
    run_psa, PsaResults, PsaSampler, SampleSet, DEFAULT_PSA_ITERATIONS, PSA_MAX_ITERATIONS,
    PSA_MIN_ITERATIONS,
};
pub use ratio::Ratio;
pub use report::{evaluate, EvaluationKind, EvaluationReport, EvaluationSettings};
