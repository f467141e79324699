//! Incremental Calculator - Cost-sorted deltas and ICER/ICUR per alternative.

use serde::{Deserialize, Serialize};

use super::{Alternative, AlternativeTable, EvaluationError, Ratio};

/// Differences against the previous (next cheaper) alternative.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Increment {
    pub delta_cost: f64,
    pub delta_effect: f64,
    pub ratio: Ratio,
}

impl Increment {
    /// Computes the increment of `current` over `previous`.
    pub fn between(previous: &Alternative, current: &Alternative) -> Self {
        let delta_cost = current.cost - previous.cost;
        let delta_effect = current.effect - previous.effect;
        Self {
            delta_cost,
            delta_effect,
            ratio: Ratio::from_deltas(delta_cost, delta_effect),
        }
    }
}

/// One row of an incremental table.
///
/// The first row of every table is the reference and carries no increment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IncrementalRow {
    pub alternative: Alternative,
    pub increment: Option<Increment>,
}

impl IncrementalRow {
    pub fn delta_cost(&self) -> Option<f64> {
        self.increment.map(|i| i.delta_cost)
    }

    pub fn delta_effect(&self) -> Option<f64> {
        self.increment.map(|i| i.delta_effect)
    }

    /// Ratio for comparator rows; `None` for the reference.
    pub fn ratio(&self) -> Option<Ratio> {
        self.increment.map(|i| i.ratio)
    }

    pub fn is_reference(&self) -> bool {
        self.increment.is_none()
    }
}

/// Alternatives sorted by cost with their incremental rows.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct IncrementalTable {
    rows: Vec<IncrementalRow>,
}

impl IncrementalTable {
    /// Derives rows from alternatives already in cost order.
    ///
    /// Accepts any length, including the single-row tables left behind by
    /// dominance pruning.
    pub(crate) fn from_sorted(alternatives: Vec<Alternative>) -> Self {
        let mut rows: Vec<IncrementalRow> = Vec::with_capacity(alternatives.len());
        for alternative in alternatives {
            let increment = rows
                .last()
                .map(|previous| Increment::between(&previous.alternative, &alternative));
            rows.push(IncrementalRow {
                alternative,
                increment,
            });
        }
        Self { rows }
    }

    pub fn rows(&self) -> &[IncrementalRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// The lowest-cost alternative.
    pub fn reference(&self) -> Option<&Alternative> {
        self.rows.first().map(|r| &r.alternative)
    }

    /// Alternatives in cost order.
    pub fn alternatives(&self) -> Vec<Alternative> {
        self.rows.iter().map(|r| r.alternative.clone()).collect()
    }

    /// Alternative ids in cost order.
    pub fn ids(&self) -> Vec<&str> {
        self.rows.iter().map(|r| r.alternative.id.as_str()).collect()
    }

    /// Ratios of the comparator rows (every row but the reference).
    pub fn ratios(&self) -> Vec<Ratio> {
        self.rows.iter().filter_map(|r| r.ratio()).collect()
    }

    /// Number of comparator rows whose ratio is undefined.
    pub fn undefined_ratio_count(&self) -> usize {
        self.ratios().iter().filter(|r| r.is_undefined()).count()
    }
}

/// Incremental analysis over an alternative table.
pub struct IncrementalCalculator;

impl IncrementalCalculator {
    /// Sorts alternatives by cost and computes deltas and ratios.
    ///
    /// # Algorithm
    /// Stable sort by cost ascending. For row i ≥ 1:
    /// `Δc = cost[i] − cost[i−1]`, `Δe = effect[i] − effect[i−1]`,
    /// ratio `Δc/Δe` when `Δe > 0`, otherwise undefined.
    ///
    /// # Errors
    /// `InsufficientData` when the table holds fewer than two alternatives.
    pub fn compute(table: &AlternativeTable) -> Result<IncrementalTable, EvaluationError> {
        if table.len() < 2 {
            return Err(EvaluationError::insufficient_data(table.len()));
        }
        Ok(IncrementalTable::from_sorted(table.sorted_by_cost()))
    }
}

/// Sorts by cost and derives the incremental rows.
pub fn compute_incremental(table: &AlternativeTable) -> Result<IncrementalTable, EvaluationError> {
    IncrementalCalculator::compute(table)
}
