//! Dominance Classifier - Strict and extended dominance over the cost-sorted table.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use tracing::debug;

use super::{Alternative, IncrementalTable};

/// Why an alternative was removed from the frontier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DominanceKind {
    /// Another alternative is no more costly and at least as effective.
    Strict { dominated_by: String },
    /// A mix of its two frontier neighbours buys more effect per unit cost.
    Extended { lower: String, upper: String },
}

impl DominanceKind {
    pub fn label(&self) -> &'static str {
        match self {
            DominanceKind::Strict { .. } => "strict",
            DominanceKind::Extended { .. } => "extended",
        }
    }
}

/// An alternative removed by dominance pruning.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DominatedAlternative {
    pub alternative_id: String,
    #[serde(flatten)]
    pub kind: DominanceKind,
    pub explanation: String,
}

impl DominatedAlternative {
    /// Creates a strictly dominated record.
    pub fn strict(alternative_id: impl Into<String>, dominated_by: impl Into<String>) -> Self {
        Self {
            alternative_id: alternative_id.into(),
            kind: DominanceKind::Strict {
                dominated_by: dominated_by.into(),
            },
            explanation: String::new(),
        }
    }

    /// Creates an extended-dominated record.
    pub fn extended(
        alternative_id: impl Into<String>,
        lower: impl Into<String>,
        upper: impl Into<String>,
    ) -> Self {
        Self {
            alternative_id: alternative_id.into(),
            kind: DominanceKind::Extended {
                lower: lower.into(),
                upper: upper.into(),
            },
            explanation: String::new(),
        }
    }

    /// Attaches an explanation.
    pub fn with_explanation(mut self, explanation: impl Into<String>) -> Self {
        self.explanation = explanation.into();
        self
    }

    pub fn is_strict(&self) -> bool {
        matches!(self.kind, DominanceKind::Strict { .. })
    }
}

/// The three tables produced by dominance classification.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DominanceViews {
    /// Every alternative, ratios against the full cost-sorted set.
    pub raw: IncrementalTable,
    /// Strictly dominated alternatives removed, ratios recomputed.
    pub strict_pruned: IncrementalTable,
    /// Extended-dominated alternatives also removed, ratios recomputed.
    pub extended_pruned: IncrementalTable,
    /// Removed alternatives in the order they were removed.
    pub dominated: Vec<DominatedAlternative>,
}

impl DominanceViews {
    pub fn strictly_dominated(&self) -> impl Iterator<Item = &DominatedAlternative> {
        self.dominated.iter().filter(|d| d.is_strict())
    }

    pub fn extended_dominated(&self) -> impl Iterator<Item = &DominatedAlternative> {
        self.dominated.iter().filter(|d| !d.is_strict())
    }

    /// Ids on the efficiency frontier, cheapest first.
    pub fn frontier_ids(&self) -> Vec<&str> {
        self.extended_pruned.ids()
    }
}

/// Dominance analysis functions.
pub struct DominanceClassifier;

impl DominanceClassifier {
    /// Builds the raw, strict-pruned and extended-pruned views.
    ///
    /// # Edge Cases
    /// - Pruning down to one alternative leaves a view holding only the
    ///   reference row.
    /// - Identical cost and effect: the earlier row in cost order survives.
    /// - A tie at the lowest cost is resolved by dominance, so the more
    ///   effective of the tied alternatives becomes the pruned views' reference.
    pub fn classify(sorted: &IncrementalTable) -> DominanceViews {
        let alternatives = sorted.alternatives();
        let raw = IncrementalTable::from_sorted(alternatives.clone());

        let (strict_survivors, mut dominated) = Self::prune_strict(alternatives);
        let strict_pruned = IncrementalTable::from_sorted(strict_survivors.clone());

        let (extended_survivors, extended) = Self::prune_extended(strict_survivors);
        dominated.extend(extended);
        let extended_pruned = IncrementalTable::from_sorted(extended_survivors);

        debug!(
            alternatives = raw.len(),
            strict_survivors = strict_pruned.len(),
            frontier = extended_pruned.len(),
            "Dominance classification complete"
        );

        DominanceViews {
            raw,
            strict_pruned,
            extended_pruned,
            dominated,
        }
    }

    /// Removes strictly dominated alternatives from a cost-sorted list.
    ///
    /// Alternative K dominates J when:
    /// 1. cost[K] ≤ cost[J] and effect[K] ≥ effect[J]
    /// 2. at least one of the two is strict, or both are equal and K comes first
    pub fn prune_strict(
        sorted: Vec<Alternative>,
    ) -> (Vec<Alternative>, Vec<DominatedAlternative>) {
        let mut dominated = Vec::new();
        let mut survivors = Vec::with_capacity(sorted.len());

        for (j, candidate) in sorted.iter().enumerate() {
            let dominator = sorted
                .iter()
                .enumerate()
                .find(|(k, other)| *k != j && Self::dominates(other, *k, candidate, j));

            match dominator {
                Some((_, other)) => {
                    debug!(
                        alternative = %candidate.id,
                        dominated_by = %other.id,
                        "Strictly dominated"
                    );
                    dominated.push(
                        DominatedAlternative::strict(candidate.id.clone(), other.id.clone())
                            .with_explanation(Self::explain_strict(other, candidate)),
                    );
                }
                None => survivors.push(candidate.clone()),
            }
        }

        (survivors, dominated)
    }

    /// Checks if `a` (at sort position `a_pos`) dominates `b` (at `b_pos`).
    fn dominates(a: &Alternative, a_pos: usize, b: &Alternative, b_pos: usize) -> bool {
        if a.cost > b.cost || a.effect < b.effect {
            return false;
        }
        let strictly_better = a.cost < b.cost || a.effect > b.effect;
        strictly_better || a_pos < b_pos
    }

    fn explain_strict(dominator: &Alternative, dominated: &Alternative) -> String {
        if dominator.cost == dominated.cost && dominator.effect == dominated.effect {
            return format!(
                "{} has identical cost and effect and was entered first",
                dominator.id
            );
        }
        format!(
            "{} costs no more ({} vs {}) and is at least as effective ({} vs {})",
            dominator.id, dominator.cost, dominated.cost, dominator.effect, dominated.effect
        )
    }

    /// Removes extended-dominated alternatives until ratios are non-decreasing.
    ///
    /// Each pass recomputes ratios and drops the first alternative whose
    /// ratio exceeds its successor's. Every pass removes one alternative or
    /// stops, so the loop runs at most `sorted.len()` times. The first
    /// (reference) alternative carries no ratio and is never removed.
    pub fn prune_extended(
        sorted: Vec<Alternative>,
    ) -> (Vec<Alternative>, Vec<DominatedAlternative>) {
        let mut survivors = sorted;
        let mut dominated = Vec::new();
        let max_passes = survivors.len();

        for _ in 0..max_passes {
            let ratios = IncrementalTable::from_sorted(survivors.clone()).ratios();
            // ratios[k] belongs to survivors[k + 1]
            let violation = ratios
                .windows(2)
                .position(|pair| pair[0].frontier_cmp(&pair[1]) == Ordering::Greater);

            let Some(k) = violation else {
                break;
            };

            let index = k + 1;
            let lower = &survivors[index - 1];
            let upper = &survivors[index + 1];
            let removed = &survivors[index];
            debug!(
                alternative = %removed.id,
                lower = %lower.id,
                upper = %upper.id,
                "Extended dominated"
            );
            let explanation = format!(
                "ratio {} against {} exceeds ratio {} of {}",
                ratios[k], lower.id, ratios[k + 1], upper.id
            );
            dominated.push(
                DominatedAlternative::extended(removed.id.clone(), lower.id.clone(), upper.id.clone())
                    .with_explanation(explanation),
            );
            survivors.remove(index);
        }

        (survivors, dominated)
    }
}

/// Classifies the cost-sorted table into its three dominance views.
pub fn classify_dominance(sorted: &IncrementalTable) -> DominanceViews {
    DominanceClassifier::classify(sorted)
}
