//! Cost comparison, cost minimization and cost-benefit tabulation.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{Probability, ValidationError};

/// Cost of one alternative relative to the first (base) entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CostDelta {
    pub alternative_id: String,
    pub cost: f64,
    pub delta_vs_base: f64,
}

/// Plain cost comparison against the first entry.
pub struct CostComparison;

impl CostComparison {
    pub fn against_first(costs: &[(String, f64)]) -> Vec<CostDelta> {
        let Some((_, base)) = costs.first() else {
            return Vec::new();
        };
        costs
            .iter()
            .map(|(id, cost)| CostDelta {
                alternative_id: id.clone(),
                cost: *cost,
                delta_vs_base: cost - base,
            })
            .collect()
    }
}

/// Cheapest alternative; the earliest entry wins ties.
pub fn cost_minimization(costs: &[(String, f64)]) -> Option<(String, f64)> {
    costs
        .iter()
        .fold(None::<&(String, f64)>, |best, entry| match best {
            Some(current) if current.1 <= entry.1 => Some(current),
            _ => Some(entry),
        })
        .cloned()
}

/// One row of a cost-benefit table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CostBenefitRow {
    pub alternative_id: String,
    pub cost: f64,
    pub benefit: f64,
    pub net_benefit: f64,
}

/// Cost-benefit analysis in monetary terms.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CostBenefit {
    pub rows: Vec<CostBenefitRow>,
    /// Share of alternatives whose benefit exceeds their cost.
    pub positive_share: Probability,
}

impl CostBenefit {
    /// Net benefit (`benefit − cost`) per alternative.
    pub fn tabulate(entries: &[(String, f64, f64)]) -> Result<Self, ValidationError> {
        let mut rows = Vec::with_capacity(entries.len());
        for (id, cost, benefit) in entries {
            ValidationError::check_non_negative("cost", *cost)?;
            ValidationError::check_non_negative("benefit", *benefit)?;
            rows.push(CostBenefitRow {
                alternative_id: id.clone(),
                cost: *cost,
                benefit: *benefit,
                net_benefit: benefit - cost,
            });
        }
        let positive = rows.iter().filter(|r| r.net_benefit > 0.0).count();
        Ok(Self {
            positive_share: Probability::from_counts(positive, rows.len()),
            rows,
        })
    }
}
