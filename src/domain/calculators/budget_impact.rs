//! Budget Impact and Return on Investment.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::ValidationError;

/// Incremental spend for one year of the horizon.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BudgetYear {
    pub year: u32,
    pub incremental_cost: f64,
    pub cumulative_cost: f64,
}

/// Projection of incremental spend over a horizon.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BudgetImpact {
    pub annual_cost: f64,
    pub years: Vec<BudgetYear>,
    /// Annual cost spread over payers; `None` without payers.
    pub per_payer: Option<f64>,
}

impl BudgetImpact {
    /// Projects a constant annual impact of `delta_cost_per_patient × population`.
    ///
    /// The per-patient delta may be negative (savings); population is a
    /// head count.
    pub fn project(
        delta_cost_per_patient: f64,
        population: u64,
        years: u32,
        payers: u64,
    ) -> Result<Self, ValidationError> {
        if !delta_cost_per_patient.is_finite() {
            return Err(ValidationError::not_finite("delta_cost_per_patient"));
        }

        let annual_cost = delta_cost_per_patient * population as f64;
        let years = (1..=years)
            .map(|year| BudgetYear {
                year,
                incremental_cost: annual_cost,
                cumulative_cost: annual_cost * f64::from(year),
            })
            .collect();
        let per_payer = (payers > 0).then(|| annual_cost / payers as f64);

        Ok(Self {
            annual_cost,
            years,
            per_payer,
        })
    }

    /// Cumulative cost at the end of the horizon.
    pub fn cumulative(&self) -> f64 {
        self.years.last().map_or(0.0, |y| y.cumulative_cost)
    }
}

/// Return on investment as a percentage; `None` when nothing was invested.
pub fn return_on_investment(investment: f64, benefit: f64) -> Option<f64> {
    if investment == 0.0 || !investment.is_finite() || !benefit.is_finite() {
        return None;
    }
    Some((benefit - investment) / investment * 100.0)
}
