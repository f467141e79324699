//! Single-shot calculators - Direct arithmetic over small user tables.
//!
//! - `CostOfIllness` - annual totals by cost category
//! - `BudgetImpact` / `return_on_investment` - spend projections and ROI
//! - `CostComparison` / `cost_minimization` / `CostBenefit` - plain cost tables

mod budget_impact;
mod cost_benefit;
mod cost_of_illness;

pub use budget_impact::{return_on_investment, BudgetImpact, BudgetYear};
pub use cost_benefit::{cost_minimization, CostBenefit, CostBenefitRow, CostComparison, CostDelta};
pub use cost_of_illness::{CategoryShare, CostCategory, CostOfIllness};
