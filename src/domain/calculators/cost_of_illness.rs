//! Cost of Illness - Annual cost totals by category.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{Probability, ValidationError};

/// A cost category with its annual amount.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CostCategory {
    pub name: String,
    pub annual_cost: f64,
}

impl CostCategory {
    pub fn new(name: impl Into<String>, annual_cost: f64) -> Self {
        Self {
            name: name.into(),
            annual_cost,
        }
    }
}

/// A category with its share of the total.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryShare {
    pub name: String,
    pub annual_cost: f64,
    pub share: Probability,
}

/// Totals of a cost-of-illness table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CostOfIllness {
    pub total: f64,
    pub categories: Vec<CategoryShare>,
}

impl CostOfIllness {
    /// Direct medical, direct non-medical, indirect and intangible costs, all zero.
    pub fn default_categories() -> Vec<CostCategory> {
        [
            "Direct medical",
            "Direct non-medical",
            "Indirect (productivity)",
            "Intangible",
        ]
        .into_iter()
        .map(|name| CostCategory::new(name, 0.0))
        .collect()
    }

    /// Sums the categories. Shares are zero when the total is zero.
    ///
    /// # Errors
    /// Negative or non-finite amounts, or an empty category name.
    pub fn total(categories: &[CostCategory]) -> Result<Self, ValidationError> {
        for category in categories {
            if category.name.trim().is_empty() {
                return Err(ValidationError::empty_field("name"));
            }
            ValidationError::check_non_negative("annual_cost", category.annual_cost)?;
        }

        let total: f64 = categories.iter().map(|c| c.annual_cost).sum();
        let categories = categories
            .iter()
            .map(|c| CategoryShare {
                name: c.name.clone(),
                annual_cost: c.annual_cost,
                share: if total > 0.0 {
                    Probability::new(c.annual_cost / total)
                } else {
                    Probability::ZERO
                },
            })
            .collect();

        Ok(Self { total, categories })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn totals_and_shares() {
        let result = CostOfIllness::total(&[
            CostCategory::new("Direct medical", 750.0),
            CostCategory::new("Indirect (productivity)", 250.0),
        ])
        .unwrap();

        assert_eq!(result.total, 1000.0);
        assert_eq!(result.categories[0].share.value(), 0.75);
        assert_eq!(result.categories[1].share.value(), 0.25);
    }

    #[test]
    fn zero_total_has_zero_shares() {
        let result = CostOfIllness::total(&CostOfIllness::default_categories()).unwrap();
        assert_eq!(result.total, 0.0);
        assert_eq!(result.categories.len(), 4);
        assert!(result.categories.iter().all(|c| c.share == Probability::ZERO));
    }

    #[test]
    fn negative_costs_are_rejected() {
        let err = CostOfIllness::total(&[CostCategory::new("Intangible", -1.0)]).unwrap_err();
        assert!(matches!(err, ValidationError::Negative { .. }));
    }

    #[test]
    fn blank_names_are_rejected() {
        let err = CostOfIllness::total(&[CostCategory::new("  ", 1.0)]).unwrap_err();
        assert_eq!(err, ValidationError::empty_field("name"));
    }
}
