//! Alternative Table - Validated comparator records for incremental analysis.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::ValidationError;

/// A single comparator: an intervention with its mean cost and effect.
///
/// Standard deviations default to zero, which makes probabilistic sampling
/// degenerate to the point estimate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Alternative {
    pub id: String,
    pub cost: f64,
    #[serde(alias = "qalys")]
    pub effect: f64,
    #[serde(default, deserialize_with = "zero_if_blank")]
    pub cost_sd: f64,
    #[serde(default, alias = "qaly_sd", deserialize_with = "zero_if_blank")]
    pub effect_sd: f64,
}

/// Reads a missing value (`null`, an empty CSV cell) as zero.
fn zero_if_blank<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Option::<f64>::deserialize(deserializer).map(Option::unwrap_or_default)
}

impl Alternative {
    /// Creates a point-estimate alternative (both standard deviations zero).
    pub fn new(id: impl Into<String>, cost: f64, effect: f64) -> Self {
        Self {
            id: id.into(),
            cost,
            effect,
            cost_sd: 0.0,
            effect_sd: 0.0,
        }
    }

    /// Sets the standard deviations used by probabilistic sampling.
    pub fn with_sd(mut self, cost_sd: f64, effect_sd: f64) -> Self {
        self.cost_sd = cost_sd;
        self.effect_sd = effect_sd;
        self
    }

    /// Checks every measured quantity is finite and non-negative.
    pub fn validate(&self) -> Result<(), ValidationError> {
        ValidationError::check_non_negative("cost", self.cost)?;
        ValidationError::check_non_negative("effect", self.effect)?;
        ValidationError::check_non_negative("cost_sd", self.cost_sd)?;
        ValidationError::check_non_negative("effect_sd", self.effect_sd)?;
        Ok(())
    }

    /// True when neither cost nor effect carries any uncertainty.
    pub fn is_point_estimate(&self) -> bool {
        self.cost_sd == 0.0 && self.effect_sd == 0.0
    }
}

/// Ordered list of alternatives as entered by the user.
///
/// Construction validates every row, so downstream stages never see negative
/// or non-finite inputs. Tables with fewer than two rows are valid tables;
/// they only become an "insufficient data" state once analysed.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct AlternativeTable {
    alternatives: Vec<Alternative>,
}

impl AlternativeTable {
    /// Creates a validated table, rejecting the first invalid row.
    pub fn new(alternatives: Vec<Alternative>) -> Result<Self, ValidationError> {
        for alternative in &alternatives {
            alternative.validate()?;
        }
        Ok(Self { alternatives })
    }

    /// Creates an empty table.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Creates a builder for constructing a table.
    pub fn builder() -> AlternativeTableBuilder {
        AlternativeTableBuilder::new()
    }

    /// Alternatives in insertion order.
    pub fn alternatives(&self) -> &[Alternative] {
        &self.alternatives
    }

    /// Returns true if the table has no alternatives.
    pub fn is_empty(&self) -> bool {
        self.alternatives.is_empty()
    }

    /// Returns the number of alternatives.
    pub fn len(&self) -> usize {
        self.alternatives.len()
    }

    /// Copy of the alternatives sorted by cost ascending.
    ///
    /// The sort is stable: alternatives with equal cost keep their entry order.
    pub fn sorted_by_cost(&self) -> Vec<Alternative> {
        let mut sorted = self.alternatives.clone();
        sorted.sort_by(|a, b| a.cost.total_cmp(&b.cost));
        sorted
    }
}

impl<'de> Deserialize<'de> for AlternativeTable {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let alternatives = Vec::<Alternative>::deserialize(deserializer)?;
        AlternativeTable::new(alternatives).map_err(serde::de::Error::custom)
    }
}

/// Builder for constructing AlternativeTable instances.
#[derive(Debug, Default)]
pub struct AlternativeTableBuilder {
    alternatives: Vec<Alternative>,
}

impl AlternativeTableBuilder {
    /// Creates a new builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a point-estimate alternative.
    pub fn alternative(mut self, id: impl Into<String>, cost: f64, effect: f64) -> Self {
        self.alternatives.push(Alternative::new(id, cost, effect));
        self
    }

    /// Adds an alternative with sampling uncertainty.
    pub fn uncertain(
        mut self,
        id: impl Into<String>,
        cost: f64,
        cost_sd: f64,
        effect: f64,
        effect_sd: f64,
    ) -> Self {
        self.alternatives
            .push(Alternative::new(id, cost, effect).with_sd(cost_sd, effect_sd));
        self
    }

    /// Builds and validates the table.
    pub fn build(self) -> Result<AlternativeTable, ValidationError> {
        AlternativeTable::new(self.alternatives)
    }
}
