//! CEAC Builder - Cost-effectiveness acceptability curve over a threshold sweep.

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{EvaluationError, PsaResults};
use crate::domain::foundation::Probability;

pub const DEFAULT_CEAC_RESOLUTION: usize = 50;
pub const CEAC_MIN_RESOLUTION: usize = 2;
pub const CEAC_MAX_RESOLUTION: usize = 100;

/// Evenly spaced willingness-to-pay thresholds over `[0, max]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ThresholdRange {
    max: f64,
    resolution: usize,
}

impl ThresholdRange {
    /// Creates a sweep from 0 to `lambda_max` inclusive with `resolution` points.
    ///
    /// `lambda_max` must be positive so the thresholds strictly increase.
    pub fn new(lambda_max: f64, resolution: usize) -> Result<Self, EvaluationError> {
        if !lambda_max.is_finite() || lambda_max <= 0.0 {
            return Err(EvaluationError::invalid_settings(
                "lambda_max",
                format!("must be a finite positive number, got {}", lambda_max),
            ));
        }
        if !(CEAC_MIN_RESOLUTION..=CEAC_MAX_RESOLUTION).contains(&resolution) {
            return Err(EvaluationError::invalid_settings(
                "resolution",
                format!(
                    "must be between {} and {}, got {}",
                    CEAC_MIN_RESOLUTION, CEAC_MAX_RESOLUTION, resolution
                ),
            ));
        }
        Ok(Self {
            max: lambda_max,
            resolution,
        })
    }

    /// Sweep over `[0, 2λ]`, centring the user's threshold in the curve.
    pub fn doubled(threshold: f64, resolution: usize) -> Result<Self, EvaluationError> {
        Self::new(threshold * 2.0, resolution)
    }

    pub fn max(&self) -> f64 {
        self.max
    }

    pub fn resolution(&self) -> usize {
        self.resolution
    }

    /// The thresholds, starting at 0 and ending at `max`.
    pub fn thresholds(&self) -> Vec<f64> {
        let last = self.resolution - 1;
        (0..self.resolution)
            .map(|i| {
                if i == last {
                    self.max
                } else {
                    self.max * i as f64 / last as f64
                }
            })
            .collect()
    }
}

/// One point on the acceptability curve.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurvePoint {
    pub threshold: f64,
    pub probability: Probability,
    /// Comparator with the highest acceptance at this threshold; `None` when
    /// no draw of any comparator is acceptable.
    pub best_alternative_id: Option<String>,
}

/// Probability that the best comparator is cost-effective, per threshold.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AcceptabilityCurve {
    points: Vec<CurvePoint>,
}

impl AcceptabilityCurve {
    pub fn points(&self) -> &[CurvePoint] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn thresholds(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.threshold).collect()
    }

    pub fn probabilities(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.probability.value()).collect()
    }

    /// Lowest threshold at which the curve reaches `probability`.
    pub fn first_threshold_reaching(&self, probability: f64) -> Option<f64> {
        self.points
            .iter()
            .find(|p| p.probability.value() >= probability)
            .map(|p| p.threshold)
    }
}

/// Acceptability curve construction.
pub struct CeacBuilder;

impl CeacBuilder {
    /// Sweeps the threshold range over PSA samples.
    ///
    /// # Algorithm
    /// For each threshold λ and comparator i:
    /// `P_i(λ) = share of draws with Δc − λ·Δe ≤ 0`.
    /// The curve value is `max_i P_i(λ)`; ties go to the cheaper comparator.
    ///
    /// # Edge Cases
    /// - Point estimates (all SDs zero): the curve is a 0/1 step at the
    ///   lowest comparator ratio against the reference.
    pub fn build(
        results: &PsaResults,
        range: &ThresholdRange,
    ) -> Result<AcceptabilityCurve, EvaluationError> {
        if results.sample_sets.is_empty() {
            return Err(EvaluationError::insufficient_data(1));
        }

        let points: Vec<CurvePoint> = range
            .thresholds()
            .into_iter()
            .map(|threshold| {
                let mut best: Option<(&str, Probability)> = None;
                for set in &results.sample_sets {
                    let p = set.acceptance(threshold);
                    if best.map_or(true, |(_, current)| p > current) {
                        best = Some((set.alternative_id.as_str(), p));
                    }
                }
                let (id, probability) = best.unwrap_or(("", Probability::ZERO));
                CurvePoint {
                    threshold,
                    probability,
                    best_alternative_id: (probability > Probability::ZERO)
                        .then(|| id.to_string()),
                }
            })
            .collect();

        debug!(
            points = points.len(),
            lambda_max = range.max(),
            "Built acceptability curve"
        );

        Ok(AcceptabilityCurve { points })
    }
}

/// Builds the acceptability curve over `[0, lambda_max]`.
pub fn build_ceac(
    results: &PsaResults,
    lambda_max: f64,
    resolution: usize,
) -> Result<AcceptabilityCurve, EvaluationError> {
    let range = ThresholdRange::new(lambda_max, resolution)?;
    CeacBuilder::build(results, &range)
}
