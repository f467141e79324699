//! PSA Sampler - Monte Carlo draws of incremental cost and effect.
//!
//! The reference (lowest-cost) alternative is held at its point estimate and
//! every comparator is resampled against it. Standard practice resamples all
//! arms, including the reference; this engine keeps the fixed reference so
//! results stay comparable with earlier runs of the evaluation suite.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rand_distr::{Distribution, Normal};
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{compute_incremental, AlternativeTable, EvaluationError, IncrementalTable};
use crate::domain::foundation::Probability;

pub const PSA_MIN_ITERATIONS: usize = 100;
pub const PSA_MAX_ITERATIONS: usize = 10_000;
pub const DEFAULT_PSA_ITERATIONS: usize = 1_000;

/// Sampled increments of one comparator over the reference.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SampleSet {
    pub alternative_id: String,
    pub delta_costs: Vec<f64>,
    pub delta_effects: Vec<f64>,
}

impl SampleSet {
    pub fn len(&self) -> usize {
        self.delta_costs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.delta_costs.is_empty()
    }

    /// (Δeffect, Δcost) pairs, the coordinates of a cost-effectiveness plane.
    pub fn plane_points(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.delta_effects
            .iter()
            .copied()
            .zip(self.delta_costs.iter().copied())
    }

    /// Share of draws with non-positive net cost at the given threshold.
    ///
    /// A draw is acceptable when `Δc − λ·Δe ≤ 0`.
    pub fn acceptance(&self, threshold: f64) -> Probability {
        let hits = self
            .delta_costs
            .iter()
            .zip(&self.delta_effects)
            .filter(|&(&dc, &de)| dc - threshold * de <= 0.0)
            .count();
        Probability::from_counts(hits, self.len())
    }

    pub fn mean_delta_cost(&self) -> f64 {
        mean(&self.delta_costs)
    }

    pub fn mean_delta_effect(&self) -> f64 {
        mean(&self.delta_effects)
    }
}

fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Output of one probabilistic sensitivity analysis run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PsaResults {
    /// Lowest-cost alternative; held fixed.
    pub reference_id: String,
    pub iterations: usize,
    /// Seed that reproduces this run.
    pub seed: u64,
    /// One set per comparator, in cost order.
    pub sample_sets: Vec<SampleSet>,
}

impl PsaResults {
    pub fn sample_set(&self, alternative_id: &str) -> Option<&SampleSet> {
        self.sample_sets
            .iter()
            .find(|s| s.alternative_id == alternative_id)
    }
}

/// Monte Carlo sampling functions.
pub struct PsaSampler;

impl PsaSampler {
    /// Checks the iteration count lies within the supported bounds.
    pub fn validate_iterations(iterations: usize) -> Result<(), EvaluationError> {
        if !(PSA_MIN_ITERATIONS..=PSA_MAX_ITERATIONS).contains(&iterations) {
            return Err(EvaluationError::invalid_settings(
                "iterations",
                format!(
                    "must be between {} and {}, got {}",
                    PSA_MIN_ITERATIONS, PSA_MAX_ITERATIONS, iterations
                ),
            ));
        }
        Ok(())
    }

    /// Draws `iterations` samples for every comparator of a cost-sorted table.
    ///
    /// Cost and effect are drawn independently from normals centred on the
    /// alternative's estimates. A zero standard deviation yields the exact
    /// point estimate for every draw.
    pub fn sample_with_rng<R: Rng + ?Sized>(
        sorted: &IncrementalTable,
        iterations: usize,
        rng: &mut R,
    ) -> Result<Vec<SampleSet>, EvaluationError> {
        Self::validate_iterations(iterations)?;
        let alternatives = sorted.alternatives();
        let Some((reference, comparators)) = alternatives.split_first() else {
            return Err(EvaluationError::insufficient_data(0));
        };
        if comparators.is_empty() {
            return Err(EvaluationError::insufficient_data(1));
        }

        let mut sets = Vec::with_capacity(comparators.len());
        for alternative in comparators {
            let costs = draw(alternative.cost, alternative.cost_sd, iterations, rng)?;
            let effects = draw(alternative.effect, alternative.effect_sd, iterations, rng)?;

            let set = SampleSet {
                alternative_id: alternative.id.clone(),
                delta_costs: costs.into_iter().map(|c| c - reference.cost).collect(),
                delta_effects: effects.into_iter().map(|e| e - reference.effect).collect(),
            };
            debug!(
                alternative = %set.alternative_id,
                mean_delta_cost = set.mean_delta_cost(),
                mean_delta_effect = set.mean_delta_effect(),
                "Sampled comparator"
            );
            sets.push(set);
        }

        Ok(sets)
    }

    /// Runs PSA over a table with a seeded generator.
    ///
    /// When no seed is given one is drawn and recorded in the results.
    pub fn run(
        table: &AlternativeTable,
        iterations: usize,
        seed: Option<u64>,
    ) -> Result<PsaResults, EvaluationError> {
        let sorted = compute_incremental(table)?;
        let seed = seed.unwrap_or_else(rand::random);
        let mut rng = StdRng::seed_from_u64(seed);
        let sample_sets = Self::sample_with_rng(&sorted, iterations, &mut rng)?;

        let reference_id = sorted
            .reference()
            .map(|r| r.id.clone())
            .unwrap_or_default();

        Ok(PsaResults {
            reference_id,
            iterations,
            seed,
            sample_sets,
        })
    }
}

fn draw<R: Rng + ?Sized>(
    mean: f64,
    sd: f64,
    n: usize,
    rng: &mut R,
) -> Result<Vec<f64>, EvaluationError> {
    if sd == 0.0 {
        return Ok(vec![mean; n]);
    }
    let normal = Normal::new(mean, sd)
        .map_err(|e| EvaluationError::invalid_settings("standard_deviation", e.to_string()))?;
    Ok((0..n).map(|_| normal.sample(rng)).collect())
}

/// Runs probabilistic sensitivity analysis on the raw cost-sorted table.
pub fn run_psa(
    table: &AlternativeTable,
    iterations: usize,
    seed: Option<u64>,
) -> Result<PsaResults, EvaluationError> {
    PsaSampler::run(table, iterations, seed)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn uncertain_table() -> AlternativeTable {
        AlternativeTable::builder()
            .uncertain("A", 0.0, 0.0, 0.0, 0.0)
            .uncertain("B", 10000.0, 500.0, 0.4, 0.05)
            .uncertain("C", 22000.0, 1000.0, 0.55, 0.08)
            .build()
            .unwrap()
    }

    #[test]
    fn one_sample_set_per_comparator() {
        let results = run_psa(&uncertain_table(), 500, Some(7)).unwrap();
        assert_eq!(results.reference_id, "A");
        assert_eq!(results.sample_sets.len(), 2);
        for set in &results.sample_sets {
            assert_eq!(set.delta_costs.len(), 500);
            assert_eq!(set.delta_effects.len(), 500);
        }
    }

    #[test]
    fn zero_sd_samples_equal_point_estimate() {
        let table = AlternativeTable::builder()
            .alternative("ref", 1000.0, 1.0)
            .alternative("B", 3000.0, 1.5)
            .build()
            .unwrap();

        let results = run_psa(&table, 100, Some(1)).unwrap();
        let set = &results.sample_sets[0];
        assert!(set.delta_costs.iter().all(|&dc| dc == 2000.0));
        assert!(set.delta_effects.iter().all(|&de| de == 0.5));
    }

    #[test]
    fn only_zero_cost_sd_degenerates_costs() {
        let table = AlternativeTable::builder()
            .alternative("ref", 0.0, 0.0)
            .uncertain("B", 500.0, 0.0, 1.0, 0.2)
            .build()
            .unwrap();

        let results = run_psa(&table, 200, Some(3)).unwrap();
        let set = &results.sample_sets[0];
        assert!(set.delta_costs.iter().all(|&dc| dc == 500.0));
        assert!(set.delta_effects.iter().any(|&de| de != 1.0));
    }

    #[test]
    fn same_seed_reproduces_samples() {
        let first = run_psa(&uncertain_table(), 300, Some(42)).unwrap();
        let second = run_psa(&uncertain_table(), 300, Some(42)).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn different_seeds_differ() {
        let first = run_psa(&uncertain_table(), 300, Some(1)).unwrap();
        let second = run_psa(&uncertain_table(), 300, Some(2)).unwrap();
        assert_ne!(first.sample_sets, second.sample_sets);
    }

    #[test]
    fn missing_seed_is_recorded() {
        let results = run_psa(&uncertain_table(), 100, None).unwrap();
        let replay = run_psa(&uncertain_table(), 100, Some(results.seed)).unwrap();
        assert_eq!(results.sample_sets, replay.sample_sets);
    }

    #[test]
    fn sample_means_track_estimates() {
        let results = run_psa(&uncertain_table(), 10_000, Some(11)).unwrap();
        let b = results.sample_set("B").unwrap();
        assert!((b.mean_delta_cost() - 10000.0).abs() < 50.0);
        assert!((b.mean_delta_effect() - 0.4).abs() < 0.01);
    }

    #[test]
    fn reference_is_lowest_cost_not_first_entered() {
        let table = AlternativeTable::builder()
            .alternative("pricey", 900.0, 2.0)
            .alternative("cheap", 100.0, 1.0)
            .build()
            .unwrap();

        let results = run_psa(&table, 100, Some(5)).unwrap();
        assert_eq!(results.reference_id, "cheap");
        assert_eq!(results.sample_sets[0].alternative_id, "pricey");
        assert_eq!(results.sample_sets[0].delta_costs[0], 800.0);
    }

    #[test]
    fn iteration_bounds_are_enforced() {
        assert!(matches!(
            run_psa(&uncertain_table(), 99, Some(1)),
            Err(EvaluationError::InvalidSettings { .. })
        ));
        assert!(matches!(
            run_psa(&uncertain_table(), 10_001, Some(1)),
            Err(EvaluationError::InvalidSettings { .. })
        ));
        assert!(run_psa(&uncertain_table(), PSA_MAX_ITERATIONS, Some(1)).is_ok());
    }

    #[test]
    fn single_alternative_is_insufficient() {
        let table = AlternativeTable::builder()
            .alternative("A", 1.0, 1.0)
            .build()
            .unwrap();
        assert_eq!(
            run_psa(&table, 100, Some(1)).unwrap_err(),
            EvaluationError::insufficient_data(1)
        );
    }

    #[test]
    fn acceptance_counts_non_positive_net_cost() {
        let set = SampleSet {
            alternative_id: "B".into(),
            delta_costs: vec![100.0, 200.0, -50.0, 400.0],
            delta_effects: vec![1.0, 1.0, 0.0, 1.0],
        };
        // λ = 200: 100-200 ≤ 0, 200-200 ≤ 0, -50 ≤ 0, 400-200 > 0
        assert!((set.acceptance(200.0).value() - 0.75).abs() < f64::EPSILON);
        assert!((set.acceptance(0.0).value() - 0.25).abs() < f64::EPSILON);
    }

    #[test]
    fn plane_points_pair_effect_with_cost() {
        let set = SampleSet {
            alternative_id: "B".into(),
            delta_costs: vec![10.0, 20.0],
            delta_effects: vec![0.1, 0.2],
        };
        let points: Vec<_> = set.plane_points().collect();
        assert_eq!(points, vec![(0.1, 10.0), (0.2, 20.0)]);
    }
}
