//! Evaluation report - All derived tables of one run, plus the settings that produced them.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::{
    classify_dominance, compute_incremental, cost_effectiveness_plane, AcceptabilityCurve,
    AlternativeTable, CeacBuilder, DominanceViews, EvaluationError, PlanePoint, PsaResults,
    PsaSampler, ThresholdRange, DEFAULT_CEAC_RESOLUTION, DEFAULT_PSA_ITERATIONS,
};
use crate::domain::foundation::{EvaluationId, Timestamp};

/// Cost-effectiveness (natural units) or cost-utility (QALYs).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EvaluationKind {
    #[default]
    #[serde(rename = "cea", alias = "cost_effectiveness")]
    CostEffectiveness,
    #[serde(rename = "cua", alias = "cost_utility")]
    CostUtility,
}

impl EvaluationKind {
    /// Column label of the incremental ratio.
    pub fn ratio_label(&self) -> &'static str {
        match self {
            EvaluationKind::CostEffectiveness => "ICER",
            EvaluationKind::CostUtility => "ICUR",
        }
    }

    /// Column label of the effect measure.
    pub fn effect_label(&self) -> &'static str {
        match self {
            EvaluationKind::CostEffectiveness => "effect",
            EvaluationKind::CostUtility => "QALYs",
        }
    }
}

impl fmt::Display for EvaluationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            EvaluationKind::CostEffectiveness => "cea",
            EvaluationKind::CostUtility => "cua",
        };
        write!(f, "{}", s)
    }
}

impl FromStr for EvaluationKind {
    type Err = EvaluationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "cea" | "costeffectiveness" | "cost-effectiveness" => {
                Ok(EvaluationKind::CostEffectiveness)
            }
            "cua" | "costutility" | "cost-utility" => Ok(EvaluationKind::CostUtility),
            other => Err(EvaluationError::invalid_settings(
                "kind",
                format!("unknown evaluation kind '{}'", other),
            )),
        }
    }
}

/// Scalars chosen by the user for one run.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EvaluationSettings {
    pub kind: EvaluationKind,
    /// Willingness-to-pay per unit of effect (λ).
    pub threshold: f64,
    pub iterations: usize,
    pub resolution: usize,
    pub seed: Option<u64>,
}

impl Default for EvaluationSettings {
    fn default() -> Self {
        Self {
            kind: EvaluationKind::default(),
            threshold: 20000.0,
            iterations: DEFAULT_PSA_ITERATIONS,
            resolution: DEFAULT_CEAC_RESOLUTION,
            seed: None,
        }
    }
}

impl EvaluationSettings {
    /// Checks every scalar before any computation starts.
    pub fn validate(&self) -> Result<ThresholdRange, EvaluationError> {
        PsaSampler::validate_iterations(self.iterations)?;
        ThresholdRange::doubled(self.threshold, self.resolution)
    }
}

/// Everything one evaluation run produces.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvaluationReport {
    pub id: EvaluationId,
    pub settings: EvaluationSettings,
    pub dominance: DominanceViews,
    pub plane: Vec<PlanePoint>,
    pub psa: PsaResults,
    pub ceac: AcceptabilityCurve,
    pub computed_at: Timestamp,
}

impl EvaluationReport {
    pub fn kind(&self) -> EvaluationKind {
        self.settings.kind
    }

    /// The raw incremental table.
    pub fn incremental(&self) -> &super::IncrementalTable {
        &self.dominance.raw
    }
}

/// Runs the full pipeline: incremental table, dominance views, plane, PSA and CEAC.
///
/// The CEAC sweeps `[0, 2λ]`. The seed used for sampling is recorded in the
/// report so the run can be replayed.
pub fn evaluate(
    table: &AlternativeTable,
    settings: EvaluationSettings,
) -> Result<EvaluationReport, EvaluationError> {
    let range = settings.validate()?;

    let incremental = compute_incremental(table)?;
    let dominance = classify_dominance(&incremental);
    let plane = cost_effectiveness_plane(&incremental, settings.threshold);
    let psa = PsaSampler::run(table, settings.iterations, settings.seed)?;
    let ceac = CeacBuilder::build(&psa, &range)?;

    Ok(EvaluationReport {
        id: EvaluationId::new(),
        settings: EvaluationSettings {
            seed: Some(psa.seed),
            ..settings
        },
        dominance,
        plane,
        psa,
        ceac,
        computed_at: Timestamp::now(),
    })
}
