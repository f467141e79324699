//! Command-line interface definitions.

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use crate::config::{AnalysisConfig, OutputFormat};
use crate::domain::evaluation::EvaluationKind;

#[derive(Parser, Debug)]
#[command(name = "health-econ")]
#[command(about = "Incremental cost-effectiveness and cost-utility evaluation", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Configuration file (TOML, JSON or YAML)
    #[arg(short, long, global = true, env = "HEALTH_ECON_CONFIG")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run incremental, dominance, PSA and CEAC analysis over a table of alternatives
    Evaluate(EvaluateArgs),

    /// Return on investment as a percentage
    Roi {
        /// Amount invested
        #[arg(long)]
        investment: f64,

        /// Monetary benefit returned
        #[arg(long)]
        benefit: f64,
    },

    /// Project incremental spend over a horizon
    BudgetImpact {
        /// Incremental cost per treated patient
        #[arg(long, allow_hyphen_values = true)]
        delta_cost: f64,

        /// Treated population per year
        #[arg(long)]
        population: u64,

        /// Horizon in years
        #[arg(long, default_value = "5")]
        years: u32,

        /// Number of payers sharing the cost
        #[arg(long, default_value = "0")]
        payers: u64,
    },

    /// Total annual cost of illness by category
    Coi {
        /// Category as NAME=COST; repeat per category (defaults to the four standard ones)
        #[arg(long = "category", value_parser = parse_named_cost)]
        categories: Vec<(String, f64)>,
    },

    /// Compare costs against the first alternative and pick the cheapest
    CostCompare {
        /// Alternative as ID=COST; repeat per alternative
        #[arg(long = "alternative", required = true, value_parser = parse_named_cost)]
        alternatives: Vec<(String, f64)>,
    },

    /// Net monetary benefit per alternative
    Cba {
        /// Alternative as ID=COST:BENEFIT; repeat per alternative
        #[arg(long = "alternative", required = true, value_parser = parse_cost_benefit)]
        alternatives: Vec<(String, f64, f64)>,
    },
}

fn split_named(s: &str) -> Result<(String, &str), String> {
    let (name, value) = s
        .split_once('=')
        .ok_or_else(|| format!("expected NAME=VALUE, got `{}`", s))?;
    let name = name.trim();
    if name.is_empty() {
        return Err(format!("missing name in `{}`", s));
    }
    Ok((name.to_string(), value.trim()))
}

fn parse_amount(s: &str) -> Result<f64, String> {
    s.parse::<f64>()
        .map_err(|e| format!("invalid amount `{}`: {}", s, e))
}

fn parse_named_cost(s: &str) -> Result<(String, f64), String> {
    let (name, value) = split_named(s)?;
    Ok((name, parse_amount(value)?))
}

fn parse_cost_benefit(s: &str) -> Result<(String, f64, f64), String> {
    let (name, value) = split_named(s)?;
    let (cost, benefit) = value
        .split_once(':')
        .ok_or_else(|| format!("expected ID=COST:BENEFIT, got `{}`", s))?;
    Ok((name, parse_amount(cost.trim())?, parse_amount(benefit.trim())?))
}

/// Arguments of the `evaluate` command. Unset flags fall back to configuration.
#[derive(clap::Args, Debug, Default)]
pub struct EvaluateArgs {
    /// Alternatives table (.json, .yaml or .csv)
    #[arg(short, long)]
    pub input: PathBuf,

    /// Evaluation kind
    #[arg(long, value_enum)]
    pub kind: Option<KindArg>,

    /// Willingness-to-pay threshold per unit of effect
    #[arg(short, long)]
    pub threshold: Option<f64>,

    /// Monte Carlo iterations
    #[arg(long)]
    pub iterations: Option<usize>,

    /// Number of CEAC thresholds
    #[arg(long)]
    pub resolution: Option<usize>,

    /// Seed for reproducible sampling
    #[arg(long)]
    pub seed: Option<u64>,

    /// Export format
    #[arg(short, long, value_enum)]
    pub format: Option<FormatArg>,

    /// Output directory (csv) or file (json)
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

impl EvaluateArgs {
    /// Applies command-line overrides on top of configured defaults.
    pub fn apply(&self, mut config: AnalysisConfig) -> AnalysisConfig {
        if let Some(kind) = self.kind {
            config.kind = kind.into();
        }
        if let Some(threshold) = self.threshold {
            config.threshold = threshold;
        }
        if let Some(iterations) = self.iterations {
            config.iterations = iterations;
        }
        if let Some(resolution) = self.resolution {
            config.resolution = resolution;
        }
        if self.seed.is_some() {
            config.seed = self.seed;
        }
        if let Some(format) = self.format {
            config.output_format = format.into();
        }
        if let Some(output) = &self.output {
            config.output = output.display().to_string();
        }
        config
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum KindArg {
    /// Cost-effectiveness (natural units, ICER)
    Cea,
    /// Cost-utility (QALYs, ICUR)
    Cua,
}

impl From<KindArg> for EvaluationKind {
    fn from(kind: KindArg) -> Self {
        match kind {
            KindArg::Cea => EvaluationKind::CostEffectiveness,
            KindArg::Cua => EvaluationKind::CostUtility,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum FormatArg {
    Csv,
    Json,
}

impl From<FormatArg> for OutputFormat {
    fn from(format: FormatArg) -> Self {
        match format {
            FormatArg::Csv => OutputFormat::Csv,
            FormatArg::Json => OutputFormat::Json,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_evaluate_with_overrides() {
        let cli = Cli::try_parse_from([
            "health-econ",
            "evaluate",
            "--input",
            "alts.json",
            "--kind",
            "cua",
            "--threshold",
            "30000",
            "--seed",
            "5",
            "--format",
            "json",
        ])
        .unwrap();

        let Commands::Evaluate(args) = cli.command else {
            panic!("expected evaluate");
        };
        let config = args.apply(AnalysisConfig::default());
        assert_eq!(config.kind, EvaluationKind::CostUtility);
        assert_eq!(config.threshold, 30000.0);
        assert_eq!(config.seed, Some(5));
        assert_eq!(config.output_format, OutputFormat::Json);
        assert_eq!(config.iterations, 1000);
    }

    #[test]
    fn unset_flags_keep_configured_values() {
        let args = EvaluateArgs {
            input: PathBuf::from("alts.json"),
            ..Default::default()
        };
        let configured = AnalysisConfig {
            threshold: 45000.0,
            seed: Some(3),
            ..Default::default()
        };
        let config = args.apply(configured);
        assert_eq!(config.threshold, 45000.0);
        assert_eq!(config.seed, Some(3));
    }

    #[test]
    fn rejects_unknown_kind() {
        let result = Cli::try_parse_from([
            "health-econ",
            "evaluate",
            "--input",
            "a.json",
            "--kind",
            "cba",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn parses_budget_impact_with_savings() {
        let cli = Cli::try_parse_from([
            "health-econ",
            "budget-impact",
            "--delta-cost",
            "-250",
            "--population",
            "1000",
        ])
        .unwrap();
        assert!(matches!(
            cli.command,
            Commands::BudgetImpact { delta_cost, years: 5, .. } if delta_cost == -250.0
        ));
    }

    #[test]
    fn parses_repeated_coi_categories() {
        let cli = Cli::try_parse_from([
            "health-econ",
            "coi",
            "--category",
            "Direct medical=1200",
            "--category",
            "Indirect=300.5",
        ])
        .unwrap();

        let Commands::Coi { categories } = cli.command else {
            panic!("expected coi");
        };
        assert_eq!(
            categories,
            vec![
                ("Direct medical".to_string(), 1200.0),
                ("Indirect".to_string(), 300.5)
            ]
        );
    }

    #[test]
    fn coi_without_categories_is_allowed() {
        let cli = Cli::try_parse_from(["health-econ", "coi"]).unwrap();
        assert!(matches!(cli.command, Commands::Coi { categories } if categories.is_empty()));
    }

    #[test]
    fn cost_compare_requires_alternatives() {
        assert!(Cli::try_parse_from(["health-econ", "cost-compare"]).is_err());

        let cli = Cli::try_parse_from([
            "health-econ",
            "cost-compare",
            "--alternative",
            "A=1000",
            "--alternative",
            "B=900",
        ])
        .unwrap();
        let Commands::CostCompare { alternatives } = cli.command else {
            panic!("expected cost-compare");
        };
        assert_eq!(alternatives.len(), 2);
        assert_eq!(alternatives[1], ("B".to_string(), 900.0));
    }

    #[test]
    fn parses_cba_cost_and_benefit() {
        let cli = Cli::try_parse_from([
            "health-econ",
            "cba",
            "--alternative",
            "B=10000:15000",
        ])
        .unwrap();
        let Commands::Cba { alternatives } = cli.command else {
            panic!("expected cba");
        };
        assert_eq!(alternatives, vec![("B".to_string(), 10000.0, 15000.0)]);
    }

    #[test]
    fn malformed_pairs_are_rejected() {
        assert!(parse_named_cost("A1000").is_err());
        assert!(parse_named_cost("=1000").is_err());
        assert!(parse_named_cost("A=lots").is_err());
        assert!(parse_cost_benefit("B=10000").is_err());
        assert!(parse_cost_benefit("B=10000:x").is_err());
    }
}
