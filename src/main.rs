use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;

use health_econ::adapters::{CsvReportExporter, FileAlternativeSource, JsonReportExporter};
use health_econ::application::{EvaluationOutcome, RunEvaluationCommand, RunEvaluationHandler};
use health_econ::cli::{Cli, Commands, EvaluateArgs};
use health_econ::config::{AppConfig, OutputFormat};
use health_econ::domain::calculators::{
    cost_minimization, return_on_investment, BudgetImpact, CostBenefit, CostCategory,
    CostComparison, CostOfIllness,
};
use health_econ::ports::ReportExporter;
use health_econ::telemetry;

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => AppConfig::load_from_file(path),
        None => AppConfig::load(),
    }
    .context("Failed to load configuration")?;
    config
        .logging
        .validate()
        .context("Invalid logging configuration")?;
    telemetry::init(&config.logging)
        .map_err(|e| anyhow::anyhow!(e))
        .context("Failed to initialise logging")?;

    match cli.command {
        Commands::Evaluate(args) => run_evaluate(&args, config),
        Commands::Roi {
            investment,
            benefit,
        } => {
            match return_on_investment(investment, benefit) {
                Some(roi) => println!("ROI: {:.2}%", roi),
                None => println!("ROI: undefined (no investment)"),
            }
            Ok(())
        }
        Commands::BudgetImpact {
            delta_cost,
            population,
            years,
            payers,
        } => {
            let impact = BudgetImpact::project(delta_cost, population, years, payers)
                .context("Invalid budget impact inputs")?;
            println!("year,incremental_cost,cumulative_cost");
            for year in &impact.years {
                println!(
                    "{},{:.2},{:.2}",
                    year.year, year.incremental_cost, year.cumulative_cost
                );
            }
            if let Some(per_payer) = impact.per_payer {
                println!("Annual impact per payer: {:.2}", per_payer);
            }
            Ok(())
        }
        Commands::Coi { categories } => run_cost_of_illness(&categories),
        Commands::CostCompare { alternatives } => {
            println!("alternative_id,cost,delta_vs_base");
            for delta in CostComparison::against_first(&alternatives) {
                println!(
                    "{},{:.2},{:.2}",
                    delta.alternative_id, delta.cost, delta.delta_vs_base
                );
            }
            if let Some((id, cost)) = cost_minimization(&alternatives) {
                println!("Least costly: {} ({:.2})", id, cost);
            }
            Ok(())
        }
        Commands::Cba { alternatives } => {
            let cba = CostBenefit::tabulate(&alternatives)
                .context("Invalid cost-benefit inputs")?;
            println!("alternative_id,cost,benefit,net_benefit");
            for row in &cba.rows {
                println!(
                    "{},{:.2},{:.2},{:.2}",
                    row.alternative_id, row.cost, row.benefit, row.net_benefit
                );
            }
            println!("Positive net benefit: {:.1}%", cba.positive_share.value() * 100.0);
            Ok(())
        }
    }
}

fn run_cost_of_illness(categories: &[(String, f64)]) -> Result<()> {
    let categories: Vec<CostCategory> = if categories.is_empty() {
        CostOfIllness::default_categories()
    } else {
        categories
            .iter()
            .map(|(name, cost)| CostCategory::new(name.as_str(), *cost))
            .collect()
    };
    let coi = CostOfIllness::total(&categories).context("Invalid cost of illness inputs")?;
    println!("category,annual_cost,share");
    for category in &coi.categories {
        println!(
            "{},{:.2},{:.4}",
            category.name,
            category.annual_cost,
            category.share.value()
        );
    }
    println!("Total: {:.2}", coi.total);
    Ok(())
}

fn run_evaluate(args: &EvaluateArgs, config: AppConfig) -> Result<()> {
    let analysis = args.apply(config.analysis);
    analysis
        .validate()
        .context("Invalid analysis configuration")?;

    let output = Path::new(&analysis.output);
    let exporter: Arc<dyn ReportExporter> = match analysis.output_format {
        OutputFormat::Csv => Arc::new(CsvReportExporter::new(output)),
        OutputFormat::Json => Arc::new(JsonReportExporter::new(output)),
    };
    let source = Arc::new(FileAlternativeSource::new(&args.input));
    let handler = RunEvaluationHandler::new(source, exporter);

    let outcome = handler
        .handle(RunEvaluationCommand::new(analysis.settings()))
        .context("Evaluation failed")?;

    match outcome {
        EvaluationOutcome::Completed(report) => {
            info!(evaluation_id = %report.id, "Report written");
            println!("Evaluation {} ({})", report.id, report.kind());
            println!("Frontier: {}", report.dominance.frontier_ids().join(" -> "));
            for dominated in &report.dominance.dominated {
                println!(
                    "Dominated ({}): {} - {}",
                    dominated.kind.label(),
                    dominated.alternative_id,
                    dominated.explanation
                );
            }
            println!("Seed: {}", report.psa.seed);
            println!("Output: {}", analysis.output);
        }
        EvaluationOutcome::InsufficientData { found } => {
            println!(
                "Need at least 2 alternatives for incremental analysis, found {}",
                found
            );
        }
    }
    Ok(())
}
