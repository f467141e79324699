//! Integration tests for the evaluation pipeline.
//!
//! These tests verify the end-to-end flow:
//! 1. A file source loads and validates the alternatives table
//! 2. The handler runs incremental, dominance, PSA and CEAC stages
//! 3. Exporters write the derived tables to disk or memory

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use tempfile::TempDir;

use health_econ::adapters::{
    CsvReportExporter, FileAlternativeSource, InMemoryAlternativeSource, InMemoryReportExporter,
    JsonReportExporter,
};
use health_econ::adapters::export::{CEAC_FILE, DOMINATED_FILE, EXTENDED_FILE, RAW_FILE, STRICT_FILE};
use health_econ::application::{EvaluationOutcome, RunEvaluationCommand, RunEvaluationHandler};
use health_econ::domain::evaluation::{
    AlternativeTable, EvaluationKind, EvaluationReport, EvaluationSettings, Ratio,
};
use health_econ::domain::foundation::ErrorCode;

// =============================================================================
// Test Infrastructure
// =============================================================================

const ABCD_JSON: &str = r#"[
    {"id": "A", "cost": 0,     "effect": 0,    "cost_sd": 0,    "effect_sd": 0},
    {"id": "B", "cost": 10000, "effect": 0.4,  "cost_sd": 500,  "effect_sd": 0.05},
    {"id": "C", "cost": 22000, "effect": 0.55, "cost_sd": 1000, "effect_sd": 0.08},
    {"id": "D", "cost": 15000, "effect": 0.3,  "cost_sd": 800,  "effect_sd": 0.05}
]"#;

fn write_input(dir: &TempDir, name: &str, content: &str) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, content).unwrap();
    path
}

fn settings(seed: u64) -> EvaluationSettings {
    EvaluationSettings {
        iterations: 500,
        resolution: 11,
        seed: Some(seed),
        ..Default::default()
    }
}

fn run_in_memory(table: AlternativeTable, settings: EvaluationSettings) -> EvaluationReport {
    let exporter = Arc::new(InMemoryReportExporter::new());
    let handler = RunEvaluationHandler::new(
        Arc::new(InMemoryAlternativeSource::new(table)),
        exporter.clone(),
    );
    let outcome = handler.handle(RunEvaluationCommand::new(settings)).unwrap();
    assert_eq!(exporter.count(), 1);
    match outcome {
        EvaluationOutcome::Completed(report) => *report,
        other => panic!("expected completed run, got {:?}", other),
    }
}

fn lines(path: &Path) -> Vec<String> {
    fs::read_to_string(path)
        .unwrap()
        .lines()
        .map(String::from)
        .collect()
}

// =============================================================================
// Deterministic branch
// =============================================================================

#[test]
fn worked_example_ratios() {
    let table = AlternativeTable::builder()
        .alternative("A", 0.0, 0.0)
        .alternative("B", 10000.0, 0.4)
        .alternative("C", 22000.0, 0.55)
        .build()
        .unwrap();

    let report = run_in_memory(table, settings(1));

    let ratios = report.incremental().ratios();
    assert_eq!(ratios[0], Ratio::Defined(25000.0));
    let Ratio::Defined(c) = ratios[1] else {
        panic!("C ratio should be defined");
    };
    assert!((c - 80000.0).abs() < 1e-6);
    assert!(report.dominance.dominated.is_empty());
}

#[test]
fn strictly_dominated_alternative_is_removed_from_pruned_views() {
    let dir = TempDir::new().unwrap();
    let input = write_input(&dir, "alts.json", ABCD_JSON);
    let source = FileAlternativeSource::new(&input);

    let exporter = Arc::new(InMemoryReportExporter::new());
    let handler = RunEvaluationHandler::new(Arc::new(source), exporter.clone());
    let outcome = handler.handle(RunEvaluationCommand::new(settings(3))).unwrap();
    let report = outcome.report().unwrap();

    assert_eq!(report.incremental().ids(), vec!["A", "B", "D", "C"]);
    assert!(report.incremental().rows()[2].ratio().unwrap().is_undefined());
    assert_eq!(report.dominance.strict_pruned.ids(), vec!["A", "B", "C"]);
    assert_eq!(report.dominance.frontier_ids(), vec!["A", "B", "C"]);

    let strict: Vec<_> = report.dominance.strictly_dominated().collect();
    assert_eq!(strict.len(), 1);
    assert_eq!(strict[0].alternative_id, "D");
}

#[test]
fn extended_dominance_removes_costlier_less_efficient_option() {
    // B buys 0.1 units for 1000, C 1.9 more for 2000: B is extended dominated
    let table = AlternativeTable::builder()
        .alternative("A", 0.0, 0.0)
        .alternative("B", 1000.0, 0.1)
        .alternative("C", 3000.0, 2.0)
        .build()
        .unwrap();

    let report = run_in_memory(table, settings(4));

    assert_eq!(report.dominance.strict_pruned.ids(), vec!["A", "B", "C"]);
    assert_eq!(report.dominance.frontier_ids(), vec!["A", "C"]);
    assert_eq!(report.dominance.extended_dominated().count(), 1);
    assert_eq!(report.dominance.extended_pruned.ratios(), vec![Ratio::Defined(1500.0)]);
}

// =============================================================================
// Probabilistic branch
// =============================================================================

#[test]
fn same_seed_reproduces_samples_and_curve() {
    let table: AlternativeTable = serde_json::from_str(ABCD_JSON).unwrap();

    let first = run_in_memory(table.clone(), settings(2025));
    let second = run_in_memory(table, settings(2025));

    assert_eq!(first.psa, second.psa);
    assert_eq!(first.ceac, second.ceac);
}

#[test]
fn different_seeds_give_different_samples() {
    let table: AlternativeTable = serde_json::from_str(ABCD_JSON).unwrap();

    let first = run_in_memory(table.clone(), settings(1));
    let second = run_in_memory(table, settings(2));

    assert_ne!(first.psa.sample_sets, second.psa.sample_sets);
}

#[test]
fn unseeded_run_records_its_seed() {
    let table: AlternativeTable = serde_json::from_str(ABCD_JSON).unwrap();
    let report = run_in_memory(
        table.clone(),
        EvaluationSettings {
            seed: None,
            ..settings(0)
        },
    );

    let seed = report.settings.seed.unwrap();
    assert_eq!(seed, report.psa.seed);

    let replay = run_in_memory(table, settings(seed));
    assert_eq!(replay.psa, report.psa);
}

#[test]
fn point_estimates_give_a_step_curve() {
    let table = AlternativeTable::builder()
        .alternative("A", 0.0, 0.0)
        .alternative("B", 10000.0, 0.4)
        .alternative("C", 22000.0, 0.55)
        .build()
        .unwrap();

    // λ = 25000 sweeps [0, 50000] in steps of 5000
    let report = run_in_memory(
        table,
        EvaluationSettings {
            threshold: 25000.0,
            ..settings(8)
        },
    );

    let thresholds = report.ceac.thresholds();
    assert_eq!(thresholds.first().copied(), Some(0.0));
    assert_eq!(thresholds.last().copied(), Some(50000.0));

    for point in report.ceac.points() {
        let expected = if point.threshold >= 25000.0 { 1.0 } else { 0.0 };
        assert_eq!(point.probability.value(), expected, "at λ = {}", point.threshold);
    }
    assert_eq!(report.ceac.first_threshold_reaching(1.0), Some(25000.0));
    assert_eq!(report.ceac.points()[5].best_alternative_id.as_deref(), Some("B"));
    assert_eq!(report.ceac.points()[0].best_alternative_id, None);
}

// =============================================================================
// Export
// =============================================================================

#[test]
fn file_to_csv_round_trip() {
    let dir = TempDir::new().unwrap();
    let input = write_input(&dir, "alts.json", ABCD_JSON);
    let out = dir.path().join("out");

    let handler = RunEvaluationHandler::new(
        Arc::new(FileAlternativeSource::new(&input)),
        Arc::new(CsvReportExporter::new(&out)),
    );
    let outcome = handler
        .handle(RunEvaluationCommand::new(EvaluationSettings {
            kind: EvaluationKind::CostUtility,
            ..settings(5)
        }))
        .unwrap();
    assert!(outcome.is_completed());

    let raw = lines(&out.join(RAW_FILE));
    assert_eq!(raw[0], "alternative_id,cost,effect,delta_cost,delta_effect,ICUR");
    assert_eq!(raw.len(), 5);
    assert!(raw[3].ends_with(",undefined"));

    assert_eq!(lines(&out.join(STRICT_FILE)).len(), 4);
    assert_eq!(lines(&out.join(EXTENDED_FILE)).len(), 4);
    assert_eq!(lines(&out.join(DOMINATED_FILE)).len(), 2);

    let ceac = lines(&out.join(CEAC_FILE));
    assert_eq!(ceac[0], "threshold,probability,best_alternative_id");
    assert_eq!(ceac.len(), 12);
}

#[test]
fn yaml_input_to_json_report() {
    let dir = TempDir::new().unwrap();
    let input = write_input(
        &dir,
        "alts.yml",
        "- {id: A, cost: 0, effect: 0}\n- {id: B, cost: 10000, effect: 0.4}\n",
    );
    let out = dir.path().join("report.json");

    let handler = RunEvaluationHandler::new(
        Arc::new(FileAlternativeSource::new(&input)),
        Arc::new(JsonReportExporter::new(&out)),
    );
    handler.handle(RunEvaluationCommand::new(settings(6))).unwrap();

    let report: EvaluationReport = serde_json::from_str(&fs::read_to_string(&out).unwrap()).unwrap();
    assert_eq!(report.incremental().ratios(), vec![Ratio::Defined(25000.0)]);
    assert_eq!(report.psa.iterations, 500);
}

#[test]
fn invalid_input_stops_before_export() {
    let dir = TempDir::new().unwrap();
    let input = write_input(
        &dir,
        "alts.json",
        r#"[{"id": "A", "cost": 0, "effect": 0}, {"id": "B", "cost": 10, "effect": -0.5}]"#,
    );
    let exporter = Arc::new(InMemoryReportExporter::new());

    let handler = RunEvaluationHandler::new(
        Arc::new(FileAlternativeSource::new(&input)),
        exporter.clone(),
    );
    let err = handler.handle(RunEvaluationCommand::new(settings(7))).unwrap_err();

    assert_eq!(err.code, ErrorCode::ValidationFailed);
    assert_eq!(exporter.count(), 0);
}
