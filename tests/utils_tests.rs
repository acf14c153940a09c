//! Unit tests for utility functions and result reporting.

use std::env;
use std::fs;
use std::time::Duration;
use transport_ga::codec::encode;
use transport_ga::fitness::{FitnessEvaluator, DEFAULT_PENALTY_WEIGHT};
use transport_ga::individual::Individual;
use transport_ga::problem::TransportationProblem;
use transport_ga::report::{OptimizationResult, Termination};
use transport_ga::state::BestEntry;
use transport_ga::utils as general_utils;

/// Creates a small two warehouse, two store problem.
fn create_test_problem() -> TransportationProblem {
    TransportationProblem::with_names(
        vec!["North".to_string(), "South".to_string()],
        vec!["A".to_string(), "B".to_string()],
        vec![100.0, 50.0],
        vec![60.0, 70.0],
        vec![vec![1.0, 2.0], vec![3.0, 4.0]],
    )
    .unwrap()
}

/// Creates a result for a plan that leaves store B 10 units short.
fn create_test_result() -> OptimizationResult {
    let problem = create_test_problem();
    let evaluator = FitnessEvaluator::new(&problem, DEFAULT_PENALTY_WEIGHT);
    let genome = encode(&[vec![60.0, 40.0], vec![0.0, 20.0]]);
    let best = BestEntry {
        individual: Individual::evaluated(genome, &evaluator),
        generation: 7,
    };

    OptimizationResult::from_best(
        &problem,
        &evaluator,
        &best,
        12,
        Termination::GenerationCap,
        Duration::from_secs(3),
    )
}

#[test]
fn test_general_utils_format_duration() {
    // Test some sample durations
    let duration1 = Duration::from_secs(65);
    assert_eq!(general_utils::format_duration(duration1), "0h 01m 05s");

    let duration2 = Duration::from_secs(3600 + 120 + 5);
    assert_eq!(general_utils::format_duration(duration2), "1h 02m 05s");

    let duration3 = Duration::from_secs(7200 + 3600 + 900 + 30);
    assert_eq!(general_utils::format_duration(duration3), "3h 15m 30s");
}

#[test]
fn test_percentile_interpolates() {
    let values = [4.0, 1.0, 3.0, 2.0];

    assert_eq!(general_utils::percentile(&values, 0.0), Some(1.0));
    assert_eq!(general_utils::percentile(&values, 100.0), Some(4.0));
    assert_eq!(general_utils::percentile(&values, 50.0), Some(2.5));
    assert_eq!(general_utils::percentile(&[7.0], 98.0), Some(7.0));
    assert_eq!(general_utils::percentile(&[], 50.0), None);
}

#[test]
fn test_result_reports_violations() {
    let result = create_test_result();

    assert_eq!(result.shipments, vec![vec![60.0, 40.0], vec![0.0, 20.0]]);
    assert_eq!(result.transport_cost, 60.0 + 80.0 + 0.0 + 80.0);
    assert_eq!(result.supply_violations, vec![0.0, 0.0]);
    assert_eq!(result.demand_violations, vec![0.0, 10.0]);
    assert_eq!(result.fitness, 220.0 + 10.0 * DEFAULT_PENALTY_WEIGHT);
    assert!(!result.is_feasible);
    assert_eq!(result.found_at_generation, 7);
    assert_eq!(result.generations_run, 12);
}

#[test]
fn test_result_display() {
    let text = create_test_result().to_string();

    assert!(text.starts_with("Optimal Transportation Plan reached in generation 7:"));
    assert!(text.contains("North"));
    assert!(text.contains("Total Cost: 220.00"));
    assert!(text.contains("Demand Violations: [0.0, 10.0]"));
    assert!(text.contains("Runtime: 0h 00m 03s"));
}

#[test]
fn test_save_result_writes_json() {
    let result = create_test_result();
    let path = env::temp_dir().join(format!("transport_ga_result_{}.json", std::process::id()));

    general_utils::save_result(&result, &path).unwrap();
    let saved: OptimizationResult =
        serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
    fs::remove_file(&path).unwrap();

    assert_eq!(saved.shipments, result.shipments);
    assert_eq!(saved.warehouses, vec!["North", "South"]);
    assert_eq!(saved.termination, Termination::GenerationCap);
}
