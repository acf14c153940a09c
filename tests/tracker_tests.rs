//! Unit tests for the elite tracker and the stopping policy.

use transport_ga::individual::Individual;
use transport_ga::plot::{plot_y_range, FitnessPlot};
use transport_ga::population::Population;
use transport_ga::state::RunState;
use transport_ga::stopping::StoppingPolicy;
use transport_ga::tracker::EliteTracker;

/// Creates a population whose individuals have the given fitness values.
fn population_with_fitness(values: &[f64]) -> Population {
    Population::new(
        values
            .iter()
            .enumerate()
            .map(|(i, &fitness)| Individual {
                genome: vec![i as f64],
                fitness: Some(fitness),
            })
            .collect(),
    )
}

#[test]
fn test_tracker_records_generation_statistics() {
    let tracker = EliteTracker::new(2, 1000).unwrap();
    let mut state = RunState::new();

    let population = population_with_fitness(&[30.0, 10.0, 20.0, 40.0]);
    let improved = tracker.observe(&mut state, &population);

    assert!(improved);
    let record = state.last_record().unwrap();
    assert_eq!(record.generation, 0);
    assert_eq!(record.best_in_generation.fitness, Some(10.0));
    assert_eq!(record.best_ever.fitness, Some(10.0));
    assert_eq!(record.avg_top_n_fitness, 15.0);
    assert_eq!(state.best_generation(), 0);
}

#[test]
fn test_best_ever_is_non_increasing() {
    let tracker = EliteTracker::new(1, 1000).unwrap();
    let mut state = RunState::new();
    let generations = [[50.0, 60.0], [40.0, 70.0], [45.0, 80.0], [40.0, 41.0], [10.0, 90.0]];

    for values in &generations {
        tracker.observe(&mut state, &population_with_fitness(values));
        state.advance();
    }

    let best_ever: Vec<f64> = state
        .history
        .iter()
        .map(|r| r.best_ever.fitness.unwrap())
        .collect();
    assert_eq!(best_ever, vec![50.0, 40.0, 40.0, 40.0, 10.0]);
    assert!(best_ever.windows(2).all(|w| w[1] <= w[0]));
    assert_eq!(state.best_generation(), 4);
}

#[test]
fn test_tie_keeps_earlier_best() {
    let tracker = EliteTracker::new(1, 1000).unwrap();
    let mut state = RunState::new();

    tracker.observe(&mut state, &population_with_fitness(&[5.0]));
    state.advance();
    let improved = tracker.observe(&mut state, &population_with_fitness(&[7.0, 5.0]));

    assert!(!improved);
    assert_eq!(state.best_generation(), 0);
    assert_eq!(state.best.as_ref().unwrap().individual.genome, vec![0.0]);
}

#[test]
fn test_elite_count_must_be_positive() {
    assert!(EliteTracker::new(0, 100).is_err());
}

#[test]
fn test_elite_count_larger_than_population_averages_all() {
    let tracker = EliteTracker::new(5, 1000).unwrap();
    let mut state = RunState::new();

    tracker.observe(&mut state, &population_with_fitness(&[2.0, 4.0]));

    assert_eq!(state.last_record().unwrap().avg_top_n_fitness, 3.0);
}

#[test]
fn test_empty_population_is_not_recorded() {
    let tracker = EliteTracker::new(2, 1000).unwrap();
    let mut state = RunState::new();

    assert!(!tracker.observe(&mut state, &Population::default()));
    assert!(state.history.is_empty());
    assert!(state.best.is_none());
}

#[test]
fn test_reporting_cadence() {
    let tracker = EliteTracker::new(2, 20000).unwrap();

    assert!(tracker.should_report(0));
    assert!(tracker.should_report(200));
    assert!(!tracker.should_report(201));
    assert!(tracker.should_report(19999));

    assert!(tracker.should_plot(2000));
    assert!(!tracker.should_plot(200));
    assert!(tracker.should_plot(19999));

    // Too few generations to report or plot at all.
    let short = EliteTracker::new(2, 10).unwrap();
    assert!(!short.should_report(0));
    assert!(!short.should_plot(9));
}

#[test]
fn test_cadence_with_uneven_generation_count() {
    // 199 / 100 is not a whole step: only the first and last generation report.
    let tracker = EliteTracker::new(2, 199).unwrap();
    let reported: Vec<usize> = (0..199).filter(|&g| tracker.should_report(g)).collect();
    assert_eq!(reported, vec![0, 198]);

    // 15 / 10 = 1.5, so every third generation is a multiple of the step.
    let tracker = EliteTracker::new(2, 15).unwrap();
    let plotted: Vec<usize> = (0..15).filter(|&g| tracker.should_plot(g)).collect();
    assert_eq!(plotted, vec![0, 3, 6, 9, 12, 14]);
}

#[test]
fn test_summary_mentions_both_generations() {
    let tracker = EliteTracker::new(1, 1000).unwrap();
    let mut state = RunState::new();
    tracker.observe(&mut state, &population_with_fitness(&[5.0]));
    state.advance();
    tracker.observe(&mut state, &population_with_fitness(&[8.0]));

    let summary = tracker.summary(&state).unwrap();
    assert!(summary.starts_with("Best fitness from [1]: 8"));
    assert!(summary.contains("Best fitness so far[0]: 5"));
}

#[test]
fn test_plot_range_clips_outliers() {
    let tracker = EliteTracker::new(1, 1000).unwrap();
    let mut state = RunState::new();
    for fitness in (1..=100).rev().map(|f| f as f64 * 10.0) {
        tracker.observe(&mut state, &population_with_fitness(&[fitness]));
        state.advance();
    }

    let (y_min, y_max) = plot_y_range(&state.history).unwrap();
    assert!((y_min - 9.0).abs() < 1e-9);
    // 98th percentile of 10, 20, ..., 1000
    assert!((y_max - 980.2).abs() < 1e-9);
    assert!(plot_y_range(&[]).is_none());
}

#[test]
fn test_stopping_threshold() {
    assert_eq!(StoppingPolicy::new(20000).threshold(), 5000);
    assert_eq!(StoppingPolicy::new(100000).threshold(), 5000);
    assert_eq!(StoppingPolicy::new(1000).threshold(), 250);
    assert_eq!(StoppingPolicy::new(13).threshold(), 3);
    // Halves round to even.
    assert_eq!(StoppingPolicy::new(10).threshold(), 2);
    assert_eq!(StoppingPolicy::new(14).threshold(), 4);
}

#[test]
fn test_stopping_triggers_exactly_at_threshold() {
    let policy = StoppingPolicy::new(1000);

    assert!(!policy.stagnated(349, 100));
    assert!(policy.stagnated(350, 100));
    assert!(policy.stagnated(351, 100));
    assert!(!policy.stagnated(100, 100));
}

#[test]
fn test_stopping_uses_run_state() {
    let policy = StoppingPolicy::new(40);
    let tracker = EliteTracker::new(1, 40).unwrap();
    let mut state = RunState::new();

    tracker.observe(&mut state, &population_with_fitness(&[1.0]));
    for _ in 0..9 {
        state.advance();
        tracker.observe(&mut state, &population_with_fitness(&[2.0]));
        assert!(!policy.should_stop(&state));
    }
    state.advance();
    tracker.observe(&mut state, &population_with_fitness(&[2.0]));
    assert!(policy.should_stop(&state));
}

#[test]
fn test_plot_writes_svg() {
    let dir = std::env::temp_dir().join(format!("transport_ga_plot_{}", std::process::id()));
    let tracker = EliteTracker::new(1, 1000).unwrap();
    let mut state = RunState::new();
    for fitness in [400.0, 300.0, 350.0, 200.0] {
        tracker.observe(&mut state, &population_with_fitness(&[fitness, fitness + 50.0]));
        state.advance();
    }

    let path = FitnessPlot::new(&dir).render(&state.history, 3).unwrap();

    assert_eq!(path, dir.join("fitness_3.svg"));
    let svg = std::fs::read_to_string(&path).unwrap();
    assert!(svg.contains("<svg"));
    std::fs::remove_dir_all(&dir).unwrap();
}
