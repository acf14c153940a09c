//! # Transport GA
//!
//! A generational genetic algorithm for the warehouse-to-store transportation
//! problem: ship goods from capacity-limited warehouses to stores with fixed
//! demands at the lowest total cost.
//!
//! Candidate plans are flat genomes of shipped quantities. Violated capacities
//! and unmet demands are not forbidden but penalized in the fitness, so the
//! search itself drives the population towards feasible plans. Elitism keeps
//! the best plans alive across generations and the run ends once the best-ever
//! plan has stagnated for long enough.

pub mod codec;
pub mod config;
pub mod error;
pub mod fitness;
pub mod individual;
pub mod plot;
pub mod population;
pub mod problem;
pub mod report;
pub mod state;
pub mod stopping;
pub mod tracker;
pub mod utils;
pub mod variation;

use crate::config::Config;
use crate::error::GaError;
use crate::fitness::FitnessEvaluator;
use crate::individual::Individual;
use crate::plot::FitnessPlot;
use crate::population::Population;
use crate::problem::TransportationProblem;
use crate::report::{OptimizationResult, Termination};
use crate::state::RunState;
use crate::stopping::StoppingPolicy;
use crate::tracker::EliteTracker;
use crate::variation::VariationPipeline;

use log::info;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Random number generator driving every stochastic decision of a run.
pub type SearchRng = ChaCha8Rng;

/// Anything that can produce a shipment plan for a problem.
///
/// The genetic search is one implementation; an exact LP/MILP solver would
/// be another.
pub trait ShipmentSolver {
    fn solve(&self, problem: &TransportationProblem) -> Result<OptimizationResult, GaError>;
}

/// [`ShipmentSolver`] backed by [`TransportGa`].
#[derive(Debug, Clone, Default)]
pub struct GeneticSolver {
    pub config: Config,
}

impl GeneticSolver {
    pub fn new(config: Config) -> Self {
        GeneticSolver { config }
    }
}

impl ShipmentSolver for GeneticSolver {
    fn solve(&self, problem: &TransportationProblem) -> Result<OptimizationResult, GaError> {
        TransportGa::new(problem.clone(), self.config.clone())?.run()
    }
}

/// Lifecycle of a single run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Initializing,
    Running,
    Terminated,
}

/// The main algorithm structure that orchestrates the generational search.
pub struct TransportGa {
    pub problem: TransportationProblem,
    pub config: Config,
    pub evaluator: Arc<FitnessEvaluator>,
    pub population: Population,
    pub state: RunState,
    pub phase: Phase,
    pub run_time: Duration,
    tracker: EliteTracker,
    stopping: StoppingPolicy,
    pipeline: VariationPipeline,
    rng: SearchRng,
}

impl TransportGa {
    /// Create a new search for the given problem and configuration.
    pub fn new(problem: TransportationProblem, config: Config) -> Result<Self, GaError> {
        config.validate()?;

        let evaluator = Arc::new(FitnessEvaluator::new(&problem, config.penalty_weight));
        let pipeline =
            VariationPipeline::standard(&config, Arc::clone(&evaluator), problem.max_supply())?;

        let mut tracker = EliteTracker::new(config.elite_retention_count, config.max_generations)?;
        if let Some(dir) = &config.plot_dir {
            tracker = tracker.with_plot(FitnessPlot::new(dir));
        }

        let rng = match config.seed {
            Some(seed) => SearchRng::seed_from_u64(seed),
            None => SearchRng::from_entropy(),
        };

        Ok(TransportGa {
            stopping: StoppingPolicy::new(config.max_generations),
            problem,
            config,
            evaluator,
            population: Population::default(),
            state: RunState::new(),
            phase: Phase::Initializing,
            run_time: Duration::from_secs(0),
            tracker,
            pipeline,
            rng,
        })
    }

    /// Build and evaluate a random initial population at generation 0.
    pub fn initialize(&mut self) {
        self.state = RunState::new();
        self.population = Population::random(
            self.config.population_size,
            self.problem.dimensions(),
            self.problem.max_supply(),
            &mut self.rng,
        );
        self.population.evaluate_all(&self.evaluator);
        self.tracker.observe(&mut self.state, &self.population);
        self.phase = Phase::Running;
    }

    /// Produce the next generation and record it.
    pub fn step(&mut self) -> Result<(), GaError> {
        let elites: Vec<Individual> = self
            .population
            .best_n(self.config.elite_retention_count)
            .into_iter()
            .cloned()
            .collect();

        let parents = std::mem::take(&mut self.population);
        let mut offspring = self.pipeline.run(parents, &mut self.rng)?;
        offspring.replace_worst(elites);
        self.population = offspring;

        self.state.advance();
        self.tracker.observe(&mut self.state, &self.population);
        Ok(())
    }

    /// Run the algorithm until the termination criteria are met.
    pub fn run(&mut self) -> Result<OptimizationResult, GaError> {
        let start_time = Instant::now();
        info!(
            "Starting search: {} warehouses, {} stores, population {}, up to {} generations",
            self.problem.get_warehouse_count(),
            self.problem.get_store_count(),
            self.config.population_size,
            self.config.max_generations
        );

        self.phase = Phase::Initializing;
        self.initialize();

        let termination = loop {
            if let Some(termination) = self.should_terminate() {
                break termination;
            }
            self.step()?;
        };

        self.phase = Phase::Terminated;
        self.run_time = start_time.elapsed();

        let best = self.state.best.as_ref().ok_or(GaError::NoSolution)?;
        let result = OptimizationResult::from_best(
            &self.problem,
            &self.evaluator,
            best,
            self.state.generation,
            termination,
            self.run_time,
        );
        info!(
            "Search finished after {} generations with fitness {:.2} (feasible: {})",
            result.generations_run, result.fitness, result.is_feasible
        );
        Ok(result)
    }

    /// Check if the termination criteria are met.
    fn should_terminate(&self) -> Option<Termination> {
        if self.stopping.should_stop(&self.state) {
            return Some(Termination::Stagnation);
        }
        if self.state.generation + 1 >= self.config.max_generations {
            return Some(Termination::GenerationCap);
        }
        None
    }
}
