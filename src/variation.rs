//! Variation operators that turn one generation into the next.
//!
//! Every stage consumes a [`Population`] and returns a new one. The
//! [`VariationPipeline`] runs its stages in order: selection, cloning,
//! crossover, mutation, re-evaluation and pooling.

use crate::config::Config;
use crate::error::ConfigurationError;
use crate::fitness::FitnessEvaluator;
use crate::individual::Individual;
use crate::population::Population;
use crate::SearchRng;
use rand::Rng;
use rand_distr::{Distribution, Normal};
use std::sync::Arc;

/// A single `Population -> Population` transformation.
pub trait Operator {
    /// Short name used in log output.
    fn name(&self) -> &'static str;

    fn apply(
        &self,
        population: Population,
        rng: &mut SearchRng,
    ) -> Result<Population, ConfigurationError>;
}

/// Tournament selection with replacement across tournaments.
pub struct TournamentSelection {
    /// Contestants per tournament
    pub size: usize,
    /// Number of winners emitted
    pub count: usize,
}

impl TournamentSelection {
    pub fn new(size: usize, count: usize) -> Self {
        TournamentSelection { size, count }
    }

    /// Run one tournament and return the index of its lowest-fitness contestant.
    pub fn tournament(&self, population: &Population, rng: &mut SearchRng) -> usize {
        let n = population.len();
        let mut winner = rng.gen_range(0..n);
        for _ in 1..self.size {
            let challenger = rng.gen_range(0..n);
            if population.individuals[challenger].rank_key()
                < population.individuals[winner].rank_key()
            {
                winner = challenger;
            }
        }
        winner
    }
}

impl Operator for TournamentSelection {
    fn name(&self) -> &'static str {
        "tournament_selection"
    }

    fn apply(
        &self,
        population: Population,
        rng: &mut SearchRng,
    ) -> Result<Population, ConfigurationError> {
        if population.is_empty() {
            return Err(ConfigurationError::PopulationShortfall {
                expected: self.count,
                actual: 0,
            });
        }

        let winners = (0..self.count)
            .map(|_| {
                let idx = self.tournament(&population, rng);
                population.individuals[idx].clone()
            })
            .collect();

        Ok(Population::new(winners))
    }
}

/// Detaches selected parents from their scores so they are re-evaluated later.
pub struct Cloning;

impl Operator for Cloning {
    fn name(&self) -> &'static str {
        "clone"
    }

    fn apply(
        &self,
        population: Population,
        _rng: &mut SearchRng,
    ) -> Result<Population, ConfigurationError> {
        let clones = population
            .individuals
            .into_iter()
            .map(|parent| Individual::new(parent.genome))
            .collect();
        Ok(Population::new(clones))
    }
}

/// Uniform crossover between adjacent individuals.
pub struct UniformCrossover {
    /// Probability of swapping the two parents' values at each position
    pub probability: f64,
}

impl UniformCrossover {
    pub fn new(probability: f64) -> Self {
        UniformCrossover { probability }
    }

    /// Swap genes between two genomes position by position.
    pub fn cross(&self, first: &mut [f64], second: &mut [f64], rng: &mut SearchRng) {
        for (a, b) in first.iter_mut().zip(second.iter_mut()) {
            if rng.gen_bool(self.probability) {
                std::mem::swap(a, b);
            }
        }
    }
}

impl Operator for UniformCrossover {
    fn name(&self) -> &'static str {
        "uniform_crossover"
    }

    fn apply(
        &self,
        mut population: Population,
        rng: &mut SearchRng,
    ) -> Result<Population, ConfigurationError> {
        // An odd trailing individual is left untouched.
        for pair in population.individuals.chunks_exact_mut(2) {
            let (left, right) = pair.split_at_mut(1);
            self.cross(&mut left[0].genome, &mut right[0].genome, rng);
            left[0].invalidate();
            right[0].invalidate();
        }
        Ok(population)
    }
}

/// Gaussian noise on a random share of positions, then clamped into bounds.
pub struct GaussianMutation {
    noise: Normal<f64>,
    /// Largest allowed gene value
    pub upper_bound: f64,
}

impl GaussianMutation {
    pub fn new(std_dev: f64, upper_bound: f64) -> Result<Self, ConfigurationError> {
        if !std_dev.is_finite() || std_dev < 0.0 {
            return Err(ConfigurationError::InvalidParameter {
                name: "mutation_std_dev",
                reason: format!("{} is not a finite non-negative number", std_dev),
            });
        }
        let noise = Normal::new(0.0, std_dev).map_err(|e| ConfigurationError::InvalidParameter {
            name: "mutation_std_dev",
            reason: e.to_string(),
        })?;
        Ok(GaussianMutation { noise, upper_bound })
    }

    /// Perturb each position with probability `k / len`, where `k` is drawn
    /// uniformly from `0..=len`. On average `k` positions change.
    pub fn mutate(&self, genome: &mut [f64], rng: &mut SearchRng) {
        let len = genome.len();
        if len > 0 {
            let rate = rng.gen_range(0..=len) as f64 / len as f64;
            for gene in genome.iter_mut() {
                if rng.gen_bool(rate) {
                    *gene += self.noise.sample(rng);
                }
            }
        }
        for gene in genome.iter_mut() {
            *gene = gene.clamp(0.0, self.upper_bound);
        }
    }
}

impl Operator for GaussianMutation {
    fn name(&self) -> &'static str {
        "gaussian_mutation"
    }

    fn apply(
        &self,
        mut population: Population,
        rng: &mut SearchRng,
    ) -> Result<Population, ConfigurationError> {
        for individual in population.individuals.iter_mut() {
            self.mutate(&mut individual.genome, rng);
            individual.invalidate();
        }
        Ok(population)
    }
}

/// Recomputes the fitness of every individual.
pub struct Evaluate {
    pub evaluator: Arc<FitnessEvaluator>,
}

impl Operator for Evaluate {
    fn name(&self) -> &'static str {
        "evaluate"
    }

    fn apply(
        &self,
        mut population: Population,
        _rng: &mut SearchRng,
    ) -> Result<Population, ConfigurationError> {
        population.evaluate_all(&self.evaluator);
        Ok(population)
    }
}

/// Truncates the population to a fixed size.
pub struct Pool {
    pub size: usize,
}

impl Operator for Pool {
    fn name(&self) -> &'static str {
        "pool"
    }

    fn apply(
        &self,
        mut population: Population,
        _rng: &mut SearchRng,
    ) -> Result<Population, ConfigurationError> {
        if population.len() < self.size {
            return Err(ConfigurationError::PopulationShortfall {
                expected: self.size,
                actual: population.len(),
            });
        }
        population.individuals.truncate(self.size);
        Ok(population)
    }
}

/// An ordered sequence of variation stages.
#[derive(Default)]
pub struct VariationPipeline {
    stages: Vec<Box<dyn Operator>>,
}

impl VariationPipeline {
    /// Create an empty pipeline.
    pub fn new() -> Self {
        VariationPipeline { stages: Vec::new() }
    }

    /// The standard generational pipeline for the given configuration.
    pub fn standard(
        config: &Config,
        evaluator: Arc<FitnessEvaluator>,
        upper_bound: f64,
    ) -> Result<Self, ConfigurationError> {
        Ok(VariationPipeline::new()
            .with_stage(TournamentSelection::new(
                config.tournament_size,
                config.population_size,
            ))
            .with_stage(Cloning)
            .with_stage(UniformCrossover::new(config.crossover_probability))
            .with_stage(GaussianMutation::new(config.mutation_std_dev, upper_bound)?)
            .with_stage(Evaluate { evaluator })
            .with_stage(Pool {
                size: config.population_size,
            }))
    }

    /// Append a stage to the end of the pipeline.
    pub fn with_stage<O: Operator + 'static>(mut self, stage: O) -> Self {
        self.stages.push(Box::new(stage));
        self
    }

    /// Names of the stages in execution order.
    pub fn stage_names(&self) -> Vec<&'static str> {
        self.stages.iter().map(|stage| stage.name()).collect()
    }

    /// Run every stage in order.
    pub fn run(
        &self,
        population: Population,
        rng: &mut SearchRng,
    ) -> Result<Population, ConfigurationError> {
        self.stages
            .iter()
            .try_fold(population, |population, stage| stage.apply(population, rng))
    }
}
