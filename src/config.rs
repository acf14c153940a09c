//! Configuration parameters for the transportation GA.

use crate::error::ConfigurationError;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Configuration settings for the generational search.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Number of individuals in every generation
    pub population_size: usize,
    /// Number of best individuals carried over and averaged each generation
    pub elite_retention_count: usize,
    /// Hard cap on the number of generations
    pub max_generations: usize,
    /// Number of contestants per selection tournament
    pub tournament_size: usize,
    /// Per-position swap probability of uniform crossover
    pub crossover_probability: f64,
    /// Standard deviation of the Gaussian mutation noise
    pub mutation_std_dev: f64,
    /// Fitness cost per unit of capacity or demand violation
    pub penalty_weight: f64,
    /// Seed for the random number generator, entropy when absent
    pub seed: Option<u64>,
    /// Directory for fitness history plots, no plots when absent
    pub plot_dir: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            population_size: 100,
            elite_retention_count: 2,
            max_generations: 20000,
            tournament_size: 3,
            crossover_probability: 0.3,
            mutation_std_dev: 50.0,
            penalty_weight: 1000.0,
            seed: None,
            plot_dir: None,
        }
    }
}

impl Config {
    /// Create a new configuration with default values.
    pub fn new() -> Self {
        Config::default()
    }

    /// Set the population size.
    pub fn with_population_size(mut self, size: usize) -> Self {
        self.population_size = size;
        self
    }

    /// Set the number of elite individuals.
    pub fn with_elite_retention_count(mut self, n: usize) -> Self {
        self.elite_retention_count = n;
        self
    }

    /// Set the generation cap.
    pub fn with_max_generations(mut self, generations: usize) -> Self {
        self.max_generations = generations;
        self
    }

    /// Set the tournament size.
    pub fn with_tournament_size(mut self, size: usize) -> Self {
        self.tournament_size = size;
        self
    }

    /// Set the crossover swap probability.
    pub fn with_crossover_probability(mut self, probability: f64) -> Self {
        self.crossover_probability = probability;
        self
    }

    /// Set the mutation standard deviation.
    pub fn with_mutation_std_dev(mut self, std_dev: f64) -> Self {
        self.mutation_std_dev = std_dev;
        self
    }

    /// Set the penalty weight.
    pub fn with_penalty_weight(mut self, weight: f64) -> Self {
        self.penalty_weight = weight;
        self
    }

    /// Set the random seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Set the directory fitness plots are written to.
    pub fn with_plot_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.plot_dir = Some(dir.into());
        self
    }

    /// Check that every parameter is usable before a run starts.
    pub fn validate(&self) -> Result<(), ConfigurationError> {
        if self.population_size == 0 {
            return Err(invalid("population_size", "must be at least 1"));
        }
        if self.elite_retention_count == 0 {
            return Err(invalid("elite_retention_count", "must be at least 1"));
        }
        if self.elite_retention_count > self.population_size {
            return Err(invalid(
                "elite_retention_count",
                format!(
                    "{} exceeds the population size {}",
                    self.elite_retention_count, self.population_size
                ),
            ));
        }
        if self.max_generations == 0 {
            return Err(invalid("max_generations", "must be at least 1"));
        }
        if self.tournament_size == 0 {
            return Err(invalid("tournament_size", "must be at least 1"));
        }
        if !(0.0..=1.0).contains(&self.crossover_probability) {
            return Err(invalid(
                "crossover_probability",
                format!("{} is outside [0, 1]", self.crossover_probability),
            ));
        }
        if !self.mutation_std_dev.is_finite() || self.mutation_std_dev < 0.0 {
            return Err(invalid(
                "mutation_std_dev",
                format!("{} is not a finite non-negative number", self.mutation_std_dev),
            ));
        }
        if !self.penalty_weight.is_finite() || self.penalty_weight < 0.0 {
            return Err(invalid(
                "penalty_weight",
                format!("{} is not a finite non-negative number", self.penalty_weight),
            ));
        }
        Ok(())
    }
}

fn invalid(name: &'static str, reason: impl Into<String>) -> ConfigurationError {
    ConfigurationError::InvalidParameter {
        name,
        reason: reason.into(),
    }
}
