//! Run-scoped search state shared by the driver, tracker and stopping policy.

use crate::individual::Individual;
use serde::{Deserialize, Serialize};

/// The best individual seen so far and the generation that produced it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BestEntry {
    pub individual: Individual,
    pub generation: usize,
}

impl BestEntry {
    pub fn fitness(&self) -> f64 {
        self.individual.rank_key()
    }
}

/// Statistics of one completed generation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationRecord {
    pub generation: usize,
    /// Lowest-fitness individual of this generation
    pub best_in_generation: Individual,
    /// Best individual across all generations up to and including this one
    pub best_ever: Individual,
    /// Mean fitness of this generation's elite individuals
    pub avg_top_n_fitness: f64,
}

/// Mutable state of a single optimizer run.
#[derive(Debug, Clone, Default)]
pub struct RunState {
    /// Index of the current generation, advanced only by the driver
    pub generation: usize,
    /// One record per observed generation, in order
    pub history: Vec<GenerationRecord>,
    pub best: Option<BestEntry>,
}

impl RunState {
    /// Create an empty state at generation 0.
    pub fn new() -> Self {
        RunState::default()
    }

    /// Move on to the next generation.
    pub fn advance(&mut self) {
        self.generation += 1;
    }

    /// Generation that produced the best-ever individual, 0 if none yet.
    pub fn best_generation(&self) -> usize {
        self.best.as_ref().map_or(0, |entry| entry.generation)
    }

    /// Fitness of the best-ever individual.
    pub fn best_fitness(&self) -> Option<f64> {
        self.best.as_ref().map(BestEntry::fitness)
    }

    pub fn last_record(&self) -> Option<&GenerationRecord> {
        self.history.last()
    }
}
