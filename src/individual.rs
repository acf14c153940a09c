//! Individual representation for the genetic algorithm population.

use crate::codec::Genome;
use crate::fitness::FitnessEvaluator;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// A candidate shipment plan together with its fitness.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Individual {
    /// The flat shipment plan
    pub genome: Genome,
    /// Fitness score, `None` until evaluated
    pub fitness: Option<f64>,
}

impl Individual {
    /// Create an individual that still needs to be evaluated.
    pub fn new(genome: Genome) -> Self {
        Individual {
            genome,
            fitness: None,
        }
    }

    /// Create an individual and evaluate it right away.
    pub fn evaluated(genome: Genome, evaluator: &FitnessEvaluator) -> Self {
        let fitness = Some(evaluator.evaluate(&genome));
        Individual { genome, fitness }
    }

    /// Recompute the fitness from the current genome.
    pub fn evaluate(&mut self, evaluator: &FitnessEvaluator) {
        self.fitness = Some(evaluator.evaluate(&self.genome));
    }

    /// Forget the fitness after the genome has been changed.
    pub fn invalidate(&mut self) {
        self.fitness = None;
    }

    pub fn is_evaluated(&self) -> bool {
        self.fitness.is_some()
    }

    /// Fitness used for ranking; unevaluated individuals rank last.
    pub fn rank_key(&self) -> f64 {
        self.fitness.unwrap_or(f64::INFINITY)
    }

    /// Order two individuals from best (lowest fitness) to worst.
    pub fn compare(&self, other: &Individual) -> Ordering {
        self.rank_key()
            .partial_cmp(&other.rank_key())
            .unwrap_or(Ordering::Equal)
    }
}
