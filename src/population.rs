//! Population management for the genetic algorithm.

use crate::codec::Dimensions;
use crate::fitness::FitnessEvaluator;
use crate::individual::Individual;
use crate::SearchRng;
use itertools::Itertools;
use rand::Rng;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// One generation of candidate shipment plans.
#[derive(Debug, Clone, Default)]
pub struct Population {
    pub individuals: Vec<Individual>,
}

impl Population {
    /// Create a population from existing individuals.
    pub fn new(individuals: Vec<Individual>) -> Self {
        Population { individuals }
    }

    /// Create `size` unevaluated individuals with genes drawn uniformly from
    /// `[0, upper_bound]`.
    pub fn random(size: usize, dims: Dimensions, upper_bound: f64, rng: &mut SearchRng) -> Self {
        let individuals = (0..size)
            .map(|_| {
                let genome = (0..dims.genome_len())
                    .map(|_| rng.gen_range(0.0..=upper_bound))
                    .collect();
                Individual::new(genome)
            })
            .collect();

        Population { individuals }
    }

    /// Evaluate every individual. Returns only once the whole population is scored.
    pub fn evaluate_all(&mut self, evaluator: &FitnessEvaluator) {
        #[cfg(feature = "parallel")]
        self.individuals
            .par_iter_mut()
            .for_each(|individual| individual.evaluate(evaluator));

        #[cfg(not(feature = "parallel"))]
        for individual in self.individuals.iter_mut() {
            individual.evaluate(evaluator);
        }
    }

    pub fn len(&self) -> usize {
        self.individuals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.individuals.is_empty()
    }

    /// Check that every individual carries a fitness.
    pub fn is_evaluated(&self) -> bool {
        self.individuals.iter().all(Individual::is_evaluated)
    }

    /// The `n` lowest-fitness individuals, best first.
    pub fn best_n(&self, n: usize) -> Vec<&Individual> {
        self.individuals
            .iter()
            .sorted_by(|a, b| a.compare(b))
            .take(n)
            .collect()
    }

    /// The lowest-fitness individual.
    pub fn best(&self) -> Option<&Individual> {
        self.individuals.iter().min_by(|a, b| a.compare(b))
    }

    /// Replace the worst individuals with `elites`, keeping the size unchanged.
    pub fn replace_worst(&mut self, elites: Vec<Individual>) {
        if elites.is_empty() {
            return;
        }
        let keep = self.individuals.len().saturating_sub(elites.len());
        self.individuals.sort_by(|a, b| a.compare(b));
        self.individuals.truncate(keep);
        self.individuals.extend(elites);
    }
}

/// Mean fitness of a group of evaluated individuals, `None` when empty.
pub fn mean_fitness(individuals: &[&Individual]) -> Option<f64> {
    if individuals.is_empty() {
        return None;
    }
    let total: f64 = individuals.iter().map(|i| i.rank_key()).sum();
    Some(total / individuals.len() as f64)
}
