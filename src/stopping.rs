//! Stagnation-based early termination.

use crate::state::RunState;
use log::info;

/// Upper limit on the stagnation threshold, in generations.
pub const MAX_STAGNATION_GENERATIONS: usize = 5000;

/// Stops a run once the best-ever individual has not changed for too long.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StoppingPolicy {
    threshold: usize,
}

impl StoppingPolicy {
    /// Derive the threshold `min(5000, round(total_generations / 4))`, rounding
    /// halves to even.
    pub fn new(total_generations: usize) -> Self {
        let quarter = (total_generations as f64 / 4.0).round_ties_even() as usize;
        StoppingPolicy {
            threshold: quarter.min(MAX_STAGNATION_GENERATIONS),
        }
    }

    /// Number of generations without improvement that ends a run.
    pub fn threshold(&self) -> usize {
        self.threshold
    }

    /// Decide whether the run has stagnated.
    pub fn stagnated(&self, current_generation: usize, best_generation: usize) -> bool {
        current_generation.saturating_sub(best_generation) >= self.threshold
    }

    /// Check the run state after the tracker has observed the current generation.
    pub fn should_stop(&self, state: &RunState) -> bool {
        let stop = self.stagnated(state.generation, state.best_generation());
        if stop {
            info!(
                "Stopping at generation {} because the solution has not improved in at least {} generations",
                state.generation, self.threshold
            );
        }
        stop
    }
}
