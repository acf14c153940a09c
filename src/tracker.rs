//! Per-generation statistics and best-ever bookkeeping.

use crate::error::ConfigurationError;
use crate::plot::FitnessPlot;
use crate::population::{mean_fitness, Population};
use crate::state::{BestEntry, GenerationRecord, RunState};
use log::{debug, info, warn};

/// Number of summary lines logged over a full run.
const REPORTS_PER_RUN: usize = 100;
/// Number of plots written over a full run.
const PLOTS_PER_RUN: usize = 10;

/// Records the elites of each generation and keeps the best-ever individual.
#[derive(Debug, Clone)]
pub struct EliteTracker {
    elite_count: usize,
    total_generations: usize,
    plot: Option<FitnessPlot>,
}

impl EliteTracker {
    pub fn new(elite_count: usize, total_generations: usize) -> Result<Self, ConfigurationError> {
        if elite_count == 0 {
            return Err(ConfigurationError::InvalidParameter {
                name: "elite_retention_count",
                reason: "must be at least 1".to_string(),
            });
        }
        Ok(EliteTracker {
            elite_count,
            total_generations,
            plot: None,
        })
    }

    /// Write fitness history plots at the plotting cadence.
    pub fn with_plot(mut self, plot: FitnessPlot) -> Self {
        self.plot = Some(plot);
        self
    }

    pub fn elite_count(&self) -> usize {
        self.elite_count
    }

    /// Record the generation in `state` and update the best-ever entry.
    ///
    /// Returns `true` when the best-ever individual was replaced. A tie with
    /// the current best keeps the older entry.
    pub fn observe(&self, state: &mut RunState, population: &Population) -> bool {
        let elites = population.best_n(self.elite_count);
        let (Some(&best_in_generation), Some(avg_top_n_fitness)) =
            (elites.first(), mean_fitness(&elites))
        else {
            return false;
        };

        let improved = state
            .best_fitness()
            .map_or(true, |best| best_in_generation.rank_key() < best);
        if improved {
            debug!(
                "New best fitness {:.2} at generation {}",
                best_in_generation.rank_key(),
                state.generation
            );
            state.best = Some(BestEntry {
                individual: best_in_generation.clone(),
                generation: state.generation,
            });
        }

        let best_ever = match &state.best {
            Some(entry) => entry.individual.clone(),
            None => best_in_generation.clone(),
        };
        state.history.push(GenerationRecord {
            generation: state.generation,
            best_in_generation: best_in_generation.clone(),
            best_ever,
            avg_top_n_fitness,
        });

        if self.should_report(state.generation) {
            if let Some(line) = self.summary(state) {
                info!("{}", line);
            }
        }
        if self.should_plot(state.generation) {
            self.plot_history(state);
        }

        improved
    }

    /// Summary of the latest generation next to the best-ever fitness.
    pub fn summary(&self, state: &RunState) -> Option<String> {
        let record = state.last_record()?;
        let best = state.best.as_ref()?;
        Some(format!(
            "Best fitness from [{}]: {} (avg top n fitness: {}) | Best fitness so far[{}]: {}",
            record.generation,
            record.best_in_generation.rank_key(),
            record.avg_top_n_fitness,
            best.generation,
            best.fitness()
        ))
    }

    /// Check whether a summary line is due for this generation.
    pub fn should_report(&self, generation: usize) -> bool {
        self.is_nth_generation(generation, REPORTS_PER_RUN)
    }

    /// Check whether a plot is due for this generation.
    pub fn should_plot(&self, generation: usize) -> bool {
        self.is_nth_generation(generation, PLOTS_PER_RUN)
    }

    fn is_last_generation(&self, generation: usize) -> bool {
        generation + 1 == self.total_generations
    }

    /// `generation` is a multiple of the fractional step `total / n`.
    fn is_nth_generation(&self, generation: usize, n: usize) -> bool {
        self.total_generations > n
            && (generation * n % self.total_generations == 0
                || self.is_last_generation(generation))
    }

    fn plot_history(&self, state: &RunState) {
        let Some(plot) = &self.plot else {
            return;
        };
        match plot.render(&state.history, state.generation) {
            Ok(path) => info!("Fitness plot written to {}", path.display()),
            Err(e) => warn!("Could not plot fitness history: {}", e),
        }
    }
}
