//! Final report of an optimizer run.

use crate::codec::{decode, ShipmentMatrix};
use crate::fitness::FitnessEvaluator;
use crate::problem::TransportationProblem;
use crate::state::BestEntry;
use crate::utils::format_duration;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

/// How a run came to an end.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Termination {
    /// No improvement for the stagnation threshold
    Stagnation,
    /// The generation cap was reached
    GenerationCap,
}

/// The best-ever shipment plan and how it scores.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OptimizationResult {
    pub warehouses: Vec<String>,
    pub stores: Vec<String>,
    /// Decoded best-ever genome
    pub shipments: ShipmentMatrix,
    pub fitness: f64,
    pub transport_cost: f64,
    /// Excess shipped beyond each warehouse's capacity
    pub supply_violations: Vec<f64>,
    /// Shortfall below each store's requirement
    pub demand_violations: Vec<f64>,
    pub is_feasible: bool,
    /// Generation that produced the best-ever individual
    pub found_at_generation: usize,
    /// Last generation that was run
    pub generations_run: usize,
    pub termination: Termination,
    pub runtime: Duration,
}

impl OptimizationResult {
    /// Decode and score the best-ever entry of a finished run.
    pub fn from_best(
        problem: &TransportationProblem,
        evaluator: &FitnessEvaluator,
        best: &BestEntry,
        generations_run: usize,
        termination: Termination,
        runtime: Duration,
    ) -> Self {
        let genome = &best.individual.genome;
        let evaluation = evaluator.breakdown(genome);

        OptimizationResult {
            warehouses: problem.warehouses.clone(),
            stores: problem.stores.clone(),
            shipments: decode(genome, problem.dimensions()),
            fitness: evaluation.fitness,
            transport_cost: evaluation.transport_cost,
            supply_violations: evaluation.supply_violations,
            demand_violations: evaluation.demand_violations,
            is_feasible: evaluation.is_feasible,
            found_at_generation: best.generation,
            generations_run,
            termination,
            runtime,
        }
    }

    /// Sum of all capacity and demand violations.
    pub fn total_violation(&self) -> f64 {
        self.supply_violations.iter().sum::<f64>() + self.demand_violations.iter().sum::<f64>()
    }
}

impl fmt::Display for OptimizationResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Optimal Transportation Plan reached in generation {}:",
            self.found_at_generation
        )?;

        write!(f, "{:>12}", "")?;
        for store in &self.stores {
            write!(f, " {:>10}", store)?;
        }
        writeln!(f)?;
        for (warehouse, row) in self.warehouses.iter().zip(&self.shipments) {
            write!(f, "{:>12}", warehouse)?;
            for quantity in row {
                write!(f, " {:>10.2}", quantity)?;
            }
            writeln!(f)?;
        }

        writeln!(f, "Total Cost: {:.2}", self.transport_cost)?;
        writeln!(f, "Fitness: {:.2}", self.fitness)?;
        writeln!(f, "Supply Violations: {:?}", self.supply_violations)?;
        writeln!(f, "Demand Violations: {:?}", self.demand_violations)?;
        writeln!(f, "Feasible: {}", self.is_feasible)?;
        writeln!(
            f,
            "Generations: {} ({:?})",
            self.generations_run, self.termination
        )?;
        write!(f, "Runtime: {}", format_duration(self.runtime))
    }
}
