//! Penalty-based fitness of shipment plans.

use crate::codec::{decode, Dimensions};
use crate::problem::TransportationProblem;
use serde::{Deserialize, Serialize};

/// Total violation at or below which a plan counts as feasible.
pub const FEASIBILITY_TOLERANCE: f64 = 1e-10;

/// Default fitness cost per unit of violated capacity or demand.
pub const DEFAULT_PENALTY_WEIGHT: f64 = 1000.0;

/// Detailed evaluation of a single shipment plan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Evaluation {
    /// Σ quantity * unit cost over all routes
    pub transport_cost: f64,
    /// Excess shipped beyond each warehouse's capacity
    pub supply_violations: Vec<f64>,
    /// Shortfall below each store's requirement
    pub demand_violations: Vec<f64>,
    /// Transport cost plus weighted violations
    pub fitness: f64,
    pub is_feasible: bool,
}

impl Evaluation {
    /// Sum of all capacity and demand violations.
    pub fn total_violation(&self) -> f64 {
        self.supply_violations.iter().sum::<f64>() + self.demand_violations.iter().sum::<f64>()
    }
}

/// Scores genomes against a fixed problem. Lower is better.
#[derive(Debug, Clone)]
pub struct FitnessEvaluator {
    supply: Vec<f64>,
    demand: Vec<f64>,
    costs: Vec<Vec<f64>>,
    dims: Dimensions,
    penalty_weight: f64,
}

impl FitnessEvaluator {
    /// Create an evaluator for the given problem.
    pub fn new(problem: &TransportationProblem, penalty_weight: f64) -> Self {
        FitnessEvaluator {
            supply: problem.supply.clone(),
            demand: problem.demand.clone(),
            costs: problem.costs.clone(),
            dims: problem.dimensions(),
            penalty_weight,
        }
    }

    pub fn dimensions(&self) -> Dimensions {
        self.dims
    }

    pub fn penalty_weight(&self) -> f64 {
        self.penalty_weight
    }

    /// Compute the scalar fitness of a genome.
    ///
    /// The genome must hold exactly `dimensions().genome_len()` values.
    pub fn evaluate(&self, genome: &[f64]) -> f64 {
        debug_assert_eq!(genome.len(), self.dims.genome_len(), "genome length");
        let mut transport_cost = 0.0;
        let mut supply_violation = 0.0;
        let mut store_totals = vec![0.0; self.dims.num_stores];

        for (i, row) in genome.chunks(self.dims.num_stores).enumerate() {
            let mut shipped = 0.0;
            for (j, &quantity) in row.iter().enumerate() {
                transport_cost += quantity * self.costs[i][j];
                shipped += quantity;
                store_totals[j] += quantity;
            }
            supply_violation += (shipped - self.supply[i]).max(0.0);
        }

        let demand_violation: f64 = self
            .demand
            .iter()
            .zip(&store_totals)
            .map(|(&required, &received)| (required - received).max(0.0))
            .sum();

        transport_cost + self.penalty_weight * (supply_violation + demand_violation)
    }

    /// Evaluate a genome and keep every component of the score.
    pub fn breakdown(&self, genome: &[f64]) -> Evaluation {
        debug_assert_eq!(genome.len(), self.dims.genome_len(), "genome length");
        let matrix = decode(genome, self.dims);

        let transport_cost = matrix
            .iter()
            .zip(&self.costs)
            .flat_map(|(row, cost_row)| row.iter().zip(cost_row).map(|(q, c)| q * c))
            .sum();

        let supply_violations = matrix
            .iter()
            .zip(&self.supply)
            .map(|(row, &capacity)| (row.iter().sum::<f64>() - capacity).max(0.0))
            .collect();

        let demand_violations = (0..self.dims.num_stores)
            .map(|j| {
                let received: f64 = matrix.iter().map(|row| row[j]).sum();
                (self.demand[j] - received).max(0.0)
            })
            .collect();

        let mut evaluation = Evaluation {
            transport_cost,
            supply_violations,
            demand_violations,
            fitness: 0.0,
            is_feasible: false,
        };
        let violation = evaluation.total_violation();
        evaluation.fitness = transport_cost + self.penalty_weight * violation;
        evaluation.is_feasible = violation <= FEASIBILITY_TOLERANCE;
        evaluation
    }
}
