//! Conversion between flat genomes and warehouse x store shipment matrices.

use crate::error::ConfigurationError;
use serde::{Deserialize, Serialize};

/// A flat, row-major encoding of a shipment plan.
pub type Genome = Vec<f64>;

/// `matrix[i][j]` is the quantity shipped from warehouse `i` to store `j`.
pub type ShipmentMatrix = Vec<Vec<f64>>;

/// Shape of the shipment matrix, fixed for the duration of a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dimensions {
    pub num_warehouses: usize,
    pub num_stores: usize,
}

impl Dimensions {
    /// Create the dimensions, rejecting empty warehouse or store sets.
    pub fn new(num_warehouses: usize, num_stores: usize) -> Result<Self, ConfigurationError> {
        if num_warehouses == 0 {
            return Err(ConfigurationError::EmptyDimension("warehouse"));
        }
        if num_stores == 0 {
            return Err(ConfigurationError::EmptyDimension("store"));
        }
        Ok(Dimensions {
            num_warehouses,
            num_stores,
        })
    }

    /// Number of genes in a genome of this shape.
    pub fn genome_len(&self) -> usize {
        self.num_warehouses * self.num_stores
    }

    /// Flat index of the route from `warehouse` to `store`.
    pub fn index(&self, warehouse: usize, store: usize) -> usize {
        warehouse * self.num_stores + store
    }
}

/// Flatten a shipment matrix, warehouse by warehouse.
pub fn encode(matrix: &[Vec<f64>]) -> Genome {
    matrix.iter().flatten().copied().collect()
}

/// Reshape a genome into `num_warehouses` rows of `num_stores` quantities.
pub fn decode(genome: &[f64], dims: Dimensions) -> ShipmentMatrix {
    genome
        .chunks(dims.num_stores)
        .take(dims.num_warehouses)
        .map(|row| row.to_vec())
        .collect()
}
