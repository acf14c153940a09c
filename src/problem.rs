//! Problem definition for the warehouse-to-store transportation problem.

use crate::codec::Dimensions;
use crate::error::{ConfigurationError, GaError};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fs;
use std::path::Path;

/// Raw problem input as it appears in a JSON file.
///
/// Maps keep the key order of the file, which fixes the row and column order
/// of the shipment matrix.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProblemInput {
    pub supply: Map<String, Value>,
    pub demand: Map<String, Value>,
    pub costs: Map<String, Value>,
}

/// A validated transportation problem instance.
///
/// Only built through the validating constructors; load files with
/// [`TransportationProblem::from_file`].
#[derive(Debug, Clone, Serialize)]
pub struct TransportationProblem {
    pub warehouses: Vec<String>,
    pub stores: Vec<String>,
    /// Capacity of each warehouse
    pub supply: Vec<f64>,
    /// Requirement of each store
    pub demand: Vec<f64>,
    /// Per-unit cost, `costs[warehouse][store]`
    pub costs: Vec<Vec<f64>>,
    dims: Dimensions,
}

impl TransportationProblem {
    /// Create a problem with generated names `W1..` and `S1..`.
    pub fn new(
        supply: Vec<f64>,
        demand: Vec<f64>,
        costs: Vec<Vec<f64>>,
    ) -> Result<Self, ConfigurationError> {
        let warehouses = (1..=supply.len()).map(|i| format!("W{}", i)).collect();
        let stores = (1..=demand.len()).map(|j| format!("S{}", j)).collect();
        Self::with_names(warehouses, stores, supply, demand, costs)
    }

    /// Create a problem with explicit warehouse and store names.
    pub fn with_names(
        warehouses: Vec<String>,
        stores: Vec<String>,
        supply: Vec<f64>,
        demand: Vec<f64>,
        costs: Vec<Vec<f64>>,
    ) -> Result<Self, ConfigurationError> {
        let dims = Dimensions::new(supply.len(), demand.len())?;

        check_len("warehouse names", supply.len(), warehouses.len())?;
        check_len("store names", demand.len(), stores.len())?;
        check_len("cost matrix", supply.len(), costs.len())?;
        for (name, row) in warehouses.iter().zip(&costs) {
            check_len(&format!("cost row of `{}`", name), demand.len(), row.len())?;
        }

        for (name, &value) in warehouses.iter().zip(&supply) {
            check_value(&format!("supply of `{}`", name), value)?;
        }
        for (name, &value) in stores.iter().zip(&demand) {
            check_value(&format!("demand of `{}`", name), value)?;
        }
        for (warehouse, row) in warehouses.iter().zip(&costs) {
            for (store, &value) in stores.iter().zip(row) {
                check_value(&format!("cost from `{}` to `{}`", warehouse, store), value)?;
            }
        }

        Ok(TransportationProblem {
            warehouses,
            stores,
            supply,
            demand,
            costs,
            dims,
        })
    }

    /// Build a problem from parsed JSON input.
    pub fn from_input(input: &ProblemInput) -> Result<Self, ConfigurationError> {
        let mut warehouses = Vec::with_capacity(input.supply.len());
        let mut supply = Vec::with_capacity(input.supply.len());
        for (name, value) in &input.supply {
            warehouses.push(name.clone());
            supply.push(number(&format!("supply of `{}`", name), value)?);
        }

        let mut stores = Vec::with_capacity(input.demand.len());
        let mut demand = Vec::with_capacity(input.demand.len());
        for (name, value) in &input.demand {
            stores.push(name.clone());
            demand.push(number(&format!("demand of `{}`", name), value)?);
        }

        if let Some(unknown) = input.costs.keys().find(|w| !input.supply.contains_key(*w)) {
            return Err(ConfigurationError::UnknownWarehouse(unknown.clone()));
        }

        let mut costs = Vec::with_capacity(warehouses.len());
        for warehouse in &warehouses {
            let row = input
                .costs
                .get(warehouse)
                .ok_or_else(|| ConfigurationError::MissingWarehouse(warehouse.clone()))?;
            let row = row.as_object().ok_or_else(|| ConfigurationError::InvalidValue {
                what: format!("cost row of `{}`", warehouse),
                value: row.to_string(),
            })?;

            if let Some(unknown) = row.keys().find(|s| !input.demand.contains_key(*s)) {
                return Err(ConfigurationError::UnknownStore {
                    warehouse: warehouse.clone(),
                    store: unknown.clone(),
                });
            }

            let mut cost_row = Vec::with_capacity(stores.len());
            for store in &stores {
                let value = row.get(store).ok_or_else(|| ConfigurationError::MissingStore {
                    warehouse: warehouse.clone(),
                    store: store.clone(),
                })?;
                cost_row.push(number(
                    &format!("cost from `{}` to `{}`", warehouse, store),
                    value,
                )?);
            }
            costs.push(cost_row);
        }

        Self::with_names(warehouses, stores, supply, demand, costs)
    }

    /// Parse a problem from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, GaError> {
        let input: ProblemInput = serde_json::from_str(json)?;
        Ok(Self::from_input(&input)?)
    }

    /// Load a problem from a JSON file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, GaError> {
        let contents = fs::read_to_string(path)?;
        Self::from_json(&contents)
    }

    /// Shape of the shipment matrix.
    pub fn dimensions(&self) -> Dimensions {
        self.dims
    }

    /// Get the number of warehouses.
    pub fn get_warehouse_count(&self) -> usize {
        self.dims.num_warehouses
    }

    /// Get the number of stores.
    pub fn get_store_count(&self) -> usize {
        self.dims.num_stores
    }

    /// Largest single-warehouse supply, the upper bound of every gene.
    pub fn max_supply(&self) -> f64 {
        self.supply.iter().copied().fold(0.0, f64::max)
    }

    /// Sum of all store demands.
    pub fn total_demand(&self) -> f64 {
        self.demand.iter().sum()
    }
}

fn check_len(what: &str, expected: usize, actual: usize) -> Result<(), ConfigurationError> {
    if expected != actual {
        return Err(ConfigurationError::DimensionMismatch {
            what: what.to_string(),
            expected,
            actual,
        });
    }
    Ok(())
}

fn check_value(what: &str, value: f64) -> Result<(), ConfigurationError> {
    if !value.is_finite() || value < 0.0 {
        return Err(ConfigurationError::InvalidValue {
            what: what.to_string(),
            value: value.to_string(),
        });
    }
    Ok(())
}

fn number(what: &str, value: &Value) -> Result<f64, ConfigurationError> {
    value.as_f64().ok_or_else(|| ConfigurationError::InvalidValue {
        what: what.to_string(),
        value: value.to_string(),
    })
}
