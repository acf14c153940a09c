//! Error types for problem loading, configuration and running the search.

use thiserror::Error;

/// A malformed or inconsistent problem definition or run configuration.
///
/// Always raised before the first generation runs.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigurationError {
    #[error("problem must have at least one {0}")]
    EmptyDimension(&'static str),
    #[error("{what} has length {actual}, expected {expected}")]
    DimensionMismatch {
        what: String,
        expected: usize,
        actual: usize,
    },
    #[error("warehouse `{0}` has no cost row")]
    MissingWarehouse(String),
    #[error("warehouse `{warehouse}` has no cost for store `{store}`")]
    MissingStore { warehouse: String, store: String },
    #[error("cost table references unknown warehouse `{0}`")]
    UnknownWarehouse(String),
    #[error("cost row of `{warehouse}` references unknown store `{store}`")]
    UnknownStore { warehouse: String, store: String },
    #[error("{what} must be a finite non-negative number, got {value}")]
    InvalidValue { what: String, value: String },
    #[error("invalid parameter `{name}`: {reason}")]
    InvalidParameter { name: &'static str, reason: String },
    #[error("variation produced {actual} individuals, population size is {expected}")]
    PopulationShortfall { expected: usize, actual: usize },
}

/// Any failure surfaced by the optimizer or its input/output helpers.
#[derive(Debug, Error)]
pub enum GaError {
    #[error(transparent)]
    Configuration(#[from] ConfigurationError),
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("run finished without evaluating any individual")]
    NoSolution,
}
