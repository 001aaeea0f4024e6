//! Input validation errors.

/// Raised when a caller-supplied input violates an engine precondition.
///
/// This is the only error class: once an engine has been constructed,
/// every run is closed-form arithmetic with no recoverable failure path.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum InvalidInput {
    /// The distance matrix has no rows.
    #[error("distance matrix is empty")]
    EmptyMatrix,

    /// Fewer than two cities.
    #[error("at least 2 cities are required, got {n}")]
    TooFewCities { n: usize },

    /// A row length differs from the number of rows.
    #[error("distance matrix is not square: row {row} has {len} entries, expected {expected}")]
    NotSquare {
        row: usize,
        len: usize,
        expected: usize,
    },

    /// A distance is negative or non-finite, or zero between distinct cities.
    #[error("invalid distance {value} from city {from} to city {to}")]
    InvalidDistance { from: usize, to: usize, value: f64 },

    /// An algorithm parameter is out of range.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}
