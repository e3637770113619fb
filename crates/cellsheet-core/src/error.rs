use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::formula::Function;

/// Errors a cell can display.
///
/// These are carried as data: a parsed formula stores one and evaluation
/// renders it as the cell's visible text. The `Display` output is exactly the
/// string the grid shows.
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "detail")]
pub enum CellError {
    /// Reference text did not match `LETTERS DIGITS`
    #[error("Invalid Reference")]
    InvalidReference(String),

    /// Formula names a function outside the registry
    #[error("Unknown Function")]
    UnknownFunction(String),

    /// Aggregate with no numeric cell to fold
    #[error("{}", .0.empty_marker())]
    EmptyAggregate(Function),
}

impl CellError {
    /// Short machine-readable code for the JS side
    pub fn code(&self) -> &'static str {
        match self {
            CellError::InvalidReference(_) => "INVALID_REFERENCE",
            CellError::UnknownFunction(_) => "UNKNOWN_FUNCTION",
            CellError::EmptyAggregate(_) => "EMPTY_AGGREGATE",
        }
    }
}
