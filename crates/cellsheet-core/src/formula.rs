use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::CellError;
use crate::range::{CellCoord, CellRange};

/// Trigger character that marks cell input as a formula
pub const FORMULA_TRIGGER: char = '=';

/// Registry of range-aggregate functions a formula may name
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Function {
    Sum,
    Avg,
    Min,
    Max,
    Count,
}

impl Function {
    pub const ALL: [Function; 5] = [
        Function::Sum,
        Function::Avg,
        Function::Min,
        Function::Max,
        Function::Count,
    ];

    /// Look up a function by its formula name. Matching is case-sensitive.
    pub fn from_name(name: &str) -> Option<Self> {
        Function::ALL.into_iter().find(|f| f.name() == name)
    }

    pub fn name(&self) -> &'static str {
        match self {
            Function::Sum => "sum",
            Function::Avg => "avg",
            Function::Min => "min",
            Function::Max => "max",
            Function::Count => "count",
        }
    }

    /// Text shown when the function has nothing numeric to fold
    pub fn empty_marker(&self) -> &'static str {
        match self {
            Function::Avg => "DIV0",
            Function::Sum | Function::Min | Function::Max | Function::Count => "N/A",
        }
    }
}

impl fmt::Display for Function {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A parsed aggregate formula such as `=sum(A1:B4)`.
///
/// A formula that failed to parse keeps its source text and carries the
/// error, which evaluation returns instead of a value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Formula {
    pub function: Function,
    pub range: CellRange,
    /// Original input, kept for re-editing
    pub source: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<CellError>,
}

impl Formula {
    pub fn new(function: Function, range: CellRange, source: impl Into<String>) -> Self {
        Formula {
            function,
            range,
            source: source.into(),
            error: None,
        }
    }

    /// A formula in error state over the default `A1:A1` range
    pub fn invalid(source: impl Into<String>, error: CellError) -> Self {
        Formula {
            function: Function::Sum,
            range: CellRange::single(CellCoord::new(0, 0)),
            source: source.into(),
            error: Some(error),
        }
    }

    pub fn is_error(&self) -> bool {
        self.error.is_some()
    }
}
