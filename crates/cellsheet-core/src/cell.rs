use serde::{Deserialize, Serialize};

use crate::error::CellError;
use crate::formula::Formula;
use crate::range::CellRange;

/// What a cell holds. An empty cell is simply absent from the sheet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value")]
pub enum CellContent {
    Number(f64),
    Text(String),
    Formula(Formula),
    /// Line chart over a range; never takes part in arithmetic
    Chart(CellRange),
}

impl CellContent {
    /// The numeric value, if this is a plain number.
    ///
    /// Formulas are not resolved here: aggregates only fold literal leaves.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            CellContent::Number(n) => Some(*n),
            CellContent::Text(_) | CellContent::Formula(_) | CellContent::Chart(_) => None,
        }
    }

    /// Check if this is a formula
    pub fn is_formula(&self) -> bool {
        matches!(self, CellContent::Formula(_))
    }

    pub fn as_formula(&self) -> Option<&Formula> {
        match self {
            CellContent::Formula(formula) => Some(formula),
            _ => None,
        }
    }

    /// Get the original user input string for editing
    pub fn original_input(&self) -> String {
        match self {
            CellContent::Number(n) => format_number(*n),
            CellContent::Text(s) => s.clone(),
            CellContent::Formula(formula) => formula.source.clone(),
            CellContent::Chart(range) => range.to_a1(),
        }
    }
}

/// A value ready for display: the result of reading or evaluating a cell
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value")]
pub enum CellValue {
    Number(f64),
    Text(String),
    Error(CellError),
}

impl CellValue {
    /// Try to get the value as a number
    pub fn as_number(&self) -> Option<f64> {
        match self {
            CellValue::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, CellValue::Error(_))
    }

    /// Text shown in the grid
    pub fn as_text(&self) -> String {
        match self {
            CellValue::Number(n) => format_number(*n),
            CellValue::Text(s) => s.clone(),
            CellValue::Error(e) => e.to_string(),
        }
    }
}

fn format_number(n: f64) -> String {
    if n.fract() == 0.0 && n.abs() < 1e15 {
        format!("{}", n as i64)
    } else {
        format!("{}", n)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::formula::Function;
    use crate::range::CellCoord;

    #[test]
    fn test_content_as_number() {
        assert_eq!(CellContent::Number(42.0).as_number(), Some(42.0));
        assert_eq!(CellContent::Text("123".to_string()).as_number(), None);

        let range = CellRange::single(CellCoord::new(0, 0));
        assert_eq!(CellContent::Chart(range).as_number(), None);
        let formula = Formula::new(Function::Sum, range, "=sum(A1:A1)");
        assert_eq!(CellContent::Formula(formula).as_number(), None);
    }

    #[test]
    fn test_value_as_text() {
        assert_eq!(CellValue::Number(42.0).as_text(), "42");
        assert_eq!(CellValue::Number(2.5).as_text(), "2.5");
        assert_eq!(CellValue::Text("hello".to_string()).as_text(), "hello");
        assert_eq!(
            CellValue::Error(CellError::EmptyAggregate(Function::Avg)).as_text(),
            "DIV0"
        );
    }

    #[test]
    fn test_original_input() {
        assert_eq!(CellContent::Number(3.0).original_input(), "3");
        assert_eq!(CellContent::Number(0.25).original_input(), "0.25");
        assert_eq!(CellContent::Text(" padded ".into()).original_input(), " padded ");

        let range = CellRange::new(CellCoord::new(0, 0), CellCoord::new(4, 1));
        assert_eq!(CellContent::Chart(range).original_input(), "A1:B5");
        let formula = Formula::new(Function::Max, range, "=max(A1:B5)");
        assert_eq!(CellContent::Formula(formula).original_input(), "=max(A1:B5)");
    }
}
