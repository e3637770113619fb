use cellsheet_core::{CellContent, CellCoord, CellValue, Formula, Sheet};

use crate::functions;

/// Formula evaluator over a sheet.
///
/// Aggregates read only literal numbers: a formula whose range covers other
/// formula cells skips them instead of evaluating them, so evaluation never
/// recurses and cycles cannot arise.
pub struct Evaluator<'a> {
    sheet: &'a Sheet,
}

impl<'a> Evaluator<'a> {
    pub fn new(sheet: &'a Sheet) -> Self {
        Self { sheet }
    }

    /// Evaluate a parsed formula
    pub fn evaluate(&self, formula: &Formula) -> CellValue {
        if let Some(error) = &formula.error {
            return CellValue::Error(error.clone());
        }

        let values: Vec<f64> = self.sheet.numbers_in_range(formula.range).collect();
        let result = functions::apply(formula.function, &values);

        tracing::trace!(
            function = %formula.function,
            range = %formula.range,
            numeric_cells = values.len(),
            "evaluated formula"
        );
        result
    }

    /// Display value of the cell at `coord`, or `None` for an empty cell
    pub fn evaluate_cell(&self, coord: CellCoord) -> Option<CellValue> {
        let value = match self.sheet.get(coord)? {
            CellContent::Number(n) => CellValue::Number(*n),
            CellContent::Text(s) => CellValue::Text(s.clone()),
            CellContent::Formula(formula) => self.evaluate(formula),
            CellContent::Chart(range) => CellValue::Text(format!("chart({})", range)),
        };
        Some(value)
    }
}

/// Evaluate `formula` against `sheet`
pub fn evaluate_formula(formula: &Formula, sheet: &Sheet) -> CellValue {
    Evaluator::new(sheet).evaluate(formula)
}
