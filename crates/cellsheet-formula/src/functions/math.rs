use cellsheet_core::{CellError, CellValue, Function};

/// SUM - Sum all numeric values; 0 for an empty range
pub fn sum(values: &[f64]) -> CellValue {
    CellValue::Number(values.iter().sum())
}

/// AVG - Average of numeric values
pub fn average(values: &[f64]) -> CellValue {
    if values.is_empty() {
        return CellValue::Error(CellError::EmptyAggregate(Function::Avg));
    }

    let total: f64 = values.iter().sum();
    CellValue::Number(total / values.len() as f64)
}

/// MIN - Minimum numeric value
pub fn min(values: &[f64]) -> CellValue {
    match values.iter().copied().reduce(f64::min) {
        Some(n) => CellValue::Number(n),
        None => CellValue::Error(CellError::EmptyAggregate(Function::Min)),
    }
}

/// MAX - Maximum numeric value
pub fn max(values: &[f64]) -> CellValue {
    match values.iter().copied().reduce(f64::max) {
        Some(n) => CellValue::Number(n),
        None => CellValue::Error(CellError::EmptyAggregate(Function::Max)),
    }
}

/// COUNT - Count numeric values
pub fn count(values: &[f64]) -> CellValue {
    CellValue::Number(values.len() as f64)
}
