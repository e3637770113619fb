pub mod math;

use cellsheet_core::{CellValue, Function};

/// Fold the numeric cells of a range through a registry function
pub fn apply(function: Function, values: &[f64]) -> CellValue {
    match function {
        Function::Sum => math::sum(values),
        Function::Avg => math::average(values),
        Function::Min => math::min(values),
        Function::Max => math::max(values),
        Function::Count => math::count(values),
    }
}
