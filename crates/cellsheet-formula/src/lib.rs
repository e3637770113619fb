pub mod evaluator;
pub mod functions;
pub mod input;
pub mod parser;

pub use evaluator::{evaluate_formula, Evaluator};
pub use input::parse_cell_input;
pub use parser::parse_formula;
