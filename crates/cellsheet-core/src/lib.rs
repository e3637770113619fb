pub mod cell;
pub mod chart;
pub mod config;
pub mod error;
pub mod formula;
pub mod range;
pub mod sheet;
pub mod state;

pub use cell::{CellContent, CellValue};
pub use chart::{chart_series, ChartSeries};
pub use config::{ConfigError, GridConfig};
pub use error::CellError;
pub use formula::{Formula, Function, FORMULA_TRIGGER};
pub use range::{col_from_label, col_to_label, CellCoord, CellRange};
pub use sheet::Sheet;
pub use state::{
    key_to_action, ClickOutcome, ClipboardState, Direction, EditState, Effect, InputAction, Key,
    Modifiers, SelectionState, SpreadsheetState,
};
