use serde::{Deserialize, Serialize};

use super::input::Modifiers;
use crate::config::GridConfig;
use crate::range::{CellCoord, CellRange};

/// Arrow-key direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// Step one cell from `from`, staying on the grid
    pub fn step(self, from: CellCoord, config: &GridConfig) -> Option<CellCoord> {
        let target = match self {
            Direction::Up => CellCoord::new(from.row.checked_sub(1)?, from.col),
            Direction::Down => CellCoord::new(from.row.checked_add(1)?, from.col),
            Direction::Left => CellCoord::new(from.row, from.col.checked_sub(1)?),
            Direction::Right => CellCoord::new(from.row, from.col.checked_add(1)?),
        };
        config.contains(target).then_some(target)
    }
}

/// What a click did to the selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum ClickOutcome {
    /// A fresh single-cell selection
    Selected { range: CellRange },
    /// Shift-click grew the existing selection
    Extended { range: CellRange },
    /// Click landed inside the selection: the cell opens for editing
    StartEdit { coord: CellCoord },
}

/// The active rectangle, if any
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectionState {
    range: Option<CellRange>,
}

impl SelectionState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn range(&self) -> Option<CellRange> {
        self.range
    }

    pub fn is_selected(&self, pos: CellCoord) -> bool {
        self.range.is_some_and(|r| r.contains(pos))
    }

    pub fn select_cell(&mut self, pos: CellCoord) -> CellRange {
        let range = CellRange::single(pos);
        self.range = Some(range);
        range
    }

    /// Grow the selection to cover `pos`; selects `pos` alone if nothing was selected
    pub fn extend_to(&mut self, pos: CellCoord) -> CellRange {
        let range = match self.range {
            Some(current) => current.extend(pos),
            None => CellRange::single(pos),
        };
        self.range = Some(range);
        range
    }

    pub fn clear(&mut self) {
        self.range = None;
    }

    /// Handle a mouse click with the modifier keys held at that moment
    pub fn click(&mut self, pos: CellCoord, modifiers: Modifiers) -> ClickOutcome {
        match self.range {
            Some(current) if current.contains(pos) => {
                self.range = None;
                ClickOutcome::StartEdit { coord: pos }
            }
            Some(_) if modifiers.shift => ClickOutcome::Extended {
                range: self.extend_to(pos),
            },
            _ => ClickOutcome::Selected {
                range: self.select_cell(pos),
            },
        }
    }

    /// Move from the selection's bottom-right corner one cell in `direction`.
    ///
    /// With shift held the selection grows instead. Returns `None` and leaves
    /// the selection alone when nothing is selected or the step leaves the grid.
    pub fn move_cursor(
        &mut self,
        direction: Direction,
        modifiers: Modifiers,
        config: &GridConfig,
    ) -> Option<CellRange> {
        let current = self.range?;
        let target = direction.step(current.end, config)?;

        Some(if modifiers.shift {
            self.extend_to(target)
        } else {
            self.select_cell(target)
        })
    }
}
