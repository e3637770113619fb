pub mod clipboard;
pub mod edit;
pub mod input;
pub mod selection;

pub use clipboard::{ClipboardData, ClipboardMode, ClipboardState};
pub use edit::EditState;
pub use input::{key_to_action, InputAction, Key, Modifiers};
pub use selection::{ClickOutcome, Direction, SelectionState};

use serde::{Deserialize, Serialize};

use crate::config::GridConfig;
use crate::range::{CellCoord, CellRange};

/// Store change an input asks for. The caller owns the sheet and applies it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum Effect {
    None,
    /// Selection changed; redraw only
    Redraw,
    /// Empty every cell in the range
    Clear { range: CellRange },
    /// Copy `source` to `anchor`; a cut also empties the source first
    Paste {
        source: CellRange,
        anchor: CellCoord,
        cut: bool,
    },
    /// Parse and store the typed input
    Commit { coord: CellCoord, input: String },
}

/// Interactive session state: selection, edit buffer and clipboard
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpreadsheetState {
    pub selection: SelectionState,
    pub edit: EditState,
    pub clipboard: ClipboardState,
}

impl SpreadsheetState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Handle a click. `current_input` supplies the editable text when the
    /// click opens a cell for editing.
    pub fn click(
        &mut self,
        pos: CellCoord,
        modifiers: Modifiers,
        current_input: impl FnOnce(CellCoord) -> String,
    ) -> ClickOutcome {
        let outcome = self.selection.click(pos, modifiers);
        if let ClickOutcome::StartEdit { coord } = outcome {
            self.edit.start(coord, current_input(coord));
        }
        outcome
    }

    /// Handle a user input action and report what must happen to the sheet
    pub fn handle_action(&mut self, action: InputAction, config: &GridConfig) -> Effect {
        match action {
            InputAction::Move(direction) => redraw_if(
                self.selection
                    .move_cursor(direction, Modifiers::new(), config)
                    .is_some(),
            ),
            InputAction::Extend(direction) => redraw_if(
                self.selection
                    .move_cursor(direction, Modifiers::new().with_shift(true), config)
                    .is_some(),
            ),
            InputAction::Cancel => {
                if self.edit.is_editing() {
                    self.edit.cancel();
                } else {
                    self.selection.clear();
                }
                Effect::Redraw
            }
            InputAction::ConfirmEdit => self.commit_edit(),
            InputAction::Delete => match self.selection.range() {
                Some(range) => Effect::Clear { range },
                None => Effect::None,
            },
            InputAction::Copy => {
                if let Some(range) = self.selection.range() {
                    self.clipboard.copy(range);
                }
                Effect::None
            }
            InputAction::Cut => {
                if let Some(range) = self.selection.range() {
                    self.clipboard.cut(range);
                }
                Effect::None
            }
            InputAction::Paste => self.paste(),
            InputAction::None => Effect::None,
        }
    }

    /// Close the editor, asking for its text to be stored
    pub fn commit_edit(&mut self) -> Effect {
        match self.edit.commit() {
            Some((coord, input)) => Effect::Commit { coord, input },
            None => Effect::None,
        }
    }

    fn paste(&mut self) -> Effect {
        let (Some(data), Some(target)) = (self.clipboard.contents(), self.selection.range()) else {
            return Effect::None;
        };
        self.clipboard.clear_if_cut();
        Effect::Paste {
            source: data.range,
            anchor: target.start,
            cut: data.mode == ClipboardMode::Cut,
        }
    }

    pub fn is_editing(&self) -> bool {
        self.edit.is_editing()
    }
}

fn redraw_if(changed: bool) -> Effect {
    if changed {
        Effect::Redraw
    } else {
        Effect::None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state_with_selection(range: CellRange) -> SpreadsheetState {
        let mut state = SpreadsheetState::new();
        state.selection.select_cell(range.start);
        state.selection.extend_to(range.end);
        state
    }

    #[test]
    fn test_click_into_selection_opens_editor() {
        let mut state = SpreadsheetState::new();
        let pos = CellCoord::new(0, 0);
        state.click(pos, Modifiers::new(), |_| unreachable!());

        let outcome = state.click(pos, Modifiers::new(), |_| "42".to_string());
        assert_eq!(outcome, ClickOutcome::StartEdit { coord: pos });
        assert_eq!(state.edit.content(), Some("42"));
        assert!(state.is_editing());
    }

    #[test]
    fn test_confirm_edit_commits() {
        let mut state = SpreadsheetState::new();
        state.edit.start(CellCoord::new(1, 1), "hello".to_string());

        let effect = state.handle_action(InputAction::ConfirmEdit, &GridConfig::default());
        assert_eq!(
            effect,
            Effect::Commit { coord: CellCoord::new(1, 1), input: "hello".to_string() }
        );
        assert!(!state.is_editing());
    }

    #[test]
    fn test_escape_cancels_edit_then_selection() {
        let config = GridConfig::default();
        let mut state = state_with_selection(CellRange::single(CellCoord::new(0, 0)));
        state.edit.start(CellCoord::new(5, 5), String::new());

        state.handle_action(InputAction::Cancel, &config);
        assert!(!state.is_editing());
        assert!(state.selection.range().is_some());

        state.handle_action(InputAction::Cancel, &config);
        assert!(state.selection.range().is_none());
    }

    #[test]
    fn test_delete_clears_selection_range() {
        let range = CellRange::new(CellCoord::new(0, 0), CellCoord::new(2, 1));
        let mut state = state_with_selection(range);
        assert_eq!(
            state.handle_action(InputAction::Delete, &GridConfig::default()),
            Effect::Clear { range }
        );
        assert_eq!(
            SpreadsheetState::new().handle_action(InputAction::Delete, &GridConfig::default()),
            Effect::None
        );
    }

    #[test]
    fn test_copy_then_paste_at_selection() {
        let config = GridConfig::default();
        let source = CellRange::new(CellCoord::new(0, 0), CellCoord::new(1, 1));
        let mut state = state_with_selection(source);

        state.handle_action(InputAction::Copy, &config);
        state.selection.select_cell(CellCoord::new(2, 2));

        let effect = state.handle_action(InputAction::Paste, &config);
        assert_eq!(
            effect,
            Effect::Paste { source, anchor: CellCoord::new(2, 2), cut: false }
        );
        // Copies can be pasted again
        assert!(!state.clipboard.is_empty());
    }

    #[test]
    fn test_cut_pastes_once() {
        let config = GridConfig::default();
        let source = CellRange::single(CellCoord::new(0, 0));
        let mut state = state_with_selection(source);

        state.handle_action(InputAction::Cut, &config);
        state.selection.select_cell(CellCoord::new(4, 4));

        assert!(matches!(
            state.handle_action(InputAction::Paste, &config),
            Effect::Paste { cut: true, .. }
        ));
        assert_eq!(state.handle_action(InputAction::Paste, &config), Effect::None);
    }

    #[test]
    fn test_arrow_moves_report_redraw() {
        let config = GridConfig::new(2, 2).unwrap();
        let mut state = state_with_selection(CellRange::single(CellCoord::new(0, 0)));

        let right = InputAction::Move(Direction::Right);
        assert_eq!(state.handle_action(right, &config), Effect::Redraw);
        assert_eq!(state.handle_action(right, &config), Effect::None);
        assert_eq!(
            state.selection.range(),
            Some(CellRange::single(CellCoord::new(0, 1)))
        );
    }
}
