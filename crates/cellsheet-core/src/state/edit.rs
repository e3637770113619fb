use serde::{Deserialize, Serialize};

use crate::range::CellCoord;

/// The cell currently open for editing and its input buffer
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EditState {
    editing: Option<(CellCoord, String)>,
}

impl EditState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start editing a cell, pre-filled with its current input
    pub fn start(&mut self, position: CellCoord, initial_content: String) {
        self.editing = Some((position, initial_content));
    }

    /// Replace the buffer. Returns false when nothing is being edited.
    pub fn update(&mut self, content: impl Into<String>) -> bool {
        match &mut self.editing {
            Some((_, buffer)) => {
                *buffer = content.into();
                true
            }
            None => false,
        }
    }

    /// Finish editing and hand back the position and typed text
    pub fn commit(&mut self) -> Option<(CellCoord, String)> {
        self.editing.take()
    }

    pub fn cancel(&mut self) {
        self.editing = None;
    }

    pub fn is_editing(&self) -> bool {
        self.editing.is_some()
    }

    pub fn position(&self) -> Option<CellCoord> {
        self.editing.as_ref().map(|(pos, _)| *pos)
    }

    pub fn content(&self) -> Option<&str> {
        self.editing.as_ref().map(|(_, buffer)| buffer.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_edit_cycle() {
        let mut edit = EditState::new();
        assert!(!edit.update("ignored"));

        edit.start(CellCoord::new(1, 2), "3".to_string());
        assert!(edit.is_editing());
        assert_eq!(edit.content(), Some("3"));

        assert!(edit.update("=sum(A1:A3)"));
        assert_eq!(
            edit.commit(),
            Some((CellCoord::new(1, 2), "=sum(A1:A3)".to_string()))
        );
        assert!(!edit.is_editing());
        assert_eq!(edit.commit(), None);
    }

    #[test]
    fn test_cancel() {
        let mut edit = EditState::new();
        edit.start(CellCoord::new(0, 0), String::new());
        edit.cancel();
        assert_eq!(edit.position(), None);
    }
}
