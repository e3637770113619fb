use serde::{Deserialize, Serialize};

use crate::range::CellRange;

/// Whether the clipboard range is copied or moved on paste
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ClipboardMode {
    Copy,
    Cut,
}

/// Represents clipboard data
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClipboardData {
    /// The range that was copied/cut
    pub range: CellRange,
    pub mode: ClipboardMode,
}

/// Manages the clipboard state
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClipboardState {
    data: Option<ClipboardData>,
}

impl ClipboardState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy a range to the clipboard
    pub fn copy(&mut self, range: CellRange) {
        self.data = Some(ClipboardData {
            range,
            mode: ClipboardMode::Copy,
        });
    }

    /// Cut a range to the clipboard
    pub fn cut(&mut self, range: CellRange) {
        self.data = Some(ClipboardData {
            range,
            mode: ClipboardMode::Cut,
        });
    }

    /// Get the clipboard data for pasting
    pub fn contents(&self) -> Option<ClipboardData> {
        self.data
    }

    pub fn clear(&mut self) {
        self.data = None;
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_none()
    }

    /// Cut ranges paste once
    pub fn clear_if_cut(&mut self) {
        if matches!(self.data, Some(ClipboardData { mode: ClipboardMode::Cut, .. })) {
            self.clear();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::range::CellCoord;

    fn range() -> CellRange {
        CellRange::new(CellCoord::new(0, 0), CellCoord::new(1, 1))
    }

    #[test]
    fn test_copy_survives_paste() {
        let mut clipboard = ClipboardState::new();
        clipboard.copy(range());
        clipboard.clear_if_cut();
        assert_eq!(
            clipboard.contents(),
            Some(ClipboardData { range: range(), mode: ClipboardMode::Copy })
        );
    }

    #[test]
    fn test_cut_clears_after_paste() {
        let mut clipboard = ClipboardState::new();
        clipboard.cut(range());
        assert!(!clipboard.is_empty());
        clipboard.clear_if_cut();
        assert!(clipboard.is_empty());
    }
}
