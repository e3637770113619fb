use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

use crate::error::CellError;

fn a1_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^(?<letters>[A-Za-z]+)(?<digits>[0-9]+)$").expect("static A1 pattern is valid")
    })
}

/// Cell coordinate (0-indexed internally)
#[derive(Debug, Clone, Copy, Hash, Eq, PartialEq, Ord, PartialOrd, Serialize, Deserialize)]
pub struct CellCoord {
    pub row: u32,
    pub col: u32,
}

impl CellCoord {
    pub const fn new(row: u32, col: u32) -> Self {
        CellCoord { row, col }
    }

    /// Decode A1 notation (e.g., "A1" -> (0, 0), "B3" -> row 2, col 1)
    pub fn from_a1(notation: &str) -> Result<Self, CellError> {
        let invalid = || CellError::InvalidReference(notation.to_string());

        let caps = a1_pattern().captures(notation.trim()).ok_or_else(invalid)?;
        let col = col_from_label(&caps["letters"]).ok_or_else(invalid)?;
        let row = caps["digits"]
            .parse::<u32>()
            .ok()
            .and_then(|r| r.checked_sub(1)) // Rows are 1-indexed in A1 notation
            .ok_or_else(invalid)?;

        Ok(CellCoord { row, col })
    }

    /// Convert to A1 notation (e.g., (0, 0) -> "A1")
    pub fn to_a1(&self) -> String {
        format!("{}{}", col_to_label(self.col), u64::from(self.row) + 1)
    }

    /// Check if this coord is within bounds
    pub fn is_valid(&self, max_rows: u32, max_cols: u32) -> bool {
        self.row < max_rows && self.col < max_cols
    }
}

impl fmt::Display for CellCoord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_a1())
    }
}

impl FromStr for CellCoord {
    type Err = CellError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        CellCoord::from_a1(s)
    }
}

/// Convert column index (0-indexed) to its bijective base-26 label
/// (A, B, ..., Z, AA, AB, ...)
pub fn col_to_label(col: u32) -> String {
    let mut letters = Vec::new();
    let mut n = u64::from(col) + 1;

    while n > 0 {
        let remainder = n % 26;
        if remainder == 0 {
            letters.push(b'Z');
            n = n / 26 - 1;
        } else {
            letters.push(b'A' + (remainder - 1) as u8);
            n /= 26;
        }
    }

    letters.iter().rev().map(|&b| char::from(b)).collect()
}

/// Convert column label (A, B, ..., Z, AA, AB, ...) to index (0-indexed).
///
/// Case-insensitive. Returns `None` for empty labels, non-letters, or labels
/// past `u32::MAX`.
pub fn col_from_label(label: &str) -> Option<u32> {
    let mut col: Option<u32> = None;

    for c in label.chars() {
        if !c.is_ascii_alphabetic() {
            return None;
        }
        let value = c.to_ascii_uppercase() as u32 - 'A' as u32;
        col = Some(match col {
            None => value,
            Some(prev) => prev.checked_add(1)?.checked_mul(26)?.checked_add(value)?,
        });
    }

    col
}

/// An inclusive rectangle of cells (e.g., A1:B10).
///
/// Always normalized: `start` is the top-left corner and `end` the
/// bottom-right one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CellRange {
    pub start: CellCoord,
    pub end: CellCoord,
}

impl CellRange {
    pub fn new(start: CellCoord, end: CellCoord) -> Self {
        // Normalize so start is top-left and end is bottom-right
        CellRange {
            start: CellCoord::new(start.row.min(end.row), start.col.min(end.col)),
            end: CellCoord::new(start.row.max(end.row), start.col.max(end.col)),
        }
    }

    pub fn single(coord: CellCoord) -> Self {
        CellRange {
            start: coord,
            end: coord,
        }
    }

    /// Create from A1:B1 notation
    pub fn from_a1(notation: &str) -> Result<Self, CellError> {
        match notation.split_once(':') {
            None => CellCoord::from_a1(notation).map(CellRange::single),
            Some((start, end)) => {
                let start = CellCoord::from_a1(start)?;
                let end = CellCoord::from_a1(end)?;
                Ok(CellRange::new(start, end))
            }
        }
    }

    /// Convert to A1:B1 notation
    pub fn to_a1(&self) -> String {
        if self.start == self.end {
            self.start.to_a1()
        } else {
            format!("{}:{}", self.start.to_a1(), self.end.to_a1())
        }
    }

    /// Check if a coordinate is within this range
    pub fn contains(&self, coord: CellCoord) -> bool {
        coord.row >= self.start.row
            && coord.row <= self.end.row
            && coord.col >= self.start.col
            && coord.col <= self.end.col
    }

    /// Grow the range so it also covers `point` (shift-click selection)
    pub fn extend(&self, point: CellCoord) -> Self {
        CellRange {
            start: CellCoord::new(self.start.row.min(point.row), self.start.col.min(point.col)),
            end: CellCoord::new(self.end.row.max(point.row), self.end.col.max(point.col)),
        }
    }

    /// Build the coordinate shift used by paste.
    ///
    /// The returned function maps a coordinate inside this range to
    /// `new_anchor + (coord - original_anchor)` per axis. It yields `None` for
    /// coordinates outside the range and for targets that would leave the grid.
    pub fn translate(
        &self,
        original_anchor: CellCoord,
        new_anchor: CellCoord,
    ) -> impl Fn(CellCoord) -> Option<CellCoord> {
        let range = *self;
        let d_row = i64::from(new_anchor.row) - i64::from(original_anchor.row);
        let d_col = i64::from(new_anchor.col) - i64::from(original_anchor.col);

        move |coord| {
            if !range.contains(coord) {
                return None;
            }
            let row = u32::try_from(i64::from(coord.row) + d_row).ok()?;
            let col = u32::try_from(i64::from(coord.col) + d_col).ok()?;
            Some(CellCoord::new(row, col))
        }
    }

    /// Get the number of rows in the range
    pub fn row_count(&self) -> u32 {
        self.end.row - self.start.row + 1
    }

    /// Get the number of columns in the range
    pub fn col_count(&self) -> u32 {
        self.end.col - self.start.col + 1
    }

    /// Get the total number of cells in the range
    pub fn cell_count(&self) -> u64 {
        u64::from(self.row_count()) * u64::from(self.col_count())
    }

    /// Check if this range is a single cell
    pub fn is_single_cell(&self) -> bool {
        self.start == self.end
    }

    /// Iterate over all coordinates in the range (row by row)
    pub fn iter(&self) -> CellRangeIter {
        CellRangeIter {
            range: *self,
            next: Some(self.start),
        }
    }
}

impl fmt::Display for CellRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_a1())
    }
}

impl FromStr for CellRange {
    type Err = CellError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        CellRange::from_a1(s)
    }
}

impl IntoIterator for CellRange {
    type Item = CellCoord;
    type IntoIter = CellRangeIter;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Iterator over coordinates in a range
pub struct CellRangeIter {
    range: CellRange,
    next: Option<CellCoord>,
}

impl Iterator for CellRangeIter {
    type Item = CellCoord;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.next?;

        self.next = if current.col < self.range.end.col {
            Some(CellCoord::new(current.row, current.col + 1))
        } else if current.row < self.range.end.row {
            Some(CellCoord::new(current.row + 1, self.range.start.col))
        } else {
            None
        };

        Some(current)
    }
}
