use std::collections::HashMap;

use crate::cell::CellContent;
use crate::config::GridConfig;
use crate::range::{CellCoord, CellRange};

/// Sparse cell store. Only non-empty cells are stored; a missing key means
/// the cell is empty.
///
/// The sheet owns nothing but the mapping. Formulas and ranges hold no
/// reference to it and are handed a `&Sheet` at evaluation time.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Sheet {
    cells: HashMap<CellCoord, CellContent>,
}

impl Sheet {
    /// Create a new empty sheet
    pub fn new() -> Self {
        Self::default()
    }

    pub fn has(&self, coord: CellCoord) -> bool {
        self.cells.contains_key(&coord)
    }

    /// Get the content at the given coordinate
    pub fn get(&self, coord: CellCoord) -> Option<&CellContent> {
        self.cells.get(&coord)
    }

    /// Set the content at the given coordinate, replacing what was there
    pub fn set(&mut self, coord: CellCoord, content: CellContent) -> &mut Self {
        self.cells.insert(coord, content);
        self
    }

    /// Delete a cell (make it empty), returning its former content
    pub fn delete(&mut self, coord: CellCoord) -> Option<CellContent> {
        self.cells.remove(&coord)
    }

    /// Get the number of non-empty cells
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Check if the sheet is empty
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// All non-empty cells, in no particular order
    pub fn iter(&self) -> impl Iterator<Item = (CellCoord, &CellContent)> + '_ {
        self.cells.iter().map(|(coord, content)| (*coord, content))
    }

    /// Numeric values inside `range`, scanned row by row
    pub fn numbers_in_range(&self, range: CellRange) -> impl Iterator<Item = f64> + '_ {
        self.scan(range).filter_map(|(_, content)| content.as_number())
    }

    /// Non-empty cells inside `range`, in row-major order.
    ///
    /// Visits whichever is smaller: the rectangle or the stored cells.
    pub fn scan(&self, range: CellRange) -> impl Iterator<Item = (CellCoord, &CellContent)> + '_ {
        let found: Vec<(CellCoord, &CellContent)> = if range.cell_count() <= self.cells.len() as u64 {
            range
                .iter()
                .filter_map(|coord| self.cells.get(&coord).map(|content| (coord, content)))
                .collect()
        } else {
            let mut hits: Vec<_> = self.iter().filter(|(coord, _)| range.contains(*coord)).collect();
            hits.sort_by_key(|(coord, _)| *coord);
            hits
        };
        found.into_iter()
    }

    /// Remove every cell in `range`, returning the coordinates that held content
    pub fn clear_range(&mut self, range: CellRange) -> Vec<CellCoord> {
        let cleared: Vec<CellCoord> = self.scan(range).map(|(coord, _)| coord).collect();
        for coord in &cleared {
            self.cells.remove(coord);
        }
        cleared
    }

    /// Copy out every cell of `range`, including empty ones as `None`
    pub fn snapshot(&self, range: CellRange) -> Vec<(CellCoord, Option<CellContent>)> {
        range
            .iter()
            .map(|coord| (coord, self.cells.get(&coord).cloned()))
            .collect()
    }

    /// Paste the contents of `source` with its top-left corner at `anchor`.
    ///
    /// The whole source is read before anything is written, so overlapping
    /// source and destination rectangles paste the original values. Empty
    /// source cells clear their destination. Returns the written coordinates.
    pub fn paste(&mut self, source: CellRange, anchor: CellCoord) -> Vec<CellCoord> {
        let snapshot = self.snapshot(source);
        self.write_snapshot(source, snapshot, anchor, None)
    }

    /// Like [`Sheet::paste`], but destinations outside `bounds` are skipped
    pub fn paste_within(
        &mut self,
        source: CellRange,
        anchor: CellCoord,
        bounds: &GridConfig,
    ) -> Vec<CellCoord> {
        let snapshot = self.snapshot(source);
        self.write_snapshot(source, snapshot, anchor, Some(bounds))
    }

    /// Write a previously taken snapshot of `source` at `anchor`.
    ///
    /// With `bounds`, targets off that grid are skipped along with those past
    /// the coordinate range.
    pub fn write_snapshot(
        &mut self,
        source: CellRange,
        snapshot: Vec<(CellCoord, Option<CellContent>)>,
        anchor: CellCoord,
        bounds: Option<&GridConfig>,
    ) -> Vec<CellCoord> {
        let shift = source.translate(source.start, anchor);
        let mut written = Vec::with_capacity(snapshot.len());
        let mut skipped = 0usize;

        for (from, content) in snapshot {
            let target = shift(from).filter(|to| bounds.map_or(true, |grid| grid.contains(*to)));
            let Some(to) = target else {
                skipped += 1;
                continue;
            };
            match content {
                Some(content) => {
                    self.cells.insert(to, content);
                }
                None => {
                    self.cells.remove(&to);
                }
            }
            written.push(to);
        }

        if skipped > 0 {
            tracing::warn!(source = %source, anchor = %anchor, skipped, "paste fell partially off the grid");
        }

        written
    }
}

impl FromIterator<(CellCoord, CellContent)> for Sheet {
    fn from_iter<I: IntoIterator<Item = (CellCoord, CellContent)>>(iter: I) -> Self {
        Sheet {
            cells: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Sheet {
        // A1=1, B1=2, A2=3, B2=4
        [
            (CellCoord::new(0, 0), CellContent::Number(1.0)),
            (CellCoord::new(0, 1), CellContent::Number(2.0)),
            (CellCoord::new(1, 0), CellContent::Number(3.0)),
            (CellCoord::new(1, 1), CellContent::Number(4.0)),
        ]
        .into_iter()
        .collect()
    }

    #[test]
    fn test_sheet_basic_operations() {
        let mut sheet = Sheet::new();
        let coord = CellCoord::new(0, 0);

        assert!(!sheet.has(coord));
        sheet.set(coord, CellContent::Number(42.0));
        assert!(sheet.has(coord));
        assert_eq!(sheet.get(coord), Some(&CellContent::Number(42.0)));

        assert_eq!(sheet.delete(coord), Some(CellContent::Number(42.0)));
        assert_eq!(sheet.delete(coord), None);
        assert!(sheet.get(coord).is_none());
        assert!(sheet.is_empty());
    }

    #[test]
    fn test_empty_text_is_not_empty_cell() {
        let mut sheet = Sheet::new();
        sheet.set(CellCoord::new(3, 3), CellContent::Text(String::new()));
        assert!(sheet.has(CellCoord::new(3, 3)));
        assert_eq!(sheet.len(), 1);
    }

    #[test]
    fn test_set_is_idempotent() {
        let coord = CellCoord::new(2, 5);
        let mut once = Sheet::new();
        once.set(coord, CellContent::Text("x".into()));

        let mut twice = Sheet::new();
        twice
            .set(coord, CellContent::Text("x".into()))
            .set(coord, CellContent::Text("x".into()));

        assert_eq!(once, twice);
        assert_eq!(twice.len(), 1);
    }

    #[test]
    fn test_numbers_in_range_skips_non_numeric() {
        let mut sheet = sample();
        sheet.set(CellCoord::new(0, 1), CellContent::Text("two".into()));

        let range = CellRange::new(CellCoord::new(0, 0), CellCoord::new(1, 1));
        let numbers: Vec<f64> = sheet.numbers_in_range(range).collect();
        assert_eq!(numbers, vec![1.0, 3.0, 4.0]);
    }

    #[test]
    fn test_scan_large_range_is_row_major() {
        let sheet = sample();
        let range = CellRange::new(CellCoord::new(0, 0), CellCoord::new(999, 999));
        let coords: Vec<CellCoord> = sheet.scan(range).map(|(c, _)| c).collect();
        assert_eq!(
            coords,
            vec![
                CellCoord::new(0, 0),
                CellCoord::new(0, 1),
                CellCoord::new(1, 0),
                CellCoord::new(1, 1),
            ]
        );
    }

    #[test]
    fn test_clear_range() {
        let mut sheet = sample();
        let cleared = sheet.clear_range(CellRange::new(CellCoord::new(0, 0), CellCoord::new(0, 5)));
        assert_eq!(cleared, vec![CellCoord::new(0, 0), CellCoord::new(0, 1)]);
        assert_eq!(sheet.len(), 2);
    }

    #[test]
    fn test_paste_translates() {
        let mut sheet = sample();
        let source = CellRange::new(CellCoord::new(0, 0), CellCoord::new(1, 1));
        let written = sheet.paste(source, CellCoord::new(2, 2));

        assert_eq!(written.len(), 4);
        assert_eq!(sheet.get(CellCoord::new(2, 2)), Some(&CellContent::Number(1.0)));
        assert_eq!(sheet.get(CellCoord::new(2, 3)), Some(&CellContent::Number(2.0)));
        assert_eq!(sheet.get(CellCoord::new(3, 2)), Some(&CellContent::Number(3.0)));
        assert_eq!(sheet.get(CellCoord::new(3, 3)), Some(&CellContent::Number(4.0)));
        // Source untouched
        assert_eq!(sheet.get(CellCoord::new(0, 0)), Some(&CellContent::Number(1.0)));
    }

    #[test]
    fn test_paste_overlapping_reads_before_writing() {
        let mut sheet = sample();
        let source = CellRange::new(CellCoord::new(0, 0), CellCoord::new(1, 1));
        sheet.paste(source, CellCoord::new(1, 1));

        assert_eq!(sheet.get(CellCoord::new(1, 1)), Some(&CellContent::Number(1.0)));
        assert_eq!(sheet.get(CellCoord::new(1, 2)), Some(&CellContent::Number(2.0)));
        assert_eq!(sheet.get(CellCoord::new(2, 1)), Some(&CellContent::Number(3.0)));
        assert_eq!(sheet.get(CellCoord::new(2, 2)), Some(&CellContent::Number(4.0)));
    }

    #[test]
    fn test_paste_empty_source_clears_destination() {
        let mut sheet = sample();
        let source = CellRange::single(CellCoord::new(9, 9));
        sheet.paste(source, CellCoord::new(0, 0));
        assert!(!sheet.has(CellCoord::new(0, 0)));
    }

    #[test]
    fn test_paste_within_skips_cells_off_the_grid() {
        let grid = GridConfig::new(2, 2).unwrap();
        let mut sheet = sample();
        // A1:B1 pasted at B2 would land on B2 and C2; C2 is outside 2x2
        let source = CellRange::new(CellCoord::new(0, 0), CellCoord::new(0, 1));
        let written = sheet.paste_within(source, CellCoord::new(1, 1), &grid);

        assert_eq!(written, vec![CellCoord::new(1, 1)]);
        assert_eq!(sheet.get(CellCoord::new(1, 1)), Some(&CellContent::Number(1.0)));
        assert!(!sheet.has(CellCoord::new(1, 2)));
        assert!(sheet.iter().all(|(coord, _)| grid.contains(coord)));
    }
}
