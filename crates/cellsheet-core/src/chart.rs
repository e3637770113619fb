use serde::{Deserialize, Serialize};

use crate::range::{CellCoord, CellRange};
use crate::sheet::Sheet;

/// Two parallel numeric series for a line chart
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ChartSeries {
    /// Numbers down the first column of the range (x axis)
    pub labels: Vec<f64>,
    /// Numbers down the last column of the range (y axis)
    pub values: Vec<f64>,
}

/// Read the chart series for `range` out of the sheet.
///
/// Non-numeric and empty cells are skipped, so the two lists can differ in
/// length when one column has gaps.
pub fn chart_series(sheet: &Sheet, range: CellRange) -> ChartSeries {
    let column = |col: u32| -> Vec<f64> {
        let strip = CellRange::new(
            CellCoord::new(range.start.row, col),
            CellCoord::new(range.end.row, col),
        );
        sheet
            .scan(strip)
            .filter_map(|(_, content)| content.as_number())
            .collect()
    };

    ChartSeries {
        labels: column(range.start.col),
        values: column(range.end.col),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cell::CellContent;

    #[test]
    fn test_chart_series_edges() {
        let mut sheet = Sheet::new();
        for row in 0..3 {
            sheet.set(CellCoord::new(row, 0), CellContent::Number(row as f64));
            sheet.set(CellCoord::new(row, 1), CellContent::Text("ignored".into()));
            sheet.set(CellCoord::new(row, 2), CellContent::Number((row * 10) as f64));
        }

        let range = CellRange::from_a1("A1:C3").unwrap();
        let series = chart_series(&sheet, range);
        assert_eq!(series.labels, vec![0.0, 1.0, 2.0]);
        assert_eq!(series.values, vec![0.0, 10.0, 20.0]);
    }

    #[test]
    fn test_chart_series_skips_gaps() {
        let mut sheet = Sheet::new();
        sheet.set(CellCoord::new(0, 0), CellContent::Number(1.0));
        sheet.set(CellCoord::new(2, 0), CellContent::Number(3.0));
        sheet.set(CellCoord::new(1, 1), CellContent::Text("n/a".into()));
        sheet.set(CellCoord::new(2, 1), CellContent::Number(9.0));

        let series = chart_series(&sheet, CellRange::from_a1("A1:B3").unwrap());
        assert_eq!(series.labels, vec![1.0, 3.0]);
        assert_eq!(series.values, vec![9.0]);
    }

    #[test]
    fn test_single_column_chart_uses_same_column_twice() {
        let mut sheet = Sheet::new();
        sheet.set(CellCoord::new(0, 3), CellContent::Number(5.0));

        let series = chart_series(&sheet, CellRange::from_a1("D1:D4").unwrap());
        assert_eq!(series.labels, vec![5.0]);
        assert_eq!(series.values, vec![5.0]);
    }

    #[test]
    fn test_tall_chart_range_reads_stored_cells_only() {
        let mut sheet = Sheet::new();
        sheet.set(CellCoord::new(3_999_999_998, 0), CellContent::Number(2.0));
        sheet.set(CellCoord::new(7, 0), CellContent::Number(1.0));
        sheet.set(CellCoord::new(7, 2), CellContent::Number(70.0));

        let range = CellRange::from_a1("A1:C4000000000").unwrap();
        let series = chart_series(&sheet, range);
        assert_eq!(series.labels, vec![1.0, 2.0]);
        assert_eq!(series.values, vec![70.0]);
    }
}
