//! Conversions between row-index lists and the range form grid widgets speak.

use grid_core::CellRange;

/// Flatten ranges into row indices, in range order. Rows covered by more
/// than one range appear once per covering range.
pub fn ranges_to_rows(ranges: &[CellRange]) -> Vec<usize> {
    let mut rows = Vec::new();
    for range in ranges {
        rows.extend(range.rows());
    }
    rows
}

/// One full-width, single-row range per index, preserving input order.
pub fn rows_to_ranges(rows: &[usize], last_cell: usize) -> Vec<CellRange> {
    rows.iter()
        .map(|&row| CellRange::single_row(row, last_cell))
        .collect()
}

/// Ascending inclusive span between two row indices, given in either order.
pub fn row_span(a: usize, b: usize) -> Vec<usize> {
    let (low, high) = if a <= b { (a, b) } else { (b, a) };
    (low..=high).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flattening_keeps_range_order_and_repeats() {
        let ranges = vec![
            CellRange::new(3, 0, 5, 2),
            CellRange::new(1, 0, 1, 2),
            CellRange::new(4, 0, 4, 2),
        ];
        assert_eq!(ranges_to_rows(&ranges), vec![3, 4, 5, 1, 4]);
    }

    #[test]
    fn row_lists_become_single_row_ranges_in_input_order() {
        let ranges = rows_to_ranges(&[7, 2], 3);
        assert_eq!(
            ranges,
            vec![CellRange::new(7, 0, 7, 3), CellRange::new(2, 0, 2, 3)]
        );
    }

    #[test]
    fn spans_ascend_regardless_of_endpoint_order() {
        assert_eq!(row_span(2, 5), vec![2, 3, 4, 5]);
        assert_eq!(row_span(5, 2), vec![2, 3, 4, 5]);
        assert_eq!(row_span(4, 4), vec![4]);
    }
}
