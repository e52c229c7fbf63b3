//! Helpers for iterating over grids.

/// Correlate a grid index to a value spanning `range`, both ends included.
///
/// A grid with a single sample sits at the middle of the range.
pub fn value_from_grid(i: usize, res: usize, range: (f64, f64)) -> f64 {
    if res < 2 {
        return (range.0 + range.1) / 2.0;
    }
    range.0 + (range.1 - range.0) * i as f64 / (res - 1) as f64
}

/// Centre of cell `i` when `range` is split into `res` equal cells.
pub fn cell_center(i: usize, res: usize, range: (f64, f64)) -> f64 {
    let cell = (range.1 - range.0) / res.max(1) as f64;
    range.0 + cell * (i as f64 + 0.5)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_value_from_grid_spans_range() {
        assert_eq!(value_from_grid(0, 5, (-10.0, 10.0)), -10.0);
        assert_eq!(value_from_grid(2, 5, (-10.0, 10.0)), 0.0);
        assert_eq!(value_from_grid(4, 5, (-10.0, 10.0)), 10.0);
    }

    #[test]
    fn test_value_from_grid_single_sample() {
        assert_eq!(value_from_grid(0, 1, (2.0, 4.0)), 3.0);
    }

    #[test]
    fn test_cell_center() {
        assert_eq!(cell_center(0, 4, (0.0, 8.0)), 1.0);
        assert_eq!(cell_center(3, 4, (0.0, 8.0)), 7.0);
    }
}
