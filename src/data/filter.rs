use crate::error::RenderError;

use super::model::{DisplayWindow, ObservationSeries};

// ---------------------------------------------------------------------------
// Window filter: which cadences fall inside the display range
// ---------------------------------------------------------------------------

/// Return indices of cadences whose time lies in `window` (inclusive).
/// Pure: the same series and window always give the same indices.
pub fn filtered_indices(series: &ObservationSeries, window: &DisplayWindow) -> Vec<usize> {
    series
        .time()
        .iter()
        .enumerate()
        .filter(|(_, t)| window.contains(**t))
        .map(|(i, _)| i)
        .collect()
}

/// Points of `series` inside `window`, ready for plotting as `[time, flux]`.
///
/// An empty selection is an error so the caller can keep the previous plot.
pub fn select_window(
    series: &ObservationSeries,
    window: &DisplayWindow,
) -> Result<Vec<[f64; 2]>, RenderError> {
    let points: Vec<[f64; 2]> = filtered_indices(series, window)
        .into_iter()
        .map(|i| [series.time()[i], series.flux()[i]])
        .collect();

    if points.is_empty() {
        return Err(RenderError::EmptySelection);
    }
    Ok(points)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::FluxVariant;

    fn series() -> ObservationSeries {
        ObservationSeries::from_pairs(
            1,
            FluxVariant::Corrected,
            vec![(1.0, 0.98), (2.0, 1.0), (3.0, 1.02), (4.0, 0.99), (5.0, 1.01)],
        )
    }

    #[test]
    fn default_window_selects_everything() {
        let s = series();
        let w = s.default_window().unwrap();
        let pts = select_window(&s, &w).unwrap();
        assert_eq!(pts.len(), s.len());
        assert_eq!(pts.first(), Some(&[1.0, 0.98]));
        assert_eq!(pts.last(), Some(&[5.0, 1.01]));
    }

    #[test]
    fn bounds_are_inclusive() {
        let w = DisplayWindow::new(2.0, 4.0).unwrap();
        assert_eq!(filtered_indices(&series(), &w), vec![1, 2, 3]);
    }

    #[test]
    fn selecting_twice_gives_the_same_subset() {
        let s = series();
        let w = DisplayWindow::new(1.5, 3.5).unwrap();
        assert_eq!(select_window(&s, &w), select_window(&s, &w));
    }

    #[test]
    fn window_outside_extent_is_an_empty_selection() {
        let w = DisplayWindow::new(100.0, 200.0).unwrap();
        assert_eq!(select_window(&series(), &w), Err(RenderError::EmptySelection));
    }

    #[test]
    fn window_wider_than_extent_is_fine() {
        let w = DisplayWindow::new(-1.0e6, 1.0e6).unwrap();
        assert_eq!(select_window(&series(), &w).unwrap().len(), 5);
    }
}
