/// Trailing moving average: element `i` is the mean of the last
/// `min(window, i + 1)` values ending at `i`. A zero window behaves as 1.
///
/// Each window is summed on its own, so a non-finite value only affects the
/// points whose window contains it.
pub fn trailing_moving_average(values: &[f64], window: usize) -> Vec<f64> {
    let window = window.max(1);

    (0..values.len())
        .map(|i| {
            let span = (i + 1).min(window);
            let sum: f64 = values[i + 1 - span..=i].iter().sum();
            sum / span as f64
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(actual: &[f64], expected: &[f64]) {
        assert_eq!(actual.len(), expected.len());
        for (a, e) in actual.iter().zip(expected) {
            assert!((a - e).abs() < 1e-9, "got {actual:?}, expected {expected:?}");
        }
    }

    #[test]
    fn test_empty() {
        assert!(trailing_moving_average(&[], 3).is_empty());
    }

    #[test]
    fn test_window_two() {
        assert_close(&trailing_moving_average(&[1.0, 0.0, -1.0], 2), &[1.0, 0.5, -0.5]);
    }

    #[test]
    fn test_window_larger_than_input() {
        assert_close(&trailing_moving_average(&[0.2, 0.4, 0.6], 7), &[0.2, 0.3, 0.4]);
    }

    #[test]
    fn test_nan_only_poisons_its_own_windows() {
        let averages = trailing_moving_average(&[0.3, f64::NAN, 0.5, 0.7], 2);
        assert!((averages[0] - 0.3).abs() < 1e-9);
        assert!(averages[1].is_nan());
        assert!(averages[2].is_nan());
        assert!((averages[3] - 0.6).abs() < 1e-9);
    }

    #[test]
    fn test_infinity_leaves_window() {
        let averages = trailing_moving_average(&[f64::INFINITY, 0.2, 0.4], 1);
        assert!(averages[0].is_infinite());
        assert!((averages[1] - 0.2).abs() < 1e-9);
        assert!((averages[2] - 0.4).abs() < 1e-9);
    }

    #[test]
    fn test_zero_window_is_identity() {
        assert_close(&trailing_moving_average(&[0.3, -0.3], 0), &[0.3, -0.3]);
    }
}
