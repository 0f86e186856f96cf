//! Array statistics for diagnostics and colour scaling.

use ndarray::Array2;

/// Mean of the squared entries. Empty arrays give 0.
pub fn mean_square(a: &Array2<f64>) -> f64 {
    if a.is_empty() {
        return 0.0;
    }
    a.iter().map(|v| v * v).sum::<f64>() / a.len() as f64
}

/// q-th percentile (0..=100) with linear interpolation between closest
/// ranks, the numpy default.
///
/// Non-finite values are skipped; returns `None` when nothing finite is left.
pub fn percentile<'a>(values: impl IntoIterator<Item = &'a f64>, q: f64) -> Option<f64> {
    let mut sorted: Vec<f64> = values.into_iter().copied().filter(|v| v.is_finite()).collect();
    if sorted.is_empty() {
        return None;
    }
    sorted.sort_by(|a, b| a.total_cmp(b));

    let q = q.clamp(0.0, 100.0);
    let rank = q / 100.0 * (sorted.len() - 1) as f64;
    let lo = rank.floor() as usize;
    let hi = rank.ceil() as usize;
    let frac = rank - lo as f64;
    Some(sorted[lo] + (sorted[hi] - sorted[lo]) * frac)
}

/// Finite (min, max) of a field, `None` if it has no finite entry.
pub fn finite_range(a: &Array2<f64>) -> Option<(f64, f64)> {
    a.iter()
        .copied()
        .filter(|v| v.is_finite())
        .fold(None, |acc, v| match acc {
            None => Some((v, v)),
            Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mean_square() {
        let a = Array2::from_shape_vec((2, 2), vec![1.0, -1.0, 2.0, 0.0]).unwrap();
        assert!((mean_square(&a) - 1.5).abs() < 1e-15);
        assert_eq!(mean_square(&Array2::zeros((0, 3))), 0.0);
    }

    #[test]
    fn test_percentile_matches_numpy_linear() {
        // np.percentile([1, 2, 3, 4], 2)  -> 1.06
        // np.percentile([1, 2, 3, 4], 98) -> 3.94
        let v = [4.0, 1.0, 3.0, 2.0];
        assert!((percentile(&v, 2.0).unwrap() - 1.06).abs() < 1e-12);
        assert!((percentile(&v, 98.0).unwrap() - 3.94).abs() < 1e-12);
        assert_eq!(percentile(&v, 0.0), Some(1.0));
        assert_eq!(percentile(&v, 100.0), Some(4.0));
        assert_eq!(percentile(&v, 50.0), Some(2.5));
    }

    #[test]
    fn test_percentile_skips_non_finite() {
        let v = [f64::NAN, 5.0, f64::INFINITY];
        assert_eq!(percentile(&v, 2.0), Some(5.0));
        assert_eq!(percentile(&[f64::NAN], 50.0), None);
        assert_eq!(percentile(&[] as &[f64], 50.0), None);
    }

    #[test]
    fn test_finite_range() {
        let a = Array2::from_shape_vec((1, 4), vec![3.0, f64::NAN, -2.0, 7.5]).unwrap();
        assert_eq!(finite_range(&a), Some((-2.0, 7.5)));
        assert_eq!(finite_range(&Array2::from_elem((2, 2), f64::NAN)), None);
    }
}
