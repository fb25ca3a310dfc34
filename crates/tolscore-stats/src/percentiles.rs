use serde::{Deserialize, Serialize};

/// Nearest-rank percentile of sorted data, `None` for an empty sample.
///
/// For `n` values the k-th percentile is the value at index `floor(n * k / 100)`,
/// clamped to the last value.
///
/// ```
/// use tolscore_stats::percentiles::percentile;
///
/// let values = [1.0, 2.0, 3.0, 4.0, 5.0];
/// assert_eq!(percentile(&values, 50.0), Some(3.0));
/// assert_eq!(percentile(&values, 25.0), Some(2.0));
/// assert_eq!(percentile(&values, 100.0), Some(5.0));
/// assert_eq!(percentile(&[], 50.0), None);
/// ```
#[expect(
    clippy::cast_sign_loss,
    clippy::cast_possible_truncation,
    clippy::cast_precision_loss
)]
#[must_use]
pub fn percentile(sorted_values: &[f64], percentile: f64) -> Option<f64> {
    let last = sorted_values.len().checked_sub(1)?;
    let index = (sorted_values.len() as f64 * percentile / 100.0) as usize;
    sorted_values.get(index.min(last)).copied()
}

/// First quartile, median and third quartile of a sample.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Quartiles {
    pub q1: f64,
    pub median: f64,
    pub q3: f64,
}

impl Quartiles {
    /// Computes quartiles of unsorted values, `None` for an empty sample.
    ///
    /// ```
    /// use tolscore_stats::percentiles::Quartiles;
    ///
    /// let quartiles = Quartiles::new(&[10.0, 1.0, 9.0, 2.0, 8.0, 3.0, 7.0, 4.0, 6.0, 5.0]).unwrap();
    /// assert_eq!((quartiles.q1, quartiles.median, quartiles.q3), (3.0, 6.0, 8.0));
    /// ```
    #[must_use]
    pub fn new(values: &[f64]) -> Option<Self> {
        let mut sorted = values.to_vec();
        sorted.sort_by(f64::total_cmp);
        Self::from_sorted(&sorted)
    }

    /// # Panics
    ///
    /// Panics if `sorted_values` is not sorted in ascending order.
    #[must_use]
    pub fn from_sorted(sorted_values: &[f64]) -> Option<Self> {
        assert!(
            sorted_values.is_sorted_by(|a, b| a <= b),
            "values must be sorted in ascending order"
        );
        Some(Self {
            q1: percentile(sorted_values, 25.0)?,
            median: percentile(sorted_values, 50.0)?,
            q3: percentile(sorted_values, 75.0)?,
        })
    }

    #[must_use]
    pub fn iqr(&self) -> f64 {
        self.q3 - self.q1
    }
}
