use serde::{Deserialize, Serialize};

use crate::percentiles::Quartiles;

/// Distance of the fences from the quartiles, in interquartile ranges.
pub const IQR_FENCE_FACTOR: f64 = 1.5;

/// Tukey fences: values outside `[q1 - 1.5 * iqr, q3 + 1.5 * iqr]` are outliers.
///
/// Quartiles use the nearest-rank [`Quartiles`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct IqrFences {
    pub q1: f64,
    pub q3: f64,
    pub lower: f64,
    pub upper: f64,
}

impl IqrFences {
    /// Builds fences from unsorted values, `None` for an empty sample.
    ///
    /// ```
    /// use tolscore_stats::outliers::IqrFences;
    ///
    /// let fences = IqrFences::new(&[1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0]).unwrap();
    /// assert_eq!((fences.q1, fences.q3), (3.0, 7.0));
    /// assert_eq!((fences.lower, fences.upper), (-3.0, 13.0));
    /// ```
    #[must_use]
    pub fn new(values: &[f64]) -> Option<Self> {
        let quartiles = Quartiles::new(values)?;
        let margin = IQR_FENCE_FACTOR * quartiles.iqr();
        Some(Self {
            q1: quartiles.q1,
            q3: quartiles.q3,
            lower: quartiles.q1 - margin,
            upper: quartiles.q3 + margin,
        })
    }

    #[must_use]
    pub fn iqr(&self) -> f64 {
        self.q3 - self.q1
    }

    #[must_use]
    pub fn is_outlier(&self, value: f64) -> bool {
        value < self.lower || value > self.upper
    }

    #[must_use]
    pub fn count_outliers(&self, values: &[f64]) -> usize {
        values.iter().filter(|&&v| self.is_outlier(v)).count()
    }
}
