//! Statistical utilities for summarizing trial outcome metrics.
//!
//! - [`descriptive`]: mean, median, dispersion and range of a sample
//! - [`percentiles`]: nearest-rank percentiles and quartiles
//! - [`outliers`]: Tukey fences built from the interquartile range
//!
//! # Examples
//!
//! ```
//! use tolscore_stats::{descriptive::DescriptiveStats, outliers::IqrFences};
//!
//! let values = [4.0, 5.0, 5.0, 6.0, 6.0, 7.0, 30.0];
//! let stats = DescriptiveStats::new(values).unwrap();
//! assert_eq!(stats.median, 6.0);
//!
//! let fences = IqrFences::new(&values).unwrap();
//! assert_eq!(fences.count_outliers(&values), 1);
//! ```

pub mod descriptive;
pub mod outliers;
pub mod percentiles;
