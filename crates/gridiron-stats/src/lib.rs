//! Numeric building blocks for cohort analysis.
//!
//! This crate provides the small set of statistical tools the similarity
//! pipeline is built from:
//!
//! - **Descriptive statistics**: count, min, max, mean and sample standard deviation
//! - **Min-max scaling**: rescaling into `[0, 1]` with an explicit zero-range policy
//! - **Vector similarity**: cosine similarity with a defined zero-vector result
//!
//! Missing observations are represented as `NaN` throughout and are skipped by
//! every summary statistic.
//!
//! # Modules
//!
//! - [`descriptive`]: Descriptive statistics for summarizing a column of values
//! - [`scaling`]: Min-max ranges and one-decimal rounding
//! - [`similarity`]: Cosine similarity between feature rows
//!
//! # Examples
//!
//! ## Computing descriptive statistics
//!
//! ```
//! use gridiron_stats::descriptive::DescriptiveStats;
//!
//! let stats = DescriptiveStats::new([10.0, 20.0, f64::NAN, 30.0]).unwrap();
//! assert_eq!(stats.count, 3);
//! assert_eq!(stats.mean, 20.0);
//! assert_eq!(stats.std_dev(), Some(10.0));
//! ```
//!
//! ## Scaling into the unit interval
//!
//! ```
//! use gridiron_stats::scaling::MinMaxRange;
//!
//! let range = MinMaxRange::new([10.0, 20.0, 30.0]).unwrap();
//! assert_eq!(range.normalize(20.0), Some(0.5));
//! ```
//!
//! ## Comparing feature rows
//!
//! ```
//! use gridiron_stats::similarity::cosine_similarity;
//!
//! let sim = cosine_similarity(&[1.0, 0.0], &[1.0, 0.0]);
//! assert!((sim - 1.0).abs() < 1e-12);
//! ```

pub mod descriptive;
pub mod scaling;
pub mod similarity;

/// Returns `true` when `value` should be treated as a missing observation.
#[must_use]
pub fn is_missing(value: f64) -> bool {
    !value.is_finite()
}
