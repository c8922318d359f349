//! Min-max scaling and rounding helpers
//!
//! [`MinMaxRange`] captures the observed range of a column and maps values into
//! the unit interval. A column whose values are all equal has no usable range;
//! [`MinMaxRange::normalize`] reports that case as `None` so each caller picks its
//! own deterministic fallback instead of dividing by zero.

use crate::is_missing;

/// Observed `[min, max]` range of a column.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MinMaxRange {
    pub min: f64,
    pub max: f64,
}

impl MinMaxRange {
    /// Computes the observed range, skipping missing values.
    ///
    /// Returns `None` if no value is observed.
    ///
    /// # Examples
    ///
    /// ```
    /// use gridiron_stats::scaling::MinMaxRange;
    ///
    /// let range = MinMaxRange::new([3.0, f64::NAN, -1.0, 2.0]).unwrap();
    /// assert_eq!(range.min, -1.0);
    /// assert_eq!(range.max, 3.0);
    /// ```
    #[must_use]
    pub fn new<I>(values: I) -> Option<Self>
    where
        I: IntoIterator<Item = f64>,
    {
        values
            .into_iter()
            .filter(|v| !is_missing(*v))
            .fold(None, |range, v| {
                Some(match range {
                    None => Self { min: v, max: v },
                    Some(Self { min, max }) => Self {
                        min: min.min(v),
                        max: max.max(v),
                    },
                })
            })
    }

    /// Width of the range.
    #[must_use]
    pub fn span(&self) -> f64 {
        self.max - self.min
    }

    /// Returns `true` if every observed value was equal.
    #[must_use]
    pub fn is_degenerate(&self) -> bool {
        self.span() <= 0.0
    }

    /// Position of `value` within the range, as a fraction in `[0, 1]` for
    /// values inside the range.
    ///
    /// Returns `None` for a degenerate range or a missing value.
    ///
    /// # Examples
    ///
    /// ```
    /// use gridiron_stats::scaling::MinMaxRange;
    ///
    /// let range = MinMaxRange::new([0.0, 4.0]).unwrap();
    /// assert_eq!(range.normalize(1.0), Some(0.25));
    ///
    /// let flat = MinMaxRange::new([5.0, 5.0]).unwrap();
    /// assert_eq!(flat.normalize(5.0), None);
    /// ```
    #[must_use]
    pub fn normalize(&self, value: f64) -> Option<f64> {
        if self.is_degenerate() || is_missing(value) {
            return None;
        }
        Some((value - self.min) / self.span())
    }
}

/// Rounds to one decimal place, halves away from zero.
///
/// # Examples
///
/// ```
/// use gridiron_stats::scaling::round_tenths;
///
/// assert_eq!(round_tenths(33.333), 33.3);
/// assert_eq!(round_tenths(-12.25), -12.3);
/// ```
#[must_use]
pub fn round_tenths(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
