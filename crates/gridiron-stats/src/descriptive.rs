use crate::is_missing;

/// Standard deviations at or below this value are treated as zero.
const STD_DEV_EPSILON: f64 = 1e-12;

/// Descriptive statistics summarizing one column of a cohort.
///
/// Missing observations (`NaN` or infinite values) are skipped, so `count` is the
/// number of observed values rather than the number of rows.
#[derive(Debug, Clone, PartialEq)]
pub struct DescriptiveStats {
    /// Number of observed (non-missing) values.
    pub count: usize,
    /// The minimum observed value.
    pub min: f64,
    /// The maximum observed value.
    pub max: f64,
    /// The arithmetic mean of the observed values.
    pub mean: f64,
    /// Sample variance (`n - 1` denominator), `None` with fewer than two observations.
    pub variance: Option<f64>,
}

impl DescriptiveStats {
    /// Computes descriptive statistics, skipping missing values.
    ///
    /// # Returns
    ///
    /// * `Some(DescriptiveStats)` - if at least one value is observed
    /// * `None` - if every value is missing or the input is empty
    ///
    /// # Examples
    ///
    /// ```
    /// # use gridiron_stats::descriptive::DescriptiveStats;
    /// let stats = DescriptiveStats::new([5.0, 2.0, 4.0, 1.0, 3.0]).unwrap();
    /// assert_eq!(stats.min, 1.0);
    /// assert_eq!(stats.max, 5.0);
    /// assert_eq!(stats.mean, 3.0);
    /// assert_eq!(stats.variance, Some(2.5));
    ///
    /// assert!(DescriptiveStats::new([f64::NAN]).is_none());
    /// ```
    #[expect(clippy::cast_precision_loss)]
    #[must_use]
    pub fn new<I>(values: I) -> Option<Self>
    where
        I: IntoIterator<Item = f64>,
    {
        let observed = values
            .into_iter()
            .filter(|v| !is_missing(*v))
            .collect::<Vec<_>>();

        let first = *observed.first()?;
        let (min, max) = observed
            .iter()
            .fold((first, first), |(lo, hi), &v| (lo.min(v), hi.max(v)));
        let count = observed.len();
        let n = count as f64;
        let mean = observed.iter().sum::<f64>() / n;
        let variance = (count > 1).then(|| {
            observed.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / (n - 1.0)
        });

        Some(Self {
            count,
            min,
            max,
            mean,
            variance,
        })
    }

    /// Sample standard deviation, `None` with fewer than two observations.
    #[must_use]
    pub fn std_dev(&self) -> Option<f64> {
        self.variance.map(f64::sqrt)
    }

    /// Standard score of `value` relative to this distribution.
    ///
    /// Returns `None` when the score is undefined: `value` is missing, there are
    /// fewer than two observations, or the observations do not vary.
    ///
    /// Equal observations never score, even when rounding in the mean leaves a
    /// tiny nonzero standard deviation.
    ///
    /// # Examples
    ///
    /// ```
    /// # use gridiron_stats::descriptive::DescriptiveStats;
    /// let stats = DescriptiveStats::new([10.0, 20.0, 30.0]).unwrap();
    /// assert_eq!(stats.z_score(30.0), Some(1.0));
    ///
    /// let constant = DescriptiveStats::new([7.0, 7.0, 7.0]).unwrap();
    /// assert_eq!(constant.z_score(7.0), None);
    /// ```
    #[must_use]
    pub fn z_score(&self, value: f64) -> Option<f64> {
        if is_missing(value) {
            return None;
        }
        let std_dev = self.std_dev()?;
        if self.max <= self.min || std_dev <= STD_DEV_EPSILON {
            return None;
        }
        Some((value - self.mean) / std_dev)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_values() {
        assert!(DescriptiveStats::new(std::iter::empty()).is_none());
    }

    #[test]
    fn test_missing_values_are_skipped() {
        let stats = DescriptiveStats::new([f64::NAN, 4.0, f64::INFINITY, 8.0]).unwrap();
        assert_eq!(stats.count, 2);
        assert_eq!(stats.min, 4.0);
        assert_eq!(stats.max, 8.0);
        assert_eq!(stats.mean, 6.0);
        assert_eq!(stats.variance, Some(8.0));
    }

    #[test]
    fn test_single_value_has_no_variance() {
        let stats = DescriptiveStats::new([42.0]).unwrap();
        assert_eq!(stats.count, 1);
        assert_eq!(stats.variance, None);
        assert_eq!(stats.std_dev(), None);
        assert_eq!(stats.z_score(42.0), None);
    }

    #[test]
    fn test_z_score_sign() {
        let stats = DescriptiveStats::new([10.0, 20.0, 30.0]).unwrap();
        assert_eq!(stats.z_score(10.0), Some(-1.0));
        assert_eq!(stats.z_score(20.0), Some(0.0));
        assert_eq!(stats.z_score(f64::NAN), None);
    }

    #[test]
    fn test_constant_large_values_have_no_z_score() {
        let stats = DescriptiveStats::new([12345.678; 11]).unwrap();
        assert_eq!(stats.min, stats.max);
        assert_eq!(stats.z_score(12345.678), None);

        let stats = DescriptiveStats::new([1_000_000.1; 9]).unwrap();
        assert_eq!(stats.z_score(1_000_000.1), None);
    }
}
