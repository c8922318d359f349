/// Cosine similarity between two feature rows.
///
/// Returns `0.0` when either row has zero norm; the angle to a zero vector is
/// undefined and such a row carries no directional information to match on.
///
/// # Panics
///
/// Panics if the rows have different lengths.
///
/// # Examples
///
/// ```
/// use gridiron_stats::similarity::cosine_similarity;
///
/// assert_eq!(cosine_similarity(&[0.0, 0.0], &[1.0, 2.0]), 0.0);
/// let sim = cosine_similarity(&[1.0, 1.0], &[2.0, 2.0]);
/// assert!((sim - 1.0).abs() < 1e-12);
/// ```
#[must_use]
pub fn cosine_similarity(a: &[f64], b: &[f64]) -> f64 {
    assert_eq!(a.len(), b.len(), "feature rows must have equal length");

    let (dot, norm_a, norm_b) = a
        .iter()
        .zip(b)
        .fold((0.0, 0.0, 0.0), |(dot, na, nb), (x, y)| {
            (dot + x * y, na + x * x, nb + y * y)
        });
    if norm_a <= 0.0 || norm_b <= 0.0 {
        return 0.0;
    }
    dot / (norm_a.sqrt() * norm_b.sqrt())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() < 1e-12,
            "expected {expected}, got {actual}"
        );
    }

    #[test]
    fn test_identical_rows() {
        assert_close(cosine_similarity(&[0.3, 0.4, 0.5], &[0.3, 0.4, 0.5]), 1.0);
    }

    #[test]
    fn test_orthogonal_rows() {
        assert_close(cosine_similarity(&[1.0, 0.0], &[0.0, 1.0]), 0.0);
    }

    #[test]
    fn test_opposite_rows() {
        assert_close(cosine_similarity(&[1.0, -1.0], &[-1.0, 1.0]), -1.0);
    }

    #[test]
    fn test_zero_row() {
        assert_eq!(cosine_similarity(&[0.0, 0.0], &[0.0, 0.0]), 0.0);
        assert_eq!(cosine_similarity(&[], &[]), 0.0);
    }

    #[test]
    #[should_panic(expected = "equal length")]
    fn test_length_mismatch() {
        let _ = cosine_similarity(&[1.0], &[1.0, 2.0]);
    }
}
