//! Attribute weights and max-normalization
//!
//! A [`WeightTable`] maps attribute names to the importance assigned to them for
//! one position. Before use it is rescaled so that the largest weight becomes
//! `1.0` ([`WeightTable::normalize`]); the same [`NormalizedWeights`] drive both
//! the similarity feature space and the fingerprint z-scores.
//!
//! # Absent and non-positive weights
//!
//! An attribute with no entry in the table, or with a weight `<= 0`, has a
//! normalized weight of `0.0`. Such attributes stay in the
//! [`AttributeTable`](crate::table::AttributeTable) for display, but are left out
//! of the feature matrix, the fingerprint and the comparison.

use std::collections::BTreeMap;

use crate::error::ConfigurationError;

/// Raw attribute weights as provided by a data source.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WeightTable {
    weights: BTreeMap<String, f64>,
}

impl WeightTable {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the weight of `attribute`, replacing any earlier entry.
    pub fn insert<S>(&mut self, attribute: S, weight: f64)
    where
        S: Into<String>,
    {
        self.weights.insert(attribute.into(), weight);
    }

    #[must_use]
    pub fn get(&self, attribute: &str) -> Option<f64> {
        self.weights.get(attribute).copied()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.weights.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.weights.is_empty()
    }

    /// Rescales every weight by the maximum weight.
    ///
    /// # Errors
    ///
    /// - [`ConfigurationError::EmptyWeights`] if the table has no entries
    /// - [`ConfigurationError::InvalidWeight`] if a weight is `NaN` or infinite
    /// - [`ConfigurationError::NoPositiveWeight`] if no weight is `> 0`
    pub fn normalize(&self) -> Result<NormalizedWeights, ConfigurationError> {
        if self.weights.is_empty() {
            return Err(ConfigurationError::EmptyWeights);
        }
        if let Some((attribute, weight)) = self.weights.iter().find(|(_, w)| !w.is_finite()) {
            return Err(ConfigurationError::InvalidWeight {
                attribute: attribute.clone(),
                value: weight.to_string(),
            });
        }

        let max = self.weights.values().copied().fold(f64::NEG_INFINITY, f64::max);
        if max <= 0.0 {
            return Err(ConfigurationError::NoPositiveWeight);
        }

        let weights = self
            .weights
            .iter()
            .filter(|(_, w)| **w > 0.0)
            .map(|(attribute, w)| (attribute.clone(), w / max))
            .collect();
        Ok(NormalizedWeights { weights })
    }
}

impl<S> FromIterator<(S, f64)> for WeightTable
where
    S: Into<String>,
{
    fn from_iter<I>(iter: I) -> Self
    where
        I: IntoIterator<Item = (S, f64)>,
    {
        let mut table = Self::new();
        for (attribute, weight) in iter {
            table.insert(attribute, weight);
        }
        table
    }
}

/// Weights rescaled into `(0, 1]`, with the largest weight equal to `1.0`.
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedWeights {
    weights: BTreeMap<String, f64>,
}

impl NormalizedWeights {
    /// Normalized weight of `attribute`, `0.0` when absent.
    #[must_use]
    pub fn get(&self, attribute: &str) -> f64 {
        self.weights.get(attribute).copied().unwrap_or(0.0)
    }

    /// Returns `true` if `attribute` takes part in the analysis.
    #[must_use]
    pub fn is_weighted(&self, attribute: &str) -> bool {
        self.weights.contains_key(attribute)
    }
}
