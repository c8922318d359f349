//! Feature matrix construction for similarity search
//!
//! This module provides [`FeatureMatrix`], the weighted and scaled numeric
//! representation of a cohort that [`similarity`](crate::similarity) ranks
//! players in.
//!
//! # Pipeline
//!
//! For every weighted attribute of the [`AttributeTable`], in schema order:
//!
//! 1. **Weight**: multiply each raw value by the attribute's normalized weight
//! 2. **Scale**: min-max scale the weighted values into `[0, 1]` using the range
//!    observed in the current cohort
//! 3. **Impute**: replace missing values with the mean of the scaled column
//!
//! Attributes with a normalized weight of `0.0` are not part of the matrix.
//!
//! # Scaling Policy
//!
//! Ranges are recomputed on every build, so feature values are only comparable
//! within one cohort at one point in time. A column that is constant across the
//! cohort has no usable range; every observed value in it scales to `0.0`. A
//! column with no observed values imputes `0.0`.
//!
//! # Example
//!
//! ```
//! use gridiron_analysis::{
//!     feature_matrix::FeatureMatrix,
//!     table::{AttributeTable, CohortSchema, PlayerRecord},
//!     weights::WeightTable,
//! };
//!
//! let schema = CohortSchema::new(["Speed"]).unwrap();
//! let table = AttributeTable::from_records(
//!     schema,
//!     [
//!         PlayerRecord::new("A", "Winger", vec![10.0]),
//!         PlayerRecord::new("B", "Winger", vec![20.0]),
//!         PlayerRecord::new("C", "Winger", vec![30.0]),
//!     ],
//! )
//! .unwrap();
//! let weights = WeightTable::from_iter([("Speed", 1.0)]).normalize().unwrap();
//!
//! let matrix = FeatureMatrix::build(&table, &weights);
//! assert_eq!(matrix.row(0), &[0.0]);
//! assert_eq!(matrix.row(1), &[0.5]);
//! assert_eq!(matrix.row(2), &[1.0]);
//! ```

use gridiron_stats::{is_missing, scaling::MinMaxRange};
use tracing::debug;

use crate::{table::AttributeTable, weights::NormalizedWeights};

/// Weighted, scaled and imputed features, one row per player.
///
/// Rows are aligned with the rows of the [`AttributeTable`] it was built from.
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureMatrix {
    columns: Vec<String>,
    rows: Vec<Vec<f64>>,
}

impl FeatureMatrix {
    /// Builds the feature matrix of `table` under `weights`.
    #[must_use]
    pub fn build(table: &AttributeTable, weights: &NormalizedWeights) -> Self {
        let mut columns = vec![];
        let mut rows = vec![Vec::new(); table.len()];

        for (index, attribute) in table.attributes().iter().enumerate() {
            let weight = weights.get(attribute);
            if weight <= 0.0 {
                debug!(%attribute, "attribute has no weight, leaving it out of the feature space");
                continue;
            }
            let scaled = scale_column(table.column(index), weight);
            for (row, value) in rows.iter_mut().zip(scaled) {
                row.push(value);
            }
            columns.push(attribute.clone());
        }

        debug!(
            players = table.len(),
            features = columns.len(),
            "built feature matrix"
        );
        Self { columns, rows }
    }

    /// Names of the attributes forming the feature space, in column order.
    #[must_use]
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Number of rows (players).
    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Feature vector of one player.
    #[must_use]
    pub fn row(&self, row: usize) -> &[f64] {
        &self.rows[row]
    }

    pub fn rows(&self) -> impl ExactSizeIterator<Item = &[f64]> {
        self.rows.iter().map(Vec::as_slice)
    }
}

/// Weights, min-max scales and mean-imputes one raw column.
fn scale_column(raw: &[f64], weight: f64) -> Vec<f64> {
    let weighted = raw.iter().map(|v| v * weight).collect::<Vec<_>>();
    let range = MinMaxRange::new(weighted.iter().copied());

    let scaled = weighted
        .iter()
        .map(|&v| {
            if is_missing(v) {
                return f64::NAN;
            }
            range.and_then(|r| r.normalize(v)).unwrap_or(0.0)
        })
        .collect::<Vec<_>>();

    let fill = column_mean(&scaled).unwrap_or(0.0);
    scaled
        .into_iter()
        .map(|v| if is_missing(v) { fill } else { v })
        .collect()
}

#[expect(clippy::cast_precision_loss)]
fn column_mean(values: &[f64]) -> Option<f64> {
    let (sum, count) = values
        .iter()
        .filter(|v| !is_missing(**v))
        .fold((0.0, 0_usize), |(sum, count), v| (sum + v, count + 1));
    (count > 0).then(|| sum / count as f64)
}
