//! Player fingerprints
//!
//! A fingerprint lists the attributes on which a player deviates most from the
//! cohort mean, measured as the absolute weighted z-score:
//!
//! ```text
//! score = | (value - cohort_mean) / cohort_std_dev | * normalized_weight
//! ```
//!
//! Statistics are taken over the raw, unweighted values of the cohort (sample
//! standard deviation, missing values skipped), independently of the scaled
//! [`FeatureMatrix`](crate::feature_matrix::FeatureMatrix). The direction of the
//! deviation is discarded; only how distinctive the player is matters.
//!
//! An attribute is left out of the fingerprint when its z-score is undefined:
//! the player's value is missing, the cohort has fewer than two observations,
//! or the cohort's standard deviation is zero. Unweighted attributes are left
//! out as well.

use serde::Serialize;
use tracing::debug;

use crate::{table::AttributeTable, weights::NormalizedWeights};

/// One attribute of a fingerprint.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FingerprintEntry {
    #[serde(rename = "Attribute")]
    pub attribute: String,
    #[serde(rename = "Weighted Z-Score")]
    pub score: f64,
}

/// Computes the `top_k` most distinctive attributes of `player`.
///
/// The result is sorted by descending score; ties keep schema order. Returns an
/// empty list when `player` is not part of the cohort.
#[must_use]
pub fn fingerprint(
    table: &AttributeTable,
    weights: &NormalizedWeights,
    player: &str,
    top_k: usize,
) -> Vec<FingerprintEntry> {
    let Some(row) = table.find_player(player) else {
        debug!(player, "player not found in cohort, empty fingerprint");
        return vec![];
    };

    let mut entries = table
        .attributes()
        .iter()
        .enumerate()
        .filter_map(|(index, attribute)| {
            let weight = weights.get(attribute);
            if weight <= 0.0 {
                return None;
            }
            let z_score = table.column_stats(index)?.z_score(table.value(row, index))?;
            Some(FingerprintEntry {
                attribute: attribute.clone(),
                score: (z_score * weight).abs(),
            })
        })
        .collect::<Vec<_>>();
    entries.sort_by(|a, b| b.score.total_cmp(&a.score));
    entries.truncate(top_k);
    entries
}
