//! Cosine-similarity ranking of cohort peers
//!
//! [`rank_similar`] scores every player of a cohort against a target player's
//! row of the [`FeatureMatrix`] and returns the closest peers.
//!
//! The target is excluded by row index, never by name, so a peer with an
//! identical stat line is still reported. Ties keep the cohort's row order.
//!
//! Each peer carries the text context columns of its row (club, nation, ...),
//! serialized next to the identity fields.

use std::collections::BTreeMap;

use gridiron_stats::similarity::cosine_similarity;
use serde::Serialize;
use tracing::debug;

use crate::{feature_matrix::FeatureMatrix, table::AttributeTable};

const SIMILARITY_FIELD: &str = "Similarity";

/// A peer of the target player and how similar they are.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SimilarPlayer {
    #[serde(rename = "Player")]
    pub player: String,
    #[serde(rename = "Position")]
    pub position: String,
    /// Cosine similarity in `[-1, 1]`; `[0, 1]` for scaled features.
    #[serde(rename = "Similarity")]
    pub similarity: f64,
    /// Context columns of the peer's row, keyed by column name.
    #[serde(flatten)]
    pub context: BTreeMap<String, String>,
}

/// Ranks the `top_n` players most similar to `player`.
///
/// `matrix` must have been built from `table`. Returns an empty list when
/// `player` is not part of the cohort.
#[must_use]
pub fn rank_similar(
    table: &AttributeTable,
    matrix: &FeatureMatrix,
    player: &str,
    top_n: usize,
) -> Vec<SimilarPlayer> {
    debug_assert_eq!(table.len(), matrix.len(), "matrix must be built from table");

    let Some(target) = table.find_player(player) else {
        debug!(player, "player not found in cohort, no similar players");
        return vec![];
    };
    let target_row = matrix.row(target);

    let mut scores = matrix
        .rows()
        .enumerate()
        .filter(|(row, _)| *row != target)
        .map(|(row, features)| (row, cosine_similarity(target_row, features)))
        .collect::<Vec<_>>();
    // stable: equal scores keep row order
    scores.sort_by(|(_, a), (_, b)| b.total_cmp(a));

    scores
        .into_iter()
        .take(top_n)
        .map(|(row, similarity)| SimilarPlayer {
            player: table.player(row).to_owned(),
            position: table.position(row).to_owned(),
            similarity,
            context: table
                .context_row(row)
                .filter(|(column, _)| *column != SIMILARITY_FIELD)
                .map(|(column, value)| (column.to_owned(), value.to_owned()))
                .collect(),
        })
        .collect()
}
