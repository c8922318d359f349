//! Attribute-level comparison between a player and their peers
//!
//! The comparison explains a similarity ranking in terms a reader can check:
//! for each of the target's fingerprint attributes it reports where the target
//! and a peer sit within the cohort's observed range, on a `0-100` scale:
//!
//! ```text
//! score = (value - cohort_min) / (cohort_max - cohort_min) * 100
//! ```
//!
//! together with the signed gap `peer - target`. All three numbers are rounded
//! to one decimal; the gap is computed before rounding.
//!
//! # Edge Cases
//!
//! - An attribute whose cohort range is degenerate (`max == min`) scores
//!   [`DEGENERATE_RANGE_SCORE`] for every player.
//! - An attribute the peer has no value for is omitted from that peer's entry.
//! - Peers that are not part of the cohort are skipped; a peer listed twice is
//!   compared once.

use std::collections::HashSet;

use gridiron_stats::{
    is_missing,
    scaling::{MinMaxRange, round_tenths},
};
use serde::{Serialize, Serializer, ser::SerializeMap};
use tracing::debug;

use crate::{fingerprint::fingerprint, table::AttributeTable, weights::NormalizedWeights};

/// Score reported for an attribute on which the whole cohort is equal.
pub const DEGENERATE_RANGE_SCORE: f64 = 50.0;

/// Target and peer scores for one attribute.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AttributeComparison {
    pub target_score: f64,
    pub similar_score: f64,
    /// `similar_score - target_score`
    pub difference: f64,
}

impl AttributeComparison {
    fn new(range: Option<MinMaxRange>, target_value: f64, similar_value: f64) -> Option<Self> {
        let target_score = range_score(range, target_value)?;
        let similar_score = range_score(range, similar_value)?;
        Some(Self {
            target_score: round_tenths(target_score),
            similar_score: round_tenths(similar_score),
            difference: round_tenths(similar_score - target_score),
        })
    }
}

/// Comparison of the target against one peer, in fingerprint order.
#[derive(Debug, Clone, PartialEq)]
pub struct PeerComparison {
    pub player: String,
    pub attributes: Vec<(String, AttributeComparison)>,
}

impl PeerComparison {
    #[must_use]
    pub fn get(&self, attribute: &str) -> Option<&AttributeComparison> {
        self.attributes
            .iter()
            .find(|(name, _)| name == attribute)
            .map(|(_, comparison)| comparison)
    }
}

/// Comparisons against every peer, in the order the peers were given.
///
/// Serializes as a map `peer -> attribute -> AttributeComparison`, keeping
/// both orders.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Comparisons {
    peers: Vec<PeerComparison>,
}

impl Comparisons {
    #[must_use]
    pub fn len(&self) -> usize {
        self.peers.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.peers.is_empty()
    }

    #[must_use]
    pub fn get(&self, player: &str) -> Option<&PeerComparison> {
        self.peers.iter().find(|peer| peer.player == player)
    }

    pub fn iter(&self) -> impl ExactSizeIterator<Item = &PeerComparison> {
        self.peers.iter()
    }
}

impl Serialize for Comparisons {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.peers.len()))?;
        for peer in &self.peers {
            map.serialize_entry(&peer.player, &AttributeMap(&peer.attributes))?;
        }
        map.end()
    }
}

struct AttributeMap<'a>(&'a [(String, AttributeComparison)]);

impl Serialize for AttributeMap<'_> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (attribute, comparison) in self.0 {
            map.serialize_entry(attribute, comparison)?;
        }
        map.end()
    }
}

/// Compares `target` with each of `peers` on the target's `top_n_attributes`
/// most distinctive attributes.
///
/// Returns an empty comparison when `target` is not part of the cohort.
#[must_use]
pub fn compare_attributes<'a, I>(
    table: &AttributeTable,
    weights: &NormalizedWeights,
    target: &str,
    peers: I,
    top_n_attributes: usize,
) -> Comparisons
where
    I: IntoIterator<Item = &'a str>,
{
    let Some(target_row) = table.find_player(target) else {
        debug!(player = target, "player not found in cohort, nothing to compare");
        return Comparisons::default();
    };

    // (attribute index, name, cohort range)
    let selected = fingerprint(table, weights, target, top_n_attributes)
        .into_iter()
        .filter_map(|entry| {
            let index = table.attribute_index(&entry.attribute)?;
            Some((index, entry.attribute, table.column_range(index)))
        })
        .collect::<Vec<_>>();

    let mut seen = HashSet::new();
    let peers = peers
        .into_iter()
        .filter(|peer| seen.insert(*peer))
        .filter_map(|peer| {
            let Some(peer_row) = table.find_player(peer) else {
                debug!(player = peer, "peer not found in cohort, skipping");
                return None;
            };
            let attributes = selected
                .iter()
                .filter_map(|(index, attribute, range)| {
                    let comparison = AttributeComparison::new(
                        *range,
                        table.value(target_row, *index),
                        table.value(peer_row, *index),
                    )?;
                    Some((attribute.clone(), comparison))
                })
                .collect();
            Some(PeerComparison {
                player: peer.to_owned(),
                attributes,
            })
        })
        .collect();

    Comparisons { peers }
}

/// Position of `value` within `range` on a `0-100` scale, unrounded.
fn range_score(range: Option<MinMaxRange>, value: f64) -> Option<f64> {
    if is_missing(value) {
        return None;
    }
    let score = range
        .and_then(|range| range.normalize(value))
        .map_or(DEGENERATE_RANGE_SCORE, |fraction| fraction * 100.0);
    Some(score)
}
