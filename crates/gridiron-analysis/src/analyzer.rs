//! Request orchestration
//!
//! [`Analyzer`] answers the three questions a caller can ask about a position:
//! who plays it ([`Analyzer::list_players`]), who plays like a given player and
//! why ([`Analyzer::analyze`]), and how a player measures up against a chosen set
//! of peers ([`Analyzer::compare`]).
//!
//! Every call loads a fresh [`Cohort`] snapshot from the [`CohortSource`] and
//! derives everything else from it; the analyzer holds no per-request state.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::{
    comparison::{Comparisons, compare_attributes},
    error::AnalysisError,
    feature_matrix::FeatureMatrix,
    fingerprint::{FingerprintEntry, fingerprint},
    similarity::{SimilarPlayer, rank_similar},
    source::{Cohort, CohortSource},
};

/// Result sizes of an analysis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisOptions {
    /// Number of similar players to rank.
    pub similar_players: usize,
    /// Number of fingerprint attributes.
    pub fingerprint_size: usize,
    /// Number of fingerprint attributes each comparison covers.
    pub comparison_attributes: usize,
}

impl Default for AnalysisOptions {
    fn default() -> Self {
        Self {
            similar_players: 5,
            fingerprint_size: 10,
            comparison_attributes: 10,
        }
    }
}

/// Result of [`Analyzer::analyze`].
///
/// All parts are empty when the player is not part of the cohort. They can be
/// empty for a known player too (a one-player cohort, or no varying attribute),
/// so [`Analysis::player_found`] tells the two cases apart.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Analysis {
    #[serde(skip)]
    pub player_found: bool,
    pub similar_players: Vec<SimilarPlayer>,
    pub fingerprint: Vec<FingerprintEntry>,
    pub comparisons: Comparisons,
}

/// Runs the similarity pipeline against a cohort source.
#[derive(Debug, Clone)]
pub struct Analyzer<S> {
    source: S,
    options: AnalysisOptions,
}

impl<S> Analyzer<S>
where
    S: CohortSource,
{
    pub fn new(source: S) -> Self {
        Self {
            source,
            options: AnalysisOptions::default(),
        }
    }

    #[must_use]
    pub fn with_options(mut self, options: AnalysisOptions) -> Self {
        self.options = options;
        self
    }

    pub fn options(&self) -> &AnalysisOptions {
        &self.options
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// Distinct player names of `position`, in cohort order.
    ///
    /// # Errors
    ///
    /// Returns an error if the cohort cannot be loaded.
    pub fn list_players(&self, position: &str) -> Result<Vec<String>, AnalysisError> {
        let Cohort { table, .. } = self.source.load_cohort(position)?;
        let mut seen = HashSet::new();
        let players = table
            .players()
            .iter()
            .filter(|player| !player.is_empty() && seen.insert(player.as_str()))
            .cloned()
            .collect();
        Ok(players)
    }

    /// Similar players, fingerprint and peer comparisons for `player`.
    ///
    /// # Errors
    ///
    /// - [`AnalysisError::NotFound`] if the source has no cohort for `position`
    /// - [`AnalysisError::Configuration`] if the cohort or its weights are invalid
    pub fn analyze(&self, position: &str, player: &str) -> Result<Analysis, AnalysisError> {
        let Cohort { table, weights } = self.source.load_cohort(position)?;
        let weights = weights.normalize()?;
        let matrix = FeatureMatrix::build(&table, &weights);

        let similar_players = rank_similar(&table, &matrix, player, self.options.similar_players);
        let fingerprint = fingerprint(&table, &weights, player, self.options.fingerprint_size);
        let comparisons = compare_attributes(
            &table,
            &weights,
            player,
            similar_players.iter().map(|peer| peer.player.as_str()),
            self.options.comparison_attributes,
        );
        info!(
            position,
            player,
            similar = similar_players.len(),
            fingerprint = fingerprint.len(),
            "analysis complete"
        );

        Ok(Analysis {
            player_found: table.find_player(player).is_some(),
            similar_players,
            fingerprint,
            comparisons,
        })
    }

    /// Compares `target` with an explicit set of candidates.
    ///
    /// Candidates are compared in cohort order; candidates that are not part of
    /// the cohort are ignored.
    ///
    /// # Errors
    ///
    /// - [`AnalysisError::NotFound`] if the source has no cohort for `position`
    /// - [`AnalysisError::Configuration`] if the cohort or its weights are invalid
    pub fn compare<'a, I>(
        &self,
        position: &str,
        target: &str,
        candidates: I,
    ) -> Result<Comparisons, AnalysisError>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let Cohort { table, weights } = self.source.load_cohort(position)?;
        let weights = weights.normalize()?;
        let candidates = candidates.into_iter().collect::<HashSet<_>>();
        let peers = table
            .players()
            .iter()
            .map(String::as_str)
            .filter(|player| candidates.contains(player));
        let comparisons = compare_attributes(
            &table,
            &weights,
            target,
            peers,
            self.options.comparison_attributes,
        );
        info!(
            position,
            player = target,
            peers = comparisons.len(),
            "comparison complete"
        );
        Ok(comparisons)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        source::InMemorySource,
        table::{AttributeTable, CohortSchema, PlayerRecord},
        weights::WeightTable,
    };

    fn speed_cohort() -> Cohort {
        Cohort {
            table: AttributeTable::from_records(
                CohortSchema::new(["Speed"]).unwrap(),
                [
                    PlayerRecord::new("A", "Winger", vec![10.0]),
                    PlayerRecord::new("B", "Winger", vec![20.0]),
                    PlayerRecord::new("C", "Winger", vec![30.0]),
                ],
            )
            .unwrap(),
            weights: WeightTable::from_iter([("Speed", 1.0)]),
        }
    }

    fn midfield_cohort() -> Cohort {
        Cohort {
            table: AttributeTable::from_records(
                CohortSchema::new(["Passes", "Tackles", "Shots", "Height"]).unwrap(),
                [
                    PlayerRecord::new("Iniesta", "CM", vec![80.0, 20.0, 10.0, 171.0]),
                    PlayerRecord::new("Xavi", "CM", vec![90.0, 25.0, 8.0, 170.0]),
                    PlayerRecord::new("Busquets", "CM", vec![70.0, 60.0, 2.0, 189.0]),
                    PlayerRecord::new("Kante", "CM", vec![50.0, 80.0, 5.0, 168.0]),
                    PlayerRecord::new("Lampard", "CM", vec![55.0, 30.0, 40.0, 184.0]),
                ],
            )
            .unwrap(),
            weights: WeightTable::from_iter([("Passes", 4.0), ("Tackles", 2.0), ("Shots", 2.0)]),
        }
    }

    fn analyzer() -> Analyzer<InMemorySource> {
        Analyzer::new(
            InMemorySource::new()
                .with_cohort("winger", speed_cohort())
                .with_cohort("midfielder", midfield_cohort()),
        )
    }

    #[test]
    fn test_default_options() {
        let options = AnalysisOptions::default();
        assert_eq!(options.similar_players, 5);
        assert_eq!(options.fingerprint_size, 10);
        assert_eq!(options.comparison_attributes, 10);
    }

    #[test]
    fn test_options_partial_deserialize() {
        let options: AnalysisOptions = serde_json::from_str(r#"{"similar_players": 3}"#).unwrap();
        assert_eq!(
            options,
            AnalysisOptions {
                similar_players: 3,
                ..AnalysisOptions::default()
            }
        );
    }

    #[test]
    fn test_list_players() {
        let players = analyzer().list_players("midfielder").unwrap();
        assert_eq!(players, ["Iniesta", "Xavi", "Busquets", "Kante", "Lampard"]);
    }

    #[test]
    fn test_analyze_speed_cohort() {
        let analysis = analyzer().analyze("winger", "A").unwrap();

        let similar = analysis
            .similar_players
            .iter()
            .map(|p| p.player.as_str())
            .collect::<Vec<_>>();
        assert_eq!(similar, ["B", "C"]);
        // A scales to the zero vector
        assert!(analysis.similar_players.iter().all(|p| p.similarity == 0.0));

        assert_eq!(analysis.fingerprint.len(), 1);
        assert!((analysis.fingerprint[0].score - 1.0).abs() < 1e-9);

        let c = analysis.comparisons.get("C").unwrap().get("Speed").unwrap();
        assert_eq!(c.target_score, 0.0);
        assert_eq!(c.similar_score, 100.0);
        assert_eq!(c.difference, 100.0);
    }

    #[test]
    fn test_analyze_excludes_target_and_limits() {
        let analyzer = analyzer().with_options(AnalysisOptions {
            similar_players: 2,
            fingerprint_size: 2,
            comparison_attributes: 1,
        });
        for player in ["Iniesta", "Xavi", "Busquets", "Kante", "Lampard"] {
            let analysis = analyzer.analyze("midfielder", player).unwrap();
            assert_eq!(analysis.similar_players.len(), 2);
            assert!(analysis.similar_players.iter().all(|p| p.player != player));
            assert!(analysis.fingerprint.len() <= 2);
            assert!(
                analysis
                    .fingerprint
                    .windows(2)
                    .all(|w| w[0].score >= w[1].score)
            );
            assert_eq!(analysis.comparisons.len(), 2);
            assert!(analysis.comparisons.iter().all(|p| p.attributes.len() <= 1));
        }
    }

    #[test]
    fn test_unweighted_attribute_never_selected() {
        let analysis = analyzer().analyze("midfielder", "Busquets").unwrap();
        assert!(analysis.fingerprint.iter().all(|e| e.attribute != "Height"));
        assert!(
            analysis
                .comparisons
                .iter()
                .all(|peer| peer.get("Height").is_none())
        );
    }

    #[test]
    fn test_analyze_unknown_player_is_empty() {
        let analysis = analyzer().analyze("midfielder", "NonexistentName").unwrap();
        assert!(!analysis.player_found);
        assert!(analysis.similar_players.is_empty());
        assert!(analysis.fingerprint.is_empty());
        assert!(analysis.comparisons.is_empty());
        assert_eq!(
            serde_json::to_value(&analysis).unwrap(),
            serde_json::json!({"similar_players": [], "fingerprint": [], "comparisons": {}})
        );
    }

    #[test]
    fn test_known_player_with_empty_results_is_found() {
        let cohort = Cohort {
            table: AttributeTable::from_records(
                CohortSchema::new(["Speed"]).unwrap(),
                [PlayerRecord::new("Solo", "Winger", vec![10.0])],
            )
            .unwrap(),
            weights: WeightTable::from_iter([("Speed", 1.0)]),
        };
        let analyzer = Analyzer::new(InMemorySource::new().with_cohort("winger", cohort));

        let analysis = analyzer.analyze("winger", "Solo").unwrap();
        assert!(analysis.player_found);
        assert!(analysis.similar_players.is_empty());
        assert!(analysis.fingerprint.is_empty());

        assert!(!analyzer.analyze("winger", "Nobody").unwrap().player_found);
    }

    #[test]
    fn test_analyze_unknown_position_is_not_found() {
        let err = analyzer().analyze("goalkeeper", "A").unwrap_err();
        assert!(err.is_not_found());
        assert!(analyzer().list_players("goalkeeper").unwrap_err().is_not_found());
    }

    #[test]
    fn test_zero_weights_are_a_configuration_error() {
        let mut cohort = speed_cohort();
        cohort.weights = WeightTable::from_iter([("Speed", 0.0)]);
        let analyzer = Analyzer::new(InMemorySource::new().with_cohort("winger", cohort));

        assert!(analyzer.analyze("winger", "A").unwrap_err().is_configuration());
        assert!(
            analyzer
                .compare("winger", "A", ["B"])
                .unwrap_err()
                .is_configuration()
        );
    }

    #[test]
    fn test_analyze_is_idempotent() {
        let analyzer = analyzer();
        let first = analyzer.analyze("midfielder", "Xavi").unwrap();
        let second = analyzer.analyze("midfielder", "Xavi").unwrap();
        assert_eq!(first, second);
        assert_eq!(
            serde_json::to_string(&first).unwrap(),
            serde_json::to_string(&second).unwrap()
        );
    }

    #[test]
    fn test_compare_keeps_cohort_order() {
        let comparisons = analyzer()
            .compare("midfielder", "Xavi", ["Lampard", "Nobody", "Iniesta", "Lampard"])
            .unwrap();
        let peers = comparisons
            .iter()
            .map(|p| p.player.as_str())
            .collect::<Vec<_>>();
        assert_eq!(peers, ["Iniesta", "Lampard"]);
    }

    #[test]
    fn test_compare_unknown_target_is_empty() {
        let comparisons = analyzer()
            .compare("midfielder", "Nobody", ["Xavi"])
            .unwrap();
        assert!(comparisons.is_empty());
    }
}
