//! Player similarity analysis over positional cohorts
//!
//! This crate finds the players whose statistical profile is closest to a given
//! player, explains what makes that player distinctive, and compares them with
//! their peers attribute by attribute.
//!
//! # Overview
//!
//! A position is analyzed as a **cohort**: every player of that position, with
//! one row of raw attribute values each, plus a table of attribute weights
//! expressing what matters for the position. The pipeline runs in stages:
//!
//! 1. **Load** ([`source::CohortSource`]): Fetch a [`source::Cohort`] snapshot
//!    for the position, from CSV files ([`csv_source::CsvDirectorySource`]) or
//!    memory ([`source::InMemorySource`])
//! 2. **Normalize Weights** ([`weights::WeightTable::normalize`]): Rescale so the
//!    largest weight is `1.0`; unweighted attributes get `0.0`
//! 3. **Build Features** ([`feature_matrix::FeatureMatrix`]): Weight, min-max
//!    scale and impute every weighted attribute
//! 4. **Rank** ([`similarity::rank_similar`]): Cosine similarity against every
//!    other player
//! 5. **Fingerprint** ([`fingerprint::fingerprint`]): Weighted absolute z-scores
//!    over the raw cohort, independent of stage 3
//! 6. **Compare** ([`comparison::compare_attributes`]): `0-100` range scores of
//!    the target and each peer on the fingerprint attributes
//!
//! [`analyzer::Analyzer`] sequences these stages for each request.
//!
//! # Failure Model
//!
//! - A missing position is [`error::AnalysisError::NotFound`].
//! - Malformed data or weights are [`error::AnalysisError::Configuration`].
//! - An unknown player is a lookup miss: results are empty, not an error.
//! - Degenerate statistics (constant columns, missing values) are resolved by
//!   fixed policies documented on each stage and never produce `NaN` output.
//!
//! # Examples
//!
//! ```
//! use gridiron_analysis::{
//!     analyzer::Analyzer,
//!     source::{Cohort, InMemorySource},
//!     table::{AttributeTable, CohortSchema, PlayerRecord},
//!     weights::WeightTable,
//! };
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//!
//! let table = AttributeTable::from_records(
//!     CohortSchema::new(["Speed"])?,
//!     [
//!         PlayerRecord::new("A", "Winger", vec![10.0]),
//!         PlayerRecord::new("B", "Winger", vec![20.0]),
//!         PlayerRecord::new("C", "Winger", vec![30.0]),
//!     ],
//! )?;
//! let weights = WeightTable::from_iter([("Speed", 1.0)]);
//! let source = InMemorySource::new().with_cohort("winger", Cohort { table, weights });
//!
//! let analysis = Analyzer::new(source).analyze("winger", "C")?;
//! assert_eq!(analysis.similar_players[0].player, "B");
//! assert_eq!(analysis.fingerprint[0].attribute, "Speed");
//! # Ok(())
//! # }
//! ```

pub mod analyzer;
pub mod comparison;
pub mod csv_source;
pub mod error;
pub mod feature_matrix;
pub mod fingerprint;
pub mod similarity;
pub mod source;
pub mod table;
pub mod weights;
