//! Error types for cohort loading and analysis
//!
//! Two failures abort an analysis request: a malformed cohort or weight table
//! ([`ConfigurationError`]) and an unknown position ([`AnalysisError::NotFound`]).
//! An unknown player is not an error; the pipeline returns empty results instead.

use std::{io, path::PathBuf};

/// A cohort or weight table that cannot be analyzed.
#[derive(Debug, derive_more::Display, derive_more::Error)]
pub enum ConfigurationError {
    #[display("weight table is empty")]
    EmptyWeights,
    #[display("weight table has no positive weight")]
    NoPositiveWeight,
    #[display("weight '{value}' for attribute '{attribute}' is not a finite number")]
    InvalidWeight { attribute: String, value: String },
    #[display("player '{player}' appears more than once in the cohort")]
    DuplicatePlayer { player: String },
    #[display("attribute '{attribute}' is declared more than once")]
    DuplicateAttribute { attribute: String },
    #[display("missing required column '{column}'")]
    MissingColumn { column: String },
    #[display("column '{column}' has non-numeric value '{value}' for player '{player}'")]
    NonNumericValue {
        column: String,
        player: String,
        value: String,
    },
    #[display("row for player '{player}' has {actual} values, expected {expected}")]
    RowLength {
        player: String,
        expected: usize,
        actual: usize,
    },
    #[display("column '{column}' has {actual} values, expected {expected}")]
    ColumnLength {
        column: String,
        expected: usize,
        actual: usize,
    },
}

#[derive(
    Debug, derive_more::Display, derive_more::Error, derive_more::From, derive_more::IsVariant,
)]
pub enum AnalysisError {
    #[display("invalid cohort configuration: {_0}")]
    #[from]
    Configuration(ConfigurationError),
    #[display("no data source for position '{position}'")]
    NotFound { position: String },
    #[display("failed to read {}: {source}", path.display())]
    Io { path: PathBuf, source: io::Error },
    #[display("failed to parse CSV {}: {source}", path.display())]
    Csv { path: PathBuf, source: csv::Error },
}

impl AnalysisError {
    pub(crate) fn not_found(position: &str) -> Self {
        Self::NotFound {
            position: position.to_owned(),
        }
    }
}
