//! Cohort data sources
//!
//! The pipeline never reads storage itself. It asks a [`CohortSource`] for the
//! [`Cohort`] of a position and works on the returned snapshot, so a source can be
//! backed by files ([`CsvDirectorySource`](crate::csv_source::CsvDirectorySource)),
//! a database, or fixtures ([`InMemorySource`]).
//!
//! A source returns an owned snapshot read in one pass; nothing computed from it
//! is shared between requests.

use std::collections::BTreeMap;

use crate::{error::AnalysisError, table::AttributeTable, weights::WeightTable};

/// Everything the pipeline needs about one position.
#[derive(Debug, Clone, PartialEq)]
pub struct Cohort {
    pub table: AttributeTable,
    pub weights: WeightTable,
}

/// Provides cohort snapshots by position identifier.
pub trait CohortSource {
    /// Loads the cohort of `position`.
    ///
    /// # Errors
    ///
    /// - [`AnalysisError::NotFound`] if the source has no data for `position`
    /// - [`AnalysisError::Configuration`] if the stored data violates its schema
    fn load_cohort(&self, position: &str) -> Result<Cohort, AnalysisError>;
}

impl<T> CohortSource for &T
where
    T: CohortSource + ?Sized,
{
    fn load_cohort(&self, position: &str) -> Result<Cohort, AnalysisError> {
        (**self).load_cohort(position)
    }
}

impl<T> CohortSource for Box<T>
where
    T: CohortSource + ?Sized,
{
    fn load_cohort(&self, position: &str) -> Result<Cohort, AnalysisError> {
        (**self).load_cohort(position)
    }
}

/// Cohorts held in memory, keyed by position.
#[derive(Debug, Clone, Default)]
pub struct InMemorySource {
    cohorts: BTreeMap<String, Cohort>,
}

impl InMemorySource {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds or replaces the cohort of `position`.
    #[must_use]
    pub fn with_cohort<S>(mut self, position: S, cohort: Cohort) -> Self
    where
        S: Into<String>,
    {
        self.insert(position, cohort);
        self
    }

    pub fn insert<S>(&mut self, position: S, cohort: Cohort)
    where
        S: Into<String>,
    {
        self.cohorts.insert(position.into(), cohort);
    }

    /// Position identifiers with a cohort, in sorted order.
    pub fn positions(&self) -> impl Iterator<Item = &str> {
        self.cohorts.keys().map(String::as_str)
    }
}

impl CohortSource for InMemorySource {
    fn load_cohort(&self, position: &str) -> Result<Cohort, AnalysisError> {
        self.cohorts
            .get(position)
            .cloned()
            .ok_or_else(|| AnalysisError::not_found(position))
    }
}
