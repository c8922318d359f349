//! Cohort tables
//!
//! An [`AttributeTable`] holds one row per player: the identity columns
//! (`Player`, `Position`), the numeric attribute columns declared by a
//! [`CohortSchema`], and any text columns kept for display only.
//!
//! Values are stored column-major because every statistic the pipeline needs
//! (ranges, means, standard deviations) is computed per attribute over the whole
//! cohort. Missing observations are stored as `NaN`.
//!
//! # Invariants
//!
//! - Every attribute column has exactly one value per player.
//! - Player names are unique, so a name identifies exactly one row.

use std::collections::HashSet;

use gridiron_stats::{descriptive::DescriptiveStats, scaling::MinMaxRange};

use crate::error::ConfigurationError;

/// Name of the player identity column.
pub const PLAYER_COLUMN: &str = "Player";
/// Name of the position identity column.
pub const POSITION_COLUMN: &str = "Position";

/// The declared set of numeric attributes for one position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CohortSchema {
    attributes: Vec<String>,
}

impl CohortSchema {
    /// Creates a schema from attribute names, preserving their order.
    pub fn new<I, S>(attributes: I) -> Result<Self, ConfigurationError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let attributes = attributes.into_iter().map(Into::into).collect::<Vec<_>>();
        let mut seen = HashSet::new();
        for attribute in &attributes {
            if !seen.insert(attribute.as_str()) {
                return Err(ConfigurationError::DuplicateAttribute {
                    attribute: attribute.clone(),
                });
            }
        }
        Ok(Self { attributes })
    }

    #[must_use]
    pub fn attributes(&self) -> &[String] {
        &self.attributes
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.attributes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.attributes.is_empty()
    }
}

/// One player's raw values, in schema order.
#[derive(Debug, Clone, PartialEq)]
pub struct PlayerRecord {
    pub player: String,
    pub position: String,
    pub values: Vec<f64>,
}

impl PlayerRecord {
    pub fn new<P, Q>(player: P, position: Q, values: Vec<f64>) -> Self
    where
        P: Into<String>,
        Q: Into<String>,
    {
        Self {
            player: player.into(),
            position: position.into(),
            values,
        }
    }
}

/// A text column retained for display but never used in computation.
#[derive(Debug, Clone, PartialEq)]
pub struct ContextColumn {
    pub name: String,
    pub values: Vec<String>,
}

/// Raw per-player statistics for one positional cohort.
#[derive(Debug, Clone, PartialEq)]
pub struct AttributeTable {
    players: Vec<String>,
    positions: Vec<String>,
    schema: CohortSchema,
    columns: Vec<Vec<f64>>,
    context: Vec<ContextColumn>,
}

impl AttributeTable {
    /// Builds a table from player records.
    ///
    /// # Errors
    ///
    /// - [`ConfigurationError::DuplicatePlayer`] if a player name repeats
    /// - [`ConfigurationError::RowLength`] if a record does not have one value
    ///   per schema attribute
    pub fn from_records<I>(schema: CohortSchema, records: I) -> Result<Self, ConfigurationError>
    where
        I: IntoIterator<Item = PlayerRecord>,
    {
        let mut players = vec![];
        let mut positions = vec![];
        let mut columns = vec![vec![]; schema.len()];
        let mut seen = HashSet::new();

        for record in records {
            if record.values.len() != schema.len() {
                return Err(ConfigurationError::RowLength {
                    player: record.player,
                    expected: schema.len(),
                    actual: record.values.len(),
                });
            }
            if !seen.insert(record.player.clone()) {
                return Err(ConfigurationError::DuplicatePlayer {
                    player: record.player,
                });
            }
            for (column, value) in columns.iter_mut().zip(record.values) {
                column.push(value);
            }
            players.push(record.player);
            positions.push(record.position);
        }

        Ok(Self {
            players,
            positions,
            schema,
            columns,
            context: vec![],
        })
    }

    /// Attaches a display-only text column.
    pub fn with_context(mut self, column: ContextColumn) -> Result<Self, ConfigurationError> {
        if column.values.len() != self.players.len() {
            return Err(ConfigurationError::ColumnLength {
                column: column.name,
                expected: self.players.len(),
                actual: column.values.len(),
            });
        }
        self.context.push(column);
        Ok(self)
    }

    /// Number of players in the cohort.
    #[must_use]
    pub fn len(&self) -> usize {
        self.players.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }

    #[must_use]
    pub fn schema(&self) -> &CohortSchema {
        &self.schema
    }

    #[must_use]
    pub fn attributes(&self) -> &[String] {
        self.schema.attributes()
    }

    #[must_use]
    pub fn players(&self) -> &[String] {
        &self.players
    }

    #[must_use]
    pub fn player(&self, row: usize) -> &str {
        &self.players[row]
    }

    #[must_use]
    pub fn position(&self, row: usize) -> &str {
        &self.positions[row]
    }

    /// Row index of `player`, or `None` on a lookup miss.
    #[must_use]
    pub fn find_player(&self, player: &str) -> Option<usize> {
        self.players.iter().position(|name| name == player)
    }

    /// Index of `attribute` in the schema.
    #[must_use]
    pub fn attribute_index(&self, attribute: &str) -> Option<usize> {
        self.attributes().iter().position(|name| name == attribute)
    }

    /// All raw values of one attribute, in row order.
    #[must_use]
    pub fn column(&self, attribute: usize) -> &[f64] {
        &self.columns[attribute]
    }

    /// Raw value of one attribute for one player (`NaN` when missing).
    #[must_use]
    pub fn value(&self, row: usize, attribute: usize) -> f64 {
        self.columns[attribute][row]
    }

    /// Descriptive statistics of one attribute over the whole cohort.
    #[must_use]
    pub fn column_stats(&self, attribute: usize) -> Option<DescriptiveStats> {
        DescriptiveStats::new(self.column(attribute).iter().copied())
    }

    /// Observed range of one attribute over the whole cohort.
    #[must_use]
    pub fn column_range(&self, attribute: usize) -> Option<MinMaxRange> {
        MinMaxRange::new(self.column(attribute).iter().copied())
    }

    #[must_use]
    pub fn context_columns(&self) -> &[ContextColumn] {
        &self.context
    }

    /// Every context column of one player as `(column, value)`, in column order.
    pub fn context_row(&self, row: usize) -> impl Iterator<Item = (&str, &str)> {
        self.context
            .iter()
            .filter_map(move |c| Some((c.name.as_str(), c.values.get(row)?.as_str())))
    }

    /// Display value of a context column for one player.
    #[must_use]
    pub fn context_value(&self, column: &str, row: usize) -> Option<&str> {
        self.context
            .iter()
            .find(|c| c.name == column)
            .and_then(|c| c.values.get(row))
            .map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn schema() -> CohortSchema {
        CohortSchema::new(["Speed", "Passing"]).unwrap()
    }

    #[test]
    fn test_from_records_is_column_major() {
        let table = AttributeTable::from_records(
            schema(),
            [
                PlayerRecord::new("A", "CM", vec![10.0, 1.0]),
                PlayerRecord::new("B", "CM", vec![20.0, f64::NAN]),
            ],
        )
        .unwrap();

        assert_eq!(table.len(), 2);
        assert_eq!(table.column(0), &[10.0, 20.0]);
        assert_eq!(table.value(0, 1), 1.0);
        assert!(table.value(1, 1).is_nan());
        assert_eq!(table.position(1), "CM");
        assert_eq!(table.find_player("B"), Some(1));
        assert_eq!(table.find_player("Z"), None);
        assert_eq!(table.attribute_index("Passing"), Some(1));
    }

    #[test]
    fn test_duplicate_player_is_rejected() {
        let err = AttributeTable::from_records(
            schema(),
            [
                PlayerRecord::new("A", "CM", vec![1.0, 2.0]),
                PlayerRecord::new("A", "DM", vec![3.0, 4.0]),
            ],
        )
        .unwrap_err();
        assert!(matches!(err, ConfigurationError::DuplicatePlayer { player } if player == "A"));
    }

    #[test]
    fn test_short_record_is_rejected() {
        let err =
            AttributeTable::from_records(schema(), [PlayerRecord::new("A", "CM", vec![1.0])])
                .unwrap_err();
        assert!(matches!(
            err,
            ConfigurationError::RowLength {
                expected: 2,
                actual: 1,
                ..
            }
        ));
    }

    #[test]
    fn test_duplicate_attribute_is_rejected() {
        assert!(matches!(
            CohortSchema::new(["Speed", "Speed"]),
            Err(ConfigurationError::DuplicateAttribute { .. })
        ));
    }

    #[test]
    fn test_context_column() {
        let table =
            AttributeTable::from_records(schema(), [PlayerRecord::new("A", "CM", vec![1.0, 2.0])])
                .unwrap()
                .with_context(ContextColumn {
                    name: "Squad".into(),
                    values: vec!["Ajax".into()],
                })
                .unwrap();
        assert_eq!(table.context_value("Squad", 0), Some("Ajax"));
        assert_eq!(table.context_value("Nation", 0), None);
        assert_eq!(table.context_row(0).collect::<Vec<_>>(), [("Squad", "Ajax")]);

        let err = table
            .with_context(ContextColumn {
                name: "Nation".into(),
                values: vec![],
            })
            .unwrap_err();
        assert!(matches!(err, ConfigurationError::ColumnLength { .. }));
    }
}
