//! CSV-backed cohort source
//!
//! [`CsvDirectorySource`] reads each position from its own directory under a
//! data root:
//!
//! ```text
//! <root>/
//! └─ centre-back/
//!     ├─ Centre-Back_player_scores.csv        Player, Position, <attributes...>
//!     └─ Centre-Back_attributes_weights.csv   Attribute, Weight
//! ```
//!
//! The file prefix is the position identifier in title case, with `_` replaced
//! by a space (see [`position_title`]).
//!
//! # Schema
//!
//! When a [`CohortSchema`] is registered for a position, every declared attribute
//! must be present and hold numeric (or empty) cells. Without one, the schema is
//! inferred once per load: each column whose cells are all numeric or empty
//! becomes an attribute, and the remaining columns are kept as display-only
//! context. Storage artifacts (empty headers and `Unnamed: *` index columns) are
//! dropped, as are rows without a player name.
//!
//! Rows without a player name are not part of the cohort population: their
//! values never enter the ranges, means or standard deviations of any stage.

use std::{
    collections::HashMap,
    fs::{self, File},
    io::Read,
    path::{Path, PathBuf},
};

use csv::{ReaderBuilder, StringRecord, Trim};
use tracing::{debug, info, warn};

use crate::{
    error::{AnalysisError, ConfigurationError},
    source::{Cohort, CohortSource},
    table::{
        AttributeTable, CohortSchema, ContextColumn, PLAYER_COLUMN, POSITION_COLUMN, PlayerRecord,
    },
    weights::WeightTable,
};

/// Name of the attribute column in a weight file.
pub const ATTRIBUTE_COLUMN: &str = "Attribute";
/// Name of the weight column in a weight file.
pub const WEIGHT_COLUMN: &str = "Weight";

const MISSING_MARKERS: &[&str] = &["", "NA", "N/A", "NaN", "nan", "null"];

/// Cohorts stored as CSV files, one directory per position.
#[derive(Debug, Clone)]
pub struct CsvDirectorySource {
    root: PathBuf,
    schemas: HashMap<String, CohortSchema>,
}

impl CsvDirectorySource {
    pub fn new<P>(root: P) -> Self
    where
        P: Into<PathBuf>,
    {
        Self {
            root: root.into(),
            schemas: HashMap::new(),
        }
    }

    /// Declares the attribute schema of `position`, replacing inference.
    #[must_use]
    pub fn with_schema<S>(mut self, position: S, schema: CohortSchema) -> Self
    where
        S: Into<String>,
    {
        self.schemas.insert(position.into(), schema);
        self
    }

    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    #[must_use]
    pub fn scores_path(&self, position: &str) -> PathBuf {
        self.root
            .join(position)
            .join(format!("{}_player_scores.csv", position_title(position)))
    }

    #[must_use]
    pub fn weights_path(&self, position: &str) -> PathBuf {
        self.root
            .join(position)
            .join(format!("{}_attributes_weights.csv", position_title(position)))
    }

    /// Positions under the data root that have both files, in sorted order.
    pub fn available_positions(&self) -> Result<Vec<String>, AnalysisError> {
        let entries = fs::read_dir(&self.root).map_err(|source| AnalysisError::Io {
            path: self.root.clone(),
            source,
        })?;

        let mut positions = entries
            .filter_map(Result::ok)
            .filter_map(|entry| entry.file_name().into_string().ok())
            .filter(|position| {
                is_position_id(position)
                    && self.scores_path(position).is_file()
                    && self.weights_path(position).is_file()
            })
            .collect::<Vec<_>>();
        positions.sort();
        Ok(positions)
    }
}

impl CohortSource for CsvDirectorySource {
    fn load_cohort(&self, position: &str) -> Result<Cohort, AnalysisError> {
        if !is_position_id(position) {
            return Err(AnalysisError::not_found(position));
        }
        let scores_path = self.scores_path(position);
        let weights_path = self.weights_path(position);
        if !scores_path.is_file() || !weights_path.is_file() {
            debug!(
                position,
                scores = %scores_path.display(),
                weights = %weights_path.display(),
                "cohort files not found"
            );
            return Err(AnalysisError::not_found(position));
        }

        let schema = self.schemas.get(position);
        let table = read_with(&scores_path, |reader| parse_attribute_table(reader, schema))?;
        let weights = read_with(&weights_path, parse_weight_table)?;
        info!(
            position,
            players = table.len(),
            attributes = table.attributes().len(),
            weights = weights.len(),
            "loaded cohort"
        );
        Ok(Cohort { table, weights })
    }
}

/// File prefix of a position: `_` becomes a space and every word is capitalized.
///
/// A word starts after any character that is not a letter, so `centre-back`
/// becomes `Centre-Back`.
///
/// # Examples
///
/// ```
/// use gridiron_analysis::csv_source::position_title;
///
/// assert_eq!(position_title("left_winger"), "Left Winger");
/// assert_eq!(position_title("centre-back"), "Centre-Back");
/// ```
#[must_use]
pub fn position_title(position: &str) -> String {
    let mut title = String::with_capacity(position.len());
    let mut after_letter = false;
    for c in position.chars() {
        let c = if c == '_' { ' ' } else { c };
        if after_letter {
            title.extend(c.to_lowercase());
        } else {
            title.extend(c.to_uppercase());
        }
        after_letter = c.is_alphabetic();
    }
    title
}

/// Position identifiers are single path components made of ASCII letters,
/// digits, `_` and `-`.
fn is_position_id(position: &str) -> bool {
    !position.is_empty()
        && position
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
}

#[derive(Debug, derive_more::From)]
enum ReadError {
    Csv(csv::Error),
    Configuration(ConfigurationError),
}

fn read_with<T, F>(path: &Path, parse: F) -> Result<T, AnalysisError>
where
    F: FnOnce(File) -> Result<T, ReadError>,
{
    let file = File::open(path).map_err(|source| AnalysisError::Io {
        path: path.to_owned(),
        source,
    })?;
    parse(file).map_err(|err| match err {
        ReadError::Csv(source) => AnalysisError::Csv {
            path: path.to_owned(),
            source,
        },
        ReadError::Configuration(err) => err.into(),
    })
}

fn csv_reader<R>(reader: R) -> csv::Reader<R>
where
    R: Read,
{
    ReaderBuilder::new().trim(Trim::All).from_reader(reader)
}

fn column_index(headers: &StringRecord, column: &str) -> Result<usize, ConfigurationError> {
    headers
        .iter()
        .position(|header| header == column)
        .ok_or_else(|| ConfigurationError::MissingColumn {
            column: column.to_owned(),
        })
}

fn is_storage_column(header: &str) -> bool {
    header.is_empty() || header.starts_with("Unnamed")
}

/// Parses a numeric cell; missing markers become `NaN`.
fn parse_cell(cell: &str) -> Option<f64> {
    if MISSING_MARKERS.contains(&cell) {
        return Some(f64::NAN);
    }
    cell.parse().ok()
}

fn parse_attribute_table<R>(
    reader: R,
    schema: Option<&CohortSchema>,
) -> Result<AttributeTable, ReadError>
where
    R: Read,
{
    let mut reader = csv_reader(reader);
    let headers = reader.headers()?.clone();
    let records = reader.records().collect::<Result<Vec<_>, _>>()?;

    let player_index = column_index(&headers, PLAYER_COLUMN)?;
    let position_index = column_index(&headers, POSITION_COLUMN)?;

    let (records, unnamed): (Vec<_>, Vec<_>) = records
        .into_iter()
        .partition(|record| !record.get(player_index).unwrap_or_default().is_empty());
    if !unnamed.is_empty() {
        warn!(rows = unnamed.len(), "dropping rows without a player name");
    }

    let candidates = headers
        .iter()
        .enumerate()
        .filter(|(index, header)| {
            *index != player_index && *index != position_index && !is_storage_column(header)
        })
        .collect::<Vec<_>>();

    let (attributes, context) = match schema {
        Some(schema) => {
            let attributes = schema
                .attributes()
                .iter()
                .map(|attribute| Ok((column_index(&headers, attribute)?, attribute.as_str())))
                .collect::<Result<Vec<_>, ConfigurationError>>()?;
            let context = candidates
                .into_iter()
                .filter(|(_, header)| !schema.attributes().iter().any(|a| a == header))
                .collect::<Vec<_>>();
            (attributes, context)
        }
        None => {
            let (attributes, context): (Vec<_>, Vec<_>) =
                candidates.into_iter().partition(|(index, _)| {
                    records
                        .iter()
                        .all(|record| parse_cell(record.get(*index).unwrap_or_default()).is_some())
                });
            debug!(
                attributes = attributes.len(),
                context = context.len(),
                "inferred cohort schema"
            );
            (attributes, context)
        }
    };

    let player_records = records
        .iter()
        .map(|record| {
            let player = record.get(player_index).unwrap_or_default();
            let values = attributes
                .iter()
                .map(|(index, attribute)| {
                    let cell = record.get(*index).unwrap_or_default();
                    parse_cell(cell).ok_or_else(|| ConfigurationError::NonNumericValue {
                        column: (*attribute).to_owned(),
                        player: player.to_owned(),
                        value: cell.to_owned(),
                    })
                })
                .collect::<Result<Vec<_>, _>>()?;
            let position = record.get(position_index).unwrap_or_default();
            Ok(PlayerRecord::new(player, position, values))
        })
        .collect::<Result<Vec<_>, ConfigurationError>>()?;

    let schema = CohortSchema::new(attributes.iter().map(|(_, attribute)| *attribute))?;
    let mut table = AttributeTable::from_records(schema, player_records)?;
    for (index, header) in context {
        let values = records
            .iter()
            .map(|record| record.get(index).unwrap_or_default().to_owned())
            .collect();
        table = table.with_context(ContextColumn {
            name: header.to_owned(),
            values,
        })?;
    }
    Ok(table)
}

fn parse_weight_table<R>(reader: R) -> Result<WeightTable, ReadError>
where
    R: Read,
{
    let mut reader = csv_reader(reader);
    let headers = reader.headers()?.clone();
    let attribute_index = column_index(&headers, ATTRIBUTE_COLUMN)?;
    let weight_index = column_index(&headers, WEIGHT_COLUMN)?;

    let mut weights = WeightTable::new();
    for record in reader.records() {
        let record = record?;
        let attribute = record.get(attribute_index).unwrap_or_default();
        if attribute.is_empty() {
            continue;
        }
        let cell = record.get(weight_index).unwrap_or_default();
        let weight = cell
            .parse::<f64>()
            .ok()
            .filter(|w| w.is_finite())
            .ok_or_else(|| ConfigurationError::InvalidWeight {
                attribute: attribute.to_owned(),
                value: cell.to_owned(),
            })?;
        weights.insert(attribute, weight);
    }
    Ok(weights)
}
