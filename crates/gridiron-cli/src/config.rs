//! CLI configuration
//!
//! Settings are layered: built-in defaults, then an optional JSON file
//! (`--config` / `GRIDIRON_CONFIG`), then command-line flags. Every field of the
//! file is optional:
//!
//! ```json
//! {
//!   "data_dir": "data",
//!   "options": { "similar_players": 5, "fingerprint_size": 10, "comparison_attributes": 10 },
//!   "positions": [
//!     { "id": "centre-back", "label": "Center Back", "attributes": ["Tackles", "Interceptions"] }
//!   ]
//! }
//! ```
//!
//! A position entry with `attributes` pins the cohort schema of that position;
//! without it the schema is inferred from the CSV file.

use std::path::{Path, PathBuf};

use anyhow::Context as _;
use gridiron_analysis::{
    analyzer::{AnalysisOptions, Analyzer},
    csv_source::CsvDirectorySource,
    table::CohortSchema,
};
use serde::{Deserialize, Serialize};

use crate::util::read_json;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CliConfig {
    pub data_dir: PathBuf,
    pub options: AnalysisOptions,
    pub positions: Vec<PositionEntry>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PositionEntry {
    pub id: String,
    pub label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attributes: Option<Vec<String>>,
}

impl PositionEntry {
    fn new(id: &str, label: &str) -> Self {
        Self {
            id: id.to_owned(),
            label: label.to_owned(),
            attributes: None,
        }
    }
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("data"),
            options: AnalysisOptions::default(),
            positions: default_positions(),
        }
    }
}

fn default_positions() -> Vec<PositionEntry> {
    [
        ("attacking_midfield", "Attacking Midfield"),
        ("central_forward", "Central Forward"),
        ("central_midfield", "Central Midfield"),
        ("centre-back", "Center Back"),
        ("defensive_midfield", "Defensive Midfielder"),
        ("left_winger", "Left Winger"),
        ("left_back", "Left Back"),
        ("right_back", "Right Back"),
        ("right_winger", "Right Winger"),
    ]
    .into_iter()
    .map(|(id, label)| PositionEntry::new(id, label))
    .collect()
}

impl CliConfig {
    pub fn open<P>(path: P) -> anyhow::Result<Self>
    where
        P: AsRef<Path>,
    {
        let path = path.as_ref();
        let config: Self = read_json("config", path)?;
        tracing::debug!(path = %path.display(), data_dir = %config.data_dir.display(), "loaded config");
        Ok(config)
    }

    pub fn position(&self, id: &str) -> Option<&PositionEntry> {
        self.positions.iter().find(|position| position.id == id)
    }

    /// CSV source over the data directory with the declared schemas applied.
    pub fn source(&self) -> anyhow::Result<CsvDirectorySource> {
        let mut source = CsvDirectorySource::new(&self.data_dir);
        for position in &self.positions {
            if let Some(attributes) = &position.attributes {
                let schema = CohortSchema::new(attributes).with_context(|| {
                    format!("Invalid attribute list for position '{}'", position.id)
                })?;
                source = source.with_schema(position.id.clone(), schema);
            }
        }
        Ok(source)
    }

    pub fn analyzer(&self) -> anyhow::Result<Analyzer<CsvDirectorySource>> {
        Ok(Analyzer::new(self.source()?).with_options(self.options))
    }
}
