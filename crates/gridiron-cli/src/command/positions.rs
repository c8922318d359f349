use std::path::PathBuf;

use gridiron_analysis::csv_source::position_title;
use serde::Serialize;
use tracing::warn;

use crate::{config::CliConfig, util::write_json};

#[derive(Default, Debug, Clone, clap::Args)]
pub(crate) struct PositionsArg {
    /// Output file path
    #[arg(long)]
    output: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
struct PositionSummary {
    id: String,
    label: String,
    /// Whether the data directory holds both CSV files for the position
    available: bool,
}

#[derive(Debug, Serialize)]
struct PositionList {
    positions: Vec<PositionSummary>,
}

pub(crate) fn run(config: &CliConfig, arg: &PositionsArg) -> anyhow::Result<()> {
    let positions = collect_positions(config)?;
    write_json(&PositionList { positions }, arg.output.as_deref())
}

/// Catalogue positions first, then positions found on disk only.
fn collect_positions(config: &CliConfig) -> anyhow::Result<Vec<PositionSummary>> {
    let available = config.source()?.available_positions().unwrap_or_else(|err| {
        warn!(%err, "cannot scan data directory");
        vec![]
    });

    let mut positions = config
        .positions
        .iter()
        .map(|position| PositionSummary {
            id: position.id.clone(),
            label: position.label.clone(),
            available: available.contains(&position.id),
        })
        .collect::<Vec<_>>();
    positions.extend(
        available
            .iter()
            .filter(|id| config.position(id).is_none())
            .map(|id| PositionSummary {
                id: id.clone(),
                label: position_title(id),
                available: true,
            }),
    );
    Ok(positions)
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::*;

    #[test]
    fn test_collect_positions() {
        let dir = tempfile::tempdir().unwrap();
        super::super::write_fixture(dir.path());
        // data present on disk but absent from the catalogue
        let extra = dir.path().join("goal_keeper");
        fs::create_dir_all(&extra).unwrap();
        fs::write(extra.join("Goal Keeper_player_scores.csv"), "Player,Position\n").unwrap();
        fs::write(extra.join("Goal Keeper_attributes_weights.csv"), "Attribute,Weight\n").unwrap();

        let config = CliConfig {
            data_dir: dir.path().to_owned(),
            ..CliConfig::default()
        };
        let positions = collect_positions(&config).unwrap();

        assert_eq!(positions.len(), 10);
        let centre_back = positions.iter().find(|p| p.id == "centre-back").unwrap();
        assert!(centre_back.available);
        assert!(!positions.iter().find(|p| p.id == "left_back").unwrap().available);
        assert_eq!(
            positions.last().unwrap(),
            &PositionSummary {
                id: "goal_keeper".into(),
                label: "Goal Keeper".into(),
                available: true,
            }
        );
    }

    #[test]
    fn test_missing_data_dir_lists_catalogue() {
        let dir = tempfile::tempdir().unwrap();
        let config = CliConfig {
            data_dir: dir.path().join("absent"),
            ..CliConfig::default()
        };
        let positions = collect_positions(&config).unwrap();
        assert_eq!(positions.len(), 9);
        assert!(positions.iter().all(|p| !p.available));
    }
}
