use std::path::PathBuf;

use anyhow::Context as _;
use tracing::warn;

use crate::{config::CliConfig, util::write_json};

#[derive(Default, Debug, Clone, clap::Args)]
pub(crate) struct AnalyzeArg {
    /// Position identifier, e.g. `centre-back`
    position: String,
    /// Player to analyze
    player: String,
    /// Number of similar players to report
    #[arg(long)]
    similar_players: Option<usize>,
    /// Number of fingerprint attributes to report
    #[arg(long)]
    fingerprint_size: Option<usize>,
    /// Number of attributes compared with each similar player
    #[arg(long)]
    comparison_attributes: Option<usize>,
    /// Output file path
    #[arg(long)]
    output: Option<PathBuf>,
}

pub(crate) fn run(config: &CliConfig, arg: &AnalyzeArg) -> anyhow::Result<()> {
    let mut options = config.options;
    if let Some(n) = arg.similar_players {
        options.similar_players = n;
    }
    if let Some(n) = arg.fingerprint_size {
        options.fingerprint_size = n;
    }
    if let Some(n) = arg.comparison_attributes {
        options.comparison_attributes = n;
    }

    let analysis = config
        .analyzer()?
        .with_options(options)
        .analyze(&arg.position, &arg.player)
        .with_context(|| {
            format!(
                "Failed to analyze '{}' at position '{}'",
                arg.player, arg.position
            )
        })?;
    if !analysis.player_found {
        warn!(
            player = %arg.player,
            position = %arg.position,
            "player not found in cohort"
        );
    }

    write_json(&analysis, arg.output.as_deref())
}

#[cfg(test)]
mod tests {
    use crate::util::read_json;

    use super::*;

    fn config(dir: &tempfile::TempDir) -> CliConfig {
        super::super::write_fixture(dir.path());
        CliConfig {
            data_dir: dir.path().to_owned(),
            ..CliConfig::default()
        }
    }

    #[test]
    fn test_analyze_writes_json() {
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("analysis.json");
        let arg = AnalyzeArg {
            position: "centre-back".into(),
            player: "Romero".into(),
            similar_players: Some(2),
            fingerprint_size: Some(3),
            output: Some(output.clone()),
            ..AnalyzeArg::default()
        };

        run(&config(&dir), &arg).unwrap();

        let value: serde_json::Value = read_json("output", &output).unwrap();
        let similar = value["similar_players"].as_array().unwrap();
        assert_eq!(similar.len(), 2);
        assert!(similar.iter().all(|p| p["Player"] != "Romero"));
        assert!(similar.iter().all(|p| p["Position"] == "DF"));
        assert!(similar.iter().all(|p| p["Squad"].is_string()));

        let fingerprint = value["fingerprint"].as_array().unwrap();
        assert_eq!(fingerprint.len(), 3);
        assert!(fingerprint[0]["Weighted Z-Score"].is_f64());

        let comparisons = value["comparisons"].as_object().unwrap();
        assert_eq!(comparisons.len(), 2);
        for peer in similar {
            let name = peer["Player"].as_str().unwrap();
            assert!(comparisons[name]["Tackles"]["target_score"] == 100.0);
        }
    }

    #[test]
    fn test_unknown_player_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("analysis.json");
        let arg = AnalyzeArg {
            position: "centre-back".into(),
            player: "Nobody".into(),
            output: Some(output.clone()),
            ..AnalyzeArg::default()
        };

        run(&config(&dir), &arg).unwrap();

        let value: serde_json::Value = read_json("output", &output).unwrap();
        assert_eq!(
            value,
            serde_json::json!({"similar_players": [], "fingerprint": [], "comparisons": {}})
        );
    }

    #[test]
    fn test_unknown_position_fails() {
        let dir = tempfile::tempdir().unwrap();
        let arg = AnalyzeArg {
            position: "midfielder".into(),
            player: "Nobody".into(),
            ..AnalyzeArg::default()
        };
        let err = run(&config(&dir), &arg).unwrap_err();
        assert!(
            err.chain()
                .any(|cause| cause.to_string() == "no data source for position 'midfielder'")
        );
    }
}
