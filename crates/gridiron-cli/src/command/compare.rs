use std::path::PathBuf;

use anyhow::Context as _;
use gridiron_analysis::comparison::Comparisons;
use serde::Serialize;

use crate::{config::CliConfig, util::write_json};

#[derive(Default, Debug, Clone, clap::Args)]
pub(crate) struct CompareArg {
    /// Position identifier, e.g. `centre-back`
    position: String,
    /// Player to compare
    target: String,
    /// Peers to compare the player with
    #[arg(long = "with", required = true, num_args = 1..)]
    peers: Vec<String>,
    /// Number of the target's attributes to compare
    #[arg(long)]
    comparison_attributes: Option<usize>,
    /// Output file path
    #[arg(long)]
    output: Option<PathBuf>,
}

#[derive(Debug, Serialize)]
struct CompareOutput {
    comparisons: Comparisons,
}

pub(crate) fn run(config: &CliConfig, arg: &CompareArg) -> anyhow::Result<()> {
    let mut options = config.options;
    if let Some(n) = arg.comparison_attributes {
        options.comparison_attributes = n;
    }

    let comparisons = config
        .analyzer()?
        .with_options(options)
        .compare(
            &arg.position,
            &arg.target,
            arg.peers.iter().map(String::as_str),
        )
        .with_context(|| {
            format!(
                "Failed to compare '{}' at position '{}'",
                arg.target, arg.position
            )
        })?;

    write_json(&CompareOutput { comparisons }, arg.output.as_deref())
}
