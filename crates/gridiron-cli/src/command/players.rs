use std::path::PathBuf;

use anyhow::Context as _;
use serde::Serialize;

use crate::{config::CliConfig, util::write_json};

#[derive(Default, Debug, Clone, clap::Args)]
pub(crate) struct PlayersArg {
    /// Position identifier, e.g. `centre-back`
    position: String,
    /// Output file path
    #[arg(long)]
    output: Option<PathBuf>,
}

#[derive(Debug, Serialize)]
struct PlayerList {
    players: Vec<String>,
}

pub(crate) fn run(config: &CliConfig, arg: &PlayersArg) -> anyhow::Result<()> {
    let players = config
        .analyzer()?
        .list_players(&arg.position)
        .with_context(|| format!("Failed to list players of position '{}'", arg.position))?;
    write_json(&PlayerList { players }, arg.output.as_deref())
}
