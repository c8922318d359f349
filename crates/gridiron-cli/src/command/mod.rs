use std::{io, path::PathBuf};

use clap::{ArgAction, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use crate::config::CliConfig;

use self::{analyze::AnalyzeArg, compare::CompareArg, players::PlayersArg, positions::PositionsArg};

mod analyze;
mod compare;
mod players;
mod positions;

#[derive(Debug, Clone, Parser)]
#[command(author, version, about, long_about = None)]
pub struct CommandArgs {
    #[clap(flatten)]
    global: GlobalArg,
    /// What to run
    #[command(subcommand)]
    mode: Mode,
}

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct GlobalArg {
    /// JSON configuration file
    #[arg(long, global = true, env = "GRIDIRON_CONFIG")]
    config: Option<PathBuf>,
    /// Directory with one subdirectory of CSV files per position
    #[arg(long, global = true, env = "GRIDIRON_DATA_DIR")]
    data_dir: Option<PathBuf>,
    /// Log more (-v info, -vv debug, -vvv trace); overrides RUST_LOG
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,
}

#[derive(Debug, Clone, Subcommand)]
enum Mode {
    /// List the positions of the catalogue and whether data exists for them
    Positions(#[clap(flatten)] PositionsArg),
    /// List the players of a position
    Players(#[clap(flatten)] PlayersArg),
    /// Find the players most similar to a player and explain their profile
    Analyze(#[clap(flatten)] AnalyzeArg),
    /// Compare a player with an explicit set of peers
    Compare(#[clap(flatten)] CompareArg),
}

pub fn run() -> anyhow::Result<()> {
    let args = CommandArgs::parse();
    init_tracing(args.global.verbose);

    let mut config = match &args.global.config {
        Some(path) => CliConfig::open(path)?,
        None => CliConfig::default(),
    };
    if let Some(data_dir) = args.global.data_dir {
        config.data_dir = data_dir;
    }

    match &args.mode {
        Mode::Positions(arg) => positions::run(&config, arg)?,
        Mode::Players(arg) => players::run(&config, arg)?,
        Mode::Analyze(arg) => analyze::run(&config, arg)?,
        Mode::Compare(arg) => compare::run(&config, arg)?,
    }
    Ok(())
}

fn init_tracing(verbose: u8) {
    let filter = match verbose {
        0 => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

/// Writes a small `centre-back` cohort under `root`.
#[cfg(test)]
fn write_fixture(root: &std::path::Path) {
    let dir = root.join("centre-back");
    std::fs::create_dir_all(&dir).unwrap();
    std::fs::write(
        dir.join("Centre-Back_player_scores.csv"),
        "\
,Player,Position,Squad,Tackles,Interceptions,Passes
0,Saliba,DF,Arsenal,2.1,1.4,60
1,Dias,DF,Man City,1.8,1.1,75
2,Van Dijk,DF,Liverpool,1.2,1.3,70
3,Romero,DF,Tottenham,3.0,2.0,45
",
    )
    .unwrap();
    std::fs::write(
        dir.join("Centre-Back_attributes_weights.csv"),
        "Attribute,Weight\nTackles,3\nInterceptions,2\nPasses,1\n",
    )
    .unwrap();
}
