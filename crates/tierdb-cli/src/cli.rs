use std::path::PathBuf;

use clap::Parser;

#[derive(Parser)]
#[command(
    name = "tierdb",
    about = "TierDB — in-memory key/value store with nested transactions",
    version,
)]
pub struct Cli {
    /// Shell configuration file (TOML)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Skip the welcome banner
    #[arg(long)]
    pub no_banner: bool,

    /// Log transaction lifecycle events to stderr
    #[arg(short, long)]
    pub verbose: bool,
}
