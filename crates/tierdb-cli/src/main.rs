use std::io::{self, IsTerminal};

use clap::Parser;
use tracing_subscriber::EnvFilter;

mod cli;
mod commands;
mod config;
mod repl;
mod session;

use config::ShellConfig;
use session::Session;

fn main() -> anyhow::Result<()> {
    let cli = cli::Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(io::stderr)
        .init();

    let mut config = match &cli.config {
        Some(path) => ShellConfig::load(path)?,
        None => ShellConfig::default(),
    };
    if cli.no_banner {
        config.banner = false;
    }

    let mut session = Session::new(&config);
    if io::stdin().is_terminal() {
        repl::run_repl(&mut session, &config)
    } else {
        let ok = repl::run_pipe(&mut session, io::stdin().lock(), io::stdout().lock())?;
        if !ok {
            std::process::exit(1);
        }
        Ok(())
    }
}
