//! Line loops: interactive with rustyline, or pipe mode over any reader.

use std::io::{BufRead, Write};

use colored::Colorize;
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;
use tracing::warn;

use crate::commands::{parse_line, LineError};
use crate::config::ShellConfig;
use crate::session::{Reply, Session};

/// Result of feeding one line to the session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
    Print(String),
    Error(String),
    Quiet,
    Exit,
}

/// Parse and execute one line.
pub fn step(session: &mut Session, line: &str) -> Step {
    let command = match parse_line(line) {
        Ok(Some(command)) => command,
        Ok(None) => return Step::Quiet,
        Err(LineError::Help(text)) => return Step::Print(text),
        Err(e) => return Step::Error(e.to_string()),
    };
    match session.execute(command) {
        Ok(Reply::Output(text)) => Step::Print(text),
        Ok(Reply::Silent) => Step::Quiet,
        Ok(Reply::Exit) => Step::Exit,
        Err(e) => Step::Error(e.to_string()),
    }
}

fn print_banner() {
    println!("Welcome to {} :)", "tierdb".bold());
    println!("Type \"help\" for more information.");
    println!("Type \"help [command]\" for information about a specific command.");
    println!("Type \"end\" to exit.");
}

/// Run the interactive shell until `end`, Ctrl-D, or a terminal error.
pub fn run_repl(session: &mut Session, config: &ShellConfig) -> anyhow::Result<()> {
    let mut rl = DefaultEditor::new()?;
    if let Some(path) = &config.history {
        // A missing history file is normal on first run.
        let _ = rl.load_history(path);
    }
    if config.banner {
        print_banner();
    }

    loop {
        match rl.readline(&session.prompt()) {
            Ok(line) => {
                let trimmed = line.trim();
                if trimmed.is_empty() {
                    continue;
                }
                let _ = rl.add_history_entry(trimmed);
                match step(session, trimmed) {
                    Step::Print(text) => println!("{text}"),
                    Step::Error(text) => println!("{}", text.as_str().red()),
                    Step::Quiet => {}
                    Step::Exit => break,
                }
            }
            Err(ReadlineError::Interrupted) => continue,
            Err(ReadlineError::Eof) => break,
            Err(err) => return Err(err.into()),
        }
    }

    if let Some(path) = &config.history {
        if let Err(e) = rl.save_history(path) {
            warn!(path = %path.display(), error = %e, "could not save history");
        }
    }
    Ok(())
}

/// Execute lines from `input`, writing results to `output`.
///
/// Blank lines and `#` comments are skipped. Returns `false` if any line
/// failed; processing continues past failures and stops at `end`.
pub fn run_pipe<R: BufRead, W: Write>(
    session: &mut Session,
    input: R,
    mut output: W,
) -> anyhow::Result<bool> {
    let mut ok = true;
    for line in input.lines() {
        let line = line?;
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }
        match step(session, trimmed) {
            Step::Print(text) => writeln!(output, "{text}")?,
            Step::Error(text) => {
                writeln!(output, "{text}")?;
                ok = false;
            }
            Step::Quiet => {}
            Step::Exit => break,
        }
    }
    output.flush()?;
    Ok(ok)
}
