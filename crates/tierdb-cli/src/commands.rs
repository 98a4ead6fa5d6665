use clap::error::ErrorKind;
use clap::{Parser, Subcommand};

/// One line typed at the shell.
#[derive(Parser, Debug)]
#[command(name = "tierdb", no_binary_name = true)]
pub struct ShellLine {
    #[command(subcommand)]
    pub command: ShellCommand,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum ShellCommand {
    /// Sets the name in the database to the given value.
    #[command(disable_help_flag = true)]
    Set { name: String, value: String },
    /// Prints the value for the given name, or NULL if it is not set.
    #[command(disable_help_flag = true)]
    Get { name: String },
    /// Deletes the name from the database.
    #[command(disable_help_flag = true)]
    Delete { name: String },
    /// Prints the number of names that have the given value assigned to them.
    #[command(disable_help_flag = true)]
    Count { value: String },
    /// Begins a new transaction.
    Begin,
    /// Rolls back the most recent transaction.
    Rollback,
    /// Commits all of the open transactions.
    Commit,
    /// Exits the database.
    End,
}

/// Why a line could not be turned into a command.
#[derive(Debug, thiserror::Error)]
pub enum LineError {
    #[error("invalid quoting")]
    Quoting,

    /// Help was requested; the payload is the rendered help text.
    #[error("{0}")]
    Help(String),

    #[error("{0}")]
    Usage(String),
}

/// Commands whose arguments are names or values, never flags.
const DATA_COMMANDS: [&str; 4] = ["set", "get", "delete", "count"];

/// Tokenise and parse a line. Blank lines yield `Ok(None)`.
///
/// The command word is matched case-insensitively; arguments are taken
/// verbatim after shell-style unquoting, so `-h`, `--help` and `--` are
/// ordinary names and values. Help is only reachable as `help [command]`.
pub fn parse_line(line: &str) -> Result<Option<ShellCommand>, LineError> {
    let mut tokens = shlex::split(line).ok_or(LineError::Quoting)?;
    let Some(first) = tokens.first_mut() else {
        return Ok(None);
    };
    *first = first.to_lowercase();
    if DATA_COMMANDS.contains(&first.as_str()) {
        // Everything after an escape is positional, including another `--`.
        tokens.insert(1, "--".to_string());
    }

    match ShellLine::try_parse_from(tokens) {
        Ok(parsed) => Ok(Some(parsed.command)),
        Err(e) => match e.kind() {
            ErrorKind::DisplayHelp | ErrorKind::DisplayHelpOnMissingArgumentOrSubcommand => {
                Err(LineError::Help(e.render().to_string().trim_end().to_string()))
            }
            _ => Err(LineError::Usage(e.render().to_string().trim_end().to_string())),
        },
    }
}
