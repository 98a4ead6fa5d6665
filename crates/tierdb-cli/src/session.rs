use tierdb_store::{Store, StoreReader, StoreResult, StoreWriter};

use crate::commands::ShellCommand;
use crate::config::ShellConfig;

/// What the shell should do after a command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    /// Print a line.
    Output(String),
    /// Nothing to print.
    Silent,
    /// Leave the shell.
    Exit,
}

/// The shell's current store handle and display settings.
pub struct Session {
    store: Store,
    null_marker: String,
    prompt: String,
}

impl Session {
    pub fn new(config: &ShellConfig) -> Self {
        Self {
            store: Store::new(),
            null_marker: config.null_marker.clone(),
            prompt: config.prompt.clone(),
        }
    }

    /// Run one command against the current handle.
    ///
    /// A failed rollback leaves the handle as it was.
    pub fn execute(&mut self, command: ShellCommand) -> StoreResult<Reply> {
        let reply = match command {
            ShellCommand::Set { name, value } => {
                self.store.set(&name, &value);
                Reply::Silent
            }
            ShellCommand::Get { name } => Reply::Output(
                self.store
                    .get(&name)
                    .unwrap_or(self.null_marker.as_str())
                    .to_string(),
            ),
            ShellCommand::Delete { name } => {
                self.store.delete(&name);
                Reply::Silent
            }
            ShellCommand::Count { value } => Reply::Output(self.store.count(&value).to_string()),
            ShellCommand::Begin => {
                self.store.begin();
                Reply::Silent
            }
            ShellCommand::Rollback => {
                self.store.rollback()?;
                Reply::Silent
            }
            ShellCommand::Commit => {
                self.store.commit();
                Reply::Silent
            }
            ShellCommand::End => Reply::Exit,
        };
        Ok(reply)
    }

    /// Prompt for the next line, prefixed with the depth inside a transaction.
    pub fn prompt(&self) -> String {
        match self.store.depth() {
            0 => self.prompt.clone(),
            depth => format!("[{depth}]{}", self.prompt),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tierdb_store::StoreError;

    fn session() -> Session {
        Session::new(&ShellConfig::default())
    }

    fn run(session: &mut Session, command: ShellCommand) -> Reply {
        session.execute(command).unwrap()
    }

    fn set(name: &str, value: &str) -> ShellCommand {
        ShellCommand::Set { name: name.into(), value: value.into() }
    }

    fn get(name: &str) -> ShellCommand {
        ShellCommand::Get { name: name.into() }
    }

    fn count(value: &str) -> ShellCommand {
        ShellCommand::Count { value: value.into() }
    }

    fn out(text: &str) -> Reply {
        Reply::Output(text.into())
    }

    #[test]
    fn get_prints_value_or_null() {
        let mut s = session();
        assert_eq!(run(&mut s, get("a")), out("NULL"));
        assert_eq!(run(&mut s, set("a", "10")), Reply::Silent);
        assert_eq!(run(&mut s, get("a")), out("10"));
    }

    #[test]
    fn custom_null_marker() {
        let config = ShellConfig {
            null_marker: "(nil)".into(),
            ..Default::default()
        };
        let mut s = Session::new(&config);
        assert_eq!(run(&mut s, get("a")), out("(nil)"));
    }

    #[test]
    fn count_and_delete() {
        let mut s = session();
        run(&mut s, set("a", "10"));
        run(&mut s, set("b", "10"));
        assert_eq!(run(&mut s, count("10")), out("2"));
        run(&mut s, ShellCommand::Delete { name: "a".into() });
        assert_eq!(run(&mut s, count("10")), out("1"));
        assert_eq!(run(&mut s, get("a")), out("NULL"));
    }

    #[test]
    fn nested_rollback_session() {
        let mut s = session();
        run(&mut s, ShellCommand::Begin);
        run(&mut s, set("a", "10"));
        assert_eq!(run(&mut s, get("a")), out("10"));
        run(&mut s, ShellCommand::Begin);
        run(&mut s, set("a", "20"));
        assert_eq!(run(&mut s, get("a")), out("20"));
        run(&mut s, ShellCommand::Rollback);
        assert_eq!(run(&mut s, get("a")), out("10"));
        run(&mut s, ShellCommand::Rollback);
        assert_eq!(run(&mut s, get("a")), out("NULL"));
    }

    #[test]
    fn commit_closes_all_transactions() {
        let mut s = session();
        run(&mut s, ShellCommand::Begin);
        run(&mut s, set("a", "30"));
        run(&mut s, ShellCommand::Begin);
        run(&mut s, set("a", "40"));
        run(&mut s, ShellCommand::Commit);
        assert_eq!(run(&mut s, get("a")), out("40"));
        assert_eq!(
            s.execute(ShellCommand::Rollback),
            Err(StoreError::TransactionNotFound)
        );
    }

    #[test]
    fn failed_rollback_keeps_data() {
        let mut s = session();
        run(&mut s, set("a", "50"));
        let err = s.execute(ShellCommand::Rollback).unwrap_err();
        assert_eq!(err.to_string(), "TRANSACTION NOT FOUND");
        assert_eq!(run(&mut s, get("a")), out("50"));
    }

    #[test]
    fn count_inside_transaction() {
        let mut s = session();
        run(&mut s, set("a", "10"));
        run(&mut s, ShellCommand::Begin);
        assert_eq!(run(&mut s, count("10")), out("1"));
        run(&mut s, ShellCommand::Begin);
        run(&mut s, ShellCommand::Delete { name: "a".into() });
        assert_eq!(run(&mut s, count("10")), out("0"));
        run(&mut s, ShellCommand::Rollback);
        assert_eq!(run(&mut s, count("10")), out("1"));
    }

    #[test]
    fn prompt_shows_depth() {
        let mut s = session();
        assert_eq!(s.prompt(), ">> ");
        run(&mut s, ShellCommand::Begin);
        run(&mut s, ShellCommand::Begin);
        assert_eq!(s.prompt(), "[2]>> ");
        run(&mut s, ShellCommand::Commit);
        assert_eq!(s.prompt(), ">> ");
    }

    #[test]
    fn end_exits() {
        assert_eq!(run(&mut session(), ShellCommand::End), Reply::Exit);
    }
}
