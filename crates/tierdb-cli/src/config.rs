use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use serde::{Deserialize, Serialize};

/// Settings for the interactive shell.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShellConfig {
    /// Prompt shown at the root. Open transactions prefix it with `[depth]`.
    pub prompt: String,
    /// Printed by `get` when the name is not set.
    pub null_marker: String,
    /// Whether to print the welcome banner in interactive mode.
    pub banner: bool,
    /// Line-editor history file. No history is kept when unset.
    pub history: Option<PathBuf>,
}

impl Default for ShellConfig {
    fn default() -> Self {
        Self {
            prompt: ">> ".into(),
            null_marker: "NULL".into(),
            banner: true,
            history: None,
        }
    }
}

impl ShellConfig {
    /// Read a TOML config file. Missing keys take their defaults.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        Self::from_toml(&text).with_context(|| format!("parsing config {}", path.display()))
    }

    pub fn from_toml(text: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn default_config() {
        let c = ShellConfig::default();
        assert_eq!(c.prompt, ">> ");
        assert_eq!(c.null_marker, "NULL");
        assert!(c.banner);
        assert!(c.history.is_none());
    }

    #[test]
    fn partial_toml_keeps_defaults() {
        let c = ShellConfig::from_toml("null_marker = \"(nil)\"\nbanner = false\n").unwrap();
        assert_eq!(c.null_marker, "(nil)");
        assert!(!c.banner);
        assert_eq!(c.prompt, ">> ");
    }

    #[test]
    fn empty_toml_is_default() {
        assert_eq!(ShellConfig::from_toml("").unwrap(), ShellConfig::default());
    }

    #[test]
    fn rejects_wrong_types() {
        assert!(ShellConfig::from_toml("banner = \"yes\"").is_err());
    }

    #[test]
    fn load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "prompt = \"db> \"").unwrap();
        writeln!(file, "history = \"/tmp/tierdb_history\"").unwrap();

        let c = ShellConfig::load(file.path()).unwrap();
        assert_eq!(c.prompt, "db> ");
        assert_eq!(c.history, Some(PathBuf::from("/tmp/tierdb_history")));
    }

    #[test]
    fn load_missing_file_fails() {
        let dir = tempfile::tempdir().unwrap();
        let err = ShellConfig::load(&dir.path().join("absent.toml")).unwrap_err();
        assert!(err.to_string().contains("reading config"));
    }
}
