//! Generator configuration via `cardgen.toml`
//!
//! On first run a default `cardgen.toml` is created next to the binary's
//! working directory. Relative store paths are resolved against the directory
//! holding the config file.

use cardgen_core::{Error, Result, SYSTEM_ACTOR};
use cardgen_storage::format::check_text_field;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Config file name looked up by default
pub const CONFIG_FILE_NAME: &str = "cardgen.toml";

/// Generator configuration loaded from `cardgen.toml`.
///
/// # Example
///
/// ```toml
/// persist_cards = true
/// card_file = "cards.csv"
/// sequence_file = "sequence.csv"
/// actor = "System"
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardGenConfig {
    /// Write cards to `card_file`; when false, writes are passed through.
    #[serde(default = "default_persist_cards")]
    pub persist_cards: bool,
    /// Card file path
    #[serde(default = "default_card_file")]
    pub card_file: PathBuf,
    /// Sequence file path
    #[serde(default = "default_sequence_file")]
    pub sequence_file: PathBuf,
    /// Actor recorded on issued cards and sequence updates
    #[serde(default = "default_actor")]
    pub actor: String,
}

fn default_persist_cards() -> bool {
    true
}

fn default_card_file() -> PathBuf {
    PathBuf::from("cards.csv")
}

fn default_sequence_file() -> PathBuf {
    PathBuf::from("sequence.csv")
}

fn default_actor() -> String {
    SYSTEM_ACTOR.to_string()
}

impl Default for CardGenConfig {
    fn default() -> Self {
        Self {
            persist_cards: default_persist_cards(),
            card_file: default_card_file(),
            sequence_file: default_sequence_file(),
            actor: default_actor(),
        }
    }
}

impl CardGenConfig {
    /// Config with both store files placed in `dir`
    pub fn in_dir(dir: &Path) -> Self {
        Self {
            card_file: dir.join(default_card_file()),
            sequence_file: dir.join(default_sequence_file()),
            ..Self::default()
        }
    }

    /// Returns the default config file content with comments.
    pub fn default_toml() -> &'static str {
        r#"# Card generator configuration
#
# Write generated cards to card_file (default: true).
# When false, cards are generated and numbered but not stored.
persist_cards = true

# Store files; relative paths are resolved against this file's directory.
card_file = "cards.csv"
sequence_file = "sequence.csv"

# Actor recorded as creator of cards and modifier of the sequence.
actor = "System"
"#
    }

    /// Check values that cannot be expressed by the types.
    ///
    /// # Errors
    ///
    /// `Config` for empty paths or an actor that would break the row format.
    pub fn validate(&self) -> Result<()> {
        if self.card_file.as_os_str().is_empty() {
            return Err(Error::config("card_file must not be empty"));
        }
        if self.sequence_file.as_os_str().is_empty() {
            return Err(Error::config("sequence_file must not be empty"));
        }
        if self.actor.trim().is_empty() {
            return Err(Error::config("actor must not be empty"));
        }
        check_text_field("actor", &self.actor).map_err(|e| Error::config(e.to_string()))
    }

    /// Read, parse and validate config from a file path.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, parsed or validated.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            Error::config(format!(
                "Failed to read config file '{}': {}",
                path.display(),
                e
            ))
        })?;
        let mut config: CardGenConfig = toml::from_str(&content).map_err(|e| {
            Error::config(format!(
                "Failed to parse config file '{}': {}",
                path.display(),
                e
            ))
        })?;
        if let Some(base) = path.parent() {
            config.card_file = resolve(base, &config.card_file);
            config.sequence_file = resolve(base, &config.sequence_file);
        }
        config.validate()?;
        Ok(config)
    }

    /// Write the default config file if it does not already exist.
    ///
    /// Returns `Ok(())` whether the file was created or already existed.
    pub fn write_default_if_missing(path: &Path) -> Result<()> {
        if !path.exists() {
            std::fs::write(path, Self::default_toml()).map_err(|e| {
                Error::config(format!(
                    "Failed to write default config file '{}': {}",
                    path.display(),
                    e
                ))
            })?;
        }
        Ok(())
    }
}

fn resolve(base: &Path, path: &Path) -> PathBuf {
    if path.is_relative() {
        base.join(path)
    } else {
        path.to_path_buf()
    }
}
