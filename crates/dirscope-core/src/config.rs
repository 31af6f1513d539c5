//! Configuration management for dirscope.
//!
//! Loads configuration from ${DIRSCOPE_HOME}/config.toml with sensible defaults.

use std::fmt;
use std::fs;
use std::path::Path;
use std::str::FromStr;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// How a logical line of text is split into display rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum WrapPolicy {
    /// One display row per logical line; long lines scroll horizontally.
    None,
    /// Hard break every `width` characters.
    #[serde(rename = "char")]
    Character,
    /// Greedy packing of whitespace-separated words.
    #[default]
    Word,
}

impl WrapPolicy {
    /// Returns the next policy in the cycle `none -> char -> word -> none`.
    pub fn next(self) -> Self {
        match self {
            WrapPolicy::None => WrapPolicy::Character,
            WrapPolicy::Character => WrapPolicy::Word,
            WrapPolicy::Word => WrapPolicy::None,
        }
    }

    /// Returns the short display name for this policy.
    pub fn display_name(self) -> &'static str {
        match self {
            WrapPolicy::None => "none",
            WrapPolicy::Character => "char",
            WrapPolicy::Word => "word",
        }
    }
}

impl fmt::Display for WrapPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

impl FromStr for WrapPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "none" | "off" => Ok(WrapPolicy::None),
            "char" | "character" => Ok(WrapPolicy::Character),
            "word" => Ok(WrapPolicy::Word),
            other => Err(format!(
                "invalid wrap policy '{other}' (expected none, char or word)"
            )),
        }
    }
}

pub mod paths {
    //! Path resolution for dirscope configuration and data directories.
    //!
    //! DIRSCOPE_HOME resolution order:
    //! 1. DIRSCOPE_HOME environment variable (if set)
    //! 2. ~/.config/dirscope (default)
    //! 3. ./.dirscope when no home directory can be determined

    use std::path::PathBuf;

    /// Returns the dirscope home directory.
    pub fn dirscope_home() -> PathBuf {
        if let Ok(home) = std::env::var("DIRSCOPE_HOME") {
            return PathBuf::from(home);
        }

        dirs::home_dir().map_or_else(
            || PathBuf::from(".dirscope"),
            |h| h.join(".config").join("dirscope"),
        )
    }

    /// Returns the path to the config.toml file.
    pub fn config_path() -> PathBuf {
        dirscope_home().join("config.toml")
    }
}

/// Returns the default config template with comments.
fn default_config_template() -> &'static str {
    include_str!("../default_config.toml")
}

/// Main configuration structure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Show dot-directories in the listing.
    pub show_hidden: bool,

    /// Wrap policy for the details pane.
    pub wrap: WrapPolicy,

    /// Width of the list pane in percent of the terminal width.
    pub list_width_percent: u16,
}

impl Config {
    const DEFAULT_LIST_WIDTH_PERCENT: u16 = 45;
    const MIN_LIST_WIDTH_PERCENT: u16 = 20;
    const MAX_LIST_WIDTH_PERCENT: u16 = 80;

    /// Loads configuration from the default config path.
    ///
    /// # Errors
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load() -> Result<Self> {
        Self::load_from(&paths::config_path())
    }

    /// Loads configuration from a specific path.
    /// Returns defaults if file doesn't exist.
    ///
    /// # Errors
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let contents = fs::read_to_string(path)
                .with_context(|| format!("Failed to read config from {}", path.display()))?;
            toml::from_str(&contents)
                .with_context(|| format!("Failed to parse config from {}", path.display()))
        } else {
            Ok(Config::default())
        }
    }

    /// Creates a default config file at the given path.
    ///
    /// # Errors
    /// Returns an error if the file already exists or cannot be written.
    pub fn init(path: &Path) -> Result<()> {
        if path.exists() {
            anyhow::bail!("Config file already exists at {}", path.display());
        }

        Self::write_config(path, default_config_template())
    }

    /// List pane width percentage, clamped to a usable range.
    pub fn effective_list_width_percent(&self) -> u16 {
        self.list_width_percent
            .clamp(Self::MIN_LIST_WIDTH_PERCENT, Self::MAX_LIST_WIDTH_PERCENT)
    }

    /// Writes config content to a file, creating parent directories as needed.
    /// Uses atomic write (temp file + rename) to prevent corruption.
    fn write_config(path: &Path, content: &str) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory {}", parent.display()))?;
        }

        let tmp_path = path.with_extension("toml.tmp");
        fs::write(&tmp_path, content)
            .with_context(|| format!("Failed to write config to {}", tmp_path.display()))?;
        fs::rename(&tmp_path, path).with_context(|| {
            format!(
                "Failed to rename {} to {}",
                tmp_path.display(),
                path.display()
            )
        })?;

        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            show_hidden: false,
            wrap: WrapPolicy::default(),
            list_width_percent: Self::DEFAULT_LIST_WIDTH_PERCENT,
        }
    }
}
