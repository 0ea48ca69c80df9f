//! TOML config file parsing.
use serde::Deserialize;
use serde::de::DeserializeOwned;
use std::path::{Path, PathBuf};

use crate::error::ConfigError;

/// Name of the config file looked up in the repository root.
pub const CONFIG_FILE_NAME: &str = "hyprdots.toml";

/// On-disk shape of `hyprdots.toml`.  Every key is optional.
///
/// ```toml
/// components = ["hypr", "waybar", "kitty"]
/// dry_run_delay_ms = 500
///
/// [paths]
/// source = "dotfiles"
/// stage = "~/.local/share/hyprdots/dotfiles"
/// config = "~/.config"
///
/// [bootstrap]
/// tpm_url = "https://github.com/tmux-plugins/tpm.git"
/// lazyvim_url = "https://github.com/LazyVim/starter"
/// ```
#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ConfigFile {
    /// Ordered component list replacing the built-in one.
    pub components: Option<Vec<String>>,
    /// Pause used by each simulated step in dry-run mode.
    pub dry_run_delay_ms: Option<u64>,
    /// Root directory overrides.
    pub paths: PathsSection,
    /// Third-party repository URLs.
    pub bootstrap: BootstrapSection,
}

/// `[paths]` table.
#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PathsSection {
    /// Source tree, relative paths resolve against the repository root.
    pub source: Option<PathBuf>,
    /// Stage root.
    pub stage: Option<PathBuf>,
    /// Live configuration root.
    pub config: Option<PathBuf>,
}

/// `[bootstrap]` table.
#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BootstrapSection {
    /// Clone URL of the tmux plugin manager.
    pub tpm_url: Option<String>,
    /// Clone URL of the editor starter template.
    pub lazyvim_url: Option<String>,
}

/// Load and deserialize a TOML file.
///
/// A missing file deserializes as an empty document, so every optional key
/// takes its default.
///
/// # Errors
///
/// Returns an error if the file exists but cannot be read or parsed.
pub fn load_config<T: DeserializeOwned>(path: &Path) -> Result<T, ConfigError> {
    let invalid = |message: String| ConfigError::InvalidSyntax {
        file: path.display().to_string(),
        message,
    };

    if !path.exists() {
        return toml::from_str("").map_err(|e| invalid(e.to_string()));
    }

    let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.display().to_string(),
        source,
    })?;

    toml::from_str(&content).map_err(|e| invalid(e.message().to_string()))
}
