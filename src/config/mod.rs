//! Installer configuration: roots, component registry, bootstrap sources.
//!
//! Values come from three layers, highest precedence first: command-line
//! overrides, the optional `hyprdots.toml` in the repository root, and
//! defaults derived from the environment (`XDG_*` directories and `HOME`).
pub mod components;
pub mod paths;
pub mod toml_loader;

use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::error::ConfigError;

pub use components::{Component, ComponentRegistry, PathPair};
pub use paths::Paths;

/// Default clone URL of the tmux plugin manager.
pub const DEFAULT_TPM_URL: &str = "https://github.com/tmux-plugins/tpm.git";

/// Default clone URL of the editor starter template.
pub const DEFAULT_LAZYVIM_URL: &str = "https://github.com/LazyVim/starter";

/// Default pause per simulated step in dry-run mode.
pub const DEFAULT_DRY_RUN_DELAY: Duration = Duration::from_secs(2);

/// Directory (relative to the repository root) holding the source tree.
pub const SOURCE_DIR: &str = "dotfiles";

/// Third-party repositories cloned after the dotfiles are linked.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bootstrap {
    /// Clone URL of the tmux plugin manager.
    pub tpm_url: String,
    /// Clone URL of the editor starter template.
    pub lazyvim_url: String,
}

impl Default for Bootstrap {
    fn default() -> Self {
        Self {
            tpm_url: DEFAULT_TPM_URL.to_string(),
            lazyvim_url: DEFAULT_LAZYVIM_URL.to_string(),
        }
    }
}

/// Root overrides given on the command line.
#[derive(Debug, Clone, Default)]
pub struct PathOverrides {
    /// Replaces the source root.
    pub source: Option<PathBuf>,
    /// Replaces the stage root.
    pub stage: Option<PathBuf>,
    /// Replaces the live configuration root.
    pub config: Option<PathBuf>,
}

/// Fully resolved configuration for one installation run.
#[derive(Debug, Clone)]
pub struct Config {
    /// Source, stage and config roots.
    pub paths: Paths,
    /// Components to install, in order.
    pub components: ComponentRegistry,
    /// Third-party repositories.
    pub bootstrap: Bootstrap,
    /// Pause per simulated step in dry-run mode.
    pub dry_run_delay: Duration,
}

impl Config {
    /// Build a configuration directly from its parts, without touching disk.
    #[must_use]
    pub fn new(paths: Paths, components: ComponentRegistry) -> Self {
        Self {
            paths,
            components,
            bootstrap: Bootstrap::default(),
            dry_run_delay: DEFAULT_DRY_RUN_DELAY,
        }
    }

    /// Load configuration for the repository at `root`.
    ///
    /// `config_file` defaults to `<root>/hyprdots.toml`; a missing file means
    /// all defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file is invalid, the component list
    /// fails validation, or a default root cannot be derived because `HOME`
    /// is unset.
    pub fn load(
        root: &Path,
        config_file: Option<&Path>,
        overrides: &PathOverrides,
    ) -> Result<Self, ConfigError> {
        Self::load_with_env(root, config_file, overrides, |key| std::env::var(key).ok())
    }

    /// [`load`](Self::load) with an injectable environment lookup.
    ///
    /// # Errors
    ///
    /// See [`load`](Self::load).
    pub fn load_with_env(
        root: &Path,
        config_file: Option<&Path>,
        overrides: &PathOverrides,
        env: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, ConfigError> {
        let file_path = config_file.map_or_else(
            || root.join(toml_loader::CONFIG_FILE_NAME),
            Path::to_path_buf,
        );
        let file = toml_loader::load_config::<toml_loader::ConfigFile>(&file_path)?;

        let home = env("HOME")
            .or_else(|| env("USERPROFILE"))
            .filter(|h| !h.is_empty())
            .map(PathBuf::from);
        let from_file =
            |raw: Option<PathBuf>| raw.map(|p| paths::resolve_against(root, &p, home.as_deref()));

        let source_root = overrides
            .source
            .clone()
            .or_else(|| from_file(file.paths.source))
            .unwrap_or_else(|| root.join(SOURCE_DIR));

        let stage_root = match overrides
            .stage
            .clone()
            .or_else(|| from_file(file.paths.stage))
        {
            Some(stage) => stage,
            None => xdg_dir(&env, "XDG_DATA_HOME", home.as_deref(), ".local/share", "stage root")?
                .join("hyprdots")
                .join(SOURCE_DIR),
        };

        let config_root = match overrides
            .config
            .clone()
            .or_else(|| from_file(file.paths.config))
        {
            Some(config) => config,
            None => xdg_dir(&env, "XDG_CONFIG_HOME", home.as_deref(), ".config", "config root")?,
        };

        let components = match file.components {
            Some(names) => ComponentRegistry::new(names)?,
            None => ComponentRegistry::builtin(),
        };

        let defaults = Bootstrap::default();
        let bootstrap = Bootstrap {
            tpm_url: file.bootstrap.tpm_url.unwrap_or(defaults.tpm_url),
            lazyvim_url: file.bootstrap.lazyvim_url.unwrap_or(defaults.lazyvim_url),
        };

        let paths = Paths::new(source_root, stage_root, config_root);
        paths.ensure_separate()?;

        Ok(Self {
            paths,
            components,
            bootstrap,
            dry_run_delay: file
                .dry_run_delay_ms
                .map_or(DEFAULT_DRY_RUN_DELAY, Duration::from_millis),
        })
    }

    /// Replace the dry-run pause.
    #[must_use]
    pub const fn with_dry_run_delay(mut self, delay: Duration) -> Self {
        self.dry_run_delay = delay;
        self
    }
}

/// Resolve an XDG base directory: the variable if set to an absolute path,
/// otherwise `$HOME/<fallback>`.
fn xdg_dir(
    env: &impl Fn(&str) -> Option<String>,
    var: &str,
    home: Option<&Path>,
    fallback: &str,
    what: &str,
) -> Result<PathBuf, ConfigError> {
    if let Some(dir) = env(var).map(PathBuf::from).filter(|p| p.is_absolute()) {
        return Ok(dir);
    }
    home.map(|h| h.join(fallback))
        .ok_or_else(|| ConfigError::Unresolved {
            what: what.to_string(),
            hint: format!("set HOME or {var}"),
        })
}
