pub mod completions;
pub mod components;
pub mod install;
pub mod version;

use std::path::{Path, PathBuf};

use anyhow::{Context as _, Result};

use crate::cli::{GlobalOpts, PathOpts};
use crate::config::{Config, PathOverrides, SOURCE_DIR};
use crate::logging::Logger;

/// Environment variable naming the repository root.
pub const ROOT_ENV: &str = "HYPRDOTS_ROOT";

/// Resolve the root, load the configuration, and log what was loaded.
///
/// # Errors
///
/// Returns an error if the root cannot be determined or the configuration
/// is invalid.
pub fn load_config(global: &GlobalOpts, opts: &PathOpts, log: &Logger) -> Result<Config> {
    let root = resolve_root(global)?;
    log.debug(&format!("root: {}", root.display()));

    log.stage("Loading configuration");
    let overrides = PathOverrides {
        source: opts.source.clone(),
        stage: opts.stage.clone(),
        config: opts.config_dir.clone(),
    };
    let config = Config::load(&root, global.config.as_deref(), &overrides)?;

    log.debug(&format!("source: {}", config.paths.source_root.display()));
    log.debug(&format!("stage: {}", config.paths.stage_root.display()));
    log.debug(&format!("config: {}", config.paths.config_root.display()));
    log.info(&format!("loaded {} components", config.components.len()));
    Ok(config)
}

/// Resolve the hyprdots root directory from CLI arguments or auto-detection.
///
/// Tried in order: `--root`, `$HYPRDOTS_ROOT`, directories around the
/// running executable, the current directory.  Auto-detected candidates
/// must contain a `dotfiles/` directory.
///
/// # Errors
///
/// Returns an error if no candidate matches, or an explicit root does not
/// exist.
pub fn resolve_root(global: &GlobalOpts) -> Result<PathBuf> {
    resolve_root_from(
        global.root.as_deref(),
        std::env::var_os(ROOT_ENV).map(PathBuf::from).as_deref(),
        std::env::current_exe().ok().as_deref(),
        std::env::current_dir().ok().as_deref(),
    )
}

fn resolve_root_from(
    explicit: Option<&Path>,
    env_root: Option<&Path>,
    exe: Option<&Path>,
    cwd: Option<&Path>,
) -> Result<PathBuf> {
    if let Some(root) = explicit.or(env_root) {
        return dunce::canonicalize(root)
            .with_context(|| format!("hyprdots root {} does not exist", root.display()));
    }

    if let Some(parent) = exe.and_then(Path::parent) {
        let candidates = [
            parent.join("../.."), // target/release/ → repo root
            parent.join(".."),    // bin/ → repo root
            parent.to_path_buf(),
        ];
        for candidate in &candidates {
            if is_root(candidate) {
                return Ok(dunce::canonicalize(candidate)?);
            }
        }
    }

    if let Some(cwd) = cwd
        && is_root(cwd)
    {
        return Ok(dunce::canonicalize(cwd)?);
    }

    anyhow::bail!("cannot determine hyprdots root. Use --root or set {ROOT_ENV} env var");
}

fn is_root(dir: &Path) -> bool {
    dir.join(SOURCE_DIR).is_dir()
}
