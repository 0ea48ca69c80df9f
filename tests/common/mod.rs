// Shared helpers for integration tests.
//
// Provides a temporary-directory-backed hyprdots repository with isolated
// source, stage and config roots, plus fakes for the fetcher and reporter so
// the installer can run end to end without network access or a terminal.
//
// Used by all integration test binaries that declare `mod common;`.
#![allow(dead_code)]

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use anyhow::{Result, bail};

use hyprdots_cli::config::{Config, PathOverrides};
use hyprdots_cli::fetch::{RepoFetcher, VCS_DIR};
use hyprdots_cli::logging::{Log, Logger};
use hyprdots_cli::reporting::Reporter;
use hyprdots_cli::tasks::Context;

/// Fetcher that fakes a clone by creating `dest` with a README and a `.git`
/// directory, or fails every clone when built with [`FakeFetcher::failing`].
#[derive(Debug, Default)]
pub struct FakeFetcher {
    fail_with: Option<String>,
    clones: Mutex<Vec<(String, PathBuf)>>,
}

impl FakeFetcher {
    /// A fetcher whose clones always fail with `reason`.
    pub fn failing(reason: &str) -> Self {
        Self {
            fail_with: Some(reason.to_string()),
            ..Self::default()
        }
    }

    /// `(url, dest)` of every successful clone.
    pub fn clones(&self) -> Vec<(String, PathBuf)> {
        self.clones.lock().unwrap().clone()
    }
}

impl RepoFetcher for FakeFetcher {
    fn clone_repo(&self, url: &str, dest: &Path) -> Result<()> {
        if let Some(reason) = &self.fail_with {
            bail!("{reason}");
        }
        if dest.symlink_metadata().is_ok() {
            bail!("clone destination already exists: {}", dest.display());
        }
        std::fs::create_dir_all(dest.join(VCS_DIR))?;
        std::fs::write(dest.join("README.md"), url)?;
        self.clones
            .lock()
            .unwrap()
            .push((url.to_string(), dest.to_path_buf()));
        Ok(())
    }
}

/// Reporter that records progress errors and successes.
#[derive(Debug, Default)]
pub struct RecordingReporter {
    pub lines: Mutex<Vec<String>>,
}

impl RecordingReporter {
    pub fn lines(&self) -> Vec<String> {
        self.lines.lock().unwrap().clone()
    }

    fn push(&self, line: String) {
        self.lines.lock().unwrap().push(line);
    }
}

impl Reporter for RecordingReporter {
    fn heading(&self, msg: &str) {
        self.push(format!("# {msg}"));
    }
    fn section(&self, msg: &str) {
        self.push(format!(":: {msg}"));
    }
    fn progress_begin(&self, msg: &str) {
        self.push(format!("> {msg}"));
    }
    fn progress_update(&self, _msg: &str) {}
    fn progress_success(&self, msg: &str) {
        self.push(format!("ok {msg}"));
    }
    fn progress_error(&self, msg: &str) {
        self.push(format!("err {msg}"));
    }
    fn progress_end(&self) {}
}

/// An isolated hyprdots repository backed by a [`tempfile::TempDir`].
///
/// Layout: `<tmp>/repo/dotfiles` (source), `<tmp>/stage`, `<tmp>/config`.
pub struct IntegrationTestContext {
    pub tmp: tempfile::TempDir,
}

impl IntegrationTestContext {
    /// Repository root (contains `dotfiles/`).
    pub fn repo(&self) -> PathBuf {
        self.tmp.path().join("repo")
    }

    pub fn source_root(&self) -> PathBuf {
        self.repo().join("dotfiles")
    }

    pub fn stage_root(&self) -> PathBuf {
        self.tmp.path().join("stage")
    }

    pub fn config_root(&self) -> PathBuf {
        self.tmp.path().join("config")
    }

    /// Load configuration the way the CLI does, with every root pinned to
    /// the temp dir and no dry-run pause.
    pub fn load_config(&self) -> Config {
        let overrides = PathOverrides {
            source: None,
            stage: Some(self.stage_root()),
            config: Some(self.config_root()),
        };
        let home = self.tmp.path().to_string_lossy().to_string();
        Config::load_with_env(&self.repo(), None, &overrides, |key| {
            (key == "HOME").then(|| home.clone())
        })
        .expect("load config")
        .with_dry_run_delay(Duration::ZERO)
    }

    /// Build an installer context with `fetcher`, returning the logger too.
    pub fn context(&self, fetcher: Arc<dyn RepoFetcher>, dry_run: bool) -> (Context, Arc<Logger>) {
        let log = Arc::new(Logger::with_log_file(None));
        let ctx = Context::new(
            Arc::new(self.load_config()),
            Arc::clone(&log) as Arc<dyn Log>,
            dry_run,
            fetcher,
        );
        (ctx, log)
    }
}

/// Fluent builder for [`IntegrationTestContext`].
pub struct TestContextBuilder {
    ctx: IntegrationTestContext,
}

impl TestContextBuilder {
    /// Begin with an empty repository (only `repo/dotfiles/`).
    pub fn new() -> Self {
        let tmp = tempfile::tempdir().expect("create temp dir");
        std::fs::create_dir_all(tmp.path().join("repo").join("dotfiles"))
            .expect("create source root");
        Self {
            ctx: IntegrationTestContext { tmp },
        }
    }

    /// Create every default component in the source tree.
    pub fn with_default_sources(self) -> Self {
        let names = hyprdots_cli::config::components::DEFAULT_COMPONENTS;
        names.iter().fold(self, |b, name| b.with_source(name))
    }

    /// Create component `name` in the source tree: a file when the name has
    /// an extension, otherwise a directory holding a `config` file.
    pub fn with_source(self, name: &str) -> Self {
        let path = self.ctx.source_root().join(name);
        if Path::new(name).extension().is_some() {
            std::fs::write(&path, format!("# {name}\n")).expect("write source file");
        } else {
            std::fs::create_dir_all(&path).expect("create source dir");
            std::fs::write(path.join("config"), format!("# {name}\n")).expect("write source");
        }
        self
    }

    /// Remove component `name` from the source tree.
    pub fn without_source(self, name: &str) -> Self {
        let path = self.ctx.source_root().join(name);
        if path.is_dir() {
            std::fs::remove_dir_all(&path).expect("remove source dir");
        } else {
            std::fs::remove_file(&path).expect("remove source file");
        }
        self
    }

    /// Create the config root, optionally with pre-existing entries.
    pub fn with_config_entry(self, name: &str, contents: &str) -> Self {
        let path = self.ctx.config_root().join(name);
        std::fs::create_dir_all(&path).expect("create config entry");
        std::fs::write(path.join("init"), contents).expect("write config entry");
        self
    }

    /// Create an empty config root.
    pub fn with_config_root(self) -> Self {
        std::fs::create_dir_all(self.ctx.config_root()).expect("create config root");
        self
    }

    /// Write `<repo>/hyprdots.toml`.
    pub fn with_config_file(self, content: &str) -> Self {
        std::fs::write(self.ctx.repo().join("hyprdots.toml"), content)
            .expect("write hyprdots.toml");
        self
    }

    /// Finish building and return the configured context.
    pub fn build(self) -> IntegrationTestContext {
        self.ctx
    }
}

/// All paths below `root`, relative and sorted; empty if `root` is absent.
pub fn tree(root: &Path) -> Vec<PathBuf> {
    fn walk(root: &Path, dir: &Path, out: &mut Vec<PathBuf>) {
        let Ok(entries) = std::fs::read_dir(dir) else {
            return;
        };
        for entry in entries.flatten() {
            let path = entry.path();
            out.push(path.strip_prefix(root).unwrap().to_path_buf());
            if entry.file_type().is_ok_and(|t| t.is_dir()) {
                walk(root, &path, out);
            }
        }
    }
    let mut out = Vec::new();
    walk(root, root, &mut out);
    out.sort();
    out
}
