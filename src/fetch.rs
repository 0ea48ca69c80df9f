//! Cloning third-party repositories into the stage root.
use anyhow::{Context as _, Result, bail};
use std::path::Path;
use std::sync::Arc;

use crate::exec::Executor;
use crate::resources::fs::{exists_or_broken_link, remove};

/// Name of the version-control metadata directory inside a clone.
pub const VCS_DIR: &str = ".git";

/// Narrow interface over "clone `url` into `dest`".
///
/// Tests substitute a fake so orchestration can be exercised without network
/// access.
#[cfg_attr(test, mockall::automock)]
pub trait RepoFetcher: Send + Sync {
    /// Clone `url` into `dest`, which must not already exist.
    ///
    /// # Errors
    ///
    /// Returns an error if `dest` exists, the clone tool is unavailable, or
    /// the clone itself fails.
    fn clone_repo(&self, url: &str, dest: &Path) -> Result<()>;
}

/// [`RepoFetcher`] that shells out to `git clone <url> <dest>`.
#[derive(Debug, Clone)]
pub struct GitFetcher {
    executor: Arc<dyn Executor>,
}

impl GitFetcher {
    /// Create a fetcher that runs `git` through `executor`.
    #[must_use]
    pub fn new(executor: Arc<dyn Executor>) -> Self {
        Self { executor }
    }
}

impl RepoFetcher for GitFetcher {
    fn clone_repo(&self, url: &str, dest: &Path) -> Result<()> {
        if exists_or_broken_link(dest) {
            bail!("clone destination already exists: {}", dest.display());
        }
        if !self.executor.which("git") {
            bail!("git not found on PATH");
        }
        let dest_str = dest.to_string_lossy();
        self.executor
            .run("git", &["clone", url, &dest_str])
            .with_context(|| format!("git clone {url}"))?;
        Ok(())
    }
}

/// Remove the `.git` directory from a fresh clone so it carries no upstream
/// history or remotes.
///
/// Returns `true` if metadata was present and removed.
///
/// # Errors
///
/// Returns an error if the metadata directory exists but cannot be removed.
pub fn strip_vcs_metadata(repo: &Path) -> Result<bool> {
    let vcs = repo.join(VCS_DIR);
    if !exists_or_broken_link(&vcs) {
        return Ok(false);
    }
    remove(&vcs).with_context(|| format!("stripping {}", vcs.display()))?;
    Ok(true)
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;
    use crate::exec::test_helpers::MockExecutor;

    #[test]
    fn clone_runs_git_with_fixed_arguments() {
        let dir = tempfile::tempdir().unwrap();
        let dest = dir.path().join("tpm");
        let mock = Arc::new(MockExecutor::ok());
        let fetcher = GitFetcher::new(Arc::clone(&mock) as Arc<dyn Executor>);

        fetcher
            .clone_repo("https://github.com/tmux-plugins/tpm.git", &dest)
            .unwrap();

        let calls = mock.calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(
            calls[0],
            format!(
                "git clone https://github.com/tmux-plugins/tpm.git {}",
                dest.display()
            )
        );
    }

    #[test]
    fn clone_refuses_existing_destination() {
        let dir = tempfile::tempdir().unwrap();
        let mock = Arc::new(MockExecutor::ok());
        let fetcher = GitFetcher::new(Arc::clone(&mock) as Arc<dyn Executor>);

        let err = fetcher.clone_repo("url", dir.path()).unwrap_err();
        assert!(err.to_string().contains("already exists"));
        assert!(mock.calls().is_empty(), "git must not be invoked");
    }

    #[test]
    fn clone_fails_when_git_missing() {
        let dir = tempfile::tempdir().unwrap();
        let mock = Arc::new(MockExecutor::ok().with_which(false));
        let fetcher = GitFetcher::new(Arc::clone(&mock) as Arc<dyn Executor>);

        let err = fetcher
            .clone_repo("url", &dir.path().join("dest"))
            .unwrap_err();
        assert!(err.to_string().contains("git not found"));
        assert!(mock.calls().is_empty());
    }

    #[test]
    fn clone_failure_carries_stderr() {
        let dir = tempfile::tempdir().unwrap();
        let mock = Arc::new(MockExecutor::fail("fatal: repository not found"));
        let fetcher = GitFetcher::new(mock);

        let err = fetcher
            .clone_repo("https://example.invalid/x", &dir.path().join("dest"))
            .unwrap_err();
        let msg = format!("{err:#}");
        assert!(msg.contains("git clone https://example.invalid/x"), "{msg}");
        assert!(msg.contains("repository not found"), "{msg}");
    }

    #[test]
    fn strip_removes_git_directory_only() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir_all(dir.path().join(".git/objects")).unwrap();
        std::fs::write(dir.path().join(".git/HEAD"), "ref: refs/heads/main").unwrap();
        std::fs::write(dir.path().join("init.lua"), "require('config.lazy')").unwrap();

        assert!(strip_vcs_metadata(dir.path()).unwrap());
        assert!(!dir.path().join(".git").exists());
        assert!(dir.path().join("init.lua").exists());
    }

    #[test]
    fn strip_without_metadata_is_noop() {
        let dir = tempfile::tempdir().unwrap();
        assert!(!strip_vcs_metadata(dir.path()).unwrap());
    }
}
