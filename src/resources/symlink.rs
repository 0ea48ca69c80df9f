//! Symlink resource.
use anyhow::{Context as _, Result, bail};
use std::path::{Path, PathBuf};

use super::fs::{exists_or_broken_link, make_symlink};
use super::{Resource, ResourceChange, ResourceState};

/// A symlink resource that can be checked and applied.
#[derive(Debug, Clone)]
pub struct SymlinkResource {
    /// The source file/directory (what the symlink points to).
    pub source: PathBuf,
    /// The target path (where the symlink will be created).
    pub target: PathBuf,
}

impl SymlinkResource {
    /// Create a new symlink resource.
    #[must_use]
    pub const fn new(source: PathBuf, target: PathBuf) -> Self {
        Self { source, target }
    }
}

impl Resource for SymlinkResource {
    fn description(&self) -> String {
        format!("{} -> {}", self.target.display(), self.source.display())
    }

    fn current_state(&self) -> Result<ResourceState> {
        match std::fs::read_link(&self.target) {
            Ok(existing) if paths_equal(&existing, &self.source) => Ok(ResourceState::Correct),
            Ok(existing) => Ok(ResourceState::Incorrect {
                current: format!("points to {}", existing.display()),
            }),
            Err(_) if !exists_or_broken_link(&self.target) => Ok(ResourceState::Missing),
            Err(_) => {
                let meta = std::fs::symlink_metadata(&self.target)
                    .with_context(|| format!("reading metadata: {}", self.target.display()))?;
                let kind = if meta.is_dir() {
                    "a real directory"
                } else {
                    "a regular file"
                };
                Ok(ResourceState::Invalid {
                    reason: format!("target is {kind}"),
                })
            }
        }
    }

    /// Create the link.
    ///
    /// A link that already points at `source` is left alone.  Anything else
    /// occupying `target` is an error: callers are expected to have cleared
    /// the path first.  Parent directories are not created.
    fn apply(&self) -> Result<ResourceChange> {
        match self.current_state()? {
            ResourceState::Correct => Ok(ResourceChange::AlreadyCorrect),
            ResourceState::Missing => {
                make_symlink(&self.source, &self.target, self.source.is_dir())
                    .with_context(|| format!("create link: {}", self.description()))?;
                Ok(ResourceChange::Applied)
            }
            ResourceState::Incorrect { current } | ResourceState::Invalid { reason: current } => {
                bail!("{} is occupied: {current}", self.target.display())
            }
        }
    }
}

/// Create a symlink at `target` pointing to `source`, idempotently.
///
/// # Errors
///
/// Returns an error if `target` is occupied by anything other than a link to
/// `source`, or if the OS refuses to create the link (missing parent
/// directory, permissions).
pub fn create_symlink(source: &Path, target: &Path) -> Result<ResourceChange> {
    SymlinkResource::new(source.to_path_buf(), target.to_path_buf()).apply()
}

/// Compare two paths for equality, handling UNC prefix normalization on Windows.
fn paths_equal(a: &Path, b: &Path) -> bool {
    let normalize = |p: &Path| -> PathBuf {
        #[cfg(windows)]
        {
            let s = p.to_string_lossy();
            if let Some(stripped) = s.strip_prefix(r"\\?\") {
                return PathBuf::from(stripped);
            }
        }
        p.to_path_buf()
    };

    normalize(a) == normalize(b)
}
