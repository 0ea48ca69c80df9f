//! The three roots every installation step works under.
use std::path::{Component as PathComponent, Path, PathBuf};

use super::components::{Component, PathPair};
use crate::error::ConfigError;

/// Directory (under the stage and config roots) holding the editor config.
pub const EDITOR_DIR: &str = "nvim";

/// Suffix appended to the live editor config when it is moved aside.
pub const BACKUP_SUFFIX: &str = ".backup";

/// Root directories for an installation run.
///
/// Passed explicitly into the task [`Context`](crate::tasks::Context); never
/// read from process-wide state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Paths {
    /// Read-only source tree shipped with the repository.
    pub source_root: PathBuf,
    /// Writable staging directory the links point into.
    pub stage_root: PathBuf,
    /// Live configuration directory that receives the links.
    pub config_root: PathBuf,
}

impl Paths {
    /// Create a path set from its three roots.
    #[must_use]
    pub fn new(
        source_root: impl Into<PathBuf>,
        stage_root: impl Into<PathBuf>,
        config_root: impl Into<PathBuf>,
    ) -> Self {
        Self {
            source_root: source_root.into(),
            stage_root: stage_root.into(),
            config_root: config_root.into(),
        }
    }

    /// Derive the path triple for `component`.
    #[must_use]
    pub fn pair(&self, component: &Component) -> PathPair {
        PathPair {
            source: self.source_root.join(component.name()),
            stage: self.stage_root.join(component.name()),
            link: self.config_root.join(component.name()),
        }
    }

    /// Where the tmux plugin manager is cloned.
    #[must_use]
    pub fn tpm_dir(&self) -> PathBuf {
        self.stage_root.join("tmux").join("plugins").join("tpm")
    }

    /// Where the editor starter template is cloned.
    #[must_use]
    pub fn editor_stage_dir(&self) -> PathBuf {
        self.stage_root.join(EDITOR_DIR)
    }

    /// The live editor config directory.
    #[must_use]
    pub fn editor_config_dir(&self) -> PathBuf {
        self.config_root.join(EDITOR_DIR)
    }

    /// Where a pre-existing live editor config is moved aside to.
    #[must_use]
    pub fn editor_backup_dir(&self) -> PathBuf {
        self.config_root.join(format!("{EDITOR_DIR}{BACKUP_SUFFIX}"))
    }
}

impl Paths {
    /// Reject root layouts where one step would destroy another root.
    ///
    /// The stage root is deleted wholesale before each copy, so it must be
    /// disjoint from the source root in both directions.  Config entries are
    /// removed before linking, so the config root must differ from both.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::OverlappingRoots`] naming the offending pair.
    pub fn ensure_separate(&self) -> Result<(), ConfigError> {
        let source = normalize(&self.source_root);
        let stage = normalize(&self.stage_root);
        let config = normalize(&self.config_root);

        let overlap = |first: &'static str,
                       first_path: &Path,
                       second: &'static str,
                       second_path: &Path,
                       relation: &'static str|
         -> Result<(), ConfigError> {
            Err(ConfigError::OverlappingRoots {
                first,
                first_path: first_path.to_path_buf(),
                second,
                second_path: second_path.to_path_buf(),
                relation,
            })
        };

        if stage == source {
            return overlap("stage", &stage, "source", &source, "is the same as");
        }
        if stage.starts_with(&source) {
            return overlap("stage", &stage, "source", &source, "is inside");
        }
        if source.starts_with(&stage) {
            return overlap("stage", &stage, "source", &source, "contains");
        }
        if config == source {
            return overlap("config", &config, "source", &source, "is the same as");
        }
        if config == stage {
            return overlap("config", &config, "stage", &stage, "is the same as");
        }
        Ok(())
    }
}

/// Resolve `path` for comparison: lexically drop `.` and `..`, then
/// canonicalize the longest existing ancestor so paths through links compare
/// equal.
fn normalize(path: &Path) -> PathBuf {
    let mut lexical = PathBuf::new();
    for part in path.components() {
        match part {
            PathComponent::CurDir => {}
            PathComponent::ParentDir => {
                lexical.pop();
            }
            other => lexical.push(other),
        }
    }

    let mut rest = Vec::new();
    let mut base = lexical.as_path();
    loop {
        if let Ok(canonical) = dunce::canonicalize(base) {
            return rest.iter().rev().fold(canonical, |acc, name| acc.join(name));
        }
        match (base.parent(), base.file_name()) {
            (Some(parent), Some(name)) => {
                rest.push(name.to_os_string());
                base = parent;
            }
            _ => return lexical,
        }
    }
}

/// Expand a leading `~` and resolve relative paths against `base`.
pub(super) fn resolve_against(base: &Path, raw: &Path, home: Option<&Path>) -> PathBuf {
    if let (Ok(rest), Some(home)) = (raw.strip_prefix("~"), home) {
        return home.join(rest);
    }
    if raw.is_absolute() {
        raw.to_path_buf()
    } else {
        base.join(raw)
    }
}
