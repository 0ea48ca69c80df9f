//! Domain-specific error types for the installer.
//!
//! Filesystem primitives and the git fetcher return [`anyhow::Result`] with
//! context attached.  Each pipeline step converts those failures into an
//! [`InstallError`] at its boundary, and the command handler converts the
//! typed error back into [`anyhow::Error`] via `?`.
//!
//! # Error hierarchy
//!
//! ```text
//! InstallError                 one variant per pipeline failure mode
//! ├── MissingSource            ValidateSources
//! ├── CopyFailed               CopyDotfiles
//! ├── VerificationFailed       VerifyCopy (all missing components)
//! ├── RemovalFailed            RemoveExistingConfigs (first failure)
//! ├── LinkFailed               CreateLinks (all failed pairs)
//! └── FetchFailed              InstallTpm / InstallLazyVim
//! ConfigError                  config file and component registry problems
//! ```

use std::fmt::Write as _;
use std::path::PathBuf;

use thiserror::Error;

/// A failed pipeline step.
#[derive(Error, Debug)]
pub enum InstallError {
    /// A component's source path does not exist.
    #[error("missing source: {}", .path.display())]
    MissingSource {
        /// The source path that could not be found.
        path: PathBuf,
    },

    /// Copying the source tree into the stage root failed.
    #[error("failed to copy dotfiles to {}: {reason}", .stage.display())]
    CopyFailed {
        /// Stage root that was being populated.
        stage: PathBuf,
        /// Underlying I/O failure, with context.
        reason: String,
    },

    /// One or more staged components are missing after the copy.
    #[error("{} staged component(s) missing: {}", .missing.len(), join_paths(.missing))]
    VerificationFailed {
        /// Every staged path that was found missing.
        missing: Vec<PathBuf>,
    },

    /// An existing config entry could not be removed.
    #[error("failed to remove existing config {}: {reason}", .path.display())]
    RemovalFailed {
        /// The config path that could not be removed.
        path: PathBuf,
        /// Underlying I/O failure, with context.
        reason: String,
    },

    /// One or more links could not be created.
    #[error("failed to create {} link(s): {}", .failed.len(), join_links(.failed))]
    LinkFailed {
        /// `(source, target)` pairs that failed, in registry order.
        failed: Vec<(PathBuf, PathBuf)>,
    },

    /// A third-party repository could not be fetched.
    #[error("failed to install {repo}: {reason}")]
    FetchFailed {
        /// Short name of the repository (e.g. `tpm`).
        repo: String,
        /// Underlying failure, with context.
        reason: String,
    },
}

/// Errors that arise from configuration loading and registry validation.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// A component name cannot be used as a single path segment.
    #[error("invalid component name '{name}': {reason}")]
    InvalidComponent {
        /// The offending name.
        name: String,
        /// Why it was rejected.
        reason: String,
    },

    /// The same component name appears more than once.
    #[error("duplicate component '{0}'")]
    DuplicateComponent(String),

    /// The registry contains no components.
    #[error("component registry is empty")]
    EmptyRegistry,

    /// A required directory could not be determined from the environment.
    #[error("cannot determine {what}: {hint}")]
    Unresolved {
        /// Which path was being resolved.
        what: String,
        /// What the user can do about it.
        hint: String,
    },

    /// Two roots overlap, so one step would destroy another root's contents.
    #[error("{first} root {} {relation} {second} root {}", .first_path.display(), .second_path.display())]
    OverlappingRoots {
        /// Name of the first root (`stage`, `config`).
        first: &'static str,
        /// Resolved path of the first root.
        first_path: PathBuf,
        /// Name of the second root.
        second: &'static str,
        /// Resolved path of the second root.
        second_path: PathBuf,
        /// `is the same as`, `is inside` or `contains`.
        relation: &'static str,
    },

    /// The config file contains invalid TOML or unknown keys.
    #[error("invalid config file {file}: {message}")]
    InvalidSyntax {
        /// Path of the config file.
        file: String,
        /// Parser message.
        message: String,
    },

    /// An I/O error occurred while reading the config file.
    #[error("IO error reading config file {path}: {source}")]
    Io {
        /// Path to the file that could not be read.
        path: String,
        /// Underlying I/O error.
        source: std::io::Error,
    },
}

fn join_paths(paths: &[PathBuf]) -> String {
    paths
        .iter()
        .map(|p| p.display().to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

fn join_links(pairs: &[(PathBuf, PathBuf)]) -> String {
    let mut out = String::new();
    for (i, (source, target)) in pairs.iter().enumerate() {
        if i > 0 {
            out.push_str(", ");
        }
        let _ = write!(out, "{} -> {}", target.display(), source.display());
    }
    out
}

#[cfg(test)]
#[allow(clippy::expect_used)]
mod tests {
    use super::*;
    use std::io;

    // -----------------------------------------------------------------------
    // InstallError
    // -----------------------------------------------------------------------

    #[test]
    fn missing_source_names_path() {
        let e = InstallError::MissingSource {
            path: PathBuf::from("/repo/dotfiles/hypr"),
        };
        assert_eq!(e.to_string(), "missing source: /repo/dotfiles/hypr");
    }

    #[test]
    fn verification_failed_lists_every_path() {
        let e = InstallError::VerificationFailed {
            missing: vec![
                PathBuf::from("/stage/rofi"),
                PathBuf::from("/stage/kitty"),
                PathBuf::from("/stage/btop"),
            ],
        };
        let msg = e.to_string();
        assert!(msg.starts_with("3 staged component(s) missing"));
        assert!(msg.contains("/stage/rofi"));
        assert!(msg.contains("/stage/kitty"));
        assert!(msg.contains("/stage/btop"));
    }

    #[test]
    fn link_failed_lists_pairs_as_target_arrow_source() {
        let e = InstallError::LinkFailed {
            failed: vec![
                (PathBuf::from("/stage/a"), PathBuf::from("/conf/a")),
                (PathBuf::from("/stage/b"), PathBuf::from("/conf/b")),
            ],
        };
        assert_eq!(
            e.to_string(),
            "failed to create 2 link(s): /conf/a -> /stage/a, /conf/b -> /stage/b"
        );
    }

    #[test]
    fn removal_failed_names_path_and_reason() {
        let e = InstallError::RemovalFailed {
            path: PathBuf::from("/conf/waybar"),
            reason: "permission denied".to_string(),
        };
        assert!(e.to_string().contains("/conf/waybar"));
        assert!(e.to_string().contains("permission denied"));
    }

    #[test]
    fn fetch_failed_display() {
        let e = InstallError::FetchFailed {
            repo: "tpm".to_string(),
            reason: "git clone failed (exit 128)".to_string(),
        };
        assert_eq!(
            e.to_string(),
            "failed to install tpm: git clone failed (exit 128)"
        );
    }

    // -----------------------------------------------------------------------
    // ConfigError
    // -----------------------------------------------------------------------

    #[test]
    fn config_error_invalid_component_display() {
        let e = ConfigError::InvalidComponent {
            name: "../etc".to_string(),
            reason: "must be a single path segment".to_string(),
        };
        assert_eq!(
            e.to_string(),
            "invalid component name '../etc': must be a single path segment"
        );
    }

    #[test]
    fn config_error_io_has_source() {
        use std::error::Error as StdError;
        let e = ConfigError::Io {
            path: "/repo/hyprdots.toml".to_string(),
            source: io::Error::new(io::ErrorKind::PermissionDenied, "permission denied"),
        };
        assert!(e.source().is_some());
        assert!(e.to_string().contains("/repo/hyprdots.toml"));
    }

    // -----------------------------------------------------------------------
    // Bounds and conversions
    // -----------------------------------------------------------------------

    fn assert_send_sync<T: Send + Sync>() {}

    #[test]
    fn all_error_types_are_send_sync() {
        assert_send_sync::<InstallError>();
        assert_send_sync::<ConfigError>();
    }

    #[test]
    fn install_error_converts_to_anyhow() {
        let e = InstallError::MissingSource {
            path: PathBuf::from("x"),
        };
        let _anyhow_err: anyhow::Error = e.into();
    }
}
