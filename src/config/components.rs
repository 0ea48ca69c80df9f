//! The ordered registry of dotfile components and their derived paths.
use std::collections::HashSet;
use std::path::{Component as PathComponent, Path, PathBuf};

use crate::error::ConfigError;

use super::paths::Paths;

/// Components installed when no config file overrides the list.
pub const DEFAULT_COMPONENTS: &[&str] = &[
    "hypr",
    "waybar",
    "rofi",
    "fish",
    "kitty",
    "neofetch",
    "fastfetch",
    "cava",
    "waypaper",
    "swaync",
    "btop",
    "wlogout",
    "atuin",
    "tmux",
    "starship.toml",
];

/// One named unit of configuration, e.g. an application's config directory.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Component {
    name: String,
}

impl Component {
    /// The component name, which is also its directory (or file) name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl std::fmt::Display for Component {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.name)
    }
}

/// The three paths a component occupies during installation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathPair {
    /// `source_root/name`: the pristine copy in the repository.
    pub source: PathBuf,
    /// `stage_root/name`: the user-owned copy that links point at.
    pub stage: PathBuf,
    /// `config_root/name`: where the application looks for its config.
    pub link: PathBuf,
}

/// Ordered, validated set of component names.
///
/// Order determines the order in which components are validated, removed
/// and linked.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComponentRegistry {
    components: Vec<Component>,
}

impl ComponentRegistry {
    /// Build a registry from `names`, preserving order.
    ///
    /// # Errors
    ///
    /// Returns an error if the list is empty, a name is not a single plain
    /// path segment, or a name appears twice.
    pub fn new<I, S>(names: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut seen = HashSet::new();
        let mut components = Vec::new();
        for name in names {
            let name = name.into();
            validate_name(&name)?;
            if !seen.insert(name.clone()) {
                return Err(ConfigError::DuplicateComponent(name));
            }
            components.push(Component { name });
        }
        if components.is_empty() {
            return Err(ConfigError::EmptyRegistry);
        }
        Ok(Self { components })
    }

    /// The built-in registry of [`DEFAULT_COMPONENTS`].
    #[must_use]
    pub fn builtin() -> Self {
        Self {
            components: DEFAULT_COMPONENTS
                .iter()
                .map(|name| Component {
                    name: (*name).to_string(),
                })
                .collect(),
        }
    }

    /// Iterate components in registry order.
    pub fn iter(&self) -> std::slice::Iter<'_, Component> {
        self.components.iter()
    }

    /// Number of components.
    #[must_use]
    pub fn len(&self) -> usize {
        self.components.len()
    }

    /// Always `false` for a constructed registry; provided for API symmetry.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }

    /// Derive every component's [`PathPair`] under `paths`, in order.
    #[must_use]
    pub fn pairs(&self, paths: &Paths) -> Vec<(&Component, PathPair)> {
        self.iter().map(|c| (c, paths.pair(c))).collect()
    }
}

impl<'a> IntoIterator for &'a ComponentRegistry {
    type Item = &'a Component;
    type IntoIter = std::slice::Iter<'a, Component>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

fn validate_name(name: &str) -> Result<(), ConfigError> {
    let invalid = |reason: &str| ConfigError::InvalidComponent {
        name: name.to_string(),
        reason: reason.to_string(),
    };
    if name.trim().is_empty() {
        return Err(invalid("name is empty"));
    }
    let mut parts = Path::new(name).components();
    match (parts.next(), parts.next()) {
        (Some(PathComponent::Normal(_)), None) if !name.contains(['/', '\\']) => Ok(()),
        _ => Err(invalid("must be a single path segment")),
    }
}
