//! Idempotent filesystem primitives (check + apply pattern).
pub mod fs;
pub mod symlink;

use anyhow::Result;

/// State of a resource on disk.
///
/// # Examples
///
/// ```
/// use hyprdots_cli::resources::ResourceState;
///
/// let missing = ResourceState::Missing;
/// let correct = ResourceState::Correct;
/// let wrong = ResourceState::Incorrect { current: "points to /other".into() };
/// let occupied = ResourceState::Invalid { reason: "target is a real directory".into() };
///
/// assert_ne!(missing, correct);
/// assert_eq!(correct, ResourceState::Correct);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResourceState {
    /// Resource does not exist.
    Missing,
    /// Resource exists and matches the desired state.
    Correct,
    /// Resource exists but does not match the desired state.
    Incorrect {
        /// The current value of the resource.
        current: String,
    },
    /// Something that is not this kind of resource occupies the path.
    Invalid {
        /// What is in the way.
        reason: String,
    },
}

/// Result of applying a resource change.
///
/// # Examples
///
/// ```
/// use hyprdots_cli::resources::ResourceChange;
///
/// assert_eq!(ResourceChange::Applied, ResourceChange::Applied);
/// assert_ne!(ResourceChange::Applied, ResourceChange::AlreadyCorrect);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResourceChange {
    /// Resource was created.
    Applied,
    /// Resource was already correct (no change needed).
    AlreadyCorrect,
}

/// A resource that can report its current state and be brought into the
/// desired state.
pub trait Resource {
    /// Human-readable description of this resource.
    fn description(&self) -> String;

    /// Check the current state of the resource.
    ///
    /// # Errors
    ///
    /// Returns an error if the state cannot be determined.
    fn current_state(&self) -> Result<ResourceState>;

    /// Bring the resource into the desired state.
    ///
    /// # Errors
    ///
    /// Returns an error if the resource cannot be applied.
    fn apply(&self) -> Result<ResourceChange>;
}
