//! Progress reporting sink the installer notifies of phase transitions.
//!
//! The installer holds no UI logic: it calls [`Reporter`] methods and the
//! implementation decides how (or whether) to render them.  Long-running
//! phases are wrapped in a [`Progress`] guard so the sink is always told when
//! a phase ends, including on early return.
mod console;

pub use console::ConsoleReporter;

/// Observer for installer progress.
pub trait Reporter: Send + Sync {
    /// A top-level heading.
    fn heading(&self, msg: &str);
    /// A section banner within the current run.
    fn section(&self, msg: &str);
    /// A progress phase starts with an initial status message.
    fn progress_begin(&self, msg: &str);
    /// The status text of the current phase changed.
    fn progress_update(&self, msg: &str);
    /// The current phase finished successfully.
    fn progress_success(&self, msg: &str);
    /// The current phase failed.
    fn progress_error(&self, msg: &str);
    /// The current phase is over; release any in-place status display.
    fn progress_end(&self);
}

/// Scoped progress handle.
///
/// Created by [`Progress::begin`]; calls [`Reporter::progress_end`] when
/// dropped, whichever way the scope is left.
pub struct Progress<'a> {
    reporter: &'a dyn Reporter,
}

impl<'a> Progress<'a> {
    /// Start a progress phase on `reporter`.
    #[must_use]
    pub fn begin(reporter: &'a dyn Reporter, msg: &str) -> Self {
        reporter.progress_begin(msg);
        Self { reporter }
    }

    /// Replace the status text.
    pub fn update(&self, msg: &str) {
        self.reporter.progress_update(msg);
    }

    /// Report that the phase succeeded.
    pub fn success(&self, msg: &str) {
        self.reporter.progress_success(msg);
    }

    /// Report that the phase failed.
    pub fn error(&self, msg: &str) {
        self.reporter.progress_error(msg);
    }
}

impl Drop for Progress<'_> {
    fn drop(&mut self) {
        self.reporter.progress_end();
    }
}

impl std::fmt::Debug for Progress<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Progress").finish_non_exhaustive()
    }
}
