use std::sync::Arc;

use crate::config::{ComponentRegistry, Config, Paths};
use crate::fetch::RepoFetcher;
use crate::logging::Log;

/// Shared context for step execution.
pub struct Context {
    /// Resolved configuration: roots, components, bootstrap URLs.
    pub config: Arc<Config>,
    /// Logger for output and step recording.
    pub log: Arc<dyn Log>,
    /// Whether to simulate steps instead of touching disk.
    pub dry_run: bool,
    /// Repository cloner (injectable for testing).
    pub fetcher: Arc<dyn RepoFetcher>,
}

impl std::fmt::Debug for Context {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Context")
            .field("config", &self.config)
            .field("log", &"<dyn Log>")
            .field("dry_run", &self.dry_run)
            .field("fetcher", &"<dyn RepoFetcher>")
            .finish()
    }
}

impl Context {
    /// Creates a new context for step execution.
    #[must_use]
    pub fn new(
        config: Arc<Config>,
        log: Arc<dyn Log>,
        dry_run: bool,
        fetcher: Arc<dyn RepoFetcher>,
    ) -> Self {
        Self {
            config,
            log,
            dry_run,
            fetcher,
        }
    }

    /// Source, stage and config roots.
    #[must_use]
    pub fn paths(&self) -> &Paths {
        &self.config.paths
    }

    /// Components to install.
    #[must_use]
    pub fn components(&self) -> &ComponentRegistry {
        &self.config.components
    }

    /// Stand in for real work during a dry run: log what would happen and
    /// pause for the configured delay.
    pub fn simulate(&self, action: &str) {
        self.log.dry_run(action);
        if !self.config.dry_run_delay.is_zero() {
            std::thread::sleep(self.config.dry_run_delay);
        }
    }
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::tasks::test_helpers::{make_context, temp_config};
    use std::time::{Duration, Instant};

    #[test]
    fn accessors_expose_config() {
        let (config, tmp) = temp_config();
        let ctx = make_context(config);
        assert_eq!(ctx.paths().source_root, tmp.path().join("src"));
        assert_eq!(ctx.components().len(), 15);
    }

    #[test]
    fn simulate_waits_for_configured_delay() {
        let (config, _tmp) = temp_config();
        let config = config.with_dry_run_delay(Duration::from_millis(20));
        let ctx = make_context(config);
        let start = Instant::now();
        ctx.simulate("would copy");
        assert!(start.elapsed() >= Duration::from_millis(20));
    }

    #[test]
    fn debug_format_includes_key_fields() {
        let (config, _tmp) = temp_config();
        let ctx = make_context(config);
        let debug = format!("{ctx:?}");
        assert!(debug.contains("Context"));
        assert!(debug.contains("dry_run"));
        assert!(debug.contains("<dyn RepoFetcher>"));
    }
}
