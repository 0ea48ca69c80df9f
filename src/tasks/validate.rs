use super::{Context, Task, TaskResult};
use crate::error::InstallError;
use crate::reporting::Progress;
use crate::resources::fs::exists_or_broken_link;

/// Check that every component exists in the source tree.
#[derive(Debug)]
pub struct ValidateSources;

impl Task for ValidateSources {
    fn name(&self) -> &'static str {
        "Validate sources"
    }

    fn run(&self, ctx: &Context, progress: &Progress<'_>) -> Result<TaskResult, InstallError> {
        ctx.log.info("validating source dotfiles components");
        progress.update("Validating source dotfiles components...");

        if ctx.dry_run {
            ctx.simulate(&format!(
                "would validate {} components in {}",
                ctx.components().len(),
                ctx.paths().source_root.display()
            ));
            return Ok(TaskResult::DryRun);
        }

        for component in ctx.components() {
            let path = ctx.paths().pair(component).source;
            if !exists_or_broken_link(&path) {
                return Err(InstallError::MissingSource { path });
            }
            ctx.log.debug(&format!("found {}", path.display()));
        }
        Ok(TaskResult::Ok)
    }
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::reporting::test_helpers::{Event, RecordingReporter};
    use crate::tasks::test_helpers::{make_context, populate_sources, temp_config};

    #[test]
    fn all_sources_present_is_ok() {
        let (config, _tmp) = temp_config();
        populate_sources(&config);
        let ctx = make_context(config);
        let reporter = RecordingReporter::default();
        let progress = Progress::begin(&reporter, "test");
        assert_eq!(ValidateSources.run(&ctx, &progress).unwrap(), TaskResult::Ok);
    }

    #[test]
    fn first_missing_source_is_reported() {
        let (config, _tmp) = temp_config();
        populate_sources(&config);
        let src = config.paths.source_root.clone();
        std::fs::remove_dir_all(src.join("rofi")).unwrap();
        std::fs::remove_dir_all(src.join("btop")).unwrap();
        let ctx = make_context(config);
        let reporter = RecordingReporter::default();
        let progress = Progress::begin(&reporter, "test");

        let err = ValidateSources.run(&ctx, &progress).unwrap_err();
        assert!(matches!(err, InstallError::MissingSource { path } if path == src.join("rofi")));
    }

    #[cfg(unix)]
    #[test]
    fn broken_link_counts_as_present() {
        let (config, _tmp) = temp_config();
        populate_sources(&config);
        let hypr = config.paths.source_root.join("hypr");
        std::fs::remove_dir_all(&hypr).unwrap();
        std::os::unix::fs::symlink("/nonexistent/hypr", &hypr).unwrap();
        let ctx = make_context(config);
        let reporter = RecordingReporter::default();
        let progress = Progress::begin(&reporter, "test");
        assert!(ValidateSources.run(&ctx, &progress).is_ok());
    }

    #[test]
    fn dry_run_skips_checks() {
        let (config, _tmp) = temp_config();
        let mut ctx = make_context(config);
        ctx.dry_run = true;
        let reporter = RecordingReporter::default();
        let progress = Progress::begin(&reporter, "test");
        assert_eq!(
            ValidateSources.run(&ctx, &progress).unwrap(),
            TaskResult::DryRun
        );
        assert!(reporter.events().contains(&Event::Update(
            "Validating source dotfiles components...".to_string()
        )));
    }
}
