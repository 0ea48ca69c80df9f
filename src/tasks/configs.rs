use super::{Context, Task, TaskResult};
use crate::error::InstallError;
use crate::reporting::Progress;
use crate::resources::fs::remove;

/// Delete whatever currently sits at each component's config path.
#[derive(Debug)]
pub struct RemoveExistingConfigs;

impl Task for RemoveExistingConfigs {
    fn name(&self) -> &'static str {
        "Remove existing configs"
    }

    fn run(&self, ctx: &Context, progress: &Progress<'_>) -> Result<TaskResult, InstallError> {
        ctx.log.info("removing existing configs");
        progress.update("Removing existing configs...");

        if ctx.dry_run {
            ctx.simulate(&format!(
                "would remove {} entries from {}",
                ctx.components().len(),
                ctx.paths().config_root.display()
            ));
            return Ok(TaskResult::DryRun);
        }

        for component in ctx.components() {
            let link = ctx.paths().pair(component).link;
            remove(&link).map_err(|e| InstallError::RemovalFailed {
                path: link.clone(),
                reason: format!("{e:#}"),
            })?;
            ctx.log.debug(&format!("removed {}", link.display()));
        }
        Ok(TaskResult::Ok)
    }
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::reporting::test_helpers::RecordingReporter;
    use crate::tasks::test_helpers::{make_context, temp_config_with, write_component};

    #[test]
    fn removes_files_dirs_and_links() {
        let (config, _tmp) = temp_config_with(&["hypr", "kitty", "starship.toml"]);
        let conf = config.paths.config_root.clone();
        write_component(&conf.join("hypr"));
        write_component(&conf.join("starship.toml"));
        let ctx = make_context(config);
        let reporter = RecordingReporter::default();
        let progress = Progress::begin(&reporter, "test");

        assert_eq!(
            RemoveExistingConfigs.run(&ctx, &progress).unwrap(),
            TaskResult::Ok
        );
        assert!(!conf.join("hypr").exists());
        assert!(!conf.join("starship.toml").exists());
        assert!(conf.exists());
    }

    #[test]
    fn absent_config_root_is_fine() {
        let (config, _tmp) = temp_config_with(&["hypr"]);
        let ctx = make_context(config);
        let reporter = RecordingReporter::default();
        let progress = Progress::begin(&reporter, "test");
        assert!(RemoveExistingConfigs.run(&ctx, &progress).is_ok());
    }

    #[cfg(unix)]
    #[test]
    fn first_removal_failure_aborts() {
        // A segment longer than NAME_MAX fails lookup with ENAMETOOLONG,
        // which privileges do not bypass.
        let too_long = "x".repeat(300);
        let (config, _tmp) = temp_config_with(&[too_long.as_str(), "kitty"]);
        let conf = config.paths.config_root.clone();
        write_component(&conf.join("kitty"));
        let ctx = make_context(config);
        let reporter = RecordingReporter::default();
        let progress = Progress::begin(&reporter, "test");

        let err = RemoveExistingConfigs.run(&ctx, &progress).unwrap_err();

        assert!(
            matches!(err, InstallError::RemovalFailed { ref path, .. } if *path == conf.join(&too_long))
        );
        assert!(conf.join("kitty").join("config").exists());
    }
}
