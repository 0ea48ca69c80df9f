use super::{Context, Task, TaskResult};
use crate::error::InstallError;
use crate::reporting::Progress;
use crate::resources::fs::{copy_tree, exists_or_broken_link, remove};

/// Replace the stage root with a fresh copy of the source tree.
#[derive(Debug)]
pub struct CopyDotfiles;

impl Task for CopyDotfiles {
    fn name(&self) -> &'static str {
        "Copy dotfiles"
    }

    fn run(&self, ctx: &Context, progress: &Progress<'_>) -> Result<TaskResult, InstallError> {
        let paths = ctx.paths();
        ctx.log
            .info(&format!("copying dotfiles to {}", paths.stage_root.display()));
        progress.update("Copying dotfiles...");

        if ctx.dry_run {
            ctx.simulate(&format!(
                "would copy {} -> {}",
                paths.source_root.display(),
                paths.stage_root.display()
            ));
            return Ok(TaskResult::DryRun);
        }

        let copy_failed = |e: anyhow::Error| InstallError::CopyFailed {
            stage: paths.stage_root.clone(),
            reason: format!("{e:#}"),
        };

        if exists_or_broken_link(&paths.stage_root) {
            ctx.log.debug("stage root already exists, removing it");
            remove(&paths.stage_root).map_err(copy_failed)?;
        }
        copy_tree(&paths.source_root, &paths.stage_root).map_err(copy_failed)?;
        Ok(TaskResult::Ok)
    }
}

/// Check that every component made it into the stage root.
///
/// Collects all missing components rather than stopping at the first.
#[derive(Debug)]
pub struct VerifyCopy;

impl Task for VerifyCopy {
    fn name(&self) -> &'static str {
        "Verify copy"
    }

    fn run(&self, ctx: &Context, _progress: &Progress<'_>) -> Result<TaskResult, InstallError> {
        ctx.log.info("checking staged components");

        if ctx.dry_run {
            return Ok(TaskResult::Skipped("dry run".to_string()));
        }

        let missing: Vec<_> = ctx
            .components()
            .iter()
            .map(|c| ctx.paths().pair(c).stage)
            .filter(|stage| !exists_or_broken_link(stage))
            .collect();

        for path in &missing {
            ctx.log
                .error(&format!("staged component {} is missing", path.display()));
        }

        if missing.is_empty() {
            Ok(TaskResult::Ok)
        } else {
            Err(InstallError::VerificationFailed { missing })
        }
    }
}
