use super::{Context, Task, TaskResult};
use crate::error::InstallError;
use crate::reporting::Progress;
use crate::resources::ResourceChange;
use crate::resources::symlink::create_symlink;

/// Link each component's config path to its staged copy.
///
/// Every link is attempted; failures are collected and reported together.
#[derive(Debug)]
pub struct CreateLinks;

impl Task for CreateLinks {
    fn name(&self) -> &'static str {
        "Create links"
    }

    fn run(&self, ctx: &Context, progress: &Progress<'_>) -> Result<TaskResult, InstallError> {
        ctx.log.info("creating links");
        progress.update("Linking new dotfiles...");

        if ctx.dry_run {
            ctx.simulate(&format!(
                "would link {} components into {}",
                ctx.components().len(),
                ctx.paths().config_root.display()
            ));
            return Ok(TaskResult::DryRun);
        }

        let mut failed = Vec::new();
        let mut linked = 0u32;
        let mut already_ok = 0u32;
        for (_, pair) in ctx.components().pairs(ctx.paths()) {
            match create_symlink(&pair.stage, &pair.link) {
                Ok(ResourceChange::Applied) => {
                    ctx.log.debug(&format!(
                        "linked {} -> {}",
                        pair.link.display(),
                        pair.stage.display()
                    ));
                    linked += 1;
                }
                Ok(ResourceChange::AlreadyCorrect) => already_ok += 1,
                Err(e) => {
                    ctx.log.error(&format!(
                        "failed to link {} to {}: {e:#}",
                        pair.stage.display(),
                        pair.link.display()
                    ));
                    failed.push((pair.stage, pair.link));
                }
            }
        }

        if !failed.is_empty() {
            return Err(InstallError::LinkFailed { failed });
        }
        ctx.log
            .info(&format!("{linked} linked, {already_ok} already ok"));
        Ok(TaskResult::Ok)
    }
}
