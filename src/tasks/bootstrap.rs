//! Third-party repositories cloned into the stage root after the dotfiles
//! are linked.
use anyhow::{Context as _, Result};

use super::{Context, Task, TaskResult};
use crate::error::InstallError;
use crate::fetch::strip_vcs_metadata;
use crate::reporting::Progress;
use crate::resources::fs::{exists_or_broken_link, remove};
use crate::resources::symlink::SymlinkResource;
use crate::resources::{Resource, ResourceChange, ResourceState};

fn fetch_failed(repo: &str) -> impl FnOnce(anyhow::Error) -> InstallError + '_ {
    move |e| InstallError::FetchFailed {
        repo: repo.to_string(),
        reason: format!("{e:#}"),
    }
}

/// Clone the tmux plugin manager into `<stage>/tmux/plugins/tpm`.
#[derive(Debug)]
pub struct InstallTpm;

impl Task for InstallTpm {
    fn name(&self) -> &'static str {
        "Install TPM"
    }

    fn run(&self, ctx: &Context, progress: &Progress<'_>) -> Result<TaskResult, InstallError> {
        ctx.log.info("installing TPM (tmux plugin manager)");
        progress.update("Installing TPM for tmux...");

        let dir = ctx.paths().tpm_dir();
        let url = &ctx.config.bootstrap.tpm_url;

        if ctx.dry_run {
            ctx.simulate(&format!("would clone {url} into {}", dir.display()));
            return Ok(TaskResult::DryRun);
        }

        install_tpm(ctx, url, &dir).map_err(fetch_failed("tpm"))?;
        ctx.log.info("TPM installed");
        Ok(TaskResult::Ok)
    }
}

fn install_tpm(ctx: &Context, url: &str, dir: &std::path::Path) -> Result<()> {
    if exists_or_broken_link(dir) {
        ctx.log.debug(&format!("removing existing {}", dir.display()));
        remove(dir)?;
    }
    ctx.fetcher.clone_repo(url, dir)
}

/// Clone the LazyVim starter into `<stage>/nvim` and link the live editor
/// config to it.
///
/// An existing `<config>/nvim` that is not already that link is moved to
/// `<config>/nvim.backup`, replacing any earlier backup.
#[derive(Debug)]
pub struct InstallLazyVim;

impl Task for InstallLazyVim {
    fn name(&self) -> &'static str {
        "Install LazyVim"
    }

    fn run(&self, ctx: &Context, progress: &Progress<'_>) -> Result<TaskResult, InstallError> {
        ctx.log.info("installing LazyVim");
        progress.update("Installing LazyVim...");

        if ctx.dry_run {
            ctx.simulate(&format!(
                "would clone {} into {}",
                ctx.config.bootstrap.lazyvim_url,
                ctx.paths().editor_stage_dir().display()
            ));
            return Ok(TaskResult::DryRun);
        }

        let paths = ctx.paths();
        let live = SymlinkResource::new(paths.editor_stage_dir(), paths.editor_config_dir());

        install_lazyvim(ctx, &live).map_err(fetch_failed("lazyvim"))?;
        ctx.log.info("LazyVim installed");

        match live.apply() {
            Ok(ResourceChange::Applied) => {
                ctx.log.debug(&format!("linked {}", live.description()));
            }
            Ok(ResourceChange::AlreadyCorrect) => {}
            Err(e) => {
                ctx.log
                    .error(&format!("linking editor config failed: {e:#}"));
                return Err(InstallError::LinkFailed {
                    failed: vec![(live.source, live.target)],
                });
            }
        }
        Ok(TaskResult::Ok)
    }
}

/// Clear the stage, move the live editor config aside, then clone and strip
/// the starter.
fn install_lazyvim(ctx: &Context, live: &SymlinkResource) -> Result<()> {
    let paths = ctx.paths();
    let stage_dir = &live.source;
    let config_dir = &live.target;

    if exists_or_broken_link(stage_dir) {
        ctx.log
            .debug(&format!("removing existing {}", stage_dir.display()));
        remove(stage_dir)?;
    }

    let already_linked = live.current_state()? == ResourceState::Correct;
    if !already_linked && exists_or_broken_link(config_dir) {
        let backup = paths.editor_backup_dir();
        if exists_or_broken_link(&backup) {
            remove(&backup).context("removing previous editor backup")?;
        }
        std::fs::rename(config_dir, &backup).with_context(|| {
            format!("backing up {} to {}", config_dir.display(), backup.display())
        })?;
        ctx.log.info(&format!(
            "backed up existing nvim config to {}",
            backup.display()
        ));
    }

    ctx.fetcher
        .clone_repo(&ctx.config.bootstrap.lazyvim_url, stage_dir)?;
    if strip_vcs_metadata(stage_dir)? {
        ctx.log.debug("removed .git from LazyVim starter");
    }
    Ok(())
}
