//! Installation steps and the fail-fast orchestrator that sequences them.
pub mod bootstrap;
pub mod configs;
mod context;
pub mod copy;
pub mod links;
pub mod validate;

pub use context::Context;

use crate::error::InstallError;
use crate::logging::TaskStatus;
use crate::reporting::{Progress, Reporter};

/// Outcome of a step that did not fail.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskResult {
    /// Step completed and changed what it needed to.
    Ok,
    /// Step was simulated.
    DryRun,
    /// Step was deliberately not performed.
    Skipped(String),
}

/// A named pipeline step.
pub trait Task: Send + Sync {
    /// Human-readable step name, used in the log and summary.
    fn name(&self) -> &str;

    /// Execute the step, updating `progress` with what it is doing.
    ///
    /// # Errors
    ///
    /// Returns the [`InstallError`] variant for this step's failure mode.
    fn run(&self, ctx: &Context, progress: &Progress<'_>) -> Result<TaskResult, InstallError>;
}

/// An ordered group of steps rendered under one progress scope.
pub struct Phase {
    /// Status line shown when the phase starts.
    pub title: &'static str,
    /// Success line shown when every step in the phase passed.
    pub done: &'static str,
    /// Steps, in execution order.
    pub tasks: Vec<Box<dyn Task>>,
}

impl std::fmt::Debug for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let names: Vec<&str> = self.tasks.iter().map(|t| t.name()).collect();
        f.debug_struct("Phase")
            .field("title", &self.title)
            .field("tasks", &names)
            .finish_non_exhaustive()
    }
}

/// Heading announced to the log and the reporter when a run starts.
const RUN_HEADING: &str = "Dotfiles installer started";

/// The phases run by the install command.
#[must_use]
pub fn install_phases() -> Vec<Phase> {
    vec![
        Phase {
            title: "Installing dotfiles...",
            done: "Dotfiles installed successfully!",
            tasks: vec![
                Box::new(validate::ValidateSources),
                Box::new(copy::CopyDotfiles),
                Box::new(copy::VerifyCopy),
                Box::new(configs::RemoveExistingConfigs),
                Box::new(links::CreateLinks),
            ],
        },
        Phase {
            title: "Installing third-party dots...",
            done: "Third-party dots installed successfully!",
            tasks: vec![
                Box::new(bootstrap::InstallTpm),
                Box::new(bootstrap::InstallLazyVim),
            ],
        },
    ]
}

/// Execute a step, recording the result in the logger.
///
/// A failure is reported to the log at error level and to `progress`, and
/// then returned.
///
/// # Errors
///
/// Returns the step's error unchanged.
pub fn execute(task: &dyn Task, ctx: &Context, progress: &Progress<'_>) -> Result<(), InstallError> {
    ctx.log.stage(task.name());

    match task.run(ctx, progress) {
        Ok(TaskResult::Ok) => {
            ctx.log.record_task(task.name(), TaskStatus::Ok, None);
            Ok(())
        }
        Ok(TaskResult::Skipped(reason)) => {
            ctx.log.info(&format!("skipped: {reason}"));
            ctx.log
                .record_task(task.name(), TaskStatus::Skipped, Some(&reason));
            Ok(())
        }
        Ok(TaskResult::DryRun) => {
            ctx.log.record_task(task.name(), TaskStatus::DryRun, None);
            Ok(())
        }
        Err(e) => {
            let msg = e.to_string();
            ctx.log.error(&format!("{}: {msg}", task.name()));
            progress.error(&msg);
            ctx.log
                .record_task(task.name(), TaskStatus::Failed, Some(&msg));
            Err(e)
        }
    }
}

/// Runs the install phases in order, stopping at the first failure.
///
/// There is no rollback: whatever the completed steps changed stays changed.
pub struct Installer<'a> {
    ctx: &'a Context,
    reporter: &'a dyn Reporter,
    phases: Vec<Phase>,
}

impl std::fmt::Debug for Installer<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Installer")
            .field("ctx", self.ctx)
            .field("phases", &self.phases)
            .finish_non_exhaustive()
    }
}

impl<'a> Installer<'a> {
    /// Installer running [`install_phases`].
    #[must_use]
    pub fn new(ctx: &'a Context, reporter: &'a dyn Reporter) -> Self {
        Self::with_phases(ctx, reporter, install_phases())
    }

    /// Installer running an explicit list of phases.
    #[must_use]
    pub fn with_phases(ctx: &'a Context, reporter: &'a dyn Reporter, phases: Vec<Phase>) -> Self {
        Self {
            ctx,
            reporter,
            phases,
        }
    }

    /// Run every phase.  Steps after a failure are recorded as not run.
    ///
    /// # Errors
    ///
    /// Returns the first step failure.
    pub fn run(&self) -> Result<(), InstallError> {
        self.ctx.log.stage(RUN_HEADING);
        self.reporter.heading(RUN_HEADING);
        self.reporter.section("Installing dotfiles.");

        for (phase_idx, phase) in self.phases.iter().enumerate() {
            let progress = Progress::begin(self.reporter, phase.title);
            for (task_idx, task) in phase.tasks.iter().enumerate() {
                if let Err(e) = execute(task.as_ref(), self.ctx, &progress) {
                    let rest_of_phase = phase.tasks.iter().skip(task_idx + 1);
                    let later_phases = self
                        .phases
                        .iter()
                        .skip(phase_idx + 1)
                        .flat_map(|p| p.tasks.iter());
                    for skipped in rest_of_phase.chain(later_phases) {
                        self.ctx
                            .log
                            .record_task(skipped.name(), TaskStatus::NotRun, None);
                    }
                    return Err(e);
                }
            }
            progress.success(phase.done);
        }
        Ok(())
    }

    /// Run every phase and report whether all of them succeeded.
    #[must_use]
    pub fn install(&self) -> bool {
        self.run().is_ok()
    }
}
