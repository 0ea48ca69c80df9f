//! Core logging types: step entries, status, and the [`Log`] trait.

/// Step execution result for summary reporting.
#[derive(Debug, Clone)]
pub struct TaskEntry {
    /// Human-readable step name.
    pub name: String,
    /// Final status of the step.
    pub status: TaskStatus,
    /// Optional detail message (e.g., skip reason or error description).
    pub message: Option<String>,
}

/// Status of a pipeline step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskStatus {
    /// Step completed successfully.
    Ok,
    /// Step ran in dry-run mode; nothing was changed.
    DryRun,
    /// Step was deliberately skipped (e.g. verification during a dry run).
    Skipped,
    /// Step failed and aborted the run.
    Failed,
    /// Step never started because an earlier step failed.
    NotRun,
}

/// Abstraction over the structured log.
///
/// The log is an audit trail: nothing in the pipeline reads it back to make
/// decisions.
pub trait Log: Send + Sync {
    /// Log a stage header (major section).
    fn stage(&self, msg: &str);
    /// Log an informational message.
    fn info(&self, msg: &str);
    /// Log a debug message (may be suppressed on console).
    fn debug(&self, msg: &str);
    /// Log a warning message.
    fn warn(&self, msg: &str);
    /// Log an error message.
    fn error(&self, msg: &str);
    /// Log a dry-run action message.
    fn dry_run(&self, msg: &str);
    /// Record a step result for the summary.
    fn record_task(&self, name: &str, status: TaskStatus, message: Option<&str>);
}
