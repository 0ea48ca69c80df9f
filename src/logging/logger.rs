//! Structured logger with step summary collection.
use std::path::PathBuf;
use std::sync::Mutex;

use super::subscriber::{DRY_RUN_TARGET, STAGE_TARGET};
use super::types::{Log, TaskEntry, TaskStatus};
use super::utils::log_file_path;

/// Implement the display methods of [`Log`] by delegating to inherent methods
/// of the same name on the implementing type.
macro_rules! forward_log_methods {
    ($($method:ident),+ $(,)?) => {
        $(
            fn $method(&self, msg: &str) {
                self.$method(msg);
            }
        )+
    };
}

/// Structured logger with step summary collection.
///
/// Messages are emitted as [`tracing`] events; where they end up (console,
/// `$XDG_CACHE_HOME/hyprdots/<command>.log`) is decided by the subscriber
/// installed with [`init_subscriber`](super::init_subscriber).
#[derive(Debug)]
pub struct Logger {
    tasks: Mutex<Vec<TaskEntry>>,
    log_file: Option<PathBuf>,
}

impl Logger {
    /// Create a logger for `command`, remembering its log file path for the
    /// summary.  Does not write to the file itself.
    #[must_use]
    pub fn new(command: &str) -> Self {
        Self::with_log_file(log_file_path(command))
    }

    /// Create a logger that reports `log_file` in its summary.
    #[must_use]
    pub const fn with_log_file(log_file: Option<PathBuf>) -> Self {
        Self {
            tasks: Mutex::new(Vec::new()),
            log_file,
        }
    }

    /// Return the log file path, if available.
    #[must_use]
    pub const fn log_path(&self) -> Option<&PathBuf> {
        self.log_file.as_ref()
    }

    /// Return a clone of all recorded step entries.
    #[must_use]
    pub fn task_entries(&self) -> Vec<TaskEntry> {
        self.tasks.lock().map_or_else(|_| vec![], |g| g.clone())
    }

    /// Log an error message.
    pub fn error(&self, msg: &str) {
        tracing::error!("{msg}");
    }

    /// Log a warning message.
    pub fn warn(&self, msg: &str) {
        tracing::warn!("{msg}");
    }

    /// Log a stage header (major section).
    pub fn stage(&self, msg: &str) {
        tracing::info!(target: STAGE_TARGET, "{msg}");
    }

    /// Log an informational message.
    pub fn info(&self, msg: &str) {
        tracing::info!("{msg}");
    }

    /// Log a debug message.
    pub fn debug(&self, msg: &str) {
        tracing::debug!("{msg}");
    }

    /// Log a dry-run action message.
    pub fn dry_run(&self, msg: &str) {
        tracing::info!(target: DRY_RUN_TARGET, "{msg}");
    }

    /// Record a step result for the summary.
    pub fn record_task(&self, name: &str, status: TaskStatus, message: Option<&str>) {
        if let Ok(mut guard) = self.tasks.lock() {
            guard.push(TaskEntry {
                name: name.to_string(),
                status,
                message: message.map(String::from),
            });
        }
    }

    /// Count the number of failed steps.
    #[must_use]
    pub fn failure_count(&self) -> usize {
        self.tasks.lock().map_or(0, |guard| {
            guard
                .iter()
                .filter(|t| t.status == TaskStatus::Failed)
                .count()
        })
    }

    /// Render the summary of all recorded steps, one line per step followed
    /// by a totals line.  Lines carry ANSI colour codes.
    #[must_use]
    pub fn summary_lines(&self) -> Vec<String> {
        let tasks = self.task_entries();
        if tasks.is_empty() {
            return Vec::new();
        }

        let mut ok = 0u32;
        let mut dry_run = 0u32;
        let mut skipped = 0u32;
        let mut failed = 0u32;
        let mut not_run = 0u32;
        let mut lines = Vec::with_capacity(tasks.len() + 2);

        for task in &tasks {
            let (icon, color) = match task.status {
                TaskStatus::Ok => {
                    ok += 1;
                    ("✓", "\x1b[32m")
                }
                TaskStatus::DryRun => {
                    dry_run += 1;
                    ("~", "\x1b[37m")
                }
                TaskStatus::Skipped => {
                    skipped += 1;
                    ("○", "\x1b[33m")
                }
                TaskStatus::Failed => {
                    failed += 1;
                    ("✗", "\x1b[31m")
                }
                TaskStatus::NotRun => {
                    not_run += 1;
                    ("·", "\x1b[2m")
                }
            };

            let suffix = task
                .message
                .as_ref()
                .map_or_else(String::new, |msg| format!(" ({msg})"));

            lines.push(format!("{color}{icon} {}{suffix}\x1b[0m", task.name));
        }

        let total = ok + dry_run + skipped + failed + not_run;
        lines.push(format!(
            "{total} steps: \x1b[32m{ok} ok\x1b[0m, \x1b[37m{dry_run} dry-run\x1b[0m, \x1b[33m{skipped} skipped\x1b[0m, \x1b[31m{failed} failed\x1b[0m, \x1b[2m{not_run} not run\x1b[0m"
        ));

        if let Some(path) = &self.log_file {
            lines.push(format!("\x1b[2mlog: {}\x1b[0m", path.display()));
        }
        lines
    }

    /// Write the summary to the log.
    pub fn log_summary(&self) {
        let lines = self.summary_lines();
        if lines.is_empty() {
            return;
        }
        self.stage("Summary");
        for line in &lines {
            self.info(line);
        }
    }
}

impl Log for Logger {
    forward_log_methods!(stage, info, debug, warn, error, dry_run);

    fn record_task(&self, name: &str, status: TaskStatus, message: Option<&str>) {
        self.record_task(name, status, message);
    }
}
