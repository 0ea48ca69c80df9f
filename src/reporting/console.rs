//! Terminal rendering of installer progress.
use std::io::Write;
use std::sync::Mutex;

use super::Reporter;
use crate::logging::utils::terminal_columns;

/// Mutable state behind the reporter's lock.
struct State<W> {
    out: W,
    /// Whether an in-place progress line is currently on screen.
    line_shown: bool,
}

/// [`Reporter`] that draws a single in-place `▹` status line and prints
/// `✓`/`✗` lines when a phase finishes.
///
/// With `inline` disabled (verbose mode, where log lines share the
/// terminal) status updates are printed as ordinary lines instead.
pub struct ConsoleReporter<W: Write + Send = std::io::Stdout> {
    state: Mutex<State<W>>,
    inline: bool,
}

impl ConsoleReporter {
    /// Reporter writing to standard output.
    #[must_use]
    pub fn stdout(inline: bool) -> Self {
        Self::new(std::io::stdout(), inline)
    }
}

impl<W: Write + Send> ConsoleReporter<W> {
    /// Reporter writing to `out`.
    pub const fn new(out: W, inline: bool) -> Self {
        Self {
            state: Mutex::new(State {
                out,
                line_shown: false,
            }),
            inline,
        }
    }

    /// Consume the reporter and return its writer.
    pub fn into_inner(self) -> W {
        self.state
            .into_inner()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .out
    }

    fn with_state(&self, f: impl FnOnce(&mut State<W>)) {
        let mut guard = self
            .state
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        f(&mut guard);
        guard.out.flush().ok();
    }

    /// Print a full line, first erasing any progress line.
    fn line(&self, text: &str) {
        self.with_state(|state| {
            clear(state);
            writeln!(state.out, "{text}").ok();
        });
    }

    fn status(&self, msg: &str) {
        if !self.inline {
            self.line(&format!("  \x1b[2m▹ {msg}\x1b[0m"));
            return;
        }
        self.with_state(|state| {
            clear(state);
            write!(state.out, "  \x1b[2m▹ {}\x1b[0m", fit(msg, terminal_columns())).ok();
            state.line_shown = true;
        });
    }
}

/// Erase the in-place progress line if one is shown.
fn clear<W: Write>(state: &mut State<W>) {
    if state.line_shown {
        write!(state.out, "\r\x1b[K").ok();
        state.line_shown = false;
    }
}

/// Truncate `msg` so that `"  ▹ " + msg` fits in `cols` columns.
fn fit(msg: &str, cols: usize) -> String {
    let prefix_width = 4;
    let max_chars = cols.saturating_sub(prefix_width);
    if msg.chars().count() > max_chars {
        let truncated: String = msg.chars().take(max_chars.saturating_sub(1)).collect();
        format!("{truncated}…")
    } else {
        msg.to_string()
    }
}

impl<W: Write + Send> Reporter for ConsoleReporter<W> {
    fn heading(&self, msg: &str) {
        self.line(&format!("\x1b[1m{msg}\x1b[0m"));
    }

    fn section(&self, msg: &str) {
        self.line(&format!("\x1b[1;34m::\x1b[0m \x1b[1m{msg}\x1b[0m"));
    }

    fn progress_begin(&self, msg: &str) {
        self.status(msg);
    }

    fn progress_update(&self, msg: &str) {
        self.status(msg);
    }

    fn progress_success(&self, msg: &str) {
        self.line(&format!("  \x1b[32m✓\x1b[0m {msg}"));
    }

    fn progress_error(&self, msg: &str) {
        self.line(&format!("  \x1b[31m✗\x1b[0m {msg}"));
    }

    fn progress_end(&self) {
        self.with_state(clear);
    }
}

impl<W: Write + Send> std::fmt::Debug for ConsoleReporter<W> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConsoleReporter")
            .field("inline", &self.inline)
            .finish_non_exhaustive()
    }
}
