//! Command: print a shell completion script.
use std::io::Write;

use clap::CommandFactory;
use clap_complete::Shell;

use crate::cli::Cli;

/// Write the completion script for `shell` to stdout.
pub fn run(shell: Shell) {
    generate(shell, &mut std::io::stdout());
}

/// Write the completion script for `shell` to `out`.
pub fn generate(shell: Shell, out: &mut impl Write) {
    let mut cmd = Cli::command();
    let name = cmd.get_name().to_string();
    clap_complete::generate(shell, &mut cmd, name, out);
}
