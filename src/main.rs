use std::sync::Arc;

use anyhow::Result;
use clap::Parser;

use hyprdots_cli::{cli, commands, logging};

fn main() -> Result<()> {
    let _ = enable_ansi_support::enable_ansi_support();
    let args = cli::Cli::parse();

    let log = Arc::new(logging::Logger::new(args.command.name()));
    logging::init_subscriber(args.verbose, log.log_path().map(std::path::PathBuf::as_path));

    match args.command {
        cli::Command::Install(opts) => {
            commands::install::run(&args.global, &opts, args.verbose, &log)
        }
        cli::Command::Components(opts) => commands::components::run(&args.global, &opts, &log),
        cli::Command::Completions { shell } => {
            commands::completions::run(shell);
            Ok(())
        }
        cli::Command::Version => {
            commands::version::run();
            Ok(())
        }
    }
}
