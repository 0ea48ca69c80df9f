use std::sync::Arc;

use anyhow::Result;

use crate::cli::{GlobalOpts, PathOpts};
use crate::exec::SystemExecutor;
use crate::fetch::GitFetcher;
use crate::logging::{Log, Logger};
use crate::reporting::ConsoleReporter;
use crate::tasks::{Context, Installer};

/// Run the install command.
///
/// With `verbose` set the log console layer is active, so the reporter
/// prints status updates as plain lines rather than redrawing one in place.
///
/// # Errors
///
/// Returns an error if configuration loading or any install step fails.
pub fn run(global: &GlobalOpts, opts: &PathOpts, verbose: bool, log: &Arc<Logger>) -> Result<()> {
    log.info(&format!("hyprdots {}", super::version::version()));
    let config = super::load_config(global, opts, log)?;
    if global.dry_run {
        log.info("dry run: nothing will be changed");
    }

    let fetcher = Arc::new(GitFetcher::new(Arc::new(SystemExecutor)));
    let ctx = Context::new(
        Arc::new(config),
        Arc::clone(log) as Arc<dyn Log>,
        global.dry_run,
        fetcher,
    );
    let reporter = ConsoleReporter::stdout(!verbose);

    let result = Installer::new(&ctx, &reporter).run();

    log.log_summary();
    if !verbose {
        println!();
        for line in log.summary_lines() {
            println!("{line}");
        }
    }

    result?;
    Ok(())
}
