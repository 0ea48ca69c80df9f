//! Command: print version information.

/// Version string, from `HYPRDOTS_VERSION` at build time when set.
#[must_use]
pub fn version() -> &'static str {
    option_env!("HYPRDOTS_VERSION").unwrap_or(env!("CARGO_PKG_VERSION"))
}

/// Print the hyprdots version to stdout.
pub fn run() {
    println!("hyprdots {}", version());
}
