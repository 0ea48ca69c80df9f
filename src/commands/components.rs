//! Command: list components and their resolved paths.
use std::io::Write;

use anyhow::Result;

use crate::cli::{GlobalOpts, PathOpts};
use crate::config::Config;
use crate::logging::Logger;

/// Print every component with its source, stage and link paths.
///
/// # Errors
///
/// Returns an error if configuration loading fails or stdout is closed.
pub fn run(global: &GlobalOpts, opts: &PathOpts, log: &Logger) -> Result<()> {
    let config = super::load_config(global, opts, log)?;
    write_components(&config, &mut std::io::stdout().lock())
}

/// Write the component listing for `config` to `out`.
///
/// # Errors
///
/// Returns an error if writing fails.
pub fn write_components(config: &Config, out: &mut impl Write) -> Result<()> {
    for (component, pair) in config.components.pairs(&config.paths) {
        writeln!(out, "{component}")?;
        writeln!(out, "  source: {}", pair.source.display())?;
        writeln!(out, "  stage:  {}", pair.stage.display())?;
        writeln!(out, "  link:   {}", pair.link.display())?;
    }
    Ok(())
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::config::{ComponentRegistry, Paths};

    #[test]
    fn lists_each_component_with_its_paths() {
        let paths = Paths::new("/src", "/stage", "/conf");
        let components = ComponentRegistry::new(["hypr", "starship.toml"]).unwrap();
        let config = Config::new(paths, components);
        let mut out = Vec::new();

        write_components(&config, &mut out).unwrap();

        let text = String::from_utf8(out).unwrap();
        let expected = [
            "hypr",
            "  source: /src/hypr",
            "  stage:  /stage/hypr",
            "  link:   /conf/hypr",
            "starship.toml",
            "  source: /src/starship.toml",
            "  stage:  /stage/starship.toml",
            "  link:   /conf/starship.toml",
            "",
        ]
        .join("\n");
        assert_eq!(text, expected);
    }
}
