use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Top-level CLI entry point for the hyprdots installer.
#[derive(Parser, Debug)]
#[command(
    name = "hyprdots",
    about = "Install Hyprland desktop dotfiles and bootstrap their plugins",
    version
)]
pub struct Cli {
    /// Subcommand to run.
    #[command(subcommand)]
    pub command: Command,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Options shared by every subcommand.
    #[command(flatten)]
    pub global: GlobalOpts,
}

/// Options shared across all subcommands.
#[derive(Parser, Debug, Clone, Default)]
pub struct GlobalOpts {
    /// Preview changes without applying
    #[arg(short = 'd', long, global = true)]
    pub dry_run: bool,

    /// Override hyprdots repository root directory
    #[arg(long, global = true)]
    pub root: Option<PathBuf>,

    /// Config file to read instead of <root>/hyprdots.toml
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Copy, link and bootstrap the dotfiles
    Install(PathOpts),
    /// List components and the paths each one maps to
    Components(PathOpts),
    /// Print a shell completion script
    Completions {
        /// Shell to generate completions for
        shell: clap_complete::Shell,
    },
    /// Print version information
    Version,
}

impl Command {
    /// Subcommand name, used for the log file name.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Install(_) => "install",
            Self::Components(_) => "components",
            Self::Completions { .. } => "completions",
            Self::Version => "version",
        }
    }
}

/// Root overrides accepted by `install` and `components`.
#[derive(Parser, Debug, Clone, Default)]
pub struct PathOpts {
    /// Source tree of dotfiles components
    #[arg(long, value_name = "DIR")]
    pub source: Option<PathBuf>,

    /// Directory the source tree is copied into
    #[arg(long, value_name = "DIR")]
    pub stage: Option<PathBuf>,

    /// Directory that receives the links (usually ~/.config)
    #[arg(long, value_name = "DIR")]
    pub config_dir: Option<PathBuf>,
}
