//! Hyprland dotfiles installer.
//!
//! Copies a tree of per-application configuration directories into a
//! staging location, replaces the live entries under `~/.config` with links
//! to the staged copies, and bootstraps the tmux plugin manager and the
//! LazyVim starter.  Every step is fail-fast and supports a dry run.
//!
//! The public API is organised into layers:
//!
//! - **[`config`]**: component registry, root paths, optional TOML overrides
//! - **[`resources`]**: idempotent filesystem primitives (copy, remove, link)
//! - **[`fetch`]**: cloning third-party repositories
//! - **[`tasks`]**: the install steps and the orchestrator that sequences them
//! - **[`reporting`]**: progress sink the orchestrator reports through
//! - **[`commands`]**: top-level subcommand handlers
#![deny(clippy::or_fun_call)]
#![deny(clippy::bool_to_int_with_if)]

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod exec;
pub mod fetch;
pub mod logging;
pub mod reporting;
pub mod resources;
pub mod tasks;
