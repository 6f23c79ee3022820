//! CLI argument definitions.
//!
//! This module defines all CLI arguments using clap's derive macros.
//! The main entry point is the [`Cli`] struct.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Startgate - Startup orchestration for the print host.
#[derive(Debug, Parser)]
#[command(name = "startgate")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to config file (overrides default .startgate/config.yml)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Path to project root (overrides current directory)
    #[arg(short, long, global = true)]
    pub project: Option<PathBuf>,

    /// Show verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Minimal output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Resume on launch: start services and route (default if no command specified)
    Launch(PassArgs),

    /// Explicitly request the install flow
    Install(PassArgs),

    /// Show installation, permission, network and service status
    Status(StatusArgs),

    /// Show or change user preferences
    Prefs(PrefsArgs),
}

/// Arguments shared by the `launch` and `install` commands.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct PassArgs {
    /// Never prompt; answer from STARTGATE_PROMPT_* or decline
    #[arg(long)]
    pub non_interactive: bool,

    /// Route without running the configured flow command
    #[arg(long)]
    pub no_handoff: bool,
}

/// Arguments for the `status` command.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct StatusArgs {
    /// Print the status as JSON
    #[arg(long)]
    pub json: bool,

    /// Skip the network reachability check
    #[arg(long)]
    pub offline: bool,
}

/// Arguments for the `prefs` command.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct PrefsArgs {
    /// Enable or disable the camera server
    #[arg(long, value_name = "BOOL")]
    pub camera_server: Option<bool>,

    /// Forget saved preferences and use the config defaults
    #[arg(long, conflicts_with = "camera_server")]
    pub reset: bool,
}
