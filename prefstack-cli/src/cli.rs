//! CLI structure and command definitions.
//!
//! This module defines the main CLI structure using clap's derive macros,
//! including global options and subcommands.

use crate::commands::{CompletionsCommand, ExplainCommand, ResolveCommand, ValidateCommand};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Command-line tool for resolving layered browser preference overrides.
#[derive(Parser)]
#[command(name = "prefstack")]
#[command(version, about = "Resolve layered browser preference overrides", long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(long, global = true)]
    pub verbose: bool,

    /// Suppress non-essential output
    #[arg(long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Use this configuration file instead of discovering one
    #[arg(long, value_name = "PATH", global = true, env = "PREFSTACK_CONFIG")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

/// Available CLI commands.
#[derive(Subcommand)]
pub enum Command {
    /// Resolve layer files into the effective configuration
    Resolve(ResolveCommand),

    /// Load and validate layer files
    Validate(ValidateCommand),

    /// Explain where a key's effective value came from
    Explain(ExplainCommand),

    /// Generate shell completion scripts
    Completions(CompletionsCommand),
}
