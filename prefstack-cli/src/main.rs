//! Main entry point for the prefstack CLI.
//!
//! This is the command-line interface for resolving layered preference
//! files such as successive `user.js` revisions:
//! - `resolve`: Fold layers into the effective configuration
//! - `validate`: Check layer files
//! - `explain`: Trace a single key through the layers

mod cli;
mod commands;
mod error;
mod utils;

use clap::Parser;
use cli::Cli;
use prefstack::LogLevel;
use utils::GlobalOptions;

fn main() {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Initialize logging based on verbosity; library traces go through `log`
    let logger = prefstack::init_logger(cli.verbose, cli.quiet);
    logger.install();

    // PREFSTACK_LOG_MODE counts like the flags for everything written to stderr
    let global = GlobalOptions {
        verbose: logger.level() == LogLevel::Verbose,
        quiet: logger.level() == LogLevel::Quiet,
        config: cli.config,
    };

    // Execute the command
    let result = match cli.command {
        cli::Command::Resolve(cmd) => cmd.execute(&global),
        cli::Command::Validate(cmd) => cmd.execute(&global),
        cli::Command::Explain(cmd) => cmd.execute(&global),
        cli::Command::Completions(cmd) => cmd.execute(&global),
    };

    // Handle errors and set exit code
    match result {
        Ok(()) => std::process::exit(0),
        Err(e) => {
            if !e.is_reported() {
                eprintln!("Error: {e}");
            }
            std::process::exit(e.exit_code());
        }
    }
}
