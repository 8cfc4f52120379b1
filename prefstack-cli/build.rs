//! Build script for prefstack-cli.
//!
//! This script generates man pages at build time using clap_mangen.
//! The generated man page is placed in OUT_DIR for inclusion in release builds.
//!
//! Note: We build a minimal command structure here rather than importing from
//! the main crate, since build scripts cannot depend on the crate being built.

use clap::{Arg, Command};
use clap_mangen::Man;
use std::fs;
use std::path::PathBuf;

/// Build the CLI command structure for man page generation.
///
/// IMPORTANT: Keep this structure synchronized with src/cli.rs
/// When adding/removing/modifying commands, update both files.
fn build_cli() -> Command {
    Command::new("prefstack")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Resolve layered browser preference overrides")
        .long_about(
            "Command-line tool that folds ordered user.js revisions into one effective \
             preference set, reporting provenance, conflicts and duplicates",
        )
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .help("Enable verbose output")
                .global(true)
                .action(clap::ArgAction::SetTrue),
        )
        .arg(
            Arg::new("quiet")
                .long("quiet")
                .help("Suppress non-essential output")
                .global(true)
                .action(clap::ArgAction::SetTrue),
        )
        .arg(
            Arg::new("config")
                .long("config")
                .help("Use this configuration file instead of discovering one")
                .value_name("PATH")
                .global(true)
                .env("PREFSTACK_CONFIG"),
        )
        .subcommands(vec![
            Command::new("resolve")
                .about("Resolve layer files into the effective configuration")
                .long_about(
                    "Fold layer files, lowest precedence first, into the effective \
                     configuration. Exits with 2 in strict mode when layers disagree",
                ),
            Command::new("validate")
                .about("Load and validate layer files")
                .long_about("Check that every layer file parses and holds only valid entries"),
            Command::new("explain")
                .about("Explain where a key's effective value came from")
                .long_about("Show the winning layer, annotation and override history of one key"),
            Command::new("completions")
                .about("Generate shell completion scripts")
                .long_about("Generate shell completion scripts for bash, zsh, fish, or PowerShell"),
        ])
}

fn main() {
    // Generate man pages at build time
    let out_dir = PathBuf::from(std::env::var("OUT_DIR").unwrap());
    let man_dir = out_dir.join("man");
    fs::create_dir_all(&man_dir).unwrap();

    // Generate main prefstack.1 man page
    let app = build_cli();
    let man = Man::new(app);
    let mut buffer = Vec::new();
    man.render(&mut buffer).unwrap();

    fs::write(man_dir.join("prefstack.1"), buffer).unwrap();

    println!("cargo:rerun-if-changed=src/cli.rs");
    println!("cargo:rerun-if-changed=src/commands/");
}
