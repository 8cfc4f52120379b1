//! Utility functions for CLI operations.
//!
//! This module provides common utility functions used across CLI commands:
//! configuration loading and layer loading.

use crate::error::CliError;
use prefstack::config::Config;
use prefstack::{ConfigBuilder, Layer, LayerLoader};
use std::path::PathBuf;

/// Global CLI options shared across all commands.
#[derive(Debug, Clone)]
pub struct GlobalOptions {
    /// Enable verbose output.
    pub verbose: bool,

    /// Suppress non-essential output.
    pub quiet: bool,

    /// Use this configuration file instead of discovering one.
    pub config: Option<PathBuf>,
}

/// Load hierarchical configuration.
///
/// Configuration is merged from multiple sources with precedence:
/// 1. Command-line flags (`overrides`, highest priority)
/// 2. Environment variables
/// 3. Configuration files (or the `--config` file alone)
/// 4. Built-in defaults (lowest priority)
pub fn load_configuration(global: &GlobalOptions, overrides: Config) -> Result<Config, CliError> {
    let mut builder = ConfigBuilder::new().with_config(overrides);

    if let Some(ref path) = global.config {
        if !path.exists() {
            return Err(CliError::Config(format!(
                "configuration file not found: {}",
                path.display()
            )));
        }
        builder = builder.with_config_file(path);
    }

    builder
        .build()
        .map_err(|e| CliError::Config(e.to_string()))
}

/// Choose the layer files for a command.
///
/// Paths given on the command line replace the configured default layers.
pub fn layer_paths(explicit: &[PathBuf], config: &Config) -> Vec<PathBuf> {
    if explicit.is_empty() {
        config.layers().to_vec()
    } else {
        explicit.to_vec()
    }
}

/// Load every layer in order.
pub fn load_layers(paths: &[PathBuf]) -> Result<Vec<Layer>, CliError> {
    LayerLoader::load_all(paths).map_err(CliError::from)
}

/// Flag value that only overrides configuration when it is set.
pub fn flag(set: bool) -> Option<bool> {
    set.then_some(true)
}
