//! Environment variable handling for configuration overrides.
//!
//! This module provides support for `PREFSTACK_*` environment variables that
//! override configuration file values.

use crate::config::merger::ConfigMerger;
use crate::config::schema::Config;
use crate::error::{Error, Result};
use crate::output::ReportFormat;
use std::env;

/// Enables strict mode.
pub const STRICT_ENV: &str = "PREFSTACK_STRICT";
/// Requires at least one layer.
pub const REQUIRE_LAYERS_ENV: &str = "PREFSTACK_REQUIRE_LAYERS";
/// Selects the report format.
pub const OUTPUT_FORMAT_ENV: &str = "PREFSTACK_OUTPUT_FORMAT";
/// Comma-separated keys whose conflicts are ignored by strict mode.
pub const IGNORE_CONFLICTS_ENV: &str = "PREFSTACK_IGNORE_CONFLICTS";
/// Toggles the diagnostic tables.
pub const DIAGNOSTICS_ENV: &str = "PREFSTACK_DIAGNOSTICS";

/// Handles environment variable overrides for configuration.
///
/// # Examples
///
/// ```no_run
/// use prefstack::config::{Config, EnvironmentConfig};
///
/// let mut config = Config::default();
/// EnvironmentConfig::apply_overrides(&mut config).unwrap();
/// ```
pub struct EnvironmentConfig;

impl EnvironmentConfig {
    /// Apply environment variable overrides to config.
    ///
    /// Ignored conflict keys accumulate with those already configured; every
    /// other variable replaces the configured value.
    ///
    /// # Errors
    ///
    /// Returns an error if any environment variable value is invalid
    /// (e.g., an invalid boolean or an unknown format).
    pub fn apply_overrides(config: &mut Config) -> Result<()> {
        if let Ok(val) = env::var(STRICT_ENV) {
            config.strict = Some(Self::parse_bool(STRICT_ENV, &val)?);
        }

        if let Ok(val) = env::var(REQUIRE_LAYERS_ENV) {
            config.require_layers = Some(Self::parse_bool(REQUIRE_LAYERS_ENV, &val)?);
        }

        if let Ok(val) = env::var(OUTPUT_FORMAT_ENV) {
            let format: ReportFormat = val.parse().map_err(|_| Error::Validation {
                field: OUTPUT_FORMAT_ENV.into(),
                message: format!("Invalid format: '{val}' (expected text/json/csv/userjs)"),
            })?;
            config.output_format = Some(format);
        }

        if let Ok(val) = env::var(IGNORE_CONFLICTS_ENV) {
            let keys = Config {
                ignore_conflicts: Some(Self::parse_key_list(&val)),
                ..Default::default()
            };
            ConfigMerger::merge_into(config, &keys);
        }

        if let Ok(val) = env::var(DIAGNOSTICS_ENV) {
            config.diagnostics = Some(Self::parse_bool(DIAGNOSTICS_ENV, &val)?);
        }

        Ok(())
    }

    /// Parse boolean from string (case-insensitive).
    ///
    /// Accepts: true/false, 1/0, yes/no, on/off
    fn parse_bool(field: &str, s: &str) -> Result<bool> {
        match s.to_lowercase().as_str() {
            "true" | "1" | "yes" | "on" => Ok(true),
            "false" | "0" | "no" | "off" => Ok(false),
            _ => Err(Error::Validation {
                field: field.into(),
                message: format!(
                    "Invalid boolean value: '{s}' (expected true/false/1/0/yes/no/on/off)"
                ),
            }),
        }
    }

    /// Parse a comma-separated key list, dropping blank items.
    fn parse_key_list(s: &str) -> Vec<String> {
        s.split(',')
            .map(str::trim)
            .filter(|key| !key.is_empty())
            .map(String::from)
            .collect()
    }
}
