//! Configuration schema definitions.
//!
//! Every field is optional so that sources can be layered: a value missing
//! from a higher-precedence source leaves the lower one in place.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::output::ReportFormat;
use crate::resolver::ResolveOptions;

/// Complete configuration structure.
///
/// # Examples
///
/// ```
/// use prefstack::config::Config;
///
/// let config: Config = serde_yaml::from_str(
///     "strict: true\nignore_conflicts:\n  - _user.js.parrot\n",
/// ).unwrap();
///
/// let options = config.resolve_options();
/// assert!(options.strict);
/// assert_eq!(options.ignored_conflict_keys, vec!["_user.js.parrot".to_string()]);
/// ```
#[derive(Debug, Clone, Deserialize, Serialize, Default, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Fail when conflicting overrides are found.
    pub strict: Option<bool>,

    /// Fail when no layers are supplied.
    pub require_layers: Option<bool>,

    /// Report format for `resolve`.
    pub output_format: Option<ReportFormat>,

    /// Keys whose conflicts never fail a strict resolution.
    #[serde(default)]
    pub ignore_conflicts: Option<Vec<String>>,

    /// Print conflict, duplicate and shadowing tables to stderr.
    pub diagnostics: Option<bool>,

    /// Default layer files, in resolution order.
    ///
    /// Relative paths in a configuration file are taken relative to the
    /// directory containing that file.
    pub layers: Option<Vec<PathBuf>>,
}

impl Config {
    /// Resolver options described by this configuration.
    #[must_use]
    pub fn resolve_options(&self) -> ResolveOptions {
        ResolveOptions::new()
            .with_strict(self.strict.unwrap_or(false))
            .with_require_layers(self.require_layers.unwrap_or(false))
            .with_ignored_conflict_keys(self.ignore_conflicts.clone().unwrap_or_default())
    }

    /// The configured report format, defaulting to text.
    #[must_use]
    pub fn output_format(&self) -> ReportFormat {
        self.output_format.unwrap_or_default()
    }

    /// Whether diagnostics should be printed (on unless disabled).
    #[must_use]
    pub fn diagnostics_enabled(&self) -> bool {
        self.diagnostics.unwrap_or(true)
    }

    /// The configured default layers.
    #[must_use]
    pub fn layers(&self) -> &[PathBuf] {
        self.layers.as_deref().unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.resolve_options(), ResolveOptions::default());
        assert_eq!(config.output_format(), ReportFormat::Text);
        assert!(config.diagnostics_enabled());
        assert!(config.layers().is_empty());
    }

    #[test]
    fn test_full_yaml() {
        let yaml = r"
strict: true
require_layers: true
output_format: userjs
ignore_conflicts:
  - _user.js.parrot
  - browser.startup.homepage
diagnostics: false
layers:
  - revisions/01-user.js
  - revisions/02-user.js
";
        let config: Config = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.strict, Some(true));
        assert_eq!(config.output_format(), ReportFormat::UserJs);
        assert!(!config.diagnostics_enabled());
        assert_eq!(config.layers().len(), 2);

        let options = config.resolve_options();
        assert!(options.strict);
        assert!(options.require_layers);
        assert_eq!(options.ignored_conflict_keys.len(), 2);
    }

    #[test]
    fn test_unknown_field_rejected() {
        let result: Result<Config, _> = serde_yaml::from_str("strictness: true\n");
        assert!(result.is_err());
    }

    #[test]
    fn test_unknown_format_rejected() {
        let result: Result<Config, _> = serde_yaml::from_str("output_format: xml\n");
        assert!(result.is_err());
    }

    #[test]
    fn test_serialization_round_trip() {
        let config = Config {
            strict: Some(true),
            output_format: Some(ReportFormat::Json),
            ..Default::default()
        };
        let yaml = serde_yaml::to_string(&config).unwrap();
        let parsed: Config = serde_yaml::from_str(&yaml).unwrap();
        assert_eq!(parsed, config);
    }
}
