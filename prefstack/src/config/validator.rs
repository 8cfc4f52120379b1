//! Configuration validation.
//!
//! This module validates configuration fields that serde cannot check on its
//! own: the ignored conflict keys and the default layer paths.

use crate::config::schema::Config;
use crate::error::{Error, Result};
use std::collections::HashSet;
use std::path::PathBuf;

/// Validates configuration values.
///
/// # Examples
///
/// ```
/// use prefstack::config::{Config, ConfigValidator};
///
/// let config = Config::default();
/// ConfigValidator::validate(&config).unwrap();
/// ```
pub struct ConfigValidator;

impl ConfigValidator {
    /// Validate a complete configuration.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Validation`] naming the first invalid field.
    pub fn validate(config: &Config) -> Result<()> {
        if let Some(ref keys) = config.ignore_conflicts {
            Self::validate_ignored_keys(keys)?;
        }

        if let Some(ref layers) = config.layers {
            Self::validate_layers(layers)?;
        }

        Ok(())
    }

    /// Validate ignored conflict keys.
    ///
    /// Each key must be a usable preference key and appear only once.
    fn validate_ignored_keys(keys: &[String]) -> Result<()> {
        let mut seen = HashSet::new();

        for key in keys {
            Self::validate_key("ignore_conflicts", key)?;
            if !seen.insert(key.as_str()) {
                return Err(Error::Validation {
                    field: "ignore_conflicts".into(),
                    message: format!("Key '{key}' is listed more than once"),
                });
            }
        }

        Ok(())
    }

    /// Validate a preference key.
    ///
    /// Checks that the key is non-empty, has no surrounding whitespace and
    /// contains no control characters.
    fn validate_key(field: &str, key: &str) -> Result<()> {
        if key.is_empty() {
            return Err(Error::Validation {
                field: field.into(),
                message: "Keys cannot be empty".into(),
            });
        }

        if key.trim() != key {
            return Err(Error::Validation {
                field: field.into(),
                message: format!("Key '{key}' has leading or trailing whitespace"),
            });
        }

        if key.chars().any(char::is_control) {
            return Err(Error::Validation {
                field: field.into(),
                message: "Keys cannot contain control characters".into(),
            });
        }

        Ok(())
    }

    /// Validate default layer paths.
    fn validate_layers(layers: &[PathBuf]) -> Result<()> {
        for layer in layers {
            if layer.as_os_str().is_empty() {
                return Err(Error::Validation {
                    field: "layers".into(),
                    message: "Layer paths cannot be empty".into(),
                });
            }

            if layer.to_string_lossy().contains('\0') {
                return Err(Error::Validation {
                    field: "layers".into(),
                    message: "Layer paths cannot contain null bytes".into(),
                });
            }
        }

        Ok(())
    }
}
