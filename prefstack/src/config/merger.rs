//! Configuration merging and precedence handling.
//!
//! This module implements hierarchical merging of configuration sources,
//! with special handling for the accumulated `ignore_conflicts` list.

use crate::config::loader::ConfigSource;
use crate::config::schema::Config;

/// Merges configuration sources according to precedence rules.
///
/// # Examples
///
/// ```
/// use prefstack::config::{Config, ConfigMerger};
///
/// let low = Config { strict: Some(false), ..Default::default() };
/// let high = Config { strict: Some(true), ..Default::default() };
///
/// let mut result = low;
/// ConfigMerger::merge_into(&mut result, &high);
/// assert_eq!(result.strict, Some(true));
/// ```
pub struct ConfigMerger;

impl ConfigMerger {
    /// Merge multiple configuration sources into final config.
    ///
    /// Sources should be provided in order from lowest to highest precedence.
    #[must_use]
    pub fn merge(sources: Vec<ConfigSource>) -> Config {
        let mut result = Config::default();

        for source in sources {
            log::debug!(
                "merging configuration {} (precedence {})",
                source.path.display(),
                source.precedence
            );
            Self::merge_into(&mut result, &source.config);
        }

        result
    }

    /// Merge source config into target (source overwrites target).
    ///
    /// # Merging Rules
    ///
    /// - Simple fields: source overwrites if Some
    /// - Ignored conflict keys: accumulated (union, first occurrence kept)
    /// - Layers: complete replacement
    pub fn merge_into(target: &mut Config, source: &Config) {
        if source.strict.is_some() {
            target.strict = source.strict;
        }

        if source.require_layers.is_some() {
            target.require_layers = source.require_layers;
        }

        if source.output_format.is_some() {
            target.output_format = source.output_format;
        }

        if source.diagnostics.is_some() {
            target.diagnostics = source.diagnostics;
        }

        if let Some(ref source_keys) = source.ignore_conflicts {
            let keys = target.ignore_conflicts.get_or_insert_with(Vec::new);
            for key in source_keys {
                if !keys.contains(key) {
                    keys.push(key.clone());
                }
            }
        }

        // A layer stack is only meaningful as a whole
        if source.layers.is_some() {
            target.layers.clone_from(&source.layers);
        }
    }
}
