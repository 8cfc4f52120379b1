//! Layer resolution.
//!
//! The resolver folds an ordered sequence of [`Layer`]s into one
//! [`ResolvedConfiguration`]. Later layers override earlier ones; every
//! override is classified:
//!
//! - a different value from a different layer is a [`Conflict`]
//! - the identical value again is a [`Duplicate`]
//! - a different value from the same layer is [`Shadowed`] (the later
//!   declaration in the layer wins before the layer is applied)
//!
//! # Examples
//!
//! ```
//! use prefstack::{Layer, LayerResolver, PrefValue};
//!
//! let l1 = Layer::new("L1").with_entry("a", 1).with_entry("b", 2);
//! let l2 = Layer::new("L2").with_entry("b", 3).with_entry("c", 4);
//!
//! let resolved = LayerResolver::default().resolve(&[l1, l2]).unwrap();
//! assert_eq!(resolved.get("b"), Some(&PrefValue::Int(3)));
//! assert_eq!(resolved.conflicts().len(), 1);
//! assert!(resolved.duplicates().is_empty());
//! ```

mod report;

#[cfg(all(test, feature = "property-tests"))]
mod proptests;

use std::collections::HashMap;

use crate::error::{Error, Result};
use crate::preference::{Layer, PreferenceEntry};

pub use report::{Conflict, Duplicate, KeyHistory, Provenance, ResolvedConfiguration, Shadowed};

/// Options controlling resolution policy.
///
/// # Examples
///
/// ```
/// use prefstack::ResolveOptions;
///
/// let options = ResolveOptions::new()
///     .with_strict(true)
///     .with_ignored_conflict_keys(vec!["_user.js.parrot".to_string()]);
/// assert!(options.strict);
/// assert!(!options.require_layers);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResolveOptions {
    /// Fail with [`Error::EmptyInput`] when no layers are supplied.
    pub require_layers: bool,

    /// Fail with [`Error::ConflictDetected`] when any blocking conflict exists.
    pub strict: bool,

    /// Keys whose conflicts are reported but never fail a strict resolution.
    pub ignored_conflict_keys: Vec<String>,
}

impl ResolveOptions {
    /// Creates options with every policy disabled.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets whether at least one layer is required.
    #[must_use]
    pub const fn with_require_layers(mut self, require_layers: bool) -> Self {
        self.require_layers = require_layers;
        self
    }

    /// Sets strict mode.
    #[must_use]
    pub const fn with_strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    /// Sets the keys exempt from strict-mode failure.
    #[must_use]
    pub fn with_ignored_conflict_keys(mut self, keys: Vec<String>) -> Self {
        self.ignored_conflict_keys = keys;
        self
    }
}

/// Folds preference layers into an effective configuration.
///
/// The resolver holds only its options; every call is independent and the
/// input layers are never modified.
#[derive(Debug, Clone, Default)]
pub struct LayerResolver {
    options: ResolveOptions,
}

impl LayerResolver {
    /// Creates a resolver with the given options.
    #[must_use]
    pub const fn new(options: ResolveOptions) -> Self {
        Self { options }
    }

    /// The options in effect.
    #[must_use]
    pub const fn options(&self) -> &ResolveOptions {
        &self.options
    }

    /// Resolves `layers` and applies the strict-mode policy.
    ///
    /// Equivalent to [`fold`](Self::fold) followed by
    /// [`enforce`](Self::enforce).
    ///
    /// # Errors
    ///
    /// - [`Error::EmptyInput`] if no layers were given and they are required
    /// - [`Error::MalformedEntry`] if any entry is invalid
    /// - [`Error::ConflictDetected`] in strict mode when blocking conflicts exist
    pub fn resolve(&self, layers: &[Layer]) -> Result<ResolvedConfiguration> {
        let resolved = self.fold(layers)?;
        self.enforce(&resolved)?;
        Ok(resolved)
    }

    /// Resolves `layers` without applying the strict-mode policy.
    ///
    /// Conflicts are always reported in full, which lets a caller print them
    /// before deciding whether they are fatal.
    ///
    /// # Errors
    ///
    /// - [`Error::EmptyInput`] if no layers were given and they are required
    /// - [`Error::MalformedEntry`] if any entry is invalid; nothing is
    ///   resolved in that case
    pub fn fold(&self, layers: &[Layer]) -> Result<ResolvedConfiguration> {
        if layers.is_empty() && self.options.require_layers {
            return Err(Error::EmptyInput);
        }

        for layer in layers {
            layer.validate().map_err(|mut err| {
                err.layer = layer.name().to_string();
                Error::from(err)
            })?;
        }

        let mut resolved = ResolvedConfiguration::default();

        for (layer_index, layer) in layers.iter().enumerate() {
            let folded = fold_layer(layer, &mut resolved);
            log::debug!(
                "applying layer '{}' ({} declarations, {} effective)",
                layer.name(),
                layer.len(),
                folded.len()
            );

            for entry in folded {
                apply_entry(&mut resolved, layer, layer_index, entry);
            }
        }

        Ok(resolved)
    }

    /// Applies the strict-mode policy to an existing resolution.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ConflictDetected`] if strict mode is on and at least
    /// one conflict is not on an ignored key.
    pub fn enforce(&self, resolved: &ResolvedConfiguration) -> Result<()> {
        if !self.options.strict {
            return Ok(());
        }

        let count = resolved
            .blocking_conflicts(&self.options.ignored_conflict_keys)
            .len();
        if count > 0 {
            return Err(Error::ConflictDetected { count });
        }

        Ok(())
    }
}

/// Applies last-write-wins within one layer.
///
/// The winning declaration takes the position of the key's first
/// declaration. Repeats are recorded as duplicates or shadowing.
fn fold_layer<'a>(
    layer: &'a Layer,
    resolved: &mut ResolvedConfiguration,
) -> Vec<&'a PreferenceEntry> {
    let mut folded: Vec<&PreferenceEntry> = Vec::with_capacity(layer.len());
    let mut positions: HashMap<&str, usize> = HashMap::new();

    for entry in layer.entries() {
        if let Some(&pos) = positions.get(entry.key.as_str()) {
            let earlier = folded[pos];
            if earlier.value == entry.value {
                resolved.duplicates.push(Duplicate {
                    key: entry.key.clone(),
                    first_layer: layer.name().to_string(),
                    layer: layer.name().to_string(),
                    value: entry.value.clone(),
                });
            } else {
                resolved.shadowed.push(Shadowed {
                    key: entry.key.clone(),
                    layer: layer.name().to_string(),
                    shadowed_value: earlier.value.clone(),
                    value: entry.value.clone(),
                });
            }
            folded[pos] = entry;
        } else {
            positions.insert(entry.key.as_str(), folded.len());
            folded.push(entry);
        }
    }

    folded
}

/// Applies one locally-folded entry on top of the accumulated state.
fn apply_entry(
    resolved: &mut ResolvedConfiguration,
    layer: &Layer,
    layer_index: usize,
    entry: &PreferenceEntry,
) {
    if let Some(current) = resolved.effective.get(&entry.key) {
        let previous_layer = resolved
            .provenance
            .get(&entry.key)
            .map(|p| p.layer.clone())
            .unwrap_or_default();

        if *current == entry.value {
            resolved.duplicates.push(Duplicate {
                key: entry.key.clone(),
                first_layer: previous_layer,
                layer: layer.name().to_string(),
                value: entry.value.clone(),
            });
        } else {
            let kind_changed = current.kind() != entry.value.kind();
            log::debug!(
                "conflict on '{}': {} ({previous_layer}) overridden by {} ({})",
                entry.key,
                current,
                entry.value,
                layer.name()
            );
            resolved.conflicts.push(Conflict {
                key: entry.key.clone(),
                previous_layer,
                previous_value: current.clone(),
                layer: layer.name().to_string(),
                value: entry.value.clone(),
                kind_changed,
            });
        }
    }

    resolved
        .effective
        .insert(entry.key.clone(), entry.value.clone());
    resolved.provenance.insert(
        entry.key.clone(),
        Provenance {
            layer: layer.name().to_string(),
            layer_index,
            annotation: entry.annotation.clone(),
            line: entry.line,
        },
    );
}
