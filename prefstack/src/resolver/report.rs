//! Resolution results: effective values, provenance and diagnostics.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::preference::PrefValue;

/// Where a key's effective value came from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Provenance {
    /// Name of the layer that set the winning value.
    pub layer: String,
    /// Position of that layer in the input sequence (0-based).
    pub layer_index: usize,
    /// Annotation attached to the winning entry.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub annotation: Option<String>,
    /// Source line of the winning entry.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line: Option<usize>,
}

/// Two layers assigned different values to the same key.
///
/// The later layer (`layer`) wins; `previous_layer` is the loser.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Conflict {
    /// The contested key.
    pub key: String,
    /// Layer whose value was overridden.
    pub previous_layer: String,
    /// The overridden value.
    pub previous_value: PrefValue,
    /// Layer whose value won.
    pub layer: String,
    /// The winning value.
    pub value: PrefValue,
    /// True when the two values are of different kinds.
    pub kind_changed: bool,
}

/// A key was re-asserted with the value it already had.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Duplicate {
    /// The re-asserted key.
    pub key: String,
    /// Layer that held the value before the re-assertion.
    pub first_layer: String,
    /// Layer that re-asserted it (equal to `first_layer` for repeats
    /// within one layer).
    pub layer: String,
    /// The shared value.
    pub value: PrefValue,
}

/// A layer declared a key twice with different values.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Shadowed {
    /// The redefined key.
    pub key: String,
    /// The layer containing both declarations.
    pub layer: String,
    /// The earlier, discarded value.
    pub shadowed_value: PrefValue,
    /// The later value that the layer contributes.
    pub value: PrefValue,
}

/// Every diagnostic record touching a single key.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KeyHistory<'a> {
    /// Conflicts on the key, in processing order.
    pub conflicts: Vec<&'a Conflict>,
    /// Identical re-assertions of the key.
    pub duplicates: Vec<&'a Duplicate>,
    /// Intra-layer redefinitions of the key.
    pub shadowed: Vec<&'a Shadowed>,
}

impl KeyHistory<'_> {
    /// Returns true if the key was only ever set once.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.conflicts.is_empty() && self.duplicates.is_empty() && self.shadowed.is_empty()
    }
}

/// The outcome of folding a sequence of layers.
///
/// `effective` and `provenance` are keyed maps with exactly one entry per
/// distinct key; the diagnostic lists keep processing order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ResolvedConfiguration {
    pub(crate) effective: BTreeMap<String, PrefValue>,
    pub(crate) provenance: BTreeMap<String, Provenance>,
    pub(crate) conflicts: Vec<Conflict>,
    pub(crate) duplicates: Vec<Duplicate>,
    pub(crate) shadowed: Vec<Shadowed>,
}

impl ResolvedConfiguration {
    /// The effective key to value mapping.
    #[must_use]
    pub fn effective(&self) -> &BTreeMap<String, PrefValue> {
        &self.effective
    }

    /// Provenance for every effective key.
    #[must_use]
    pub fn provenance(&self) -> &BTreeMap<String, Provenance> {
        &self.provenance
    }

    /// Cross-layer disagreements, in processing order.
    #[must_use]
    pub fn conflicts(&self) -> &[Conflict] {
        &self.conflicts
    }

    /// Identical re-assertions, in processing order.
    #[must_use]
    pub fn duplicates(&self) -> &[Duplicate] {
        &self.duplicates
    }

    /// Intra-layer redefinitions with a different value.
    #[must_use]
    pub fn shadowed(&self) -> &[Shadowed] {
        &self.shadowed
    }

    /// The effective value of `key`.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&PrefValue> {
        self.effective.get(key)
    }

    /// Where the effective value of `key` came from.
    #[must_use]
    pub fn provenance_of(&self, key: &str) -> Option<&Provenance> {
        self.provenance.get(key)
    }

    /// Number of distinct keys.
    #[must_use]
    pub fn len(&self) -> usize {
        self.effective.len()
    }

    /// Returns true if no key was set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.effective.is_empty()
    }

    /// Returns true if any diagnostic was recorded.
    #[must_use]
    pub fn has_diagnostics(&self) -> bool {
        !(self.conflicts.is_empty() && self.duplicates.is_empty() && self.shadowed.is_empty())
    }

    /// Conflicts whose key is not in `ignored`.
    ///
    /// These are the conflicts that fail a strict resolution.
    #[must_use]
    pub fn blocking_conflicts(&self, ignored: &[String]) -> Vec<&Conflict> {
        self.conflicts
            .iter()
            .filter(|c| !ignored.iter().any(|k| k == &c.key))
            .collect()
    }

    /// Collects every diagnostic touching `key`.
    ///
    /// # Examples
    ///
    /// ```
    /// use prefstack::{Layer, LayerResolver};
    ///
    /// let layers = vec![
    ///     Layer::new("L1").with_entry("x", 1),
    ///     Layer::new("L2").with_entry("x", 2),
    /// ];
    /// let resolved = LayerResolver::default().resolve(&layers).unwrap();
    /// let history = resolved.history("x");
    /// assert_eq!(history.conflicts.len(), 1);
    /// assert!(resolved.history("y").is_empty());
    /// ```
    #[must_use]
    pub fn history(&self, key: &str) -> KeyHistory<'_> {
        KeyHistory {
            conflicts: self.conflicts.iter().filter(|c| c.key == key).collect(),
            duplicates: self.duplicates.iter().filter(|d| d.key == key).collect(),
            shadowed: self.shadowed.iter().filter(|s| s.key == key).collect(),
        }
    }
}
