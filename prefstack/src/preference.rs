//! Preference types: values, entries and layers.
//!
//! A [`Layer`] is one ordered batch of preference declarations, usually one
//! `user.js` revision. Each [`PreferenceEntry`] carries its typed
//! [`PrefValue`] plus an optional annotation (the ordinal code or comment that
//! documented the override), which is kept for reporting only.

use std::fmt;

use serde::{Deserialize, Serialize};

/// The kind of a preference value.
///
/// # Examples
///
/// ```
/// use prefstack::{PrefKind, PrefValue};
///
/// assert_eq!(PrefValue::Bool(true).kind(), PrefKind::Boolean);
/// assert_eq!(PrefKind::Integer.to_string(), "integer");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PrefKind {
    /// `true` or `false`.
    Boolean,
    /// A signed integer.
    Integer,
    /// A text value.
    String,
}

impl fmt::Display for PrefKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Boolean => write!(f, "boolean"),
            Self::Integer => write!(f, "integer"),
            Self::String => write!(f, "string"),
        }
    }
}

/// A typed preference value.
///
/// Values of different kinds never compare equal: `Int(1)` and `Bool(true)`
/// are distinct, so a kind change between layers is always a disagreement.
///
/// # Examples
///
/// ```
/// use prefstack::PrefValue;
///
/// assert_eq!(PrefValue::from(200).to_string(), "200");
/// assert_eq!(PrefValue::from("IT").to_string(), "\"IT\"");
/// assert_ne!(PrefValue::Int(1), PrefValue::Bool(true));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PrefValue {
    /// A boolean preference.
    Bool(bool),
    /// An integer preference.
    Int(i64),
    /// A string preference.
    String(String),
}

impl PrefValue {
    /// Returns the kind of this value.
    #[must_use]
    pub const fn kind(&self) -> PrefKind {
        match self {
            Self::Bool(_) => PrefKind::Boolean,
            Self::Int(_) => PrefKind::Integer,
            Self::String(_) => PrefKind::String,
        }
    }

    /// Returns the value without quoting, as it would appear in a table cell.
    ///
    /// # Examples
    ///
    /// ```
    /// use prefstack::PrefValue;
    ///
    /// assert_eq!(PrefValue::from("it-IT, it").to_plain_string(), "it-IT, it");
    /// ```
    #[must_use]
    pub fn to_plain_string(&self) -> String {
        match self {
            Self::Bool(b) => b.to_string(),
            Self::Int(i) => i.to_string(),
            Self::String(s) => s.clone(),
        }
    }

    /// Converts a loosely-typed document value into a preference value.
    ///
    /// Only booleans, integers that fit in `i64` and strings are accepted.
    ///
    /// # Errors
    ///
    /// Returns a description of the unsupported value kind.
    ///
    /// # Examples
    ///
    /// ```
    /// use prefstack::PrefValue;
    ///
    /// let value = PrefValue::from_document(&serde_json::json!(10)).unwrap();
    /// assert_eq!(value, PrefValue::Int(10));
    /// assert!(PrefValue::from_document(&serde_json::json!(1.5)).is_err());
    /// ```
    pub fn from_document(value: &serde_json::Value) -> Result<Self, String> {
        match value {
            serde_json::Value::Bool(b) => Ok(Self::Bool(*b)),
            serde_json::Value::Number(n) => n
                .as_i64()
                .map(Self::Int)
                .ok_or_else(|| {
                    format!("unsupported numeric value {n} (only integers are allowed)")
                }),
            serde_json::Value::String(s) => Ok(Self::String(s.clone())),
            serde_json::Value::Null => Err("null is not a supported value".into()),
            serde_json::Value::Array(_) => Err("arrays are not supported values".into()),
            serde_json::Value::Object(_) => Err("objects are not supported values".into()),
        }
    }
}

impl fmt::Display for PrefValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool(b) => write!(f, "{b}"),
            Self::Int(i) => write!(f, "{i}"),
            Self::String(s) => write!(f, "{}", quote(s)),
        }
    }
}

impl From<bool> for PrefValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<i64> for PrefValue {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<i32> for PrefValue {
    fn from(value: i32) -> Self {
        Self::Int(i64::from(value))
    }
}

impl From<&str> for PrefValue {
    fn from(value: &str) -> Self {
        Self::String(value.to_string())
    }
}

impl From<String> for PrefValue {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

/// Double-quotes a string, escaping it so the preference loader reads it back
/// unchanged.
pub(crate) fn quote(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('"');
    for c in s.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if c.is_control() => out.push_str(&format!("\\u{:04x}", u32::from(c))),
            c => out.push(c),
        }
    }
    out.push('"');
    out
}

/// Validation failure for a single entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// The layer containing the entry.
    pub layer: String,
    /// The offending key.
    pub key: String,
    /// The reason validation failed.
    pub reason: String,
}

/// One preference declaration.
///
/// # Examples
///
/// ```
/// use prefstack::{PreferenceEntry, PrefValue};
///
/// let entry = PreferenceEntry::new("revision-1", "browser.startup.page", 1)
///     .with_annotation("0102");
/// assert_eq!(entry.value, PrefValue::Int(1));
/// assert_eq!(entry.annotation.as_deref(), Some("0102"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PreferenceEntry {
    /// Dotted preference name, e.g. `browser.startup.page`.
    pub key: String,
    /// The typed value.
    pub value: PrefValue,
    /// Free-text documentation of the override; never used for resolution.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub annotation: Option<String>,
    /// Name of the layer this entry belongs to.
    pub source_layer: String,
    /// 1-based line in the source file, when loaded from one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line: Option<usize>,
}

impl PreferenceEntry {
    /// Creates an entry without annotation or line information.
    pub fn new(
        source_layer: impl Into<String>,
        key: impl Into<String>,
        value: impl Into<PrefValue>,
    ) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
            annotation: None,
            source_layer: source_layer.into(),
            line: None,
        }
    }

    /// Attaches an annotation. Blank annotations are dropped.
    #[must_use]
    pub fn with_annotation(mut self, annotation: impl Into<String>) -> Self {
        let annotation = annotation.into();
        let trimmed = annotation.trim();
        self.annotation = if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        };
        self
    }

    /// Records the source line.
    #[must_use]
    pub const fn with_line(mut self, line: usize) -> Self {
        self.line = Some(line);
        self
    }

    /// Validates the entry key.
    ///
    /// Keys must be non-empty, must not carry surrounding whitespace and must
    /// not contain control characters.
    ///
    /// # Errors
    ///
    /// Returns a [`ValidationError`] describing the problem.
    ///
    /// # Examples
    ///
    /// ```
    /// use prefstack::PreferenceEntry;
    ///
    /// assert!(PreferenceEntry::new("l", "a.b", true).validate().is_ok());
    /// assert!(PreferenceEntry::new("l", "", true).validate().is_err());
    /// assert!(PreferenceEntry::new("l", " a.b", true).validate().is_err());
    /// ```
    pub fn validate(&self) -> Result<(), ValidationError> {
        let fail = |reason: &str| ValidationError {
            layer: self.source_layer.clone(),
            key: self.key.clone(),
            reason: reason.to_string(),
        };

        if self.key.is_empty() {
            return Err(fail("key must not be empty"));
        }
        if self.key.trim() != self.key {
            return Err(fail("key must not start or end with whitespace"));
        }
        if self.key.chars().any(char::is_control) {
            return Err(fail("key must not contain control characters"));
        }

        Ok(())
    }
}

/// An ordered batch of preference declarations.
///
/// Entry order is significant: a later entry for the same key shadows an
/// earlier one.
///
/// # Examples
///
/// ```
/// use prefstack::Layer;
///
/// let layer = Layer::new("revision-1")
///     .with_entry("browser.startup.page", 1)
///     .with_entry("keyword.enabled", true);
/// assert_eq!(layer.len(), 2);
/// assert_eq!(layer.entries()[1].source_layer, "revision-1");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Layer {
    name: String,
    entries: Vec<PreferenceEntry>,
}

impl Layer {
    /// Creates an empty layer.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            entries: Vec::new(),
        }
    }

    /// Creates a layer from `(key, value)` pairs.
    pub fn from_pairs<K, V>(
        name: impl Into<String>,
        pairs: impl IntoIterator<Item = (K, V)>,
    ) -> Self
    where
        K: Into<String>,
        V: Into<PrefValue>,
    {
        let mut layer = Self::new(name);
        for (key, value) in pairs {
            layer.push(key, value);
        }
        layer
    }

    /// Appends a `(key, value)` entry, returning the layer.
    #[must_use]
    pub fn with_entry(mut self, key: impl Into<String>, value: impl Into<PrefValue>) -> Self {
        self.push(key, value);
        self
    }

    /// Appends a `(key, value)` entry.
    pub fn push(&mut self, key: impl Into<String>, value: impl Into<PrefValue>) {
        let entry = PreferenceEntry::new(self.name.clone(), key, value);
        self.entries.push(entry);
    }

    /// Appends a fully built entry, re-homing it into this layer.
    pub fn push_entry(&mut self, mut entry: PreferenceEntry) {
        entry.source_layer.clone_from(&self.name);
        self.entries.push(entry);
    }

    /// The layer name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The entries in declaration order.
    #[must_use]
    pub fn entries(&self) -> &[PreferenceEntry] {
        &self.entries
    }

    /// Number of declarations, including shadowed ones.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if the layer declares nothing.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Validates every entry, stopping at the first malformed one.
    ///
    /// # Errors
    ///
    /// Returns the first [`ValidationError`] found.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.entries.iter().try_for_each(PreferenceEntry::validate)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_value_kinds() {
        assert_eq!(PrefValue::from(true).kind(), PrefKind::Boolean);
        assert_eq!(PrefValue::from(10).kind(), PrefKind::Integer);
        assert_eq!(PrefValue::from("x").kind(), PrefKind::String);
    }

    #[test]
    fn test_value_kinds_never_compare_equal() {
        assert_ne!(PrefValue::Int(1), PrefValue::Bool(true));
        assert_ne!(PrefValue::Int(0), PrefValue::Bool(false));
        assert_ne!(PrefValue::from("1"), PrefValue::Int(1));
    }

    #[test]
    fn test_value_display_quotes_strings() {
        assert_eq!(PrefValue::from(false).to_string(), "false");
        assert_eq!(PrefValue::from(-3).to_string(), "-3");
        assert_eq!(
            PrefValue::from("data:text/plain,").to_string(),
            "\"data:text/plain,\""
        );
        assert_eq!(PrefValue::from("a\"b\\c").to_string(), r#""a\"b\\c""#);
        assert_eq!(PrefValue::from("line\nbreak").to_string(), r#""line\nbreak""#);
    }

    #[test]
    fn test_value_serializes_untagged() {
        assert_eq!(serde_json::to_string(&PrefValue::from(true)).unwrap(), "true");
        assert_eq!(serde_json::to_string(&PrefValue::from(200)).unwrap(), "200");
        assert_eq!(serde_json::to_string(&PrefValue::from("IT")).unwrap(), "\"IT\"");
    }

    #[test]
    fn test_from_document_rejects_unsupported_kinds() {
        assert!(PrefValue::from_document(&serde_json::json!(null)).is_err());
        assert!(PrefValue::from_document(&serde_json::json!([1, 2])).is_err());
        assert!(PrefValue::from_document(&serde_json::json!({"a": 1})).is_err());
        assert!(PrefValue::from_document(&serde_json::json!(2.5)).is_err());
        assert!(PrefValue::from_document(&serde_json::json!(u64::MAX)).is_err());
    }

    #[test]
    fn test_from_document_accepts_supported_kinds() {
        assert_eq!(
            PrefValue::from_document(&serde_json::json!(false)).unwrap(),
            PrefValue::Bool(false)
        );
        assert_eq!(
            PrefValue::from_document(&serde_json::json!(-7)).unwrap(),
            PrefValue::Int(-7)
        );
        assert_eq!(
            PrefValue::from_document(&serde_json::json!("IT")).unwrap(),
            PrefValue::from("IT")
        );
    }

    #[test]
    fn test_entry_annotation_trimmed_and_blank_dropped() {
        let entry = PreferenceEntry::new("l", "k", 1).with_annotation("  0103 ");
        assert_eq!(entry.annotation.as_deref(), Some("0103"));

        let entry = PreferenceEntry::new("l", "k", 1).with_annotation("   ");
        assert!(entry.annotation.is_none());
    }

    #[test]
    fn test_entry_validation() {
        assert!(PreferenceEntry::new("l", "browser.startup.page", 1)
            .validate()
            .is_ok());

        let err = PreferenceEntry::new("rev", "", 1).validate().unwrap_err();
        assert_eq!(err.layer, "rev");
        assert!(err.reason.contains("empty"));

        assert!(PreferenceEntry::new("l", "a.b ", 1).validate().is_err());
        assert!(PreferenceEntry::new("l", "a\u{0}b", 1).validate().is_err());
    }

    #[test]
    fn test_layer_keeps_declaration_order() {
        let layer = Layer::from_pairs("rev", [("b", 2), ("a", 1), ("b", 3)]);
        let keys: Vec<_> = layer.entries().iter().map(|e| e.key.as_str()).collect();
        assert_eq!(keys, vec!["b", "a", "b"]);
        assert_eq!(layer.len(), 3);
        assert!(!layer.is_empty());
    }

    #[test]
    fn test_push_entry_rehomes_layer_name() {
        let mut layer = Layer::new("target");
        layer.push_entry(PreferenceEntry::new("elsewhere", "k", true));
        assert_eq!(layer.entries()[0].source_layer, "target");
    }

    #[test]
    fn test_empty_layer_is_valid() {
        let layer = Layer::new("empty");
        assert!(layer.is_empty());
        assert!(layer.validate().is_ok());
    }

    #[test]
    fn test_layer_validate_reports_first_bad_entry() {
        let layer = Layer::new("rev")
            .with_entry("ok", 1)
            .with_entry("", 2)
            .with_entry(" also-bad", 3);
        let err = layer.validate().unwrap_err();
        assert_eq!(err.key, "");
    }
}
