//! Structured layer documents (YAML and JSON).
//!
//! ```yaml
//! name: revision-4
//! entries:
//!   - key: browser.startup.page
//!     value: 1
//!     annotation: "0102"
//! ```

use serde::Deserialize;

use crate::error::{Error, Result};
use crate::preference::{Layer, PrefValue, PreferenceEntry};

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct LayerDocument {
    name: Option<String>,
    #[serde(default)]
    entries: Vec<EntryDocument>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct EntryDocument {
    key: String,
    value: serde_json::Value,
    annotation: Option<String>,
}

/// Parses a YAML layer document. `default_name` is used when the document
/// does not name itself.
pub(crate) fn from_yaml(default_name: &str, text: &str) -> Result<Layer> {
    if text.trim().is_empty() {
        return Ok(Layer::new(default_name));
    }

    let document: LayerDocument = serde_yaml::from_str(text).map_err(|e| Error::Parse {
        layer: default_name.to_string(),
        line: e.location().map_or(0, |l| l.line()),
        message: format!("invalid YAML layer: {e}"),
    })?;
    into_layer(default_name, document)
}

/// Parses a JSON layer document.
pub(crate) fn from_json(default_name: &str, text: &str) -> Result<Layer> {
    let document: LayerDocument = serde_json::from_str(text).map_err(|e| Error::Parse {
        layer: default_name.to_string(),
        line: e.line(),
        message: format!("invalid JSON layer: {e}"),
    })?;
    into_layer(default_name, document)
}

fn into_layer(default_name: &str, document: LayerDocument) -> Result<Layer> {
    let name = document.name.unwrap_or_else(|| default_name.to_string());
    let mut layer = Layer::new(name.clone());

    for raw in document.entries {
        let value = PrefValue::from_document(&raw.value).map_err(|reason| Error::MalformedEntry {
            layer: name.clone(),
            key: raw.key.clone(),
            reason,
        })?;

        let mut entry = PreferenceEntry::new(name.clone(), raw.key, value);
        if let Some(annotation) = raw.annotation {
            entry = entry.with_annotation(annotation);
        }
        layer.push_entry(entry);
    }

    Ok(layer)
}
