//! Layer loading.
//!
//! Turns files into [`Layer`]s, preserving declaration order and surfacing
//! adjacent comments as annotations. Three formats are understood:
//!
//! - preference declarations (`user.js`, `prefs.js`): the default
//! - YAML layer documents (`.yaml`, `.yml`)
//! - JSON layer documents (`.json`)
//!
//! # Examples
//!
//! ```
//! use prefstack::{LayerLoader, PrefValue};
//!
//! let layer = LayerLoader::parse_prefs(
//!     "revision-1",
//!     "user_pref(\"browser.startup.page\", 1); // 0102\n",
//! ).unwrap();
//!
//! let entry = &layer.entries()[0];
//! assert_eq!(entry.value, PrefValue::Int(1));
//! assert_eq!(entry.annotation.as_deref(), Some("0102"));
//! ```

mod document;
mod prefs;

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};
use crate::preference::Layer;

/// On-disk layer formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayerFormat {
    /// `user_pref("key", value);` declarations.
    Prefs,
    /// YAML layer document.
    Yaml,
    /// JSON layer document.
    Json,
}

impl LayerFormat {
    /// Picks a format from the file extension, defaulting to [`Prefs`](Self::Prefs).
    ///
    /// # Examples
    ///
    /// ```
    /// use prefstack::LayerFormat;
    /// use std::path::Path;
    ///
    /// assert_eq!(LayerFormat::from_path(Path::new("user.js")), LayerFormat::Prefs);
    /// assert_eq!(LayerFormat::from_path(Path::new("rev.YML")), LayerFormat::Yaml);
    /// assert_eq!(LayerFormat::from_path(Path::new("rev.json")), LayerFormat::Json);
    /// ```
    #[must_use]
    pub fn from_path(path: &Path) -> Self {
        match path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase)
            .as_deref()
        {
            Some("yaml" | "yml") => Self::Yaml,
            Some("json") => Self::Json,
            _ => Self::Prefs,
        }
    }
}

/// Loads preference layers from files or text.
pub struct LayerLoader;

impl LayerLoader {
    /// Loads a layer named after the path as given.
    ///
    /// # Errors
    ///
    /// Returns [`Error::LayerUnreadable`] if the file cannot be read, or the
    /// parse/malformed-entry error of the content.
    pub fn load_file(path: &Path) -> Result<Layer> {
        Self::load_named(&path.display().to_string(), path)
    }

    /// Loads a layer with an explicit default name.
    ///
    /// YAML and JSON documents that carry a `name` keep their own name.
    ///
    /// # Errors
    ///
    /// Same as [`load_file`](Self::load_file).
    pub fn load_named(name: &str, path: &Path) -> Result<Layer> {
        let text = fs::read_to_string(path).map_err(|source| Error::LayerUnreadable {
            path: path.to_path_buf(),
            source,
        })?;
        let layer = Self::parse(name, &text, LayerFormat::from_path(path))?;
        log::debug!(
            "loaded layer '{}' from {} ({} entries)",
            layer.name(),
            path.display(),
            layer.len()
        );
        Ok(layer)
    }

    /// Loads every path in order, stopping at the first failure.
    ///
    /// # Errors
    ///
    /// Returns the first load error.
    pub fn load_all(paths: &[PathBuf]) -> Result<Vec<Layer>> {
        paths.iter().map(|p| Self::load_file(p)).collect()
    }

    /// Parses layer text in the given format.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Parse`] for syntax problems and
    /// [`Error::MalformedEntry`] for empty keys or unsupported values.
    pub fn parse(name: &str, text: &str, format: LayerFormat) -> Result<Layer> {
        match format {
            LayerFormat::Prefs => prefs::parse(name, text),
            LayerFormat::Yaml => document::from_yaml(name, text),
            LayerFormat::Json => document::from_json(name, text),
        }
    }

    /// Parses preference declarations.
    ///
    /// # Errors
    ///
    /// Same as [`parse`](Self::parse).
    pub fn parse_prefs(name: &str, text: &str) -> Result<Layer> {
        prefs::parse(name, text)
    }
}
