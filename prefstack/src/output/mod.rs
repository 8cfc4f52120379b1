//! Output formatting for resolved configurations.
//!
//! The effective configuration and the diagnostics are rendered separately:
//! [`ReportFormatter`] implementations produce the report destined for
//! stdout, while [`DiagnosticsFormatter`] renders conflicts, duplicates and
//! shadowing for the diagnostic stream.

mod diagnostics;
mod formatters;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::resolver::ResolvedConfiguration;
use crate::{Error, Result};

pub use diagnostics::DiagnosticsFormatter;
pub use formatters::{JsonFormatter, TextFormatter, UserJsFormatter};

/// Trait for rendering a resolved configuration into a report.
pub trait ReportFormatter {
    /// Format the given configuration into a string.
    ///
    /// # Errors
    ///
    /// Returns an error if the report cannot be serialized.
    fn format(&self, resolved: &ResolvedConfiguration) -> Result<String>;
}

/// Available report formats.
///
/// `csv` is produced by the command-line front end; the other formats have a
/// [`ReportFormatter`] in this module.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum ReportFormat {
    /// Sorted `key = value` lines.
    #[default]
    Text,
    /// The whole resolution result as JSON.
    Json,
    /// One CSV row per effective key.
    Csv,
    /// `user_pref(...)` declarations, loadable as a layer.
    #[value(name = "userjs")]
    UserJs,
}

impl ReportFormat {
    /// The lowercase name used in configuration files and on the command line.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Json => "json",
            Self::Csv => "csv",
            Self::UserJs => "userjs",
        }
    }
}

impl fmt::Display for ReportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ReportFormat {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "text" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            "csv" => Ok(Self::Csv),
            "userjs" => Ok(Self::UserJs),
            other => Err(Error::Validation {
                field: "output_format".into(),
                message: format!("unknown format '{other}' (expected text, json, csv or userjs)"),
            }),
        }
    }
}
