//! Report formatter implementations.

use crate::preference::quote;
use crate::resolver::ResolvedConfiguration;
use crate::Result;

use super::ReportFormatter;

/// Formatter for plain `key = value` lines, sorted by key.
pub struct TextFormatter;

impl ReportFormatter for TextFormatter {
    fn format(&self, resolved: &ResolvedConfiguration) -> Result<String> {
        let lines: Vec<String> = resolved
            .effective()
            .iter()
            .map(|(key, value)| format!("{key} = {value}"))
            .collect();

        Ok(lines.join("\n"))
    }
}

/// Formatter for the full resolution result as pretty-printed JSON.
///
/// The document has the keys `effective`, `provenance`, `conflicts`,
/// `duplicates` and `shadowed`.
pub struct JsonFormatter;

impl ReportFormatter for JsonFormatter {
    fn format(&self, resolved: &ResolvedConfiguration) -> Result<String> {
        Ok(serde_json::to_string_pretty(resolved)?)
    }
}

/// Formatter emitting `user_pref` declarations.
///
/// The output loads back as a single layer with the same effective values.
/// Annotations of the winning entries become trailing comments.
#[derive(Debug, Clone, Default)]
pub struct UserJsFormatter {
    header: Option<String>,
}

impl UserJsFormatter {
    /// Create a formatter with a block comment header.
    #[must_use]
    pub fn with_header(header: impl Into<String>) -> Self {
        Self {
            header: Some(header.into()),
        }
    }
}

impl ReportFormatter for UserJsFormatter {
    fn format(&self, resolved: &ResolvedConfiguration) -> Result<String> {
        let mut lines = Vec::with_capacity(resolved.len() + 3);

        if let Some(header) = &self.header {
            // A block comment never becomes an annotation when read back.
            lines.push("/*".to_string());
            for line in header.lines() {
                lines.push(format!(" * {}", line.replace("*/", "* /")));
            }
            lines.push(" */".to_string());
        }

        for (key, value) in resolved.effective() {
            let mut line = format!("user_pref({}, {value});", quote(key));
            let annotation = resolved
                .provenance_of(key)
                .and_then(|p| p.annotation.as_deref());
            if let Some(annotation) = annotation {
                line.push_str(" // ");
                line.push_str(&annotation.replace(['\n', '\r'], " "));
            }
            lines.push(line);
        }

        Ok(lines.join("\n"))
    }
}
