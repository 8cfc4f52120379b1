//! Tabular rendering of conflicts, duplicates and shadowed declarations.

use crate::resolver::{Conflict, ResolvedConfiguration};

/// Renders the diagnostic records of a resolution as tab-separated tables.
///
/// Each non-empty category gets a count line, a header row and one row per
/// record, in processing order. Nothing is rendered when the resolution is
/// clean.
#[derive(Debug, Clone, Default)]
pub struct DiagnosticsFormatter {
    ignored_conflict_keys: Vec<String>,
}

impl DiagnosticsFormatter {
    /// Create a formatter that marks conflicts on `ignored_conflict_keys`.
    #[must_use]
    pub fn new(ignored_conflict_keys: Vec<String>) -> Self {
        Self {
            ignored_conflict_keys,
        }
    }

    /// Render all diagnostic tables.
    #[must_use]
    pub fn format(&self, resolved: &ResolvedConfiguration) -> String {
        let mut sections = Vec::new();

        if !resolved.conflicts().is_empty() {
            let mut lines = vec![
                format!("{} conflict(s):", resolved.conflicts().len()),
                "KEY\tLOSING LAYER\tLOSING VALUE\tWINNING LAYER\tWINNING VALUE\tNOTE".to_string(),
            ];
            lines.extend(resolved.conflicts().iter().map(|c| self.conflict_row(c)));
            sections.push(lines.join("\n"));
        }

        if !resolved.duplicates().is_empty() {
            let mut lines = vec![
                format!("{} duplicate(s):", resolved.duplicates().len()),
                "KEY\tFIRST LAYER\tLAYER\tVALUE".to_string(),
            ];
            lines.extend(resolved.duplicates().iter().map(|d| {
                format!("{}\t{}\t{}\t{}", d.key, d.first_layer, d.layer, d.value)
            }));
            sections.push(lines.join("\n"));
        }

        if !resolved.shadowed().is_empty() {
            let mut lines = vec![
                format!("{} shadowed declaration(s):", resolved.shadowed().len()),
                "KEY\tLAYER\tSHADOWED VALUE\tVALUE".to_string(),
            ];
            lines.extend(resolved.shadowed().iter().map(|s| {
                format!("{}\t{}\t{}\t{}", s.key, s.layer, s.shadowed_value, s.value)
            }));
            sections.push(lines.join("\n"));
        }

        sections.join("\n\n")
    }

    fn conflict_row(&self, conflict: &Conflict) -> String {
        let mut notes = Vec::new();
        if conflict.kind_changed {
            notes.push(format!(
                "kind changed ({} -> {})",
                conflict.previous_value.kind(),
                conflict.value.kind()
            ));
        }
        if self.ignored_conflict_keys.contains(&conflict.key) {
            notes.push("ignored".to_string());
        }

        let row = format!(
            "{}\t{}\t{}\t{}\t{}\t{}",
            conflict.key,
            conflict.previous_layer,
            conflict.previous_value,
            conflict.layer,
            conflict.value,
            notes.join("; ")
        );
        row.trim_end().to_string()
    }
}
