//! Explain command implementation.
//!
//! Shows where a single key's effective value came from and every override
//! it went through on the way.

use crate::error::CliError;
use crate::utils::{layer_paths, load_configuration, load_layers, GlobalOptions};
use clap::Args;
use prefstack::config::Config;
use prefstack::{LayerResolver, ResolvedConfiguration};
use std::io::Write;
use std::path::PathBuf;

/// Explain the effective value of one preference.
#[derive(Args)]
pub struct ExplainCommand {
    /// Preference key to explain
    #[arg(value_name = "KEY")]
    pub key: String,

    /// Layer files, lowest precedence first (defaults to the configured layers)
    #[arg(value_name = "LAYER")]
    pub layers: Vec<PathBuf>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

impl ExplainCommand {
    /// Execute the explain command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        if self.key.trim().is_empty() {
            return Err(CliError::InvalidArguments(
                "Preference key must not be empty".into(),
            ));
        }

        let config = load_configuration(global, Config::default())?;
        let layers = load_layers(&layer_paths(&self.layers, &config))?;

        // Strict mode never applies here: the point is to look at conflicts
        let options = config.resolve_options().with_strict(false);
        let resolved = LayerResolver::new(options).resolve(&layers)?;

        if resolved.get(&self.key).is_none() {
            return Err(CliError::SemanticFailure(format!(
                "Key '{}' is not set by any layer",
                self.key
            )));
        }

        let stdout = std::io::stdout();
        let mut handle = stdout.lock();
        if self.json {
            writeln!(handle, "{}", explain_json(&resolved, &self.key)?)?;
        } else {
            for line in explain_lines(&resolved, &self.key) {
                writeln!(handle, "{line}")?;
            }
        }

        Ok(())
    }
}

fn explain_lines(resolved: &ResolvedConfiguration, key: &str) -> Vec<String> {
    let mut lines = vec![format!("key: {key}")];

    if let Some(value) = resolved.get(key) {
        lines.push(format!("value: {value}"));
        lines.push(format!("kind: {}", value.kind()));
    }

    if let Some(provenance) = resolved.provenance_of(key) {
        lines.push(format!(
            "layer: {} (#{})",
            provenance.layer,
            provenance.layer_index + 1
        ));
        if let Some(line) = provenance.line {
            lines.push(format!("line: {line}"));
        }
        if let Some(ref annotation) = provenance.annotation {
            lines.push(format!("annotation: {annotation}"));
        }
    }

    let history = resolved.history(key);
    if history.is_empty() {
        return lines;
    }

    // Grouped by record kind; each group keeps processing order
    lines.push("history:".to_string());
    if !history.shadowed.is_empty() {
        lines.push("  shadowed within a layer:".to_string());
        lines.extend(history.shadowed.iter().map(|s| {
            format!("    {}: {} -> {}", s.layer, s.shadowed_value, s.value)
        }));
    }
    if !history.duplicates.is_empty() {
        lines.push("  duplicates:".to_string());
        lines.extend(history.duplicates.iter().map(|d| {
            format!("    {} and {} both set {}", d.first_layer, d.layer, d.value)
        }));
    }
    if !history.conflicts.is_empty() {
        lines.push("  conflicts:".to_string());
        lines.extend(history.conflicts.iter().map(|c| {
            let note = if c.kind_changed { " (kind changed)" } else { "" };
            format!(
                "    {} = {} overridden by {} = {}{note}",
                c.previous_layer, c.previous_value, c.layer, c.value
            )
        }));
    }

    lines
}

fn explain_json(resolved: &ResolvedConfiguration, key: &str) -> Result<String, CliError> {
    let history = resolved.history(key);
    let document = serde_json::json!({
        "key": key,
        "value": resolved.get(key),
        "provenance": resolved.provenance_of(key),
        "conflicts": history.conflicts,
        "duplicates": history.duplicates,
        "shadowed": history.shadowed,
    });

    serde_json::to_string_pretty(&document).map_err(|e| CliError::Io(e.into()))
}
