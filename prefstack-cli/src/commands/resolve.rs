//! Resolve command implementation.
//!
//! This module implements the `resolve` command, which folds an ordered
//! stack of preference layers into the effective configuration.

use crate::error::CliError;
use crate::utils::{flag, layer_paths, load_configuration, load_layers, GlobalOptions};
use clap::Args;
use prefstack::config::Config;
use prefstack::output::{DiagnosticsFormatter, JsonFormatter, TextFormatter, UserJsFormatter};
use prefstack::{LayerResolver, ReportFormat, ReportFormatter, ResolvedConfiguration};
use std::io::Write;
use std::path::PathBuf;

/// Column headers for CSV output.
const COLUMN_HEADERS: &[&str] = &["key", "value", "kind", "layer", "annotation"];

/// Resolve layered preference files into one effective configuration.
#[derive(Args)]
pub struct ResolveCommand {
    /// Layer files, lowest precedence first (defaults to the configured layers)
    #[arg(value_name = "LAYER")]
    pub layers: Vec<PathBuf>,

    /// Fail with exit code 2 when layers disagree on a value
    #[arg(long)]
    pub strict: bool,

    /// Fail when no layers are given
    #[arg(long)]
    pub require_layers: bool,

    /// Output format
    #[arg(long, value_enum, value_name = "FORMAT")]
    pub format: Option<ReportFormat>,

    /// Key whose conflicts never fail strict mode (repeatable)
    #[arg(long = "ignore-conflict", value_name = "KEY")]
    pub ignore_conflicts: Vec<String>,

    /// Do not print conflict, duplicate and shadowing tables
    #[arg(long)]
    pub no_diagnostics: bool,
}

impl ResolveCommand {
    /// Execute the resolve command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let overrides = Config {
            strict: flag(self.strict),
            require_layers: flag(self.require_layers),
            output_format: self.format,
            ignore_conflicts: (!self.ignore_conflicts.is_empty())
                .then(|| self.ignore_conflicts.clone()),
            diagnostics: self.no_diagnostics.then_some(false),
            layers: None,
        };
        let config = load_configuration(global, overrides)?;

        let paths = layer_paths(&self.layers, &config);
        let layers = load_layers(&paths)?;

        let options = config.resolve_options();
        let resolver = LayerResolver::new(options.clone());
        let resolved = resolver.fold(&layers)?;

        // Diagnostics go out even when strict mode is about to fail; quiet
        // comes from --quiet or PREFSTACK_LOG_MODE=quiet
        if config.diagnostics_enabled() && !global.quiet {
            let diagnostics =
                DiagnosticsFormatter::new(options.ignored_conflict_keys).format(&resolved);
            if !diagnostics.is_empty() {
                eprintln!("{diagnostics}");
            }
        }

        resolver.enforce(&resolved)?;

        log::info!(
            "Resolved {} key(s) from {} layer(s)",
            resolved.len(),
            layers.len()
        );

        write_report(config.output_format(), &resolved, layers.len())
    }
}

/// Write the effective configuration to stdout in the requested format.
fn write_report(
    format: ReportFormat,
    resolved: &ResolvedConfiguration,
    layer_count: usize,
) -> Result<(), CliError> {
    let output = match format {
        ReportFormat::Csv => return format_as_csv(resolved),
        ReportFormat::Text => TextFormatter.format(resolved)?,
        ReportFormat::Json => JsonFormatter.format(resolved)?,
        ReportFormat::UserJs => UserJsFormatter::with_header(format!(
            "Effective preferences resolved by prefstack from {layer_count} layer(s)."
        ))
        .format(resolved)?,
    };

    if !output.is_empty() {
        let stdout = std::io::stdout();
        let mut handle = stdout.lock();
        writeln!(handle, "{output}")?;
    }

    Ok(())
}

/// Convert csv::Error to CliError.
fn csv_error(e: csv::Error) -> CliError {
    CliError::Io(std::io::Error::new(std::io::ErrorKind::Other, e))
}

/// Format the effective configuration as CSV, one row per key.
fn format_as_csv(resolved: &ResolvedConfiguration) -> Result<(), CliError> {
    let stdout = std::io::stdout();
    let handle = stdout.lock();
    let mut writer = csv::Writer::from_writer(handle);

    writer.write_record(COLUMN_HEADERS).map_err(csv_error)?;

    for (key, value) in resolved.effective() {
        let provenance = resolved.provenance_of(key);
        writer
            .write_record([
                key.clone(),
                value.to_plain_string(),
                value.kind().to_string(),
                provenance.map(|p| p.layer.clone()).unwrap_or_default(),
                provenance
                    .and_then(|p| p.annotation.clone())
                    .unwrap_or_default(),
            ])
            .map_err(csv_error)?;
    }

    writer.flush()?;

    Ok(())
}
