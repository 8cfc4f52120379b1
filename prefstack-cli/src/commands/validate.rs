//! Command to validate preference layer files.

use crate::error::CliError;
use crate::utils::GlobalOptions;
use clap::Args;
use prefstack::{Layer, LayerLoader};
use std::collections::HashSet;
use std::path::PathBuf;

/// Load and validate layer files without resolving them.
#[derive(Args)]
pub struct ValidateCommand {
    /// Layer files to check
    #[arg(value_name = "LAYER", required = true)]
    pub layers: Vec<PathBuf>,
}

impl ValidateCommand {
    /// Execute the validate command.
    ///
    /// Every file is checked and each failure is printed once, prefixed with
    /// its path; the first failure determines the exit code.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let mut first_error = None;

        for path in &self.layers {
            let result = LayerLoader::load_file(path)
                .and_then(|layer| layer.validate().map(|()| layer).map_err(Into::into));

            match result {
                Ok(layer) => {
                    if !global.quiet {
                        println!("{}: {}", path.display(), summarize(&layer));
                    }
                }
                Err(e) => {
                    eprintln!("{}: {e}", path.display());
                    first_error.get_or_insert(e);
                }
            }
        }

        match first_error {
            Some(e) => Err(CliError::Reported(e)),
            None => Ok(()),
        }
    }
}

/// One-line summary of a valid layer.
fn summarize(layer: &Layer) -> String {
    let keys: HashSet<&str> = layer.entries().iter().map(|e| e.key.as_str()).collect();
    let redefined = layer.len() - keys.len();

    let mut summary = format!("ok, {} entries, {} keys", layer.len(), keys.len());
    if redefined > 0 {
        summary.push_str(&format!(" ({redefined} redefined)"));
    }
    summary
}
