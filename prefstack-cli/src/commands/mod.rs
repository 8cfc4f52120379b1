//! CLI command implementations.
//!
//! This module contains the implementations of all CLI commands:
//! - `resolve`: Fold layer files into the effective configuration
//! - `validate`: Load and validate layer files
//! - `explain`: Show the provenance and history of one key
//! - `completions`: Generate shell completion scripts

pub mod completions;
pub mod explain;
pub mod resolve;
pub mod validate;

pub use completions::CompletionsCommand;
pub use explain::ExplainCommand;
pub use resolve::ResolveCommand;
pub use validate::ValidateCommand;
