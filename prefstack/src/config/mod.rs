//! Configuration system for prefstack.
//!
//! This module provides hierarchical configuration of resolution policy with
//! support for:
//! - YAML configuration files (user config and project files)
//! - Environment variable overrides
//! - Programmatic configuration via builder pattern
//! - Validation
//!
//! # Configuration Precedence
//!
//! Configuration is merged from multiple sources with the following precedence
//! (highest to lowest):
//!
//! 1. Programmatic overrides (via `ConfigBuilder::with_config`)
//! 2. Environment variables (`PREFSTACK_*`)
//! 3. An explicit file (via `ConfigBuilder::with_config_file`), which
//!    replaces 4-6
//! 4. Private project config (`prefstack.local.yaml`)
//! 5. Project config (`prefstack.yaml`)
//! 6. User config (`~/.prefstack/config.yaml`)
//! 7. Built-in defaults
//!
//! # Examples
//!
//! Loading from a specific directory:
//!
//! ```no_run
//! use prefstack::config::ConfigBuilder;
//! use std::path::Path;
//!
//! let config = ConfigBuilder::new()
//!     .with_working_dir(Path::new("/path/to/profile"))
//!     .build()
//!     .unwrap();
//!
//! for layer in config.layers() {
//!     println!("layer: {}", layer.display());
//! }
//! ```
//!
//! Programmatic configuration:
//!
//! ```
//! use prefstack::config::{Config, ConfigBuilder};
//! use prefstack::ReportFormat;
//!
//! let custom = Config {
//!     output_format: Some(ReportFormat::UserJs),
//!     ignore_conflicts: Some(vec!["_user.js.parrot".to_string()]),
//!     ..Default::default()
//! };
//!
//! let config = ConfigBuilder::new()
//!     .skip_files()
//!     .skip_env()
//!     .with_config(custom)
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(config.output_format(), ReportFormat::UserJs);
//! ```

pub mod builder;
pub mod environment;
pub mod loader;
pub mod merger;
pub mod schema;
pub mod validator;

#[cfg(all(test, feature = "property-tests"))]
mod proptests;

// Re-export key types at module root
pub use builder::ConfigBuilder;
pub use environment::EnvironmentConfig;
pub use loader::{ConfigLoader, ConfigSource};
pub use merger::ConfigMerger;
pub use schema::Config;
pub use validator::ConfigValidator;
