#![deny(missing_docs, unsafe_code)]
#![warn(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

//! # prefstack
//!
//! A library for resolving layered browser preference overrides.
//!
//! A profile's `user.js` is usually the product of many revisions, each one
//! re-declaring some preferences. This library folds an ordered stack of such
//! layers into one effective configuration and reports where every value came
//! from and which overrides disagreed.
//!
//! ## Core Types
//!
//! - [`PrefValue`], [`PreferenceEntry`] and [`Layer`]: the input model
//! - [`LayerLoader`]: reads layers from `user.js`, YAML and JSON files
//! - [`LayerResolver`] and [`ResolveOptions`]: the resolution fold
//! - [`ResolvedConfiguration`]: effective values, provenance and diagnostics
//! - [`Error`] and [`Result`]: Error handling types
//! - [`Logger`] and [`LogLevel`]: Logging infrastructure
//!
//! ## Examples
//!
//! ```
//! use prefstack::{LayerLoader, LayerResolver, PrefValue};
//!
//! let first = LayerLoader::parse_prefs(
//!     "revision-1",
//!     "user_pref(\"browser.startup.page\", 0);\nuser_pref(\"keyword.enabled\", true);\n",
//! ).unwrap();
//! let second = LayerLoader::parse_prefs(
//!     "revision-2",
//!     "user_pref(\"browser.startup.page\", 1); // 0102\n",
//! ).unwrap();
//!
//! let resolved = LayerResolver::default().resolve(&[first, second]).unwrap();
//! assert_eq!(resolved.get("browser.startup.page"), Some(&PrefValue::Int(1)));
//! assert_eq!(resolved.provenance_of("browser.startup.page").unwrap().layer, "revision-2");
//! assert_eq!(resolved.conflicts().len(), 1);
//! ```

pub mod config;
pub mod error;
pub mod loader;
pub mod logging;
pub mod output;
pub mod preference;
pub mod resolver;

// Re-export key types at crate root for convenience
pub use config::{Config, ConfigBuilder};
pub use error::{Error, Result};
pub use loader::{LayerFormat, LayerLoader};
pub use logging::{init_logger, LogLevel, Logger};
pub use output::{ReportFormat, ReportFormatter};
pub use preference::{Layer, PrefKind, PrefValue, PreferenceEntry};
pub use resolver::{
    Conflict, Duplicate, KeyHistory, LayerResolver, Provenance, ResolveOptions,
    ResolvedConfiguration, Shadowed,
};
