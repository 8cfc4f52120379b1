//! Common test utilities for integration tests.
//!
//! This module provides helpers for locating the revision fixtures and for
//! writing ad-hoc layer files.

use std::fs;
use std::path::{Path, PathBuf};

use prefstack::{Layer, LayerLoader};

/// Path of a file under `tests/fixtures/revisions`.
#[allow(dead_code)]
pub fn revision_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join("revisions")
        .join(name)
}

/// Loads the fixture revisions in order.
#[allow(dead_code)]
pub fn load_revisions(names: &[&str]) -> Vec<Layer> {
    let paths: Vec<PathBuf> = names.iter().map(|n| revision_path(n)).collect();
    LayerLoader::load_all(&paths).unwrap()
}

/// Writes `content` to `dir/name` and returns the path.
#[allow(dead_code)]
pub fn write_layer(dir: &Path, name: &str, content: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, content).unwrap();
    path
}
