//! Shared test fixtures for integration tests.

#![allow(dead_code)]

use std::path::PathBuf;

use asset_energy::store::EnergyStore;

/// Path of the three-asset fixture document.
pub fn fixture_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join("assets.json")
}

/// Fixture store loaded through the file loader.
pub fn fixture_store() -> EnergyStore {
    EnergyStore::load(&fixture_path()).expect("fixture data should load")
}
