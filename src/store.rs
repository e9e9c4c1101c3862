//! Read-only energy data store loaded once from a JSON document.
//!
//! The backing document holds six record lists. Assets, energy types and
//! energy systems are addressed by id; when a row carries no explicit `id`
//! it gets its 1-based position. Link rows are indexed at load time so the
//! resolver never scans or does positional arithmetic.

use std::collections::HashMap;
use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::Deserialize;

/// Named row of the `asset`, `energy_type` and `energy_system` lists.
#[derive(Debug, Clone, Deserialize)]
pub struct NamedRow {
    /// Explicit identifier; defaults to the 1-based list position.
    #[serde(default)]
    pub id: Option<u32>,
    pub name: String,
}

/// Demand link row: how much of an energy type an asset needs.
#[derive(Debug, Clone, Deserialize)]
pub struct AssetEnergyDemand {
    pub asset: u32,
    pub energy_type: u32,
    pub energy_demand: f64,
}

/// System link row: which energy system supplies an asset's energy type.
#[derive(Debug, Clone, Deserialize)]
pub struct AssetEnergySystem {
    pub asset: u32,
    pub energy_type: u32,
    pub energy_system: u32,
}

/// Output link row: energy produced by an asset.
#[derive(Debug, Clone, Deserialize)]
pub struct AssetEnergyOutput {
    pub asset: u32,
    pub energy_output: f64,
}

/// Raw backing document, exactly as stored on disk.
#[derive(Debug, Clone, Deserialize)]
pub struct Document {
    pub asset: Vec<NamedRow>,
    pub energy_type: Vec<NamedRow>,
    pub energy_system: Vec<NamedRow>,
    pub asset_energy_demand: Vec<AssetEnergyDemand>,
    pub asset_energy_output: Vec<AssetEnergyOutput>,
    pub asset_energy_system: Vec<AssetEnergySystem>,
}

/// Asset entry of the store index.
#[derive(Debug, Clone, PartialEq)]
pub struct Asset {
    pub id: u32,
    pub name: String,
}

/// Demand link of one asset, in document order.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DemandLink {
    pub energy_type_id: u32,
    pub energy_demand: f64,
}

/// Errors raised while loading the energy data store.
#[derive(Debug)]
pub enum StoreError {
    /// The data file could not be opened or read.
    Load { path: PathBuf, source: io::Error },
    /// The content is not well-formed or lacks a required list.
    Parse {
        path: Option<PathBuf>,
        source: serde_json::Error,
    },
    /// Two rows of the same list share an identifier.
    DuplicateId { table: &'static str, id: u32 },
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Load { path, source } => {
                write!(f, "data file \"{}\" could not be read: {source}", path.display())
            }
            Self::Parse {
                path: Some(path),
                source,
            } => write!(
                f,
                "failed to parse JSON data from \"{}\": {source}",
                path.display()
            ),
            Self::Parse { path: None, source } => {
                write!(f, "failed to parse JSON data: {source}")
            }
            Self::DuplicateId { table, id } => {
                write!(f, "duplicate id {id} in `{table}` list")
            }
        }
    }
}

impl std::error::Error for StoreError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Load { source, .. } => Some(source),
            Self::Parse { source, .. } => Some(source),
            Self::DuplicateId { .. } => None,
        }
    }
}

/// Indexed, immutable view over a loaded [`Document`].
#[derive(Debug, Clone, Default)]
pub struct EnergyStore {
    assets: HashMap<u32, Asset>,
    energy_types: HashMap<u32, String>,
    energy_systems: HashMap<u32, String>,
    demands: HashMap<u32, Vec<DemandLink>>,
    systems: HashMap<(u32, u32), u32>,
    outputs: HashMap<u32, f64>,
}

impl EnergyStore {
    /// Reads and indexes the data file at `path`.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Load`] if the file cannot be read,
    /// [`StoreError::Parse`] if it is not a valid document, and
    /// [`StoreError::DuplicateId`] if an id is used twice in one list.
    pub fn load(path: &Path) -> Result<Self, StoreError> {
        let raw = fs::read_to_string(path).map_err(|source| StoreError::Load {
            path: path.to_path_buf(),
            source,
        })?;
        let document: Document =
            serde_json::from_str(&raw).map_err(|source| StoreError::Parse {
                path: Some(path.to_path_buf()),
                source,
            })?;
        let store = Self::from_document(document)?;
        tracing::info!(
            path = %path.display(),
            assets = store.assets.len(),
            energy_types = store.energy_types.len(),
            energy_systems = store.energy_systems.len(),
            "energy data loaded"
        );
        Ok(store)
    }

    /// Parses and indexes a document held in memory.
    ///
    /// # Errors
    ///
    /// Same as [`EnergyStore::load`], minus the I/O failure.
    pub fn from_json_str(raw: &str) -> Result<Self, StoreError> {
        let document: Document = serde_json::from_str(raw)
            .map_err(|source| StoreError::Parse { path: None, source })?;
        Self::from_document(document)
    }

    /// Builds the indexes from a parsed document.
    ///
    /// Tie-break rules are fixed here: for system links the last row for an
    /// `(asset, energy_type)` pair wins, for outputs the first row for an
    /// asset wins. Demand links keep document order.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::DuplicateId`] if an id is used twice in one list.
    pub fn from_document(document: Document) -> Result<Self, StoreError> {
        let assets = index_named("asset", document.asset)?
            .into_iter()
            .map(|(id, name)| (id, Asset { id, name }))
            .collect();
        let energy_types = index_named("energy_type", document.energy_type)?;
        let energy_systems = index_named("energy_system", document.energy_system)?;

        let mut demands: HashMap<u32, Vec<DemandLink>> = HashMap::new();
        for row in document.asset_energy_demand {
            demands.entry(row.asset).or_default().push(DemandLink {
                energy_type_id: row.energy_type,
                energy_demand: row.energy_demand,
            });
        }

        let mut systems = HashMap::new();
        for row in document.asset_energy_system {
            systems.insert((row.asset, row.energy_type), row.energy_system);
        }

        let mut outputs = HashMap::new();
        for row in document.asset_energy_output {
            outputs.entry(row.asset).or_insert(row.energy_output);
        }

        Ok(Self {
            assets,
            energy_types,
            energy_systems,
            demands,
            systems,
            outputs,
        })
    }

    pub fn asset(&self, id: u32) -> Option<&Asset> {
        self.assets.get(&id)
    }

    pub fn asset_count(&self) -> usize {
        self.assets.len()
    }

    pub fn energy_type_name(&self, id: u32) -> Option<&str> {
        self.energy_types.get(&id).map(String::as_str)
    }

    pub fn energy_system_name(&self, id: u32) -> Option<&str> {
        self.energy_systems.get(&id).map(String::as_str)
    }

    /// Demand links of an asset in document order; empty if it has none.
    pub fn demands_for(&self, asset_id: u32) -> &[DemandLink] {
        self.demands.get(&asset_id).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Energy system supplying `energy_type_id` for an asset (last link wins).
    pub fn system_for(&self, asset_id: u32, energy_type_id: u32) -> Option<u32> {
        self.systems.get(&(asset_id, energy_type_id)).copied()
    }

    /// Recorded energy output of an asset (first link wins).
    pub fn output_for(&self, asset_id: u32) -> Option<f64> {
        self.outputs.get(&asset_id).copied()
    }
}

fn index_named(
    table: &'static str,
    rows: Vec<NamedRow>,
) -> Result<HashMap<u32, String>, StoreError> {
    let mut index = HashMap::with_capacity(rows.len());
    for (position, row) in rows.into_iter().enumerate() {
        let id = row.id.unwrap_or(position as u32 + 1);
        if index.insert(id, row.name).is_some() {
            return Err(StoreError::DuplicateId { table, id });
        }
    }
    Ok(index)
}
