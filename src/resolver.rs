//! Joins the store's record lists into one denormalized asset record.

use std::fmt;

use indexmap::IndexMap;

use crate::store::EnergyStore;

/// Demand of one energy type together with the system supplying it.
#[derive(Debug, Clone, PartialEq)]
pub struct DemandEntry {
    /// Name of the supplying energy system (e.g. `"electricity"`).
    pub system: String,
    /// Demand value as recorded in the data file.
    pub value: f64,
}

/// Denormalized view of a single asset.
#[derive(Debug, Clone, PartialEq)]
pub struct AssetRecord {
    pub name: String,
    /// Energy type name → demand entry, in document order.
    pub energy_demand: IndexMap<String, DemandEntry>,
    /// Recorded output, `None` if the asset has no output row.
    pub energy_output: Option<f64>,
}

/// Lookup failures while resolving an asset.
#[derive(Debug, Clone, PartialEq)]
pub enum ResolveError {
    /// No asset with this id exists.
    AssetNotFound(u32),
    /// A link row points at an id missing from the referenced list.
    DanglingReference {
        asset_id: u32,
        table: &'static str,
        id: u32,
    },
}

impl fmt::Display for ResolveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AssetNotFound(id) => write!(f, "asset {id} not found"),
            Self::DanglingReference {
                asset_id,
                table,
                id,
            } => write!(f, "asset {asset_id} references unknown {table} id {id}"),
        }
    }
}

impl std::error::Error for ResolveError {}

/// Resolves `asset_id` into an [`AssetRecord`].
///
/// Demand links with no matching system link are left out of the mapping.
/// An asset with no demand or output rows still resolves, with an empty
/// mapping and `energy_output: None`.
///
/// # Errors
///
/// Returns [`ResolveError::AssetNotFound`] for an unknown id and
/// [`ResolveError::DanglingReference`] when the asset's links point at a
/// missing energy type or energy system.
pub fn resolve(store: &EnergyStore, asset_id: u32) -> Result<AssetRecord, ResolveError> {
    let asset = store
        .asset(asset_id)
        .ok_or(ResolveError::AssetNotFound(asset_id))?;

    let mut energy_demand = IndexMap::new();
    for link in store.demands_for(asset_id) {
        let type_name = store.energy_type_name(link.energy_type_id).ok_or(
            ResolveError::DanglingReference {
                asset_id,
                table: "energy_type",
                id: link.energy_type_id,
            },
        )?;

        let Some(system_id) = store.system_for(asset_id, link.energy_type_id) else {
            tracing::debug!(
                asset_id,
                energy_type = type_name,
                "no energy system linked, skipping"
            );
            continue;
        };
        let system_name = store.energy_system_name(system_id).ok_or(
            ResolveError::DanglingReference {
                asset_id,
                table: "energy_system",
                id: system_id,
            },
        )?;

        energy_demand.insert(
            type_name.to_string(),
            DemandEntry {
                system: system_name.to_string(),
                value: link.energy_demand,
            },
        );
    }

    Ok(AssetRecord {
        name: asset.name.clone(),
        energy_demand,
        energy_output: store.output_for(asset_id),
    })
}
