//! API response types.

use indexmap::IndexMap;
use serde::Serialize;

use crate::reducer::ReducedResult;

/// Message returned for every lookup or data failure.
pub const INVALID_ASSET_MESSAGE: &str = "Invalid asset ID or data format";

/// Reduced demand figures together with the asset name.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AssetResponse {
    pub name: String,
    /// Energy type → reduced demand.
    pub energy_demand: IndexMap<String, f64>,
    pub total_energy_demand: f64,
    /// Percentage with two decimals and no `%` sign, or `"N/A"`.
    pub energy_output_reduction: String,
}

impl AssetResponse {
    pub fn new(name: String, reduced: ReducedResult) -> Self {
        Self {
            name,
            energy_demand: reduced.energy_demand,
            total_energy_demand: reduced.total_energy_demand,
            energy_output_reduction: reduced.energy_output_reduction,
        }
    }
}

/// Error response body for 400-class errors.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Human-readable error message.
    pub error: String,
}

impl ErrorResponse {
    pub fn invalid_asset() -> Self {
        Self {
            error: INVALID_ASSET_MESSAGE.to_string(),
        }
    }

    pub fn not_found() -> Self {
        Self {
            error: "not found".to_string(),
        }
    }
}
