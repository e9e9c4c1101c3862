//! Demand reduction: offsets electricity-supplied demand with asset output.

use std::fmt;

use indexmap::IndexMap;
use serde::Deserialize;

use crate::resolver::AssetRecord;

/// System name whose demand can be offset by an asset's own output.
pub const ELECTRICITY_SYSTEM: &str = "electricity";

/// Value reported as `energy_output_reduction` when total demand is zero
/// under [`ZeroDemandPolicy::NotAvailable`].
pub const NOT_AVAILABLE: &str = "N/A";

/// What to do when the reduced total demand is zero and the output
/// percentage is undefined.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ZeroDemandPolicy {
    /// Report [`NOT_AVAILABLE`] instead of a percentage.
    #[default]
    NotAvailable,
    /// Fail with [`ReduceError::DivisionByZero`].
    Error,
}

/// Reduced demand figures for one asset.
#[derive(Debug, Clone, PartialEq)]
pub struct ReducedResult {
    /// Energy type → demand left after the reduction, in input order.
    pub energy_demand: IndexMap<String, f64>,
    pub total_energy_demand: f64,
    /// `output / total * 100` with two decimals, no `%` sign.
    pub energy_output_reduction: String,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ReduceError {
    /// Total demand after reduction is zero.
    DivisionByZero { asset: String },
}

impl fmt::Display for ReduceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DivisionByZero { asset } => write!(
                f,
                "total energy demand of asset \"{asset}\" is zero, output reduction is undefined"
            ),
        }
    }
}

impl std::error::Error for ReduceError {}

/// Applies the reduction rule to resolved asset records.
///
/// # Examples
///
/// ```
/// use indexmap::IndexMap;
/// use asset_energy::reducer::Reducer;
/// use asset_energy::resolver::{AssetRecord, DemandEntry};
///
/// let mut energy_demand = IndexMap::new();
/// let electric = DemandEntry { system: "electricity".into(), value: 10.0 };
/// let gas = DemandEntry { system: "gas".into(), value: 5.0 };
/// energy_demand.insert("heat".to_string(), electric);
/// energy_demand.insert("gas".to_string(), gas);
/// let record = AssetRecord { name: "Office".into(), energy_demand, energy_output: Some(6.0) };
///
/// let reduced = Reducer::default().reduce(&record).unwrap();
/// assert_eq!(reduced.energy_demand.get("heat"), Some(&4.0));
/// assert_eq!(reduced.total_energy_demand, 9.0);
/// assert_eq!(reduced.energy_output_reduction, "66.67");
/// ```
#[derive(Debug, Clone)]
pub struct Reducer {
    electricity_system: String,
    zero_demand: ZeroDemandPolicy,
}

impl Default for Reducer {
    fn default() -> Self {
        Self::new(ELECTRICITY_SYSTEM, ZeroDemandPolicy::default())
    }
}

impl Reducer {
    /// Creates a reducer offsetting demand supplied by `electricity_system`.
    pub fn new(electricity_system: impl Into<String>, zero_demand: ZeroDemandPolicy) -> Self {
        Self {
            electricity_system: electricity_system.into(),
            zero_demand,
        }
    }

    pub fn zero_demand(&self) -> ZeroDemandPolicy {
        self.zero_demand
    }

    /// Reduces the demand of `record`.
    ///
    /// Output is consumed cumulatively in the mapping's insertion order, so
    /// earlier electricity-supplied entries are offset first. A missing
    /// output counts as zero; a negative one is clamped to zero for the
    /// offset and logged, while the percentage still uses the recorded value.
    ///
    /// # Errors
    ///
    /// Returns [`ReduceError::DivisionByZero`] if the total is zero and the
    /// policy is [`ZeroDemandPolicy::Error`].
    pub fn reduce(&self, record: &AssetRecord) -> Result<ReducedResult, ReduceError> {
        let recorded_output = record.energy_output.unwrap_or(0.0);
        let mut output = recorded_output;
        if output < 0.0 {
            tracing::warn!(
                asset = %record.name,
                energy_output = output,
                "negative energy output, treating as zero"
            );
            output = 0.0;
        }

        let mut total_demand = 0.0;
        let mut reduced = IndexMap::with_capacity(record.energy_demand.len());
        for (energy_type, entry) in &record.energy_demand {
            let mut demand = entry.value;
            if output > 0.0 && entry.system == self.electricity_system {
                let reduction = output.min(demand);
                demand -= reduction;
                output -= reduction;
            }
            total_demand += demand;
            reduced.insert(energy_type.clone(), demand);
        }

        let energy_output_reduction = if total_demand == 0.0 {
            match self.zero_demand {
                ZeroDemandPolicy::NotAvailable => NOT_AVAILABLE.to_string(),
                ZeroDemandPolicy::Error => {
                    return Err(ReduceError::DivisionByZero {
                        asset: record.name.clone(),
                    });
                }
            }
        } else {
            format!("{:.2}", recorded_output / total_demand * 100.0)
        };

        Ok(ReducedResult {
            energy_demand: reduced,
            total_energy_demand: total_demand,
            energy_output_reduction,
        })
    }
}
