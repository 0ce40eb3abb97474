//! # Calculations
//!
//! Each calculation follows the pattern:
//!
//! - `*Input` - Input parameters (JSON-serializable)
//! - `*Result` - Calculation results (JSON-serializable)
//! - `calculate(input) -> Result<*Result, CalcError>` - Pure calculation function
//!
//! ## Available Calculations
//!
//! - [`bolt`] - Bolt shear/tension capacity and detailing limits

pub mod bolt;

use serde::{Deserialize, Serialize};

pub use bolt::{
    calculate,
    compute_shear_capacity,
    compute_tensile_capacity,
    BoltInput,
    BoltResult,
};

/// Enum wrapper for stored calculation inputs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum CalculationItem {
    /// Single bolt capacity calculation
    Bolt(BoltInput),
}

impl CalculationItem {
    /// Get the user-provided label for this calculation
    pub fn label(&self) -> &str {
        match self {
            CalculationItem::Bolt(b) => &b.label,
        }
    }

    /// Get the calculation type as a string
    pub fn calc_type(&self) -> &'static str {
        match self {
            CalculationItem::Bolt(_) => "Bolt",
        }
    }
}
