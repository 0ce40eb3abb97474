//! # Calculation History
//!
//! The `Project` struct is the container for saved bolt calculations.
//! Projects serialize to `.bolt` files as human-readable JSON.
//!
//! ## Structure
//!
//! ```text
//! Project
//! ├── meta: ProjectMetadata (version, engineer, job info, timestamps)
//! ├── settings: GlobalSettings (standard, display precision, default grade)
//! └── items: HashMap<Uuid, SavedCalculation> (input + result + timestamp)
//! ```
//!
//! ## Example
//!
//! ```rust
//! use bolt_core::calculations::bolt::{calculate, BoltInput};
//! use bolt_core::project::Project;
//!
//! let mut project = Project::new("Jane Engineer", "25-042");
//! let input = BoltInput {
//!     label: "B1".to_string(),
//!     grade: "8.8".to_string(),
//!     diameter_mm: 20.0,
//!     threaded_length_mm: 0.0,
//!     threaded_planes: 1,
//!     unthreaded_planes: 0,
//! };
//! let result = calculate(&input).unwrap();
//! let id = project.add_calculation(input, result);
//! assert!(project.get_item(&id).is_some());
//! ```

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::calculations::{BoltInput, BoltResult, CalculationItem};
use crate::materials::BoltGrade;

/// Current schema version for .bolt files
pub const SCHEMA_VERSION: &str = "0.1.0";

/// Root history container.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Project {
    /// Project metadata (version, engineer, job info)
    pub meta: ProjectMetadata,

    /// Settings applied when presenting or exporting results
    #[serde(default)]
    pub settings: GlobalSettings,

    /// Saved calculations, keyed by UUID
    pub items: HashMap<Uuid, SavedCalculation>,
}

/// One saved calculation: the inputs as entered and the result produced.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavedCalculation {
    /// When the calculation was saved
    pub saved_at: DateTime<Utc>,
    /// Inputs
    pub item: CalculationItem,
    /// Full-precision result
    pub result: BoltResult,
}

impl SavedCalculation {
    /// Get the bolt input for this entry
    pub fn bolt_input(&self) -> &BoltInput {
        match &self.item {
            CalculationItem::Bolt(input) => input,
        }
    }
}

impl Project {
    /// Create a new empty history.
    pub fn new(engineer: impl Into<String>, job_id: impl Into<String>) -> Self {
        let now = Utc::now();
        Project {
            meta: ProjectMetadata {
                version: SCHEMA_VERSION.to_string(),
                engineer: engineer.into(),
                job_id: job_id.into(),
                created: now,
                modified: now,
            },
            settings: GlobalSettings::default(),
            items: HashMap::new(),
        }
    }

    /// Save a calculation and its result. Returns the UUID assigned to it.
    pub fn add_calculation(&mut self, input: BoltInput, result: BoltResult) -> Uuid {
        let id = Uuid::new_v4();
        self.items.insert(
            id,
            SavedCalculation {
                saved_at: Utc::now(),
                item: CalculationItem::Bolt(input),
                result,
            },
        );
        self.touch();
        id
    }

    /// Remove a saved calculation by UUID.
    pub fn remove_item(&mut self, id: &Uuid) -> Option<SavedCalculation> {
        let item = self.items.remove(id);
        if item.is_some() {
            self.touch();
        }
        item
    }

    /// Get a saved calculation by UUID.
    pub fn get_item(&self, id: &Uuid) -> Option<&SavedCalculation> {
        self.items.get(id)
    }

    /// Saved calculations, newest first. Ties are ordered by id.
    pub fn history(&self) -> Vec<(&Uuid, &SavedCalculation)> {
        let mut entries: Vec<_> = self.items.iter().collect();
        entries.sort_by(|(id_a, a), (id_b, b)| b.saved_at.cmp(&a.saved_at).then_with(|| id_a.cmp(id_b)));
        entries
    }

    /// Remove every saved calculation.
    pub fn clear(&mut self) {
        if !self.items.is_empty() {
            self.items.clear();
            self.touch();
        }
    }

    /// Update the modified timestamp.
    pub fn touch(&mut self) {
        self.meta.modified = Utc::now();
    }

    pub fn item_count(&self) -> usize {
        self.items.len()
    }
}

impl Default for Project {
    fn default() -> Self {
        Project::new("", "")
    }
}

/// Project metadata stored in the file header.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectMetadata {
    /// Schema version (for migration compatibility)
    pub version: String,

    /// Name of the responsible engineer
    pub engineer: String,

    /// Job/project number
    pub job_id: String,

    /// When the history was created
    pub created: DateTime<Utc>,

    /// When the history was last modified
    pub modified: DateTime<Utc>,
}

/// Presentation settings for a history file.
///
/// These affect display and export only. Calculation constants (φ, the
/// thread-root allowance, the grade table) are compiled in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GlobalSettings {
    /// Design standard shown on reports
    pub standard: String,

    /// Decimal places used when displaying or exporting results
    pub display_decimals: u8,

    /// Grade preselected for new calculations
    pub default_grade: BoltGrade,
}

impl Default for GlobalSettings {
    fn default() -> Self {
        GlobalSettings {
            standard: "AS 5100.6".to_string(),
            display_decimals: 2,
            default_grade: BoltGrade::Grade8_8,
        }
    }
}

impl GlobalSettings {
    /// Round a value to the configured number of decimals for display.
    pub fn round_for_display(&self, value: f64) -> f64 {
        let factor = 10f64.powi(i32::from(self.display_decimals));
        (value * factor).round() / factor
    }
}
