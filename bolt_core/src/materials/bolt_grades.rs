//! Bolt Grade Property Table
//!
//! Characteristic minimum tensile strength `fuf` for the bolt grades listed
//! by the bolt-design clause. The table is a compile-time constant; there is
//! no way to add or change grades at runtime.
//!
//! | Grade | fuf (MPa) |
//! |-------|-----------|
//! | 4.6   | 400       |
//! | 8.8   | 830       |

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::errors::{CalcError, CalcResult};
use crate::units::MegaPascals;

/// Supported bolt property classes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BoltGrade {
    /// Commercial bolt, property class 4.6
    #[serde(rename = "4.6")]
    Grade4_6,
    /// High-strength structural bolt, property class 8.8
    #[serde(rename = "8.8")]
    Grade8_8,
}

impl BoltGrade {
    /// All bolt grades for UI selection
    pub const ALL: [BoltGrade; 2] = [BoltGrade::Grade4_6, BoltGrade::Grade8_8];

    /// Grade identifier as written in the standard (e.g., "8.8")
    pub fn code(&self) -> &'static str {
        match self {
            BoltGrade::Grade4_6 => "4.6",
            BoltGrade::Grade8_8 => "8.8",
        }
    }

    /// Parse from common string representations.
    ///
    /// Accepts the bare class ("8.8"), an optional "Grade"/"Class" prefix and
    /// the snug-tight or tensioned-bearing suffixes ("8.8/S", "8.8/TB").
    pub fn from_str_flexible(s: &str) -> CalcResult<Self> {
        let normalized = s.trim().to_uppercase().replace(' ', "");
        let normalized = normalized
            .strip_prefix("GRADE")
            .or_else(|| normalized.strip_prefix("CLASS"))
            .unwrap_or(normalized.as_str());
        let normalized = normalized
            .strip_suffix("/S")
            .or_else(|| normalized.strip_suffix("/TB"))
            .unwrap_or(normalized);

        match normalized {
            "4.6" => Ok(BoltGrade::Grade4_6),
            "8.8" => Ok(BoltGrade::Grade8_8),
            _ => Err(CalcError::unknown_grade(s)),
        }
    }

    /// Get display name
    pub fn display_name(&self) -> &'static str {
        match self {
            BoltGrade::Grade4_6 => "Grade 4.6",
            BoltGrade::Grade8_8 => "Grade 8.8",
        }
    }

    /// Property table entry for this grade
    pub fn properties(&self) -> BoltGradeProperties {
        // Every variant has exactly one row in GRADE_TABLE.
        match self {
            BoltGrade::Grade4_6 => GRADE_TABLE[0],
            BoltGrade::Grade8_8 => GRADE_TABLE[1],
        }
    }
}

impl FromStr for BoltGrade {
    type Err = CalcError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        BoltGrade::from_str_flexible(s)
    }
}

impl std::fmt::Display for BoltGrade {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Characteristic material properties for a bolt grade
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoltGradeProperties {
    /// Grade this row describes
    pub grade: BoltGrade,
    /// Minimum characteristic tensile strength fuf (MPa)
    pub fuf_mpa: f64,
}

impl BoltGradeProperties {
    /// Get fuf as a typed unit
    pub fn fuf(&self) -> MegaPascals {
        MegaPascals(self.fuf_mpa)
    }
}

/// Grade property table, in `BoltGrade::ALL` order.
pub const GRADE_TABLE: [BoltGradeProperties; 2] = [
    BoltGradeProperties {
        grade: BoltGrade::Grade4_6,
        fuf_mpa: 400.0,
    },
    BoltGradeProperties {
        grade: BoltGrade::Grade8_8,
        fuf_mpa: 830.0,
    },
];

/// Look up the property-table row for a grade identifier.
///
/// # Errors
///
/// `CalcError::UnknownGrade` if the identifier is not a supported grade.
/// No default grade is substituted.
///
/// # Example
///
/// ```rust
/// use bolt_core::materials::lookup_grade_properties;
///
/// let props = lookup_grade_properties("8.8").unwrap();
/// assert_eq!(props.fuf_mpa, 830.0);
/// assert!(lookup_grade_properties("10.9").is_err());
/// ```
pub fn lookup_grade_properties(grade: &str) -> CalcResult<BoltGradeProperties> {
    BoltGrade::from_str_flexible(grade).map(|g| g.properties())
}
