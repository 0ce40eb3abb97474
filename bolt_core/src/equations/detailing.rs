//! # Bolt Detailing Limits
//!
//! Pitch and edge-distance limits that depend only on the nominal bolt
//! diameter. These are reported alongside capacities for the designer to
//! check; nothing here enforces them.
//!
//! Non-positive diameters are not handled specially and produce
//! non-positive limits.

use serde::{Deserialize, Serialize};

/// Absolute ceiling on bolt pitch (mm)
pub const MAX_PITCH_CAP_MM: f64 = 200.0;

/// Geometric detailing limits for one bolt diameter, all in mm.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DetailingLimits {
    /// Minimum centre-to-centre pitch, 2.5d
    pub min_pitch_mm: f64,
    /// Maximum pitch, min(200, 32d)
    pub max_pitch_mm: f64,
    /// Minimum edge distance to a sheared or hand flame cut edge, 1.75d
    pub min_edge_sheared_mm: f64,
    /// Minimum edge distance to a rolled plate, machine flame cut, sawn or planed edge, 1.5d
    pub min_edge_rolled_mm: f64,
    /// Minimum edge distance to the rolled edge of a rolled section, 1.25d
    pub min_edge_rolled_section_mm: f64,
}

/// Minimum pitch: 2.5d
#[inline]
pub fn min_pitch(d: f64) -> f64 {
    2.5 * d
}

/// Maximum pitch: the lesser of 32d and 200 mm
#[inline]
pub fn max_pitch(d: f64) -> f64 {
    (32.0 * d).min(MAX_PITCH_CAP_MM)
}

/// Derive all detailing limits from the nominal diameter.
///
/// # Example
/// ```rust
/// use bolt_core::equations::detailing::compute_detailing_limits;
///
/// let limits = compute_detailing_limits(20.0);
/// assert_eq!(limits.min_pitch_mm, 50.0);
/// assert_eq!(limits.max_pitch_mm, 200.0);
/// ```
pub fn compute_detailing_limits(d: f64) -> DetailingLimits {
    DetailingLimits {
        min_pitch_mm: min_pitch(d),
        max_pitch_mm: max_pitch(d),
        min_edge_sheared_mm: 1.75 * d,
        min_edge_rolled_mm: 1.5 * d,
        min_edge_rolled_section_mm: 1.25 * d,
    }
}
