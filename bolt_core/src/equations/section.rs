//! # Bolt Cross-Section Formulas
//!
//! Areas of a bolt cross-section used in the capacity equations.
//!
//! ## Notation
//!
//! - `d`  = Nominal (shank) diameter, mm
//! - `Ac` = Minor diameter area at the thread root, mm²
//! - `Ao` = Plain shank area, mm²
//!
//! The minor diameter is approximated as `d - 1 mm` for every bolt size
//! rather than read from a thread table. Diameters of 1 mm or less give a
//! zero or negative-root `Ac` and are physically meaningless; rejecting them
//! is left to the caller (see `BoltInput::validate`).

use serde::{Deserialize, Serialize};

use crate::units::SquareMillimetres;

/// Allowance subtracted from the nominal diameter to reach the thread root (mm)
pub const THREAD_ROOT_ALLOWANCE_MM: f64 = 1.0;

/// Derived cross-sectional areas for one nominal diameter.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoltGeometry {
    /// Minor diameter area Ac (mm²)
    pub ac_mm2: f64,
    /// Nominal shank area Ao (mm²)
    pub ao_mm2: f64,
}

impl BoltGeometry {
    /// Get Ac as a typed unit
    pub fn ac(&self) -> SquareMillimetres {
        SquareMillimetres(self.ac_mm2)
    }

    /// Get Ao as a typed unit
    pub fn ao(&self) -> SquareMillimetres {
        SquareMillimetres(self.ao_mm2)
    }
}

/// Calculate the minor diameter (thread root) area
///
/// ```text
///      ┌──┬──┬──┬──┐   ← thread crests (d)
///      │▓▓▓▓▓▓▓▓▓▓│   ← root ≈ d - 1
///      └──┴──┴──┴──┘
/// ```
///
/// # Formula
/// Ac = π(d - 1)²/4
///
/// # Example
/// ```rust
/// use bolt_core::equations::section::minor_diameter_area;
///
/// let ac = minor_diameter_area(20.0);
/// assert!((ac - 283.5287).abs() < 0.001);
/// ```
#[inline]
pub fn minor_diameter_area(d: f64) -> f64 {
    let root = d - THREAD_ROOT_ALLOWANCE_MM;
    std::f64::consts::PI * root * root / 4.0
}

/// Calculate the plain shank area
///
/// # Formula
/// Ao = πd²/4
///
/// # Example
/// ```rust
/// use bolt_core::equations::section::shank_area;
///
/// let ao = shank_area(20.0);
/// assert!((ao - 314.159).abs() < 0.001);
/// ```
#[inline]
pub fn shank_area(d: f64) -> f64 {
    std::f64::consts::PI * d * d / 4.0
}

/// Derive both areas from the nominal diameter.
///
/// No rounding is applied; full precision is carried into the capacity
/// equations.
pub fn compute_areas(d: f64) -> BoltGeometry {
    BoltGeometry {
        ac_mm2: minor_diameter_area(d),
        ao_mm2: shank_area(d),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::PI;

    fn rel_eq(a: f64, b: f64) -> bool {
        (a - b).abs() <= 1e-9 * b.abs().max(1.0)
    }

    #[test]
    fn test_minor_diameter_area_m20() {
        assert!(rel_eq(minor_diameter_area(20.0), PI * 19.0 * 19.0 / 4.0));
    }

    #[test]
    fn test_shank_area_m24() {
        assert!(rel_eq(shank_area(24.0), PI * 576.0 / 4.0));
    }

    #[test]
    fn test_minor_area_less_than_shank_area() {
        for d in [1.5, 12.0, 16.0, 20.0, 24.0, 30.0, 36.0] {
            let g = compute_areas(d);
            assert!(g.ac_mm2 > 0.0);
            assert!(g.ac_mm2 < g.ao_mm2, "Ac >= Ao for d = {}", d);
        }
    }

    #[test]
    fn test_diameter_at_allowance_gives_zero_root_area() {
        let g = compute_areas(1.0);
        assert_eq!(g.ac_mm2, 0.0);
        assert!(g.ao_mm2 > 0.0);
    }

    #[test]
    fn test_typed_accessors() {
        let g = compute_areas(16.0);
        assert_eq!(g.ac().value(), g.ac_mm2);
        assert_eq!(g.ao().value(), g.ao_mm2);
    }
}
