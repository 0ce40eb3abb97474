//! # Bolt Capacity Formulas
//!
//! Nominal shear and tension capacity of a single bolt and the conversion to
//! design capacity. All inputs are mm / MPa; nominal capacities are in N and
//! design capacities in kN.
//!
//! ## Notation
//!
//! - `fuf` = Minimum tensile strength of the bolt, MPa
//! - `kr`  = Reduction factor for the length of a bolted lap connection
//! - `nn`  = Number of shear planes through the threaded region
//! - `nx`  = Number of shear planes through the plain shank
//! - `φ`   = Capacity reduction factor (0.8 for bolts in shear and tension)
//!
//! ## References
//!
//! - AS 5100.6 Clause 12.5: Design of bolts

use crate::equations::section::BoltGeometry;
use crate::units::{KiloNewtons, MegaPascals, Newtons, SquareMillimetres};

/// Capacity reduction factor φ for bolts in shear or tension
pub const CAPACITY_FACTOR_PHI: f64 = 0.8;

/// Ratio of bolt shear strength to tensile strength
pub const SHEAR_STRENGTH_RATIO: f64 = 0.62;

/// Connection length (mm) below which kr = 1.0
pub const KR_FULL_CAPACITY_LENGTH_MM: f64 = 300.0;

/// Connection length (mm) above which kr is held at its minimum
pub const KR_MIN_CAPACITY_LENGTH_MM: f64 = 1300.0;

/// Lower bound of kr
pub const KR_MIN: f64 = 0.75;

/// Reduction factor kr for long bolted lap connections
///
/// ```text
///  kr
///  1.00 ────────┐
///               │╲
///               │  ╲
///  0.75         │    ╲──────────
///               300  1300        L (mm)
/// ```
///
/// # Formula
/// - L < 300: kr = 1.0
/// - 300 ≤ L ≤ 1300: kr = 1.075 - L/4000
/// - L > 1300: kr = 0.75
///
/// The linear segment is evaluated as (4300 - L)/4000, which is the same
/// line and lands exactly on 1.0 and 0.75 at the breakpoints.
///
/// Any finite length is accepted, including negative values.
///
/// # Example
/// ```rust
/// use bolt_core::equations::bolt::length_reduction_factor;
///
/// assert_eq!(length_reduction_factor(0.0), 1.0);
/// assert_eq!(length_reduction_factor(800.0), 0.875);
/// assert_eq!(length_reduction_factor(2000.0), 0.75);
/// ```
pub fn length_reduction_factor(length_mm: f64) -> f64 {
    if length_mm < KR_FULL_CAPACITY_LENGTH_MM {
        1.0
    } else if length_mm > KR_MIN_CAPACITY_LENGTH_MM {
        KR_MIN
    } else {
        (4300.0 - length_mm) / 4000.0
    }
}

/// Nominal shear capacity of a bolt
///
/// # Formula
/// Vf = 0.62 · fuf · kr · (nn·Ac + nx·Ao)
///
/// # Returns
/// Nominal capacity in N. Zero when both plane counts are zero.
pub fn nominal_shear_capacity(
    fuf: MegaPascals,
    kr: f64,
    threaded_planes: u32,
    unthreaded_planes: u32,
    geometry: &BoltGeometry,
) -> Newtons {
    let shear_area = geometry.ac() * f64::from(threaded_planes) + geometry.ao() * f64::from(unthreaded_planes);
    shear_area * MegaPascals(SHEAR_STRENGTH_RATIO * fuf.value() * kr)
}

/// Nominal tension capacity of a bolt
///
/// # Formula
/// Ntf = Ac · fuf
///
/// # Returns
/// Nominal capacity in N
#[inline]
pub fn nominal_tensile_capacity(fuf: MegaPascals, ac: SquareMillimetres) -> Newtons {
    ac * fuf
}

/// Design capacity φ·N converted to kN
///
/// # Example
/// ```rust
/// use bolt_core::equations::bolt::design_capacity;
/// use bolt_core::units::Newtons;
///
/// assert_eq!(design_capacity(Newtons(100_000.0)).0, 80.0);
/// ```
#[inline]
pub fn design_capacity(nominal: Newtons) -> KiloNewtons {
    (nominal * CAPACITY_FACTOR_PHI).into()
}
