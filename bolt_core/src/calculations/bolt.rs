//! # Bolt Calculation
//!
//! Design shear and tension capacity of a single bolt, plus the detailing
//! limits for its diameter.
//!
//! ## Flow
//!
//! grade + dimensions → property lookup → Ac/Ao and kr → nominal capacity →
//! φ and N→kN conversion. Nothing is cached; every call recomputes from its
//! inputs.
//!
//! ## Example
//!
//! ```rust
//! use bolt_core::calculations::bolt::{calculate, BoltInput};
//!
//! let input = BoltInput {
//!     label: "Splice B1".to_string(),
//!     grade: "8.8".to_string(),
//!     diameter_mm: 20.0,
//!     threaded_length_mm: 0.0,
//!     threaded_planes: 1,
//!     unthreaded_planes: 0,
//! };
//!
//! let result = calculate(&input).unwrap();
//! assert!((result.shear_capacity_kn - 116.72).abs() < 0.01);
//! assert!((result.tensile_capacity_kn - 188.26).abs() < 0.01);
//! ```

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::equations::bolt::{
    design_capacity, length_reduction_factor, nominal_shear_capacity, nominal_tensile_capacity,
};
use crate::equations::detailing::{compute_detailing_limits, DetailingLimits};
use crate::equations::registry::{Equation, EquationTracker};
use crate::equations::section::{compute_areas, BoltGeometry, THREAD_ROOT_ALLOWANCE_MM};
use crate::errors::{CalcError, CalcResult};
use crate::materials::BoltGrade;
use crate::units::KiloNewtons;

/// Common metric bolt diameters (mm) offered for selection
pub const STANDARD_DIAMETERS_MM: [f64; 6] = [12.0, 16.0, 20.0, 24.0, 30.0, 36.0];

/// Input parameters for a bolt capacity calculation.
///
/// ## JSON Example
///
/// ```json
/// {
///   "label": "Splice B1",
///   "grade": "8.8",
///   "diameter_mm": 20.0,
///   "threaded_length_mm": 0.0,
///   "threaded_planes": 1,
///   "unthreaded_planes": 0
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoltInput {
    /// User label for this calculation (e.g., "Splice B1")
    #[serde(default)]
    pub label: String,

    /// Bolt grade identifier as entered (e.g., "8.8", "4.6/S")
    pub grade: String,

    /// Nominal bolt diameter d (mm)
    pub diameter_mm: f64,

    /// Length of the bolted lap connection used for kr (mm)
    pub threaded_length_mm: f64,

    /// Number of shear planes through the threaded region (nn)
    pub threaded_planes: u32,

    /// Number of shear planes through the plain shank (nx)
    pub unthreaded_planes: u32,
}

impl BoltInput {
    /// Validate input parameters and parse the grade.
    ///
    /// This is the only place range checks happen; the equations themselves
    /// accept any number.
    pub fn validate(&self) -> CalcResult<BoltGrade> {
        let grade = BoltGrade::from_str_flexible(&self.grade)?;

        if !self.diameter_mm.is_finite() || self.diameter_mm <= THREAD_ROOT_ALLOWANCE_MM {
            return Err(CalcError::invalid_input(
                "diameter_mm",
                self.diameter_mm.to_string(),
                "Diameter must be greater than 1 mm",
            ));
        }
        if !self.threaded_length_mm.is_finite() || self.threaded_length_mm < 0.0 {
            return Err(CalcError::invalid_input(
                "threaded_length_mm",
                self.threaded_length_mm.to_string(),
                "Connection length cannot be negative",
            ));
        }
        Ok(grade)
    }
}

/// Results from a bolt calculation. Values are unrounded.
///
/// ## JSON Example
///
/// ```json
/// {
///   "grade": "8.8",
///   "fuf_mpa": 830.0,
///   "geometry": { "ac_mm2": 283.53, "ao_mm2": 314.16 },
///   "kr": 1.0,
///   "vf_n": 145903.89,
///   "ntf_n": 235328.85,
///   "shear_capacity_kn": 116.72,
///   "tensile_capacity_kn": 188.26,
///   "detailing": { "min_pitch_mm": 50.0, "max_pitch_mm": 200.0, "...": "..." },
///   "equations": ["MinorDiameterArea", "..."]
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoltResult {
    /// Parsed bolt grade
    pub grade: BoltGrade,

    /// Minimum tensile strength fuf (MPa)
    pub fuf_mpa: f64,

    /// Minor diameter and shank areas
    pub geometry: BoltGeometry,

    /// Lap connection length reduction factor
    pub kr: f64,

    /// Nominal shear capacity Vf (N)
    pub vf_n: f64,

    /// Nominal tension capacity Ntf (N)
    pub ntf_n: f64,

    /// Design shear capacity φVf (kN)
    pub shear_capacity_kn: f64,

    /// Design tension capacity φNtf (kN)
    pub tensile_capacity_kn: f64,

    /// Pitch and edge-distance limits
    pub detailing: DetailingLimits,

    /// Equations applied, in order of first use
    #[serde(default)]
    pub equations: Vec<Equation>,
}

/// Design shear capacity φVf for an already-parsed grade.
pub fn shear_capacity(
    grade: BoltGrade,
    diameter_mm: f64,
    threaded_length_mm: f64,
    threaded_planes: u32,
    unthreaded_planes: u32,
) -> KiloNewtons {
    let fuf = grade.properties().fuf();
    let geometry = compute_areas(diameter_mm);
    let kr = length_reduction_factor(threaded_length_mm);
    design_capacity(nominal_shear_capacity(fuf, kr, threaded_planes, unthreaded_planes, &geometry))
}

/// Design tension capacity φNtf for an already-parsed grade.
pub fn tensile_capacity(grade: BoltGrade, diameter_mm: f64) -> KiloNewtons {
    let fuf = grade.properties().fuf();
    let geometry = compute_areas(diameter_mm);
    design_capacity(nominal_tensile_capacity(fuf, geometry.ac()))
}

/// Design shear capacity (kN) for a grade identifier.
///
/// # Errors
///
/// `CalcError::UnknownGrade` if the grade is not in the property table.
///
/// # Example
///
/// ```rust
/// use bolt_core::calculations::bolt::compute_shear_capacity;
///
/// let kn = compute_shear_capacity("8.8", 20.0, 0.0, 1, 0).unwrap();
/// assert!((kn - 116.72).abs() < 0.01);
/// assert!(compute_shear_capacity("10.9", 20.0, 0.0, 1, 0).is_err());
/// ```
pub fn compute_shear_capacity(
    grade: &str,
    diameter_mm: f64,
    threaded_length_mm: f64,
    threaded_planes: u32,
    unthreaded_planes: u32,
) -> CalcResult<f64> {
    let grade = BoltGrade::from_str_flexible(grade)?;
    Ok(shear_capacity(grade, diameter_mm, threaded_length_mm, threaded_planes, unthreaded_planes).value())
}

/// Design tension capacity (kN) for a grade identifier.
///
/// # Errors
///
/// `CalcError::UnknownGrade` if the grade is not in the property table.
pub fn compute_tensile_capacity(grade: &str, diameter_mm: f64) -> CalcResult<f64> {
    let grade = BoltGrade::from_str_flexible(grade)?;
    Ok(tensile_capacity(grade, diameter_mm).value())
}

/// Validate the input and evaluate every quantity for one bolt.
///
/// # Returns
///
/// * `Ok(BoltResult)` - Calculation results
/// * `Err(CalcError::UnknownGrade)` - Grade not in the property table
/// * `Err(CalcError::InvalidInput)` - Diameter or length out of range
pub fn calculate(input: &BoltInput) -> CalcResult<BoltResult> {
    let grade = input.validate()?;
    let mut tracker = EquationTracker::new();

    let props = grade.properties();
    let geometry = compute_areas(input.diameter_mm);
    tracker.record(Equation::MinorDiameterArea, "thread root area");
    tracker.record(Equation::ShankArea, "shank area");

    let kr = length_reduction_factor(input.threaded_length_mm);
    tracker.record(Equation::LengthReductionFactor, "connection length");

    let vf = nominal_shear_capacity(
        props.fuf(),
        kr,
        input.threaded_planes,
        input.unthreaded_planes,
        &geometry,
    );
    tracker.record(Equation::NominalShearCapacity, "shear");

    let ntf = nominal_tensile_capacity(props.fuf(), geometry.ac());
    tracker.record(Equation::NominalTensileCapacity, "tension");

    let shear_capacity_kn = design_capacity(vf).value();
    let tensile_capacity_kn = design_capacity(ntf).value();
    tracker.record(Equation::DesignCapacity, "shear and tension");

    let detailing = compute_detailing_limits(input.diameter_mm);
    tracker.record(Equation::MinimumPitch, "detailing");
    tracker.record(Equation::MaximumPitch, "detailing");
    tracker.record(Equation::MinimumEdgeDistance, "detailing");

    debug!(
        label = %input.label,
        grade = %grade,
        diameter_mm = input.diameter_mm,
        kr,
        shear_capacity_kn,
        tensile_capacity_kn,
        "evaluated bolt"
    );

    Ok(BoltResult {
        grade,
        fuf_mpa: props.fuf_mpa,
        geometry,
        kr,
        vf_n: vf.value(),
        ntf_n: ntf.value(),
        shear_capacity_kn,
        tensile_capacity_kn,
        detailing,
        equations: tracker.unique_equations(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::equations::bolt::{CAPACITY_FACTOR_PHI, SHEAR_STRENGTH_RATIO};
    use proptest::prelude::*;

    fn approx_eq(a: f64, b: f64, tol: f64) -> bool {
        (a - b).abs() < tol
    }

    fn test_bolt() -> BoltInput {
        BoltInput {
            label: "Test Bolt".to_string(),
            grade: "8.8".to_string(),
            diameter_mm: 20.0,
            threaded_length_mm: 0.0,
            threaded_planes: 1,
            unthreaded_planes: 0,
        }
    }

    #[test]
    fn test_m20_88_single_threaded_plane() {
        let result = calculate(&test_bolt()).unwrap();

        // Ac = π·19²/4 = 283.529 mm²
        assert!(approx_eq(result.geometry.ac_mm2, 283.529, 0.001));
        assert_eq!(result.kr, 1.0);
        // Vf = 0.62 × 830 × 283.529 = 145,903.9 N, φVf = 116.72 kN
        assert!(approx_eq(result.vf_n, 145_903.9, 0.1));
        assert!(approx_eq(result.shear_capacity_kn, 116.723, 0.001));
        // Ntf = 283.529 × 830 = 235,328.9 N, φNtf = 188.26 kN
        assert!(approx_eq(result.ntf_n, 235_328.9, 0.1));
        assert!(approx_eq(result.tensile_capacity_kn, 188.263, 0.001));
    }

    #[test]
    fn test_detailing_in_result() {
        let result = calculate(&test_bolt()).unwrap();
        assert_eq!(result.detailing.min_pitch_mm, 50.0);
        assert_eq!(result.detailing.max_pitch_mm, 200.0);
        assert_eq!(result.detailing.min_edge_sheared_mm, 35.0);
        assert_eq!(result.detailing.min_edge_rolled_mm, 30.0);
        assert_eq!(result.detailing.min_edge_rolled_section_mm, 25.0);
    }

    #[test]
    fn test_result_lists_equations() {
        let result = calculate(&test_bolt()).unwrap();
        assert_eq!(result.equations.len(), 9);
        assert_eq!(result.equations[0], Equation::MinorDiameterArea);
    }

    #[test]
    fn test_matches_string_api() {
        let input = BoltInput {
            grade: "4.6".to_string(),
            diameter_mm: 24.0,
            threaded_length_mm: 650.0,
            threaded_planes: 1,
            unthreaded_planes: 1,
            ..test_bolt()
        };
        let result = calculate(&input).unwrap();
        let shear = compute_shear_capacity("4.6", 24.0, 650.0, 1, 1).unwrap();
        let tension = compute_tensile_capacity("4.6", 24.0).unwrap();
        assert_eq!(result.shear_capacity_kn, shear);
        assert_eq!(result.tensile_capacity_kn, tension);
    }

    #[test]
    fn test_unknown_grade_from_every_entry_point() {
        let err = CalcError::unknown_grade("10.9");
        assert_eq!(compute_shear_capacity("10.9", 20.0, 0.0, 1, 0).unwrap_err(), err);
        assert_eq!(compute_tensile_capacity("10.9", 20.0).unwrap_err(), err);

        let mut input = test_bolt();
        input.grade = "10.9".to_string();
        assert_eq!(calculate(&input).unwrap_err(), err);
    }

    #[test]
    fn test_no_shear_planes_gives_zero_shear() {
        let mut input = test_bolt();
        input.threaded_planes = 0;
        let result = calculate(&input).unwrap();
        assert_eq!(result.shear_capacity_kn, 0.0);
        assert!(result.tensile_capacity_kn > 0.0);
    }

    #[test]
    fn test_invalid_diameter() {
        let mut input = test_bolt();
        input.diameter_mm = 1.0;
        assert!(matches!(
            calculate(&input),
            Err(CalcError::InvalidInput { ref field, .. }) if field == "diameter_mm"
        ));

        input.diameter_mm = f64::NAN;
        assert!(calculate(&input).is_err());
    }

    #[test]
    fn test_invalid_length() {
        let mut input = test_bolt();
        input.threaded_length_mm = -10.0;
        assert!(matches!(
            calculate(&input),
            Err(CalcError::InvalidInput { ref field, .. }) if field == "threaded_length_mm"
        ));
    }

    #[test]
    fn test_long_connection_reduces_shear_only() {
        let short = calculate(&test_bolt()).unwrap();
        let mut input = test_bolt();
        input.threaded_length_mm = 1500.0;
        let long = calculate(&input).unwrap();

        assert_eq!(long.kr, 0.75);
        assert!(approx_eq(long.shear_capacity_kn, 0.75 * short.shear_capacity_kn, 1e-9));
        assert_eq!(long.tensile_capacity_kn, short.tensile_capacity_kn);
    }

    #[test]
    fn test_serialization() {
        let input = test_bolt();
        let json = serde_json::to_string_pretty(&input).unwrap();
        let roundtrip: BoltInput = serde_json::from_str(&json).unwrap();
        assert_eq!(input, roundtrip);

        let result = calculate(&input).unwrap();
        let json = serde_json::to_string(&result).unwrap();
        assert!(json.contains("\"grade\":\"8.8\""));
        let roundtrip: BoltResult = serde_json::from_str(&json).unwrap();
        assert_eq!(result, roundtrip);
    }

    #[test]
    fn test_repeated_calls_are_bit_identical() {
        let input = test_bolt();
        let first = calculate(&input).unwrap();
        for _ in 0..10 {
            let again = calculate(&input).unwrap();
            assert_eq!(first.shear_capacity_kn.to_bits(), again.shear_capacity_kn.to_bits());
            assert_eq!(first.tensile_capacity_kn.to_bits(), again.tensile_capacity_kn.to_bits());
        }
    }

    fn any_grade() -> impl Strategy<Value = BoltGrade> {
        prop_oneof![Just(BoltGrade::Grade4_6), Just(BoltGrade::Grade8_8)]
    }

    proptest! {
        #[test]
        fn prop_minor_area_below_shank_area(d in 1.001f64..200.0) {
            let g = compute_areas(d);
            prop_assert!(g.ac_mm2 > 0.0);
            prop_assert!(g.ac_mm2 < g.ao_mm2);
        }

        #[test]
        fn prop_kr_non_increasing_and_bounded(a in -500.0f64..3000.0, b in -500.0f64..3000.0) {
            let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
            let (kr_lo, kr_hi) = (length_reduction_factor(lo), length_reduction_factor(hi));
            prop_assert!(kr_hi <= kr_lo);
            prop_assert!((0.75..=1.0).contains(&kr_lo));
            prop_assert!((0.75..=1.0).contains(&kr_hi));
        }

        #[test]
        fn prop_shear_linear_in_threaded_planes(
            grade in any_grade(),
            d in 10.0f64..48.0,
            l in 0.0f64..2000.0,
            nt in 0u32..4,
            nu in 0u32..4,
        ) {
            let fuf = grade.properties().fuf_mpa;
            let step = CAPACITY_FACTOR_PHI * SHEAR_STRENGTH_RATIO * fuf
                * length_reduction_factor(l) * compute_areas(d).ac_mm2 / 1000.0;
            let base = shear_capacity(grade, d, l, nt, nu).value();
            let next = shear_capacity(grade, d, l, nt + 1, nu).value();
            prop_assert!((next - base - step).abs() < 1e-9 * next.max(1.0));
        }

        #[test]
        fn prop_tension_ignores_length_and_planes(
            grade in any_grade(),
            d in 10.0f64..48.0,
            l in 0.0f64..2000.0,
            nt in 0u32..4,
            nu in 0u32..4,
        ) {
            let base = BoltInput {
                label: String::new(),
                grade: grade.code().to_string(),
                diameter_mm: d,
                threaded_length_mm: 0.0,
                threaded_planes: 0,
                unthreaded_planes: 0,
            };
            let varied = BoltInput {
                threaded_length_mm: l,
                threaded_planes: nt,
                unthreaded_planes: nu,
                ..base.clone()
            };
            let a = calculate(&base).unwrap();
            let b = calculate(&varied).unwrap();
            prop_assert_eq!(a.tensile_capacity_kn.to_bits(), b.tensile_capacity_kn.to_bits());
        }
    }
}
