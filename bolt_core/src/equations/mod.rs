//! # Bolt Design Equations
//!
//! All normative equations used in the bolt calculations, kept in one place
//! so they can be checked line by line against the standard.
//!
//! ## Modules
//!
//! - [`section`] - Bolt cross-section areas (Ac, Ao)
//! - [`bolt`] - Length reduction factor and shear/tension capacities
//! - [`detailing`] - Pitch and edge-distance limits
//! - [`registry`] - Equation metadata for the audit reference
//!
//! Every function here is total: out-of-range inputs (non-positive diameter,
//! negative length) produce a number, never an error. Range checks belong to
//! `calculations::bolt::BoltInput::validate`.
//!
//! ## References
//!
//! - AS 5100.6:2017 Bridge design, Part 6: Steel and composite construction

pub mod bolt;
pub mod detailing;
pub mod registry;
pub mod section;

pub use bolt::{
    design_capacity,
    length_reduction_factor,
    nominal_shear_capacity,
    nominal_tensile_capacity,
    CAPACITY_FACTOR_PHI,
    SHEAR_STRENGTH_RATIO,
};

pub use detailing::{compute_detailing_limits, DetailingLimits};

pub use section::{compute_areas, minor_diameter_area, shank_area, BoltGeometry, THREAD_ROOT_ALLOWANCE_MM};

pub use registry::{
    CodeReference,
    Equation,
    EquationCategory,
    EquationMetadata,
    EquationTracker,
    EquationUsage,
    Variable,
    ALL_EQUATIONS,
    generate_equations_markdown,
};
