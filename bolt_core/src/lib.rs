//! # bolt_core - Bolt Capacity Calculation Engine
//!
//! `bolt_core` computes the design shear and tension capacity of structural
//! bolts and the associated pitch and edge-distance limits, following the
//! bolt-design clause of the AS 5100.6 bridge design standard.
//!
//! ## Design Philosophy
//!
//! - **Stateless**: Pure functions, no shared mutable state, safe to call from any thread
//! - **Full precision**: Nothing is rounded until display or export
//! - **Fail fast**: Unknown grades are rejected at the lookup boundary
//! - **JSON-First**: Inputs, results and errors implement Serialize/Deserialize
//!
//! ## Quick Start
//!
//! ```rust
//! use bolt_core::{compute_shear_capacity, compute_tensile_capacity, compute_detailing_limits};
//!
//! let shear_kn = compute_shear_capacity("8.8", 20.0, 0.0, 1, 0)?;
//! let tension_kn = compute_tensile_capacity("8.8", 20.0)?;
//! let limits = compute_detailing_limits(20.0);
//!
//! assert!((shear_kn - 116.72).abs() < 0.01);
//! assert!((tension_kn - 188.26).abs() < 0.01);
//! assert_eq!(limits.min_pitch_mm, 50.0);
//! # Ok::<(), bolt_core::CalcError>(())
//! ```
//!
//! ## Modules
//!
//! - [`materials`] - Bolt grade property table
//! - [`equations`] - Areas, kr, capacities, detailing limits, equation registry
//! - [`calculations`] - Validated single-bolt calculation
//! - [`project`] - Calculation history container
//! - [`file_io`] - History files with atomic saves and locking
//! - [`export`] - CSV export
//! - [`units`] - Type-safe unit wrappers
//! - [`errors`] - Structured error types

pub mod calculations;
pub mod equations;
pub mod errors;
pub mod export;
pub mod file_io;
pub mod materials;
pub mod project;
pub mod units;

// Re-export commonly used types at crate root for convenience
pub use calculations::{calculate, compute_shear_capacity, compute_tensile_capacity, BoltInput, BoltResult};
pub use equations::{compute_areas, compute_detailing_limits, length_reduction_factor, BoltGeometry, DetailingLimits};
pub use errors::{CalcError, CalcResult};
pub use export::{export_history_csv, write_history_csv};
pub use file_io::{load_or_create, load_project, save_project, FileLock};
pub use materials::{lookup_grade_properties, BoltGrade, BoltGradeProperties};
pub use project::{GlobalSettings, Project, ProjectMetadata, SavedCalculation};
