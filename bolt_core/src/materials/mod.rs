//! # Materials Database
//!
//! Material property lookups for structural bolts.
//!
//! ## Example
//!
//! ```rust
//! use bolt_core::materials::BoltGrade;
//!
//! let grade: BoltGrade = "8.8".parse().unwrap();
//! println!("fuf = {} MPa", grade.properties().fuf_mpa);
//! ```

pub mod bolt_grades;

pub use bolt_grades::{lookup_grade_properties, BoltGrade, BoltGradeProperties, GRADE_TABLE};
