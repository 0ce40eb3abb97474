//! # Unit Types
//!
//! Type-safe wrappers for the SI units used by the bolt calculations. These
//! are plain f64 newtypes that serialize as bare numbers.
//!
//! ## Unit System
//!
//! Everything is millimetres, MPa and Newtons in, kN out. No conversion to or
//! from other unit systems is performed.
//! - Length: millimetres (mm)
//! - Area: square millimetres (mm²)
//! - Stress: megapascals (MPa = N/mm²)
//! - Force: Newtons (N), kilonewtons (kN = 1000 N)
//!
//! ## Example
//!
//! ```rust
//! use bolt_core::units::{KiloNewtons, MegaPascals, Newtons, SquareMillimetres};
//!
//! let force: Newtons = SquareMillimetres(100.0) * MegaPascals(830.0);
//! let kn: KiloNewtons = force.into();
//! assert_eq!(kn.0, 83.0);
//! ```

use serde::{Deserialize, Serialize};
use std::ops::{Add, Div, Mul, Sub};

// ============================================================================
// Area
// ============================================================================

/// Area in square millimetres
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SquareMillimetres(pub f64);

// ============================================================================
// Stress
// ============================================================================

/// Stress in megapascals (N/mm²)
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MegaPascals(pub f64);

// ============================================================================
// Force
// ============================================================================

/// Force in Newtons
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Newtons(pub f64);

/// Force in kilonewtons (1 kN = 1000 N)
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct KiloNewtons(pub f64);

impl From<Newtons> for KiloNewtons {
    fn from(n: Newtons) -> Self {
        KiloNewtons(n.0 / 1000.0)
    }
}

/// mm² × N/mm² = N
impl Mul<MegaPascals> for SquareMillimetres {
    type Output = Newtons;
    fn mul(self, rhs: MegaPascals) -> Newtons {
        Newtons(self.0 * rhs.0)
    }
}

// ============================================================================
// Arithmetic Implementations (macro to reduce boilerplate)
// ============================================================================

macro_rules! impl_arithmetic {
    ($type:ty) => {
        impl Add for $type {
            type Output = Self;
            fn add(self, rhs: Self) -> Self::Output {
                Self(self.0 + rhs.0)
            }
        }

        impl Sub for $type {
            type Output = Self;
            fn sub(self, rhs: Self) -> Self::Output {
                Self(self.0 - rhs.0)
            }
        }

        impl Mul<f64> for $type {
            type Output = Self;
            fn mul(self, rhs: f64) -> Self::Output {
                Self(self.0 * rhs)
            }
        }

        impl Div<f64> for $type {
            type Output = Self;
            fn div(self, rhs: f64) -> Self::Output {
                Self(self.0 / rhs)
            }
        }

        impl $type {
            /// Get the raw f64 value
            pub fn value(self) -> f64 {
                self.0
            }

            /// Create from raw f64 value
            pub fn new(value: f64) -> Self {
                Self(value)
            }
        }
    };
}

impl_arithmetic!(SquareMillimetres);
impl_arithmetic!(MegaPascals);
impl_arithmetic!(Newtons);
impl_arithmetic!(KiloNewtons);
