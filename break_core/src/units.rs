//! # Unit Types
//!
//! Newtype wrappers for the handful of units the estimator mixes. Breaking
//! forces are quoted in US customary units (lbf, psi, in²) while the fragment
//! fall model is worked in SI (mm, m, kg, N, s), so the conversions between
//! the two live here and nowhere else.
//!
//! ## Example
//!
//! ```rust
//! use break_core::units::{Meters, Millimeters, Newtons, Pounds};
//!
//! let gap: Meters = Millimeters(1.52).into();
//! assert!((gap.0 - 0.00152).abs() < 1e-12);
//!
//! let force: Pounds = Newtons(44.48).into();
//! assert!((force.0 - 10.0).abs() < 1e-9);
//! ```

use serde::{Deserialize, Serialize};
use std::ops::Div;

/// Standard gravity used by the fall model (m/s²)
pub const GRAVITY_M_PER_S2: f64 = 9.8;

/// Newtons per pound-force, as used by the empirical force tables
pub const NEWTONS_PER_LBF: f64 = 4.448;

// ============================================================================
// Length Units
// ============================================================================

/// Length in millimeters
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Millimeters(pub f64);

/// Length in meters
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Meters(pub f64);

impl From<Millimeters> for Meters {
    fn from(mm: Millimeters) -> Self {
        Meters(mm.0 / 1000.0)
    }
}

impl From<Meters> for Millimeters {
    fn from(m: Meters) -> Self {
        Millimeters(m.0 * 1000.0)
    }
}

// ============================================================================
// Force Units
// ============================================================================

/// Force in pounds-force
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Pounds(pub f64);

/// Force in newtons
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Newtons(pub f64);

impl From<Newtons> for Pounds {
    fn from(n: Newtons) -> Self {
        Pounds(n.0 / NEWTONS_PER_LBF)
    }
}

impl From<Pounds> for Newtons {
    fn from(lb: Pounds) -> Self {
        Newtons(lb.0 * NEWTONS_PER_LBF)
    }
}

// ============================================================================
// Area and Stress Units
// ============================================================================

/// Area in square inches
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SqIn(pub f64);

/// Stress in pounds per square inch (psi)
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Psi(pub f64);

/// Force spread over a contact area gives pressure
impl Div<SqIn> for Pounds {
    type Output = Psi;

    fn div(self, area: SqIn) -> Psi {
        Psi(self.0 / area.0)
    }
}

// ============================================================================
// Time and Mass
// ============================================================================

/// Duration in seconds
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Seconds(pub f64);

/// Mass in kilograms
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Kilograms(pub f64);
