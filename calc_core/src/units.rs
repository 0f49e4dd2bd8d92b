//! # Unit Types
//!
//! Type-safe wrappers for the handful of units the takeoff works in. They
//! are plain f64 newtypes so JSON stays clean (just numbers).
//!
//! ## Conventions
//!
//! - Geometry input: millimeters (mm)
//! - Bar lengths: meters (m)
//! - Concrete: cubic meters (m³)
//! - Steel: kilograms (kg), densities in kg/m³
//!
//! Imperial output is a display concern only: [`UnitSystem`] carries the
//! fixed factors used to present a result in ft³ / lb.
//!
//! ## Example
//!
//! ```rust
//! use calc_core::units::{Meters, Millimeters};
//!
//! let height = Millimeters(3000.0);
//! let height_m: Meters = height.into();
//! assert_eq!(height_m.0, 3.0);
//! ```

use serde::{Deserialize, Serialize};

/// Cubic millimeters in one cubic meter
pub const MM3_PER_M3: f64 = 1.0e9;

/// Square millimeters in one square meter
pub const MM2_PER_M2: f64 = 1.0e6;

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
// Volume / Mass Units
// ============================================================================

/// Volume in cubic meters
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CubicMeters(pub f64);

impl CubicMeters {
    /// Convert a volume computed from millimeter inputs
    pub fn from_mm3(mm3: f64) -> Self {
        CubicMeters(mm3 / MM3_PER_M3)
    }
}

// ============================================================================
// Display Unit System
// ============================================================================

/// Unit system used when presenting results.
///
/// Calculations always run in metric; these factors only rescale output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnitSystem {
    #[default]
    Metric,
    Imperial,
}

impl UnitSystem {
    /// Multiplier from m³ to the display volume unit
    pub fn volume_factor(&self) -> f64 {
        match self {
            UnitSystem::Metric => 1.0,
            UnitSystem::Imperial => 35.3147,
        }
    }

    /// Multiplier from kg to the display mass unit
    pub fn mass_factor(&self) -> f64 {
        match self {
            UnitSystem::Metric => 1.0,
            UnitSystem::Imperial => 2.20462,
        }
    }

    pub fn volume_label(&self) -> &'static str {
        match self {
            UnitSystem::Metric => "m³",
            UnitSystem::Imperial => "ft³",
        }
    }

    pub fn mass_label(&self) -> &'static str {
        match self {
            UnitSystem::Metric => "kg",
            UnitSystem::Imperial => "lb",
        }
    }
}

macro_rules! impl_value {
    ($($type:ty),*) => {
        $(
            impl $type {
                /// Get the raw f64 value
                pub fn value(self) -> f64 {
                    self.0
                }
            }
        )*
    };
}

impl_value!(Millimeters, Meters, CubicMeters);
