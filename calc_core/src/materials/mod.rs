//! # Materials
//!
//! Material definitions for reinforced-concrete takeoff.
//!
//! - **Concrete**: nominal mix grades (M15…M50) implying fck
//! - **Rebar**: steel grades implying fy, plus bar mass helpers
//! - **MaterialSpec**: the per-element bundle the quantity calculator consumes
//!
//! ## Example
//!
//! ```rust
//! use calc_core::materials::{ConcreteGrade, MaterialSpec, SteelGrade};
//!
//! let spec = MaterialSpec {
//!     concrete_grade: ConcreteGrade::M30,
//!     steel_grade: SteelGrade::Fe500,
//!     ..MaterialSpec::default()
//! };
//! assert_eq!(spec.concrete_grade.fck_mpa(), 30.0);
//! assert!(spec.validate().is_ok());
//! ```

pub mod concrete;
pub mod rebar;

pub use concrete::ConcreteGrade;
pub use rebar::{bar_area_m2, bar_group_weight_kg, unit_weight_kg_per_m, SteelGrade, STEEL_DENSITY_KG_M3};

use serde::{Deserialize, Serialize};

use crate::errors::{CalcResult, Violations};

/// Density of normal-weight reinforced concrete (kg/m³)
pub const CONCRETE_DENSITY_KG_M3: f64 = 2400.0;

/// Admixture family added to the mix
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AdmixtureType {
    #[default]
    None,
    Plasticizer,
    Superplasticizer,
    Retarder,
    Accelerator,
    AirEntraining,
    Waterproofing,
}

impl AdmixtureType {
    pub fn display_name(&self) -> &'static str {
        match self {
            AdmixtureType::None => "None",
            AdmixtureType::Plasticizer => "Plasticizer",
            AdmixtureType::Superplasticizer => "Superplasticizer",
            AdmixtureType::Retarder => "Retarder",
            AdmixtureType::Accelerator => "Accelerator",
            AdmixtureType::AirEntraining => "Air-entraining",
            AdmixtureType::Waterproofing => "Waterproofing",
        }
    }
}

/// Material inputs for one structural element.
///
/// ## JSON Example
///
/// ```json
/// {
///   "concrete_grade": "M25",
///   "concrete_density_kg_m3": 2400.0,
///   "admixture_type": "none",
///   "admixture_percent": 0.0,
///   "steel_grade": "Fe415",
///   "steel_density_kg_m3": 7850.0,
///   "concrete_waste_percent": 5.0,
///   "steel_waste_percent": 3.0
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MaterialSpec {
    pub concrete_grade: ConcreteGrade,
    pub concrete_density_kg_m3: f64,
    #[serde(default)]
    pub admixture_type: AdmixtureType,
    /// Admixture dosage, percent by weight of cement
    #[serde(default)]
    pub admixture_percent: f64,
    pub steel_grade: SteelGrade,
    pub steel_density_kg_m3: f64,
    /// Concrete waste allowance (%)
    pub concrete_waste_percent: f64,
    /// Steel waste allowance (%)
    pub steel_waste_percent: f64,
}

impl Default for MaterialSpec {
    fn default() -> Self {
        MaterialSpec {
            concrete_grade: ConcreteGrade::M25,
            concrete_density_kg_m3: CONCRETE_DENSITY_KG_M3,
            admixture_type: AdmixtureType::None,
            admixture_percent: 0.0,
            steel_grade: SteelGrade::Fe415,
            steel_density_kg_m3: STEEL_DENSITY_KG_M3,
            concrete_waste_percent: 5.0,
            steel_waste_percent: 3.0,
        }
    }
}

impl MaterialSpec {
    /// Multiplier applied to the raw concrete volume
    pub fn concrete_waste_multiplier(&self) -> f64 {
        1.0 + self.concrete_waste_percent / 100.0
    }

    /// Multiplier applied to the raw steel weight
    pub fn steel_waste_multiplier(&self) -> f64 {
        1.0 + self.steel_waste_percent / 100.0
    }

    /// Collect every out-of-range field
    pub fn violations(&self) -> Violations {
        let mut v = Violations::new();
        v.require_positive("concrete_density_kg_m3", self.concrete_density_kg_m3);
        v.require_positive("steel_density_kg_m3", self.steel_density_kg_m3);
        v.require_range("concrete_waste_percent", self.concrete_waste_percent, 0.0, 100.0);
        v.require_range("steel_waste_percent", self.steel_waste_percent, 0.0, 100.0);
        v.require_range("admixture_percent", self.admixture_percent, 0.0, 100.0);
        v
    }

    pub fn validate(&self) -> CalcResult<()> {
        self.violations().into_result()
    }
}
