//! Reinforcing Steel
//!
//! Steel grades (yield strength fy) and bar mass helpers shared by the
//! quantity calculator and the bar bending schedule.

use std::f64::consts::PI;

use serde::{Deserialize, Serialize};

use crate::errors::{CalcError, CalcResult};
use crate::units::MM2_PER_M2;

/// Density of reinforcing steel (kg/m³)
pub const STEEL_DENSITY_KG_M3: f64 = 7850.0;

/// Reinforcing steel grade
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum SteelGrade {
    /// Mild steel, fy = 250 MPa (IS 432)
    Fe250,
    /// HYSD bars, fy = 415 MPa (IS 1786)
    #[default]
    Fe415,
    /// HYSD bars, fy = 500 MPa (IS 1786)
    Fe500,
    /// HYSD bars, fy = 550 MPa (IS 1786)
    Fe550,
    /// ASTM A615 Grade 60, fy = 420 MPa
    #[serde(rename = "Grade60")]
    Grade60,
    /// EN 10080 B500, fy = 500 MPa
    B500,
}

impl SteelGrade {
    pub const ALL: [SteelGrade; 6] = [
        SteelGrade::Fe250,
        SteelGrade::Fe415,
        SteelGrade::Fe500,
        SteelGrade::Fe550,
        SteelGrade::Grade60,
        SteelGrade::B500,
    ];

    /// Characteristic yield strength fy (MPa)
    pub fn fy_mpa(&self) -> f64 {
        match self {
            SteelGrade::Fe250 => 250.0,
            SteelGrade::Fe415 => 415.0,
            SteelGrade::Fe500 => 500.0,
            SteelGrade::Fe550 => 550.0,
            SteelGrade::Grade60 => 420.0,
            SteelGrade::B500 => 500.0,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            SteelGrade::Fe250 => "Fe250",
            SteelGrade::Fe415 => "Fe415",
            SteelGrade::Fe500 => "Fe500",
            SteelGrade::Fe550 => "Fe550",
            SteelGrade::Grade60 => "Grade 60",
            SteelGrade::B500 => "B500",
        }
    }

    /// Parse from common string representations
    pub fn from_str_flexible(s: &str) -> CalcResult<Self> {
        match s.to_uppercase().replace([' ', '-', '_'], "").as_str() {
            "FE250" | "MS" => Ok(SteelGrade::Fe250),
            "FE415" => Ok(SteelGrade::Fe415),
            "FE500" => Ok(SteelGrade::Fe500),
            "FE550" => Ok(SteelGrade::Fe550),
            "GRADE60" | "GR60" | "A615GR60" => Ok(SteelGrade::Grade60),
            "B500" | "B500B" | "B500C" => Ok(SteelGrade::B500),
            _ => Err(CalcError::material_not_found(s)),
        }
    }
}

impl std::fmt::Display for SteelGrade {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Cross-sectional area of one bar, A = π(d/2)², in m²
pub fn bar_area_m2(diameter_mm: f64) -> f64 {
    PI * (diameter_mm / 2.0).powi(2) / MM2_PER_M2
}

/// Mass per meter of one bar (kg/m)
pub fn unit_weight_kg_per_m(diameter_mm: f64, density_kg_m3: f64) -> f64 {
    bar_area_m2(diameter_mm) * density_kg_m3
}

/// Mass of `count` bars of the given length (kg)
pub fn bar_group_weight_kg(count: u32, diameter_mm: f64, length_m: f64, density_kg_m3: f64) -> f64 {
    count as f64 * unit_weight_kg_per_m(diameter_mm, density_kg_m3) * length_m
}
