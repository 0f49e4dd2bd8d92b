//! # Reinforcement Specifications
//!
//! Bar layouts for columns (main bars + ties) and footings (bottom mats,
//! optional top mat, optional mesh). Diameters, spacings, cover and
//! lengths are in millimeters.

use serde::{Deserialize, Serialize};

use crate::errors::{CalcResult, Violations};

/// Longitudinal bars of a column
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MainBars {
    pub count: u32,
    pub diameter_mm: f64,
    /// Clear cover to the main bars
    pub cover_mm: f64,
    #[serde(default)]
    pub development_length_mm: f64,
}

/// Tie outline
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StirrupShape {
    #[default]
    Rectangular,
    Circular,
    Spiral,
    Diamond,
}

/// Hook at the end of a tie
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HookType {
    #[default]
    Deg135,
    Deg90,
    Deg180,
}

/// Transverse ties of a column
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stirrups {
    #[serde(default)]
    pub shape: StirrupShape,
    pub diameter_mm: f64,
    pub spacing_mm: f64,
    #[serde(default)]
    pub hook_type: HookType,
    #[serde(default)]
    pub hook_length_mm: f64,
    #[serde(default = "default_legs")]
    pub number_of_legs: u32,
}

fn default_legs() -> u32 {
    2
}

/// Column reinforcement
///
/// ## JSON Example
///
/// ```json
/// {
///   "main_bars": { "count": 8, "diameter_mm": 16.0, "cover_mm": 40.0 },
///   "stirrups": { "diameter_mm": 8.0, "spacing_mm": 150.0 }
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnReinforcement {
    pub main_bars: MainBars,
    pub stirrups: Stirrups,
}

impl ColumnReinforcement {
    /// Total area of the longitudinal steel, mm²
    pub fn main_steel_area_mm2(&self) -> f64 {
        self.main_bars.count as f64 * std::f64::consts::PI * (self.main_bars.diameter_mm / 2.0).powi(2)
    }

    pub fn violations(&self) -> Violations {
        let mut v = Violations::new();
        v.require_positive("main_bars.diameter_mm", self.main_bars.diameter_mm);
        v.require_non_negative("main_bars.cover_mm", self.main_bars.cover_mm);
        v.require_non_negative("main_bars.development_length_mm", self.main_bars.development_length_mm);
        v.require_positive("stirrups.diameter_mm", self.stirrups.diameter_mm);
        v.require_positive("stirrups.spacing_mm", self.stirrups.spacing_mm);
        v.require_non_negative("stirrups.hook_length_mm", self.stirrups.hook_length_mm);
        v
    }

    pub fn validate(&self) -> CalcResult<()> {
        self.violations().into_result()
    }
}

/// One direction of a footing bar mat
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BarLayer {
    pub count: u32,
    pub diameter_mm: f64,
    pub spacing_mm: f64,
}

impl BarLayer {
    fn violations(&self) -> Violations {
        let mut v = Violations::new();
        v.require_positive("diameter_mm", self.diameter_mm);
        v.require_positive("spacing_mm", self.spacing_mm);
        v
    }
}

/// Optional top mat
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TopBars {
    pub enabled: bool,
    pub count: u32,
    pub diameter_mm: f64,
    pub spacing_mm: f64,
}

impl Default for TopBars {
    fn default() -> Self {
        TopBars {
            enabled: false,
            count: 0,
            diameter_mm: 10.0,
            spacing_mm: 200.0,
        }
    }
}

/// Optional welded mesh
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Mesh {
    pub enabled: bool,
    /// Mesh opening, mm
    pub mesh_size_mm: f64,
    /// Wire diameter, mm
    pub bar_size_mm: f64,
}

impl Default for Mesh {
    fn default() -> Self {
        Mesh {
            enabled: false,
            mesh_size_mm: 150.0,
            bar_size_mm: 6.0,
        }
    }
}

/// Footing reinforcement
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FootingReinforcement {
    pub bottom_bars_x: BarLayer,
    pub bottom_bars_y: BarLayer,
    #[serde(default)]
    pub top_bars: TopBars,
    #[serde(default)]
    pub mesh: Mesh,
    /// Clear cover to the bottom mat
    #[serde(default = "default_footing_cover")]
    pub cover_mm: f64,
}

fn default_footing_cover() -> f64 {
    50.0
}

impl FootingReinforcement {
    /// Same bar layer in both directions, no top mat or mesh
    pub fn two_way(count: u32, diameter_mm: f64, spacing_mm: f64) -> Self {
        let layer = BarLayer {
            count,
            diameter_mm,
            spacing_mm,
        };
        FootingReinforcement {
            bottom_bars_x: layer.clone(),
            bottom_bars_y: layer,
            top_bars: TopBars::default(),
            mesh: Mesh::default(),
            cover_mm: default_footing_cover(),
        }
    }

    pub fn violations(&self) -> Violations {
        let mut v = Violations::new();
        v.extend_prefixed("bottom_bars_x", self.bottom_bars_x.violations());
        v.extend_prefixed("bottom_bars_y", self.bottom_bars_y.violations());
        if self.top_bars.enabled {
            v.require_positive("top_bars.diameter_mm", self.top_bars.diameter_mm);
            v.require_positive("top_bars.spacing_mm", self.top_bars.spacing_mm);
        }
        if self.mesh.enabled {
            v.require_positive("mesh.mesh_size_mm", self.mesh.mesh_size_mm);
            v.require_positive("mesh.bar_size_mm", self.mesh.bar_size_mm);
        }
        v.require_non_negative("cover_mm", self.cover_mm);
        v
    }

    pub fn validate(&self) -> CalcResult<()> {
        self.violations().into_result()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_column_reinforcement_defaults_from_json() {
        let json = r#"{
            "main_bars": { "count": 8, "diameter_mm": 16.0, "cover_mm": 40.0 },
            "stirrups": { "diameter_mm": 8.0, "spacing_mm": 150.0 }
        }"#;
        let r: ColumnReinforcement = serde_json::from_str(json).unwrap();
        assert_eq!(r.stirrups.number_of_legs, 2);
        assert_eq!(r.stirrups.hook_type, HookType::Deg135);
        assert_eq!(r.main_bars.development_length_mm, 0.0);
        assert!(r.validate().is_ok());
        // 8 × π × 8² = 1608.5 mm²
        assert!((r.main_steel_area_mm2() - 1608.5).abs() < 0.1);
    }

    #[test]
    fn test_zero_spacing_rejected() {
        let json = r#"{
            "main_bars": { "count": 4, "diameter_mm": 12.0, "cover_mm": 40.0 },
            "stirrups": { "diameter_mm": 8.0, "spacing_mm": 0.0 }
        }"#;
        let r: ColumnReinforcement = serde_json::from_str(json).unwrap();
        let err = r.validate().unwrap_err();
        assert_eq!(err.violations()[0].field, "stirrups.spacing_mm");
    }

    #[test]
    fn test_footing_disabled_layers_not_validated() {
        let mut r = FootingReinforcement::two_way(12, 12.0, 150.0);
        r.top_bars.diameter_mm = 0.0;
        assert!(r.validate().is_ok());

        r.top_bars.enabled = true;
        r.bottom_bars_y.spacing_mm = -1.0;
        let err = r.validate().unwrap_err();
        let fields: Vec<&str> = err.violations().iter().map(|v| v.field.as_str()).collect();
        assert_eq!(fields, vec!["bottom_bars_y.spacing_mm", "top_bars.diameter_mm"]);
    }
}
