//! # Column Quantities
//!
//! Concrete volume, longitudinal bar weight and tie weight for one column.
//!
//! ## Formulas
//!
//! - Rectangular: V = b × d × h
//! - Circular: V = π (D/2)² × h
//! - T-shape: V = bf × tf × h + bw × (h − tf) × tw
//! - L-shape / polygon: rectangular formula on the equivalent `width_mm` ×
//!   `depth_mm` (reported as [`VolumeBasis::Approximated`])
//!
//! Main bar length is the column height. Tie count is `⌊h / s⌋ + 1`, each tie
//! the bounding perimeter `2 × (b + d)`. Hooks and development length are not
//! added to bar lengths; these are takeoff-grade nominal weights.
//!
//! ## Example
//!
//! ```rust
//! use calc_core::calculations::{calculate_column, ColumnTakeoffInput, Rates};
//! use calc_core::geometry::{ColumnGeometry, ColumnShape};
//! use calc_core::materials::MaterialSpec;
//! use calc_core::reinforcement::{ColumnReinforcement, MainBars, Stirrups};
//!
//! let input = ColumnTakeoffInput {
//!     label: "C-1".to_string(),
//!     geometry: ColumnGeometry::new(ColumnShape::square(400.0), 3000.0),
//!     material: MaterialSpec::default(),
//!     reinforcement: ColumnReinforcement {
//!         main_bars: MainBars { count: 8, diameter_mm: 16.0, cover_mm: 40.0, development_length_mm: 0.0 },
//!         stirrups: serde_json::from_str(r#"{ "diameter_mm": 8.0, "spacing_mm": 150.0 }"#).unwrap(),
//!     },
//! };
//!
//! let result = calculate_column(&input, &Rates::default()).unwrap();
//! assert!((result.concrete_volume_m3 - 0.504).abs() < 1e-9);
//! ```

use std::f64::consts::PI;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::{QuantityResult, Rates, SteelComponentKind};
use crate::errors::{CalcResult, Violations};
use crate::geometry::{ColumnGeometry, ColumnShape};
use crate::materials::{bar_group_weight_kg, MaterialSpec};
use crate::reinforcement::ColumnReinforcement;
use crate::units::{CubicMeters, Meters, Millimeters};

/// Everything needed to take off one column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnTakeoffInput {
    /// User label (e.g., "C-1", "Grid B/4")
    pub label: String,
    pub geometry: ColumnGeometry,
    pub material: MaterialSpec,
    pub reinforcement: ColumnReinforcement,
}

impl ColumnTakeoffInput {
    /// Validate every input group, reporting all violations together
    pub fn validate(&self) -> CalcResult<()> {
        let mut v = Violations::new();
        v.extend_prefixed("geometry", self.geometry.violations());
        v.extend_prefixed("material", self.material.violations());
        v.extend_prefixed("reinforcement", self.reinforcement.violations());
        v.into_result()
    }
}

/// Geometric (pre-waste) volume of a column, m³
pub fn column_raw_volume_m3(geometry: &ColumnGeometry) -> f64 {
    let h = geometry.height_mm;
    let mm3 = match geometry.shape {
        ColumnShape::Rectangular { width_mm, depth_mm } => width_mm * depth_mm * h,
        ColumnShape::Circular { diameter_mm } => PI * (diameter_mm / 2.0).powi(2) * h,
        ColumnShape::TShape {
            flange_width_mm,
            flange_thickness_mm,
            web_width_mm,
            web_thickness_mm,
        } => {
            flange_width_mm * flange_thickness_mm * h
                + web_width_mm * (h - flange_thickness_mm) * web_thickness_mm
        }
        ColumnShape::LShape { width_mm, depth_mm, .. } | ColumnShape::Polygon { width_mm, depth_mm, .. } => {
            width_mm * depth_mm * h
        }
    };
    CubicMeters::from_mm3(mm3).value()
}

/// Estimated tie count, ⌊h / s⌋ + 1
pub fn stirrup_count(height_mm: f64, spacing_mm: f64) -> u32 {
    if spacing_mm <= 0.0 || height_mm < 0.0 {
        return 0;
    }
    (height_mm / spacing_mm).floor() as u32 + 1
}

/// Compute column quantities without validating inputs.
///
/// Pure and deterministic; out-of-range dimensions flow straight through
/// the formulas. Use [`calculate_column`] at API boundaries.
pub fn compute_column_quantities(
    geometry: &ColumnGeometry,
    material: &MaterialSpec,
    reinforcement: &ColumnReinforcement,
    rates: &Rates,
) -> QuantityResult {
    let basis = geometry.shape.volume_basis();
    if !basis.is_exact() {
        warn!(
            shape = geometry.shape.name(),
            "no dedicated volume formula, using rectangular-equivalent dimensions"
        );
    }

    let raw_volume_m3 = column_raw_volume_m3(geometry);
    let height_m = Meters::from(Millimeters(geometry.height_mm)).value();

    let main = &reinforcement.main_bars;
    let main_bars_kg = bar_group_weight_kg(main.count, main.diameter_mm, height_m, material.steel_density_kg_m3);

    let ties = &reinforcement.stirrups;
    let tie_count = stirrup_count(geometry.height_mm, ties.spacing_mm);
    let tie_length_m = Meters::from(Millimeters(geometry.shape.tie_perimeter_mm())).value();
    let stirrups_kg = bar_group_weight_kg(tie_count, ties.diameter_mm, tie_length_m, material.steel_density_kg_m3);

    debug!(
        shape = geometry.shape.name(),
        raw_volume_m3, main_bars_kg, tie_count, stirrups_kg, "column quantities"
    );

    QuantityResult::assemble(
        basis,
        raw_volume_m3,
        material.concrete_waste_multiplier(),
        material.concrete_density_kg_m3,
        vec![
            (SteelComponentKind::MainBars, main_bars_kg),
            (SteelComponentKind::Stirrups, stirrups_kg),
        ],
        material.steel_waste_multiplier(),
        rates,
    )
}

/// Validate, then compute column quantities.
///
/// # Returns
///
/// * `Ok(QuantityResult)` - Quantities and costs
/// * `Err(CalcError::Validation)` - Every invalid field in the input
pub fn calculate_column(input: &ColumnTakeoffInput, rates: &Rates) -> CalcResult<QuantityResult> {
    input.validate()?;
    Ok(compute_column_quantities(
        &input.geometry,
        &input.material,
        &input.reinforcement,
        rates,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::{BaseShape, VolumeBasis};
    use crate::reinforcement::{MainBars, Stirrups};

    fn reinforcement() -> ColumnReinforcement {
        ColumnReinforcement {
            main_bars: MainBars {
                count: 8,
                diameter_mm: 16.0,
                cover_mm: 40.0,
                development_length_mm: 0.0,
            },
            stirrups: Stirrups {
                shape: Default::default(),
                diameter_mm: 8.0,
                spacing_mm: 150.0,
                hook_type: Default::default(),
                hook_length_mm: 0.0,
                number_of_legs: 2,
            },
        }
    }

    fn test_column() -> ColumnTakeoffInput {
        ColumnTakeoffInput {
            label: "Test Column".to_string(),
            geometry: ColumnGeometry::new(ColumnShape::square(400.0), 3000.0),
            material: MaterialSpec::default(),
            reinforcement: reinforcement(),
        }
    }

    fn volume_with(shape: ColumnShape, height_mm: f64, waste: f64) -> f64 {
        let material = MaterialSpec {
            concrete_waste_percent: waste,
            ..MaterialSpec::default()
        };
        compute_column_quantities(
            &ColumnGeometry::new(shape, height_mm),
            &material,
            &reinforcement(),
            &Rates::default(),
        )
        .concrete_volume_m3
    }

    #[test]
    fn test_rectangular_column_scenario() {
        let result = calculate_column(&test_column(), &Rates::default()).unwrap();

        // 0.4 × 0.4 × 3.0 = 0.48 m³, × 1.05 waste
        assert!((result.raw_volume_m3 - 0.48).abs() < 1e-12);
        assert!((result.concrete_volume_m3 - 0.504).abs() < 1e-12);

        // 8 × π × 0.008² × 3 × 7850 ≈ 37.88 kg
        let main = result.steel_weight(SteelComponentKind::MainBars);
        assert!((main - 37.88).abs() < 0.01);

        // 21 ties × 1.6 m × π × 0.004² × 7850
        let expected_ties = 21.0 * 1.6 * PI * 0.004_f64.powi(2) * 7850.0;
        let ties = result.steel_weight(SteelComponentKind::Stirrups);
        assert!((ties - expected_ties).abs() < 1e-9);

        assert!((result.total_steel_weight_kg - (main + ties) * 1.03).abs() < 1e-9);
        assert!(result.volume_basis.is_exact());
    }

    #[test]
    fn test_stirrup_count() {
        assert_eq!(stirrup_count(3000.0, 150.0), 21);
        assert_eq!(stirrup_count(3000.0, 160.0), 19);
        assert_eq!(stirrup_count(3000.0, 0.0), 0);
    }

    #[test]
    fn test_circular_volume() {
        let v = volume_with(ColumnShape::Circular { diameter_mm: 400.0 }, 3000.0, 0.0);
        assert!((v - PI * 0.04 * 3.0).abs() < 1e-12);
    }

    #[test]
    fn test_tshape_volume() {
        let shape = ColumnShape::TShape {
            flange_width_mm: 600.0,
            flange_thickness_mm: 150.0,
            web_width_mm: 250.0,
            web_thickness_mm: 300.0,
        };
        let v = volume_with(shape, 3000.0, 0.0);
        let expected = (600.0 * 150.0 * 3000.0 + 250.0 * (3000.0 - 150.0) * 300.0) / 1e9;
        assert!((v - expected).abs() < 1e-12);
    }

    #[test]
    fn test_lshape_reports_approximation() {
        let shape = ColumnShape::LShape {
            leg_a_mm: 600.0,
            leg_b_mm: 500.0,
            thickness_mm: 200.0,
            width_mm: 600.0,
            depth_mm: 500.0,
        };
        let result = compute_column_quantities(
            &ColumnGeometry::new(shape, 3000.0),
            &MaterialSpec::default(),
            &reinforcement(),
            &Rates::default(),
        );
        assert_eq!(
            result.volume_basis,
            VolumeBasis::Approximated {
                basis: BaseShape::Rectangular
            }
        );
        assert!((result.raw_volume_m3 - 0.9).abs() < 1e-12);
    }

    #[test]
    fn test_volume_monotonic_in_dimensions() {
        let base = volume_with(ColumnShape::Rectangular { width_mm: 300.0, depth_mm: 400.0 }, 3000.0, 5.0);
        let wider = volume_with(ColumnShape::Rectangular { width_mm: 301.0, depth_mm: 400.0 }, 3000.0, 5.0);
        let deeper = volume_with(ColumnShape::Rectangular { width_mm: 300.0, depth_mm: 401.0 }, 3000.0, 5.0);
        let taller = volume_with(ColumnShape::Rectangular { width_mm: 300.0, depth_mm: 400.0 }, 3001.0, 5.0);
        assert!(wider > base && deeper > base && taller > base);

        let d1 = volume_with(ColumnShape::Circular { diameter_mm: 300.0 }, 3000.0, 5.0);
        let d2 = volume_with(ColumnShape::Circular { diameter_mm: 300.5 }, 3000.0, 5.0);
        assert!(d2 > d1);
    }

    #[test]
    fn test_waste_factor_linearity() {
        let shape = ColumnShape::Rectangular { width_mm: 300.0, depth_mm: 450.0 };
        let raw = volume_with(shape.clone(), 3200.0, 0.0);
        assert_eq!(raw, column_raw_volume_m3(&ColumnGeometry::new(shape.clone(), 3200.0)));
        for w in [0.0, 2.5, 5.0, 10.0, 50.0] {
            let v = volume_with(shape.clone(), 3200.0, w);
            assert!((v - raw * (1.0 + w / 100.0)).abs() < 1e-12);
        }
    }

    #[test]
    fn test_idempotent() {
        let input = test_column();
        let a = calculate_column(&input, &Rates::default()).unwrap();
        let b = calculate_column(&input, &Rates::default()).unwrap();
        assert_eq!(a, b);
        assert_eq!(a.total_cost.to_bits(), b.total_cost.to_bits());
    }

    #[test]
    fn test_custom_rates() {
        let input = test_column();
        let rates = Rates {
            concrete_per_m3: 100.0,
            steel_per_kg: 1.0,
        };
        let result = calculate_column(&input, &rates).unwrap();
        assert!((result.concrete_cost - 50.4).abs() < 1e-9);
        assert!((result.total_steel_cost - result.total_steel_weight_kg).abs() < 1e-12);
    }

    #[test]
    fn test_invalid_input_lists_every_field() {
        let mut input = test_column();
        input.geometry.height_mm = -5.0;
        input.material.steel_density_kg_m3 = 0.0;
        input.reinforcement.stirrups.spacing_mm = 0.0;
        let err = calculate_column(&input, &Rates::default()).unwrap_err();
        let fields: Vec<&str> = err.violations().iter().map(|v| v.field.as_str()).collect();
        assert_eq!(
            fields,
            vec![
                "geometry.height_mm",
                "material.steel_density_kg_m3",
                "reinforcement.stirrups.spacing_mm"
            ]
        );
    }

    #[test]
    fn test_unvalidated_path_passes_bad_geometry_through() {
        let geometry = ColumnGeometry::new(ColumnShape::square(0.0), 3000.0);
        let result =
            compute_column_quantities(&geometry, &MaterialSpec::default(), &reinforcement(), &Rates::default());
        assert_eq!(result.concrete_volume_m3, 0.0);
    }

    #[test]
    fn test_serialization() {
        let col = test_column();
        let json = serde_json::to_string_pretty(&col).unwrap();
        let roundtrip: ColumnTakeoffInput = serde_json::from_str(&json).unwrap();
        assert_eq!(col, roundtrip);
    }
}
