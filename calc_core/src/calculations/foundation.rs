//! # Foundation Quantities
//!
//! Concrete volume and mat steel for footings and rafts.
//!
//! - Volume: V = B × L × t for every foundation type
//! - Bottom bars: X bars are laid `length_mm` long, Y bars `width_mm` long
//! - Top bars (optional): length taken as max(B, L)
//! - Mesh (optional): a single wire run of 2 × (B + L)
//!
//! Top-bar and mesh lengths are approximations, not a grid enumeration.

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{QuantityResult, Rates, SteelComponentKind};
use crate::errors::{CalcResult, Violations};
use crate::geometry::{FoundationGeometry, VolumeBasis};
use crate::materials::{bar_group_weight_kg, MaterialSpec};
use crate::reinforcement::FootingReinforcement;
use crate::units::{CubicMeters, Meters, Millimeters};

/// Everything needed to take off one foundation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FoundationTakeoffInput {
    /// User label (e.g., "F-1")
    pub label: String,
    pub geometry: FoundationGeometry,
    pub material: MaterialSpec,
    pub reinforcement: FootingReinforcement,
}

impl FoundationTakeoffInput {
    pub fn validate(&self) -> CalcResult<()> {
        let mut v = Violations::new();
        v.extend_prefixed("geometry", self.geometry.violations());
        v.extend_prefixed("material", self.material.violations());
        v.extend_prefixed("reinforcement", self.reinforcement.violations());
        v.into_result()
    }
}

/// Geometric (pre-waste) volume of a foundation, m³
pub fn foundation_raw_volume_m3(geometry: &FoundationGeometry) -> f64 {
    CubicMeters::from_mm3(geometry.width_mm * geometry.length_mm * geometry.thickness_mm).value()
}

fn mm_to_m(mm: f64) -> f64 {
    Meters::from(Millimeters(mm)).value()
}

/// Compute foundation quantities without validating inputs.
pub fn compute_foundation_quantities(
    geometry: &FoundationGeometry,
    material: &MaterialSpec,
    reinforcement: &FootingReinforcement,
    rates: &Rates,
) -> QuantityResult {
    let density = material.steel_density_kg_m3;
    let raw_volume_m3 = foundation_raw_volume_m3(geometry);

    let x = &reinforcement.bottom_bars_x;
    let y = &reinforcement.bottom_bars_y;
    let mut components = vec![
        (
            SteelComponentKind::BottomBarsX,
            bar_group_weight_kg(x.count, x.diameter_mm, mm_to_m(geometry.length_mm), density),
        ),
        (
            SteelComponentKind::BottomBarsY,
            bar_group_weight_kg(y.count, y.diameter_mm, mm_to_m(geometry.width_mm), density),
        ),
    ];

    let top = &reinforcement.top_bars;
    if top.enabled {
        let length_m = mm_to_m(geometry.width_mm.max(geometry.length_mm));
        components.push((
            SteelComponentKind::TopBars,
            bar_group_weight_kg(top.count, top.diameter_mm, length_m, density),
        ));
    }

    let mesh = &reinforcement.mesh;
    if mesh.enabled {
        let length_m = mm_to_m((geometry.width_mm + geometry.length_mm) * 2.0);
        components.push((
            SteelComponentKind::Mesh,
            bar_group_weight_kg(1, mesh.bar_size_mm, length_m, density),
        ));
    }

    debug!(
        foundation_type = %geometry.foundation_type,
        raw_volume_m3,
        components = components.len(),
        "foundation quantities"
    );

    QuantityResult::assemble(
        VolumeBasis::Exact,
        raw_volume_m3,
        material.concrete_waste_multiplier(),
        material.concrete_density_kg_m3,
        components,
        material.steel_waste_multiplier(),
        rates,
    )
}

/// Validate, then compute foundation quantities.
pub fn calculate_foundation(input: &FoundationTakeoffInput, rates: &Rates) -> CalcResult<QuantityResult> {
    input.validate()?;
    Ok(compute_foundation_quantities(
        &input.geometry,
        &input.material,
        &input.reinforcement,
        rates,
    ))
}
