//! # Quantity Calculations
//!
//! Geometry + material + reinforcement → [`QuantityResult`]. Each element
//! type follows the same pattern:
//!
//! - `*TakeoffInput` - label and inputs (JSON-serializable)
//! - `compute_*_quantities(...)` - pure formula, no validation
//! - `calculate_*(input, rates) -> CalcResult<QuantityResult>` - validates first
//!
//! ## Available Calculations
//!
//! - [`column`] - Column concrete, main bars and ties
//! - [`foundation`] - Footing concrete, bottom/top mats and mesh

pub mod column;
pub mod foundation;

use serde::{Deserialize, Serialize};

use crate::compliance::DesignParameters;
use crate::errors::CalcResult;
use crate::geometry::VolumeBasis;
use crate::units::UnitSystem;

pub use column::{calculate_column, compute_column_quantities, ColumnTakeoffInput};
pub use foundation::{calculate_foundation, compute_foundation_quantities, FoundationTakeoffInput};

/// Wet-to-dry volume multiplier for concrete ingredients
pub const DRY_VOLUME_FACTOR: f64 = 1.54;

/// Unit rates used to price quantities.
///
/// Defaults are 150 per m³ of concrete and 60 per kg of steel.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rates {
    pub concrete_per_m3: f64,
    pub steel_per_kg: f64,
}

impl Default for Rates {
    fn default() -> Self {
        Rates {
            concrete_per_m3: 150.0,
            steel_per_kg: 60.0,
        }
    }
}

/// Named steel bucket in a result
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SteelComponentKind {
    MainBars,
    Stirrups,
    BottomBarsX,
    BottomBarsY,
    TopBars,
    Mesh,
}

impl SteelComponentKind {
    pub fn display_name(&self) -> &'static str {
        match self {
            SteelComponentKind::MainBars => "Main bars",
            SteelComponentKind::Stirrups => "Stirrups",
            SteelComponentKind::BottomBarsX => "Bottom bars (X)",
            SteelComponentKind::BottomBarsY => "Bottom bars (Y)",
            SteelComponentKind::TopBars => "Top bars",
            SteelComponentKind::Mesh => "Mesh",
        }
    }
}

/// Steel weight and cost of one bar group, before waste
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SteelComponent {
    pub kind: SteelComponentKind,
    pub weight_kg: f64,
    pub cost: f64,
}

/// Quantities for one element.
///
/// `total_steel_weight_kg` = Σ component weights + `steel_waste_kg`;
/// `total_steel_cost` = Σ component costs + `steel_waste_cost`;
/// `total_cost` = `concrete_cost` + `total_steel_cost`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuantityResult {
    pub volume_basis: VolumeBasis,
    /// Geometric volume before waste (m³)
    pub raw_volume_m3: f64,
    /// Volume including waste (m³)
    pub concrete_volume_m3: f64,
    /// Dry ingredient volume (m³)
    pub dry_volume_m3: f64,
    pub concrete_weight_kg: f64,
    pub steel_components: Vec<SteelComponent>,
    pub steel_waste_kg: f64,
    pub total_steel_weight_kg: f64,
    pub concrete_cost: f64,
    /// Cost of `steel_waste_kg`, not carried by any component
    pub steel_waste_cost: f64,
    pub total_steel_cost: f64,
    pub total_cost: f64,
}

impl QuantityResult {
    /// Price raw quantities. Components are expected before waste.
    pub(crate) fn assemble(
        volume_basis: VolumeBasis,
        raw_volume_m3: f64,
        concrete_waste_multiplier: f64,
        concrete_density_kg_m3: f64,
        components: Vec<(SteelComponentKind, f64)>,
        steel_waste_multiplier: f64,
        rates: &Rates,
    ) -> Self {
        let concrete_volume_m3 = raw_volume_m3 * concrete_waste_multiplier;
        let raw_steel_kg: f64 = components.iter().map(|(_, w)| w).sum();
        let total_steel_weight_kg = raw_steel_kg * steel_waste_multiplier;

        let steel_components = components
            .into_iter()
            .map(|(kind, weight_kg)| SteelComponent {
                kind,
                weight_kg,
                cost: weight_kg * rates.steel_per_kg,
            })
            .collect();

        let concrete_cost = concrete_volume_m3 * rates.concrete_per_m3;
        let total_steel_cost = total_steel_weight_kg * rates.steel_per_kg;
        let steel_waste_kg = total_steel_weight_kg - raw_steel_kg;

        QuantityResult {
            volume_basis,
            raw_volume_m3,
            concrete_volume_m3,
            dry_volume_m3: concrete_volume_m3 * DRY_VOLUME_FACTOR,
            concrete_weight_kg: concrete_volume_m3 * concrete_density_kg_m3,
            steel_components,
            steel_waste_kg,
            total_steel_weight_kg,
            concrete_cost,
            steel_waste_cost: steel_waste_kg * rates.steel_per_kg,
            total_steel_cost,
            total_cost: concrete_cost + total_steel_cost,
        }
    }

    /// Look up one steel bucket
    pub fn steel_component(&self, kind: SteelComponentKind) -> Option<&SteelComponent> {
        self.steel_components.iter().find(|c| c.kind == kind)
    }

    /// Weight of one steel bucket, zero when absent
    pub fn steel_weight(&self, kind: SteelComponentKind) -> f64 {
        self.steel_component(kind).map_or(0.0, |c| c.weight_kg)
    }

    /// Headline figures scaled to a display unit system
    pub fn in_units(&self, units: UnitSystem) -> QuantitySummary {
        QuantitySummary {
            units,
            concrete_volume: self.concrete_volume_m3 * units.volume_factor(),
            total_steel_weight: self.total_steel_weight_kg * units.mass_factor(),
            total_cost: self.total_cost,
        }
    }
}

/// Headline quantities in a display unit system
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct QuantitySummary {
    pub units: UnitSystem,
    pub concrete_volume: f64,
    pub total_steel_weight: f64,
    pub total_cost: f64,
}

impl std::fmt::Display for QuantitySummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{:.3} {} concrete, {:.1} {} steel, cost {:.2}",
            self.concrete_volume,
            self.units.volume_label(),
            self.total_steel_weight,
            self.units.mass_label(),
            self.total_cost
        )
    }
}

/// Enum wrapper for all element types.
///
/// Lets a project store columns and foundations in one collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum CalculationItem {
    Column(ColumnTakeoffInput),
    Foundation(FoundationTakeoffInput),
}

impl CalculationItem {
    /// Get the user-provided label for this element
    pub fn label(&self) -> &str {
        match self {
            CalculationItem::Column(c) => &c.label,
            CalculationItem::Foundation(f) => &f.label,
        }
    }

    /// Get the element type as a string
    pub fn calc_type(&self) -> &'static str {
        match self {
            CalculationItem::Column(_) => "Column",
            CalculationItem::Foundation(_) => "Foundation",
        }
    }

    /// Validate and compute quantities
    pub fn calculate(&self, rates: &Rates) -> CalcResult<QuantityResult> {
        match self {
            CalculationItem::Column(c) => calculate_column(c, rates),
            CalculationItem::Foundation(f) => calculate_foundation(f, rates),
        }
    }

    /// Parameters checked against the standards
    pub fn design_parameters(&self) -> DesignParameters {
        match self {
            CalculationItem::Column(c) => DesignParameters::for_column(c),
            CalculationItem::Foundation(f) => DesignParameters::for_foundation(f),
        }
    }
}
