//! # Bar Bending Schedule Rollup
//!
//! Combines concrete/steel quantities with an explicit rebar cutting list
//! into a [`BbsBreakdown`]. Cutting lists are supplied by the caller; they are
//! not derived from reinforcement specs.
//!
//! ## Cutting cost basis
//!
//! By default each [`RebarCut`] line item contributes its `cost_per_cut` once,
//! regardless of `count` ([`CuttingCostBasis::PerLineItem`]). Callers that
//! price every physical piece pass [`CuttingCostBasis::PerPiece`].
//!
//! ## Example
//!
//! ```rust
//! use calc_core::bbs::{rollup_bbs, BarShape, RebarCut};
//!
//! let cuts = vec![RebarCut::new(BarShape::Straight, 3000.0, 8).with_cost(5.0)];
//! let bbs = rollup_bbs(300.0, 60.0, 2.604, 150.0, &cuts);
//! assert!((bbs.total_cost - 18395.6).abs() < 1e-9);
//! ```

use serde::{Deserialize, Serialize};

use crate::calculations::{QuantityResult, Rates};
use crate::materials::unit_weight_kg_per_m;
use crate::units::{Meters, Millimeters};

/// Bent shape of a schedule line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BarShape {
    #[default]
    Straight,
    LBar,
    UBar,
    Stirrup,
    Crank,
    Hooked,
    Other,
}

/// One line of a bar bending schedule
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RebarCut {
    pub shape: BarShape,
    /// Cut length of one piece, mm
    pub cut_length_mm: f64,
    pub count: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bend_allowance_mm: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cost_per_cut: Option<f64>,
    /// Bar diameter, mm (needed only for weights)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub diameter_mm: Option<f64>,
}

impl RebarCut {
    pub fn new(shape: BarShape, cut_length_mm: f64, count: u32) -> Self {
        RebarCut {
            shape,
            cut_length_mm,
            count,
            bend_allowance_mm: None,
            cost_per_cut: None,
            diameter_mm: None,
        }
    }

    pub fn with_cost(mut self, cost_per_cut: f64) -> Self {
        self.cost_per_cut = Some(cost_per_cut);
        self
    }

    pub fn with_bend_allowance(mut self, bend_allowance_mm: f64) -> Self {
        self.bend_allowance_mm = Some(bend_allowance_mm);
        self
    }

    pub fn with_diameter(mut self, diameter_mm: f64) -> Self {
        self.diameter_mm = Some(diameter_mm);
        self
    }

    /// Length of bar drawn for one piece, mm
    pub fn piece_length_mm(&self) -> f64 {
        self.cut_length_mm + self.bend_allowance_mm.unwrap_or(0.0)
    }

    /// Total bar length for all pieces, m
    pub fn total_length_m(&self) -> f64 {
        Meters::from(Millimeters(self.piece_length_mm())).value() * self.count as f64
    }

    /// Weight of all pieces, if the diameter is known
    pub fn weight_kg(&self, density_kg_m3: f64) -> Option<f64> {
        self.diameter_mm
            .map(|d| unit_weight_kg_per_m(d, density_kg_m3) * self.total_length_m())
    }

    /// Cutting cost of this line under the given basis
    pub fn cutting_cost(&self, basis: CuttingCostBasis) -> f64 {
        let cost = self.cost_per_cut.unwrap_or(0.0);
        match basis {
            CuttingCostBasis::PerLineItem => cost,
            CuttingCostBasis::PerPiece => cost * self.count as f64,
        }
    }
}

/// How `cost_per_cut` is applied to a line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CuttingCostBasis {
    /// Once per schedule line
    #[default]
    PerLineItem,
    /// Once per piece (`cost_per_cut × count`)
    PerPiece,
}

/// Aggregate schedule totals
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct BbsBreakdown {
    pub total_concrete_volume_m3: f64,
    pub total_concrete_cost: f64,
    pub total_steel_weight_kg: f64,
    pub total_steel_cost: f64,
    pub total_cutting_cost: f64,
    pub total_cost: f64,
}

/// Roll up totals with the default per-line-item cutting cost.
pub fn rollup_bbs(
    total_steel_weight_kg: f64,
    steel_rate: f64,
    total_concrete_volume_m3: f64,
    concrete_rate: f64,
    rebar_cuts: &[RebarCut],
) -> BbsBreakdown {
    rollup_bbs_with_basis(
        total_steel_weight_kg,
        steel_rate,
        total_concrete_volume_m3,
        concrete_rate,
        rebar_cuts,
        CuttingCostBasis::default(),
    )
}

/// Roll up totals with an explicit cutting cost basis.
pub fn rollup_bbs_with_basis(
    total_steel_weight_kg: f64,
    steel_rate: f64,
    total_concrete_volume_m3: f64,
    concrete_rate: f64,
    rebar_cuts: &[RebarCut],
    basis: CuttingCostBasis,
) -> BbsBreakdown {
    let total_concrete_cost = total_concrete_volume_m3 * concrete_rate;
    let total_steel_cost = total_steel_weight_kg * steel_rate;
    let total_cutting_cost: f64 = rebar_cuts.iter().map(|c| c.cutting_cost(basis)).sum();

    BbsBreakdown {
        total_concrete_volume_m3,
        total_concrete_cost,
        total_steel_weight_kg,
        total_steel_cost,
        total_cutting_cost,
        total_cost: total_concrete_cost + total_steel_cost + total_cutting_cost,
    }
}

/// Sum several element results and roll them up with one cutting list.
pub fn rollup_quantities(
    results: &[QuantityResult],
    rates: &Rates,
    rebar_cuts: &[RebarCut],
    basis: CuttingCostBasis,
) -> BbsBreakdown {
    let volume: f64 = results.iter().map(|r| r.concrete_volume_m3).sum();
    let steel: f64 = results.iter().map(|r| r.total_steel_weight_kg).sum();
    rollup_bbs_with_basis(steel, rates.steel_per_kg, volume, rates.concrete_per_m3, rebar_cuts, basis)
}
