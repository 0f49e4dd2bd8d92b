//! # Element Geometry
//!
//! Shape definitions for columns and foundations. All linear dimensions are
//! in millimeters.
//!
//! Column cross-sections are a tagged enum so each shape carries only the
//! dimensions it needs. L-shaped and polygonal columns have no dedicated
//! volume formula; they also carry rectangular-equivalent `width_mm` /
//! `depth_mm`, and every volume they produce is reported with
//! [`VolumeBasis::Approximated`].
//!
//! ## JSON Example
//!
//! ```json
//! {
//!   "shape": { "shape": "rectangular", "width_mm": 400.0, "depth_mm": 400.0 },
//!   "height_mm": 3000.0
//! }
//! ```

use std::f64::consts::PI;

use serde::{Deserialize, Serialize};

use crate::errors::{CalcResult, Violations};

/// Shapes with a dedicated volume formula
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BaseShape {
    Rectangular,
    Circular,
    TShape,
}

/// How a concrete volume was obtained
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum VolumeBasis {
    /// Dedicated formula for the shape
    Exact,
    /// No dedicated formula; computed with `basis` on equivalent dimensions
    Approximated { basis: BaseShape },
}

impl VolumeBasis {
    pub fn is_exact(&self) -> bool {
        matches!(self, VolumeBasis::Exact)
    }
}

/// Column cross-section
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "shape", rename_all = "snake_case")]
pub enum ColumnShape {
    Rectangular {
        width_mm: f64,
        depth_mm: f64,
    },
    Circular {
        diameter_mm: f64,
    },
    /// T-section in plan. Widths run along the width axis and thicknesses
    /// along the depth axis, so the flange and web stack in depth.
    #[serde(rename = "tshape")]
    TShape {
        flange_width_mm: f64,
        flange_thickness_mm: f64,
        web_width_mm: f64,
        /// Depth of the web below the flange
        web_thickness_mm: f64,
    },
    #[serde(rename = "lshape")]
    LShape {
        leg_a_mm: f64,
        leg_b_mm: f64,
        thickness_mm: f64,
        /// Rectangular-equivalent width used for quantities
        width_mm: f64,
        /// Rectangular-equivalent depth used for quantities
        depth_mm: f64,
    },
    Polygon {
        side_length_mm: f64,
        side_count: u32,
        /// Rectangular-equivalent width used for quantities
        width_mm: f64,
        /// Rectangular-equivalent depth used for quantities
        depth_mm: f64,
    },
}

impl ColumnShape {
    /// Square column of the given side
    pub fn square(side_mm: f64) -> Self {
        ColumnShape::Rectangular {
            width_mm: side_mm,
            depth_mm: side_mm,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            ColumnShape::Rectangular { .. } => "Rectangular",
            ColumnShape::Circular { .. } => "Circular",
            ColumnShape::TShape { .. } => "T-shape",
            ColumnShape::LShape { .. } => "L-shape",
            ColumnShape::Polygon { .. } => "Polygon",
        }
    }

    /// Whether the volume comes from a dedicated formula
    pub fn volume_basis(&self) -> VolumeBasis {
        match self {
            ColumnShape::Rectangular { .. } | ColumnShape::Circular { .. } | ColumnShape::TShape { .. } => {
                VolumeBasis::Exact
            }
            ColumnShape::LShape { .. } | ColumnShape::Polygon { .. } => VolumeBasis::Approximated {
                basis: BaseShape::Rectangular,
            },
        }
    }

    /// Bounding rectangle (width, depth) in mm.
    ///
    /// Used for the tie perimeter `2 × (width + depth)`.
    pub fn bounding_dims(&self) -> (f64, f64) {
        match *self {
            ColumnShape::Rectangular { width_mm, depth_mm } => (width_mm, depth_mm),
            ColumnShape::Circular { diameter_mm } => (diameter_mm, diameter_mm),
            ColumnShape::TShape {
                flange_width_mm,
                flange_thickness_mm,
                web_width_mm,
                web_thickness_mm,
            } => (flange_width_mm.max(web_width_mm), flange_thickness_mm + web_thickness_mm),
            ColumnShape::LShape { width_mm, depth_mm, .. } | ColumnShape::Polygon { width_mm, depth_mm, .. } => {
                (width_mm, depth_mm)
            }
        }
    }

    /// Tie perimeter 2 × (width + depth), mm
    pub fn tie_perimeter_mm(&self) -> f64 {
        let (w, d) = self.bounding_dims();
        2.0 * (w + d)
    }

    /// Least lateral dimension, mm
    pub fn least_dimension_mm(&self) -> f64 {
        let (w, d) = self.bounding_dims();
        w.min(d)
    }

    /// Gross cross-section area Ag in mm²
    pub fn cross_section_area_mm2(&self) -> f64 {
        match *self {
            ColumnShape::Rectangular { width_mm, depth_mm } => width_mm * depth_mm,
            ColumnShape::Circular { diameter_mm } => PI * (diameter_mm / 2.0).powi(2),
            ColumnShape::TShape {
                flange_width_mm,
                flange_thickness_mm,
                web_width_mm,
                web_thickness_mm,
            } => flange_width_mm * flange_thickness_mm + web_width_mm * web_thickness_mm,
            ColumnShape::LShape { width_mm, depth_mm, .. } | ColumnShape::Polygon { width_mm, depth_mm, .. } => {
                width_mm * depth_mm
            }
        }
    }

    fn violations(&self) -> Violations {
        let mut v = Violations::new();
        match *self {
            ColumnShape::Rectangular { width_mm, depth_mm } => {
                v.require_positive("width_mm", width_mm);
                v.require_positive("depth_mm", depth_mm);
            }
            ColumnShape::Circular { diameter_mm } => {
                v.require_positive("diameter_mm", diameter_mm);
            }
            ColumnShape::TShape {
                flange_width_mm,
                flange_thickness_mm,
                web_width_mm,
                web_thickness_mm,
            } => {
                v.require_positive("flange_width_mm", flange_width_mm);
                v.require_positive("flange_thickness_mm", flange_thickness_mm);
                v.require_positive("web_width_mm", web_width_mm);
                v.require_positive("web_thickness_mm", web_thickness_mm);
            }
            ColumnShape::LShape {
                leg_a_mm,
                leg_b_mm,
                thickness_mm,
                width_mm,
                depth_mm,
            } => {
                v.require_positive("leg_a_mm", leg_a_mm);
                v.require_positive("leg_b_mm", leg_b_mm);
                v.require_positive("thickness_mm", thickness_mm);
                v.require_positive("width_mm", width_mm);
                v.require_positive("depth_mm", depth_mm);
            }
            ColumnShape::Polygon {
                side_length_mm,
                side_count,
                width_mm,
                depth_mm,
            } => {
                v.require_positive("side_length_mm", side_length_mm);
                if side_count < 3 {
                    v.push("side_count", side_count, "A polygon needs at least 3 sides");
                }
                v.require_positive("width_mm", width_mm);
                v.require_positive("depth_mm", depth_mm);
            }
        }
        v
    }
}

/// Column geometry: cross-section plus height
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnGeometry {
    pub shape: ColumnShape,
    pub height_mm: f64,
}

impl ColumnGeometry {
    pub fn new(shape: ColumnShape, height_mm: f64) -> Self {
        Self { shape, height_mm }
    }

    /// Collect every invalid dimension
    pub fn violations(&self) -> Violations {
        let mut v = Violations::new();
        v.extend_prefixed("shape", self.shape.violations());
        v.require_positive("height_mm", self.height_mm);
        if let ColumnShape::TShape { flange_thickness_mm, .. } = self.shape {
            if flange_thickness_mm > self.height_mm {
                v.push(
                    "shape.flange_thickness_mm",
                    flange_thickness_mm,
                    "Flange thickness cannot exceed the column height",
                );
            }
        }
        v
    }

    pub fn validate(&self) -> CalcResult<()> {
        self.violations().into_result()
    }
}

/// Foundation type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FoundationType {
    #[default]
    Isolated,
    Strip,
    Raft,
    Combined,
    Sloped,
}

impl FoundationType {
    pub const ALL: [FoundationType; 5] = [
        FoundationType::Isolated,
        FoundationType::Strip,
        FoundationType::Raft,
        FoundationType::Combined,
        FoundationType::Sloped,
    ];

    pub fn display_name(&self) -> &'static str {
        match self {
            FoundationType::Isolated => "Isolated footing",
            FoundationType::Strip => "Strip footing",
            FoundationType::Raft => "Raft",
            FoundationType::Combined => "Combined footing",
            FoundationType::Sloped => "Sloped footing",
        }
    }
}

impl std::fmt::Display for FoundationType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// Foundation geometry (plan width × length × thickness)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FoundationGeometry {
    pub foundation_type: FoundationType,
    pub width_mm: f64,
    pub length_mm: f64,
    pub thickness_mm: f64,
    /// Depth below grade; only meaningful for sloped footings
    #[serde(default)]
    pub embedded_depth_mm: f64,
}

impl FoundationGeometry {
    pub fn new(foundation_type: FoundationType, width_mm: f64, length_mm: f64, thickness_mm: f64) -> Self {
        Self {
            foundation_type,
            width_mm,
            length_mm,
            thickness_mm,
            embedded_depth_mm: 0.0,
        }
    }

    pub fn plan_area_mm2(&self) -> f64 {
        self.width_mm * self.length_mm
    }

    pub fn violations(&self) -> Violations {
        let mut v = Violations::new();
        v.require_positive("width_mm", self.width_mm);
        v.require_positive("length_mm", self.length_mm);
        v.require_positive("thickness_mm", self.thickness_mm);
        if self.foundation_type == FoundationType::Sloped {
            v.require_non_negative("embedded_depth_mm", self.embedded_depth_mm);
        }
        v
    }

    pub fn validate(&self) -> CalcResult<()> {
        self.violations().into_result()
    }
}
