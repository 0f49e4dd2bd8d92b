//! # Engineering Standards
//!
//! Data model for design codes (IS 456, ACI 318, EN 1992, …): clauses,
//! machine-checkable requirements, reference formulas and reference tables.
//!
//! The built-in catalog lives in [`registry`]; this module only defines the
//! records. Requirements carry an explicit [`Comparator`]. Datasets written
//! without one fall back to classifying the English `condition` text.
//!
//! ## JSON Example
//!
//! ```json
//! {
//!   "parameter": "minimum_reinforcement_ratio",
//!   "condition": "shall not be less than",
//!   "comparator": "at_least",
//!   "value": 0.8,
//!   "unit": "%"
//! }
//! ```

pub mod registry;

pub use registry::{builtin, RegionRecommendation, StandardsDataset, StandardsRegistry};

use serde::{Deserialize, Serialize};

/// Discipline a standard covers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StandardCategory {
    Concrete,
    Steel,
    Seismic,
    Wind,
    Loads,
    Materials,
}

impl StandardCategory {
    pub const ALL: [StandardCategory; 6] = [
        StandardCategory::Concrete,
        StandardCategory::Steel,
        StandardCategory::Seismic,
        StandardCategory::Wind,
        StandardCategory::Loads,
        StandardCategory::Materials,
    ];

    pub fn display_name(&self) -> &'static str {
        match self {
            StandardCategory::Concrete => "Concrete",
            StandardCategory::Steel => "Steel",
            StandardCategory::Seismic => "Seismic",
            StandardCategory::Wind => "Wind",
            StandardCategory::Loads => "Loads",
            StandardCategory::Materials => "Materials",
        }
    }
}

impl std::fmt::Display for StandardCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// How a checked value is compared with a requirement
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Comparator {
    /// value ≥ required
    AtLeast,
    /// value ≤ required
    AtMost,
    /// value == required
    Equals,
}

impl Comparator {
    /// Classify free-text condition wording.
    ///
    /// "minimum" / "not be less than" → [`Comparator::AtLeast`],
    /// "maximum" / "not exceed" → [`Comparator::AtMost`], anything else
    /// → [`Comparator::Equals`]. Matching is case-insensitive.
    pub fn classify(condition: &str) -> Self {
        let text = condition.to_lowercase();
        if text.contains("minimum") || text.contains("not be less than") {
            Comparator::AtLeast
        } else if text.contains("maximum") || text.contains("not exceed") {
            Comparator::AtMost
        } else {
            Comparator::Equals
        }
    }

    pub fn evaluate(&self, value: f64, required: f64) -> bool {
        match self {
            Comparator::AtLeast => value >= required,
            Comparator::AtMost => value <= required,
            Comparator::Equals => value == required,
        }
    }

    /// Relation symbol for a pass / fail outcome
    pub fn symbol(&self, compliant: bool) -> &'static str {
        match (self, compliant) {
            (Comparator::AtLeast, true) => ">=",
            (Comparator::AtLeast, false) => "<",
            (Comparator::AtMost, true) => "<=",
            (Comparator::AtMost, false) => ">",
            (Comparator::Equals, true) => "==",
            (Comparator::Equals, false) => "!=",
        }
    }

    /// Qualifier appended to messages
    pub fn qualifier(&self) -> &'static str {
        match self {
            Comparator::AtLeast => "minimum required",
            Comparator::AtMost => "maximum allowed",
            Comparator::Equals => "required",
        }
    }
}

/// Requirement value: numeric limits are checkable, text is informational
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RequirementValue {
    Number(f64),
    Text(String),
}

impl RequirementValue {
    pub fn as_number(&self) -> Option<f64> {
        match self {
            RequirementValue::Number(n) => Some(*n),
            RequirementValue::Text(_) => None,
        }
    }
}

impl std::fmt::Display for RequirementValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RequirementValue::Number(n) => write!(f, "{}", n),
            RequirementValue::Text(s) => write!(f, "{}", s),
        }
    }
}

/// One parameter limit within a clause
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Requirement {
    pub parameter: String,
    /// Wording of the condition as printed in the code
    pub condition: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comparator: Option<Comparator>,
    pub value: RequirementValue,
    #[serde(default)]
    pub unit: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl Requirement {
    /// Explicit comparator, or one classified from `condition`
    pub fn comparator(&self) -> Comparator {
        self.comparator.unwrap_or_else(|| Comparator::classify(&self.condition))
    }
}

/// Variable appearing in a formula
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FormulaVariable {
    pub symbol: String,
    pub description: String,
    #[serde(default)]
    pub unit: String,
}

/// Reference formula quoted from a clause
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Formula {
    pub name: String,
    pub expression: String,
    pub description: String,
    #[serde(default)]
    pub variables: Vec<FormulaVariable>,
}

impl Formula {
    /// Loose text match used for advisory look-ups
    pub fn mentions(&self, parameter: &str) -> bool {
        let needle = parameter.to_lowercase();
        self.variables.iter().any(|v| v.symbol.contains(parameter))
            || self.description.to_lowercase().contains(&needle)
    }
}

/// Reference table for human readers; never machine-checked
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StandardTable {
    pub title: String,
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

/// Clause of a standard
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StandardSection {
    pub clause: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub requirements: Vec<Requirement>,
    #[serde(default)]
    pub formulas: Vec<Formula>,
    #[serde(default)]
    pub tables: Vec<StandardTable>,
}

impl StandardSection {
    /// Exact-match requirement look-up
    pub fn requirement(&self, parameter: &str) -> Option<&Requirement> {
        self.requirements.iter().find(|r| r.parameter == parameter)
    }
}

/// A design code and its clauses
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineeringStandard {
    pub id: String,
    /// Short display name (e.g., "IS 456:2000")
    pub name: String,
    pub full_name: String,
    pub country: String,
    pub year: u16,
    pub category: StandardCategory,
    pub applicable_regions: Vec<String>,
    #[serde(default)]
    pub sections: Vec<StandardSection>,
}

impl EngineeringStandard {
    /// Exact-match clause look-up
    pub fn section(&self, clause: &str) -> Option<&StandardSection> {
        self.sections.iter().find(|s| s.clause == clause)
    }

    /// Every (clause, requirement) pair for a parameter
    pub fn requirements_for(&self, parameter: &str) -> Vec<(&StandardSection, &Requirement)> {
        self.sections
            .iter()
            .filter_map(|s| s.requirement(parameter).map(|r| (s, r)))
            .collect()
    }

    /// Case-insensitive substring match against the applicable regions
    pub fn applies_to_region(&self, region: &str) -> bool {
        let needle = region.to_lowercase();
        self.applicable_regions
            .iter()
            .any(|r| r.to_lowercase().contains(&needle))
    }
}
