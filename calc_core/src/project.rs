//! # Project Data Structures
//!
//! The `Project` struct groups the elements of one takeoff with the
//! settings used to price and check them. It is JSON-serializable; storing
//! it is up to the caller.
//!
//! ## Structure
//!
//! ```text
//! Project
//! ├── meta: ProjectMetadata (version, estimator, job info, timestamps)
//! ├── settings: GlobalSettings (region, standards, rates, display units)
//! └── items: HashMap<Uuid, CalculationItem> (columns and foundations)
//! ```
//!
//! ## Example
//!
//! ```rust
//! use calc_core::project::Project;
//!
//! let project = Project::new("Jane Estimator", "25-042", "ACME Builders");
//! let json = serde_json::to_string_pretty(&project).unwrap();
//! assert!(json.contains("25-042"));
//! ```

use std::collections::HashMap;
use std::path::Path;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;
use uuid::Uuid;

use crate::bbs::{rollup_quantities, BbsBreakdown, CuttingCostBasis, RebarCut};
use crate::calculations::{CalculationItem, QuantityResult, Rates};
use crate::compliance::{ComplianceEngine, ComplianceResult};
use crate::errors::{CalcError, CalcResult};
use crate::materials::MaterialSpec;
use crate::standards::StandardsRegistry;
use crate::units::UnitSystem;

/// Current schema version for serialized projects
pub const SCHEMA_VERSION: &str = "0.1.0";

/// Root project container.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Project {
    pub meta: ProjectMetadata,

    pub settings: GlobalSettings,

    /// All elements, keyed by UUID
    pub items: HashMap<Uuid, CalculationItem>,
}

impl Project {
    /// Create a new empty project.
    ///
    /// # Example
    ///
    /// ```rust
    /// use calc_core::project::Project;
    ///
    /// let project = Project::new("John Doe", "25-001", "Client Corp");
    /// assert_eq!(project.meta.estimator, "John Doe");
    /// ```
    pub fn new(estimator: impl Into<String>, job_id: impl Into<String>, client: impl Into<String>) -> Self {
        let now = Utc::now();
        Project {
            meta: ProjectMetadata {
                version: SCHEMA_VERSION.to_string(),
                estimator: estimator.into(),
                job_id: job_id.into(),
                client: client.into(),
                created: now,
                modified: now,
            },
            settings: GlobalSettings::default(),
            items: HashMap::new(),
        }
    }

    /// Add an element and return the UUID assigned to it.
    pub fn add_item(&mut self, item: CalculationItem) -> Uuid {
        let id = Uuid::new_v4();
        self.items.insert(id, item);
        self.touch();
        id
    }

    /// Remove an element by UUID.
    pub fn remove_item(&mut self, id: &Uuid) -> Option<CalculationItem> {
        let item = self.items.remove(id);
        if item.is_some() {
            self.touch();
        }
        item
    }

    pub fn get_item(&self, id: &Uuid) -> Option<&CalculationItem> {
        self.items.get(id)
    }

    /// Mutable access; marks the project as modified when the item exists.
    pub fn get_item_mut(&mut self, id: &Uuid) -> Option<&mut CalculationItem> {
        if self.items.contains_key(id) {
            self.meta.modified = Utc::now();
            self.items.get_mut(id)
        } else {
            None
        }
    }

    pub fn touch(&mut self) {
        self.meta.modified = Utc::now();
    }

    pub fn item_count(&self) -> usize {
        self.items.len()
    }

    /// Items ordered by label, then id
    fn sorted_items(&self) -> Vec<(&Uuid, &CalculationItem)> {
        let mut items: Vec<_> = self.items.iter().collect();
        items.sort_by(|a, b| a.1.label().cmp(b.1.label()).then(a.0.cmp(b.0)));
        items
    }

    /// Quantities for every element plus a schedule rollup.
    ///
    /// Uses the project's rates and cutting cost basis. Fails on the first
    /// element whose inputs do not validate.
    pub fn takeoff(&self, rebar_cuts: &[RebarCut]) -> CalcResult<ProjectTakeoff> {
        let rates = &self.settings.rates;
        let mut lines = Vec::with_capacity(self.items.len());
        for (id, item) in self.sorted_items() {
            lines.push(TakeoffLine {
                id: *id,
                label: item.label().to_string(),
                calc_type: item.calc_type().to_string(),
                result: item.calculate(rates)?,
            });
        }

        let results: Vec<QuantityResult> = lines.iter().map(|l| l.result.clone()).collect();
        let bbs = rollup_quantities(&results, rates, rebar_cuts, self.settings.cutting_cost_basis);
        debug!(items = lines.len(), total_cost = bbs.total_cost, "project takeoff");

        Ok(ProjectTakeoff { items: lines, bbs })
    }

    /// Standards the project is checked against: the explicit selection, or
    /// the region's recommended set when none is selected.
    pub fn selected_standards(&self, registry: &StandardsRegistry) -> Vec<String> {
        if self.settings.standard_ids.is_empty() {
            registry.get_recommended_standards(&self.settings.region)
        } else {
            self.settings.standard_ids.clone()
        }
    }

    /// Check every element against the selected standards of the built-in
    /// registry.
    pub fn compliance(&self) -> Vec<ItemCompliance> {
        self.compliance_with(&ComplianceEngine::builtin())
    }

    /// Check every element with a specific engine.
    pub fn compliance_with(&self, engine: &ComplianceEngine<'_>) -> Vec<ItemCompliance> {
        let standard_ids = self.selected_standards(engine.registry());
        self.sorted_items()
            .into_iter()
            .map(|(id, item)| ItemCompliance {
                id: *id,
                label: item.label().to_string(),
                results: engine.check_design(&standard_ids, &item.design_parameters()),
            })
            .collect()
    }
}

impl Default for Project {
    fn default() -> Self {
        Project::new("", "", "")
    }
}

/// Project metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectMetadata {
    /// Schema version (for migration compatibility)
    pub version: String,

    /// Person responsible for the estimate
    pub estimator: String,

    pub job_id: String,

    pub client: String,

    pub created: DateTime<Utc>,

    pub modified: DateTime<Utc>,
}

/// Global project settings.
///
/// Every field has a default, so a settings file only needs the values it
/// changes.
///
/// ## TOML Example
///
/// ```toml
/// region = "USA"
/// standard_ids = ["ACI318"]
/// unit_system = "imperial"
/// cutting_cost_basis = "per_piece"
///
/// [rates]
/// concrete_per_m3 = 180.0
/// steel_per_kg = 1.2
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GlobalSettings {
    /// Region used to pick recommended standards (e.g., "India")
    pub region: String,

    /// Standards to check against; empty means the region's recommendation
    pub standard_ids: Vec<String>,

    pub rates: Rates,

    /// Display units for summaries
    pub unit_system: UnitSystem,

    pub cutting_cost_basis: CuttingCostBasis,

    /// Material spec applied to new elements
    pub default_material: MaterialSpec,
}

impl Default for GlobalSettings {
    fn default() -> Self {
        GlobalSettings {
            region: "India".to_string(),
            standard_ids: Vec::new(),
            rates: Rates::default(),
            unit_system: UnitSystem::default(),
            cutting_cost_basis: CuttingCostBasis::default(),
            default_material: MaterialSpec::default(),
        }
    }
}

impl GlobalSettings {
    pub fn from_toml_str(s: &str) -> CalcResult<Self> {
        Ok(toml::from_str(s)?)
    }

    pub fn from_toml_file(path: impl AsRef<Path>) -> CalcResult<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)
            .map_err(|e| CalcError::file_error("read", path.display().to_string(), e.to_string()))?;
        Self::from_toml_str(&contents)
    }
}

/// Quantities for one project element
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TakeoffLine {
    pub id: Uuid,
    pub label: String,
    pub calc_type: String,
    pub result: QuantityResult,
}

/// Per-element quantities and the combined schedule rollup
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectTakeoff {
    pub items: Vec<TakeoffLine>,
    pub bbs: BbsBreakdown,
}

/// Compliance results for one project element
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemCompliance {
    pub id: Uuid,
    pub label: String,
    pub results: Vec<ComplianceResult>,
}

impl ItemCompliance {
    pub fn is_compliant(&self) -> bool {
        self.results.iter().all(|r| r.overall_compliant)
    }
}
