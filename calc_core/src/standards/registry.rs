//! # Standards Registry
//!
//! Read-only catalog of [`EngineeringStandard`] records plus the
//! region → recommended-standards table.
//!
//! The built-in catalog is compiled into the crate from
//! `data/standards.json` and parsed once on first use ([`builtin`]). Other
//! catalogs can be loaded from JSON, TOML or YAML, or layered over the
//! built-in one with [`StandardsRegistry::with_overrides`] to add a
//! jurisdiction without touching code.
//!
//! ## Example
//!
//! ```rust
//! use calc_core::standards::builtin;
//!
//! let registry = builtin();
//! let is456 = registry.find_standard_by_id("IS456").unwrap();
//! assert_eq!(is456.name, "IS 456:2000");
//! assert_eq!(registry.get_recommended_standards("Atlantis"), registry.get_recommended_standards("India"));
//! ```

use std::collections::HashSet;
use std::path::Path;

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use super::{EngineeringStandard, Formula, StandardCategory, StandardTable};
use crate::errors::{CalcError, CalcResult};

static BUILTIN_JSON: &str = include_str!("../../data/standards.json");

static BUILTIN: Lazy<StandardsRegistry> = Lazy::new(|| {
    let registry = match StandardsRegistry::from_json_str(BUILTIN_JSON) {
        Ok(registry) => registry,
        Err(e) => panic!("embedded standards dataset is invalid: {}", e),
    };
    info!(
        version = %registry.version(),
        standards = registry.standards().len(),
        "built-in standards registry initialised"
    );
    registry
});

/// Process-wide built-in registry
pub fn builtin() -> &'static StandardsRegistry {
    &BUILTIN
}

/// Preferred standards for a region
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegionRecommendation {
    pub region: String,
    /// Other names accepted for the region (e.g., "US" for "USA")
    #[serde(default)]
    pub aliases: Vec<String>,
    pub standard_ids: Vec<String>,
}

impl RegionRecommendation {
    /// Case-insensitive match against the region name or an alias
    pub fn matches(&self, region: &str) -> bool {
        let region = region.trim();
        self.region.eq_ignore_ascii_case(region) || self.aliases.iter().any(|a| a.eq_ignore_ascii_case(region))
    }
}

/// Serialized form of a catalog.
///
/// Every field is optional so an override file can carry only the records it
/// changes.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct StandardsDataset {
    #[serde(default)]
    pub version: String,
    #[serde(default)]
    pub standards: Vec<EngineeringStandard>,
    #[serde(default)]
    pub recommendations: Vec<RegionRecommendation>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_region: Option<String>,
}

impl StandardsDataset {
    pub fn from_json_str(s: &str) -> CalcResult<Self> {
        Ok(serde_json::from_str(s)?)
    }

    pub fn from_toml_str(s: &str) -> CalcResult<Self> {
        Ok(toml::from_str(s)?)
    }

    pub fn from_yaml_str(s: &str) -> CalcResult<Self> {
        Ok(serde_yaml::from_str(s)?)
    }

    /// Read a dataset file, choosing the format from its extension
    /// (`json`, `toml`, `yaml`/`yml`).
    pub fn load(path: impl AsRef<Path>) -> CalcResult<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)
            .map_err(|e| CalcError::file_error("read", path.display().to_string(), e.to_string()))?;

        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase())
            .unwrap_or_default();

        match extension.as_str() {
            "json" => Self::from_json_str(&contents),
            "toml" => Self::from_toml_str(&contents),
            "yaml" | "yml" => Self::from_yaml_str(&contents),
            other => Err(CalcError::file_error(
                "parse",
                path.display().to_string(),
                format!("Unsupported standards file extension '{}'", other),
            )),
        }
    }
}

/// Immutable, validated standards catalog
#[derive(Debug, Clone, PartialEq)]
pub struct StandardsRegistry {
    version: String,
    standards: Vec<EngineeringStandard>,
    recommendations: Vec<RegionRecommendation>,
    default_region: String,
}

impl StandardsRegistry {
    /// Validate a dataset and build a registry from it.
    ///
    /// Ids must be non-empty and unique, recommendations may only name known
    /// ids, and the default region (first region when unset) must exist.
    pub fn from_dataset(dataset: StandardsDataset) -> CalcResult<Self> {
        let mut seen = HashSet::new();
        for standard in &dataset.standards {
            if standard.id.trim().is_empty() {
                return Err(CalcError::standards_data(format!(
                    "Standard '{}' has an empty id",
                    standard.name
                )));
            }
            if !seen.insert(standard.id.as_str()) {
                return Err(CalcError::standards_data(format!(
                    "Duplicate standard id '{}'",
                    standard.id
                )));
            }
        }

        for rec in &dataset.recommendations {
            if let Some(missing) = rec.standard_ids.iter().find(|id| !seen.contains(id.as_str())) {
                return Err(CalcError::standards_data(format!(
                    "Region '{}' recommends unknown standard '{}'",
                    rec.region, missing
                )));
            }
        }

        let default_region = match dataset.default_region {
            Some(region) => region,
            None => dataset
                .recommendations
                .first()
                .map(|r| r.region.clone())
                .unwrap_or_default(),
        };
        if !dataset.recommendations.is_empty()
            && !dataset.recommendations.iter().any(|r| r.matches(&default_region))
        {
            return Err(CalcError::standards_data(format!(
                "Default region '{}' has no recommendation entry",
                default_region
            )));
        }

        Ok(StandardsRegistry {
            version: dataset.version,
            standards: dataset.standards,
            recommendations: dataset.recommendations,
            default_region,
        })
    }

    pub fn from_json_str(s: &str) -> CalcResult<Self> {
        Self::from_dataset(StandardsDataset::from_json_str(s)?)
    }

    pub fn from_toml_str(s: &str) -> CalcResult<Self> {
        Self::from_dataset(StandardsDataset::from_toml_str(s)?)
    }

    pub fn from_yaml_str(s: &str) -> CalcResult<Self> {
        Self::from_dataset(StandardsDataset::from_yaml_str(s)?)
    }

    pub fn load(path: impl AsRef<Path>) -> CalcResult<Self> {
        Self::from_dataset(StandardsDataset::load(path)?)
    }

    /// Layer an override dataset on top of this catalog.
    ///
    /// Standards with a known id are replaced, new ids are appended, region
    /// entries are replaced by region name or appended. A non-empty override
    /// version or a default region replaces the current one.
    pub fn with_overrides(&self, overrides: StandardsDataset) -> CalcResult<Self> {
        let mut standards = self.standards.clone();
        let mut replaced = 0usize;
        for standard in overrides.standards {
            match standards.iter_mut().find(|s| s.id == standard.id) {
                Some(existing) => {
                    *existing = standard;
                    replaced += 1;
                }
                None => standards.push(standard),
            }
        }

        let mut recommendations = self.recommendations.clone();
        for rec in overrides.recommendations {
            match recommendations.iter_mut().find(|r| r.matches(&rec.region)) {
                Some(existing) => *existing = rec,
                None => recommendations.push(rec),
            }
        }

        let version = if overrides.version.is_empty() {
            self.version.clone()
        } else {
            overrides.version
        };

        let registry = Self::from_dataset(StandardsDataset {
            version,
            standards,
            recommendations,
            default_region: Some(overrides.default_region.unwrap_or_else(|| self.default_region.clone())),
        })?;

        info!(
            replaced,
            total = registry.standards.len(),
            "standards override dataset applied"
        );
        Ok(registry)
    }

    /// Serializable copy of the catalog
    pub fn to_dataset(&self) -> StandardsDataset {
        StandardsDataset {
            version: self.version.clone(),
            standards: self.standards.clone(),
            recommendations: self.recommendations.clone(),
            default_region: Some(self.default_region.clone()),
        }
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    pub fn default_region(&self) -> &str {
        &self.default_region
    }

    pub fn standards(&self) -> &[EngineeringStandard] {
        &self.standards
    }

    /// Regions with a recommendation entry, in catalog order
    pub fn regions(&self) -> Vec<&str> {
        self.recommendations.iter().map(|r| r.region.as_str()).collect()
    }

    pub fn find_standard_by_id(&self, id: &str) -> Option<&EngineeringStandard> {
        self.standards.iter().find(|s| s.id == id)
    }

    /// Standards whose applicable regions contain `region` (case-insensitive)
    pub fn get_standards_by_region(&self, region: &str) -> Vec<&EngineeringStandard> {
        self.standards.iter().filter(|s| s.applies_to_region(region)).collect()
    }

    pub fn get_standards_by_category(&self, category: StandardCategory) -> Vec<&EngineeringStandard> {
        self.standards.iter().filter(|s| s.category == category).collect()
    }

    /// Recommended standard ids for a region.
    ///
    /// Unknown regions get the default region's set; this is not an error.
    pub fn get_recommended_standards(&self, region: &str) -> Vec<String> {
        if let Some(rec) = self.recommendations.iter().find(|r| r.matches(region)) {
            return rec.standard_ids.clone();
        }

        warn!(
            region,
            fallback = %self.default_region,
            "unknown region, using default recommended standards"
        );
        self.recommendations
            .iter()
            .find(|r| r.matches(&self.default_region))
            .map(|r| r.standard_ids.clone())
            .unwrap_or_default()
    }

    /// Formulas of a standard that appear related to `parameter`.
    ///
    /// Advisory only: matches when a variable symbol contains the parameter
    /// or the description contains it (case-insensitive). Compliance checks
    /// never go through this look-up.
    pub fn get_formulas_for_parameter(&self, standard_id: &str, parameter: &str) -> Vec<&Formula> {
        self.find_standard_by_id(standard_id)
            .map(|s| {
                s.sections
                    .iter()
                    .flat_map(|sec| sec.formulas.iter())
                    .filter(|f| f.mentions(parameter))
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Reference tables of a standard, optionally limited to one clause
    pub fn get_standard_tables(&self, standard_id: &str, clause: Option<&str>) -> Vec<&StandardTable> {
        self.find_standard_by_id(standard_id)
            .map(|s| {
                s.sections
                    .iter()
                    .filter(|sec| clause.map_or(true, |c| sec.clause == c))
                    .flat_map(|sec| sec.tables.iter())
                    .collect()
            })
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::standards::{Comparator, RequirementValue};

    const SMALL_TOML: &str = r#"
version = "test"
default_region = "Testland"

[[recommendations]]
region = "Testland"
standard_ids = ["T1"]

[[standards]]
id = "T1"
name = "T 1:2020"
full_name = "Test standard"
country = "Testland"
year = 2020
category = "concrete"
applicable_regions = ["Testland"]

[[standards.sections]]
clause = "1.1"
title = "Minimum steel"

[[standards.sections.requirements]]
parameter = "minimum_reinforcement_ratio"
condition = "shall not be less than"
value = 0.10
unit = "%"
"#;

    #[test]
    fn test_builtin_loads() {
        let registry = builtin();
        assert!(registry.standards().len() >= 10);
        assert_eq!(registry.default_region(), "India");
        let ids: HashSet<_> = registry.standards().iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids.len(), registry.standards().len());
    }

    #[test]
    fn test_is456_column_clause() {
        let is456 = builtin().find_standard_by_id("IS456").unwrap();
        let section = is456.section("26.5.3.1").unwrap();
        let req = section.requirement("minimum_reinforcement_ratio").unwrap();
        assert_eq!(req.value, RequirementValue::Number(0.8));
        assert_eq!(req.unit, "%");
        assert_eq!(req.comparator(), Comparator::AtLeast);
        assert_eq!(
            section.requirement("maximum_reinforcement_ratio").unwrap().comparator(),
            Comparator::AtMost
        );
    }

    #[test]
    fn test_region_lookup_is_case_insensitive_substring() {
        let registry = builtin();
        let india: Vec<_> = registry.get_standards_by_region("india").iter().map(|s| s.id.clone()).collect();
        assert!(india.contains(&"IS456".to_string()));
        assert!(!india.contains(&"ACI318".to_string()));

        let europe = registry.get_standards_by_region("EURO");
        assert!(europe.iter().any(|s| s.id == "EN1992"));
    }

    #[test]
    fn test_category_lookup() {
        let seismic = builtin().get_standards_by_category(StandardCategory::Seismic);
        assert!(seismic.iter().all(|s| s.category == StandardCategory::Seismic));
        assert!(seismic.iter().any(|s| s.id == "IS13920"));
    }

    #[test]
    fn test_unknown_id() {
        assert!(builtin().find_standard_by_id("NOPE").is_none());
        assert!(builtin().get_formulas_for_parameter("NOPE", "fck").is_empty());
        assert!(builtin().get_standard_tables("NOPE", None).is_empty());
    }

    #[test]
    fn test_recommended_standards_and_fallback() {
        let registry = builtin();
        let india = registry.get_recommended_standards("India");
        assert_eq!(india[0], "IS456");
        assert_eq!(registry.get_recommended_standards("Atlantis"), india);
        assert_eq!(registry.get_recommended_standards("us"), vec!["ACI318", "ASCE7"]);
        assert_eq!(registry.get_recommended_standards("United States"), vec!["ACI318", "ASCE7"]);
    }

    #[test]
    fn test_formulas_for_parameter() {
        let registry = builtin();
        let formulas = registry.get_formulas_for_parameter("IS456", "fck");
        assert_eq!(formulas.len(), 1);
        assert!(formulas[0].expression.starts_with("Pu"));
        let by_description = registry.get_formulas_for_parameter("IS456", "development");
        assert_eq!(by_description.len(), 1);
    }

    #[test]
    fn test_standard_tables() {
        let registry = builtin();
        let all = registry.get_standard_tables("IS456", None);
        let cover = registry.get_standard_tables("IS456", Some("26.4.2"));
        assert_eq!(cover.len(), 1);
        assert!(cover[0].title.contains("Table 16"));
        assert!(all.len() > cover.len());
        assert!(registry.get_standard_tables("IS456", Some("99.9")).is_empty());
    }

    #[test]
    fn test_toml_dataset() {
        let registry = StandardsRegistry::from_toml_str(SMALL_TOML).unwrap();
        assert_eq!(registry.version(), "test");
        let req = registry.find_standard_by_id("T1").unwrap().section("1.1").unwrap().requirements[0].clone();
        assert_eq!(req.comparator, None);
        assert_eq!(req.comparator(), Comparator::AtLeast);
        assert_eq!(registry.get_recommended_standards("Elsewhere"), vec!["T1"]);
    }

    #[test]
    fn test_yaml_dataset() {
        let yaml = r#"
version: "y1"
standards:
  - id: Y1
    name: "Y 1"
    full_name: "Yaml standard"
    country: Nowhere
    year: 2001
    category: loads
    applicable_regions: [Nowhere]
"#;
        let registry = StandardsRegistry::from_yaml_str(yaml).unwrap();
        assert_eq!(registry.standards()[0].category, StandardCategory::Loads);
        assert!(registry.get_recommended_standards("Nowhere").is_empty());
    }

    #[test]
    fn test_duplicate_and_empty_ids_rejected() {
        let mut dataset = builtin().to_dataset();
        let copy = dataset.standards[0].clone();
        dataset.standards.push(copy);
        let err = StandardsRegistry::from_dataset(dataset).unwrap_err();
        assert_eq!(err.error_code(), "STANDARDS_DATA");

        let mut dataset = builtin().to_dataset();
        dataset.standards[0].id = "  ".to_string();
        assert!(StandardsRegistry::from_dataset(dataset).is_err());
    }

    #[test]
    fn test_unknown_recommended_id_rejected() {
        let mut dataset = builtin().to_dataset();
        dataset.recommendations[0].standard_ids.push("GHOST".to_string());
        let err = StandardsRegistry::from_dataset(dataset).unwrap_err();
        assert!(err.to_string().contains("GHOST"));
    }

    #[test]
    fn test_overrides_replace_and_append() {
        let overrides = StandardsDataset::from_toml_str(SMALL_TOML).unwrap();
        let mut replacement = builtin().find_standard_by_id("ACI318").unwrap().clone();
        replacement.year = 2025;

        let mut overrides = overrides;
        overrides.standards.push(replacement);
        overrides.default_region = None;

        let merged = builtin().with_overrides(overrides).unwrap();
        assert_eq!(merged.standards().len(), builtin().standards().len() + 1);
        assert_eq!(merged.find_standard_by_id("ACI318").unwrap().year, 2025);
        assert_eq!(merged.get_recommended_standards("testland"), vec!["T1"]);
        assert_eq!(merged.default_region(), "India");
        assert_eq!(merged.version(), "test");
        assert!(merged.regions().contains(&"Testland"));
    }

    #[test]
    fn test_load_rejects_unknown_extension() {
        let path = std::env::temp_dir().join("standards_override_test.ini");
        std::fs::write(&path, "x").unwrap();
        let err = StandardsDataset::load(&path).unwrap_err();
        assert_eq!(err.error_code(), "FILE_ERROR");
        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn test_load_json_file() {
        let path = std::env::temp_dir().join("standards_override_test.json");
        std::fs::write(&path, BUILTIN_JSON).unwrap();
        let registry = StandardsRegistry::load(&path).unwrap();
        assert_eq!(&registry, builtin());
        let _ = std::fs::remove_file(&path);
    }
}
