//! # Compliance Engine
//!
//! Checks design values against the requirements in a [`StandardsRegistry`].
//!
//! Look-ups are exact: standard by id, section by clause, requirement by
//! parameter name. Anything that cannot be resolved yields a non-compliant
//! check with a message instead of an error, so a caller always has a
//! result to show.
//!
//! ## Example
//!
//! ```rust
//! use calc_core::compliance::ComplianceEngine;
//!
//! let engine = ComplianceEngine::builtin();
//! let check = engine.check_compliance("IS456", "26.5.3.1", "minimum_reinforcement_ratio", 0.5);
//! assert!(!check.is_compliant);
//! assert!(check.message.contains("0.5 < 0.8 % (minimum required)"));
//! ```

use std::collections::BTreeMap;

use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::calculations::{ColumnTakeoffInput, FoundationTakeoffInput};
use crate::materials::bar_area_m2;
use crate::standards::{builtin, RequirementValue, StandardsRegistry};

/// One value to check against one clause
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComplianceCheckInput {
    pub clause: String,
    pub parameter: String,
    pub value: f64,
}

impl ComplianceCheckInput {
    pub fn new(clause: impl Into<String>, parameter: impl Into<String>, value: f64) -> Self {
        ComplianceCheckInput {
            clause: clause.into(),
            parameter: parameter.into(),
            value,
        }
    }
}

/// Outcome of one check
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComplianceCheckResult {
    pub clause: String,
    pub parameter: String,
    pub is_compliant: bool,
    pub message: String,
}

/// All checks run against one standard
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComplianceResult {
    pub standard_id: String,
    pub standard_name: String,
    pub checks: Vec<ComplianceCheckResult>,
    /// AND of every check (true when there are no checks)
    pub overall_compliant: bool,
}

impl ComplianceResult {
    pub fn failed_checks(&self) -> impl Iterator<Item = &ComplianceCheckResult> {
        self.checks.iter().filter(|c| !c.is_compliant)
    }
}

/// Named design values derived from an element's inputs.
///
/// Keys are requirement parameter names as used in the standards data
/// (e.g., `minimum_reinforcement_ratio`).
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct DesignParameters {
    values: BTreeMap<String, f64>,
}

impl DesignParameters {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, parameter: impl Into<String>, value: f64) {
        self.values.insert(parameter.into(), value);
    }

    pub fn get(&self, parameter: &str) -> Option<f64> {
        self.values.get(parameter).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.values.iter().map(|(k, v)| (k.as_str(), *v))
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Column values: steel ratio, bar and tie detailing, cover, section
    /// size and material strengths.
    pub fn for_column(input: &ColumnTakeoffInput) -> Self {
        let shape = &input.geometry.shape;
        let rebar = &input.reinforcement;
        let gross_area = shape.cross_section_area_mm2();
        let ratio = if gross_area > 0.0 {
            rebar.main_steel_area_mm2() / gross_area * 100.0
        } else {
            0.0
        };

        let mut params = DesignParameters::new();
        params.set("minimum_reinforcement_ratio", ratio);
        params.set("maximum_reinforcement_ratio", ratio);
        params.set("minimum_bar_count", rebar.main_bars.count as f64);
        params.set("minimum_bar_diameter", rebar.main_bars.diameter_mm);
        params.set("minimum_column_cover", rebar.main_bars.cover_mm);
        params.set("maximum_tie_spacing", rebar.stirrups.spacing_mm);
        params.set("minimum_tie_diameter", rebar.stirrups.diameter_mm);
        params.set("minimum_column_dimension", shape.least_dimension_mm());
        params.set("minimum_concrete_grade", input.material.concrete_grade.fck_mpa());
        params.set("maximum_steel_yield_strength", input.material.steel_grade.fy_mpa());
        params
    }

    /// Footing values: thickness, cover, bottom-mat ratio and spacing,
    /// material strengths.
    ///
    /// The ratio is the lower of the two directions; each direction's bars
    /// are spread across the orthogonal plan dimension.
    pub fn for_foundation(input: &FoundationTakeoffInput) -> Self {
        let g = &input.geometry;
        let r = &input.reinforcement;

        let direction_ratio = |count: u32, diameter_mm: f64, spread_mm: f64| {
            let section_mm2 = spread_mm * g.thickness_mm;
            if section_mm2 > 0.0 {
                count as f64 * bar_area_m2(diameter_mm) * 1e6 / section_mm2 * 100.0
            } else {
                0.0
            }
        };
        let ratio_x = direction_ratio(r.bottom_bars_x.count, r.bottom_bars_x.diameter_mm, g.width_mm);
        let ratio_y = direction_ratio(r.bottom_bars_y.count, r.bottom_bars_y.diameter_mm, g.length_mm);

        let mut params = DesignParameters::new();
        params.set("minimum_footing_thickness", g.thickness_mm);
        params.set("minimum_footing_cover", r.cover_mm);
        params.set("minimum_footing_reinforcement_ratio", ratio_x.min(ratio_y));
        params.set(
            "maximum_footing_bar_spacing",
            r.bottom_bars_x.spacing_mm.max(r.bottom_bars_y.spacing_mm),
        );
        params.set("minimum_concrete_grade", input.material.concrete_grade.fck_mpa());
        params.set("maximum_steel_yield_strength", input.material.steel_grade.fy_mpa());
        params
    }
}

/// Stateless checker over a borrowed registry.
#[derive(Debug, Clone, Copy)]
pub struct ComplianceEngine<'a> {
    registry: &'a StandardsRegistry,
}

impl ComplianceEngine<'static> {
    /// Engine over the built-in registry
    pub fn builtin() -> Self {
        ComplianceEngine { registry: builtin() }
    }
}

impl<'a> ComplianceEngine<'a> {
    pub fn new(registry: &'a StandardsRegistry) -> Self {
        ComplianceEngine { registry }
    }

    pub fn registry(&self) -> &'a StandardsRegistry {
        self.registry
    }

    /// Check one value against one requirement.
    pub fn check_compliance(
        &self,
        standard_id: &str,
        clause: &str,
        parameter: &str,
        value: f64,
    ) -> ComplianceCheckResult {
        let outcome = |is_compliant: bool, message: String| {
            debug!(standard_id, clause, parameter, value, is_compliant, "compliance check");
            ComplianceCheckResult {
                clause: clause.to_string(),
                parameter: parameter.to_string(),
                is_compliant,
                message,
            }
        };

        let Some(standard) = self.registry.find_standard_by_id(standard_id) else {
            return outcome(false, "Standard not found".to_string());
        };
        let Some(section) = standard.section(clause) else {
            return outcome(false, "Section not found in standard".to_string());
        };
        let Some(requirement) = section.requirement(parameter) else {
            return outcome(false, "Parameter not found in section".to_string());
        };

        let prefix = format!("{} Clause {}", standard.name, clause);
        let required = match &requirement.value {
            RequirementValue::Number(n) => *n,
            RequirementValue::Text(text) => {
                return outcome(
                    false,
                    format!(
                        "{}: requirement \"{}\" is not numeric; {} cannot be checked",
                        prefix, text, value
                    ),
                );
            }
        };

        let comparator = requirement.comparator();
        let is_compliant = comparator.evaluate(value, required);
        let unit = if requirement.unit.is_empty() {
            String::new()
        } else {
            format!(" {}", requirement.unit)
        };

        outcome(
            is_compliant,
            format!(
                "{}: {} {} {}{} ({})",
                prefix,
                value,
                comparator.symbol(is_compliant),
                required,
                unit,
                comparator.qualifier()
            ),
        )
    }

    /// Run every check against one standard.
    ///
    /// A standard with nothing to check is reported as a single failed
    /// check, never as an empty pass.
    pub fn check_standard(&self, standard_id: &str, checks: &[ComplianceCheckInput]) -> ComplianceResult {
        let mut results: Vec<ComplianceCheckResult> = checks
            .iter()
            .map(|c| self.check_compliance(standard_id, &c.clause, &c.parameter, c.value))
            .collect();
        if results.is_empty() {
            debug!(standard_id, "no applicable requirements");
            results.push(ComplianceCheckResult {
                clause: String::new(),
                parameter: String::new(),
                is_compliant: false,
                message: "No applicable requirements".to_string(),
            });
        }

        ComplianceResult {
            standard_id: standard_id.to_string(),
            standard_name: self
                .registry
                .find_standard_by_id(standard_id)
                .map_or_else(|| standard_id.to_string(), |s| s.name.clone()),
            overall_compliant: results.iter().all(|c| c.is_compliant),
            checks: results,
        }
    }

    /// Run the same checks against several standards.
    ///
    /// Standards are evaluated in parallel; the output keeps the order of
    /// `standard_ids`.
    pub fn check_multi_standard_compliance(
        &self,
        standard_ids: &[String],
        checks: &[ComplianceCheckInput],
    ) -> Vec<ComplianceResult> {
        standard_ids
            .par_iter()
            .map(|id| self.check_standard(id, checks))
            .collect()
    }

    /// Checks covering every clause of a standard that defines one of the
    /// given parameters.
    ///
    /// For an unknown standard each parameter is returned once with an empty
    /// clause, so running the checks fails closed.
    pub fn checks_for(&self, standard_id: &str, params: &DesignParameters) -> Vec<ComplianceCheckInput> {
        let Some(standard) = self.registry.find_standard_by_id(standard_id) else {
            return params
                .iter()
                .map(|(name, value)| ComplianceCheckInput::new("", name, value))
                .collect();
        };

        params
            .iter()
            .flat_map(|(name, value)| {
                standard
                    .requirements_for(name)
                    .into_iter()
                    .map(move |(section, _)| ComplianceCheckInput::new(section.clause.clone(), name, value))
            })
            .collect()
    }

    /// Check design parameters against each standard's own clauses.
    pub fn check_design(&self, standard_ids: &[String], params: &DesignParameters) -> Vec<ComplianceResult> {
        standard_ids
            .par_iter()
            .map(|id| self.check_standard(id, &self.checks_for(id, params)))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::{ColumnGeometry, ColumnShape, FoundationGeometry, FoundationType};
    use crate::materials::MaterialSpec;
    use crate::reinforcement::{ColumnReinforcement, FootingReinforcement, MainBars, Stirrups};
    use crate::standards::StandardsDataset;

    fn eurocode_style_registry() -> StandardsRegistry {
        let json = r#"{
            "version": "test",
            "standards": [{
                "id": "EC-TEST",
                "name": "EC Test",
                "full_name": "Eurocode-style test standard",
                "country": "Testland",
                "year": 2004,
                "category": "concrete",
                "applicable_regions": ["Testland"],
                "sections": [{
                    "clause": "9.5.2",
                    "title": "Columns",
                    "requirements": [
                        { "parameter": "minimum_reinforcement_ratio", "condition": "minimum area", "value": 0.10, "unit": "%" },
                        { "parameter": "maximum_tie_spacing", "condition": "shall not exceed", "value": 400, "unit": "mm" },
                        { "parameter": "steel_class", "condition": "shall be", "value": "B or C" }
                    ]
                }]
            }]
        }"#;
        StandardsRegistry::from_json_str(json).unwrap()
    }

    fn test_column() -> ColumnTakeoffInput {
        ColumnTakeoffInput {
            label: "C-1".to_string(),
            geometry: ColumnGeometry::new(ColumnShape::square(400.0), 3000.0),
            material: MaterialSpec::default(),
            reinforcement: ColumnReinforcement {
                main_bars: MainBars {
                    count: 8,
                    diameter_mm: 16.0,
                    cover_mm: 40.0,
                    development_length_mm: 0.0,
                },
                stirrups: serde_json::from_str::<Stirrups>(r#"{ "diameter_mm": 8.0, "spacing_mm": 150.0 }"#).unwrap(),
            },
        }
    }

    #[test]
    fn test_is456_minimum_ratio_fails() {
        let engine = ComplianceEngine::builtin();
        let check = engine.check_compliance("IS456", "26.5.3.1", "minimum_reinforcement_ratio", 0.5);
        assert!(!check.is_compliant);
        assert!(check.message.contains("0.5 < 0.8 % (minimum required)"), "{}", check.message);
        assert!(check.message.starts_with("IS 456:2000 Clause 26.5.3.1"));
    }

    #[test]
    fn test_eurocode_style_minimum_passes() {
        let registry = eurocode_style_registry();
        let engine = ComplianceEngine::new(&registry);
        let check = engine.check_compliance("EC-TEST", "9.5.2", "minimum_reinforcement_ratio", 0.5);
        assert!(check.is_compliant);
        assert!(check.message.contains("0.5 >= 0.1 %"));
    }

    #[test]
    fn test_boundaries() {
        let engine = ComplianceEngine::builtin();
        let eps = 1e-9;
        let min = |v| engine.check_compliance("IS456", "26.5.3.1", "minimum_reinforcement_ratio", v).is_compliant;
        assert!(min(0.8));
        assert!(!min(0.8 - eps));
        assert!(min(0.8 + eps));

        let max = |v| engine.check_compliance("IS456", "26.5.3.1", "maximum_reinforcement_ratio", v).is_compliant;
        assert!(max(6.0));
        assert!(max(6.0 - eps));
        assert!(!max(6.0 + eps));
    }

    #[test]
    fn test_not_found_paths() {
        let engine = ComplianceEngine::builtin();
        let check = engine.check_compliance("NOPE", "1", "x", 1.0);
        assert!(!check.is_compliant);
        assert_eq!(check.message, "Standard not found");

        let check = engine.check_compliance("IS456", "99.99", "minimum_reinforcement_ratio", 1.0);
        assert_eq!(check.message, "Section not found in standard");

        let check = engine.check_compliance("IS456", "26.5.3.1", "no_such_parameter", 1.0);
        assert_eq!(check.message, "Parameter not found in section");
        assert_eq!(check.clause, "26.5.3.1");
    }

    #[test]
    fn test_equals_and_text_requirements() {
        let engine = ComplianceEngine::builtin();
        let check = engine.check_compliance("IS875-1", "Table 1", "reinforced_concrete_unit_weight", 25.0);
        assert!(check.is_compliant);
        assert!(check.message.contains("25 == 25 kN/m³ (required)"));
        assert!(!engine.check_compliance("IS875-1", "Table 1", "reinforced_concrete_unit_weight", 24.0).is_compliant);

        let registry = eurocode_style_registry();
        let engine = ComplianceEngine::new(&registry);
        let check = engine.check_compliance("EC-TEST", "9.5.2", "steel_class", 1.0);
        assert!(!check.is_compliant);
        assert!(check.message.contains("not numeric"));
    }

    #[test]
    fn test_multi_standard_order_preserved() {
        let engine = ComplianceEngine::builtin();
        let checks = vec![ComplianceCheckInput::new("26.5.3.1", "minimum_reinforcement_ratio", 1.0)];
        let ids: Vec<String> = ["ACI318", "IS456", "EN1992", "NOPE"].iter().map(|s| s.to_string()).collect();
        let results = engine.check_multi_standard_compliance(&ids, &checks);
        let out: Vec<&str> = results.iter().map(|r| r.standard_id.as_str()).collect();
        assert_eq!(out, vec!["ACI318", "IS456", "EN1992", "NOPE"]);

        // Clause only exists in IS456
        assert!(!results[0].overall_compliant);
        assert!(results[1].overall_compliant);
        assert_eq!(results[1].standard_name, "IS 456:2000");
        assert_eq!(results[3].checks[0].message, "Standard not found");
    }

    #[test]
    fn test_fail_closed_without_matching_requirements() {
        let engine = ComplianceEngine::builtin();
        let checks = vec![
            ComplianceCheckInput::new("1.1", "a", 1.0),
            ComplianceCheckInput::new("1.2", "b", 2.0),
        ];
        let results = engine.check_multi_standard_compliance(&["ASCE7".to_string()], &checks);
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].checks.len(), 2);
        assert!(!results[0].overall_compliant);
        assert_eq!(results[0].failed_checks().count(), 2);
    }

    #[test]
    fn test_check_design_without_applicable_clauses_fails() {
        let engine = ComplianceEngine::builtin();
        let params = DesignParameters::for_column(&test_column());
        assert!(engine.checks_for("ASCE7", &params).is_empty());

        let results = engine.check_design(&["ACI318".to_string(), "ASCE7".to_string()], &params);
        assert_eq!(results[1].standard_id, "ASCE7");
        assert!(!results[1].overall_compliant);
        assert_eq!(results[1].checks.len(), 1);
        assert_eq!(results[1].checks[0].message, "No applicable requirements");
        assert!(results[0].checks.iter().all(|c| c.message != "No applicable requirements"));
    }

    #[test]
    fn test_check_standard_with_no_checks_fails() {
        let result = ComplianceEngine::builtin().check_standard("IS456", &[]);
        assert!(!result.overall_compliant);
        assert_eq!(result.failed_checks().count(), 1);
    }

    #[test]
    fn test_column_design_parameters() {
        let params = DesignParameters::for_column(&test_column());
        let ratio = 8.0 * std::f64::consts::PI * 64.0 / 160_000.0 * 100.0;
        assert!((params.get("minimum_reinforcement_ratio").unwrap() - ratio).abs() < 1e-9);
        assert_eq!(params.get("minimum_bar_count"), Some(8.0));
        assert_eq!(params.get("maximum_tie_spacing"), Some(150.0));
        assert_eq!(params.get("minimum_column_dimension"), Some(400.0));
        assert_eq!(params.get("minimum_concrete_grade"), Some(25.0));
        assert_eq!(params.get("maximum_steel_yield_strength"), Some(415.0));
        assert!(params.get("minimum_footing_thickness").is_none());
    }

    #[test]
    fn test_check_design_for_column() {
        let engine = ComplianceEngine::builtin();
        let params = DesignParameters::for_column(&test_column());
        let results = engine.check_design(&["IS456".to_string(), "IS13920".to_string()], &params);

        // ~1.0 % steel, 8 × 16 mm bars, 40 mm cover, 8 mm ties @ 150, M25
        assert!(results[0].overall_compliant, "{:?}", results[0].failed_checks().collect::<Vec<_>>());
        assert!(results[0].checks.iter().any(|c| c.clause == "26.5.3.2"));
        assert!(results[1].overall_compliant);
        assert!(results[1].checks.iter().any(|c| c.parameter == "minimum_column_dimension"));
    }

    #[test]
    fn test_check_design_flags_small_column() {
        let mut input = test_column();
        input.geometry.shape = ColumnShape::square(230.0);
        input.reinforcement.main_bars.count = 4;
        input.reinforcement.main_bars.diameter_mm = 10.0;
        let params = DesignParameters::for_column(&input);

        let results = ComplianceEngine::builtin().check_design(&["IS456".to_string(), "IS13920".to_string()], &params);
        let failed: Vec<&str> = results[0].failed_checks().map(|c| c.parameter.as_str()).collect();
        assert!(failed.contains(&"minimum_bar_diameter"));
        assert!(failed.contains(&"minimum_reinforcement_ratio"));
        assert!(results[1]
            .failed_checks()
            .any(|c| c.parameter == "minimum_column_dimension"));
    }

    #[test]
    fn test_check_design_for_foundation() {
        let input = FoundationTakeoffInput {
            label: "F-1".to_string(),
            geometry: FoundationGeometry::new(FoundationType::Isolated, 2000.0, 2000.0, 500.0),
            material: MaterialSpec::default(),
            reinforcement: FootingReinforcement::two_way(12, 12.0, 150.0),
        };
        let params = DesignParameters::for_foundation(&input);
        let ratio = 12.0 * std::f64::consts::PI * 36.0 / (2000.0 * 500.0) * 100.0;
        assert!((params.get("minimum_footing_reinforcement_ratio").unwrap() - ratio).abs() < 1e-9);

        let results = ComplianceEngine::builtin().check_design(&["IS456".to_string()], &params);
        let result = &results[0];
        assert!(result.checks.iter().any(|c| c.parameter == "minimum_footing_thickness"));
        assert!(result.overall_compliant, "{:?}", result.failed_checks().collect::<Vec<_>>());
    }

    #[test]
    fn test_checks_for_unknown_standard_fail_closed() {
        let engine = ComplianceEngine::builtin();
        let params = DesignParameters::for_column(&test_column());
        let checks = engine.checks_for("NOPE", &params);
        assert_eq!(checks.len(), params.len());
        let results = engine.check_design(&["NOPE".to_string()], &params);
        assert!(!results[0].overall_compliant);
    }

    #[test]
    fn test_engine_over_override_registry() {
        let mut dataset = StandardsDataset::default();
        dataset.standards = eurocode_style_registry().standards().to_vec();
        let merged = builtin().with_overrides(dataset).unwrap();
        let engine = ComplianceEngine::new(&merged);
        let results = engine.check_multi_standard_compliance(
            &["IS456".to_string(), "EC-TEST".to_string()],
            &[ComplianceCheckInput::new("9.5.2", "minimum_reinforcement_ratio", 0.5)],
        );
        assert!(!results[0].overall_compliant);
        assert!(results[1].overall_compliant);
    }
}
