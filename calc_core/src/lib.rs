//! # calc_core - Reinforced Concrete Takeoff Engine
//!
//! `calc_core` turns column and foundation geometry, material and
//! reinforcement specs into concrete/steel quantities and costs, rolls them
//! up into a bar bending schedule, and checks design values against a
//! catalog of engineering standards. All inputs and outputs are
//! JSON-serializable.
//!
//! ## Design Philosophy
//!
//! - **Stateless**: Pure functions that take input and return results
//! - **JSON-First**: All types implement Serialize/Deserialize
//! - **Rich Errors**: Invalid inputs report every violated field
//! - **Data-Driven Standards**: Clauses live in a dataset, not in code
//!
//! ## Quick Start
//!
//! ```rust
//! use calc_core::compliance::ComplianceEngine;
//! use calc_core::standards::builtin;
//!
//! let ids = builtin().get_recommended_standards("India");
//! let engine = ComplianceEngine::builtin();
//! let check = engine.check_compliance(&ids[0], "26.5.3.1", "minimum_reinforcement_ratio", 1.2);
//! assert!(check.is_compliant);
//! ```
//!
//! ## Modules
//!
//! - [`geometry`] - Column shapes and foundation dimensions
//! - [`reinforcement`] - Column and footing bar layouts
//! - [`materials`] - Concrete/steel grades and material specs
//! - [`calculations`] - Quantity calculator (columns, foundations)
//! - [`bbs`] - Bar bending schedule rollup
//! - [`standards`] - Standards data model and registry
//! - [`compliance`] - Compliance engine
//! - [`project`] - Project container and settings
//! - [`units`] - Type-safe unit wrappers
//! - [`errors`] - Structured error types

pub mod bbs;
pub mod calculations;
pub mod compliance;
pub mod errors;
pub mod geometry;
pub mod materials;
pub mod project;
pub mod reinforcement;
pub mod standards;
pub mod units;

// Re-export commonly used types at crate root for convenience
pub use calculations::{CalculationItem, QuantityResult, Rates};
pub use compliance::{ComplianceEngine, ComplianceResult};
pub use errors::{CalcError, CalcResult};
pub use project::{GlobalSettings, Project, ProjectMetadata};
pub use standards::StandardsRegistry;
