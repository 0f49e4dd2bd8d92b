//! # Error Types
//!
//! Structured error types for calc_core. Errors carry enough context for a
//! form-based UI (or any other consumer) to point at the offending field.
//!
//! Only two kinds of failure are surfaced as `Err`:
//!
//! - input validation at the API boundary (geometry, material, reinforcement)
//! - loading a standards dataset that is malformed
//!
//! Compliance look-ups that find nothing are *not* errors; they resolve to a
//! non-compliant result (see [`crate::compliance`]).
//!
//! ## Example
//!
//! ```rust
//! use calc_core::errors::{CalcResult, Violations};
//!
//! fn validate_height(height_mm: f64) -> CalcResult<()> {
//!     let mut v = Violations::new();
//!     v.require_positive("height_mm", height_mm);
//!     v.into_result()
//! }
//!
//! assert!(validate_height(3000.0).is_ok());
//! assert!(validate_height(-1.0).is_err());
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type alias for calc_core operations
pub type CalcResult<T> = Result<T, CalcError>;

/// One violated input field.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FieldViolation {
    /// Dotted field path (e.g., "geometry.width_mm", "main_bars.count")
    pub field: String,
    /// Offending value, rendered as text
    pub value: String,
    /// Why the value was rejected
    pub reason: String,
}

impl std::fmt::Display for FieldViolation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} = {} ({})", self.field, self.value, self.reason)
    }
}

/// Structured error type for calculation operations.
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", content = "details")]
pub enum CalcError {
    /// Material grade not recognised
    #[error("Material not found: {material_name}")]
    MaterialNotFound { material_name: String },

    /// Validation pass rejected one or more fields
    #[error("Validation failed: {}", format_violations(.violations))]
    Validation { violations: Vec<FieldViolation> },

    /// Standards dataset could not be parsed or is inconsistent
    #[error("Standards data error: {reason}")]
    StandardsData { reason: String },

    /// File I/O error
    #[error("File error: {operation} on '{path}' - {reason}")]
    FileError {
        operation: String,
        path: String,
        reason: String,
    },

    /// JSON/TOML/YAML serialization or deserialization error
    #[error("Serialization error: {reason}")]
    SerializationError { reason: String },
}

fn format_violations(violations: &[FieldViolation]) -> String {
    violations
        .iter()
        .map(|v| v.to_string())
        .collect::<Vec<_>>()
        .join("; ")
}

impl CalcError {
    /// Create a MaterialNotFound error
    pub fn material_not_found(material_name: impl Into<String>) -> Self {
        CalcError::MaterialNotFound {
            material_name: material_name.into(),
        }
    }

    /// Create a StandardsData error
    pub fn standards_data(reason: impl Into<String>) -> Self {
        CalcError::StandardsData {
            reason: reason.into(),
        }
    }

    /// Create a FileError
    pub fn file_error(operation: impl Into<String>, path: impl Into<String>, reason: impl Into<String>) -> Self {
        CalcError::FileError {
            operation: operation.into(),
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Create a SerializationError
    pub fn serialization(reason: impl Into<String>) -> Self {
        CalcError::SerializationError {
            reason: reason.into(),
        }
    }

    /// Violated fields, if this is a validation error
    pub fn violations(&self) -> &[FieldViolation] {
        match self {
            CalcError::Validation { violations } => violations,
            _ => &[],
        }
    }

    /// Get a short error code for programmatic handling
    pub fn error_code(&self) -> &'static str {
        match self {
            CalcError::MaterialNotFound { .. } => "MATERIAL_NOT_FOUND",
            CalcError::Validation { .. } => "VALIDATION_FAILED",
            CalcError::StandardsData { .. } => "STANDARDS_DATA",
            CalcError::FileError { .. } => "FILE_ERROR",
            CalcError::SerializationError { .. } => "SERIALIZATION_ERROR",
        }
    }
}

impl From<serde_json::Error> for CalcError {
    fn from(err: serde_json::Error) -> Self {
        CalcError::serialization(err.to_string())
    }
}

impl From<toml::de::Error> for CalcError {
    fn from(err: toml::de::Error) -> Self {
        CalcError::serialization(err.to_string())
    }
}

impl From<serde_yaml::Error> for CalcError {
    fn from(err: serde_yaml::Error) -> Self {
        CalcError::serialization(err.to_string())
    }
}

/// Collects every violated field during a validation pass.
///
/// Validators push into one collector instead of returning on the first
/// problem, so the caller sees the whole list at once.
#[derive(Debug, Default, Clone)]
pub struct Violations {
    items: Vec<FieldViolation>,
}

impl Violations {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a violation
    pub fn push(&mut self, field: impl Into<String>, value: impl ToString, reason: impl Into<String>) {
        self.items.push(FieldViolation {
            field: field.into(),
            value: value.to_string(),
            reason: reason.into(),
        });
    }

    /// Value must be finite and strictly positive
    pub fn require_positive(&mut self, field: &str, value: f64) {
        if !value.is_finite() {
            self.push(field, value, "Must be a finite number");
        } else if value <= 0.0 {
            self.push(field, value, "Must be positive");
        }
    }

    /// Value must be finite and zero or greater
    pub fn require_non_negative(&mut self, field: &str, value: f64) {
        if !value.is_finite() {
            self.push(field, value, "Must be a finite number");
        } else if value < 0.0 {
            self.push(field, value, "Cannot be negative");
        }
    }

    /// Value must lie in `[min, max]`
    pub fn require_range(&mut self, field: &str, value: f64, min: f64, max: f64) {
        if !value.is_finite() || value < min || value > max {
            self.push(field, value, format!("Must be between {} and {}", min, max));
        }
    }

    /// Merge violations from a nested validator, prefixing their field paths
    pub fn extend_prefixed(&mut self, prefix: &str, other: Violations) {
        for mut v in other.items {
            v.field = format!("{}.{}", prefix, v.field);
            self.items.push(v);
        }
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// `Ok(())` when nothing was recorded, otherwise [`CalcError::Validation`]
    pub fn into_result(self) -> CalcResult<()> {
        if self.items.is_empty() {
            Ok(())
        } else {
            Err(CalcError::Validation {
                violations: self.items,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_serialization() {
        let mut v = Violations::new();
        v.require_positive("width_mm", -5.0);
        let error = v.into_result().unwrap_err();
        let json = serde_json::to_string(&error).unwrap();
        let roundtrip: CalcError = serde_json::from_str(&json).unwrap();
        assert_eq!(error, roundtrip);
    }

    #[test]
    fn test_error_codes() {
        assert_eq!(CalcError::material_not_found("M99").error_code(), "MATERIAL_NOT_FOUND");
        assert_eq!(CalcError::file_error("read", "x.toml", "missing").error_code(), "FILE_ERROR");
        assert_eq!(CalcError::standards_data("bad").error_code(), "STANDARDS_DATA");
    }

    #[test]
    fn test_violations_collects_every_field() {
        let mut v = Violations::new();
        v.require_positive("width_mm", 0.0);
        v.require_positive("depth_mm", -10.0);
        v.require_non_negative("cover_mm", 40.0);
        v.require_range("waste_percent", 150.0, 0.0, 100.0);
        assert_eq!(v.len(), 3);

        let err = v.into_result().unwrap_err();
        assert_eq!(err.error_code(), "VALIDATION_FAILED");
        let fields: Vec<&str> = err.violations().iter().map(|v| v.field.as_str()).collect();
        assert_eq!(fields, vec!["width_mm", "depth_mm", "waste_percent"]);
    }

    #[test]
    fn test_nan_is_rejected() {
        let mut v = Violations::new();
        v.require_non_negative("spacing_mm", f64::NAN);
        assert!(!v.is_empty());
    }

    #[test]
    fn test_prefixed_merge() {
        let mut inner = Violations::new();
        inner.require_positive("count", 0.0);
        let mut outer = Violations::new();
        outer.extend_prefixed("main_bars", inner);
        let err = outer.into_result().unwrap_err();
        assert_eq!(err.violations()[0].field, "main_bars.count");
        assert!(err.to_string().contains("main_bars.count"));
    }
}
