//! Concrete Grades
//!
//! Nominal mix grades labelled by their characteristic cube strength fck
//! (e.g., M25 → fck = 25 MPa).

use serde::{Deserialize, Serialize};

use crate::errors::{CalcError, CalcResult};

/// Concrete grade
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ConcreteGrade {
    M15,
    M20,
    M25,
    M30,
    M35,
    M40,
    M45,
    M50,
}

impl ConcreteGrade {
    /// All grades for UI selection
    pub const ALL: [ConcreteGrade; 8] = [
        ConcreteGrade::M15,
        ConcreteGrade::M20,
        ConcreteGrade::M25,
        ConcreteGrade::M30,
        ConcreteGrade::M35,
        ConcreteGrade::M40,
        ConcreteGrade::M45,
        ConcreteGrade::M50,
    ];

    /// Characteristic compressive strength fck (MPa)
    pub fn fck_mpa(&self) -> f64 {
        match self {
            ConcreteGrade::M15 => 15.0,
            ConcreteGrade::M20 => 20.0,
            ConcreteGrade::M25 => 25.0,
            ConcreteGrade::M30 => 30.0,
            ConcreteGrade::M35 => 35.0,
            ConcreteGrade::M40 => 40.0,
            ConcreteGrade::M45 => 45.0,
            ConcreteGrade::M50 => 50.0,
        }
    }

    /// Grade label (e.g., "M25")
    pub fn label(&self) -> &'static str {
        match self {
            ConcreteGrade::M15 => "M15",
            ConcreteGrade::M20 => "M20",
            ConcreteGrade::M25 => "M25",
            ConcreteGrade::M30 => "M30",
            ConcreteGrade::M35 => "M35",
            ConcreteGrade::M40 => "M40",
            ConcreteGrade::M45 => "M45",
            ConcreteGrade::M50 => "M50",
        }
    }

    /// Parse from common string representations ("M25", "m 25", "25")
    pub fn from_str_flexible(s: &str) -> CalcResult<Self> {
        let cleaned = s.to_uppercase().replace([' ', '-', '_'], "");
        let digits = cleaned.strip_prefix('M').unwrap_or(&cleaned);
        Self::ALL
            .iter()
            .copied()
            .find(|g| &g.label()[1..] == digits)
            .ok_or_else(|| CalcError::material_not_found(s))
    }
}

impl Default for ConcreteGrade {
    fn default() -> Self {
        ConcreteGrade::M25
    }
}

impl std::fmt::Display for ConcreteGrade {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fck_follows_label() {
        for grade in ConcreteGrade::ALL {
            let n: f64 = grade.label()[1..].parse().unwrap();
            assert_eq!(grade.fck_mpa(), n);
        }
    }

    #[test]
    fn test_parse_flexible() {
        assert_eq!(ConcreteGrade::from_str_flexible("M25").unwrap(), ConcreteGrade::M25);
        assert_eq!(ConcreteGrade::from_str_flexible("m 30").unwrap(), ConcreteGrade::M30);
        assert_eq!(ConcreteGrade::from_str_flexible("20").unwrap(), ConcreteGrade::M20);
        assert!(ConcreteGrade::from_str_flexible("M99").is_err());
        assert!(ConcreteGrade::from_str_flexible("").is_err());
    }

    #[test]
    fn test_serialization() {
        let json = serde_json::to_string(&ConcreteGrade::M25).unwrap();
        assert_eq!(json, "\"M25\"");
    }
}
