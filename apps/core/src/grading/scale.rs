//! Grading scales and CGPA-to-percentage formulas.
//!
//! Both are closed enums: adding a scale or a formula is a compile-checked change,
//! and every lookup goes through an exhaustive `match`.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::AppError;

/// O / A+ / A ... scale used by most Indian universities.
const TEN_POINT_GRADES: &[(&str, f64)] = &[
    ("O", 10.0),
    ("A+", 9.0),
    ("A", 8.0),
    ("B+", 7.0),
    ("B", 6.0),
    ("C", 5.0),
    ("P", 4.0),
    ("F", 0.0),
    ("AB", 0.0),
];

const FOUR_POINT_GRADES: &[(&str, f64)] = &[
    ("A+", 4.0),
    ("A", 4.0),
    ("A-", 3.7),
    ("B+", 3.3),
    ("B", 3.0),
    ("B-", 2.7),
    ("C+", 2.3),
    ("C", 2.0),
    ("C-", 1.7),
    ("D+", 1.3),
    ("D", 1.0),
    ("F", 0.0),
];

/// S-to-F letter scale of the reference institution.
const INSTITUTIONAL_GRADES: &[(&str, f64)] = &[
    ("S", 10.0),
    ("A", 9.0),
    ("B", 8.0),
    ("C", 7.0),
    ("D", 6.0),
    ("E", 5.0),
    ("F", 0.0),
];

/// A named mapping from letter-grade token to grade points.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum GradingSystem {
    #[default]
    TenPoint,
    FourPoint,
    Institutional,
}

impl GradingSystem {
    pub const ALL: [GradingSystem; 3] = [
        GradingSystem::TenPoint,
        GradingSystem::FourPoint,
        GradingSystem::Institutional,
    ];

    /// Stable identifier used in configuration and JSON.
    pub fn id(&self) -> &'static str {
        match self {
            GradingSystem::TenPoint => "ten-point",
            GradingSystem::FourPoint => "four-point",
            GradingSystem::Institutional => "institutional",
        }
    }

    /// Token/points table in display order (best grade first).
    pub fn table(&self) -> &'static [(&'static str, f64)] {
        match self {
            GradingSystem::TenPoint => TEN_POINT_GRADES,
            GradingSystem::FourPoint => FOUR_POINT_GRADES,
            GradingSystem::Institutional => INSTITUTIONAL_GRADES,
        }
    }

    /// Grade tokens offered by this scale, best first.
    pub fn tokens(&self) -> impl Iterator<Item = &'static str> {
        self.table().iter().map(|(token, _)| *token)
    }

    pub fn max_points(&self) -> f64 {
        self.table()
            .iter()
            .map(|(_, points)| *points)
            .fold(0.0, f64::max)
    }

    /// Resolve a token to points; `None` when the scale does not define it.
    pub fn lookup(&self, token: &str) -> Option<f64> {
        let token = token.trim();
        self.table()
            .iter()
            .find(|(known, _)| known.eq_ignore_ascii_case(token))
            .map(|(_, points)| *points)
    }

    /// Points for a token. Unknown or empty tokens count as 0 ("not yet graded").
    pub fn points(&self, token: &str) -> f64 {
        self.lookup(token).unwrap_or(0.0)
    }

    pub fn is_known_grade(&self, token: &str) -> bool {
        self.lookup(token).is_some()
    }
}

impl fmt::Display for GradingSystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.id())
    }
}

impl FromStr for GradingSystem {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Self::ALL
            .into_iter()
            .find(|system| system.id().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| AppError::Config(format!("Unknown grading system: '{}'", s)))
    }
}

/// Linear transform from CGPA to an estimated percentage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum PercentageFormula {
    /// (cgpa / 10) * 100
    #[default]
    #[serde(rename = "official")]
    Official,
    /// cgpa * 10
    #[serde(rename = "direct-multiply")]
    DirectMultiply,
    /// (cgpa - 0.75) * 10
    #[serde(rename = "offset-10pt")]
    Offset10Pt,
    /// (cgpa - 0.5) * 10
    #[serde(rename = "offset-alt")]
    OffsetAlt,
    /// cgpa * 9.5
    #[serde(rename = "scale-9.5")]
    Scale9_5,
    /// (cgpa * 10) - 7.5
    #[serde(rename = "scale-10-offset-7.5")]
    Scale10Offset7_5,
}

impl PercentageFormula {
    pub const ALL: [PercentageFormula; 6] = [
        PercentageFormula::Official,
        PercentageFormula::DirectMultiply,
        PercentageFormula::Offset10Pt,
        PercentageFormula::OffsetAlt,
        PercentageFormula::Scale9_5,
        PercentageFormula::Scale10Offset7_5,
    ];

    pub fn id(&self) -> &'static str {
        match self {
            PercentageFormula::Official => "official",
            PercentageFormula::DirectMultiply => "direct-multiply",
            PercentageFormula::Offset10Pt => "offset-10pt",
            PercentageFormula::OffsetAlt => "offset-alt",
            PercentageFormula::Scale9_5 => "scale-9.5",
            PercentageFormula::Scale10Offset7_5 => "scale-10-offset-7.5",
        }
    }

    /// Raw transform, before the zero short-circuit and the lower clamp.
    pub fn apply(&self, cgpa: f64) -> f64 {
        match self {
            PercentageFormula::Official => (cgpa / 10.0) * 100.0,
            PercentageFormula::DirectMultiply => cgpa * 10.0,
            PercentageFormula::Offset10Pt => (cgpa - 0.75) * 10.0,
            PercentageFormula::OffsetAlt => (cgpa - 0.5) * 10.0,
            PercentageFormula::Scale9_5 => cgpa * 9.5,
            PercentageFormula::Scale10Offset7_5 => (cgpa * 10.0) - 7.5,
        }
    }
}

impl fmt::Display for PercentageFormula {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.id())
    }
}

impl FromStr for PercentageFormula {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Self::ALL
            .into_iter()
            .find(|formula| formula.id().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| AppError::Config(format!("Unknown percentage formula: '{}'", s)))
    }
}
