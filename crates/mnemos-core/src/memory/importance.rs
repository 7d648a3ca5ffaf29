use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::MnemosError;

/// Clamp a score into [0.0, 1.0]. NaN collapses to 0.0.
pub fn clamp01(value: f64) -> f64 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(0.0, 1.0)
    }
}

/// Coarse importance bucket derived from `importance_score`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ImportanceLevel {
    Low,
    Medium,
    High,
    Critical,
}

impl ImportanceLevel {
    /// Lower bound of `Medium`.
    pub const MEDIUM_FLOOR: f64 = 0.3;
    /// Lower bound of `High`.
    pub const HIGH_FLOOR: f64 = 0.6;
    /// Lower bound of `Critical`.
    pub const CRITICAL_FLOOR: f64 = 0.85;

    /// Bucket a score. The score is clamped first.
    pub fn from_score(score: f64) -> Self {
        let score = clamp01(score);
        if score >= Self::CRITICAL_FLOOR {
            Self::Critical
        } else if score >= Self::HIGH_FLOOR {
            Self::High
        } else if score >= Self::MEDIUM_FLOOR {
            Self::Medium
        } else {
            Self::Low
        }
    }

    /// Smallest score that falls in this bucket.
    pub fn floor(self) -> f64 {
        match self {
            Self::Low => 0.0,
            Self::Medium => Self::MEDIUM_FLOOR,
            Self::High => Self::HIGH_FLOOR,
            Self::Critical => Self::CRITICAL_FLOOR,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
            Self::Critical => "critical",
        }
    }
}

impl fmt::Display for ImportanceLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ImportanceLevel {
    type Err = MnemosError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "low" => Ok(Self::Low),
            "medium" => Ok(Self::Medium),
            "high" => Ok(Self::High),
            "critical" => Ok(Self::Critical),
            other => Err(MnemosError::InvalidMemory {
                reason: format!("unknown importance level {other:?}"),
            }),
        }
    }
}
