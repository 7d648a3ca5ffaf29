//! Compact duration grammar used by age thresholds: `^(\d+)([dhm])$`.

use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::errors::ConfigError;

static DURATION_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^(\d+)([dhm])$").unwrap());

/// Unit suffix of a [`DurationSpec`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DurationUnit {
    Days,
    Hours,
    Minutes,
}

impl DurationUnit {
    fn millis(self) -> u64 {
        match self {
            DurationUnit::Days => crate::constants::MILLIS_PER_DAY,
            DurationUnit::Hours => 3_600_000,
            DurationUnit::Minutes => 60_000,
        }
    }

    fn suffix(self) -> char {
        match self {
            DurationUnit::Days => 'd',
            DurationUnit::Hours => 'h',
            DurationUnit::Minutes => 'm',
        }
    }
}

/// A duration written as `<amount><unit>`, e.g. `"7d"`, `"24h"`, `"90m"`.
///
/// Parsing happens at deserialization time, so a loaded config never holds an
/// unparsed string. Anything outside the grammar is a [`ConfigError::InvalidDuration`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct DurationSpec {
    amount: u64,
    unit: DurationUnit,
    millis: u64,
}

impl DurationSpec {
    /// Parse a duration string.
    pub fn parse(value: &str) -> Result<Self, ConfigError> {
        let invalid = || ConfigError::InvalidDuration {
            value: value.to_string(),
        };
        let caps = DURATION_RE.captures(value).ok_or_else(invalid)?;
        let amount: u64 = caps[1].parse().map_err(|_| invalid())?;
        let unit = match &caps[2] {
            "d" => DurationUnit::Days,
            "h" => DurationUnit::Hours,
            "m" => DurationUnit::Minutes,
            _ => return Err(invalid()),
        };
        let millis = amount.checked_mul(unit.millis()).ok_or_else(invalid)?;
        Ok(Self {
            amount,
            unit,
            millis,
        })
    }

    pub fn days(amount: u64) -> Self {
        Self {
            amount,
            unit: DurationUnit::Days,
            millis: amount * DurationUnit::Days.millis(),
        }
    }

    pub fn minutes(amount: u64) -> Self {
        Self {
            amount,
            unit: DurationUnit::Minutes,
            millis: amount * DurationUnit::Minutes.millis(),
        }
    }

    /// Length in milliseconds.
    pub fn as_millis(&self) -> u64 {
        self.millis
    }

    pub fn as_std(&self) -> std::time::Duration {
        std::time::Duration::from_millis(self.millis)
    }

    pub fn as_chrono(&self) -> chrono::Duration {
        chrono::Duration::try_milliseconds(self.millis.min(i64::MAX as u64) as i64)
            .unwrap_or(chrono::Duration::MAX)
    }
}

impl fmt::Display for DurationSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.amount, self.unit.suffix())
    }
}

impl FromStr for DurationSpec {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for DurationSpec {
    type Error = ConfigError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<DurationSpec> for String {
    fn from(spec: DurationSpec) -> Self {
        spec.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_each_unit() {
        assert_eq!(DurationSpec::parse("7d").unwrap().as_millis(), 604_800_000);
        assert_eq!(DurationSpec::parse("24h").unwrap().as_millis(), 86_400_000);
        assert_eq!(DurationSpec::parse("90m").unwrap().as_millis(), 5_400_000);
    }

    #[test]
    fn rejects_malformed_strings() {
        for bad in ["9x", "", "d", "7", " 7d", "7d ", "-1d", "1.5d", "7D"] {
            assert!(
                matches!(DurationSpec::parse(bad), Err(ConfigError::InvalidDuration { .. })),
                "{bad:?} should be rejected"
            );
        }
    }

    #[test]
    fn rejects_overflow() {
        assert!(DurationSpec::parse("99999999999999999d").is_err());
    }

    #[test]
    fn display_round_trips() {
        let spec = DurationSpec::parse("30d").unwrap();
        assert_eq!(spec.to_string(), "30d");
        assert_eq!(spec, DurationSpec::days(30));
    }
}
