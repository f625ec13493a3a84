//! Violation severity.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// How serious a parity violation is.
///
/// Variants are declared in ascending order so the derived `Ord`
/// gives Trivial < Minor < Major < Critical.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Severity {
    /// Negligible difference.
    Trivial,
    /// Small difference.
    Minor,
    /// Significant difference.
    Major,
    /// Requires immediate attention.
    Critical,
}

impl Severity {
    /// All severities, lowest first.
    pub const ALL: [Severity; 4] = [
        Severity::Trivial,
        Severity::Minor,
        Severity::Major,
        Severity::Critical,
    ];

    /// Return the severity as its display name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Trivial => "Trivial",
            Self::Minor => "Minor",
            Self::Major => "Major",
            Self::Critical => "Critical",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Severity {
    type Err = parity_core::AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "trivial" => Ok(Self::Trivial),
            "minor" => Ok(Self::Minor),
            "major" => Ok(Self::Major),
            "critical" => Ok(Self::Critical),
            _ => Err(parity_core::AppError::validation(format!(
                "Invalid severity: '{s}'. Expected one of: trivial, minor, major, critical"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ordering() {
        assert!(Severity::Trivial < Severity::Minor);
        assert!(Severity::Minor < Severity::Major);
        assert!(Severity::Major < Severity::Critical);
        let mut sorted = Severity::ALL;
        sorted.sort();
        assert_eq!(sorted, Severity::ALL);
    }

    #[test]
    fn test_from_str() {
        assert_eq!("CRITICAL".parse::<Severity>().unwrap(), Severity::Critical);
        assert!("severe".parse::<Severity>().is_err());
    }
}
