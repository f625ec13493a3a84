//! Role hierarchy.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The three mutually exclusive actor classes.
///
/// The hierarchy is fixed: Corporate > Intermediate > SingleProperty.
/// Escalations flow down the hierarchy, reason updates flow up to Corporate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Role {
    /// Brand-wide corporate user.
    Corporate,
    /// Multi-property (regional) user.
    Intermediate,
    /// User responsible for one hotel.
    SingleProperty,
}

impl Role {
    /// All roles, top tier first.
    pub const ALL: [Role; 3] = [Role::Corporate, Role::Intermediate, Role::SingleProperty];

    /// Tier level (higher = further up the hierarchy).
    pub fn tier(&self) -> u8 {
        match self {
            Self::Corporate => 3,
            Self::Intermediate => 2,
            Self::SingleProperty => 1,
        }
    }

    /// Roles strictly below this one, nearest first.
    pub fn downstream(&self) -> &'static [Role] {
        match self {
            Self::Corporate => &[Role::Intermediate, Role::SingleProperty],
            Self::Intermediate => &[Role::SingleProperty],
            Self::SingleProperty => &[],
        }
    }

    /// Human-readable label used as notification actor/recipient text.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Corporate => "Corporate",
            Self::Intermediate => "Multi-Property",
            Self::SingleProperty => "Single Property",
        }
    }

    /// Machine name, matching the serialized form.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Corporate => "corporate",
            Self::Intermediate => "intermediate",
            Self::SingleProperty => "single-property",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Role {
    type Err = parity_core::AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace('_', "-").as_str() {
            "corporate" => Ok(Self::Corporate),
            "intermediate" | "multi-property" => Ok(Self::Intermediate),
            "single-property" | "property" => Ok(Self::SingleProperty),
            _ => Err(parity_core::AppError::validation(format!(
                "Invalid role: '{s}'. Expected one of: corporate, intermediate, single-property"
            ))),
        }
    }
}
