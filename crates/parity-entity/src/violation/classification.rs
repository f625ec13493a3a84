//! Channel and comparison classifications.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use parity_core::AppError;

/// Kind of distribution channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ChannelKind {
    /// Online travel agency selling the room directly.
    #[serde(rename = "OTA")]
    Ota,
    /// Metasearch site displaying an underlying OTA's rate.
    Meta,
}

impl ChannelKind {
    /// Display name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Ota => "OTA",
            Self::Meta => "Meta",
        }
    }
}

impl FromStr for ChannelKind {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "ota" => Ok(Self::Ota),
            "meta" => Ok(Self::Meta),
            _ => Err(AppError::validation(format!(
                "Invalid channel kind: '{s}'. Expected one of: ota, meta"
            ))),
        }
    }
}

/// Win/Loss/Meet outcome of the channel rate against the brand rate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ParityOutcome {
    /// Brand rate is lower than the channel rate.
    Win,
    /// Channel undercuts the brand rate.
    Loss,
    /// Rates are equal.
    Meet,
}

impl ParityOutcome {
    /// Classify a channel rate against an optional brand reference rate.
    ///
    /// Without a brand rate the channel is treated as a loss, since the
    /// brand is not showing availability at all.
    pub fn classify(channel_rate: f64, brand_rate: Option<f64>) -> Self {
        match brand_rate {
            None => Self::Loss,
            Some(brand) if (channel_rate - brand).abs() < 0.005 => Self::Meet,
            Some(brand) if channel_rate < brand => Self::Loss,
            Some(_) => Self::Win,
        }
    }

    /// Display name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Win => "Win",
            Self::Loss => "Loss",
            Self::Meet => "Meet",
        }
    }
}

impl FromStr for ParityOutcome {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "win" => Ok(Self::Win),
            "loss" => Ok(Self::Loss),
            "meet" => Ok(Self::Meet),
            _ => Err(AppError::validation(format!(
                "Invalid outcome: '{s}'. Expected one of: win, loss, meet"
            ))),
        }
    }
}

/// Which parity dimension was violated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RateAvailability {
    /// The channel shows a different price.
    Rate,
    /// The channel shows availability the brand does not (or vice versa).
    Availability,
}

impl RateAvailability {
    /// Display name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Rate => "Rate",
            Self::Availability => "Availability",
        }
    }
}

impl FromStr for RateAvailability {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "rate" => Ok(Self::Rate),
            "availability" => Ok(Self::Availability),
            _ => Err(AppError::validation(format!(
                "Invalid rate/availability kind: '{s}'. Expected one of: rate, availability"
            ))),
        }
    }
}

impl fmt::Display for ChannelKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for ParityOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for RateAvailability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_outcome() {
        assert_eq!(ParityOutcome::classify(90.0, Some(100.0)), ParityOutcome::Loss);
        assert_eq!(ParityOutcome::classify(110.0, Some(100.0)), ParityOutcome::Win);
        assert_eq!(ParityOutcome::classify(100.0, Some(100.0)), ParityOutcome::Meet);
        assert_eq!(ParityOutcome::classify(100.0, None), ParityOutcome::Loss);
    }

    #[test]
    fn test_channel_kind_serde() {
        assert_eq!(serde_json::to_string(&ChannelKind::Ota).unwrap(), "\"OTA\"");
        assert_eq!("META".parse::<ChannelKind>().unwrap(), ChannelKind::Meta);
    }
}
