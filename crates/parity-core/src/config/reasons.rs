//! The closed vocabulary of violation reasons.

use serde::{Deserialize, Serialize};

/// Reason options a violation may be annotated with.
///
/// The empty string is always accepted and means "unassigned".
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReasonConfig {
    /// Allowed non-empty reason values.
    #[serde(default = "default_options")]
    pub options: Vec<String>,
}

impl ReasonConfig {
    /// Whether `reason` is the blank value or one of the configured options.
    pub fn accepts(&self, reason: &str) -> bool {
        reason.is_empty() || self.options.iter().any(|o| o == reason)
    }
}

impl Default for ReasonConfig {
    fn default() -> Self {
        Self {
            options: default_options(),
        }
    }
}

fn default_options() -> Vec<String> {
    [
        "Rate plan difference",
        "Room type mismatch",
        "Meal plan difference",
        "Promotional rate",
        "Currency conversion",
        "Cached rate",
        "Contracted rate",
        "Other",
    ]
    .into_iter()
    .map(String::from)
    .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_is_always_accepted() {
        let config = ReasonConfig { options: Vec::new() };
        assert!(config.accepts(""));
        assert!(!config.accepts("Other"));
    }

    #[test]
    fn test_default_vocabulary() {
        let config = ReasonConfig::default();
        assert!(config.accepts("Rate plan difference"));
        assert!(!config.accepts("rate plan difference"));
    }
}
