//! Application configuration schemas.
//!
//! Configuration is deserialized through the `config` crate from an
//! optional TOML file plus `PARITY__`-prefixed environment variables.
//! Every section has defaults, so an empty source yields a usable config.

pub mod filter;
pub mod logging;
pub mod notifications;
pub mod reasons;

use serde::{Deserialize, Serialize};

pub use self::filter::FilterConfig;
pub use self::logging::LoggingConfig;
pub use self::notifications::NotificationConfig;
pub use self::reasons::ReasonConfig;

use crate::error::AppError;
use crate::result::AppResult;

/// Root dashboard configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DashboardConfig {
    /// Notification aggregation settings.
    #[serde(default)]
    pub notifications: NotificationConfig,
    /// Table paging settings.
    #[serde(default)]
    pub filter: FilterConfig,
    /// Reason vocabulary.
    #[serde(default)]
    pub reasons: ReasonConfig,
    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl DashboardConfig {
    /// Load configuration from a TOML file and the environment.
    ///
    /// The file is optional; environment variables such as
    /// `PARITY__NOTIFICATIONS__BATCH_WINDOW_MS` override file values.
    pub fn load(path: &str) -> AppResult<Self> {
        let config = config::Config::builder()
            .add_source(config::File::with_name(path).required(false))
            .add_source(
                config::Environment::with_prefix("PARITY")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .map_err(|e| AppError::configuration(format!("Failed to build config: {e}")))?;

        let loaded: Self = config
            .try_deserialize()
            .map_err(|e| AppError::configuration(format!("Failed to deserialize config: {e}")))?;
        loaded.validate()?;
        Ok(loaded)
    }

    /// Parse configuration from an in-memory TOML document.
    pub fn from_toml(source: &str) -> AppResult<Self> {
        let loaded: Self = config::Config::builder()
            .add_source(config::File::from_str(source, config::FileFormat::Toml))
            .build()?
            .try_deserialize()?;
        loaded.validate()?;
        Ok(loaded)
    }

    /// Reject values that would make paging or batching meaningless.
    pub fn validate(&self) -> AppResult<()> {
        if self.filter.default_page_size == 0 || self.filter.max_page_size == 0 {
            return Err(AppError::configuration("Page sizes must be at least 1"));
        }
        if self.filter.default_page_size > self.filter.max_page_size {
            return Err(AppError::configuration(format!(
                "default_page_size ({}) exceeds max_page_size ({})",
                self.filter.default_page_size, self.filter.max_page_size
            )));
        }
        if self.notifications.batch_window_ms == 0 {
            return Err(AppError::configuration(
                "notifications.batch_window_ms must be at least 1",
            ));
        }
        if self.notifications.flush_tick_ms == 0 {
            return Err(AppError::configuration(
                "notifications.flush_tick_ms must be at least 1",
            ));
        }
        if self.notifications.channel_buffer_size == 0 {
            return Err(AppError::configuration(
                "notifications.channel_buffer_size must be at least 1",
            ));
        }
        if self.reasons.options.iter().any(|o| o.trim().is_empty()) {
            return Err(AppError::configuration(
                "reasons.options must not contain blank entries",
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    #[test]
    fn test_empty_document_uses_defaults() {
        let config = DashboardConfig::from_toml("").expect("defaults");
        assert_eq!(config.notifications.batch_window_ms, 1000);
        assert_eq!(config.filter.default_page_size, 15);
        assert_eq!(config.logging.level, "info");
        assert!(!config.reasons.options.is_empty());
    }

    #[test]
    fn test_partial_override() {
        let config = DashboardConfig::from_toml(
            r#"
            [notifications]
            batch_window_ms = 250

            [reasons]
            options = ["Promotional rate"]
            "#,
        )
        .expect("parse");
        assert_eq!(config.notifications.batch_window_ms, 250);
        assert_eq!(config.notifications.flush_tick_ms, 100);
        assert_eq!(config.reasons.options, vec!["Promotional rate".to_string()]);
    }

    #[test]
    fn test_rejects_inverted_page_sizes() {
        let err = DashboardConfig::from_toml(
            r#"
            [filter]
            default_page_size = 50
            max_page_size = 10
            "#,
        )
        .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Configuration);
    }

    #[test]
    fn test_rejects_zero_window() {
        let err = DashboardConfig::from_toml("[notifications]\nbatch_window_ms = 0").unwrap_err();
        assert_eq!(err.kind, ErrorKind::Configuration);
        assert!(err.message.contains("batch_window_ms"));

        let err = DashboardConfig::from_toml("[notifications]\nflush_tick_ms = 0").unwrap_err();
        assert_eq!(err.kind, ErrorKind::Configuration);
    }
}
