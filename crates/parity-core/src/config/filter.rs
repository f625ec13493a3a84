//! Violation table filtering and paging configuration.

use serde::{Deserialize, Serialize};

/// Paging defaults for the violation table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FilterConfig {
    /// Rows per page when the caller does not choose one.
    #[serde(default = "default_page_size")]
    pub default_page_size: u64,
    /// Upper bound on the page size a caller may request.
    #[serde(default = "default_max_page_size")]
    pub max_page_size: u64,
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            default_page_size: default_page_size(),
            max_page_size: default_max_page_size(),
        }
    }
}

fn default_page_size() -> u64 {
    15
}

fn default_max_page_size() -> u64 {
    100
}
