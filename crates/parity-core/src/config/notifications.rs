//! Notification aggregation configuration.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Settings for the notification aggregator and store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotificationConfig {
    /// Debounce window in milliseconds. A batch flushes this long after
    /// its first action, regardless of later actions.
    #[serde(default = "default_batch_window")]
    pub batch_window_ms: u64,
    /// Capacity of the store change-event broadcast channel.
    #[serde(default = "default_channel_buffer")]
    pub channel_buffer_size: usize,
    /// How often the flush worker checks for due batches, in milliseconds.
    #[serde(default = "default_flush_tick")]
    pub flush_tick_ms: u64,
}

impl NotificationConfig {
    /// The debounce window as a [`Duration`].
    pub fn batch_window(&self) -> Duration {
        Duration::from_millis(self.batch_window_ms)
    }

    /// The flush worker tick as a [`Duration`].
    pub fn flush_tick(&self) -> Duration {
        Duration::from_millis(self.flush_tick_ms.max(1))
    }
}

impl Default for NotificationConfig {
    fn default() -> Self {
        Self {
            batch_window_ms: default_batch_window(),
            channel_buffer_size: default_channel_buffer(),
            flush_tick_ms: default_flush_tick(),
        }
    }
}

fn default_batch_window() -> u64 {
    1000
}

fn default_channel_buffer() -> usize {
    64
}

fn default_flush_tick() -> u64 {
    100
}
