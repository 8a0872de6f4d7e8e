//! Notification seams for analysis runs.
//!
//! A `NotificationSink` receives the per-table log lines; a `Signalizer`
//! is the optional external alerting hook used by fail-soft runs.

use tracing::{info, warn};

/// Receives human-readable messages produced while analyzing.
pub trait NotificationSink: Send + Sync {
    fn warn(&self, message: &str);
    fn info(&self, message: &str);
}

/// External alerting (pager, chat, alert file).
pub trait Signalizer: Send + Sync {
    fn signalize(&self, message: &str);
}

/// Default sink that forwards messages to `tracing`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl NotificationSink for TracingSink {
    fn warn(&self, message: &str) {
        warn!(target: "seqguard", "{message}");
    }

    fn info(&self, message: &str) {
        info!(target: "seqguard", "{message}");
    }
}
