//! User-facing error notification.

use tracing::warn;

/// Fire-and-forget sink for messages shown to the shopper (a toast, a banner).
pub trait Notifier: Send + Sync {
    fn report_error(&self, message: &str);
}

/// Writes every message to the log. The default when no UI is attached.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn report_error(&self, message: &str) {
        warn!(message, "Cart operation failed");
    }
}

/// Drops every message, for callers that only look at the returned results.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullNotifier;

impl Notifier for NullNotifier {
    fn report_error(&self, _message: &str) {}
}
