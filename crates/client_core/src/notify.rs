//! User-facing notifications raised by the controllers.

use tracing::{info, warn};

pub trait ErrorNotifier: Send + Sync {
    /// Shows a short failure message, e.g. "Checkout failed.".
    fn notify_error(&self, message: &str);

    /// Shows a confirmation. Only checkout raises one today.
    fn notify_success(&self, message: &str) {
        info!(message, "storefront notice");
    }
}

/// Routes notifications to the log. Used when no page surface is attached.
pub struct LogNotifier;

impl ErrorNotifier for LogNotifier {
    fn notify_error(&self, message: &str) {
        warn!(message, "storefront error");
    }
}
