//! Notification delivery stand-in.

use async_trait::async_trait;
use tracing::info;

use barbermatch_booking::Notifier;
use barbermatch_core::AccountId;

/// Writes each notification as a log line instead of pushing it to a device.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogNotifier;

#[async_trait]
impl Notifier for LogNotifier {
    async fn send_notification(&self, account: AccountId, message: &str) -> bool {
        info!(account_id = %account, message, "notification sent");
        true
    }
}
