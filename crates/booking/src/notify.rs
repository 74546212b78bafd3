use async_trait::async_trait;

use barbermatch_core::AccountId;

use crate::Appointment;

/// Outbound customer notifications.
///
/// Delivery is best effort: implementations report failure through the
/// return value and callers never fail an operation because of it.
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn send_notification(&self, account: AccountId, message: &str) -> bool;

    async fn send_appointment_reminder(&self, appointment: &Appointment) -> bool {
        self.send_notification(appointment.customer_id, &reminder_message(appointment))
            .await
    }
}

pub fn reminder_message(appointment: &Appointment) -> String {
    format!(
        "Reminder: you have an appointment on {}",
        appointment.date.format("%Y-%m-%d %H:%M UTC")
    )
}
