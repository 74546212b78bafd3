//! Appointment lifecycle service.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Deserialize;
use tracing::{error, info, instrument, warn};

use barbermatch_core::{AccountId, AppointmentId, BarberId, BarbershopId, DomainError, DomainResult, StoreError};

use crate::{
    Appointment, AppointmentDetails, AppointmentPatch, AppointmentRepository, AppointmentStatus, Notifier,
    parse_appointment_date,
};

/// Booking request as received from a caller. The date is still raw text.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookAppointment {
    pub date: String,
    #[serde(default)]
    pub status: Option<AppointmentStatus>,
    #[serde(alias = "userId")]
    pub customer_id: AccountId,
    pub barber_id: BarberId,
    pub barbershop_id: BarbershopId,
}

/// Partial update as received from a caller.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppointmentChanges {
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub status: Option<AppointmentStatus>,
    #[serde(default, alias = "userId")]
    pub customer_id: Option<AccountId>,
    #[serde(default)]
    pub barber_id: Option<BarberId>,
    #[serde(default)]
    pub barbershop_id: Option<BarbershopId>,
}

impl AppointmentChanges {
    pub fn cancel() -> Self {
        Self {
            status: Some(AppointmentStatus::Cancelled),
            ..Self::default()
        }
    }

    fn into_patch(self) -> DomainResult<AppointmentPatch> {
        let date = self.date.as_deref().map(parse_appointment_date).transpose()?;
        Ok(AppointmentPatch {
            date,
            status: self.status,
            customer_id: self.customer_id,
            barber_id: self.barber_id,
            barbershop_id: self.barbershop_id,
        })
    }
}

pub struct AppointmentService {
    appointments: Arc<dyn AppointmentRepository>,
    notifier: Arc<dyn Notifier>,
}

impl AppointmentService {
    pub fn new(appointments: Arc<dyn AppointmentRepository>, notifier: Arc<dyn Notifier>) -> Self {
        Self { appointments, notifier }
    }

    /// Book a slot. Referenced accounts, barbers and shops are not looked up first.
    #[instrument(skip(self, request), fields(customer_id = %request.customer_id))]
    pub async fn create(&self, request: BookAppointment) -> DomainResult<Appointment> {
        let date = parse_appointment_date(&request.date)?;
        let appointment = Appointment {
            id: AppointmentId::new(),
            date,
            status: request.status.unwrap_or(AppointmentStatus::Pending),
            customer_id: request.customer_id,
            barber_id: request.barber_id,
            barbershop_id: request.barbershop_id,
        };

        let stored = self.appointments.insert(appointment).await.map_err(write_failure)?;
        info!(appointment_id = %stored.id, status = %stored.status, "appointment created");

        let message = format!(
            "Your appointment on {} is {}",
            stored.date.format("%Y-%m-%d %H:%M UTC"),
            stored.status
        );
        self.notify(stored.customer_id, &message).await;
        Ok(stored)
    }

    pub async fn find_all(&self) -> DomainResult<Vec<AppointmentDetails>> {
        self.appointments.list_detailed().await.map_err(internal)
    }

    /// Appointments with `start <= date <= end`. An inverted range is empty.
    pub async fn find_by_date_range(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> DomainResult<Vec<AppointmentDetails>> {
        if start > end {
            return Ok(Vec::new());
        }
        self.appointments
            .list_detailed_between(start, end)
            .await
            .map_err(internal)
    }

    /// Merge `changes` onto the stored appointment.
    ///
    /// Returns `None` when no appointment has this id.
    #[instrument(skip(self, changes))]
    pub async fn update(&self, id: AppointmentId, changes: AppointmentChanges) -> DomainResult<Option<Appointment>> {
        let patch = changes.into_patch()?;
        let Some(mut appointment) = self.appointments.find_by_id(id).await.map_err(internal)? else {
            return Ok(None);
        };
        appointment.apply(patch);

        let saved = self.appointments.save(appointment).await.map_err(write_failure)?;
        info!(appointment_id = %saved.id, status = %saved.status, "appointment updated");
        Ok(Some(saved))
    }

    /// Same as `update(id, {status: cancelled})`, whatever the prior status.
    pub async fn cancel(&self, id: AppointmentId) -> DomainResult<Option<Appointment>> {
        let cancelled = self.update(id, AppointmentChanges::cancel()).await?;
        if let Some(appointment) = &cancelled {
            let message = format!(
                "Your appointment on {} has been cancelled",
                appointment.date.format("%Y-%m-%d %H:%M UTC")
            );
            self.notify(appointment.customer_id, &message).await;
        }
        Ok(cancelled)
    }

    /// Send the customer a reminder for this slot.
    ///
    /// `None` when no appointment has this id, otherwise whether delivery succeeded.
    #[instrument(skip(self))]
    pub async fn remind(&self, id: AppointmentId) -> DomainResult<Option<bool>> {
        let Some(appointment) = self.appointments.find_by_id(id).await.map_err(internal)? else {
            return Ok(None);
        };
        let delivered = self.notifier.send_appointment_reminder(&appointment).await;
        if !delivered {
            warn!(appointment_id = %id, "reminder not delivered");
        }
        Ok(Some(delivered))
    }

    pub async fn count(&self) -> DomainResult<u64> {
        self.appointments.count().await.map_err(internal)
    }

    async fn notify(&self, account: AccountId, message: &str) {
        if !self.notifier.send_notification(account, message).await {
            warn!(account_id = %account, "notification not delivered");
        }
    }
}

fn write_failure(err: StoreError) -> DomainError {
    match err {
        StoreError::ForeignKeyViolation(_) => DomainError::validation("referenced record does not exist"),
        other => internal(other),
    }
}

fn internal(err: StoreError) -> DomainError {
    error!(error = %err, "appointment store failure");
    DomainError::from(err)
}
