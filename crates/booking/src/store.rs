//! Persistence ports for the booking domain.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use barbermatch_core::{AppointmentId, BarbershopId, StoreResult};

use crate::{Appointment, AppointmentDetails, Barber, Barbershop, BarbershopDirectory, Hairstyle};

#[async_trait]
pub trait AppointmentRepository: Send + Sync {
    async fn insert(&self, appointment: Appointment) -> StoreResult<Appointment>;

    async fn find_by_id(&self, id: AppointmentId) -> StoreResult<Option<Appointment>>;

    /// Replace the stored row with the same id.
    async fn save(&self, appointment: Appointment) -> StoreResult<Appointment>;

    /// Every appointment with its references attached, in storage order.
    async fn list_detailed(&self) -> StoreResult<Vec<AppointmentDetails>>;

    /// Appointments with `start <= date <= end`, references attached.
    async fn list_detailed_between(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> StoreResult<Vec<AppointmentDetails>>;

    async fn count(&self) -> StoreResult<u64>;
}

#[async_trait]
pub trait BarbershopRepository: Send + Sync {
    async fn insert(&self, barbershop: Barbershop) -> StoreResult<Barbershop>;

    async fn find_by_id(&self, id: BarbershopId) -> StoreResult<Option<Barbershop>>;

    /// Every barbershop with its barbers and appointments attached.
    async fn list_directory(&self) -> StoreResult<Vec<BarbershopDirectory>>;

    /// Removes the barbershop and its barbers. Returns whether a row was removed.
    async fn delete(&self, id: BarbershopId) -> StoreResult<bool>;

    async fn insert_barber(&self, barber: Barber) -> StoreResult<Barber>;

    async fn count(&self) -> StoreResult<u64>;
}

#[async_trait]
pub trait HairstyleRepository: Send + Sync {
    async fn insert(&self, hairstyle: Hairstyle) -> StoreResult<Hairstyle>;

    async fn list(&self) -> StoreResult<Vec<Hairstyle>>;

    /// Hairstyles whose tag list contains `face_shape` exactly.
    async fn find_by_face_shape(&self, face_shape: &str) -> StoreResult<Vec<Hairstyle>>;
}
