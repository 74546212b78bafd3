//! Barbershop directory and hairstyle catalog services.

use std::sync::Arc;

use tracing::{error, info, instrument};
use validator::Validate;

use barbermatch_core::{BarbershopId, DomainError, DomainResult, StoreError};

use crate::{
    Barber, Barbershop, BarbershopDirectory, BarbershopRepository, Hairstyle, HairstyleRepository, NewBarber,
    NewBarbershop, NewHairstyle,
};

pub struct BarbershopService {
    barbershops: Arc<dyn BarbershopRepository>,
}

impl BarbershopService {
    pub fn new(barbershops: Arc<dyn BarbershopRepository>) -> Self {
        Self { barbershops }
    }

    #[instrument(skip(self, input), fields(name = %input.name))]
    pub async fn create(&self, input: NewBarbershop) -> DomainResult<Barbershop> {
        input.validate()?;
        let stored = self
            .barbershops
            .insert(input.into_barbershop())
            .await
            .map_err(internal)?;
        info!(barbershop_id = %stored.id, "barbershop created");
        Ok(stored)
    }

    pub async fn list(&self) -> DomainResult<Vec<BarbershopDirectory>> {
        self.barbershops.list_directory().await.map_err(internal)
    }

    /// Attach a new barber to an existing barbershop.
    #[instrument(skip(self, input))]
    pub async fn add_barber(&self, barbershop_id: BarbershopId, input: NewBarber) -> DomainResult<Barber> {
        input.validate()?;
        if self
            .barbershops
            .find_by_id(barbershop_id)
            .await
            .map_err(internal)?
            .is_none()
        {
            return Err(DomainError::not_found("barbershop"));
        }

        // The shop may vanish between the lookup and the insert.
        let barber = self
            .barbershops
            .insert_barber(input.into_barber(barbershop_id))
            .await
            .map_err(|err| match err {
                StoreError::ForeignKeyViolation(_) => DomainError::not_found("barbershop"),
                other => internal(other),
            })?;
        info!(barber_id = %barber.id, "barber added");
        Ok(barber)
    }

    /// Returns whether a barbershop was actually removed.
    #[instrument(skip(self))]
    pub async fn delete(&self, id: BarbershopId) -> DomainResult<bool> {
        let removed = self.barbershops.delete(id).await.map_err(internal)?;
        if removed {
            info!(barbershop_id = %id, "barbershop deleted");
        }
        Ok(removed)
    }

    pub async fn count(&self) -> DomainResult<u64> {
        self.barbershops.count().await.map_err(internal)
    }
}

pub struct HairstyleService {
    hairstyles: Arc<dyn HairstyleRepository>,
}

impl HairstyleService {
    pub fn new(hairstyles: Arc<dyn HairstyleRepository>) -> Self {
        Self { hairstyles }
    }

    #[instrument(skip(self, input), fields(name = %input.name))]
    pub async fn create(&self, input: NewHairstyle) -> DomainResult<Hairstyle> {
        input.validate()?;
        self.hairstyles
            .insert(input.into_hairstyle())
            .await
            .map_err(internal)
    }

    pub async fn list(&self) -> DomainResult<Vec<Hairstyle>> {
        self.hairstyles.list().await.map_err(internal)
    }

    /// Every hairstyle tagged with exactly `face_shape`; empty when none match.
    pub async fn filter_by_face_shape(&self, face_shape: &str) -> DomainResult<Vec<Hairstyle>> {
        self.hairstyles
            .find_by_face_shape(face_shape)
            .await
            .map_err(internal)
    }
}

fn internal(err: StoreError) -> DomainError {
    error!(error = %err, "catalog store failure");
    DomainError::from(err)
}
