//! In-memory repositories for tests and local development.
//!
//! All handles created from one [`InMemoryDatabase`] share the same tables,
//! so relations (directory listings, appointment details) resolve across them.
//! Rows keep insertion order.

use std::collections::HashMap;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use barbermatch_auth::{Account, AccountRepository, Profile};
use barbermatch_booking::{
    Appointment, AppointmentDetails, AppointmentRepository, Barber, Barbershop, BarbershopDirectory,
    BarbershopRepository, Hairstyle, HairstyleRepository,
};
use barbermatch_core::{AccountId, AppointmentId, BarbershopId, StoreError, StoreResult};
use barbermatch_visagism::{AnalysisRepository, FaceAnalysisResult};

#[derive(Debug, Default)]
struct Tables {
    accounts: Vec<Account>,
    profiles: HashMap<AccountId, Profile>,
    appointments: Vec<Appointment>,
    barbershops: Vec<Barbershop>,
    barbers: Vec<Barber>,
    hairstyles: Vec<Hairstyle>,
    analyses: Vec<FaceAnalysisResult>,
}

impl Tables {
    fn details(&self, appointment: &Appointment) -> AppointmentDetails {
        AppointmentDetails {
            id: appointment.id,
            date: appointment.date,
            status: appointment.status,
            user: self
                .accounts
                .iter()
                .find(|a| a.id == appointment.customer_id)
                .map(Account::view),
            barber: self.barbers.iter().find(|b| b.id == appointment.barber_id).cloned(),
            barbershop: self
                .barbershops
                .iter()
                .find(|s| s.id == appointment.barbershop_id)
                .cloned(),
        }
    }
}

/// Shared in-process tables.
#[derive(Debug, Clone, Default)]
pub struct InMemoryDatabase {
    inner: Arc<RwLock<Tables>>,
}

impl InMemoryDatabase {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn accounts(&self) -> InMemoryAccountStore {
        InMemoryAccountStore { db: self.clone() }
    }

    pub fn appointments(&self) -> InMemoryAppointmentStore {
        InMemoryAppointmentStore { db: self.clone() }
    }

    pub fn barbershops(&self) -> InMemoryBarbershopStore {
        InMemoryBarbershopStore { db: self.clone() }
    }

    pub fn hairstyles(&self) -> InMemoryHairstyleStore {
        InMemoryHairstyleStore { db: self.clone() }
    }

    pub fn analyses(&self) -> InMemoryAnalysisStore {
        InMemoryAnalysisStore { db: self.clone() }
    }

    fn read(&self) -> StoreResult<RwLockReadGuard<'_, Tables>> {
        self.inner
            .read()
            .map_err(|_| StoreError::Backend("in-memory store lock poisoned".to_string()))
    }

    fn write(&self) -> StoreResult<RwLockWriteGuard<'_, Tables>> {
        self.inner
            .write()
            .map_err(|_| StoreError::Backend("in-memory store lock poisoned".to_string()))
    }
}

#[derive(Debug, Clone)]
pub struct InMemoryAccountStore {
    db: InMemoryDatabase,
}

#[async_trait]
impl AccountRepository for InMemoryAccountStore {
    async fn insert(&self, account: Account) -> StoreResult<Account> {
        let mut tables = self.db.write()?;
        if tables.accounts.iter().any(|a| a.email == account.email) {
            return Err(StoreError::UniqueViolation(format!("accounts.email = {}", account.email)));
        }
        tables.accounts.push(account.clone());
        Ok(account)
    }

    async fn find_by_email(&self, email: &str) -> StoreResult<Option<Account>> {
        Ok(self.db.read()?.accounts.iter().find(|a| a.email == email).cloned())
    }

    async fn find_by_id(&self, id: AccountId) -> StoreResult<Option<Account>> {
        Ok(self.db.read()?.accounts.iter().find(|a| a.id == id).cloned())
    }

    async fn list(&self) -> StoreResult<Vec<Account>> {
        Ok(self.db.read()?.accounts.clone())
    }

    async fn delete(&self, id: AccountId) -> StoreResult<bool> {
        let mut tables = self.db.write()?;
        let before = tables.accounts.len();
        tables.accounts.retain(|a| a.id != id);
        let removed = tables.accounts.len() != before;
        if removed {
            tables.profiles.remove(&id);
        }
        Ok(removed)
    }

    async fn find_profile(&self, account_id: AccountId) -> StoreResult<Option<Profile>> {
        Ok(self.db.read()?.profiles.get(&account_id).cloned())
    }

    async fn save_profile(&self, profile: Profile) -> StoreResult<Profile> {
        let mut tables = self.db.write()?;
        if !tables.accounts.iter().any(|a| a.id == profile.account_id) {
            return Err(StoreError::ForeignKeyViolation(format!(
                "profiles.account_id = {}",
                profile.account_id
            )));
        }
        tables.profiles.insert(profile.account_id, profile.clone());
        Ok(profile)
    }

    async fn count(&self) -> StoreResult<u64> {
        Ok(self.db.read()?.accounts.len() as u64)
    }
}

#[derive(Debug, Clone)]
pub struct InMemoryAppointmentStore {
    db: InMemoryDatabase,
}

#[async_trait]
impl AppointmentRepository for InMemoryAppointmentStore {
    async fn insert(&self, appointment: Appointment) -> StoreResult<Appointment> {
        self.db.write()?.appointments.push(appointment.clone());
        Ok(appointment)
    }

    async fn find_by_id(&self, id: AppointmentId) -> StoreResult<Option<Appointment>> {
        Ok(self.db.read()?.appointments.iter().find(|a| a.id == id).cloned())
    }

    async fn save(&self, appointment: Appointment) -> StoreResult<Appointment> {
        let mut tables = self.db.write()?;
        let Some(slot) = tables.appointments.iter_mut().find(|a| a.id == appointment.id) else {
            return Err(StoreError::Backend(format!("appointment {} vanished", appointment.id)));
        };
        *slot = appointment.clone();
        Ok(appointment)
    }

    async fn list_detailed(&self) -> StoreResult<Vec<AppointmentDetails>> {
        let tables = self.db.read()?;
        Ok(tables.appointments.iter().map(|a| tables.details(a)).collect())
    }

    async fn list_detailed_between(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> StoreResult<Vec<AppointmentDetails>> {
        let tables = self.db.read()?;
        Ok(tables
            .appointments
            .iter()
            .filter(|a| a.falls_within(start, end))
            .map(|a| tables.details(a))
            .collect())
    }

    async fn count(&self) -> StoreResult<u64> {
        Ok(self.db.read()?.appointments.len() as u64)
    }
}

#[derive(Debug, Clone)]
pub struct InMemoryBarbershopStore {
    db: InMemoryDatabase,
}

impl InMemoryBarbershopStore {
    /// Rows in the barber table, including any whose shop is gone.
    pub fn barber_count(&self) -> StoreResult<usize> {
        Ok(self.db.read()?.barbers.len())
    }
}

#[async_trait]
impl BarbershopRepository for InMemoryBarbershopStore {
    async fn insert(&self, barbershop: Barbershop) -> StoreResult<Barbershop> {
        self.db.write()?.barbershops.push(barbershop.clone());
        Ok(barbershop)
    }

    async fn find_by_id(&self, id: BarbershopId) -> StoreResult<Option<Barbershop>> {
        Ok(self.db.read()?.barbershops.iter().find(|s| s.id == id).cloned())
    }

    async fn list_directory(&self) -> StoreResult<Vec<BarbershopDirectory>> {
        let tables = self.db.read()?;
        Ok(tables
            .barbershops
            .iter()
            .map(|shop| BarbershopDirectory {
                barbershop: shop.clone(),
                barbers: tables
                    .barbers
                    .iter()
                    .filter(|b| b.barbershop_id == shop.id)
                    .cloned()
                    .collect(),
                appointments: tables
                    .appointments
                    .iter()
                    .filter(|a| a.barbershop_id == shop.id)
                    .cloned()
                    .collect(),
            })
            .collect())
    }

    async fn delete(&self, id: BarbershopId) -> StoreResult<bool> {
        let mut tables = self.db.write()?;
        let before = tables.barbershops.len();
        tables.barbershops.retain(|s| s.id != id);
        let removed = tables.barbershops.len() != before;
        if removed {
            tables.barbers.retain(|b| b.barbershop_id != id);
        }
        Ok(removed)
    }

    async fn insert_barber(&self, barber: Barber) -> StoreResult<Barber> {
        let mut tables = self.db.write()?;
        if !tables.barbershops.iter().any(|s| s.id == barber.barbershop_id) {
            return Err(StoreError::ForeignKeyViolation(format!(
                "barbers.barbershop_id = {}",
                barber.barbershop_id
            )));
        }
        tables.barbers.push(barber.clone());
        Ok(barber)
    }

    async fn count(&self) -> StoreResult<u64> {
        Ok(self.db.read()?.barbershops.len() as u64)
    }
}

#[derive(Debug, Clone)]
pub struct InMemoryHairstyleStore {
    db: InMemoryDatabase,
}

#[async_trait]
impl HairstyleRepository for InMemoryHairstyleStore {
    async fn insert(&self, hairstyle: Hairstyle) -> StoreResult<Hairstyle> {
        self.db.write()?.hairstyles.push(hairstyle.clone());
        Ok(hairstyle)
    }

    async fn list(&self) -> StoreResult<Vec<Hairstyle>> {
        Ok(self.db.read()?.hairstyles.clone())
    }

    async fn find_by_face_shape(&self, face_shape: &str) -> StoreResult<Vec<Hairstyle>> {
        Ok(self
            .db
            .read()?
            .hairstyles
            .iter()
            .filter(|h| h.recommends(face_shape))
            .cloned()
            .collect())
    }
}

#[derive(Debug, Clone)]
pub struct InMemoryAnalysisStore {
    db: InMemoryDatabase,
}

impl InMemoryAnalysisStore {
    pub fn len(&self) -> StoreResult<usize> {
        Ok(self.db.read()?.analyses.len())
    }
}

#[async_trait]
impl AnalysisRepository for InMemoryAnalysisStore {
    async fn insert(&self, result: FaceAnalysisResult) -> StoreResult<FaceAnalysisResult> {
        self.db.write()?.analyses.push(result.clone());
        Ok(result)
    }
}
