//! Admin façade: read-only composition over the other services plus the two
//! admin deletions.

use std::sync::Arc;

use chrono::{DateTime, Utc};

use barbermatch_auth::{AccountView, UserDirectory};
use barbermatch_booking::{AppointmentDetails, AppointmentService, BarbershopDirectory, BarbershopService};
use barbermatch_core::{AccountId, BarbershopId, DomainError, DomainResult};

use crate::app::dto::DashboardStats;

pub struct AdminFacade {
    users: Arc<UserDirectory>,
    appointments: Arc<AppointmentService>,
    barbershops: Arc<BarbershopService>,
}

impl AdminFacade {
    pub fn new(
        users: Arc<UserDirectory>,
        appointments: Arc<AppointmentService>,
        barbershops: Arc<BarbershopService>,
    ) -> Self {
        Self {
            users,
            appointments,
            barbershops,
        }
    }

    pub async fn users(&self) -> DomainResult<Vec<AccountView>> {
        self.users.list().await
    }

    pub async fn barbershops(&self) -> DomainResult<Vec<BarbershopDirectory>> {
        self.barbershops.list().await
    }

    pub async fn appointments(
        &self,
        range: Option<(DateTime<Utc>, DateTime<Utc>)>,
    ) -> DomainResult<Vec<AppointmentDetails>> {
        match range {
            Some((start, end)) => self.appointments.find_by_date_range(start, end).await,
            None => self.appointments.find_all().await,
        }
    }

    pub async fn delete_user(&self, id: AccountId) -> DomainResult<()> {
        if self.users.delete(id).await? {
            Ok(())
        } else {
            Err(DomainError::not_found("user"))
        }
    }

    pub async fn delete_barbershop(&self, id: BarbershopId) -> DomainResult<()> {
        if self.barbershops.delete(id).await? {
            Ok(())
        } else {
            Err(DomainError::not_found("barbershop"))
        }
    }

    pub async fn dashboard(&self) -> DomainResult<DashboardStats> {
        Ok(DashboardStats {
            users: self.users.count().await?,
            appointments: self.appointments.count().await?,
            barbershops: self.barbershops.count().await?,
        })
    }
}
