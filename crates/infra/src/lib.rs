//! Infrastructure layer: persistence adapters, schema bootstrap and
//! notification delivery.

pub mod db;
pub mod notifications;
pub mod store;


pub use notifications::LogNotifier;
pub use store::{
    InMemoryAccountStore, InMemoryAnalysisStore, InMemoryAppointmentStore, InMemoryBarbershopStore,
    InMemoryDatabase, InMemoryHairstyleStore, PostgresAccountStore, PostgresAnalysisStore,
    PostgresAppointmentStore, PostgresBarbershopStore, PostgresHairstyleStore,
};
