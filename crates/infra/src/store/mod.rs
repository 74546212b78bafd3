//! Repository adapters.

pub mod in_memory;
pub mod postgres;

pub use in_memory::{
    InMemoryAccountStore, InMemoryAnalysisStore, InMemoryAppointmentStore, InMemoryBarbershopStore,
    InMemoryDatabase, InMemoryHairstyleStore,
};
pub use postgres::{
    PostgresAccountStore, PostgresAnalysisStore, PostgresAppointmentStore, PostgresBarbershopStore,
    PostgresHairstyleStore,
};
