//! `barbermatch-core`: shared domain building blocks.
//!
//! This crate contains **pure domain** primitives (no infrastructure concerns).

pub mod entity;
pub mod error;
pub mod id;
pub mod validation;

pub use entity::Entity;
pub use error::{DomainError, DomainResult, StoreError, StoreResult};
pub use id::{AccountId, AnalysisId, AppointmentId, BarberId, BarbershopId, HairstyleId};
