//! `barbermatch-booking`: appointment lifecycle plus the barbershop, barber
//! and hairstyle catalog.
//!
//! Services here own the business rules; storage is reached only through the
//! ports in [`store`], and customer notifications through [`Notifier`].

pub mod appointment;
pub mod appointments;
pub mod barbershop;
pub mod catalog;
pub mod hairstyle;
pub mod notify;
pub mod store;

pub use appointment::{
    Appointment, AppointmentDetails, AppointmentPatch, AppointmentStatus, parse_appointment_date,
};
pub use appointments::{AppointmentChanges, AppointmentService, BookAppointment};
pub use barbershop::{Barber, Barbershop, BarbershopDirectory, NewBarber, NewBarbershop};
pub use catalog::{BarbershopService, HairstyleService};
pub use hairstyle::{Hairstyle, NewHairstyle};
pub use notify::Notifier;
pub use store::{AppointmentRepository, BarbershopRepository, HairstyleRepository};
