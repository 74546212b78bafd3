use axum::{Router, routing::get};

pub mod admin;
pub mod appointments;
pub mod auth;
pub mod barbershops;
pub mod hairstyles;
pub mod system;
pub mod users;
pub mod visagism;

/// Endpoints reachable without a token.
pub fn public() -> Router {
    Router::new()
        .route("/health", get(system::health))
        .merge(auth::router())
        .merge(barbershops::public_router())
        .merge(hairstyles::public_router())
}

/// Endpoints behind the bearer-token middleware.
pub fn protected() -> Router {
    Router::new()
        .merge(users::router())
        .merge(appointments::router())
        .merge(barbershops::router())
        .merge(hairstyles::router())
        .merge(visagism::router())
        .merge(admin::router())
}
