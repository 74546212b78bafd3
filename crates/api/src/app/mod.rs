//! HTTP API application wiring (Axum router + service wiring).
//!
//! - `services.rs`: repositories and domain services
//! - `admin.rs`: admin façade over the services
//! - `routes/`: HTTP routes + handlers (one file per domain area)
//! - `dto.rs`: request/response bodies
//! - `errors.rs`: consistent error responses

use std::sync::Arc;

use axum::{Extension, Router};
use tower::ServiceBuilder;

use barbermatch_auth::Hs256Jwt;

use crate::config::ApiConfig;
use crate::middleware;

pub mod admin;
pub mod dto;
pub mod errors;
pub mod routes;
pub mod services;

/// Build the full HTTP router (public entrypoint used by `main.rs`).
pub async fn build_app(config: ApiConfig) -> Result<Router, sqlx::Error> {
    let jwt = Arc::new(Hs256Jwt::new(config.jwt_secret.as_bytes()));
    let auth_state = middleware::AuthState { jwt: jwt.clone() };

    let services = Arc::new(services::build_services(&config, jwt).await?);

    // Token required; per-route role policies are checked in the handlers.
    let protected = routes::protected().route_layer(axum::middleware::from_fn_with_state(
        auth_state,
        middleware::auth_middleware,
    ));

    Ok(routes::public()
        .merge(protected)
        .layer(ServiceBuilder::new().layer(Extension(services))))
}
