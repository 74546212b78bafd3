use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Extension, Path, rejection::JsonRejection},
    http::StatusCode,
    response::Response,
    routing::{get, post},
};

use barbermatch_auth::RolePolicy;
use barbermatch_booking::{NewBarber, NewBarbershop};
use barbermatch_core::BarbershopId;

use crate::app::errors;
use crate::app::services::AppServices;
use crate::authz;
use crate::context::PrincipalContext;

const CREATE_POLICY: RolePolicy = RolePolicy::ADMIN;
const ADD_BARBER_POLICY: RolePolicy = RolePolicy::OPEN;

pub fn public_router() -> Router {
    Router::new().route("/barbershops", get(list_barbershops))
}

pub fn router() -> Router {
    Router::new()
        .route("/barbershops", post(create_barbershop))
        .route("/barbershops/:id/barbers", post(add_barber))
}

/// GET /barbershops - with barbers and appointments attached
pub async fn list_barbershops(Extension(services): Extension<Arc<AppServices>>) -> Response {
    errors::respond(StatusCode::OK, services.barbershops.list().await)
}

/// POST /barbershops
pub async fn create_barbershop(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(principal): Extension<PrincipalContext>,
    body: Result<Json<NewBarbershop>, JsonRejection>,
) -> Response {
    if let Err(resp) = authz::require(CREATE_POLICY, Some(&principal)) {
        return resp;
    }
    let Json(body) = match body {
        Ok(body) => body,
        Err(rejection) => return errors::json_rejection_to_response(rejection),
    };
    errors::respond(StatusCode::CREATED, services.barbershops.create(body).await)
}

/// POST /barbershops/:id/barbers
pub async fn add_barber(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(principal): Extension<PrincipalContext>,
    Path(id): Path<String>,
    body: Result<Json<NewBarber>, JsonRejection>,
) -> Response {
    if let Err(resp) = authz::require(ADD_BARBER_POLICY, Some(&principal)) {
        return resp;
    }
    let id: BarbershopId = match errors::parse_id(&id, "barbershop") {
        Ok(id) => id,
        Err(resp) => return resp,
    };
    let Json(body) = match body {
        Ok(body) => body,
        Err(rejection) => return errors::json_rejection_to_response(rejection),
    };
    errors::respond(StatusCode::CREATED, services.barbershops.add_barber(id, body).await)
}
