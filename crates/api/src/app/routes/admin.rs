//! Admin routes. Every handler requires the `admin` role.

use std::sync::Arc;

use axum::{
    Router,
    extract::{Extension, Path, Query, rejection::QueryRejection},
    http::StatusCode,
    response::Response,
    routing::{delete, get},
};

use barbermatch_auth::RolePolicy;
use barbermatch_core::{AccountId, BarbershopId};

use crate::app::dto::{DateRangeQuery, MessageResponse};
use crate::app::errors;
use crate::app::services::AppServices;
use crate::authz;
use crate::context::PrincipalContext;

const POLICY: RolePolicy = RolePolicy::ADMIN;

pub fn router() -> Router {
    Router::new()
        .route("/admin/users", get(list_users))
        .route("/admin/users/:id", delete(delete_user))
        .route("/admin/barbershops", get(list_barbershops))
        .route("/admin/barbershops/:id", delete(delete_barbershop))
        .route("/admin/appointments", get(list_appointments))
        .route("/admin/dashboard", get(dashboard))
}

/// GET /admin/users
pub async fn list_users(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(principal): Extension<PrincipalContext>,
) -> Response {
    if let Err(resp) = authz::require(POLICY, Some(&principal)) {
        return resp;
    }
    errors::respond(StatusCode::OK, services.admin.users().await)
}

/// GET /admin/barbershops
pub async fn list_barbershops(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(principal): Extension<PrincipalContext>,
) -> Response {
    if let Err(resp) = authz::require(POLICY, Some(&principal)) {
        return resp;
    }
    errors::respond(StatusCode::OK, services.admin.barbershops().await)
}

/// GET /admin/appointments?startDate&endDate
pub async fn list_appointments(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(principal): Extension<PrincipalContext>,
    query: Result<Query<DateRangeQuery>, QueryRejection>,
) -> Response {
    if let Err(resp) = authz::require(POLICY, Some(&principal)) {
        return resp;
    }
    let Query(query) = match query {
        Ok(query) => query,
        Err(rejection) => return errors::query_rejection_to_response(rejection),
    };
    let range = match query.range() {
        Ok(range) => range,
        Err(e) => return errors::domain_error_to_response(e),
    };
    errors::respond(StatusCode::OK, services.admin.appointments(range).await)
}

/// DELETE /admin/users/:id
pub async fn delete_user(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(principal): Extension<PrincipalContext>,
    Path(id): Path<String>,
) -> Response {
    if let Err(resp) = authz::require(POLICY, Some(&principal)) {
        return resp;
    }
    let id: AccountId = match errors::parse_id(&id, "user") {
        Ok(id) => id,
        Err(resp) => return resp,
    };
    let result = services
        .admin
        .delete_user(id)
        .await
        .map(|()| MessageResponse::new("User deleted successfully"));
    errors::respond(StatusCode::OK, result)
}

/// DELETE /admin/barbershops/:id
pub async fn delete_barbershop(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(principal): Extension<PrincipalContext>,
    Path(id): Path<String>,
) -> Response {
    if let Err(resp) = authz::require(POLICY, Some(&principal)) {
        return resp;
    }
    let id: BarbershopId = match errors::parse_id(&id, "barbershop") {
        Ok(id) => id,
        Err(resp) => return resp,
    };
    let result = services
        .admin
        .delete_barbershop(id)
        .await
        .map(|()| MessageResponse::new("Barbershop deleted successfully"));
    errors::respond(StatusCode::OK, result)
}

/// GET /admin/dashboard
pub async fn dashboard(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(principal): Extension<PrincipalContext>,
) -> Response {
    if let Err(resp) = authz::require(POLICY, Some(&principal)) {
        return resp;
    }
    errors::respond(StatusCode::OK, services.admin.dashboard().await)
}
