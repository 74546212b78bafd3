use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{
        Extension, Path, Query,
        rejection::{JsonRejection, QueryRejection},
    },
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post, put},
};
use serde::Serialize;

use barbermatch_auth::RolePolicy;
use barbermatch_booking::{AppointmentChanges, BookAppointment};
use barbermatch_core::{AppointmentId, DomainResult};

use crate::app::dto::{DateRangeQuery, ReminderResponse};
use crate::app::errors;
use crate::app::services::AppServices;
use crate::authz;
use crate::context::PrincipalContext;

/// Any authenticated caller may book and manage appointments.
const POLICY: RolePolicy = RolePolicy::OPEN;

pub fn router() -> Router {
    Router::new()
        .route("/appointments", get(list_appointments).post(create_appointment))
        .route("/appointments/:id", put(update_appointment).delete(cancel_appointment))
        .route("/appointments/:id/remind", post(remind_appointment))
}

/// GET /appointments?startDate&endDate
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

    let result = match range {
        Some((start, end)) => services.appointments.find_by_date_range(start, end).await,
        None => services.appointments.find_all().await,
    };
    errors::respond(StatusCode::OK, result)
}

/// POST /appointments
pub async fn create_appointment(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(principal): Extension<PrincipalContext>,
    body: Result<Json<BookAppointment>, JsonRejection>,
) -> Response {
    if let Err(resp) = authz::require(POLICY, Some(&principal)) {
        return resp;
    }
    let Json(body) = match body {
        Ok(body) => body,
        Err(rejection) => return errors::json_rejection_to_response(rejection),
    };
    errors::respond(StatusCode::CREATED, services.appointments.create(body).await)
}

/// PUT /appointments/:id
pub async fn update_appointment(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(principal): Extension<PrincipalContext>,
    Path(id): Path<String>,
    body: Result<Json<AppointmentChanges>, JsonRejection>,
) -> Response {
    if let Err(resp) = authz::require(POLICY, Some(&principal)) {
        return resp;
    }
    let id: AppointmentId = match errors::parse_id(&id, "appointment") {
        Ok(id) => id,
        Err(resp) => return resp,
    };
    let Json(changes) = match body {
        Ok(body) => body,
        Err(rejection) => return errors::json_rejection_to_response(rejection),
    };
    found_or_404(services.appointments.update(id, changes).await)
}

/// DELETE /appointments/:id - soft cancel, returns the cancelled record
pub async fn cancel_appointment(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(principal): Extension<PrincipalContext>,
    Path(id): Path<String>,
) -> Response {
    if let Err(resp) = authz::require(POLICY, Some(&principal)) {
        return resp;
    }
    let id: AppointmentId = match errors::parse_id(&id, "appointment") {
        Ok(id) => id,
        Err(resp) => return resp,
    };
    found_or_404(services.appointments.cancel(id).await)
}

/// POST /appointments/:id/remind
pub async fn remind_appointment(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(principal): Extension<PrincipalContext>,
    Path(id): Path<String>,
) -> Response {
    if let Err(resp) = authz::require(POLICY, Some(&principal)) {
        return resp;
    }
    let id: AppointmentId = match errors::parse_id(&id, "appointment") {
        Ok(id) => id,
        Err(resp) => return resp,
    };
    let result = services
        .appointments
        .remind(id)
        .await
        .map(|sent| sent.map(|delivered| ReminderResponse { delivered }));
    found_or_404(result)
}

fn found_or_404<T: Serialize>(result: DomainResult<Option<T>>) -> Response {
    match result {
        Ok(Some(body)) => (StatusCode::OK, Json(body)).into_response(),
        Ok(None) => errors::not_found("appointment"),
        Err(e) => errors::domain_error_to_response(e),
    }
}
