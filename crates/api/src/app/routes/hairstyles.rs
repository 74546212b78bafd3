use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{
        Extension, Query,
        rejection::{JsonRejection, QueryRejection},
    },
    http::StatusCode,
    response::Response,
    routing::{get, post},
};

use barbermatch_auth::RolePolicy;
use barbermatch_booking::NewHairstyle;

use crate::app::dto::FaceShapeQuery;
use crate::app::errors;
use crate::app::services::AppServices;
use crate::authz;
use crate::context::PrincipalContext;

const CREATE_POLICY: RolePolicy = RolePolicy::ADMIN;

pub fn public_router() -> Router {
    Router::new()
        .route("/hairstyles", get(list_hairstyles))
        .route("/hairstyles/filter", get(filter_hairstyles))
}

pub fn router() -> Router {
    Router::new().route("/hairstyles", post(create_hairstyle))
}

/// GET /hairstyles
pub async fn list_hairstyles(Extension(services): Extension<Arc<AppServices>>) -> Response {
    errors::respond(StatusCode::OK, services.hairstyles.list().await)
}

/// GET /hairstyles/filter?faceShape=
pub async fn filter_hairstyles(
    Extension(services): Extension<Arc<AppServices>>,
    query: Result<Query<FaceShapeQuery>, QueryRejection>,
) -> Response {
    let Query(query) = match query {
        Ok(query) => query,
        Err(rejection) => return errors::query_rejection_to_response(rejection),
    };
    errors::respond(
        StatusCode::OK,
        services.hairstyles.filter_by_face_shape(&query.face_shape).await,
    )
}

/// POST /hairstyles
pub async fn create_hairstyle(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(principal): Extension<PrincipalContext>,
    body: Result<Json<NewHairstyle>, JsonRejection>,
) -> Response {
    if let Err(resp) = authz::require(CREATE_POLICY, Some(&principal)) {
        return resp;
    }
    let Json(body) = match body {
        Ok(body) => body,
        Err(rejection) => return errors::json_rejection_to_response(rejection),
    };
    errors::respond(StatusCode::CREATED, services.hairstyles.create(body).await)
}
