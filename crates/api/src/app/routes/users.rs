use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Extension, Path, rejection::JsonRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, put},
};

use barbermatch_auth::ProfilePatch;
use barbermatch_core::AccountId;

use crate::app::errors;
use crate::app::services::AppServices;
use crate::context::PrincipalContext;

pub fn router() -> Router {
    Router::new()
        .route("/users/me", get(me))
        .route("/users/:id", get(get_user))
        .route("/users/profile/:id", put(update_profile))
}

/// GET /users/me - the caller's own account and profile
pub async fn me(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(principal): Extension<PrincipalContext>,
) -> Response {
    find(&services, principal.account_id()).await
}

/// GET /users/:id
pub async fn get_user(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> Response {
    let id: AccountId = match errors::parse_id(&id, "user") {
        Ok(id) => id,
        Err(resp) => return resp,
    };
    find(&services, id).await
}

/// PUT /users/profile/:id - owner or admin only
pub async fn update_profile(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(principal): Extension<PrincipalContext>,
    Path(id): Path<String>,
    body: Result<Json<ProfilePatch>, JsonRejection>,
) -> Response {
    let id: AccountId = match errors::parse_id(&id, "user") {
        Ok(id) => id,
        Err(resp) => return resp,
    };
    if principal.account_id() != id && !principal.is_admin() {
        return errors::json_error(StatusCode::FORBIDDEN, "forbidden", "cannot edit another user's profile");
    }
    let Json(patch) = match body {
        Ok(body) => body,
        Err(rejection) => return errors::json_rejection_to_response(rejection),
    };

    match services.users.update_profile(id, patch).await {
        Ok(Some(profile)) => (StatusCode::OK, Json(profile)).into_response(),
        Ok(None) => errors::not_found("user"),
        Err(e) => errors::domain_error_to_response(e),
    }
}

async fn find(services: &AppServices, id: AccountId) -> Response {
    match services.users.find_by_id(id).await {
        Ok(Some(user)) => (StatusCode::OK, Json(user)).into_response(),
        Ok(None) => errors::not_found("user"),
        Err(e) => errors::domain_error_to_response(e),
    }
}
