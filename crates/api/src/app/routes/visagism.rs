use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Extension, rejection::JsonRejection},
    http::StatusCode,
    response::Response,
    routing::post,
};

use crate::app::dto::AnalyzeImageRequest;
use crate::app::errors;
use crate::app::services::AppServices;

pub fn router() -> Router {
    Router::new().route("/visagism/analyze", post(analyze))
}

/// POST /visagism/analyze
pub async fn analyze(
    Extension(services): Extension<Arc<AppServices>>,
    body: Result<Json<AnalyzeImageRequest>, JsonRejection>,
) -> Response {
    let Json(body) = match body {
        Ok(body) => body,
        Err(rejection) => return errors::json_rejection_to_response(rejection),
    };
    errors::respond(StatusCode::CREATED, services.visagism.analyze_image(&body.image).await)
}
