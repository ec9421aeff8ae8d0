use axum::{Json, http::StatusCode, response::IntoResponse};
use tracing::info;

use crate::dto::catalog_dto::Catalog;

/**
 * GET request for the people, materials, trucks and roles a form can pick from.
 */
pub async fn get_catalog() -> impl IntoResponse {
    info!("Fetching catalog.");
    (StatusCode::OK, Json(Catalog::reference()))
}

pub async fn health() -> impl IntoResponse {
    (StatusCode::OK, "ok")
}
