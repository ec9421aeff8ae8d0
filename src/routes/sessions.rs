use std::sync::Arc;

use axum::{
    Json,
    extract::{Extension, Path},
    http::StatusCode,
    response::IntoResponse,
};
use chrono::Local;
use tracing::info;

use crate::config::ServerConfig;
use crate::dto::{
    form_dto::{CreateSession, ScheduleForm, SessionCreated, SetDate},
    update_dto::FormUpdate,
};
use crate::error::AppResult;
use crate::services::session_store::SessionStore;

/**
 * POST request to open a new form session. The body is optional and the
 * date defaults to today.
 */
pub async fn create_session(
    Extension(store): Extension<SessionStore>,
    Extension(config): Extension<Arc<ServerConfig>>,
    payload: Option<Json<CreateSession>>,
) -> impl IntoResponse {
    let payload = payload.map(|Json(payload)| payload).unwrap_or_default();
    let date = payload.date.unwrap_or_else(|| Local::now().date_naive());
    let form = ScheduleForm::new(date, config.initial_teams, config.initial_in_times);
    let id = store.create(form.clone()).await;

    (StatusCode::CREATED, Json(SessionCreated { id, form }))
}

/**
 * GET request for the current state of a session's form.
 */
pub async fn get_session(
    Extension(store): Extension<SessionStore>,
    Path(session_id): Path<String>,
) -> AppResult<Json<ScheduleForm>> {
    let form = store.read(&session_id, |form| form.clone()).await?;
    Ok(Json(form))
}

/**
 * DELETE request to end a session and discard its form.
 */
pub async fn delete_session(
    Extension(store): Extension<SessionStore>,
    Path(session_id): Path<String>,
) -> AppResult<impl IntoResponse> {
    store.remove(&session_id).await?;
    Ok((StatusCode::OK, "Session was successfully ended.".to_string()))
}

/**
 * PUT request to change the schedule date.
 */
pub async fn set_date(
    Extension(store): Extension<SessionStore>,
    Path(session_id): Path<String>,
    Json(payload): Json<SetDate>,
) -> AppResult<impl IntoResponse> {
    info!("Setting date of session {} to {}", session_id, payload.date);

    let date = store
        .update(&session_id, |form| {
            form.set_date(payload.date);
            Ok((form.date, Some(FormUpdate::DateUpdate { date: form.date })))
        })
        .await?;

    Ok((StatusCode::OK, Json(SetDate { date })))
}
