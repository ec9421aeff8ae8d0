use axum::{
    Json,
    extract::{Extension, Path},
    http::{StatusCode, header},
    response::IntoResponse,
};
use tracing::info;

use crate::dto::form_dto::ScheduleForm;
use crate::error::AppResult;
use crate::services::{schedule_formatter::format_schedule, session_store::SessionStore};

pub const DOWNLOAD_FILE_NAME: &str = "move_schedule.txt";
const TEXT_CONTENT_TYPE: &str = "text/plain; charset=utf-8";

async fn render(store: &SessionStore, session_id: &str) -> AppResult<String> {
    store
        .read(session_id, |form| format_schedule(form.date, &form.in_times, &form.teams))
        .await
}

/**
 * POST request to generate the schedule text of a session.
 */
pub async fn generate_schedule(
    Extension(store): Extension<SessionStore>,
    Path(session_id): Path<String>,
) -> AppResult<impl IntoResponse> {
    info!("Generating schedule for session {}", session_id);
    let schedule = render(&store, &session_id).await?;

    Ok((StatusCode::OK, [(header::CONTENT_TYPE, TEXT_CONTENT_TYPE)], schedule))
}

/**
 * GET request for the schedule text as a `move_schedule.txt` attachment.
 */
pub async fn download_schedule(
    Extension(store): Extension<SessionStore>,
    Path(session_id): Path<String>,
) -> AppResult<impl IntoResponse> {
    info!("Downloading schedule for session {}", session_id);
    let schedule = render(&store, &session_id).await?;
    let disposition = format!("attachment; filename=\"{}\"", DOWNLOAD_FILE_NAME);

    Ok((
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, TEXT_CONTENT_TYPE.to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        schedule,
    ))
}

/**
 * POST request that formats a complete form sent in the body, without a session.
 */
pub async fn format_form(Json(payload): Json<ScheduleForm>) -> AppResult<impl IntoResponse> {
    info!("Formatting a schedule for {}", payload.date);
    payload.validate()?;
    let schedule = format_schedule(payload.date, &payload.in_times, &payload.teams);

    Ok((StatusCode::OK, [(header::CONTENT_TYPE, TEXT_CONTENT_TYPE)], schedule))
}
