use axum::{
    Json,
    extract::{Extension, Path},
    http::StatusCode,
    response::IntoResponse,
};
use tracing::info;

use crate::dto::{
    form_dto::{ListLength, RemoveLast},
    in_time_dto::{InTimePatch, InTimeRecord},
    update_dto::FormUpdate,
};
use crate::error::AppResult;
use crate::services::session_store::SessionStore;

pub async fn add_in_time(
    Extension(store): Extension<SessionStore>,
    Path(session_id): Path<String>,
) -> AppResult<impl IntoResponse> {
    info!("Adding an in-time to session {}", session_id);

    let len = store
        .update(&session_id, |form| {
            let len = form.add_in_time();
            Ok((len, Some(FormUpdate::InTimesResized { len })))
        })
        .await?;

    Ok((StatusCode::OK, Json(ListLength { len })))
}

pub async fn remove_last_in_time(
    Extension(store): Extension<SessionStore>,
    Path(session_id): Path<String>,
) -> AppResult<impl IntoResponse> {
    info!("Removing the last in-time of session {}", session_id);

    let result = store
        .update(&session_id, |form| {
            let removed = form.remove_last_in_time();
            let len = form.in_times.len();
            let update = removed.then_some(FormUpdate::InTimesResized { len });
            Ok((RemoveLast { len, removed }, update))
        })
        .await?;

    Ok((StatusCode::OK, Json(result)))
}

pub async fn edit_in_time(
    Extension(store): Extension<SessionStore>,
    Path((session_id, index)): Path<(String, usize)>,
    Json(payload): Json<InTimePatch>,
) -> AppResult<Json<InTimeRecord>> {
    info!("Editing in-time at index {} of session {}", index, session_id);

    let in_time = store
        .update(&session_id, |form| {
            let in_time = form.edit_in_time(index, payload)?.clone();
            Ok((in_time.clone(), Some(FormUpdate::InTimeUpdate { index, in_time })))
        })
        .await?;

    Ok(Json(in_time))
}
