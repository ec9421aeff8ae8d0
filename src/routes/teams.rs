use axum::{
    Json,
    extract::{Extension, Path},
    http::StatusCode,
    response::IntoResponse,
};
use tracing::info;

use crate::dto::{
    form_dto::{ListLength, RemoveLast},
    team_dto::{TeamPatch, TeamRecord},
    update_dto::FormUpdate,
};
use crate::error::AppResult;
use crate::services::session_store::SessionStore;

/**
 * POST request to append an empty team.
 */
pub async fn add_team(
    Extension(store): Extension<SessionStore>,
    Path(session_id): Path<String>,
) -> AppResult<impl IntoResponse> {
    info!("Adding a team to session {}", session_id);

    let len = store
        .update(&session_id, |form| {
            let len = form.add_team();
            Ok((len, Some(FormUpdate::TeamsResized { len })))
        })
        .await?;

    Ok((StatusCode::OK, Json(ListLength { len })))
}

/**
 * DELETE request to drop the last team. The only team is never removed.
 */
pub async fn remove_last_team(
    Extension(store): Extension<SessionStore>,
    Path(session_id): Path<String>,
) -> AppResult<impl IntoResponse> {
    info!("Removing the last team of session {}", session_id);

    let result = store
        .update(&session_id, |form| {
            let removed = form.remove_last_team();
            let len = form.teams.len();
            let update = removed.then_some(FormUpdate::TeamsResized { len });
            Ok((RemoveLast { len, removed }, update))
        })
        .await?;

    Ok((StatusCode::OK, Json(result)))
}

/**
 * PATCH request to edit fields of the team at `index` (0-based).
 */
pub async fn edit_team(
    Extension(store): Extension<SessionStore>,
    Path((session_id, index)): Path<(String, usize)>,
    Json(payload): Json<TeamPatch>,
) -> AppResult<Json<TeamRecord>> {
    info!("Editing team at index {} of session {}", index, session_id);

    let team = store
        .update(&session_id, |form| {
            let team = form.edit_team(index, payload)?.clone();
            Ok((team.clone(), Some(FormUpdate::TeamUpdate { index, team })))
        })
        .await?;

    Ok(Json(team))
}
