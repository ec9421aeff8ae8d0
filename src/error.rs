use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use tracing::warn;

use crate::services::form_model::FormError;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Session {0} was not found.")]
    SessionNotFound(String),

    #[error(transparent)]
    Form(#[from] FormError),
}

pub type AppResult<T> = Result<T, AppError>;

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::SessionNotFound(_) => StatusCode::NOT_FOUND,
            AppError::Form(FormError::TeamOutOfRange { .. } | FormError::InTimeOutOfRange { .. }) => {
                StatusCode::NOT_FOUND
            }
            AppError::Form(_) => StatusCode::BAD_REQUEST,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        warn!("Request failed with {}: {}", status, self);
        (status, self.to_string()).into_response()
    }
}
