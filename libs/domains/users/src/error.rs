use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum_helpers::PayloadRejection;
use sea_orm::DbErr;
use thiserror::Error;
use tracing::{error, warn};

use crate::envelope::Envelope;
use crate::messages;

#[derive(Debug, Error)]
pub enum UserError {
    #[error("Invalid payload: {0}")]
    InvalidPayload(String),

    #[error("User not found: {0}")]
    NotFound(String),

    #[error("User with email '{0}' already exists")]
    DuplicateEmail(String),

    #[error("Insert failed: {0}")]
    InsertFailed(String),

    #[error("Database error: {0}")]
    Database(#[from] DbErr),

    #[error("Template error: {0}")]
    Template(String),
}

pub type UserResult<T> = Result<T, UserError>;

impl UserError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            UserError::InvalidPayload(_)
            | UserError::DuplicateEmail(_)
            | UserError::InsertFailed(_) => StatusCode::BAD_REQUEST,
            UserError::NotFound(_) => StatusCode::NOT_FOUND,
            UserError::Database(_) | UserError::Template(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Message shown to the client. Duplicate emails and every other insert
    /// failure share one text.
    pub fn client_message(&self) -> &'static str {
        match self {
            UserError::InvalidPayload(_) => messages::INVALID_PAYLOAD,
            UserError::DuplicateEmail(_) | UserError::InsertFailed(_) => messages::EMAIL_EXISTS,
            UserError::NotFound(_) => messages::USER_NOT_FOUND,
            UserError::Database(_) | UserError::Template(_) => messages::INTERNAL_ERROR,
        }
    }
}

impl From<PayloadRejection> for UserError {
    fn from(rejection: PayloadRejection) -> Self {
        UserError::InvalidPayload(rejection.to_string())
    }
}

impl IntoResponse for UserError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        if status.is_server_error() {
            error!(error = %self, "Request failed");
        } else {
            warn!(error = %self, status = status.as_u16(), "Request rejected");
        }

        (status, Json(Envelope::failure(self.client_message()))).into_response()
    }
}
