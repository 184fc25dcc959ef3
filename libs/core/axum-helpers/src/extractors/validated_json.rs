//! JSON extractor with automatic validation using the validator crate.

use crate::errors::ErrorResponse;
use axum::{
    extract::{FromRequest, Json, Request, rejection::JsonRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::de::DeserializeOwned;
use thiserror::Error;
use validator::{Validate, ValidationErrors};

/// Why a [`ValidatedJson`] body was refused.
///
/// Handlers that need their own error format take
/// `Result<ValidatedJson<T>, PayloadRejection>` and convert it.
#[derive(Debug, Error)]
pub enum PayloadRejection {
    /// Missing body, wrong content type or malformed JSON
    #[error("{0}")]
    Json(#[from] JsonRejection),

    /// Well-formed JSON that fails `Validate`
    #[error("Request validation failed: {0}")]
    Validation(#[from] ValidationErrors),
}

impl IntoResponse for PayloadRejection {
    fn into_response(self) -> Response {
        let body = ErrorResponse::new("BadRequest", self.to_string());
        (StatusCode::BAD_REQUEST, axum::Json(body)).into_response()
    }
}

/// JSON extractor with automatic validation.
///
/// # Example
/// ```ignore
/// use axum_helpers::ValidatedJson;
/// use serde::Deserialize;
/// use validator::Validate;
///
/// #[derive(Deserialize, Validate)]
/// struct CreateUser {
///     #[validate(required, length(min = 1))]
///     username: Option<String>,
/// }
///
/// async fn create_user(ValidatedJson(payload): ValidatedJson<CreateUser>) -> String {
///     format!("Creating user: {:?}", payload.username)
/// }
/// ```
pub struct ValidatedJson<T>(pub T);

impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = PayloadRejection;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(data) = Json::<T>::from_request(req, state).await?;
        data.validate()?;
        Ok(ValidatedJson(data))
    }
}
