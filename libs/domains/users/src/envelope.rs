use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Outcome marker carried in every JSON response
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub enum Status {
    #[serde(rename = "satisfactorio")]
    Success,
    #[serde(rename = "falló")]
    Failure,
}

/// JSON response body shared by every `/users` endpoint.
///
/// ```json
/// { "estado": "satisfactorio", "mensaje": "Usuarios listados", "data": { "users": [] } }
/// ```
///
/// `data` is omitted entirely when there is nothing to return.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Envelope<T = ()> {
    #[serde(rename = "estado")]
    pub status: Status,
    #[serde(rename = "mensaje")]
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

impl Envelope {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            status: Status::Success,
            message: message.into(),
            data: None,
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            status: Status::Failure,
            message: message.into(),
            data: None,
        }
    }
}

impl<T> Envelope<T> {
    pub fn with_data(message: impl Into<String>, data: T) -> Self {
        Self {
            status: Status::Success,
            message: message.into(),
            data: Some(data),
        }
    }
}
