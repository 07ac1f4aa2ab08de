//! Response envelope shared by every catalog endpoint

use axum::http::StatusCode;
use serde::Serialize;
use utoipa::ToSchema;

/// Outcome discriminator carried by every response
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum ResponseStatus {
    Success,
    /// Client-caused failure (4xx)
    Fail,
    /// Server-side failure (5xx)
    Error,
}

impl From<StatusCode> for ResponseStatus {
    fn from(code: StatusCode) -> Self {
        if code.is_server_error() {
            ResponseStatus::Error
        } else if code.is_client_error() {
            ResponseStatus::Fail
        } else {
            ResponseStatus::Success
        }
    }
}

/// `{ status, message?, data? }`
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub status: ResponseStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

impl<T> ApiResponse<T> {
    /// Payload without a message
    pub fn data(code: StatusCode, data: T) -> Self {
        Self {
            status: code.into(),
            message: None,
            data: Some(data),
        }
    }

    /// Payload with a message
    pub fn data_with_message(code: StatusCode, message: impl Into<String>, data: T) -> Self {
        Self {
            status: code.into(),
            message: Some(message.into()),
            data: Some(data),
        }
    }

    /// Message only
    pub fn message(code: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status: code.into(),
            message: Some(message.into()),
            data: None,
        }
    }
}
