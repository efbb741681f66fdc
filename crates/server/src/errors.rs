use std::fmt;

use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use configs::ErrorMapping;
use service::CarError;
use tracing::{error, warn};

/// Plain-text error response: status code plus the error text as body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiError {
    status: StatusCode,
    message: String,
}

impl ApiError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self { status, message: message.into() }
    }

    /// Path id that is not an unsigned integer fitting the id type.
    pub fn bad_id() -> Self {
        Self::new(StatusCode::BAD_REQUEST, "bad 'id' url argument")
    }

    /// Request body the JSON decoder refused.
    pub fn unprocessable(err: impl fmt::Display) -> Self {
        Self::new(StatusCode::UNPROCESSABLE_ENTITY, err.to_string())
    }

    pub fn from_car(err: CarError, mapping: ErrorMapping) -> Self {
        let status = match mapping {
            ErrorMapping::Legacy => StatusCode::INTERNAL_SERVER_ERROR,
            ErrorMapping::Strict => match &err {
                CarError::NotFound(_) => StatusCode::NOT_FOUND,
                CarError::BadPrice | CarError::BadMileage => StatusCode::UNPROCESSABLE_ENTITY,
                CarError::DeadlineExceeded | CarError::Cancelled => StatusCode::SERVICE_UNAVAILABLE,
                CarError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
            },
        };
        Self::new(status, err.to_string())
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.status, self.message)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if self.status.is_server_error() {
            error!(status = self.status.as_u16(), error = %self.message, "request failed");
        } else {
            warn!(status = self.status.as_u16(), error = %self.message, "request rejected");
        }
        (
            self.status,
            [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
            self.message,
        )
            .into_response()
    }
}
