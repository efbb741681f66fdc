use axum::http::{header, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

pub const JSON_API: &str = "application/vnd.api+json";

/// JSON success body sent as `application/vnd.api+json`.
#[derive(Debug)]
pub struct JsonApi<T> {
    status: StatusCode,
    body: T,
}

impl<T> JsonApi<T> {
    pub fn ok(body: T) -> Self {
        Self { status: StatusCode::OK, body }
    }

    pub fn accepted(body: T) -> Self {
        Self { status: StatusCode::ACCEPTED, body }
    }
}

impl<T: Serialize> IntoResponse for JsonApi<T> {
    fn into_response(self) -> Response {
        let mut res = (self.status, Json(self.body)).into_response();
        // Json sets application/json unless serialisation failed
        if res.status() == self.status {
            res.headers_mut()
                .insert(header::CONTENT_TYPE, HeaderValue::from_static(JSON_API));
        }
        res
    }
}

/// 204 with an empty body.
#[derive(Debug, Clone, Copy)]
pub struct NoContent;

impl IntoResponse for NoContent {
    fn into_response(self) -> Response {
        let mut res = StatusCode::NO_CONTENT.into_response();
        res.headers_mut()
            .insert(header::CONTENT_TYPE, HeaderValue::from_static(JSON_API));
        res
    }
}
