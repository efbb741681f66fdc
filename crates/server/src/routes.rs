pub mod cars;

use axum::{routing::get, Json, Router};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::{DefaultMakeSpan, DefaultOnFailure, DefaultOnRequest, DefaultOnResponse, TraceLayer};
use tracing::Level;

use common::types::Health;

use crate::state::AppState;

/// Every car route is mounted under this prefix.
pub const API_PREFIX: &str = "/tt/v0";

pub async fn health() -> Json<Health> {
    Json(Health::ok())
}

/// Build the application router: the car routes plus the health probe.
pub fn build_router(state: AppState) -> Router {
    let http_timeout = state.http_timeout;
    let api = Router::new()
        .route("/cars", get(cars::list_cars).post(cars::create_car))
        .route(
            "/cars/:id",
            get(cars::get_car).put(cars::update_car).delete(cars::delete_car),
        )
        .with_state(state);

    Router::new()
        .route("/health", get(health))
        .nest(API_PREFIX, api)
        .layer(TimeoutLayer::new(http_timeout))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO).include_headers(false))
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO).include_headers(false))
                .on_failure(DefaultOnFailure::new().level(Level::ERROR)),
        )
}
