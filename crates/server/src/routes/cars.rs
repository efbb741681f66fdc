//! Handlers for `/cars` and `/cars/:id`.
//!
//! Bodies are read as raw bytes and decoded with serde_json whatever the
//! request content type says. Create and update decode the body before
//! looking at the path id.

use axum::body::Bytes;
use axum::extract::{Path, State};
use service::{CarId, CarInput, CarModel};
use tracing::info;

use crate::errors::ApiError;
use crate::response::{JsonApi, NoContent};
use crate::state::AppState;

/// Decimal digits only, and the value must fit the id type.
pub fn parse_id(raw: &str) -> Result<CarId, ApiError> {
    if raw.is_empty() || !raw.bytes().all(|b| b.is_ascii_digit()) {
        return Err(ApiError::bad_id());
    }
    raw.parse::<u32>()
        .ok()
        .and_then(|v| CarId::try_from(v).ok())
        .ok_or_else(ApiError::bad_id)
}

fn decode(body: &Bytes) -> Result<CarInput, ApiError> {
    serde_json::from_slice(body).map_err(ApiError::unprocessable)
}

pub async fn list_cars(State(state): State<AppState>) -> Result<JsonApi<Vec<CarModel>>, ApiError> {
    let cars = state
        .repo
        .list(&state.context())
        .await
        .map_err(|e| ApiError::from_car(e, state.error_mapping))?;
    Ok(JsonApi::ok(cars))
}

pub async fn get_car(
    State(state): State<AppState>,
    Path(raw): Path<String>,
) -> Result<JsonApi<CarModel>, ApiError> {
    let id = parse_id(&raw)?;
    let car = state
        .repo
        .get(&state.context(), id)
        .await
        .map_err(|e| ApiError::from_car(e, state.error_mapping))?;
    Ok(JsonApi::ok(car))
}

pub async fn create_car(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<JsonApi<CarModel>, ApiError> {
    let input = decode(&body)?;
    let car = state
        .repo
        .create(&state.context(), input)
        .await
        .map_err(|e| ApiError::from_car(e, state.error_mapping))?;
    info!(id = car.id, brand = %car.brand, "car model created");
    Ok(JsonApi::accepted(car))
}

pub async fn update_car(
    State(state): State<AppState>,
    Path(raw): Path<String>,
    body: Bytes,
) -> Result<JsonApi<CarModel>, ApiError> {
    let input = decode(&body)?;
    let id = parse_id(&raw)?;
    let car = state
        .repo
        .update(&state.context(), id, input)
        .await
        .map_err(|e| ApiError::from_car(e, state.error_mapping))?;
    info!(id, "car model updated");
    Ok(JsonApi::accepted(car))
}

pub async fn delete_car(
    State(state): State<AppState>,
    Path(raw): Path<String>,
) -> Result<NoContent, ApiError> {
    let id = parse_id(&raw)?;
    state
        .repo
        .delete(&state.context(), id)
        .await
        .map_err(|e| ApiError::from_car(e, state.error_mapping))?;
    info!(id, "car model deleted");
    Ok(NoContent)
}
