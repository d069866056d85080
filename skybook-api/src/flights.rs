use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use skybook_domain::flight::{FlightInventoryRequest, FlightSearchRequest};

use crate::error::AppError;
use crate::state::FlightApiState;

pub fn routes() -> Router<FlightApiState> {
    Router::new()
        .route("/api/flights/inventory", post(add_inventory))
        .route("/api/flights/search", post(search_flights))
        .route("/api/flights/{id}", get(get_flight))
}

async fn add_inventory(
    State(state): State<FlightApiState>,
    Json(request): Json<FlightInventoryRequest>,
) -> Result<impl IntoResponse, AppError> {
    let response = state.flights.add_inventory(request).await?;
    Ok((StatusCode::CREATED, Json(response)))
}

async fn search_flights(
    State(state): State<FlightApiState>,
    Json(request): Json<FlightSearchRequest>,
) -> Result<impl IntoResponse, AppError> {
    let results = state.flights.search(request).await?;
    Ok(Json(results))
}

async fn get_flight(
    State(state): State<FlightApiState>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    let detail = state
        .flights
        .get_detail(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Flight not found: {}", id)))?;
    Ok(Json(detail))
}
