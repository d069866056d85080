use axum::{
    extract::{Path, State},
    http::{header, HeaderMap, StatusCode},
    response::IntoResponse,
    routing::{delete, get, post},
    Json, Router,
};
use serde::Serialize;
use skybook_domain::booking::BookingRequest;
use skybook_domain::error::BookingError;

use crate::error::AppError;
use crate::state::BookingApiState;

pub const USER_HEADER: &str = "x-user-email";

pub fn routes() -> Router<BookingApiState> {
    Router::new()
        .route("/api/flight/booking/{flight_id}", post(book_ticket))
        .route("/api/flight/ticket/{pnr}", get(get_ticket))
        .route("/api/flight/booking/history/{email}", get(history))
        .route("/api/flight/booking/cancel/{pnr}", delete(cancel))
}

fn header_email(headers: &HeaderMap) -> Result<String, AppError> {
    headers
        .get(USER_HEADER)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string)
        .ok_or_else(|| {
            BookingError::InvalidRequest("X-User-Email header is required".to_string()).into()
        })
}

async fn book_ticket(
    State(state): State<BookingApiState>,
    Path(flight_id): Path<i64>,
    headers: HeaderMap,
    Json(request): Json<BookingRequest>,
) -> Result<impl IntoResponse, AppError> {
    let user_email = header_email(&headers)?;

    if request.flight_id != Some(flight_id) {
        return Err(BookingError::InvalidRequest(
            "path flightId must match request flightId".to_string(),
        )
        .into());
    }

    let record = state.bookings.create_booking(request, &user_email).await?;
    let location = format!("/api/flight/ticket/{}", record.pnr);

    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, location)],
        Json(record),
    ))
}

async fn get_ticket(
    State(state): State<BookingApiState>,
    Path(pnr): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let record = state.bookings.get_by_pnr(&pnr).await?;
    Ok(Json(record))
}

async fn history(
    State(state): State<BookingApiState>,
    Path(email): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let records = state.bookings.get_history(&email).await?;
    Ok(Json(records))
}

#[derive(Debug, Serialize)]
struct CancelResponse {
    message: String,
    code: String,
    status: String,
}

async fn cancel(
    State(state): State<BookingApiState>,
    Path(pnr): Path<String>,
    headers: HeaderMap,
) -> Result<impl IntoResponse, AppError> {
    let user_email = header_email(&headers)?;
    let record = state.bookings.cancel_booking(&pnr, &user_email).await?;

    Ok(Json(CancelResponse {
        message: "Booking cancelled successfully".to_string(),
        code: record.pnr,
        status: "CANCELLED".to_string(),
    }))
}
