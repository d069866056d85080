use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use skybook_domain::error::{BookingError, FlightServiceError};

#[derive(Debug)]
pub enum AppError {
    Booking(BookingError),
    Flight(FlightServiceError),
    NotFound(String),
    Anyhow(anyhow::Error),
}

impl From<BookingError> for AppError {
    fn from(err: BookingError) -> Self {
        Self::Booking(err)
    }
}

impl From<FlightServiceError> for AppError {
    fn from(err: FlightServiceError) -> Self {
        Self::Flight(err)
    }
}

impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        Self::Anyhow(err)
    }
}

fn booking_status(err: &BookingError) -> StatusCode {
    match err {
        BookingError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
        BookingError::FlightNotFound(_) => StatusCode::NOT_FOUND,
        BookingError::InsufficientInventory { .. } => StatusCode::CONFLICT,
        BookingError::UpstreamUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
        BookingError::PersistenceFailure(_) => StatusCode::INTERNAL_SERVER_ERROR,
        BookingError::NotFound(_) => StatusCode::NOT_FOUND,
        BookingError::Forbidden(_) => StatusCode::FORBIDDEN,
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            AppError::Booking(err) => {
                let status = booking_status(&err);
                if status == StatusCode::INTERNAL_SERVER_ERROR {
                    tracing::error!("Internal Server Error: {}", err);
                    (status, "Internal Server Error".to_string())
                } else {
                    (status, err.to_string())
                }
            }
            AppError::Flight(err) => match err {
                FlightServiceError::InvalidRequest(msg) => (StatusCode::BAD_REQUEST, msg),
                FlightServiceError::PersistenceFailure(msg) => {
                    tracing::error!("Internal Server Error: {}", msg);
                    (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error".to_string())
                }
            },
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            AppError::Anyhow(err) => {
                tracing::error!("Internal Server Error: {}", err);
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error".to_string())
            }
        };

        let body = Json(json!({
            "error": error_message,
        }));

        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_booking_errors_to_expected_statuses() {
        assert_eq!(
            booking_status(&BookingError::InvalidRequest("x".into())),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            booking_status(&BookingError::FlightNotFound(1)),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            booking_status(&BookingError::InsufficientInventory { requested: 4, available: 2 }),
            StatusCode::CONFLICT
        );
        assert_eq!(
            booking_status(&BookingError::UpstreamUnavailable("x".into())),
            StatusCode::SERVICE_UNAVAILABLE
        );
        assert_eq!(
            booking_status(&BookingError::PersistenceFailure("x".into())),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            booking_status(&BookingError::NotFound("x".into())),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            booking_status(&BookingError::Forbidden("x".into())),
            StatusCode::FORBIDDEN
        );
    }
}
