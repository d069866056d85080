use thiserror::Error;

/// Failure taxonomy for the booking workflow. The API layer owns the
/// mapping to HTTP status codes.
#[derive(Debug, Error)]
pub enum BookingError {
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    #[error("flight not found: {0}")]
    FlightNotFound(i64),

    #[error("not enough seats available: requested={requested}, available={available}")]
    InsufficientInventory { requested: i32, available: i32 },

    #[error("flight service unavailable: {0}")]
    UpstreamUnavailable(String),

    #[error("failed to persist booking: {0}")]
    PersistenceFailure(String),

    #[error("booking not found: {0}")]
    NotFound(String),

    #[error("forbidden: {0}")]
    Forbidden(String),
}

/// Failures raised by the flight inventory service.
#[derive(Debug, Error)]
pub enum FlightServiceError {
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    #[error("failed to persist flight: {0}")]
    PersistenceFailure(String),
}
