use axum::http::{HeaderName, Method};
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

pub mod bookings;
pub mod error;
pub mod flights;
pub mod state;

pub use state::{BookingApiState, FlightApiState};

fn cors() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(tower_http::cors::Any)
        .allow_methods([Method::GET, Method::POST, Method::DELETE, Method::OPTIONS])
        .allow_headers([
            axum::http::header::CONTENT_TYPE,
            axum::http::header::USER_AGENT,
            HeaderName::from_static(bookings::USER_HEADER),
        ])
}

pub fn booking_app(state: BookingApiState) -> Router {
    Router::new()
        .merge(bookings::routes())
        .layer(cors())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

pub fn flight_app(state: FlightApiState) -> Router {
    Router::new()
        .merge(flights::routes())
        .layer(cors())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
