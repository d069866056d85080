use crate::booking::Booking;
use crate::events::BookingEvent;
use crate::flight::{Flight, FlightSnapshot};
use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use std::error::Error;

/// Durable store for bookings and their passenger line items.
/// `save` must insert the booking and its passengers as one unit.
#[async_trait]
pub trait BookingRepository: Send + Sync {
    async fn save(&self, booking: &Booking) -> Result<(), Box<dyn Error + Send + Sync>>;

    async fn find_by_pnr(
        &self,
        pnr: &str,
    ) -> Result<Option<Booking>, Box<dyn Error + Send + Sync>>;

    /// Most recent bookings first.
    async fn find_by_user_email(
        &self,
        email: &str,
    ) -> Result<Vec<Booking>, Box<dyn Error + Send + Sync>>;

    async fn mark_cancelled(
        &self,
        pnr: &str,
        cancelled_at: DateTime<Utc>,
    ) -> Result<(), Box<dyn Error + Send + Sync>>;
}

/// Client-side view of the flight service. A flight the upstream does
/// not know about is `Ok(None)`; transport and 5xx failures are `Err`.
#[async_trait]
pub trait FlightGateway: Send + Sync {
    async fn fetch_flight(
        &self,
        flight_id: i64,
    ) -> Result<Option<FlightSnapshot>, Box<dyn Error + Send + Sync>>;
}

/// Repository trait for flight inventory data access.
#[async_trait]
pub trait FlightRepository: Send + Sync {
    /// Inserts the flight and its seats atomically; returns the flight
    /// with its assigned identity.
    async fn create(&self, flight: Flight) -> Result<Flight, Box<dyn Error + Send + Sync>>;

    async fn find_by_id(&self, id: i64) -> Result<Option<Flight>, Box<dyn Error + Send + Sync>>;

    /// Case-insensitive route match, departures within the given day.
    async fn find_by_route_and_day(
        &self,
        origin: &str,
        destination: &str,
        day: NaiveDate,
    ) -> Result<Vec<Flight>, Box<dyn Error + Send + Sync>>;
}

/// Best-effort publication of booking lifecycle events.
#[async_trait]
pub trait EventPublisher: Send + Sync {
    async fn publish(&self, event: &BookingEvent) -> Result<(), Box<dyn Error + Send + Sync>>;
}
