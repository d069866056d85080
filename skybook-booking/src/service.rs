use crate::availability::ensure_availability;
use crate::breaker::{BreakerConfig, CircuitBreaker};
use crate::pnr;
use crate::validator::{validate_and_normalize, ValidatedBooking};
use chrono::Utc;
use skybook_domain::booking::{Booking, BookingRecord, BookingRequest, BookingStatus, Passenger};
use skybook_domain::error::BookingError;
use skybook_domain::events::BookingEvent;
use skybook_domain::flight::FlightSnapshot;
use skybook_domain::repository::{BookingRepository, EventPublisher, FlightGateway};
use std::sync::Arc;
use tracing::{error, info, warn};

/// Coordinates the booking workflow: validate, look up the flight
/// behind a circuit breaker, check availability, price, persist, and
/// notify. Event publication never blocks the response path.
pub struct BookingService {
    repo: Arc<dyn BookingRepository>,
    flights: Arc<dyn FlightGateway>,
    publisher: Option<Arc<dyn EventPublisher>>,
    breaker: CircuitBreaker,
}

impl BookingService {
    pub fn new(
        repo: Arc<dyn BookingRepository>,
        flights: Arc<dyn FlightGateway>,
        publisher: Option<Arc<dyn EventPublisher>>,
        breaker_config: BreakerConfig,
    ) -> Self {
        Self {
            repo,
            flights,
            publisher,
            breaker: CircuitBreaker::new("flight-gateway", breaker_config),
        }
    }

    pub async fn create_booking(
        &self,
        request: BookingRequest,
        header_email: &str,
    ) -> Result<BookingRecord, BookingError> {
        let validated = validate_and_normalize(request, header_email)?;

        let flight = self.fetch_flight_guarded(validated.flight_id).await?;

        ensure_availability(&flight.seats, validated.num_seats)?;

        let total_price = flight.price.unwrap_or(0.0) * validated.num_seats as f64;
        let booking = build_booking(validated, total_price);

        self.repo.save(&booking).await.map_err(|e| {
            error!("Failed to save booking pnr={}: {}", booking.pnr, e);
            BookingError::PersistenceFailure(e.to_string())
        })?;

        info!(
            "Booking saved: pnr={}, flightId={}, user={}",
            booking.pnr, booking.flight_id, booking.user_email
        );

        self.emit(BookingEvent::created(&booking));

        Ok(BookingRecord::from(&booking))
    }

    pub async fn get_by_pnr(&self, pnr: &str) -> Result<BookingRecord, BookingError> {
        let booking = self
            .repo
            .find_by_pnr(pnr)
            .await
            .map_err(|e| BookingError::PersistenceFailure(e.to_string()))?
            .ok_or_else(|| BookingError::NotFound(pnr.to_string()))?;
        Ok(BookingRecord::from(&booking))
    }

    pub async fn get_history(&self, email: &str) -> Result<Vec<BookingRecord>, BookingError> {
        let bookings = self
            .repo
            .find_by_user_email(email)
            .await
            .map_err(|e| BookingError::PersistenceFailure(e.to_string()))?;
        Ok(bookings.iter().map(BookingRecord::from).collect())
    }

    /// Owner-authorized cancellation. Idempotent: an already-cancelled
    /// booking is returned as-is without touching `cancelled_at`.
    pub async fn cancel_booking(
        &self,
        pnr: &str,
        header_email: &str,
    ) -> Result<BookingRecord, BookingError> {
        let mut booking = self
            .repo
            .find_by_pnr(pnr)
            .await
            .map_err(|e| BookingError::PersistenceFailure(e.to_string()))?
            .ok_or_else(|| BookingError::NotFound(pnr.to_string()))?;

        if !booking.user_email.eq_ignore_ascii_case(header_email) {
            return Err(BookingError::Forbidden(
                "only the booking owner can cancel this booking".to_string(),
            ));
        }

        if booking.status == BookingStatus::Cancelled {
            return Ok(BookingRecord::from(&booking));
        }

        let cancelled_at = Utc::now();
        self.repo
            .mark_cancelled(pnr, cancelled_at)
            .await
            .map_err(|e| {
                error!("Failed to cancel booking pnr={}: {}", pnr, e);
                BookingError::PersistenceFailure(e.to_string())
            })?;

        booking.status = BookingStatus::Cancelled;
        booking.cancelled_at = Some(cancelled_at);

        info!(
            "Booking cancelled: pnr={}, flightId={}, user={}",
            booking.pnr, booking.flight_id, booking.user_email
        );

        self.emit(BookingEvent::cancelled(&booking));

        Ok(BookingRecord::from(&booking))
    }

    /// Breaker-guarded remote lookup. Open circuit short-circuits to a
    /// 503-class error without attempting the call; an upstream 404 and
    /// a found flight both count as breaker successes.
    async fn fetch_flight_guarded(&self, flight_id: i64) -> Result<FlightSnapshot, BookingError> {
        if !self.breaker.try_acquire().await {
            warn!(
                "Flight lookup short-circuited for flightId={}: circuit open",
                flight_id
            );
            return Err(BookingError::UpstreamUnavailable(
                "flight service unavailable, try again later".to_string(),
            ));
        }

        match self.flights.fetch_flight(flight_id).await {
            Ok(Some(flight)) => {
                self.breaker.record_success().await;
                Ok(flight)
            }
            Ok(None) => {
                self.breaker.record_success().await;
                warn!("Flight service has no flight for flightId={}", flight_id);
                Err(BookingError::FlightNotFound(flight_id))
            }
            Err(e) => {
                self.breaker.record_failure().await;
                error!("Error contacting flight service for flightId={}: {}", flight_id, e);
                Err(BookingError::UpstreamUnavailable(e.to_string()))
            }
        }
    }

    /// Fire-and-forget: dispatched off the response path, failures are
    /// logged and never surfaced.
    fn emit(&self, event: BookingEvent) {
        if let Some(publisher) = &self.publisher {
            let publisher = Arc::clone(publisher);
            tokio::spawn(async move {
                if let Err(e) = publisher.publish(&event).await {
                    warn!(
                        "Failed to publish booking event pnr={} error={}",
                        event.pnr, e
                    );
                }
            });
        }
    }
}

fn build_booking(validated: ValidatedBooking, total_price: f64) -> Booking {
    let passengers = validated
        .passengers
        .iter()
        .map(|p| Passenger {
            name: p.name.clone(),
            age: p.age,
            gender: p.gender.clone(),
            seat_number: p.seat_number.clone(),
            meal_preference: p.meal_preference.clone(),
        })
        .collect();

    Booking {
        pnr: pnr::generate(),
        flight_id: validated.flight_id,
        user_email: validated.user_email,
        num_seats: validated.num_seats,
        total_price,
        status: BookingStatus::Active,
        created_at: Utc::now(),
        cancelled_at: None,
        passengers,
    }
}
