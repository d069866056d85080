use crate::booking::Booking;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Booking lifecycle notification, keyed by PNR on the event bus.
/// Not persisted; delivery is best-effort, at most once.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingEvent {
    pub pnr: String,
    pub flight_id: i64,
    pub user_email: String,
    pub num_seats: i32,
    pub created_at: DateTime<Utc>,
    pub event_type: BookingEventType,
    pub passengers: Vec<PassengerSummary>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "UPPERCASE")]
pub enum BookingEventType {
    Created,
    Cancelled,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PassengerSummary {
    pub name: String,
    pub gender: String,
    pub age: i32,
    pub seat_number: Option<String>,
    pub meal_preference: Option<String>,
}

impl BookingEvent {
    pub fn created(booking: &Booking) -> Self {
        Self::from_booking(booking, BookingEventType::Created)
    }

    pub fn cancelled(booking: &Booking) -> Self {
        Self::from_booking(booking, BookingEventType::Cancelled)
    }

    fn from_booking(booking: &Booking, event_type: BookingEventType) -> Self {
        Self {
            pnr: booking.pnr.clone(),
            flight_id: booking.flight_id,
            user_email: booking.user_email.clone(),
            num_seats: booking.num_seats,
            created_at: booking.created_at,
            event_type,
            passengers: booking
                .passengers
                .iter()
                .map(|p| PassengerSummary {
                    name: p.name.clone(),
                    gender: p.gender.clone(),
                    age: p.age,
                    seat_number: p.seat_number.clone(),
                    meal_preference: p.meal_preference.clone(),
                })
                .collect(),
        }
    }
}
