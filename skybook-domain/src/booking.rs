use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A confirmed reservation, identified to end users by its PNR.
/// Never deleted; cancellation is a terminal status flip.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Booking {
    pub pnr: String,
    pub flight_id: i64,
    pub user_email: String,
    pub num_seats: i32,
    pub total_price: f64,
    pub status: BookingStatus,
    pub created_at: DateTime<Utc>,
    pub cancelled_at: Option<DateTime<Utc>>,
    pub passengers: Vec<Passenger>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "UPPERCASE")]
pub enum BookingStatus {
    Active,
    Cancelled,
}

impl BookingStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            BookingStatus::Active => "ACTIVE",
            BookingStatus::Cancelled => "CANCELLED",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "ACTIVE" => Some(BookingStatus::Active),
            "CANCELLED" => Some(BookingStatus::Cancelled),
            _ => None,
        }
    }
}

/// Passenger line item, owned by exactly one booking.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Passenger {
    pub name: String,
    pub age: i32,
    pub gender: String,
    pub seat_number: Option<String>,
    pub meal_preference: Option<String>,
}

/// Inbound booking payload. Fields are optional so the validator can
/// report missing data as 400s in a defined order instead of failing
/// at deserialization.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingRequest {
    #[serde(default)]
    pub user_email: Option<String>,
    pub flight_id: Option<i64>,
    pub num_seats: Option<i32>,
    pub passengers: Option<Vec<PassengerDetails>>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PassengerDetails {
    pub name: String,
    pub age: i32,
    pub gender: String,
    #[serde(default)]
    pub seat_number: Option<String>,
    #[serde(default)]
    pub meal_preference: Option<String>,
}

impl From<&Passenger> for PassengerDetails {
    fn from(p: &Passenger) -> Self {
        Self {
            name: p.name.clone(),
            age: p.age,
            gender: p.gender.clone(),
            seat_number: p.seat_number.clone(),
            meal_preference: p.meal_preference.clone(),
        }
    }
}

/// Wire shape returned by the booking endpoints.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingRecord {
    pub pnr: String,
    pub flight_id: i64,
    pub user_email: String,
    pub num_seats: i32,
    pub total_price: f64,
    pub status: BookingStatus,
    pub created_at: DateTime<Utc>,
    pub passengers: Vec<PassengerDetails>,
}

impl From<&Booking> for BookingRecord {
    fn from(b: &Booking) -> Self {
        Self {
            pnr: b.pnr.clone(),
            flight_id: b.flight_id,
            user_email: b.user_email.clone(),
            num_seats: b.num_seats,
            total_price: b.total_price,
            status: b.status,
            created_at: b.created_at,
            passengers: b.passengers.iter().map(PassengerDetails::from).collect(),
        }
    }
}
