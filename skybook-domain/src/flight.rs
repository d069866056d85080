use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

pub const SEAT_AVAILABLE: &str = "AVAILABLE";
pub const SEAT_BOOKED: &str = "BOOKED";

/// Flight inventory row owned by the flight service.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Flight {
    pub id: i64,
    pub flight_number: Option<String>,
    pub airline_name: String,
    pub airline_logo_url: Option<String>,
    pub origin: String,
    pub destination: String,
    pub departure_time: NaiveDateTime,
    pub arrival_time: NaiveDateTime,
    pub price: f64,
    pub trip_type: String,
    pub total_seats: i32,
    pub seats: Vec<FlightSeat>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FlightSeat {
    pub seat_number: String,
    pub status: String,
    pub passenger_name: Option<String>,
}

/// Snapshot of a flight as fetched over the wire by the booking
/// service. Seat statuses stay as raw strings and are compared
/// case-insensitively downstream.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FlightSnapshot {
    pub id: i64,
    pub flight_number: Option<String>,
    pub airline_name: Option<String>,
    pub origin: Option<String>,
    pub destination: Option<String>,
    pub price: Option<f64>,
    pub total_seats: Option<i32>,
    #[serde(default)]
    pub seats: Vec<SeatInfo>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeatInfo {
    pub seat_number: String,
    pub status: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FlightInventoryRequest {
    #[serde(default)]
    pub flight_number: Option<String>,
    pub airline_name: Option<String>,
    #[serde(default)]
    pub airline_logo_url: Option<String>,
    pub origin: Option<String>,
    pub destination: Option<String>,
    pub departure_time: Option<NaiveDateTime>,
    pub arrival_time: Option<NaiveDateTime>,
    pub price: Option<f64>,
    pub trip_type: Option<String>,
    pub total_seats: Option<i32>,
    #[serde(default)]
    pub seat_numbers: Option<Vec<String>>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FlightSearchRequest {
    pub origin: Option<String>,
    pub destination: Option<String>,
    pub travel_date: Option<NaiveDate>,
    #[serde(default)]
    pub trip_type: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FlightSearchResult {
    pub flight_id: i64,
    pub airline_name: String,
    pub airline_logo_url: Option<String>,
    pub departure_time: NaiveDateTime,
    pub arrival_time: NaiveDateTime,
    pub price: f64,
    pub trip_type: String,
    pub seats_available: i32,
}

/// Detail payload served by `GET /api/flights/{id}`; this is what the
/// booking service deserializes into a `FlightSnapshot`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FlightDetail {
    pub id: i64,
    pub flight_number: Option<String>,
    pub airline_name: String,
    pub airline_logo_url: Option<String>,
    pub origin: String,
    pub destination: String,
    pub departure_time: NaiveDateTime,
    pub arrival_time: NaiveDateTime,
    pub price: f64,
    pub trip_type: String,
    pub total_seats: i32,
    pub seats: Vec<SeatInfo>,
}

impl From<&Flight> for FlightDetail {
    fn from(f: &Flight) -> Self {
        Self {
            id: f.id,
            flight_number: f.flight_number.clone(),
            airline_name: f.airline_name.clone(),
            airline_logo_url: f.airline_logo_url.clone(),
            origin: f.origin.clone(),
            destination: f.destination.clone(),
            departure_time: f.departure_time,
            arrival_time: f.arrival_time,
            price: f.price,
            trip_type: f.trip_type.clone(),
            total_seats: f.total_seats,
            seats: f
                .seats
                .iter()
                .map(|s| SeatInfo {
                    seat_number: s.seat_number.clone(),
                    status: Some(s.status.clone()),
                })
                .collect(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FlightResponse {
    pub id: i64,
    pub flight_number: Option<String>,
    pub airline_name: String,
    pub origin: String,
    pub destination: String,
    pub departure_time: NaiveDateTime,
    pub arrival_time: NaiveDateTime,
    pub price: f64,
    pub trip_type: String,
    pub total_seats: i32,
    pub seat_count: usize,
}

impl From<&Flight> for FlightResponse {
    fn from(f: &Flight) -> Self {
        Self {
            id: f.id,
            flight_number: f.flight_number.clone(),
            airline_name: f.airline_name.clone(),
            origin: f.origin.clone(),
            destination: f.destination.clone(),
            departure_time: f.departure_time,
            arrival_time: f.arrival_time,
            price: f.price,
            trip_type: f.trip_type.clone(),
            total_seats: f.total_seats,
            seat_count: f.seats.len(),
        }
    }
}
