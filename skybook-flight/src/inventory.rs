use skybook_domain::error::FlightServiceError;
use skybook_domain::flight::{
    Flight, FlightDetail, FlightInventoryRequest, FlightResponse, FlightSearchRequest,
    FlightSearchResult, FlightSeat, SEAT_AVAILABLE,
};
use skybook_domain::repository::FlightRepository;
use std::sync::Arc;
use tracing::info;

/// Flight inventory and search over a repository. Seat inventory is a
/// flat list of status-tagged seats; availability is a filter-and-count.
pub struct FlightInventoryService {
    repo: Arc<dyn FlightRepository>,
}

fn invalid(msg: &str) -> FlightServiceError {
    FlightServiceError::InvalidRequest(msg.to_string())
}

impl FlightInventoryService {
    pub fn new(repo: Arc<dyn FlightRepository>) -> Self {
        Self { repo }
    }

    /// Creates a flight with its seat map. Explicit seat numbers win;
    /// otherwise seats are numbered 1..=totalSeats, all AVAILABLE.
    pub async fn add_inventory(
        &self,
        request: FlightInventoryRequest,
    ) -> Result<FlightResponse, FlightServiceError> {
        let airline_name = non_blank(request.airline_name, "airlineName")?;
        let origin = non_blank(request.origin, "origin")?;
        let destination = non_blank(request.destination, "destination")?;
        let trip_type = non_blank(request.trip_type, "tripType")?;
        let departure_time = request
            .departure_time
            .ok_or_else(|| invalid("departureTime is required"))?;
        let arrival_time = request
            .arrival_time
            .ok_or_else(|| invalid("arrivalTime is required"))?;
        let price = match request.price {
            Some(p) if p >= 0.0 => p,
            _ => return Err(invalid("price must be provided and >= 0")),
        };

        let seat_numbers = match request.seat_numbers {
            Some(numbers) if !numbers.is_empty() => numbers,
            _ => {
                let total = request.total_seats.unwrap_or(0).max(0);
                (1..=total).map(|n| n.to_string()).collect()
            }
        };

        let seats: Vec<FlightSeat> = seat_numbers
            .into_iter()
            .map(|seat_number| FlightSeat {
                seat_number,
                status: SEAT_AVAILABLE.to_string(),
                passenger_name: None,
            })
            .collect();

        let total_seats = request.total_seats.unwrap_or(seats.len() as i32);

        let flight = Flight {
            id: 0, // assigned by the repository
            flight_number: request.flight_number,
            airline_name,
            airline_logo_url: request.airline_logo_url,
            origin,
            destination,
            departure_time,
            arrival_time,
            price,
            trip_type,
            total_seats,
            seats,
        };

        let saved = self
            .repo
            .create(flight)
            .await
            .map_err(|e| FlightServiceError::PersistenceFailure(e.to_string()))?;

        info!(
            "Flight inventory added: id={}, route={}->{}, seats={}",
            saved.id,
            saved.origin,
            saved.destination,
            saved.seats.len()
        );

        Ok(FlightResponse::from(&saved))
    }

    /// Route + day search with an optional trip-type filter; each
    /// result carries the current AVAILABLE seat count.
    pub async fn search(
        &self,
        request: FlightSearchRequest,
    ) -> Result<Vec<FlightSearchResult>, FlightServiceError> {
        let origin = non_blank(request.origin, "origin")?;
        let destination = non_blank(request.destination, "destination")?;
        let travel_date = request
            .travel_date
            .ok_or_else(|| invalid("travelDate is required"))?;

        let mut flights = self
            .repo
            .find_by_route_and_day(&origin, &destination, travel_date)
            .await
            .map_err(|e| FlightServiceError::PersistenceFailure(e.to_string()))?;

        if let Some(trip_type) = request.trip_type.filter(|t| !t.trim().is_empty()) {
            flights.retain(|f| f.trip_type.eq_ignore_ascii_case(&trip_type));
        }

        Ok(flights
            .iter()
            .map(|f| FlightSearchResult {
                flight_id: f.id,
                airline_name: f.airline_name.clone(),
                airline_logo_url: f.airline_logo_url.clone(),
                departure_time: f.departure_time,
                arrival_time: f.arrival_time,
                price: f.price,
                trip_type: f.trip_type.clone(),
                seats_available: available_seats(f),
            })
            .collect())
    }

    pub async fn get_detail(&self, id: i64) -> Result<Option<FlightDetail>, FlightServiceError> {
        let flight = self
            .repo
            .find_by_id(id)
            .await
            .map_err(|e| FlightServiceError::PersistenceFailure(e.to_string()))?;
        Ok(flight.as_ref().map(FlightDetail::from))
    }
}

fn available_seats(flight: &Flight) -> i32 {
    flight
        .seats
        .iter()
        .filter(|s| s.status.eq_ignore_ascii_case(SEAT_AVAILABLE))
        .count() as i32
}

fn non_blank(value: Option<String>, field: &str) -> Result<String, FlightServiceError> {
    match value {
        Some(v) if !v.trim().is_empty() => Ok(v),
        _ => Err(invalid(&format!("{} is required", field))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use chrono::{NaiveDate, NaiveDateTime};
    use std::error::Error;
    use std::sync::atomic::{AtomicI64, Ordering};
    use std::sync::Mutex;

    struct InMemoryFlightRepo {
        flights: Mutex<Vec<Flight>>,
        next_id: AtomicI64,
    }

    impl InMemoryFlightRepo {
        fn new() -> Self {
            Self {
                flights: Mutex::new(Vec::new()),
                next_id: AtomicI64::new(1),
            }
        }
    }

    #[async_trait]
    impl FlightRepository for InMemoryFlightRepo {
        async fn create(&self, mut flight: Flight) -> Result<Flight, Box<dyn Error + Send + Sync>> {
            flight.id = self.next_id.fetch_add(1, Ordering::SeqCst);
            self.flights.lock().unwrap().push(flight.clone());
            Ok(flight)
        }

        async fn find_by_id(&self, id: i64) -> Result<Option<Flight>, Box<dyn Error + Send + Sync>> {
            Ok(self
                .flights
                .lock()
                .unwrap()
                .iter()
                .find(|f| f.id == id)
                .cloned())
        }

        async fn find_by_route_and_day(
            &self,
            origin: &str,
            destination: &str,
            day: NaiveDate,
        ) -> Result<Vec<Flight>, Box<dyn Error + Send + Sync>> {
            Ok(self
                .flights
                .lock()
                .unwrap()
                .iter()
                .filter(|f| {
                    f.origin.eq_ignore_ascii_case(origin)
                        && f.destination.eq_ignore_ascii_case(destination)
                        && f.departure_time.date() == day
                })
                .cloned()
                .collect())
        }
    }

    fn dt(s: &str) -> NaiveDateTime {
        NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M").unwrap()
    }

    fn inventory_request(total_seats: i32, seat_numbers: Option<Vec<String>>) -> FlightInventoryRequest {
        FlightInventoryRequest {
            flight_number: Some("SB101".to_string()),
            airline_name: Some("Skybook Air".to_string()),
            airline_logo_url: None,
            origin: Some("DEL".to_string()),
            destination: Some("BOM".to_string()),
            departure_time: Some(dt("2026-09-01 09:00")),
            arrival_time: Some(dt("2026-09-01 11:00")),
            price: Some(150.0),
            trip_type: Some("ONE_WAY".to_string()),
            total_seats: Some(total_seats),
            seat_numbers,
        }
    }

    fn service() -> (Arc<InMemoryFlightRepo>, FlightInventoryService) {
        let repo = Arc::new(InMemoryFlightRepo::new());
        (repo.clone(), FlightInventoryService::new(repo))
    }

    #[tokio::test]
    async fn generates_numbered_seats_when_none_given() {
        let (repo, svc) = service();
        let resp = svc.add_inventory(inventory_request(3, None)).await.unwrap();

        assert_eq!(resp.seat_count, 3);
        let flight = repo.find_by_id(resp.id).await.unwrap().unwrap();
        let numbers: Vec<&str> = flight.seats.iter().map(|s| s.seat_number.as_str()).collect();
        assert_eq!(numbers, vec!["1", "2", "3"]);
        assert!(flight.seats.iter().all(|s| s.status == SEAT_AVAILABLE));
    }

    #[tokio::test]
    async fn explicit_seat_numbers_win_over_total() {
        let (_, svc) = service();
        let seats = Some(vec!["1A".to_string(), "1B".to_string()]);
        let resp = svc.add_inventory(inventory_request(10, seats)).await.unwrap();
        assert_eq!(resp.seat_count, 2);
    }

    #[tokio::test]
    async fn rejects_blank_origin() {
        let (_, svc) = service();
        let mut req = inventory_request(2, None);
        req.origin = Some("  ".to_string());
        let err = svc.add_inventory(req).await.unwrap_err();
        assert!(matches!(err, FlightServiceError::InvalidRequest(_)));
    }

    #[tokio::test]
    async fn search_matches_route_case_insensitively_and_counts_seats() {
        let (_, svc) = service();
        svc.add_inventory(inventory_request(4, None)).await.unwrap();

        let results = svc
            .search(FlightSearchRequest {
                origin: Some("del".to_string()),
                destination: Some("bom".to_string()),
                travel_date: Some(NaiveDate::from_ymd_opt(2026, 9, 1).unwrap()),
                trip_type: None,
            })
            .await
            .unwrap();

        assert_eq!(results.len(), 1);
        assert_eq!(results[0].seats_available, 4);
        assert_eq!(results[0].price, 150.0);
    }

    #[tokio::test]
    async fn search_filters_by_trip_type() {
        let (_, svc) = service();
        svc.add_inventory(inventory_request(2, None)).await.unwrap();
        let mut round = inventory_request(2, None);
        round.trip_type = Some("ROUND_TRIP".to_string());
        svc.add_inventory(round).await.unwrap();

        let results = svc
            .search(FlightSearchRequest {
                origin: Some("DEL".to_string()),
                destination: Some("BOM".to_string()),
                travel_date: Some(NaiveDate::from_ymd_opt(2026, 9, 1).unwrap()),
                trip_type: Some("round_trip".to_string()),
            })
            .await
            .unwrap();

        assert_eq!(results.len(), 1);
        assert_eq!(results[0].trip_type, "ROUND_TRIP");
    }

    #[tokio::test]
    async fn detail_is_none_for_unknown_flight() {
        let (_, svc) = service();
        assert!(svc.get_detail(42).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn detail_includes_seat_statuses() {
        let (_, svc) = service();
        let resp = svc.add_inventory(inventory_request(2, None)).await.unwrap();
        let detail = svc.get_detail(resp.id).await.unwrap().unwrap();
        assert_eq!(detail.seats.len(), 2);
        assert_eq!(detail.seats[0].status.as_deref(), Some(SEAT_AVAILABLE));
    }
}
