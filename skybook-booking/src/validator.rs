use skybook_domain::booking::{BookingRequest, PassengerDetails};
use skybook_domain::error::BookingError;

/// Request that passed all preconditions, with the user email
/// normalized from the caller identity header.
#[derive(Debug, Clone)]
pub struct ValidatedBooking {
    pub user_email: String,
    pub flight_id: i64,
    pub num_seats: i32,
    pub passengers: Vec<PassengerDetails>,
}

fn invalid(msg: &str) -> BookingError {
    BookingError::InvalidRequest(msg.to_string())
}

/// Ordered precondition checks; the first failure wins. Consumes the
/// request so normalization (email defaulted from the header) is
/// expressed in the returned value rather than by mutation.
pub fn validate_and_normalize(
    request: BookingRequest,
    header_email: &str,
) -> Result<ValidatedBooking, BookingError> {
    if header_email.trim().is_empty() {
        return Err(invalid("X-User-Email header is required"));
    }

    let user_email = match request.user_email {
        Some(email) if !email.trim().is_empty() => {
            if !email.eq_ignore_ascii_case(header_email) {
                return Err(invalid("header user email must match request userEmail"));
            }
            email
        }
        _ => header_email.to_string(),
    };

    let flight_id = request
        .flight_id
        .ok_or_else(|| invalid("flightId is required"))?;

    let num_seats = match request.num_seats {
        Some(n) if n > 0 => n,
        _ => return Err(invalid("numSeats must be provided and > 0")),
    };

    let passengers = match request.passengers {
        Some(p) if !p.is_empty() => p,
        _ => return Err(invalid("passengers list is required and cannot be empty")),
    };

    if passengers.len() != num_seats as usize {
        return Err(invalid("number of passengers must match numSeats"));
    }

    for p in &passengers {
        if p.name.trim().is_empty() {
            return Err(invalid("passenger name is required"));
        }
        if p.age <= 0 {
            return Err(invalid("passenger age must be > 0"));
        }
    }

    Ok(ValidatedBooking {
        user_email,
        flight_id,
        num_seats,
        passengers,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn passenger(name: &str) -> PassengerDetails {
        PassengerDetails {
            name: name.to_string(),
            age: 30,
            gender: "F".to_string(),
            seat_number: None,
            meal_preference: None,
        }
    }

    fn request(num_seats: i32, passengers: usize) -> BookingRequest {
        BookingRequest {
            user_email: None,
            flight_id: Some(10),
            num_seats: Some(num_seats),
            passengers: Some((0..passengers).map(|i| passenger(&format!("P{}", i))).collect()),
        }
    }

    #[test]
    fn defaults_email_from_header() {
        let validated = validate_and_normalize(request(2, 2), "alice@example.com").unwrap();
        assert_eq!(validated.user_email, "alice@example.com");
        assert_eq!(validated.flight_id, 10);
        assert_eq!(validated.num_seats, 2);
    }

    #[test]
    fn accepts_matching_email_case_insensitively() {
        let mut req = request(1, 1);
        req.user_email = Some("Alice@Example.COM".to_string());
        let validated = validate_and_normalize(req, "alice@example.com").unwrap();
        // Keeps the request's spelling once it matches.
        assert_eq!(validated.user_email, "Alice@Example.COM");
    }

    #[test]
    fn rejects_blank_header() {
        let err = validate_and_normalize(request(1, 1), "  ").unwrap_err();
        assert!(matches!(err, BookingError::InvalidRequest(_)));
    }

    #[test]
    fn rejects_mismatched_email_before_flight_check() {
        let mut req = request(1, 1);
        req.user_email = Some("bob@example.com".to_string());
        req.flight_id = None; // would also fail, but email must win
        let err = validate_and_normalize(req, "alice@example.com").unwrap_err();
        match err {
            BookingError::InvalidRequest(msg) => assert!(msg.contains("must match")),
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn rejects_missing_flight_id() {
        let mut req = request(1, 1);
        req.flight_id = None;
        let err = validate_and_normalize(req, "alice@example.com").unwrap_err();
        match err {
            BookingError::InvalidRequest(msg) => assert!(msg.contains("flightId")),
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn rejects_non_positive_seat_count() {
        let mut req = request(1, 1);
        req.num_seats = Some(0);
        assert!(validate_and_normalize(req, "alice@example.com").is_err());
    }

    #[test]
    fn rejects_empty_passenger_list() {
        let mut req = request(1, 0);
        req.passengers = Some(vec![]);
        assert!(validate_and_normalize(req, "alice@example.com").is_err());
    }

    #[test]
    fn rejects_passenger_count_mismatch() {
        let err = validate_and_normalize(request(3, 2), "alice@example.com").unwrap_err();
        match err {
            BookingError::InvalidRequest(msg) => assert!(msg.contains("match numSeats")),
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn rejects_non_positive_passenger_age() {
        let mut req = request(1, 1);
        req.passengers.as_mut().unwrap()[0].age = 0;
        assert!(validate_and_normalize(req, "alice@example.com").is_err());
    }
}
