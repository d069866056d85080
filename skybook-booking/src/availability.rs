use skybook_domain::error::BookingError;
use skybook_domain::flight::{SeatInfo, SEAT_AVAILABLE};

/// Counts seats whose status case-insensitively equals AVAILABLE.
pub fn count_available(seats: &[SeatInfo]) -> usize {
    seats
        .iter()
        .filter(|s| {
            s.status
                .as_deref()
                .map(|st| st.eq_ignore_ascii_case(SEAT_AVAILABLE))
                .unwrap_or(false)
        })
        .count()
}

/// Point-in-time check only; no hold is taken, so two concurrent
/// bookings for the same flight can both pass this and oversell.
pub fn ensure_availability(seats: &[SeatInfo], requested: i32) -> Result<usize, BookingError> {
    let available = count_available(seats);
    if (available as i64) < requested as i64 {
        return Err(BookingError::InsufficientInventory {
            requested,
            available: available as i32,
        });
    }
    Ok(available)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seat(number: &str, status: Option<&str>) -> SeatInfo {
        SeatInfo {
            seat_number: number.to_string(),
            status: status.map(String::from),
        }
    }

    #[test]
    fn counts_available_case_insensitively() {
        let seats = vec![
            seat("1A", Some("AVAILABLE")),
            seat("1B", Some("available")),
            seat("1C", Some("Booked")),
            seat("1D", None),
        ];
        assert_eq!(count_available(&seats), 2);
    }

    #[test]
    fn empty_seat_list_has_no_availability() {
        assert_eq!(count_available(&[]), 0);
        let err = ensure_availability(&[], 1).unwrap_err();
        assert!(matches!(
            err,
            BookingError::InsufficientInventory { requested: 1, available: 0 }
        ));
    }

    #[test]
    fn reports_requested_and_available_counts() {
        let seats = vec![seat("1A", Some("AVAILABLE")), seat("1B", Some("AVAILABLE"))];
        let err = ensure_availability(&seats, 4).unwrap_err();
        match err {
            BookingError::InsufficientInventory { requested, available } => {
                assert_eq!(requested, 4);
                assert_eq!(available, 2);
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn passes_when_enough_seats() {
        let seats = vec![
            seat("1A", Some("AVAILABLE")),
            seat("1B", Some("AVAILABLE")),
            seat("1C", Some("BOOKED")),
        ];
        assert_eq!(ensure_availability(&seats, 2).unwrap(), 2);
    }
}
