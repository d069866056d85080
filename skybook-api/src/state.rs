use skybook_booking::BookingService;
use skybook_flight::FlightInventoryService;
use std::sync::Arc;

#[derive(Clone)]
pub struct BookingApiState {
    pub bookings: Arc<BookingService>,
}

#[derive(Clone)]
pub struct FlightApiState {
    pub flights: Arc<FlightInventoryService>,
}
