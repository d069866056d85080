pub mod availability;
pub mod breaker;
pub mod pnr;
pub mod service;
pub mod validator;

pub use breaker::{BreakerConfig, CircuitBreaker, CircuitState};
pub use service::BookingService;
