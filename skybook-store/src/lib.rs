pub mod app_config;
pub mod booking_repo;
pub mod database;
pub mod events;
pub mod flight_client;
pub mod flight_repo;

pub use booking_repo::PostgresBookingRepository;
pub use database::DbClient;
pub use events::{EventProducer, KafkaBookingPublisher};
pub use flight_client::HttpFlightGateway;
pub use flight_repo::PostgresFlightRepository;
