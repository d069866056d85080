pub mod booking;
pub mod error;
pub mod events;
pub mod flight;
pub mod repository;
