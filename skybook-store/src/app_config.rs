use serde::Deserialize;
use std::env;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub kafka: KafkaConfig,
    pub flight_service: FlightServiceConfig,
    pub breaker: BreakerSettings,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub port: u16,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseConfig {
    pub url: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct KafkaConfig {
    pub brokers: String,
    #[serde(default = "default_booking_topic")]
    pub booking_events_topic: String,
    #[serde(default = "default_consumer_group")]
    pub consumer_group: String,
}

fn default_booking_topic() -> String {
    "booking-events".to_string()
}

fn default_consumer_group() -> String {
    "flight-service-group".to_string()
}

/// Where the booking service finds the flight service.
#[derive(Debug, Deserialize, Clone)]
pub struct FlightServiceConfig {
    pub base_url: String,
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
}

fn default_timeout_ms() -> u64 {
    3000
}

/// Circuit-breaker tunables for the flight lookup.
#[derive(Debug, Deserialize, Clone)]
pub struct BreakerSettings {
    #[serde(default = "default_failure_threshold")]
    pub failure_threshold: usize,
    #[serde(default = "default_open_secs")]
    pub open_secs: u64,
    #[serde(default = "default_half_open_trials")]
    pub half_open_trials: usize,
}

fn default_failure_threshold() -> usize {
    5
}

fn default_open_secs() -> u64 {
    30
}

fn default_half_open_trials() -> usize {
    1
}

impl Config {
    pub fn load() -> Result<Self, config::ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".into());

        let s = config::Config::builder()
            // Start off by merging in the "default" configuration file
            .add_source(config::File::with_name("config/default"))
            // Environment-specific file, optional
            .add_source(config::File::with_name(&format!("config/{}", run_mode)).required(false))
            // Local overrides, not checked in
            .add_source(config::File::with_name("config/local").required(false))
            // Eg. `SKYBOOK__SERVER__PORT=9090` overrides `server.port`
            .add_source(config::Environment::with_prefix("SKYBOOK").separator("__"))
            .build()?;

        s.try_deserialize()
    }
}
