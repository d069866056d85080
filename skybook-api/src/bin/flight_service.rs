use skybook_api::{flight_app, FlightApiState};
use skybook_flight::FlightInventoryService;
use skybook_store::{DbClient, PostgresFlightRepository};
use std::net::SocketAddr;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "flight_service=debug,skybook_api=debug,skybook_flight=debug,tower_http=debug,axum::rejection=trace".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = skybook_store::app_config::Config::load().expect("Failed to load config");
    tracing::info!("Starting flight service on port {}", config.server.port);

    let db = DbClient::new(&config.database.url)
        .await
        .expect("Failed to connect to Postgres");
    db.migrate_flight().await.expect("Failed to run migrations");

    // Observes booking lifecycle events; currently log-only.
    tokio::spawn(skybook_store::events::run_booking_event_listener(
        config.kafka.brokers.clone(),
        config.kafka.consumer_group.clone(),
        config.kafka.booking_events_topic.clone(),
    ));

    let service = FlightInventoryService::new(Arc::new(PostgresFlightRepository::new(
        db.pool.clone(),
    )));

    let state = FlightApiState {
        flights: Arc::new(service),
    };

    let app = flight_app(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.server.port));
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await.unwrap();
    axum::serve(listener, app).await.unwrap();
}
