use skybook_api::{booking_app, BookingApiState};
use skybook_booking::{BookingService, BreakerConfig};
use skybook_domain::repository::EventPublisher;
use skybook_store::{DbClient, EventProducer, HttpFlightGateway, KafkaBookingPublisher, PostgresBookingRepository};
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "booking_service=debug,skybook_api=debug,skybook_booking=debug,tower_http=debug,axum::rejection=trace".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = skybook_store::app_config::Config::load().expect("Failed to load config");
    tracing::info!("Starting booking service on port {}", config.server.port);

    let db = DbClient::new(&config.database.url)
        .await
        .expect("Failed to connect to Postgres");
    db.migrate_booking().await.expect("Failed to run migrations");

    let producer = EventProducer::new(&config.kafka.brokers)
        .expect("Failed to create Kafka producer");
    let publisher: Arc<dyn EventPublisher> = Arc::new(KafkaBookingPublisher::new(
        producer,
        config.kafka.booking_events_topic.clone(),
    ));

    let gateway = HttpFlightGateway::new(
        &config.flight_service.base_url,
        config.flight_service.timeout_ms,
    )
    .expect("Failed to build flight service client");

    let breaker = BreakerConfig {
        failure_threshold: config.breaker.failure_threshold,
        open_duration: Duration::from_secs(config.breaker.open_secs),
        half_open_trials: config.breaker.half_open_trials,
    };

    let service = BookingService::new(
        Arc::new(PostgresBookingRepository::new(db.pool.clone())),
        Arc::new(gateway),
        Some(publisher),
        breaker,
    );

    let state = BookingApiState {
        bookings: Arc::new(service),
    };

    let app = booking_app(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.server.port));
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await.unwrap();
    axum::serve(listener, app).await.unwrap();
}
