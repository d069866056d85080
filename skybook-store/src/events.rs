use async_trait::async_trait;
use rdkafka::config::ClientConfig;
use rdkafka::consumer::{Consumer, StreamConsumer};
use rdkafka::message::Message;
use rdkafka::producer::{FutureProducer, FutureRecord};
use rdkafka::util::Timeout;
use skybook_domain::events::BookingEvent;
use skybook_domain::repository::EventPublisher;
use std::error::Error;
use std::time::Duration;
use tracing::{error, info, warn};

#[derive(Clone)]
pub struct EventProducer {
    producer: FutureProducer,
}

impl EventProducer {
    pub fn new(brokers: &str) -> Result<Self, rdkafka::error::KafkaError> {
        let producer: FutureProducer = ClientConfig::new()
            .set("bootstrap.servers", brokers)
            .set("message.timeout.ms", "5000")
            .create()?;

        Ok(Self { producer })
    }

    pub async fn publish(&self, topic: &str, key: &str, payload: &str) -> Result<(), rdkafka::error::KafkaError> {
        let record = FutureRecord::to(topic)
            .key(key)
            .payload(payload);

        match self.producer.send(record, Timeout::After(Duration::from_secs(0))).await {
            Ok(delivery) => {
                let partition = delivery.partition;
                let offset = delivery.offset;
                info!("Sent message to {}/{}: partition {} offset {}", topic, key, partition, offset);
                Ok(())
            }
            Err((e, _msg)) => {
                error!("Failed to send message to {}: {}", topic, e);
                Err(e)
            }
        }
    }
}

/// Booking lifecycle events serialized to JSON, keyed by PNR. The
/// orchestrator dispatches these off the response path, so a failing
/// broker degrades to warnings only.
pub struct KafkaBookingPublisher {
    producer: EventProducer,
    topic: String,
}

impl KafkaBookingPublisher {
    pub fn new(producer: EventProducer, topic: String) -> Self {
        Self { producer, topic }
    }
}

#[async_trait]
impl EventPublisher for KafkaBookingPublisher {
    async fn publish(&self, event: &BookingEvent) -> Result<(), Box<dyn Error + Send + Sync>> {
        let payload = serde_json::to_string(event)?;
        self.producer.publish(&self.topic, &event.pnr, &payload).await?;
        Ok(())
    }
}

/// Flight-side consumer of the booking-events topic. The flight service
/// only observes bookings today; cancellation does not re-open seats.
pub async fn run_booking_event_listener(brokers: String, group_id: String, topic: String) {
    let consumer: StreamConsumer = match ClientConfig::new()
        .set("bootstrap.servers", &brokers)
        .set("group.id", &group_id)
        .set("enable.auto.commit", "true")
        .set("auto.offset.reset", "earliest")
        .create()
    {
        Ok(c) => c,
        Err(e) => {
            error!("Failed to create booking-event consumer: {}", e);
            return;
        }
    };

    if let Err(e) = consumer.subscribe(&[topic.as_str()]) {
        error!("Failed to subscribe to {}: {}", topic, e);
        return;
    }

    info!("Booking event listener started on topic {}", topic);

    loop {
        match consumer.recv().await {
            Err(e) => error!("Kafka error: {}", e),
            Ok(m) => {
                if let Some(payload) = m.payload_view::<str>() {
                    match payload {
                        Ok(json) => match serde_json::from_str::<BookingEvent>(json) {
                            Ok(event) => {
                                info!(
                                    "Received booking event: type={:?} pnr={} flightId={} user={}",
                                    event.event_type, event.pnr, event.flight_id, event.user_email
                                );
                            }
                            Err(e) => warn!("Ignoring malformed booking event: {}", e),
                        },
                        Err(e) => error!("Error reading payload: {}", e),
                    }
                }
            }
        }
    }
}
