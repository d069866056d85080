use async_trait::async_trait;
use reqwest::StatusCode;
use skybook_domain::flight::FlightSnapshot;
use skybook_domain::repository::FlightGateway;
use std::error::Error;
use std::time::Duration;
use tracing::debug;

/// HTTP client for the flight service's detail endpoint. A 404 means
/// the flight does not exist; any transport error or 5xx bubbles up
/// for the breaker to count.
pub struct HttpFlightGateway {
    client: reqwest::Client,
    base_url: String,
}

impl HttpFlightGateway {
    pub fn new(base_url: &str, timeout_ms: u64) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_millis(timeout_ms))
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }
}

#[async_trait]
impl FlightGateway for HttpFlightGateway {
    async fn fetch_flight(
        &self,
        flight_id: i64,
    ) -> Result<Option<FlightSnapshot>, Box<dyn Error + Send + Sync>> {
        let url = format!("{}/api/flights/{}", self.base_url, flight_id);
        debug!("Fetching flight snapshot from {}", url);

        let response = self.client.get(&url).send().await?;

        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }

        let response = response.error_for_status()?;
        let snapshot = response.json::<FlightSnapshot>().await?;
        Ok(Some(snapshot))
    }
}
