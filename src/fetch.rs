use std::time::Instant;

use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, warn};
use wreq::Client;

use crate::config::{self, ApiConfig};
use crate::error::{self, DealError};
use crate::model::{HealthStatus, RealtimeFlight, RealtimeResponse, Results};
use crate::query::{RealtimeQuery, SearchParams};

/// HTTP access to the deals backend.
///
/// Every `try_*` method reports failures as [`DealError`]. The matching
/// `fetch_*` method never fails: it logs the error and yields `None`.
#[derive(Clone)]
pub struct DealClient {
    http: Client,
    config: ApiConfig,
}

impl DealClient {
    pub fn new(config: ApiConfig) -> Result<Self, DealError> {
        let mut builder = Client::builder().timeout(config.timeout);

        if let Some(ref proxy) = config.proxy {
            builder = builder.proxy(wreq::Proxy::all(proxy).map_err(error::from_http_error)?);
        }

        let http = builder.build().map_err(error::from_http_error)?;
        debug!(base_url = %config.base_url, environment = ?config.environment, "deal client ready");
        Ok(Self { http, config })
    }

    pub fn config(&self) -> &ApiConfig {
        &self.config
    }

    async fn read_body(response: wreq::Response) -> Result<String, DealError> {
        let status = response.status().as_u16();
        if !(200..300).contains(&status) {
            return Err(DealError::HttpStatus(status));
        }
        response.text().await.map_err(error::from_http_error)
    }

    async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T, DealError> {
        let started = Instant::now();
        let response = self
            .http
            .get(url)
            .header("accept", "application/json")
            .send()
            .await
            .map_err(error::from_http_error)?;
        let body = Self::read_body(response).await?;
        debug!(url, elapsed_ms = started.elapsed().as_millis() as u64, "GET completed");
        decode(&body)
    }

    async fn post_json<B: Serialize, T: DeserializeOwned>(
        &self,
        url: &str,
        payload: &B,
    ) -> Result<T, DealError> {
        let payload = serde_json::to_string(payload).map_err(|e| DealError::Decode(e.to_string()))?;
        let started = Instant::now();
        let response = self
            .http
            .post(url)
            .header("content-type", "application/json")
            .header("accept", "application/json")
            .body(payload)
            .send()
            .await
            .map_err(error::from_http_error)?;
        let body = Self::read_body(response).await?;
        debug!(url, elapsed_ms = started.elapsed().as_millis() as u64, "POST completed");
        decode(&body)
    }

    pub async fn try_latest(&self) -> Result<Results, DealError> {
        self.get_json(&self.config.endpoint(config::DEALS_PATH)).await
    }

    /// The enhanced listing reports `total`/`timestamp`; [`Results`] maps
    /// them onto `count`/`queriedAt`.
    pub async fn try_enhanced(&self) -> Result<Results, DealError> {
        self.get_json(&self.config.endpoint(config::ENHANCED_DEALS_PATH))
            .await
    }

    pub async fn try_search(&self, params: &SearchParams) -> Result<Results, DealError> {
        let body = params.to_search_body();
        self.post_json(&self.config.endpoint(config::SEARCH_PATH), &body)
            .await
    }

    pub async fn try_realtime_flights(
        &self,
        query: &RealtimeQuery,
    ) -> Result<Vec<RealtimeFlight>, DealError> {
        let response: RealtimeResponse = self
            .post_json(&self.config.endpoint(config::FLIGHTS_SEARCH_PATH), query)
            .await?;
        if !response.success {
            return Err(DealError::Unsuccessful(
                response
                    .error
                    .unwrap_or_else(|| "no flights found".to_string()),
            ));
        }
        Ok(response.data)
    }

    pub async fn try_health(&self) -> Result<HealthStatus, DealError> {
        self.get_json(&self.config.endpoint(config::HEALTH_PATH)).await
    }

    /// Reads a `results/latest.json` document from a URL or a local path.
    pub async fn try_snapshot(&self, location: &str) -> Result<Results, DealError> {
        if location.starts_with("http://") || location.starts_with("https://") {
            return self.get_json(location).await;
        }
        let body = tokio::fs::read_to_string(location)
            .await
            .map_err(|e| DealError::Snapshot(format!("{location}: {e}")))?;
        decode(&body)
    }

    pub async fn fetch_latest(&self) -> Option<Results> {
        soften(config::DEALS_PATH, self.try_latest().await)
    }

    pub async fn fetch_enhanced(&self) -> Option<Results> {
        soften(config::ENHANCED_DEALS_PATH, self.try_enhanced().await)
    }

    pub async fn fetch_deals(&self, params: &SearchParams) -> Option<Results> {
        soften(config::SEARCH_PATH, self.try_search(params).await)
    }

    pub async fn fetch_realtime_flights(&self, query: &RealtimeQuery) -> Option<Vec<RealtimeFlight>> {
        soften(
            config::FLIGHTS_SEARCH_PATH,
            self.try_realtime_flights(query).await,
        )
    }

    pub async fn fetch_snapshot(&self, location: &str) -> Option<Results> {
        soften(location, self.try_snapshot(location).await)
    }
}

fn decode<T: DeserializeOwned>(body: &str) -> Result<T, DealError> {
    serde_json::from_str(body).map_err(|e| DealError::Decode(e.to_string()))
}

fn soften<T>(endpoint: &str, result: Result<T, DealError>) -> Option<T> {
    match result {
        Ok(value) => Some(value),
        Err(err) => {
            warn!(endpoint, kind = err.kind(), error = %err, "fetch failed, falling back");
            None
        }
    }
}
