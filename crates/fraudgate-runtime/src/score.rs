//! External score clients
//!
//! Omniscore and merchant-score lookups surface to rules as the plain
//! `omniscore` and `merchant_score` attributes. A score that cannot be
//! obtained is reported as [`UNAVAILABLE_SCORE`].

use crate::context::Charge;
use crate::error::{Result, RuntimeError};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, warn};

/// Sentinel for a missing, failed or timed-out score
pub const UNAVAILABLE_SCORE: f64 = -1.0;

pub const OMNISCORE_ATTRIBUTE: &str = "omniscore";
pub const MERCHANT_SCORE_ATTRIBUTE: &str = "merchant_score";

/// HTTP score endpoint configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreClientConfig {
    /// Endpoint receiving the charge as a JSON POST
    pub url: String,
    /// Request timeout in milliseconds
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
}

fn default_timeout_ms() -> u64 {
    500
}

/// Source of a numeric risk score for a charge
#[async_trait]
pub trait ScoreClient: Send + Sync {
    fn name(&self) -> &str;

    async fn score(&self, charge: &Charge) -> Result<f64>;
}

#[derive(Debug, Deserialize)]
struct ScoreResponse {
    score: f64,
}

/// Score client backed by an HTTP endpoint
pub struct HttpScoreClient {
    name: String,
    url: String,
    client: reqwest::Client,
}

impl HttpScoreClient {
    pub fn new(name: impl Into<String>, config: &ScoreClientConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_millis(config.timeout_ms))
            .build()
            .map_err(|e| RuntimeError::ScoreClient(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            name: name.into(),
            url: config.url.clone(),
            client,
        })
    }
}

#[async_trait]
impl ScoreClient for HttpScoreClient {
    fn name(&self) -> &str {
        &self.name
    }

    async fn score(&self, charge: &Charge) -> Result<f64> {
        debug!("Requesting {} for charge {} from {}", self.name, charge.id, self.url);

        let response = self
            .client
            .post(&self.url)
            .json(charge)
            .send()
            .await
            .map_err(|e| RuntimeError::ScoreClient(format!("HTTP request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            return Err(RuntimeError::ScoreClient(format!(
                "{} returned status {}",
                self.name, status
            )));
        }

        let body: ScoreResponse = response
            .json()
            .await
            .map_err(|e| RuntimeError::ScoreClient(format!("Invalid score response: {}", e)))?;

        Ok(body.score)
    }
}

/// Fixed-answer score client for tests and local runs
pub struct StaticScoreClient {
    name: String,
    score: Option<f64>,
    delay: Option<Duration>,
}

impl StaticScoreClient {
    pub fn new(name: impl Into<String>, score: f64) -> Self {
        Self {
            name: name.into(),
            score: Some(score),
            delay: None,
        }
    }

    /// Client whose every lookup fails
    pub fn failing(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            score: None,
            delay: None,
        }
    }

    /// Answer only after `delay`
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }
}

#[async_trait]
impl ScoreClient for StaticScoreClient {
    fn name(&self) -> &str {
        &self.name
    }

    async fn score(&self, _charge: &Charge) -> Result<f64> {
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        self.score
            .ok_or_else(|| RuntimeError::ScoreClient(format!("{} unavailable", self.name)))
    }
}

/// Look up a score, falling back to [`UNAVAILABLE_SCORE`]
pub async fn fetch_score(client: Option<&dyn ScoreClient>, charge: &Charge, timeout: Duration) -> f64 {
    let client = match client {
        Some(client) => client,
        None => return UNAVAILABLE_SCORE,
    };

    match tokio::time::timeout(timeout, client.score(charge)).await {
        Ok(Ok(score)) => score,
        Ok(Err(e)) => {
            warn!("{} lookup failed for charge {}: {}", client.name(), charge.id, e);
            UNAVAILABLE_SCORE
        }
        Err(_) => {
            warn!(
                "{} lookup timed out after {}ms for charge {}",
                client.name(),
                timeout.as_millis(),
                charge.id
            );
            UNAVAILABLE_SCORE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_fetch_score_static() {
        let client = StaticScoreClient::new(OMNISCORE_ATTRIBUTE, 0.87);
        let score = fetch_score(Some(&client), &Charge::default(), Duration::from_millis(100)).await;
        assert_eq!(score, 0.87);
    }

    #[tokio::test]
    async fn test_fetch_score_fallbacks() {
        let charge = Charge::default();
        let timeout = Duration::from_millis(50);

        assert_eq!(fetch_score(None, &charge, timeout).await, UNAVAILABLE_SCORE);

        let failing = StaticScoreClient::failing(MERCHANT_SCORE_ATTRIBUTE);
        assert_eq!(fetch_score(Some(&failing), &charge, timeout).await, UNAVAILABLE_SCORE);
    }

    #[tokio::test(start_paused = true)]
    async fn test_fetch_score_timeout() {
        let slow = StaticScoreClient::new(OMNISCORE_ATTRIBUTE, 0.5).with_delay(Duration::from_secs(5));
        let score = fetch_score(Some(&slow), &Charge::default(), Duration::from_millis(100)).await;
        assert_eq!(score, UNAVAILABLE_SCORE);
    }

    #[test]
    fn test_http_client_config_defaults() {
        let config: ScoreClientConfig =
            serde_json::from_str(r#"{"url": "http://localhost:9000/score"}"#).unwrap();
        assert_eq!(config.timeout_ms, 500);
        assert!(HttpScoreClient::new(OMNISCORE_ATTRIBUTE, &config).is_ok());
    }
}
