//! reqwest-backed [`StatsSource`] talking to the live API.

use super::StatsSource;
use async_trait::async_trait;
use covid_core::{ApiError, Endpoint};
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct ReqwestStatsClient {
    client: reqwest::Client,
    base_url: String,
}

impl ReqwestStatsClient {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, ApiError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(concat!("covid_tracker/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| ApiError::Transport {
                url: base_url.to_string(),
                message: e.to_string(),
            })?;

        Ok(Self::with_client(client, base_url))
    }

    pub fn with_client(client: reqwest::Client, base_url: &str) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn convert_error(url: &str, err: &reqwest::Error) -> ApiError {
        let message = if err.is_timeout() {
            format!("timed out: {err}")
        } else if err.is_connect() {
            format!("connection failed: {err}")
        } else {
            err.to_string()
        };
        ApiError::Transport {
            url: url.to_string(),
            message,
        }
    }
}

#[async_trait]
impl StatsSource for ReqwestStatsClient {
    async fn get(&self, endpoint: &Endpoint) -> Result<Vec<u8>, ApiError> {
        let url = endpoint.url(&self.base_url);
        tracing::debug!(%url, "GET");

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| Self::convert_error(&url, &e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::Status {
                url,
                status: status.as_u16(),
            });
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| Self::convert_error(&url, &e))?;
        tracing::debug!(%url, bytes = body.len(), "response received");

        Ok(body.to_vec())
    }
}
