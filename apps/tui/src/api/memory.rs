//! In-memory [`StatsSource`] for tests.

use super::StatsSource;
use async_trait::async_trait;
use covid_core::{ApiError, Endpoint};
use std::collections::HashMap;
use std::sync::Mutex;

#[derive(Debug, Default)]
pub struct StaticStatsSource {
    responses: HashMap<Endpoint, Result<Vec<u8>, ApiError>>,
    calls: Mutex<Vec<Endpoint>>,
}

impl StaticStatsSource {
    pub fn with_json(mut self, endpoint: Endpoint, body: serde_json::Value) -> Self {
        let bytes = serde_json::to_vec(&body).unwrap_or_default();
        self.responses.insert(endpoint, Ok(bytes));
        self
    }

    pub fn with_error(mut self, endpoint: Endpoint, error: ApiError) -> Self {
        self.responses.insert(endpoint, Err(error));
        self
    }

    pub fn calls(&self) -> Vec<Endpoint> {
        self.calls.lock().map(|calls| calls.clone()).unwrap_or_default()
    }
}

#[async_trait]
impl StatsSource for StaticStatsSource {
    async fn get(&self, endpoint: &Endpoint) -> Result<Vec<u8>, ApiError> {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push(endpoint.clone());
        }
        self.responses
            .get(endpoint)
            .cloned()
            .unwrap_or_else(|| {
                Err(ApiError::Status {
                    url: endpoint.url("memory://"),
                    status: 404,
                })
            })
    }
}
