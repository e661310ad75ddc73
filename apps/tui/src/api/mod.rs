//! Statistics source abstraction and the typed fetches built on it.

pub mod client;
#[cfg(test)]
pub mod memory;

pub use client::ReqwestStatsClient;

use async_trait::async_trait;
use covid_core::api::{decode, decode_snapshot};
use covid_core::history::HistoricalTimeline;
use covid_core::{ApiError, CountryStat, Endpoint, Selection, StatsSnapshot};

/// Anything that can answer a GET for one of the API endpoints with a raw
/// JSON body.
#[async_trait]
pub trait StatsSource: Send + Sync {
    async fn get(&self, endpoint: &Endpoint) -> Result<Vec<u8>, ApiError>;
}

pub async fn fetch_snapshot(
    source: &dyn StatsSource,
    selection: &Selection,
) -> Result<StatsSnapshot, ApiError> {
    let body = source.get(&Endpoint::for_selection(selection)).await?;
    decode_snapshot(selection, &body)
}

pub async fn fetch_countries(source: &dyn StatsSource) -> Result<Vec<CountryStat>, ApiError> {
    let body = source.get(&Endpoint::Countries).await?;
    decode(&body)
}

pub async fn fetch_history(
    source: &dyn StatsSource,
    last_days: u32,
) -> Result<HistoricalTimeline, ApiError> {
    let body = source.get(&Endpoint::Historical { last_days }).await?;
    decode(&body)
}

#[cfg(test)]
mod tests {
    use super::memory::StaticStatsSource;
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn snapshot_uses_the_endpoint_for_the_selection() {
        let source = StaticStatsSource::default()
            .with_json(Endpoint::Global, json!({ "cases": 5 }))
            .with_json(
                Endpoint::Country("PE".to_string()),
                json!({ "country": "Peru", "cases": 4 }),
            );

        let global = fetch_snapshot(&source, &Selection::Worldwide).await.unwrap();
        let peru = fetch_snapshot(&source, &Selection::Country("PE".to_string()))
            .await
            .unwrap();

        assert_eq!(global.counts().cases, Some(5));
        assert_eq!(peru.title(), "Peru");
        assert_eq!(
            source.calls(),
            [Endpoint::Global, Endpoint::Country("PE".to_string())]
        );
    }

    #[tokio::test]
    async fn errors_pass_through() {
        let source = StaticStatsSource::default();
        let error = fetch_countries(&source).await.unwrap_err();
        assert!(matches!(error, ApiError::Status { status: 404, .. }));
    }

    #[tokio::test]
    async fn history_decodes_the_timeline() {
        let source = StaticStatsSource::default().with_json(
            Endpoint::Historical { last_days: 30 },
            json!({ "cases": { "1/1/23": 1, "1/2/23": 3 } }),
        );

        let history = fetch_history(&source, 30).await.unwrap();

        assert_eq!(history.cases.len(), 2);
    }
}
