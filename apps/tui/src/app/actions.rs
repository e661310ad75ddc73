use crate::api::{fetch_countries, fetch_history, fetch_snapshot, StatsSource};
use covid_core::history::HistoricalTimeline;
use covid_core::{ApiError, CountryStat, FetchRequest, StatsSnapshot};
use std::fmt;
use std::sync::Arc;
use tokio::sync::mpsc::{unbounded_channel, UnboundedReceiver, UnboundedSender};

/// Completion of a background fetch, delivered back to the event loop.
#[derive(Debug)]
pub enum FetchEvent {
    Snapshot {
        generation: u64,
        result: Result<StatsSnapshot, ApiError>,
    },
    Countries(Result<Vec<CountryStat>, ApiError>),
    History(Result<HistoricalTimeline, ApiError>),
}

/// Spawns fetches on the runtime. Results come back through the receiver
/// returned by [`AppActions::new`]; nothing is awaited on the UI side.
#[derive(Clone)]
pub struct AppActions {
    source: Arc<dyn StatsSource>,
    events: UnboundedSender<FetchEvent>,
    history_days: u32,
}

impl fmt::Debug for AppActions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppActions")
            .field("history_days", &self.history_days)
            .finish_non_exhaustive()
    }
}

impl AppActions {
    pub fn new(
        source: Arc<dyn StatsSource>,
        history_days: u32,
    ) -> (Self, UnboundedReceiver<FetchEvent>) {
        let (events, receiver) = unbounded_channel();
        (
            Self {
                source,
                events,
                history_days,
            },
            receiver,
        )
    }

    pub fn load_snapshot(&self, request: FetchRequest) {
        let source = Arc::clone(&self.source);
        let events = self.events.clone();
        tokio::spawn(async move {
            let result = fetch_snapshot(source.as_ref(), &request.selection).await;
            // The receiver is gone once the app has quit.
            let _ = events.send(FetchEvent::Snapshot {
                generation: request.generation,
                result,
            });
        });
    }

    pub fn load_countries(&self) {
        let source = Arc::clone(&self.source);
        let events = self.events.clone();
        tokio::spawn(async move {
            let result = fetch_countries(source.as_ref()).await;
            let _ = events.send(FetchEvent::Countries(result));
        });
    }

    pub fn load_history(&self) {
        let source = Arc::clone(&self.source);
        let events = self.events.clone();
        let last_days = self.history_days;
        tokio::spawn(async move {
            let result = fetch_history(source.as_ref(), last_days).await;
            let _ = events.send(FetchEvent::History(result));
        });
    }
}
