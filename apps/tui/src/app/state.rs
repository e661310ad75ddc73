use crate::app::actions::{AppActions, FetchEvent};
use crate::app::selector::SelectorState;
use covid_core::history::HistoricalTimeline;
use covid_core::{ApplyOutcome, CasesType, FetchRequest, Selection, ViewState};
use throbber_widgets_tui::ThrobberState;

/// Which fetches are still outstanding.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct LoadingState {
    pub snapshot: bool,
    pub countries: bool,
    pub history: bool,
}

impl LoadingState {
    pub const fn any(self) -> bool {
        self.snapshot || self.countries || self.history
    }
}

#[derive(Debug)]
pub struct App {
    pub running: bool,
    pub view: ViewState,
    pub history: Option<HistoricalTimeline>,
    pub loading: LoadingState,
    pub selector: SelectorState,
    pub table_offset: usize,
    pub show_help: bool,
    pub throbber_state: ThrobberState,
    pub actions: AppActions,
}

impl App {
    pub fn new(actions: AppActions) -> Self {
        Self {
            running: true,
            view: ViewState::new(),
            history: None,
            loading: LoadingState::default(),
            selector: SelectorState::default(),
            table_offset: 0,
            show_help: false,
            throbber_state: ThrobberState::default(),
            actions,
        }
    }

    /// Kicks off the startup fetches. They run concurrently and the UI is
    /// usable before any of them lands.
    pub fn start(&mut self, initial: Selection) {
        self.select_country(initial);
        self.loading.countries = true;
        self.actions.load_countries();
        self.loading.history = true;
        self.actions.load_history();
    }

    pub fn update(&mut self) {
        if self.loading.any() {
            self.throbber_state.calc_next();
        }
    }

    pub fn select_country(&mut self, selection: Selection) {
        tracing::debug!(code = selection.code(), "country selected");
        let request = self.view.select_country(selection);
        self.request_snapshot(request);
    }

    pub fn select_cases_type(&mut self, cases_type: CasesType) {
        tracing::debug!(cases_type = cases_type.as_str(), "category selected");
        self.view.select_cases_type(cases_type);
    }

    pub fn scroll_table(&mut self, offset: usize) {
        self.table_offset = offset.min(self.view.table.len().saturating_sub(1));
    }

    fn request_snapshot(&mut self, request: FetchRequest) {
        self.loading.snapshot = true;
        self.actions.load_snapshot(request);
    }

    pub fn handle_fetch_event(&mut self, event: FetchEvent) {
        match event {
            FetchEvent::Snapshot {
                generation,
                result: Ok(snapshot),
            } => match self.view.apply_snapshot(generation, snapshot) {
                ApplyOutcome::Applied => {
                    self.loading.snapshot = false;
                    tracing::info!(generation, selection = self.view.selection.code(), "stats updated");
                }
                ApplyOutcome::Stale => {
                    tracing::debug!(generation, "dropping stale stats response");
                }
            },
            FetchEvent::Snapshot {
                generation,
                result: Err(error),
            } => {
                if self.view.is_current(generation) {
                    self.loading.snapshot = false;
                }
                tracing::warn!(generation, %error, "stats request failed, keeping previous data");
            }
            FetchEvent::Countries(Ok(countries)) => {
                self.loading.countries = false;
                tracing::info!(count = countries.len(), "country list updated");
                if let Some(request) = self.view.apply_countries(countries) {
                    tracing::info!("selected country is gone, falling back to worldwide");
                    self.request_snapshot(request);
                }
                self.scroll_table(self.table_offset);
            }
            FetchEvent::Countries(Err(error)) => {
                self.loading.countries = false;
                tracing::warn!(%error, "country list request failed");
            }
            FetchEvent::History(Ok(history)) => {
                self.loading.history = false;
                self.history = Some(history);
            }
            FetchEvent::History(Err(error)) => {
                self.loading.history = false;
                tracing::warn!(%error, "history request failed");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::memory::StaticStatsSource;
    use covid_core::{ApiError, Endpoint, StatsSnapshot};
    use serde_json::json;
    use std::sync::Arc;
    use tokio::sync::mpsc::UnboundedReceiver;

    fn source() -> StaticStatsSource {
        StaticStatsSource::default()
            .with_json(
                Endpoint::Global,
                json!({ "cases": 700, "todayCases": 7, "recovered": 600, "deaths": 70 }),
            )
            .with_json(
                Endpoint::Countries,
                json!([
                    { "country": "Peru", "countryInfo": { "iso2": "PE", "lat": -10, "long": -76 }, "cases": 4 },
                    { "country": "India", "countryInfo": { "iso2": "IN", "lat": 20, "long": 77 }, "cases": 44 }
                ]),
            )
            .with_json(
                Endpoint::Country("PE".to_string()),
                json!({ "country": "Peru", "countryInfo": { "iso2": "PE", "lat": -10, "long": -76 }, "cases": 4 }),
            )
            .with_json(
                Endpoint::Historical { last_days: 120 },
                json!({ "cases": { "1/1/23": 1, "1/2/23": 3 } }),
            )
    }

    fn app_with(source: StaticStatsSource) -> (App, UnboundedReceiver<FetchEvent>, Arc<StaticStatsSource>) {
        let source = Arc::new(source);
        let (actions, events) = AppActions::new(source.clone(), 120);
        (App::new(actions), events, source)
    }

    async fn drain(app: &mut App, events: &mut UnboundedReceiver<FetchEvent>, count: usize) {
        for _ in 0..count {
            let event = events.recv().await.unwrap();
            app.handle_fetch_event(event);
        }
    }

    #[tokio::test]
    async fn startup_loads_stats_countries_and_history() {
        let (mut app, mut events, source) = app_with(source());
        app.start(Selection::Worldwide);
        assert!(app.loading.any());

        drain(&mut app, &mut events, 3).await;

        assert!(!app.loading.any());
        assert!(matches!(app.view.snapshot, Some(StatsSnapshot::Global(_))));
        assert_eq!(app.view.table[0].country, "India");
        assert_eq!(app.view.options.len(), 2);
        assert!(app.history.is_some());
        assert_eq!(source.calls().len(), 3);
    }

    #[tokio::test]
    async fn choosing_a_category_issues_no_request() {
        let (mut app, mut events, source) = app_with(source());
        app.start(Selection::Worldwide);
        drain(&mut app, &mut events, 3).await;
        let calls = source.calls().len();

        app.select_cases_type(CasesType::Recovered);

        assert_eq!(app.view.cases_type, CasesType::Recovered);
        assert_eq!(app.view.active_card().total, "600");
        assert_eq!(source.calls().len(), calls);
        assert!(events.try_recv().is_err());
    }

    #[tokio::test]
    async fn selecting_a_country_fetches_it_and_moves_the_map() {
        let (mut app, mut events, source) = app_with(source());

        app.select_country(Selection::Country("PE".to_string()));
        drain(&mut app, &mut events, 1).await;

        assert_eq!(source.calls(), [Endpoint::Country("PE".to_string())]);
        assert_eq!(app.view.viewport.center.lat, -10.0);
        assert_eq!(app.view.viewport.center.lng, -76.0);
        assert_eq!(app.view.viewport.zoom, covid_core::map::COUNTRY_ZOOM);
    }

    #[tokio::test]
    async fn failed_fetch_keeps_previous_stats() {
        let failing = source().with_error(
            Endpoint::Country("PE".to_string()),
            ApiError::Status {
                url: "memory://countries/PE".to_string(),
                status: 500,
            },
        );
        let (mut app, mut events, _) = app_with(failing);
        app.select_country(Selection::Worldwide);
        drain(&mut app, &mut events, 1).await;

        app.select_country(Selection::Country("PE".to_string()));
        drain(&mut app, &mut events, 1).await;

        assert!(matches!(app.view.snapshot, Some(StatsSnapshot::Global(_))));
        assert!(!app.loading.snapshot);
    }

    #[tokio::test]
    async fn late_response_for_an_old_selection_is_ignored() {
        let (mut app, _events, _) = app_with(source());
        app.view.select_country(Selection::Country("PE".to_string()));
        let newest = app.view.select_country(Selection::Worldwide);

        app.handle_fetch_event(FetchEvent::Snapshot {
            generation: newest.generation - 1,
            result: Ok(StatsSnapshot::Country(covid_core::CountryStat::default())),
        });

        assert!(app.view.snapshot.is_none());
    }

    #[tokio::test]
    async fn empty_country_list_is_not_an_error() {
        let empty = source().with_json(Endpoint::Countries, json!([]));
        let (mut app, mut events, _) = app_with(empty);
        app.start(Selection::Worldwide);
        drain(&mut app, &mut events, 3).await;

        assert!(app.view.table.is_empty());
        app.scroll_table(10);
        assert_eq!(app.table_offset, 0);
    }
}
