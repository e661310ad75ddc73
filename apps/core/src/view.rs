//! Dashboard view state and the rules for how each event changes it.
//!
//! Every country selection is tagged with a generation number. A response
//! for an older generation than the latest issued one is dropped, so a slow
//! reply can never overwrite the display of a newer selection.

use crate::api::{CountryStat, Endpoint, StatsSnapshot};
use crate::domain::{CasesType, CountryOption, Selection};
use crate::format::{format_delta, pretty_print_stat};
use crate::map::{bubbles, Bubble, MapViewport};
use crate::sort::sort_by_cases;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchRequest {
    pub generation: u64,
    pub selection: Selection,
    pub endpoint: Endpoint,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApplyOutcome {
    Applied,
    Stale,
}

/// Display data for one of the three stat cards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InfoCard {
    pub cases_type: CasesType,
    pub title: &'static str,
    pub active: bool,
    pub today: String,
    pub total: String,
}

#[derive(Debug, Clone, Default)]
pub struct ViewState {
    pub selection: Selection,
    pub cases_type: CasesType,
    pub viewport: MapViewport,
    pub snapshot: Option<StatsSnapshot>,
    /// Countries as fetched, fed to the map.
    pub countries: Vec<CountryStat>,
    /// Countries sorted by cases, fed to the table.
    pub table: Vec<CountryStat>,
    pub options: Vec<CountryOption>,
    generation: u64,
}

impl ViewState {
    pub fn new() -> Self {
        Self::default()
    }

    pub const fn generation(&self) -> u64 {
        self.generation
    }

    /// Records the selection and returns the request that will load it.
    pub fn select_country(&mut self, selection: Selection) -> FetchRequest {
        self.generation += 1;
        self.selection = selection;
        FetchRequest {
            generation: self.generation,
            endpoint: Endpoint::for_selection(&self.selection),
            selection: self.selection.clone(),
        }
    }

    /// Local only; never needs a request.
    pub fn select_cases_type(&mut self, cases_type: CasesType) {
        self.cases_type = cases_type;
    }

    /// Replaces the snapshot and moves the map, unless a newer selection
    /// has been issued since `generation`.
    pub fn apply_snapshot(&mut self, generation: u64, snapshot: StatsSnapshot) -> ApplyOutcome {
        if generation < self.generation {
            return ApplyOutcome::Stale;
        }

        self.viewport = match &snapshot {
            StatsSnapshot::Global(_) => MapViewport::world(),
            StatsSnapshot::Country(country) => country.coordinates().map_or_else(
                || MapViewport {
                    zoom: crate::map::COUNTRY_ZOOM,
                    ..self.viewport
                },
                |(lat, lng)| MapViewport::country(lat, lng),
            ),
        };
        self.snapshot = Some(snapshot);
        ApplyOutcome::Applied
    }

    /// Whether a failed request was the one the display is waiting for.
    /// The display itself is left as it was.
    pub const fn is_current(&self, generation: u64) -> bool {
        generation >= self.generation
    }

    /// Installs a fresh country list. When the selected country is no
    /// longer in it, the selection falls back to worldwide and the request
    /// for the global figures is returned.
    pub fn apply_countries(&mut self, countries: Vec<CountryStat>) -> Option<FetchRequest> {
        self.table = sort_by_cases(&countries);
        self.options = countries
            .iter()
            .map(|country| CountryOption {
                name: country.country.clone(),
                code: country.selection_code().to_string(),
            })
            .collect();
        self.countries = countries;

        let vanished =
            matches!(&self.selection, Selection::Country(code) if !self.has_option(code));
        vanished.then(|| self.select_country(Selection::Worldwide))
    }

    pub fn has_option(&self, code: &str) -> bool {
        self.options
            .iter()
            .any(|option| option.code.eq_ignore_ascii_case(code))
    }

    pub fn selected_option_index(&self) -> Option<usize> {
        let code = match &self.selection {
            Selection::Worldwide => return None,
            Selection::Country(code) => code,
        };
        self.options
            .iter()
            .position(|option| option.code.eq_ignore_ascii_case(code))
    }

    pub fn info_cards(&self) -> [InfoCard; 3] {
        let counts = self.snapshot.as_ref().map(StatsSnapshot::counts);
        CasesType::ALL.map(|cases_type| InfoCard {
            cases_type,
            title: cases_type.label(),
            active: cases_type == self.cases_type,
            today: format_delta(counts.and_then(|c| c.today(cases_type))),
            total: pretty_print_stat(counts.and_then(|c| c.total(cases_type))),
        })
    }

    pub fn active_card(&self) -> InfoCard {
        let [cases, recovered, deaths] = self.info_cards();
        match self.cases_type {
            CasesType::Cases => cases,
            CasesType::Recovered => recovered,
            CasesType::Deaths => deaths,
        }
    }

    pub fn bubbles(&self) -> Vec<Bubble> {
        bubbles(&self.countries, self.cases_type, &self.viewport)
    }

    pub fn graph_title(&self) -> String {
        format!("Worldwide new {}", self.cases_type.as_str())
    }

    pub fn selection_label(&self) -> &str {
        match &self.selection {
            Selection::Worldwide => "Worldwide",
            Selection::Country(code) => self
                .options
                .iter()
                .find(|option| option.code.eq_ignore_ascii_case(code))
                .map_or(code.as_str(), |option| option.name.as_str()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{CountryInfo, GlobalStat, StatCounts};
    use crate::map::{COUNTRY_ZOOM, DEFAULT_CENTER, WORLD_ZOOM};

    fn country(name: &str, iso2: &str, cases: u64) -> CountryStat {
        CountryStat {
            country: name.to_string(),
            country_info: CountryInfo {
                iso2: Some(iso2.to_string()),
                lat: Some(10.0),
                long: Some(20.0),
                ..CountryInfo::default()
            },
            counts: StatCounts {
                cases: Some(cases),
                recovered: Some(cases / 2),
                today_recovered: Some(1_500),
                ..StatCounts::default()
            },
            ..CountryStat::default()
        }
    }

    fn global() -> StatsSnapshot {
        StatsSnapshot::Global(GlobalStat {
            counts: StatCounts {
                cases: Some(704_753_890),
                today_cases: None,
                recovered: Some(675_619_811),
                today_recovered: Some(12_345),
                deaths: Some(7_010_681),
                today_deaths: Some(0),
            },
            ..GlobalStat::default()
        })
    }

    #[test]
    fn starts_worldwide_on_cases_with_the_world_view() {
        let view = ViewState::new();
        assert_eq!(view.selection, Selection::Worldwide);
        assert_eq!(view.cases_type, CasesType::Cases);
        assert_eq!(view.viewport.center, DEFAULT_CENTER);
        assert_eq!(view.viewport.zoom, WORLD_ZOOM);
        assert!(view.snapshot.is_none());
    }

    #[test]
    fn selecting_worldwide_requests_global_stats_and_world_zoom() {
        let mut view = ViewState::new();
        view.apply_snapshot(0, StatsSnapshot::Country(country("Peru", "PE", 4)));
        assert_eq!(view.viewport.zoom, COUNTRY_ZOOM);

        let request = view.select_country(Selection::Worldwide);
        assert_eq!(request.endpoint, Endpoint::Global);

        view.apply_snapshot(request.generation, global());
        assert_eq!(view.viewport.zoom, WORLD_ZOOM);
        assert_eq!(view.viewport.center, DEFAULT_CENTER);
    }

    #[test]
    fn selecting_a_country_requests_it_and_centres_the_map() {
        let mut view = ViewState::new();
        let request = view.select_country(Selection::Country("PE".to_string()));
        assert_eq!(request.endpoint, Endpoint::Country("PE".to_string()));

        let outcome = view.apply_snapshot(
            request.generation,
            StatsSnapshot::Country(country("Peru", "PE", 4)),
        );

        assert_eq!(outcome, ApplyOutcome::Applied);
        assert_eq!(view.viewport, MapViewport::country(10.0, 20.0));
        assert!(view.viewport.zoom > WORLD_ZOOM);
    }

    #[test]
    fn choosing_a_category_touches_nothing_else() {
        let mut view = ViewState::new();
        view.apply_snapshot(0, global());
        let generation = view.generation();
        let viewport = view.viewport;

        view.select_cases_type(CasesType::Recovered);

        assert_eq!(view.cases_type, CasesType::Recovered);
        assert_eq!(view.generation(), generation);
        assert_eq!(view.viewport, viewport);
        let card = view.active_card();
        assert_eq!(card.title, "Recovered");
        assert_eq!(card.total, "675.6m");
        assert_eq!(card.today, "+12.3k");
    }

    #[test]
    fn cards_tolerate_missing_snapshot_and_fields() {
        let mut view = ViewState::new();
        for card in view.info_cards() {
            assert_eq!(card.total, "0");
            assert_eq!(card.today, "+0");
        }

        view.apply_snapshot(0, global());
        let [cases, recovered, deaths] = view.info_cards();
        assert!(cases.active && !recovered.active && !deaths.active);
        assert_eq!(cases.today, "+0");
        assert_eq!(cases.total, "704.8m");
        assert_eq!(deaths.total, "7.0m");
    }

    #[test]
    fn stale_responses_are_dropped() {
        let mut view = ViewState::new();
        let first = view.select_country(Selection::Country("PE".to_string()));
        let second = view.select_country(Selection::Worldwide);

        let late = view.apply_snapshot(
            first.generation,
            StatsSnapshot::Country(country("Peru", "PE", 4)),
        );
        assert_eq!(late, ApplyOutcome::Stale);
        assert!(view.snapshot.is_none());
        assert!(!view.is_current(first.generation));
        assert!(view.is_current(second.generation));

        view.apply_snapshot(second.generation, global());
        assert!(matches!(view.snapshot, Some(StatsSnapshot::Global(_))));
    }

    #[test]
    fn country_list_feeds_table_options_and_map() {
        let mut view = ViewState::new();
        let reset = view.apply_countries(vec![
            country("Chile", "CL", 5),
            country("India", "IN", 44),
            country("Peru", "PE", 4),
        ]);

        assert!(reset.is_none());
        let table: Vec<&str> = view.table.iter().map(|c| c.country.as_str()).collect();
        assert_eq!(table, ["India", "Chile", "Peru"]);
        assert_eq!(view.countries[0].country, "Chile");
        assert_eq!(view.options[1].code, "IN");
        assert_eq!(view.bubbles().len(), 3);
    }

    #[test]
    fn empty_country_list_gives_an_empty_table() {
        let mut view = ViewState::new();
        assert!(view.apply_countries(Vec::new()).is_none());
        assert!(view.table.is_empty());
        assert!(view.options.is_empty());
        assert!(view.bubbles().is_empty());
    }

    #[test]
    fn vanished_selection_falls_back_to_worldwide() {
        let mut view = ViewState::new();
        view.select_country(Selection::Country("XX".to_string()));

        let reset = view.apply_countries(vec![country("Peru", "PE", 4)]);

        let request = reset.expect("selection should reset");
        assert_eq!(request.endpoint, Endpoint::Global);
        assert_eq!(view.selection, Selection::Worldwide);
    }

    #[test]
    fn selection_label_uses_the_country_name() {
        let mut view = ViewState::new();
        view.apply_countries(vec![country("Peru", "PE", 4)]);
        assert_eq!(view.selection_label(), "Worldwide");

        view.select_country(Selection::Country("pe".to_string()));
        assert_eq!(view.selection_label(), "Peru");
        assert_eq!(view.selected_option_index(), Some(0));
        assert_eq!(view.graph_title(), "Worldwide new cases");
    }
}
