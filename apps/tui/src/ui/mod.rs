// UI module for covid_tracker
// Handles all UI rendering functions

pub mod screens;
pub mod widgets;

use crate::app::App;
use ratatui::Frame;

pub fn ui(app: &App, f: &mut Frame<'_>) {
    screens::dashboard::render_dashboard(app, f);

    if app.selector.open {
        widgets::popup::render_country_selector(app, f);
    } else if app.show_help {
        widgets::popup::render_help_popup(f);
    }
}

/// API timestamps are epoch milliseconds.
pub fn format_updated(updated: Option<i64>) -> Option<String> {
    let timestamp = chrono::DateTime::from_timestamp_millis(updated?)?;
    Some(timestamp.format("%Y-%m-%d %H:%M UTC").to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::memory::StaticStatsSource;
    use crate::app::AppActions;
    use covid_core::history::HistoricalTimeline;
    use covid_core::{CountryInfo, CountryStat, GlobalStat, StatCounts, StatsSnapshot};
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;
    use std::sync::Arc;

    fn app() -> App {
        let (actions, _events) = AppActions::new(Arc::new(StaticStatsSource::default()), 120);
        App::new(actions)
    }

    fn screen_text(app: &App, width: u16, height: u16) -> String {
        let mut terminal = Terminal::new(TestBackend::new(width, height)).unwrap();
        terminal.draw(|f| ui(app, f)).unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(ratatui::buffer::Cell::symbol)
            .collect()
    }

    #[test]
    fn renders_before_any_data_arrives() {
        let app = app();
        let text = screen_text(&app, 120, 40);
        assert!(text.contains("COVID-19 Tracker"));
        assert!(text.contains("No countries loaded"));
    }

    #[test]
    fn renders_loaded_data() {
        let mut app = app();
        app.view.apply_snapshot(
            0,
            StatsSnapshot::Global(GlobalStat {
                counts: StatCounts {
                    cases: Some(704_753_890),
                    ..StatCounts::default()
                },
                ..GlobalStat::default()
            }),
        );
        app.view.apply_countries(vec![CountryStat {
            country: "Peru".to_string(),
            country_info: CountryInfo {
                iso2: Some("PE".to_string()),
                lat: Some(-10.0),
                long: Some(-76.0),
                ..CountryInfo::default()
            },
            counts: StatCounts {
                cases: Some(4_500_000),
                ..StatCounts::default()
            },
            ..CountryStat::default()
        }]);
        app.history = Some(HistoricalTimeline {
            cases: [("1/1/23", 1), ("1/2/23", 5), ("1/3/23", 7)]
                .iter()
                .map(|(d, v)| ((*d).to_string(), *v))
                .collect(),
            ..HistoricalTimeline::default()
        });

        let text = screen_text(&app, 140, 45);

        assert!(text.contains("704.8m"));
        assert!(text.contains("Peru"));
        assert!(text.contains("4,500,000"));
        assert!(text.contains("Worldwide new cases"));
    }

    #[test]
    fn renders_the_selector_and_help_overlays() {
        let mut app = app();
        app.selector.open_at(0);
        assert!(screen_text(&app, 100, 40).contains("Select country"));

        app.selector.close();
        app.show_help = true;
        assert!(screen_text(&app, 100, 40).contains("Keys"));
    }

    #[test]
    fn tiny_terminal_does_not_panic() {
        let app = app();
        let _ = screen_text(&app, 10, 5);
    }

    #[test]
    fn formats_api_timestamps() {
        assert_eq!(
            format_updated(Some(1_700_000_000_000)).as_deref(),
            Some("2023-11-14 22:13 UTC")
        );
        assert_eq!(format_updated(None), None);
    }
}
