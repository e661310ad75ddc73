use crate::app::state::App;
use crossterm::event::KeyCode;

pub fn handle_selector_input(app: &mut App, key: KeyCode) {
    let len = app.selector.entries(&app.view.options).len();

    match key {
        KeyCode::Esc => app.selector.close(),
        KeyCode::Enter => {
            let selection = app.selector.selected(&app.view.options);
            app.selector.close();
            if let Some(selection) = selection {
                if selection != app.view.selection {
                    app.select_country(selection);
                }
            }
        }
        KeyCode::Up => app.selector.prev(len),
        KeyCode::Down => app.selector.next(len),
        KeyCode::Backspace => app.selector.pop(),
        KeyCode::Char(ch) => app.selector.push(ch),
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::memory::StaticStatsSource;
    use crate::app::AppActions;
    use covid_core::{CountryInfo, CountryStat, Selection};
    use std::sync::Arc;

    fn app() -> App {
        let (actions, _events) = AppActions::new(Arc::new(StaticStatsSource::default()), 120);
        let mut app = App::new(actions);
        app.view.apply_countries(vec![CountryStat {
            country: "Germany".to_string(),
            country_info: CountryInfo {
                iso2: Some("DE".to_string()),
                ..CountryInfo::default()
            },
            ..CountryStat::default()
        }]);
        app.selector.open_at(0);
        app
    }

    #[tokio::test]
    async fn enter_selects_the_highlighted_country() {
        let mut app = app();
        for ch in "ger".chars() {
            handle_selector_input(&mut app, KeyCode::Char(ch));
        }
        handle_selector_input(&mut app, KeyCode::Enter);

        assert!(!app.selector.open);
        assert_eq!(app.view.selection, Selection::Country("DE".to_string()));
        assert!(app.loading.snapshot);
    }

    #[test]
    fn escape_closes_without_selecting() {
        let mut app = app();
        handle_selector_input(&mut app, KeyCode::Down);
        handle_selector_input(&mut app, KeyCode::Esc);

        assert!(!app.selector.open);
        assert_eq!(app.view.selection, Selection::Worldwide);
        assert!(!app.loading.snapshot);
    }

    #[test]
    fn typing_edits_the_query() {
        let mut app = app();
        handle_selector_input(&mut app, KeyCode::Char('d'));
        handle_selector_input(&mut app, KeyCode::Char('e'));
        handle_selector_input(&mut app, KeyCode::Backspace);

        assert_eq!(app.selector.query, "d");
    }
}
