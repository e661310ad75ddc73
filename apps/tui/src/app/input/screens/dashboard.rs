use crate::app::input::helpers::clamp_offset;
use crate::app::state::App;
use covid_core::{CasesType, Selection};
use crossterm::event::KeyCode;

const PAGE: isize = 10;

pub fn handle_dashboard_input(app: &mut App, key: KeyCode) {
    match key {
        KeyCode::Char('q') => {
            app.running = false;
        }
        KeyCode::Tab | KeyCode::Right => {
            app.select_cases_type(app.view.cases_type.next());
        }
        KeyCode::BackTab | KeyCode::Left => {
            app.select_cases_type(app.view.cases_type.prev());
        }
        KeyCode::Char(ch @ '1'..='3') => {
            let index = ch as usize - '1' as usize;
            if let Some(cases_type) = CasesType::from_index(index) {
                app.select_cases_type(cases_type);
            }
        }
        KeyCode::Char('c') => app.select_cases_type(CasesType::Cases),
        KeyCode::Char('r') => app.select_cases_type(CasesType::Recovered),
        KeyCode::Char('d') => app.select_cases_type(CasesType::Deaths),
        KeyCode::Char('/' | 's') => {
            // Entry 0 is "Worldwide", so country options are shifted by one.
            let current = app.view.selected_option_index().map_or(0, |index| index + 1);
            app.selector.open_at(current);
        }
        KeyCode::Char('w') => {
            app.select_country(Selection::Worldwide);
        }
        KeyCode::Up => scroll(app, -1),
        KeyCode::Down => scroll(app, 1),
        KeyCode::PageUp => scroll(app, -PAGE),
        KeyCode::PageDown => scroll(app, PAGE),
        KeyCode::Home => app.scroll_table(0),
        KeyCode::End => app.scroll_table(usize::MAX),
        _ => {}
    }
}

fn scroll(app: &mut App, delta: isize) {
    let offset = clamp_offset(app.table_offset, delta, app.view.table.len());
    app.scroll_table(offset);
}
