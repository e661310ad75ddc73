use crate::app::state::App;
use crossterm::event::KeyCode;

mod dashboard;
mod help;
mod selector;

pub fn dispatch_input(app: &mut App, key: KeyCode) {
    if app.selector.open {
        selector::handle_selector_input(app, key);
        return;
    }

    if help::handle_help_toggle(app, key) {
        return;
    }

    dashboard::handle_dashboard_input(app, key);
}
