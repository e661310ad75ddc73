use crate::app::state::App;
use crossterm::event::KeyCode;

/// Returns true when the key was consumed by the help overlay.
pub fn handle_help_toggle(app: &mut App, key: KeyCode) -> bool {
    match key {
        KeyCode::Char('?') => {
            app.show_help = !app.show_help;
            true
        }
        KeyCode::Esc if app.show_help => {
            app.show_help = false;
            true
        }
        _ => false,
    }
}
