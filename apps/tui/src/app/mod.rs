// App module for covid_tracker
// Holds dashboard state, fetch orchestration and input handling

pub mod actions;
pub mod input;
pub mod selector;
pub mod state;

pub use actions::{AppActions, FetchEvent};
pub use input::handle_input;
pub use state::App;
