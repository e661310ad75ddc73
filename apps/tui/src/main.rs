use std::sync::Arc;

use clap::Parser;
use color_eyre::Result;
use covid_tracker::api::client::ReqwestStatsClient;
use covid_tracker::app::{App, AppActions};
use covid_tracker::cli::CliArgs;
use covid_tracker::config::init_app_config;
use covid_tracker::{event, logging, terminal};

#[tokio::main]
async fn main() -> Result<()> {
    // Setup error handling
    color_eyre::install()?;

    let args = CliArgs::parse();
    args.apply_env_overrides();

    let config = init_app_config()?;

    // Without a terminal there is nothing to draw on
    let headless = args.headless || !is_terminal();
    logging::init(&config, headless)?;

    let client = Arc::new(ReqwestStatsClient::new(
        &config.api_url,
        config.http_timeout,
    )?);
    tracing::info!(api_url = %client.base_url(), headless, "starting covid tracker");

    if headless {
        return event::run_headless(client.as_ref(), &config, args.json).await;
    }

    let (actions, fetches) = AppActions::new(client, config.history_days);
    let mut app = App::new(actions);
    app.start(config.initial_selection.clone());

    // Setup terminal
    terminal::install_panic_hook();
    let mut terminal = terminal::setup()?;

    // Run the application
    let result = event::run(&mut terminal, &mut app, fetches).await;

    // Restore terminal
    terminal::cleanup(true, true);

    result
}

fn is_terminal() -> bool {
    atty::is(atty::Stream::Stdout)
}
