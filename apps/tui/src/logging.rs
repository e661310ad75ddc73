use crate::config::AppConfig;
use color_eyre::eyre::{eyre, Result};
use std::fs::OpenOptions;
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;

/// Installs the global subscriber. `RUST_LOG` wins over the built-in
/// filter. The dashboard owns the terminal, so it logs to a file; headless
/// runs log to stderr.
pub fn init(config: &AppConfig, headless: bool) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(config.debug)));

    let result = if headless {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .try_init()
    } else {
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&config.log_file)?;
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_ansi(false)
            .with_writer(Mutex::new(file))
            .try_init()
    };

    result.map_err(|e| eyre!("Failed to initialise logging: {e}"))
}

fn default_directive(debug: bool) -> &'static str {
    if debug {
        "covid_tracker=debug,covid_core=debug"
    } else {
        "warn"
    }
}
