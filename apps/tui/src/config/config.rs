use color_eyre::eyre::{eyre, Result};
use covid_core::api::{DEFAULT_BASE_URL, DEFAULT_HISTORY_DAYS};
use covid_core::Selection;
use dotenv::dotenv;
use std::env;
use std::path::PathBuf;
use std::time::Duration;

const DEFAULT_TIMEOUT_SECS: u64 = 15;
const DEFAULT_LOG_FILE: &str = "covid-tracker.log";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub api_url: String,
    pub initial_selection: Selection,
    pub history_days: u32,
    pub http_timeout: Duration,
    pub log_file: PathBuf,
    pub debug: bool,
}

/// Loads `.env`, then reads the configuration from the environment
pub fn init_app_config() -> Result<AppConfig> {
    dotenv().ok();
    AppConfig::from_lookup(|key| env::var(key).ok())
}

impl AppConfig {
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let api_url = lookup("COVID_API_URL")
            .filter(|url| !url.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

        let initial_selection = lookup("COVID_DEFAULT_COUNTRY")
            .map(|value| Selection::parse(&value))
            .unwrap_or_default();

        let history_days = match lookup("COVID_HISTORY_DAYS") {
            Some(value) => value
                .trim()
                .parse::<u32>()
                .ok()
                .filter(|days| *days >= 2)
                .ok_or_else(|| eyre!("COVID_HISTORY_DAYS must be a number of at least 2, got {value:?}"))?,
            None => DEFAULT_HISTORY_DAYS,
        };

        let timeout_secs = match lookup("COVID_HTTP_TIMEOUT_SECS") {
            Some(value) => value
                .trim()
                .parse::<u64>()
                .ok()
                .filter(|secs| *secs > 0)
                .ok_or_else(|| eyre!("COVID_HTTP_TIMEOUT_SECS must be a positive number, got {value:?}"))?,
            None => DEFAULT_TIMEOUT_SECS,
        };

        let log_file = lookup("COVID_TRACKER_LOG")
            .map_or_else(|| PathBuf::from(DEFAULT_LOG_FILE), PathBuf::from);

        let debug = lookup("DEBUG").is_some_and(|value| !matches!(value.as_str(), "" | "0" | "false"));

        Ok(Self {
            api_url,
            initial_selection,
            history_days,
            http_timeout: Duration::from_secs(timeout_secs),
            log_file,
            debug,
        })
    }
}
