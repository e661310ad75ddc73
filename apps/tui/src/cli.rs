use clap::Parser;

#[derive(Debug, Parser)]
#[command(name = "covid_tracker", version, about = "COVID-19 tracker TUI")]
pub struct CliArgs {
    /// Print stats and exit
    #[arg(long)]
    pub headless: bool,

    /// Print headless stats as JSON
    #[arg(long)]
    pub json: bool,

    /// Enable debug logging
    #[arg(long)]
    pub debug: bool,

    /// Country to show on startup (ISO2 code, or "worldwide")
    #[arg(long, value_name = "CODE")]
    pub country: Option<String>,

    /// Override the statistics API base URL
    #[arg(long = "api-url", value_name = "URL")]
    pub api_url: Option<String>,

    /// Override the log file used while the dashboard is running
    #[arg(long = "log-file", value_name = "PATH")]
    pub log_file: Option<String>,
}

impl CliArgs {
    pub fn apply_env_overrides(&self) {
        if let Some(country) = &self.country {
            std::env::set_var("COVID_DEFAULT_COUNTRY", country);
        }
        if let Some(url) = &self.api_url {
            std::env::set_var("COVID_API_URL", url);
        }
        if let Some(path) = &self.log_file {
            std::env::set_var("COVID_TRACKER_LOG", path);
        }
        if self.debug {
            std::env::set_var("DEBUG", "1");
        }
    }
}
