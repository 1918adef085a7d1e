use clap::Parser;

#[derive(Debug, Parser)]
#[command(name = "airviewer", version, about = "AirViewer air-quality TUI")]
pub struct CliArgs {
    /// Fetch the current snapshot, print it and exit
    #[arg(long)]
    pub headless: bool,

    /// Print the headless snapshot as JSON
    #[arg(long)]
    pub json: bool,

    /// Override the backend base URL
    #[arg(long = "base-url", value_name = "URL")]
    pub base_url: Option<String>,

    /// Dashboard auto-refresh interval in seconds
    #[arg(long, value_name = "SECS")]
    pub interval: Option<u64>,

    /// Per-request timeout in seconds
    #[arg(long, value_name = "SECS")]
    pub timeout: Option<u64>,

    /// Disable the audible/visual alert side effects
    #[arg(long = "no-alerts")]
    pub no_alerts: bool,

    /// Enable debug logging
    #[arg(long)]
    pub debug: bool,
}

impl CliArgs {
    pub fn apply_env_overrides(&self) {
        if let Some(url) = &self.base_url {
            std::env::set_var("AIRVIEWER_API_URL", url);
        }
        if let Some(secs) = self.interval {
            std::env::set_var("AIRVIEWER_POLL_SECS", secs.to_string());
        }
        if let Some(secs) = self.timeout {
            std::env::set_var("AIRVIEWER_TIMEOUT_SECS", secs.to_string());
        }
        if self.no_alerts {
            std::env::set_var("AIRVIEWER_ALERTS", "0");
        }
        if self.debug {
            std::env::set_var("DEBUG", "1");
        }
    }
}
