use dotenv::dotenv;
use std::env;
use std::time::Duration;

/// Default base URL of the deployed AirViewer backend.
pub const DEFAULT_BASE_URL: &str = "https://airviewer.onrender.com/api/v1";

const DEFAULT_POLL_SECS: u64 = 60;
const DEFAULT_TIMEOUT_SECS: u64 = 10;

// Trujillo monitoring station.
const DEFAULT_STATION_NAME: &str = "Trujillo Station";
const DEFAULT_STATION_LAT: f64 = -8.1102;
const DEFAULT_STATION_LNG: f64 = -79.0238;

/// Monitoring station placed on the map panel.
#[derive(Debug, Clone)]
pub struct Station {
    pub name: String,
    pub lat: f64,
    pub lng: f64,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub base_url: String,
    /// Dashboard auto-refresh cadence.
    pub poll_interval: Duration,
    /// Per-request timeout; a timed-out fetch counts as a transport failure.
    pub request_timeout: Duration,
    pub station: Station,
    pub alerts_enabled: bool,
    pub debug: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            poll_interval: Duration::from_secs(DEFAULT_POLL_SECS),
            request_timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            station: Station {
                name: DEFAULT_STATION_NAME.to_string(),
                lat: DEFAULT_STATION_LAT,
                lng: DEFAULT_STATION_LNG,
            },
            alerts_enabled: true,
            debug: false,
        }
    }
}

/// Initializes the application configuration from the environment.
///
/// A trailing slash on the base URL is trimmed so endpoint paths can be
/// appended verbatim.
pub fn init_app_config() -> AppConfig {
    // Load environment variables from .env file
    dotenv().ok();

    let base_url = env::var("AIRVIEWER_API_URL")
        .unwrap_or_else(|_| DEFAULT_BASE_URL.to_string())
        .trim_end_matches('/')
        .to_string();

    let poll_interval = Duration::from_secs(parse_secs("AIRVIEWER_POLL_SECS", DEFAULT_POLL_SECS));
    let request_timeout =
        Duration::from_secs(parse_secs("AIRVIEWER_TIMEOUT_SECS", DEFAULT_TIMEOUT_SECS));

    let station = Station {
        name: env::var("AIRVIEWER_STATION_NAME")
            .unwrap_or_else(|_| DEFAULT_STATION_NAME.to_string()),
        lat: parse_coord("AIRVIEWER_STATION_LAT", DEFAULT_STATION_LAT),
        lng: parse_coord("AIRVIEWER_STATION_LNG", DEFAULT_STATION_LNG),
    };

    let alerts_enabled = env::var("AIRVIEWER_ALERTS").map_or(true, |value| value != "0");
    let debug = env::var("DEBUG").map_or(false, |value| value == "1");

    AppConfig {
        base_url,
        poll_interval,
        request_timeout,
        station,
        alerts_enabled,
        debug,
    }
}

fn parse_secs(key: &str, default: u64) -> u64 {
    env::var(key)
        .ok()
        .and_then(|value| value.trim().parse().ok())
        .filter(|secs| *secs > 0)
        .unwrap_or(default)
}

fn parse_coord(key: &str, default: f64) -> f64 {
    env::var(key)
        .ok()
        .and_then(|value| value.trim().parse().ok())
        .unwrap_or(default)
}

#[cfg(test)]
mod tests {
    use super::*;

    // Environment variables are process-wide and the test harness runs on
    // parallel threads, so everything touching them lives in one test.
    #[test]
    fn environment_handling() {
        env::remove_var("AIRVIEWER_API_URL");
        env::remove_var("AIRVIEWER_POLL_SECS");
        env::remove_var("AIRVIEWER_TIMEOUT_SECS");
        env::remove_var("AIRVIEWER_ALERTS");

        let config = init_app_config();
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.poll_interval, Duration::from_secs(DEFAULT_POLL_SECS));
        assert_eq!(
            config.request_timeout,
            Duration::from_secs(DEFAULT_TIMEOUT_SECS)
        );
        assert!(config.alerts_enabled);

        env::set_var("AIRVIEWER_API_URL", "http://localhost:5000/api/v1/");
        let config = init_app_config();
        assert_eq!(config.base_url, "http://localhost:5000/api/v1");
        env::remove_var("AIRVIEWER_API_URL");
    }
}
