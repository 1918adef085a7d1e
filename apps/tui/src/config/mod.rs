mod config;

pub use config::{init_app_config, AppConfig, Station, DEFAULT_BASE_URL};
