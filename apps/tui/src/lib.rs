// Export our modules for use in binaries and tests
pub mod api;
pub mod config;
pub mod domain;

pub use domain::{classify, AqiCategory, ALERT_TIER};
