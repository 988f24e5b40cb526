//! Application configuration, extracted from the environment.
//!
//! Every field has a default so the service starts with no configuration at
//! all. Durations accept human-readable strings ("15m", "30s", "1h").

use std::time::Duration;

use anyhow::Context;
use figment::{Figment, providers::Env};
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Port for the HTTP API.
    #[serde(default = "default_port")]
    pub port: u16,
    /// Base level for this crate's log filter.
    #[serde(default = "default_log_level")]
    pub log_level: String,
    /// Upstream Schedule of Classes endpoint.
    #[serde(default = "default_soc_base_url")]
    pub soc_base_url: String,
    /// Per-request timeout against the upstream API.
    #[serde(default = "default_request_timeout", deserialize_with = "de_duration")]
    pub request_timeout: Duration,
    /// Bounded retry count for transient upstream failures.
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,
    /// How often the background scheduler re-fetches the default term.
    #[serde(default = "default_refresh_interval", deserialize_with = "de_duration")]
    pub refresh_interval: Duration,
    #[serde(default = "default_year")]
    pub default_year: String,
    #[serde(default = "default_term")]
    pub default_term: String,
    #[serde(default = "default_campus")]
    pub default_campus: String,
    /// Directory holding `salaries.csv` / `salaries.json`.
    #[serde(default = "default_salary_data_dir")]
    pub salary_data_dir: String,
    /// Grace period for in-flight requests on shutdown.
    #[serde(default = "default_shutdown_timeout", deserialize_with = "de_duration")]
    pub shutdown_timeout: Duration,
}

pub fn load() -> anyhow::Result<Config> {
    Figment::new()
        .merge(Env::raw())
        .extract()
        .context("Failed to load config")
}

fn de_duration<'de, D>(deserializer: D) -> Result<Duration, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    let parsed = fundu::DurationParser::with_all_time_units()
        .parse(&raw)
        .map_err(serde::de::Error::custom)?;
    Duration::try_from(parsed).map_err(serde::de::Error::custom)
}

fn default_port() -> u16 {
    5000
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_soc_base_url() -> String {
    "https://classes.rutgers.edu/soc/api/courses.json".to_string()
}

fn default_request_timeout() -> Duration {
    Duration::from_secs(30)
}

fn default_max_retries() -> u32 {
    3
}

fn default_refresh_interval() -> Duration {
    Duration::from_secs(15 * 60)
}

fn default_year() -> String {
    "2025".to_string()
}

fn default_term() -> String {
    "1".to_string()
}

fn default_campus() -> String {
    "NB".to_string()
}

fn default_salary_data_dir() -> String {
    "data".to_string()
}

fn default_shutdown_timeout() -> Duration {
    Duration::from_secs(10)
}
