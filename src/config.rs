use crate::error::ConfigError;
use anyhow::{anyhow, Result};
use serde_derive::Deserialize;
use std::str::FromStr;
use std::time::Duration;

fn default_log_level() -> String {
    "info".to_string()
}

#[derive(Deserialize, Debug)]
pub struct AppConfig {
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl AppConfig {
    pub fn log_level(&self) -> tracing::Level {
        tracing::Level::from_str(self.log_level.as_str()).unwrap_or(tracing::Level::INFO)
    }
}

pub(crate) fn load_app_config() -> Result<AppConfig> {
    match envy::from_env::<AppConfig>() {
        Ok(config) => Ok(config),
        Err(err) => Err(anyhow!("Failed to load AppConfig: {}", err)),
    }
}

fn default_url() -> String {
    "https://www.strava.com/segments/35231066/leaderboard".to_string()
}

fn default_output() -> String {
    "leaderboard.csv".to_string()
}

fn default_wait_timeout_sec() -> u64 {
    20
}

fn default_filter_wait_timeout_sec() -> u64 {
    15
}

fn default_poll_interval_ms() -> u64 {
    500
}

#[derive(Deserialize, Debug, Clone)]
pub struct ScraperConfig {
    // leaderboard listing, page 1 without a `page` parameter
    #[serde(default = "default_url")]
    pub url: String,
    #[serde(default = "default_output")]
    pub output: String,
    #[serde(default = "default_wait_timeout_sec")]
    pub wait_timeout_sec: u64,
    #[serde(default = "default_filter_wait_timeout_sec")]
    pub filter_wait_timeout_sec: u64,
    #[serde(default = "default_poll_interval_ms")]
    pub poll_interval_ms: u64,
    #[serde(default)]
    pub max_pages: Option<usize>,
}

impl ScraperConfig {
    pub fn wait_timeout(&self) -> Duration {
        Duration::from_secs(self.wait_timeout_sec)
    }

    pub fn filter_wait_timeout(&self) -> Duration {
        Duration::from_secs(self.filter_wait_timeout_sec)
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.url.trim().is_empty() {
            return Err(ConfigError::invalid("url", "must not be empty"));
        }
        if self.output.trim().is_empty() {
            return Err(ConfigError::invalid("output", "must not be empty"));
        }
        if self.wait_timeout_sec == 0 {
            return Err(ConfigError::invalid("wait_timeout_sec", "must be greater than zero"));
        }
        if self.filter_wait_timeout_sec == 0 {
            return Err(ConfigError::invalid(
                "filter_wait_timeout_sec",
                "must be greater than zero",
            ));
        }
        if self.poll_interval_ms == 0 {
            return Err(ConfigError::invalid("poll_interval_ms", "must be greater than zero"));
        }
        Ok(())
    }
}

pub fn load_scraper_config() -> Result<ScraperConfig> {
    let config = match envy::prefixed("SCRAPER_").from_env::<ScraperConfig>() {
        Ok(config) => config,
        Err(err) => {
            return Err(anyhow!(
                "Failed to load ScraperConfig: {}",
                ConfigError::env_parse(err)
            ))
        }
    };
    config
        .validate()
        .map_err(|err| anyhow!("Failed to load ScraperConfig: {}", err))?;
    Ok(config)
}

fn default_true() -> bool {
    true
}

fn default_request_timeout_sec() -> u64 {
    60
}

#[derive(Deserialize, Debug, Clone)]
pub struct BrowserConfig {
    #[serde(default = "default_true")]
    pub headless: bool,
    #[serde(default = "default_true")]
    pub sandbox: bool,
    #[serde(default)]
    pub chrome_executable: Option<String>,
    #[serde(default = "default_request_timeout_sec")]
    pub request_timeout_sec: u64,
}

pub fn load_browser_config() -> Result<BrowserConfig> {
    match envy::prefixed("BROWSER_").from_env::<BrowserConfig>() {
        Ok(config) => Ok(config),
        Err(err) => Err(anyhow!(
            "Failed to load BrowserConfig: {}",
            ConfigError::env_parse(err)
        )),
    }
}
