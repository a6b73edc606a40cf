//! Configuration loaded from environment variables.

use std::env;
use std::net::SocketAddr;
use std::time::Duration;

use weather_tools::{OpenWeatherConfig, Units, DEFAULT_BASE_URL, DEFAULT_TIMEOUT};

/// Port used when neither `WEATHER_MCP_ADDR` nor `PORT` is set.
const DEFAULT_PORT: u16 = 3001;

/// Server configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Server bind address.
    pub addr: SocketAddr,
    /// Weather provider settings.
    pub openweather: OpenWeatherConfig,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// | Variable | Description | Default |
    /// |----------|-------------|---------|
    /// | `WEATHER_MCP_ADDR` | Server bind address | `127.0.0.1:3001` |
    /// | `PORT` | Listen on `0.0.0.0:<PORT>` when `WEATHER_MCP_ADDR` is unset | |
    /// | `OPENWEATHER_KEY` | Provider API key | (required) |
    /// | `OPENWEATHER_BASE_URL` | Provider base URL | `https://api.openweathermap.org/data/2.5` |
    /// | `DEFAULT_UNITS` | Units when a request names none | `metric` |
    /// | `DEFAULT_LANG` | Language when a request names none | `en` |
    /// | `OPENWEATHER_TIMEOUT_SECS` | Provider request timeout | `10` |
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let addr = match (lookup("WEATHER_MCP_ADDR"), lookup("PORT")) {
            (Some(addr), _) => addr.parse().map_err(|_| ConfigError::InvalidAddr)?,
            (None, Some(port)) => {
                let port: u16 = port.trim().parse().map_err(|_| ConfigError::InvalidPort)?;
                SocketAddr::from(([0, 0, 0, 0], port))
            }
            (None, None) => SocketAddr::from(([127, 0, 0, 1], DEFAULT_PORT)),
        };

        let api_key = lookup("OPENWEATHER_KEY")
            .filter(|key| !key.trim().is_empty())
            .ok_or(ConfigError::MissingApiKey)?;

        let base_url =
            lookup("OPENWEATHER_BASE_URL").unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

        let units = match lookup("DEFAULT_UNITS") {
            Some(value) => value
                .parse::<Units>()
                .map_err(ConfigError::InvalidUnits)?,
            None => Units::Metric,
        };

        let lang = lookup("DEFAULT_LANG").unwrap_or_else(|| "en".to_string());

        let timeout = match lookup("OPENWEATHER_TIMEOUT_SECS") {
            Some(value) => value
                .trim()
                .parse::<u64>()
                .ok()
                .filter(|secs| *secs > 0)
                .map(Duration::from_secs)
                .ok_or(ConfigError::InvalidTimeout)?,
            None => DEFAULT_TIMEOUT,
        };

        let openweather = OpenWeatherConfig::new(api_key)
            .with_base_url(base_url)
            .with_default_units(units)
            .with_default_lang(lang)
            .with_timeout(timeout);

        Ok(Self { addr, openweather })
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid WEATHER_MCP_ADDR format")]
    InvalidAddr,

    #[error("Invalid PORT: expected a number between 0 and 65535")]
    InvalidPort,

    #[error("OPENWEATHER_KEY environment variable is required")]
    MissingApiKey,

    #[error("Invalid DEFAULT_UNITS: {0}")]
    InvalidUnits(String),

    #[error("OPENWEATHER_TIMEOUT_SECS must be a positive integer")]
    InvalidTimeout,
}
