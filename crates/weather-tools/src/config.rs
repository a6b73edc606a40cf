//! Configuration for the OpenWeather provider client.

use std::time::Duration;

use crate::schemas::Units;

/// Default provider endpoint.
pub const DEFAULT_BASE_URL: &str = "https://api.openweathermap.org/data/2.5";

/// Default bound on a single provider request.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Configuration for connecting to the weather provider.
#[derive(Debug, Clone)]
pub struct OpenWeatherConfig {
    /// Base URL of the REST API (no trailing slash).
    pub base_url: String,
    /// API key sent as `appid`.
    pub api_key: String,
    /// Units used when a request does not name any.
    pub default_units: Units,
    /// Language used when a request does not name one.
    pub default_lang: String,
    /// Timeout for each provider request. There is no retry.
    pub timeout: Duration,
}

impl OpenWeatherConfig {
    /// Create a configuration with the given API key and defaults elsewhere.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            api_key: api_key.into(),
            default_units: Units::Metric,
            default_lang: "en".to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn with_default_units(mut self, units: Units) -> Self {
        self.default_units = units;
        self
    }

    pub fn with_default_lang(mut self, lang: impl Into<String>) -> Self {
        self.default_lang = lang.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Current-conditions endpoint.
    pub fn current_url(&self) -> String {
        format!("{}/weather", self.base_url)
    }

    /// 3-hourly forecast endpoint.
    pub fn forecast_url(&self) -> String {
        format!("{}/forecast", self.base_url)
    }
}
