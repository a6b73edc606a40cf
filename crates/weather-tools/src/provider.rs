//! Weather provider boundary and its OpenWeather implementation.

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, warn};

use crate::config::OpenWeatherConfig;
use crate::error::ToolError;
use crate::schemas::{LocationQuery, Units};

/// Location and presentation options of one provider lookup.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProviderQuery {
    pub city: Option<String>,
    pub coordinates: Option<(f64, f64)>,
    pub units: Option<Units>,
    pub lang: Option<String>,
}

impl ProviderQuery {
    pub fn from_input<Q: LocationQuery>(input: &Q) -> Self {
        Self {
            city: input.city().map(str::to_string),
            coordinates: input.coordinates(),
            units: input.units(),
            lang: input.lang().map(str::to_string),
        }
    }
}

/// Read-only weather lookups.
///
/// Implementations return the provider's JSON payload unmodified; callers
/// validate it.
#[async_trait]
pub trait WeatherProvider: Send + Sync {
    /// Current conditions at a location.
    async fn current(&self, query: &ProviderQuery) -> Result<Value, ToolError>;

    /// 3-hour-interval forecast samples at a location.
    async fn forecast(&self, query: &ProviderQuery) -> Result<Value, ToolError>;
}

/// Error body returned by the provider, e.g. `{"cod":"404","message":"city not found"}`.
#[derive(Deserialize)]
struct ProviderErrorBody {
    message: String,
}

/// HTTP client for the OpenWeather REST API.
pub struct OpenWeatherClient {
    client: reqwest::Client,
    config: OpenWeatherConfig,
}

impl OpenWeatherClient {
    /// Create a client. Each request is bounded by `config.timeout`.
    pub fn new(config: OpenWeatherConfig) -> Result<Self, ToolError> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()?;
        Ok(Self { client, config })
    }

    pub fn config(&self) -> &OpenWeatherConfig {
        &self.config
    }

    /// Query string for a lookup: key, units and language (falling back to
    /// the configured defaults), then the location.
    pub fn query_params(&self, query: &ProviderQuery) -> Vec<(&'static str, String)> {
        let units = query.units.unwrap_or(self.config.default_units);
        let lang = query
            .lang
            .clone()
            .unwrap_or_else(|| self.config.default_lang.clone());

        let mut params = vec![
            ("appid", self.config.api_key.clone()),
            ("units", units.as_str().to_string()),
            ("lang", lang),
        ];
        if let Some(city) = &query.city {
            params.push(("q", city.clone()));
        }
        if let Some((lat, lon)) = query.coordinates {
            params.push(("lat", lat.to_string()));
            params.push(("lon", lon.to_string()));
        }
        params
    }

    async fn fetch(&self, url: &str, query: &ProviderQuery) -> Result<Value, ToolError> {
        debug!("Fetching weather from: {}", url);

        let response = self
            .client
            .get(url)
            .query(&self.query_params(query))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<ProviderErrorBody>(&body)
                .map(|b| b.message)
                .unwrap_or_else(|_| {
                    status
                        .canonical_reason()
                        .unwrap_or("request failed")
                        .to_string()
                });
            warn!("Weather provider returned {}: {}", status, message);
            return Err(ToolError::Upstream {
                status: status.as_u16(),
                message,
            });
        }

        Ok(response.json::<Value>().await?)
    }
}

#[async_trait]
impl WeatherProvider for OpenWeatherClient {
    async fn current(&self, query: &ProviderQuery) -> Result<Value, ToolError> {
        self.fetch(&self.config.current_url(), query).await
    }

    async fn forecast(&self, query: &ProviderQuery) -> Result<Value, ToolError> {
        self.fetch(&self.config.forecast_url(), query).await
    }
}
