//! `get_current_weather`: current conditions by city or coordinates.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;
use tracing::debug;

use crate::error::ToolError;
use crate::provider::{ProviderQuery, WeatherProvider};
use crate::schemas::{CurrentWeatherInput, CurrentWeatherOutput};
use crate::tool::Tool;

/// Current weather at a location.
///
/// # Parameters
///
/// - `city` (optional): City name.
/// - `lat`, `lon` (optional): Coordinates; both or neither.
/// - `units` (optional): `standard`, `metric` or `imperial`.
/// - `lang` (optional): Language tag for condition descriptions.
///
/// Either `city` or both coordinates must be given.
///
/// # Examples
///
/// ```json
/// {"city": "Tokyo"}
/// {"lat": 51.5, "lon": -0.12, "units": "imperial", "lang": "en"}
/// ```
pub struct CurrentWeather {
    provider: Arc<dyn WeatherProvider>,
}

impl CurrentWeather {
    pub fn new(provider: Arc<dyn WeatherProvider>) -> Self {
        Self { provider }
    }
}

#[async_trait]
impl Tool for CurrentWeather {
    type Input = CurrentWeatherInput;
    type Output = CurrentWeatherOutput;

    fn name(&self) -> &str {
        "get_current_weather"
    }

    fn title(&self) -> &str {
        "Get Current Weather"
    }

    fn description(&self) -> &str {
        "Returns the current weather for a city name or a latitude/longitude pair."
    }

    async fn execute(&self, input: CurrentWeatherInput) -> Result<Value, ToolError> {
        debug!(
            "Getting current weather for city={:?} coords={:?}",
            input.city,
            input.lat.zip(input.lon)
        );
        self.provider.current(&ProviderQuery::from_input(&input)).await
    }
}
