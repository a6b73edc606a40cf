//! `get_daily_forecast`: daily min/max/summary built from 3-hourly samples.

use std::sync::Arc;

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::debug;

use crate::aggregate::{aggregate_daily, RawSample};
use crate::error::ToolError;
use crate::provider::{ProviderQuery, WeatherProvider};
use crate::schemas::{DailyForecastInput, DailyForecastOutput};
use crate::tool::Tool;

/// Location name used when neither the provider nor the request has one.
const UNKNOWN_LOCATION: &str = "unknown";

#[derive(Deserialize)]
struct ForecastPayload {
    list: Vec<ForecastEntry>,
    #[serde(default)]
    city: Option<ForecastCity>,
}

#[derive(Deserialize)]
struct ForecastEntry {
    dt_txt: String,
    main: EntryReadings,
    #[serde(default)]
    weather: Vec<EntryCondition>,
}

#[derive(Deserialize)]
struct EntryReadings {
    temp: f64,
}

#[derive(Deserialize)]
struct EntryCondition {
    #[serde(default)]
    description: String,
}

#[derive(Deserialize)]
struct ForecastCity {
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    coord: Option<CityCoord>,
}

#[derive(Deserialize)]
struct CityCoord {
    #[serde(default)]
    lat: Option<f64>,
    #[serde(default)]
    lon: Option<f64>,
}

impl From<ForecastEntry> for RawSample {
    fn from(entry: ForecastEntry) -> Self {
        RawSample {
            timestamp: entry.dt_txt,
            temp: entry.main.temp,
            labels: entry.weather.into_iter().map(|w| w.description).collect(),
        }
    }
}

/// Daily forecast for 1 to 7 days (default 3).
///
/// # Parameters
///
/// - `city` / `lat` + `lon`: Location, as for `get_current_weather`.
/// - `days` (optional): Number of days, 1-7. Defaults to 3.
/// - `units`, `lang` (optional): Passed to the provider.
pub struct DailyForecast {
    provider: Arc<dyn WeatherProvider>,
}

impl DailyForecast {
    pub fn new(provider: Arc<dyn WeatherProvider>) -> Self {
        Self { provider }
    }
}

#[async_trait]
impl Tool for DailyForecast {
    type Input = DailyForecastInput;
    type Output = DailyForecastOutput;

    fn name(&self) -> &str {
        "get_daily_forecast"
    }

    fn title(&self) -> &str {
        "Get Daily Forecast"
    }

    fn description(&self) -> &str {
        "Returns a 3 to 7 day daily forecast with minimum/maximum temperature and a summary."
    }

    async fn execute(&self, input: DailyForecastInput) -> Result<Value, ToolError> {
        let raw = self
            .provider
            .forecast(&ProviderQuery::from_input(&input))
            .await?;
        let payload: ForecastPayload = serde_json::from_value(raw)?;

        let samples: Vec<RawSample> = payload.list.into_iter().map(RawSample::from).collect();
        debug!(
            "Aggregating {} forecast samples into {} days",
            samples.len(),
            input.days
        );
        let days = aggregate_daily(&samples, usize::from(input.days));

        let city = payload.city;
        let name = city
            .as_ref()
            .and_then(|c| c.name.clone())
            .or(input.city)
            .unwrap_or_else(|| UNKNOWN_LOCATION.to_string());
        let coord = city.and_then(|c| c.coord);
        let (lat, lon) = match coord {
            Some(c) => (c.lat, c.lon),
            None => (None, None),
        };

        // Missing coordinates stay null so the output contract rejects them.
        Ok(json!({
            "location": { "name": name, "lat": lat, "lon": lon },
            "days": days,
        }))
    }
}
