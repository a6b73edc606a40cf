//! Input and output contracts of the weather tools.

use serde::{Deserialize, Deserializer, Serialize};

use crate::aggregate::DailySummary;
use crate::contract::Contract;
use crate::error::ContractViolation;

/// Day count used when a forecast request omits `days`.
pub const DEFAULT_FORECAST_DAYS: u8 = 3;

/// Largest accepted forecast day count.
pub const MAX_FORECAST_DAYS: u8 = 7;

const LOCATION_REQUIRED: &str = "either city or both lat and lon must be provided";

/// Unit system understood by the provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Units {
    Standard,
    Metric,
    Imperial,
}

impl Units {
    pub fn as_str(&self) -> &'static str {
        match self {
            Units::Standard => "standard",
            Units::Metric => "metric",
            Units::Imperial => "imperial",
        }
    }
}

impl std::str::FromStr for Units {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "standard" => Ok(Units::Standard),
            "metric" => Ok(Units::Metric),
            "imperial" => Ok(Units::Imperial),
            other => Err(format!("unknown units '{}'", other)),
        }
    }
}

/// Where to look up weather: a city name, a coordinate pair, or both.
pub trait LocationQuery {
    fn city(&self) -> Option<&str>;
    fn coordinates(&self) -> Option<(f64, f64)>;
    fn units(&self) -> Option<Units>;
    fn lang(&self) -> Option<&str>;
}

fn check_location(
    city: Option<&str>,
    lat: Option<f64>,
    lon: Option<f64>,
) -> Result<(), ContractViolation> {
    if let Some(city) = city {
        if city.is_empty() {
            return Err(ContractViolation::field("city", "must not be empty"));
        }
        return Ok(());
    }
    match (lat, lon) {
        (Some(_), Some(_)) => Ok(()),
        _ => Err(ContractViolation::invariant(LOCATION_REQUIRED)),
    }
}

/// Input of `get_current_weather`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrentWeatherInput {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lat: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lon: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub units: Option<Units>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lang: Option<String>,
}

impl Contract for CurrentWeatherInput {
    fn check(&self) -> Result<(), ContractViolation> {
        check_location(self.city.as_deref(), self.lat, self.lon)
    }
}

impl LocationQuery for CurrentWeatherInput {
    fn city(&self) -> Option<&str> {
        self.city.as_deref()
    }

    fn coordinates(&self) -> Option<(f64, f64)> {
        self.lat.zip(self.lon)
    }

    fn units(&self) -> Option<Units> {
        self.units
    }

    fn lang(&self) -> Option<&str> {
        self.lang.as_deref()
    }
}

fn default_days() -> u8 {
    DEFAULT_FORECAST_DAYS
}

/// Accept any whole number, including integer-valued floats such as `3.0`.
/// The 1..=7 range is enforced by [`DailyForecastInput::check`].
fn deserialize_days<'de, D>(deserializer: D) -> Result<u8, D::Error>
where
    D: Deserializer<'de>,
{
    let value = f64::deserialize(deserializer)?;
    if value.fract() != 0.0 {
        return Err(serde::de::Error::custom(format!(
            "days must be a whole number, got {}",
            value
        )));
    }
    if !(0.0..=f64::from(u8::MAX)).contains(&value) {
        return Err(serde::de::Error::custom(format!(
            "days must be between 1 and {}, got {}",
            MAX_FORECAST_DAYS, value
        )));
    }
    Ok(value as u8)
}

/// Input of `get_daily_forecast`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyForecastInput {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lat: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lon: Option<f64>,
    #[serde(default = "default_days", deserialize_with = "deserialize_days")]
    pub days: u8,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub units: Option<Units>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lang: Option<String>,
}

impl Contract for DailyForecastInput {
    fn check(&self) -> Result<(), ContractViolation> {
        if !(1..=MAX_FORECAST_DAYS).contains(&self.days) {
            return Err(ContractViolation::field(
                "days",
                format!("must be between 1 and {}", MAX_FORECAST_DAYS),
            ));
        }
        check_location(self.city.as_deref(), self.lat, self.lon)
    }
}

impl LocationQuery for DailyForecastInput {
    fn city(&self) -> Option<&str> {
        self.city.as_deref()
    }

    fn coordinates(&self) -> Option<(f64, f64)> {
        self.lat.zip(self.lon)
    }

    fn units(&self) -> Option<Units> {
        self.units
    }

    fn lang(&self) -> Option<&str> {
        self.lang.as_deref()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Coord {
    pub lat: f64,
    pub lon: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Condition {
    pub main: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MainReadings {
    pub temp: f64,
    pub feels_like: f64,
    pub humidity: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Wind {
    pub speed: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sys {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
}

/// Output of `get_current_weather`, mirroring the provider's current-conditions payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrentWeatherOutput {
    pub name: String,
    pub coord: Coord,
    pub weather: Vec<Condition>,
    pub main: MainReadings,
    pub wind: Wind,
    /// Observation time, unix seconds.
    pub dt: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sys: Option<Sys>,
}

impl Contract for CurrentWeatherOutput {}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastLocation {
    pub name: String,
    pub lat: f64,
    pub lon: f64,
}

/// Output of `get_daily_forecast`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyForecastOutput {
    pub location: ForecastLocation,
    pub days: Vec<DailySummary>,
}

impl Contract for DailyForecastOutput {
    fn check(&self) -> Result<(), ContractViolation> {
        for (idx, day) in self.days.iter().enumerate() {
            if day.date.is_empty() {
                return Err(ContractViolation::field(
                    format!("days.{}.date", idx),
                    "must not be empty",
                ));
            }
            if day.temp_min > day.temp_max {
                return Err(ContractViolation::field(
                    format!("days.{}", idx),
                    "temp_min exceeds temp_max",
                ));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_current_input_city_only() {
        let input = CurrentWeatherInput::validate(json!({"city": "Tokyo"})).unwrap();
        assert_eq!(input.city.as_deref(), Some("Tokyo"));
        assert_eq!(input.coordinates(), None);
    }

    #[test]
    fn test_current_input_coordinates_only() {
        let input = CurrentWeatherInput::validate(json!({"lat": 35.68, "lon": 139.69})).unwrap();
        assert_eq!(input.coordinates(), Some((35.68, 139.69)));
    }

    #[test]
    fn test_current_input_requires_location() {
        for raw in [
            json!({}),
            json!({"units": "metric"}),
            json!({"lat": 35.0}),
            json!({"lon": 139.0, "lang": "ja"}),
        ] {
            let err = CurrentWeatherInput::validate(raw).unwrap_err();
            assert!(err.path.is_empty());
            assert_eq!(err.message, LOCATION_REQUIRED);
        }
    }

    #[test]
    fn test_current_input_empty_city() {
        let err = CurrentWeatherInput::validate(json!({"city": ""})).unwrap_err();
        assert_eq!(err.path, "city");
    }

    #[test]
    fn test_units_enumeration() {
        let input =
            CurrentWeatherInput::validate(json!({"city": "Oslo", "units": "imperial"})).unwrap();
        assert_eq!(input.units, Some(Units::Imperial));

        assert!(CurrentWeatherInput::validate(json!({"city": "Oslo", "units": "kelvin"})).is_err());
    }

    #[test]
    fn test_input_must_be_object() {
        assert!(CurrentWeatherInput::validate(json!(null)).is_err());
        assert!(CurrentWeatherInput::validate(json!("Tokyo")).is_err());
    }

    #[test]
    fn test_forecast_days_default() {
        for raw in [
            json!({"city": "Paris"}),
            json!({"lat": 48.85, "lon": 2.35, "units": "metric"}),
        ] {
            let input = DailyForecastInput::validate(raw).unwrap();
            assert_eq!(input.days, DEFAULT_FORECAST_DAYS);
        }
    }

    #[test]
    fn test_forecast_days_range() {
        for days in [1, 4, 7] {
            let input = DailyForecastInput::validate(json!({"city": "Paris", "days": days})).unwrap();
            assert_eq!(input.days, days as u8);
        }
        for days in [json!(0), json!(8), json!(-1), json!(300), json!(2.5)] {
            assert!(
                DailyForecastInput::validate(json!({"city": "Paris", "days": days})).is_err(),
                "days={} should be rejected",
                days
            );
        }
    }

    #[test]
    fn test_forecast_days_accepts_whole_floats() {
        let input = DailyForecastInput::validate(json!({"city": "Paris", "days": 3.0})).unwrap();
        assert_eq!(input.days, 3);

        let err = DailyForecastInput::validate(json!({"city": "Paris", "days": 7.5})).unwrap_err();
        assert!(err.message.contains("whole number"));
        assert!(DailyForecastInput::validate(json!({"city": "Paris", "days": null})).is_err());
        assert!(DailyForecastInput::validate(json!({"city": "Paris", "days": "3"})).is_err());
    }

    #[test]
    fn test_forecast_range_reported_on_field() {
        let err = DailyForecastInput::validate(json!({"city": "Paris", "days": 9})).unwrap_err();
        assert_eq!(err.path, "days");
    }

    #[test]
    fn test_normalize_applies_default_and_drops_unknown() {
        let normalized =
            DailyForecastInput::normalize(json!({"city": "Paris", "extra": true})).unwrap();
        assert_eq!(normalized, json!({"city": "Paris", "days": 3}));
    }

    #[test]
    fn test_units_from_str() {
        assert_eq!("Metric".parse::<Units>(), Ok(Units::Metric));
        assert!("celsius".parse::<Units>().is_err());
    }

    fn current_payload() -> serde_json::Value {
        json!({
            "name": "Tokyo",
            "coord": {"lat": 35.69, "lon": 139.69},
            "weather": [{"id": 800, "main": "Clear", "description": "clear sky", "icon": "01d"}],
            "main": {"temp": 21.3, "feels_like": 20.9, "humidity": 48, "pressure": 1012},
            "wind": {"speed": 3.6, "deg": 170},
            "dt": 1_700_000_000,
            "sys": {"country": "JP", "sunrise": 1_699_990_000},
            "cod": 200
        })
    }

    #[test]
    fn test_current_output_strips_unknown_fields() {
        let normalized = CurrentWeatherOutput::normalize(current_payload()).unwrap();
        assert!(normalized.get("cod").is_none());
        assert!(normalized["weather"][0].get("icon").is_none());
        assert_eq!(normalized["sys"]["country"], "JP");
    }

    #[test]
    fn test_current_output_rejects_missing_block() {
        let mut payload = current_payload();
        payload.as_object_mut().unwrap().remove("main");
        assert!(CurrentWeatherOutput::validate(payload).is_err());
    }

    #[test]
    fn test_forecast_output_rejects_null_coordinates() {
        let raw = json!({
            "location": {"name": "Paris", "lat": null, "lon": null},
            "days": []
        });
        assert!(DailyForecastOutput::validate(raw).is_err());
    }

    #[test]
    fn test_forecast_output_rejects_inverted_range() {
        let raw = json!({
            "location": {"name": "Paris", "lat": 48.85, "lon": 2.35},
            "days": [{"date": "2024-05-01", "temp_min": 20.0, "temp_max": 10.0, "summary": "rain"}]
        });
        let err = DailyForecastOutput::validate(raw).unwrap_err();
        assert_eq!(err.path, "days.0");
    }
}
