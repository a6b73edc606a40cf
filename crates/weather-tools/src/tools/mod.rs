//! Built-in weather tools.

mod current_weather;
mod daily_forecast;

pub use current_weather::CurrentWeather;
pub use daily_forecast::DailyForecast;
