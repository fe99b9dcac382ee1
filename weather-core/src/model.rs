//! Domain models: raw mirrors of the upstream JSON and the shaped structures
//! returned to tool callers.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Resolved geographic coordinates, in floating point degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Coordinates {
    pub lat: f64,
    pub lon: f64,
}

// ---------------------------------------------------------------------------
// Raw upstream payload (one-call endpoint), deserialized as-is.
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Deserialize)]
pub struct RawForecast {
    pub current: RawCurrent,
    #[serde(default)]
    pub hourly: Vec<RawHourly>,
    #[serde(default)]
    pub daily: Vec<RawDaily>,
}

/// Reduced one-call payload used by the current-weather-only path.
#[derive(Debug, Clone, Deserialize)]
pub struct RawCurrentOnly {
    pub current: RawCurrent,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawCurrent {
    pub dt: i64,
    pub temp: f64,
    pub feels_like: f64,
    #[serde(default)]
    pub humidity: u8,
    #[serde(default)]
    pub wind_speed: f64,
    #[serde(default)]
    pub wind_deg: u16,
    #[serde(default)]
    pub clouds: u8,
    #[serde(default)]
    pub weather: Vec<RawWeather>,
    #[serde(default)]
    pub rain: Option<RawPrecipitation>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawHourly {
    pub dt: i64,
    pub temp: f64,
    pub feels_like: f64,
    #[serde(default)]
    pub humidity: u8,
    #[serde(default)]
    pub wind_speed: f64,
    #[serde(default)]
    pub wind_deg: u16,
    #[serde(default)]
    pub clouds: u8,
    #[serde(default)]
    pub pop: f64,
    #[serde(default)]
    pub weather: Vec<RawWeather>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawDaily {
    pub dt: i64,
    pub temp: RawDayTemperatures,
    #[serde(default)]
    pub feels_like: RawDayFeelsLike,
    #[serde(default)]
    pub humidity: u8,
    #[serde(default)]
    pub wind_speed: f64,
    #[serde(default)]
    pub wind_deg: u16,
    #[serde(default)]
    pub clouds: u8,
    /// Probability of precipitation, 0.0-1.0.
    #[serde(default)]
    pub pop: f64,
    #[serde(default)]
    pub summary: Option<String>,
    #[serde(default)]
    pub weather: Vec<RawWeather>,
}

/// Per-part-of-day temperatures from the daily block.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawDayTemperatures {
    #[serde(default)]
    pub morn: f64,
    #[serde(default)]
    pub day: f64,
    #[serde(default)]
    pub eve: f64,
    #[serde(default)]
    pub min: f64,
    #[serde(default)]
    pub max: f64,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawDayFeelsLike {
    #[serde(default)]
    pub morn: f64,
    #[serde(default)]
    pub day: f64,
    #[serde(default)]
    pub eve: f64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawWeather {
    pub description: String,
}

/// Rain/snow volume, keyed `"1h"` upstream.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawPrecipitation {
    #[serde(rename = "1h", default)]
    pub one_hour: f64,
}

// ---------------------------------------------------------------------------
// Shaped output.
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Wind {
    /// Wind speed in upstream units (m/s for standard/metric, mph for imperial).
    pub speed: f64,
    /// Wind direction in meteorological degrees.
    pub direction_deg: u16,
}

/// Current conditions at the queried location.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CurrentConditions {
    /// Local time of the observation, per the caller's timezone offset.
    pub time: String,
    pub temperature: f64,
    pub feels_like: f64,
    pub condition: String,
    pub humidity: u8,
    pub wind: Wind,
    /// Rainfall over the last hour, when upstream reports any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rain_mm_per_h: Option<f64>,
    pub clouds: u8,
}

/// A single forecast point: one hourly entry, or one morning/afternoon/evening
/// snapshot of a day.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeatherSnapshot {
    /// Local time, per the caller's timezone offset.
    pub time: String,
    pub temperature: f64,
    pub feels_like: f64,
    pub condition: String,
    pub humidity: u8,
    pub wind: Wind,
    /// Probability of precipitation, 0.0-1.0, verbatim from upstream.
    pub pop: f64,
    pub clouds: u8,
}

/// One day of the shaped forecast.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DailyEntry {
    /// Local calendar date, per the caller's timezone offset.
    pub date: NaiveDate,
    /// Upstream textual summary of the day, empty when not provided.
    pub summary: String,
    /// Probability of precipitation, 0.0-1.0, verbatim from the daily block.
    pub precipitation_probability: f64,
    pub temp_min: f64,
    pub temp_max: f64,
    pub morning: WeatherSnapshot,
    pub afternoon: WeatherSnapshot,
    pub evening: WeatherSnapshot,
}

/// The structure returned to tool callers.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ShapedForecast {
    pub current: CurrentConditions,
    /// At most 48 hourly entries.
    pub hourly: Vec<WeatherSnapshot>,
    /// At most 8 daily entries (today plus seven).
    pub daily: Vec<DailyEntry>,
}
