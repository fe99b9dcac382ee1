//! HTTP adapters for the OpenWeatherMap Geocoding and One Call 3.0 endpoints.
//!
//! Both adapters are single-shot: no retries, no backoff, no caching. Errors
//! map onto [`WeatherError`] kinds and propagate straight to the caller.

use reqwest::Client;
use serde::Deserialize;

use crate::{
    config::Units,
    error::WeatherError,
    model::{Coordinates, RawCurrent, RawCurrentOnly, RawForecast},
};

use super::classify_status;

const GEOCODING_PATH: &str = "/geo/1.0/direct";
const ONECALL_PATH: &str = "/data/3.0/onecall";

/// Blocks we never ask the one-call endpoint for.
const EXCLUDE_FORECAST: &str = "minutely,alerts";
const EXCLUDE_CURRENT_ONLY: &str = "minutely,hourly,daily,alerts";

#[derive(Debug, Clone)]
pub struct OpenWeatherClient {
    http: Client,
    api_key: String,
    units: Units,
    geocoding_base: String,
    onecall_base: String,
}

#[derive(Debug, Deserialize)]
struct GeocodeMatch {
    lat: f64,
    lon: f64,
}

impl OpenWeatherClient {
    pub fn new(api_key: String, units: Units) -> Self {
        Self {
            http: Client::new(),
            api_key,
            units,
            geocoding_base: "https://api.openweathermap.org".to_string(),
            onecall_base: "https://api.openweathermap.org".to_string(),
        }
    }

    /// Override the upstream base URLs; configuration and tests use this.
    #[must_use]
    pub fn with_base_urls(mut self, geocoding_base: String, onecall_base: String) -> Self {
        self.geocoding_base = geocoding_base;
        self.onecall_base = onecall_base;
        self
    }

    /// Resolve a free-text location to coordinates, taking the first match.
    pub async fn geocode(&self, location: &str) -> Result<Coordinates, WeatherError> {
        let query = location.trim();
        if query.is_empty() {
            return Err(WeatherError::LocationNotFound(location.to_string()));
        }

        let url = format!("{}{GEOCODING_PATH}", self.geocoding_base);
        let body = self
            .request(&url, &[("q", query), ("limit", "1"), ("appid", self.api_key.as_str())])
            .await?;

        let matches: Vec<GeocodeMatch> = serde_json::from_str(&body)
            .map_err(|e| WeatherError::Malformed(format!("geocoding response: {e}")))?;

        match matches.first() {
            Some(m) => {
                tracing::debug!(lat = m.lat, lon = m.lon, %query, "resolved location");
                Ok(Coordinates { lat: m.lat, lon: m.lon })
            }
            None => Err(WeatherError::LocationNotFound(query.to_string())),
        }
    }

    /// Fetch current + hourly + daily blocks for the given coordinates.
    pub async fn fetch_forecast(&self, coords: Coordinates) -> Result<RawForecast, WeatherError> {
        let body = self.onecall(coords, EXCLUDE_FORECAST).await?;

        serde_json::from_str(&body)
            .map_err(|e| WeatherError::Malformed(format!("one-call response: {e}")))
    }

    /// Fetch only the current block; the hourly and daily blocks are excluded
    /// upstream rather than discarded here.
    pub async fn fetch_current(&self, coords: Coordinates) -> Result<RawCurrent, WeatherError> {
        let body = self.onecall(coords, EXCLUDE_CURRENT_ONLY).await?;

        let parsed: RawCurrentOnly = serde_json::from_str(&body)
            .map_err(|e| WeatherError::Malformed(format!("one-call response: {e}")))?;

        Ok(parsed.current)
    }

    async fn onecall(&self, coords: Coordinates, exclude: &str) -> Result<String, WeatherError> {
        let url = format!("{}{ONECALL_PATH}", self.onecall_base);
        let lat = coords.lat.to_string();
        let lon = coords.lon.to_string();

        self.request(
            &url,
            &[
                ("lat", lat.as_str()),
                ("lon", lon.as_str()),
                ("appid", &self.api_key),
                ("units", self.units.as_str()),
                ("exclude", exclude),
            ],
        )
        .await
    }

    /// Single GET with status mapping; returns the body on 2xx.
    async fn request(&self, url: &str, query: &[(&str, &str)]) -> Result<String, WeatherError> {
        let res = self.http.get(url).query(query).send().await.map_err(|e| {
            tracing::warn!(%url, error = %e, "upstream request failed");
            WeatherError::Unavailable(e.to_string())
        })?;

        let status = res.status();
        let body = res
            .text()
            .await
            .map_err(|e| WeatherError::Unavailable(format!("failed to read response body: {e}")))?;

        if !status.is_success() {
            tracing::warn!(%url, %status, "upstream returned error status");
            return Err(classify_status(status, &body));
        }

        tracing::debug!(%url, bytes = body.len(), "upstream response received");
        Ok(body)
    }
}
