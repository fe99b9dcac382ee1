//! Orchestration of the two tool operations: resolve the API key, geocode the
//! location, call the one-call endpoint, shape the result.

use async_trait::async_trait;
use std::fmt::Debug;

use crate::{
    Config,
    error::WeatherError,
    model::{CurrentConditions, ShapedForecast},
    provider::openweather::OpenWeatherClient,
    shape,
};

/// The operations exposed to tool callers. The trait seam lets the server
/// layer be exercised against a stub in tests.
#[async_trait]
pub trait ForecastProvider: Send + Sync + Debug {
    /// Full shaped forecast: current conditions, up to 48 hourly entries and
    /// up to 8 daily entries with morning/afternoon/evening snapshots.
    async fn get_weather(
        &self,
        location: &str,
        api_key: Option<&str>,
        timezone_offset: f64,
    ) -> Result<ShapedForecast, WeatherError>;

    /// Current conditions only.
    async fn get_current_weather(
        &self,
        location: &str,
        api_key: Option<&str>,
        timezone_offset: f64,
    ) -> Result<CurrentConditions, WeatherError>;
}

/// Stateless per-call orchestration over the OpenWeather adapters. Nothing is
/// retained between calls; coordinates are resolved fresh every time.
#[derive(Debug, Clone)]
pub struct WeatherService {
    config: Config,
}

impl WeatherService {
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// Build a client for one call, failing fast (before any network I/O)
    /// when no API key can be resolved.
    fn client_for(&self, api_key: Option<&str>) -> Result<OpenWeatherClient, WeatherError> {
        let key = self.config.resolve_api_key(api_key)?;

        Ok(OpenWeatherClient::new(key, self.config.units).with_base_urls(
            self.config.geocoding_url.clone(),
            self.config.onecall_url.clone(),
        ))
    }
}

#[async_trait]
impl ForecastProvider for WeatherService {
    async fn get_weather(
        &self,
        location: &str,
        api_key: Option<&str>,
        timezone_offset: f64,
    ) -> Result<ShapedForecast, WeatherError> {
        let client = self.client_for(api_key)?;

        let coords = client.geocode(location).await?;
        let raw = client.fetch_forecast(coords).await?;

        tracing::debug!(
            %location,
            hourly = raw.hourly.len(),
            daily = raw.daily.len(),
            "shaping forecast"
        );

        Ok(shape::shape_forecast(&raw, timezone_offset))
    }

    async fn get_current_weather(
        &self,
        location: &str,
        api_key: Option<&str>,
        timezone_offset: f64,
    ) -> Result<CurrentConditions, WeatherError> {
        let client = self.client_for(api_key)?;

        let coords = client.geocode(location).await?;
        let raw = client.fetch_current(coords).await?;

        Ok(shape::shape_current(&raw, timezone_offset))
    }
}
