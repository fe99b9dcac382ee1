//! Core library for the weather forecast MCP server.
//!
//! This crate defines:
//! - Configuration & API key resolution
//! - Error kinds surfaced to tool callers
//! - Adapters for the upstream geocoding and one-call endpoints
//! - The pure response shaper and the orchestration service
//!
//! It is used by `weather-mcp`, but can also be reused by other binaries or
//! services.

pub mod config;
pub mod error;
pub mod model;
pub mod provider;
pub mod service;
pub mod shape;

pub use config::{API_KEY_ENV, Config, Units};
pub use error::WeatherError;
pub use model::{Coordinates, CurrentConditions, DailyEntry, ShapedForecast, WeatherSnapshot, Wind};
pub use provider::openweather::OpenWeatherClient;
pub use service::{ForecastProvider, WeatherService};
