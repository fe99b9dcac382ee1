//! The MCP tool surface: two tools wrapping the core service, returning the
//! shaped forecast as JSON text content, or an error result carrying the
//! descriptive message.

use std::sync::Arc;

use rmcp::{
    ErrorData as McpError, ServerHandler,
    handler::server::{router::tool::ToolRouter, tool::Parameters},
    model::{CallToolResult, Content, ServerCapabilities, ServerInfo},
    schemars, tool, tool_handler, tool_router,
};
use serde::Deserialize;
use weather_core::{ForecastProvider, WeatherError};

/// Parameters shared by both tools.
#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct WeatherParams {
    /// Location name, e.g. "Beijing", "New York", "Tokyo".
    pub location: String,

    /// OpenWeatherMap API key. Optional: falls back to the
    /// OPENWEATHER_API_KEY environment variable, then the config file.
    #[serde(default)]
    pub api_key: Option<String>,

    /// Timezone offset in hours from UTC, e.g. 8 for Beijing, -4 for New
    /// York. Defaults to 0 (UTC). Used to bucket forecast data into local
    /// morning/afternoon/evening snapshots.
    #[serde(default)]
    pub timezone_offset: f64,
}

#[derive(Clone)]
pub struct WeatherServer {
    provider: Arc<dyn ForecastProvider>,
    tool_router: ToolRouter<Self>,
}

#[tool_router]
impl WeatherServer {
    pub fn new(provider: Arc<dyn ForecastProvider>) -> Self {
        Self {
            provider,
            tool_router: Self::tool_router(),
        }
    }

    #[tool(
        description = "Get comprehensive weather data for a location: current conditions plus hourly entries and an 8-day forecast with morning, afternoon and evening snapshots for each day"
    )]
    async fn get_weather(
        &self,
        Parameters(params): Parameters<WeatherParams>,
    ) -> Result<CallToolResult, McpError> {
        tracing::debug!(location = %params.location, "get_weather called");

        match self
            .provider
            .get_weather(
                &params.location,
                params.api_key.as_deref(),
                params.timezone_offset,
            )
            .await
        {
            Ok(forecast) => json_result(&forecast),
            Err(err) => Ok(domain_error("get_weather", &err)),
        }
    }

    #[tool(description = "Get current weather for a specified location")]
    async fn get_current_weather(
        &self,
        Parameters(params): Parameters<WeatherParams>,
    ) -> Result<CallToolResult, McpError> {
        tracing::debug!(location = %params.location, "get_current_weather called");

        match self
            .provider
            .get_current_weather(
                &params.location,
                params.api_key.as_deref(),
                params.timezone_offset,
            )
            .await
        {
            Ok(current) => json_result(&current),
            Err(err) => Ok(domain_error("get_current_weather", &err)),
        }
    }
}

#[tool_handler]
impl ServerHandler for WeatherServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            instructions: Some(
                "Provides global weather forecasts and current weather conditions. \
                 Pass a location name, an optional OpenWeatherMap API key and an \
                 optional timezone offset in hours."
                    .to_string(),
            ),
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            ..Default::default()
        }
    }
}

fn json_result<T: serde::Serialize>(value: &T) -> Result<CallToolResult, McpError> {
    let body = serde_json::to_string_pretty(value)
        .map_err(|e| McpError::internal_error(e.to_string(), None))?;

    Ok(CallToolResult::success(vec![Content::text(body)]))
}

/// Domain failures are reported as error results, not protocol errors, so the
/// calling agent sees the message.
fn domain_error(tool: &str, err: &WeatherError) -> CallToolResult {
    tracing::warn!(%tool, error = %err, "tool call failed");
    CallToolResult::error(vec![Content::text(err.to_string())])
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use chrono::NaiveDate;
    use weather_core::{CurrentConditions, DailyEntry, ShapedForecast, WeatherSnapshot, Wind};

    #[derive(Debug)]
    struct StubProvider {
        missing_key: bool,
    }

    fn snapshot(time: &str, temperature: f64) -> WeatherSnapshot {
        WeatherSnapshot {
            time: time.to_string(),
            temperature,
            feels_like: temperature - 0.5,
            condition: "clear sky".to_string(),
            humidity: 50,
            wind: Wind {
                speed: 2.0,
                direction_deg: 90,
            },
            pop: 0.1,
            clouds: 5,
        }
    }

    fn sample_current() -> CurrentConditions {
        CurrentConditions {
            time: "2024-06-01 12:00:00".to_string(),
            temperature: 20.0,
            feels_like: 19.5,
            condition: "clear sky".to_string(),
            humidity: 45,
            wind: Wind {
                speed: 3.0,
                direction_deg: 180,
            },
            rain_mm_per_h: None,
            clouds: 0,
        }
    }

    fn sample_forecast() -> ShapedForecast {
        ShapedForecast {
            current: sample_current(),
            hourly: vec![snapshot("2024-06-01 13:00:00", 21.0)],
            daily: vec![DailyEntry {
                date: NaiveDate::from_ymd_opt(2024, 6, 1).expect("valid date"),
                summary: "Sunny".to_string(),
                precipitation_probability: 0.05,
                temp_min: 12.0,
                temp_max: 24.0,
                morning: snapshot("2024-06-01 09:00:00", 15.0),
                afternoon: snapshot("2024-06-01 15:00:00", 23.0),
                evening: snapshot("2024-06-01 20:00:00", 18.0),
            }],
        }
    }

    #[async_trait]
    impl ForecastProvider for StubProvider {
        async fn get_weather(
            &self,
            _location: &str,
            _api_key: Option<&str>,
            _timezone_offset: f64,
        ) -> Result<ShapedForecast, WeatherError> {
            if self.missing_key {
                return Err(WeatherError::MissingApiKey);
            }
            Ok(sample_forecast())
        }

        async fn get_current_weather(
            &self,
            _location: &str,
            _api_key: Option<&str>,
            _timezone_offset: f64,
        ) -> Result<CurrentConditions, WeatherError> {
            if self.missing_key {
                return Err(WeatherError::MissingApiKey);
            }
            Ok(sample_current())
        }
    }

    fn params(location: &str) -> Parameters<WeatherParams> {
        Parameters(WeatherParams {
            location: location.to_string(),
            api_key: None,
            timezone_offset: 0.0,
        })
    }

    fn result_text(result: &CallToolResult) -> String {
        // Go through the serialized form to stay independent of the content
        // enum's accessors.
        let value = serde_json::to_value(result).expect("result serializes");
        value["content"][0]["text"]
            .as_str()
            .unwrap_or_default()
            .to_string()
    }

    #[tokio::test]
    async fn get_weather_returns_shaped_json() {
        let server = WeatherServer::new(Arc::new(StubProvider { missing_key: false }));

        let result = server
            .get_weather(params("Kyiv"))
            .await
            .expect("tool call succeeds");

        assert_ne!(result.is_error, Some(true));
        let text = result_text(&result);
        let parsed: serde_json::Value = serde_json::from_str(&text).expect("payload is JSON");
        assert_eq!(parsed["current"]["temperature"], 20.0);
        assert_eq!(parsed["daily"][0]["afternoon"]["temperature"], 23.0);
        assert_eq!(parsed["daily"][0]["precipitation_probability"], 0.05);
    }

    #[tokio::test]
    async fn get_current_weather_returns_current_only() {
        let server = WeatherServer::new(Arc::new(StubProvider { missing_key: false }));

        let result = server
            .get_current_weather(params("Kyiv"))
            .await
            .expect("tool call succeeds");

        let text = result_text(&result);
        let parsed: serde_json::Value = serde_json::from_str(&text).expect("payload is JSON");
        assert_eq!(parsed["temperature"], 20.0);
        assert!(parsed.get("daily").is_none());
    }

    #[tokio::test]
    async fn domain_errors_become_error_results_with_message() {
        let server = WeatherServer::new(Arc::new(StubProvider { missing_key: true }));

        let result = server
            .get_weather(params("Kyiv"))
            .await
            .expect("domain errors are not protocol errors");

        assert_eq!(result.is_error, Some(true));
        assert!(result_text(&result).contains("OPENWEATHER_API_KEY"));
    }
}
