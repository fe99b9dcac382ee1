use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{fs, path::Path, path::PathBuf};

use crate::error::WeatherError;

/// Environment variable consulted when no explicit API key is passed.
pub const API_KEY_ENV: &str = "OPENWEATHER_API_KEY";

const DEFAULT_GEOCODING_URL: &str = "https://api.openweathermap.org";
const DEFAULT_ONECALL_URL: &str = "https://api.openweathermap.org";

/// Unit system forwarded to the upstream API. Values are passed through to
/// the caller unconverted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Units {
    /// Kelvin, metres per second.
    Standard,
    /// Celsius, metres per second.
    #[default]
    Metric,
    /// Fahrenheit, miles per hour.
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

/// Top-level configuration stored on disk.
///
/// Example TOML:
/// ```toml
/// api_key = "..."
/// units = "metric"
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Fallback API key, used when neither the tool parameter nor the
    /// environment variable supplies one.
    pub api_key: Option<String>,

    /// Unit system requested from upstream.
    pub units: Units,

    /// Base URL of the geocoding endpoint.
    pub geocoding_url: String,

    /// Base URL of the one-call endpoint.
    pub onecall_url: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_key: None,
            units: Units::default(),
            geocoding_url: DEFAULT_GEOCODING_URL.to_string(),
            onecall_url: DEFAULT_ONECALL_URL.to_string(),
        }
    }
}

impl Config {
    /// Load config from the platform config directory, or return defaults if
    /// no file exists yet.
    pub fn load() -> Result<Self> {
        let path = Self::config_file_path()?;
        if !path.exists() {
            // First run: no config file, return defaults.
            return Ok(Self::default());
        }

        Self::load_from(&path)
    }

    /// Load config from an explicit path.
    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let cfg: Config = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(cfg)
    }

    /// Path to the config file.
    pub fn config_file_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("dev", "weather-mcp", "weather-mcp")
            .ok_or_else(|| anyhow!("Could not determine platform config directory"))?;

        Ok(dirs.config_dir().join("config.toml"))
    }

    /// Resolve the API key for a single call.
    ///
    /// Order: explicit tool parameter, then the environment variable, then
    /// the config file. Fails with [`WeatherError::MissingApiKey`] before any
    /// network call when all three are absent.
    pub fn resolve_api_key(&self, explicit: Option<&str>) -> Result<String, WeatherError> {
        self.resolve_api_key_with(explicit, std::env::var(API_KEY_ENV).ok().as_deref())
    }

    /// Resolution order with the environment read factored out, so tests can
    /// exercise every branch regardless of the host environment.
    fn resolve_api_key_with(
        &self,
        explicit: Option<&str>,
        env_key: Option<&str>,
    ) -> Result<String, WeatherError> {
        if let Some(key) = explicit.filter(|k| !k.is_empty()) {
            return Ok(key.to_string());
        }

        if let Some(key) = env_key.filter(|k| !k.is_empty()) {
            return Ok(key.to_string());
        }

        self.api_key
            .clone()
            .filter(|k| !k.is_empty())
            .ok_or(WeatherError::MissingApiKey)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn defaults_point_at_openweather() {
        let cfg = Config::default();
        assert_eq!(cfg.units, Units::Metric);
        assert!(cfg.geocoding_url.contains("api.openweathermap.org"));
        assert!(cfg.onecall_url.contains("api.openweathermap.org"));
        assert!(cfg.api_key.is_none());
    }

    #[test]
    fn explicit_key_wins_over_env_and_config_file() {
        let cfg = Config {
            api_key: Some("FILE_KEY".into()),
            ..Config::default()
        };

        let key = cfg
            .resolve_api_key_with(Some("PARAM_KEY"), Some("ENV_KEY"))
            .expect("key must resolve");
        assert_eq!(key, "PARAM_KEY");
    }

    #[test]
    fn env_key_wins_over_config_file_key() {
        let cfg = Config {
            api_key: Some("FILE_KEY".into()),
            ..Config::default()
        };

        let key = cfg
            .resolve_api_key_with(None, Some("ENV_KEY"))
            .expect("key must resolve");
        assert_eq!(key, "ENV_KEY");
    }

    #[test]
    fn config_file_key_is_used_as_last_resort() {
        let cfg = Config {
            api_key: Some("FILE_KEY".into()),
            ..Config::default()
        };

        let key = cfg
            .resolve_api_key_with(None, None)
            .expect("key must resolve");
        assert_eq!(key, "FILE_KEY");
    }

    #[test]
    fn empty_keys_are_ignored_at_every_level() {
        let cfg = Config {
            api_key: Some("FILE_KEY".into()),
            ..Config::default()
        };

        let key = cfg
            .resolve_api_key_with(Some(""), Some(""))
            .expect("key must resolve");
        assert_eq!(key, "FILE_KEY");
    }

    #[test]
    fn missing_everywhere_is_missing_api_key() {
        let cfg = Config::default();

        let err = cfg.resolve_api_key_with(None, None).unwrap_err();
        assert!(matches!(err, WeatherError::MissingApiKey));

        let cfg = Config {
            api_key: Some(String::new()),
            ..Config::default()
        };
        let err = cfg.resolve_api_key_with(None, None).unwrap_err();
        assert!(matches!(err, WeatherError::MissingApiKey));
    }

    #[test]
    fn load_from_parses_partial_toml() {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        writeln!(file, "api_key = \"ABC\"\nunits = \"imperial\"").expect("write");

        let cfg = Config::load_from(file.path()).expect("config must parse");
        assert_eq!(cfg.api_key.as_deref(), Some("ABC"));
        assert_eq!(cfg.units, Units::Imperial);
        // Unspecified fields keep their defaults.
        assert!(cfg.geocoding_url.contains("api.openweathermap.org"));
    }
}
