use crate::constants::{DEFAULT_HTTP_TIMEOUT_SECONDS, env_vars};
use crate::error::AppError;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tokio::fs;
use tokio::io::AsyncWriteExt;

pub mod paths;
pub mod user_prompts;
pub mod validation;

use paths::{get_config_path, get_data_dir_path, get_log_dir_path};
use user_prompts::prompt_for_api_domain;
use validation::{normalize_api_domain, validate_config, validate_weather};

/// Configuration structure for the application.
/// Handles loading, saving, and managing application settings.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Config {
    /// Base URL of the game-data API, e.g. `http://localhost:8080`.
    pub api_domain: String,
    /// Path to the log file. If not specified, logs will be written to a default location.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub log_file_path: Option<String>,
    /// HTTP timeout in seconds for API requests. Defaults to 30 seconds if not specified.
    #[serde(default = "default_http_timeout")]
    pub http_timeout_seconds: u64,
    /// Directory holding the persisted scoreboard snapshots.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_dir: Option<String>,
    /// Weather service API key. The weather panel stays blank without it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weather_api_key: Option<String>,
    /// City passed to the weather service, e.g. `Houston,US`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weather_city: Option<String>,
    /// Base URL of the weather service; defaults to OpenWeatherMap.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weather_api_url: Option<String>,
}

/// Default HTTP timeout in seconds
fn default_http_timeout() -> u64 {
    DEFAULT_HTTP_TIMEOUT_SECONDS
}

impl Default for Config {
    fn default() -> Self {
        Config {
            api_domain: crate::constants::DEFAULT_API_DOMAIN.to_string(),
            log_file_path: None,
            http_timeout_seconds: default_http_timeout(),
            data_dir: None,
            weather_api_key: None,
            weather_city: None,
            weather_api_url: None,
        }
    }
}

impl Config {
    /// Loads configuration from the default config file location.
    /// If no config file exists, prompts user for API domain and creates one.
    /// Environment variables can override config file values.
    ///
    /// # Environment Variables
    /// - `STARTPAGE_API_DOMAIN` - Override API domain
    /// - `STARTPAGE_LOG_FILE` - Override log file path
    /// - `STARTPAGE_HTTP_TIMEOUT` - Override HTTP timeout in seconds (default: 30)
    /// - `STARTPAGE_DATA_DIR` - Override the snapshot store directory
    /// - `STARTPAGE_WEATHER_API_KEY`, `STARTPAGE_WEATHER_CITY`,
    ///   `STARTPAGE_WEATHER_API_URL` - Weather panel settings
    pub async fn load() -> Result<Self, AppError> {
        let config_path = get_config_path();

        let mut config = if Path::new(&config_path).exists() {
            let content = fs::read_to_string(&config_path).await?;
            toml::from_str(&content)?
        } else if std::env::var(env_vars::API_DOMAIN).is_ok() {
            // Domain comes from the environment below, nothing to ask
            Config::default()
        } else {
            let api_domain = prompt_for_api_domain().await?;
            let config = Config {
                api_domain,
                ..Config::default()
            };
            config.save().await?;
            config
        };

        config.apply_env_overrides();
        config.validate()?;

        Ok(config)
    }

    /// Applies `STARTPAGE_*` environment overrides on top of file values.
    ///
    /// Unparseable timeout values are ignored.
    pub fn apply_env_overrides(&mut self) {
        if let Ok(api_domain) = std::env::var(env_vars::API_DOMAIN) {
            self.api_domain = api_domain;
        }

        if let Ok(log_file_path) = std::env::var(env_vars::LOG_FILE) {
            self.log_file_path = Some(log_file_path);
        }

        if let Some(timeout) = std::env::var(env_vars::HTTP_TIMEOUT)
            .ok()
            .and_then(|s| s.parse::<u64>().ok())
        {
            self.http_timeout_seconds = timeout;
        }

        if let Ok(data_dir) = std::env::var(env_vars::DATA_DIR) {
            self.data_dir = Some(data_dir);
        }

        if let Ok(api_key) = std::env::var(env_vars::WEATHER_API_KEY) {
            self.weather_api_key = Some(api_key);
        }

        if let Ok(city) = std::env::var(env_vars::WEATHER_CITY) {
            self.weather_city = Some(city);
        }

        if let Ok(url) = std::env::var(env_vars::WEATHER_API_URL) {
            self.weather_api_url = Some(url);
        }
    }

    /// Validates the configuration settings
    pub fn validate(&self) -> Result<(), AppError> {
        validate_config(
            &self.api_domain,
            &self.log_file_path,
            self.http_timeout_seconds,
        )?;
        validate_weather(&self.weather_city, &self.weather_api_url)
    }

    /// API key and city for the weather panel, when both are set.
    pub fn weather_credentials(&self) -> Option<(&str, &str)> {
        let api_key = self.weather_api_key.as_deref().map(str::trim)?;
        let city = self.weather_city.as_deref().map(str::trim)?;
        (!api_key.is_empty() && !city.is_empty()).then_some((api_key, city))
    }

    /// Weather service base URL: the configured one, else OpenWeatherMap.
    pub fn resolved_weather_api_url(&self) -> &str {
        self.weather_api_url
            .as_deref()
            .unwrap_or(crate::constants::weather::DEFAULT_API_URL)
    }

    /// Saves current configuration to the default config file location.
    pub async fn save(&self) -> Result<(), AppError> {
        let config_path = get_config_path();
        self.save_to_path(&config_path).await
    }

    /// Returns the platform-specific path for the config file.
    pub fn get_config_path() -> String {
        paths::get_config_path()
    }

    /// Returns the platform-specific path for the log directory.
    pub fn get_log_dir_path() -> String {
        paths::get_log_dir_path()
    }

    /// Directory for the snapshot store: the configured one, else the platform default.
    pub fn resolved_data_dir(&self) -> String {
        self.data_dir.clone().unwrap_or_else(get_data_dir_path)
    }

    /// Displays current configuration settings to stdout.
    ///
    /// Handles the case when no config file exists.
    pub async fn display() -> Result<(), AppError> {
        let config_path = get_config_path();
        let log_dir = get_log_dir_path();

        if Path::new(&config_path).exists() {
            let config = Config::load().await?;
            println!("\nCurrent Configuration");
            println!("────────────────────────────────────");
            println!("Config Location:");
            println!("{config_path}");
            println!("────────────────────────────────────");
            println!("API Domain:");
            println!("{}", config.api_domain);
            println!("────────────────────────────────────");
            println!("HTTP Timeout:");
            println!("{} seconds", config.http_timeout_seconds);
            println!("────────────────────────────────────");
            println!("Snapshot Store:");
            println!("{}", config.resolved_data_dir());
            println!("────────────────────────────────────");
            println!("Weather:");
            match config.weather_credentials() {
                Some((_, city)) => println!("{city} via {}", config.resolved_weather_api_url()),
                None => println!("(not configured)"),
            }
            println!("────────────────────────────────────");
            println!("Log File Location:");
            if let Some(custom_path) = &config.log_file_path {
                println!("{custom_path}");
            } else {
                println!("{log_dir}/startpage_scoreboard.log");
                println!("(Default location)");
            }
        } else {
            println!("\nNo configuration file found at:");
            println!("{config_path}");
        }

        Ok(())
    }

    /// Saves configuration to a custom file path.
    ///
    /// Creates the parent directory if it doesn't exist and normalizes the API
    /// domain so it always carries a scheme.
    ///
    /// # Errors
    /// * `AppError::Config` - If the provided path has no parent directory
    /// * `AppError::Io` - If there's an I/O error creating directories or writing the file
    /// * `AppError::TomlSerialize` - If there's an error serializing the configuration
    pub async fn save_to_path(&self, path: &str) -> Result<(), AppError> {
        let config_dir = Path::new(path).parent().ok_or_else(|| {
            AppError::config_error(format!("Path '{path}' has no parent directory"))
        })?;

        if !config_dir.exists() {
            fs::create_dir_all(config_dir).await?;
        }

        let content = toml::to_string_pretty(&Config {
            api_domain: normalize_api_domain(&self.api_domain),
            ..self.clone()
        })?;
        let mut file = fs::File::create(path).await?;
        file.write_all(content.as_bytes()).await?;
        file.flush().await?;
        Ok(())
    }

    /// Loads configuration from a custom file path without environment overrides.
    pub async fn load_from_path(path: &str) -> Result<Self, AppError> {
        let content = fs::read_to_string(path).await?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use tempfile::tempdir;

    #[tokio::test]
    async fn test_config_load_existing_file() {
        let temp_dir = tempdir().unwrap();
        let config_path = temp_dir.path().join("config.toml");
        let config_path_str = config_path.to_string_lossy();

        let config_content = r#"
api_domain = "http://localhost:8080"
log_file_path = "/custom/log/path"
data_dir = "/custom/store"
"#;
        tokio::fs::write(&config_path, config_content)
            .await
            .unwrap();

        let config = Config::load_from_path(&config_path_str).await.unwrap();

        assert_eq!(config.api_domain, "http://localhost:8080");
        assert_eq!(config.log_file_path, Some("/custom/log/path".to_string()));
        assert_eq!(config.data_dir, Some("/custom/store".to_string()));
        assert_eq!(config.http_timeout_seconds, DEFAULT_HTTP_TIMEOUT_SECONDS);
    }

    #[tokio::test]
    async fn test_config_save_normalizes_domain() {
        let temp_dir = tempdir().unwrap();
        let config_path = temp_dir.path().join("nested").join("config.toml");
        let config_path_str = config_path.to_string_lossy();
        let config = Config {
            api_domain: "scores.example.com/".to_string(),
            ..Config::default()
        };
        config.save_to_path(&config_path_str).await.unwrap();

        let loaded = Config::load_from_path(&config_path_str).await.unwrap();
        assert_eq!(loaded.api_domain, "https://scores.example.com");
        assert_eq!(loaded.log_file_path, None);
    }

    #[tokio::test]
    async fn test_config_save_keeps_plain_http_for_localhost() {
        let temp_dir = tempdir().unwrap();
        let config_path = temp_dir.path().join("config.toml");
        let config_path_str = config_path.to_string_lossy();
        let config = Config {
            api_domain: "localhost:8080".to_string(),
            ..Config::default()
        };
        config.save_to_path(&config_path_str).await.unwrap();

        let loaded = Config::load_from_path(&config_path_str).await.unwrap();
        assert_eq!(loaded.api_domain, "http://localhost:8080");
    }

    #[tokio::test]
    async fn test_config_save_and_load_roundtrip() {
        let temp_dir = tempdir().unwrap();
        let config_path = temp_dir.path().join("config.toml");
        let config_path_str = config_path.to_string_lossy();
        let original = Config {
            api_domain: "https://scores.example.com".to_string(),
            log_file_path: Some("/custom/log/path".to_string()),
            http_timeout_seconds: 12,
            data_dir: Some("/tmp/store".to_string()),
            weather_api_key: Some("abc123".to_string()),
            weather_city: Some("Houston,US".to_string()),
            weather_api_url: None,
        };
        original.save_to_path(&config_path_str).await.unwrap();
        let loaded = Config::load_from_path(&config_path_str).await.unwrap();
        assert_eq!(loaded, original);
    }

    #[tokio::test]
    async fn test_config_malformed_toml_file() {
        let temp_dir = tempdir().unwrap();
        let config_path = temp_dir.path().join("config.toml");
        tokio::fs::write(&config_path, "api_domain = [unterminated")
            .await
            .unwrap();

        let result = Config::load_from_path(&config_path.to_string_lossy()).await;
        assert!(matches!(result.unwrap_err(), AppError::TomlDeserialize(_)));
    }

    #[tokio::test]
    async fn test_config_missing_required_field() {
        let temp_dir = tempdir().unwrap();
        let config_path = temp_dir.path().join("config.toml");
        tokio::fs::write(&config_path, "http_timeout_seconds = 10\n")
            .await
            .unwrap();

        let result = Config::load_from_path(&config_path.to_string_lossy()).await;
        assert!(matches!(result.unwrap_err(), AppError::TomlDeserialize(_)));
    }

    #[tokio::test]
    async fn test_config_load_from_nonexistent_path() {
        let result = Config::load_from_path("/definitely/not/here/config.toml").await;
        assert!(matches!(result.unwrap_err(), AppError::Io(_)));
    }

    #[test]
    fn test_optional_fields_are_skipped_when_none() {
        let toml_string = toml::to_string(&Config::default()).unwrap();
        assert!(!toml_string.contains("log_file_path"));
        assert!(!toml_string.contains("data_dir"));
        assert!(!toml_string.contains("weather"));
        assert!(toml_string.contains("http_timeout_seconds"));
    }

    #[test]
    fn test_config_validation_valid_configs() {
        let configs = [
            "http://localhost:8080",
            "https://scores.example.com",
            "scores.example.com",
        ];
        for api_domain in configs {
            let config = Config {
                api_domain: api_domain.to_string(),
                ..Config::default()
            };
            assert!(config.validate().is_ok(), "{api_domain} should be valid");
        }
    }

    #[test]
    fn test_config_validation_invalid_configs() {
        let empty = Config {
            api_domain: String::new(),
            ..Config::default()
        };
        assert!(empty.validate().is_err());

        let not_a_host = Config {
            api_domain: "scoreboard".to_string(),
            ..Config::default()
        };
        assert!(not_a_host.validate().is_err());

        let empty_log = Config {
            log_file_path: Some(String::new()),
            ..Config::default()
        };
        assert!(empty_log.validate().is_err());
    }

    #[test]
    fn test_resolved_data_dir_prefers_configured_value() {
        let config = Config {
            data_dir: Some("/srv/scoreboard".to_string()),
            ..Config::default()
        };
        assert_eq!(config.resolved_data_dir(), "/srv/scoreboard");

        let fallback = Config::default().resolved_data_dir();
        assert!(fallback.contains("startpage_scoreboard"));
    }

    #[test]
    fn test_weather_credentials_need_key_and_city() {
        assert_eq!(Config::default().weather_credentials(), None);

        let key_only = Config {
            weather_api_key: Some("abc".to_string()),
            ..Config::default()
        };
        assert_eq!(key_only.weather_credentials(), None);

        let blank_city = Config {
            weather_city: Some("  ".to_string()),
            ..key_only.clone()
        };
        assert_eq!(blank_city.weather_credentials(), None);

        let complete = Config {
            weather_city: Some("Houston,US".to_string()),
            ..key_only
        };
        assert_eq!(complete.weather_credentials(), Some(("abc", "Houston,US")));
        assert_eq!(
            complete.resolved_weather_api_url(),
            crate::constants::weather::DEFAULT_API_URL
        );
    }

    #[test]
    fn test_weather_validation() {
        let bad_url = Config {
            weather_api_url: Some("ftp://weather.example.com".to_string()),
            ..Config::default()
        };
        assert!(bad_url.validate().is_err());

        let empty_city = Config {
            weather_city: Some(String::new()),
            ..Config::default()
        };
        assert!(empty_city.validate().is_err());
    }

    #[test]
    #[serial]
    fn test_environment_variable_override() {
        unsafe {
            std::env::set_var(env_vars::API_DOMAIN, "https://env.example.com");
            std::env::set_var(env_vars::LOG_FILE, "/env/log/path.log");
            std::env::set_var(env_vars::HTTP_TIMEOUT, "7");
            std::env::set_var(env_vars::DATA_DIR, "/env/store");
            std::env::set_var(env_vars::WEATHER_API_KEY, "env-key");
            std::env::set_var(env_vars::WEATHER_CITY, "Austin,US");
        }

        let mut config = Config::default();
        config.apply_env_overrides();

        unsafe {
            std::env::remove_var(env_vars::API_DOMAIN);
            std::env::remove_var(env_vars::LOG_FILE);
            std::env::remove_var(env_vars::HTTP_TIMEOUT);
            std::env::remove_var(env_vars::DATA_DIR);
            std::env::remove_var(env_vars::WEATHER_API_KEY);
            std::env::remove_var(env_vars::WEATHER_CITY);
        }

        assert_eq!(config.api_domain, "https://env.example.com");
        assert_eq!(config.log_file_path, Some("/env/log/path.log".to_string()));
        assert_eq!(config.http_timeout_seconds, 7);
        assert_eq!(config.data_dir, Some("/env/store".to_string()));
        assert_eq!(config.weather_credentials(), Some(("env-key", "Austin,US")));
    }

    #[test]
    #[serial]
    fn test_unparseable_timeout_override_is_ignored() {
        unsafe {
            std::env::set_var(env_vars::HTTP_TIMEOUT, "soon");
        }

        let mut config = Config::default();
        config.apply_env_overrides();

        unsafe {
            std::env::remove_var(env_vars::HTTP_TIMEOUT);
        }

        assert_eq!(config.http_timeout_seconds, DEFAULT_HTTP_TIMEOUT_SECONDS);
    }
}
