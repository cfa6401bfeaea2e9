//! Current weather for the header panel

use super::fetch_utils::{fetch, loggable_url};
use super::http_client::create_http_client_with_timeout;
use super::urls::build_weather_url;
use crate::config::Config;
use crate::data_fetcher::models::{CurrentWeatherResponse, WeatherReport};
use crate::error::AppError;
use chrono::Utc;
use reqwest::Client;
use std::future::Future;
use tracing::{debug, info};

pub trait WeatherSource {
    fn fetch_current(&self) -> impl Future<Output = Result<WeatherReport, AppError>> + Send;
}

/// Fetches current conditions from an OpenWeatherMap-compatible API.
#[derive(Clone)]
pub struct HttpWeatherSource {
    client: Client,
    api_url: String,
    api_key: String,
    city: String,
}

impl std::fmt::Debug for HttpWeatherSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpWeatherSource")
            .field("api_url", &self.api_url)
            .field("city", &self.city)
            .finish_non_exhaustive()
    }
}

impl HttpWeatherSource {
    pub fn new(
        client: Client,
        api_url: impl Into<String>,
        api_key: impl Into<String>,
        city: impl Into<String>,
    ) -> Self {
        Self {
            client,
            api_url: api_url.into(),
            api_key: api_key.into(),
            city: city.into(),
        }
    }

    /// `Ok(None)` when no API key or city is configured.
    pub fn from_config(config: &Config) -> Result<Option<Self>, AppError> {
        let Some((api_key, city)) = config.weather_credentials() else {
            info!("Weather panel disabled: no API key or city configured");
            return Ok(None);
        };
        let client = create_http_client_with_timeout(config.http_timeout_seconds)?;
        Ok(Some(Self::new(
            client,
            config.resolved_weather_api_url(),
            api_key,
            city,
        )))
    }

    pub fn city(&self) -> &str {
        &self.city
    }
}

impl WeatherSource for HttpWeatherSource {
    async fn fetch_current(&self) -> Result<WeatherReport, AppError> {
        let url = build_weather_url(&self.api_url, &self.city, &self.api_key)?;
        let response: CurrentWeatherResponse = fetch(&self.client, &url).await?;
        let report = response
            .into_report(Utc::now())
            .ok_or_else(|| {
                AppError::api_unexpected_structure(
                    "Response has no weather condition",
                    loggable_url(&url),
                )
            })?;
        debug!(
            "Weather for {}: {}°F, {} ({})",
            self.city, report.temperature, report.description, report.icon_code
        );
        Ok(report)
    }
}
