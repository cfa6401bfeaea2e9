//! Game-list sources: the trait the scoreboard fetches through and its HTTP implementation

use super::fetch_utils::fetch;
use super::http_client::create_http_client_with_timeout;
use super::urls::build_games_url;
use crate::config::Config;
use crate::data_fetcher::models::{Game, GamesResponse, Sport, normalize_games};
use crate::error::AppError;
use chrono::Utc;
use reqwest::Client;
use std::future::Future;
use tracing::{info, warn};

/// Where game lists come from.
///
/// An empty list is a successful answer, not an error.
pub trait GameSource {
    fn fetch_games(&self, sport: Sport) -> impl Future<Output = Result<Vec<Game>, AppError>> + Send;
}

/// Fetches game lists from the configured HTTP API.
#[derive(Debug, Clone)]
pub struct HttpGameSource {
    client: Client,
    api_domain: String,
}

impl HttpGameSource {
    pub fn new(client: Client, api_domain: impl Into<String>) -> Self {
        Self {
            client,
            api_domain: api_domain.into(),
        }
    }

    /// Builds a source with its own client using the configured domain and timeout.
    pub fn from_config(config: &Config) -> Result<Self, AppError> {
        let client = create_http_client_with_timeout(config.http_timeout_seconds)?;
        Ok(Self::new(client, config.api_domain.clone()))
    }

    pub fn api_domain(&self) -> &str {
        &self.api_domain
    }
}

impl GameSource for HttpGameSource {
    async fn fetch_games(&self, sport: Sport) -> Result<Vec<Game>, AppError> {
        let url = build_games_url(&self.api_domain, sport, Utc::now().timestamp_millis());
        let response: GamesResponse = fetch(&self.client, &url).await?;

        if response.error {
            let message = response
                .message
                .unwrap_or_else(|| "API reported an error".to_string());
            warn!("API flagged {sport} response as failed: {message}");
            return Err(AppError::api_reported_error(message, url));
        }

        let raw_count = response.games.len();
        let games = normalize_games(sport, response.games);
        info!(
            "Fetched {} {sport} games ({} rows received)",
            games.len(),
            raw_count
        );
        Ok(games)
    }
}
