//! URL building utilities for API endpoints

use crate::constants::weather::UNITS;
use crate::data_fetcher::models::Sport;
use crate::error::AppError;

/// Builds the game-list URL for a sport.
///
/// `cache_buster` is appended as `?t=<value>` so intermediaries never serve a
/// stale list; pass the current epoch millis.
///
/// # Example
/// ```
/// use startpage_scoreboard::data_fetcher::api::build_games_url;
/// use startpage_scoreboard::data_fetcher::models::Sport;
///
/// let url = build_games_url("http://localhost:8080", Sport::Football, 1709323200000);
/// assert_eq!(url, "http://localhost:8080/games/football?t=1709323200000");
/// ```
pub fn build_games_url(api_domain: &str, sport: Sport, cache_buster: i64) -> String {
    format!(
        "{}/games/{}?t={cache_buster}",
        api_domain.trim_end_matches('/'),
        sport.id()
    )
}

/// Builds the current-weather URL for `city` under `api_url`.
///
/// The city is query-encoded, so values like `Houston,US` or `São Paulo` are safe.
pub fn build_weather_url(api_url: &str, city: &str, api_key: &str) -> Result<String, AppError> {
    let endpoint = format!("{}/weather", api_url.trim_end_matches('/'));
    reqwest::Url::parse_with_params(
        &endpoint,
        &[("q", city), ("appid", api_key), ("units", UNITS)],
    )
    .map(String::from)
    .map_err(|e| AppError::config_error(format!("Invalid weather API URL '{api_url}': {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_games_url_trims_trailing_slash() {
        assert_eq!(
            build_games_url("https://scores.example.com/", Sport::Basketball, 1),
            "https://scores.example.com/games/basketball?t=1"
        );
    }

    #[test]
    fn test_build_weather_url_encodes_city() {
        let url = build_weather_url("https://weather.example.com/data/2.5/", "New York,US", "k").unwrap();
        assert_eq!(
            url,
            "https://weather.example.com/data/2.5/weather?q=New+York%2CUS&appid=k&units=imperial"
        );
        assert!(build_weather_url("not a url", "Houston", "k").is_err());
    }
}
