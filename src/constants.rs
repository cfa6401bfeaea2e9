//! Application-wide constants and configuration values
//!
//! Polling intervals, storage key layout, HTTP tuning and retry delays live here
//! so the scoreboard logic never carries magic numbers.

/// Default timeout for HTTP requests in seconds
pub const DEFAULT_HTTP_TIMEOUT_SECONDS: u64 = 30;

/// Maximum number of idle connections per host in the HTTP client pool
pub const HTTP_POOL_MAX_IDLE_PER_HOST: usize = 10;

/// API domain used when the user does not provide one
pub const DEFAULT_API_DOMAIN: &str = "http://localhost:8080";

/// Message shown in the scoreboard whenever a fetch fails
pub const FETCH_ERROR_MESSAGE: &str = "Unable to load game data. Check API status.";

/// Scoreboard refresh intervals in seconds
pub mod polling {
    /// Interval used when there is no cached data or nothing is live
    pub const DEFAULT_SECONDS: u64 = 300;

    /// Interval while a basketball game is live
    pub const BASKETBALL_LIVE_SECONDS: u64 = 150;

    /// Interval while a football match is live
    pub const FOOTBALL_LIVE_SECONDS: u64 = 30;

    /// Redraw cadence for the header clock (milliseconds)
    pub const CLOCK_TICK_MS: u64 = 1000;

    /// How long the event loop waits for terminal input before checking other work
    pub const INPUT_POLL_MS: u64 = 100;
}

/// Key layout of the persistent key/value store
pub mod storage {
    /// Key holding the identifier of the sport currently shown
    pub const DISPLAYED_SPORT_KEY: &str = "currentScoreboard";

    /// Suffix for the serialized game list of a sport (`<sport>.gameData`)
    pub const GAME_DATA_SUFFIX: &str = "gameData";

    /// Suffix for the fetch timestamp of a sport (`<sport>.gameData.fetchedAt`)
    pub const FETCHED_AT_SUFFIX: &str = "gameData.fetchedAt";

    /// Directory name under the platform data dir
    pub const DATA_DIR_NAME: &str = "startpage_scoreboard";
}

/// Environment variable names
pub mod env_vars {
    /// Environment variable for API domain override
    pub const API_DOMAIN: &str = "STARTPAGE_API_DOMAIN";

    /// Environment variable for log file path override
    pub const LOG_FILE: &str = "STARTPAGE_LOG_FILE";

    /// Environment variable for HTTP timeout override in seconds
    pub const HTTP_TIMEOUT: &str = "STARTPAGE_HTTP_TIMEOUT";

    /// Environment variable for the snapshot store directory
    pub const DATA_DIR: &str = "STARTPAGE_DATA_DIR";

    /// Environment variable for the weather service API key
    pub const WEATHER_API_KEY: &str = "STARTPAGE_WEATHER_API_KEY";

    /// Environment variable for the city the weather is shown for
    pub const WEATHER_CITY: &str = "STARTPAGE_WEATHER_CITY";

    /// Environment variable for the weather service base URL
    pub const WEATHER_API_URL: &str = "STARTPAGE_WEATHER_API_URL";
}

/// Current-weather panel in the header
pub mod weather {
    /// How often the current weather is refetched (30 minutes)
    pub const REFRESH_SECONDS: u64 = 1800;

    /// OpenWeatherMap current-weather API, used when no base URL is configured
    pub const DEFAULT_API_URL: &str = "https://api.openweathermap.org/data/2.5";

    /// Unit system requested from the API; temperatures come back in Fahrenheit
    pub const UNITS: &str = "imperial";

    /// Shown instead of the weather when it cannot be fetched or is not configured
    pub const UNAVAILABLE_MESSAGE: &str = "Weather unavailable";
}

/// Retry configuration
pub mod retry {
    /// Maximum number of retry attempts for API calls
    pub const MAX_ATTEMPTS: u32 = 3;

    /// Base delay for exponential backoff (milliseconds)
    pub const BASE_DELAY_MS: u64 = 250;

    /// Maximum delay between retries (seconds)
    pub const MAX_DELAY_SECONDS: u64 = 30;

    /// Retry delay for rate limit errors (seconds)
    pub const RATE_LIMIT_DELAY_SECONDS: u64 = 60;

    /// Retry delay for server errors (seconds)
    pub const SERVER_ERROR_DELAY_SECONDS: u64 = 5;

    /// Retry delay for service unavailable errors (seconds)
    pub const SERVICE_UNAVAILABLE_DELAY_SECONDS: u64 = 30;

    /// Retry delay for network timeout errors (seconds)
    pub const NETWORK_TIMEOUT_DELAY_SECONDS: u64 = 2;

    /// Retry delay for network connection errors (seconds)
    pub const NETWORK_CONNECTION_DELAY_SECONDS: u64 = 10;
}
