mod fetch_utils;
pub mod game_api;
pub mod http_client;
pub mod urls;
pub mod weather_api;

pub use game_api::{GameSource, HttpGameSource};
pub use http_client::create_http_client_with_timeout;
pub use urls::{build_games_url, build_weather_url};
pub use weather_api::{HttpWeatherSource, WeatherSource};
