pub mod basketball;
pub mod common;
pub mod football;
pub mod game;
pub mod weather;

pub use basketball::BasketballApiGame;
pub use common::{GamesResponse, WireGame, normalize_rows, score_from_value};
pub use football::FootballApiGame;
pub use game::{Game, GameStatus, LiveProgress, ScheduledAt, Sport, TeamInfo};
pub use weather::{CurrentWeatherResponse, WeatherReport};

use serde_json::Value;

/// Runs the sport's adapter over raw response rows.
pub fn normalize_games(sport: Sport, rows: Vec<Value>) -> Vec<Game> {
    match sport {
        Sport::Basketball => normalize_rows::<BasketballApiGame>(rows),
        Sport::Football => normalize_rows::<FootballApiGame>(rows),
    }
}
