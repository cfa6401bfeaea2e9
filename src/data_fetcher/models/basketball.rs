use super::common::{WireGame, id_from_value, score_from_value};
use super::game::{Game, GameStatus, LiveProgress, Sport, TeamInfo};
use crate::data_fetcher::processors::parse_scheduled_at;
use crate::error::AppError;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::info;

/// Basketball row as served by `/games/basketball`.
///
/// `game_status` is 1 (scheduled), 2 (in progress) or 3 (final). Scores are
/// numbers once known and a dash placeholder before tip-off.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BasketballApiGame {
    #[serde(default)]
    pub game_id: Value,
    pub game_date: String,
    #[serde(default)]
    pub game_status: Option<u8>,
    #[serde(default)]
    pub game_status_text: String,
    #[serde(default)]
    pub period: Option<u32>,
    #[serde(default)]
    pub game_clock: Option<String>,
    pub home_team: String,
    #[serde(default)]
    pub home_team_city: Option<String>,
    pub visitor_team: String,
    #[serde(default)]
    pub visitor_team_city: Option<String>,
    #[serde(default)]
    pub home_team_score: Value,
    #[serde(default)]
    pub visitor_team_score: Value,
    #[serde(default, alias = "is_rockets_home")]
    pub is_home: Option<bool>,
}

impl BasketballApiGame {
    /// Maps the numeric status, promoting any game whose text mentions a
    /// quarter to live since the upstream code lags behind its text.
    pub fn normalized_status(&self) -> GameStatus {
        if self.game_status_text.contains("Qtr") {
            if self.game_status != Some(2) {
                info!(
                    "Game {} reports '{}' with status {:?}, treating as live",
                    id_from_value(&self.game_id),
                    self.game_status_text,
                    self.game_status
                );
            }
            return GameStatus::Live;
        }

        match self.game_status {
            Some(2) => GameStatus::Live,
            Some(3) => GameStatus::Completed,
            _ => GameStatus::Scheduled,
        }
    }
}

fn team(abbreviation: &str, city: Option<&str>) -> TeamInfo {
    let name = match city.map(str::trim) {
        Some(city) if !city.is_empty() => format!("{city} {abbreviation}"),
        _ => abbreviation.to_string(),
    };
    TeamInfo::new(abbreviation, name)
}

impl WireGame for BasketballApiGame {
    fn into_game(self) -> Result<Game, AppError> {
        let status = self.normalized_status();
        let scheduled = parse_scheduled_at(&self.game_date)?;

        Ok(Game {
            id: id_from_value(&self.game_id),
            sport: Sport::Basketball,
            home: team(&self.home_team, self.home_team_city.as_deref()),
            away: team(&self.visitor_team, self.visitor_team_city.as_deref()),
            home_score: score_from_value(&self.home_team_score),
            away_score: score_from_value(&self.visitor_team_score),
            status,
            scheduled,
            progress: LiveProgress::Basketball {
                period: self.period.filter(|p| *p > 0),
                clock: self.game_clock.filter(|c| !c.trim().is_empty()),
                status_text: self.game_status_text,
            },
            focus_is_home: self.is_home,
        })
    }
}
