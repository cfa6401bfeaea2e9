use super::common::{WireGame, id_from_value, score_from_value};
use super::game::{Game, GameStatus, LiveProgress, Sport, TeamInfo};
use crate::data_fetcher::processors::parse_scheduled_at;
use crate::error::AppError;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Football row as served by `/games/football`.
///
/// `status_state` is `pre`, `in` or `post`; scores are null until kick-off.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FootballApiGame {
    #[serde(default)]
    pub game_id: Value,
    pub game_date: String,
    #[serde(default)]
    pub status_state: String,
    #[serde(default)]
    pub status_desc: String,
    #[serde(default)]
    pub display_clock: Option<String>,
    pub home_team: String,
    #[serde(default)]
    pub home_team_name: Option<String>,
    pub away_team: String,
    #[serde(default)]
    pub away_team_name: Option<String>,
    #[serde(default)]
    pub home_score: Value,
    #[serde(default)]
    pub away_score: Value,
    #[serde(default)]
    pub home_position: Option<u32>,
    #[serde(default)]
    pub away_position: Option<u32>,
    #[serde(default, alias = "is_arsenal_home")]
    pub is_home: Option<bool>,
}

impl FootballApiGame {
    pub fn normalized_status(&self) -> GameStatus {
        match self.status_state.as_str() {
            "in" => GameStatus::Live,
            "post" => GameStatus::Completed,
            _ => GameStatus::Scheduled,
        }
    }
}

fn team(abbreviation: String, name: Option<String>, rank: Option<u32>) -> TeamInfo {
    let name = name
        .filter(|n| !n.trim().is_empty())
        .unwrap_or_else(|| abbreviation.clone());
    TeamInfo {
        abbreviation,
        name,
        rank: rank.filter(|r| *r > 0),
    }
}

impl WireGame for FootballApiGame {
    fn into_game(self) -> Result<Game, AppError> {
        let status = self.normalized_status();
        let scheduled = parse_scheduled_at(&self.game_date)?;

        Ok(Game {
            id: id_from_value(&self.game_id),
            sport: Sport::Football,
            home: team(self.home_team, self.home_team_name, self.home_position),
            away: team(self.away_team, self.away_team_name, self.away_position),
            home_score: score_from_value(&self.home_score),
            away_score: score_from_value(&self.away_score),
            status,
            scheduled,
            progress: LiveProgress::Football {
                display_clock: self.display_clock.filter(|c| !c.trim().is_empty()),
                status_description: self.status_desc,
            },
            focus_is_home: self.is_home,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use crate::data_fetcher::models::ScheduledAt;
    use serde_json::json;

    #[test]
    fn test_live_match_normalizes() {
        let row: FootballApiGame = serde_json::from_value(json!({
            "game_id": "704512",
            "game_date": "2024-03-01T15:00Z",
            "status_state": "in",
            "status_id": "2",
            "status_desc": "Second Half",
            "is_arsenal_home": false,
            "home_team": "BRE",
            "home_team_name": "Brentford",
            "home_score": 1.0,
            "home_position": 15,
            "away_team": "ARS",
            "away_team_name": "Arsenal",
            "away_score": 2.0,
            "away_position": 2,
            "display_clock": "67'",
            "period": 2
        }))
        .unwrap();

        let game = row.into_game().unwrap();
        assert_eq!(game.status, GameStatus::Live);
        assert_eq!(game.home_score, Some(1));
        assert_eq!(game.away_score, Some(2));
        assert_eq!(game.home.rank, Some(15));
        assert_eq!(game.away.name, "Arsenal");
        assert_eq!(game.focus_is_home, Some(false));
        assert_eq!(
            game.scheduled,
            ScheduledAt::Instant(Utc.with_ymd_and_hms(2024, 3, 1, 15, 0, 0).unwrap())
        );
        assert_eq!(
            game.progress,
            LiveProgress::Football {
                display_clock: Some("67'".to_string()),
                status_description: "Second Half".to_string(),
            }
        );
    }

    #[test]
    fn test_pre_match_has_no_scores() {
        let row: FootballApiGame = serde_json::from_value(json!({
            "game_id": 704600,
            "game_date": "2099-01-01T19:00Z",
            "status_state": "pre",
            "home_team": "ARS",
            "away_team": "CHE",
            "home_score": null,
            "away_score": null,
            "home_position": null,
            "away_position": 0
        }))
        .unwrap();

        let game = row.into_game().unwrap();
        assert_eq!(game.id, "704600");
        assert_eq!(game.status, GameStatus::Scheduled);
        assert_eq!(game.home_score, None);
        assert_eq!(game.home.name, "ARS");
        assert_eq!(game.away.rank, None);
        assert_eq!(game.focus_is_home, None);
    }

    #[test]
    fn test_post_and_unknown_states() {
        let mut row: FootballApiGame = serde_json::from_value(json!({
            "game_date": "2024-03-01",
            "status_state": "post",
            "home_team": "ARS",
            "away_team": "LIV"
        }))
        .unwrap();
        assert_eq!(row.normalized_status(), GameStatus::Completed);
        row.status_state = "postponed".to_string();
        assert_eq!(row.normalized_status(), GameStatus::Scheduled);
    }
}
