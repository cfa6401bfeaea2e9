//! What the scoreboard widget can show, independent of how it is drawn

use crate::constants::FETCH_ERROR_MESSAGE;
use crate::data_fetcher::models::{Game, Sport};
use crate::data_fetcher::processors::{StatusDisplay, format_rank, format_score, format_status};
use crate::error::AppError;
use chrono::{DateTime, Local, Utc};

/// One row of the game card.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TeamLine {
    pub abbreviation: String,
    pub name: String,
    pub is_home: bool,
    pub rank_text: String,
    pub score_text: String,
}

impl TeamLine {
    pub fn home_away_marker(&self) -> &'static str {
        if self.is_home { "(H)" } else { "(A)" }
    }
}

/// A fully formatted game, ready to draw.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameCard {
    pub sport: Sport,
    pub game_id: String,
    /// Followed team first.
    pub teams: [TeamLine; 2],
    pub status: StatusDisplay,
    pub is_live: bool,
    /// Set when the card comes from the local snapshot after a failed fetch.
    pub cached_at: Option<DateTime<Utc>>,
}

impl GameCard {
    pub fn from_game(game: &Game, cached_at: Option<DateTime<Utc>>) -> Self {
        let teams = game.teams_focus_first().map(|(team, score, is_home)| TeamLine {
            abbreviation: team.abbreviation.clone(),
            name: team.name.clone(),
            is_home,
            rank_text: format_rank(team.rank),
            score_text: format_score(score, game.status),
        });

        Self {
            sport: game.sport,
            game_id: game.id.clone(),
            teams,
            status: format_status(game),
            is_live: game.is_live(),
            cached_at,
        }
    }

    pub fn title(&self) -> &'static str {
        self.sport.title()
    }

    /// Plain-text rendering, one entry per line.
    pub fn lines(&self) -> Vec<String> {
        let mut lines = Vec::with_capacity(6);
        lines.push(self.title().to_string());
        for team in &self.teams {
            let rank = if team.rank_text.is_empty() {
                String::new()
            } else {
                format!(" {}", team.rank_text)
            };
            lines.push(format!(
                "{:<4}{:<4}{:<6}{:>4}",
                team.abbreviation,
                team.home_away_marker(),
                rank,
                team.score_text
            ));
        }
        lines.push(self.status.status_text.clone());
        if !self.status.time_text.is_empty() {
            lines.push(self.status.time_text.clone());
        }
        if let Some(cached_at) = self.cached_at {
            lines.push(format!(
                "(cached {})",
                cached_at.with_timezone(&Local).format("%H:%M")
            ));
        }
        lines
    }
}

/// Why there is no game card to show. Neither is an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoGamesReason {
    /// The source answered with an empty list.
    EmptyData,
    /// The list was non-empty but nothing in it qualified.
    NoRelevantGame,
}

impl NoGamesReason {
    pub fn message(&self) -> &'static str {
        match self {
            NoGamesReason::EmptyData => "No upcoming games found.",
            NoGamesReason::NoRelevantGame => "No game data available.",
        }
    }
}

/// Everything the widget can display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WidgetView {
    Loading { sport: Sport },
    Game(GameCard),
    NoGames { sport: Sport, reason: NoGamesReason },
    Error { sport: Sport, message: String },
}

impl WidgetView {
    pub fn fetch_error(sport: Sport) -> Self {
        WidgetView::Error {
            sport,
            message: FETCH_ERROR_MESSAGE.to_string(),
        }
    }

    pub fn sport(&self) -> Sport {
        match self {
            WidgetView::Loading { sport }
            | WidgetView::NoGames { sport, .. }
            | WidgetView::Error { sport, .. } => *sport,
            WidgetView::Game(card) => card.sport,
        }
    }

    /// Plain-text rendering used by one-shot output and logs.
    pub fn lines(&self) -> Vec<String> {
        match self {
            WidgetView::Game(card) => card.lines(),
            WidgetView::Loading { sport } => {
                vec![sport.title().to_string(), "Loading game data...".to_string()]
            }
            WidgetView::NoGames { sport, reason } => {
                vec![sport.title().to_string(), reason.message().to_string()]
            }
            WidgetView::Error { sport, message } => {
                vec![sport.title().to_string(), message.clone()]
            }
        }
    }
}

/// Draws widget views. Failures are reported but never stop the scoreboard.
pub trait Renderer {
    fn render(&mut self, view: &WidgetView) -> Result<(), AppError>;
}
