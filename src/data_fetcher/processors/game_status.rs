use super::time_formatting::{extract_eastern_time, format_eastern_time, format_short_date};
use crate::data_fetcher::models::{Game, GameStatus, LiveProgress, ScheduledAt};
use serde::{Deserialize, Serialize};

/// The two status lines under a game card.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusDisplay {
    pub status_text: String,
    pub time_text: String,
}

impl StatusDisplay {
    fn new(status_text: impl Into<String>, time_text: impl Into<String>) -> Self {
        Self {
            status_text: status_text.into(),
            time_text: time_text.into(),
        }
    }
}

/// Derives the status and time lines for a game.
///
/// | status    | basketball                          | football                      |
/// |-----------|-------------------------------------|-------------------------------|
/// | scheduled | `Upcoming` / `Fri, Mar 1, 8:00 pm ET` | same                        |
/// | live      | upstream text or `3 Qtr 4:12` / `Live` | `HT`, `67'` or `Live` / empty |
/// | completed | `Final` / `Fri, Mar 1`              | `FT` / `Fri, Mar 1`           |
///
/// Dates and times are shown in US Eastern time.
///
/// # Examples
///
/// ```rust
/// use startpage_scoreboard::data_fetcher::processors::format_status;
/// use startpage_scoreboard::testing_utils::TestDataBuilder;
/// use startpage_scoreboard::data_fetcher::models::GameStatus;
///
/// let game = TestDataBuilder::create_football_game("1", GameStatus::Completed);
/// assert_eq!(format_status(&game).status_text, "FT");
/// ```
pub fn format_status(game: &Game) -> StatusDisplay {
    match game.status {
        GameStatus::Scheduled => {
            StatusDisplay::new("Upcoming", scheduled_time_text(game))
        }
        GameStatus::Live => live_status(&game.progress),
        GameStatus::Completed => StatusDisplay::new(
            game.sport.completed_label(),
            format_short_date(&game.scheduled),
        ),
    }
}

fn scheduled_time_text(game: &Game) -> String {
    let date = format_short_date(&game.scheduled);

    // Basketball status text carries the tip-off time already formatted
    let embedded = match &game.progress {
        LiveProgress::Basketball { status_text, .. } => {
            extract_eastern_time(status_text).map(str::to_string)
        }
        LiveProgress::Football { .. } => None,
    };

    let time = embedded
        .or_else(|| format_eastern_time(&game.scheduled))
        .unwrap_or_else(|| match game.scheduled {
            ScheduledAt::Date(_) => "Time TBD".to_string(),
            ScheduledAt::Instant(_) => String::new(),
        });

    format!("{date}, {time}")
}

fn live_status(progress: &LiveProgress) -> StatusDisplay {
    match progress {
        LiveProgress::Basketball {
            period,
            clock,
            status_text,
        } => {
            let trimmed = status_text.trim();
            let status = if trimmed.is_empty() {
                let period = period
                    .filter(|p| *p > 0)
                    .map(|p| p.to_string())
                    .unwrap_or_else(|| "1st".to_string());
                format!("{period} Qtr {}", clock.as_deref().unwrap_or(""))
                    .trim_end()
                    .to_string()
            } else {
                trimmed.to_string()
            };
            StatusDisplay::new(status, "Live")
        }
        LiveProgress::Football {
            display_clock,
            status_description,
        } => {
            let status = if status_description == "Halftime" {
                "HT".to_string()
            } else {
                match display_clock
                    .as_deref()
                    .map(|clock| clock.replace(['\'', '"'], ""))
                    .filter(|clock| !clock.trim().is_empty())
                {
                    Some(minute) => format!("{}'", minute.trim()),
                    None => "Live".to_string(),
                }
            };
            StatusDisplay::new(status, "")
        }
    }
}

/// Score text for one side; a dash until the game has a real score.
pub fn format_score(score: Option<u32>, status: GameStatus) -> String {
    match (status, score) {
        (GameStatus::Scheduled, _) | (_, None) => "-".to_string(),
        (_, Some(score)) => score.to_string(),
    }
}

/// English ordinal for a league position, e.g. `1st`, `12th`, `22nd`.
pub fn format_ordinal(n: u32) -> String {
    let suffix = match (n % 10, n % 100) {
        (1, hundreds) if hundreds != 11 => "st",
        (2, hundreds) if hundreds != 12 => "nd",
        (3, hundreds) if hundreds != 13 => "rd",
        _ => "th",
    };
    format!("{n}{suffix}")
}

/// Ordinal rank label, or an empty string when the rank is unknown.
pub fn format_rank(rank: Option<u32>) -> String {
    match rank {
        Some(rank) if rank > 0 => format_ordinal(rank),
        _ => String::new(),
    }
}
