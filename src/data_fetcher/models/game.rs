use crate::constants::polling;
use chrono::{DateTime, Local, NaiveDate, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

/// Sports the scoreboard can show.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sport {
    #[default]
    Basketball,
    Football,
}

impl Sport {
    pub const ALL: [Sport; 2] = [Sport::Basketball, Sport::Football];

    /// Identifier used in storage keys and endpoint paths.
    pub fn id(&self) -> &'static str {
        match self {
            Sport::Basketball => "basketball",
            Sport::Football => "football",
        }
    }

    pub fn from_id(id: &str) -> Option<Sport> {
        Sport::ALL.into_iter().find(|sport| sport.id() == id)
    }

    /// Widget heading shown above the game card.
    pub fn title(&self) -> &'static str {
        match self {
            Sport::Basketball => "NBA Scoreboard",
            Sport::Football => "Premier League Scoreboard",
        }
    }

    /// Refresh cadence while one of this sport's games is live.
    pub fn live_poll_interval(&self) -> Duration {
        match self {
            Sport::Basketball => Duration::from_secs(polling::BASKETBALL_LIVE_SECONDS),
            Sport::Football => Duration::from_secs(polling::FOOTBALL_LIVE_SECONDS),
        }
    }

    /// Status literal for a finished game.
    pub fn completed_label(&self) -> &'static str {
        match self {
            Sport::Basketball => "Final",
            Sport::Football => "FT",
        }
    }

    /// The sport a toggle switches to.
    pub fn other(&self) -> Sport {
        match self {
            Sport::Basketball => Sport::Football,
            Sport::Football => Sport::Basketball,
        }
    }
}

impl fmt::Display for Sport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for Sport {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Sport::from_id(&s.trim().to_ascii_lowercase()).ok_or_else(|| {
            format!("unknown sport '{s}' (expected 'basketball' or 'football')")
        })
    }
}

/// Normalized game state, independent of how each upstream encodes it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GameStatus {
    Scheduled,
    Live,
    Completed,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamInfo {
    pub abbreviation: String,
    pub name: String,
    /// League position, when the upstream knows it.
    #[serde(default)]
    pub rank: Option<u32>,
}

impl TeamInfo {
    pub fn new(abbreviation: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            abbreviation: abbreviation.into(),
            name: name.into(),
            rank: None,
        }
    }
}

/// When a game starts. Some upstream rows only carry a date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScheduledAt {
    Instant(DateTime<Utc>),
    Date(NaiveDate),
}

impl ScheduledAt {
    /// Calendar day of the game in the given time zone.
    pub fn date_in<Tz: TimeZone>(&self, tz: &Tz) -> NaiveDate {
        match self {
            ScheduledAt::Instant(instant) => instant.with_timezone(tz).date_naive(),
            ScheduledAt::Date(date) => *date,
        }
    }

    /// Calendar day of the game on this machine's clock.
    pub fn local_date(&self) -> NaiveDate {
        self.date_in(&Local)
    }
}

/// Sport-specific in-game fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "sport", rename_all = "lowercase")]
pub enum LiveProgress {
    Basketball {
        #[serde(default)]
        period: Option<u32>,
        #[serde(default)]
        clock: Option<String>,
        #[serde(default)]
        status_text: String,
    },
    Football {
        #[serde(default)]
        display_clock: Option<String>,
        #[serde(default)]
        status_description: String,
    },
}

/// One game in the unified shape every sport is normalized into.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Game {
    pub id: String,
    pub sport: Sport,
    pub home: TeamInfo,
    pub away: TeamInfo,
    pub home_score: Option<u32>,
    pub away_score: Option<u32>,
    pub status: GameStatus,
    pub scheduled: ScheduledAt,
    pub progress: LiveProgress,
    /// Whether the followed team plays at home. `None` when the upstream
    /// does not say, in which case the home side is listed first.
    #[serde(default)]
    pub focus_is_home: Option<bool>,
}

impl Game {
    pub fn is_live(&self) -> bool {
        self.status == GameStatus::Live
    }

    /// Teams ordered followed-team first, each tagged with whether it is the home side.
    pub fn teams_focus_first(&self) -> [(&TeamInfo, Option<u32>, bool); 2] {
        let home = (&self.home, self.home_score, true);
        let away = (&self.away, self.away_score, false);
        if self.focus_is_home == Some(false) {
            [away, home]
        } else {
            [home, away]
        }
    }
}
