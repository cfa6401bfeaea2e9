use crate::data_fetcher::api::GameSource;
use crate::data_fetcher::models::{Game, GameStatus, LiveProgress, ScheduledAt, Sport, TeamInfo};
use crate::error::AppError;
use crate::scoreboard::{Renderer, Scheduler, TaskHandle, Tick, WidgetView};
use chrono::{Local, NaiveDate, TimeZone, Utc};
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

/// Test utilities for creating mock data and testing scenarios
pub struct TestDataBuilder;

impl TestDataBuilder {
    /// Houston at home against Dallas, followed team at home.
    pub fn create_basketball_game(id: &str, status: GameStatus) -> Game {
        let status_text = match status {
            GameStatus::Scheduled => "8:00 pm ET",
            GameStatus::Live => "Q2 5:00",
            GameStatus::Completed => "Final",
        };
        Game {
            id: id.to_string(),
            sport: Sport::Basketball,
            home: TeamInfo::new("HOU", "Houston HOU"),
            away: TeamInfo::new("DAL", "Dallas DAL"),
            home_score: Self::score(status, 55),
            away_score: Self::score(status, 50),
            status,
            scheduled: Self::past_tipoff(),
            progress: LiveProgress::Basketball {
                period: (status != GameStatus::Scheduled).then_some(2),
                clock: (status == GameStatus::Live).then(|| "5:00".to_string()),
                status_text: status_text.to_string(),
            },
            focus_is_home: Some(true),
        }
    }

    /// Arsenal at home against Chelsea, followed team at home.
    pub fn create_football_game(id: &str, status: GameStatus) -> Game {
        let mut home = TeamInfo::new("ARS", "Arsenal");
        home.rank = Some(1);
        let mut away = TeamInfo::new("CHE", "Chelsea");
        away.rank = Some(4);
        Game {
            id: id.to_string(),
            sport: Sport::Football,
            home,
            away,
            home_score: Self::score(status, 2),
            away_score: Self::score(status, 1),
            status,
            scheduled: Self::past_tipoff(),
            progress: LiveProgress::Football {
                display_clock: (status == GameStatus::Live).then(|| "67'".to_string()),
                status_description: match status {
                    GameStatus::Scheduled => "Scheduled",
                    GameStatus::Live => "Second Half",
                    GameStatus::Completed => "Full Time",
                }
                .to_string(),
            },
            focus_is_home: Some(true),
        }
    }

    pub fn create_game(sport: Sport, id: &str, status: GameStatus) -> Game {
        match sport {
            Sport::Basketball => Self::create_basketball_game(id, status),
            Sport::Football => Self::create_football_game(id, status),
        }
    }

    /// `count` scheduled games with ids `"0"`, `"1"`, ...
    pub fn create_game_list(sport: Sport, count: usize) -> Vec<Game> {
        (0..count)
            .map(|i| Self::create_game(sport, &i.to_string(), GameStatus::Scheduled))
            .collect()
    }

    /// Midday on `date` in this machine's time zone.
    pub fn local_noon(date: NaiveDate) -> ScheduledAt {
        date.and_hms_opt(12, 0, 0)
            .and_then(|naive| Local.from_local_datetime(&naive).earliest())
            .map(|local| ScheduledAt::Instant(local.with_timezone(&Utc)))
            .unwrap_or(ScheduledAt::Date(date))
    }

    fn score(status: GameStatus, value: u32) -> Option<u32> {
        (status != GameStatus::Scheduled).then_some(value)
    }

    fn past_tipoff() -> ScheduledAt {
        ScheduledAt::Instant(
            Utc.with_ymd_and_hms(2024, 3, 1, 1, 0, 0)
                .single()
                .unwrap_or_default(),
        )
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

#[derive(Debug, Clone)]
enum Scripted {
    Games(Vec<Game>),
    Failure,
}

#[derive(Debug, Default)]
struct ScriptedState {
    responses: HashMap<Sport, Scripted>,
    calls: HashMap<Sport, usize>,
}

/// Game source answering from a per-sport script. Sports without a script get an empty list.
///
/// Clones share the script, so tests can change answers after handing a clone away.
#[derive(Debug, Clone, Default)]
pub struct StaticGameSource {
    state: Arc<Mutex<ScriptedState>>,
}

impl StaticGameSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_games(&self, sport: Sport, games: Vec<Game>) {
        lock(&self.state)
            .responses
            .insert(sport, Scripted::Games(games));
    }

    /// Makes every fetch for `sport` fail with a connection error.
    pub fn set_failure(&self, sport: Sport) {
        lock(&self.state).responses.insert(sport, Scripted::Failure);
    }

    pub fn calls(&self, sport: Sport) -> usize {
        lock(&self.state).calls.get(&sport).copied().unwrap_or(0)
    }
}

impl GameSource for StaticGameSource {
    async fn fetch_games(&self, sport: Sport) -> Result<Vec<Game>, AppError> {
        let scripted = {
            let mut state = lock(&self.state);
            *state.calls.entry(sport).or_default() += 1;
            state.responses.get(&sport).cloned()
        };
        match scripted {
            Some(Scripted::Games(games)) => Ok(games),
            Some(Scripted::Failure) => Err(AppError::network_connection(
                format!("static://{sport}"),
                "scripted failure",
            )),
            None => Ok(Vec::new()),
        }
    }
}

/// Scheduler that only records what it was asked to do.
#[derive(Debug, Default)]
pub struct ManualScheduler {
    armed: Vec<(TaskHandle, Sport, Duration)>,
    cancelled: Vec<TaskHandle>,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn armed(&self) -> &[(TaskHandle, Sport, Duration)] {
        &self.armed
    }

    pub fn cancelled(&self) -> &[TaskHandle] {
        &self.cancelled
    }

    /// Handles that were armed and never cancelled.
    pub fn active_handles(&self) -> Vec<TaskHandle> {
        self.armed
            .iter()
            .map(|(handle, _, _)| *handle)
            .filter(|handle| !self.cancelled.contains(handle))
            .collect()
    }

    /// The tick the most recently armed timer would fire.
    pub fn latest_tick(&self) -> Option<Tick> {
        self.armed
            .last()
            .map(|(handle, sport, _)| Tick { sport: *sport, handle: *handle })
    }
}

impl Scheduler for ManualScheduler {
    fn schedule_repeating(&mut self, sport: Sport, every: Duration) -> TaskHandle {
        let handle = TaskHandle(self.armed.len() as u64 + 1);
        self.armed.push((handle, sport, every));
        handle
    }

    fn cancel(&mut self, handle: TaskHandle) {
        if !self.cancelled.contains(&handle) {
            self.cancelled.push(handle);
        }
    }
}

/// Renderer that keeps every view it was given.
#[derive(Debug, Default)]
pub struct RecordingRenderer {
    views: Vec<WidgetView>,
}

impl RecordingRenderer {
    pub fn views(&self) -> &[WidgetView] {
        &self.views
    }

    pub fn last(&self) -> Option<&WidgetView> {
        self.views.last()
    }

    pub fn clear(&mut self) {
        self.views.clear();
    }
}

impl Renderer for RecordingRenderer {
    fn render(&mut self, view: &WidgetView) -> Result<(), AppError> {
        self.views.push(view.clone());
        Ok(())
    }
}
