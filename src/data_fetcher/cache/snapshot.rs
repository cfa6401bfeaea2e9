//! Last-known-good game lists per sport, plus the displayed-sport setting

use super::store::KeyValueStore;
use crate::constants::storage::{DISPLAYED_SPORT_KEY, FETCHED_AT_SUFFIX, GAME_DATA_SUFFIX};
use crate::data_fetcher::models::{Game, Sport};
use crate::error::AppError;
use chrono::{DateTime, Utc};
use std::time::Duration;
use tracing::{debug, info, instrument, warn};

/// The most recent successfully fetched game list for one sport.
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    pub sport: Sport,
    pub games: Vec<Game>,
    pub fetched_at_epoch_millis: i64,
}

impl Snapshot {
    pub fn new(sport: Sport, games: Vec<Game>, fetched_at: DateTime<Utc>) -> Self {
        Self {
            sport,
            games,
            fetched_at_epoch_millis: fetched_at.timestamp_millis(),
        }
    }

    pub fn has_live_games(&self) -> bool {
        self.games.iter().any(Game::is_live)
    }

    pub fn fetched_at(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp_millis(self.fetched_at_epoch_millis)
    }

    /// How old the snapshot is relative to `now`; zero if the clock went backwards.
    pub fn age(&self, now: DateTime<Utc>) -> Duration {
        let millis = now
            .timestamp_millis()
            .saturating_sub(self.fetched_at_epoch_millis);
        Duration::from_millis(u64::try_from(millis).unwrap_or(0))
    }
}

pub fn game_data_key(sport: Sport) -> String {
    format!("{}.{GAME_DATA_SUFFIX}", sport.id())
}

pub fn fetched_at_key(sport: Sport) -> String {
    format!("{}.{FETCHED_AT_SUFFIX}", sport.id())
}

/// Typed view over a [`KeyValueStore`].
///
/// Layout per sport `S`: `S.gameData` holds the JSON game list and
/// `S.gameData.fetchedAt` the fetch time in epoch millis. The displayed sport
/// lives under `currentScoreboard`.
#[derive(Debug, Clone)]
pub struct SnapshotStore<S> {
    store: S,
}

impl<S: KeyValueStore> SnapshotStore<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn inner(&self) -> &S {
        &self.store
    }

    /// Overwrites the snapshot for `snapshot.sport`.
    #[instrument(skip(self, snapshot), fields(sport = %snapshot.sport, games = snapshot.games.len()))]
    pub fn save_snapshot(&mut self, snapshot: &Snapshot) -> Result<(), AppError> {
        let json = serde_json::to_string(&snapshot.games)?;
        self.store.set(&game_data_key(snapshot.sport), &json)?;
        self.store.set(
            &fetched_at_key(snapshot.sport),
            &snapshot.fetched_at_epoch_millis.to_string(),
        )?;
        debug!(
            "Saved snapshot: has_live={}, bytes={}",
            snapshot.has_live_games(),
            json.len()
        );
        Ok(())
    }

    /// Reads the stored snapshot for a sport.
    ///
    /// Returns `Ok(None)` when nothing was ever stored and
    /// [`AppError::CacheCorrupt`] when the stored list cannot be decoded.
    /// A missing or unreadable timestamp is tolerated and reads as epoch zero.
    pub fn load_snapshot(&self, sport: Sport) -> Result<Option<Snapshot>, AppError> {
        let key = game_data_key(sport);
        let Some(raw) = self.store.get(&key)? else {
            debug!("No snapshot stored for {sport}");
            return Ok(None);
        };

        let games: Vec<Game> = serde_json::from_str(&raw)
            .map_err(|e| AppError::cache_corrupt(key.clone(), e.to_string()))?;

        let fetched_at_epoch_millis = match self.store.get(&fetched_at_key(sport))? {
            Some(raw) => match raw.trim().parse::<i64>() {
                Ok(millis) if DateTime::from_timestamp_millis(millis).is_some() => millis,
                Ok(millis) => {
                    warn!("Ignoring out-of-range fetch time for {sport}: {millis}");
                    0
                }
                Err(e) => {
                    warn!("Ignoring unreadable fetch time for {sport}: {e}");
                    0
                }
            },
            None => 0,
        };

        let snapshot = Snapshot {
            sport,
            games,
            fetched_at_epoch_millis,
        };
        debug!(
            "Loaded snapshot for {sport}: games={}, age={:?}",
            snapshot.games.len(),
            snapshot.age(Utc::now())
        );
        Ok(Some(snapshot))
    }

    /// The sport shown last time, defaulting to basketball when unset or unknown.
    pub fn load_displayed_sport(&self) -> Sport {
        match self.store.get(DISPLAYED_SPORT_KEY) {
            Ok(Some(id)) => Sport::from_id(id.trim()).unwrap_or_else(|| {
                warn!("Unknown stored sport '{id}', falling back to default");
                Sport::default()
            }),
            Ok(None) => Sport::default(),
            Err(e) => {
                warn!("Could not read displayed sport: {e}");
                Sport::default()
            }
        }
    }

    pub fn save_displayed_sport(&mut self, sport: Sport) -> Result<(), AppError> {
        self.store.set(DISPLAYED_SPORT_KEY, sport.id())?;
        info!("Displayed sport set to {sport}");
        Ok(())
    }
}
