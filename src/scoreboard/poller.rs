//! Adaptive refresh timer: short intervals while a game is live, long otherwise

use crate::constants::polling;
use crate::data_fetcher::cache::Snapshot;
use crate::data_fetcher::models::Sport;
use std::collections::HashMap;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior};
use tracing::{debug, info};

/// Identifies one armed repeating timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TaskHandle(pub u64);

/// Fired by a repeating timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tick {
    pub sport: Sport,
    pub handle: TaskHandle,
}

/// Something that can run a repeating timer on our behalf.
pub trait Scheduler {
    /// Arms a timer whose first tick fires one full `every` from now.
    fn schedule_repeating(&mut self, sport: Sport, every: Duration) -> TaskHandle;

    /// Stops a timer. Unknown or already-cancelled handles are ignored.
    fn cancel(&mut self, handle: TaskHandle);
}

/// Picks the refresh interval for a sport from its latest snapshot.
///
/// Live games shorten the interval to the sport's live cadence; anything else,
/// including having no snapshot at all, polls every five minutes.
pub fn compute_interval(sport: Sport, snapshot: Option<&Snapshot>) -> Duration {
    match snapshot {
        Some(snapshot) if snapshot.has_live_games() => sport.live_poll_interval(),
        _ => Duration::from_secs(polling::DEFAULT_SECONDS),
    }
}

/// Runs each timer as a tokio task that posts [`Tick`]s to a channel.
#[derive(Debug)]
pub struct TokioScheduler {
    ticks: mpsc::UnboundedSender<Tick>,
    tasks: HashMap<TaskHandle, JoinHandle<()>>,
    next_id: u64,
}

impl TokioScheduler {
    pub fn new(ticks: mpsc::UnboundedSender<Tick>) -> Self {
        Self {
            ticks,
            tasks: HashMap::new(),
            next_id: 0,
        }
    }

    pub fn active_count(&self) -> usize {
        self.tasks.len()
    }
}

impl Scheduler for TokioScheduler {
    fn schedule_repeating(&mut self, sport: Sport, every: Duration) -> TaskHandle {
        self.next_id += 1;
        let handle = TaskHandle(self.next_id);
        let ticks = self.ticks.clone();
        let first_tick = Instant::now() + every;

        let task = tokio::spawn(async move {
            let mut interval = tokio::time::interval_at(first_tick, every);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                interval.tick().await;
                if ticks.send(Tick { sport, handle }).is_err() {
                    break;
                }
            }
        });

        self.tasks.insert(handle, task);
        handle
    }

    fn cancel(&mut self, handle: TaskHandle) {
        if let Some(task) = self.tasks.remove(&handle) {
            task.abort();
        }
    }
}

impl Drop for TokioScheduler {
    fn drop(&mut self) {
        for (_, task) in self.tasks.drain() {
            task.abort();
        }
    }
}

/// The one timer currently driving refreshes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollState {
    pub handle: TaskHandle,
    pub sport: Sport,
    pub interval: Duration,
}

/// Owns the single active refresh timer.
#[derive(Debug)]
pub struct AdaptivePoller<T> {
    scheduler: T,
    active: Option<PollState>,
}

impl<T: Scheduler> AdaptivePoller<T> {
    pub fn new(scheduler: T) -> Self {
        Self {
            scheduler,
            active: None,
        }
    }

    /// Replaces whatever timer is running with one for `sport` at `interval`.
    pub fn rearm(&mut self, sport: Sport, interval: Duration) -> TaskHandle {
        if let Some(previous) = self.active.take() {
            self.scheduler.cancel(previous.handle);
        }
        let handle = self.scheduler.schedule_repeating(sport, interval);
        self.active = Some(PollState {
            handle,
            sport,
            interval,
        });
        info!("Refreshing {sport} every {}s", interval.as_secs());
        handle
    }

    /// Rearms using [`compute_interval`] and returns the chosen interval.
    pub fn rearm_from_snapshot(&mut self, sport: Sport, snapshot: Option<&Snapshot>) -> Duration {
        let interval = compute_interval(sport, snapshot);
        self.rearm(sport, interval);
        interval
    }

    pub fn disarm(&mut self) {
        if let Some(previous) = self.active.take() {
            debug!("Stopping {} refresh timer", previous.sport);
            self.scheduler.cancel(previous.handle);
        }
    }

    pub fn active(&self) -> Option<&PollState> {
        self.active.as_ref()
    }

    /// True if `tick` came from the timer that is armed right now.
    ///
    /// A tick from a cancelled timer can still be queued when it is received.
    pub fn is_current(&self, tick: &Tick) -> bool {
        self.active
            .is_some_and(|state| state.handle == tick.handle && state.sport == tick.sport)
    }

    pub fn scheduler(&self) -> &T {
        &self.scheduler
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data_fetcher::models::GameStatus;
    use crate::testing_utils::{ManualScheduler, TestDataBuilder};
    use chrono::Utc;

    fn snapshot_with(sport: Sport, statuses: &[GameStatus]) -> Snapshot {
        let games = statuses
            .iter()
            .enumerate()
            .map(|(i, status)| TestDataBuilder::create_game(sport, &i.to_string(), *status))
            .collect();
        Snapshot::new(sport, games, Utc::now())
    }

    #[test]
    fn test_no_snapshot_uses_default_interval() {
        assert_eq!(compute_interval(Sport::Basketball, None), Duration::from_secs(300));
        assert_eq!(compute_interval(Sport::Football, None), Duration::from_secs(300));
    }

    #[test]
    fn test_live_game_shortens_interval() {
        let basketball = snapshot_with(
            Sport::Basketball,
            &[GameStatus::Completed, GameStatus::Live],
        );
        assert_eq!(
            compute_interval(Sport::Basketball, Some(&basketball)),
            Duration::from_secs(150)
        );

        let football = snapshot_with(Sport::Football, &[GameStatus::Live]);
        assert_eq!(
            compute_interval(Sport::Football, Some(&football)),
            Duration::from_secs(30)
        );
    }

    #[test]
    fn test_no_live_game_uses_default_interval() {
        let snapshot = snapshot_with(
            Sport::Football,
            &[GameStatus::Scheduled, GameStatus::Completed],
        );
        assert_eq!(
            compute_interval(Sport::Football, Some(&snapshot)),
            Duration::from_secs(300)
        );
        let empty = snapshot_with(Sport::Football, &[]);
        assert_eq!(
            compute_interval(Sport::Football, Some(&empty)),
            Duration::from_secs(300)
        );
    }

    #[test]
    fn test_rearm_twice_leaves_one_timer() {
        let mut poller = AdaptivePoller::new(ManualScheduler::new());
        let first = poller.rearm(Sport::Basketball, Duration::from_secs(300));
        let second = poller.rearm(Sport::Basketball, Duration::from_secs(150));

        assert_ne!(first, second);
        assert_eq!(poller.scheduler().active_handles(), vec![second]);
        assert_eq!(poller.scheduler().cancelled(), &[first]);
        assert_eq!(poller.active().map(|s| s.interval), Some(Duration::from_secs(150)));
    }

    #[test]
    fn test_stale_tick_is_not_current() {
        let mut poller = AdaptivePoller::new(ManualScheduler::new());
        let old = poller.rearm(Sport::Basketball, Duration::from_secs(300));
        let new = poller.rearm(Sport::Football, Duration::from_secs(300));

        assert!(!poller.is_current(&Tick { sport: Sport::Basketball, handle: old }));
        assert!(poller.is_current(&Tick { sport: Sport::Football, handle: new }));
    }

    #[test]
    fn test_disarm_cancels_active_timer() {
        let mut poller = AdaptivePoller::new(ManualScheduler::new());
        poller.rearm(Sport::Football, Duration::from_secs(30));
        poller.disarm();
        assert!(poller.active().is_none());
        assert!(poller.scheduler().active_handles().is_empty());
        poller.disarm();
    }

    #[tokio::test(start_paused = true)]
    async fn test_tokio_scheduler_ticks_and_cancels() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut scheduler = TokioScheduler::new(tx);
        let handle = scheduler.schedule_repeating(Sport::Football, Duration::from_secs(30));

        tokio::time::advance(Duration::from_secs(31)).await;
        let tick = rx.recv().await.unwrap();
        assert_eq!(tick, Tick { sport: Sport::Football, handle });

        scheduler.cancel(handle);
        assert_eq!(scheduler.active_count(), 0);
        tokio::time::advance(Duration::from_secs(120)).await;
        tokio::task::yield_now().await;
        assert!(rx.try_recv().is_err());
    }
}
