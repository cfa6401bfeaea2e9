//! Drives the scoreboard widget: which sport is shown, when it refreshes and
//! what happens when a fetch succeeds, fails, or arrives too late.
//!
//! The controller never awaits while holding state. Callers ask it for a
//! [`FetchTicket`], run the fetch wherever they like and hand the result back
//! through [`ScoreboardController::complete_fetch`]. Results whose ticket no
//! longer matches the displayed sport, or that were overtaken by a newer
//! ticket for the same sport, are dropped without side effects.

use super::poller::{AdaptivePoller, Scheduler, Tick};
use super::view::{GameCard, NoGamesReason, Renderer, WidgetView};
use crate::data_fetcher::api::GameSource;
use crate::data_fetcher::cache::{KeyValueStore, Snapshot, SnapshotStore};
use crate::data_fetcher::models::{Game, Sport};
use crate::data_fetcher::processors::select_relevant_game;
use crate::error::AppError;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::future::Future;
use tracing::{debug, error, info, warn};

/// Lifecycle of the widget.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WidgetState {
    Idle,
    Loading { sport: Sport },
    Displayed { sport: Sport },
    Error { sport: Sport, showing_cached: bool },
}

/// Names the sport an in-flight fetch belongs to.
///
/// `seq` grows with every ticket a controller issues, so of two tickets for the
/// same sport the later one always has the larger `seq`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchTicket {
    pub sport: Sport,
    pub seq: u64,
    pub issued_at: DateTime<Utc>,
}

/// What [`ScoreboardController::complete_fetch`] did with a result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RefreshOutcome {
    Displayed { game_id: String },
    NoGames(NoGamesReason),
    ShowingCached { game_id: String },
    ErrorNoCache,
    /// The sport was switched while the fetch was in flight, or a newer
    /// fetch for the same sport already landed.
    Discarded,
}

pub struct ScoreboardController<G, S, T, R> {
    source: G,
    snapshots: SnapshotStore<S>,
    poller: AdaptivePoller<T>,
    renderer: R,
    displayed: Sport,
    state: WidgetState,
    issued: u64,
    applied: HashMap<Sport, u64>,
}

impl<G, S, T, R> ScoreboardController<G, S, T, R>
where
    G: GameSource,
    S: KeyValueStore,
    T: Scheduler,
    R: Renderer,
{
    /// Restores the last displayed sport from `store`; nothing is rendered until [`mount`](Self::mount).
    pub fn new(source: G, store: S, scheduler: T, renderer: R) -> Self {
        let snapshots = SnapshotStore::new(store);
        let displayed = snapshots.load_displayed_sport();
        Self {
            source,
            snapshots,
            poller: AdaptivePoller::new(scheduler),
            renderer,
            displayed,
            state: WidgetState::Idle,
            issued: 0,
            applied: HashMap::new(),
        }
    }

    pub fn mount(&mut self) -> FetchTicket {
        info!("Mounting scoreboard with {}", self.displayed);
        self.begin_loading(self.displayed)
    }

    /// Switches to the other sport.
    pub fn toggle(&mut self) -> FetchTicket {
        self.show_sport(self.displayed.other())
    }

    /// Switches to `sport`, persisting the choice before the fetch is issued.
    pub fn show_sport(&mut self, sport: Sport) -> FetchTicket {
        if sport != self.displayed {
            info!("Switching scoreboard from {} to {sport}", self.displayed);
        }
        if let Err(e) = self.snapshots.save_displayed_sport(sport) {
            warn!("Could not persist displayed sport {sport}: {e}");
        }
        self.displayed = sport;
        self.begin_loading(sport)
    }

    /// Handles a timer tick. Ticks for another sport or a replaced timer are ignored.
    pub fn on_tick(&mut self, tick: Tick) -> Option<FetchTicket> {
        if tick.sport != self.displayed {
            debug!("Ignoring {} tick while showing {}", tick.sport, self.displayed);
            return None;
        }
        if !self.poller.is_current(&tick) {
            debug!("Ignoring tick from replaced timer {:?}", tick.handle);
            return None;
        }
        Some(self.refresh())
    }

    /// Refetches the displayed sport, keeping the current card visible meanwhile.
    pub fn refresh(&mut self) -> FetchTicket {
        debug!("Refreshing {}", self.displayed);
        self.state = WidgetState::Loading {
            sport: self.displayed,
        };
        self.ticket()
    }

    /// Applies a fetch result.
    pub fn complete_fetch(
        &mut self,
        ticket: FetchTicket,
        result: Result<Vec<Game>, AppError>,
    ) -> RefreshOutcome {
        if ticket.sport != self.displayed {
            info!(
                "Discarding {} response issued at {} while showing {}",
                ticket.sport, ticket.issued_at, self.displayed
            );
            return RefreshOutcome::Discarded;
        }
        if let Some(&latest) = self.applied.get(&ticket.sport)
            && ticket.seq < latest
        {
            info!(
                "Discarding {} response #{} issued at {}, #{latest} already applied",
                ticket.sport, ticket.seq, ticket.issued_at
            );
            return RefreshOutcome::Discarded;
        }
        self.applied.insert(ticket.sport, ticket.seq);

        match result {
            Ok(games) => self.apply_games(ticket.sport, games),
            Err(e) if e.is_fetch_failure() => self.apply_failure(ticket.sport, &e),
            Err(e) => self.apply_local_failure(ticket.sport, &e),
        }
    }

    /// Runs one fetch for `ticket` in place and applies its result.
    pub async fn run_fetch(&mut self, ticket: FetchTicket) -> RefreshOutcome {
        let result = self.source.fetch_games(ticket.sport).await;
        self.complete_fetch(ticket, result)
    }

    /// Refetches the displayed sport and waits for the outcome.
    pub async fn refresh_now(&mut self) -> RefreshOutcome {
        let ticket = self.refresh();
        self.run_fetch(ticket).await
    }

    /// Stops the refresh timer.
    pub fn shutdown(&mut self) {
        self.poller.disarm();
    }

    pub fn displayed_sport(&self) -> Sport {
        self.displayed
    }

    pub fn state(&self) -> WidgetState {
        self.state
    }

    pub fn snapshots(&self) -> &SnapshotStore<S> {
        &self.snapshots
    }

    pub fn poller(&self) -> &AdaptivePoller<T> {
        &self.poller
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn renderer_mut(&mut self) -> &mut R {
        &mut self.renderer
    }

    pub fn source(&self) -> &G {
        &self.source
    }

    fn ticket(&mut self) -> FetchTicket {
        self.issued += 1;
        FetchTicket {
            sport: self.displayed,
            seq: self.issued,
            issued_at: Utc::now(),
        }
    }

    fn begin_loading(&mut self, sport: Sport) -> FetchTicket {
        self.state = WidgetState::Loading { sport };
        self.render(&WidgetView::Loading { sport });

        let seed = self.cached_snapshot(sport);
        self.poller.rearm_from_snapshot(sport, seed.as_ref());
        self.ticket()
    }

    fn apply_games(&mut self, sport: Sport, games: Vec<Game>) -> RefreshOutcome {
        let snapshot = Snapshot::new(sport, games, Utc::now());

        let outcome = if snapshot.games.is_empty() {
            self.render(&WidgetView::NoGames {
                sport,
                reason: NoGamesReason::EmptyData,
            });
            RefreshOutcome::NoGames(NoGamesReason::EmptyData)
        } else if let Some(game) = select_relevant_game(&snapshot.games) {
            let card = GameCard::from_game(game, None);
            let game_id = card.game_id.clone();
            self.render(&WidgetView::Game(card));
            RefreshOutcome::Displayed { game_id }
        } else {
            self.render(&WidgetView::NoGames {
                sport,
                reason: NoGamesReason::NoRelevantGame,
            });
            RefreshOutcome::NoGames(NoGamesReason::NoRelevantGame)
        };

        if let Err(e) = self.snapshots.save_snapshot(&snapshot) {
            warn!("Could not store {sport} snapshot: {e}");
        }
        self.poller.rearm_from_snapshot(sport, Some(&snapshot));
        self.state = WidgetState::Displayed { sport };
        outcome
    }

    fn apply_failure(&mut self, sport: Sport, e: &AppError) -> RefreshOutcome {
        error!("Failed to fetch {sport} games: {e}");
        self.render(&WidgetView::fetch_error(sport));

        let cached = self.cached_snapshot(sport);
        let card = cached.as_ref().and_then(|snapshot| {
            select_relevant_game(&snapshot.games)
                .map(|game| GameCard::from_game(game, snapshot.fetched_at()))
        });

        match card {
            Some(card) => {
                info!("Showing cached {sport} game {}", card.game_id);
                let game_id = card.game_id.clone();
                self.render(&WidgetView::Game(card));
                self.state = WidgetState::Error {
                    sport,
                    showing_cached: true,
                };
                RefreshOutcome::ShowingCached { game_id }
            }
            None => {
                self.state = WidgetState::Error {
                    sport,
                    showing_cached: false,
                };
                RefreshOutcome::ErrorNoCache
            }
        }
    }

    /// Errors that did not come from the game API skip the cache fallback.
    fn apply_local_failure(&mut self, sport: Sport, e: &AppError) -> RefreshOutcome {
        error!("Could not load {sport} games: {e}");
        self.render(&WidgetView::fetch_error(sport));
        self.state = WidgetState::Error {
            sport,
            showing_cached: false,
        };
        RefreshOutcome::ErrorNoCache
    }

    fn cached_snapshot(&self, sport: Sport) -> Option<Snapshot> {
        match self.snapshots.load_snapshot(sport) {
            Ok(snapshot) => snapshot,
            Err(e) => {
                warn!("Ignoring unreadable {sport} snapshot: {e}");
                None
            }
        }
    }

    fn render(&mut self, view: &WidgetView) {
        if let Err(e) = self.renderer.render(view) {
            warn!("Failed to draw scoreboard: {e}");
        }
    }
}

impl<G, S, T, R> ScoreboardController<G, S, T, R>
where
    G: GameSource + Clone + Send + Sync + 'static,
{
    /// Detached fetch for `ticket`, suitable for `tokio::spawn`.
    pub fn fetch_for(
        &self,
        ticket: FetchTicket,
    ) -> impl Future<Output = (FetchTicket, Result<Vec<Game>, AppError>)> + Send + 'static {
        let source = self.source.clone();
        async move {
            let result = source.fetch_games(ticket.sport).await;
            (ticket, result)
        }
    }
}
