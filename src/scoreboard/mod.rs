//! The scoreboard widget: views, the adaptive refresh timer and the controller tying them together

pub mod controller;
pub mod poller;
pub mod view;

pub use controller::{FetchTicket, RefreshOutcome, ScoreboardController, WidgetState};
pub use poller::{
    AdaptivePoller, PollState, Scheduler, TaskHandle, Tick, TokioScheduler, compute_interval,
};
pub use view::{GameCard, NoGamesReason, Renderer, TeamLine, WidgetView};
