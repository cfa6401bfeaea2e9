//! Start page scoreboard library
//!
//! Fetches game lists for a followed basketball team and a followed football
//! team, picks the one game worth showing, formats its status and keeps it
//! fresh with a refresh timer that speeds up while a game is live. The last
//! good list per sport is persisted so a failed fetch can fall back to it.
//!
//! # Examples
//!
//! ```rust,no_run
//! use startpage_scoreboard::config::Config;
//! use startpage_scoreboard::data_fetcher::api::HttpGameSource;
//! use startpage_scoreboard::data_fetcher::cache::FileStore;
//! use startpage_scoreboard::error::AppError;
//! use startpage_scoreboard::scoreboard::{ScoreboardController, TokioScheduler};
//! use startpage_scoreboard::ui::LatestViewRenderer;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), AppError> {
//!     let config = Config::load().await?;
//!     let (ticks, _rx) = tokio::sync::mpsc::unbounded_channel();
//!
//!     let mut scoreboard = ScoreboardController::new(
//!         HttpGameSource::from_config(&config)?,
//!         FileStore::open(config.resolved_data_dir())?,
//!         TokioScheduler::new(ticks),
//!         LatestViewRenderer::default(),
//!     );
//!
//!     let ticket = scoreboard.mount();
//!     scoreboard.run_fetch(ticket).await;
//!     for line in scoreboard.renderer().lines_or_loading(ticket.sport) {
//!         println!("{line}");
//!     }
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod constants;
pub mod data_fetcher;
pub mod error;
pub mod scoreboard;
pub mod testing_utils;
pub mod ui;

// Re-export commonly used types for convenience
pub use config::Config;
pub use data_fetcher::models::{Game, GameStatus, Sport};
pub use data_fetcher::processors::{format_status, select_relevant_game};
pub use error::AppError;
pub use scoreboard::{ScoreboardController, WidgetView, compute_interval};

/// Current version of the library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");
