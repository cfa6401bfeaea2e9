//! Interactive event loop.
//!
//! One task owns the controller and multiplexes key presses, refresh timer
//! ticks, fetch completions, the once-a-second header clock and the half-hourly
//! weather refresh. Fetches run as spawned tasks and report back through
//! channels, so a slow API never blocks the clock or the keyboard. Weather
//! results only ever touch the weather row.

use super::input_handler::{KeyAction, spawn_input_reader};
use crate::config::Config;
use crate::constants::{polling, weather};
use crate::data_fetcher::api::{
    GameSource, HttpGameSource, HttpWeatherSource, WeatherSource,
};
use crate::data_fetcher::cache::{FileStore, KeyValueStore};
use crate::data_fetcher::models::{Game, Sport, WeatherReport};
use crate::error::AppError;
use crate::scoreboard::{FetchTicket, Scheduler, ScoreboardController, Tick, TokioScheduler};
use crate::ui::header::{HeaderView, WeatherLine};
use crate::ui::renderer::TerminalRenderer;
use chrono::Local;
use std::io::Write;
use std::time::Duration;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

type FetchCompletion = (FetchTicket, Result<Vec<Game>, AppError>);

fn spawn_fetch<G, S, T, R>(
    controller: &ScoreboardController<G, S, T, R>,
    ticket: FetchTicket,
    completions: &mpsc::UnboundedSender<FetchCompletion>,
) where
    G: GameSource + Clone + Send + Sync + 'static,
{
    let fetch = controller.fetch_for(ticket);
    let completions = completions.clone();
    tokio::spawn(async move {
        let completion = fetch.await;
        if completions.send(completion).is_err() {
            debug!("Scoreboard closed before {} fetch finished", ticket.sport);
        }
    });
}

fn spawn_weather_fetch(
    source: &HttpWeatherSource,
    completions: &mpsc::UnboundedSender<Result<WeatherReport, AppError>>,
) {
    let source = source.clone();
    let completions = completions.clone();
    tokio::spawn(async move {
        let result = source.fetch_current().await;
        if completions.send(result).is_err() {
            debug!("Start page closed before weather fetch finished");
        }
    });
}

fn draw_weather<G, S, T, W>(
    controller: &mut ScoreboardController<G, S, T, TerminalRenderer<W>>,
    line: WeatherLine,
) where
    G: GameSource,
    S: KeyValueStore,
    T: Scheduler,
    W: Write,
{
    if let Err(e) = controller.renderer_mut().draw_weather(line) {
        warn!("Failed to draw weather: {e}");
    }
}

fn draw_header<G, S, T, W>(controller: &mut ScoreboardController<G, S, T, TerminalRenderer<W>>)
where
    G: GameSource,
    S: KeyValueStore,
    T: Scheduler,
    W: Write,
{
    let header = HeaderView::at(&Local::now());
    if let Err(e) = controller.renderer_mut().draw_header(header) {
        warn!("Failed to draw header: {e}");
    }
}

/// Runs the scoreboard until the user quits. The terminal must already be set up.
pub async fn run_interactive_ui<W: Write>(
    config: &Config,
    out: W,
    sport_override: Option<Sport>,
) -> Result<(), AppError> {
    let source = HttpGameSource::from_config(config)?;
    let store = FileStore::open(config.resolved_data_dir())?;
    let (tick_tx, mut tick_rx) = mpsc::unbounded_channel::<Tick>();
    let (fetch_tx, mut fetch_rx) = mpsc::unbounded_channel::<FetchCompletion>();
    let (key_tx, mut key_rx) = mpsc::unbounded_channel::<KeyAction>();
    let (weather_tx, mut weather_rx) = mpsc::unbounded_channel();
    let weather_source = HttpWeatherSource::from_config(config)?;

    let mut controller = ScoreboardController::new(
        source,
        store,
        TokioScheduler::new(tick_tx),
        TerminalRenderer::new(out),
    );

    if let Err(e) = controller.renderer_mut().redraw() {
        warn!("Failed to clear screen: {e}");
    }
    draw_header(&mut controller);
    draw_weather(
        &mut controller,
        match weather_source {
            Some(_) => WeatherLine::Loading,
            None => WeatherLine::Unavailable,
        },
    );
    let ticket = match sport_override {
        Some(sport) => controller.show_sport(sport),
        None => controller.mount(),
    };
    spawn_fetch(&controller, ticket, &fetch_tx);

    let input = spawn_input_reader(key_tx);
    let mut clock = tokio::time::interval(Duration::from_millis(polling::CLOCK_TICK_MS));
    let mut weather_refresh =
        tokio::time::interval(Duration::from_secs(weather::REFRESH_SECONDS));

    loop {
        tokio::select! {
            Some(action) = key_rx.recv() => match action {
                KeyAction::Quit => {
                    info!("Quit requested");
                    break;
                }
                KeyAction::ToggleSport => {
                    let ticket = controller.toggle();
                    spawn_fetch(&controller, ticket, &fetch_tx);
                }
                KeyAction::Refresh => {
                    let ticket = controller.refresh();
                    spawn_fetch(&controller, ticket, &fetch_tx);
                }
                KeyAction::Redraw => {
                    if let Err(e) = controller.renderer_mut().redraw() {
                        warn!("Failed to redraw after resize: {e}");
                    }
                }
            },
            Some(tick) = tick_rx.recv() => {
                if let Some(ticket) = controller.on_tick(tick) {
                    spawn_fetch(&controller, ticket, &fetch_tx);
                }
            },
            Some((ticket, result)) = fetch_rx.recv() => {
                let outcome = controller.complete_fetch(ticket, result);
                debug!("Fetch for {} finished: {outcome:?}", ticket.sport);
            },
            _ = clock.tick() => draw_header(&mut controller),
            _ = weather_refresh.tick(), if weather_source.is_some() => {
                if let Some(source) = &weather_source {
                    spawn_weather_fetch(source, &weather_tx);
                }
            },
            Some(result) = weather_rx.recv() => {
                draw_weather(&mut controller, WeatherLine::from_result(result));
            },
            else => break,
        }
    }

    controller.shutdown();
    drop(key_rx);
    if let Err(e) = input.await {
        warn!("Input reader ended abnormally: {e}");
    }
    Ok(())
}
