use crate::cli::Args;
use chrono::Local;
use startpage_scoreboard::config::Config;
use startpage_scoreboard::config::user_prompts::prompt_for_api_domain;
use startpage_scoreboard::data_fetcher::api::{HttpGameSource, HttpWeatherSource, WeatherSource};
use startpage_scoreboard::data_fetcher::cache::FileStore;
use startpage_scoreboard::error::AppError;
use startpage_scoreboard::scoreboard::{ScoreboardController, TokioScheduler};
use startpage_scoreboard::ui::{HeaderView, LatestViewRenderer, WeatherLine};
use tokio::sync::mpsc;
use tracing::info;

/// Handles the --list-config command.
pub async fn handle_list_config_command() -> Result<(), AppError> {
    Config::display().await
}

/// Handles configuration update commands (--config, --set-log-file, --clear-log-file).
///
/// An empty `--config` value prompts for the domain.
pub async fn handle_config_update_command(args: &Args) -> Result<(), AppError> {
    let config_path = Config::get_config_path();
    let mut config = Config::load_from_path(&config_path)
        .await
        .unwrap_or_default();

    if let Some(new_domain) = &args.new_api_domain {
        config.api_domain = if new_domain.trim().is_empty() {
            prompt_for_api_domain().await?
        } else {
            new_domain.trim().to_string()
        };
    }

    if let Some(new_log_path) = &args.new_log_file_path {
        config.log_file_path = Some(new_log_path.clone());
    } else if args.clear_log_file_path {
        config.log_file_path = None;
        println!("Custom log file path cleared. Using default location.");
    }

    config.validate()?;
    config.save().await?;
    println!("Config updated successfully!");

    Ok(())
}

/// Handles the --once command.
///
/// Loads the displayed sport, fetches it and the weather once and prints the
/// resulting widget. A failed fetch still prints: the cached game if there is
/// one, else the error message.
pub async fn handle_once_command(args: &Args, config: &Config) -> Result<(), AppError> {
    let source = HttpGameSource::from_config(config)?;
    let weather_source = HttpWeatherSource::from_config(config)?;
    let store = FileStore::open(config.resolved_data_dir())?;
    let (tick_tx, _tick_rx) = mpsc::unbounded_channel();

    let mut controller = ScoreboardController::new(
        source,
        store,
        TokioScheduler::new(tick_tx),
        LatestViewRenderer::default(),
    );

    let ticket = match args.sport {
        Some(sport) => controller.show_sport(sport),
        None => controller.mount(),
    };
    let weather = async {
        match &weather_source {
            Some(source) => WeatherLine::from_result(source.fetch_current().await),
            None => WeatherLine::Unavailable,
        }
    };
    let (outcome, weather) = tokio::join!(controller.run_fetch(ticket), weather);
    controller.shutdown();
    info!("One-shot {} refresh finished: {outcome:?}", ticket.sport);

    let header = HeaderView::at(&Local::now());
    println!("{}  {}", header.greeting, header.clock);
    println!("{}", header.date);
    println!("{}", weather.text());
    println!();
    for line in controller.renderer().lines_or_loading(ticket.sport) {
        println!("{line}");
    }

    Ok(())
}
