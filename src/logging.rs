use crate::cli::{Args, is_noninteractive_mode};
use startpage_scoreboard::config::Config;
use startpage_scoreboard::constants::env_vars;
use startpage_scoreboard::error::AppError;
use std::io::stdout;
use std::path::Path;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

const LOG_FILE_NAME: &str = "startpage_scoreboard.log";
const DEFAULT_DIRECTIVE: &str = "startpage_scoreboard=info";

fn env_filter() -> Result<EnvFilter, AppError> {
    let directive = DEFAULT_DIRECTIVE
        .parse()
        .map_err(|e| AppError::log_setup_error(format!("Invalid log directive: {e}")))?;
    Ok(EnvFilter::from_default_env().add_directive(directive))
}

/// Log file chosen without prompting: `--log-file`, then the environment, then the config file.
async fn configured_log_path(args: &Args) -> Option<String> {
    if let Some(path) = &args.log_file {
        return Some(path.clone());
    }
    if let Ok(path) = std::env::var(env_vars::LOG_FILE) {
        return Some(path);
    }
    let config_path = Config::get_config_path();
    if !Path::new(&config_path).exists() {
        return None;
    }
    Config::load_from_path(&config_path)
        .await
        .ok()
        .and_then(|config| config.log_file_path)
}

/// Sets up logging for the run.
///
/// - Interactive mode: logs only to file
/// - Once mode without debug: logs only to file
/// - Other non-interactive modes: logs to both stdout and file
///
/// Returns the log file path and the guard that must be kept alive so
/// buffered lines are flushed on exit.
pub async fn setup_logging(args: &Args) -> Result<(String, WorkerGuard), AppError> {
    let (log_dir, log_file_name) = match configured_log_path(args).await {
        Some(custom_path) => {
            let path = Path::new(&custom_path);
            let parent = path.parent().unwrap_or(Path::new("."));
            let file_name = path
                .file_name()
                .and_then(|n| n.to_str())
                .unwrap_or(LOG_FILE_NAME);
            (parent.to_string_lossy().to_string(), file_name.to_string())
        }
        None => (Config::get_log_dir_path(), LOG_FILE_NAME.to_string()),
    };

    if !Path::new(&log_dir).exists() {
        tokio::fs::create_dir_all(&log_dir).await.map_err(|e| {
            AppError::log_setup_error(format!("Failed to create log directory: {e}"))
        })?;
    }

    let file_appender = RollingFileAppender::new(Rotation::DAILY, &log_dir, &log_file_name);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    let file_layer = fmt::Layer::new()
        .with_writer(non_blocking)
        .with_ansi(false)
        .with_filter(env_filter()?);
    let registry = tracing_subscriber::registry().with(file_layer);

    let log_to_stdout = is_noninteractive_mode(args) && !(args.once && !args.debug);
    let installed = if log_to_stdout {
        registry
            .with(
                fmt::Layer::new()
                    .with_writer(stdout)
                    .with_ansi(true)
                    .with_filter(env_filter()?),
            )
            .try_init()
    } else {
        registry.try_init()
    };
    installed.map_err(|e| AppError::log_setup_error(format!("Failed to install subscriber: {e}")))?;

    let log_file_path = format!("{log_dir}/{log_file_name}");
    Ok((log_file_path, guard))
}
