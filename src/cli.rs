use clap::Parser;
use clap::builder::styling::{AnsiColor, Effects, Styles};
use startpage_scoreboard::data_fetcher::models::Sport;

fn get_styles() -> Styles {
    Styles::styled()
        .header(AnsiColor::Cyan.on_default().effects(Effects::BOLD))
        .usage(AnsiColor::Cyan.on_default().effects(Effects::BOLD))
        .literal(AnsiColor::Green.on_default())
        .placeholder(AnsiColor::Yellow.on_default())
        .error(AnsiColor::Red.on_default().effects(Effects::BOLD))
        .valid(AnsiColor::Green.on_default())
        .invalid(AnsiColor::Red.on_default())
}

/// Non-interactive mode is used when any of these are set:
/// - --once
/// - a config operation
pub fn is_noninteractive_mode(args: &Args) -> bool {
    args.once || is_config_operation(args)
}

pub fn is_config_operation(args: &Args) -> bool {
    args.new_api_domain.is_some()
        || args.new_log_file_path.is_some()
        || args.clear_log_file_path
        || args.list_config
}

/// Start page scoreboard
///
/// A terminal start page with a greeting, a clock and a live scoreboard for
/// one followed basketball team and one followed football team.
///
/// In interactive mode (default):
/// - Press 't' or space to switch between basketball and football
/// - Press 'r' to refresh now
/// - Press 'q' or Esc to quit
///
/// The scoreboard refreshes automatically:
/// - Every 150 seconds (basketball) or 30 seconds (football) while a game is live
/// - Every 5 minutes otherwise
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
#[command(styles = get_styles())]
pub struct Args {
    /// Fetch the scoreboard once, print it and exit.
    #[arg(short, long)]
    pub once: bool,

    /// Show this sport instead of the last one displayed. The choice is remembered.
    #[arg(long, short = 's', value_parser = clap::value_parser!(Sport), help_heading = "Display Options")]
    pub sport: Option<Sport>,

    /// Update API domain in config. Will prompt for new domain if not provided.
    #[arg(
        long = "config",
        help_heading = "Configuration",
        value_name = "API_DOMAIN",
        num_args = 0..=1,
        default_missing_value = ""
    )]
    pub new_api_domain: Option<String>,

    /// Update log file path in config. This sets a persistent custom log file location.
    #[arg(long = "set-log-file", help_heading = "Configuration")]
    pub new_log_file_path: Option<String>,

    /// Clear the custom log file path from config. This reverts to using the default log location.
    #[arg(long = "clear-log-file", help_heading = "Configuration")]
    pub clear_log_file_path: bool,

    /// List current configuration settings
    #[arg(long = "list-config", short = 'l', help_heading = "Configuration")]
    pub list_config: bool,

    /// Keep the normal screen in interactive mode. With --once, also log to stdout.
    #[arg(long = "debug", help_heading = "Debug")]
    pub debug: bool,

    /// Specify a custom log file path. If not provided, logs will be written to the default location.
    #[arg(long = "log-file", help_heading = "Debug")]
    pub log_file: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_interactive() {
        let args = Args::parse_from(["startpage"]);
        assert!(!is_noninteractive_mode(&args));
        assert!(args.sport.is_none());
    }

    #[test]
    fn test_sport_flag_parses() {
        let args = Args::parse_from(["startpage", "--sport", "football"]);
        assert_eq!(args.sport, Some(Sport::Football));
        assert!(Args::try_parse_from(["startpage", "--sport", "hockey"]).is_err());
    }

    #[test]
    fn test_config_without_value_prompts() {
        let args = Args::parse_from(["startpage", "--config"]);
        assert_eq!(args.new_api_domain.as_deref(), Some(""));
        assert!(is_config_operation(&args));
        assert!(is_noninteractive_mode(&args));
    }

    #[test]
    fn test_once_is_noninteractive() {
        assert!(is_noninteractive_mode(&Args::parse_from(["startpage", "--once"])));
        assert!(is_noninteractive_mode(&Args::parse_from([
            "startpage", "--once", "--debug"
        ])));
    }

    #[test]
    fn test_debug_alone_stays_interactive() {
        let args = Args::parse_from(["startpage", "--debug"]);
        assert!(args.debug);
        assert!(!is_noninteractive_mode(&args));
    }
}
