use crate::cli::Args;
use startpage_scoreboard::config::Config;
use startpage_scoreboard::error::AppError;
use startpage_scoreboard::ui::{self, TerminalConfig, TerminalManager};

/// `--debug` keeps the normal screen so panics and stray output stay readable.
fn terminal_config(args: &Args) -> TerminalConfig {
    TerminalConfig {
        debug_mode: args.debug,
    }
}

/// Run the interactive application flow.
///
/// - Sets up terminal raw mode and alternate screen
/// - Runs the scoreboard event loop
/// - Restores the terminal even when the loop fails
pub async fn run_interactive(args: &Args, config: &Config) -> Result<(), AppError> {
    let terminal = TerminalManager::with_config(terminal_config(args));
    let out = terminal.setup_terminal()?;

    let result = ui::run_interactive_ui(config, std::io::stdout(), args.sport).await;

    terminal.cleanup_terminal(out)?;
    result
}
