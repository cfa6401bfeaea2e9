pub mod colors;
pub mod header;
pub mod interactive;
pub mod renderer;

pub use header::{HeaderView, WeatherLine, format_clock, format_long_date, greeting_for_hour};
pub use interactive::{TerminalConfig, TerminalManager, run_interactive_ui};
pub use renderer::{LatestViewRenderer, TerminalRenderer, styled_lines};
