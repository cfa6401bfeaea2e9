pub mod game_selector;
pub mod game_status;
pub mod time_formatting;
pub mod weather_icon;

pub use game_selector::{select_relevant_game, select_relevant_game_on};
pub use game_status::{StatusDisplay, format_ordinal, format_rank, format_score, format_status};
pub use time_formatting::{
    extract_eastern_time, format_eastern_time, format_short_date, parse_scheduled_at,
};
pub use weather_icon::{icon_symbol, weather_icon_code, weather_icon_code_in};
