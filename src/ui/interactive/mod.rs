//! Interactive terminal mode
//!
//! - `terminal_manager`: raw mode and alternate screen
//! - `input_handler`: key bindings and the blocking input reader
//! - `core`: the event loop driving the scoreboard

mod core;
pub mod input_handler;
pub mod terminal_manager;

pub use core::run_interactive_ui;
pub use input_handler::{KeyAction, action_for_key};
pub use terminal_manager::{TerminalConfig, TerminalManager};
