//! Terminal setup and cleanup for interactive mode

use crate::error::AppError;
use crossterm::{
    cursor::{Hide, Show},
    execute,
    terminal::{
        EnterAlternateScreen, LeaveAlternateScreen, SetTitle, disable_raw_mode, enable_raw_mode,
    },
};
use std::io::{Stdout, stdout};

const WINDOW_TITLE: &str = "Start Page";

#[derive(Debug, Clone, Default)]
pub struct TerminalConfig {
    /// Keep the normal screen so log output and panics stay readable.
    pub debug_mode: bool,
}

/// Puts the terminal into raw, alternate-screen mode and restores it afterwards.
pub struct TerminalManager {
    config: TerminalConfig,
}

impl TerminalManager {
    pub fn new() -> Self {
        Self {
            config: TerminalConfig::default(),
        }
    }

    pub fn with_config(config: TerminalConfig) -> Self {
        Self { config }
    }

    pub fn setup_terminal(&self) -> Result<Stdout, AppError> {
        let mut out = stdout();
        enable_raw_mode()?;
        execute!(out, SetTitle(WINDOW_TITLE))?;
        if !self.config.debug_mode {
            execute!(out, EnterAlternateScreen, Hide)?;
        }
        Ok(out)
    }

    pub fn cleanup_terminal(&self, mut out: Stdout) -> Result<(), AppError> {
        if !self.config.debug_mode {
            execute!(out, Show, LeaveAlternateScreen)?;
        }
        disable_raw_mode()?;
        Ok(())
    }

    pub fn config(&self) -> &TerminalConfig {
        &self.config
    }
}

impl Default for TerminalManager {
    fn default() -> Self {
        Self::new()
    }
}
