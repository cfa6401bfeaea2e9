//! Greeting, clock, date and current weather shown above the scoreboard

use crate::constants::weather::UNAVAILABLE_MESSAGE;
use crate::data_fetcher::models::WeatherReport;
use crate::data_fetcher::processors::icon_symbol;
use crate::error::AppError;
use chrono::{DateTime, TimeZone, Timelike};
use tracing::warn;

/// Greeting for an hour of the day (0-23).
pub fn greeting_for_hour(hour: u32) -> &'static str {
    match hour {
        5..=11 => "Good morning!",
        12..=17 => "Good afternoon.",
        _ => "Good evening...",
    }
}

/// `HH:MM:SS`, 24-hour.
pub fn format_clock<Tz: TimeZone>(now: &DateTime<Tz>) -> String
where
    Tz::Offset: std::fmt::Display,
{
    now.format("%H:%M:%S").to_string()
}

/// `Sunday, October 18, 2026`
pub fn format_long_date<Tz: TimeZone>(now: &DateTime<Tz>) -> String
where
    Tz::Offset: std::fmt::Display,
{
    now.format("%A, %B %-d, %Y").to_string()
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderView {
    pub greeting: &'static str,
    pub clock: String,
    pub date: String,
}

impl HeaderView {
    pub fn at<Tz: TimeZone>(now: &DateTime<Tz>) -> Self
    where
        Tz::Offset: std::fmt::Display,
    {
        Self {
            greeting: greeting_for_hour(now.hour()),
            clock: format_clock(now),
            date: format_long_date(now),
        }
    }
}

/// The weather row under the date.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WeatherLine {
    Loading,
    Report(WeatherReport),
    Unavailable,
}

impl WeatherLine {
    /// A failed fetch is logged and shown as unavailable.
    pub fn from_result(result: Result<WeatherReport, AppError>) -> Self {
        match result {
            Ok(report) => Self::Report(report),
            Err(e) => {
                warn!("Error fetching weather: {e}");
                Self::Unavailable
            }
        }
    }

    pub fn text(&self) -> String {
        match self {
            Self::Loading => "Loading weather...".to_string(),
            Self::Report(report) => format!(
                "{} {}°F  {}",
                icon_symbol(&report.icon_code),
                report.temperature,
                report.description
            ),
            Self::Unavailable => UNAVAILABLE_MESSAGE.to_string(),
        }
    }
}
