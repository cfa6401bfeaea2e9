use crate::data_fetcher::models::ScheduledAt;
use crate::error::AppError;
use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Utc};
use chrono_tz::America::New_York;
use regex::Regex;
use std::sync::LazyLock;

/// Matches tip-off times the basketball upstream embeds in its status text,
/// e.g. "Sat 7:00 pm ET".
static EASTERN_TIME_TOKEN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\d+:\d+\s+(am|pm)\s+ET").expect("static regex is valid")
});

const NAIVE_FORMATS: [&str; 3] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M"];

/// Parses an upstream game date into a [`ScheduledAt`].
///
/// Accepted shapes:
/// - RFC 3339 with an offset or `Z` (`2024-03-01T19:00:00Z`)
/// - minute precision with `Z` (`2024-03-01T15:00Z`, as sent for football)
/// - naive wall-clock times, read as US Eastern (`2024-03-01T19:00:00`)
/// - bare dates (`2024-03-01`)
///
/// # Examples
///
/// ```
/// use startpage_scoreboard::data_fetcher::models::ScheduledAt;
/// use startpage_scoreboard::data_fetcher::processors::parse_scheduled_at;
///
/// let at = parse_scheduled_at("2024-03-01").unwrap();
/// assert!(matches!(at, ScheduledAt::Date(_)));
/// ```
pub fn parse_scheduled_at(raw: &str) -> Result<ScheduledAt, AppError> {
    let raw = raw.trim();

    if let Ok(instant) = DateTime::parse_from_rfc3339(raw) {
        return Ok(ScheduledAt::Instant(instant.with_timezone(&Utc)));
    }

    if let Some(without_zulu) = raw.strip_suffix('Z') {
        for format in NAIVE_FORMATS {
            if let Ok(naive) = NaiveDateTime::parse_from_str(without_zulu, format) {
                return Ok(ScheduledAt::Instant(Utc.from_utc_datetime(&naive)));
            }
        }
    }

    for format in NAIVE_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, format) {
            return eastern_wall_clock_to_utc(naive, raw).map(ScheduledAt::Instant);
        }
    }

    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Ok(ScheduledAt::Date(date));
    }

    Err(AppError::datetime_parse_error(format!(
        "Unrecognized game date '{raw}'"
    )))
}

fn eastern_wall_clock_to_utc(naive: NaiveDateTime, raw: &str) -> Result<DateTime<Utc>, AppError> {
    match New_York.from_local_datetime(&naive) {
        chrono::LocalResult::Single(dt) => Ok(dt.with_timezone(&Utc)),
        // Fall-back hour: take the earlier instant
        chrono::LocalResult::Ambiguous(earliest, _) => Ok(earliest.with_timezone(&Utc)),
        chrono::LocalResult::None => Err(AppError::datetime_parse_error(format!(
            "'{raw}' does not exist in US Eastern time"
        ))),
    }
}

/// Short weekday/month/day label in US Eastern time, e.g. `Fri, Mar 1`.
pub fn format_short_date(scheduled: &ScheduledAt) -> String {
    let date = scheduled.date_in(&New_York);
    date.format("%a, %b %-d").to_string()
}

/// Clock time in US Eastern with a lowercase meridiem, e.g. `7:00 pm ET`.
///
/// Returns `None` for date-only schedules.
pub fn format_eastern_time(scheduled: &ScheduledAt) -> Option<String> {
    match scheduled {
        ScheduledAt::Instant(instant) => Some(format!(
            "{} ET",
            instant.with_timezone(&New_York).format("%-I:%M %P")
        )),
        ScheduledAt::Date(_) => None,
    }
}

/// Pulls a `h:mm am ET` token out of free-form upstream status text.
pub fn extract_eastern_time(status_text: &str) -> Option<&str> {
    EASTERN_TIME_TOKEN
        .find(status_text)
        .map(|token| token.as_str())
}
