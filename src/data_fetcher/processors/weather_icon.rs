//! Weather condition id → icon code, split by day and night

use chrono::{DateTime, Local, TimeZone, Timelike};

/// Icon code (`01d`, `10n`, ...) for a weather condition id observed at `dt`.
///
/// Day or night comes from `sunrise`/`sunset` (unix seconds). When either is
/// missing or zero, 06:00-17:59 local time counts as day.
pub fn weather_icon_code(id: u32, dt: i64, sunrise: Option<i64>, sunset: Option<i64>) -> String {
    weather_icon_code_in(id, dt, sunrise, sunset, &Local)
}

/// [`weather_icon_code`] with the fallback day window read in `tz`.
pub fn weather_icon_code_in<Tz: TimeZone>(
    id: u32,
    dt: i64,
    sunrise: Option<i64>,
    sunset: Option<i64>,
    tz: &Tz,
) -> String {
    let time_of_day = if is_daytime(dt, sunrise, sunset, tz) { 'd' } else { 'n' };
    format!("{}{time_of_day}", condition_icon(id))
}

fn condition_icon(id: u32) -> &'static str {
    match id {
        200..=299 => "11",
        300..=399 => "09",
        500..=509 => "10",
        510..=599 => "09",
        600..=699 => "13",
        700..=799 => "50",
        800 => "01",
        801 => "02",
        802 => "03",
        803 | 804 => "04",
        _ => "01",
    }
}

fn is_daytime<Tz: TimeZone>(dt: i64, sunrise: Option<i64>, sunset: Option<i64>, tz: &Tz) -> bool {
    let sunrise = sunrise.filter(|t| *t != 0);
    let sunset = sunset.filter(|t| *t != 0);
    match (sunrise, sunset) {
        (Some(rise), Some(set)) => dt >= rise && dt < set,
        _ => DateTime::from_timestamp(dt, 0)
            .map(|at| at.with_timezone(tz).hour())
            .is_none_or(|hour| (6..18).contains(&hour)),
    }
}

/// Single-cell symbol for an icon code, for drawing in a terminal.
pub fn icon_symbol(icon_code: &str) -> &'static str {
    let night = icon_code.ends_with('n');
    match icon_code.get(..2) {
        Some("01") if night => "☾",
        Some("01") => "☀",
        Some("02") => "⛅",
        Some("03") | Some("04") => "☁",
        Some("09") | Some("10") => "☂",
        Some("11") => "⚡",
        Some("13") => "❄",
        Some("50") => "≡",
        _ => "·",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    const SUNRISE: i64 = 1_000;
    const SUNSET: i64 = 5_000;

    fn day(id: u32) -> String {
        weather_icon_code(id, 3_000, Some(SUNRISE), Some(SUNSET))
    }

    #[test]
    fn test_condition_ranges() {
        let table = [
            (200, "11d"),
            (232, "11d"),
            (300, "09d"),
            (321, "09d"),
            (500, "10d"),
            (504, "10d"),
            (511, "09d"),
            (531, "09d"),
            (600, "13d"),
            (622, "13d"),
            (701, "50d"),
            (781, "50d"),
            (800, "01d"),
            (801, "02d"),
            (802, "03d"),
            (803, "04d"),
            (804, "04d"),
        ];
        for (id, expected) in table {
            assert_eq!(day(id), expected, "condition {id}");
        }
    }

    #[test]
    fn test_unknown_condition_defaults_to_clear() {
        assert_eq!(day(100), "01d");
        assert_eq!(day(450), "01d");
        assert_eq!(day(900), "01d");
    }

    #[test]
    fn test_sunrise_and_sunset_bounds() {
        assert_eq!(weather_icon_code(800, SUNRISE, Some(SUNRISE), Some(SUNSET)), "01d");
        assert_eq!(weather_icon_code(800, SUNRISE - 1, Some(SUNRISE), Some(SUNSET)), "01n");
        assert_eq!(weather_icon_code(800, SUNSET, Some(SUNRISE), Some(SUNSET)), "01n");
        assert_eq!(weather_icon_code(500, SUNSET - 1, Some(SUNRISE), Some(SUNSET)), "10d");
    }

    #[test]
    fn test_missing_sun_times_use_local_hours() {
        // 2024-03-01 12:00 and 03:00 UTC
        let noon = 1_709_294_400;
        let three_am = 1_709_262_000;
        assert_eq!(weather_icon_code_in(800, noon, None, Some(SUNSET), &Utc), "01d");
        assert_eq!(weather_icon_code_in(800, three_am, Some(0), Some(0), &Utc), "01n");
        assert_eq!(weather_icon_code_in(800, three_am + 3 * 3600, None, None, &Utc), "01d");
        assert_eq!(weather_icon_code_in(800, noon + 6 * 3600, None, None, &Utc), "01n");
    }

    #[test]
    fn test_icon_symbols() {
        assert_eq!(icon_symbol("01d"), "☀");
        assert_eq!(icon_symbol("01n"), "☾");
        assert_eq!(icon_symbol("10n"), "☂");
        assert_eq!(icon_symbol("13d"), "❄");
        assert_eq!(icon_symbol(""), "·");
    }
}
