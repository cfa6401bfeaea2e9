use crate::data_fetcher::processors::weather_icon_code;
use chrono::{DateTime, Utc};
use serde::Deserialize;

/// Current-weather answer, trimmed to the fields the header shows.
#[derive(Debug, Clone, Deserialize)]
pub struct CurrentWeatherResponse {
    pub main: MainReadings,
    #[serde(default)]
    pub weather: Vec<WeatherCondition>,
    /// Observation time, unix seconds.
    #[serde(default)]
    pub dt: Option<i64>,
    #[serde(default)]
    pub sys: Option<SunTimes>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MainReadings {
    pub temp: f64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WeatherCondition {
    pub id: u32,
    #[serde(default)]
    pub description: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SunTimes {
    #[serde(default)]
    pub sunrise: Option<i64>,
    #[serde(default)]
    pub sunset: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WeatherReport {
    /// Whole degrees Fahrenheit, halves rounded up.
    pub temperature: i64,
    pub description: String,
    /// Icon code such as `10d` or `01n`.
    pub icon_code: String,
}

impl CurrentWeatherResponse {
    /// `None` when the response carries no weather condition. A missing
    /// observation time falls back to `now`.
    pub fn into_report(self, now: DateTime<Utc>) -> Option<WeatherReport> {
        let condition = self.weather.into_iter().next()?;
        let sys = self.sys.unwrap_or_default();
        let observed = self.dt.unwrap_or_else(|| now.timestamp());
        Some(WeatherReport {
            temperature: (self.main.temp + 0.5).floor() as i64,
            description: condition.description,
            icon_code: weather_icon_code(condition.id, observed, sys.sunrise, sys.sunset),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_into_report() {
        let response: CurrentWeatherResponse = serde_json::from_value(json!({
            "weather": [{"id": 501, "main": "Rain", "description": "moderate rain", "icon": "10d"}],
            "main": {"temp": 71.5, "humidity": 80},
            "dt": 1_709_312_400,
            "sys": {"sunrise": 1_709_296_800, "sunset": 1_709_338_800},
            "name": "Houston"
        }))
        .unwrap();

        let report = response.into_report(Utc::now()).unwrap();
        assert_eq!(report.temperature, 72);
        assert_eq!(report.description, "moderate rain");
        assert_eq!(report.icon_code, "10d");
    }

    #[test]
    fn test_negative_half_degree_rounds_up() {
        let response: CurrentWeatherResponse = serde_json::from_value(json!({
            "weather": [{"id": 600, "description": "light snow"}],
            "main": {"temp": -2.5},
            "dt": 100,
            "sys": {"sunrise": 50, "sunset": 200}
        }))
        .unwrap();
        assert_eq!(response.into_report(Utc::now()).unwrap().temperature, -2);
    }

    #[test]
    fn test_no_condition_is_no_report() {
        let response: CurrentWeatherResponse =
            serde_json::from_value(json!({"main": {"temp": 60.0}, "weather": []})).unwrap();
        assert!(response.into_report(Utc::now()).is_none());
    }
}
