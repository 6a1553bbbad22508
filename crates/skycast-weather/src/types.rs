use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use skycast_core::{NetworkError, ReqwestErrorExt};

/// Shown wherever a value is missing, unknown or not finite
pub const PLACEHOLDER: &str = "—";

/// A resolved place. Immutable once the resolver hands it out.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Place {
    /// Display form, e.g. "Paris, Île-de-France, France"
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
}

/// Geographic coordinate pair from a location source
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinates {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Fallback display name, e.g. "19.08, 72.88"
    pub fn label(&self) -> String {
        format!("{:.2}, {:.2}", self.latitude, self.longitude)
    }
}

/// Current conditions, verbatim from the provider's `current` block.
/// Every scalar may be absent.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CurrentConditions {
    pub time: Option<NaiveDateTime>,
    pub temperature_c: Option<f64>,
    pub apparent_temperature_c: Option<f64>,
    pub relative_humidity_pct: Option<f64>,
    pub pressure_msl: Option<f64>,
    pub wind_speed_kmh: Option<f64>,
    pub weather_code: Option<i32>,
    pub is_day: bool,
}

/// One day of the daily forecast
#[derive(Debug, Clone, PartialEq)]
pub struct DailyForecastEntry {
    pub date: Option<NaiveDate>,
    pub weather_code: Option<i32>,
    pub temp_max_c: Option<f64>,
    pub temp_min_c: Option<f64>,
}

/// Parallel hourly timestamps and values, only used for nearest-hour lookup
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HourlySeries {
    pub times: Vec<NaiveDateTime>,
    pub values: Vec<Option<f64>>,
}

impl HourlySeries {
    /// Build a series from raw provider arrays. Returns `None` if any
    /// timestamp fails to parse, since values are matched by index.
    pub fn from_raw(times: &[String], values: Vec<Option<f64>>) -> Option<Self> {
        let times = times
            .iter()
            .map(|t| parse_local_time(t))
            .collect::<Option<Vec<_>>>()?;
        Some(Self { times, values })
    }

    /// Value at the sample closest to `target`, if the series has one there
    pub fn value_nearest(&self, target: Option<NaiveDateTime>) -> Option<f64> {
        if self.times.is_empty() {
            return None;
        }
        let idx = crate::nearest::nearest_index(&self.times, target);
        self.values.get(idx).copied().flatten()
    }
}

/// Forecast payload after decoding
#[derive(Debug, Clone, PartialEq)]
pub struct ForecastData {
    pub current: CurrentConditions,
    /// Hourly visibility in meters
    pub hourly_visibility: Option<HourlySeries>,
    pub daily: Vec<DailyForecastEntry>,
}

/// Air-quality payload after decoding
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AirQualityData {
    /// Hourly US AQI
    pub hourly_aqi: Option<HourlySeries>,
}

/// Parse a provider timestamp. With `timezone=auto` the provider sends local
/// wall-clock times without an offset, usually without seconds.
pub fn parse_local_time(raw: &str) -> Option<NaiveDateTime> {
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M")
        .or_else(|_| NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S"))
        .ok()
}

/// Parse a provider calendar date ("2024-10-16")
pub fn parse_local_date(raw: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d").ok()
}

/// Location source errors
#[derive(Debug, thiserror::Error)]
pub enum LocationError {
    #[error("Location service unavailable")]
    ServiceUnavailable,
    #[error("Location request timed out")]
    Timeout,
}

/// Weather service errors
#[derive(Debug, thiserror::Error)]
pub enum WeatherError {
    #[error("Place not found: {0}")]
    PlaceNotFound(String),
    #[error("No current weather in response")]
    NoCurrentWeather,
    #[error("Network error: {0}")]
    Network(#[from] NetworkError),
    /// Response body was not the JSON the provider documents
    #[error("Parse error: {0}")]
    Parse(String),
    #[error("Session storage error: {0}")]
    Storage(String),
}

impl From<reqwest::Error> for WeatherError {
    fn from(err: reqwest::Error) -> Self {
        WeatherError::Network(err.into_network_error())
    }
}

impl WeatherError {
    /// User-friendly error message for display.
    pub fn user_message(&self) -> &'static str {
        match self {
            Self::PlaceNotFound(_) => "Place not found. Check the spelling and try again.",
            Self::NoCurrentWeather => "Weather data is incomplete. Please try again.",
            Self::Network(e) => e.user_message(),
            Self::Parse(_) => "Received an unexpected response. Please try again.",
            Self::Storage(_) => "The last place could not be remembered.",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(h: u32, m: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 10, 16)
            .unwrap()
            .and_hms_opt(h, m, 0)
            .unwrap()
    }

    #[test]
    fn test_parse_local_time_formats() {
        assert_eq!(parse_local_time("2024-10-16T14:15"), Some(at(14, 15)));
        assert_eq!(parse_local_time("2024-10-16T14:15:00"), Some(at(14, 15)));
        assert_eq!(parse_local_time("yesterday"), None);
    }

    #[test]
    fn test_coordinates_label() {
        assert_eq!(Coordinates::new(19.0761, 72.8775).label(), "19.08, 72.88");
        assert_eq!(Coordinates::new(-33.8688, 151.2093).label(), "-33.87, 151.21");
    }

    #[test]
    fn test_series_rejects_bad_timestamp() {
        let times = vec!["2024-10-16T14:00".to_string(), "garbage".to_string()];
        assert!(HourlySeries::from_raw(&times, vec![Some(1.0), Some(2.0)]).is_none());
    }

    #[test]
    fn test_series_value_nearest() {
        let times = vec![
            "2024-10-16T13:00".to_string(),
            "2024-10-16T14:00".to_string(),
            "2024-10-16T15:00".to_string(),
        ];
        let series =
            HourlySeries::from_raw(&times, vec![Some(10.0), Some(20.0), None]).unwrap();

        assert_eq!(series.value_nearest(Some(at(14, 15))), Some(20.0));
        // Nearest sample exists but carries no value
        assert_eq!(series.value_nearest(Some(at(15, 0))), None);
        // No target falls back to the first sample
        assert_eq!(series.value_nearest(None), Some(10.0));
    }

    #[test]
    fn test_series_shorter_values() {
        let times = vec![
            "2024-10-16T13:00".to_string(),
            "2024-10-16T14:00".to_string(),
        ];
        let series = HourlySeries::from_raw(&times, vec![Some(10.0)]).unwrap();
        assert_eq!(series.value_nearest(Some(at(14, 0))), None);
    }

    #[test]
    fn test_empty_series() {
        let series = HourlySeries::default();
        assert_eq!(series.value_nearest(Some(at(14, 0))), None);
    }

    #[test]
    fn test_place_not_found_message() {
        let err = WeatherError::PlaceNotFound("Atlantis".into());
        assert!(err.to_string().contains("Atlantis"));
        assert!(err.user_message().contains("not found"));
    }
}
