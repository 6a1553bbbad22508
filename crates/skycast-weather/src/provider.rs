//! Forecast and air-quality fetching.
//!
//! Blocks of the forecast payload are decoded independently so that a broken
//! `hourly` or `daily` block only degrades the fields that depend on it. A
//! missing or malformed `current` block fails the whole fetch.

use std::sync::Arc;

use reqwest::Client;
use serde::Deserialize;
use tracing::instrument;

use crate::types::{
    parse_local_date, parse_local_time, AirQualityData, CurrentConditions, DailyForecastEntry,
    ForecastData, HourlySeries, Place, WeatherError,
};

const FORECAST_PATH: &str = "/v1/forecast";
const AIR_QUALITY_PATH: &str = "/v1/air-quality";

const CURRENT_FIELDS: &str = "temperature_2m,apparent_temperature,relative_humidity_2m,pressure_msl,wind_speed_10m,weather_code,is_day";
const HOURLY_FIELDS: &str = "visibility";
const DAILY_FIELDS: &str = "weather_code,temperature_2m_max,temperature_2m_min";

#[derive(Debug, Deserialize)]
struct ForecastResponse {
    current: Option<serde_json::Value>,
    hourly: Option<serde_json::Value>,
    daily: Option<serde_json::Value>,
}

#[derive(Debug, Deserialize)]
struct CurrentBlock {
    time: Option<String>,
    temperature_2m: Option<f64>,
    apparent_temperature: Option<f64>,
    relative_humidity_2m: Option<f64>,
    pressure_msl: Option<f64>,
    wind_speed_10m: Option<f64>,
    weather_code: Option<i32>,
    is_day: Option<DayFlag>,
}

/// `is_day` arrives as 0/1; a boolean is accepted as well.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum DayFlag {
    Bool(bool),
    Int(i64),
}

impl DayFlag {
    fn is_day(&self) -> bool {
        matches!(self, DayFlag::Bool(true) | DayFlag::Int(1))
    }
}

#[derive(Debug, Deserialize)]
struct HourlyVisibilityBlock {
    time: Vec<String>,
    visibility: Vec<Option<f64>>,
}

#[derive(Debug, Deserialize)]
struct DailyBlock {
    time: Vec<String>,
    #[serde(default)]
    weather_code: Vec<Option<i32>>,
    #[serde(default)]
    temperature_2m_max: Vec<Option<f64>>,
    #[serde(default)]
    temperature_2m_min: Vec<Option<f64>>,
}

#[derive(Debug, Deserialize)]
struct AirQualityResponse {
    hourly: Option<serde_json::Value>,
}

#[derive(Debug, Deserialize)]
struct HourlyAqiBlock {
    time: Vec<String>,
    us_aqi: Vec<Option<f64>>,
}

/// Read a JSON response body. A body that is not the expected JSON is a
/// `Parse` error, distinct from transport failures.
pub(crate) async fn read_json<T: serde::de::DeserializeOwned>(
    response: reqwest::Response,
) -> Result<T, WeatherError> {
    let body = response.text().await?;
    serde_json::from_str(&body).map_err(|e| {
        tracing::error!("Unexpected response body: {}", e);
        WeatherError::Parse(e.to_string())
    })
}

/// Decode one optional block, logging and dropping it if it is malformed
fn decode_block<T: serde::de::DeserializeOwned>(
    block: Option<serde_json::Value>,
    name: &str,
) -> Option<T> {
    match serde_json::from_value(block?) {
        Ok(decoded) => Some(decoded),
        Err(e) => {
            tracing::warn!("Ignoring malformed '{}' block: {}", name, e);
            None
        }
    }
}

impl ForecastResponse {
    fn into_forecast(self) -> Result<ForecastData, WeatherError> {
        let current = self.current.ok_or(WeatherError::NoCurrentWeather)?;
        let current: CurrentBlock = serde_json::from_value(current).map_err(|e| {
            tracing::error!("Malformed current block: {}", e);
            WeatherError::NoCurrentWeather
        })?;

        let hourly_visibility = decode_block::<HourlyVisibilityBlock>(self.hourly, "hourly")
            .and_then(|h| HourlySeries::from_raw(&h.time, h.visibility));

        let daily = decode_block::<DailyBlock>(self.daily, "daily")
            .map(DailyBlock::into_entries)
            .unwrap_or_default();

        Ok(ForecastData {
            current: CurrentConditions {
                time: current.time.as_deref().and_then(parse_local_time),
                temperature_c: current.temperature_2m,
                apparent_temperature_c: current.apparent_temperature,
                relative_humidity_pct: current.relative_humidity_2m,
                pressure_msl: current.pressure_msl,
                wind_speed_kmh: current.wind_speed_10m,
                weather_code: current.weather_code,
                is_day: current.is_day.as_ref().is_some_and(DayFlag::is_day),
            },
            hourly_visibility,
            daily,
        })
    }
}

impl DailyBlock {
    fn into_entries(self) -> Vec<DailyForecastEntry> {
        self.time
            .iter()
            .enumerate()
            .map(|(i, date)| DailyForecastEntry {
                date: parse_local_date(date),
                weather_code: self.weather_code.get(i).copied().flatten(),
                temp_max_c: self.temperature_2m_max.get(i).copied().flatten(),
                temp_min_c: self.temperature_2m_min.get(i).copied().flatten(),
            })
            .collect()
    }
}

impl AirQualityResponse {
    fn into_air_quality(self) -> AirQualityData {
        AirQualityData {
            hourly_aqi: decode_block::<HourlyAqiBlock>(self.hourly, "hourly")
                .and_then(|h| HourlySeries::from_raw(&h.time, h.us_aqi)),
        }
    }
}

/// Base URLs of the two data providers
#[derive(Debug, Clone)]
pub struct ProviderEndpoints {
    pub forecast_url: String,
    pub air_quality_url: String,
}

#[derive(Debug, Clone)]
pub struct WeatherProvider {
    client: Arc<Client>,
    endpoints: ProviderEndpoints,
    forecast_days: u8,
}

impl WeatherProvider {
    pub fn new(client: Arc<Client>, endpoints: ProviderEndpoints, forecast_days: u8) -> Self {
        Self {
            client,
            endpoints: ProviderEndpoints {
                forecast_url: endpoints.forecast_url.trim_end_matches('/').to_string(),
                air_quality_url: endpoints.air_quality_url.trim_end_matches('/').to_string(),
            },
            forecast_days,
        }
    }

    /// Fetch forecast and air quality concurrently. Both must succeed.
    #[instrument(skip(self, place), fields(place = %place.name), level = "info")]
    pub async fn fetch(
        &self,
        place: &Place,
    ) -> Result<(ForecastData, AirQualityData), WeatherError> {
        tokio::try_join!(
            self.fetch_forecast(place.latitude, place.longitude),
            self.fetch_air_quality(place.latitude, place.longitude),
        )
    }

    /// Current conditions, hourly visibility and the daily summary
    #[instrument(skip(self), level = "debug")]
    pub async fn fetch_forecast(
        &self,
        latitude: f64,
        longitude: f64,
    ) -> Result<ForecastData, WeatherError> {
        let url = format!("{}{}", self.endpoints.forecast_url, FORECAST_PATH);
        let response = self
            .client
            .get(&url)
            .query(&[
                ("latitude", latitude.to_string()),
                ("longitude", longitude.to_string()),
                ("current", CURRENT_FIELDS.to_string()),
                ("hourly", HOURLY_FIELDS.to_string()),
                ("daily", DAILY_FIELDS.to_string()),
                ("windspeed_unit", "kmh".to_string()),
                ("timezone", "auto".to_string()),
                ("forecast_days", self.forecast_days.to_string()),
            ])
            .send()
            .await?
            .error_for_status()?;

        let body: ForecastResponse = read_json(response).await?;
        let forecast = body.into_forecast()?;
        tracing::debug!("Forecast decoded with {} daily entries", forecast.daily.len());
        Ok(forecast)
    }

    /// Hourly US AQI
    #[instrument(skip(self), level = "debug")]
    pub async fn fetch_air_quality(
        &self,
        latitude: f64,
        longitude: f64,
    ) -> Result<AirQualityData, WeatherError> {
        let url = format!("{}{}", self.endpoints.air_quality_url, AIR_QUALITY_PATH);
        let response = self
            .client
            .get(&url)
            .query(&[
                ("latitude", latitude.to_string()),
                ("longitude", longitude.to_string()),
                ("hourly", "us_aqi".to_string()),
                ("timezone", "auto".to_string()),
            ])
            .send()
            .await?
            .error_for_status()?;

        let body: AirQualityResponse = read_json(response).await?;
        Ok(body.into_air_quality())
    }
}
