//! Display record assembled from one update cycle's data.

use serde::Serialize;

use crate::classify::{description_for, icon_for, theme_for, Icon, Theme};
use crate::comfort::{aqi_text, humidity_text, visibility_text, wind_text};
use crate::types::{AirQualityData, DailyForecastEntry, ForecastData, PLACEHOLDER};

const AQI_UNAVAILABLE: &str = "N/A";

/// One upcoming-day card
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DayCard {
    pub weekday: String,
    pub icon: Icon,
    pub icon_url: String,
    pub high: String,
    pub low: String,
    pub description: &'static str,
}

/// Every text shown on the dashboard, already formatted
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardView {
    pub place: String,
    pub date: String,
    pub temperature: String,
    pub feels_like: String,
    pub humidity: String,
    pub humidity_text: &'static str,
    pub pressure: String,
    pub visibility: String,
    pub visibility_text: &'static str,
    pub wind: String,
    pub wind_text: &'static str,
    pub description: &'static str,
    pub aqi: String,
    pub aqi_text: &'static str,
    pub icon: Icon,
    pub icon_url: String,
    pub theme: Theme,
    pub forecast: Vec<DayCard>,
}

impl DashboardView {
    /// Format one cycle's data. `max_cards` bounds the number of upcoming
    /// days; today (index 0 of the daily series) never gets a card.
    pub fn build(
        place_name: &str,
        forecast: &ForecastData,
        air_quality: &AirQualityData,
        max_cards: usize,
    ) -> Self {
        let current = &forecast.current;

        let visibility_km = forecast
            .hourly_visibility
            .as_ref()
            .and_then(|series| series.value_nearest(current.time))
            .map(|meters| meters / 1000.0)
            .filter(|km| km.is_finite());

        let aqi = air_quality
            .hourly_aqi
            .as_ref()
            .and_then(|series| series.value_nearest(current.time))
            .filter(|v| v.is_finite());

        let humidity = finite(current.relative_humidity_pct);
        let wind = finite(current.wind_speed_kmh);

        let theme = match current.weather_code {
            Some(code) => theme_for(code, current.is_day),
            None if !current.is_day => Theme::Night,
            None => Theme::default(),
        };

        let icon = current
            .weather_code
            .map(|code| icon_for(code, current.is_day))
            .unwrap_or(Icon::NotAvailable);

        Self {
            place: if place_name.is_empty() {
                PLACEHOLDER.to_string()
            } else {
                place_name.to_string()
            },
            date: current
                .time
                .map(|t| t.format("%A, %B %-d").to_string())
                .unwrap_or_else(|| PLACEHOLDER.to_string()),
            temperature: with_unit(current.temperature_c, "°C"),
            feels_like: with_unit(current.apparent_temperature_c, "°C"),
            humidity: with_unit(humidity, "%"),
            humidity_text: humidity.map(humidity_text).unwrap_or(PLACEHOLDER),
            pressure: with_unit(current.pressure_msl, " mb"),
            visibility: with_unit(visibility_km, " km"),
            visibility_text: visibility_km.map(visibility_text).unwrap_or(PLACEHOLDER),
            wind: with_unit(wind, " km/h"),
            wind_text: wind.map(wind_text).unwrap_or(PLACEHOLDER),
            description: current
                .weather_code
                .map(description_for)
                .unwrap_or(PLACEHOLDER),
            aqi: aqi
                .map(|v| format!("{} AQI", v))
                .unwrap_or_else(|| AQI_UNAVAILABLE.to_string()),
            aqi_text: aqi_text(aqi),
            icon,
            icon_url: icon.url(),
            theme,
            forecast: day_cards(&forecast.daily, max_cards),
        }
    }
}

fn day_cards(daily: &[DailyForecastEntry], max_cards: usize) -> Vec<DayCard> {
    daily
        .iter()
        .skip(1)
        .take(max_cards)
        .map(|day| {
            let icon = day
                .weather_code
                .map(|code| icon_for(code, true))
                .unwrap_or(Icon::NotAvailable);
            DayCard {
                weekday: day
                    .date
                    .map(|d| d.format("%A").to_string())
                    .unwrap_or_else(|| PLACEHOLDER.to_string()),
                icon,
                icon_url: icon.url(),
                    high: with_unit(day.temp_max_c, "°"),
                low: with_unit(day.temp_min_c, "°"),
                description: day.weather_code.map(description_for).unwrap_or(PLACEHOLDER),
            }
        })
        .collect()
}

fn finite(value: Option<f64>) -> Option<f64> {
    value.filter(|v| v.is_finite())
}

/// Round half up, the way the dashboard has always displayed numbers
/// (-2.5 shows as -2, 2.5 as 3).
pub fn round_half_up(value: f64) -> f64 {
    (value + 0.5).floor()
}

/// Rounded value followed by `unit`, or the placeholder
fn with_unit(value: Option<f64>, unit: &str) -> String {
    match finite(value) {
        Some(v) => format!("{}{}", round_half_up(v), unit),
        None => PLACEHOLDER.to_string(),
    }
}
