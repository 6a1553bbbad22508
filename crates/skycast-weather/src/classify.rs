//! WMO weather code classification: description text, icon and theme.
//!
//! See: https://open-meteo.com/en/docs#weathervariables

use serde::{Deserialize, Serialize};

use crate::types::PLACEHOLDER;

const METEOCONS_BASE: &str =
    "https://cdn.jsdelivr.net/gh/basmilius/weather-icons/production/fill/all";

/// Short description for a WMO code, or the placeholder for unknown codes
pub fn description_for(code: i32) -> &'static str {
    match code {
        0 => "Clear",
        1 => "Mainly clear",
        2 => "Partly cloudy",
        3 => "Overcast",
        45 => "Fog",
        48 => "Rime fog",
        51 => "Light drizzle",
        53 => "Drizzle",
        55 => "Dense drizzle",
        56 => "Freezing drizzle",
        57 => "Dense freezing drizzle",
        61 => "Light rain",
        63 => "Rain",
        65 => "Heavy rain",
        66 => "Freezing rain",
        67 => "Heavy freezing rain",
        71 => "Light snow",
        73 => "Snow",
        75 => "Heavy snow",
        77 => "Snow grains",
        80 => "Rain showers",
        81 => "Showers",
        82 => "Violent showers",
        85 => "Snow showers",
        86 => "Heavy snow showers",
        95 => "Thunderstorm",
        96 => "Thunder w/ hail",
        99 => "Thunder w/ heavy hail",
        _ => PLACEHOLDER,
    }
}

/// Coarse condition buckets shared by icons and themes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WeatherCondition {
    Clear,
    PartlyCloudy,
    Overcast,
    Fog,
    Drizzle,
    Rain,
    Snow,
    Thunderstorm,
}

impl WeatherCondition {
    /// Bucket a WMO code; `None` for codes outside every bucket
    pub fn from_wmo_code(code: i32) -> Option<Self> {
        match code {
            0 => Some(Self::Clear),
            1 | 2 => Some(Self::PartlyCloudy),
            3 => Some(Self::Overcast),
            45 | 48 => Some(Self::Fog),
            51 | 53 | 55 | 56 | 57 => Some(Self::Drizzle),
            61 | 63 | 65 | 66 | 67 | 80 | 81 | 82 => Some(Self::Rain),
            71 | 73 | 75 | 77 | 85 | 86 => Some(Self::Snow),
            95 | 96 | 99 => Some(Self::Thunderstorm),
            _ => None,
        }
    }
}

/// Meteocons icon identifiers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Icon {
    ClearDay,
    ClearNight,
    PartlyCloudyDay,
    PartlyCloudyNight,
    Overcast,
    Fog,
    Drizzle,
    Rain,
    Snow,
    Thunderstorms,
    NotAvailable,
}

impl Icon {
    pub fn name(&self) -> &'static str {
        match self {
            Self::ClearDay => "clear-day",
            Self::ClearNight => "clear-night",
            Self::PartlyCloudyDay => "partly-cloudy-day",
            Self::PartlyCloudyNight => "partly-cloudy-night",
            Self::Overcast => "overcast",
            Self::Fog => "fog",
            Self::Drizzle => "drizzle",
            Self::Rain => "rain",
            Self::Snow => "snow",
            Self::Thunderstorms => "thunderstorms",
            Self::NotAvailable => "not-available",
        }
    }

    /// URL of the filled SVG for this icon
    pub fn url(&self) -> String {
        format!("{}/{}.svg", METEOCONS_BASE, self.name())
    }
}

/// Icon for a WMO code. Only clear and partly-cloudy differ between day and
/// night.
pub fn icon_for(code: i32, is_day: bool) -> Icon {
    match WeatherCondition::from_wmo_code(code) {
        Some(WeatherCondition::Clear) if is_day => Icon::ClearDay,
        Some(WeatherCondition::Clear) => Icon::ClearNight,
        Some(WeatherCondition::PartlyCloudy) if is_day => Icon::PartlyCloudyDay,
        Some(WeatherCondition::PartlyCloudy) => Icon::PartlyCloudyNight,
        Some(WeatherCondition::Overcast) => Icon::Overcast,
        Some(WeatherCondition::Fog) => Icon::Fog,
        Some(WeatherCondition::Drizzle) => Icon::Drizzle,
        Some(WeatherCondition::Rain) => Icon::Rain,
        Some(WeatherCondition::Snow) => Icon::Snow,
        Some(WeatherCondition::Thunderstorm) => Icon::Thunderstorms,
        None => Icon::NotAvailable,
    }
}

/// Whole-screen presentation theme
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Theme {
    Night,
    Clear,
    #[default]
    Cloudy,
    Fog,
    Rain,
    Snow,
    Thunder,
}

impl Theme {
    pub fn class_name(&self) -> &'static str {
        match self {
            Self::Night => "theme-night",
            Self::Clear => "theme-clear",
            Self::Cloudy => "theme-cloudy",
            Self::Fog => "theme-fog",
            Self::Rain => "theme-rain",
            Self::Snow => "theme-snow",
            Self::Thunder => "theme-thunder",
        }
    }
}

/// Theme for a WMO code. Night overrides the weather; drizzle and unknown
/// codes fall back to cloudy.
pub fn theme_for(code: i32, is_day: bool) -> Theme {
    if !is_day {
        return Theme::Night;
    }
    match WeatherCondition::from_wmo_code(code) {
        Some(WeatherCondition::Clear) => Theme::Clear,
        Some(WeatherCondition::PartlyCloudy | WeatherCondition::Overcast) => Theme::Cloudy,
        Some(WeatherCondition::Fog) => Theme::Fog,
        Some(WeatherCondition::Rain) => Theme::Rain,
        Some(WeatherCondition::Snow) => Theme::Snow,
        Some(WeatherCondition::Thunderstorm) => Theme::Thunder,
        Some(WeatherCondition::Drizzle) | None => Theme::Cloudy,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const KNOWN_CODES: [(i32, &str); 28] = [
        (0, "Clear"),
        (1, "Mainly clear"),
        (2, "Partly cloudy"),
        (3, "Overcast"),
        (45, "Fog"),
        (48, "Rime fog"),
        (51, "Light drizzle"),
        (53, "Drizzle"),
        (55, "Dense drizzle"),
        (56, "Freezing drizzle"),
        (57, "Dense freezing drizzle"),
        (61, "Light rain"),
        (63, "Rain"),
        (65, "Heavy rain"),
        (66, "Freezing rain"),
        (67, "Heavy freezing rain"),
        (71, "Light snow"),
        (73, "Snow"),
        (75, "Heavy snow"),
        (77, "Snow grains"),
        (80, "Rain showers"),
        (81, "Showers"),
        (82, "Violent showers"),
        (85, "Snow showers"),
        (86, "Heavy snow showers"),
        (95, "Thunderstorm"),
        (96, "Thunder w/ hail"),
        (99, "Thunder w/ heavy hail"),
    ];

    #[test]
    fn test_description_known_codes() {
        for (code, text) in KNOWN_CODES {
            assert_eq!(description_for(code), text, "code {}", code);
        }
    }

    #[test]
    fn test_description_unknown_codes() {
        for code in [-1, 4, 44, 50, 60, 100, 999, i32::MIN, i32::MAX] {
            assert_eq!(description_for(code), PLACEHOLDER, "code {}", code);
        }
    }

    #[test]
    fn test_icon_day_night_variants() {
        assert_eq!(icon_for(0, true), Icon::ClearDay);
        assert_eq!(icon_for(0, false), Icon::ClearNight);
        assert_eq!(icon_for(1, true), Icon::PartlyCloudyDay);
        assert_eq!(icon_for(2, false), Icon::PartlyCloudyNight);
    }

    #[test]
    fn test_icon_buckets_ignore_day() {
        for is_day in [true, false] {
            assert_eq!(icon_for(3, is_day), Icon::Overcast);
            assert_eq!(icon_for(48, is_day), Icon::Fog);
            assert_eq!(icon_for(57, is_day), Icon::Drizzle);
            assert_eq!(icon_for(82, is_day), Icon::Rain);
            assert_eq!(icon_for(86, is_day), Icon::Snow);
            assert_eq!(icon_for(99, is_day), Icon::Thunderstorms);
        }
    }

    #[test]
    fn test_icon_unknown_is_not_available() {
        for code in [-1, 4, 50, 70, 90, 1000] {
            assert_eq!(icon_for(code, true), Icon::NotAvailable);
            assert_eq!(icon_for(code, false), Icon::NotAvailable);
        }
    }

    #[test]
    fn test_every_known_code_has_an_icon() {
        for (code, _) in KNOWN_CODES {
            assert_ne!(icon_for(code, true), Icon::NotAvailable, "code {}", code);
        }
    }

    #[test]
    fn test_icon_url() {
        assert_eq!(
            icon_for(95, true).url(),
            "https://cdn.jsdelivr.net/gh/basmilius/weather-icons/production/fill/all/thunderstorms.svg"
        );
    }

    #[test]
    fn test_theme_night_overrides_code() {
        for code in (-5..=105).chain([i32::MIN, i32::MAX]) {
            assert_eq!(theme_for(code, false), Theme::Night, "code {}", code);
        }
    }

    #[test]
    fn test_theme_day_buckets() {
        assert_eq!(theme_for(0, true), Theme::Clear);
        assert_eq!(theme_for(1, true), Theme::Cloudy);
        assert_eq!(theme_for(3, true), Theme::Cloudy);
        assert_eq!(theme_for(45, true), Theme::Fog);
        assert_eq!(theme_for(66, true), Theme::Rain);
        assert_eq!(theme_for(80, true), Theme::Rain);
        assert_eq!(theme_for(77, true), Theme::Snow);
        assert_eq!(theme_for(96, true), Theme::Thunder);
    }

    #[test]
    fn test_theme_drizzle_and_unknown_default_to_cloudy() {
        assert_eq!(theme_for(53, true), Theme::Cloudy);
        assert_eq!(theme_for(12345, true), Theme::Cloudy);
        assert_eq!(Theme::default().class_name(), "theme-cloudy");
    }
}
