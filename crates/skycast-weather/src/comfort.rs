//! Qualitative labels for raw metrics.

use crate::types::PLACEHOLDER;

/// Relative humidity in percent. 30 and 60 both count as comfortable.
pub fn humidity_text(pct: f64) -> &'static str {
    if pct < 30.0 {
        "Dry"
    } else if pct <= 60.0 {
        "Comfortable"
    } else {
        "Humid"
    }
}

/// Visibility in kilometers; each lower bound is inclusive.
pub fn visibility_text(km: f64) -> &'static str {
    if km >= 10.0 {
        "Excellent"
    } else if km >= 5.0 {
        "Good"
    } else if km >= 2.0 {
        "Moderate"
    } else {
        "Poor"
    }
}

/// Wind speed in km/h; each lower bound is inclusive.
pub fn wind_text(kmh: f64) -> &'static str {
    if kmh < 6.0 {
        "Calm"
    } else if kmh < 20.0 {
        "Breezy"
    } else if kmh < 38.0 {
        "Windy"
    } else {
        "Gale"
    }
}

/// US AQI category. Breakpoints are upper-inclusive (50 is still "Good").
pub fn aqi_text(aqi: Option<f64>) -> &'static str {
    let Some(v) = aqi else {
        return PLACEHOLDER;
    };
    if v <= 50.0 {
        "Good"
    } else if v <= 100.0 {
        "Moderate"
    } else if v <= 150.0 {
        "Unhealthy (SG)"
    } else if v <= 200.0 {
        "Unhealthy"
    } else if v <= 300.0 {
        "Very Unhealthy"
    } else {
        "Hazardous"
    }
}
