//! Weather dashboard data layer backed by the Open-Meteo APIs
//! (no API key required).
//!
//! Place resolution, concurrent forecast and air-quality fetching, the
//! pure classifiers and formatters, and the update cycle that ties them
//! to a screen.

pub mod classify;
pub mod comfort;
pub mod dashboard;
pub mod geocode;
pub mod location;
pub mod nearest;
pub mod provider;
pub mod session;
pub mod types;
pub mod view;

pub use classify::{description_for, icon_for, theme_for, Icon, Theme, WeatherCondition};
pub use comfort::{aqi_text, humidity_text, visibility_text, wind_text};
pub use dashboard::{
    Dashboard, Phase, Screen, Ticket, STATUS_DETECTING, STATUS_FETCHING, STATUS_LOAD_FAILED,
    STATUS_NOT_FOUND,
};
pub use geocode::{compose_display_name, GeocodingClient};
pub use location::{get_current_location, FixedLocation, LocationSource, NoLocation};
pub use nearest::nearest_index;
pub use provider::{ProviderEndpoints, WeatherProvider};
pub use session::{SessionState, SessionStore};
pub use types::{
    AirQualityData, Coordinates, CurrentConditions, DailyForecastEntry, ForecastData,
    HourlySeries, LocationError, Place, WeatherError, PLACEHOLDER,
};
pub use view::{round_half_up, DashboardView, DayCard};
