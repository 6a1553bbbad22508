//! Update cycles: resolve a place, fetch its data, and publish the result to
//! the screen.
//!
//! Every cycle takes a ticket from the screen when it starts. Only the holder
//! of the newest ticket may change the screen, so a slow cycle that finishes
//! after a newer one is discarded instead of overwriting it.

use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use reqwest::Client;
use skycast_core::Config;

use crate::classify::Theme;
use crate::geocode::GeocodingClient;
use crate::location::{get_current_location, LocationSource};
use crate::provider::{ProviderEndpoints, WeatherProvider};
use crate::session::SessionState;
use crate::types::{Coordinates, Place, WeatherError};
use crate::view::DashboardView;

pub const STATUS_DETECTING: &str = "Detecting location...";
pub const STATUS_FETCHING: &str = "Fetching weather...";
pub const STATUS_NOT_FOUND: &str = "❌ City not found";
pub const STATUS_LOAD_FAILED: &str = "⚠️ Error loading weather";

const USER_AGENT: &str = concat!("SkyCast/", env!("CARGO_PKG_VERSION"));

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    #[default]
    Idle,
    Loading,
    Rendered,
    Failed,
}

/// Proof that a cycle was started; compared against the screen's latest
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ticket(u64);

/// The display surface shared by all cycles
#[derive(Debug, Default)]
pub struct Screen {
    label: String,
    view: Option<DashboardView>,
    theme: Option<Theme>,
    phase: Phase,
    generation: u64,
}

impl Screen {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a cycle: show `status` in the place label and invalidate every
    /// older ticket.
    pub fn begin(&mut self, status: impl Into<String>) -> Ticket {
        self.generation += 1;
        self.phase = Phase::Loading;
        self.label = status.into();
        Ticket(self.generation)
    }

    pub fn is_current(&self, ticket: Ticket) -> bool {
        ticket.0 == self.generation
    }

    /// Replace the transient status of a cycle still in flight
    pub fn set_status(&mut self, ticket: Ticket, status: impl Into<String>) -> bool {
        if !self.is_current(ticket) {
            return false;
        }
        self.label = status.into();
        true
    }

    /// Publish a finished view. Returns false if the ticket is stale.
    pub fn render(&mut self, ticket: Ticket, view: DashboardView) -> bool {
        if !self.is_current(ticket) {
            return false;
        }
        self.label = view.place.clone();
        self.theme = Some(view.theme);
        self.view = Some(view);
        self.phase = Phase::Rendered;
        true
    }

    /// Show an error in the place label. The last view stays on screen.
    pub fn fail(&mut self, ticket: Ticket, message: impl Into<String>) -> bool {
        if !self.is_current(ticket) {
            return false;
        }
        self.label = message.into();
        self.phase = Phase::Failed;
        true
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn view(&self) -> Option<&DashboardView> {
        self.view.as_ref()
    }

    pub fn theme(&self) -> Option<Theme> {
        self.theme
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }
}

/// Orchestrates update cycles
#[derive(Debug, Clone)]
pub struct Dashboard {
    geocoder: GeocodingClient,
    provider: WeatherProvider,
    default_place: String,
    forecast_cards: usize,
    location_timeout: Duration,
}

impl Dashboard {
    pub fn new(
        geocoder: GeocodingClient,
        provider: WeatherProvider,
        default_place: impl Into<String>,
        forecast_cards: usize,
        location_timeout: Duration,
    ) -> Self {
        Self {
            geocoder,
            provider,
            default_place: default_place.into(),
            forecast_cards,
            location_timeout,
        }
    }

    /// Build the dashboard and its HTTP clients from configuration
    pub fn from_config(config: &Config) -> Result<Self, WeatherError> {
        let weather = &config.weather;
        let client = Client::builder()
            .timeout(Duration::from_secs(weather.request_timeout_secs))
            .user_agent(USER_AGENT)
            .build()?;
        let client = Arc::new(client);

        let geocoder = GeocodingClient::new(client.clone(), &weather.geocoding_url);
        let provider = WeatherProvider::new(
            client,
            ProviderEndpoints {
                forecast_url: weather.forecast_url.clone(),
                air_quality_url: weather.air_quality_url.clone(),
            },
            weather.forecast_days,
        );

        Ok(Self::new(
            geocoder,
            provider,
            weather.default_place.clone(),
            config.ui.forecast_cards,
            Duration::from_secs(weather.geolocation_timeout_secs),
        ))
    }

    /// Fetch both payloads for `place` and format them
    pub async fn refresh(&self, place: &Place) -> Result<DashboardView, WeatherError> {
        let (forecast, air_quality) = self.provider.fetch(place).await?;
        Ok(DashboardView::build(
            &place.name,
            &forecast,
            &air_quality,
            self.forecast_cards,
        ))
    }

    /// Run the fetch-and-render half of a cycle for an already resolved place.
    ///
    /// On success the place name becomes the session's last place. Failures
    /// are logged and shown as a status; they never propagate.
    pub async fn update(
        &self,
        ticket: Ticket,
        place: &Place,
        screen: &Mutex<Screen>,
        mut session: SessionState,
    ) -> SessionState {
        if !screen.lock().set_status(ticket, STATUS_FETCHING) {
            tracing::debug!("Skipping superseded update for {}", place.name);
            return session;
        }

        match self.refresh(place).await {
            Ok(view) => {
                if screen.lock().render(ticket, view) {
                    tracing::info!("Rendered weather for {}", place.name);
                    session.last_place = Some(place.name.clone());
                } else {
                    tracing::debug!("Discarding stale result for {}", place.name);
                }
            }
            Err(e) => {
                tracing::error!("Update failed for {}: {}", place.name, e);
                if !screen.lock().fail(ticket, STATUS_LOAD_FAILED) {
                    tracing::debug!("Discarding stale failure for {}", place.name);
                }
            }
        }

        session
    }

    /// Search by place name. A blank query is ignored.
    pub async fn search(
        &self,
        query: &str,
        screen: &Mutex<Screen>,
        session: SessionState,
    ) -> SessionState {
        let query = query.trim();
        if query.is_empty() {
            return session;
        }

        let ticket = screen.lock().begin(format!("Searching \"{}\"...", query));

        match self.geocoder.resolve_by_name(query).await {
            Ok(place) => self.update(ticket, &place, screen, session).await,
            Err(e) => {
                tracing::error!("Geocode failed for '{}': {}", query, e);
                screen.lock().fail(ticket, STATUS_NOT_FOUND);
                session
            }
        }
    }

    /// Show the place at `coords`, named by reverse geocoding
    pub async fn locate(
        &self,
        coords: Coordinates,
        screen: &Mutex<Screen>,
        session: SessionState,
    ) -> SessionState {
        let ticket = screen.lock().begin(STATUS_DETECTING);
        let place = self.place_at(coords).await;
        self.update(ticket, &place, screen, session).await
    }

    /// Startup sequence: saved place, then the location source, then the
    /// configured default place.
    pub async fn startup<S: LocationSource>(
        &self,
        source: &S,
        screen: &Mutex<Screen>,
        session: SessionState,
    ) -> SessionState {
        let ticket = screen.lock().begin(STATUS_DETECTING);

        match self.resolve_startup_place(source, &session).await {
            Ok(place) => self.update(ticket, &place, screen, session).await,
            Err(e) => {
                tracing::error!("Startup failed: {}", e);
                screen.lock().fail(ticket, STATUS_LOAD_FAILED);
                session
            }
        }
    }

    async fn resolve_startup_place<S: LocationSource>(
        &self,
        source: &S,
        session: &SessionState,
    ) -> Result<Place, WeatherError> {
        if let Some(last) = &session.last_place {
            match self.geocoder.resolve_by_name(last).await {
                Ok(place) => return Ok(place),
                Err(e) => tracing::warn!("Saved place '{}' could not be resolved: {}", last, e),
            }
        }

        match get_current_location(source, self.location_timeout).await {
            Ok(coords) => return Ok(self.place_at(coords).await),
            Err(e) => tracing::warn!("Location unavailable: {}", e),
        }

        self.geocoder.resolve_by_name(&self.default_place).await
    }

    async fn place_at(&self, coords: Coordinates) -> Place {
        Place {
            name: self.geocoder.resolve_by_coordinates(coords).await,
            latitude: coords.latitude,
            longitude: coords.longitude,
        }
    }
}
