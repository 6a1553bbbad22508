//! Place resolution: turn a free-text name or a coordinate pair into a
//! display name using the Open-Meteo geocoding API (no API key required).

use std::sync::Arc;

use reqwest::Client;
use serde::Deserialize;
use tracing::instrument;

use crate::provider::read_json;
use crate::types::{Coordinates, Place, WeatherError};

const SEARCH_PATH: &str = "/v1/search";
const REVERSE_PATH: &str = "/v1/reverse";
const MAX_CANDIDATES: &str = "5";

#[derive(Debug, Deserialize)]
struct GeocodingResponse {
    results: Option<Vec<Candidate>>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    name: String,
    admin1: Option<String>,
    country: Option<String>,
    latitude: f64,
    longitude: f64,
}

impl Candidate {
    fn display_name(&self) -> String {
        compose_display_name(&self.name, self.admin1.as_deref(), self.country.as_deref())
    }
}

/// Join locality, region and country with ", ", skipping absent or empty
/// parts.
pub fn compose_display_name(name: &str, admin1: Option<&str>, country: Option<&str>) -> String {
    let mut result = name.to_string();
    for part in [admin1, country].into_iter().flatten() {
        if !part.is_empty() {
            result.push_str(", ");
            result.push_str(part);
        }
    }
    result
}

#[derive(Debug, Clone)]
pub struct GeocodingClient {
    client: Arc<Client>,
    base_url: String,
}

impl GeocodingClient {
    pub fn new(client: Arc<Client>, base_url: &str) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Resolve a place name to the first matching candidate.
    ///
    /// Fails with `PlaceNotFound` when the provider has no candidates or the
    /// query is blank.
    #[instrument(skip(self), level = "info")]
    pub async fn resolve_by_name(&self, query: &str) -> Result<Place, WeatherError> {
        let query = query.trim();
        if query.is_empty() {
            return Err(WeatherError::PlaceNotFound(String::new()));
        }

        let url = format!("{}{}", self.base_url, SEARCH_PATH);
        let response = self
            .client
            .get(&url)
            .query(&[
                ("name", query),
                ("count", MAX_CANDIDATES),
                ("language", "en"),
                ("format", "json"),
            ])
            .send()
            .await?
            .error_for_status()?;

        let body: GeocodingResponse = read_json(response).await?;

        let candidate = body
            .results
            .and_then(|results| results.into_iter().next())
            .ok_or_else(|| {
                tracing::warn!("No geocoding results for '{}'", query);
                WeatherError::PlaceNotFound(query.to_string())
            })?;

        let place = Place {
            name: candidate.display_name(),
            latitude: candidate.latitude,
            longitude: candidate.longitude,
        };
        tracing::info!(
            "Resolved '{}' to {} ({:.4}, {:.4})",
            query,
            place.name,
            place.latitude,
            place.longitude
        );
        Ok(place)
    }

    /// Reverse geocode a coordinate pair to a display name.
    ///
    /// Never fails: any provider problem yields the formatted coordinates.
    #[instrument(skip(self), level = "info")]
    pub async fn resolve_by_coordinates(&self, coords: Coordinates) -> String {
        match self.reverse_lookup(coords).await {
            Some(name) => {
                tracing::info!("Reverse geocoded to: {}", name);
                name
            }
            None => coords.label(),
        }
    }

    async fn reverse_lookup(&self, coords: Coordinates) -> Option<String> {
        let url = format!("{}{}", self.base_url, REVERSE_PATH);
        let response = match self
            .client
            .get(&url)
            .query(&[
                ("latitude", coords.latitude.to_string()),
                ("longitude", coords.longitude.to_string()),
                ("language", "en".to_string()),
                ("format", "json".to_string()),
            ])
            .send()
            .await
        {
            Ok(r) => r,
            Err(e) => {
                tracing::debug!("Reverse geocode request failed: {}", e);
                return None;
            }
        };

        if !response.status().is_success() {
            tracing::debug!("Reverse geocode returned status {}", response.status());
            return None;
        }

        let body: GeocodingResponse = match response.json().await {
            Ok(b) => b,
            Err(e) => {
                tracing::debug!("Reverse geocode parse error: {}", e);
                return None;
            }
        };

        body.results?
            .into_iter()
            .next()
            .map(|candidate| candidate.display_name())
    }
}
