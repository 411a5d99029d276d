//! Nominatim provider: search request, result selection, address formatting.

use serde::Deserialize;
use std::collections::HashMap;
use std::time::Duration;
use tracing::debug;

use crate::geo::validate_coordinates;

use super::resolver::{build_search_query, Geocoder};
use super::types::{Building, BuildingQuery, LocationError};

pub const DEFAULT_NOMINATIM_URL: &str = "https://nominatim.openstreetmap.org";
pub const DEFAULT_USER_AGENT: &str = "GeofencingApp/1.0";

/// Candidates requested per search; enough to find a building among them.
const SEARCH_LIMIT: usize = 5;

/// Address components joined, in this order, into a formatted address.
const ADDRESS_KEYS: &[&str] = &["house_number", "road", "suburb", "city", "town", "state", "country"];

// ─── Nominatim payload ──────────────────────────────────────────

#[derive(Deserialize, Debug, Clone)]
pub struct NominatimPlace {
    pub lat: String,
    pub lon: String,
    #[serde(default)]
    pub display_name: String,
    #[serde(default, rename = "class")]
    pub place_class: Option<String>,
    #[serde(default, rename = "type")]
    pub place_type: Option<String>,
    #[serde(default)]
    pub osm_id: Option<serde_json::Value>,
    #[serde(default)]
    pub osm_type: Option<String>,
    #[serde(default)]
    pub address: Option<HashMap<String, String>>,
    #[serde(default)]
    pub extratags: Option<HashMap<String, String>>,
}

impl NominatimPlace {
    fn is_building(&self) -> bool {
        self.place_class.as_deref() == Some("building")
            || self.place_type.as_deref().is_some_and(|t| t.contains("building"))
    }
}

/// Pick the first building-like result, else the first result.
pub fn select_building(results: &[NominatimPlace]) -> Option<&NominatimPlace> {
    results.iter().find(|p| p.is_building()).or_else(|| results.first())
}

/// Join known address components, falling back to the display name.
pub fn format_address(place: &NominatimPlace) -> String {
    let parts: Vec<&str> = match &place.address {
        Some(address) => ADDRESS_KEYS
            .iter()
            .filter_map(|k| address.get(*k).map(String::as_str))
            .collect(),
        None => Vec::new(),
    };

    if parts.is_empty() {
        place.display_name.clone()
    } else {
        parts.join(", ")
    }
}

fn osm_id_string(id: &serde_json::Value) -> Option<String> {
    match id {
        serde_json::Value::Number(n) => Some(n.to_string()),
        serde_json::Value::String(s) => Some(s.clone()),
        _ => None,
    }
}

/// Turn a parsed result list into a `Building` for the requested name.
pub fn building_from_results(
    name: &str,
    search_query: &str,
    results: &[NominatimPlace],
) -> Result<Building, LocationError> {
    let place = select_building(results).ok_or_else(|| LocationError::NotFound(search_query.to_string()))?;

    let lat: f64 = place
        .lat
        .parse()
        .map_err(|_| LocationError::InvalidResponse(format!("bad latitude '{}'", place.lat)))?;
    let lng: f64 = place
        .lon
        .parse()
        .map_err(|_| LocationError::InvalidResponse(format!("bad longitude '{}'", place.lon)))?;
    validate_coordinates(lat, lng).map_err(LocationError::InvalidResponse)?;

    Ok(Building {
        name: name.to_string(),
        lat,
        lng,
        formatted_address: format_address(place),
        building_type: place.extratags.as_ref().and_then(|t| t.get("building").cloned()),
        osm_id: place.osm_id.as_ref().and_then(osm_id_string),
        osm_type: place.osm_type.clone(),
    })
}

// ─── HTTP client ────────────────────────────────────────────────

/// Connection settings for the Nominatim search endpoint.
#[derive(Debug, Clone)]
pub struct NominatimConfig {
    pub base_url: String,
    pub user_agent: String,
    pub timeout: Duration,
}

impl Default for NominatimConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_NOMINATIM_URL.to_string(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            timeout: Duration::from_secs(10),
        }
    }
}

/// Blocking Nominatim geocoder.
pub struct NominatimGeocoder {
    agent: ureq::Agent,
    search_url: String,
    user_agent: String,
}

impl NominatimGeocoder {
    pub fn new(config: NominatimConfig) -> Self {
        let agent = ureq::AgentBuilder::new().timeout(config.timeout).build();
        Self {
            agent,
            search_url: format!("{}/search", config.base_url.trim_end_matches('/')),
            user_agent: config.user_agent,
        }
    }

    fn search(&self, search_query: &str) -> Result<Vec<NominatimPlace>, LocationError> {
        let limit = SEARCH_LIMIT.to_string();
        let response = self
            .agent
            .get(&self.search_url)
            .set("User-Agent", &self.user_agent)
            .query("q", search_query)
            .query("format", "json")
            .query("limit", &limit)
            .query("addressdetails", "1")
            .query("extratags", "1")
            .query("namedetails", "1")
            .call()
            .map_err(|e| match e {
                ureq::Error::Status(code, _) => LocationError::Network(format!("HTTP {}", code)),
                other => LocationError::Network(other.to_string()),
            })?;

        response
            .into_json()
            .map_err(|e| LocationError::InvalidResponse(e.to_string()))
    }
}

impl Geocoder for NominatimGeocoder {
    fn lookup(&self, query: &BuildingQuery) -> Result<Building, LocationError> {
        let search_query = build_search_query(query)?;
        let results = self.search(&search_query)?;
        debug!(query = %search_query, results = results.len(), "nominatim search");
        building_from_results(&query.name, &search_query, &results)
    }
}
