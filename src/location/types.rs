//! Core types for building lookup.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A free-text building lookup, optionally narrowed by city and country.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct BuildingQuery {
    pub name: String,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub country: Option<String>,
}

impl BuildingQuery {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into(), city: None, country: None }
    }

    pub fn with_city(mut self, city: impl Into<String>) -> Self {
        self.city = Some(city.into());
        self
    }

    pub fn with_country(mut self, country: impl Into<String>) -> Self {
        self.country = Some(country.into());
        self
    }
}

/// A geocoded building.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Building {
    /// The name as requested by the client.
    pub name: String,
    pub lat: f64,
    pub lng: f64,
    pub formatted_address: String,
    /// OSM `building=*` tag (e.g. "university", "yes").
    #[serde(rename = "type")]
    pub building_type: Option<String>,
    pub osm_id: Option<String>,
    pub osm_type: Option<String>,
}

/// Building lookup errors.
#[derive(Debug, Error)]
pub enum LocationError {
    #[error("Location '{0}' not found")]
    NotFound(String),
    #[error("Error communicating with geocoding service: {0}")]
    Network(String),
    #[error("Invalid geocoding response: {0}")]
    InvalidResponse(String),
    #[error("Invalid query: {0}")]
    InvalidQuery(String),
}
