//! Building lookup subsystem.
//!
//! Composes free-text queries, calls OpenStreetMap Nominatim, picks the most
//! building-like result and formats its address.

pub mod providers;
pub mod resolver;
pub mod types;

pub use providers::{NominatimConfig, NominatimGeocoder};
pub use resolver::{build_search_query, Geocoder};
pub use types::{Building, BuildingQuery, LocationError};
