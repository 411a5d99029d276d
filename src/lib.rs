//! Geofence: building lookup and accuracy-aware presence checks.
//!
//! A building name is geocoded through Nominatim, and a user's reported
//! position is compared against a fixed 100 m radius around it. Reported GPS
//! accuracy and a short reading history feed a confidence estimate.

pub mod geo;
pub mod geofence;
pub mod location;
pub mod quality;
pub mod server;

pub use geofence::{evaluate, ConfidenceLevel, GeofenceVerdict, GEOFENCE_RADIUS_M};
pub use location::{Building, BuildingQuery, Geocoder, LocationError, NominatimGeocoder};
pub use quality::{assess_location_quality, LocationPoint, LocationQuality};
