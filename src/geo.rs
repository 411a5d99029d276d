//! Great-circle distance on a spherical Earth.

/// Mean Earth radius used by the haversine formula, in meters.
pub const EARTH_RADIUS_M: f64 = 6_371_000.0;

/// Haversine distance in meters between two points given in decimal degrees.
pub fn haversine_distance(lat1: f64, lng1: f64, lat2: f64, lng2: f64) -> f64 {
    let lat1_rad = lat1.to_radians();
    let lat2_rad = lat2.to_radians();
    let dlat = (lat2 - lat1).to_radians();
    let dlng = (lng2 - lng1).to_radians();

    let a = (dlat / 2.0).sin().powi(2)
        + lat1_rad.cos() * lat2_rad.cos() * (dlng / 2.0).sin().powi(2);
    // a can drift a hair above 1.0 for antipodal points
    let c = 2.0 * a.sqrt().min(1.0).asin();

    c * EARTH_RADIUS_M
}

/// Round a distance to centimeter precision for reporting.
pub fn round_meters(d: f64) -> f64 {
    (d * 100.0).round() / 100.0
}

/// Check that a coordinate pair is finite and within WGS84 bounds.
pub fn validate_coordinates(lat: f64, lng: f64) -> Result<(), String> {
    if !lat.is_finite() || !lng.is_finite() {
        return Err("Coordinates must be finite numbers".into());
    }
    if !(-90.0..=90.0).contains(&lat) || !(-180.0..=180.0).contains(&lng) {
        return Err(format!(
            "Invalid coordinates ({}, {}). Lat: -90..90, Lng: -180..180",
            lat, lng
        ));
    }
    Ok(())
}
