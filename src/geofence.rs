//! Geofence verdicts: inside/outside plus a confidence label that accounts
//! for how far the accuracy circle reaches across the boundary.

use serde::{Serialize, Serializer};
use std::fmt;

use crate::geo::{haversine_distance, round_meters};
use crate::location::Building;
use crate::quality::{assess_location_quality, LocationPoint, LocationQuality};

/// Geofence radius around a building, in meters.
pub const GEOFENCE_RADIUS_M: f64 = 100.0;

/// Human-readable confidence of an inside/outside decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfidenceLevel {
    DefinitelyInside,
    LikelyInside,
    LikelyOutside,
    DefinitelyOutside,
    /// No accuracy information was available.
    Inside,
    Outside,
}

impl ConfidenceLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::DefinitelyInside => "Definitely inside",
            Self::LikelyInside => "Likely inside, but uncertain",
            Self::LikelyOutside => "Likely outside, but uncertain",
            Self::DefinitelyOutside => "Definitely outside",
            Self::Inside => "Inside",
            Self::Outside => "Outside",
        }
    }

    pub fn is_uncertain(&self) -> bool {
        matches!(self, Self::LikelyInside | Self::LikelyOutside)
    }
}

impl fmt::Display for ConfidenceLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for ConfidenceLevel {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// Classify a distance against the threshold, using the quality's accuracy
/// radius when one is known.
pub fn confidence_level(distance: f64, threshold: f64, quality: &LocationQuality) -> ConfidenceLevel {
    let inside = distance <= threshold;

    match quality.accuracy.meters() {
        Some(accuracy) if inside => {
            if distance + accuracy > threshold {
                ConfidenceLevel::LikelyInside
            } else {
                ConfidenceLevel::DefinitelyInside
            }
        }
        Some(accuracy) => {
            if distance - accuracy < threshold {
                ConfidenceLevel::LikelyOutside
            } else {
                ConfidenceLevel::DefinitelyOutside
            }
        }
        None if inside => ConfidenceLevel::Inside,
        None => ConfidenceLevel::Outside,
    }
}

/// Outcome of checking a user reading against a building's geofence.
#[derive(Debug, Clone, Serialize)]
pub struct GeofenceVerdict {
    pub is_within_range: bool,
    /// Distance to the building in meters, rounded to centimeters.
    pub distance: f64,
    pub confidence_level: ConfidenceLevel,
    pub location_quality: LocationQuality,
}

/// Check a reading against the building using the standard 100 m radius.
pub fn evaluate(
    user: &LocationPoint,
    building: &Building,
    history: Option<&[LocationPoint]>,
) -> GeofenceVerdict {
    let distance = haversine_distance(user.lat, user.lng, building.lat, building.lng);
    let location_quality = assess_location_quality(user, history);
    let confidence_level = confidence_level(distance, GEOFENCE_RADIUS_M, &location_quality);

    GeofenceVerdict {
        is_within_range: distance <= GEOFENCE_RADIUS_M,
        distance: round_meters(distance),
        confidence_level,
        location_quality,
    }
}
