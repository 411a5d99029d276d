//! Location quality assessment from reported GPS accuracy and recent history.
//!
//! Accuracy thresholds: ≤10 m is High, ≤30 m is Medium, anything worse is Low.
//! With at least three history points, the last three are checked for
//! positional stability and their accuracies averaged.

use serde::{Deserialize, Serialize, Serializer};
use std::fmt;

const HIGH_ACCURACY_M: f64 = 10.0;
const MEDIUM_ACCURACY_M: f64 = 30.0;

/// Number of trailing history points considered.
pub const HISTORY_WINDOW: usize = 3;

/// Per-axis variance (degrees²) below which readings count as stable.
pub const STABILITY_VARIANCE: f64 = 1e-7;

/// A single location reading supplied by the client.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LocationPoint {
    pub lat: f64,
    pub lng: f64,
    /// Accuracy radius in meters.
    #[serde(default)]
    pub accuracy: Option<f64>,
    #[serde(default)]
    pub timestamp: Option<i64>,
}

impl LocationPoint {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng, accuracy: None, timestamp: None }
    }

    pub fn with_accuracy(mut self, accuracy: f64) -> Self {
        self.accuracy = Some(accuracy);
        self
    }

    /// Reported accuracy, if it is a usable positive radius.
    pub fn usable_accuracy(&self) -> Option<f64> {
        self.accuracy.filter(|a| a.is_finite() && *a > 0.0)
    }
}

/// Qualitative grade used for both confidence and stability.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Grade {
    High,
    Medium,
    Low,
}

impl fmt::Display for Grade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::High => write!(f, "High"),
            Self::Medium => write!(f, "Medium"),
            Self::Low => write!(f, "Low"),
        }
    }
}

/// Accuracy as reported back to the client: meters, or `"Unknown"`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ReportedAccuracy {
    Meters(f64),
    Unknown,
}

impl ReportedAccuracy {
    pub fn meters(&self) -> Option<f64> {
        match self {
            Self::Meters(m) => Some(*m),
            Self::Unknown => None,
        }
    }
}

impl Serialize for ReportedAccuracy {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Meters(m) => serializer.serialize_f64(*m),
            Self::Unknown => serializer.serialize_str("Unknown"),
        }
    }
}

/// Derived quality of the current reading.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LocationQuality {
    pub accuracy: ReportedAccuracy,
    pub confidence: Grade,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stability: Option<Grade>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub average_accuracy: Option<f64>,
}

fn grade_accuracy(accuracy: f64) -> Grade {
    if accuracy <= HIGH_ACCURACY_M {
        Grade::High
    } else if accuracy <= MEDIUM_ACCURACY_M {
        Grade::Medium
    } else {
        Grade::Low
    }
}

/// Assess the current reading, refining with history when enough is available.
pub fn assess_location_quality(
    current: &LocationPoint,
    history: Option<&[LocationPoint]>,
) -> LocationQuality {
    let Some(accuracy) = current.usable_accuracy() else {
        return LocationQuality {
            accuracy: ReportedAccuracy::Unknown,
            confidence: Grade::Low,
            stability: None,
            average_accuracy: None,
        };
    };

    let mut quality = LocationQuality {
        accuracy: ReportedAccuracy::Meters(accuracy),
        confidence: grade_accuracy(accuracy),
        stability: None,
        average_accuracy: None,
    };

    let history = history.unwrap_or(&[]);
    if history.len() < HISTORY_WINDOW {
        return quality;
    }

    let recent = &history[history.len() - HISTORY_WINDOW..];
    let lats: Vec<f64> = recent.iter().map(|p| p.lat).collect();
    let lngs: Vec<f64> = recent.iter().map(|p| p.lng).collect();

    if variance(&lats) < STABILITY_VARIANCE && variance(&lngs) < STABILITY_VARIANCE {
        quality.stability = Some(Grade::High);
        if quality.confidence == Grade::Medium {
            quality.confidence = Grade::High;
        }
    } else {
        quality.stability = Some(Grade::Low);
    }

    let accuracies: Vec<f64> = recent.iter().filter_map(LocationPoint::usable_accuracy).collect();
    if !accuracies.is_empty() {
        quality.average_accuracy = Some(accuracies.iter().sum::<f64>() / accuracies.len() as f64);
    }

    quality
}

/// Population variance. Zero for fewer than two values.
///
/// Deviations are taken around the first value so identical inputs give
/// exactly 0.0.
pub fn variance(values: &[f64]) -> f64 {
    if values.len() < 2 {
        return 0.0;
    }
    let x0 = values[0];
    let n = values.len() as f64;
    let shifted: Vec<f64> = values.iter().map(|x| x - x0).collect();
    let mean = shifted.iter().sum::<f64>() / n;
    shifted.iter().map(|d| (d - mean).powi(2)).sum::<f64>() / n
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn point(lat: f64, lng: f64, accuracy: Option<f64>) -> LocationPoint {
        LocationPoint { lat, lng, accuracy, timestamp: None }
    }

    #[test]
    fn test_variance_identical_values() {
        assert_eq!(variance(&[3.5, 3.5, 3.5, 3.5]), 0.0);
        assert_eq!(variance(&[59.3293; 3]), 0.0);
        assert_eq!(variance(&[0.1; 3]), 0.0);
        assert_eq!(variance(&[10.00001; 3]), 0.0);
    }

    #[test]
    fn test_variance_population() {
        // mean 5, squared deviations 9+1+1+9 = 20, / 4
        assert_abs_diff_eq!(variance(&[2.0, 4.0, 6.0, 8.0]), 5.0, epsilon = 1e-12);
    }

    #[test]
    fn test_variance_short_input() {
        assert_eq!(variance(&[]), 0.0);
        assert_eq!(variance(&[42.0]), 0.0);
    }

    #[test]
    fn test_no_accuracy_is_low_and_unknown() {
        let q = assess_location_quality(&point(10.0, 20.0, None), None);
        assert_eq!(q.accuracy, ReportedAccuracy::Unknown);
        assert_eq!(q.confidence, Grade::Low);
        assert_eq!(q.stability, None);
    }

    #[test]
    fn test_no_accuracy_ignores_history() {
        let history = [point(10.0, 20.0, Some(5.0)); 4];
        let q = assess_location_quality(&point(10.0, 20.0, None), Some(&history[..]));
        assert_eq!(q.stability, None);
        assert_eq!(q.average_accuracy, None);
    }

    #[test]
    fn test_zero_accuracy_treated_as_missing() {
        let q = assess_location_quality(&point(10.0, 20.0, Some(0.0)), None);
        assert_eq!(q.accuracy, ReportedAccuracy::Unknown);
        assert_eq!(q.confidence, Grade::Low);
    }

    #[test]
    fn test_accuracy_grades() {
        let grade = |a| assess_location_quality(&point(0.0, 0.0, Some(a)), None).confidence;
        assert_eq!(grade(3.0), Grade::High);
        assert_eq!(grade(10.0), Grade::High);
        assert_eq!(grade(10.1), Grade::Medium);
        assert_eq!(grade(30.0), Grade::Medium);
        assert_eq!(grade(30.5), Grade::Low);
    }

    #[test]
    fn test_short_history_skips_stability() {
        let history = [point(10.0, 20.0, Some(5.0)); 2];
        let q = assess_location_quality(&point(10.0, 20.0, Some(20.0)), Some(&history[..]));
        assert_eq!(q.stability, None);
        assert_eq!(q.confidence, Grade::Medium);
    }

    #[test]
    fn test_stable_history_upgrades_medium() {
        let history = [
            point(10.0, 20.0, Some(12.0)),
            point(10.00001, 20.00001, Some(15.0)),
            point(10.0, 20.0, Some(18.0)),
        ];
        let q = assess_location_quality(&point(10.0, 20.0, Some(25.0)), Some(&history[..]));
        assert_eq!(q.stability, Some(Grade::High));
        assert_eq!(q.confidence, Grade::High);
        assert_abs_diff_eq!(q.average_accuracy.unwrap(), 15.0, epsilon = 1e-12);
    }

    #[test]
    fn test_stable_history_does_not_upgrade_low() {
        let history = [point(10.0, 20.0, None); 3];
        let q = assess_location_quality(&point(10.0, 20.0, Some(50.0)), Some(&history[..]));
        assert_eq!(q.stability, Some(Grade::High));
        assert_eq!(q.confidence, Grade::Low);
        assert_eq!(q.average_accuracy, None);
    }

    #[test]
    fn test_unstable_history() {
        let history = [
            point(10.0, 20.0, Some(8.0)),
            point(10.01, 20.0, Some(8.0)),
            point(10.02, 20.0, None),
        ];
        let q = assess_location_quality(&point(10.0, 20.0, Some(20.0)), Some(&history[..]));
        assert_eq!(q.stability, Some(Grade::Low));
        assert_eq!(q.confidence, Grade::Medium);
        assert_abs_diff_eq!(q.average_accuracy.unwrap(), 8.0, epsilon = 1e-12);
    }

    #[test]
    fn test_only_last_three_points_count() {
        // The first point is far away but falls outside the window.
        let history = [
            point(45.0, 90.0, Some(500.0)),
            point(10.0, 20.0, Some(6.0)),
            point(10.0, 20.0, Some(6.0)),
            point(10.0, 20.0, Some(9.0)),
        ];
        let q = assess_location_quality(&point(10.0, 20.0, Some(20.0)), Some(&history[..]));
        assert_eq!(q.stability, Some(Grade::High));
        assert_abs_diff_eq!(q.average_accuracy.unwrap(), 7.0, epsilon = 1e-12);
    }

    #[test]
    fn test_serialized_shape() {
        let q = assess_location_quality(&point(10.0, 20.0, None), None);
        let json = serde_json::to_value(&q).unwrap();
        assert_eq!(json, serde_json::json!({ "accuracy": "Unknown", "confidence": "Low" }));

        let q = assess_location_quality(&point(10.0, 20.0, Some(8.0)), None);
        let json = serde_json::to_value(&q).unwrap();
        assert_eq!(json, serde_json::json!({ "accuracy": 8.0, "confidence": "High" }));
    }

    #[test]
    fn test_point_deserializes_without_optionals() {
        let p: LocationPoint = serde_json::from_str(r#"{"lat": 1.5, "lng": -2.5}"#).unwrap();
        assert_eq!(p, LocationPoint::new(1.5, -2.5));
    }
}
