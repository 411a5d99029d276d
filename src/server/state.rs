use crate::location::Geocoder;
use std::sync::Arc;
use std::time::Duration;

pub struct AppState {
    pub geocoder: Arc<dyn Geocoder>,
    /// Pause before a standalone building lookup (Nominatim usage policy).
    pub courtesy_delay: Duration,
}
