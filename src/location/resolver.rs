//! Building resolution seam: the `Geocoder` trait and query composition.

use super::types::{Building, BuildingQuery, LocationError};

/// Resolves a building query to coordinates.
///
/// Implementations may block; callers on an async runtime should run them on
/// a blocking thread.
pub trait Geocoder: Send + Sync {
    fn lookup(&self, query: &BuildingQuery) -> Result<Building, LocationError>;
}

/// Compose the free-text search string: "name[, city][, country]".
pub fn build_search_query(query: &BuildingQuery) -> Result<String, LocationError> {
    let name = query.name.trim();
    if name.is_empty() {
        return Err(LocationError::InvalidQuery("building name is empty".into()));
    }

    let mut q = name.to_string();
    for part in [&query.city, &query.country].into_iter().flatten() {
        let part = part.trim();
        if !part.is_empty() {
            q.push_str(", ");
            q.push_str(part);
        }
    }
    Ok(q)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_name_only() {
        let q = build_search_query(&BuildingQuery::new("Empire State Building")).unwrap();
        assert_eq!(q, "Empire State Building");
    }

    #[test]
    fn test_name_city_country() {
        let q = BuildingQuery::new("Town Hall").with_city("Oslo").with_country("Norway");
        assert_eq!(build_search_query(&q).unwrap(), "Town Hall, Oslo, Norway");
    }

    #[test]
    fn test_country_without_city() {
        let q = BuildingQuery::new("Town Hall").with_country("Norway");
        assert_eq!(build_search_query(&q).unwrap(), "Town Hall, Norway");
    }

    #[test]
    fn test_blank_parts_skipped_and_trimmed() {
        let q = BuildingQuery::new("  Town Hall ").with_city("  ").with_country(" Norway ");
        assert_eq!(build_search_query(&q).unwrap(), "Town Hall, Norway");
    }

    #[test]
    fn test_blank_name_rejected() {
        let err = build_search_query(&BuildingQuery::new(" \t")).unwrap_err();
        assert!(matches!(err, LocationError::InvalidQuery(_)));
    }
}
