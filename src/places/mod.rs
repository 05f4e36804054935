// Place lookup - free-text query → place name + type tags
//
// The resolver only needs (name, types). Everything else here exists so the
// command surface can show what was found.

use anyhow::Result;
use serde::{Deserialize, Serialize};

use crate::error::RewardsError;

#[cfg(feature = "places")]
mod google;

#[cfg(feature = "places")]
pub use google::GooglePlacesClient;

// ============================================================================
// PLACE
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Geometry {
    pub location: LatLng,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Place {
    #[serde(default)]
    pub place_id: String,

    #[serde(default)]
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub formatted_address: Option<String>,

    /// Short address returned by nearby search instead of formatted_address
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vicinity: Option<String>,

    #[serde(default)]
    pub types: Vec<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub geometry: Option<Geometry>,
}

impl Place {
    pub fn new(name: impl Into<String>, types: Vec<String>) -> Self {
        Place {
            name: name.into(),
            types,
            ..Default::default()
        }
    }

    /// Best available address text
    pub fn address(&self) -> Option<&str> {
        self.formatted_address
            .as_deref()
            .or(self.vicinity.as_deref())
    }

    pub fn location(&self) -> Option<LatLng> {
        self.geometry.as_ref().map(|g| g.location)
    }
}

// ============================================================================
// LOOKUP TRAIT
// ============================================================================

/// Source of places. One request per call, no retries.
pub trait PlaceLookup {
    /// Best candidate for a free-text address or place name.
    /// Ok(None) means the service found nothing.
    fn find_place(&self, query: &str) -> Result<Option<Place>>;

    /// Places around a point, in the order the service ranks them
    fn nearby(&self, location: LatLng, radius_m: u32) -> Result<Vec<Place>>;
}

// ============================================================================
// RESPONSE PARSING
// ============================================================================

/// Find Place From Text response
#[derive(Debug, Deserialize)]
struct FindPlaceResponse {
    #[serde(default)]
    candidates: Vec<Place>,
    #[serde(default)]
    status: String,
    #[serde(default)]
    error_message: Option<String>,
}

/// Nearby Search response
#[derive(Debug, Deserialize)]
struct NearbySearchResponse {
    #[serde(default)]
    results: Vec<Place>,
    #[serde(default)]
    status: String,
    #[serde(default)]
    error_message: Option<String>,
}

/// OK and ZERO_RESULTS are answers; anything else is a failed request
fn check_status(status: &str, error_message: Option<String>) -> Result<(), RewardsError> {
    match status {
        "" | "OK" | "ZERO_RESULTS" => Ok(()),
        other => Err(RewardsError::place_lookup(match error_message {
            Some(message) => format!("{}: {}", other, message),
            None => other.to_string(),
        })),
    }
}

/// First candidate of a Find Place response body
pub fn parse_find_place(body: &str) -> Result<Option<Place>> {
    let response: FindPlaceResponse = serde_json::from_str(body)?;
    check_status(&response.status, response.error_message)?;
    Ok(response.candidates.into_iter().next())
}

/// All results of a Nearby Search response body
pub fn parse_nearby(body: &str) -> Result<Vec<Place>> {
    let response: NearbySearchResponse = serde_json::from_str(body)?;
    check_status(&response.status, response.error_message)?;
    Ok(response.results)
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_find_place() {
        let body = r#"{
            "candidates": [
                {
                    "place_id": "ChIJ123",
                    "name": "Target",
                    "formatted_address": "789 Mission St, San Francisco, CA",
                    "types": ["department_store", "store", "point_of_interest"]
                },
                {"name": "Second"}
            ],
            "status": "OK"
        }"#;

        let place = parse_find_place(body).unwrap().unwrap();
        assert_eq!(place.name, "Target");
        assert_eq!(place.place_id, "ChIJ123");
        assert_eq!(place.address(), Some("789 Mission St, San Francisco, CA"));
        assert_eq!(place.types[0], "department_store");
        assert_eq!(place.location(), None);
    }

    #[test]
    fn test_parse_find_place_zero_results() {
        let body = r#"{"candidates": [], "status": "ZERO_RESULTS"}"#;
        assert_eq!(parse_find_place(body).unwrap(), None);
    }

    #[test]
    fn test_parse_find_place_denied() {
        let body = r#"{"candidates": [], "status": "REQUEST_DENIED", "error_message": "The provided API key is invalid."}"#;
        let err = parse_find_place(body).unwrap_err();

        assert!(matches!(
            err.downcast_ref::<RewardsError>(),
            Some(RewardsError::PlaceLookup(_))
        ));
        assert!(err.to_string().contains("REQUEST_DENIED"));
    }

    #[test]
    fn test_parse_nearby() {
        let body = r#"{
            "results": [
                {
                    "place_id": "a",
                    "name": "Shell",
                    "vicinity": "1 Main St",
                    "types": ["gas_station"],
                    "geometry": {"location": {"lat": 37.77, "lng": -122.41}}
                }
            ],
            "status": "OK"
        }"#;

        let places = parse_nearby(body).unwrap();
        assert_eq!(places.len(), 1);
        assert_eq!(places[0].address(), Some("1 Main St"));
        assert_eq!(
            places[0].location(),
            Some(LatLng { lat: 37.77, lng: -122.41 })
        );
    }

    #[test]
    fn test_place_new() {
        let place = Place::new("Joe's Random Diner", vec!["restaurant".to_string()]);
        assert_eq!(place.name, "Joe's Random Diner");
        assert_eq!(place.address(), None);
    }
}
