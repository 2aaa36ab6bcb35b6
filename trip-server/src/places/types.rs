//! Wire types for the places search API.

use serde::Deserialize;

/// Wrapper for the search response.
#[derive(Debug, Deserialize)]
pub struct PlacesResponse {
    #[serde(default)]
    pub results: Vec<Place>,
}

/// A point of interest returned by the places API.
#[derive(Debug, Clone, Deserialize)]
pub struct Place {
    /// Stable upstream place identifier.
    pub fsq_place_id: String,

    pub name: String,

    /// Category labels, most specific first.
    #[serde(default)]
    pub categories: Vec<PlaceCategory>,

    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

impl Place {
    /// The first category label, when the upstream supplied any.
    pub fn primary_category(&self) -> Option<&str> {
        self.categories.first().map(|c| c.name.as_str())
    }
}

/// A category label attached to a place.
#[derive(Debug, Clone, Deserialize)]
pub struct PlaceCategory {
    pub name: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_search_response() {
        let body = r#"{
            "results": [
                {
                    "fsq_place_id": "4b5a8e42f964a520d3c228e3",
                    "name": "National Tile Museum",
                    "categories": [{"name": "Museum"}, {"name": "Art Gallery"}],
                    "latitude": 38.7243,
                    "longitude": -9.1137
                },
                {
                    "fsq_place_id": "5c1f2a9be80f5a002c9d9f01",
                    "name": "Unnamed Corner",
                    "categories": []
                }
            ]
        }"#;

        let parsed: PlacesResponse = serde_json::from_str(body).unwrap();
        assert_eq!(parsed.results.len(), 2);

        let museum = &parsed.results[0];
        assert_eq!(museum.primary_category(), Some("Museum"));
        assert_eq!(museum.latitude, Some(38.7243));

        let bare = &parsed.results[1];
        assert_eq!(bare.primary_category(), None);
        assert_eq!(bare.latitude, None);
    }

    #[test]
    fn missing_results_key_defaults_to_empty() {
        let parsed: PlacesResponse = serde_json::from_str("{}").unwrap();
        assert!(parsed.results.is_empty());
    }
}
