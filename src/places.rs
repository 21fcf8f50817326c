//! Places lookup client ("find place from text").
//!
//! Speaks the Google Places `findplacefromtext` JSON API: one text query in,
//! a status plus a list of candidate places out.

use crate::config::PlacesConfig;
use crate::error::{NavigatorError, Result};
use crate::place::Coordinates;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;
use tracing::debug;

/// Fields requested for every lookup.
pub const LOOKUP_FIELDS: &str = "formatted_address,place_id,geometry";

/// Status reported by the lookup service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum LookupStatus {
    Ok,
    ZeroResults,
    Other(String),
}

impl From<String> for LookupStatus {
    fn from(status: String) -> Self {
        match status.as_str() {
            "OK" => LookupStatus::Ok,
            "ZERO_RESULTS" => LookupStatus::ZeroResults,
            _ => LookupStatus::Other(status),
        }
    }
}

impl From<LookupStatus> for String {
    fn from(status: LookupStatus) -> Self {
        status.to_string()
    }
}

impl fmt::Display for LookupStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LookupStatus::Ok => f.write_str("OK"),
            LookupStatus::ZeroResults => f.write_str("ZERO_RESULTS"),
            LookupStatus::Other(status) => f.write_str(status),
        }
    }
}

/// Geometry of a candidate place.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Geometry {
    pub location: Coordinates,
}

/// One place returned by a lookup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlaceCandidate {
    pub formatted_address: String,
    pub place_id: String,
    pub geometry: Geometry,
}

/// Body of a find-place response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FindPlaceResponse {
    pub status: LookupStatus,
    #[serde(default)]
    pub candidates: Vec<PlaceCandidate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,
}

impl FindPlaceResponse {
    /// The best match, when the lookup succeeded and found anything.
    pub fn best_match(&self) -> Option<&PlaceCandidate> {
        match self.status {
            LookupStatus::Ok => self.candidates.first(),
            _ => None,
        }
    }
}

/// Client for the places lookup service.
#[derive(Clone)]
pub struct PlacesClient {
    client: Client,
    config: PlacesConfig,
}

impl PlacesClient {
    /// Create a new places client with the given configuration.
    pub fn new(config: PlacesConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self { client, config })
    }

    fn endpoint(&self) -> String {
        let base = self.config.api_base.trim_end_matches('/');
        format!("{}/maps/api/place/findplacefromtext/json", base)
    }

    /// Look up a place by free text, asking for the single best match.
    pub async fn find_place(&self, input: &str) -> Result<FindPlaceResponse> {
        debug!(input, "Finding place from text");

        let response = self
            .client
            .get(self.endpoint())
            .query(&[
                ("input", input),
                ("inputtype", "textquery"),
                ("fields", LOOKUP_FIELDS),
                ("key", self.config.api_key.as_str()),
            ])
            .send()
            .await
            .map_err(|e| NavigatorError::PlacesApi(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(NavigatorError::PlacesApi(format!(
                "Request failed ({}): {}",
                status, body
            )));
        }

        let body: FindPlaceResponse = response
            .json()
            .await
            .map_err(|e| NavigatorError::PlacesApi(format!("Malformed lookup body: {}", e)))?;

        debug!(
            input,
            status = %body.status,
            candidates = body.candidates.len(),
            "Place lookup finished"
        );

        Ok(body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client_for(api_base: &str) -> PlacesClient {
        PlacesClient::new(PlacesConfig {
            api_base: api_base.to_string(),
            api_key: "maps-key".to_string(),
            ..Default::default()
        })
        .unwrap()
    }

    #[test]
    fn test_status_parsing() {
        let response: FindPlaceResponse =
            serde_json::from_value(json!({"status": "ZERO_RESULTS", "candidates": []})).unwrap();
        assert_eq!(response.status, LookupStatus::ZeroResults);
        assert!(response.best_match().is_none());

        let response: FindPlaceResponse = serde_json::from_value(json!({
            "status": "REQUEST_DENIED",
            "error_message": "The provided API key is invalid."
        }))
        .unwrap();
        assert_eq!(response.status, LookupStatus::Other("REQUEST_DENIED".into()));
        assert_eq!(response.status.to_string(), "REQUEST_DENIED");
        assert!(response.candidates.is_empty());
    }

    #[test]
    fn test_ok_without_candidates_has_no_best_match() {
        let response: FindPlaceResponse =
            serde_json::from_value(json!({"status": "OK", "candidates": []})).unwrap();
        assert!(response.best_match().is_none());
    }

    #[tokio::test]
    async fn test_find_place_sends_text_query() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/maps/api/place/findplacefromtext/json"))
            .and(query_param("input", "Musée du Louvre, Paris, France"))
            .and(query_param("inputtype", "textquery"))
            .and(query_param("fields", LOOKUP_FIELDS))
            .and(query_param("key", "maps-key"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "status": "OK",
                "candidates": [{
                    "formatted_address": "75001 Paris, France",
                    "place_id": "ChIJD3uTd9hx5kcR1IQvGfr8dbk",
                    "geometry": {
                        "location": {"lat": 48.8606111, "lng": 2.337644},
                        "viewport": {
                            "northeast": {"lat": 48.86, "lng": 2.34},
                            "southwest": {"lat": 48.85, "lng": 2.33}
                        }
                    }
                }]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let response = client_for(&server.uri())
            .find_place("Musée du Louvre, Paris, France")
            .await
            .unwrap();

        let best = response.best_match().unwrap();
        assert_eq!(best.formatted_address, "75001 Paris, France");
        assert_eq!(best.place_id, "ChIJD3uTd9hx5kcR1IQvGfr8dbk");
        assert_eq!(best.geometry.location.lat, 48.8606111);
        assert_eq!(best.geometry.location.lng, 2.337644);
    }

    #[tokio::test]
    async fn test_http_failure_is_places_error() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(503).set_body_string("unavailable"))
            .mount(&server)
            .await;

        let err = client_for(&server.uri()).find_place("Paris").await.unwrap_err();
        assert!(matches!(err, NavigatorError::PlacesApi(_)));
    }
}
