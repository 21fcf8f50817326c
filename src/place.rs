//! Resolved places and map links.

use crate::error::{NavigatorError, Result};
use crate::itinerary::CandidatePoi;
use crate::places::PlaceCandidate;
use reqwest::Url;
use serde::{Deserialize, Serialize};

/// Base of the maps search deep link.
pub const MAPS_SEARCH_URL: &str = "https://www.google.com/maps/search/";

/// Latitude/longitude pair in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub lat: f64,
    pub lng: f64,
}

/// A candidate point of interest pinned to a real-world place.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResolvedPlace {
    /// Title as suggested by the LLM.
    pub title: String,
    /// Description as suggested by the LLM.
    pub info: String,
    /// Formatted address from the lookup.
    pub address: String,
    pub coordinates: Coordinates,
    /// Deep link opening the place in Google Maps.
    pub maps_link: String,
}

impl ResolvedPlace {
    /// Combine a candidate's text with a lookup match.
    ///
    /// `title` and `info` always come from the candidate; the match only
    /// contributes address, coordinates and place id.
    pub fn from_match(candidate: &CandidatePoi, found: &PlaceCandidate) -> Result<Self> {
        Ok(Self {
            title: candidate.title.clone(),
            info: candidate.info.clone(),
            address: found.formatted_address.clone(),
            coordinates: found.geometry.location,
            maps_link: maps_link(&found.formatted_address, &found.place_id)?,
        })
    }
}

/// Build `https://www.google.com/maps/search/?api=1&query=...&query_place_id=...`.
///
/// Parameters are form-encoded, so spaces become `+`.
pub fn maps_link(address: &str, place_id: &str) -> Result<String> {
    let url = Url::parse_with_params(
        MAPS_SEARCH_URL,
        &[("api", "1"), ("query", address), ("query_place_id", place_id)],
    )
    .map_err(|e| NavigatorError::Http(format!("Invalid maps link: {}", e)))?;

    Ok(url.into())
}
