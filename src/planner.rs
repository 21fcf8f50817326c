//! Trip planner - one LLM call, then place resolution, then assembly.

use crate::config::Config;
use crate::error::{NavigatorError, Result};
use crate::itinerary::{ItineraryGenerator, TripRequest};
use crate::llm::LlmClient;
use crate::place::ResolvedPlace;
use crate::places::PlacesClient;
use crate::resolver::PlaceResolver;
use serde::{Deserialize, Serialize};
use std::time::Instant;
use tracing::info;

/// The ordered result list for one request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TripPlan {
    pub places: Vec<ResolvedPlace>,
}

impl TripPlan {
    pub fn len(&self) -> usize {
        self.places.len()
    }

    pub fn is_empty(&self) -> bool {
        self.places.is_empty()
    }

    /// Serialize the places as a JSON array.
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string(self).map_err(|e| NavigatorError::Render(e.to_string()))
    }

    /// Serialize the places as a JSON array that is safe inside a `<script>` element.
    ///
    /// Every `<` becomes `\u003c`, so no tag or comment opener survives.
    pub fn to_embedded_json(&self) -> Result<String> {
        Ok(self.to_json()?.replace('<', "\\u003c"))
    }

    /// Parse a JSON array produced by [`TripPlan::to_json`].
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| NavigatorError::Render(e.to_string()))
    }
}

/// Runs the full pipeline for a trip request.
#[derive(Clone)]
pub struct TripPlanner {
    generator: ItineraryGenerator,
    resolver: PlaceResolver,
}

impl TripPlanner {
    pub fn new(generator: ItineraryGenerator, resolver: PlaceResolver) -> Self {
        Self {
            generator,
            resolver,
        }
    }

    /// Build both service clients from configuration.
    pub fn from_config(config: &Config) -> Result<Self> {
        let generator = ItineraryGenerator::new(LlmClient::new(config.llm.clone())?);
        let resolver = PlaceResolver::new(PlacesClient::new(config.places.clone())?)
            .with_concurrency(config.resolver.concurrency);

        Ok(Self::new(generator, resolver))
    }

    /// Suggest points of interest and pin each one to a real place.
    ///
    /// Any failure aborts the whole plan.
    pub async fn plan(&self, request: &TripRequest) -> Result<TripPlan> {
        let start = Instant::now();

        let candidates = self.generator.generate(request).await?;
        let places = self.resolver.resolve_all(&candidates).await?;

        info!(
            location = %request.location,
            places = places.len(),
            "Planned trip in {:.2?}",
            start.elapsed()
        );

        Ok(TripPlan { places })
    }
}
