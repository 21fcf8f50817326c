//! Place resolver - pins candidate points of interest to real places.
//!
//! Each candidate gets at most two lookups:
//! 1. `"<title>, <general_location>"`
//! 2. `"<general_location>"` alone, when the first finds nothing
//!
//! If the second lookup finds nothing either, resolution fails with
//! [`NavigatorError::Resolution`] and the whole plan is abandoned.

use crate::error::{NavigatorError, Result};
use crate::itinerary::CandidatePoi;
use crate::place::ResolvedPlace;
use crate::places::PlacesClient;
use futures::stream::{self, StreamExt, TryStreamExt};
use tracing::{debug, instrument, warn};

/// Resolves candidates through the places lookup service.
#[derive(Clone)]
pub struct PlaceResolver {
    client: PlacesClient,
    concurrency: usize,
}

impl PlaceResolver {
    /// Create a resolver that handles one candidate at a time.
    pub fn new(client: PlacesClient) -> Self {
        Self {
            client,
            concurrency: 1,
        }
    }

    /// Allow up to `concurrency` candidates in flight. Output order is unaffected.
    pub fn with_concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency.max(1);
        self
    }

    /// Resolve one candidate, falling back to its general location.
    #[instrument(skip(self, candidate), fields(title = %candidate.title))]
    pub async fn resolve(&self, candidate: &CandidatePoi) -> Result<ResolvedPlace> {
        let primary = self.client.find_place(&candidate.primary_query()).await?;

        if let Some(found) = primary.best_match() {
            debug!(address = %found.formatted_address, "Resolved on primary query");
            return ResolvedPlace::from_match(candidate, found);
        }

        warn!(
            status = %primary.status,
            general_location = %candidate.general_location,
            "Primary lookup found nothing, falling back to general location"
        );

        let fallback = self.client.find_place(candidate.fallback_query()).await?;

        match fallback.best_match() {
            Some(found) => {
                debug!(address = %found.formatted_address, "Resolved on fallback query");
                ResolvedPlace::from_match(candidate, found)
            }
            None => Err(NavigatorError::Resolution {
                title: candidate.title.clone(),
                general_location: candidate.general_location.clone(),
                status: fallback.status.to_string(),
            }),
        }
    }

    /// Resolve every candidate, keeping the input order.
    ///
    /// Stops at the first failure; no partial list is returned.
    pub async fn resolve_all(&self, candidates: &[CandidatePoi]) -> Result<Vec<ResolvedPlace>> {
        stream::iter(candidates.iter().cloned())
            .map(|candidate| async move { self.resolve(&candidate).await })
            .buffered(self.concurrency)
            .try_collect()
            .await
    }
}
