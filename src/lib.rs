//! naivigator - LLM-suggested points of interest, pinned to real places.
//!
//! # Overview
//!
//! A trip request (city, kind of places, how many) goes through two
//! external services:
//! 1. An LLM suggests points of interest as a JSON list
//! 2. A places lookup service resolves each suggestion to an address,
//!    coordinates and a maps link, falling back to the general location
//!    when the named place cannot be found
//!
//! The resolved list is rendered on a map page.
//!
//! # Quick Start
//!
//! ```no_run
//! use naivigator::{Config, TripPlanner, TripRequest};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::load(None)?;
//!     config.validate()?;
//!
//!     let planner = TripPlanner::from_config(&config)?;
//!     let plan = planner
//!         .plan(&TripRequest::new("Paris, France", "museums", "2"))
//!         .await?;
//!
//!     for place in &plan.places {
//!         println!("{} - {} ({})", place.title, place.address, place.maps_link);
//!     }
//!
//!     Ok(())
//! }
//! ```
//!
//! # Architecture
//!
//! - **LlmClient**: OpenAI-compatible API client for LLM calls
//! - **ItineraryGenerator**: Turns a trip request into candidate points of interest
//! - **PlacesClient**: "Find place from text" lookups
//! - **PlaceResolver**: Primary and fallback lookups per candidate
//! - **TripPlanner**: Runs the whole pipeline and assembles the result list
//! - **web**: Form, map page and the HTTP 500 boundary

pub mod config;
pub mod error;
pub mod itinerary;
pub mod llm;
pub mod place;
pub mod places;
pub mod planner;
pub mod resolver;
pub mod web;

// Re-export commonly used types
pub use config::Config;
pub use error::{NavigatorError, Result};
pub use itinerary::{CandidatePoi, ItineraryGenerator, TripRequest};
pub use llm::LlmClient;
pub use place::{Coordinates, ResolvedPlace};
pub use places::PlacesClient;
pub use planner::{TripPlan, TripPlanner};
pub use resolver::PlaceResolver;
