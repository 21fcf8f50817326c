//! Itinerary generator - asks the LLM for candidate points of interest.
//!
//! The completion text must be a JSON array of
//! `{"general_location", "title", "info"}` objects. Anything else is a
//! parse failure; there is no retry and no schema coercion.

use crate::error::{NavigatorError, Result};
use crate::llm::{LlmClient, MAX_TOKENS, Message, Prompts};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

/// Longest slice of a bad completion quoted back in an error.
const PREVIEW_CHARS: usize = 200;

/// What the visitor asked for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TripRequest {
    /// City or area to explore.
    pub location: String,
    /// Free-text interest filter ("museums", "street food", ...).
    pub interest: String,
    /// Desired number of points of interest, passed through as given.
    pub count: String,
}

impl TripRequest {
    pub fn new(
        location: impl Into<String>,
        interest: impl Into<String>,
        count: impl Into<String>,
    ) -> Self {
        Self {
            location: location.into(),
            interest: interest.into(),
            count: count.into(),
        }
    }

    /// Render the user message sent alongside the system instruction.
    pub fn to_prompt(&self) -> String {
        Prompts::itinerary_request()
            .replace("{location}", &self.location)
            .replace("{count}", &self.count)
            .replace("{interest}", &self.interest)
    }
}

/// An unresolved point of interest suggested by the LLM.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CandidatePoi {
    /// City or general area and country.
    pub general_location: String,
    /// Official name of the place, or its address.
    pub title: String,
    /// Short description.
    pub info: String,
}

impl CandidatePoi {
    /// Query used for the first lookup attempt: `"<title>, <general_location>"`.
    pub fn primary_query(&self) -> String {
        format!("{}, {}", self.title, self.general_location)
    }

    /// Query used when the primary lookup finds nothing.
    pub fn fallback_query(&self) -> &str {
        &self.general_location
    }
}

/// Generates candidate points of interest with one LLM call.
#[derive(Clone)]
pub struct ItineraryGenerator {
    client: LlmClient,
}

impl ItineraryGenerator {
    /// Create a new generator.
    pub fn new(client: LlmClient) -> Self {
        Self { client }
    }

    /// Ask the LLM for points of interest matching the request.
    pub async fn generate(&self, request: &TripRequest) -> Result<Vec<CandidatePoi>> {
        let prompt = request.to_prompt();
        info!(model = self.client.model(), "Requesting points of interest:\n{}", prompt);

        let response = self
            .client
            .chat(vec![
                Message::system(Prompts::itinerary_system()),
                Message::user(prompt),
            ])
            .await?;

        info!("Raw completion:\n{}", response.content);
        if let Some(usage) = &response.usage {
            debug!(
                prompt_tokens = usage.prompt_tokens,
                completion_tokens = usage.completion_tokens,
                total_tokens = usage.total_tokens,
                "Completion token usage"
            );
        }

        let candidates = match Self::parse_candidates(&response.content) {
            Ok(candidates) => candidates,
            Err(e) if e.is_parse_error() && response.is_truncated() => {
                warn!("Completion stopped at the token limit");
                return Err(NavigatorError::LlmTruncated {
                    max_tokens: MAX_TOKENS,
                    reason: e.to_string(),
                });
            }
            Err(e) => return Err(e),
        };
        info!(count = candidates.len(), "Parsed candidate points of interest");

        Ok(candidates)
    }

    /// Parse completion text into candidates.
    ///
    /// Text that is not JSON yields [`NavigatorError::LlmParse`]; JSON that is
    /// not an array of candidate objects yields [`NavigatorError::LlmShape`].
    pub fn parse_candidates(response: &str) -> Result<Vec<CandidatePoi>> {
        let json_str = Self::strip_code_fence(response);

        let value: serde_json::Value = serde_json::from_str(json_str).map_err(|e| {
            NavigatorError::LlmParse(format!("{} in: {}", e, Self::preview(response)))
        })?;

        serde_json::from_value(value).map_err(|e| {
            NavigatorError::LlmShape(format!(
                "expected an array of {{general_location, title, info}} objects ({}) in: {}",
                e,
                Self::preview(response)
            ))
        })
    }

    /// Remove one markdown code fence wrapping the whole response, if any.
    fn strip_code_fence(response: &str) -> &str {
        let response = response.trim();

        if !response.starts_with("```") || !response.ends_with("```") || response.len() < 6 {
            return response;
        }

        let inner = &response[3..response.len() - 3];
        // Drop the info string ("json") on the opening fence line.
        match inner.find('\n') {
            Some(newline) => inner[newline + 1..].trim(),
            None => inner.trim(),
        }
    }

    fn preview(response: &str) -> String {
        response.chars().take(PREVIEW_CHARS).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_candidates_preserves_order_and_fields() {
        let response = r#"[
            {"general_location": "Paris, France", "title": "Musée du Louvre", "info": "Art museum"},
            {"general_location": "Paris, France", "title": "Musée d'Orsay", "info": "Impressionists"},
            {"general_location": "Paris, France", "title": "12 Rue de Rivoli", "info": "Shop"}
        ]"#;

        let candidates = ItineraryGenerator::parse_candidates(response).unwrap();
        assert_eq!(candidates.len(), 3);
        assert_eq!(candidates[0].title, "Musée du Louvre");
        assert_eq!(candidates[1].title, "Musée d'Orsay");
        assert_eq!(candidates[1].info, "Impressionists");
        assert_eq!(candidates[2].general_location, "Paris, France");
    }

    #[test]
    fn test_parse_empty_array() {
        let candidates = ItineraryGenerator::parse_candidates("[]").unwrap();
        assert!(candidates.is_empty());
    }

    #[test]
    fn test_not_json_is_parse_error() {
        for response in [
            "Sure! Here are some museums in Paris.",
            r#"[{"general_location": "Paris", "title": "Louvre", "info": "x"}"#,
            "",
        ] {
            let err = ItineraryGenerator::parse_candidates(response).unwrap_err();
            assert!(
                matches!(err, NavigatorError::LlmParse(_)),
                "{response:?} gave {err:?}"
            );
        }
    }

    #[test]
    fn test_prose_around_json_is_parse_error() {
        let response = r#"Here you go:
[{"general_location": "Paris", "title": "Louvre", "info": "x"}]"#;
        let err = ItineraryGenerator::parse_candidates(response).unwrap_err();
        assert!(matches!(err, NavigatorError::LlmParse(_)));
    }

    #[test]
    fn test_wrong_shape_is_shape_error() {
        for response in [
            r#"{"general_location": "Paris", "title": "Louvre", "info": "x"}"#,
            r#"[{"general_location": "Paris", "title": "Louvre"}]"#,
            r#"[{"general_location": "Paris", "title": 42, "info": "x"}]"#,
            r#"["Louvre", "Orsay"]"#,
        ] {
            let err = ItineraryGenerator::parse_candidates(response).unwrap_err();
            assert!(
                matches!(err, NavigatorError::LlmShape(_)),
                "{response:?} gave {err:?}"
            );
            assert!(err.is_parse_error());
        }
    }

    #[test]
    fn test_code_fence_is_stripped() {
        let response = "```json\n[{\"general_location\": \"Rome, Italy\", \"title\": \"Colosseum\", \"info\": \"Amphitheatre\"}]\n```";
        let candidates = ItineraryGenerator::parse_candidates(response).unwrap();
        assert_eq!(candidates.len(), 1);
        assert_eq!(candidates[0].title, "Colosseum");
    }

    #[test]
    fn test_preview_respects_char_boundaries() {
        let response = "é".repeat(500);
        let err = ItineraryGenerator::parse_candidates(&response).unwrap_err();
        assert!(matches!(err, NavigatorError::LlmParse(_)));
    }

    #[test]
    fn test_queries() {
        let candidate = CandidatePoi {
            general_location: "Paris, France".into(),
            title: "Musée du Louvre".into(),
            info: "Art museum".into(),
        };
        assert_eq!(candidate.primary_query(), "Musée du Louvre, Paris, France");
        assert_eq!(candidate.fallback_query(), "Paris, France");
    }

    #[test]
    fn test_request_prompt() {
        let request = TripRequest::new("Paris, France", "museums", "2");
        assert_eq!(
            request.to_prompt(),
            "Location: Paris, France\nNumber of points of interest: 2\nType of points of interest: museums"
        );
    }
}
