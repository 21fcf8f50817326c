//! Shared fakes for the LLM and places services.

#![allow(dead_code)]

use naivigator::{Config, TripPlanner};
use serde_json::{Value, json};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub const PLACES_PATH: &str = "/maps/api/place/findplacefromtext/json";

/// Answer every chat completion with `content` as the assistant message.
pub async fn mock_completion(server: &MockServer, content: &str) {
    mock_completion_finished(server, content, "stop").await;
}

/// Like [`mock_completion`], with an explicit `finish_reason`.
pub async fn mock_completion_finished(server: &MockServer, content: &str, finish_reason: &str) {
    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "choices": [{
                "index": 0,
                "finish_reason": finish_reason,
                "message": {"role": "assistant", "content": content}
            }],
            "usage": {"prompt_tokens": 120, "completion_tokens": 80, "total_tokens": 200}
        })))
        .expect(1)
        .mount(server)
        .await;
}

/// Answer lookups for `input` with `body`, expecting exactly `hits` calls.
pub async fn mock_lookup(server: &MockServer, input: &str, body: Value, hits: u64) {
    Mock::given(method("GET"))
        .and(path(PLACES_PATH))
        .and(query_param("input", input))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .expect(hits)
        .mount(server)
        .await;
}

pub fn found(address: &str, place_id: &str, lat: f64, lng: f64) -> Value {
    json!({
        "status": "OK",
        "candidates": [{
            "formatted_address": address,
            "place_id": place_id,
            "geometry": {"location": {"lat": lat, "lng": lng}}
        }]
    })
}

pub fn nothing() -> Value {
    json!({"status": "ZERO_RESULTS", "candidates": []})
}

pub fn paris_museums_completion() -> String {
    json!([
        {
            "general_location": "Paris, France",
            "title": "Musée du Louvre",
            "info": "The world's most-visited art museum."
        },
        {
            "general_location": "Paris, France",
            "title": "Musée d'Orsay",
            "info": "Impressionist masterpieces in a former railway station."
        }
    ])
    .to_string()
}

/// Mount successful primary lookups for both Paris museums.
pub async fn mock_paris_museums(server: &MockServer) {
    mock_lookup(
        server,
        "Musée du Louvre, Paris, France",
        found(
            "Rue de Rivoli, 75001 Paris, France",
            "ChIJD3uTd9hx5kcR1IQvGfr8dbk",
            48.8606111,
            2.337644,
        ),
        1,
    )
    .await;
    mock_lookup(
        server,
        "Musée d'Orsay, Paris, France",
        found(
            "1 Rue de la Légion d'Honneur, 75007 Paris, France",
            "ChIJG5Td3tZx5kcRq1gS-oKp2Dk",
            48.8599614,
            2.3265614,
        ),
        1,
    )
    .await;
}

pub fn planner_for(llm: &MockServer, places: &MockServer) -> TripPlanner {
    let config = Config::with_services(llm.uri(), "llm-key", places.uri(), "maps-key");
    TripPlanner::from_config(&config).expect("planner builds")
}
