//! Web front end: the request form and the map page.

use crate::error::{NavigatorError, Result};
use crate::itinerary::TripRequest;
use crate::place::ResolvedPlace;
use crate::planner::TripPlanner;
use askama::Template;
use axum::{
    Form, Router,
    extract::{State, rejection::FormRejection},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    routing::get,
};
use serde::Deserialize;
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use tracing::{error, info};

/// Body of every 500 page.
pub const INTERNAL_ERROR_MESSAGE: &str = "Oh no! You encountered an internal server error.\n\
Sorry about that. We will review the logs and fix it soon.\n\
In the meantime, give it another try!\n\
https://naivigator.app/";

/// Shared handler state.
#[derive(Clone)]
pub struct AppState {
    planner: Arc<TripPlanner>,
}

impl AppState {
    pub fn new(planner: TripPlanner) -> Self {
        Self {
            planner: Arc::new(planner),
        }
    }
}

/// Fields posted by the request form.
#[derive(Debug, Deserialize)]
pub struct TripForm {
    #[serde(rename = "City")]
    pub city: String,
    #[serde(rename = "Type")]
    pub interest: String,
    #[serde(rename = "Number")]
    pub count: String,
}

impl From<TripForm> for TripRequest {
    fn from(form: TripForm) -> Self {
        TripRequest::new(form.city.trim(), form.interest.trim(), form.count.trim())
    }
}

#[derive(Template)]
#[template(path = "index.html")]
pub struct IndexTemplate {}

#[derive(Template)]
#[template(path = "map.html")]
pub struct MapTemplate<'a> {
    pub request: &'a TripRequest,
    pub map_locations_json: String,
    pub map_locations: &'a [ResolvedPlace],
}

impl IntoResponse for NavigatorError {
    fn into_response(self) -> Response {
        error!("Server Error: {}", self);
        (StatusCode::INTERNAL_SERVER_ERROR, INTERNAL_ERROR_MESSAGE).into_response()
    }
}

/// Build the application router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(index).post(plan_trip))
        .route("/health", get(health_check))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn index() -> Result<Html<String>> {
    Ok(Html(IndexTemplate {}.render()?))
}

async fn health_check() -> &'static str {
    "OK"
}

async fn plan_trip(
    State(state): State<AppState>,
    form: std::result::Result<Form<TripForm>, FormRejection>,
) -> Result<Html<String>> {
    let Form(form) = form.map_err(|e| NavigatorError::Form(e.body_text()))?;
    let request = TripRequest::from(form);
    let plan = state.planner.plan(&request).await?;

    let page = MapTemplate {
        request: &request,
        map_locations_json: plan.to_embedded_json()?,
        map_locations: &plan.places,
    };

    Ok(Html(page.render()?))
}

/// Serve the router on `address` until Ctrl-C.
pub async fn serve(address: &str, state: AppState) -> Result<()> {
    let server_error = |source: std::io::Error| NavigatorError::Server {
        address: address.to_string(),
        source,
    };

    let listener = tokio::net::TcpListener::bind(address)
        .await
        .map_err(server_error)?;

    info!("Web server running at http://{}", address);

    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(server_error)
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutting down");
}
