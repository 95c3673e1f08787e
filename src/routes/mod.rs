//! Router assembly.
//!
//! SYSTEM CONTEXT
//! ==============
//! The generator page lives at `/` (GET renders, POST submits the form).
//! JSON endpoints under `/api` expose the same resolver, prompt builder and
//! model client for headless callers.

pub mod api;
pub mod page;

use axum::Router;
use axum::http::StatusCode;
use axum::routing::{get, post};
use tower_http::trace::TraceLayer;

use crate::state::AppState;

pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/", get(page::show).post(page::submit))
        .route("/api/options", get(api::options))
        .route("/api/roll", post(api::roll))
        .route("/healthz", get(healthz))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn healthz() -> StatusCode {
    StatusCode::OK
}

#[cfg(test)]
#[path = "mod_test.rs"]
mod tests;
