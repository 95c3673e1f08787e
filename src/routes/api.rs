//! JSON routes for headless use of the generator.

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use serde::{Deserialize, Serialize};

use crate::credential::Credential;
use crate::selection::{Selection, SelectionOptions};
use crate::services::generation::{self, GenerationRequest};
use crate::session::MISSING_CREDENTIAL_MESSAGE;
use crate::state::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct RollBody {
    #[serde(default)]
    pub selection: Selection,
    /// Used only when no key resolves from the secret store or environment.
    pub api_key: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct RollResponse {
    pub text: String,
    pub is_error: bool,
}

/// `GET /api/options` — option lists for every control.
pub async fn options() -> Json<SelectionOptions> {
    Json(SelectionOptions::all())
}

/// `POST /api/roll` — generate one NPC. Generation failures are still `200`
/// with `is_error: true`; only a missing key is rejected.
pub async fn roll(State(state): State<AppState>, Json(body): Json<RollBody>) -> (StatusCode, Json<RollResponse>) {
    let credential = state
        .resolve_credential()
        .or_else(|| body.api_key.as_deref().and_then(Credential::new));

    let Some(credential) = credential else {
        return (
            StatusCode::UNAUTHORIZED,
            Json(RollResponse { text: MISSING_CREDENTIAL_MESSAGE.to_owned(), is_error: true }),
        );
    };

    let request = GenerationRequest { selection: body.selection, credential: Some(credential) };
    let result = generation::generate(state.llm.as_ref(), &request).await;
    (StatusCode::OK, Json(RollResponse { text: result.text().to_owned(), is_error: result.is_error() }))
}

#[cfg(test)]
#[path = "api_test.rs"]
mod tests;
