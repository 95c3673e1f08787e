//! Shared application state.
//!
//! DESIGN
//! ======
//! `AppState` is injected into Axum handlers via the `State` extractor.
//! It holds the text-generation client, the secret store the credential
//! resolver reads, and the per-session store. Nothing here is shared
//! between sessions except the HTTP client itself.

use std::sync::Arc;

use crate::credential::{self, Credential, SecretStore};
use crate::llm::TextGeneration;
use crate::session::SessionStore;

/// Shared application state, injected into Axum handlers via State extractor.
/// Clone is required by Axum; all inner fields are Arc-wrapped or Clone.
#[derive(Clone)]
pub struct AppState {
    pub llm: Arc<dyn TextGeneration>,
    pub secrets: Arc<dyn SecretStore>,
    pub sessions: SessionStore,
    pub cookie_secure: bool,
    /// Fall back to the process environment after the secret store.
    pub(crate) read_env: bool,
}

impl AppState {
    #[must_use]
    pub fn new(llm: Arc<dyn TextGeneration>, secrets: Arc<dyn SecretStore>, cookie_secure: bool) -> Self {
        Self { llm, secrets, sessions: SessionStore::new(), cookie_secure, read_env: true }
    }

    /// Key from the secret store or environment, re-resolved on every call.
    #[must_use]
    pub fn resolve_credential(&self) -> Option<Credential> {
        if self.read_env {
            credential::resolve(self.secrets.as_ref())
        } else {
            credential::resolve_with(self.secrets.as_ref(), |_| None)
        }
    }
}

// =============================================================================
// TEST HELPERS
// =============================================================================
