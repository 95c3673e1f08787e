//! Page routes — render the form and handle its submissions.

use axum::Form;
use axum::extract::State;
use axum::response::Html;
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use serde::Deserialize;
use time::Duration;
use tracing::{info, warn};
use uuid::Uuid;

use crate::credential::Credential;
use crate::selection::SelectionForm;
use crate::services::generation::{self, GenerationRequest};
use crate::session::{Outcome, SESSION_COOKIE, SessionHandle, SessionState};
use crate::state::AppState;
use crate::views::{self, KeyStatus, PageModel};

/// Raw page form. Every field is optional; a control change submits without `action`.
#[derive(Debug, Default, Deserialize)]
pub struct PageForm {
    pub genre: Option<String>,
    pub archetype: Option<String>,
    pub gender: Option<String>,
    pub mood: Option<String>,
    pub api_key: Option<String>,
    pub action: Option<String>,
}

impl PageForm {
    fn selection(&self) -> SelectionForm {
        SelectionForm {
            genre: self.genre.clone(),
            archetype: self.archetype.clone(),
            gender: self.gender.clone(),
            mood: self.mood.clone(),
        }
    }

    fn is_roll(&self) -> bool {
        self.action.as_deref() == Some("roll")
    }
}

// =============================================================================
// HANDLERS
// =============================================================================

/// `GET /` — render the page for the caller's session.
pub async fn show(State(state): State<AppState>, jar: CookieJar) -> (CookieJar, Html<String>) {
    let (jar, session) = session_for(&state, jar).await;
    let mut current = session.lock().await;
    current.touch();
    let html = render(&state, &current);
    (jar, Html(html))
}

/// `POST /` — apply control changes, roll if the trigger was pressed, re-render.
pub async fn submit(
    State(state): State<AppState>,
    jar: CookieJar,
    Form(form): Form<PageForm>,
) -> (CookieJar, Html<String>) {
    let (jar, session) = session_for(&state, jar).await;
    // Held across the model call: one render at a time per session.
    let mut current = session.lock().await;
    current.touch();
    apply_submission(&state, &mut current, form).await;
    let html = render(&state, &current);
    (jar, Html(html))
}

// =============================================================================
// HELPERS
// =============================================================================

async fn apply_submission(state: &AppState, session: &mut SessionState, form: PageForm) {
    let rejected = session.selection.apply_form(&form.selection());
    if !rejected.is_empty() {
        warn!(?rejected, "ignored out-of-list selection values");
    }

    let resolved = state.resolve_credential();
    // The password box is blank on every submission, so blank never clears
    // a saved key; typing a new one replaces it.
    if resolved.is_none() {
        if let Some(key) = form.api_key.as_deref().and_then(Credential::new) {
            session.manual_key = Some(key);
        }
    }

    if !form.is_roll() {
        return;
    }

    let credential = resolved.or_else(|| session.manual_key.clone());
    let outcome = match credential {
        None => {
            info!("roll requested without an API key");
            Outcome::MissingCredential
        }
        Some(credential) => {
            let request = GenerationRequest { selection: session.selection, credential: Some(credential) };
            Outcome::Generated(generation::generate(state.llm.as_ref(), &request).await)
        }
    };
    session.outcome = Some(outcome);
}

fn render(state: &AppState, session: &SessionState) -> String {
    let key_status = if state.resolve_credential().is_some() {
        KeyStatus::Online
    } else if session.manual_key.is_some() {
        KeyStatus::Manual
    } else {
        KeyStatus::Missing
    };

    views::render_page(PageModel { selection: session.selection, key_status, outcome: session.outcome.clone() })
}

async fn session_for(state: &AppState, jar: CookieJar) -> (CookieJar, SessionHandle) {
    let existing = jar
        .get(SESSION_COOKIE)
        .and_then(|c| Uuid::parse_str(c.value()).ok());
    let (id, handle) = state.sessions.get_or_create(existing).await;

    if existing == Some(id) {
        return (jar, handle);
    }

    let cookie = Cookie::build((SESSION_COOKIE, id.to_string()))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .secure(state.cookie_secure)
        .max_age(Duration::days(1));
    (jar.add(cookie), handle)
}

#[cfg(test)]
#[path = "page_test.rs"]
mod tests;
