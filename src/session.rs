//! Per-browser session state.
//!
//! DESIGN
//! ======
//! Each session is identified by a random cookie value and owns one
//! `SessionState` behind its own async mutex. A render locks the session for
//! its whole cycle, including the model call, so renders of one session are
//! serialized while different sessions proceed independently. Idle sessions
//! are evicted by a background sweep.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

use tokio::sync::{Mutex, RwLock};
use tokio::task::JoinHandle;
use tracing::{debug, info};
use uuid::Uuid;

use crate::credential::Credential;
use crate::selection::Selection;
use crate::services::generation::GenerationResult;

pub const SESSION_COOKIE: &str = "lore_session";

/// Fixed message shown when the trigger is pressed without a key.
pub const MISSING_CREDENTIAL_MESSAGE: &str = "Missing API Key.";

// =============================================================================
// SESSION STATE
// =============================================================================

/// What the output area currently shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Generated(GenerationResult),
    MissingCredential,
}

impl Outcome {
    #[must_use]
    pub fn text(&self) -> &str {
        match self {
            Self::Generated(result) => result.text(),
            Self::MissingCredential => MISSING_CREDENTIAL_MESSAGE,
        }
    }
}

/// Everything one browser session remembers between renders.
#[derive(Debug)]
pub struct SessionState {
    pub selection: Selection,
    /// Key typed into the password box when none resolves automatically.
    pub manual_key: Option<Credential>,
    /// Last trigger outcome; replaced only by the next trigger.
    pub outcome: Option<Outcome>,
    pub last_seen: Instant,
}

impl SessionState {
    #[must_use]
    pub fn new() -> Self {
        Self { selection: Selection::default(), manual_key: None, outcome: None, last_seen: Instant::now() }
    }

    pub fn touch(&mut self) {
        self.last_seen = Instant::now();
    }
}

impl Default for SessionState {
    fn default() -> Self {
        Self::new()
    }
}

// =============================================================================
// SESSION STORE
// =============================================================================

pub type SessionHandle = Arc<Mutex<SessionState>>;

#[derive(Clone, Default)]
pub struct SessionStore {
    sessions: Arc<RwLock<HashMap<Uuid, SessionHandle>>>,
}

impl SessionStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up the session for `id`, creating a fresh one when the id is
    /// missing or unknown. Returns the id actually in use.
    ///
    /// A found session is touched under the map lock so the sweeper cannot
    /// evict it between lookup and use.
    pub async fn get_or_create(&self, id: Option<Uuid>) -> (Uuid, SessionHandle) {
        if let Some(id) = id {
            if let Some(handle) = self.sessions.read().await.get(&id) {
                // A locked session is mid-render and already skipped by the sweep.
                if let Ok(mut state) = handle.try_lock() {
                    state.touch();
                }
                return (id, handle.clone());
            }
        }

        let id = Uuid::new_v4();
        let handle = Arc::new(Mutex::new(SessionState::new()));
        self.sessions.write().await.insert(id, handle.clone());
        debug!(%id, "session created");
        (id, handle)
    }

    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }

    /// Drop sessions idle for longer than `max_idle`. Sessions mid-render are kept.
    pub async fn prune_idle(&self, max_idle: Duration) -> usize {
        let mut sessions = self.sessions.write().await;
        let before = sessions.len();
        sessions.retain(|_, handle| match handle.try_lock() {
            Ok(state) => state.last_seen.elapsed() <= max_idle,
            Err(_) => true,
        });
        before - sessions.len()
    }
}

/// Spawn the idle-session sweep. Runs every `max_idle / 4`, at least once a second.
#[must_use]
pub fn spawn_session_sweeper(store: SessionStore, max_idle: Duration) -> JoinHandle<()> {
    let interval = (max_idle / 4).max(Duration::from_secs(1));
    info!(max_idle_secs = max_idle.as_secs(), "session sweeper configured");
    tokio::spawn(async move {
        loop {
            tokio::time::sleep(interval).await;
            let evicted = store.prune_idle(max_idle).await;
            if evicted > 0 {
                debug!(evicted, "idle sessions evicted");
            }
        }
    })
}

#[cfg(test)]
#[path = "session_test.rs"]
mod tests;
