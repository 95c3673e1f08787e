//! Generation service — selection + credential → prompt → model → display text.
//!
//! DESIGN
//! ======
//! Every failure is caught here and turned into a displayable
//! `"Error: ..."` string. Callers never see an `LlmError`. There is no
//! retry and no distinction between transient and permanent failures.

use serde::Serialize;
use tracing::{info, warn};

use crate::credential::Credential;
use crate::llm::TextGeneration;
use crate::prompt;
use crate::selection::Selection;

/// Prefix on every error result shown to the user.
pub const ERROR_PREFIX: &str = "Error: ";

// =============================================================================
// TYPES
// =============================================================================

/// Everything one generation needs, built right before the call.
#[derive(Debug, Clone)]
pub struct GenerationRequest {
    pub selection: Selection,
    pub credential: Option<Credential>,
}

/// Outcome of one generation. Either variant is displayed as-is.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "text", rename_all = "snake_case")]
pub enum GenerationResult {
    /// Raw model output, unmodified.
    Text(String),
    /// Display text starting with [`ERROR_PREFIX`].
    Error(String),
}

impl GenerationResult {
    fn error(description: impl std::fmt::Display) -> Self {
        Self::Error(format!("{ERROR_PREFIX}{description}"))
    }

    /// The string shown in the output block.
    #[must_use]
    pub fn text(&self) -> &str {
        match self {
            Self::Text(text) | Self::Error(text) => text,
        }
    }

    #[must_use]
    pub fn is_error(&self) -> bool {
        matches!(self, Self::Error(_))
    }
}

// =============================================================================
// GENERATE
// =============================================================================

/// Run one generation. Never fails: errors come back as [`GenerationResult::Error`].
pub async fn generate(llm: &dyn TextGeneration, request: &GenerationRequest) -> GenerationResult {
    let Some(credential) = request.credential.as_ref() else {
        return GenerationResult::error("missing API key");
    };

    let prompt = prompt::build(&request.selection);
    let selection = &request.selection;
    info!(
        model = llm.model(),
        genre = %selection.genre,
        archetype = %selection.archetype,
        gender = %selection.gender,
        mood = %selection.mood,
        "generating npc"
    );

    match llm.generate_text(credential.expose(), &prompt).await {
        Ok(text) => {
            info!(chars = text.len(), "npc generated");
            GenerationResult::Text(text)
        }
        Err(e) => {
            warn!(error = %e, "npc generation failed");
            GenerationResult::error(e)
        }
    }
}

#[cfg(test)]
#[path = "generation_test.rs"]
mod tests;
