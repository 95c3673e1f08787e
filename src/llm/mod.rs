//! LLM — Gemini adapter behind a provider-neutral text-generation trait.
//!
//! DESIGN
//! ======
//! The HTTP client and model are fixed at startup from environment
//! variables. The API key is not: it is resolved on every render and passed
//! into each call, so one client serves every session.

pub mod config;
pub mod gemini;
pub mod types;

pub use config::LlmConfig;
pub use gemini::GeminiClient;
pub use types::{LlmError, TextGeneration};
