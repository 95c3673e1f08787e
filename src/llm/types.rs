//! LLM types — errors and the text-generation seam.

// =============================================================================
// ERROR
// =============================================================================

/// Errors produced by LLM client operations.
#[derive(Debug, thiserror::Error)]
pub enum LlmError {
    /// The API key cannot be placed in a request header.
    #[error("invalid API key: {0}")]
    InvalidApiKey(String),

    /// The HTTP request to the provider failed.
    #[error("API request failed: {0}")]
    ApiRequest(String),

    /// The provider returned a non-success HTTP status.
    #[error("API response error: status {status}: {message}")]
    ApiResponse { status: u16, message: String },

    /// The provider response body could not be deserialized.
    #[error("API response parse failed: {0}")]
    ApiParse(String),

    /// The response parsed but carried no text.
    #[error("empty response: {0}")]
    EmptyResponse(String),

    /// The underlying HTTP client could not be constructed.
    #[error("HTTP client build failed: {0}")]
    HttpClientBuild(String),
}

// =============================================================================
// TEXT GENERATION TRAIT
// =============================================================================

/// Single-prompt, non-streaming text generation. Enables mocking in tests.
#[async_trait::async_trait]
pub trait TextGeneration: Send + Sync {
    /// Send `prompt` authorized by `api_key` and return the model's text.
    ///
    /// # Errors
    ///
    /// Returns an [`LlmError`] if the key is unusable, the request fails,
    /// or the response is malformed.
    async fn generate_text(&self, api_key: &str, prompt: &str) -> Result<String, LlmError>;

    /// Model identifier requests are sent to.
    fn model(&self) -> &str;
}
