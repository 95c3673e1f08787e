use super::*;
use crate::llm::config::LlmTimeouts;
use axum::Router;
use axum::http::{HeaderMap, StatusCode};
use axum::routing::post;

fn make_response(parts: serde_json::Value) -> String {
    serde_json::json!({
        "candidates": [{
            "content": { "role": "model", "parts": parts },
            "finishReason": "STOP",
            "index": 0
        }],
        "usageMetadata": { "promptTokenCount": 80, "candidatesTokenCount": 40 }
    })
    .to_string()
}

/// Serve `router` on an ephemeral local port and return its base URL.
async fn spawn_fake_gemini(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{addr}/v1beta")
}

fn client_for(base_url: &str) -> GeminiClient {
    let config = LlmConfig {
        model: "gemini-2.5-flash-lite".into(),
        base_url: base_url.into(),
        timeouts: LlmTimeouts { request_secs: 5, connect_secs: 2 },
    };
    GeminiClient::new(&config).unwrap()
}

// =============================================================================
// parse_response
// =============================================================================

#[test]
fn parse_text_response() {
    let json = make_response(serde_json::json!([{ "text": "Name: Kira Voss\nBio: ..." }]));
    assert_eq!(parse_response(&json).unwrap(), "Name: Kira Voss\nBio: ...");
}

#[test]
fn parse_concatenates_parts_in_order() {
    let json = make_response(serde_json::json!([{ "text": "Name: A" }, { "text": "\nBio: B" }]));
    assert_eq!(parse_response(&json).unwrap(), "Name: A\nBio: B");
}

#[test]
fn parse_preserves_text_byte_for_byte() {
    let raw = "  ```yaml\nName: \"Q\" <tag> & co\n```  \n";
    let json = make_response(serde_json::json!([{ "text": raw }]));
    assert_eq!(parse_response(&json).unwrap(), raw);
}

#[test]
fn parse_no_candidates_is_empty_response() {
    let json = serde_json::json!({ "candidates": [] }).to_string();
    let err = parse_response(&json).unwrap_err();
    assert!(matches!(err, LlmError::EmptyResponse(ref m) if m.contains("no candidates")));
}

#[test]
fn parse_blocked_prompt_reports_reason() {
    let json = serde_json::json!({ "promptFeedback": { "blockReason": "SAFETY" } }).to_string();
    let err = parse_response(&json).unwrap_err();
    assert!(err.to_string().contains("SAFETY"));
}

#[test]
fn parse_candidate_without_text_reports_finish_reason() {
    let json = serde_json::json!({ "candidates": [{ "finishReason": "MAX_TOKENS" }] }).to_string();
    let err = parse_response(&json).unwrap_err();
    assert!(matches!(err, LlmError::EmptyResponse(ref m) if m.contains("MAX_TOKENS")));
}

#[test]
fn parse_invalid_json() {
    let err = parse_response("not json").unwrap_err();
    assert!(matches!(err, LlmError::ApiParse(_)));
}

#[test]
fn parse_error_message_reads_envelope() {
    let body = serde_json::json!({
        "error": { "code": 400, "message": "API key not valid. Please pass a valid API key.", "status": "INVALID_ARGUMENT" }
    })
    .to_string();
    assert_eq!(parse_error_message(&body), "INVALID_ARGUMENT: API key not valid. Please pass a valid API key.");
}

#[test]
fn parse_error_message_falls_back_to_body() {
    assert_eq!(parse_error_message(" upstream exploded \n"), "upstream exploded");
}

// =============================================================================
// request building
// =============================================================================

#[test]
fn endpoint_includes_model() {
    assert_eq!(
        endpoint_url("https://generativelanguage.googleapis.com/v1beta/", "gemini-2.5-flash-lite"),
        "https://generativelanguage.googleapis.com/v1beta/models/gemini-2.5-flash-lite:generateContent"
    );
}

#[test]
fn request_body_shape() {
    let body = ApiRequest { contents: [RequestContent { role: "user", parts: [RequestPart { text: "hi" }] }] };
    assert_eq!(
        serde_json::to_value(&body).unwrap(),
        serde_json::json!({ "contents": [{ "role": "user", "parts": [{ "text": "hi" }] }] })
    );
}

#[test]
fn auth_header_rejects_control_characters() {
    assert!(matches!(auth_header("bad\nkey"), Err(LlmError::InvalidApiKey(_))));
    assert!(auth_header("AIza-valid_key").unwrap().is_sensitive());
}

// =============================================================================
// generate_text against a local fake
// =============================================================================

#[tokio::test]
async fn generate_text_sends_key_and_prompt() {
    let router = Router::new().route(
        "/v1beta/models/{call}",
        post(|headers: HeaderMap, axum::Json(body): axum::Json<serde_json::Value>| async move {
            let key = headers.get("x-goog-api-key").and_then(|v| v.to_str().ok()).unwrap_or_default();
            let prompt = body["contents"][0]["parts"][0]["text"].as_str().unwrap_or_default();
            let text = format!("key={key} prompt={prompt}");
            make_response(serde_json::json!([{ "text": text }]))
        }),
    );
    let base = spawn_fake_gemini(router).await;
    let client = client_for(&base);

    let text = client.generate_text("valid-key", "roll an npc").await.unwrap();
    assert_eq!(text, "key=valid-key prompt=roll an npc");
}

#[tokio::test]
async fn generate_text_maps_error_status() {
    let router = Router::new().route(
        "/v1beta/models/{call}",
        post(|| async {
            (
                StatusCode::BAD_REQUEST,
                serde_json::json!({
                    "error": { "code": 400, "message": "API key not valid.", "status": "INVALID_ARGUMENT" }
                })
                .to_string(),
            )
        }),
    );
    let base = spawn_fake_gemini(router).await;
    let client = client_for(&base);

    let err = client.generate_text("bad-key", "p").await.unwrap_err();
    assert!(matches!(err, LlmError::ApiResponse { status: 400, .. }));
    assert!(err.to_string().contains("API key not valid."));
}

#[tokio::test]
async fn generate_text_connection_refused_is_request_error() {
    // Bind then drop to get a port nothing listens on.
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let client = client_for(&format!("http://{addr}/v1beta"));
    let err = client.generate_text("k", "p").await.unwrap_err();
    assert!(matches!(err, LlmError::ApiRequest(_)));
}

#[test]
fn model_reports_configured_identifier() {
    let client = client_for("http://localhost:1/v1beta");
    assert_eq!(client.model(), "gemini-2.5-flash-lite");
    assert!(client.endpoint().ends_with("/models/gemini-2.5-flash-lite:generateContent"));
}
