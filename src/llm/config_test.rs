use super::*;
use std::collections::HashMap;

fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let map: HashMap<String, String> = vars.iter().map(|(k, v)| ((*k).to_owned(), (*v).to_owned())).collect();
    move |key| map.get(key).cloned()
}

#[test]
fn defaults_when_unset() {
    let cfg = LlmConfig::from_lookup(lookup(&[]));
    assert_eq!(cfg, LlmConfig::default());
    assert_eq!(cfg.model, "gemini-2.5-flash-lite");
    assert_eq!(cfg.base_url, DEFAULT_GEMINI_BASE_URL);
    assert_eq!(
        cfg.timeouts,
        LlmTimeouts { request_secs: DEFAULT_LLM_REQUEST_TIMEOUT_SECS, connect_secs: DEFAULT_LLM_CONNECT_TIMEOUT_SECS }
    );
}

#[test]
fn parses_overrides() {
    let cfg = LlmConfig::from_lookup(lookup(&[
        ("GEMINI_MODEL", "gemini-2.5-pro"),
        ("GEMINI_BASE_URL", "https://example.test/v1/"),
        ("LLM_REQUEST_TIMEOUT_SECS", "42"),
        ("LLM_CONNECT_TIMEOUT_SECS", "7"),
    ]));
    assert_eq!(cfg.model, "gemini-2.5-pro");
    assert_eq!(cfg.base_url, "https://example.test/v1");
    assert_eq!(cfg.timeouts, LlmTimeouts { request_secs: 42, connect_secs: 7 });
}

#[test]
fn invalid_timeouts_fall_back_to_defaults() {
    let cfg = LlmConfig::from_lookup(lookup(&[("LLM_REQUEST_TIMEOUT_SECS", "soon"), ("LLM_CONNECT_TIMEOUT_SECS", "0")]));
    assert_eq!(cfg.timeouts, LlmTimeouts::default());
}

#[test]
fn blank_model_uses_default() {
    let cfg = LlmConfig::from_lookup(lookup(&[("GEMINI_MODEL", "  ")]));
    assert_eq!(cfg.model, DEFAULT_GEMINI_MODEL);
}
