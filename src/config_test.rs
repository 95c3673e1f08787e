use super::*;
use std::collections::HashMap;

fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let map: HashMap<String, String> = vars.iter().map(|(k, v)| ((*k).to_owned(), (*v).to_owned())).collect();
    move |key| map.get(key).cloned()
}

// =============================================================================
// parse_bool
// =============================================================================

#[test]
fn parse_bool_true_variants() {
    for val in ["1", "true", "yes", "on", "TRUE", " Yes "] {
        assert_eq!(parse_bool(val), Some(true), "expected true for {val:?}");
    }
}

#[test]
fn parse_bool_false_variants() {
    for val in ["0", "false", "no", "off", "Off"] {
        assert_eq!(parse_bool(val), Some(false), "expected false for {val:?}");
    }
}

#[test]
fn parse_bool_invalid_returns_none() {
    assert_eq!(parse_bool(""), None);
    assert_eq!(parse_bool("maybe"), None);
}

// =============================================================================
// AppConfig
// =============================================================================

#[test]
fn defaults_when_unset() {
    let cfg = AppConfig::from_lookup(lookup(&[])).unwrap();
    assert_eq!(cfg.port, DEFAULT_PORT);
    assert_eq!(cfg.bind_addr, "0.0.0.0");
    assert_eq!(cfg.listen_addr(), "0.0.0.0:3000");
    assert_eq!(cfg.secrets_path, PathBuf::from(".streamlit/secrets.toml"));
    assert!(!cfg.cookie_secure);
    assert_eq!(cfg.session_idle, Duration::from_secs(DEFAULT_SESSION_IDLE_SECS));
    assert_eq!(cfg.llm, LlmConfig::default());
}

#[test]
fn parses_overrides() {
    let cfg = AppConfig::from_lookup(lookup(&[
        ("PORT", "8080"),
        ("BIND_ADDR", "127.0.0.1"),
        ("LORE_SECRETS_PATH", "/run/secrets/lore.toml"),
        ("COOKIE_SECURE", "on"),
        ("SESSION_IDLE_SECS", "90"),
        ("GEMINI_MODEL", "gemini-2.0-flash"),
    ]))
    .unwrap();
    assert_eq!(cfg.listen_addr(), "127.0.0.1:8080");
    assert_eq!(cfg.secrets_path, PathBuf::from("/run/secrets/lore.toml"));
    assert!(cfg.cookie_secure);
    assert_eq!(cfg.session_idle, Duration::from_secs(90));
    assert_eq!(cfg.llm.model, "gemini-2.0-flash");
}

#[test]
fn invalid_port_is_error() {
    let err = AppConfig::from_lookup(lookup(&[("PORT", "eighty")])).unwrap_err();
    assert!(matches!(err, ConfigError::Invalid { var: "PORT", .. }));
    assert!(err.to_string().contains("eighty"));
}

#[test]
fn invalid_session_idle_uses_default() {
    let cfg = AppConfig::from_lookup(lookup(&[("SESSION_IDLE_SECS", "0")])).unwrap();
    assert_eq!(cfg.session_idle, Duration::from_secs(DEFAULT_SESSION_IDLE_SECS));
}
