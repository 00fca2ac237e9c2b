use std::io::Write;
use std::time::Duration;

use glasnik::nlu::{Intent, Interpreter};
use glasnik::{AppConfig, ConfigError, PendingPolicy};

#[test]
fn test_empty_object_uses_defaults() {
    let config = AppConfig::from_json_str("{}").unwrap();
    assert_eq!(config, AppConfig::default());
    assert_eq!(config.reactor.pending_policy, PendingPolicy::Reject);
    assert_eq!(
        config.reactor.confirmation_timeout(),
        Some(Duration::from_millis(30_000))
    );
}

#[test]
fn test_partial_overrides_keep_other_defaults() {
    let config = AppConfig::from_json_str(
        r#"{ "reactor": { "confidence_threshold": 0.75, "pending_policy": "queue" } }"#,
    )
    .unwrap();
    assert!((config.reactor.confidence_threshold - 0.75).abs() < f32::EPSILON);
    assert_eq!(config.reactor.pending_policy, PendingPolicy::Queue);
    assert_eq!(config.reactor.max_queued, 4);
    assert!(!config.nlu.intents.is_empty());
}

#[test]
fn test_null_timeout_disables_expiry() {
    let config =
        AppConfig::from_json_str(r#"{ "reactor": { "confirmation_timeout_ms": null } }"#).unwrap();
    assert_eq!(config.reactor.confirmation_timeout(), None);
}

#[test]
fn test_invalid_values_are_rejected() {
    let err = AppConfig::from_json_str(r#"{ "reactor": { "confidence_threshold": 1.5 } }"#)
        .unwrap_err();
    assert!(matches!(err, ConfigError::Invalid(_)));

    let err = AppConfig::from_json_str(r#"{ "reactor": { "confirmation_timeout_ms": 0 } }"#)
        .unwrap_err();
    assert!(matches!(err, ConfigError::Invalid(_)));

    let err = AppConfig::from_json_str(r#"{ "reactor": { "execution_timeout_ms": 0 } }"#)
        .unwrap_err();
    assert!(matches!(err, ConfigError::Invalid(_)));

    let err = AppConfig::from_json_str(r#"{ "nlu": { "intents": [] } }"#).unwrap_err();
    assert!(matches!(err, ConfigError::Invalid(_)));
}

#[test]
fn test_malformed_json_is_a_parse_error() {
    let err = AppConfig::from_json_str("{ \"reactor\": ").unwrap_err();
    assert!(matches!(err, ConfigError::Parse(_)));

    let err = AppConfig::from_json_str(r#"{ "reactor": { "pending_policy": "sometimes" } }"#)
        .unwrap_err();
    assert!(matches!(err, ConfigError::Parse(_)));
}

#[test]
fn test_load_from_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(file, r#"{{ "reactor": {{ "auto_confirm": true }} }}"#).unwrap();

    let config = AppConfig::load(file.path()).unwrap();
    assert!(config.reactor.auto_confirm);

    let missing = AppConfig::load(file.path().with_extension("missing")).unwrap_err();
    assert!(matches!(missing, ConfigError::Io(_)));
}

#[test]
fn test_custom_intent_table_from_json() {
    let config = AppConfig::from_json_str(
        r#"{ "nlu": { "intents": [
            { "intent": "send", "phrases": ["šibni"] },
            { "intent": "cancel", "phrases": ["pusti"] }
        ] } }"#,
    )
    .unwrap();
    let interpreter = Interpreter::new(&config.nlu).unwrap();

    assert_eq!(interpreter.classify("Šibni ponudu 7"), Intent::Send);
    assert_eq!(interpreter.classify("pusti to"), Intent::Cancel);
    assert_eq!(interpreter.classify("pošalji ponudu 7"), Intent::Unknown);
}
