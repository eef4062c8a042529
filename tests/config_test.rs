use std::fs;

use openslo_sdk::config::*;
use openslo_sdk::errors::OpenSloError;
use tempfile::TempDir;

#[test]
fn test_default_config_enables_everything() {
    let config = ReferenceConfig::default();
    for relation in Relation::ALL {
        assert!(config.is_enabled(relation), "{} should be enabled", relation.as_str());
    }
}

#[test]
fn test_none_disables_everything() {
    let config = ReferenceConfig::none();
    assert!(Relation::ALL.iter().all(|r| !config.is_enabled(*r)));
    assert!(!config.v1.slo.sli);
    assert!(!config.v1.alert_policy.alert_notification_target);
}

#[test]
fn test_relation_names() {
    for relation in Relation::ALL {
        assert_eq!(Relation::from_str(relation.as_str()), Some(relation));
    }
    assert_eq!(Relation::from_str("slo-indicator"), Some(Relation::SloIndicator));
    assert_eq!(Relation::from_str("slo"), None);
}

#[test]
fn test_set_single_relation() {
    let config = ReferenceConfig::default().with(Relation::AlertPolicyConditions, false);
    assert!(!config.v1.alert_policy.alert_condition);
    assert!(config.v1.alert_policy.alert_notification_target);
    assert!(config.v1.slo.alert_policy);
    assert!(config.v1.slo.sli);
}

#[test]
fn test_save_and_load_config() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("references.toml");
    let config = ReferenceConfig::default().with(Relation::SloAlertPolicies, false);

    save_config(&path, &config).unwrap();
    let loaded = load_config(&path).unwrap();
    assert_eq!(loaded, config);
    assert!(!dir.path().join("references.tmp").exists());
}

#[test]
fn test_partial_toml_keeps_defaults() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("references.toml");
    fs::write(&path, "[v1.slo]\nsli = false\n").unwrap();

    let loaded = load_config(&path).unwrap();
    assert!(!loaded.v1.slo.sli);
    assert!(loaded.v1.slo.alert_policy);
    assert_eq!(loaded.v1.alert_policy, AlertPolicyReferences::default());
}

#[test]
fn test_load_json_config() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("references.json");
    fs::write(&path, r#"{"v1": {"alert_policy": {"alert_condition": false}}}"#).unwrap();

    let loaded = load_config(&path).unwrap();
    assert!(!loaded.is_enabled(Relation::AlertPolicyConditions));
    assert!(loaded.is_enabled(Relation::AlertPolicyNotificationTargets));
    assert!(loaded.is_enabled(Relation::SloIndicator));
}

#[test]
fn test_load_missing_config_fails() {
    let dir = TempDir::new().unwrap();
    let err = load_config(&dir.path().join("nope.toml")).unwrap_err();
    match err {
        OpenSloError::Config { message } => assert!(message.contains("failed to read config file")),
        other => panic!("unexpected error: {:?}", other),
    }
}

#[test]
fn test_load_invalid_config_names_the_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("broken.toml");
    fs::write(&path, "[v1.slo]\nsli = \"maybe\"\n").unwrap();

    let err = load_config(&path).unwrap_err();
    assert!(err.to_string().contains("broken.toml"));
}

#[test]
fn test_config_serde_roundtrip() {
    let config = ReferenceConfig::none().with(Relation::SloIndicator, true);
    let json = serde_json::to_string_pretty(&config).unwrap();
    let deserialized: ReferenceConfig = serde_json::from_str(&json).unwrap();
    assert_eq!(config, deserialized);
}
