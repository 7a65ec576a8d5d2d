use std::path::PathBuf;

use psyscore_cli::config::{
    apply_env_overrides, load_config_from, migrate, save_config_to, PsyscoreConfig,
    DEFAULT_PROTECTED, ENV_EMAIL_PUBLIC_KEY, ENV_EMAIL_SERVICE_ID,
};
use psyscore_delivery::transport::EmailSettings;
use psyscore_export::templates::TemplateStore;
use serde_json::json;

#[test]
fn missing_file_yields_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let config = load_config_from(&dir.path().join("config.json")).unwrap();

    assert_eq!(config.config_version, 1);
    assert_eq!(config.protected_instruments.len(), DEFAULT_PROTECTED.len());
    assert!(matches!(config.template_store(), TemplateStore::Bundled));
}

#[test]
fn pre_versioned_config_is_migrated() {
    let migrated = migrate(json!({ "output_dir": "/srv/results" }), 0).unwrap();

    assert_eq!(migrated["config_version"], 1);
    assert_eq!(migrated["protected_instruments"], json!(DEFAULT_PROTECTED));
    assert_eq!(migrated["output_dir"], "/srv/results");
}

#[test]
fn migration_keeps_an_explicit_protected_list() {
    let migrated = migrate(json!({ "protected_instruments": ["wechsler"] }), 0).unwrap();
    assert_eq!(migrated["protected_instruments"], json!(["wechsler"]));
}

#[test]
fn newer_config_version_is_refused() {
    let err = migrate(json!({ "config_version": 9 }), 9).unwrap_err();
    assert!(err.to_string().contains("newer than this build supports"));
}

#[test]
fn saved_config_loads_back() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested/config.json");
    let config = PsyscoreConfig {
        config_version: 0,
        templates_dir: Some(PathBuf::from("/srv/templates")),
        wechsler_norms: Some(PathBuf::from("/srv/norms.json")),
        protected_instruments: vec!["diva5".to_string()],
        ..PsyscoreConfig::default()
    };

    save_config_to(&config, &path).unwrap();
    let loaded = load_config_from(&path).unwrap();

    assert_eq!(loaded.config_version, 1);
    assert_eq!(loaded.protected_instruments, vec!["diva5".to_string()]);
    assert!(matches!(
        loaded.template_store(),
        TemplateStore::Directory(dir) if dir == PathBuf::from("/srv/templates")
    ));
    assert!(!dir.path().join("nested/config.json.tmp").exists());

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        let mode = std::fs::metadata(&path).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o600);
    }
}

#[test]
fn environment_fills_in_email_credentials() {
    let config = apply_env_overrides(PsyscoreConfig::default(), |key| match key {
        ENV_EMAIL_SERVICE_ID => Some("service_abc".to_string()),
        ENV_EMAIL_PUBLIC_KEY => Some("pk_123".to_string()),
        _ => None,
    });

    let email = config.email.unwrap();
    assert_eq!(email.service_id, "service_abc");
    assert_eq!(email.public_key, "pk_123");
    assert!(email.template_id.is_empty());
    assert!(!email.is_complete());
}

#[test]
fn blank_environment_leaves_file_settings_alone() {
    let file_settings = EmailSettings {
        service_id: "from_file".to_string(),
        template_id: "tpl".to_string(),
        public_key: "key".to_string(),
        ..EmailSettings::default()
    };
    let config = PsyscoreConfig {
        email: Some(file_settings.clone()),
        ..PsyscoreConfig::default()
    };

    let config = apply_env_overrides(config, |key| match key {
        ENV_EMAIL_SERVICE_ID => Some("  ".to_string()),
        _ => None,
    });
    assert_eq!(config.email, Some(file_settings));
}

#[test]
fn unreadable_norm_table_fails_catalog_construction() {
    let config = PsyscoreConfig {
        wechsler_norms: Some(PathBuf::from("/nonexistent/norms.json")),
        ..PsyscoreConfig::default()
    };
    assert!(config.catalog().is_err());
}
