use psyscore_cli::config::{
    init_config, load_config_from, save_config_to, PsyscoreConfig, ENV_EMAIL_PUBLIC_KEY,
    ENV_EMAIL_SERVICE_ID, ENV_EMAIL_TEMPLATE_ID,
};

// Own test binary: the environment set here must not leak into other tests.
#[test]
fn init_config_does_not_persist_environment_credentials() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.json");
    save_config_to(&PsyscoreConfig::default(), &path).unwrap();

    unsafe {
        std::env::set_var(ENV_EMAIL_SERVICE_ID, "service_env");
        std::env::set_var(ENV_EMAIL_TEMPLATE_ID, "template_env");
        std::env::set_var(ENV_EMAIL_PUBLIC_KEY, "key_env");
    }

    let written = init_config(&path).unwrap();
    assert_eq!(written.email, None);

    let on_disk = std::fs::read_to_string(&path).unwrap();
    assert!(!on_disk.contains("service_env"));
    assert!(!on_disk.contains("key_env"));

    let effective = load_config_from(&path).unwrap();
    let email = effective.email.unwrap();
    assert_eq!(email.service_id, "service_env");
    assert!(email.is_complete());
}
