use std::path::{Path, PathBuf};

use psyscore_delivery::transport::EmailSettings;
use psyscore_export::styles::DocumentStyles;
use psyscore_export::templates::TemplateStore;
use psyscore_instruments::Catalog;
use psyscore_instruments::norms::WechslerNorms;
use serde::{Deserialize, Serialize};

/// Current config version. Bump this when adding fields or changing shape.
/// Each bump requires a corresponding entry in [`migrate`].
const CURRENT_VERSION: u32 = 1;

pub const ENV_EMAIL_SERVICE_ID: &str = "PSYSCORE_EMAIL_SERVICE_ID";
pub const ENV_EMAIL_TEMPLATE_ID: &str = "PSYSCORE_EMAIL_TEMPLATE_ID";
pub const ENV_EMAIL_PUBLIC_KEY: &str = "PSYSCORE_EMAIL_PUBLIC_KEY";

/// Instruments that need a signed-in clinician unless the config says
/// otherwise.
pub const DEFAULT_PROTECTED: &[&str] = &["adhd_rs_iv", "asrs", "wurs25", "diva5", "wechsler"];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PsyscoreConfig {
    /// Schema version. Missing or 0 = pre-versioned config.
    #[serde(default)]
    pub config_version: u32,
    /// Directory of `<template>.md` files. Bundled templates when unset.
    #[serde(default)]
    pub templates_dir: Option<PathBuf>,
    /// Where `submit` writes generated documents.
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,
    /// Wechsler norm table JSON. Wechsler scoring is unavailable without it.
    #[serde(default)]
    pub wechsler_norms: Option<PathBuf>,
    /// Added in v1.
    #[serde(default = "default_protected")]
    pub protected_instruments: Vec<String>,
    #[serde(default)]
    pub email: Option<EmailSettings>,
    #[serde(default)]
    pub styles: DocumentStyles,
}

impl Default for PsyscoreConfig {
    fn default() -> Self {
        Self {
            config_version: CURRENT_VERSION,
            templates_dir: None,
            output_dir: default_output_dir(),
            wechsler_norms: None,
            protected_instruments: default_protected(),
            email: None,
            styles: DocumentStyles::default(),
        }
    }
}

impl PsyscoreConfig {
    pub fn template_store(&self) -> TemplateStore {
        match &self.templates_dir {
            Some(dir) => TemplateStore::Directory(dir.clone()),
            None => TemplateStore::Bundled,
        }
    }

    /// Build the instrument catalog, loading Wechsler norms when configured.
    pub fn catalog(&self) -> eyre::Result<Catalog> {
        match &self.wechsler_norms {
            Some(path) => Ok(Catalog::with_wechsler_norms(WechslerNorms::load(path)?)),
            None => {
                tracing::debug!("no wechsler norm table configured");
                Ok(Catalog::new())
            }
        }
    }
}

fn default_output_dir() -> PathBuf {
    PathBuf::from(".")
}

fn default_protected() -> Vec<String> {
    DEFAULT_PROTECTED.iter().map(|id| id.to_string()).collect()
}

fn config_dir() -> eyre::Result<PathBuf> {
    let base = dirs::config_dir().ok_or_else(|| eyre::eyre!("no config directory found"))?;
    Ok(base.join("psyscore"))
}

/// `<config dir>/psyscore/config.json`.
pub fn config_path() -> eyre::Result<PathBuf> {
    Ok(config_dir()?.join("config.json"))
}

/// Load the config and apply environment overrides.
pub fn load_config_from(path: &Path) -> eyre::Result<PsyscoreConfig> {
    let config = load_config_file(path)?;
    Ok(apply_env_overrides(config, |key| std::env::var(key).ok()))
}

/// Load, migrate and deserialize a config file as stored on disk. A
/// missing file yields the defaults.
pub fn load_config_file(path: &Path) -> eyre::Result<PsyscoreConfig> {
    let config = if path.exists() {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| eyre::eyre!("failed to read config at {}: {e}", path.display()))?;

        // Parse as raw JSON so we can run migrations before deserializing.
        let json: serde_json::Value = serde_json::from_str(&contents)?;
        let on_disk_version = json
            .get("config_version")
            .and_then(|v| v.as_u64())
            .unwrap_or(0) as u32;

        let migrated = migrate(json, on_disk_version)?;
        serde_json::from_value(migrated)?
    } else {
        tracing::info!(path = %path.display(), "no config file, using defaults");
        PsyscoreConfig::default()
    };
    Ok(config)
}

/// Write the stored config back at the current version, creating it with
/// defaults when missing. Environment overrides are never persisted.
pub fn init_config(path: &Path) -> eyre::Result<PsyscoreConfig> {
    let config = load_config_file(path)?;
    save_config_to(&config, path)?;
    Ok(config)
}

/// Run sequential migrations from `from_version` up to [`CURRENT_VERSION`].
///
/// Each migration is a pure transform on the raw JSON value.
pub fn migrate(mut json: serde_json::Value, from_version: u32) -> eyre::Result<serde_json::Value> {
    if from_version > CURRENT_VERSION {
        return Err(eyre::eyre!(
            "config_version {from_version} is newer than this build supports ({CURRENT_VERSION}). \
             Please update psyscore."
        ));
    }

    // v0 → v1: protected instruments become configurable
    if from_version < 1 {
        let obj = json
            .as_object_mut()
            .ok_or_else(|| eyre::eyre!("config is not a JSON object"))?;
        obj.entry("protected_instruments")
            .or_insert_with(|| serde_json::json!(DEFAULT_PROTECTED));
        obj.insert(
            "config_version".to_string(),
            serde_json::Value::Number(1.into()),
        );
        tracing::info!("migrated config v0 → v1 (added protected_instruments)");
    }

    Ok(json)
}

/// Overlay email credentials from the environment. Unset variables leave
/// the file values alone.
pub fn apply_env_overrides<F>(mut config: PsyscoreConfig, lookup: F) -> PsyscoreConfig
where
    F: Fn(&str) -> Option<String>,
{
    let overrides = [
        ENV_EMAIL_SERVICE_ID,
        ENV_EMAIL_TEMPLATE_ID,
        ENV_EMAIL_PUBLIC_KEY,
    ]
    .map(|key| lookup(key).filter(|v| !v.trim().is_empty()));

    if overrides.iter().all(Option::is_none) {
        return config;
    }

    let email = config.email.get_or_insert_with(EmailSettings::default);
    let [service_id, template_id, public_key] = overrides;
    if let Some(v) = service_id {
        email.service_id = v;
    }
    if let Some(v) = template_id {
        email.template_id = v;
    }
    if let Some(v) = public_key {
        email.public_key = v;
    }
    tracing::debug!("email settings overridden from environment");
    config
}

pub fn save_config_to(config: &PsyscoreConfig, path: &Path) -> eyre::Result<()> {
    let dir = path
        .parent()
        .ok_or_else(|| eyre::eyre!("config path {} has no parent", path.display()))?;
    std::fs::create_dir_all(dir)?;

    // Always write the current version, regardless of what was loaded.
    let mut stamped = config.clone();
    stamped.config_version = CURRENT_VERSION;

    let json = serde_json::to_string_pretty(&stamped)?;

    // Write to a temp file then rename for atomicity
    let tmp_path = path.with_extension("json.tmp");
    std::fs::write(&tmp_path, json.as_bytes())?;

    // Email keys live here, keep it private on Unix
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        std::fs::set_permissions(&tmp_path, std::fs::Permissions::from_mode(0o600))?;
    }

    std::fs::rename(&tmp_path, path)?;

    tracing::info!(path = %path.display(), "config saved");
    Ok(())
}
