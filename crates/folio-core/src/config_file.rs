use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::contact::transport::ResponseMode;
use crate::{Config, CoreError};

/// On-disk TOML configuration structure.
/// All fields are optional so partial configs work (merge with defaults).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ConfigFile {
    pub contact: Option<ContactConfig>,
    pub idle: Option<IdleConfig>,
    pub scroll: Option<ScrollConfig>,
    pub display: Option<DisplayConfig>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ContactConfig {
    pub endpoint: Option<String>,
    pub secret: Option<String>,
    pub response_mode: Option<ResponseMode>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct IdleConfig {
    pub timeout_ms: Option<u64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ScrollConfig {
    pub tolerance: Option<u32>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DisplayConfig {
    pub theme: Option<String>,
    pub tick_ms: Option<u64>,
}

/// Platform config directory path: `<config_dir>/folio/config.toml`.
pub fn config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("folio").join("config.toml"))
}

/// Load config by cascading CWD `.folio.toml` over platform config.
/// CWD values override platform values.
pub fn load_config() -> ConfigFile {
    let platform = config_path().and_then(|p| load_from_path(&p));
    let cwd = load_from_path(Path::new(".folio.toml"));

    match (platform, cwd) {
        (None, None) => ConfigFile::default(),
        (Some(p), None) => p,
        (None, Some(c)) => c,
        (Some(p), Some(c)) => merge(p, c),
    }
}

/// Read a config file, ignoring a missing or malformed one.
pub fn load_from_path(path: &Path) -> Option<ConfigFile> {
    match try_load_from_path(path) {
        Ok(cfg) => Some(cfg),
        Err(CoreError::Io(_)) => None,
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "ignoring malformed config file");
            None
        }
    }
}

/// Read a config file the user asked for explicitly; errors propagate.
pub fn try_load_from_path(path: &Path) -> Result<ConfigFile, CoreError> {
    let content = std::fs::read_to_string(path)?;
    Ok(toml::from_str(&content)?)
}

fn pick<S, T: Clone>(
    overlay: &Option<S>,
    base: &Option<S>,
    field: impl Fn(&S) -> Option<T>,
) -> Option<T> {
    overlay
        .as_ref()
        .and_then(&field)
        .or_else(|| base.as_ref().and_then(&field))
}

/// Merge two configs: `overlay` values take precedence over `base`.
pub fn merge(base: ConfigFile, overlay: ConfigFile) -> ConfigFile {
    ConfigFile {
        contact: Some(ContactConfig {
            endpoint: pick(&overlay.contact, &base.contact, |c| c.endpoint.clone()),
            secret: pick(&overlay.contact, &base.contact, |c| c.secret.clone()),
            response_mode: pick(&overlay.contact, &base.contact, |c| c.response_mode),
        }),
        idle: Some(IdleConfig {
            timeout_ms: pick(&overlay.idle, &base.idle, |i| i.timeout_ms),
        }),
        scroll: Some(ScrollConfig {
            tolerance: pick(&overlay.scroll, &base.scroll, |s| s.tolerance),
        }),
        display: Some(DisplayConfig {
            theme: pick(&overlay.display, &base.display, |d| d.theme.clone()),
            tick_ms: pick(&overlay.display, &base.display, |d| d.tick_ms),
        }),
    }
}

/// Fill `config` from the file. Only sets values that are present and non-empty.
pub fn apply_to_config(file_cfg: &ConfigFile, config: &mut Config) {
    if let Some(contact) = &file_cfg.contact {
        if let Some(endpoint) = &contact.endpoint
            && !endpoint.is_empty()
        {
            config.endpoint = endpoint.clone();
        }
        if let Some(secret) = &contact.secret
            && !secret.is_empty()
        {
            config.secret = Some(secret.clone());
        }
        if let Some(mode) = contact.response_mode {
            config.response_mode = mode;
        }
    }
    if let Some(ms) = file_cfg.idle.as_ref().and_then(|i| i.timeout_ms) {
        config.idle_timeout = Duration::from_millis(ms.max(1));
    }
    if let Some(tolerance) = file_cfg.scroll.as_ref().and_then(|s| s.tolerance) {
        config.scroll_tolerance = tolerance;
    }
}

/// Environment overrides: `FOLIO_CONTACT_ENDPOINT`, `FOLIO_CONTACT_SECRET`,
/// `FOLIO_RESPONSE_MODE`.
pub fn apply_env(config: &mut Config) {
    apply_vars(config, |key| std::env::var(key).ok());
}

fn apply_vars(config: &mut Config, var: impl Fn(&str) -> Option<String>) {
    if let Some(endpoint) = var("FOLIO_CONTACT_ENDPOINT").filter(|v| !v.is_empty()) {
        config.endpoint = endpoint;
    }
    if let Some(secret) = var("FOLIO_CONTACT_SECRET").filter(|v| !v.is_empty()) {
        config.secret = Some(secret);
    }
    if let Some(raw) = var("FOLIO_RESPONSE_MODE") {
        match ResponseMode::parse(&raw) {
            Some(mode) => config.response_mode = mode,
            None => tracing::warn!(value = %raw, "unknown FOLIO_RESPONSE_MODE, keeping default"),
        }
    }
}
