use std::{collections::HashMap, fs, path::Path};

use anyhow::{bail, Context};
use url::Url;

pub const DEFAULT_CONFIG_FILE: &str = "storefront.toml";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub base_url: String,
    pub auth_token: Option<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8080".into(),
            auth_token: None,
        }
    }
}

pub fn load_settings(config_path: &Path) -> Settings {
    load_settings_with(config_path, |key| std::env::var(key).ok())
}

/// Defaults, then the config file, then environment variables.
pub fn load_settings_with(config_path: &Path, env: impl Fn(&str) -> Option<String>) -> Settings {
    let mut settings = Settings::default();

    if let Ok(raw) = fs::read_to_string(config_path) {
        match toml::from_str::<HashMap<String, String>>(&raw) {
            Ok(file_cfg) => {
                if let Some(v) = file_cfg.get("base_url") {
                    settings.base_url = v.clone();
                }
                if let Some(v) = file_cfg.get("auth_token") {
                    settings.auth_token = Some(v.clone());
                }
            }
            Err(err) => tracing::warn!(
                path = %config_path.display(),
                error = %err,
                "ignoring unreadable storefront config"
            ),
        }
    }

    if let Some(v) = env("STOREFRONT_BASE_URL") {
        settings.base_url = v;
    }
    if let Some(v) = env("APP__BASE_URL") {
        settings.base_url = v;
    }

    if let Some(v) = env("STOREFRONT_TOKEN") {
        settings.auth_token = Some(v);
    }
    if let Some(v) = env("APP__AUTH_TOKEN") {
        settings.auth_token = Some(v);
    }

    settings.auth_token = settings
        .auth_token
        .take()
        .map(|token| token.trim().to_string())
        .filter(|token| !token.is_empty());

    settings
}

/// Validates the backend base url and strips trailing slashes.
pub fn normalize_base_url(raw: &str) -> anyhow::Result<String> {
    let trimmed = raw.trim().trim_end_matches('/');
    if trimmed.is_empty() {
        return Ok(Settings::default().base_url);
    }

    let parsed = Url::parse(trimmed).with_context(|| format!("invalid base url '{raw}'"))?;
    if !matches!(parsed.scheme(), "http" | "https") {
        bail!("base url '{raw}' must use http or https");
    }

    Ok(trimmed.to_string())
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
