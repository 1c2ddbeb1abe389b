use std::{
    collections::HashMap,
    fs,
    path::Path,
};

use anyhow::Context;
use tracing::warn;

pub const DEFAULT_API_URL: &str = "http://localhost:5000";
pub const SETTINGS_FILE: &str = "product_search.toml";
pub const API_URL_ENV_VARS: [&str; 2] = ["PRODUCT_API_URL", "APP__API_URL"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub api_url: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.into(),
        }
    }
}

impl Settings {
    /// Applies a command-line override, which wins over every other layer.
    pub fn with_api_url_override(mut self, api_url: Option<String>) -> Self {
        if let Some(v) = api_url {
            self.api_url = normalize_api_url(&v);
        }
        self
    }
}

pub fn load_settings() -> Settings {
    load_settings_from(Path::new(SETTINGS_FILE), |name| std::env::var(name).ok())
}

/// Layers defaults, the settings file, then environment variables.
pub fn load_settings_from(path: &Path, env: impl Fn(&str) -> Option<String>) -> Settings {
    let mut settings = Settings::default();

    match read_settings_file(path) {
        Ok(Some(file_cfg)) => {
            if let Some(v) = file_cfg.get("api_url") {
                settings.api_url = v.clone();
            }
        }
        Ok(None) => {}
        Err(err) => warn!("ignoring settings file: {err:#}"),
    }

    for name in API_URL_ENV_VARS {
        if let Some(v) = env(name) {
            settings.api_url = v;
        }
    }

    settings.api_url = normalize_api_url(&settings.api_url);
    settings
}

fn read_settings_file(path: &Path) -> anyhow::Result<Option<HashMap<String, String>>> {
    if !path.exists() {
        return Ok(None);
    }
    let raw = fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    let parsed = toml::from_str::<HashMap<String, String>>(&raw)
        .with_context(|| format!("failed to parse {}", path.display()))?;
    Ok(Some(parsed))
}

fn normalize_api_url(raw: &str) -> String {
    let trimmed = raw.trim().trim_end_matches('/');
    if trimmed.is_empty() {
        return Settings::default().api_url;
    }
    trimmed.to_string()
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
