//! Layered settings: defaults, then `bpjs.toml`, then environment.
//!
//! CLI flags are applied last by `main`.

use std::{
    collections::HashMap,
    fs,
    path::Path,
};

use anyhow::Context;

pub const DEFAULT_CONFIG_FILE: &str = "bpjs.toml";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub base_url: String,
    pub log_filter: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:3000/api".into(),
            log_filter: "info".into(),
        }
    }
}

/// Load settings from `config_path` (or `bpjs.toml` in the working
/// directory when absent) and the process environment.
///
/// A missing default file is fine; a missing explicit file is an error.
pub fn load_settings(config_path: Option<&Path>) -> anyhow::Result<Settings> {
    let mut settings = Settings::default();

    match config_path {
        Some(path) => {
            let raw = fs::read_to_string(path)
                .with_context(|| format!("failed to read config file '{}'", path.display()))?;
            apply_file(&mut settings, &raw)
                .with_context(|| format!("invalid config file '{}'", path.display()))?;
        }
        None => {
            if let Ok(raw) = fs::read_to_string(DEFAULT_CONFIG_FILE) {
                apply_file(&mut settings, &raw)
                    .with_context(|| format!("invalid config file '{DEFAULT_CONFIG_FILE}'"))?;
            }
        }
    }

    apply_env(&mut settings, |key| std::env::var(key).ok());
    Ok(settings)
}

/// Apply flat `key = "value"` pairs from a TOML document. Unknown keys are
/// ignored.
pub fn apply_file(settings: &mut Settings, raw: &str) -> anyhow::Result<()> {
    let file_cfg: HashMap<String, String> = toml::from_str(raw)?;
    if let Some(v) = file_cfg.get("base_url") {
        settings.base_url = v.clone();
    }
    if let Some(v) = file_cfg.get("log_filter") {
        settings.log_filter = v.clone();
    }
    Ok(())
}

/// `APP__*` variables win over the short `BPJS_*` names.
pub fn apply_env(settings: &mut Settings, var: impl Fn(&str) -> Option<String>) {
    if let Some(v) = var("BPJS_BASE_URL") {
        settings.base_url = v;
    }
    if let Some(v) = var("APP__BASE_URL") {
        settings.base_url = v;
    }

    if let Some(v) = var("BPJS_LOG") {
        settings.log_filter = v;
    }
    if let Some(v) = var("APP__LOG") {
        settings.log_filter = v;
    }
}
