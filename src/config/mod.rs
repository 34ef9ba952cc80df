pub mod types;

use std::path::Path;

use crate::error::{QaError, Result};
use types::Config;

pub fn load_config(path: &Path) -> Result<Config> {
    let mut config = if path.exists() {
        let content = std::fs::read_to_string(path).map_err(|e| {
            QaError::Config(format!(
                "failed to read config file {}: {e}",
                path.display()
            ))
        })?;
        serde_yml::from_str::<Config>(&content)?
    } else {
        tracing::info!(
            "Config file not found at {}, using defaults",
            path.display()
        );
        Config::default()
    };

    apply_env_overrides(&mut config, |name| std::env::var(name).ok());
    Ok(config)
}

/// Overlay `BASE_URL`, `API_KEY`, `UI_BASE_URL` and `HEADLESS` on top of the
/// file values.
pub fn apply_env_overrides(config: &mut Config, lookup: impl Fn(&str) -> Option<String>) {
    if let Some(base_url) = lookup("BASE_URL").filter(|v| !v.trim().is_empty()) {
        config.api.base_url = base_url;
    }
    if let Some(api_key) = lookup("API_KEY") {
        config.api.api_key = api_key;
    }
    if let Some(ui_base_url) = lookup("UI_BASE_URL").filter(|v| !v.trim().is_empty()) {
        config.ui.base_url = ui_base_url;
    }
    if let Some(headless) = lookup("HEADLESS") {
        match headless.trim().to_ascii_lowercase().as_str() {
            "0" | "false" | "no" => config.ui.headless = false,
            "1" | "true" | "yes" => config.ui.headless = true,
            other => tracing::warn!(value = other, "Ignoring unrecognised HEADLESS value"),
        }
    }
}
