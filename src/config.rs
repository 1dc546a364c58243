use std::fs;
use std::path::{Path, PathBuf};

use crate::error::ConfigError;
use crate::types::ClientConfig;

/// Resolves a path relative to the config directory.
pub fn config_path(sub: &str) -> PathBuf {
    let base = std::env::var("CONFIG_PATH").unwrap_or_else(|_| "config".to_string());
    Path::new(&base).join(sub)
}

/// Location of the persisted session slots.
pub fn session_path() -> PathBuf {
    config_path("session.json")
}

/// Initialize config directory with defaults if missing.
pub fn init() -> Result<(), ConfigError> {
    init_at(&config_path(""))
}

fn init_at(base: &Path) -> Result<(), ConfigError> {
    if !base.exists() {
        fs::create_dir_all(base)?;
    }

    let client_path = base.join("client.json");
    if !client_path.exists() {
        let defaults = serde_json::to_string_pretty(&ClientConfig::default())?;
        fs::write(&client_path, defaults)?;
        tracing::info!("Wrote default {}", client_path.display());
    }

    Ok(())
}

/// Load the client configuration. `API_URL` overrides the file's `apiUrl`.
pub fn load_client_config() -> Result<ClientConfig, ConfigError> {
    load_at(&config_path("client.json"), std::env::var("API_URL").ok())
}

fn load_at(path: &Path, api_url: Option<String>) -> Result<ClientConfig, ConfigError> {
    let data = fs::read_to_string(path)?;
    let mut config: ClientConfig = serde_json::from_str(&data)?;

    if let Some(url) = api_url.filter(|u| !u.is_empty()) {
        config.api_url = url;
    }

    Ok(config)
}
