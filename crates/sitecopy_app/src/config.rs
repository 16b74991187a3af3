use std::fs;
use std::path::Path;
use std::time::Duration;

use client_logging::{client_info, client_warn};
use serde::{Deserialize, Serialize};
use sitecopy_remote::ApiSettings;

pub const CONFIG_FILENAME: &str = ".sitecopy_client.ron";

/// Client configuration, read from an optional RON file next to the binary.
/// Every field falls back to its default, so partial files are fine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    pub service_url: String,
    pub poll_interval_ms: u64,
    pub connect_timeout_secs: u64,
    pub request_timeout_secs: u64,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            service_url: "http://localhost:5000".to_string(),
            poll_interval_ms: 2000,
            connect_timeout_secs: 10,
            request_timeout_secs: 30,
        }
    }
}

impl ClientConfig {
    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }

    pub fn api_settings(&self) -> ApiSettings {
        ApiSettings {
            base_url: self.service_url.clone(),
            connect_timeout: Duration::from_secs(self.connect_timeout_secs),
            request_timeout: Duration::from_secs(self.request_timeout_secs),
        }
    }
}

pub fn load(path: &Path) -> ClientConfig {
    let content = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            return ClientConfig::default();
        }
        Err(err) => {
            client_warn!("Failed to read config from {:?}: {}", path, err);
            return ClientConfig::default();
        }
    };

    match ron::from_str(&content) {
        Ok(config) => {
            client_info!("Loaded client config from {:?}", path);
            config
        }
        Err(err) => {
            client_warn!("Failed to parse config from {:?}: {}", path, err);
            ClientConfig::default()
        }
    }
}
