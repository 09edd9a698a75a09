use figment::providers::{Env, Format, Serialized, Toml};
use figment::Figment;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::domain::error::{AppError, Result};

/// Server configuration: defaults, overridable via `sheetjoin.toml` and
/// `SHEETJOIN_`-prefixed environment variables.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub output_dir: PathBuf,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 5000,
            output_dir: PathBuf::from("./output_files"),
        }
    }
}

impl ServerConfig {
    pub fn load() -> Result<Self> {
        Figment::from(Serialized::defaults(ServerConfig::default()))
            .merge(Toml::file("sheetjoin.toml"))
            .merge(Env::prefixed("SHEETJOIN_"))
            .extract()
            .map_err(|e| AppError::Internal(format!("Failed to load configuration: {}", e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ServerConfig::default();
        assert_eq!(config.host, "127.0.0.1");
        assert_eq!(config.port, 5000);
        assert_eq!(config.output_dir, PathBuf::from("./output_files"));
    }
}
