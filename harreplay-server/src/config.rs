// Copyright 2026 Harreplay Contributors
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU Affero General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the
// GNU Affero General Public License for more details.
//
// You should have received a copy of the GNU Affero General Public License
// along with this program. If not, see <https://www.gnu.org/licenses/>.

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::path::{Path, PathBuf};

/// Harreplay Server Configuration
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct ServerConfig {
    #[serde(default)]
    pub server: HttpServerConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct HttpServerConfig {
    /// HTTP listen address (e.g., "127.0.0.1:3000")
    #[serde(default = "default_listen_addr")]
    pub listen_addr: String,

    /// Enable CORS
    #[serde(default)]
    pub enable_cors: bool,

    /// Allowed CORS origins (empty = allow all)
    #[serde(default)]
    pub cors_origins: Vec<String>,
}

// Default values
fn default_listen_addr() -> String {
    "127.0.0.1:3000".to_string()
}

impl Default for HttpServerConfig {
    fn default() -> Self {
        Self {
            listen_addr: default_listen_addr(),
            enable_cors: false,
            cors_origins: vec![],
        }
    }
}

impl ServerConfig {
    /// Load configuration from TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = toml::from_str(&content)?;
        Ok(config)
    }

    /// Load configuration from environment variables
    ///
    /// Supported environment variables:
    /// - HARREPLAY_HTTP_ADDR: HTTP listen address (default: 127.0.0.1:3000)
    /// - HARREPLAY_ENABLE_CORS: Enable CORS (default: false)
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(addr) = std::env::var("HARREPLAY_HTTP_ADDR") {
            config.server.listen_addr = addr;
        }

        if let Ok(cors) = std::env::var("HARREPLAY_ENABLE_CORS") {
            config.server.enable_cors = cors.parse().unwrap_or(false);
        }

        config
    }

    /// Load configuration with priority: file > env > defaults
    pub fn load(config_file: Option<PathBuf>) -> Result<Self> {
        let mut config = if let Some(path) = config_file {
            if path.exists() {
                tracing::info!("Loading configuration from file: {:?}", path);
                Self::from_file(&path)?
            } else {
                tracing::warn!("Config file not found: {:?}, using defaults", path);
                Self::default()
            }
        } else {
            Self::default()
        };

        // Override with environment variables
        config = Self::merge_with_env(config);

        Ok(config)
    }

    /// Merge config with environment variables (env takes priority)
    fn merge_with_env(mut config: Self) -> Self {
        let env_config = Self::from_env();

        // Only override if env var was explicitly set
        if std::env::var("HARREPLAY_HTTP_ADDR").is_ok() {
            config.server.listen_addr = env_config.server.listen_addr;
        }
        if std::env::var("HARREPLAY_ENABLE_CORS").is_ok() {
            config.server.enable_cors = env_config.server.enable_cors;
        }

        config
    }

    /// Parse listen address as SocketAddr
    pub fn socket_addr(&self) -> Result<SocketAddr> {
        Ok(self.server.listen_addr.parse()?)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        self.socket_addr()?;
        Ok(())
    }
}
