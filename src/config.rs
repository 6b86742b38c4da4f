use std::path::PathBuf;
use std::time::Duration;

use anyhow::Context;
use serde::Deserialize;

use crate::http::connection::ConnectionLimits;
use crate::http::parser::DEFAULT_MAX_HEAD_BYTES;
use crate::resource::handler::DEFAULT_MAX_BODY_BYTES;

/// Environment variable naming a YAML config file.
pub const CONFIG_ENV: &str = "FILESERVE_CONFIG";

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub storage: StorageConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub listen_addr: String,
    /// Connections served at once
    pub max_connections: usize,
    pub read_timeout_secs: u64,
    pub max_head_bytes: usize,
    pub max_body_bytes: usize,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Directory request paths are resolved under
    pub root: PathBuf,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            listen_addr: "127.0.0.1:8080".to_string(),
            max_connections: 10,
            read_timeout_secs: 30,
            max_head_bytes: DEFAULT_MAX_HEAD_BYTES,
            max_body_bytes: DEFAULT_MAX_BODY_BYTES,
        }
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            root: PathBuf::from("."),
        }
    }
}

impl Config {
    /// Load configuration.
    ///
    /// Reads the YAML file named by `FILESERVE_CONFIG` when set, otherwise
    /// starts from defaults. `LISTEN` and `ROOT` then override the listen
    /// address and storage root.
    pub fn load() -> anyhow::Result<Self> {
        let mut cfg = match std::env::var(CONFIG_ENV) {
            Ok(path) => {
                let content = std::fs::read_to_string(&path)
                    .with_context(|| format!("reading config file {}", path))?;
                Self::from_yaml(&content).with_context(|| format!("parsing config file {}", path))?
            }
            Err(_) => Self::default(),
        };

        if let Ok(listen_addr) = std::env::var("LISTEN") {
            cfg.server.listen_addr = listen_addr;
        }
        if let Ok(root) = std::env::var("ROOT") {
            cfg.storage.root = PathBuf::from(root);
        }

        cfg.validate()?;
        Ok(cfg)
    }

    /// Parse a YAML document. Omitted fields take their defaults.
    pub fn from_yaml(content: &str) -> anyhow::Result<Self> {
        let cfg: Config = serde_yaml::from_str(content)?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        if self.server.max_connections == 0 {
            anyhow::bail!("server.max_connections must be at least 1");
        }
        if self.server.read_timeout_secs == 0 {
            anyhow::bail!("server.read_timeout_secs must be at least 1");
        }
        if self.server.max_head_bytes == 0 {
            anyhow::bail!("server.max_head_bytes must be at least 1");
        }
        Ok(())
    }

    pub fn read_timeout(&self) -> Duration {
        Duration::from_secs(self.server.read_timeout_secs)
    }

    pub fn connection_limits(&self) -> ConnectionLimits {
        ConnectionLimits {
            max_head_bytes: self.server.max_head_bytes,
            read_timeout: self.read_timeout(),
        }
    }
}
