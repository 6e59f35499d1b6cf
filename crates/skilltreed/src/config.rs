//! Daemon configuration.
//!
//! Read from a TOML file when one is given (or found at the default
//! location); every field has a default so running with no config works.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Default config location.
pub const SYSTEM_CONFIG_PATH: &str = "/etc/skilltree/skilltreed.toml";

const DB_FILE: &str = "ledger.db";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DaemonConfig {
    /// Address the HTTP API binds to.
    #[serde(default = "default_listen_addr")]
    pub listen_addr: String,

    /// Directory holding the ledger database.
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,

    /// Activity-feed page size when the caller does not pass a limit.
    #[serde(default = "default_activity_limit")]
    pub activity_limit: u32,
}

fn default_listen_addr() -> String {
    "127.0.0.1:7868".to_string()
}

fn default_data_dir() -> PathBuf {
    PathBuf::from("/var/lib/skilltree")
}

fn default_activity_limit() -> u32 {
    20
}

impl Default for DaemonConfig {
    fn default() -> Self {
        Self {
            listen_addr: default_listen_addr(),
            data_dir: default_data_dir(),
            activity_limit: default_activity_limit(),
        }
    }
}

impl DaemonConfig {
    /// Load from an explicit path, or the system path if it exists,
    /// or fall back to defaults.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let path = match path {
            Some(p) => p.to_path_buf(),
            None => {
                let system = PathBuf::from(SYSTEM_CONFIG_PATH);
                if !system.exists() {
                    return Ok(Self::default());
                }
                system
            }
        };

        let raw = std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config: {}", path.display()))?;
        toml::from_str(&raw).with_context(|| format!("Invalid config: {}", path.display()))
    }

    pub fn db_path(&self) -> PathBuf {
        self.data_dir.join(DB_FILE)
    }
}
