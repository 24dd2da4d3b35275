// ABOUTME: Configuration types and parsing for dockbridge.yml.
// ABOUTME: Handles file discovery, YAML parsing, and command-line overrides.

mod init;
mod server;

pub use init::init_config;
pub use server::ServerConfig;

use crate::engine::EngineConfig;
use crate::error::{Error, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

pub const CONFIG_FILENAME: &str = "dockbridge.yml";
pub const CONFIG_FILENAME_ALT: &str = "dockbridge.yaml";
pub const CONFIG_FILENAME_DIR: &str = ".dockbridge/config.yml";

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Config {
    #[serde(default, deserialize_with = "deserialize_server")]
    pub server: ServerConfig,

    #[serde(default)]
    pub engine: EngineConfig,
}

impl Config {
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        // An empty file deserializes to unit; treat it as "all defaults".
        if yaml.trim().is_empty() {
            return Ok(Config::default());
        }
        let config: Config = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(Error::ConfigNotFound(path.to_path_buf()));
        }
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    /// Locate a config file in `dir`, if any.
    pub fn find(dir: &Path) -> Option<PathBuf> {
        let candidates = [
            dir.join(CONFIG_FILENAME),
            dir.join(CONFIG_FILENAME_ALT),
            dir.join(CONFIG_FILENAME_DIR),
        ];

        candidates.into_iter().find(|path| path.exists())
    }

    /// Load the config file found in `dir`, falling back to defaults.
    pub fn discover(dir: &Path) -> Result<Self> {
        match Self::find(dir) {
            Some(path) => {
                tracing::debug!(path = %path.display(), "loading configuration");
                Self::load(&path)
            }
            None => Ok(Config::default()),
        }
    }

    /// Apply command-line overrides for the listener.
    pub fn with_listener(mut self, host: Option<String>, port: Option<u16>) -> Result<Self> {
        if let Some(host) = host {
            self.server.host = host;
        }
        if let Some(port) = port {
            self.server.port = port;
        }
        self.validate()?;
        Ok(self)
    }

    pub fn validate(&self) -> Result<()> {
        self.server.validate().map_err(Error::InvalidConfig)?;
        self.engine.validate().map_err(Error::InvalidConfig)
    }
}

// Custom deserializers

fn deserialize_server<'de, D>(deserializer: D) -> std::result::Result<ServerConfig, D::Error>
where
    D: serde::Deserializer<'de>,
{
    match ServerEntry::deserialize(deserializer)? {
        ServerEntry::Simple(s) => ServerConfig::parse(&s).map_err(serde::de::Error::custom),
        ServerEntry::Detailed(c) => Ok(c),
    }
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ServerEntry {
    Simple(String),
    Detailed(ServerConfig),
}
