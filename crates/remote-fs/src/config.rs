//! Connection configuration and format-agnostic loading

use std::path::{Path, PathBuf};

use remote_exec::{DEFAULT_EXECUTABLE, DEFAULT_PORT, HostKeyPolicy, SshTarget};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::listing::ListingFormat;
use crate::path::RemotePath;
use crate::{Error, Result};

/// Everything a [`RemoteFs`](crate::RemoteFs) needs to reach its host.
///
/// The ssh executable can only be chosen in code; it is never read from a
/// config file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConnectionConfig {
    user: String,
    host: String,
    #[serde(default = "default_port")]
    port: u16,
    #[serde(default = "default_root_dir")]
    root_dir: String,
    #[serde(default)]
    host_key_policy: HostKeyPolicy,
    #[serde(default)]
    listing_format: ListingFormat,
    #[serde(skip, default = "default_executable")]
    executable: PathBuf,
}

fn default_port() -> u16 {
    DEFAULT_PORT
}

fn default_root_dir() -> String {
    "/".to_string()
}

fn default_executable() -> PathBuf {
    PathBuf::from(DEFAULT_EXECUTABLE)
}

impl ConnectionConfig {
    pub fn new(user: impl Into<String>, host: impl Into<String>) -> Self {
        Self {
            user: user.into(),
            host: host.into(),
            port: default_port(),
            root_dir: default_root_dir(),
            host_key_policy: HostKeyPolicy::default(),
            listing_format: ListingFormat::default(),
            executable: default_executable(),
        }
    }

    /// Load and validate a config file (TOML, JSON or YAML by extension).
    pub fn from_file(path: &Path) -> Result<Self> {
        let config: Self = ConfigStore::new().load(path)?;
        config.validate()?;
        Ok(config)
    }

    pub fn with_user(mut self, user: impl Into<String>) -> Self {
        self.user = user.into();
        self
    }

    pub fn with_host(mut self, host: impl Into<String>) -> Self {
        self.host = host.into();
        self
    }

    pub fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    pub fn with_root_dir(mut self, root_dir: impl Into<String>) -> Self {
        self.root_dir = root_dir.into();
        self
    }

    pub fn with_executable(mut self, executable: impl Into<PathBuf>) -> Self {
        self.executable = executable.into();
        self
    }

    pub fn with_host_key_policy(mut self, policy: HostKeyPolicy) -> Self {
        self.host_key_policy = policy;
        self
    }

    pub fn with_listing_format(mut self, format: ListingFormat) -> Self {
        self.listing_format = format;
        self
    }

    pub fn user(&self) -> &str {
        &self.user
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    pub fn root_dir(&self) -> &str {
        &self.root_dir
    }

    pub fn executable(&self) -> &Path {
        &self.executable
    }

    pub fn host_key_policy(&self) -> HostKeyPolicy {
        self.host_key_policy
    }

    pub fn listing_format(&self) -> ListingFormat {
        self.listing_format
    }

    /// Real remote path for a virtual path.
    pub fn resolve(&self, virtual_path: &str) -> RemotePath {
        RemotePath::resolve(&self.root_dir, virtual_path)
    }

    /// The ssh-level part of this config.
    pub fn target(&self) -> SshTarget {
        SshTarget::new(&self.user, &self.host)
            .with_port(self.port)
            .with_executable(&self.executable)
            .with_host_key_policy(self.host_key_policy)
    }

    /// Reject configs the ssh client could never act on.
    pub fn validate(&self) -> Result<()> {
        if self.user.trim().is_empty() {
            return Err(Error::invalid_config("user must not be empty"));
        }
        if self.host.trim().is_empty() {
            return Err(Error::invalid_config("host must not be empty"));
        }
        if self.port == 0 {
            return Err(Error::invalid_config("port must be between 1 and 65535"));
        }
        if self.root_dir.is_empty() {
            return Err(Error::invalid_config("root_dir must not be empty"));
        }
        Ok(())
    }
}

/// Format-agnostic configuration loader.
///
/// Detects the format from the file extension:
/// - `.toml` -> TOML
/// - `.json` -> JSON
/// - `.yaml`, `.yml` -> YAML
#[derive(Debug, Default)]
pub struct ConfigStore;

impl ConfigStore {
    pub fn new() -> Self {
        Self
    }

    pub fn load<T: DeserializeOwned>(&self, path: &Path) -> Result<T> {
        let content = std::fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("")
            .to_lowercase();

        match extension.as_str() {
            "toml" => toml::from_str(&content).map_err(|e| parse_error(path, "TOML", e)),
            "json" => serde_json::from_str(&content).map_err(|e| parse_error(path, "JSON", e)),
            "yaml" | "yml" => {
                serde_yaml::from_str(&content).map_err(|e| parse_error(path, "YAML", e))
            }
            _ => Err(Error::UnsupportedFormat { extension }),
        }
    }
}

fn parse_error(path: &Path, format: &str, err: impl std::fmt::Display) -> Error {
    Error::ConfigParse {
        path: path.to_path_buf(),
        format: format.into(),
        message: err.to_string(),
    }
}
