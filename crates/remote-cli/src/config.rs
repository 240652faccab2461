//! Connection config resolution
//!
//! An explicit `--config` file wins, then the per-user default file. Flags
//! are applied on top of whichever was found; without a file, `--user` and
//! `--host` are enough to build a config.

use std::path::{Path, PathBuf};

use remote_fs::{ConnectionConfig, ListingFormat};

use crate::cli::Overrides;
use crate::error::{CliError, Result};

/// `<config dir>/rfs/config.toml`, if the platform has a config directory.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("rfs").join("config.toml"))
}

/// Build the effective connection config.
pub fn resolve(
    explicit: Option<&Path>,
    default_path: Option<&Path>,
    overrides: &Overrides,
) -> Result<ConnectionConfig> {
    let from_file = match explicit {
        Some(path) => Some(load(path)?),
        None => match default_path {
            Some(path) if path.is_file() => Some(load(path)?),
            _ => None,
        },
    };

    let base = match (from_file, &overrides.user, &overrides.host) {
        (Some(config), _, _) => config,
        (None, Some(user), Some(host)) => ConnectionConfig::new(user, host),
        (None, _, _) => {
            return Err(CliError::user(
                "no connection configured: pass --config, or both --user and --host",
            ));
        }
    };

    let config = apply(base, overrides);
    config.validate()?;
    Ok(config)
}

fn load(path: &Path) -> Result<ConnectionConfig> {
    tracing::debug!(path = %path.display(), "Loading connection config");
    Ok(ConnectionConfig::from_file(path)?)
}

fn apply(mut config: ConnectionConfig, overrides: &Overrides) -> ConnectionConfig {
    if let Some(user) = &overrides.user {
        config = config.with_user(user);
    }
    if let Some(host) = &overrides.host {
        config = config.with_host(host);
    }
    if let Some(port) = overrides.port {
        config = config.with_port(port);
    }
    if let Some(root) = &overrides.root {
        config = config.with_root_dir(root);
    }
    if let Some(policy) = overrides.host_key_policy {
        config = config.with_host_key_policy(policy);
    }
    if overrides.nul {
        config = config.with_listing_format(ListingFormat::NulDelimited);
    }
    config
}
