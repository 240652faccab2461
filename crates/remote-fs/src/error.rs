//! Error types for remote-fs

use std::path::PathBuf;

use crate::path::RemotePath;

/// Result type for remote-fs operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in remote-fs operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Remote path already exists: {path}")]
    AlreadyExists {
        path: RemotePath,
        #[source]
        source: remote_exec::Error,
    },

    /// Any other execution failure, passed through unchanged
    #[error(transparent)]
    Exec(#[from] remote_exec::Error),

    #[error("Invalid connection config: {message}")]
    InvalidConfig { message: String },

    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse {format} config at {path}: {message}")]
    ConfigParse {
        path: PathBuf,
        format: String,
        message: String,
    },

    #[error("Unsupported config format: {extension}")]
    UnsupportedFormat { extension: String },
}

/// Stable classification of an [`Error`], independent of message text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// `mkdir` target already exists
    AlreadyExists,
    /// Remote command (or the ssh client itself) exited unsuccessfully
    Remote,
    /// The ssh client could not be started
    Spawn,
    /// Local I/O failure
    Io,
    /// Configuration could not be loaded or is invalid
    Config,
}

impl Error {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    pub fn invalid_config(message: impl Into<String>) -> Self {
        Self::InvalidConfig {
            message: message.into(),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::AlreadyExists { .. } => ErrorKind::AlreadyExists,
            Self::Exec(remote_exec::Error::ExitFailure(_)) => ErrorKind::Remote,
            Self::Exec(remote_exec::Error::Spawn { .. }) => ErrorKind::Spawn,
            Self::Exec(remote_exec::Error::Io { .. }) | Self::Io { .. } => ErrorKind::Io,
            Self::InvalidConfig { .. }
            | Self::ConfigParse { .. }
            | Self::UnsupportedFormat { .. } => ErrorKind::Config,
        }
    }

    /// The underlying execution error, for inspecting exit code, signal and
    /// captured streams.
    pub fn exec(&self) -> Option<&remote_exec::Error> {
        match self {
            Self::AlreadyExists { source, .. } => Some(source),
            Self::Exec(source) => Some(source),
            _ => None,
        }
    }
}

impl From<Error> for std::io::Error {
    fn from(err: Error) -> Self {
        let kind = match &err {
            Error::AlreadyExists { .. } => std::io::ErrorKind::AlreadyExists,
            Error::Exec(remote_exec::Error::Spawn { source, .. })
            | Error::Exec(remote_exec::Error::Io { source, .. })
            | Error::Io { source, .. } => source.kind(),
            Error::InvalidConfig { .. }
            | Error::ConfigParse { .. }
            | Error::UnsupportedFormat { .. } => std::io::ErrorKind::InvalidInput,
            Error::Exec(remote_exec::Error::ExitFailure(_)) => std::io::ErrorKind::Other,
        };
        std::io::Error::new(kind, err)
    }
}
