//! Filesystem operations on a remote host over ssh
//!
//! [`RemoteFs`] resolves each virtual path against a configured root, turns
//! the operation into one shell command line, runs it through
//! [`remote_exec`], and maps the outcome back to a value or a typed
//! [`Error`].

pub mod classify;
pub mod command;
pub mod config;
pub mod error;
pub mod fs;
pub mod listing;
pub mod path;

pub use command::Operation;
pub use config::{ConfigStore, ConnectionConfig};
pub use error::{Error, ErrorKind, Result};
pub use fs::RemoteFs;
pub use listing::ListingFormat;
pub use path::RemotePath;

pub use remote_exec::{ExecOutput, HostKeyPolicy, RemoteRunner, SshRunner};
