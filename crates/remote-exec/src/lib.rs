//! Remote command execution over an ssh client subprocess
//!
//! Every call to [`RemoteRunner::run`] spawns exactly one ssh process for a
//! single command line. There is no connection reuse, no timeout and no retry:
//! the call resolves when the remote command exits, with its captured output
//! on success or an [`Error::ExitFailure`] carrying the same output otherwise.

pub mod error;
pub mod output;
pub mod runner;
pub mod target;

pub use error::{Error, Result};
pub use output::ExecOutput;
pub use runner::{RemoteRunner, SshRunner};
pub use target::{DEFAULT_EXECUTABLE, DEFAULT_PORT, HostKeyPolicy, SshTarget};
