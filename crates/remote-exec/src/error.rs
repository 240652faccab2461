//! Error types for remote command execution

use std::path::PathBuf;

use crate::output::ExecOutput;

/// Result type alias for remote execution
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while running a command on the remote host
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The ssh executable could not be started
    #[error("Failed to spawn {}: {source}", .program.display())]
    Spawn {
        /// Executable that was launched
        program: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Reading or writing one of the child's standard streams failed
    #[error("I/O error on {stream}: {source}")]
    Io {
        /// Which stream (or `wait`) failed
        stream: &'static str,
        #[source]
        source: std::io::Error,
    },

    /// The process exited with a non-zero status or was killed by a signal
    #[error("Remote run exit with code: {}", describe_exit(.0))]
    ExitFailure(ExecOutput),
}

impl Error {
    /// Captured output of the failed run, if the process got that far.
    pub fn output(&self) -> Option<&ExecOutput> {
        match self {
            Self::ExitFailure(output) => Some(output),
            _ => None,
        }
    }

    /// Exit code of the failed run, if the process exited normally.
    pub fn code(&self) -> Option<i32> {
        self.output().and_then(|o| o.code)
    }

    /// Signal that terminated the process, if any.
    pub fn signal(&self) -> Option<i32> {
        self.output().and_then(|o| o.signal)
    }

    /// Captured stderr as lossy UTF-8, empty when there was no run.
    pub fn stderr_lossy(&self) -> String {
        self.output()
            .map(|o| o.stderr_lossy().into_owned())
            .unwrap_or_default()
    }

    pub(crate) fn io(stream: &'static str, source: std::io::Error) -> Self {
        Self::Io { stream, source }
    }
}

fn describe_exit(output: &ExecOutput) -> String {
    match (output.code, output.signal) {
        (Some(code), _) => code.to_string(),
        (None, Some(signal)) => format!("none (signal {})", signal),
        (None, None) => "none".to_string(),
    }
}
