//! The remote filesystem facade

use remote_exec::{ExecOutput, RemoteRunner, SshRunner};

use crate::classify::classify;
use crate::command::Operation;
use crate::config::ConnectionConfig;
use crate::error::{Error, ErrorKind, Result};
use crate::path::RemotePath;

/// Filesystem operations executed on a remote host, one ssh process each.
///
/// Calls share nothing but the immutable config, so they may run
/// concurrently; completion order between concurrent calls is unspecified.
/// A caller that needs `mkdir` to finish before a `write_file` into that
/// directory must await the first before issuing the second.
#[derive(Debug)]
pub struct RemoteFs<R = SshRunner> {
    config: ConnectionConfig,
    runner: R,
}

impl RemoteFs<SshRunner> {
    /// Facade driving the ssh client named in `config`.
    pub fn new(config: ConnectionConfig) -> Result<Self> {
        let runner = SshRunner::new(config.target());
        Self::with_runner(config, runner)
    }
}

impl<R: RemoteRunner> RemoteFs<R> {
    /// Facade driving a caller-supplied runner.
    pub fn with_runner(config: ConnectionConfig, runner: R) -> Result<Self> {
        config.validate()?;
        Ok(Self { config, runner })
    }

    pub fn config(&self) -> &ConnectionConfig {
        &self.config
    }

    /// Remote path a virtual path resolves to.
    pub fn real_path(&self, path: &str) -> RemotePath {
        self.config.resolve(path)
    }

    /// Succeeds if `path` exists on the remote host.
    pub async fn access(&self, path: &str) -> Result<()> {
        self.exec(Operation::Access, path, None).await?;
        Ok(())
    }

    /// Create a single directory.
    ///
    /// Fails with [`Error::AlreadyExists`] when the target is already there.
    pub async fn mkdir(&self, path: &str) -> Result<()> {
        self.exec(Operation::Mkdir, path, None).await?;
        Ok(())
    }

    /// Remove `path` recursively. A missing target is not an error.
    pub async fn rmrf(&self, path: &str) -> Result<()> {
        self.exec(Operation::Rmrf, path, None).await?;
        Ok(())
    }

    /// Create or truncate `path` and fill it with `content`.
    pub async fn write_file(&self, path: &str, content: &[u8]) -> Result<()> {
        self.exec(Operation::WriteFile, path, Some(content)).await?;
        Ok(())
    }

    /// Entry names of the directory at `path`, in listing order.
    pub async fn read_dir(&self, path: &str) -> Result<Vec<String>> {
        let output = self.exec(Operation::ReadDir, path, None).await?;
        Ok(self.config.listing_format().parse(&output.stdout))
    }

    async fn exec(
        &self,
        operation: Operation,
        path: &str,
        input: Option<&[u8]>,
    ) -> Result<ExecOutput> {
        let real_path = self.real_path(path);
        let command_line = operation.command_line(&real_path, self.config.listing_format());

        self.runner
            .run(&command_line, input)
            .await
            .map_err(|err| translate(operation, real_path, err))
    }
}

fn translate(operation: Operation, path: RemotePath, err: remote_exec::Error) -> Error {
    match classify(operation, &err) {
        Some(ErrorKind::AlreadyExists) => {
            tracing::debug!(%operation, %path, "Remote path already exists");
            Error::AlreadyExists { path, source: err }
        }
        _ => Error::Exec(err),
    }
}
