//! Subprocess execution of remote command lines
//!
//! Each call spawns one ssh client process, feeds it optional input, and
//! drains stdout and stderr concurrently so neither pipe can fill up and
//! stall the child.

use std::process::Stdio;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWriteExt};
use tokio::process::{ChildStdin, Command};

use crate::error::{Error, Result};
use crate::output::ExecOutput;
use crate::target::SshTarget;

/// Runs a shell command line on some remote host.
#[async_trait]
pub trait RemoteRunner: Send + Sync {
    /// Run `command_line` once, writing `input` to its stdin when given.
    ///
    /// Resolves with the captured output on exit code zero and fails with
    /// [`Error::ExitFailure`] otherwise.
    async fn run(&self, command_line: &str, input: Option<&[u8]>) -> Result<ExecOutput>;
}

#[async_trait]
impl<R: RemoteRunner + ?Sized> RemoteRunner for Arc<R> {
    async fn run(&self, command_line: &str, input: Option<&[u8]>) -> Result<ExecOutput> {
        (**self).run(command_line, input).await
    }
}

/// [`RemoteRunner`] backed by an external ssh client binary.
#[derive(Debug, Clone)]
pub struct SshRunner {
    target: SshTarget,
}

impl SshRunner {
    pub fn new(target: SshTarget) -> Self {
        Self { target }
    }

    pub fn target(&self) -> &SshTarget {
        &self.target
    }
}

#[async_trait]
impl RemoteRunner for SshRunner {
    async fn run(&self, command_line: &str, input: Option<&[u8]>) -> Result<ExecOutput> {
        let program = self.target.executable();

        let mut cmd = Command::new(program);
        cmd.args(self.target.args(command_line))
            .stdin(if input.is_some() {
                Stdio::piped()
            } else {
                Stdio::null()
            })
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());

        tracing::debug!(
            program = %program.display(),
            destination = %self.target.destination(),
            command = %command_line,
            stdin_len = input.map(<[u8]>::len),
            "Spawning remote command"
        );

        let mut child = cmd.spawn().map_err(|source| Error::Spawn {
            program: program.to_path_buf(),
            source,
        })?;

        let stdin = child.stdin.take();
        let stdout = child.stdout.take();
        let stderr = child.stderr.take();

        let ((), stdout, stderr) = tokio::try_join!(
            feed(stdin, input),
            drain(stdout, "stdout"),
            drain(stderr, "stderr"),
        )?;

        let status = child.wait().await.map_err(|e| Error::io("wait", e))?;
        let output = ExecOutput::new(status, stdout, stderr);

        tracing::debug!(
            command = %command_line,
            code = ?output.code,
            signal = ?output.signal,
            stdout_len = output.stdout.len(),
            stderr_len = output.stderr.len(),
            "Remote command finished"
        );

        if output.success() {
            Ok(output)
        } else {
            Err(Error::ExitFailure(output))
        }
    }
}

/// Write all of `input` to the child's stdin, then close it.
///
/// A remote command may exit without consuming its input; the resulting
/// broken pipe is left for the exit status to report.
async fn feed(stdin: Option<ChildStdin>, input: Option<&[u8]>) -> Result<()> {
    let (Some(mut stdin), Some(input)) = (stdin, input) else {
        return Ok(());
    };

    match stdin.write_all(input).await {
        Ok(()) => {}
        Err(e) if e.kind() == std::io::ErrorKind::BrokenPipe => {
            tracing::trace!("Remote command closed stdin before reading all input");
            return Ok(());
        }
        Err(e) => return Err(Error::io("stdin", e)),
    }

    // Dropping the handle closes the pipe and signals end of input.
    drop(stdin);
    Ok(())
}

async fn drain<R>(stream: Option<R>, name: &'static str) -> Result<Vec<u8>>
where
    R: AsyncRead + Unpin,
{
    let mut buf = Vec::new();
    if let Some(mut stream) = stream {
        stream
            .read_to_end(&mut buf)
            .await
            .map_err(|e| Error::io(name, e))?;
    }
    Ok(buf)
}
