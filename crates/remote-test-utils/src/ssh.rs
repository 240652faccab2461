//! [`FakeSsh`] stand-in for the ssh client binary.
//!
//! The fake accepts the same argument vector as the real client, records it,
//! skips everything up to `--`, and runs the remaining command line with
//! `/bin/sh -c` inside a temporary directory that plays the remote host.

use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// A temporary fake ssh executable plus the directory it treats as the
/// remote filesystem.
///
/// # Example
///
/// ```rust,no_run
/// use remote_test_utils::FakeSsh;
///
/// let ssh = FakeSsh::new();
/// ssh.create_dir("data");
/// // point the runner's executable at `ssh.executable()` and its root at
/// // `ssh.remote_root()`
/// ssh.assert_exists("data");
/// ```
pub struct FakeSsh {
    temp_dir: TempDir,
    executable: PathBuf,
    remote_root: PathBuf,
}

impl Default for FakeSsh {
    fn default() -> Self {
        Self::new()
    }
}

impl FakeSsh {
    /// A fake client that runs every command line locally.
    pub fn new() -> Self {
        Self::scripted("cd \"$REMOTE_ROOT\" || exit 255\nexec /bin/sh -c \"$1\"")
    }

    /// A fake client that fails before running anything, the way the real
    /// client does when it cannot connect or authenticate.
    pub fn unreachable(code: i32, stderr: &str) -> Self {
        Self::scripted(&format!(
            "printf '%s\\n' '{}' >&2\nexit {}",
            stderr.replace('\'', "'\\''"),
            code
        ))
    }

    /// A fake client whose behaviour after argument parsing is `body`.
    ///
    /// When `body` runs, `$1` holds the remote command line and
    /// `$REMOTE_ROOT` the remote root directory.
    pub fn scripted(body: &str) -> Self {
        let temp_dir = TempDir::new().unwrap();
        let remote_root = temp_dir.path().join("remote");
        fs::create_dir(&remote_root).unwrap();

        let executable = temp_dir.path().join("ssh");
        let argv_log = temp_dir.path().join("argv.log");
        let calls_log = temp_dir.path().join("calls.log");

        let script = format!(
            "#!/bin/sh\n\
             printf '%s\\0' \"$@\" > '{argv}'\n\
             echo call >> '{calls}'\n\
             REMOTE_ROOT='{root}'\n\
             while [ \"$#\" -gt 1 ]; do\n\
             \x20 if [ \"$1\" = \"--\" ]; then shift; break; fi\n\
             \x20 shift\n\
             done\n\
             {body}\n",
            argv = argv_log.display(),
            calls = calls_log.display(),
            root = remote_root.display(),
            body = body,
        );
        fs::write(&executable, script).unwrap();
        make_executable(&executable);

        Self {
            temp_dir,
            executable,
            remote_root,
        }
    }

    /// Path to the fake client binary.
    pub fn executable(&self) -> &Path {
        &self.executable
    }

    /// Directory acting as the remote host's filesystem.
    pub fn remote_root(&self) -> &Path {
        &self.remote_root
    }

    /// Arguments the fake received on its most recent invocation.
    ///
    /// # Panics
    /// Panics if the fake has not been invoked yet.
    pub fn last_argv(&self) -> Vec<String> {
        let raw = fs::read(self.temp_dir.path().join("argv.log"))
            .unwrap_or_else(|e| panic!("FakeSsh::last_argv: fake was never invoked: {e}"));
        raw.split(|b| *b == 0)
            .filter(|arg| !arg.is_empty())
            .map(|arg| String::from_utf8_lossy(arg).into_owned())
            .collect()
    }

    /// Number of times the fake has been invoked.
    pub fn invocations(&self) -> usize {
        fs::read_to_string(self.temp_dir.path().join("calls.log"))
            .map(|log| log.lines().count())
            .unwrap_or(0)
    }

    /// Create a directory (and parents) under the remote root.
    pub fn create_dir(&self, path: &str) {
        fs::create_dir_all(self.remote_root.join(path))
            .unwrap_or_else(|e| panic!("FakeSsh::create_dir: {path}: {e}"));
    }

    /// Write a file under the remote root, creating parents.
    pub fn write_file(&self, path: &str, content: impl AsRef<[u8]>) {
        let full_path = self.remote_root.join(path);
        if let Some(parent) = full_path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(&full_path, content)
            .unwrap_or_else(|e| panic!("FakeSsh::write_file: {path}: {e}"));
    }

    /// Read a file under the remote root.
    ///
    /// # Panics
    /// Panics if the file cannot be read.
    pub fn read_file(&self, path: &str) -> Vec<u8> {
        let full_path = self.remote_root.join(path);
        fs::read(&full_path)
            .unwrap_or_else(|_| panic!("Could not read remote file: {}", full_path.display()))
    }

    /// Assert that `path` (relative to the remote root) exists.
    pub fn assert_exists(&self, path: &str) {
        let full_path = self.remote_root.join(path);
        assert!(
            full_path.exists(),
            "Expected remote path to exist: {}",
            full_path.display()
        );
    }

    /// Assert that `path` (relative to the remote root) does **not** exist.
    pub fn assert_not_exists(&self, path: &str) {
        let full_path = self.remote_root.join(path);
        assert!(
            !full_path.exists(),
            "Expected remote path NOT to exist: {}",
            full_path.display()
        );
    }
}

#[cfg(unix)]
fn make_executable(path: &Path) {
    use std::os::unix::fs::PermissionsExt;
    fs::set_permissions(path, fs::Permissions::from_mode(0o755)).unwrap();
}

#[cfg(not(unix))]
fn make_executable(_path: &Path) {}
