//! Remote command lines for each filesystem operation
//!
//! Paths are escaped for a POSIX remote shell before interpolation, so
//! quotes, `$`, backticks and newlines in a path never reach the shell as
//! syntax.

use std::borrow::Cow;

use crate::listing::ListingFormat;
use crate::path::RemotePath;

/// The filesystem primitive a command line implements.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    Access,
    Mkdir,
    Rmrf,
    WriteFile,
    ReadDir,
}

impl Operation {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Access => "access",
            Self::Mkdir => "mkdir",
            Self::Rmrf => "rmrf",
            Self::WriteFile => "write_file",
            Self::ReadDir => "read_dir",
        }
    }

    /// Build the remote command line for this operation on `path`.
    pub fn command_line(&self, path: &RemotePath, listing: ListingFormat) -> String {
        let quoted = quote(path.as_str());
        match self {
            Self::Access => format!("stat {}", quoted),
            Self::Mkdir => format!("mkdir {}", quoted),
            Self::Rmrf => format!("rm -rf {}", quoted),
            Self::WriteFile => format!("cat > {}", quoted),
            Self::ReadDir => listing.command(&quoted),
        }
    }
}

impl std::fmt::Display for Operation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Escape `value` as a single word for a POSIX shell.
pub fn quote(value: &str) -> Cow<'_, str> {
    shell_escape::unix::escape(Cow::Borrowed(value))
}
