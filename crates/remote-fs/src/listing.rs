//! Directory listing commands and output parsing

use serde::{Deserialize, Serialize};

/// How `read_dir` asks the remote host for entries and splits the answer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ListingFormat {
    /// Plain `ls`, one entry per line.
    ///
    /// Entries are trimmed, so names containing newlines or leading/trailing
    /// whitespace cannot be represented.
    #[default]
    Lines,
    /// A POSIX shell glob loop printing each entry followed by NUL.
    ///
    /// Names come back byte-exact, in the same order and with the same
    /// dot-file exclusion as `ls`.
    ///
    /// Two differences from `ls`: the command starts with `cd`, so a relative
    /// path is looked up through the remote `CDPATH`, and a regular file is
    /// an error rather than listing its own name.
    NulDelimited,
}

impl ListingFormat {
    /// Remote command line listing the directory at `quoted_path`.
    ///
    /// `quoted_path` must already be shell-escaped.
    pub fn command(&self, quoted_path: &str) -> String {
        match self {
            Self::Lines => format!("ls {}", quoted_path),
            Self::NulDelimited => format!(
                "cd -- {} && for f in *; do \
                 if [ -e \"$f\" ] || [ -L \"$f\" ]; then printf '%s\\0' \"$f\"; fi; \
                 done",
                quoted_path
            ),
        }
    }

    /// Split captured stdout into entry names, dropping empty pieces.
    pub fn parse(&self, stdout: &[u8]) -> Vec<String> {
        match self {
            Self::Lines => String::from_utf8_lossy(stdout)
                .split('\n')
                .map(str::trim)
                .filter(|entry| !entry.is_empty())
                .map(str::to_string)
                .collect(),
            Self::NulDelimited => stdout
                .split(|b| *b == 0)
                .filter(|entry| !entry.is_empty())
                .map(|entry| String::from_utf8_lossy(entry).into_owned())
                .collect(),
        }
    }
}
