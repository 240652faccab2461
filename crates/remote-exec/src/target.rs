//! Where and how to reach the remote host

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Default ssh port.
pub const DEFAULT_PORT: u16 = 22;

/// Default ssh client binary.
pub const DEFAULT_EXECUTABLE: &str = "/usr/bin/ssh";

/// How the ssh client treats unknown or changed host keys.
///
/// Maps to the client's `StrictHostKeyChecking` option.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum HostKeyPolicy {
    /// Accept any host key without checking (`no`).
    ///
    /// Offers no protection against an on-path attacker.
    #[default]
    Disabled,
    /// Record unknown keys on first contact, reject changed ones (`accept-new`).
    AcceptNew,
    /// Only connect to hosts already present in known_hosts (`yes`).
    Strict,
}

impl HostKeyPolicy {
    /// Value passed to `StrictHostKeyChecking`.
    pub fn as_ssh_value(&self) -> &'static str {
        match self {
            Self::Disabled => "no",
            Self::AcceptNew => "accept-new",
            Self::Strict => "yes",
        }
    }
}

impl std::str::FromStr for HostKeyPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "disabled" | "no" => Ok(Self::Disabled),
            "accept-new" => Ok(Self::AcceptNew),
            "strict" | "yes" => Ok(Self::Strict),
            other => Err(format!(
                "unknown host key policy '{}'. Valid: disabled, accept-new, strict",
                other
            )),
        }
    }
}

/// Connection parameters for the ssh client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SshTarget {
    user: String,
    host: String,
    port: u16,
    executable: PathBuf,
    host_key_policy: HostKeyPolicy,
}

impl SshTarget {
    /// Target `user@host` on the default port with the default client binary.
    pub fn new(user: impl Into<String>, host: impl Into<String>) -> Self {
        Self {
            user: user.into(),
            host: host.into(),
            port: DEFAULT_PORT,
            executable: PathBuf::from(DEFAULT_EXECUTABLE),
            host_key_policy: HostKeyPolicy::default(),
        }
    }

    pub fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    pub fn with_executable(mut self, executable: impl Into<PathBuf>) -> Self {
        self.executable = executable.into();
        self
    }

    pub fn with_host_key_policy(mut self, policy: HostKeyPolicy) -> Self {
        self.host_key_policy = policy;
        self
    }

    pub fn user(&self) -> &str {
        &self.user
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    pub fn executable(&self) -> &Path {
        &self.executable
    }

    pub fn host_key_policy(&self) -> HostKeyPolicy {
        self.host_key_policy
    }

    /// `user@host` as handed to the client.
    pub fn destination(&self) -> String {
        format!("{}@{}", self.user, self.host)
    }

    /// Full argument vector for running `command_line` remotely.
    ///
    /// The command line travels as a single argument after `--`, so the
    /// client never mistakes it for one of its own options.
    pub fn args(&self, command_line: &str) -> Vec<OsString> {
        vec![
            "-o".into(),
            format!("StrictHostKeyChecking {}", self.host_key_policy.as_ssh_value()).into(),
            "-p".into(),
            self.port.to_string().into(),
            self.destination().into(),
            "--".into(),
            command_line.into(),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[test]
    fn test_defaults() {
        let target = SshTarget::new("deploy", "example.org");
        assert_eq!(target.port(), 22);
        assert_eq!(target.executable(), Path::new("/usr/bin/ssh"));
        assert_eq!(target.host_key_policy(), HostKeyPolicy::Disabled);
        assert_eq!(target.destination(), "deploy@example.org");
    }

    #[test]
    fn test_args_order() {
        let target = SshTarget::new("u", "h").with_port(2222);
        let args: Vec<String> = target
            .args("stat '/srv/a b'")
            .into_iter()
            .map(|a| a.into_string().unwrap())
            .collect();
        assert_eq!(
            args,
            vec![
                "-o",
                "StrictHostKeyChecking no",
                "-p",
                "2222",
                "u@h",
                "--",
                "stat '/srv/a b'",
            ]
        );
    }

    #[rstest]
    #[case(HostKeyPolicy::Disabled, "StrictHostKeyChecking no")]
    #[case(HostKeyPolicy::AcceptNew, "StrictHostKeyChecking accept-new")]
    #[case(HostKeyPolicy::Strict, "StrictHostKeyChecking yes")]
    fn test_policy_option(#[case] policy: HostKeyPolicy, #[case] expected: &str) {
        let target = SshTarget::new("u", "h").with_host_key_policy(policy);
        assert_eq!(target.args("true")[1], OsString::from(expected));
    }

    #[rstest]
    #[case("disabled", HostKeyPolicy::Disabled)]
    #[case("no", HostKeyPolicy::Disabled)]
    #[case("accept-new", HostKeyPolicy::AcceptNew)]
    #[case("strict", HostKeyPolicy::Strict)]
    #[case("yes", HostKeyPolicy::Strict)]
    fn test_policy_from_str(#[case] input: &str, #[case] expected: HostKeyPolicy) {
        assert_eq!(input.parse::<HostKeyPolicy>().unwrap(), expected);
    }

    #[test]
    fn test_policy_from_str_rejects_unknown() {
        let err = "maybe".parse::<HostKeyPolicy>().unwrap_err();
        assert!(err.contains("maybe"));
    }

    #[test]
    fn test_policy_serde_names() {
        let json = serde_json::to_string(&HostKeyPolicy::AcceptNew).unwrap();
        assert_eq!(json, "\"accept-new\"");

        let policy: HostKeyPolicy = serde_json::from_str("\"strict\"").unwrap();
        assert_eq!(policy, HostKeyPolicy::Strict);
    }
}
