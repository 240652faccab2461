//! CLI argument parsing using clap derive

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use remote_fs::HostKeyPolicy;

/// rfs - Filesystem commands on a remote host over ssh
#[derive(Parser, Debug)]
#[command(name = "rfs")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Connection config file (TOML, JSON or YAML)
    ///
    /// Defaults to `rfs/config.toml` in the user config directory when present.
    #[arg(short, long, global = true, env = "RFS_CONFIG")]
    pub config: Option<PathBuf>,

    #[command(flatten)]
    pub overrides: Overrides,

    /// The command to run
    #[command(subcommand)]
    pub command: Commands,
}

/// Connection settings that take precedence over the config file
#[derive(Args, Debug, Clone, Default, PartialEq, Eq)]
pub struct Overrides {
    /// Remote user name
    #[arg(long, global = true)]
    pub user: Option<String>,

    /// Remote host name or address
    #[arg(long, global = true)]
    pub host: Option<String>,

    /// Remote ssh port
    #[arg(short, long, global = true)]
    pub port: Option<u16>,

    /// Remote directory that virtual paths are resolved against
    #[arg(long, global = true)]
    pub root: Option<String>,

    /// Host key checking: disabled, accept-new or strict
    #[arg(long, global = true)]
    pub host_key_policy: Option<HostKeyPolicy>,

    /// List directories with NUL-delimited output (names may contain newlines)
    #[arg(long, global = true)]
    pub nul: bool,
}

/// Available commands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Check that a path exists
    Access {
        /// Path relative to the remote root
        path: String,
    },

    /// Create a directory
    ///
    /// Fails if the directory already exists. Parents are not created.
    Mkdir {
        /// Path relative to the remote root
        path: String,
    },

    /// Remove a file or directory tree (missing paths are ignored)
    Rmrf {
        /// Path relative to the remote root
        path: String,
    },

    /// Write a file from a local file or standard input
    ///
    /// Examples:
    ///   rfs write notes.txt --from ./notes.txt
    ///   echo hello | rfs write greeting.txt
    Write {
        /// Path relative to the remote root
        path: String,

        /// Local file to upload (reads stdin when omitted)
        #[arg(long)]
        from: Option<PathBuf>,
    },

    /// List directory entries, one per line
    Ls {
        /// Path relative to the remote root
        #[arg(default_value = "")]
        path: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn verify_cli() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parse_requires_command() {
        assert!(Cli::try_parse_from(["rfs"]).is_err());
    }

    #[test]
    fn parse_mkdir() {
        let cli = Cli::parse_from(["rfs", "mkdir", "a/b"]);
        assert_eq!(cli.command, Commands::Mkdir { path: "a/b".into() });
        assert!(!cli.verbose);
        assert_eq!(cli.overrides, Overrides::default());
    }

    #[test]
    fn parse_write_with_from() {
        let cli = Cli::parse_from(["rfs", "write", "remote.txt", "--from", "local.txt"]);
        assert_eq!(
            cli.command,
            Commands::Write {
                path: "remote.txt".into(),
                from: Some(PathBuf::from("local.txt")),
            }
        );
    }

    #[test]
    fn parse_ls_defaults_to_root() {
        let cli = Cli::parse_from(["rfs", "ls"]);
        assert_eq!(cli.command, Commands::Ls { path: String::new() });
    }

    #[test]
    fn parse_overrides_after_subcommand() {
        let cli = Cli::parse_from([
            "rfs",
            "ls",
            "dir",
            "--user",
            "deploy",
            "--host",
            "example.org",
            "-p",
            "2222",
            "--root",
            "/srv",
            "--host-key-policy",
            "accept-new",
            "--nul",
            "-v",
        ]);
        assert!(cli.verbose);
        assert_eq!(
            cli.overrides,
            Overrides {
                user: Some("deploy".into()),
                host: Some("example.org".into()),
                port: Some(2222),
                root: Some("/srv".into()),
                host_key_policy: Some(HostKeyPolicy::AcceptNew),
                nul: true,
            }
        );
    }

    #[test]
    fn parse_rejects_unknown_host_key_policy() {
        let err = Cli::try_parse_from(["rfs", "ls", "--host-key-policy", "sometimes"]).unwrap_err();
        assert!(err.to_string().contains("unknown host key policy"));
    }

    #[test]
    fn parse_rejects_out_of_range_port() {
        assert!(Cli::try_parse_from(["rfs", "ls", "--port", "70000"]).is_err());
    }
}
