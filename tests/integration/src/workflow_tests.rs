//! End-to-end workflows across the workspace
//!
//! Config file -> `RemoteFs` -> `SshRunner` -> fake ssh client -> local
//! `/bin/sh`, checking both the facade's answers and the resulting files.

#![cfg(unix)]

use std::fs;
use std::sync::Arc;

use pretty_assertions::assert_eq;
use remote_exec::{RemoteRunner, SshRunner};
use remote_fs::{ConnectionConfig, ErrorKind, ListingFormat, RemoteFs};
use remote_test_utils::FakeSsh;
use tempfile::TempDir;

/// Load a TOML config rooted at the fake's remote directory.
fn config_from_file(ssh: &FakeSsh, extra: &str) -> ConnectionConfig {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("remote.toml");
    fs::write(
        &path,
        format!(
            "user = \"deploy\"\nhost = \"example.org\"\nport = 2222\nroot_dir = \"{}\"\n{}",
            ssh.remote_root().display(),
            extra
        ),
    )
    .unwrap();

    ConnectionConfig::from_file(&path)
        .unwrap()
        .with_executable(ssh.executable())
}

#[tokio::test]
async fn test_full_workflow() {
    let ssh = FakeSsh::new();
    let fs = RemoteFs::new(config_from_file(&ssh, "")).unwrap();

    fs.mkdir("project").await.unwrap();
    fs.mkdir("project/src").await.unwrap();
    fs.write_file("project/README.md", b"# Project\n").await.unwrap();
    fs.write_file("project/src/main.rs", b"fn main() {}\n")
        .await
        .unwrap();

    fs.access("project/src/main.rs").await.unwrap();
    assert_eq!(
        fs.read_dir("project").await.unwrap(),
        vec!["README.md", "src"]
    );
    assert_eq!(ssh.read_file("project/README.md"), b"# Project\n");

    let err = fs.mkdir("project").await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::AlreadyExists);

    fs.rmrf("project").await.unwrap();
    assert_eq!(
        fs.access("project").await.unwrap_err().kind(),
        ErrorKind::Remote
    );
    ssh.assert_not_exists("project");

    // One ssh process per operation.
    assert_eq!(ssh.invocations(), 9);
    let argv = ssh.last_argv();
    assert_eq!(&argv[..5], &["-o", "StrictHostKeyChecking no", "-p", "2222", "deploy@example.org"]);
}

#[tokio::test]
async fn test_nul_listing_from_config_file() {
    let ssh = FakeSsh::new();
    let config = config_from_file(
        &ssh,
        "listing_format = \"nul-delimited\"\nhost_key_policy = \"accept-new\"\n",
    );
    assert_eq!(config.listing_format(), ListingFormat::NulDelimited);
    let fs = RemoteFs::new(config).unwrap();
    ssh.write_file("dir/plain", "");
    ssh.write_file("dir/ spaced ", "");
    ssh.write_file("dir/two\nlines", "");

    let mut entries = fs.read_dir("dir").await.unwrap();
    entries.sort();

    assert_eq!(entries, vec![" spaced ", "plain", "two\nlines"]);
    assert_eq!(ssh.last_argv()[1], "StrictHostKeyChecking accept-new");
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_shared_facade_across_tasks() {
    let ssh = FakeSsh::new();
    let fs = Arc::new(RemoteFs::new(config_from_file(&ssh, "")).unwrap());
    for name in ["a", "b", "c", "d"] {
        ssh.create_dir(name);
    }

    let tasks: Vec<_> = ["a", "b", "c", "d"]
        .into_iter()
        .map(|name| {
            let fs = Arc::clone(&fs);
            tokio::spawn(async move {
                fs.write_file(&format!("{name}/data"), name.as_bytes())
                    .await?;
                fs.read_dir(name).await
            })
        })
        .collect();

    for task in tasks {
        assert_eq!(task.await.unwrap().unwrap(), vec!["data"]);
    }
    for name in ["a", "b", "c", "d"] {
        assert_eq!(ssh.read_file(&format!("{name}/data")), name.as_bytes());
    }
}

#[tokio::test]
async fn test_runner_and_facade_agree_on_target() {
    let ssh = FakeSsh::new();
    let config = config_from_file(&ssh, "");
    let runner = SshRunner::new(config.target());

    let output = runner.run("printf hi", None).await.unwrap();
    assert_eq!(output.stdout, b"hi");

    let fs = RemoteFs::with_runner(config, runner).unwrap();
    fs.write_file("via-runner", b"ok").await.unwrap();
    assert_eq!(ssh.read_file("via-runner"), b"ok");
}

#[tokio::test]
async fn test_errors_convert_to_io_errors() {
    let ssh = FakeSsh::new();
    let fs = RemoteFs::new(config_from_file(&ssh, "")).unwrap();
    ssh.create_dir("exists");

    let already: std::io::Error = fs.mkdir("exists").await.unwrap_err().into();
    assert_eq!(already.kind(), std::io::ErrorKind::AlreadyExists);

    let missing: std::io::Error = fs.read_dir("missing").await.unwrap_err().into();
    assert_eq!(missing.kind(), std::io::ErrorKind::Other);
}
