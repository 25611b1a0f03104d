/// End-to-end tests running the helper binary against an isolated home
/// directory.

use std::fs;
use std::io::Write;
use std::path::Path;
use std::process::{Command, Output, Stdio};
use tempfile::TempDir;

fn helper(home: &Path) -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_git-credential-gcm"));
    cmd.current_dir(home)
        .env("HOME", home)
        .env("XDG_CONFIG_HOME", home.join(".config"))
        .env("GCM_AUTODETECT_TIMEOUT", "0")
        .env_remove("GCM_PROVIDER")
        .env_remove("GCM_AUTHORITY")
        .env_remove("GCM_TRACE")
        .env_remove("GIT_SSL_NO_VERIFY")
        .env_remove("GIT_SSL_CAINFO")
        .env_remove("RUST_LOG");
    cmd
}

fn run_with_stdin(cmd: &mut Command, stdin: &str) -> Output {
    let mut child = cmd
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .unwrap();
    child.stdin.take().unwrap().write_all(stdin.as_bytes()).unwrap();
    child.wait_with_output().unwrap()
}

#[test]
fn test_scopes_command() {
    let home = TempDir::new().unwrap();
    let output = helper(home.path())
        .args(["scopes", "https://foo.example.com:8443/org/repo/"])
        .output()
        .unwrap();

    assert!(output.status.success());
    assert_eq!(
        String::from_utf8(output.stdout).unwrap(),
        "https://foo.example.com:8443/org/repo\n\
         https://foo.example.com:8443/org\n\
         https://foo.example.com:8443\n\
         https://example.com\n"
    );
}

#[test]
fn test_config_get_reads_global_file() {
    let home = TempDir::new().unwrap();
    fs::write(
        home.path().join(".gitconfig"),
        "[credential \"https://example.com\"]\n\tprovider = gitlab\n",
    )
    .unwrap();

    let output = helper(home.path())
        .args(["config", "get", "credential", "provider", "--envar", "GCM_PROVIDER", "--url", "https://example.com/org/repo"])
        .output()
        .unwrap();
    assert!(output.status.success());
    assert_eq!(String::from_utf8(output.stdout).unwrap(), "gitlab\n");

    let output = helper(home.path())
        .args(["config", "get", "credential", "provider", "--envar", "GCM_PROVIDER", "--url", "https://example.com/org/repo"])
        .env("GCM_PROVIDER", "github")
        .output()
        .unwrap();
    assert_eq!(String::from_utf8(output.stdout).unwrap(), "github\n");

    let output = helper(home.path())
        .args(["config", "get", "credential", "missing"])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(1));
}

#[test]
fn test_resolve_command() {
    let home = TempDir::new().unwrap();
    let output = helper(home.path())
        .args(["resolve", "https://github.com/org/repo.git"])
        .output()
        .unwrap();

    assert!(output.status.success());
    assert_eq!(String::from_utf8(output.stdout).unwrap(), "github\n");
}

#[test]
fn test_get_command() {
    let home = TempDir::new().unwrap();
    let output = run_with_stdin(helper(home.path()).arg("get"), "protocol=https\nhost=dev.azure.com\npath=org/_git/repo\n\n");

    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.starts_with("protocol=https\nhost=dev.azure.com\n"));
    assert!(stdout.ends_with("provider=azure-repos\n"));
}

#[test]
fn test_no_provider_is_fatal() {
    let home = TempDir::new().unwrap();
    let output = run_with_stdin(helper(home.path()).arg("get"), "host=example.com\n\n");

    assert!(!output.status.success());
    let stderr = String::from_utf8(output.stderr).unwrap();
    assert!(stderr.contains("fatal: No host provider available to service this request."));
}

#[test]
fn test_trace_enables_debug_logging() {
    let home = TempDir::new().unwrap();
    let stdin = "protocol=https\nhost=github.com\n\n";

    let output = run_with_stdin(helper(home.path()).arg("get").env("GCM_TRACE", "1"), stdin);
    assert!(output.status.success());
    let stderr = String::from_utf8(output.stderr).unwrap();
    assert!(stderr.contains("Host provider 'github' selected for 'get'"), "{}", stderr);

    let output = run_with_stdin(helper(home.path()).arg("get").env("GCM_TRACE", "false"), stdin);
    assert!(output.status.success());
    assert!(String::from_utf8(output.stderr).unwrap().is_empty());
}

#[test]
fn test_missing_ca_bundle_is_fatal() {
    let home = TempDir::new().unwrap();
    let output = run_with_stdin(
        helper(home.path())
            .arg("get")
            .env("GIT_SSL_CAINFO", home.path().join("missing-ca.pem")),
        "protocol=https\nhost=github.com\n\n",
    );

    assert!(!output.status.success());
    let stderr = String::from_utf8(output.stderr).unwrap();
    assert!(stderr.contains("fatal: Failed to create HTTP client"), "{}", stderr);
    assert!(stderr.contains("missing-ca.pem"), "{}", stderr);
}
