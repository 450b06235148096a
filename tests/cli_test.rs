// tests/cli_test.rs
use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use repo_tools::runner::{CommandRunner, MockExecutor, TraceSettings, Tracer};
use repo_tools::ui::ScriptedPrompter;
use repo_tools::workflow;
use serial_test::serial;

/// Run a tool in `dir`, with the user config directory pointed at `dir` too.
fn tool(program: &str, dir: &Path) -> Command {
    let mut cmd = Command::new(program);
    cmd.current_dir(dir)
        .env("XDG_CONFIG_HOME", dir)
        .env_remove("PS4");
    cmd
}

fn tag_version(dir: &Path, args: &[&str]) -> Output {
    tool(env!("CARGO_BIN_EXE_tag-version"), dir)
        .args(args)
        .output()
        .expect("Failed to execute tag-version")
}

/// Restores the working directory when dropped.
struct CwdGuard(PathBuf);

impl CwdGuard {
    fn new() -> Self {
        CwdGuard(std::env::current_dir().unwrap())
    }
}

impl Drop for CwdGuard {
    fn drop(&mut self) {
        let _ = std::env::set_current_dir(&self.0);
    }
}

fn git(dir: &Path, args: &[&str]) -> Output {
    Command::new("git")
        .args(args)
        .current_dir(dir)
        .output()
        .expect("Failed to execute git")
}

fn git_available() -> bool {
    Command::new("git")
        .arg("--version")
        .output()
        .map(|out| out.status.success())
        .unwrap_or(false)
}

/// A git repository with one commit containing `VERSION`.
fn git_project(version: &str) -> tempfile::TempDir {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path();
    fs::write(path.join("VERSION"), version).unwrap();
    assert!(git(path, &["init", "-q"]).status.success());
    git(path, &["config", "user.email", "dev@example.com"]);
    git(path, &["config", "user.name", "Dev"]);
    git(path, &["config", "commit.gpgsign", "false"]);
    git(path, &["config", "tag.gpgsign", "false"]);
    git(path, &["add", "VERSION"]);
    assert!(git(path, &["commit", "-q", "-m", "Initial commit"]).status.success());
    dir
}

fn tags(dir: &Path) -> Vec<String> {
    let out = git(dir, &["tag", "--list"]);
    String::from_utf8(out.stdout)
        .unwrap()
        .lines()
        .map(str::to_string)
        .collect()
}

#[test]
fn test_tag_version_help() {
    let dir = tempfile::tempdir().unwrap();
    let output = tag_version(dir.path(), &["--help"]);

    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.contains("annotated tag"));
    assert!(stdout.contains("--rewrite-history"));
}

#[test]
fn test_tag_version_conflicting_flags() {
    let dir = tempfile::tempdir().unwrap();
    let output = tag_version(dir.path(), &["--suffix=-rc", "--no-suffix"]);

    assert!(!output.status.success());
    let stderr = String::from_utf8(output.stderr).unwrap();
    assert!(stderr.contains("cannot be used with"));
}

#[test]
fn test_tag_version_creates_annotated_tag() {
    if !git_available() {
        return;
    }
    let dir = git_project("1.2.3\n");

    let output = tag_version(dir.path(), &[]);

    assert!(output.status.success(), "{:?}", output);
    assert_eq!(tags(dir.path()), vec!["v1.2.3".to_string()]);
    let stderr = String::from_utf8(output.stderr).unwrap();
    assert!(stderr.contains("+ git tag -a -m v1.2.3 v1.2.3"));

    let kind = git(dir.path(), &["cat-file", "-t", "v1.2.3"]);
    assert_eq!(String::from_utf8(kind.stdout).unwrap().trim(), "tag");
}

#[test]
fn test_tag_version_dry_run_creates_nothing() {
    if !git_available() {
        return;
    }
    let dir = git_project("1.2.3\n");

    let output = tag_version(dir.path(), &["--dry-run", "--stable"]);

    assert!(output.status.success(), "{:?}", output);
    assert!(tags(dir.path()).is_empty());
    let stderr = String::from_utf8(output.stderr).unwrap();
    assert!(stderr.contains("[DRY-RUN] + git tag -a -m v1.2.3 v1.2.3"));
}

#[test]
fn test_tag_version_existing_tag_fails_without_rewrite() {
    if !git_available() {
        return;
    }
    let dir = git_project("1.2.3\n");
    assert!(tag_version(dir.path(), &[]).status.success());

    let output = tag_version(dir.path(), &[]);

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8(output.stderr).unwrap();
    assert!(stderr.contains("returned non-zero exit status"));
}

#[test]
fn test_tag_version_stable_commits_version_file() {
    if !git_available() {
        return;
    }
    let dir = git_project("2.0.0\n");
    fs::write(dir.path().join("STABLE_VERSION"), "1.0.0\n").unwrap();
    git(dir.path(), &["add", "STABLE_VERSION"]);
    git(dir.path(), &["commit", "-q", "-m", "Add stable version"]);

    let output = tag_version(dir.path(), &["--stable"]);

    assert!(output.status.success(), "{:?}", output);
    assert_eq!(
        fs::read_to_string(dir.path().join("STABLE_VERSION")).unwrap(),
        "2.0.0\n"
    );
    let mut found = tags(dir.path());
    found.sort();
    assert_eq!(found, vec!["stable".to_string(), "v2.0.0".to_string()]);

    let log = git(dir.path(), &["log", "-1", "--format=%s"]);
    assert_eq!(
        String::from_utf8(log.stdout).unwrap().trim(),
        "Update stable version to 2.0.0"
    );
}

#[test]
fn test_run_manual_hooks_without_arguments() {
    let dir = tempfile::tempdir().unwrap();
    let output = tool(env!("CARGO_BIN_EXE_run-manual-hooks"), dir.path())
        .output()
        .expect("Failed to execute run-manual-hooks");

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8(output.stderr).unwrap();
    assert!(stderr.contains("Please supply the name of at least one hook"));
}

#[test]
#[serial]
fn test_chdir_happens_before_resolving_files() {
    let dir = tempfile::tempdir().unwrap();
    let _guard = CwdGuard::new();
    let root = dir.path().canonicalize().unwrap();
    fs::write(root.join("VERSION"), "5.0\n").unwrap();
    fs::write(root.join("repo-tools.toml"), "[tag]\nprefix = \"r\"\n").unwrap();

    let mock = MockExecutor::new();
    mock.respond_output("git rev-parse", format!("{}\n", root.display()));
    let (tracer, log) = Tracer::capturing(TraceSettings::default());
    let runner = CommandRunner::new(mock, tracer);

    let argv = vec![
        "tag-version".to_string(),
        "-C".to_string(),
        root.display().to_string(),
    ];
    let status = workflow::main(argv, &runner, &ScriptedPrompter::default());
    let cwd = std::env::current_dir().unwrap();

    assert_eq!(status, 0);
    assert_eq!(cwd.canonicalize().unwrap(), root);
    assert_eq!(log.lines()[0], format!("+ cd {}", root.display()));
    // ./repo-tools.toml is read from the new directory
    assert!(runner.executor().ran("git tag -a -m r5.0 r5.0"));
}

#[cfg(unix)]
#[test]
fn test_tag_version_undecodable_chdir_is_reported() {
    use std::ffi::OsStr;
    use std::os::unix::ffi::OsStrExt;

    let dir = tempfile::tempdir().unwrap();
    let mut missing = dir.path().as_os_str().to_os_string();
    missing.push(OsStr::from_bytes(b"/caf\xe9"));

    let output = tool(env!("CARGO_BIN_EXE_tag-version"), dir.path())
        .arg("-C")
        .arg(&missing)
        .output()
        .expect("Failed to execute tag-version");

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("tag-version: error:"), "{stderr}");
    assert!(!stderr.contains("panicked"));
}
