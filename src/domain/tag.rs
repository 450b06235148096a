use std::fmt;
use std::path::Path;

use crate::domain::version::ProjectVersion;

/// Version-control program driven by the tagging workflow.
pub const GIT: &str = "git";

/// A composed version tag: `prefix + version + suffix`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagName(String);

impl TagName {
    pub fn compose(prefix: &str, version: &ProjectVersion, suffix: &str) -> Self {
        TagName(format!("{}{}{}", prefix, version, suffix))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Fully-qualified, force-update refspec for pushing this tag
    pub fn force_refspec(&self) -> String {
        tag_refspec(&self.0)
    }

    /// Whether `git tag --list` output names exactly this tag
    pub fn listed_in(&self, tag_list: &str) -> bool {
        tag_list.split('\n').any(|line| line == self.0)
    }
}

impl fmt::Display for TagName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for TagName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// `+refs/tags/<tag>`
pub fn tag_refspec(tag: &str) -> String {
    format!("+refs/tags/{}", tag)
}

fn git<const N: usize>(args: [&str; N]) -> Vec<String> {
    std::iter::once(GIT)
        .chain(args)
        .map(str::to_string)
        .collect()
}

fn path_arg(path: &Path) -> String {
    path.to_string_lossy().into_owned()
}

/// `git rev-parse --show-toplevel`
pub fn show_toplevel() -> Vec<String> {
    git(["rev-parse", "--show-toplevel"])
}

/// `git tag --list <tag>`
pub fn list_tag(tag: &TagName) -> Vec<String> {
    git(["tag", "--list", tag.as_str()])
}

/// `git tag -a -m <message> [--force] <tag> [<commit>]`
pub fn annotated_tag(message: &str, tag: &TagName, force: bool, commit: Option<&str>) -> Vec<String> {
    let mut tokens = git(["tag", "-a", "-m", message]);
    if force {
        tokens.push("--force".to_string());
    }
    tokens.push(tag.to_string());
    tokens.extend(commit.map(str::to_string));
    tokens
}

/// `git tag --force <stable-tag> [<commit>]`
pub fn move_tag(tag: &str, commit: Option<&str>) -> Vec<String> {
    let mut tokens = git(["tag", "--force", tag]);
    tokens.extend(commit.map(str::to_string));
    tokens
}

/// `git diff -s --exit-code <file>`: status 0 when unchanged
pub fn diff_quiet(file: &Path) -> Vec<String> {
    git(["diff", "-s", "--exit-code", &path_arg(file)])
}

/// `git commit -m <message> <file>`
pub fn commit_file(message: &str, file: &Path) -> Vec<String> {
    git(["commit", "-m", message, &path_arg(file)])
}

/// `git push`
pub fn push() -> Vec<String> {
    git(["push"])
}

/// `git push [--force] <remote> <refspec>`
pub fn push_ref(remote: &str, refspec: &str, force: bool) -> Vec<String> {
    let mut tokens = push();
    if force {
        tokens.push("--force".to_string());
    }
    tokens.extend([remote.to_string(), refspec.to_string()]);
    tokens
}
