use crate::error::{Result, ToolError};
use std::fmt;
use std::fs;
use std::path::Path;

/// The bare project version, as read from a version file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectVersion(String);

impl ProjectVersion {
    /// Extract the version from file contents: the first non-blank line,
    /// without surrounding whitespace. Everything after it is ignored.
    pub fn parse(contents: &str) -> Option<Self> {
        contents
            .trim_start()
            .lines()
            .next()
            .map(str::trim_end)
            .filter(|line| !line.is_empty())
            .map(|line| ProjectVersion(line.to_string()))
    }

    /// Read the version from `path`
    ///
    /// # Returns
    /// * `Ok(ProjectVersion)` - the first non-blank line of the file
    /// * `Err(ToolError::BlankVersionFile)` - the file has no non-blank line
    /// * `Err(ToolError::Io)` - the file cannot be read
    pub fn read(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        Self::parse(&contents).ok_or_else(|| ToolError::BlankVersionFile {
            path: path.to_path_buf(),
        })
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ProjectVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for ProjectVersion {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
