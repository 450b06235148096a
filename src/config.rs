use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{Result, ToolError};

/// File name looked up in the working directory and the user config directory.
pub const CONFIG_FILE_NAME: &str = "repo-tools.toml";

/// Represents the complete configuration for repo-tools.
///
/// Every value here is only a default; command-line flags take precedence.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Default)]
pub struct Config {
    #[serde(default)]
    pub tag: TagConfig,

    #[serde(default)]
    pub hooks: HooksConfig,
}

fn default_prefix() -> String {
    "v".to_string()
}

fn default_version_file() -> String {
    "VERSION".to_string()
}

fn default_stable_version_file() -> String {
    "STABLE_VERSION".to_string()
}

fn default_stable_tag() -> String {
    "stable".to_string()
}

fn default_remote() -> String {
    "origin".to_string()
}

/// Defaults for the version tagging workflow.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct TagConfig {
    #[serde(default = "default_prefix")]
    pub prefix: String,

    #[serde(default)]
    pub suffix: String,

    /// Relative to the project root
    #[serde(default = "default_version_file")]
    pub version_file: String,

    /// Relative to the project root
    #[serde(default = "default_stable_version_file")]
    pub stable_version_file: String,

    #[serde(default = "default_stable_tag")]
    pub stable_tag: String,

    #[serde(default = "default_remote")]
    pub remote: String,
}

impl Default for TagConfig {
    fn default() -> Self {
        TagConfig {
            prefix: default_prefix(),
            suffix: String::new(),
            version_file: default_version_file(),
            stable_version_file: default_stable_version_file(),
            stable_tag: default_stable_tag(),
            remote: default_remote(),
        }
    }
}

fn default_hook_program() -> String {
    "pre-commit".to_string()
}

fn default_hook_config_file() -> String {
    ".pre-commit-config.yaml".to_string()
}

/// Settings for the pre-commit helper tools.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct HooksConfig {
    #[serde(default = "default_hook_program")]
    pub program: String,

    #[serde(default = "default_hook_config_file")]
    pub config_file: String,
}

impl Default for HooksConfig {
    fn default() -> Self {
        HooksConfig {
            program: default_hook_program(),
            config_file: default_hook_config_file(),
        }
    }
}

/// Loads configuration from file or returns defaults.
///
/// Attempts to load configuration in the following order:
/// 1. Custom path provided as parameter
/// 2. `repo-tools.toml` in current directory
/// 3. `repo-tools.toml` in user config directory
/// 4. Default configuration if no file found
///
/// # Returns
/// * `Ok(Config)` - Loaded or default configuration
/// * `Err` - If file exists but cannot be read or parsed
pub fn load_config(config_path: Option<&Path>) -> Result<Config> {
    match locate_config(config_path) {
        Some(path) => load_config_file(&path),
        None => {
            tracing::debug!("no {} found, using defaults", CONFIG_FILE_NAME);
            Ok(Config::default())
        }
    }
}

/// The file [`load_config`] would read, if any.
pub fn locate_config(config_path: Option<&Path>) -> Option<PathBuf> {
    if let Some(path) = config_path {
        return Some(path.to_path_buf());
    }

    let local = Path::new(".").join(CONFIG_FILE_NAME);
    if local.exists() {
        return Some(local);
    }

    dirs::config_dir()
        .map(|dir| dir.join(CONFIG_FILE_NAME))
        .filter(|path| path.exists())
}

fn load_config_file(path: &Path) -> Result<Config> {
    tracing::debug!(path = %path.display(), "loading configuration");
    let config_str = fs::read_to_string(path)
        .map_err(|e| ToolError::config(format!("{}: {}", path.display(), e)))?;
    toml::from_str(&config_str).map_err(|e| ToolError::config(format!("{}: {}", path.display(), e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.tag.prefix, "v");
        assert_eq!(config.tag.suffix, "");
        assert_eq!(config.tag.version_file, "VERSION");
        assert_eq!(config.tag.stable_version_file, "STABLE_VERSION");
        assert_eq!(config.tag.stable_tag, "stable");
        assert_eq!(config.tag.remote, "origin");
        assert_eq!(config.hooks.program, "pre-commit");
        assert_eq!(config.hooks.config_file, ".pre-commit-config.yaml");
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let mut temp_file = NamedTempFile::new().unwrap();
        write!(
            temp_file,
            r#"
[tag]
prefix = "release-"
remote = "upstream"
"#
        )
        .unwrap();

        let config = load_config(Some(temp_file.path())).unwrap();
        assert_eq!(config.tag.prefix, "release-");
        assert_eq!(config.tag.remote, "upstream");
        assert_eq!(config.tag.stable_tag, "stable");
        assert_eq!(config.hooks, HooksConfig::default());
    }

    #[test]
    fn test_malformed_file_is_config_error() {
        let mut temp_file = NamedTempFile::new().unwrap();
        write!(temp_file, "[tag\nprefix = ").unwrap();

        let err = load_config(Some(temp_file.path())).unwrap_err();
        assert!(matches!(err, ToolError::Config(_)));
    }

    #[test]
    fn test_missing_explicit_file_is_config_error() {
        let err = load_config(Some(Path::new("/nonexistent/repo-tools.toml"))).unwrap_err();
        assert!(err.to_string().contains("/nonexistent/repo-tools.toml"));
    }
}
