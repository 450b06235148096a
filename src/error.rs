use std::path::PathBuf;

use thiserror::Error;

/// Unified error type for repo-tools operations
#[derive(Error, Debug)]
pub enum ToolError {
    #[error("Failed to start '{program}': {source}")]
    SpawnFailed {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Command '{}' returned non-zero exit status {}.", join_tokens(.tokens), display_code(.exit_code))]
    CommandFailed {
        tokens: Vec<String>,
        /// `None` when the child was terminated by a signal
        exit_code: Option<i32>,
    },

    #[error("{}: version file appears to be blank", .path.display())]
    BlankVersionFile { path: PathBuf },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Prompt error: {0}")]
    Prompt(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

fn join_tokens(tokens: &[String]) -> String {
    tokens.join(" ")
}

fn display_code(code: &Option<i32>) -> String {
    code.map_or_else(|| "unknown (terminated by signal)".to_string(), |c| c.to_string())
}

/// Convenience type alias for Results in repo-tools
pub type Result<T> = std::result::Result<T, ToolError>;

impl ToolError {
    /// Create a configuration error with context
    pub fn config(msg: impl Into<String>) -> Self {
        ToolError::Config(msg.into())
    }

    /// Create a prompt error with context
    pub fn prompt(msg: impl Into<String>) -> Self {
        ToolError::Prompt(msg.into())
    }

    /// Create a command failure from the tokens that were run
    pub fn command_failed(tokens: &[String], exit_code: Option<i32>) -> Self {
        ToolError::CommandFailed {
            tokens: tokens.to_vec(),
            exit_code,
        }
    }

    /// Exit status of the failed child, if this error carries one
    pub fn exit_code(&self) -> Option<i32> {
        match self {
            ToolError::CommandFailed { exit_code, .. } => *exit_code,
            _ => None,
        }
    }
}
