pub mod cli;
pub mod config;
pub mod domain;
pub mod error;
pub mod hooks;
pub mod logging;
pub mod runner;
pub mod ui;
pub mod workflow;

pub use error::{Result, ToolError};
