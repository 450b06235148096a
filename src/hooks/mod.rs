//! Helpers around the `pre-commit` hook manager
//!
//! Each tool is a fixed command template handed to the hook manager:
//! - install: `pre-commit install -f --install-hooks -t pre-commit`
//! - run manual: `pre-commit run --hook-stage manual [--all-files] <hook>...`
//! - seed config: `pre-commit sample-config`
//! - update: `pre-commit autoupdate ...`

pub mod lifecycle;

pub use lifecycle::{filter_run_args, CONFIG_FOUND_MESSAGE, MISSING_HOOK_MESSAGE};

use crate::config::HooksConfig;
use crate::runner::{CommandRunner, Executor};

/// Status returned when a child ended without an exit code.
pub const SIGNALLED_STATUS: i32 = 1;

/// Drives the hook manager through a [`CommandRunner`].
pub struct HookManager<'a, E> {
    runner: &'a CommandRunner<E>,
    config: HooksConfig,
}

impl<'a, E: Executor> HookManager<'a, E> {
    pub fn new(runner: &'a CommandRunner<E>, config: HooksConfig) -> Self {
        HookManager { runner, config }
    }

    fn command<I, S>(&self, args: I) -> Vec<String>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        std::iter::once(self.config.program.clone())
            .chain(args.into_iter().map(|arg| arg.as_ref().to_string()))
            .collect()
    }

    /// `pre-commit install -f --install-hooks -t pre-commit`
    pub fn install_command(&self) -> Vec<String> {
        self.command(["install", "-f", "--install-hooks", "-t", "pre-commit"])
    }

    /// `pre-commit run --hook-stage manual <args>`
    pub fn run_manual_command(&self, args: &[String]) -> Vec<String> {
        self.command(
            ["run", "--hook-stage", "manual"]
                .into_iter()
                .chain(args.iter().map(String::as_str)),
        )
    }

    /// `pre-commit sample-config`
    pub fn sample_config_command(&self) -> Vec<String> {
        self.command(["sample-config"])
    }

    /// `pre-commit autoupdate <args>`
    pub fn autoupdate_command(&self, args: &[String]) -> Vec<String> {
        self.command(["autoupdate"].into_iter().chain(args.iter().map(String::as_str)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::runner::{MockExecutor, TraceSettings, Tracer};

    #[test]
    fn test_command_templates() {
        let runner = CommandRunner::new(MockExecutor::new(), Tracer::new(TraceSettings::default()));
        let manager = HookManager::new(&runner, HooksConfig::default());

        assert_eq!(
            manager.install_command(),
            vec!["pre-commit", "install", "-f", "--install-hooks", "-t", "pre-commit"]
        );
        assert_eq!(
            manager.run_manual_command(&["--all-files".to_string(), "mypy".to_string()]),
            vec!["pre-commit", "run", "--hook-stage", "manual", "--all-files", "mypy"]
        );
        assert_eq!(manager.sample_config_command(), vec!["pre-commit", "sample-config"]);
        assert_eq!(
            manager.autoupdate_command(&["--bleeding-edge".to_string()]),
            vec!["pre-commit", "autoupdate", "--bleeding-edge"]
        );
    }

    #[test]
    fn test_configured_program() {
        let runner = CommandRunner::new(MockExecutor::new(), Tracer::new(TraceSettings::default()));
        let config = HooksConfig {
            program: "prek".to_string(),
            ..HooksConfig::default()
        };
        let manager = HookManager::new(&runner, config);
        assert_eq!(manager.sample_config_command(), vec!["prek", "sample-config"]);
    }
}
